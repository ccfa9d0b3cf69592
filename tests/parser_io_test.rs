use pretty_assertions::assert_eq;
use rstruth::parser::ParsedFormula;
use rstruth::parser_io::SymbolicParseTree;

#[test]
fn test_parse_tree_nodes() {
    let parsed = ParsedFormula::parse("!(a && b) || c").unwrap();
    let tree = SymbolicParseTree::new(&parsed.tree);

    assert_eq!(
        tree.labels,
        vec!["Or", "Not", "Group", "And", "Var a", "Var b", "Var c"]
    );
    assert_eq!(
        tree.edges,
        vec![
            (0, "L".to_string(), 1),
            (1, String::new(), 2),
            (2, String::new(), 3),
            (3, "L".to_string(), 4),
            (3, "R".to_string(), 5),
            (0, "R".to_string(), 6),
        ]
    );
}

#[test]
fn test_render_dot() {
    let parsed = ParsedFormula::parse("a && a").unwrap();
    let mut output = Vec::new();

    SymbolicParseTree::new(&parsed.tree)
        .render_dot(&mut output)
        .unwrap();

    let dot = String::from_utf8(output).unwrap();
    assert!(dot.starts_with("digraph parse_tree {"));
    assert!(dot.contains("n_0 -> n_1"));
    assert!(dot.contains("n_0 -> n_2"));
    assert!(dot.contains("Var a"));
}

#[test]
fn test_long_chain_tree() {
    let parsed = ParsedFormula::parse(&vec!["a"; 5000].join(" || ")).unwrap();
    let tree = SymbolicParseTree::new(&parsed.tree);

    assert_eq!(tree.labels.len(), 9999);
    assert_eq!(tree.edges.len(), 9998);
}
