extern crate dot;

use std::io;
use std::io::Write;

use crate::parser::*;

/// GraphViz view of a parse tree; nodes are numbered in pre-order.
pub struct SymbolicParseTree {
    pub labels: Vec<String>,
    pub edges: Vec<GraphEdge>,
}

pub type GraphNode = usize;
pub type GraphEdge = (usize, String, usize);

impl SymbolicParseTree {
    pub fn render_dot<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        dot::render(self, writer)
    }

    fn collect_nodes(&mut self, root: &Expression) {
        // (node, parent, edge label)
        let mut stack: Vec<(&Expression, Option<GraphNode>, &str)> = vec![(root, None, "")];

        while let Some((node, parent, edge)) = stack.pop() {
            let id = self.labels.len();

            self.labels.push(match node {
                Expression::Var(v) => format!("Var {v}"),
                Expression::Not(_) => "Not".to_string(),
                Expression::And(_, _) => "And".to_string(),
                Expression::Or(_, _) => "Or".to_string(),
                Expression::Group(_) => "Group".to_string(),
            });

            if let Some(parent) = parent {
                self.edges.push((parent, edge.to_string(), id));
            }

            match node {
                Expression::And(l, r) | Expression::Or(l, r) => {
                    stack.push((r.as_ref(), Some(id), "R"));
                    stack.push((l.as_ref(), Some(id), "L"));
                }
                Expression::Not(f) | Expression::Group(f) => {
                    stack.push((f.as_ref(), Some(id), ""));
                }
                Expression::Var(_) => {}
            }
        }
    }

    pub fn new(src: &Expression) -> Self {
        let mut tree = Self {
            labels: Vec::new(),
            edges: Vec::new(),
        };
        tree.collect_nodes(src);
        tree
    }
}

impl<'a> dot::Labeller<'a, GraphNode, GraphEdge> for SymbolicParseTree {
    fn graph_id(&self) -> dot::Id<'a> {
        dot::Id::new("parse_tree").expect("cannot create Id named 'parse_tree'")
    }

    fn node_id(&self, n: &GraphNode) -> dot::Id<'a> {
        dot::Id::new(format!("n_{}", n))
            .unwrap_or_else(|_| panic!("cannot create Id named 'n_{n}'"))
    }

    fn node_label(&self, n: &GraphNode) -> dot::LabelText<'a> {
        dot::LabelText::label(self.labels[*n].clone())
    }

    fn edge_label(&self, e: &GraphEdge) -> dot::LabelText<'a> {
        dot::LabelText::label(e.1.clone())
    }
}

impl<'a> dot::GraphWalk<'a, GraphNode, GraphEdge> for SymbolicParseTree {
    fn nodes(&self) -> dot::Nodes<'a, GraphNode> {
        (0..self.labels.len()).collect()
    }

    fn edges(&self) -> dot::Edges<'a, GraphEdge> {
        self.edges.clone().into()
    }

    fn source(&self, e: &GraphEdge) -> GraphNode {
        e.0
    }

    fn target(&self, e: &GraphEdge) -> GraphNode {
        e.2
    }
}
