use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref IDENTIFIER: Regex =
        Regex::new(r"\b\p{Alphabetic}+\b").expect("invalid identifier pattern");
}

/// Scans `expression` for variable names, in order of first occurrence.
///
/// This is a lexical pass and does not validate the expression: it returns a result for
/// malformed input as well, which makes it usable while the expression is still being typed.
/// Only whole words are reported, so runs glued to digits or underscores (`a1`, `snake_case`)
/// are skipped. For an expression that parses, the result equals [`ParsedFormula::vars`];
/// for anything else it is a best-effort guess.
///
/// [`ParsedFormula::vars`]: crate::parser::ParsedFormula::vars
pub fn extract_variables(expression: &str) -> Vec<String> {
    IDENTIFIER
        .find_iter(expression)
        .map(|m| m.as_str())
        .unique()
        .map(str::to_string)
        .collect()
}
