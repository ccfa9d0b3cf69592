#![warn(clippy::disallowed_types)]

pub use combinations::{generate_combinations, Combinations};
pub use eval::{evaluate, evaluate_parsed, Binding, EvalError};
pub use parser::{match_expression, Expression, ParseError, ParseResult, ParsedFormula};
pub use symbols::extract_variables;
pub use truth_table::{
    build_truth_table, TruthTable, TruthTableEntry, TruthTableOptions, DEFAULT_MAX_VARS,
};

pub mod combinations;
pub mod eval;
pub mod parser;
pub mod parser_io;
pub mod truth_table_io;

mod truth_table;

mod symbols;
