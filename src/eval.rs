use crate::parser::{Expression, ParseError, ParseResult, ParsedFormula};
use crate::truth_table::TruthTableEntry;
use rustc_hash::FxHashMap;
use std::error::Error;
use std::fmt::{self, Display};
use std::str::FromStr;

/// Assignment of truth values to variable names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Binding {
    values: FxHashMap<String, bool>,
}

impl Binding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value bound to `name`, or `None` when the variable is not bound.
    pub fn get(&self, name: &str) -> Option<bool> {
        self.values.get(name).copied()
    }

    pub fn insert<S: Into<String>>(&mut self, name: S, value: bool) -> Option<bool> {
        self.values.insert(name.into(), value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for Binding {
    fn from_iter<I: IntoIterator<Item = (S, bool)>>(iter: I) -> Self {
        let mut binding = Self::new();
        binding.extend(iter);
        binding
    }
}

impl<S: Into<String>> Extend<(S, bool)> for Binding {
    fn extend<I: IntoIterator<Item = (S, bool)>>(&mut self, iter: I) {
        self.values
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v)));
    }
}

impl FromStr for Binding {
    type Err = anyhow::Error;

    /// Parses comma separated assignments such as `a=true, b=0`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut binding = Self::new();

        for assignment in s.split(',').map(str::trim).filter(|a| !a.is_empty()) {
            let (name, value) = assignment
                .split_once('=')
                .ok_or_else(|| anyhow::anyhow!("expected name=value, got {assignment}"))?;
            let name = name.trim();

            if name.is_empty() || !name.chars().all(char::is_alphabetic) {
                anyhow::bail!("{name:?} is not a valid variable name");
            }

            let value = value
                .trim()
                .parse::<TruthTableEntry>()?
                .as_bool()
                .ok_or_else(|| anyhow::anyhow!("{assignment} does not assign a truth value"))?;

            if binding.insert(name, value).is_some() {
                anyhow::bail!("variable {name} is assigned more than once");
            }
        }

        Ok(binding)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// The expression does not match the grammar.
    ParseFailed(ParseError),
    /// The expression references a variable without a value.
    UnboundVariable(String),
    /// The truth table would have more rows than the configured limit permits.
    TooManyVariables { count: usize, limit: usize },
}

impl Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParseFailed(e) => Display::fmt(e, f),
            Self::UnboundVariable(name) => write!(f, "variable `{name}` is not bound"),
            Self::TooManyVariables { count, limit } => write!(
                f,
                "expression has {count} variables, at most {limit} are supported"
            ),
        }
    }
}

impl Error for EvalError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ParseFailed(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParseError> for EvalError {
    fn from(e: ParseError) -> Self {
        Self::ParseFailed(e)
    }
}

enum Step<'e> {
    Visit(&'e Expression),
    Not,
    And,
    Or,
}

impl Expression {
    /// Reduces the tree to a single truth value.
    ///
    /// Both operands of a binary operator are always evaluated, so a missing binding is
    /// reported even where the other operand would decide the result. Operands are evaluated
    /// left to right with an explicit stack, so long operator chains do not grow the call stack.
    pub fn eval(&self, bindings: &Binding) -> Result<bool, EvalError> {
        let mut steps = vec![Step::Visit(self)];
        let mut values: Vec<bool> = Vec::new();

        while let Some(step) = steps.pop() {
            match step {
                Step::Visit(Self::Var(name)) => values.push(
                    bindings
                        .get(name)
                        .ok_or_else(|| EvalError::UnboundVariable(name.clone()))?,
                ),
                Step::Visit(Self::Not(e)) => {
                    steps.push(Step::Not);
                    steps.push(Step::Visit(e));
                }
                Step::Visit(Self::And(l, r)) => {
                    steps.push(Step::And);
                    steps.push(Step::Visit(r));
                    steps.push(Step::Visit(l));
                }
                Step::Visit(Self::Or(l, r)) => {
                    steps.push(Step::Or);
                    steps.push(Step::Visit(r));
                    steps.push(Step::Visit(l));
                }
                Step::Visit(Self::Group(e)) => steps.push(Step::Visit(e)),
                Step::Not => {
                    let v = pop_operand(&mut values);
                    values.push(!v);
                }
                Step::And => {
                    let r = pop_operand(&mut values);
                    let l = pop_operand(&mut values);
                    values.push(l && r);
                }
                Step::Or => {
                    let r = pop_operand(&mut values);
                    let l = pop_operand(&mut values);
                    values.push(l || r);
                }
            }
        }

        Ok(pop_operand(&mut values))
    }
}

// every operator step is scheduled after the visits producing its operands
fn pop_operand(values: &mut Vec<bool>) -> bool {
    values.pop().expect("operand stack underflow")
}

impl ParsedFormula {
    pub fn eval(&self, bindings: &Binding) -> Result<bool, EvalError> {
        self.tree.eval(bindings)
    }
}

/// Evaluates the outcome of [`match_expression`]; a failed match yields [`EvalError::ParseFailed`].
///
/// [`match_expression`]: crate::parser::match_expression
pub fn evaluate_parsed(result: &ParseResult, bindings: &Binding) -> Result<bool, EvalError> {
    match result {
        Ok(formula) => formula.eval(bindings),
        Err(e) => Err(EvalError::ParseFailed(e.clone())),
    }
}

/// Parses `expression` and evaluates it under `bindings`.
pub fn evaluate(expression: &str, bindings: &Binding) -> Result<bool, EvalError> {
    let formula = ParsedFormula::parse(expression)?;
    formula.eval(bindings)
}
