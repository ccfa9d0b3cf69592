use crate::combinations::assignment;
use crate::eval::{Binding, EvalError};
use crate::parser::ParsedFormula;
use crate::symbols::extract_variables;
use log::debug;
use rayon::prelude::*;
use std::{
    fmt::{self, Display},
    str::FromStr,
};

pub const DEFAULT_MAX_VARS: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Single cell in a truth table.
///
/// The header row consists of [`Label`] cells: the variable names followed by the expression.
/// Every other cell is either [`True`] or [`False`].
///
/// [`Label`]: TruthTableEntry::Label
/// [`True`]: TruthTableEntry::True
/// [`False`]: TruthTableEntry::False
pub enum TruthTableEntry {
    /// Column heading
    Label(String),
    /// Assigned or computed 'true' value
    True,
    /// Assigned or computed 'false' value
    False,
}

impl TruthTableEntry {
    pub const fn from_bool(value: bool) -> Self {
        if value {
            Self::True
        } else {
            Self::False
        }
    }

    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::True => Some(true),
            Self::False => Some(false),
            Self::Label(_) => None,
        }
    }

    pub fn is_true(&self) -> bool {
        *self == Self::True
    }

    pub fn is_false(&self) -> bool {
        *self == Self::False
    }

    /// One-letter rendering: `T`, `F`, or the full label.
    pub fn short(&self) -> &str {
        match self {
            Self::True => "T",
            Self::False => "F",
            Self::Label(s) => s,
        }
    }
}

impl Display for TruthTableEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::True => "True",
            Self::False => "False",
            Self::Label(s) => s,
        })
    }
}

impl FromStr for TruthTableEntry {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "true" | "True" | "t" | "T" | "1" => Ok(Self::True),
            "false" | "False" | "f" | "F" | "0" => Ok(Self::False),
            _ => Err(anyhow::anyhow!("cannot parse {s} as truth-table entry")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruthTableOptions {
    /// Expressions with more variables are rejected.
    pub max_vars: usize,
    /// Evaluate rows on the rayon thread pool.
    pub parallel: bool,
}

impl TruthTableOptions {
    /// Only rejects expressions whose row count does not fit in a `usize`.
    pub const fn unbounded() -> Self {
        Self {
            max_vars: usize::MAX,
            parallel: false,
        }
    }
}

impl Default for TruthTableOptions {
    fn default() -> Self {
        Self {
            max_vars: DEFAULT_MAX_VARS,
            parallel: false,
        }
    }
}

/// Truth table of an expression.
///
/// Row `i` holds the values of combination `i` (see [`Combinations`]) in the order of
/// `vars`, followed by the value of the expression.
///
/// [`Combinations`]: crate::combinations::Combinations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthTable {
    pub vars: Vec<String>,
    pub expression: String,
    pub rows: Vec<Vec<bool>>,
}

impl TruthTable {
    /// Builds the table of any expression whose `2^n` rows are representable.
    ///
    /// Use [`build_with`] to put a lower cap on the number of variables.
    ///
    /// [`build_with`]: TruthTable::build_with
    pub fn build(expression: &str) -> Result<Self, EvalError> {
        Self::build_with(expression, &TruthTableOptions::unbounded())
    }

    pub fn build_with(expression: &str, options: &TruthTableOptions) -> Result<Self, EvalError> {
        let formula = ParsedFormula::parse(expression)?;
        Self::from_formula(&formula, options)
    }

    pub fn from_formula(
        formula: &ParsedFormula,
        options: &TruthTableOptions,
    ) -> Result<Self, EvalError> {
        let vars = extract_variables(&formula.source);
        let limit = options.max_vars.min(usize::BITS as usize - 1);

        if vars.len() > limit {
            return Err(EvalError::TooManyVariables {
                count: vars.len(),
                limit,
            });
        }

        let width = vars.len();
        let total = 1usize << width;
        debug!(
            "building truth table for {:?}: {} variables, {} rows",
            formula.source, width, total
        );

        let row = |index: usize| -> Result<Vec<bool>, EvalError> {
            let mut values: Vec<bool> = assignment(index, width).collect();
            let bindings: Binding = vars
                .iter()
                .map(String::as_str)
                .zip(values.iter().copied())
                .collect();
            values.push(formula.eval(&bindings)?);
            Ok(values)
        };

        let rows = if options.parallel {
            (0..total)
                .into_par_iter()
                .map(&row)
                .collect::<Result<Vec<_>, _>>()?
        } else {
            (0..total).map(&row).collect::<Result<Vec<_>, _>>()?
        };

        Ok(Self {
            vars,
            expression: formula.source.clone(),
            rows,
        })
    }

    /// Number of rows including the header.
    pub fn num_rows(&self) -> usize {
        self.rows.len() + 1
    }

    pub fn header(&self) -> Vec<TruthTableEntry> {
        self.vars
            .iter()
            .chain(std::iter::once(&self.expression))
            .map(|s| TruthTableEntry::Label(s.clone()))
            .collect()
    }

    /// Row-major matrix of all cells, header first.
    pub fn cells(&self) -> Vec<Vec<TruthTableEntry>> {
        std::iter::once(self.header())
            .chain(self.rows.iter().map(|row| {
                row.iter()
                    .copied()
                    .map(TruthTableEntry::from_bool)
                    .collect()
            }))
            .collect()
    }

    /// Rows for which the expression evaluates to `result`.
    pub fn models(&self, result: bool) -> impl Iterator<Item = &[bool]> {
        self.rows
            .iter()
            .filter(move |row| row.last() == Some(&result))
            .map(Vec::as_slice)
    }

    pub fn is_tautology(&self) -> bool {
        self.models(false).next().is_none()
    }

    pub fn is_contradiction(&self) -> bool {
        self.models(true).next().is_none()
    }
}

/// Parses `expression` and builds its truth table.
///
/// The only limit on the number of variables is that the row count must fit in a `usize`;
/// larger inputs fail with [`EvalError::TooManyVariables`].
pub fn build_truth_table(expression: &str) -> Result<TruthTable, EvalError> {
    TruthTable::build(expression)
}
