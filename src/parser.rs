use itertools::Itertools;
use lazy_static::lazy_static;
use log::{debug, trace};
use regex::Regex;
use std::error::Error;
use std::fmt::{self, Display};
use std::io;
use std::io::BufRead;
use std::iter::Peekable;
use std::result::Result;
use std::slice::Iter;
use std::str::FromStr;
use std::string::String;
use std::vec::Vec;

lazy_static! {
    static ref TOKENIZER: Regex = Regex::new(
        r"(?P<and>&&)|(?P<or>\|\|)|(?P<not>!)|(?P<open>\()|(?P<close>\))|(?P<identifier>\p{Alphabetic}+)|(?P<space>\s+)|(?P<unknown>.)"
    )
    .expect("invalid tokenizer pattern");
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolicToken {
    Var(String),
    And,
    Or,
    Not,
    OpenParen,
    CloseParen,
    Eof,
}

impl Display for SymbolicToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Var(v) => write!(f, "variable `{v}`"),
            Self::And => f.write_str("`&&`"),
            Self::Or => f.write_str("`||`"),
            Self::Not => f.write_str("`!`"),
            Self::OpenParen => f.write_str("`(`"),
            Self::CloseParen => f.write_str("`)`"),
            Self::Eof => f.write_str("end of input"),
        }
    }
}

/// A token together with its byte offset in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: SymbolicToken,
    pub offset: usize,
}

/// Parse tree of a propositional formula.
///
/// Trees produced by the parser keep every pair of parentheses as a [`Group`] node,
/// so printing a parsed tree yields an expression that parses back into the same tree.
///
/// [`Group`]: Expression::Group
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expression {
    Var(String),
    Not(Box<Expression>),
    And(Box<Expression>, Box<Expression>),
    Or(Box<Expression>, Box<Expression>),
    Group(Box<Expression>),
}

impl Expression {
    /// Variables referenced by the tree, in order of first occurrence.
    pub fn variables(&self) -> Vec<String> {
        let mut names: Vec<&String> = Vec::new();
        let mut stack = vec![self];

        while let Some(node) = stack.pop() {
            match node {
                Self::Var(v) => names.push(v),
                Self::Not(f) | Self::Group(f) => stack.push(f),
                Self::And(l, r) | Self::Or(l, r) => {
                    stack.push(r);
                    stack.push(l);
                }
            }
        }

        names.into_iter().unique().cloned().collect()
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Var(v) => f.write_str(v),
            Self::Not(e) => write!(f, "!{e}"),
            Self::And(l, r) => write!(f, "{l} && {r}"),
            Self::Or(l, r) => write!(f, "{l} || {r}"),
            Self::Group(e) => write!(f, "({e})"),
        }
    }
}

/// Diagnostic for input that does not match the grammar.
///
/// `line` and `column` are 1-based; the column counts characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl ParseError {
    fn at(source: &str, offset: usize, message: impl Into<String>) -> Self {
        let prefix = &source[..offset];
        let line = prefix.matches('\n').count() + 1;
        let column = prefix
            .rsplit('\n')
            .next()
            .map_or(0, |l| l.chars().count())
            + 1;

        Self {
            message: message.into(),
            line,
            column,
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}, col {}: {}", self.line, self.column, self.message)
    }
}

impl Error for ParseError {}

impl From<ParseError> for io::Error {
    fn from(e: ParseError) -> Self {
        Self::new(io::ErrorKind::InvalidData, e)
    }
}

/// Successfully parsed expression: the source text, its variables and its parse tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFormula {
    pub source: String,
    pub vars: Vec<String>,
    pub tree: Expression,
}

pub type ParseResult = Result<ParsedFormula, ParseError>;

/// Checks `expression` against the grammar, returning the parse tree or a diagnostic.
pub fn match_expression(expression: &str) -> ParseResult {
    ParsedFormula::parse(expression)
}

impl ParsedFormula {
    /// Reads and parses a formula; surrounding whitespace is dropped from the stored source.
    pub fn new(contents: &mut dyn BufRead) -> io::Result<Self> {
        let mut src = String::new();
        contents.read_to_string(&mut src)?;

        Ok(Self::parse(src.trim())?)
    }

    pub fn parse(source: &str) -> ParseResult {
        let tokens = tokenize(source)?;
        trace!("tokens: {:?}", tokens);

        let mut parser = Parser {
            source,
            tokens: tokens.iter().peekable(),
            depth: 0,
        };
        let tree = parser.parse_formula()?;
        let vars = tree.variables();
        debug!("parsed {:?}: {} variables", source, vars.len());

        Ok(Self {
            source: source.to_string(),
            vars,
            tree,
        })
    }
}

impl FromStr for ParsedFormula {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Splits `source` into tokens, terminated by [`SymbolicToken::Eof`].
pub fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
    let mut result = Vec::new();

    for c in TOKENIZER.captures_iter(source) {
        let Some(m) = c.get(0) else { continue };
        let kind = if c.name("and").is_some() {
            SymbolicToken::And
        } else if c.name("or").is_some() {
            SymbolicToken::Or
        } else if c.name("not").is_some() {
            SymbolicToken::Not
        } else if c.name("open").is_some() {
            SymbolicToken::OpenParen
        } else if c.name("close").is_some() {
            SymbolicToken::CloseParen
        } else if let Some(identifier) = c.name("identifier") {
            SymbolicToken::Var(identifier.as_str().to_string())
        } else if c.name("space").is_some() {
            continue;
        } else {
            return Err(ParseError::at(
                source,
                m.start(),
                format!("Unexpected character `{}`", m.as_str()),
            ));
        };

        result.push(Token {
            kind,
            offset: m.start(),
        });
    }

    result.push(Token {
        kind: SymbolicToken::Eof,
        offset: source.len(),
    });

    Ok(result)
}

type TokenReader<'a> = Peekable<Iter<'a, Token>>;

/// Deepest parenthesis nesting accepted by the parser.
pub const MAX_NESTING: usize = 256;

struct Parser<'a> {
    source: &'a str,
    tokens: TokenReader<'a>,
    depth: usize,
}

// formula     := disjunction EOF
// disjunction := conjunction ("||" conjunction)*
// conjunction := unary ("&&" unary)*
// unary       := "!" primary | primary
// primary     := "(" disjunction ")" | identifier
impl<'a> Parser<'a> {
    fn parse_formula(&mut self) -> Result<Expression, ParseError> {
        let result = self.parse_disjunction()?;

        self.expect(&SymbolicToken::Eof)?;

        Ok(result)
    }

    fn parse_disjunction(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_conjunction()?;

        while self.peek_is(&SymbolicToken::Or) {
            self.expect(&SymbolicToken::Or)?;
            let right = self.parse_conjunction()?;
            left = Expression::Or(Box::new(left), Box::new(right));
        }

        Ok(left)
    }

    fn parse_conjunction(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_unary()?;

        while self.peek_is(&SymbolicToken::And) {
            self.expect(&SymbolicToken::And)?;
            let right = self.parse_unary()?;
            left = Expression::And(Box::new(left), Box::new(right));
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expression, ParseError> {
        if self.peek_is(&SymbolicToken::Not) {
            self.expect(&SymbolicToken::Not)?;
            let negated = self.parse_primary()?;
            Ok(Expression::Not(Box::new(negated)))
        } else {
            self.parse_primary()
        }
    }

    fn parse_primary(&mut self) -> Result<Expression, ParseError> {
        match self.tokens.next() {
            Some(Token {
                kind: SymbolicToken::OpenParen,
                offset,
            }) => {
                if self.depth >= MAX_NESTING {
                    return Err(ParseError::at(
                        self.source,
                        *offset,
                        format!("Expression nested too deeply (more than {MAX_NESTING} levels)"),
                    ));
                }

                self.depth += 1;
                let inner = self.parse_disjunction()?;
                self.expect(&SymbolicToken::CloseParen)?;
                self.depth -= 1;

                Ok(Expression::Group(Box::new(inner)))
            }
            Some(Token {
                kind: SymbolicToken::Var(v),
                ..
            }) => Ok(Expression::Var(v.clone())),
            Some(other) => Err(ParseError::at(
                self.source,
                other.offset,
                format!("Expected a variable, `!` or `(`, got {}", other.kind),
            )),
            None => Err(self.unexpected_end()),
        }
    }

    fn peek_is(&mut self, token: &SymbolicToken) -> bool {
        self.tokens.peek().is_some_and(|t| t.kind == *token)
    }

    fn expect(&mut self, token: &SymbolicToken) -> Result<(), ParseError> {
        match self.tokens.next() {
            Some(t) if t.kind == *token => Ok(()),
            Some(t) => Err(ParseError::at(
                self.source,
                t.offset,
                format!("Expected {}, got {}", token, t.kind),
            )),
            None => Err(self.unexpected_end()),
        }
    }

    fn unexpected_end(&self) -> ParseError {
        ParseError::at(self.source, self.source.len(), "Unexpected end of input")
    }
}
