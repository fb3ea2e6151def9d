pub mod connective;
pub mod formula;

use nom::{bytes::complete::take_while1, IResult, Parser};
use thiserror::Error;

pub use connective::{find_main_connective, main_connective, normalize, Connective, MainConnective};
pub use formula::parse;

/// Reasons formula text cannot be turned into a formula.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty formula")]
    Empty,
    #[error("unbalanced parentheses in '{0}'")]
    Unbalanced(String),
    #[error("malformed formula '{0}'")]
    Malformed(String),
    #[error("invalid atom '{0}'")]
    InvalidAtom(String),
    #[error("no goal formula given")]
    MissingGoal,
}

fn parse_atom(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_').parse(input)
}
