mod assignment;
mod formula;

pub use assignment::*;
pub use formula::*;

/// Two literals on the same branch disagree on the value of an atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Conflict {}
