//! Propositional entailment by truth trees.
//!
//! A [`TruthTree`] starts from the premises and the negated goal and breaks every composite
//! formula until each branch either contains a formula together with its complement or holds
//! nothing but literals. The premises entail the goal iff every branch closes.
//!
//! ```
//! let tree = truthtree::run(&["A > B", "A"], "B").unwrap();
//! assert!(tree.entails());
//! ```

pub mod common;
pub mod parser;
pub mod render;
pub mod tableau;

pub use common::{Formula, Valuation};
pub use parser::{main_connective, normalize, parse, ParseError};
pub use render::TreePrinter;
pub use tableau::{prove, NodeId, TruthTree};

/// Parse premises and goal text. Blank premises are skipped, a blank goal is an error.
pub fn parse_inputs<S: AsRef<str>>(
    premises: &[S],
    goal: &str,
) -> Result<(Vec<Formula>, Formula), ParseError> {
    if goal.trim().is_empty() {
        return Err(ParseError::MissingGoal);
    }
    let premises = premises
        .iter()
        .map(|premise| premise.as_ref().trim())
        .filter(|premise| !premise.is_empty())
        .map(parse)
        .collect::<Result<Vec<_>, _>>()?;
    let goal = parse(goal)?;
    Ok((premises, goal))
}

/// Parse premises and goal and expand their tree to completion.
pub fn run<S: AsRef<str>>(premises: &[S], goal: &str) -> Result<TruthTree, ParseError> {
    let (premises, goal) = parse_inputs(premises, goal)?;
    tracing::debug!("proving {} from {} premises", goal, premises.len());
    Ok(prove(premises, goal))
}
