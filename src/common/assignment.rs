use std::collections::BTreeMap;
use std::fmt::Display;

use itertools::Itertools;

use super::{Conflict, Formula};

/// Truth values of atoms as read off a single branch.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Valuation {
    inner: BTreeMap<String, bool>,
}

impl Valuation {
    pub fn new() -> Self {
        Valuation::default()
    }

    /// Try adding the literal to the valuation. Formulas that are not literals carry no value
    /// of their own and are ignored. If the atom already holds the opposite value a conflict is
    /// returned.
    pub fn try_assign(&mut self, formula: &Formula) -> Result<(), Conflict> {
        let (name, value) = match formula {
            Formula::Atom(name) => (name, true),
            Formula::Not(inner) => match &**inner {
                Formula::Atom(name) => (name, false),
                _ => return Ok(()),
            },
            _ => return Ok(()),
        };
        match self.inner.get(name) {
            Some(&old) if old != value => Err(Conflict {}),
            Some(_) => Ok(()),
            None => {
                self.inner.insert(name.clone(), value);
                Ok(())
            }
        }
    }

    /// The value of an atom, if the branch mentions it.
    pub fn value(&self, atom: &str) -> Option<bool> {
        self.inner.get(atom).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.inner.iter().map(|(name, &value)| (name.as_str(), value))
    }

}

impl Display for Valuation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            self.iter()
                .map(|(name, value)| format!("{}={}", name, if value { "T" } else { "F" }))
                .join(", ")
        )
    }
}
