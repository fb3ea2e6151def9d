//! Decomposition rules.
//!
//! Every composite formula has exactly one rule. A rule either extends all open leaves below
//! the broken formula with a sequence of consequences, or splits those leaves and extends the
//! new left and right leaves with their own sequences. Order within a sequence matters: adding
//! stops as soon as a leaf closes.

use crate::common::Formula;

/// What breaking a formula adds to the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expansion {
    /// Single branch extension with the given formulas.
    Extend(Vec<Formula>),
    /// Split into two branches, each extended with its own formulas.
    Branch {
        left: Vec<Formula>,
        right: Vec<Formula>,
    },
}

/// Look up the rule for a formula. Literals have no rule and return `None`.
pub fn decompose(formula: &Formula) -> Option<Expansion> {
    match formula {
        Formula::Atom(_) => None,
        // X ∧ Y → {X, Y}
        Formula::And(x, y) => Some(Expansion::Extend(vec![(**x).clone(), (**y).clone()])),
        // X ∨ Y → {X} | {Y}
        Formula::Or(x, y) => Some(Expansion::Branch {
            left: vec![(**x).clone()],
            right: vec![(**y).clone()],
        }),
        // X → Y → {¬X} | {Y}
        Formula::If(x, y) => Some(Expansion::Branch {
            left: vec![!&**x],
            right: vec![(**y).clone()],
        }),
        // X ↔ Y → {X, Y} | {¬X, ¬Y}
        Formula::Iff(x, y) => Some(Expansion::Branch {
            left: vec![(**x).clone(), (**y).clone()],
            right: vec![!&**x, !&**y],
        }),
        Formula::Not(inner) => match &**inner {
            Formula::Atom(_) => None,
            // ¬¬X → {X}
            Formula::Not(x) => Some(Expansion::Extend(vec![(**x).clone()])),
            // ¬(X ∧ Y) → {¬X} | {¬Y}
            Formula::And(x, y) => Some(Expansion::Branch {
                left: vec![!&**x],
                right: vec![!&**y],
            }),
            // ¬(X ∨ Y) → {¬X, ¬Y}
            Formula::Or(x, y) => Some(Expansion::Extend(vec![!&**x, !&**y])),
            // ¬(X → Y) → {X, ¬Y}
            Formula::If(x, y) => Some(Expansion::Extend(vec![(**x).clone(), !&**y])),
            // ¬(X ↔ Y) → {X, ¬Y} | {¬X, Y}
            Formula::Iff(x, y) => Some(Expansion::Branch {
                left: vec![(**x).clone(), !&**y],
                right: vec![!&**x, (**y).clone()],
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a() -> Formula {
        Formula::atom("A")
    }

    fn b() -> Formula {
        Formula::atom("B")
    }

    #[test]
    fn literals_have_no_rule() {
        assert_eq!(decompose(&a()), None);
        assert_eq!(decompose(&!a()), None);
    }

    #[test]
    fn extending_rules() {
        assert_eq!(decompose(&!!a()), Some(Expansion::Extend(vec![a()])));
        assert_eq!(
            decompose(&Formula::and(a(), b())),
            Some(Expansion::Extend(vec![a(), b()]))
        );
        assert_eq!(
            decompose(&!Formula::or(a(), b())),
            Some(Expansion::Extend(vec![!a(), !b()]))
        );
        assert_eq!(
            decompose(&!Formula::implies(a(), b())),
            Some(Expansion::Extend(vec![a(), !b()]))
        );
    }

    #[test]
    fn branching_rules() {
        assert_eq!(
            decompose(&Formula::or(a(), b())),
            Some(Expansion::Branch {
                left: vec![a()],
                right: vec![b()]
            })
        );
        assert_eq!(
            decompose(&!Formula::and(a(), b())),
            Some(Expansion::Branch {
                left: vec![!a()],
                right: vec![!b()]
            })
        );
        assert_eq!(
            decompose(&Formula::implies(a(), b())),
            Some(Expansion::Branch {
                left: vec![!a()],
                right: vec![b()]
            })
        );
        assert_eq!(
            decompose(&Formula::iff(a(), b())),
            Some(Expansion::Branch {
                left: vec![a(), b()],
                right: vec![!a(), !b()]
            })
        );
        assert_eq!(
            decompose(&!Formula::iff(a(), b())),
            Some(Expansion::Branch {
                left: vec![a(), !b()],
                right: vec![!a(), b()]
            })
        );
    }

    #[test]
    fn operands_are_kept_whole() {
        let nested = Formula::and(Formula::or(a(), b()), !!b());
        assert_eq!(
            decompose(&nested),
            Some(Expansion::Extend(vec![Formula::or(a(), b()), !!b()]))
        );
    }
}
