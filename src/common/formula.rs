use std::{fmt::Display, ops::Not};

/// A propositional formula. Two formulas are equal iff they have the same shape and equal
/// operands, which is what branch closure compares.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Formula {
    Atom(String),
    Not(Box<Formula>),
    And(Box<Formula>, Box<Formula>),
    Or(Box<Formula>, Box<Formula>),
    If(Box<Formula>, Box<Formula>),
    Iff(Box<Formula>, Box<Formula>),
}

impl Formula {
    pub fn atom(name: impl Into<String>) -> Self {
        Formula::Atom(name.into())
    }

    pub fn and(left: Formula, right: Formula) -> Self {
        Formula::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Formula, right: Formula) -> Self {
        Formula::Or(Box::new(left), Box::new(right))
    }

    pub fn implies(antecedent: Formula, consequent: Formula) -> Self {
        Formula::If(Box::new(antecedent), Box::new(consequent))
    }

    pub fn iff(left: Formula, right: Formula) -> Self {
        Formula::Iff(Box::new(left), Box::new(right))
    }

    /// Atoms and negated atoms cannot be decomposed any further.
    pub fn is_literal(&self) -> bool {
        match self {
            Formula::Atom(_) => true,
            Formula::Not(inner) => matches!(**inner, Formula::Atom(_)),
            _ => false,
        }
    }

    /// The formula that closes a branch together with this one. A negation is complemented by
    /// its operand, everything else by its negation.
    pub fn complement(&self) -> Formula {
        match self {
            Formula::Not(inner) => (**inner).clone(),
            other => !other.clone(),
        }
    }

    /// Print the formula as canonical operator text, the form the parser accepts back.
    pub fn to_canonical(&self) -> String {
        match self {
            Formula::Atom(name) => name.clone(),
            Formula::Not(inner) => format!("-{}", inner.to_canonical()),
            Formula::And(l, r) => format!("({}&{})", l.to_canonical(), r.to_canonical()),
            Formula::Or(l, r) => format!("({}|{})", l.to_canonical(), r.to_canonical()),
            Formula::If(l, r) => format!("({}>{})", l.to_canonical(), r.to_canonical()),
            Formula::Iff(l, r) => format!("({}<{})", l.to_canonical(), r.to_canonical()),
        }
    }

    /// Nesting depth, an atom has depth 0.
    pub fn depth(&self) -> usize {
        match self {
            Formula::Atom(_) => 0,
            Formula::Not(inner) => inner.depth() + 1,
            Formula::And(l, r) | Formula::Or(l, r) | Formula::If(l, r) | Formula::Iff(l, r) => {
                l.depth().max(r.depth()) + 1
            }
        }
    }
}

impl Not for Formula {
    type Output = Self;
    fn not(self) -> Self::Output {
        Formula::Not(Box::new(self))
    }
}

impl Not for &Formula {
    type Output = Formula;
    fn not(self) -> Self::Output {
        Formula::Not(Box::new(self.clone()))
    }
}

impl Display for Formula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Formula::Atom(name) => write!(f, "{}", name),
            Formula::Not(inner) => write!(f, "¬{}", inner),
            Formula::And(l, r) => write!(f, "({} ∧ {})", l, r),
            Formula::Or(l, r) => write!(f, "({} ∨ {})", l, r),
            Formula::If(l, r) => write!(f, "({} → {})", l, r),
            Formula::Iff(l, r) => write!(f, "({} ↔ {})", l, r),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complement_of_negation_is_operand() {
        let a = Formula::atom("A");
        assert_eq!((!a.clone()).complement(), a);
        assert_eq!(a.complement(), !a.clone());
        // only one negation is stripped
        assert_eq!((!!a.clone()).complement(), !a);
    }

    #[test]
    fn literals() {
        let a = Formula::atom("A");
        assert!(a.is_literal());
        assert!((!&a).is_literal());
        assert!(!(!!a.clone()).is_literal());
        assert!(!Formula::and(a.clone(), a).is_literal());
    }

    #[test]
    fn structural_equality() {
        let left = Formula::implies(Formula::atom("A"), Formula::atom("B"));
        let right = Formula::implies(Formula::atom("A"), Formula::atom("B"));
        assert_eq!(left, right);
        assert_ne!(left, Formula::implies(Formula::atom("B"), Formula::atom("A")));
        assert_ne!(left, Formula::or(Formula::atom("A"), Formula::atom("B")));
    }

    #[test]
    fn display_uses_logic_glyphs() {
        let f = Formula::iff(
            !Formula::and(Formula::atom("A"), Formula::atom("B")),
            Formula::or(Formula::atom("C"), Formula::atom("D")),
        );
        assert_eq!(f.to_string(), "(¬(A ∧ B) ↔ (C ∨ D))");
        assert_eq!(f.to_canonical(), "(-(A&B)<(C|D))");
        assert_eq!(f.depth(), 3);
    }
}
