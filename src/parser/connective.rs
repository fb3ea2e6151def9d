//! Finding the outermost operator of formula text.
//!
//! Formula text is first brought into canonical form: whitespace is dropped and the word
//! operators are replaced by their single character symbols. The main connective is then found
//! by a single left to right scan that prefers operators at a lower parenthesis depth and, at
//! equal depth, the operator that comes first in [`Connective::PRIORITY`].

use std::fmt::Display;

/// Word operators and the symbols that replace them, applied in this order.
const REPLACEMENTS: [(&str, &str); 5] = [
    ("and", "&"),
    ("or", "|"),
    ("implies", ">"),
    ("iff", "<"),
    ("not", "-"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Connective {
    And,
    Or,
    If,
    Iff,
    Not,
}

impl Connective {
    /// Tie-break order for operators at the same depth, earlier entries win.
    pub const PRIORITY: [Connective; 5] = [
        Connective::And,
        Connective::Or,
        Connective::If,
        Connective::Iff,
        Connective::Not,
    ];

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '&' => Some(Connective::And),
            '|' => Some(Connective::Or),
            '>' => Some(Connective::If),
            '<' => Some(Connective::Iff),
            '-' => Some(Connective::Not),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Connective::And => "&",
            Connective::Or => "|",
            Connective::If => ">",
            Connective::Iff => "<",
            Connective::Not => "-",
        }
    }

    fn rank(self) -> usize {
        Connective::PRIORITY
            .iter()
            .position(|&c| c == self)
            .unwrap_or(Connective::PRIORITY.len())
    }

    /// Check if this connective wins a tie against `other` at the same depth.
    pub fn outranks(self, other: Connective) -> bool {
        self.rank() < other.rank()
    }
}

impl Display for Connective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// The winning operator of a scan together with where it was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MainConnective {
    pub connective: Connective,
    /// Parenthesis depth of the operator. Negative only for unbalanced text.
    pub depth: isize,
    /// Byte offset of the operator in the scanned text.
    pub position: usize,
}

/// Remove whitespace and replace the word operators by their symbols. Replacement is plain
/// substring substitution, so atom names containing an operator word are rewritten as well.
pub fn normalize(text: &str) -> String {
    let mut canonical: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    for (word, symbol) in REPLACEMENTS {
        canonical = canonical.replace(word, symbol);
    }
    canonical
}

/// Scan canonical text for its main connective. Returns `None` for text without operators.
pub fn find_main_connective(canonical: &str) -> Option<MainConnective> {
    let mut depth: isize = 0;
    let mut found: Option<MainConnective> = None;
    for (position, c) in canonical.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {
                let Some(connective) = Connective::from_symbol(c) else {
                    continue;
                };
                let candidate = MainConnective {
                    connective,
                    depth,
                    position,
                };
                found = match found {
                    None => Some(candidate),
                    Some(current) if depth < current.depth => Some(candidate),
                    Some(current)
                        if depth == current.depth && connective.outranks(current.connective) =>
                    {
                        Some(candidate)
                    }
                    keep => keep,
                };
            }
        }
    }
    found
}

/// The symbol of the main connective of `text`, or the empty string for a bare atom.
pub fn main_connective(text: &str) -> &'static str {
    find_main_connective(&normalize(text))
        .map(|main| main.connective.symbol())
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn main_connective_examples() {
        assert_eq!(main_connective("A > (B & C)"), ">");
        assert_eq!(main_connective("C < B"), "<");
        assert_eq!(main_connective("- C"), "-");
        assert_eq!(main_connective("- (- A)"), "-");
        assert_eq!(main_connective("(-(A & B) > (C < D))"), ">");
        assert_eq!(main_connective("((A & B) | D)"), "|");
    }

    #[test]
    fn atoms_have_no_main_connective() {
        assert_eq!(main_connective("A"), "");
        assert_eq!(main_connective("(Rain)"), "");
        assert_eq!(main_connective(""), "");
    }

    #[test]
    fn priority_breaks_ties_at_equal_depth() {
        // & wins over > even though > comes first
        assert_eq!(main_connective("A > B & C"), "&");
        assert_eq!(main_connective("A < B | C"), "|");
        assert_eq!(main_connective("-A | B"), "|");
        // a shallower operator always wins
        assert_eq!(main_connective("(A & B) < C"), "<");
    }

    #[test]
    fn first_occurrence_is_kept() {
        let main = find_main_connective("A&B&C").unwrap();
        assert_eq!(main.connective, Connective::And);
        assert_eq!(main.position, 1);
        assert_eq!(main.depth, 0);

        let main = find_main_connective("(A|B)>(C|D)").unwrap();
        assert_eq!(main.connective, Connective::If);
        assert_eq!(main.position, 5);
    }

    #[test]
    fn reports_depth_of_nested_operator() {
        let main = find_main_connective("((A&B))").unwrap();
        assert_eq!(main.depth, 2);
        assert_eq!(main.position, 3);
    }

    #[test]
    fn normalize_replaces_words() {
        assert_eq!(
            normalize("((A implies B) and not (C or D)) iff E"),
            "((A>B)&-(C|D))<E"
        );
        assert_eq!(normalize(" A \t&\nB "), "A&B");
    }

    #[test]
    fn normalize_is_idempotent_on_canonical_text() {
        let canonical = normalize("not (P or Q) implies (R iff S)");
        assert_eq!(normalize(&canonical), canonical);
    }

    #[test]
    fn normalize_rewrites_operator_words_inside_atoms() {
        assert_eq!(normalize("Door"), "Do|");
    }

    #[test]
    fn priority_order() {
        assert!(Connective::And.outranks(Connective::Or));
        assert!(Connective::If.outranks(Connective::Iff));
        assert!(Connective::Iff.outranks(Connective::Not));
        assert!(!Connective::Not.outranks(Connective::Not));
        assert!(!Connective::Or.outranks(Connective::And));
    }
}
