use nom::combinator::all_consuming;
use tracing::trace;

use super::{
    connective::{find_main_connective, normalize, Connective},
    parse_atom, ParseError,
};
use crate::common::Formula;

/// Parse formula text by repeatedly splitting it at its main connective.
pub fn parse(text: &str) -> Result<Formula, ParseError> {
    let canonical = normalize(text);
    if canonical.is_empty() {
        return Err(ParseError::Empty);
    }
    check_balanced(&canonical)?;
    trace!("parsing '{}'", canonical);
    build(&canonical)
}

fn check_balanced(canonical: &str) -> Result<(), ParseError> {
    let mut depth: isize = 0;
    for c in canonical.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
        if depth < 0 {
            return Err(ParseError::Unbalanced(canonical.to_string()));
        }
    }
    if depth != 0 {
        return Err(ParseError::Unbalanced(canonical.to_string()));
    }
    Ok(())
}

/// Drop parentheses that enclose the whole text, as often as they do.
fn strip_outer(mut text: &str) -> &str {
    while text.starts_with('(') && closing_paren(text) == Some(text.len() - 1) {
        text = &text[1..text.len() - 1];
    }
    text
}

/// Byte offset of the parenthesis closing the one that opens `text`.
fn closing_paren(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

// `text` is balanced canonical text
fn build(text: &str) -> Result<Formula, ParseError> {
    let inner = strip_outer(text);
    if inner.is_empty() {
        return Err(ParseError::Malformed(text.to_string()));
    }

    let Some(main) = find_main_connective(inner) else {
        let (_, name) = all_consuming(parse_atom)(inner)
            .map_err(|_| ParseError::InvalidAtom(inner.to_string()))?;
        return Ok(Formula::atom(name));
    };
    if main.depth != 0 {
        return Err(ParseError::Malformed(inner.to_string()));
    }

    let (left, right) = (&inner[..main.position], &inner[main.position + 1..]);
    match main.connective {
        Connective::Not => {
            if !left.is_empty() {
                return Err(ParseError::Malformed(inner.to_string()));
            }
            Ok(!build(right)?)
        }
        binary => {
            if left.is_empty() || right.is_empty() {
                return Err(ParseError::Malformed(inner.to_string()));
            }
            let (left, right) = (build(left)?, build(right)?);
            Ok(match binary {
                Connective::And => Formula::and(left, right),
                Connective::Or => Formula::or(left, right),
                Connective::If => Formula::implies(left, right),
                Connective::Iff => Formula::iff(left, right),
                Connective::Not => unreachable!("negation is handled above"),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom(name: &str) -> Formula {
        Formula::atom(name)
    }

    #[test]
    fn parses_atoms() {
        assert_eq!(parse("A"), Ok(atom("A")));
        assert_eq!(parse("  (( rain_2 )) "), Ok(atom("rain_2")));
    }

    #[test]
    fn parses_each_connective() {
        assert_eq!(parse("A & B"), Ok(Formula::and(atom("A"), atom("B"))));
        assert_eq!(parse("A | B"), Ok(Formula::or(atom("A"), atom("B"))));
        assert_eq!(parse("A > B"), Ok(Formula::implies(atom("A"), atom("B"))));
        assert_eq!(parse("A < B"), Ok(Formula::iff(atom("A"), atom("B"))));
        assert_eq!(parse("- A"), Ok(!atom("A")));
        assert_eq!(parse("- (- A)"), Ok(!!atom("A")));
    }

    #[test]
    fn parses_word_operators() {
        let expected = Formula::iff(
            Formula::and(
                Formula::implies(atom("A"), atom("B")),
                !Formula::or(atom("C"), atom("D")),
            ),
            atom("E"),
        );
        assert_eq!(
            parse("((A implies B) and not (C or D)) iff E"),
            Ok(expected)
        );
    }

    #[test]
    fn splits_by_priority_at_equal_depth() {
        // & outranks > so it becomes the main connective
        assert_eq!(
            parse("A > B & C"),
            Ok(Formula::and(Formula::implies(atom("A"), atom("B")), atom("C")))
        );
        assert_eq!(
            parse("-A | B"),
            Ok(Formula::or(!atom("A"), atom("B")))
        );
        // repeated operators split at their first occurrence
        assert_eq!(
            parse("A & B & C"),
            Ok(Formula::and(atom("A"), Formula::and(atom("B"), atom("C"))))
        );
    }

    #[test]
    fn parses_nested_parentheses() {
        assert_eq!(
            parse("(-(A & B) > (C < D))"),
            Ok(Formula::implies(
                !Formula::and(atom("A"), atom("B")),
                Formula::iff(atom("C"), atom("D"))
            ))
        );
        assert_eq!(
            parse("(A | B) & (C | D)"),
            Ok(Formula::and(
                Formula::or(atom("A"), atom("B")),
                Formula::or(atom("C"), atom("D"))
            ))
        );
    }

    #[test]
    fn rejects_malformed_text() {
        assert_eq!(parse("   "), Err(ParseError::Empty));
        assert_eq!(parse("(A & B"), Err(ParseError::Unbalanced("(A&B".into())));
        assert_eq!(parse("A & B)"), Err(ParseError::Unbalanced("A&B)".into())));
        assert_eq!(parse("A &"), Err(ParseError::Malformed("A&".into())));
        assert_eq!(parse("A -B"), Err(ParseError::Malformed("A-B".into())));
        assert_eq!(parse("()"), Err(ParseError::Malformed("()".into())));
        assert_eq!(
            parse("(A & B)(C & D)"),
            Err(ParseError::Malformed("(A&B)(C&D)".into()))
        );
        assert_eq!(parse("A$"), Err(ParseError::InvalidAtom("A$".into())));
    }

    #[test]
    fn canonical_text_parses_back() {
        let formula = parse("not (P and Q) iff (not P or not Q)").unwrap();
        assert_eq!(parse(&formula.to_canonical()), Ok(formula));
    }
}
