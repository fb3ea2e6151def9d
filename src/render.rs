//! Text rendering of a finished truth tree.

use std::fmt::Write;

use crate::common::Formula;
use crate::tableau::{NodeId, TruthTree};

/// Glyphs used to draw a tree.
struct Style {
    branch: &'static str,
    last_branch: &'static str,
    trunk: &'static str,
    space: &'static str,
    broken: &'static str,
    closed: &'static str,
}

static UNICODE: Style = Style {
    branch: "├── ",
    last_branch: "└── ",
    trunk: "│   ",
    space: "    ",
    broken: "✓",
    closed: "✗",
};

static ASCII: Style = Style {
    branch: "|-- ",
    last_branch: "`-- ",
    trunk: "|   ",
    space: "    ",
    broken: "*",
    closed: "X",
};

/// Draws a tree one formula per line. Broken formulas carry the step at which they were broken,
/// closed branches end in a closure marker with the step at which they closed.
#[derive(Debug, Default, Clone, Copy)]
pub struct TreePrinter {
    ascii: bool,
}

impl TreePrinter {
    pub fn new() -> Self {
        TreePrinter::default()
    }

    /// Print formulas as canonical operator text and draw with ASCII characters only.
    pub fn ascii(mut self, ascii: bool) -> Self {
        self.ascii = ascii;
        self
    }

    pub fn render(&self, tree: &TruthTree) -> String {
        let mut out = String::new();
        self.render_node(tree, tree.root(), "", "", &mut out);
        out
    }

    fn style(&self) -> &'static Style {
        if self.ascii {
            &ASCII
        } else {
            &UNICODE
        }
    }

    fn formula(&self, formula: &Formula) -> String {
        if self.ascii {
            formula.to_canonical()
        } else {
            formula.to_string()
        }
    }

    fn lines(&self, tree: &TruthTree, id: NodeId) -> Vec<String> {
        let style = self.style();
        let node = tree.node(id);
        let mut lines = node
            .entries()
            .iter()
            .map(|entry| match entry.sequence() {
                Some(step) => {
                    format!("{}  {}{}", self.formula(entry.formula()), style.broken, step)
                }
                None => self.formula(entry.formula()),
            })
            .collect::<Vec<_>>();
        if let Some(step) = node.closure() {
            lines.push(format!("{} {}", style.closed, step));
        }
        if lines.is_empty() {
            lines.push(".".to_string());
        }
        lines
    }

    fn render_node(
        &self,
        tree: &TruthTree,
        id: NodeId,
        first: &str,
        rest: &str,
        out: &mut String,
    ) {
        let style = self.style();
        for (i, line) in self.lines(tree, id).iter().enumerate() {
            let prefix = if i == 0 { first } else { rest };
            // writing to a String cannot fail
            let _ = writeln!(out, "{}{}", prefix, line);
        }
        if let Some([left, right]) = tree.node(id).children() {
            self.render_node(
                tree,
                left,
                &format!("{}{}", rest, style.branch),
                &format!("{}{}", rest, style.trunk),
                out,
            );
            self.render_node(
                tree,
                right,
                &format!("{}{}", rest, style.last_branch),
                &format!("{}{}", rest, style.space),
                out,
            );
        }
    }
}
