use anyhow::{bail, Result};
use clap::Parser;
use indicatif::ProgressBar;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use truthtree::{parse_inputs, TreePrinter, TruthTree};

#[derive(Parser, Debug)]
pub struct Flags {
    #[arg(short, long)]
    /// Print formulas with ASCII operators (- & | > <) instead of logic symbols.
    ascii: bool,
    #[arg(short, long)]
    /// Only print the verdict and, if the goal does not follow, a counter-example.
    quiet: bool,
    #[arg(short, long)]
    /// Show a spinner that ticks once per decomposition step.
    progress: bool,
    /// Premises followed by the goal. Operators may be written as words (and, or, implies, iff,
    /// not) or symbols (&, |, >, <, -).
    #[arg(required = true, num_args = 2.., allow_hyphen_values = true)]
    formulas: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();
    let flags = Flags::parse();

    let Some((goal, premises)) = flags.formulas.split_last() else {
        bail!("no goal formula given");
    };
    let (premises, goal) = parse_inputs(premises, goal)?;

    let progress = if flags.progress {
        ProgressBar::new_spinner()
    } else {
        ProgressBar::hidden()
    };
    let mut tree = TruthTree::new(premises, goal);
    tree.expand_tree_with(&progress);
    progress.finish_and_clear();

    if !flags.quiet {
        print!("{}", TreePrinter::new().ascii(flags.ascii).render(&tree));
        println!();
    }

    if tree.entails() {
        println!("s VALID");
    } else {
        println!("s INVALID");
        if let Some(valuation) = tree.counter_example() {
            println!("v {}", valuation);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formulas_may_start_with_negation() {
        let flags = Flags::try_parse_from(["truthtree", "-A | B", "-A"]).unwrap();
        assert_eq!(flags.formulas, vec!["-A | B", "-A"]);
    }
}
