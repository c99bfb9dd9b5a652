//! Printing the computed plan.

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use tailflare::Plan;

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Colored summary of the changes
    #[default]
    Pretty,
    /// The plan as a JSON document
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Print `plan` to stdout in `format`.
pub fn print_plan(plan: &Plan, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(plan)?),
        OutputFormat::Pretty => print!("{}", render_pretty(plan)),
    }
    Ok(())
}

fn render_pretty(plan: &Plan) -> String {
    use std::fmt::Write as _;

    let changes = &plan.changes;
    let mut out = String::new();

    let _ = writeln!(out, "{} {}", "Records under".bold(), plan.suffix.cyan());
    let _ = writeln!(
        out,
        "  {} devices, {} desired names, {} existing records",
        plan.devices, plan.desired, plan.records
    );

    if changes.is_empty() {
        let _ = writeln!(out, "  {}", "nothing to change".green());
        return out;
    }

    for (name, addresses) in changes.to_create() {
        for addr in addresses {
            let _ = writeln!(out, "  {} {name} {addr}", "+".green().bold());
        }
    }
    for (name, update) in changes.to_update() {
        let _ = writeln!(
            out,
            "  {} {name} {} -> {}",
            "~".yellow().bold(),
            update.current,
            update.desired
        );
    }
    for (name, ids) in changes.to_delete() {
        for id in ids {
            let _ = writeln!(out, "  {} {name} ({id})", "-".red().bold());
        }
    }

    out
}
