//! Output formatting helpers.

use colored::Colorize;

use crate::sync::{EntityOutcome, SyncReport};

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print one line per entity, then the totals.
pub fn report(report: &SyncReport) {
    if let Some(reason) = &report.refresh_error {
        error(&format!("Token refresh failed: {}", reason));
    }

    for outcome in &report.outcomes {
        match outcome {
            EntityOutcome::Written {
                entity,
                path,
                items,
            } => {
                let count = items.map_or_else(|| "?".to_string(), |n| n.to_string());
                success(&format!("{} ({} items)", entity, count));
                field("  File", &path.display().to_string());
            }
            EntityOutcome::Failed { entity, reason } => {
                error(&format!("{}: {}", entity, reason));
            }
        }
    }

    println!();
    field(
        "Fetched",
        &format!("{} of {}", report.written(), report.outcomes.len()),
    );
    if report.failed() > 0 {
        field("Failed", &report.failed().to_string());
    }
}
