//! Console output formatter for simulation reports

use super::formatter::OutputFormatter;
use super::report::{InteractionOutcome, SimulationReport};
use colored::Colorize;

/// Formats simulation reports for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete simulation report
    pub fn format(report: &SimulationReport) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Interaction Relay Simulation"));
        output.push('\n');

        output.push_str(&format!(
            "{} {} worker(s), {} listeners\n\n",
            "Ingress:".cyan().bold(),
            report.workers,
            if report.async_listeners {
                "spawned"
            } else {
                "sequential"
            }
        ));

        output.push_str(&Self::section_header("Interactions"));
        for outcome in &report.interactions {
            output.push_str(&Self::format_outcome(outcome));
        }

        if !report.diagnostics.is_empty() {
            output.push_str(&Self::section_header("Diagnostics"));
            for diagnostic in &report.diagnostics {
                output.push_str(&format!("  {} {}\n", "!".yellow().bold(), diagnostic));
            }
        }

        output.push_str(&Self::section_header("Summary"));
        output.push_str(&format!(
            "  {} {}/{}\n",
            "Replied:".bold(),
            report.replied(),
            report.interactions.len()
        ));
        output.push_str(&format!(
            "  {} {}\n",
            "Lost races:".bold(),
            report.total_lost()
        ));
        if report.total_failed() > 0 {
            output.push_str(&format!(
                "  {} {}\n",
                "Transport failures:".bold(),
                report.total_failed().to_string().red()
            ));
        }
        let verdict = if report.is_consistent() {
            "exactly one first reply per interaction".green()
        } else {
            "reply guard violated".red().bold()
        };
        output.push_str(&format!("  {} {}\n", "Guard:".bold(), verdict));

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(report: &SimulationReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_outcome(outcome: &InteractionOutcome) -> String {
        let variant = outcome
            .variant
            .map(|v| v.as_str().to_string())
            .unwrap_or_else(|| "unknown".to_string());
        let winner = match outcome.winner {
            Some(kind) => kind.as_str().green().to_string(),
            None => "no reply".dimmed().to_string(),
        };
        let status = outcome
            .webhook_status
            .map(|s| format!(" (HTTP {})", s))
            .unwrap_or_default();

        format!(
            "  {:>20}  {:<14} {}{}  {} lost / {} racer(s)\n",
            outcome.interaction_id.to_string().yellow(),
            variant,
            winner,
            status.dimmed(),
            outcome.lost,
            outcome.racers
        )
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, report: &SimulationReport) -> String {
        Self::format(report)
    }

    fn format_json(&self, report: &SimulationReport) -> String {
        Self::format_json(report)
    }
}
