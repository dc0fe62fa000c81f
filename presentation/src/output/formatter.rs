//! Output formatter trait

use super::report::SimulationReport;

/// Trait for formatting simulation reports
pub trait OutputFormatter {
    /// Format the complete report
    fn format(&self, report: &SimulationReport) -> String;

    /// Format as JSON
    fn format_json(&self, report: &SimulationReport) -> String;
}
