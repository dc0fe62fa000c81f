//! Output formatting for simulation reports.

pub mod console;
pub mod formatter;
pub mod report;
