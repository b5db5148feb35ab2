pub mod aggregate;
pub mod exec;
pub mod output;

pub use aggregate::sort_activity;
pub use exec::{exec, run, Report};
pub use output::{output_summary, render, render_lines, report_path, write_report};
