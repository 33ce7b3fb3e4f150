//! Console summary of the first result entry and the JSON report on disk.
mod persist;
mod summary;


pub use persist::{REPORT_SUFFIX, report_file_name, report_path, save_report};
pub use summary::{
    EMPTY_RESULTS_MESSAGE, MISSING_VALUE, SummaryContext, print_summary, summary_lines,
};
