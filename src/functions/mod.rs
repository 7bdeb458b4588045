//! Cross-user aggregations. These read every profile's reports regardless of
//! the caller's visibility, so callers gate access before invoking them.

mod status;
mod summary;

pub use status::{SubmissionStatus, group_submissions, submission_status};
pub use summary::{
    DailySummary, Metrics, PeriodSummary, SUMMARY_KINDS, SummaryResponse, summarize,
    summary_for_window, summary_window,
};
