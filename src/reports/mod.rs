//! Report policy: who may read which reports, how submissions fan out into
//! notifications, and the best-effort side effects around them.

mod activity;
mod aggregate;
mod filter;
mod lpk;
mod notify;
mod validation;
mod view_tracking;
mod visibility;

pub use activity::log_activity;
pub use aggregate::{fetch_reports_for, merge_kind_results};
pub use filter::ReportFilter;
pub use lpk::{LpkPlan, plan_lpk_changes};
pub use notify::{notify_submission, notify_view};
pub use validation::validate_report_fields;
pub use view_tracking::record_manager_view;
pub use visibility::{ViewScope, Viewer, visible_kinds_for, visible_roles_for, visible_roles_for_tag};
