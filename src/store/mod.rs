mod schema;
mod sqlite;

pub use sqlite::SqliteStore;

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::Result;
use crate::reports::LpkPlan;
use crate::types::*;

/// Store defines the database interface.
pub trait Store: Send + Sync {
    fn initialize(&self) -> Result<()>;

    // Profile operations
    fn create_profile(&self, profile: &Profile) -> Result<()>;
    fn get_profile(&self, id: &str) -> Result<Option<Profile>>;
    fn list_profiles(&self, cursor: &str, limit: i32) -> Result<Vec<Profile>>;
    fn list_profiles_by_roles(&self, roles: &[Role]) -> Result<Vec<Profile>>;
    fn update_profile(&self, profile: &Profile) -> Result<()>;

    // Token operations
    fn create_token(&self, token: &Token) -> Result<()>;
    fn get_token_by_id(&self, id: &str) -> Result<Option<Token>>;
    fn get_token_by_lookup(&self, lookup: &str) -> Result<Option<Token>>;
    fn list_profile_tokens(&self, profile_id: &str) -> Result<Vec<Token>>;
    fn delete_token(&self, id: &str) -> Result<bool>;
    fn update_token_last_used(&self, id: &str) -> Result<()>;
    fn has_admin_token(&self) -> Result<bool>;

    // Report operations (one table per report kind)
    fn create_report(&self, report: &Report) -> Result<()>;
    fn get_report(&self, kind: ReportKind, id: &str) -> Result<Option<Report>>;
    /// Rewrites a report row and applies its LPK changes in one transaction.
    fn update_report(&self, report: &Report, lpk: Option<&LpkPlan>) -> Result<()>;
    fn has_report_on(&self, kind: ReportKind, user_id: &str, date: NaiveDate) -> Result<bool>;
    fn list_reports_by_kind(&self, kind: ReportKind) -> Result<Vec<ReportWithSubmitter>>;
    fn list_reports_between(
        &self,
        kind: ReportKind,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Report>>;
    /// Sets a manager view column and returns its previous value.
    fn touch_report_view(
        &self,
        kind: ReportKind,
        id: &str,
        column: ViewColumn,
        at: DateTime<Utc>,
    ) -> Result<Option<DateTime<Utc>>>;

    // LPK entry operations (children of consignment staff reports)
    fn list_lpk_entries(&self, report_id: &str) -> Result<Vec<LpkEntry>>;

    // Notification operations
    fn create_notifications(&self, batch: &[Notification]) -> Result<()>;
    fn list_notifications(&self, recipient_id: &str, unread_only: bool) -> Result<Vec<Notification>>;
    fn mark_notification_read(&self, id: &str, recipient_id: &str) -> Result<bool>;
    fn mark_all_notifications_read(&self, recipient_id: &str) -> Result<usize>;

    // Activity log operations
    fn create_activity_log(&self, entry: &ActivityLog) -> Result<()>;
    fn list_activity_logs(&self, before: &str, limit: i32) -> Result<Vec<ActivityLog>>;
}
