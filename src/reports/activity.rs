use chrono::Utc;
use uuid::Uuid;

use crate::store::Store;
use crate::types::ActivityLog;

/// Appends an activity entry. Failures are logged and dropped.
pub fn log_activity(store: &dyn Store, profile_id: &str, action: &str, details: Option<String>) {
    let entry = ActivityLog {
        id: Uuid::new_v4().to_string(),
        profile_id: profile_id.to_string(),
        action: action.to_string(),
        details,
        created_at: Utc::now(),
    };

    if let Err(e) = store.create_activity_log(&entry) {
        tracing::warn!("Failed to write activity log '{action}' for {profile_id}: {e}");
    }
}
