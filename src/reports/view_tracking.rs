use chrono::Utc;

use super::{Viewer, notify_view};
use crate::store::Store;
use crate::types::{Report, ViewColumn};

/// Stamps the viewer's manager column on `report` with the current time.
///
/// Only Accounting Manager and Senior Manager are tracked; every other role is
/// a no-op. The column is overwritten on each view, so it holds the last view.
/// The first tracked view also notifies the submitter. Failures are logged and
/// never reach the caller.
pub fn record_manager_view(store: &dyn Store, viewer: &Viewer, report: &Report) {
    let Some(role) = viewer.role else {
        return;
    };
    let Some(column) = ViewColumn::for_role(role) else {
        return;
    };

    match store.touch_report_view(report.kind(), &report.id, column, Utc::now()) {
        Ok(None) => {
            notify_view(store, &viewer.id, role, report);
        }
        Ok(Some(_)) => {}
        Err(e) => {
            tracing::warn!(
                "Failed to record {} view of {} report {}: {e}",
                role,
                report.kind(),
                report.id
            );
        }
    }
}
