use chrono::Utc;
use uuid::Uuid;

use crate::store::Store;
use crate::types::{Notification, NotificationKind, Report, ReportKind, Role};

/// Notifies every manager above `submitter_role` about a new report.
///
/// Best effort: the report is already stored, so nothing here may fail the
/// submission. Returns the number of notifications written.
pub fn notify_submission(
    store: &dyn Store,
    submitter_id: &str,
    submitter_role: Role,
    kind: ReportKind,
    report_id: Option<&str>,
) -> usize {
    let targets: Vec<Role> = submitter_role.supervision_map().into_iter().collect();
    if targets.is_empty() {
        return 0;
    }

    let recipients = match store.list_profiles_by_roles(&targets) {
        Ok(recipients) => recipients,
        Err(e) => {
            tracing::warn!("Failed to resolve notification recipients for {submitter_role}: {e}");
            return 0;
        }
    };

    let now = Utc::now();
    let message = format!(
        "New {} ({kind}) submitted by {submitter_role}",
        kind.label_for(submitter_role)
    );
    let batch: Vec<Notification> = recipients
        .iter()
        .filter(|p| p.id != submitter_id)
        .map(|p| Notification {
            id: Uuid::new_v4().to_string(),
            recipient_id: p.id.clone(),
            sender_id: Some(submitter_id.to_string()),
            kind: NotificationKind::Submission,
            message: message.clone(),
            report_id: report_id.map(str::to_string),
            report_kind: Some(kind),
            is_read: false,
            created_at: now,
        })
        .collect();

    if batch.is_empty() {
        tracing::info!(
            "No profiles hold {:?}; skipping notifications for {submitter_role} submission",
            targets.iter().map(|r| r.as_str()).collect::<Vec<_>>()
        );
        return 0;
    }

    match store.create_notifications(&batch) {
        Ok(()) => batch.len(),
        Err(e) => {
            tracing::warn!("Failed to write {} submission notifications: {e}", batch.len());
            0
        }
    }
}

/// Tells the submitter that a manager opened their report. Best effort.
pub fn notify_view(store: &dyn Store, viewer_id: &str, viewer_role: Role, report: &Report) -> bool {
    if report.user_id == viewer_id {
        return false;
    }

    let notification = Notification {
        id: Uuid::new_v4().to_string(),
        recipient_id: report.user_id.clone(),
        sender_id: Some(viewer_id.to_string()),
        kind: NotificationKind::View,
        message: format!(
            "{viewer_role} viewed your report for {}",
            report.report_date.format("%Y-%m-%d")
        ),
        report_id: Some(report.id.clone()),
        report_kind: Some(report.kind()),
        is_read: false,
        created_at: Utc::now(),
    };

    match store.create_notifications(std::slice::from_ref(&notification)) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Failed to write view notification for report {}: {e}", report.id);
            false
        }
    }
}
