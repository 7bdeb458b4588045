use crate::reports::Viewer;
use crate::server::response::{ApiError, StoreOptionExt, StoreResultExt};
use crate::store::Store;
use crate::types::{Profile, Report, ReportKind};

/// Loads a report the viewer is allowed to read, together with the profile
/// that submitted it.
///
/// Reports the viewer may not read answer 404 like missing ones, so ids of
/// other users' reports cannot be probed.
pub fn load_visible_report(
    store: &dyn Store,
    viewer: &Viewer,
    kind: ReportKind,
    id: &str,
) -> Result<(Report, Profile), ApiError> {
    let report = store
        .get_report(kind, id)
        .api_err("Failed to get report")?
        .or_not_found("Report not found")?;

    let submitter = store
        .get_profile(&report.user_id)
        .api_err("Failed to get submitter")?
        .or_not_found("Report not found")?;

    if !viewer.can_view(&report, submitter.role) {
        return Err(ApiError::not_found("Report not found"));
    }

    Ok((report, submitter))
}

/// Loads a report for editing. Only its submitter may edit it.
pub fn load_own_report(
    store: &dyn Store,
    profile: &Profile,
    kind: ReportKind,
    id: &str,
) -> Result<Report, ApiError> {
    let report = store
        .get_report(kind, id)
        .api_err("Failed to get report")?
        .or_not_found("Report not found")?;

    if report.user_id != profile.id {
        return Err(ApiError::forbidden("Only the submitter can edit this report"));
    }

    Ok(report)
}
