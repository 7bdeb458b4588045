use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use uuid::Uuid;

use super::access::{load_own_report, load_visible_report};
use crate::auth::RequireRole;
use crate::reports::{
    ReportFilter, fetch_reports_for, log_activity, notify_submission, plan_lpk_changes,
    record_manager_view, validate_report_fields,
};
use crate::server::AppState;
use crate::server::dto::{ReportDetail, SubmitReportRequest, UpdateReportRequest, with_lpk_entries};
use crate::server::response::{ApiError, ApiResponse, StoreResultExt};
use crate::store::Store;
use crate::types::{LpkEntry, Report, ReportFields, ReportKind, Submitter};

/// Every report the caller may read, narrowed by the optional filter.
pub async fn list_reports(
    auth: RequireRole,
    State(state): State<Arc<AppState>>,
    Query(filter): Query<ReportFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let viewer = auth.viewer();
    let rows = fetch_reports_for(Arc::clone(&state.store), &viewer).await?;

    let matching = filter.apply(&rows);
    tracing::debug!(
        "{} sees {} reports, {} after filtering",
        auth.role,
        rows.len(),
        matching.len()
    );

    // Serialized here since `matching` borrows `rows`.
    Ok(Json(ApiResponse::success(matching)).into_response())
}

pub async fn submit_report(
    auth: RequireRole,
    State(state): State<Arc<AppState>>,
    Json(req): Json<SubmitReportRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let kind = req.fields.kind();
    let expected = auth
        .role
        .report_kind()
        .ok_or_else(|| ApiError::forbidden("Your role does not submit reports"))?;
    if kind != expected {
        return Err(ApiError::forbidden(format!(
            "{} submits {expected} reports, not {kind}",
            auth.role
        )));
    }

    validate_report_fields(&req.fields, auth.role)?;

    let store = state.store.as_ref();
    let already = store
        .has_report_on(kind, &auth.profile.id, req.report_date)
        .api_err("Failed to check existing report")?;
    if already {
        return Err(crate::error::Error::AlreadySubmitted(req.report_date).into());
    }

    let now = Utc::now();
    let report = Report {
        id: Uuid::new_v4().to_string(),
        user_id: auth.profile.id.clone(),
        report_date: req.report_date,
        fields: with_fresh_lpk_ids(req.fields),
        accounting_manager_viewed_at: None,
        senior_manager_viewed_at: None,
        created_at: now,
        updated_at: now,
    };

    // A concurrent duplicate is caught by the unique constraint.
    store.create_report(&report)?;

    tracing::info!(
        "{} submitted {kind} report {} for {}",
        auth.role,
        report.id,
        report.report_date
    );
    log_activity(
        store,
        &auth.profile.id,
        "report.submitted",
        Some(format!("{kind} report for {}", report.report_date)),
    );
    notify_submission(store, &auth.profile.id, auth.role, kind, Some(&report.id));

    Ok((StatusCode::CREATED, Json(ApiResponse::success(report))))
}

/// One report with its LPK entries. Opening it counts as a manager view.
pub async fn get_report(
    auth: RequireRole,
    State(state): State<Arc<AppState>>,
    Path((kind, id)): Path<(ReportKind, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let viewer = auth.viewer();
    let store = state.store.as_ref();
    let (report, submitter) = load_visible_report(store, &viewer, kind, &id)?;

    record_manager_view(store, &viewer, &report);

    let entries = stored_lpk_entries(store, &report)?;
    Ok(Json(ApiResponse::success(ReportDetail {
        report: with_lpk_entries(report, entries),
        submitter: Submitter {
            first_name: submitter.first_name,
            last_name: submitter.last_name,
            role: submitter.role,
        },
    })))
}

/// Replaces the fields of the caller's own report. LPK entries are matched by
/// id: known ids are updated, entries without an id are added, and stored
/// entries left out are removed.
pub async fn update_report(
    auth: RequireRole,
    State(state): State<Arc<AppState>>,
    Path((kind, id)): Path<(ReportKind, String)>,
    Json(req): Json<UpdateReportRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let store = state.store.as_ref();
    let mut report = load_own_report(store, &auth.profile, kind, &id)?;

    if req.fields.kind() != kind {
        return Err(ApiError::bad_request("A report's kind cannot change"));
    }
    validate_report_fields(&req.fields, auth.role)?;

    let plan = match &req.fields {
        ReportFields::ConsignmentStaff(fields) => {
            let previous = stored_lpk_entries(store, &report)?;
            Some(plan_lpk_changes(&previous, &fields.lpk_entries)?)
        }
        _ => None,
    };

    let plan = plan.filter(|p| !p.is_empty());
    if let Some(plan) = &plan {
        tracing::debug!(
            "Report {}: {} LPK inserts, {} updates, {} deletes",
            report.id,
            plan.inserts.len(),
            plan.updates.len(),
            plan.deletes.len()
        );
    }

    report.fields = req.fields;
    report.updated_at = Utc::now();
    store.update_report(&report, plan.as_ref())?;

    log_activity(
        store,
        &auth.profile.id,
        "report.updated",
        Some(format!("{kind} report for {}", report.report_date)),
    );

    let entries = stored_lpk_entries(store, &report)?;
    Ok(Json(ApiResponse::success(with_lpk_entries(report, entries))))
}

fn stored_lpk_entries(store: &dyn Store, report: &Report) -> Result<Vec<LpkEntry>, ApiError> {
    if report.kind() != ReportKind::ConsignmentStaff {
        return Ok(Vec::new());
    }
    store
        .list_lpk_entries(&report.id)
        .api_err("Failed to list LPK entries")
}

/// New reports never reuse client-supplied entry ids.
fn with_fresh_lpk_ids(mut fields: ReportFields) -> ReportFields {
    if let ReportFields::ConsignmentStaff(f) = &mut fields {
        for entry in &mut f.lpk_entries {
            entry.id = Some(Uuid::new_v4().to_string());
        }
    }
    fields
}
