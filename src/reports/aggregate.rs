use std::sync::Arc;

use tokio::task::JoinSet;

use super::Viewer;
use crate::error::{Error, Result};
use crate::store::Store;
use crate::types::{ReportKind, ReportWithSubmitter};

/// Fetches every report `viewer` may read, newest report date first.
///
/// Each visible report kind is fetched on its own blocking task. A kind that
/// fails contributes nothing; the call only fails when every kind fails.
pub async fn fetch_reports_for(
    store: Arc<dyn Store>,
    viewer: &Viewer,
) -> Result<Vec<ReportWithSubmitter>> {
    let kinds = viewer.visible_kinds();
    if kinds.is_empty() {
        return Ok(Vec::new());
    }

    let mut tasks = JoinSet::new();
    for kind in kinds.iter().copied() {
        let store = Arc::clone(&store);
        tasks.spawn_blocking(move || (kind, store.list_reports_by_kind(kind)));
    }

    let mut results = Vec::with_capacity(kinds.len());
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(result) => results.push(result),
            Err(e) => tracing::warn!("Report fetch task did not complete: {e}"),
        }
    }

    if results.is_empty() {
        return Err(Error::Unavailable("no report fetch completed".to_string()));
    }

    let merged = merge_kind_results(results)?;
    let scope = viewer.scope();
    Ok(merged
        .into_iter()
        .filter(|row| scope.allows(&row.report, row.submitter.role))
        .collect())
}

/// Merges per-kind fetch results into one list sorted by report date,
/// newest first. Rows with equal dates keep kind order, then fetch order.
pub fn merge_kind_results(
    mut results: Vec<(ReportKind, Result<Vec<ReportWithSubmitter>>)>,
) -> Result<Vec<ReportWithSubmitter>> {
    results.sort_by_key(|(kind, _)| *kind);

    let total = results.len();
    let mut failed = Vec::new();
    let mut merged = Vec::new();

    for (kind, result) in results {
        match result {
            Ok(rows) => merged.extend(rows),
            Err(e) => {
                tracing::warn!("Failed to fetch {kind} reports: {e}");
                failed.push(format!("{kind}: {e}"));
            }
        }
    }

    if total > 0 && failed.len() == total {
        return Err(Error::Unavailable(failed.join("; ")));
    }

    merged.sort_by(|a, b| b.report.report_date.cmp(&a.report.report_date));
    Ok(merged)
}
