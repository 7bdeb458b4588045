use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::Result;
use crate::store::Store;
use crate::types::{ReportKind, Role};

#[derive(Debug, Clone, Serialize)]
pub struct SubmissionStatus {
    pub user_id: String,
    pub name: String,
    pub role: Option<Role>,
    pub kinds: BTreeSet<ReportKind>,
}

/// Groups `(user, kind)` pairs into the set of kinds each user submitted.
pub fn group_submissions<I>(pairs: I) -> BTreeMap<String, BTreeSet<ReportKind>>
where
    I: IntoIterator<Item = (String, ReportKind)>,
{
    let mut grouped: BTreeMap<String, BTreeSet<ReportKind>> = BTreeMap::new();
    for (user_id, kind) in pairs {
        grouped.entry(user_id).or_default().insert(kind);
    }
    grouped
}

/// Who submitted what on `date`. Users without a submission are absent.
pub fn submission_status(store: &dyn Store, date: NaiveDate) -> Result<Vec<SubmissionStatus>> {
    let mut pairs = Vec::new();
    for kind in ReportKind::ALL {
        pairs.extend(
            store
                .list_reports_between(kind, date, date)?
                .into_iter()
                .map(|r| (r.user_id, kind)),
        );
    }

    let mut statuses = Vec::new();
    for (user_id, kinds) in group_submissions(pairs) {
        let profile = store.get_profile(&user_id)?;
        let (name, role) = match profile {
            Some(p) => (p.display_name(), p.role),
            None => {
                tracing::warn!("Report submitter {user_id} has no profile");
                ("Unknown".to_string(), None)
            }
        };
        statuses.push(SubmissionStatus {
            user_id,
            name,
            role,
            kinds,
        });
    }

    statuses.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.user_id.cmp(&b.user_id)));
    Ok(statuses)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use tempfile::TempDir;

    use super::*;
    use crate::store::SqliteStore;
    use crate::types::{Profile, Report, ReportFields, SupervisorFields};

    #[test]
    fn test_group_submissions() {
        let grouped = group_submissions(vec![
            ("a".to_string(), ReportKind::Cashier),
            ("b".to_string(), ReportKind::Accounting),
            ("a".to_string(), ReportKind::SupervisorManager),
            ("a".to_string(), ReportKind::Cashier),
        ]);

        assert_eq!(grouped.len(), 2);
        assert_eq!(
            grouped["a"],
            BTreeSet::from([ReportKind::Cashier, ReportKind::SupervisorManager])
        );
    }

    #[test]
    fn test_empty_day_returns_empty_list() {
        let temp = TempDir::new().unwrap();
        let store = SqliteStore::new(temp.path().join("test.db")).unwrap();
        store.initialize().unwrap();

        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert!(submission_status(&store, date).unwrap().is_empty());
    }

    #[test]
    fn test_joins_profile() {
        let temp = TempDir::new().unwrap();
        let store = SqliteStore::new(temp.path().join("test.db")).unwrap();
        store.initialize().unwrap();

        store
            .create_profile(&Profile {
                id: "sm".to_string(),
                first_name: "Rina".to_string(),
                last_name: "Wati".to_string(),
                role: Some(Role::SeniorManager),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
            .unwrap();

        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        store
            .create_report(&Report {
                id: "r-1".to_string(),
                user_id: "sm".to_string(),
                report_date: date,
                fields: ReportFields::SupervisorManager(SupervisorFields {
                    summary: "ok".to_string(),
                    issues: None,
                    follow_up: None,
                }),
                accounting_manager_viewed_at: None,
                senior_manager_viewed_at: None,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
            .unwrap();

        let statuses = submission_status(&store, date).unwrap();
        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses[0].name, "Rina Wati");
        assert_eq!(statuses[0].role, Some(Role::SeniorManager));
        assert_eq!(
            statuses[0].kinds,
            BTreeSet::from([ReportKind::SupervisorManager])
        );

        let next_day = date.succ_opt().unwrap();
        assert!(submission_status(&store, next_day).unwrap().is_empty());
    }
}
