use chrono::NaiveDate;
use serde::Deserialize;

use crate::types::{ReportWithSubmitter, Role};

/// Optional narrowing of an already fetched report list.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ReportFilter {
    #[serde(default)]
    pub from: Option<NaiveDate>,
    #[serde(default)]
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub role: Option<Role>,
    /// Case-insensitive substring of the submitter's full name.
    #[serde(default)]
    pub name: Option<String>,
}

impl ReportFilter {
    pub fn matches(&self, row: &ReportWithSubmitter) -> bool {
        let date = row.report.report_date;
        if self.from.is_some_and(|from| date < from) || self.to.is_some_and(|to| date > to) {
            return false;
        }
        if self.role.is_some() && row.submitter.role != self.role {
            return false;
        }
        match self.name.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => row
                .submitter
                .display_name()
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            _ => true,
        }
    }

    /// Returns the matching rows without touching `rows`.
    pub fn apply<'a>(&self, rows: &'a [ReportWithSubmitter]) -> Vec<&'a ReportWithSubmitter> {
        rows.iter().filter(|row| self.matches(row)).collect()
    }
}
