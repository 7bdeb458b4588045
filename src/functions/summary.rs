use std::collections::BTreeMap;
use std::ops::AddAssign;

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::error::Result;
use crate::store::Store;
use crate::types::{Report, ReportFields, ReportKind};

/// Report kinds that carry sales figures.
pub const SUMMARY_KINDS: [ReportKind; 3] = [
    ReportKind::Accounting,
    ReportKind::Cashier,
    ReportKind::ConsignmentStaff,
];

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    pub accounting_sales: f64,
    pub accounting_expenses: f64,
    pub cashier_sales: f64,
    pub cashier_cash: f64,
    pub cashier_non_cash: f64,
    pub consignment_sales: f64,
    pub total_sales: f64,
}

impl Metrics {
    fn add_fields(&mut self, fields: &ReportFields) {
        match fields {
            ReportFields::Accounting(f) => {
                self.accounting_sales += f.total_sales;
                self.accounting_expenses += f.expenses;
                self.total_sales += f.total_sales;
            }
            ReportFields::Cashier(f) => {
                self.cashier_sales += f.total_sales;
                self.cashier_cash += f.cash_amount;
                self.cashier_non_cash += f.non_cash_amount;
                self.total_sales += f.total_sales;
            }
            ReportFields::ConsignmentStaff(f) => {
                self.consignment_sales += f.total_sales;
                self.total_sales += f.total_sales;
            }
            ReportFields::SupervisorManager(_) => {}
        }
    }
}

impl AddAssign for Metrics {
    fn add_assign(&mut self, rhs: Metrics) {
        self.accounting_sales += rhs.accounting_sales;
        self.accounting_expenses += rhs.accounting_expenses;
        self.cashier_sales += rhs.cashier_sales;
        self.cashier_cash += rhs.cashier_cash;
        self.cashier_non_cash += rhs.cashier_non_cash;
        self.consignment_sales += rhs.consignment_sales;
        self.total_sales += rhs.total_sales;
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub metrics: Metrics,
}

#[derive(Debug, Clone, Serialize)]
pub struct PeriodSummary {
    pub from: NaiveDate,
    pub to: NaiveDate,
    /// Days in the window that had at least one submission.
    pub days: usize,
    #[serde(flatten)]
    pub metrics: Metrics,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryResponse {
    pub daily: Vec<DailySummary>,
    pub monthly: PeriodSummary,
}

/// Inclusive window of `days` days ending on `end`.
pub fn summary_window(end: NaiveDate, days: u32) -> (NaiveDate, NaiveDate) {
    let span = u64::from(days.max(1) - 1);
    let start = end.checked_sub_days(Days::new(span)).unwrap_or(NaiveDate::MIN);
    (start, end)
}

/// Sums reports per date, then sums the dates into one period total. Dates
/// without reports do not appear in `daily`.
pub fn summarize(from: NaiveDate, to: NaiveDate, reports: &[Report]) -> SummaryResponse {
    let mut per_day: BTreeMap<NaiveDate, Metrics> = BTreeMap::new();
    for report in reports {
        if report.report_date < from || report.report_date > to {
            continue;
        }
        if !SUMMARY_KINDS.contains(&report.kind()) {
            continue;
        }
        per_day
            .entry(report.report_date)
            .or_default()
            .add_fields(&report.fields);
    }

    let mut total = Metrics::default();
    let daily: Vec<DailySummary> = per_day
        .into_iter()
        .map(|(date, metrics)| {
            total += metrics;
            DailySummary { date, metrics }
        })
        .collect();

    SummaryResponse {
        monthly: PeriodSummary {
            from,
            to,
            days: daily.len(),
            metrics: total,
        },
        daily,
    }
}

/// Reads the sales kinds for the window ending on `end` and summarises them.
pub fn summary_for_window(store: &dyn Store, end: NaiveDate, days: u32) -> Result<SummaryResponse> {
    let (from, to) = summary_window(end, days);

    let mut reports = Vec::new();
    for kind in SUMMARY_KINDS {
        reports.extend(store.list_reports_between(kind, from, to)?);
    }

    tracing::debug!("Summarising {} reports from {from} to {to}", reports.len());
    Ok(summarize(from, to, &reports))
}
