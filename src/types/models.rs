use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{ReportKind, Role};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    /// `None` until an administrator assigns a role, or when the stored tag
    /// is not a known role.
    pub role: Option<Role>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub id: String,
    #[serde(skip)]
    pub token_hash: String,
    #[serde(skip)]
    pub token_lookup: String,
    pub is_admin: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_used_at: Option<DateTime<Utc>>,
}

/// A branch-level count line attached to a consignment staff report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LpkEntry {
    /// Absent for entries that have not been stored yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub branch: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountingFields {
    #[serde(deserialize_with = "amount::deserialize")]
    pub total_sales: f64,
    #[serde(deserialize_with = "amount::deserialize")]
    pub cash_deposit: f64,
    #[serde(deserialize_with = "amount::deserialize")]
    pub expenses: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashierFields {
    #[serde(deserialize_with = "amount::deserialize")]
    pub total_sales: f64,
    #[serde(deserialize_with = "amount::deserialize")]
    pub cash_amount: f64,
    #[serde(deserialize_with = "amount::deserialize")]
    pub non_cash_amount: f64,
    /// Only filled in by Cashier-Insentif.
    #[serde(default, deserialize_with = "amount::deserialize_opt")]
    pub incentive_amount: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsignmentFields {
    #[serde(deserialize_with = "amount::deserialize")]
    pub total_sales: f64,
    pub items_received: i64,
    pub items_returned: i64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lpk_entries: Vec<LpkEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupervisorFields {
    pub summary: String,
    #[serde(default)]
    pub issues: Option<String>,
    #[serde(default)]
    pub follow_up: Option<String>,
}

/// Kind-specific body of a report, one variant per report kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportFields {
    Accounting(AccountingFields),
    Cashier(CashierFields),
    ConsignmentStaff(ConsignmentFields),
    SupervisorManager(SupervisorFields),
}

impl ReportFields {
    pub fn kind(&self) -> ReportKind {
        match self {
            ReportFields::Accounting(_) => ReportKind::Accounting,
            ReportFields::Cashier(_) => ReportKind::Cashier,
            ReportFields::ConsignmentStaff(_) => ReportKind::ConsignmentStaff,
            ReportFields::SupervisorManager(_) => ReportKind::SupervisorManager,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub id: String,
    pub user_id: String,
    pub report_date: NaiveDate,
    #[serde(flatten)]
    pub fields: ReportFields,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accounting_manager_viewed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub senior_manager_viewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Report {
    pub fn kind(&self) -> ReportKind {
        self.fields.kind()
    }
}

/// Display data of the profile that submitted a report.
#[derive(Debug, Clone, Serialize)]
pub struct Submitter {
    pub first_name: String,
    pub last_name: String,
    pub role: Option<Role>,
}

impl Submitter {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportWithSubmitter {
    #[serde(flatten)]
    pub report: Report,
    pub submitter: Submitter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Submission,
    View,
}

impl NotificationKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            NotificationKind::Submission => "submission",
            NotificationKind::View => "view",
        }
    }

    pub fn parse(s: &str) -> Option<NotificationKind> {
        match s {
            "submission" => Some(NotificationKind::Submission),
            "view" => Some(NotificationKind::View),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub recipient_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<String>,
    pub kind: NotificationKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_kind: Option<ReportKind>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityLog {
    pub id: String,
    pub profile_id: String,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Monetary inputs arrive either as JSON numbers or as numeric strings.
mod amount {
    use serde::{Deserialize, Deserializer, de};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    fn coerce<E: de::Error>(raw: Raw) -> Result<f64, E> {
        match raw {
            Raw::Number(n) => Ok(n),
            Raw::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| E::custom(format!("invalid amount: {s:?}"))),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        coerce(Raw::deserialize(deserializer)?)
    }

    pub fn deserialize_opt<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<f64>, D::Error> {
        Option::<Raw>::deserialize(deserializer)?
            .map(coerce)
            .transpose()
    }
}
