use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{LpkEntry, Report, ReportFields, Role, Submitter, Token};

#[derive(Debug, Deserialize)]
pub struct CreateProfileRequest {
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub role: Option<Role>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    /// Absent leaves the role alone, `null` unassigns it.
    #[serde(default, deserialize_with = "present")]
    pub role: Option<Option<Role>>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateProfileTokenRequest {
    #[serde(default)]
    pub expires_in_seconds: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub id: String,
    pub is_admin: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_used_at: Option<DateTime<Utc>>,
}

impl From<Token> for TokenResponse {
    fn from(token: Token) -> Self {
        Self {
            id: token.id,
            is_admin: token.is_admin,
            profile_id: token.profile_id,
            created_at: token.created_at,
            expires_at: token.expires_at,
            last_used_at: token.last_used_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateTokenResponse {
    pub token: String,
    pub metadata: TokenResponse,
}

#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    #[serde(default)]
    pub cursor: Option<String>,
}

/// Body of a new report: the date plus the kind-tagged form fields.
#[derive(Debug, Deserialize)]
pub struct SubmitReportRequest {
    pub report_date: NaiveDate,
    #[serde(flatten)]
    pub fields: ReportFields,
}

/// Body of a report edit. The date and kind of a stored report are fixed.
#[derive(Debug, Deserialize)]
pub struct UpdateReportRequest {
    #[serde(flatten)]
    pub fields: ReportFields,
}

#[derive(Debug, Serialize)]
pub struct ReportDetail {
    #[serde(flatten)]
    pub report: Report,
    pub submitter: Submitter,
}

#[derive(Debug, Default, Deserialize)]
pub struct NotificationParams {
    #[serde(default)]
    pub unread: bool,
}

#[derive(Debug, Serialize)]
pub struct ReadAllResponse {
    pub updated: usize,
}

/// `?date=YYYY-MM-DD`, kept as text so a malformed value can be reported
/// in the function's own error shape.
#[derive(Debug, Default, Deserialize)]
pub struct DateParams {
    #[serde(default)]
    pub date: Option<String>,
}

/// Attaches stored LPK entries to a consignment report; other kinds pass
/// through untouched.
pub fn with_lpk_entries(mut report: Report, entries: Vec<LpkEntry>) -> Report {
    if let ReportFields::ConsignmentStaff(fields) = &mut report.fields {
        fields.lpk_entries = entries;
    }
    report
}
