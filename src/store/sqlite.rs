use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::{Type, Value};
use rusqlite::{Connection, OptionalExtension, Row, params, params_from_iter};

use super::Store;
use super::schema::SCHEMA;
use crate::error::{Error, Result};
use crate::reports::LpkPlan;
use crate::types::*;

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.pragma_update(None, "journal_mode", "WAL")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Returns a guard to the underlying database connection.
    /// This allows consuming applications to execute custom SQL.
    pub fn connection(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn()
    }
}

fn try_parse_datetime(s: &str) -> std::result::Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            // Handle SQLite's default datetime format: "YYYY-MM-DD HH:MM:SS"
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    try_parse_datetime(s).unwrap_or_else(|e| {
        tracing::error!("Invalid datetime in database: '{}' - {}", s, e);
        Utc::now()
    })
}

/// For optional markers such as view timestamps. A corrupt value reads as unset.
fn parse_opt_datetime(s: Option<String>) -> Option<DateTime<Utc>> {
    let s = s?;
    try_parse_datetime(&s)
        .inspect_err(|e| tracing::error!("Invalid datetime in database: '{}' - {}", s, e))
        .ok()
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn date_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<NaiveDate> {
    let raw: String = row.get(idx)?;
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn role_from_tag(tag: Option<String>) -> Option<Role> {
    let tag = tag?;
    let role = Role::parse(&tag);
    if role.is_none() {
        tracing::warn!("Unknown role tag in database: '{}'", tag);
    }
    role
}

/// Coerces a stored monetary value to `f64`. Amounts may be stored as text,
/// integer or real; anything unparseable counts as zero.
pub(crate) fn coerce_amount(value: &Value) -> f64 {
    match value {
        Value::Integer(i) => *i as f64,
        Value::Real(r) => *r,
        Value::Text(s) => s.trim().parse::<f64>().unwrap_or_else(|_| {
            tracing::warn!("Unparseable amount in database: '{}'", s);
            0.0
        }),
        Value::Null | Value::Blob(_) => 0.0,
    }
}

fn amount_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<f64> {
    Ok(coerce_amount(&row.get::<_, Value>(idx)?))
}

fn opt_amount_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<f64>> {
    Ok(match row.get::<_, Value>(idx)? {
        Value::Null => None,
        value => Some(coerce_amount(&value)),
    })
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

const PROFILE_COLUMNS: &str = "id, first_name, last_name, role, created_at, updated_at";

fn read_profile(row: &Row<'_>) -> rusqlite::Result<Profile> {
    Ok(Profile {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        role: role_from_tag(row.get(3)?),
        created_at: parse_datetime(&row.get::<_, String>(4)?),
        updated_at: parse_datetime(&row.get::<_, String>(5)?),
    })
}

const TOKEN_COLUMNS: &str =
    "id, token_hash, token_lookup, is_admin, profile_id, created_at, expires_at, last_used_at";

fn read_token(row: &Row<'_>) -> rusqlite::Result<Token> {
    Ok(Token {
        id: row.get(0)?,
        token_hash: row.get(1)?,
        token_lookup: row.get(2)?,
        is_admin: row.get(3)?,
        profile_id: row.get(4)?,
        created_at: parse_datetime(&row.get::<_, String>(5)?),
        expires_at: row.get::<_, Option<String>>(6)?.map(|s| parse_datetime(&s)),
        last_used_at: row.get::<_, Option<String>>(7)?.map(|s| parse_datetime(&s)),
    })
}

// Columns shared by every report table, always selected first.
const REPORT_COLUMNS: &str = "r.id, r.user_id, r.report_date, r.accounting_manager_viewed_at, \
     r.senior_manager_viewed_at, r.created_at, r.updated_at";
const REPORT_FIELDS_AT: usize = 7;
const SUBMITTER_COLUMNS: &str = "p.first_name, p.last_name, p.role";
const JOINED_FIELDS_AT: usize = REPORT_FIELDS_AT + 3;

fn field_columns(kind: ReportKind) -> &'static str {
    match kind {
        ReportKind::Accounting => "r.total_sales, r.cash_deposit, r.expenses, r.notes",
        ReportKind::Cashier => {
            "r.total_sales, r.cash_amount, r.non_cash_amount, r.incentive_amount, r.notes"
        }
        ReportKind::ConsignmentStaff => {
            "r.total_sales, r.items_received, r.items_returned, r.notes"
        }
        ReportKind::SupervisorManager => "r.summary, r.issues, r.follow_up",
    }
}

fn read_fields(kind: ReportKind, row: &Row<'_>, at: usize) -> rusqlite::Result<ReportFields> {
    Ok(match kind {
        ReportKind::Accounting => ReportFields::Accounting(AccountingFields {
            total_sales: amount_at(row, at)?,
            cash_deposit: amount_at(row, at + 1)?,
            expenses: amount_at(row, at + 2)?,
            notes: row.get(at + 3)?,
        }),
        ReportKind::Cashier => ReportFields::Cashier(CashierFields {
            total_sales: amount_at(row, at)?,
            cash_amount: amount_at(row, at + 1)?,
            non_cash_amount: amount_at(row, at + 2)?,
            incentive_amount: opt_amount_at(row, at + 3)?,
            notes: row.get(at + 4)?,
        }),
        ReportKind::ConsignmentStaff => ReportFields::ConsignmentStaff(ConsignmentFields {
            total_sales: amount_at(row, at)?,
            items_received: row.get(at + 1)?,
            items_returned: row.get(at + 2)?,
            notes: row.get(at + 3)?,
            lpk_entries: Vec::new(),
        }),
        ReportKind::SupervisorManager => ReportFields::SupervisorManager(SupervisorFields {
            summary: row.get(at)?,
            issues: row.get(at + 1)?,
            follow_up: row.get(at + 2)?,
        }),
    })
}

fn read_report(kind: ReportKind, row: &Row<'_>, fields_at: usize) -> rusqlite::Result<Report> {
    Ok(Report {
        id: row.get(0)?,
        user_id: row.get(1)?,
        report_date: date_at(row, 2)?,
        accounting_manager_viewed_at: parse_opt_datetime(row.get(3)?),
        senior_manager_viewed_at: parse_opt_datetime(row.get(4)?),
        created_at: parse_datetime(&row.get::<_, String>(5)?),
        updated_at: parse_datetime(&row.get::<_, String>(6)?),
        fields: read_fields(kind, row, fields_at)?,
    })
}

fn insert_report_row(conn: &Connection, report: &Report) -> rusqlite::Result<usize> {
    let id = &report.id;
    let user_id = &report.user_id;
    let date = format_date(report.report_date);
    let created_at = format_datetime(&report.created_at);
    let updated_at = format_datetime(&report.updated_at);

    match &report.fields {
        ReportFields::Accounting(f) => conn.execute(
            "INSERT INTO accounting_reports
                (id, user_id, report_date, total_sales, cash_deposit, expenses, notes, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                id,
                user_id,
                date,
                f.total_sales,
                f.cash_deposit,
                f.expenses,
                f.notes,
                created_at,
                updated_at
            ],
        ),
        ReportFields::Cashier(f) => conn.execute(
            "INSERT INTO cashier_reports
                (id, user_id, report_date, total_sales, cash_amount, non_cash_amount, incentive_amount, notes, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                id,
                user_id,
                date,
                f.total_sales,
                f.cash_amount,
                f.non_cash_amount,
                f.incentive_amount,
                f.notes,
                created_at,
                updated_at
            ],
        ),
        ReportFields::ConsignmentStaff(f) => conn.execute(
            "INSERT INTO consignment_staff_reports
                (id, user_id, report_date, total_sales, items_received, items_returned, notes, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                id,
                user_id,
                date,
                f.total_sales,
                f.items_received,
                f.items_returned,
                f.notes,
                created_at,
                updated_at
            ],
        ),
        ReportFields::SupervisorManager(f) => conn.execute(
            "INSERT INTO supervisor_manager_reports
                (id, user_id, report_date, summary, issues, follow_up, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                id,
                user_id,
                date,
                f.summary,
                f.issues,
                f.follow_up,
                created_at,
                updated_at
            ],
        ),
    }
}

fn update_report_row(conn: &Connection, report: &Report) -> rusqlite::Result<usize> {
    let id = &report.id;
    let updated_at = format_datetime(&report.updated_at);

    match &report.fields {
        ReportFields::Accounting(f) => conn.execute(
            "UPDATE accounting_reports
             SET total_sales = ?1, cash_deposit = ?2, expenses = ?3, notes = ?4, updated_at = ?5
             WHERE id = ?6",
            params![f.total_sales, f.cash_deposit, f.expenses, f.notes, updated_at, id],
        ),
        ReportFields::Cashier(f) => conn.execute(
            "UPDATE cashier_reports
             SET total_sales = ?1, cash_amount = ?2, non_cash_amount = ?3, incentive_amount = ?4,
                 notes = ?5, updated_at = ?6
             WHERE id = ?7",
            params![
                f.total_sales,
                f.cash_amount,
                f.non_cash_amount,
                f.incentive_amount,
                f.notes,
                updated_at,
                id
            ],
        ),
        ReportFields::ConsignmentStaff(f) => conn.execute(
            "UPDATE consignment_staff_reports
             SET total_sales = ?1, items_received = ?2, items_returned = ?3, notes = ?4, updated_at = ?5
             WHERE id = ?6",
            params![
                f.total_sales,
                f.items_received,
                f.items_returned,
                f.notes,
                updated_at,
                id
            ],
        ),
        ReportFields::SupervisorManager(f) => conn.execute(
            "UPDATE supervisor_manager_reports
             SET summary = ?1, issues = ?2, follow_up = ?3, updated_at = ?4
             WHERE id = ?5",
            params![f.summary, f.issues, f.follow_up, updated_at, id],
        ),
    }
}

fn insert_lpk_entry(conn: &Connection, report_id: &str, entry: &LpkEntry) -> rusqlite::Result<()> {
    let id = entry
        .id
        .clone()
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    conn.execute(
        "INSERT INTO lpk_entries (id, report_id, branch, count, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            id,
            report_id,
            entry.branch,
            entry.count,
            format_datetime(&Utc::now())
        ],
    )?;
    Ok(())
}

const NOTIFICATION_COLUMNS: &str =
    "id, recipient_id, sender_id, kind, message, report_id, report_kind, is_read, created_at";

fn apply_lpk_plan(conn: &Connection, report_id: &str, plan: &LpkPlan) -> rusqlite::Result<()> {
    for entry in &plan.inserts {
        insert_lpk_entry(conn, report_id, entry)?;
    }
    for entry in &plan.updates {
        conn.execute(
            "UPDATE lpk_entries SET branch = ?1, count = ?2 WHERE id = ?3 AND report_id = ?4",
            params![entry.branch, entry.count, entry.id, report_id],
        )?;
    }
    for id in &plan.deletes {
        conn.execute(
            "DELETE FROM lpk_entries WHERE id = ?1 AND report_id = ?2",
            params![id, report_id],
        )?;
    }
    Ok(())
}

fn read_notification(row: &Row<'_>) -> rusqlite::Result<Notification> {
    let kind: String = row.get(3)?;
    Ok(Notification {
        id: row.get(0)?,
        recipient_id: row.get(1)?,
        sender_id: row.get(2)?,
        kind: NotificationKind::parse(&kind).unwrap_or(NotificationKind::Submission),
        message: row.get(4)?,
        report_id: row.get(5)?,
        report_kind: row
            .get::<_, Option<String>>(6)?
            .and_then(|k| ReportKind::parse(&k)),
        is_read: row.get(7)?,
        created_at: parse_datetime(&row.get::<_, String>(8)?),
    })
}

impl Store for SqliteStore {
    fn initialize(&self) -> Result<()> {
        self.conn().execute_batch(SCHEMA)?;
        Ok(())
    }

    // Profile operations

    fn create_profile(&self, profile: &Profile) -> Result<()> {
        self.conn().execute(
            "INSERT INTO profiles (id, first_name, last_name, role, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                profile.id,
                profile.first_name,
                profile.last_name,
                profile.role.map(Role::as_str),
                format_datetime(&profile.created_at),
                format_datetime(&profile.updated_at),
            ],
        )?;
        Ok(())
    }

    fn get_profile(&self, id: &str) -> Result<Option<Profile>> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = ?1"),
            params![id],
            read_profile,
        )
        .optional()
        .map_err(Error::from)
    }

    fn list_profiles(&self, cursor: &str, limit: i32) -> Result<Vec<Profile>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE id > ?1 ORDER BY id LIMIT ?2"
        ))?;

        let rows = stmt.query_map(params![cursor, limit], read_profile)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn list_profiles_by_roles(&self, roles: &[Role]) -> Result<Vec<Profile>> {
        if roles.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; roles.len()].join(", ");
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE role IN ({placeholders}) ORDER BY id"
        ))?;

        let rows = stmt.query_map(params_from_iter(roles.iter().map(|r| r.as_str())), read_profile)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn update_profile(&self, profile: &Profile) -> Result<()> {
        let rows = self.conn().execute(
            "UPDATE profiles SET first_name = ?1, last_name = ?2, role = ?3, updated_at = ?4
             WHERE id = ?5",
            params![
                profile.first_name,
                profile.last_name,
                profile.role.map(Role::as_str),
                format_datetime(&profile.updated_at),
                profile.id,
            ],
        )?;

        if rows == 0 {
            return Err(Error::NotFound);
        }
        Ok(())
    }

    // Token operations

    fn create_token(&self, token: &Token) -> Result<()> {
        let result = self.conn().execute(
            "INSERT INTO tokens (id, token_hash, token_lookup, is_admin, profile_id, created_at, expires_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                token.id,
                token.token_hash,
                token.token_lookup,
                token.is_admin,
                token.profile_id,
                format_datetime(&token.created_at),
                token.expires_at.as_ref().map(format_datetime),
            ],
        );

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(Error::TokenLookupCollision),
            Err(e) => Err(Error::from(e)),
        }
    }

    fn get_token_by_id(&self, id: &str) -> Result<Option<Token>> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {TOKEN_COLUMNS} FROM tokens WHERE id = ?1"),
            params![id],
            read_token,
        )
        .optional()
        .map_err(Error::from)
    }

    fn get_token_by_lookup(&self, lookup: &str) -> Result<Option<Token>> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {TOKEN_COLUMNS} FROM tokens WHERE token_lookup = ?1"),
            params![lookup],
            read_token,
        )
        .optional()
        .map_err(Error::from)
    }

    fn list_profile_tokens(&self, profile_id: &str) -> Result<Vec<Token>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {TOKEN_COLUMNS} FROM tokens WHERE profile_id = ?1 ORDER BY created_at DESC"
        ))?;

        let rows = stmt.query_map(params![profile_id], read_token)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn delete_token(&self, id: &str) -> Result<bool> {
        let rows = self
            .conn()
            .execute("DELETE FROM tokens WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }

    fn update_token_last_used(&self, id: &str) -> Result<()> {
        self.conn().execute(
            "UPDATE tokens SET last_used_at = ?1 WHERE id = ?2",
            params![format_datetime(&Utc::now()), id],
        )?;
        Ok(())
    }

    fn has_admin_token(&self) -> Result<bool> {
        let conn = self.conn();
        let count: i32 = conn.query_row(
            "SELECT COUNT(*) FROM tokens WHERE is_admin = 1",
            [],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    // Report operations

    fn create_report(&self, report: &Report) -> Result<()> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        match insert_report_row(&tx, report) {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => {
                return Err(Error::AlreadySubmitted(report.report_date));
            }
            Err(e) => return Err(Error::from(e)),
        }

        if let ReportFields::ConsignmentStaff(fields) = &report.fields {
            for entry in &fields.lpk_entries {
                insert_lpk_entry(&tx, &report.id, entry)?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    fn get_report(&self, kind: ReportKind, id: &str) -> Result<Option<Report>> {
        let conn = self.conn();
        conn.query_row(
            &format!(
                "SELECT {REPORT_COLUMNS}, {} FROM {} r WHERE r.id = ?1",
                field_columns(kind),
                kind.storage_location()
            ),
            params![id],
            |row| read_report(kind, row, REPORT_FIELDS_AT),
        )
        .optional()
        .map_err(Error::from)
    }

    fn update_report(&self, report: &Report, lpk: Option<&LpkPlan>) -> Result<()> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        if update_report_row(&tx, report)? == 0 {
            return Err(Error::NotFound);
        }
        if let Some(plan) = lpk {
            apply_lpk_plan(&tx, &report.id, plan)?;
        }

        tx.commit()?;
        Ok(())
    }

    fn has_report_on(&self, kind: ReportKind, user_id: &str, date: NaiveDate) -> Result<bool> {
        let conn = self.conn();
        let count: i32 = conn.query_row(
            &format!(
                "SELECT COUNT(*) FROM {} WHERE user_id = ?1 AND report_date = ?2",
                kind.storage_location()
            ),
            params![user_id, format_date(date)],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn list_reports_by_kind(&self, kind: ReportKind) -> Result<Vec<ReportWithSubmitter>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {REPORT_COLUMNS}, {SUBMITTER_COLUMNS}, {}
             FROM {} r JOIN profiles p ON p.id = r.user_id
             ORDER BY r.report_date DESC, r.created_at DESC",
            field_columns(kind),
            kind.storage_location()
        ))?;

        let rows = stmt.query_map([], |row| {
            Ok(ReportWithSubmitter {
                report: read_report(kind, row, JOINED_FIELDS_AT)?,
                submitter: Submitter {
                    first_name: row.get(REPORT_FIELDS_AT)?,
                    last_name: row.get(REPORT_FIELDS_AT + 1)?,
                    role: role_from_tag(row.get(REPORT_FIELDS_AT + 2)?),
                },
            })
        })?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn list_reports_between(
        &self,
        kind: ReportKind,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Report>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {REPORT_COLUMNS}, {} FROM {} r
             WHERE r.report_date >= ?1 AND r.report_date <= ?2
             ORDER BY r.report_date, r.created_at",
            field_columns(kind),
            kind.storage_location()
        ))?;

        let rows = stmt.query_map(params![format_date(from), format_date(to)], |row| {
            read_report(kind, row, REPORT_FIELDS_AT)
        })?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn touch_report_view(
        &self,
        kind: ReportKind,
        id: &str,
        column: ViewColumn,
        at: DateTime<Utc>,
    ) -> Result<Option<DateTime<Utc>>> {
        let table = kind.storage_location();
        let column = column.column();
        let conn = self.conn();

        let previous: Option<String> = conn
            .query_row(
                &format!("SELECT {column} FROM {table} WHERE id = ?1"),
                params![id],
                |row| row.get(0),
            )
            .optional()?
            .ok_or(Error::NotFound)?;

        conn.execute(
            &format!("UPDATE {table} SET {column} = ?1 WHERE id = ?2"),
            params![format_datetime(&at), id],
        )?;

        Ok(parse_opt_datetime(previous))
    }

    // LPK entry operations

    fn list_lpk_entries(&self, report_id: &str) -> Result<Vec<LpkEntry>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, branch, count FROM lpk_entries WHERE report_id = ?1 ORDER BY created_at, rowid",
        )?;

        let rows = stmt.query_map(params![report_id], |row| {
            Ok(LpkEntry {
                id: Some(row.get(0)?),
                branch: row.get(1)?,
                count: row.get(2)?,
            })
        })?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    // Notification operations

    fn create_notifications(&self, batch: &[Notification]) -> Result<()> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        for n in batch {
            tx.execute(
                "INSERT INTO notifications
                    (id, recipient_id, sender_id, kind, message, report_id, report_kind, is_read, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    n.id,
                    n.recipient_id,
                    n.sender_id,
                    n.kind.as_str(),
                    n.message,
                    n.report_id,
                    n.report_kind.map(ReportKind::as_str),
                    n.is_read,
                    format_datetime(&n.created_at),
                ],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    fn list_notifications(&self, recipient_id: &str, unread_only: bool) -> Result<Vec<Notification>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications
             WHERE recipient_id = ?1 AND (?2 = 0 OR is_read = 0)
             ORDER BY created_at DESC"
        ))?;

        let rows = stmt.query_map(params![recipient_id, unread_only], read_notification)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn mark_notification_read(&self, id: &str, recipient_id: &str) -> Result<bool> {
        let rows = self.conn().execute(
            "UPDATE notifications SET is_read = 1 WHERE id = ?1 AND recipient_id = ?2",
            params![id, recipient_id],
        )?;
        Ok(rows > 0)
    }

    fn mark_all_notifications_read(&self, recipient_id: &str) -> Result<usize> {
        let rows = self.conn().execute(
            "UPDATE notifications SET is_read = 1 WHERE recipient_id = ?1 AND is_read = 0",
            params![recipient_id],
        )?;
        Ok(rows)
    }

    // Activity log operations

    fn create_activity_log(&self, entry: &ActivityLog) -> Result<()> {
        self.conn().execute(
            "INSERT INTO activity_logs (id, profile_id, action, details, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                entry.id,
                entry.profile_id,
                entry.action,
                entry.details,
                format_datetime(&entry.created_at),
            ],
        )?;
        Ok(())
    }

    fn list_activity_logs(&self, before: &str, limit: i32) -> Result<Vec<ActivityLog>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, profile_id, action, details, created_at FROM activity_logs
             WHERE (?1 = '' OR created_at < ?1)
             ORDER BY created_at DESC LIMIT ?2",
        )?;

        let rows = stmt.query_map(params![before, limit], |row| {
            Ok(ActivityLog {
                id: row.get(0)?,
                profile_id: row.get(1)?,
                action: row.get(2)?,
                details: row.get(3)?,
                created_at: parse_datetime(&row.get::<_, String>(4)?),
            })
        })?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }
}
