use crate::error::{Error, FieldError, Result};
use crate::types::{LpkEntry, ReportFields, Role};

const MAX_NOTE_LEN: usize = 2000;
const MAX_BRANCH_LEN: usize = 100;
const MAX_LPK_ENTRIES: usize = 200;

fn check_amount(errors: &mut Vec<FieldError>, field: &str, value: f64) {
    if !value.is_finite() {
        errors.push(FieldError::new(field, "must be a number"));
    } else if value < 0.0 {
        errors.push(FieldError::new(field, "cannot be negative"));
    }
}

fn check_count(errors: &mut Vec<FieldError>, field: &str, value: i64) {
    if value < 0 {
        errors.push(FieldError::new(field, "cannot be negative"));
    }
}

fn check_text(errors: &mut Vec<FieldError>, field: &str, value: Option<&str>) {
    if value.is_some_and(|v| v.chars().count() > MAX_NOTE_LEN) {
        errors.push(FieldError::new(
            field,
            format!("cannot exceed {MAX_NOTE_LEN} characters"),
        ));
    }
}

fn check_lpk(errors: &mut Vec<FieldError>, entries: &[LpkEntry]) {
    if entries.len() > MAX_LPK_ENTRIES {
        errors.push(FieldError::new(
            "lpk_entries",
            format!("cannot have more than {MAX_LPK_ENTRIES} entries"),
        ));
    }
    for (i, entry) in entries.iter().enumerate() {
        let branch = entry.branch.trim();
        if branch.is_empty() {
            errors.push(FieldError::new(
                format!("lpk_entries[{i}].branch"),
                "is required",
            ));
        } else if branch.len() > MAX_BRANCH_LEN {
            errors.push(FieldError::new(
                format!("lpk_entries[{i}].branch"),
                format!("cannot exceed {MAX_BRANCH_LEN} characters"),
            ));
        }
        check_count(errors, &format!("lpk_entries[{i}].count"), entry.count);
    }
}

/// Checks a form submitted by `role` before anything touches the store. Every
/// problem is reported, not just the first.
pub fn validate_report_fields(fields: &ReportFields, role: Role) -> Result<()> {
    let mut errors = Vec::new();

    match fields {
        ReportFields::Accounting(f) => {
            check_amount(&mut errors, "total_sales", f.total_sales);
            check_amount(&mut errors, "cash_deposit", f.cash_deposit);
            check_amount(&mut errors, "expenses", f.expenses);
            check_text(&mut errors, "notes", f.notes.as_deref());
        }
        ReportFields::Cashier(f) => {
            check_amount(&mut errors, "total_sales", f.total_sales);
            check_amount(&mut errors, "cash_amount", f.cash_amount);
            check_amount(&mut errors, "non_cash_amount", f.non_cash_amount);
            match f.incentive_amount {
                Some(_) if role != Role::CashierInsentif => errors.push(FieldError::new(
                    "incentive_amount",
                    format!("is only reported by {}", Role::CashierInsentif),
                )),
                Some(incentive) => check_amount(&mut errors, "incentive_amount", incentive),
                None => {}
            }
            check_text(&mut errors, "notes", f.notes.as_deref());
        }
        ReportFields::ConsignmentStaff(f) => {
            check_amount(&mut errors, "total_sales", f.total_sales);
            check_count(&mut errors, "items_received", f.items_received);
            check_count(&mut errors, "items_returned", f.items_returned);
            check_text(&mut errors, "notes", f.notes.as_deref());
            check_lpk(&mut errors, &f.lpk_entries);
        }
        ReportFields::SupervisorManager(f) => {
            if f.summary.trim().is_empty() {
                errors.push(FieldError::new("summary", "is required"));
            }
            check_text(&mut errors, "summary", Some(&f.summary));
            check_text(&mut errors, "issues", f.issues.as_deref());
            check_text(&mut errors, "follow_up", f.follow_up.as_deref());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation(errors))
    }
}
