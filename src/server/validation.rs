use crate::server::response::ApiError;

const MAX_NAME_LEN: usize = 100;

fn is_valid_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == ' ' || c == '-' || c == '\'' || c == '.'
}

fn validate_name(name: &str, field: &str, required: bool) -> Result<(), String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return if required {
            Err(format!("{field} cannot be empty"))
        } else {
            Ok(())
        };
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(format!("{field} cannot exceed {MAX_NAME_LEN} characters"));
    }
    if !trimmed.chars().all(is_valid_name_char) {
        return Err(format!(
            "{field} can only contain letters, digits, spaces, hyphens, apostrophes and periods"
        ));
    }
    Ok(())
}

pub fn validate_first_name(name: &str) -> Result<(), ApiError> {
    validate_name(name, "First name", true).map_err(ApiError::bad_request)
}

pub fn validate_last_name(name: &str) -> Result<(), ApiError> {
    validate_name(name, "Last name", false).map_err(ApiError::bad_request)
}
