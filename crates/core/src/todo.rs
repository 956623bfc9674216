//! Todo field limits and validation functions.
//!
//! Create DTOs carry `validator` attributes mirroring these limits;
//! partial updates call the functions directly for the fields they supply.

use crate::ranking::validate_rank;

/// Maximum length of a todo title in characters.
pub const MAX_TITLE_LENGTH: usize = 100;

/// Maximum length of a todo description in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

/// Validate a title: required, not blank, within the length limit.
pub fn validate_title(title: &str) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("Title is required".to_string());
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(format!(
            "Title must not exceed {MAX_TITLE_LENGTH} characters"
        ));
    }
    Ok(())
}

/// Validate an optional description against the length limit.
pub fn validate_description(description: Option<&str>) -> Result<(), String> {
    match description {
        Some(text) if text.chars().count() > MAX_DESCRIPTION_LENGTH => Err(format!(
            "Description must not exceed {MAX_DESCRIPTION_LENGTH} characters"
        )),
        _ => Ok(()),
    }
}

/// Validate every supplied todo field at once, collecting all messages.
pub fn validate_fields(
    title: Option<&str>,
    description: Option<Option<&str>>,
    rank: Option<i32>,
) -> Result<(), String> {
    let mut errors = Vec::new();
    if let Some(title) = title {
        if let Err(e) = validate_title(title) {
            errors.push(e);
        }
    }
    if let Some(description) = description {
        if let Err(e) = validate_description(description) {
            errors.push(e);
        }
    }
    if let Some(rank) = rank {
        if let Err(e) = validate_rank(rank) {
            errors.push(e);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.join("; "))
    }
}
