//! Category name rules and built-in seed data.

/// Maximum length of a category name in characters.
pub const MAX_CATEGORY_NAME_LENGTH: usize = 100;

/// Categories created for an owner that has none yet.
pub const DEFAULT_CATEGORIES: &[&str] = &["Personal Goals", "Professional Goals"];

/// Validate a category name: not blank and within the length limit.
pub fn validate_category_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Category name is required".to_string());
    }
    if name.chars().count() > MAX_CATEGORY_NAME_LENGTH {
        return Err(format!(
            "Category name must not exceed {MAX_CATEGORY_NAME_LENGTH} characters"
        ));
    }
    Ok(())
}
