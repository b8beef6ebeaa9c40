//! Category constants and validation.
//!
//! A category is either a `folder` (holds other categories) or an `article`
//! (holds content and comments). Both live in the same self-referencing table.

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const CATEGORY_TYPE_FOLDER: &str = "folder";
pub const CATEGORY_TYPE_ARTICLE: &str = "article";

/// All valid category types.
pub const VALID_CATEGORY_TYPES: &[&str] = &[CATEGORY_TYPE_FOLDER, CATEGORY_TYPE_ARTICLE];

/// Maximum length of a category name in characters.
pub const MAX_CATEGORY_NAME_LENGTH: usize = 255;

/// Default number of entries returned by the hot-tags endpoint.
pub const DEFAULT_HOT_TAG_LIMIT: i64 = 10;

/// Upper bound on the hot-tags `limit` parameter.
pub const MAX_HOT_TAG_LIMIT: i64 = 100;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a category name: non-blank and within the length limit.
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("Category name is required".to_string()));
    }
    if name.chars().count() > MAX_CATEGORY_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Category name exceeds maximum length of {MAX_CATEGORY_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate a category type string.
pub fn validate_type(category_type: &str) -> Result<(), CoreError> {
    if VALID_CATEGORY_TYPES.contains(&category_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid category type '{category_type}'. Must be one of: {}",
            VALID_CATEGORY_TYPES.join(", ")
        )))
    }
}

/// Resolve an optional type, defaulting to `folder`, and validate it.
pub fn resolve_type(category_type: Option<&str>) -> Result<&str, CoreError> {
    let resolved = match category_type {
        Some(t) if !t.is_empty() => t,
        _ => CATEGORY_TYPE_FOLDER,
    };
    validate_type(resolved)?;
    Ok(resolved)
}

/// Reject moving a category beneath itself.
///
/// Moving beneath a descendant needs the stored hierarchy and is checked by
/// the repository layer.
pub fn validate_parent(id: DbId, new_parent_id: Option<DbId>) -> Result<(), CoreError> {
    if new_parent_id == Some(id) {
        return Err(CoreError::Validation(
            "A category cannot be its own parent".to_string(),
        ));
    }
    Ok(())
}

/// Clamp a requested hot-tag limit into `1..=MAX_HOT_TAG_LIMIT`.
pub fn clamp_hot_tag_limit(limit: Option<i64>) -> i64 {
    match limit {
        Some(n) if n > 0 => n.min(MAX_HOT_TAG_LIMIT),
        _ => DEFAULT_HOT_TAG_LIMIT,
    }
}

/// Trim tags, drop blanks and duplicates while keeping first-seen order.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn blank_name_rejected() {
        assert_matches!(validate_name(""), Err(CoreError::Validation(_)));
        assert_matches!(validate_name("   "), Err(CoreError::Validation(_)));
        assert!(validate_name("Rust").is_ok());
    }

    #[test]
    fn name_length_counts_characters() {
        let at_limit: String = "é".repeat(MAX_CATEGORY_NAME_LENGTH);
        assert!(validate_name(&at_limit).is_ok());
        let over = "a".repeat(MAX_CATEGORY_NAME_LENGTH + 1);
        assert!(validate_name(&over).is_err());
    }

    #[test]
    fn only_known_types_accepted() {
        assert!(validate_type("folder").is_ok());
        assert!(validate_type("article").is_ok());
        assert!(validate_type("Folder").is_err());
        assert!(validate_type("page").is_err());
    }

    #[test]
    fn missing_type_defaults_to_folder() {
        assert_eq!(resolve_type(None).unwrap(), CATEGORY_TYPE_FOLDER);
        assert_eq!(resolve_type(Some("")).unwrap(), CATEGORY_TYPE_FOLDER);
        assert_eq!(resolve_type(Some("article")).unwrap(), CATEGORY_TYPE_ARTICLE);
        assert!(resolve_type(Some("bogus")).is_err());
    }

    #[test]
    fn self_parent_rejected() {
        assert_matches!(validate_parent(5, Some(5)), Err(CoreError::Validation(_)));
        assert!(validate_parent(5, Some(6)).is_ok());
        assert!(validate_parent(5, None).is_ok());
    }

    #[test]
    fn hot_tag_limit_is_clamped() {
        assert_eq!(clamp_hot_tag_limit(None), DEFAULT_HOT_TAG_LIMIT);
        assert_eq!(clamp_hot_tag_limit(Some(0)), DEFAULT_HOT_TAG_LIMIT);
        assert_eq!(clamp_hot_tag_limit(Some(3)), 3);
        assert_eq!(clamp_hot_tag_limit(Some(1000)), MAX_HOT_TAG_LIMIT);
    }

    #[test]
    fn tags_are_trimmed_and_deduplicated() {
        let tags = vec![
            " rust ".to_string(),
            "".to_string(),
            "axum".to_string(),
            "rust".to_string(),
        ];
        assert_eq!(normalize_tags(tags), vec!["rust", "axum"]);
    }
}
