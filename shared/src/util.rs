//! Small helpers shared by models, forms and filters

use validator::ValidationError;

/// Case-insensitive substring match
///
/// An empty needle matches everything.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// `validator` custom rule: the field must contain a non-whitespace character
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_ci() {
        assert!(contains_ci("Maria Santos", "maria"));
        assert!(contains_ci("Maria Santos", "SANTOS"));
        assert!(contains_ci("anything", ""));
        assert!(!contains_ci("João", "pedro"));
    }

    #[test]
    fn test_not_blank() {
        assert!(not_blank("x").is_ok());
        assert!(not_blank("").is_err());
        assert!(not_blank("   ").is_err());
    }
}
