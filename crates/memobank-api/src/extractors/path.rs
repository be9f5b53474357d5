//! Typed path parameter helpers.

use memobank_core::error::AppError;

/// Parses a version number from a path or query value. Must be a positive
/// integer.
pub fn parse_version_number(raw: &str) -> Result<i32, AppError> {
    match raw.trim().parse::<i32>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(AppError::validation(format!(
            "Invalid version number '{raw}': must be a positive integer"
        ))),
    }
}

/// Rejects blank project or file names.
pub fn require_name<'a>(kind: &str, value: &'a str) -> Result<&'a str, AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{kind} name is required")));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_version_number() {
        assert_eq!(parse_version_number("3").expect("valid"), 3);
        assert!(parse_version_number("0").is_err());
        assert!(parse_version_number("-2").is_err());
        assert!(parse_version_number("1.5").is_err());
        assert!(parse_version_number("latest").is_err());
    }

    #[test]
    fn test_require_name() {
        assert_eq!(require_name("File", "a.md").expect("valid"), "a.md");
        assert!(require_name("Project", "  ").is_err());
    }
}
