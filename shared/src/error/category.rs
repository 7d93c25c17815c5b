//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Permission errors (2xxx)
    Permission,
    /// Tab errors (4xxx)
    Tab,
    /// Product errors (6xxx)
    Product,
    /// Table errors (7xxx)
    Table,
    /// Waiter account errors (8xxx)
    Waiter,
    /// System errors (9xxx and unknown ranges)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Permission,
            4000..5000 => Self::Tab,
            6000..7000 => Self::Product,
            7000..8000 => Self::Table,
            8000..9000 => Self::Waiter,
            _ => Self::System,
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::Auth);
        assert_eq!(ErrorCategory::from_code(2001), ErrorCategory::Permission);
        assert_eq!(ErrorCategory::from_code(4002), ErrorCategory::Tab);
        assert_eq!(ErrorCategory::from_code(6001), ErrorCategory::Product);
        assert_eq!(ErrorCategory::from_code(7001), ErrorCategory::Table);
        assert_eq!(ErrorCategory::from_code(8001), ErrorCategory::Waiter);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(3001), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::TabNotOpen.category(), ErrorCategory::Tab);
        assert_eq!(ErrorCode::WaiterNotFound.category(), ErrorCategory::Waiter);
        assert_eq!(ErrorCode::NetworkError.category(), ErrorCategory::System);
    }

    #[test]
    fn test_category_serialize() {
        let json = serde_json::to_string(&ErrorCategory::Tab).unwrap();
        assert_eq!(json, "\"tab\"");
        let category: ErrorCategory = serde_json::from_str("\"waiter\"").unwrap();
        assert_eq!(category, ErrorCategory::Waiter);
    }
}
