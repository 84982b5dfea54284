//! # Validation Module
//!
//! Input validation for everything the cashier types.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front end                                                    │
//! │  └── Parsing (numbers, ids)                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Field rules before any request leaves the register                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Inventory authority                                          │
//! │  └── Final say (400 with {"error": ...})                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::money::Money;
use crate::{DEFAULT_CUSTOMER, MAX_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Wire and display format for receipt dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most 200 characters
///
/// ## Example
/// ```rust
/// use till_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Mint Tea").is_ok());
/// assert!(validate_product_name("  ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Normalizes the customer name typed at checkout.
///
/// Blank input falls back to `"Customer"`.
pub fn normalize_customer_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Ok(DEFAULT_CUSTOMER.to_string());
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "customer name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

/// Validates a search query.
///
/// ## Returns
/// The trimmed query; empty matches everything.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

/// Parses a `YYYY-MM-DD` date.
pub fn validate_date(date: &str) -> ValidationResult<NaiveDate> {
    let date = date.trim();

    if date.is_empty() {
        return Err(ValidationError::Required {
            field: "date".to_string(),
        });
    }

    NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|e| ValidationError::InvalidFormat {
        field: "date".to_string(),
        reason: format!("expected YYYY-MM-DD ({})", e),
    })
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a new product's unit price.
///
/// ## Rules
/// - Must be strictly positive
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates an initial stock level.
///
/// ## Rules
/// - Must be zero or more, and fit a `u32`
pub fn validate_stock(stock: i64) -> ValidationResult<u32> {
    u32::try_from(stock).map_err(|_| ValidationError::InvalidFormat {
        field: "stock".to_string(),
        reason: "must be a whole number of at least 0".to_string(),
    })
}

/// Validates a restock quantity.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_quantity(qty: i64) -> ValidationResult<u32> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    u32::try_from(qty).map_err(|_| ValidationError::InvalidFormat {
        field: "quantity".to_string(),
        reason: "too large".to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Mint Tea").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"A".repeat(200)).is_ok());
        assert!(validate_product_name(&"A".repeat(201)).is_err());
        // Counted in characters, not bytes
        assert!(validate_product_name(&"ש".repeat(150)).is_ok());
    }

    #[test]
    fn test_normalize_customer_name() {
        assert_eq!(normalize_customer_name("  Dana ").unwrap(), "Dana");
        assert_eq!(normalize_customer_name("   ").unwrap(), "Customer");
        assert!(normalize_customer_name(&"x".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_date() {
        let date = validate_date("2024-05-01").unwrap();
        assert_eq!(date.format(DATE_FORMAT).to_string(), "2024-05-01");

        assert!(validate_date("").is_err());
        assert!(validate_date("01/05/2024").is_err());
        assert!(validate_date("2024-02-30").is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::from_cents(1)).is_ok());
        assert!(validate_price(Money::zero()).is_err());
        assert!(validate_price(Money::from_cents(-100)).is_err());
    }

    #[test]
    fn test_validate_stock_and_quantity() {
        assert_eq!(validate_stock(0).unwrap(), 0);
        assert_eq!(validate_stock(12).unwrap(), 12);
        assert!(validate_stock(-1).is_err());

        assert_eq!(validate_quantity(3).unwrap(), 3);
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-4).is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  tea ").unwrap(), "tea");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"q".repeat(101)).is_err());
    }
}
