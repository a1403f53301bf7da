// ⚠️ Account Errors - what can go wrong with a balance
//
// All three kinds are recoverable: the caller decides how to present them.

use crate::entities::AccountId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AccountError {
    /// Amount was zero, negative, NaN or infinite
    #[error("amount must be greater than zero (got {0})")]
    InvalidAmount(f64),

    /// Withdrawal would drive the balance negative
    #[error("insufficient funds: requested {requested:.2}, available {available:.2}")]
    InsufficientFunds { requested: f64, available: f64 },

    /// No account was ever issued with this id
    #[error("account {0} not found")]
    NotFound(AccountId),
}

impl AccountError {
    /// Stable machine-readable code, used in logs and API error bodies
    pub fn code(&self) -> &'static str {
        match self {
            AccountError::InvalidAmount(_) => "INVALID_AMOUNT",
            AccountError::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            AccountError::NotFound(_) => "NOT_FOUND",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            AccountError::InvalidAmount(-5.0).to_string(),
            "amount must be greater than zero (got -5)"
        );
        assert_eq!(
            AccountError::InsufficientFunds {
                requested: 150.0,
                available: 100.0
            }
            .to_string(),
            "insufficient funds: requested 150.00, available 100.00"
        );
        assert_eq!(
            AccountError::NotFound(AccountId::new(42)).to_string(),
            "account 42 not found"
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AccountError::InvalidAmount(0.0).code(), "INVALID_AMOUNT");
        assert_eq!(AccountError::NotFound(AccountId::new(1)).code(), "NOT_FOUND");
    }
}
