// 📒 Operation Journal - one record per account operation
//
// Every deposit, withdraw and balance read produces an OperationRecord,
// whether it was applied or rejected. Records go to an OperationSink.
// Sinks must not block or fail: the account has already decided the outcome.

use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Mutex;

use crate::entities::AccountId;
use crate::error::AccountError;

// ============================================================================
// OPERATION KIND
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Deposit,
    Withdraw,
    GetBalance,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Deposit => "Deposit",
            OperationKind::Withdraw => "Withdraw",
            OperationKind::GetBalance => "GetBalance",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// OPERATION RECORD
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Applied,
    Rejected(AccountError),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

/// A single account operation, as it was decided under the account lock
#[derive(Debug, Clone, PartialEq)]
pub struct OperationRecord {
    pub account_id: AccountId,
    pub kind: OperationKind,

    /// Requested amount; for GetBalance, the balance that was observed
    pub amount: f64,

    pub outcome: Outcome,
    pub at: DateTime<Utc>,
}

impl OperationRecord {
    pub fn new(account_id: AccountId, kind: OperationKind, amount: f64, outcome: Outcome) -> Self {
        OperationRecord {
            account_id,
            kind,
            amount,
            outcome,
            at: Utc::now(),
        }
    }
}

// ============================================================================
// SINKS
// ============================================================================

/// Receiver of operation records
pub trait OperationSink: Send + Sync {
    fn record(&self, record: &OperationRecord);
}

/// Default sink: one structured tracing event per record
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl OperationSink for TracingSink {
    fn record(&self, record: &OperationRecord) {
        let at = record.at.to_rfc3339();
        match &record.outcome {
            Outcome::Applied => tracing::info!(
                target: "atm_ledger::operations",
                account_id = %record.account_id,
                operation = %record.kind,
                amount = record.amount,
                time = %at,
                "operation applied"
            ),
            Outcome::Rejected(err) => tracing::info!(
                target: "atm_ledger::operations",
                account_id = %record.account_id,
                operation = %record.kind,
                amount = record.amount,
                time = %at,
                reason = err.code(),
                "operation rejected"
            ),
        }
    }
}

/// Keeps every record in memory, in arrival order
///
/// Not durable; meant for inspection and tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<OperationRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<OperationRecord> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl OperationSink for MemorySink {
    fn record(&self, record: &OperationRecord) {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(record.clone());
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_kind_display() {
        assert_eq!(OperationKind::Deposit.to_string(), "Deposit");
        assert_eq!(OperationKind::Withdraw.to_string(), "Withdraw");
        assert_eq!(OperationKind::GetBalance.to_string(), "GetBalance");
    }

    #[test]
    fn test_memory_sink_keeps_order() {
        let sink = MemorySink::new();
        assert!(sink.is_empty());

        let id = AccountId::new(7);
        sink.record(&OperationRecord::new(id, OperationKind::Deposit, 10.0, Outcome::Applied));
        sink.record(&OperationRecord::new(
            id,
            OperationKind::Withdraw,
            50.0,
            Outcome::Rejected(AccountError::InsufficientFunds {
                requested: 50.0,
                available: 10.0,
            }),
        ));

        let records = sink.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].kind, OperationKind::Deposit);
        assert!(records[0].outcome.is_applied());
        assert_eq!(records[1].kind, OperationKind::Withdraw);
        assert!(!records[1].outcome.is_applied());
    }

    #[test]
    fn test_record_timestamp_is_recent() {
        let before = Utc::now();
        let record = OperationRecord::new(
            AccountId::new(1),
            OperationKind::GetBalance,
            0.0,
            Outcome::Applied,
        );
        assert!(record.at >= before);
    }
}
