// 💳 Account Entity - one balance, one lock
//
// "Identity is the id, the value is the balance"
//
// Guarantees:
// - Balance is never negative
// - Check-and-update of the balance happens under a single lock acquisition
// - Each call touches exactly this account, so there is no lock ordering to get wrong
// - Every call (applied or rejected) emits exactly one OperationRecord

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, TryLockError};

use crate::error::AccountError;
use crate::journal::{OperationKind, OperationRecord, OperationSink, Outcome};

// ============================================================================
// ACCOUNT ID
// ============================================================================

/// Registry-assigned account identity (starts at 1, never reused)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(u64);

impl AccountId {
    pub const fn new(raw: u64) -> Self {
        AccountId(raw)
    }

    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for AccountId {
    fn from(raw: u64) -> Self {
        AccountId(raw)
    }
}

// ============================================================================
// SNAPSHOT
// ============================================================================

/// Point-in-time copy of an account, read under its lock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub id: AccountId,
    pub balance: f64,
}

// ============================================================================
// ACCOUNT ENTITY
// ============================================================================

/// A single balance guarded by its own mutex
///
/// Accounts are owned by the `AccountRegistry` and handed out as `Arc<Account>`;
/// every holder operates on the same live instance.
pub struct Account {
    id: AccountId,
    balance: Mutex<f64>,
    sink: Arc<dyn OperationSink>,
}

impl Account {
    /// Create a zero-balance account (the registry is the only caller in practice)
    pub fn new(id: AccountId, sink: Arc<dyn OperationSink>) -> Self {
        Account {
            id,
            balance: Mutex::new(0.0),
            sink,
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    /// Add `amount` to the balance and return the new balance
    pub fn deposit(&self, amount: f64) -> Result<f64, AccountError> {
        let result = {
            let mut balance = self.lock();
            validate_amount(amount).and_then(|()| {
                // A sum that overflows to infinity is rejected; balance stays finite
                let next = *balance + amount;
                if !next.is_finite() {
                    return Err(AccountError::InvalidAmount(amount));
                }
                *balance = next;
                Ok(next)
            })
        };

        self.emit(OperationKind::Deposit, amount, &result);
        result
    }

    /// Subtract `amount` from the balance and return the new balance
    ///
    /// Fails with `InsufficientFunds` when `amount` exceeds the balance at the
    /// moment of execution; the balance is left untouched.
    pub fn withdraw(&self, amount: f64) -> Result<f64, AccountError> {
        let result = {
            let mut balance = self.lock();
            validate_amount(amount).and_then(|()| {
                if amount > *balance {
                    return Err(AccountError::InsufficientFunds {
                        requested: amount,
                        available: *balance,
                    });
                }
                *balance -= amount;
                Ok(*balance)
            })
        };

        self.emit(OperationKind::Withdraw, amount, &result);
        result
    }

    /// Current balance (never observes a half-applied mutation)
    pub fn balance(&self) -> f64 {
        let balance = *self.lock();
        self.sink.record(&OperationRecord::new(
            self.id,
            OperationKind::GetBalance,
            balance,
            Outcome::Applied,
        ));
        balance
    }

    /// Id and balance, read under the lock (not journaled)
    pub fn snapshot(&self) -> AccountSnapshot {
        AccountSnapshot {
            id: self.id,
            balance: *self.lock(),
        }
    }

    // Poisoning is recovered: every mutation is a single assignment after
    // validation, so a panicking holder cannot leave a torn balance.
    fn lock(&self) -> MutexGuard<'_, f64> {
        self.balance
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // Called after the guard is dropped
    fn emit(&self, kind: OperationKind, amount: f64, result: &Result<f64, AccountError>) {
        let outcome = match result {
            Ok(_) => Outcome::Applied,
            Err(err) => Outcome::Rejected(err.clone()),
        };
        self.sink
            .record(&OperationRecord::new(self.id, kind, amount, outcome));
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // try_lock: formatting must not block on a caller's own guard
        let mut debug = f.debug_struct("Account");
        debug.field("id", &self.id);
        match self.balance.try_lock() {
            Ok(balance) => debug.field("balance", &*balance),
            Err(TryLockError::Poisoned(poisoned)) => debug.field("balance", &*poisoned.into_inner()),
            Err(TryLockError::WouldBlock) => debug.field("balance", &format_args!("<locked>")),
        };
        debug.finish_non_exhaustive()
    }
}

/// Amounts must be finite and strictly positive
fn validate_amount(amount: f64) -> Result<(), AccountError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(AccountError::InvalidAmount(amount))
    }
}

// ============================================================================
// TESTS
// ============================================================================
