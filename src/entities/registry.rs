// 🗂️ Account Registry - id allocation and lookup
//
// Owns every Account. Constructed once at startup and shared (Arc) with the
// request layer; there is no global instance.
//
// Lock discipline:
// - The registry lock covers only the id counter and the id → account map
// - It is never held while an account lock is taken (and vice versa)

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::account::{Account, AccountId, AccountSnapshot};
use crate::error::AccountError;
use crate::journal::{OperationSink, TracingSink};

struct RegistryState {
    accounts: HashMap<AccountId, Arc<Account>>,
    next_id: u64,
}

/// Registry of all accounts, keyed by id
pub struct AccountRegistry {
    state: Mutex<RegistryState>,

    /// Injected into every account this registry creates
    sink: Arc<dyn OperationSink>,
}

impl AccountRegistry {
    /// Create new empty registry; operations are journaled through tracing
    pub fn new() -> Self {
        Self::with_sink(Arc::new(TracingSink))
    }

    /// Create new empty registry that journals operations to `sink`
    pub fn with_sink(sink: Arc<dyn OperationSink>) -> Self {
        AccountRegistry {
            state: Mutex::new(RegistryState {
                accounts: HashMap::new(),
                next_id: 1,
            }),
            sink,
        }
    }

    /// Allocate the next id and register a zero-balance account under it
    pub fn create_account(&self) -> Arc<Account> {
        let account = {
            let mut state = self.lock();
            let id = AccountId::new(state.next_id);
            state.next_id += 1;

            let account = Arc::new(Account::new(id, self.sink.clone()));
            state.accounts.insert(id, account.clone());
            account
        };

        tracing::info!(account_id = %account.id(), "account created");
        account
    }

    /// Live handle to the account with `id`
    pub fn lookup(&self, id: AccountId) -> Result<Arc<Account>, AccountError> {
        let found = self.lock().accounts.get(&id).cloned();
        found.ok_or_else(|| {
            tracing::debug!(account_id = %id, "account lookup missed");
            AccountError::NotFound(id)
        })
    }

    /// Number of accounts ever created
    pub fn count(&self) -> usize {
        self.lock().accounts.len()
    }

    /// Snapshot of every account, sorted by id
    pub fn all_accounts(&self) -> Vec<AccountSnapshot> {
        // Collect handles first so the registry lock is released before any
        // account lock is taken.
        let handles: Vec<Arc<Account>> = self.lock().accounts.values().cloned().collect();

        let mut snapshots: Vec<AccountSnapshot> = handles.iter().map(|a| a.snapshot()).collect();
        snapshots.sort_by_key(|s| s.id);
        snapshots
    }

    /// Sum of all balances (not atomic across accounts)
    pub fn total_balance(&self) -> f64 {
        self.all_accounts().iter().map(|s| s.balance).sum()
    }

    fn lock(&self) -> MutexGuard<'_, RegistryState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for AccountRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
