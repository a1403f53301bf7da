// Entity Models
//
// - Account: a single balance with its own lock
// - AccountRegistry: owns every account, allocates ids, serves lookups

pub mod account;
pub mod registry;

pub use account::{Account, AccountId, AccountSnapshot};
pub use registry::AccountRegistry;
