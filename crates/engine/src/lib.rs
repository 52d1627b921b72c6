//! Shared-expense ledger engine.
//!
//! The core is three pure, stateless steps over in-memory snapshots:
//!
//! 1. [`allocate_splits`] turns one expense into per-member obligations.
//! 2. [`group_balances`] / [`person_balances`] reduce expenses to signed
//!    balances (positive = is owed, negative = owes).
//! 3. [`settle`] turns a group's balances into payment instructions.
//!
//! [`Engine`] wraps the core with sea-orm persistence: it stores persons,
//! groups and expenses and recomputes every derived view from storage.

pub use aggregator::{
    GroupBalance, GroupLedger, MemberBalance, group_balances, member_balance, person_balances,
    total_expenses,
};
pub use allocator::allocate_splits;
pub use amount::{TOLERANCE, approx_eq, is_negligible};
pub use commands::NewExpenseCmd;
pub use error::EngineError;
pub use expenses::{Expense, ShareRequest, SplitKind, SplitPolicy};
pub use groups::{Group, GroupSummary};
pub use ops::{Engine, EngineBuilder};
pub use persons::Person;
pub use settlement::{SettlementTransaction, settle};
pub use splits::Split;

mod aggregator;
mod allocator;
mod amount;
mod commands;
mod error;
mod expenses;
mod group_members;
mod groups;
mod ops;
mod persons;
mod settlement;
mod splits;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
