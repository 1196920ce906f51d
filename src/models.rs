pub mod principal;
pub mod transaction;
pub mod user;

pub use {
    principal::Principal,
    transaction::{Transaction, TransactionId, TransactionKind, TransactionStatus},
    user::{DirectoryStats, NewUser, User, UserId, UserPatch, UserStatus},
};
