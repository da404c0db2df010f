//! # Domain Entities
//!
//! Core domain entities of the coin economy.
//! All entities map directly to their corresponding database tables.
//!
//! - **User**: A chat participant and their message counter
//! - **Balance**: A user's coin balance
//! - **GamblingRecord**: One gambling play, append-only
//!
//! ## Repository Traits
//!
//! Each entity has an associated repository trait defining data access operations.
//! These traits are implemented in the infrastructure layer, following the
//! dependency inversion principle.

mod balance;
mod gambling_record;
mod user;

pub use balance::{Balance, BalanceRepository, TransferReceipt};
pub use gambling_record::{GameOutcome, GamblingRecord, GamblingRepository, PendingPlay, SettledPlay};
pub use user::{MessageActivity, User, UserRepository};

#[cfg(test)]
pub use balance::MockBalanceRepository;
#[cfg(test)]
pub use gambling_record::MockGamblingRepository;
#[cfg(test)]
pub use user::MockUserRepository;
