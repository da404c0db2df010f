//! Repository Implementations
//!
//! PostgreSQL implementations of domain repository traits.
//!
//! - **PgUserRepository** - Users and their message counters
//! - **PgBalanceRepository** - Coin balances and transfers
//! - **PgGamblingRepository** - Gambling log
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use sqlx::PgPool;
//! use crate::infrastructure::repositories::{
//!     PgBalanceRepository, PgGamblingRepository, PgUserRepository,
//! };
//!
//! fn setup_repositories(pool: PgPool) {
//!     let user_repo = PgUserRepository::new(pool.clone());
//!     let balance_repo = PgBalanceRepository::new(pool.clone());
//!     let gambling_repo = PgGamblingRepository::new(pool);
//! }
//! ```

pub mod balance_repository;
pub mod gambling_repository;
pub mod user_repository;

pub use balance_repository::PgBalanceRepository;
pub use gambling_repository::PgGamblingRepository;
pub use user_repository::PgUserRepository;
