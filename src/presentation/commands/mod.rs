//! Chat Commands
//!
//! Prefix command parsing, the help listing, and dispatch to the use cases.

pub mod help;
pub mod parser;
pub mod router;

pub use parser::{Command, CommandError, CommandParser};
pub use router::CommandRouter;
