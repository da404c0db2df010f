//! Data Transfer Objects
//!
//! Inputs accepted by the use cases and the replies they produce.

pub mod request;
pub mod response;

pub use request::{PlayCommand, TransferCoinsCommand};
pub use response::{mention, CommandReply, ReplyStatus, GENERIC_FAILURE};
