//! Data models for the archive viewer.
//!
//! Raw export records are parsed here and normalized into the shapes the views consume.

mod channel;
mod team;
mod user;

pub use channel::*;
pub use team::*;
pub use user::*;
