//! Core data models: raw upstream records and derived outputs.

mod battle;
mod compare;
mod completion;
mod lenient;
mod roster;
mod stats;
mod tag;

pub use battle::*;
pub use compare::*;
pub use completion::*;
pub use roster::*;
pub use stats::*;
pub use tag::*;
