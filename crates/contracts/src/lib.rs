//! # Contracts
//!
//! Frozen interface contracts (ICD), defining inter-module data structures and traits.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Time Model
//! - Uses the receiver's Unix timestamp (seconds, f64) as primary clock
//! - Records are processed strictly in arrival order

mod blueprint;
mod error;
mod pose;
mod record;
mod sink;
mod source;
mod viz;

pub use blueprint::*;
pub use error::*;
pub use pose::*;
pub use record::*;
pub use sink::*;
pub use source::RecordSource;
pub use viz::Visualizer;
