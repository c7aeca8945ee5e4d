//! Sink implementations
//!
//! Contains LogSink, TrajectorySink, and UdpSink.

mod log;
mod trajectory;
mod udp;

pub use self::log::LogSink;
pub use self::trajectory::TrajectorySink;
pub use self::udp::UdpSink;
