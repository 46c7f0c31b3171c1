//! Core type definitions.
//!
//! Target expansion and port range specifications, kept free of any I/O so
//! they stay trivially testable.

mod range;
mod target;

pub use range::{PortBlock, PortRangeSpec};
pub use target::expand;
