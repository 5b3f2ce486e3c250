//! # Utilities Module
//!
//! Small grid math helpers and reachability queries.

pub mod math;
pub mod reachability;

pub use self::math::*;
pub use self::reachability::*;
