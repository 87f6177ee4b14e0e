//! Synthesis engine module.
//!
//! Full access to the engine crate, including plan introspection and the
//! generator types.
//!
//! # Examples
//!
//! ```rust
//! use reinhardt_fixtures::synthesis::ROOT_LEVEL;
//!
//! assert_eq!(ROOT_LEVEL, 1);
//! ```

pub use reinhardt_synthesis::*;
