//! Convenience re-exports for common usage.
//!
//! # Example
//!
//! ```
//! use reinhardt_synthesis::prelude::*;
//!
//! let registry = FactoryRegistry::new()
//!     .configure_factory::<String>(FactoryFn::new(|| "String1".to_string()))
//!     .into_shared();
//! assert_eq!(FactoryManager::new(registry).create::<String>().unwrap(), "String1");
//! ```

// Error types
pub use crate::error::{SynthesisError, SynthesisResult};

// Record description
pub use crate::record::{Member, MemberKind, Record};
pub use crate::types::TypeKey;

// Spec authoring
pub use crate::context::CreationContext;
pub use crate::spec::TypeSpec;

// Factories
pub use crate::factory::{AnyFactory, Factory, FactoryFn};
pub use crate::manager::FactoryManager;
pub use crate::object::ObjectFactory;
pub use crate::registry::FactoryRegistry;
pub use crate::sequence::SequenceFactory;

// Settings
pub use crate::config::SynthesisSettings;
