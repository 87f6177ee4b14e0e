//! # Reinhardt Fixtures
//!
//! Spec-driven synthesis of populated record instances for tests.
//!
//! A fixture type describes its members once through the [`Record`] trait.
//! A [`TypeSpec`] then says how each member is produced, and the
//! [`FactoryRegistry`] fills in everything the spec leaves open from the
//! other registered types, down to a configurable nesting depth.
//!
//! ## Feature Flags
//!
//! - `json` (default) - Load [`SynthesisSettings`] from JSON
//! - `yaml` - Load [`SynthesisSettings`] from YAML
//! - `full` - All features enabled
//!
//! ## Quick Example
//!
//! ```rust
//! use reinhardt_fixtures::prelude::*;
//!
//! #[derive(Debug, Default)]
//! struct Soldier {
//!     address: String,
//!     name: String,
//! }
//!
//! impl Record for Soldier {
//!     fn members() -> Vec<Member<Self>> {
//!         vec![
//!             Member::field("address", |s: &mut Soldier, v: String| s.address = v),
//!             Member::property("name", |s: &mut Soldier, v: String| s.name = v),
//!         ]
//!     }
//!
//!     fn instantiate() -> Option<Self> {
//!         Some(Self::default())
//!     }
//! }
//!
//! let manager = FactoryManager::new(
//!     FactoryRegistry::new()
//!         .configure_factory::<String>(FactoryFn::new(|| "String1".to_string()))
//!         .configure(TypeSpec::<Soldier>::new().ignore("name"))
//!         .into_shared(),
//! );
//!
//! let soldier = manager.create::<Soldier>().unwrap();
//! assert_eq!(soldier.address, "String1");
//! assert!(soldier.name.is_empty());
//! ```

pub mod synthesis;

// Re-export the engine surface
pub use reinhardt_synthesis::{
	AnyFactory, CreationContext, Factory, FactoryFn, FactoryManager, FactoryRegistry, Member,
	MemberKind, ObjectFactory, Record, SequenceFactory, SynthesisError, SynthesisResult,
	SynthesisSettings, TypeKey, TypeSpec,
};

/// Convenience re-exports for common usage.
pub mod prelude {
	pub use reinhardt_synthesis::prelude::*;
}
