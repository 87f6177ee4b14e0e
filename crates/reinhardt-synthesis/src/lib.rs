//! Object-graph synthesis for test fixtures.
//!
//! This crate builds populated instances of record types from per-type
//! specs. A spec says how to construct the type and how to fill each member:
//! with a literal, with a function of the [`CreationContext`], or with
//! another factory. Members without an explicit generator are filled from
//! the [`FactoryRegistry`] when their type (or, for sequences, their element
//! type) is registered, down to a configurable nesting depth.
//!
//! # Features
//!
//! - `json` - JSON settings support (enabled by default)
//! - `yaml` - YAML settings support
//!
//! # Quick Start
//!
//! ```
//! use reinhardt_synthesis::prelude::*;
//!
//! #[derive(Debug, Default)]
//! struct Soldier {
//!     name: String,
//!     age: i32,
//! }
//!
//! impl Record for Soldier {
//!     fn members() -> Vec<Member<Self>> {
//!         vec![
//!             Member::property("name", |s: &mut Soldier, v: String| s.name = v),
//!             Member::property("age", |s: &mut Soldier, v: i32| s.age = v),
//!         ]
//!     }
//!
//!     fn instantiate() -> Option<Self> {
//!         Some(Self::default())
//!     }
//! }
//!
//! #[derive(Debug, Default)]
//! struct Captain {
//!     soldiers: Vec<Soldier>,
//! }
//!
//! impl Record for Captain {
//!     fn members() -> Vec<Member<Self>> {
//!         vec![Member::field_sequence::<Soldier, _, _>(
//!             "soldiers",
//!             |c: &mut Captain, v: Vec<Soldier>| c.soldiers = v,
//!         )]
//!     }
//!
//!     fn instantiate() -> Option<Self> {
//!         Some(Self::default())
//!     }
//! }
//!
//! let manager = FactoryManager::new(
//!     FactoryRegistry::new()
//!         .configure_factory::<i32>(FactoryFn::new(|| 30))
//!         .configure(
//!             TypeSpec::<Soldier>::new()
//!                 .for_member::<String>("name")
//!                 .with_fn(|ctx: &CreationContext<Soldier>| format!("Soldier-{}", ctx.index())),
//!         )
//!         .configure(TypeSpec::<Captain>::new())
//!         .into_shared(),
//! );
//!
//! let captain = manager.create::<Captain>()?;
//! let names: Vec<_> = captain.soldiers.iter().map(|s| s.name.as_str()).collect();
//! assert_eq!(names, ["Soldier-1", "Soldier-2", "Soldier-3"]);
//! assert!(captain.soldiers.iter().all(|s| s.age == 30));
//! # Ok::<(), SynthesisError>(())
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod factory;
pub mod generator;
pub mod manager;
pub mod object;
pub mod plan;
pub mod prelude;
pub mod record;
pub mod registry;
pub mod sequence;
pub mod spec;
pub mod types;

pub use config::{DEFAULT_MAX_DEPTH, DEFAULT_SEQUENCE_LENGTH, SynthesisSettings};
pub use context::{AnyValue, CreationContext};
pub use error::{BoxError, SynthesisError, SynthesisResult};
pub use factory::{AnyFactory, Factory, FactoryFn};
pub use generator::{Generation, GeneratorTarget, MemberGenerator};
pub use manager::FactoryManager;
pub use object::{ObjectFactory, ROOT_LEVEL};
pub use plan::{GenerationPlan, Resolution, ResolutionKind};
pub use record::{Member, MemberKind, MemberShape, Record, SequenceBuilder};
pub use registry::{FactoryRegistry, Registration};
pub use sequence::SequenceFactory;
pub use spec::{GeneratorSpec, TypeSpec};
pub use types::TypeKey;
