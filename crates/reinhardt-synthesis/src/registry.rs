//! Factory registry.
//!
//! Maps a [`TypeKey`] to either a pre-built factory or a [`TypeSpec`] from
//! which object factories are built on demand. A registry is an explicit
//! value: it is assembled once, frozen into an [`Arc`] and handed to every
//! factory it produces, so independently configured registries can coexist.

use std::any::{Any, type_name};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::config::SynthesisSettings;
use crate::error::{SynthesisError, SynthesisResult};
use crate::factory::{AnyFactory, ErasedFactory, Factory};
use crate::object::ObjectFactory;
use crate::record::Record;
use crate::spec::TypeSpec;
use crate::types::TypeKey;

type SharedAny = Arc<dyn Any + Send + Sync>;
type ErasedBuilder = fn(&Arc<FactoryRegistry>, usize) -> Arc<dyn AnyFactory>;
type TypedBuilder<T> = fn(&Arc<FactoryRegistry>, usize) -> Arc<dyn Factory<T>>;

enum Entry {
	Factory {
		erased: Arc<dyn AnyFactory>,
		typed: SharedAny,
	},
	Spec {
		spec: SharedAny,
		erased: ErasedBuilder,
		typed: SharedAny,
	},
}

/// What is registered for one type.
pub struct Registration<'a> {
	entry: &'a Entry,
}

impl<'a> Registration<'a> {
	/// The pre-built factory, if the type was registered with one.
	pub fn factory(&self) -> Option<&'a Arc<dyn AnyFactory>> {
		match self.entry {
			Entry::Factory { erased, .. } => Some(erased),
			Entry::Spec { .. } => None,
		}
	}

	/// The registered spec, type-erased, if the type was registered with one.
	pub fn spec(&self) -> Option<&'a (dyn Any + Send + Sync)> {
		match self.entry {
			Entry::Factory { .. } => None,
			Entry::Spec { spec, .. } => Some(spec.as_ref()),
		}
	}
}

/// Registry of specs and pre-built factories, keyed by type.
///
/// # Examples
///
/// ```
/// use reinhardt_synthesis::{FactoryFn, FactoryRegistry, SynthesisSettings, TypeKey};
///
/// let registry = FactoryRegistry::new()
///     .configure_factory::<String>(FactoryFn::new(|| "String1".to_string()))
///     .with_settings(SynthesisSettings::new().with_max_depth(2))
///     .into_shared();
///
/// assert!(registry.contains(TypeKey::of::<String>()));
/// assert_eq!(registry.settings().max_depth, 2);
/// ```
pub struct FactoryRegistry {
	entries: HashMap<TypeKey, Entry>,
	settings: SynthesisSettings,
}

impl FactoryRegistry {
	/// Creates an empty registry with default settings.
	pub fn new() -> Self {
		Self {
			entries: HashMap::new(),
			settings: SynthesisSettings::default(),
		}
	}

	/// Registers the spec for `T`, replacing any previous registration.
	pub fn configure<T: Record>(mut self, spec: TypeSpec<T>) -> Self {
		let key = TypeKey::of::<T>();
		tracing::debug!(type_name = key.name(), "Registering spec");
		let typed: TypedBuilder<T> = build_typed::<T>;
		self.entries.insert(
			key,
			Entry::Spec {
				spec: Arc::new(spec),
				erased: build_erased::<T>,
				typed: Arc::new(typed),
			},
		);
		self
	}

	/// Registers a pre-built factory for `T`, replacing any previous registration.
	///
	/// The same factory instance serves every member of type `T`, so its
	/// internal state (counters and the like) is shared across all users.
	pub fn configure_factory<T: Send + 'static>(mut self, factory: impl Factory<T> + 'static) -> Self {
		let key = TypeKey::of::<T>();
		tracing::debug!(type_name = key.name(), "Registering factory");
		let typed: Arc<dyn Factory<T>> = Arc::new(factory);
		self.entries.insert(
			key,
			Entry::Factory {
				erased: Arc::new(ErasedFactory::new(Arc::clone(&typed))),
				typed: Arc::new(typed),
			},
		);
		self
	}

	/// Replaces the settings consumed by plan building.
	pub fn with_settings(mut self, settings: SynthesisSettings) -> Self {
		self.settings = settings;
		self
	}

	/// Freezes the registry so factories can hold on to it.
	pub fn into_shared(self) -> Arc<Self> {
		Arc::new(self)
	}

	/// The settings consumed by plan building.
	pub fn settings(&self) -> &SynthesisSettings {
		&self.settings
	}

	/// Returns true if a spec or factory is registered for `key`.
	pub fn contains(&self, key: TypeKey) -> bool {
		self.entries.contains_key(&key)
	}

	/// Returns the registration for `key`, if any.
	pub fn lookup(&self, key: TypeKey) -> Option<Registration<'_>> {
		self.entries.get(&key).map(|entry| Registration { entry })
	}

	/// Returns the spec registered for `T`, if any.
	pub fn spec<T: 'static>(&self) -> Option<&TypeSpec<T>> {
		match self.entries.get(&TypeKey::of::<T>())? {
			Entry::Spec { spec, .. } => spec.downcast_ref::<TypeSpec<T>>(),
			Entry::Factory { .. } => None,
		}
	}

	/// Number of registered types.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns true if nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Keys of all registered types, in no particular order.
	pub fn keys(&self) -> impl Iterator<Item = TypeKey> + '_ {
		self.entries.keys().copied()
	}

	/// Resolves an untyped factory for `key`.
	///
	/// A pre-built factory is returned as is; a spec yields a fresh object
	/// factory at `level`.
	pub fn resolve(self: &Arc<Self>, key: TypeKey, level: usize) -> SynthesisResult<Arc<dyn AnyFactory>> {
		match self.entries.get(&key) {
			Some(Entry::Factory { erased, .. }) => Ok(Arc::clone(erased)),
			Some(Entry::Spec { erased, .. }) => Ok(erased(self, level)),
			None => Err(SynthesisError::SpecNotFound(key.name())),
		}
	}

	/// Resolves a typed factory for `T`, like [`resolve`](Self::resolve).
	pub fn resolve_typed<T: Send + 'static>(
		self: &Arc<Self>,
		level: usize,
	) -> SynthesisResult<Arc<dyn Factory<T>>> {
		let mismatch = || SynthesisError::TypeMismatch {
			target: type_name::<T>().to_string(),
			expected: type_name::<T>(),
			found: "<other>",
		};
		match self.entries.get(&TypeKey::of::<T>()) {
			Some(Entry::Factory { typed, .. }) => typed
				.downcast_ref::<Arc<dyn Factory<T>>>()
				.cloned()
				.ok_or_else(mismatch),
			Some(Entry::Spec { typed, .. }) => typed
				.downcast_ref::<TypedBuilder<T>>()
				.map(|build| build(self, level))
				.ok_or_else(mismatch),
			None => Err(SynthesisError::SpecNotFound(type_name::<T>())),
		}
	}
}

impl Default for FactoryRegistry {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for FactoryRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut types: Vec<_> = self.entries.keys().map(TypeKey::name).collect();
		types.sort_unstable();
		f.debug_struct("FactoryRegistry")
			.field("types", &types)
			.field("settings", &self.settings)
			.finish()
	}
}

fn build_erased<T: Record>(registry: &Arc<FactoryRegistry>, level: usize) -> Arc<dyn AnyFactory> {
	Arc::new(ObjectFactory::<T>::with_level(Arc::clone(registry), level))
}

fn build_typed<T: Record>(registry: &Arc<FactoryRegistry>, level: usize) -> Arc<dyn Factory<T>> {
	Arc::new(ObjectFactory::<T>::with_level(Arc::clone(registry), level))
}
