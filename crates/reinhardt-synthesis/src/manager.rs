//! Type-to-factory resolution for callers.

use std::sync::Arc;

use crate::context::AnyValue;
use crate::error::SynthesisResult;
use crate::factory::{AnyFactory, Factory};
use crate::object::ROOT_LEVEL;
use crate::registry::FactoryRegistry;
use crate::types::TypeKey;

/// Hands out root-level factories from a registry.
///
/// Every call to [`factory`](Self::factory) for a spec-registered type
/// builds a fresh object factory with its own plan and counter; a type
/// registered with a pre-built factory always gets that same instance.
///
/// # Examples
///
/// ```
/// use reinhardt_synthesis::{FactoryFn, FactoryManager, FactoryRegistry, TypeKey};
///
/// let manager = FactoryManager::new(
///     FactoryRegistry::new()
///         .configure_factory::<i32>(FactoryFn::new(|| 30))
///         .into_shared(),
/// );
///
/// assert_eq!(manager.create::<i32>().unwrap(), 30);
/// let value = manager.create_any(TypeKey::of::<i32>()).unwrap();
/// assert_eq!(*value.downcast::<i32>().unwrap(), 30);
/// ```
#[derive(Debug, Clone)]
pub struct FactoryManager {
	registry: Arc<FactoryRegistry>,
}

impl FactoryManager {
	/// Creates a manager over a frozen registry.
	pub fn new(registry: Arc<FactoryRegistry>) -> Self {
		Self { registry }
	}

	/// The registry this manager resolves against.
	pub fn registry(&self) -> &Arc<FactoryRegistry> {
		&self.registry
	}

	/// Returns true if `T` can be resolved.
	pub fn is_registered<T: 'static>(&self) -> bool {
		self.registry.contains(TypeKey::of::<T>())
	}

	/// Resolves a typed factory for `T`.
	pub fn factory<T: Send + 'static>(&self) -> SynthesisResult<Arc<dyn Factory<T>>> {
		self.registry.resolve_typed::<T>(ROOT_LEVEL)
	}

	/// Resolves an untyped factory for a type known only at runtime.
	pub fn factory_for(&self, key: TypeKey) -> SynthesisResult<Arc<dyn AnyFactory>> {
		self.registry.resolve(key, ROOT_LEVEL)
	}

	/// Resolves a factory for `T` and creates one instance.
	pub fn create<T: Send + 'static>(&self) -> SynthesisResult<T> {
		self.factory::<T>()?.create()
	}

	/// Resolves a factory for `key` and creates one instance as a boxed value.
	pub fn create_any(&self, key: TypeKey) -> SynthesisResult<AnyValue> {
		self.factory_for(key)?.create_any()
	}
}

impl From<FactoryRegistry> for FactoryManager {
	fn from(registry: FactoryRegistry) -> Self {
		Self::new(registry.into_shared())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::SynthesisError;
	use crate::factory::FactoryFn;
	use rstest::{fixture, rstest};

	#[fixture]
	fn manager() -> FactoryManager {
		FactoryRegistry::new()
			.configure_factory::<String>(FactoryFn::new(|| "String1".to_string()))
			.into()
	}

	#[rstest]
	fn test_create_registered_factory(manager: FactoryManager) {
		assert!(manager.is_registered::<String>());
		assert_eq!(manager.create::<String>().unwrap(), "String1");
	}

	#[rstest]
	fn test_factory_for_reports_output_type(manager: FactoryManager) {
		let factory = manager.factory_for(TypeKey::of::<String>()).unwrap();

		assert_eq!(factory.output_type(), TypeKey::of::<String>());
	}

	#[rstest]
	fn test_unregistered_type_is_configuration_error(manager: FactoryManager) {
		let error = manager.create::<u64>().unwrap_err();

		assert!(matches!(error, SynthesisError::SpecNotFound(_)));
		assert!(error.is_configuration_error());
		assert!(manager.create_any(TypeKey::of::<u64>()).is_err());
	}
}
