//! Factory traits and the closure-backed factory.

use std::any::{Any, type_name};
use std::marker::PhantomData;
use std::sync::Arc;

use crate::context::AnyValue;
use crate::error::{SynthesisError, SynthesisResult};
use crate::types::TypeKey;

/// Produces instances of `T`.
///
/// Implementations must be shareable: a pre-registered factory is handed to
/// every plan that resolves a member of type `T`.
pub trait Factory<T>: Send + Sync {
	/// Produces one instance.
	fn create(&self) -> SynthesisResult<T>;
}

/// Untyped view of a factory, for callers that only know the type at runtime.
pub trait AnyFactory: Send + Sync {
	/// Key of the type this factory produces.
	fn output_type(&self) -> TypeKey;

	/// Produces one instance as a boxed [`Any`].
	fn create_any(&self) -> SynthesisResult<AnyValue>;
}

/// Adapts a typed factory to [`AnyFactory`].
pub(crate) struct ErasedFactory<T> {
	inner: Arc<dyn Factory<T>>,
}

impl<T> ErasedFactory<T> {
	pub(crate) fn new(inner: Arc<dyn Factory<T>>) -> Self {
		Self { inner }
	}
}

impl<T: Send + 'static> AnyFactory for ErasedFactory<T> {
	fn output_type(&self) -> TypeKey {
		TypeKey::of::<T>()
	}

	fn create_any(&self) -> SynthesisResult<AnyValue> {
		Ok(Box::new(self.inner.create()?))
	}
}

/// Recovers a typed value produced through the untyped surface.
pub(crate) fn downcast_value<V: Any>(value: AnyValue, target: &str) -> SynthesisResult<V> {
	value
		.downcast::<V>()
		.map(|boxed| *boxed)
		.map_err(|_| SynthesisError::TypeMismatch {
			target: target.to_string(),
			expected: type_name::<V>(),
			found: "<other>",
		})
}

/// A factory backed by a nullary closure.
///
/// # Examples
///
/// ```
/// use reinhardt_synthesis::{Factory, FactoryFn};
///
/// let factory = FactoryFn::new(|| "String1".to_string());
/// assert_eq!(factory.create().unwrap(), "String1");
/// ```
pub struct FactoryFn<T, F> {
	func: F,
	_marker: PhantomData<fn() -> T>,
}

impl<T, F> FactoryFn<T, F>
where
	F: Fn() -> T + Send + Sync,
{
	/// Wraps a closure as a factory.
	pub fn new(func: F) -> Self {
		Self {
			func,
			_marker: PhantomData,
		}
	}
}

impl<T, F> Factory<T> for FactoryFn<T, F>
where
	F: Fn() -> T + Send + Sync,
{
	fn create(&self) -> SynthesisResult<T> {
		Ok((self.func)())
	}
}

impl<T> Factory<T> for Arc<dyn Factory<T>> {
	fn create(&self) -> SynthesisResult<T> {
		self.as_ref().create()
	}
}
