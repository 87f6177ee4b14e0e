//! Fixed-length collections of independently synthesized elements.

use std::fmt;
use std::sync::Arc;

use crate::error::SynthesisResult;
use crate::factory::{AnyFactory, ErasedFactory, Factory};
use crate::object::ROOT_LEVEL;
use crate::registry::FactoryRegistry;

/// Produces `count` elements by invoking an inner element factory once per element.
///
/// The inner factory is resolved when the sequence factory is built and kept
/// for its lifetime, so element indices keep increasing across `create`
/// calls. The first failing element aborts the whole sequence.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use reinhardt_synthesis::{Factory, FactoryFn, SequenceFactory};
///
/// let inner: Arc<dyn Factory<u8>> = Arc::new(FactoryFn::new(|| 7_u8));
/// let factory = SequenceFactory::from_factory(inner, 2);
/// assert_eq!(factory.create().unwrap(), vec![7, 7]);
/// ```
pub struct SequenceFactory<E> {
	inner: Arc<dyn Factory<E>>,
	count: usize,
}

impl<E: Send + 'static> SequenceFactory<E> {
	/// Builds a sequence factory at the root level using the registry's default length.
	pub fn new(registry: &Arc<FactoryRegistry>) -> SynthesisResult<Self> {
		Self::with_count(registry, registry.settings().default_sequence_length)
	}

	/// Builds a sequence factory at the root level producing `count` elements.
	pub fn with_count(registry: &Arc<FactoryRegistry>, count: usize) -> SynthesisResult<Self> {
		Self::at_level(registry, count, ROOT_LEVEL)
	}

	/// Builds a sequence factory whose element factory runs at `level`.
	///
	/// Fails with [`SpecNotFound`](crate::SynthesisError::SpecNotFound) when
	/// the element type is not registered.
	pub fn at_level(registry: &Arc<FactoryRegistry>, count: usize, level: usize) -> SynthesisResult<Self> {
		let inner = registry.resolve_typed::<E>(level)?;
		Ok(Self::from_factory(inner, count))
	}

	/// Wraps an existing element factory.
	pub fn from_factory(inner: Arc<dyn Factory<E>>, count: usize) -> Self {
		Self { inner, count }
	}

	pub(crate) fn erased_at_level(
		registry: &Arc<FactoryRegistry>,
		count: usize,
		level: usize,
	) -> SynthesisResult<Arc<dyn AnyFactory>> {
		let typed: Arc<dyn Factory<Vec<E>>> = Arc::new(Self::at_level(registry, count, level)?);
		Ok(Arc::new(ErasedFactory::new(typed)))
	}
}

impl<E> SequenceFactory<E> {
	/// Number of elements each `create` produces.
	pub fn count(&self) -> usize {
		self.count
	}
}

impl<E> Factory<Vec<E>> for SequenceFactory<E> {
	fn create(&self) -> SynthesisResult<Vec<E>> {
		(0..self.count).map(|_| self.inner.create()).collect()
	}
}

impl<E> fmt::Debug for SequenceFactory<E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SequenceFactory")
			.field("element", &std::any::type_name::<E>())
			.field("count", &self.count)
			.finish()
	}
}
