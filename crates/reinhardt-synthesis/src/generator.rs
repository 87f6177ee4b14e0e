//! Member generators.
//!
//! A generator produces one value per invocation from a fixed value, a
//! delegate factory or a function of the [`CreationContext`]. It is tagged
//! with what it targets: a named member of the record or a named temporary.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::context::{AnyValue, CreationContext};
use crate::error::{BoxError, SynthesisError, SynthesisResult};
use crate::factory::{AnyFactory, ErasedFactory, Factory};
use crate::types::TypeKey;

type ValueFn = dyn Fn() -> AnyValue + Send + Sync;
type ContextFn<T> = dyn Fn(&CreationContext<T>) -> SynthesisResult<AnyValue> + Send + Sync;

/// How a generator produces its value.
pub enum Generation<T> {
	/// Returns a clone of a captured value, ignoring the context.
	Value(Arc<ValueFn>),
	/// Delegates to another factory, which builds its own context.
	Factory(Arc<dyn AnyFactory>),
	/// Calls a function with read access to the current context.
	Function(Arc<ContextFn<T>>),
}

impl<T> Clone for Generation<T> {
	fn clone(&self) -> Self {
		match self {
			Self::Value(value) => Self::Value(Arc::clone(value)),
			Self::Factory(factory) => Self::Factory(Arc::clone(factory)),
			Self::Function(func) => Self::Function(Arc::clone(func)),
		}
	}
}

impl<T> fmt::Debug for Generation<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Value(_) => f.write_str("Value"),
			Self::Factory(factory) => write!(f, "Factory({})", factory.output_type()),
			Self::Function(_) => f.write_str("Function"),
		}
	}
}

/// What a generator's value is written to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GeneratorTarget {
	/// A field or property of the record.
	Member(String),
	/// A transient value visible to later generators and the post-action.
	Temporary(String),
}

impl GeneratorTarget {
	/// The member or temporary name.
	pub fn name(&self) -> &str {
		match self {
			Self::Member(name) | Self::Temporary(name) => name,
		}
	}
}

/// A unit producing the value for one member or one temporary.
pub struct MemberGenerator<T> {
	target: GeneratorTarget,
	value_type: TypeKey,
	generation: Generation<T>,
}

impl<T: 'static> MemberGenerator<T> {
	/// Generator returning a clone of `value` on every invocation.
	pub fn by_value<V>(target: GeneratorTarget, value: V) -> Self
	where
		V: Clone + Send + Sync + 'static,
	{
		Self {
			target,
			value_type: TypeKey::of::<V>(),
			generation: Generation::Value(Arc::new(move || Box::new(value.clone()) as AnyValue)),
		}
	}

	/// Generator delegating to `factory`.
	pub fn by_factory<V, F>(target: GeneratorTarget, factory: F) -> Self
	where
		V: Send + 'static,
		F: Factory<V> + 'static,
	{
		let typed: Arc<dyn Factory<V>> = Arc::new(factory);
		Self::by_any_factory(target, Arc::new(ErasedFactory::new(typed)))
	}

	/// Generator delegating to an already type-erased factory.
	pub fn by_any_factory(target: GeneratorTarget, factory: Arc<dyn AnyFactory>) -> Self {
		Self {
			target,
			value_type: factory.output_type(),
			generation: Generation::Factory(factory),
		}
	}

	/// Generator calling an infallible function of the context.
	pub fn by_fn<V, F>(target: GeneratorTarget, func: F) -> Self
	where
		V: Send + 'static,
		F: Fn(&CreationContext<T>) -> V + Send + Sync + 'static,
	{
		Self {
			target,
			value_type: TypeKey::of::<V>(),
			generation: Generation::Function(Arc::new(move |ctx: &CreationContext<T>| {
				Ok(Box::new(func(ctx)) as AnyValue)
			})),
		}
	}

	/// Generator calling a fallible function of the context.
	///
	/// A returned error aborts the construction and is surfaced as
	/// [`SynthesisError::Generator`] with the returned error as its source.
	pub fn by_try_fn<V, E, F>(target: GeneratorTarget, func: F) -> Self
	where
		V: Send + 'static,
		E: Into<BoxError>,
		F: Fn(&CreationContext<T>) -> Result<V, E> + Send + Sync + 'static,
	{
		let name = target.name().to_string();
		Self {
			target,
			value_type: TypeKey::of::<V>(),
			generation: Generation::Function(Arc::new(move |ctx: &CreationContext<T>| match func(ctx) {
				Ok(value) => Ok(Box::new(value) as AnyValue),
				Err(err) => Err(SynthesisError::Generator {
					target: name.clone(),
					source: err.into(),
				}),
			})),
		}
	}
}

impl<T> MemberGenerator<T> {
	/// What this generator writes to.
	pub fn target(&self) -> &GeneratorTarget {
		&self.target
	}

	/// Type of the value this generator produces.
	pub fn value_type(&self) -> TypeKey {
		self.value_type
	}

	/// How the value is produced.
	pub fn generation(&self) -> &Generation<T> {
		&self.generation
	}

	/// Produces one value.
	pub fn generate(&self, ctx: &CreationContext<T>) -> SynthesisResult<AnyValue> {
		match &self.generation {
			Generation::Value(value) => Ok(value()),
			Generation::Factory(factory) => factory.create_any(),
			Generation::Function(func) => func(ctx),
		}
	}

	/// Produces one value and recovers it as `V`.
	pub fn generate_typed<V: Any>(&self, ctx: &CreationContext<T>) -> SynthesisResult<V> {
		crate::factory::downcast_value(self.generate(ctx)?, self.target.name())
	}
}

impl<T> Clone for MemberGenerator<T> {
	fn clone(&self) -> Self {
		Self {
			target: self.target.clone(),
			value_type: self.value_type,
			generation: self.generation.clone(),
		}
	}
}

impl<T> fmt::Debug for MemberGenerator<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MemberGenerator")
			.field("target", &self.target)
			.field("value_type", &self.value_type)
			.field("generation", &self.generation)
			.finish()
	}
}
