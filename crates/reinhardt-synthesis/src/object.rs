//! The object factory: constructs and populates one record type.

use std::any::type_name;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use once_cell::sync::OnceCell;

use crate::context::{AnyValue, CreationContext};
use crate::error::{SynthesisError, SynthesisResult};
use crate::factory::{AnyFactory, Factory};
use crate::plan::GenerationPlan;
use crate::record::Record;
use crate::registry::FactoryRegistry;
use crate::spec::TypeSpec;
use crate::types::TypeKey;

/// Recursion level of a factory requested directly by a caller.
pub const ROOT_LEVEL: usize = 1;

/// Builds instances of `T` from the spec registered for it.
///
/// The generation plan is computed on first use (or by [`prepare`](Self::prepare))
/// and reused for every later construction. Each construction gets a fresh
/// [`CreationContext`] whose index is taken from a counter starting at 1.
///
/// # Examples
///
/// ```
/// use reinhardt_synthesis::{CreationContext, Factory, FactoryRegistry, Member, ObjectFactory, Record, TypeSpec};
///
/// #[derive(Debug, Default)]
/// struct Soldier { name: String }
///
/// impl Record for Soldier {
///     fn members() -> Vec<Member<Self>> {
///         vec![Member::property("name", |s: &mut Soldier, v: String| s.name = v)]
///     }
///     fn instantiate() -> Option<Self> { Some(Self::default()) }
/// }
///
/// let registry = FactoryRegistry::new()
///     .configure(TypeSpec::<Soldier>::new().for_member::<String>("name").with_fn(
///         |ctx: &CreationContext<Soldier>| format!("Soldier-{}", ctx.index()),
///     ))
///     .into_shared();
///
/// let factory = ObjectFactory::<Soldier>::new(registry);
/// assert_eq!(factory.create().unwrap().name, "Soldier-1");
/// assert_eq!(factory.create().unwrap().name, "Soldier-2");
/// ```
pub struct ObjectFactory<T> {
	registry: Arc<FactoryRegistry>,
	level: usize,
	plan: OnceCell<GenerationPlan<T>>,
	counter: AtomicUsize,
}

impl<T: Record> ObjectFactory<T> {
	/// Creates a root-level factory.
	pub fn new(registry: Arc<FactoryRegistry>) -> Self {
		Self::with_level(registry, ROOT_LEVEL)
	}

	/// Creates a factory at an explicit recursion level.
	pub fn with_level(registry: Arc<FactoryRegistry>, level: usize) -> Self {
		Self {
			registry,
			level,
			plan: OnceCell::new(),
			counter: AtomicUsize::new(1),
		}
	}

	/// Recursion level this factory runs at.
	pub fn level(&self) -> usize {
		self.level
	}

	/// Computes the generation plan now instead of on the first `create`.
	pub fn prepare(&self) -> SynthesisResult<()> {
		self.plan().map(|_| ())
	}

	/// The generation plan, computed once.
	pub fn plan(&self) -> SynthesisResult<&GenerationPlan<T>> {
		let spec = self.spec()?;
		self.plan
			.get_or_try_init(|| GenerationPlan::build(&self.registry, spec, self.level))
	}

	fn spec(&self) -> SynthesisResult<&TypeSpec<T>> {
		self.registry
			.spec::<T>()
			.ok_or(SynthesisError::SpecNotFound(type_name::<T>()))
	}

	fn instantiate(spec: &TypeSpec<T>) -> SynthesisResult<T> {
		match spec.constructor() {
			Some(constructor) => Ok(constructor()),
			None => T::instantiate().ok_or(SynthesisError::Construction(type_name::<T>())),
		}
	}
}

impl<T: Record> Factory<T> for ObjectFactory<T> {
	fn create(&self) -> SynthesisResult<T> {
		let spec = self.spec()?;
		let plan = self.plan()?;

		let instance = Self::instantiate(spec)?;
		let index = self.counter.fetch_add(1, Ordering::SeqCst);
		tracing::trace!(type_name = type_name::<T>(), index, level = self.level, "Creating instance");

		let mut ctx = CreationContext::new(instance, index);

		for generator in spec.temporary_generators() {
			let value = generator.generate(&ctx)?;
			ctx.insert_temporary(generator.target().name().to_string(), value);
		}

		for resolution in plan.resolutions() {
			let value = resolution.generator().generate(&ctx)?;
			resolution.member().assign(ctx.current_mut(), value)?;
		}

		if let Some(action) = spec.post_action_fn() {
			action(&mut ctx);
		}

		Ok(ctx.into_current())
	}
}

impl<T: Record> AnyFactory for ObjectFactory<T> {
	fn output_type(&self) -> TypeKey {
		TypeKey::of::<T>()
	}

	fn create_any(&self) -> SynthesisResult<AnyValue> {
		Ok(Box::new(self.create()?))
	}
}

impl<T> fmt::Debug for ObjectFactory<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ObjectFactory")
			.field("type", &type_name::<T>())
			.field("level", &self.level)
			.field("prepared", &self.plan.get().is_some())
			.field("next_index", &self.counter.load(Ordering::SeqCst))
			.finish()
	}
}
