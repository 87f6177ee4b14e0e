//! Per-type generation specs.
//!
//! A [`TypeSpec`] says how to construct one record type and how to populate
//! its members: explicit generators, ignored members, temporaries computed
//! before population, and a post-action run once everything is assigned.

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::context::CreationContext;
use crate::error::BoxError;
use crate::factory::Factory;
use crate::generator::{GeneratorTarget, MemberGenerator};

type Constructor<T> = dyn Fn() -> T + Send + Sync;
type PostAction<T> = dyn Fn(&mut CreationContext<T>) + Send + Sync;

/// Declarative description of how to construct and populate `T`.
///
/// # Examples
///
/// ```
/// use reinhardt_synthesis::{CreationContext, TypeSpec};
///
/// #[derive(Default)]
/// struct Soldier { id: usize, name: String, address: String }
///
/// let spec = TypeSpec::<Soldier>::new()
///     .construct_with(Soldier::default)
///     .for_member::<usize>("id").with_fn(|ctx: &CreationContext<Soldier>| ctx.index())
///     .for_member::<String>("name").with_fn(|ctx: &CreationContext<Soldier>| {
///         format!("Soldier-{}", ctx.index())
///     })
///     .ignore("address");
///
/// assert_eq!(spec.member_generators().len(), 2);
/// assert!(spec.is_ignored("address"));
/// ```
pub struct TypeSpec<T> {
	constructor: Option<Arc<Constructor<T>>>,
	member_generators: Vec<MemberGenerator<T>>,
	ignored_members: Vec<String>,
	temporary_generators: Vec<MemberGenerator<T>>,
	post_action: Option<Arc<PostAction<T>>>,
	sequence_lengths: HashMap<String, usize>,
}

impl<T: Send + 'static> TypeSpec<T> {
	/// Creates an empty spec: default construction, auto-resolved members.
	pub fn new() -> Self {
		Self {
			constructor: None,
			member_generators: Vec::new(),
			ignored_members: Vec::new(),
			temporary_generators: Vec::new(),
			post_action: None,
			sequence_lengths: HashMap::new(),
		}
	}

	/// Uses `constructor` instead of the record's parameterless construction path.
	pub fn construct_with<F>(mut self, constructor: F) -> Self
	where
		F: Fn() -> T + Send + Sync + 'static,
	{
		self.constructor = Some(Arc::new(constructor));
		self
	}

	/// Starts declaring the generator for member `name` of type `V`.
	pub fn for_member<V>(self, name: impl Into<String>) -> GeneratorSpec<T, V> {
		GeneratorSpec::new(self, GeneratorTarget::Member(name.into()))
	}

	/// Starts declaring the temporary `name` of type `V`.
	///
	/// Temporaries are evaluated in declaration order before any member.
	pub fn temporary<V>(self, name: impl Into<String>) -> GeneratorSpec<T, V> {
		GeneratorSpec::new(self, GeneratorTarget::Temporary(name.into()))
	}

	/// Excludes member `name` from population.
	pub fn ignore(mut self, name: impl Into<String>) -> Self {
		let name = name.into();
		if !self.ignored_members.contains(&name) {
			self.ignored_members.push(name);
		}
		self
	}

	/// Runs `action` after all temporaries and members have been produced.
	pub fn post_action<F>(mut self, action: F) -> Self
	where
		F: Fn(&mut CreationContext<T>) + Send + Sync + 'static,
	{
		self.post_action = Some(Arc::new(action));
		self
	}

	/// Overrides the element count used when sequence member `name` is auto-resolved.
	pub fn sequence_length(mut self, name: impl Into<String>, length: usize) -> Self {
		self.sequence_lengths.insert(name.into(), length);
		self
	}

	/// Adds a prebuilt generator, replacing any earlier one with the same target.
	pub fn with_generator(mut self, generator: MemberGenerator<T>) -> Self {
		let list = match generator.target() {
			GeneratorTarget::Member(_) => &mut self.member_generators,
			GeneratorTarget::Temporary(_) => &mut self.temporary_generators,
		};
		match list.iter().position(|existing| existing.target() == generator.target()) {
			Some(position) => list[position] = generator,
			None => list.push(generator),
		}
		self
	}
}

impl<T> TypeSpec<T> {
	/// The explicit constructor, if any.
	pub fn constructor(&self) -> Option<&Arc<Constructor<T>>> {
		self.constructor.as_ref()
	}

	/// Explicit member generators in declaration order.
	pub fn member_generators(&self) -> &[MemberGenerator<T>] {
		&self.member_generators
	}

	/// Ignored member names in declaration order.
	pub fn ignored_members(&self) -> &[String] {
		&self.ignored_members
	}

	/// Temporary generators in declaration order.
	pub fn temporary_generators(&self) -> &[MemberGenerator<T>] {
		&self.temporary_generators
	}

	/// The post-action, if any.
	pub fn post_action_fn(&self) -> Option<&Arc<PostAction<T>>> {
		self.post_action.as_ref()
	}

	/// Returns true if member `name` is excluded from population.
	pub fn is_ignored(&self, name: &str) -> bool {
		self.ignored_members.iter().any(|ignored| ignored == name)
	}

	/// The explicit generator for member `name`, if declared.
	pub fn generator_for(&self, name: &str) -> Option<&MemberGenerator<T>> {
		self.member_generators
			.iter()
			.find(|generator| generator.target().name() == name)
	}

	/// The per-member sequence length override, if declared.
	pub fn sequence_length_for(&self, name: &str) -> Option<usize> {
		self.sequence_lengths.get(name).copied()
	}
}

impl<T: Send + 'static> Default for TypeSpec<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T> fmt::Debug for TypeSpec<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TypeSpec")
			.field("type", &std::any::type_name::<T>())
			.field("has_constructor", &self.constructor.is_some())
			.field("member_generators", &self.member_generators)
			.field("ignored_members", &self.ignored_members)
			.field("temporary_generators", &self.temporary_generators)
			.field("has_post_action", &self.post_action.is_some())
			.finish()
	}
}

/// Pending generator declaration returned by [`TypeSpec::for_member`] and
/// [`TypeSpec::temporary`]; each terminator hands the spec back.
pub struct GeneratorSpec<T, V> {
	spec: TypeSpec<T>,
	target: GeneratorTarget,
	_marker: PhantomData<fn() -> V>,
}

impl<T, V> GeneratorSpec<T, V> {
	fn new(spec: TypeSpec<T>, target: GeneratorTarget) -> Self {
		Self {
			spec,
			target,
			_marker: PhantomData,
		}
	}
}

impl<T, V> GeneratorSpec<T, V>
where
	T: Send + 'static,
	V: Send + 'static,
{
	/// Generates a clone of `value` every time.
	pub fn with_value(self, value: V) -> TypeSpec<T>
	where
		V: Clone + Sync,
	{
		let generator = MemberGenerator::by_value(self.target, value);
		self.spec.with_generator(generator)
	}

	/// Generates by invoking `factory`.
	pub fn with_factory<F>(self, factory: F) -> TypeSpec<T>
	where
		F: Factory<V> + 'static,
	{
		let generator = MemberGenerator::by_factory::<V, F>(self.target, factory);
		self.spec.with_generator(generator)
	}

	/// Generates by calling `func` with the current context.
	pub fn with_fn<F>(self, func: F) -> TypeSpec<T>
	where
		F: Fn(&CreationContext<T>) -> V + Send + Sync + 'static,
	{
		let generator = MemberGenerator::by_fn(self.target, func);
		self.spec.with_generator(generator)
	}

	/// Generates by calling a fallible `func`; its error aborts the construction.
	pub fn try_with_fn<E, F>(self, func: F) -> TypeSpec<T>
	where
		E: Into<BoxError>,
		F: Fn(&CreationContext<T>) -> Result<V, E> + Send + Sync + 'static,
	{
		let generator = MemberGenerator::by_try_fn(self.target, func);
		self.spec.with_generator(generator)
	}
}
