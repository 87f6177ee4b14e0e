//! Compile-time description of a synthesizable record type.
//!
//! A [`Record`] lists its members once, with a typed setter per member. This
//! replaces runtime member discovery: the plan builder walks the declared
//! members, the setter is the only way a value reaches the instance.

use std::fmt;
use std::sync::Arc;

use crate::context::AnyValue;
use crate::error::{SynthesisError, SynthesisResult};
use crate::factory::AnyFactory;
use crate::registry::FactoryRegistry;
use crate::sequence::SequenceFactory;
use crate::types::TypeKey;

type Setter<T> = dyn Fn(&mut T, AnyValue) -> SynthesisResult<()> + Send + Sync;

/// Builds the sequence factory for a sequence member at a given level.
#[derive(Clone, Copy)]
pub struct SequenceBuilder(
	pub(crate) fn(&Arc<FactoryRegistry>, usize, usize) -> SynthesisResult<Arc<dyn AnyFactory>>,
);

/// A type the engine can construct and populate.
///
/// # Examples
///
/// ```
/// use reinhardt_synthesis::{Member, Record};
///
/// #[derive(Debug, Default)]
/// struct Soldier {
///     address: String,
///     name: String,
///     age: i32,
/// }
///
/// impl Record for Soldier {
///     fn members() -> Vec<Member<Self>> {
///         vec![
///             Member::field("address", |s: &mut Soldier, v: String| s.address = v),
///             Member::property("name", |s: &mut Soldier, v: String| s.name = v),
///             Member::property("age", |s: &mut Soldier, v: i32| s.age = v),
///         ]
///     }
///
///     fn instantiate() -> Option<Self> {
///         Some(Self::default())
///     }
/// }
/// ```
pub trait Record: Sized + Send + 'static {
	/// Members in declaration order.
	fn members() -> Vec<Member<Self>>;

	/// Parameterless construction path, used when the spec supplies no constructor.
	fn instantiate() -> Option<Self> {
		None
	}
}

/// Whether a member behaves like a plain field or a property.
///
/// Field-like members are populated before property-like members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MemberKind {
	/// Plain data field.
	Field,
	/// Property with setter semantics.
	Property,
}

/// Structural classification of a member's value type.
#[derive(Clone, Copy)]
pub enum MemberShape {
	/// A single value.
	Single,
	/// A collection generic over one element type.
	Sequence {
		/// Element type key.
		element: TypeKey,
		/// Key of `Vec<E>`, which the setter accepts for any collection type.
		collected: TypeKey,
		/// Constructs the element sequence factory during plan building.
		builder: SequenceBuilder,
	},
}

impl fmt::Debug for MemberShape {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Single => f.write_str("Single"),
			Self::Sequence { element, .. } => write!(f, "Sequence<{}>", element),
		}
	}
}

/// One populatable member of a record.
pub struct Member<T> {
	name: String,
	kind: MemberKind,
	value_type: TypeKey,
	shape: MemberShape,
	setter: Arc<Setter<T>>,
}

impl<T: 'static> Member<T> {
	/// Declares a field holding a single `V`.
	pub fn field<V, F>(name: impl Into<String>, setter: F) -> Self
	where
		V: Send + 'static,
		F: Fn(&mut T, V) + Send + Sync + 'static,
	{
		Self::single(name.into(), MemberKind::Field, setter)
	}

	/// Declares a property holding a single `V`.
	pub fn property<V, F>(name: impl Into<String>, setter: F) -> Self
	where
		V: Send + 'static,
		F: Fn(&mut T, V) + Send + Sync + 'static,
	{
		Self::single(name.into(), MemberKind::Property, setter)
	}

	/// Declares a field holding a collection `C` of `E` elements.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_synthesis::Member;
	///
	/// struct Squad { callsigns: Vec<String> }
	///
	/// let member = Member::field_sequence::<String, _, _>(
	///     "callsigns",
	///     |s: &mut Squad, v: Vec<String>| s.callsigns = v,
	/// );
	/// assert_eq!(member.name(), "callsigns");
	/// ```
	pub fn field_sequence<E, C, F>(name: impl Into<String>, setter: F) -> Self
	where
		E: Send + 'static,
		C: FromIterator<E> + Send + 'static,
		F: Fn(&mut T, C) + Send + Sync + 'static,
	{
		Self::sequence::<E, C, F>(name.into(), MemberKind::Field, setter)
	}

	/// Declares a property holding a collection `C` of `E` elements.
	pub fn property_sequence<E, C, F>(name: impl Into<String>, setter: F) -> Self
	where
		E: Send + 'static,
		C: FromIterator<E> + Send + 'static,
		F: Fn(&mut T, C) + Send + Sync + 'static,
	{
		Self::sequence::<E, C, F>(name.into(), MemberKind::Property, setter)
	}

	/// Classifies this member's value type as simple, exempting it from the depth ceiling.
	pub fn simple(mut self) -> Self {
		self.value_type = self.value_type.into_simple();
		self
	}

	fn single<V, F>(name: String, kind: MemberKind, setter: F) -> Self
	where
		V: Send + 'static,
		F: Fn(&mut T, V) + Send + Sync + 'static,
	{
		let target = name.clone();
		Self {
			name,
			kind,
			value_type: TypeKey::of::<V>(),
			shape: MemberShape::Single,
			setter: Arc::new(move |instance: &mut T, value: AnyValue| {
				let value = crate::factory::downcast_value::<V>(value, &target)?;
				setter(instance, value);
				Ok(())
			}),
		}
	}

	fn sequence<E, C, F>(name: String, kind: MemberKind, setter: F) -> Self
	where
		E: Send + 'static,
		C: FromIterator<E> + Send + 'static,
		F: Fn(&mut T, C) + Send + Sync + 'static,
	{
		let target = name.clone();
		Self {
			name,
			kind,
			value_type: TypeKey::of::<C>(),
			shape: MemberShape::Sequence {
				element: TypeKey::of::<E>(),
				collected: TypeKey::of::<Vec<E>>(),
				builder: SequenceBuilder(SequenceFactory::<E>::erased_at_level),
			},
			setter: Arc::new(move |instance: &mut T, value: AnyValue| {
				// A factory registered for the collection type yields `C` directly.
				let collection = match value.downcast::<C>() {
					Ok(collection) => *collection,
					Err(value) => value
						.downcast::<Vec<E>>()
						.map(|elements| (*elements).into_iter().collect())
						.map_err(|_| SynthesisError::TypeMismatch {
							target: target.clone(),
							expected: std::any::type_name::<C>(),
							found: "<other>",
						})?,
				};
				setter(instance, collection);
				Ok(())
			}),
		}
	}
}

impl<T> Member<T> {
	/// Stable member name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Field or property.
	pub fn kind(&self) -> MemberKind {
		self.kind
	}

	/// Key of the member's value type.
	pub fn value_type(&self) -> TypeKey {
		self.value_type
	}

	/// Single value or sequence.
	pub fn shape(&self) -> &MemberShape {
		&self.shape
	}

	/// Writes a type-erased value to this member of `instance`.
	pub fn assign(&self, instance: &mut T, value: AnyValue) -> SynthesisResult<()> {
		(self.setter)(instance, value)
	}
}

impl<T> Clone for Member<T> {
	fn clone(&self) -> Self {
		Self {
			name: self.name.clone(),
			kind: self.kind,
			value_type: self.value_type,
			shape: self.shape,
			setter: Arc::clone(&self.setter),
		}
	}
}

impl<T> fmt::Debug for Member<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Member")
			.field("name", &self.name)
			.field("kind", &self.kind)
			.field("value_type", &self.value_type)
			.field("shape", &self.shape)
			.finish()
	}
}
