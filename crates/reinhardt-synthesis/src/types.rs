//! Type identity and classification for synthesized members.
//!
//! A [`TypeKey`] is the stable identifier the registry is keyed by. It also
//! carries the "simple type" classification: simple members bypass the
//! recursion depth ceiling, composite members stop being auto-populated once
//! the ceiling is reached.

use std::any::{TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Stable identifier of a Rust type used as a registry key.
///
/// Equality and hashing only consider the underlying [`TypeId`]; the name is
/// kept for diagnostics and the `simple` flag for depth decisions.
#[derive(Clone, Copy)]
pub struct TypeKey {
	id: TypeId,
	name: &'static str,
	simple: bool,
}

impl TypeKey {
	/// Creates the key for `V`, classifying built-in scalars as simple.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_synthesis::TypeKey;
	///
	/// assert!(TypeKey::of::<String>().is_simple());
	/// assert!(!TypeKey::of::<Vec<String>>().is_simple());
	/// ```
	pub fn of<V: 'static>() -> Self {
		let id = TypeId::of::<V>();
		Self {
			id,
			name: type_name::<V>(),
			simple: is_builtin_simple(id),
		}
	}

	/// Creates the key for `V` and forces the simple classification.
	///
	/// Use this for caller-defined leaf types (newtypes, plain enums) that
	/// should be populated at any depth.
	pub fn simple_of<V: 'static>() -> Self {
		Self::of::<V>().into_simple()
	}

	/// Returns the same key classified as simple.
	pub fn into_simple(mut self) -> Self {
		self.simple = true;
		self
	}

	/// Returns the underlying type id.
	pub fn id(&self) -> TypeId {
		self.id
	}

	/// Returns the fully qualified type name.
	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Returns true if members of this type ignore the depth ceiling.
	pub fn is_simple(&self) -> bool {
		self.simple
	}
}

impl PartialEq for TypeKey {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.id.hash(state);
	}
}

impl fmt::Debug for TypeKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TypeKey")
			.field("name", &self.name)
			.field("simple", &self.simple)
			.finish()
	}
}

impl fmt::Display for TypeKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name)
	}
}

macro_rules! builtin_simple_ids {
	($($ty:ty),* $(,)?) => {
		[$((TypeId::of::<$ty>(), TypeId::of::<Option<$ty>>())),*]
	};
}

fn is_builtin_simple(id: TypeId) -> bool {
	let pairs = builtin_simple_ids![
		bool,
		char,
		i8,
		i16,
		i32,
		i64,
		i128,
		isize,
		u8,
		u16,
		u32,
		u64,
		u128,
		usize,
		f32,
		f64,
		String,
		&'static str,
	];
	pairs.iter().any(|(plain, optional)| *plain == id || *optional == id)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::collections::HashSet;

	struct Composite;

	#[rstest]
	#[case(TypeKey::of::<i32>())]
	#[case(TypeKey::of::<u64>())]
	#[case(TypeKey::of::<f64>())]
	#[case(TypeKey::of::<bool>())]
	#[case(TypeKey::of::<String>())]
	#[case(TypeKey::of::<&'static str>())]
	#[case(TypeKey::of::<Option<String>>())]
	fn test_builtin_scalars_are_simple(#[case] key: TypeKey) {
		assert!(key.is_simple(), "{} should be simple", key);
	}

	#[rstest]
	fn test_composites_are_not_simple() {
		assert!(!TypeKey::of::<Composite>().is_simple());
		assert!(!TypeKey::of::<Vec<i32>>().is_simple());
		assert!(!TypeKey::of::<Option<Composite>>().is_simple());
	}

	#[rstest]
	fn test_simple_of_forces_classification() {
		let key = TypeKey::simple_of::<Composite>();

		assert!(key.is_simple());
		assert_eq!(key, TypeKey::of::<Composite>());
	}

	#[rstest]
	fn test_identity_ignores_classification() {
		let mut keys = HashSet::new();
		keys.insert(TypeKey::of::<Composite>());
		keys.insert(TypeKey::simple_of::<Composite>());

		assert_eq!(keys.len(), 1);
		assert!(TypeKey::of::<Composite>().name().ends_with("Composite"));
	}
}
