//! Per-construction state shared with generators and the post-action.

use std::any::Any;
use std::collections::HashMap;

/// Type-erased value travelling between generators, factories and setters.
pub type AnyValue = Box<dyn Any + Send>;

/// State threaded through a single `create` call.
///
/// Built fresh for every construction: it holds the instance being populated,
/// the 1-based ordinal of this construction on its factory and the temporary
/// values computed so far. It is dropped once the post-action has run.
pub struct CreationContext<T> {
	current: T,
	index: usize,
	temporaries: HashMap<String, AnyValue>,
}

impl<T> CreationContext<T> {
	pub(crate) fn new(current: T, index: usize) -> Self {
		Self {
			current,
			index,
			temporaries: HashMap::new(),
		}
	}

	/// The instance under construction.
	pub fn current(&self) -> &T {
		&self.current
	}

	/// Mutable access to the instance under construction.
	pub fn current_mut(&mut self) -> &mut T {
		&mut self.current
	}

	/// 1-based ordinal of this construction on the owning factory.
	pub fn index(&self) -> usize {
		self.index
	}

	/// Returns a temporary value if it exists and has type `V`.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_synthesis::{CreationContext, Record, Member, TypeSpec};
	///
	/// #[derive(Default)]
	/// struct Ticket { code: String }
	///
	/// impl Record for Ticket {
	///     fn members() -> Vec<Member<Self>> {
	///         vec![Member::field("code", |t: &mut Ticket, v: String| t.code = v)]
	///     }
	///     fn instantiate() -> Option<Self> { Some(Self::default()) }
	/// }
	///
	/// let spec = TypeSpec::<Ticket>::new()
	///     .temporary::<u32>("prefix").with_value(7)
	///     .for_member::<String>("code")
	///     .with_fn(|ctx: &CreationContext<Ticket>| {
	///         format!("T{}-{}", ctx.temporary::<u32>("prefix").unwrap(), ctx.index())
	///     });
	/// # let _ = spec;
	/// ```
	pub fn temporary<V: Any>(&self, name: &str) -> Option<&V> {
		self.temporaries.get(name)?.downcast_ref::<V>()
	}

	/// Returns a temporary value without assuming its type.
	pub fn temporary_any(&self, name: &str) -> Option<&(dyn Any + Send)> {
		self.temporaries.get(name).map(|value| value.as_ref())
	}

	/// Returns true if a temporary with this name has been computed.
	pub fn has_temporary(&self, name: &str) -> bool {
		self.temporaries.contains_key(name)
	}

	/// Names of the temporaries computed so far, in no particular order.
	pub fn temporary_names(&self) -> impl Iterator<Item = &str> {
		self.temporaries.keys().map(String::as_str)
	}

	/// Stores or replaces a temporary value.
	///
	/// Intended for post-actions; members already assigned are unaffected.
	pub fn set_temporary<V: Any + Send>(&mut self, name: impl Into<String>, value: V) {
		self.temporaries.insert(name.into(), Box::new(value));
	}

	pub(crate) fn insert_temporary(&mut self, name: String, value: AnyValue) {
		self.temporaries.insert(name, value);
	}

	pub(crate) fn into_current(self) -> T {
		self.current
	}
}

impl<T: std::fmt::Debug> std::fmt::Debug for CreationContext<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("CreationContext")
			.field("current", &self.current)
			.field("index", &self.index)
			.field("temporaries", &self.temporaries.keys().collect::<Vec<_>>())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_new_context_is_empty() {
		let ctx = CreationContext::new("instance", 1);

		assert_eq!(*ctx.current(), "instance");
		assert_eq!(ctx.index(), 1);
		assert_eq!(ctx.temporary_names().count(), 0);
	}

	#[rstest]
	fn test_typed_temporary_lookup() {
		let mut ctx = CreationContext::new((), 4);

		ctx.set_temporary("count", 9_i32);

		assert_eq!(ctx.temporary::<i32>("count"), Some(&9));
		assert_eq!(ctx.temporary::<String>("count"), None);
		assert!(ctx.has_temporary("count"));
		assert!(ctx.temporary_any("count").is_some());
		assert!(ctx.temporary_any("missing").is_none());
	}

	#[rstest]
	fn test_set_temporary_replaces_value() {
		let mut ctx = CreationContext::new((), 1);

		ctx.set_temporary("label", "first".to_string());
		ctx.set_temporary("label", "second".to_string());

		assert_eq!(ctx.temporary::<String>("label").map(String::as_str), Some("second"));
	}

	#[rstest]
	fn test_current_mut_and_into_current() {
		let mut ctx = CreationContext::new(vec![1, 2], 1);

		ctx.current_mut().push(3);

		assert_eq!(ctx.into_current(), vec![1, 2, 3]);
	}
}
