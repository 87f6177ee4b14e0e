//! Record types exercised by the integration tests.

use std::collections::BTreeSet;
use std::sync::Arc;

use reinhardt_synthesis::{FactoryFn, FactoryRegistry, Member, Record};

/// Value produced by the registered `String` factory.
pub const STRING_VALUE: &str = "String1";

/// A plain record with one field and several properties.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Soldier {
	pub id: usize,
	pub address: String,
	pub name: String,
	pub age: i32,
	pub gender: bool,
}

impl Record for Soldier {
	fn members() -> Vec<Member<Self>> {
		vec![
			Member::property("id", |s: &mut Soldier, v: usize| s.id = v),
			Member::field("address", |s: &mut Soldier, v: String| s.address = v),
			Member::property("name", |s: &mut Soldier, v: String| s.name = v),
			Member::property("age", |s: &mut Soldier, v: i32| s.age = v),
			Member::property("gender", |s: &mut Soldier, v: bool| s.gender = v),
		]
	}

	fn instantiate() -> Option<Self> {
		Some(Self::default())
	}
}

/// A self-referential record.
#[derive(Debug, Default)]
pub struct FriendlySoldier {
	pub address: String,
	pub name: String,
	pub friend: Option<Box<FriendlySoldier>>,
}

impl FriendlySoldier {
	/// Number of populated `friend` links below this instance.
	pub fn chain_len(&self) -> usize {
		let mut len = 0;
		let mut current = self;
		while let Some(friend) = &current.friend {
			len += 1;
			current = friend;
		}
		len
	}
}

impl Record for FriendlySoldier {
	fn members() -> Vec<Member<Self>> {
		vec![
			Member::field("address", |s: &mut FriendlySoldier, v: String| s.address = v),
			Member::property("name", |s: &mut FriendlySoldier, v: String| s.name = v),
			Member::property("friend", |s: &mut FriendlySoldier, v: FriendlySoldier| {
				s.friend = Some(Box::new(v))
			}),
		]
	}

	fn instantiate() -> Option<Self> {
		Some(Self::default())
	}
}

/// A record holding one nested composite.
#[derive(Debug, Default)]
pub struct Lieutenant {
	pub soldier: Option<Soldier>,
}

impl Record for Lieutenant {
	fn members() -> Vec<Member<Self>> {
		vec![Member::property("soldier", |l: &mut Lieutenant, v: Soldier| {
			l.soldier = Some(v)
		})]
	}

	fn instantiate() -> Option<Self> {
		Some(Self::default())
	}
}

/// A record holding a sequence of composites.
#[derive(Debug, Default)]
pub struct Captain {
	pub name: String,
	pub soldiers: Vec<Soldier>,
}

impl Record for Captain {
	fn members() -> Vec<Member<Self>> {
		vec![
			Member::property("name", |c: &mut Captain, v: String| c.name = v),
			Member::property_sequence::<Soldier, _, _>("soldiers", |c: &mut Captain, v: Vec<Soldier>| {
				c.soldiers = v
			}),
		]
	}

	fn instantiate() -> Option<Self> {
		Some(Self::default())
	}
}

/// A record holding a sequence of itself.
#[derive(Debug, Default)]
pub struct Node {
	pub label: String,
	pub children: Vec<Node>,
}

impl Node {
	/// Number of levels in the tree rooted here, counting this node.
	pub fn depth(&self) -> usize {
		1 + self.children.iter().map(Node::depth).max().unwrap_or(0)
	}

	/// Number of nodes in the tree rooted here.
	pub fn count(&self) -> usize {
		1 + self.children.iter().map(Node::count).sum::<usize>()
	}
}

impl Record for Node {
	fn members() -> Vec<Member<Self>> {
		vec![
			Member::field("label", |n: &mut Node, v: String| n.label = v),
			Member::property_sequence::<Node, _, _>("children", |n: &mut Node, v: Vec<Node>| {
				n.children = v
			}),
		]
	}

	fn instantiate() -> Option<Self> {
		Some(Self::default())
	}
}

/// A record holding a non-`Vec` collection.
#[derive(Debug, Default)]
pub struct Squad {
	pub callsigns: BTreeSet<String>,
}

impl Record for Squad {
	fn members() -> Vec<Member<Self>> {
		vec![Member::field_sequence::<String, _, _>(
			"callsigns",
			|s: &mut Squad, v: BTreeSet<String>| s.callsigns = v,
		)]
	}

	fn instantiate() -> Option<Self> {
		Some(Self::default())
	}
}

/// A record without a parameterless construction path.
#[derive(Debug)]
pub struct Sentry {
	pub post: String,
}

impl Record for Sentry {
	fn members() -> Vec<Member<Self>> {
		vec![Member::field("post", |s: &mut Sentry, v: String| s.post = v)]
	}
}

/// Registry with a `String` factory returning [`STRING_VALUE`].
pub fn string_registry() -> FactoryRegistry {
	FactoryRegistry::new().configure_factory::<String>(FactoryFn::new(|| STRING_VALUE.to_string()))
}

/// Freezes a registry.
pub fn shared(registry: FactoryRegistry) -> Arc<FactoryRegistry> {
	registry.into_shared()
}
