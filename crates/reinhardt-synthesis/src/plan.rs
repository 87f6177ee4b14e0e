//! Generation plan: which generator populates which member.
//!
//! Built once per [`ObjectFactory`](crate::ObjectFactory) from its spec, the
//! registry and the factory's level. Precedence per member, after ignores:
//! explicit generator, registered factory or spec for the member's type,
//! sequence of a registered element type, otherwise left unpopulated.

use std::fmt;
use std::sync::Arc;

use crate::error::{SynthesisError, SynthesisResult};
use crate::generator::{GeneratorTarget, MemberGenerator};
use crate::record::{Member, MemberShape, Record};
use crate::registry::FactoryRegistry;
use crate::spec::TypeSpec;
use crate::types::TypeKey;

/// How a planned member got its generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionKind {
	/// Declared in the spec.
	Explicit,
	/// A registered factory, or an object factory one level deeper.
	Nested,
	/// A sequence factory producing `length` elements one level deeper.
	Sequence {
		/// Number of elements produced per construction.
		length: usize,
	},
}

/// One populated member and its generator.
pub struct Resolution<T> {
	member: Member<T>,
	generator: MemberGenerator<T>,
	kind: ResolutionKind,
}

impl<T> Resolution<T> {
	/// The member being populated.
	pub fn member(&self) -> &Member<T> {
		&self.member
	}

	/// The generator producing its value.
	pub fn generator(&self) -> &MemberGenerator<T> {
		&self.generator
	}

	/// How the generator was chosen.
	pub fn kind(&self) -> ResolutionKind {
		self.kind
	}
}

impl<T> fmt::Debug for Resolution<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Resolution")
			.field("member", &self.member.name())
			.field("kind", &self.kind)
			.field("generator", &self.generator)
			.finish()
	}
}

/// Resolved generators for a record type, fields before properties.
pub struct GenerationPlan<T> {
	resolutions: Vec<Resolution<T>>,
	unresolved: Vec<String>,
}

impl<T: Record> GenerationPlan<T> {
	pub(crate) fn build(
		registry: &Arc<FactoryRegistry>,
		spec: &TypeSpec<T>,
		level: usize,
	) -> SynthesisResult<Self> {
		let type_name = std::any::type_name::<T>();
		let mut members = T::members();
		validate_explicit(type_name, &members, spec)?;

		// Stable: declared order is kept within each kind.
		members.sort_by_key(Member::kind);

		let settings = registry.settings();
		let mut resolutions = Vec::new();
		let mut unresolved = Vec::new();

		for member in members {
			let name = member.name().to_string();

			if spec.is_ignored(&name) {
				tracing::debug!(type_name, member = %name, level, "Member ignored");
				continue;
			}

			if let Some(generator) = spec.generator_for(&name) {
				tracing::debug!(type_name, member = %name, level, "Explicit generator");
				resolutions.push(Resolution {
					generator: generator.clone(),
					member,
					kind: ResolutionKind::Explicit,
				});
				continue;
			}

			let value_type = member.value_type();
			let eligible = value_type.is_simple() || level < settings.max_depth;

			if eligible && registry.contains(value_type) {
				let factory = registry.resolve(value_type, level + 1)?;
				tracing::debug!(type_name, member = %name, level, "Nested factory");
				resolutions.push(Resolution {
					generator: MemberGenerator::by_any_factory(GeneratorTarget::Member(name), factory),
					member,
					kind: ResolutionKind::Nested,
				});
				continue;
			}

			if let MemberShape::Sequence { element, builder, .. } = *member.shape() {
				if eligible && registry.contains(element) {
					let length = spec
						.sequence_length_for(&name)
						.unwrap_or(settings.default_sequence_length);
					let factory = (builder.0)(registry, length, level + 1)?;
					tracing::debug!(type_name, member = %name, level, length, "Sequence factory");
					resolutions.push(Resolution {
						generator: MemberGenerator::by_any_factory(GeneratorTarget::Member(name), factory),
						member,
						kind: ResolutionKind::Sequence { length },
					});
					continue;
				}
			}

			tracing::debug!(
				type_name,
				member = %name,
				level,
				max_depth = settings.max_depth,
				"Member left unpopulated"
			);
			unresolved.push(name);
		}

		Ok(Self {
			resolutions,
			unresolved,
		})
	}
}

impl<T> GenerationPlan<T> {
	/// Resolved members in population order.
	pub fn resolutions(&self) -> &[Resolution<T>] {
		&self.resolutions
	}

	/// Names of members that will never be populated, in population order.
	pub fn unresolved(&self) -> &[String] {
		&self.unresolved
	}

	/// The resolution for member `name`, if it is populated.
	pub fn resolution_for(&self, name: &str) -> Option<&Resolution<T>> {
		self.resolutions
			.iter()
			.find(|resolution| resolution.member.name() == name)
	}

	/// `(member, kind)` pairs in population order.
	pub fn summary(&self) -> Vec<(&str, ResolutionKind)> {
		self.resolutions
			.iter()
			.map(|resolution| (resolution.member.name(), resolution.kind))
			.collect()
	}
}

impl<T> fmt::Debug for GenerationPlan<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("GenerationPlan")
			.field("resolutions", &self.resolutions)
			.field("unresolved", &self.unresolved)
			.finish()
	}
}

fn validate_explicit<T>(
	type_name: &'static str,
	members: &[Member<T>],
	spec: &TypeSpec<T>,
) -> SynthesisResult<()> {
	for generator in spec.member_generators() {
		let name = generator.target().name();
		if spec.is_ignored(name) {
			continue;
		}
		let member = members
			.iter()
			.find(|member| member.name() == name)
			.ok_or_else(|| SynthesisError::UnknownMember {
				type_name,
				member: name.to_string(),
			})?;
		if !accepts(member, generator.value_type()) {
			return Err(SynthesisError::TypeMismatch {
				target: name.to_string(),
				expected: member.value_type().name(),
				found: generator.value_type().name(),
			});
		}
	}
	Ok(())
}

fn accepts<T>(member: &Member<T>, produced: TypeKey) -> bool {
	match *member.shape() {
		MemberShape::Sequence { collected, .. } => {
			produced == member.value_type() || produced == collected
		}
		MemberShape::Single => produced == member.value_type(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::SynthesisSettings;
	use crate::factory::FactoryFn;
	use rstest::rstest;
	use std::collections::BTreeSet;

	#[derive(Debug, Default)]
	struct Crate {
		label: String,
		weight: i32,
		next: Option<Box<Crate>>,
		tags: Vec<String>,
		codes: Vec<u64>,
	}

	impl Record for Crate {
		fn members() -> Vec<Member<Self>> {
			vec![
				Member::property("weight", |c: &mut Crate, v: i32| c.weight = v),
				Member::field("label", |c: &mut Crate, v: String| c.label = v),
				Member::property("next", |c: &mut Crate, v: Crate| c.next = Some(Box::new(v))),
				Member::field_sequence::<String, _, _>("tags", |c: &mut Crate, v: Vec<String>| c.tags = v),
				Member::field_sequence::<u64, _, _>("codes", |c: &mut Crate, v: Vec<u64>| c.codes = v),
			]
		}

		fn instantiate() -> Option<Self> {
			Some(Self::default())
		}
	}

	fn registry(spec: TypeSpec<Crate>, max_depth: usize) -> Arc<FactoryRegistry> {
		FactoryRegistry::new()
			.configure_factory::<String>(FactoryFn::new(|| "String1".to_string()))
			.configure_factory::<i32>(FactoryFn::new(|| 1))
			.configure(spec)
			.with_settings(SynthesisSettings::new().with_max_depth(max_depth))
			.into_shared()
	}

	fn build(registry: &Arc<FactoryRegistry>, level: usize) -> SynthesisResult<GenerationPlan<Crate>> {
		GenerationPlan::build(registry, registry.spec::<Crate>().unwrap(), level)
	}

	#[rstest]
	fn test_fields_precede_properties_in_declared_order() {
		let registry = registry(TypeSpec::new(), 3);

		let plan = build(&registry, 1).unwrap();

		assert_eq!(
			plan.summary(),
			vec![
				("label", ResolutionKind::Nested),
				("tags", ResolutionKind::Sequence { length: 3 }),
				("weight", ResolutionKind::Nested),
				("next", ResolutionKind::Nested),
			]
		);
		assert_eq!(plan.unresolved(), &["codes".to_string()]);
	}

	#[rstest]
	fn test_ignored_member_is_absent_even_with_explicit_generator() {
		let spec = TypeSpec::new()
			.for_member::<String>("label")
			.with_value("explicit".to_string())
			.ignore("label");
		let registry = registry(spec, 3);

		let plan = build(&registry, 1).unwrap();

		assert!(plan.resolution_for("label").is_none());
		assert!(!plan.unresolved().contains(&"label".to_string()));
	}

	#[rstest]
	fn test_explicit_generator_wins_over_registry() {
		let spec = TypeSpec::new().for_member::<i32>("weight").with_value(99);
		let registry = registry(spec, 3);

		let plan = build(&registry, 1).unwrap();

		assert_eq!(
			plan.resolution_for("weight").map(Resolution::kind),
			Some(ResolutionKind::Explicit)
		);
	}

	#[rstest]
	#[case(1, true)]
	#[case(2, true)]
	#[case(3, false)]
	#[case(4, false)]
	fn test_composite_member_respects_depth(#[case] level: usize, #[case] populated: bool) {
		let registry = registry(TypeSpec::new(), 3);

		let plan = build(&registry, level).unwrap();

		assert_eq!(plan.resolution_for("next").is_some(), populated);
		assert!(plan.resolution_for("label").is_some());
		assert!(plan.resolution_for("weight").is_some());
	}

	#[rstest]
	fn test_sequence_length_override() {
		let spec = TypeSpec::new().sequence_length("tags", 5);
		let registry = registry(spec, 3);

		let plan = build(&registry, 1).unwrap();

		assert_eq!(
			plan.resolution_for("tags").map(Resolution::kind),
			Some(ResolutionKind::Sequence { length: 5 })
		);
	}

	#[rstest]
	fn test_unknown_explicit_member_is_rejected() {
		let spec = TypeSpec::new().for_member::<String>("colour").with_value("red".to_string());
		let registry = registry(spec, 3);

		let result = build(&registry, 1);

		assert!(matches!(
			result,
			Err(SynthesisError::UnknownMember { ref member, .. }) if member == "colour"
		));
	}

	#[rstest]
	fn test_explicit_generator_type_mismatch_is_rejected() {
		let spec = TypeSpec::new().for_member::<u8>("weight").with_value(3_u8);
		let registry = registry(spec, 3);

		let result = build(&registry, 1);

		assert!(matches!(
			result,
			Err(SynthesisError::TypeMismatch { ref target, .. }) if target == "weight"
		));
	}

	#[derive(Debug, Default)]
	struct Manifest {
		seals: BTreeSet<u64>,
	}

	impl Record for Manifest {
		fn members() -> Vec<Member<Self>> {
			vec![Member::field_sequence::<u64, _, _>(
				"seals",
				|m: &mut Manifest, v: BTreeSet<u64>| m.seals = v,
			)]
		}
	}

	fn manifest_plan(spec: TypeSpec<Manifest>) -> SynthesisResult<GenerationPlan<Manifest>> {
		let registry = FactoryRegistry::new().configure(spec).into_shared();
		GenerationPlan::build(&registry, registry.spec::<Manifest>().unwrap(), 1)
	}

	#[rstest]
	fn test_sequence_member_accepts_collection_or_vec_generator() {
		let from_vec = TypeSpec::new().for_member::<Vec<u64>>("seals").with_value(vec![3, 1]);
		let from_set = TypeSpec::new()
			.for_member::<BTreeSet<u64>>("seals")
			.with_value(BTreeSet::from([2]));

		let from_vec = manifest_plan(from_vec).unwrap();
		let from_set = manifest_plan(from_set).unwrap();

		assert_eq!(from_vec.summary(), vec![("seals", ResolutionKind::Explicit)]);
		assert_eq!(from_set.summary(), vec![("seals", ResolutionKind::Explicit)]);
	}

	#[rstest]
	fn test_sequence_member_rejects_vec_of_other_element() {
		let spec = TypeSpec::new()
			.for_member::<Vec<String>>("seals")
			.with_value(vec!["x".to_string()]);

		let result = manifest_plan(spec);

		assert!(matches!(
			result,
			Err(SynthesisError::TypeMismatch { ref target, .. }) if target == "seals"
		));
	}
}
