//! Engine settings.
//!
//! Settings travel with the [`FactoryRegistry`](crate::FactoryRegistry) they
//! were attached to, so independently configured registries can coexist in
//! one process.

use serde::{Deserialize, Serialize};

use crate::error::{SynthesisError, SynthesisResult};

/// Default composite nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Default number of elements produced for an auto-resolved sequence member.
pub const DEFAULT_SEQUENCE_LENGTH: usize = 3;

/// Knobs consumed by plan building.
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "json")] {
/// use reinhardt_synthesis::SynthesisSettings;
///
/// let settings = SynthesisSettings::from_json_str(r#"{ "max_depth": 2 }"#).unwrap();
/// assert_eq!(settings.max_depth, 2);
/// assert_eq!(settings.default_sequence_length, 3);
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisSettings {
	/// Composite members of a factory at this level or deeper are left unpopulated.
	pub max_depth: usize,
	/// Element count for sequence members without a per-member override.
	pub default_sequence_length: usize,
}

impl Default for SynthesisSettings {
	fn default() -> Self {
		Self {
			max_depth: DEFAULT_MAX_DEPTH,
			default_sequence_length: DEFAULT_SEQUENCE_LENGTH,
		}
	}
}

impl SynthesisSettings {
	/// Creates settings with the default values.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the maximum composite nesting depth.
	pub fn with_max_depth(mut self, max_depth: usize) -> Self {
		self.max_depth = max_depth;
		self
	}

	/// Sets the default sequence length.
	pub fn with_default_sequence_length(mut self, length: usize) -> Self {
		self.default_sequence_length = length;
		self
	}

	/// Parses and validates settings from a JSON document.
	#[cfg(feature = "json")]
	pub fn from_json_str(json: &str) -> SynthesisResult<Self> {
		let settings: Self = serde_json::from_str(json)?;
		settings.validate()?;
		Ok(settings)
	}

	/// Parses and validates settings from a YAML document.
	#[cfg(feature = "yaml")]
	pub fn from_yaml_str(yaml: &str) -> SynthesisResult<Self> {
		let settings: Self = serde_yaml::from_str(yaml)?;
		settings.validate()?;
		Ok(settings)
	}

	/// Checks that the settings can drive plan building.
	///
	/// The root factory sits at level 1, so a depth of zero is meaningless.
	pub fn validate(&self) -> SynthesisResult<()> {
		if self.max_depth == 0 {
			return Err(SynthesisError::InvalidSettings(
				"max_depth must be at least 1".to_string(),
			));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_defaults() {
		let settings = SynthesisSettings::default();

		assert_eq!(settings.max_depth, 3);
		assert_eq!(settings.default_sequence_length, 3);
		assert!(settings.validate().is_ok());
	}

	#[rstest]
	fn test_builder_setters() {
		let settings = SynthesisSettings::new()
			.with_max_depth(5)
			.with_default_sequence_length(10);

		assert_eq!(settings.max_depth, 5);
		assert_eq!(settings.default_sequence_length, 10);
	}

	#[cfg(feature = "json")]
	#[rstest]
	fn test_from_json_fills_missing_fields() {
		let settings = SynthesisSettings::from_json_str(r#"{ "default_sequence_length": 7 }"#)
			.unwrap();

		assert_eq!(settings.max_depth, DEFAULT_MAX_DEPTH);
		assert_eq!(settings.default_sequence_length, 7);
	}

	#[rstest]
	fn test_zero_depth_rejected() {
		let result = SynthesisSettings::new().with_max_depth(0).validate();

		assert!(matches!(result, Err(SynthesisError::InvalidSettings(_))));
	}

	#[cfg(feature = "json")]
	#[rstest]
	fn test_malformed_json_rejected() {
		let result = SynthesisSettings::from_json_str("max_depth = 2");

		assert!(matches!(result, Err(SynthesisError::Json(_))));
	}

	#[cfg(feature = "yaml")]
	#[rstest]
	fn test_from_yaml() {
		let settings =
			SynthesisSettings::from_yaml_str("max_depth: 4\ndefault_sequence_length: 2\n").unwrap();

		assert_eq!(settings, SynthesisSettings::new().with_max_depth(4).with_default_sequence_length(2));
	}
}
