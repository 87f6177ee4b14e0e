//! Error types for the synthesis engine.
//!
//! Every error surfaces synchronously from the `create` call (or factory
//! resolution) that raised it. Nothing is retried.

use thiserror::Error;

/// Boxed error produced by a caller-supplied generator function.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while resolving factories or synthesizing values.
#[derive(Debug, Error)]
pub enum SynthesisError {
	/// The requested type has neither a spec nor a factory registered.
	#[error("No spec registered for requested type: {0}")]
	SpecNotFound(&'static str),

	/// The type has no spec constructor and no parameterless construction path.
	#[error("Cannot construct {0}: no constructor supplied and no default construction path")]
	Construction(&'static str),

	/// A caller-supplied generator function failed.
	#[error("Generator for '{target}' failed: {source}")]
	Generator {
		/// Member or temporary name the generator was producing.
		target: String,
		/// The error returned by the generator function.
		#[source]
		source: BoxError,
	},

	/// A value of an unexpected type reached a member or the typed surface.
	#[error("Type mismatch for '{target}': expected {expected}, found {found}")]
	TypeMismatch {
		/// Member, temporary or factory the value was destined for.
		target: String,
		/// Expected type name.
		expected: &'static str,
		/// Type name the spec or factory actually produces.
		found: &'static str,
	},

	/// A spec refers to a member the record type does not declare.
	#[error("Unknown member '{member}' on {type_name}")]
	UnknownMember {
		/// Record type name.
		type_name: &'static str,
		/// Member name used by the spec.
		member: String,
	},

	/// Settings failed validation.
	#[error("Invalid settings: {0}")]
	InvalidSettings(String),

	/// JSON settings could not be parsed (when the json feature is enabled).
	#[cfg(feature = "json")]
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	/// YAML settings could not be parsed (when the yaml feature is enabled).
	#[cfg(feature = "yaml")]
	#[error("YAML error: {0}")]
	Yaml(#[from] serde_yaml::Error),
}

impl SynthesisError {
	/// Returns true for errors caused by how the registry or a spec is set up.
	pub fn is_configuration_error(&self) -> bool {
		matches!(
			self,
			Self::SpecNotFound(_) | Self::UnknownMember { .. } | Self::InvalidSettings(_)
		)
	}
}

/// Result type alias for synthesis operations.
pub type SynthesisResult<T> = Result<T, SynthesisError>;

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_spec_not_found_error() {
		let error = SynthesisError::SpecNotFound("app::Soldier");

		assert_eq!(
			error.to_string(),
			"No spec registered for requested type: app::Soldier"
		);
		assert!(error.is_configuration_error());
	}

	#[rstest]
	fn test_generator_error_keeps_source() {
		let source: BoxError = "boom".into();
		let error = SynthesisError::Generator {
			target: "name".to_string(),
			source,
		};

		assert_eq!(error.to_string(), "Generator for 'name' failed: boom");
		let source = std::error::Error::source(&error).unwrap();
		assert_eq!(source.to_string(), "boom");
		assert!(!error.is_configuration_error());
	}

	#[rstest]
	fn test_type_mismatch_error() {
		let error = SynthesisError::TypeMismatch {
			target: "age".to_string(),
			expected: "i32",
			found: "alloc::string::String",
		};

		assert_eq!(
			error.to_string(),
			"Type mismatch for 'age': expected i32, found alloc::string::String"
		);
	}

	#[cfg(feature = "json")]
	#[rstest]
	fn test_json_error_from() {
		let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
		let error: SynthesisError = json_error.into();

		assert!(matches!(error, SynthesisError::Json(_)));
	}
}
