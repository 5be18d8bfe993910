//! Error types for router construction and navigation.

/// Invalid router setup. Fatal at start-up: the application must not proceed.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
	/// Two routes share the same name.
	#[error("Duplicate route name: {0}")]
	DuplicateName(String),

	/// Two routes share the same path.
	#[error("Duplicate route path: {0}")]
	DuplicatePath(String),

	/// A route was registered without a name.
	#[error("Route for path {0} has an empty name")]
	EmptyName(String),

	/// A route path does not start with `/`.
	#[error("Invalid route path: {0}")]
	InvalidPath(String),

	/// The navigation mode is not one of `history` or `hash`.
	#[error("Unrecognized navigation mode: {0}")]
	UnrecognizedMode(String),

	/// The base path contains a query or fragment delimiter, or is not a
	/// valid address.
	#[error("Invalid base path: {0}")]
	InvalidBasePath(String),

	/// The configuration document could not be parsed.
	#[error("Invalid configuration: {0}")]
	Invalid(String),
}

/// Failure reported by a [`History`](crate::history::History) backend.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HistoryError {
	/// The backend cannot be reached (no `window`, no History API).
	#[error("History API unavailable: {0}")]
	Unavailable(String),

	/// The backend refused the address update.
	#[error("History update rejected: {0}")]
	Rejected(String),
}

/// Error type for router operations.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouterError {
	/// Invalid router setup.
	#[error(transparent)]
	Configuration(#[from] ConfigurationError),

	/// Programmatic navigation to a name that is not registered.
	#[error("Unknown route: {0}")]
	UnknownRoute(String),

	/// The address lies outside the configured base path.
	#[error("Path {path} is outside the base path {base:?}")]
	OutOfScope {
		/// The address pathname.
		path: String,
		/// The configured (normalized) base path.
		base: String,
	},

	/// An href or path argument is not a valid address.
	#[error("Invalid address {href:?}: {reason}")]
	InvalidAddress {
		/// The rejected input.
		href: String,
		/// Why it could not be parsed.
		reason: String,
	},

	/// The history backend failed.
	#[error(transparent)]
	History(#[from] HistoryError),
}

impl RouterError {
	pub(crate) fn invalid_address(href: &str, error: url::ParseError) -> Self {
		Self::InvalidAddress {
			href: href.to_string(),
			reason: error.to_string(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_router_error_display() {
		assert_eq!(
			RouterError::UnknownRoute("DoesNotExist".to_string()).to_string(),
			"Unknown route: DoesNotExist"
		);
		assert_eq!(
			RouterError::OutOfScope {
				path: "/other".to_string(),
				base: "/app".to_string(),
			}
			.to_string(),
			"Path /other is outside the base path \"/app\""
		);
		assert_eq!(
			RouterError::InvalidAddress {
				href: "http://[::1".to_string(),
				reason: "invalid IPv6 address".to_string(),
			}
			.to_string(),
			"Invalid address \"http://[::1\": invalid IPv6 address"
		);
	}

	#[rstest]
	fn test_configuration_error_is_transparent() {
		let error: RouterError = ConfigurationError::DuplicateName("Ping".to_string()).into();
		assert_eq!(error.to_string(), "Duplicate route name: Ping");
		assert!(matches!(
			error,
			RouterError::Configuration(ConfigurationError::DuplicateName(_))
		));
	}
}
