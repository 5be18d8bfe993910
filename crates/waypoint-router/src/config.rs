//! Router configuration.
//!
//! The base path is read once at start-up from the deployment environment,
//! either at runtime ([`RouterConfig::from_env`]) or baked into the bundle at
//! compile time ([`RouterConfig::from_build_env`]), which is what a wasm
//! application served under a sub-path needs.
//!
//! ## Environment variables
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `BASE_URL` | Prefix applied to every address the router reads or writes | `/` |
//! | `ROUTER_MODE` | `history` or `hash` (case-insensitive) | `history` |

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::ConfigurationError;
use crate::location::Location;

/// Environment variable holding the base path.
pub const BASE_URL_VAR: &str = "BASE_URL";

/// Environment variable holding the navigation mode.
pub const MODE_VAR: &str = "ROUTER_MODE";

/// How the router encodes the current route in the address bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NavigationMode {
	/// Real address paths (`/app/ping`). Needs the server to serve the
	/// application for every path under the base.
	#[default]
	History,
	/// Fragment addressing (`/app/#/ping`).
	Hash,
}

impl NavigationMode {
	/// Returns the lowercase name of the mode.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::History => "history",
			Self::Hash => "hash",
		}
	}
}

impl fmt::Display for NavigationMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for NavigationMode {
	type Err = ConfigurationError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"history" => Ok(Self::History),
			"hash" => Ok(Self::Hash),
			_ => Err(ConfigurationError::UnrecognizedMode(s.to_string())),
		}
	}
}

/// Router configuration: navigation mode and base path.
///
/// The base path is stored normalized: it starts with `/`, has no trailing
/// `/`, and the root base is the empty string.
///
/// # Example
///
/// ```
/// use waypoint_router::{NavigationMode, RouterConfig};
///
/// let config = RouterConfig::new(NavigationMode::History, "app/").unwrap();
/// assert_eq!(config.base_path(), "/app");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "RawRouterConfig")]
pub struct RouterConfig {
	mode: NavigationMode,
	base_path: String,
}

impl RouterConfig {
	/// Creates a configuration, normalizing the base path.
	pub fn new(mode: NavigationMode, base_path: &str) -> Result<Self, ConfigurationError> {
		Ok(Self {
			mode,
			base_path: normalize_base(base_path)?,
		})
	}

	/// History-mode configuration under `base_path`.
	pub fn history(base_path: &str) -> Result<Self, ConfigurationError> {
		Self::new(NavigationMode::History, base_path)
	}

	/// Hash-mode configuration under `base_path`.
	pub fn hash(base_path: &str) -> Result<Self, ConfigurationError> {
		Self::new(NavigationMode::Hash, base_path)
	}

	/// Returns the navigation mode.
	pub fn mode(&self) -> NavigationMode {
		self.mode
	}

	/// Returns the normalized base path (empty for the root).
	pub fn base_path(&self) -> &str {
		&self.base_path
	}

	/// Reads `BASE_URL` and `ROUTER_MODE` from the process environment.
	pub fn from_env() -> Result<Self, ConfigurationError> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	/// Reads `BASE_URL` and `ROUTER_MODE` as they were set when the crate was
	/// compiled.
	pub fn from_build_env() -> Result<Self, ConfigurationError> {
		Self::from_lookup(|key| match key {
			BASE_URL_VAR => option_env!("BASE_URL").map(str::to_string),
			MODE_VAR => option_env!("ROUTER_MODE").map(str::to_string),
			_ => None,
		})
	}

	/// Builds a configuration from an arbitrary key lookup. Missing or blank
	/// values fall back to the defaults.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
	where
		F: Fn(&str) -> Option<String>,
	{
		RawRouterConfig {
			mode: lookup(MODE_VAR),
			base: lookup(BASE_URL_VAR),
		}
		.try_into()
	}

	/// Parses a JSON document of the form `{"mode": "hash", "base": "/app/"}`.
	pub fn from_json(text: &str) -> Result<Self, ConfigurationError> {
		let raw: RawRouterConfig =
			serde_json::from_str(text).map_err(|e| ConfigurationError::Invalid(e.to_string()))?;
		raw.try_into()
	}
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRouterConfig {
	#[serde(default)]
	mode: Option<String>,
	#[serde(default, alias = "base_path")]
	base: Option<String>,
}

impl TryFrom<RawRouterConfig> for RouterConfig {
	type Error = ConfigurationError;

	fn try_from(raw: RawRouterConfig) -> Result<Self, Self::Error> {
		let mode = match raw.mode.as_deref().map(str::trim) {
			Some(mode) if !mode.is_empty() => mode.parse()?,
			_ => NavigationMode::default(),
		};
		Self::new(mode, raw.base.as_deref().unwrap_or_default())
	}
}

fn normalize_base(base: &str) -> Result<String, ConfigurationError> {
	let trimmed = base.trim();
	if trimmed.contains(['?', '#']) {
		return Err(ConfigurationError::InvalidBasePath(base.to_string()));
	}

	// Deployments sometimes hand over a full public URL; only its path scopes the router.
	let location = Location::parse(trimmed)
		.map_err(|_| ConfigurationError::InvalidBasePath(base.to_string()))?;
	let pathname = urlencoding::decode(&location.pathname)
		.map_err(|_| ConfigurationError::InvalidBasePath(base.to_string()))?;

	Ok(pathname.trim_end_matches('/').to_string())
}
