//! Address bar representation.

use std::fmt;
use std::str::FromStr;

use url::Url;

/// The parts of an address the router cares about.
///
/// Follows the browser's `window.location` conventions: `search` keeps its
/// leading `?` and `hash` keeps its leading `#`; both are empty when absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
	/// Path component, always starting with `/`.
	pub pathname: String,
	/// Query string including `?`, or empty.
	pub search: String,
	/// Fragment including `#`, or empty.
	pub hash: String,
}

impl Location {
	/// Parses a relative href (`/app/ping?x=1#top`) or an absolute URL.
	///
	/// Relative hrefs are resolved against the site root, so `ping` reads as
	/// `/ping` and dot segments collapse. Scheme and authority of absolute and
	/// protocol-relative URLs are dropped. The pathname stays percent-encoded,
	/// as `window.location.pathname` reports it.
	pub fn parse(href: &str) -> Result<Self, url::ParseError> {
		let root = Url::parse(ROOT)?;
		let url = Url::options().base_url(Some(&root)).parse(href)?;

		let path = url.path();
		let pathname = if path.starts_with('/') {
			path.to_string()
		} else {
			format!("/{}", path)
		};

		Ok(Self {
			pathname,
			search: prefixed('?', url.query()),
			hash: prefixed('#', url.fragment()),
		})
	}

	/// Reassembles the href.
	pub fn href(&self) -> String {
		format!("{}{}{}", self.pathname, self.search, self.hash)
	}

	/// Returns the fragment without its leading `#`.
	pub fn fragment(&self) -> &str {
		self.hash.strip_prefix('#').unwrap_or(&self.hash)
	}
}

impl FromStr for Location {
	type Err = url::ParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

impl fmt::Display for Location {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}{}{}", self.pathname, self.search, self.hash)
	}
}

// Relative hrefs only need some origin to resolve against; it never leaks out.
const ROOT: &str = "http://localhost/";

// A lone `?` or `#` reads back as empty from `window.location`.
fn prefixed(delimiter: char, part: Option<&str>) -> String {
	match part {
		Some(part) if !part.is_empty() => format!("{}{}", delimiter, part),
		_ => String::new(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("/", "/", "", "")]
	#[case("/ping", "/ping", "", "")]
	#[case("/app/ping?x=1#top", "/app/ping", "?x=1", "#top")]
	#[case("/#/ping", "/", "", "#/ping")]
	#[case("", "/", "", "")]
	#[case("ping", "/ping", "", "")]
	#[case("/ping?#", "/ping", "", "")]
	#[case("https://example.com/app/ping?x=1", "/app/ping", "?x=1", "")]
	#[case("http://localhost:8080", "/", "", "")]
	#[case("/redirect?to=http://x/y", "/redirect", "?to=http://x/y", "")]
	#[case("//cdn.example.com/app/ping", "/app/ping", "", "")]
	#[case("/app/../ping", "/ping", "", "")]
	#[case("./ping?x=1", "/ping", "?x=1", "")]
	#[case("/my app/", "/my%20app/", "", "")]
	fn test_parse(
		#[case] href: &str,
		#[case] pathname: &str,
		#[case] search: &str,
		#[case] hash: &str,
	) {
		let location = Location::parse(href).unwrap();
		assert_eq!(location.pathname, pathname);
		assert_eq!(location.search, search);
		assert_eq!(location.hash, hash);
	}

	#[rstest]
	fn test_href_and_fragment() {
		let location: Location = "/app/?q=budget#/ping".parse().unwrap();
		assert_eq!(location.href(), "/app/?q=budget#/ping");
		assert_eq!(location.to_string(), "/app/?q=budget#/ping");
		assert_eq!(location.fragment(), "/ping");
		assert_eq!(Location::parse("/").unwrap().fragment(), "");
	}

	#[rstest]
	#[case("http://exa mple.com/ping")]
	#[case("http://[::1/ping")]
	#[case("http://localhost:99999/")]
	fn test_parse_rejects_malformed_authority(#[case] href: &str) {
		assert!(Location::parse(href).is_err());
	}
}
