//! Route definitions and resolution outcomes.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::Rc;

use crate::error::ConfigurationError;

/// A single route: an exact path, a unique name and the view it renders.
///
/// `V` is whatever the host uses to refer to a renderable component: a
/// component factory, an enum of pages, a template id.
#[derive(Clone)]
pub struct RouteDefinition<V> {
	/// The exact path, relative to the base path.
	path: String,
	/// Unique route name used for programmatic navigation.
	name: String,
	/// The view reference handed to the renderer.
	view: V,
}

impl<V> fmt::Debug for RouteDefinition<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RouteDefinition")
			.field("path", &self.path)
			.field("name", &self.name)
			.finish_non_exhaustive()
	}
}

impl<V> RouteDefinition<V> {
	/// Creates a route definition.
	pub fn new(name: impl Into<String>, path: impl Into<String>, view: V) -> Self {
		Self {
			path: path.into(),
			name: name.into(),
			view,
		}
	}

	/// Returns the route name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the route path.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Returns the view reference.
	pub fn view(&self) -> &V {
		&self.view
	}

	/// Checks whether this route matches a base-relative path.
	///
	/// Matching is exact.
	pub fn matches(&self, path: &str) -> bool {
		self.path == path
	}
}

/// Ordered route table. Insertion order is resolution priority.
///
/// # Example
///
/// ```
/// use waypoint_router::RouteTable;
///
/// let routes = RouteTable::new()
/// 	.route("Budget", "/", "budget")
/// 	.route("Ping", "/ping", "ping");
/// assert_eq!(routes.len(), 2);
/// ```
#[derive(Clone)]
pub struct RouteTable<V> {
	routes: Vec<RouteDefinition<V>>,
}

impl<V> fmt::Debug for RouteTable<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.routes.iter()).finish()
	}
}

impl<V> Default for RouteTable<V> {
	fn default() -> Self {
		Self::new()
	}
}

impl<V> RouteTable<V> {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self { routes: Vec::new() }
	}

	/// Appends a route.
	pub fn route(mut self, name: impl Into<String>, path: impl Into<String>, view: V) -> Self {
		self.routes.push(RouteDefinition::new(name, path, view));
		self
	}

	/// Appends an already built definition.
	pub fn push(&mut self, route: RouteDefinition<V>) {
		self.routes.push(route);
	}

	/// Returns the number of routes.
	pub fn len(&self) -> usize {
		self.routes.len()
	}

	/// Returns whether the table is empty.
	pub fn is_empty(&self) -> bool {
		self.routes.is_empty()
	}

	/// Iterates over the routes in priority order.
	pub fn iter(&self) -> impl Iterator<Item = &RouteDefinition<V>> {
		self.routes.iter()
	}

	/// Checks the table invariants and returns the name index.
	pub(crate) fn validate(&self) -> Result<HashMap<String, usize>, ConfigurationError> {
		let mut named_routes = HashMap::with_capacity(self.routes.len());
		let mut paths = HashSet::with_capacity(self.routes.len());

		for (index, route) in self.routes.iter().enumerate() {
			if route.name.is_empty() {
				return Err(ConfigurationError::EmptyName(route.path.clone()));
			}
			if !route.path.starts_with('/') {
				return Err(ConfigurationError::InvalidPath(route.path.clone()));
			}
			if named_routes.insert(route.name.clone(), index).is_some() {
				return Err(ConfigurationError::DuplicateName(route.name.clone()));
			}
			if !paths.insert(route.path.as_str()) {
				return Err(ConfigurationError::DuplicatePath(route.path.clone()));
			}
		}

		Ok(named_routes)
	}

	pub(crate) fn into_shared(self) -> Vec<Rc<RouteDefinition<V>>> {
		self.routes.into_iter().map(Rc::new).collect()
	}
}

impl<V> FromIterator<RouteDefinition<V>> for RouteTable<V> {
	fn from_iter<I: IntoIterator<Item = RouteDefinition<V>>>(iter: I) -> Self {
		Self {
			routes: iter.into_iter().collect(),
		}
	}
}

impl<V> From<Vec<RouteDefinition<V>>> for RouteTable<V> {
	fn from(routes: Vec<RouteDefinition<V>>) -> Self {
		Self { routes }
	}
}

/// Outcome of resolving an address.
///
/// `NotFound` is a valid outcome the host renders as a "no matching view"
/// state, not an error.
pub enum Resolution<V> {
	/// A route matched.
	Matched(Rc<RouteDefinition<V>>),
	/// No route matched the base-relative path.
	NotFound {
		/// The path that failed to match.
		path: String,
	},
}

impl<V> Clone for Resolution<V> {
	fn clone(&self) -> Self {
		match self {
			Self::Matched(route) => Self::Matched(Rc::clone(route)),
			Self::NotFound { path } => Self::NotFound { path: path.clone() },
		}
	}
}

impl<V> fmt::Debug for Resolution<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Matched(route) => f.debug_tuple("Matched").field(route).finish(),
			Self::NotFound { path } => f.debug_struct("NotFound").field("path", path).finish(),
		}
	}
}

// Route names are unique within a router, so the name identifies the route.
impl<V> PartialEq for Resolution<V> {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Matched(a), Self::Matched(b)) => a.name == b.name,
			(Self::NotFound { path: a }, Self::NotFound { path: b }) => a == b,
			_ => false,
		}
	}
}

impl<V> Resolution<V> {
	/// Returns the matched route, if any.
	pub fn route(&self) -> Option<&RouteDefinition<V>> {
		match self {
			Self::Matched(route) => Some(route.as_ref()),
			Self::NotFound { .. } => None,
		}
	}

	/// Returns the matched route name, if any.
	pub fn name(&self) -> Option<&str> {
		self.route().map(RouteDefinition::name)
	}

	/// Returns the matched view, if any.
	pub fn view(&self) -> Option<&V> {
		self.route().map(RouteDefinition::view)
	}

	/// Returns whether no route matched.
	pub fn is_not_found(&self) -> bool {
		matches!(self, Self::NotFound { .. })
	}
}

/// The router's current selection.
pub enum RouteState<V> {
	/// No resolution has succeeded yet.
	Unresolved,
	/// The current address matches a route.
	Resolved(Rc<RouteDefinition<V>>),
	/// The current address matches no route.
	NotFound {
		/// The unmatched path.
		path: String,
	},
}

impl<V> Clone for RouteState<V> {
	fn clone(&self) -> Self {
		match self {
			Self::Unresolved => Self::Unresolved,
			Self::Resolved(route) => Self::Resolved(Rc::clone(route)),
			Self::NotFound { path } => Self::NotFound { path: path.clone() },
		}
	}
}

impl<V> fmt::Debug for RouteState<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Unresolved => f.write_str("Unresolved"),
			Self::Resolved(route) => f.debug_tuple("Resolved").field(route).finish(),
			Self::NotFound { path } => f.debug_struct("NotFound").field("path", path).finish(),
		}
	}
}

impl<V> RouteState<V> {
	/// Returns the resolved route, if any.
	pub fn route(&self) -> Option<&RouteDefinition<V>> {
		match self {
			Self::Resolved(route) => Some(route.as_ref()),
			_ => None,
		}
	}

	/// Returns the resolved route name, if any.
	pub fn name(&self) -> Option<&str> {
		self.route().map(RouteDefinition::name)
	}

	/// Returns whether the state is `Unresolved`.
	pub fn is_unresolved(&self) -> bool {
		matches!(self, Self::Unresolved)
	}

	/// Returns whether the state is `NotFound`.
	pub fn is_not_found(&self) -> bool {
		matches!(self, Self::NotFound { .. })
	}

	/// Checks whether this state already reflects `resolution`.
	pub(crate) fn reflects(&self, resolution: &Resolution<V>) -> bool {
		match (self, resolution) {
			(Self::Resolved(current), Resolution::Matched(next)) => current.name == next.name,
			(Self::NotFound { path: current }, Resolution::NotFound { path: next }) => {
				current == next
			}
			_ => false,
		}
	}
}

impl<V> From<Resolution<V>> for RouteState<V> {
	fn from(resolution: Resolution<V>) -> Self {
		match resolution {
			Resolution::Matched(route) => Self::Resolved(route),
			Resolution::NotFound { path } => Self::NotFound { path },
		}
	}
}
