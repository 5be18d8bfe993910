//! Core Router Implementation.
//!
//! This module provides the main Router struct and routing logic.

use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::rc::Rc;

use tracing::{debug, error, info, warn};

use crate::config::{NavigationMode, RouterConfig};
use crate::error::RouterError;
use crate::history::{History, NavigationType};
use crate::location::Location;
use crate::route::{Resolution, RouteDefinition, RouteState, RouteTable};

/// Type alias for route change subscribers.
pub type RouteChangeHandler<V> = Rc<dyn Fn(&Resolution<V>)>;

/// Type alias for the render callback. Receives `None` for the not-found state.
pub type RenderCallback<V> = Rc<dyn Fn(Option<&V>)>;

/// Handle returned by [`Router::on_route_change`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

enum PendingNavigation<V> {
	/// Write `url`, then select `resolution`.
	Target {
		resolution: Resolution<V>,
		url: String,
		nav_type: NavigationType,
	},
	/// Re-read the address from the history backend.
	Sync,
}

/// Creates a router. See [`Router::new`].
pub fn create_router<V, H: History>(
	config: RouterConfig,
	routes: RouteTable<V>,
	history: H,
) -> Result<Router<V, H>, RouterError> {
	Router::new(config, routes, history)
}

/// The main router.
///
/// Owns the route table, reads and writes the address through a [`History`]
/// backend, and tells the host which view to render. All operations take
/// `&self`; share the router as `Rc<Router<..>>` between the application and
/// the browser listener.
///
/// # Example
///
/// ```
/// use waypoint_router::{MemoryHistory, RouteTable, Router, RouterConfig};
///
/// let routes = RouteTable::new()
/// 	.route("Budget", "/", "budget")
/// 	.route("Ping", "/ping", "ping");
/// let router = Router::new(RouterConfig::default(), routes, MemoryHistory::new("/")).unwrap();
///
/// router.navigate_to("Ping").unwrap();
/// assert_eq!(router.current().name(), Some("Ping"));
/// ```
pub struct Router<V, H> {
	/// Navigation mode and base path.
	config: RouterConfig,
	/// Registered routes, in priority order.
	routes: Vec<Rc<RouteDefinition<V>>>,
	/// Named routes for lookups.
	named_routes: HashMap<String, usize>,
	/// Address bar backend.
	history: H,
	/// Current selection.
	state: RefCell<RouteState<V>>,
	/// Route change subscribers, in registration order.
	subscribers: RefCell<Vec<(SubscriptionId, RouteChangeHandler<V>)>>,
	next_subscription: Cell<u64>,
	/// Render target.
	renderer: RefCell<Option<RenderCallback<V>>>,
	/// Set while a navigation is being applied and delivered.
	dispatching: Cell<bool>,
	/// Navigations requested while `dispatching` was set.
	pending: RefCell<VecDeque<PendingNavigation<V>>>,
}

impl<V, H> fmt::Debug for Router<V, H> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Router")
			.field("config", &self.config)
			.field("routes_count", &self.routes.len())
			.field(
				"named_routes",
				&self.named_routes.keys().collect::<Vec<_>>(),
			)
			.field("state", &*self.state.borrow())
			.field("subscribers", &self.subscribers.borrow().len())
			.finish()
	}
}

impl<V, H: History> Router<V, H> {
	/// Creates a router and resolves the current address.
	///
	/// Fails with [`RouterError::Configuration`] when the route table breaks
	/// an invariant (duplicate or empty name, duplicate path, path without a
	/// leading `/`). If the history backend cannot be read, the router is
	/// returned in the `Unresolved` state and the next [`sync`](Self::sync)
	/// retries.
	pub fn new(
		config: RouterConfig,
		routes: RouteTable<V>,
		history: H,
	) -> Result<Self, RouterError> {
		let named_routes = routes.validate()?;

		let router = Self {
			config,
			routes: routes.into_shared(),
			named_routes,
			history,
			state: RefCell::new(RouteState::Unresolved),
			subscribers: RefCell::new(Vec::new()),
			next_subscription: Cell::new(0),
			renderer: RefCell::new(None),
			dispatching: Cell::new(false),
			pending: RefCell::new(VecDeque::new()),
		};

		debug!(
			routes = router.routes.len(),
			mode = %router.config.mode(),
			base = router.config.base_path(),
			"router created"
		);

		if let Err(error) = router.sync() {
			warn!(%error, "initial route resolution failed; router stays unresolved");
		}

		Ok(router)
	}

	/// Returns the configuration.
	pub fn config(&self) -> &RouterConfig {
		&self.config
	}

	/// Returns the history backend.
	pub fn history(&self) -> &H {
		&self.history
	}

	/// Returns the current state.
	pub fn current(&self) -> RouteState<V> {
		self.state.borrow().clone()
	}

	/// Returns the current route, if the state is `Resolved`.
	pub fn current_route(&self) -> Option<Rc<RouteDefinition<V>>> {
		match &*self.state.borrow() {
			RouteState::Resolved(route) => Some(Rc::clone(route)),
			_ => None,
		}
	}

	/// Looks up a route by name.
	pub fn route(&self, name: &str) -> Option<&RouteDefinition<V>> {
		self.named_routes
			.get(name)
			.and_then(|&index| self.routes.get(index))
			.map(|route| route.as_ref())
	}

	/// Iterates over the routes in priority order.
	pub fn routes(&self) -> impl Iterator<Item = &RouteDefinition<V>> {
		self.routes.iter().map(|route| route.as_ref())
	}

	/// Returns the number of registered routes.
	pub fn route_count(&self) -> usize {
		self.routes.len()
	}

	/// Checks if a route name exists.
	pub fn has_route(&self, name: &str) -> bool {
		self.named_routes.contains_key(name)
	}

	/// Matches a base-relative path against the route table.
	///
	/// The first route in insertion order whose path equals `path` wins.
	pub fn resolve_path(&self, path: &str) -> Resolution<V> {
		match self.routes.iter().find(|route| route.matches(path)) {
			Some(route) => Resolution::Matched(Rc::clone(route)),
			None => Resolution::NotFound {
				path: path.to_string(),
			},
		}
	}

	/// Resolves an address.
	///
	/// Fails with [`RouterError::OutOfScope`] when the address pathname lies
	/// outside the base path.
	pub fn resolve(&self, location: &Location) -> Result<Resolution<V>, RouterError> {
		let path = self.route_path(location)?;
		let resolution = self.resolve_path(&path);
		debug!(address = %location, path = %path, route = ?resolution.name(), "resolved address");
		Ok(resolution)
	}

	/// Resolves an href. See [`resolve`](Self::resolve).
	///
	/// Fails with [`RouterError::InvalidAddress`] when `href` cannot be parsed.
	pub fn resolve_href(&self, href: &str) -> Result<Resolution<V>, RouterError> {
		let location =
			Location::parse(href).map_err(|error| RouterError::invalid_address(href, error))?;
		self.resolve(&location)
	}

	/// Returns the address [`navigate_to`](Self::navigate_to) writes for `name`.
	pub fn href(&self, name: &str) -> Result<String, RouterError> {
		let route = self
			.route(name)
			.ok_or_else(|| RouterError::UnknownRoute(name.to_string()))?;
		Ok(self.href_for_path(route.path()))
	}

	/// Navigates to a named route, adding a history entry.
	///
	/// Fails with [`RouterError::UnknownRoute`] if no route has that name; the
	/// current state is left unchanged. Navigating to the route that is
	/// already current does nothing.
	pub fn navigate_to(&self, name: &str) -> Result<(), RouterError> {
		self.navigate_named(name, NavigationType::Push)
	}

	/// Navigates to a named route, replacing the current history entry.
	pub fn replace_to(&self, name: &str) -> Result<(), RouterError> {
		self.navigate_named(name, NavigationType::Replace)
	}

	/// Navigates to a base-relative path, adding a history entry.
	///
	/// `path` is read the way an address is: it is percent-decoded, and any
	/// query or fragment is dropped. The outcome may be the not-found state.
	pub fn push_path(&self, path: &str) -> Result<(), RouterError> {
		self.navigate_path(path, NavigationType::Push)
	}

	/// Navigates to a base-relative path, replacing the current history entry.
	pub fn replace_path(&self, path: &str) -> Result<(), RouterError> {
		self.navigate_path(path, NavigationType::Replace)
	}

	/// Re-reads the address after an external navigation (back/forward,
	/// manual hash edit) and updates the selection.
	///
	/// An address outside the base path selects the not-found state.
	pub fn sync(&self) -> Result<(), RouterError> {
		self.dispatch(PendingNavigation::Sync)
	}

	/// Subscribes to route changes.
	///
	/// Handlers run synchronously, in registration order, each time the
	/// selection changes.
	pub fn on_route_change<F>(&self, handler: F) -> SubscriptionId
	where
		F: Fn(&Resolution<V>) + 'static,
	{
		let id = SubscriptionId(self.next_subscription.get());
		self.next_subscription.set(id.0 + 1);
		self.subscribers.borrow_mut().push((id, Rc::new(handler)));
		id
	}

	/// Removes a subscriber. Returns `false` if it was already gone.
	pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
		let mut subscribers = self.subscribers.borrow_mut();
		let before = subscribers.len();
		subscribers.retain(|(subscription, _)| *subscription != id);
		subscribers.len() != before
	}

	/// Returns the number of subscribers.
	pub fn subscriber_count(&self) -> usize {
		self.subscribers.borrow().len()
	}

	/// Installs the render callback and renders the current state.
	///
	/// The callback runs before subscribers on every change.
	pub fn set_renderer<F>(&self, render: F)
	where
		F: Fn(Option<&V>) + 'static,
	{
		let render: RenderCallback<V> = Rc::new(render);
		*self.renderer.borrow_mut() = Some(Rc::clone(&render));

		let state = self.current();
		match &state {
			RouteState::Unresolved => {}
			RouteState::Resolved(route) => render(Some(route.view())),
			RouteState::NotFound { .. } => render(None),
		}
	}

	fn navigate_named(&self, name: &str, nav_type: NavigationType) -> Result<(), RouterError> {
		let route = self
			.named_routes
			.get(name)
			.and_then(|&index| self.routes.get(index))
			.ok_or_else(|| RouterError::UnknownRoute(name.to_string()))?;

		self.dispatch(PendingNavigation::Target {
			url: self.href_for_path(route.path()),
			resolution: Resolution::Matched(Rc::clone(route)),
			nav_type,
		})
	}

	fn navigate_path(&self, path: &str, nav_type: NavigationType) -> Result<(), RouterError> {
		let location =
			Location::parse(path).map_err(|error| RouterError::invalid_address(path, error))?;
		let resolution = self.resolve_path(&decode(&location.pathname));
		let url = match &resolution {
			Resolution::Matched(route) => self.href_for_path(route.path()),
			Resolution::NotFound { .. } => self.href_for_path(&location.pathname),
		};

		self.dispatch(PendingNavigation::Target {
			resolution,
			url,
			nav_type,
		})
	}

	/// Runs `navigation` unless another one is in flight, in which case it
	/// is queued behind it.
	fn dispatch(&self, navigation: PendingNavigation<V>) -> Result<(), RouterError> {
		if self.dispatching.get() {
			debug!("navigation requested during route change delivery; queued");
			self.pending.borrow_mut().push_back(navigation);
			return Ok(());
		}

		let _guard = DispatchGuard::enter(&self.dispatching);
		let result = self.apply(navigation);

		loop {
			let next = self.pending.borrow_mut().pop_front();
			let Some(next) = next else {
				break;
			};
			if let Err(error) = self.apply(next) {
				error!(%error, "queued navigation failed");
			}
		}

		result
	}

	fn apply(&self, navigation: PendingNavigation<V>) -> Result<(), RouterError> {
		match navigation {
			PendingNavigation::Target {
				resolution,
				url,
				nav_type,
			} => {
				let unchanged = self.state.borrow().reflects(&resolution);
				if unchanged {
					debug!(route = ?resolution.name(), "already at navigation target");
					return Ok(());
				}

				self.history.navigate(&url, nav_type)?;
				self.transition(resolution);
				Ok(())
			}
			PendingNavigation::Sync => {
				let location = self.history.location()?;
				let resolution = match self.resolve(&location) {
					Ok(resolution) => resolution,
					Err(RouterError::OutOfScope { path, base }) => {
						warn!(path = %path, base = %base, "address outside base path");
						Resolution::NotFound { path }
					}
					Err(error) => return Err(error),
				};
				self.transition(resolution);
				Ok(())
			}
		}
	}

	/// Selects `resolution`, then renders and notifies subscribers.
	fn transition(&self, resolution: Resolution<V>) {
		let previous = {
			let mut state = self.state.borrow_mut();
			if state.reflects(&resolution) {
				return;
			}
			std::mem::replace(&mut *state, RouteState::from(resolution.clone()))
		};

		info!(from = ?previous, to = ?resolution, "route changed");

		let renderer = self.renderer.borrow().clone();
		if let Some(render) = renderer {
			render(resolution.view());
		}

		// Snapshot so handlers may subscribe or unsubscribe while being called.
		let handlers: Vec<RouteChangeHandler<V>> = self
			.subscribers
			.borrow()
			.iter()
			.map(|(_, handler)| Rc::clone(handler))
			.collect();
		for handler in handlers {
			handler(&resolution);
		}
	}

	/// Extracts the base-relative route path from an address.
	fn route_path(&self, location: &Location) -> Result<String, RouterError> {
		let pathname = decode(&location.pathname);
		let base = self.config.base_path();
		let scoped = strip_base(&pathname, base).ok_or_else(|| RouterError::OutOfScope {
			path: location.pathname.clone(),
			base: base.to_string(),
		})?;

		let path = match self.config.mode() {
			NavigationMode::History => scoped.to_string(),
			NavigationMode::Hash => {
				let fragment = location.fragment();
				let fragment = fragment.split_once('?').map_or(fragment, |(path, _)| path);
				decode(fragment).into_owned()
			}
		};

		Ok(if path.starts_with('/') {
			path
		} else {
			format!("/{}", path)
		})
	}

	fn href_for_path(&self, path: &str) -> String {
		let base = self.config.base_path();
		match self.config.mode() {
			NavigationMode::History => format!("{}{}", base, path),
			NavigationMode::Hash => format!("{}/#{}", base, path),
		}
	}
}

impl<V: Clone, H: History> Router<V, H> {
	/// Returns the view of the current route, if the state is `Resolved`.
	pub fn current_view(&self) -> Option<V> {
		self.state.borrow().route().map(|route| route.view().clone())
	}
}

struct DispatchGuard<'a>(&'a Cell<bool>);

impl<'a> DispatchGuard<'a> {
	fn enter(flag: &'a Cell<bool>) -> Self {
		flag.set(true);
		Self(flag)
	}
}

impl Drop for DispatchGuard<'_> {
	fn drop(&mut self) {
		self.0.set(false);
	}
}

fn decode(raw: &str) -> Cow<'_, str> {
	urlencoding::decode(raw).unwrap_or(Cow::Borrowed(raw))
}

/// Strips `base` from `path` at a segment boundary, ignoring ASCII case.
fn strip_base<'a>(path: &'a str, base: &str) -> Option<&'a str> {
	if base.is_empty() {
		return Some(path);
	}

	let head = path.get(..base.len())?;
	if !head.eq_ignore_ascii_case(base) {
		return None;
	}

	let rest = &path[base.len()..];
	(rest.is_empty() || rest.starts_with('/')).then_some(rest)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::history::MemoryHistory;
	use rstest::{fixture, rstest};

	#[derive(Debug, Clone, Copy, PartialEq, Eq)]
	enum Page {
		Budget,
		Ping,
	}

	#[fixture]
	fn routes() -> RouteTable<Page> {
		RouteTable::new()
			.route("Budget", "/", Page::Budget)
			.route("Ping", "/ping", Page::Ping)
	}

	fn router_at(
		config: RouterConfig,
		routes: RouteTable<Page>,
		href: &str,
	) -> Router<Page, MemoryHistory> {
		Router::new(config, routes, MemoryHistory::new(href)).unwrap()
	}

	#[rstest]
	fn test_router_new_resolves_initial_address(routes: RouteTable<Page>) {
		let router = router_at(RouterConfig::default(), routes, "/ping");

		assert_eq!(router.route_count(), 2);
		assert_eq!(router.current().name(), Some("Ping"));
		assert_eq!(router.current_view(), Some(Page::Ping));
	}

	#[rstest]
	fn test_router_named_route(routes: RouteTable<Page>) {
		let router = router_at(RouterConfig::default(), routes, "/");

		assert!(router.has_route("Budget"));
		assert!(router.has_route("Ping"));
		assert!(!router.has_route("nonexistent"));
		assert_eq!(router.route("Ping").map(RouteDefinition::path), Some("/ping"));
		assert_eq!(
			router.routes().map(RouteDefinition::name).collect::<Vec<_>>(),
			vec!["Budget", "Ping"]
		);
	}

	#[rstest]
	fn test_router_duplicate_name(routes: RouteTable<Page>) {
		let routes = routes.route("Budget", "/budget", Page::Budget);
		let result = Router::new(RouterConfig::default(), routes, MemoryHistory::default());

		assert!(matches!(
			result,
			Err(RouterError::Configuration(
				crate::error::ConfigurationError::DuplicateName(name)
			)) if name == "Budget"
		));
	}

	#[rstest]
	#[case("/", Some("Budget"))]
	#[case("/ping", Some("Ping"))]
	#[case("/missing", None)]
	#[case("/ping/", None)]
	#[case("/ping?verbose=1", Some("Ping"))]
	#[case("/p%69ng", Some("Ping"))]
	#[case("/missing/../ping", Some("Ping"))]
	#[case("//cdn.example.com/ping", Some("Ping"))]
	#[case("https://example.com/ping#top", Some("Ping"))]
	fn test_router_match_exact(
		routes: RouteTable<Page>,
		#[case] href: &str,
		#[case] expected: Option<&str>,
	) {
		let router = router_at(RouterConfig::default(), routes, "/");
		let resolution = router.resolve_href(href).unwrap();
		assert_eq!(resolution.name(), expected);
	}

	#[rstest]
	fn test_resolve_path_not_found_keeps_path(routes: RouteTable<Page>) {
		let router = router_at(RouterConfig::default(), routes, "/");
		let resolution = router.resolve_path("/missing");
		assert_eq!(
			resolution,
			Resolution::NotFound {
				path: "/missing".to_string()
			}
		);
	}

	#[rstest]
	#[case("/app", Some("Budget"))]
	#[case("/app/", Some("Budget"))]
	#[case("/APP/ping", Some("Ping"))]
	#[case("/app/missing", None)]
	fn test_resolve_strips_base(
		routes: RouteTable<Page>,
		#[case] href: &str,
		#[case] expected: Option<&str>,
	) {
		let router = router_at(RouterConfig::history("/app/").unwrap(), routes, "/app/");
		assert_eq!(router.resolve_href(href).unwrap().name(), expected);
	}

	#[rstest]
	#[case("/")]
	#[case("/application")]
	#[case("/other/ping")]
	fn test_resolve_out_of_scope(routes: RouteTable<Page>, #[case] href: &str) {
		let router = router_at(RouterConfig::history("/app").unwrap(), routes, "/app");
		assert_eq!(
			router.resolve_href(href),
			Err(RouterError::OutOfScope {
				path: href.to_string(),
				base: "/app".to_string(),
			})
		);
	}

	#[rstest]
	fn test_out_of_scope_start_is_not_found(routes: RouteTable<Page>) {
		let router = router_at(RouterConfig::history("/app").unwrap(), routes, "/elsewhere");
		assert!(router.current().is_not_found());
	}

	#[rstest]
	#[case("/", Some("Budget"))]
	#[case("/#/", Some("Budget"))]
	#[case("/#/ping", Some("Ping"))]
	#[case("/#ping", Some("Ping"))]
	#[case("/#/ping?tab=1", Some("Ping"))]
	#[case("/#/missing", None)]
	fn test_resolve_hash_mode(
		routes: RouteTable<Page>,
		#[case] href: &str,
		#[case] expected: Option<&str>,
	) {
		let router = router_at(RouterConfig::hash("").unwrap(), routes, "/");
		assert_eq!(router.resolve_href(href).unwrap().name(), expected);
	}

	#[rstest]
	#[case(RouterConfig::history("").unwrap(), "/", "/ping")]
	#[case(RouterConfig::history("/app/").unwrap(), "/app/", "/app/ping")]
	#[case(RouterConfig::hash("").unwrap(), "/#/", "/#/ping")]
	#[case(RouterConfig::hash("/app").unwrap(), "/app/#/", "/app/#/ping")]
	fn test_router_href(
		routes: RouteTable<Page>,
		#[case] config: RouterConfig,
		#[case] budget: &str,
		#[case] ping: &str,
	) {
		let router = router_at(config, routes, "/");
		assert_eq!(router.href("Budget").unwrap(), budget);
		assert_eq!(router.href("Ping").unwrap(), ping);
		assert_eq!(
			router.href("nonexistent"),
			Err(RouterError::UnknownRoute("nonexistent".to_string()))
		);
	}

	#[rstest]
	fn test_router_push(routes: RouteTable<Page>) {
		let history = MemoryHistory::new("/");
		let router = Router::new(RouterConfig::default(), routes, history.clone()).unwrap();

		router.navigate_to("Ping").unwrap();

		assert_eq!(router.current().name(), Some("Ping"));
		assert_eq!(history.entries(), vec!["/", "/ping"]);
	}

	#[rstest]
	fn test_router_replace(routes: RouteTable<Page>) {
		let history = MemoryHistory::new("/");
		let router = Router::new(RouterConfig::default(), routes, history.clone()).unwrap();

		router.replace_to("Ping").unwrap();

		assert_eq!(router.current().name(), Some("Ping"));
		assert_eq!(history.entries(), vec!["/ping"]);
	}

	#[rstest]
	fn test_push_path_not_found(routes: RouteTable<Page>) {
		let history = MemoryHistory::new("/");
		let router = Router::new(RouterConfig::default(), routes, history.clone()).unwrap();

		router.push_path("missing").unwrap();

		assert!(matches!(
			router.current(),
			RouteState::NotFound { path } if path == "/missing"
		));
		assert_eq!(history.location().unwrap().pathname, "/missing");

		router.replace_path("/ping").unwrap();
		assert_eq!(router.current().name(), Some("Ping"));
		assert_eq!(history.entries(), vec!["/", "/ping"]);
	}

	#[rstest]
	#[case("/ping?tab=1", "/ping")]
	#[case("/p%69ng", "/ping")]
	#[case("ping#details", "/ping")]
	#[case("/missing?from=menu", "/missing")]
	#[case("/budget%20report", "/budget%20report")]
	fn test_push_path_matches_written_address(
		routes: RouteTable<Page>,
		#[case] path: &str,
		#[case] written: &str,
	) {
		let history = MemoryHistory::new("/");
		let router = Router::new(RouterConfig::default(), routes, history.clone()).unwrap();
		let notified = Rc::new(Cell::new(0));
		let counter = Rc::clone(&notified);
		router.on_route_change(move |_| counter.set(counter.get() + 1));

		router.push_path(path).unwrap();
		assert_eq!(history.location().unwrap().href(), written);
		assert_eq!(notified.get(), 1);

		let from_address = router.resolve(&history.location().unwrap()).unwrap();
		assert!(router.current().reflects(&from_address));

		router.sync().unwrap();
		assert_eq!(notified.get(), 1);
	}

	#[rstest]
	fn test_invalid_address_rejected(routes: RouteTable<Page>) {
		let history = MemoryHistory::new("/");
		let router = Router::new(RouterConfig::default(), routes, history.clone()).unwrap();

		assert!(matches!(
			router.push_path("http://[::1/ping"),
			Err(RouterError::InvalidAddress { .. })
		));
		assert!(matches!(
			router.resolve_href("http://exa mple.com/"),
			Err(RouterError::InvalidAddress { href, .. }) if href == "http://exa mple.com/"
		));
		assert_eq!(router.current().name(), Some("Budget"));
		assert_eq!(history.len(), 1);
	}

	#[rstest]
	fn test_navigate_to_current_route_is_noop(routes: RouteTable<Page>) {
		let history = MemoryHistory::new("/");
		let router = Router::new(RouterConfig::default(), routes, history.clone()).unwrap();
		let calls = Rc::new(Cell::new(0));
		let counter = Rc::clone(&calls);
		router.on_route_change(move |_| counter.set(counter.get() + 1));

		router.navigate_to("Budget").unwrap();

		assert_eq!(calls.get(), 0);
		assert_eq!(history.len(), 1);
	}

	#[rstest]
	fn test_unknown_route_leaves_state(routes: RouteTable<Page>) {
		let history = MemoryHistory::new("/ping");
		let router = Router::new(RouterConfig::default(), routes, history.clone()).unwrap();

		let result = router.navigate_to("DoesNotExist");

		assert_eq!(
			result,
			Err(RouterError::UnknownRoute("DoesNotExist".to_string()))
		);
		assert_eq!(router.current().name(), Some("Ping"));
		assert_eq!(history.len(), 1);
	}

	#[rstest]
	fn test_renderer_receives_views(routes: RouteTable<Page>) {
		let router = router_at(RouterConfig::default(), routes, "/");
		let rendered: Rc<RefCell<Vec<Option<Page>>>> = Rc::new(RefCell::new(Vec::new()));
		let sink = Rc::clone(&rendered);
		router.set_renderer(move |view| sink.borrow_mut().push(view.copied()));

		router.navigate_to("Ping").unwrap();
		router.push_path("/missing").unwrap();

		assert_eq!(
			*rendered.borrow(),
			vec![Some(Page::Budget), Some(Page::Ping), None]
		);
	}

	#[rstest]
	fn test_renderer_runs_before_subscribers(routes: RouteTable<Page>) {
		let router = router_at(RouterConfig::default(), routes, "/");
		let order = Rc::new(RefCell::new(Vec::new()));

		let log = Rc::clone(&order);
		router.on_route_change(move |_| log.borrow_mut().push("subscriber"));
		let log = Rc::clone(&order);
		router.set_renderer(move |_| log.borrow_mut().push("render"));
		order.borrow_mut().clear();

		router.navigate_to("Ping").unwrap();

		assert_eq!(*order.borrow(), vec!["render", "subscriber"]);
	}

	#[rstest]
	fn test_unsubscribe(routes: RouteTable<Page>) {
		let router = router_at(RouterConfig::default(), routes, "/");
		let calls = Rc::new(Cell::new(0));
		let counter = Rc::clone(&calls);
		let id = router.on_route_change(move |_| counter.set(counter.get() + 1));

		assert_eq!(router.subscriber_count(), 1);
		assert!(router.unsubscribe(id));
		assert!(!router.unsubscribe(id));

		router.navigate_to("Ping").unwrap();
		assert_eq!(calls.get(), 0);
	}

	#[rstest]
	fn test_strip_base() {
		assert_eq!(strip_base("/ping", ""), Some("/ping"));
		assert_eq!(strip_base("/app", "/app"), Some(""));
		assert_eq!(strip_base("/app/ping", "/app"), Some("/ping"));
		assert_eq!(strip_base("/App/ping", "/app"), Some("/ping"));
		assert_eq!(strip_base("/apple", "/app"), None);
		assert_eq!(strip_base("/ap", "/app"), None);
	}

	#[rstest]
	fn test_router_debug(routes: RouteTable<Page>) {
		let router = router_at(RouterConfig::default(), routes, "/");
		let debug = format!("{:?}", router);
		assert!(debug.contains("routes_count: 2"));
		assert!(debug.contains("Budget"));
	}
}
