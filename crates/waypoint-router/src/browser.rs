//! Browser History API backend (wasm32-unknown-unknown only).
//!
//! [`BrowserHistory`] reads `window.location` and writes through
//! `history.pushState` / `history.replaceState`. Neither call fires
//! `popstate`, so the router is not re-entered by its own navigations;
//! [`listen`] forwards the events the user triggers (back/forward, manual
//! hash edits) to [`Router::sync`].
//!
//! ```ignore
//! use std::rc::Rc;
//! use waypoint_router::{BrowserHistory, RouteTable, Router, RouterConfig, listen};
//!
//! let config = RouterConfig::from_build_env()?;
//! let router = Rc::new(Router::new(config, routes, BrowserHistory::new()?)?);
//! let _listener = listen(&router)?;
//! ```

use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use crate::config::NavigationMode;
use crate::error::{HistoryError, RouterError};
use crate::history::History;
use crate::location::Location;
use crate::router::Router;

/// History backend over `window.location` and `window.history`.
#[derive(Debug, Clone)]
pub struct BrowserHistory {
	window: web_sys::Window,
}

impl BrowserHistory {
	/// Binds to the global `window`.
	pub fn new() -> Result<Self, HistoryError> {
		let window = web_sys::window()
			.ok_or_else(|| HistoryError::Unavailable("window is not available".to_string()))?;
		Ok(Self { window })
	}

	fn history(&self) -> Result<web_sys::History, HistoryError> {
		self.window
			.history()
			.map_err(|e| HistoryError::Unavailable(describe(&e)))
	}
}

impl History for BrowserHistory {
	fn location(&self) -> Result<Location, HistoryError> {
		let location = self.window.location();
		let read = |value: Result<String, JsValue>| {
			value.map_err(|e| HistoryError::Unavailable(describe(&e)))
		};

		Ok(Location {
			pathname: read(location.pathname())?,
			search: read(location.search())?,
			hash: read(location.hash())?,
		})
	}

	fn push(&self, url: &str) -> Result<(), HistoryError> {
		self.history()?
			.push_state_with_url(&JsValue::NULL, "", Some(url))
			.map_err(|e| HistoryError::Rejected(describe(&e)))
	}

	fn replace(&self, url: &str) -> Result<(), HistoryError> {
		self.history()?
			.replace_state_with_url(&JsValue::NULL, "", Some(url))
			.map_err(|e| HistoryError::Rejected(describe(&e)))
	}
}

/// Registered browser navigation listeners. Dropping it unregisters them.
pub struct NavigationListener {
	window: web_sys::Window,
	events: &'static [&'static str],
	callback: Closure<dyn FnMut(web_sys::Event)>,
}

impl std::fmt::Debug for NavigationListener {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("NavigationListener")
			.field("events", &self.events)
			.finish()
	}
}

impl Drop for NavigationListener {
	fn drop(&mut self) {
		for event in self.events {
			let _ = self
				.window
				.remove_event_listener_with_callback(event, self.callback.as_ref().unchecked_ref());
		}
	}
}

/// Forwards browser navigation events to `router`.
///
/// Listens to `popstate`, plus `hashchange` in hash mode. The listener only
/// holds a weak reference, so it does not keep the router alive.
pub fn listen<V: 'static>(
	router: &Rc<Router<V, BrowserHistory>>,
) -> Result<NavigationListener, RouterError> {
	let events: &'static [&'static str] = match router.config().mode() {
		NavigationMode::History => &["popstate"],
		NavigationMode::Hash => &["popstate", "hashchange"],
	};

	let weak = Rc::downgrade(router);
	let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
		let Some(router) = weak.upgrade() else {
			return;
		};
		tracing::debug!(event = %event.type_(), "browser navigation event");
		if let Err(error) = router.sync() {
			tracing::error!(%error, "failed to sync route after browser navigation");
		}
	});

	// Built before registering so a failed registration unwinds the earlier ones on drop.
	let listener = NavigationListener {
		window: router.history().window.clone(),
		events,
		callback,
	};
	for event in listener.events {
		listener
			.window
			.add_event_listener_with_callback(event, listener.callback.as_ref().unchecked_ref())
			.map_err(|e| HistoryError::Unavailable(describe(&e)))?;
	}

	Ok(listener)
}

fn describe(value: &JsValue) -> String {
	value
		.as_string()
		.unwrap_or_else(|| format!("{:?}", value))
}
