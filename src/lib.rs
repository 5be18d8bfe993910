//! # Waypoint
//!
//! Client-side navigation for single-page applications.
//!
//! Waypoint maps URL paths to view references, drives view transitions
//! without full page reloads, and integrates with the browser's history. It
//! does not render anything itself: the host supplies a render callback and
//! mounts whatever view reference the router hands over.
//!
//! ## Core Principles
//!
//! - **Explicit ownership**: the router is constructed once at start-up and
//!   passed to the application's entry point; there is no global instance
//! - **Typed views**: routes carry the host's own view type
//! - **Deterministic navigation**: resolution is a synchronous scan of a small,
//!   immutable route table
//!
//! ## Quick Example
//!
//! ```
//! use waypoint::prelude::*;
//!
//! #[derive(Debug, Clone, Copy, PartialEq)]
//! enum Page {
//! 	Budget,
//! 	Ping,
//! }
//!
//! let routes = RouteTable::new()
//! 	.route("Budget", "/", Page::Budget)
//! 	.route("Ping", "/ping", Page::Ping);
//! let config = RouterConfig::history("/").unwrap();
//! let router = create_router(config, routes, MemoryHistory::new("/")).unwrap();
//!
//! router.navigate_to("Ping").unwrap();
//! assert_eq!(router.current_view(), Some(Page::Ping));
//! ```
//!
//! ## Configuration
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `BASE_URL` | Base path the application is served under | `/` |
//! | `ROUTER_MODE` | `history` or `hash` | `history` |

pub mod router;

pub use waypoint_router::{
	ConfigurationError, History, HistoryError, Location, MemoryHistory, NavigationMode,
	Resolution, RouteDefinition, RouteState, RouteTable, Router, RouterConfig, RouterError,
	create_router,
};

#[cfg(all(target_family = "wasm", target_os = "unknown"))]
pub use waypoint_router::{BrowserHistory, NavigationListener, listen};

/// Re-exports for application entry points.
pub mod prelude {
	pub use crate::{
		History, MemoryHistory, NavigationMode, Resolution, RouteState, RouteTable, Router,
		RouterConfig, RouterError, create_router,
	};

	#[cfg(all(target_family = "wasm", target_os = "unknown"))]
	pub use crate::{BrowserHistory, listen};
}
