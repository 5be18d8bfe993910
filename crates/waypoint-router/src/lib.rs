//! # waypoint-router
//!
//! Client-side router for single-page applications.
//!
//! The router maps URL paths to view references, keeps the selection in sync
//! with the address bar, and tells the host which view to render. Rendering
//! itself belongs to the host.
//!
//! ## Modules
//!
//! - [`config`]: navigation mode and base path, read from the deployment environment
//! - [`route`]: route definitions, the route table and resolution outcomes
//! - [`history`]: the [`History`] backend trait and the in-memory backend
//! - [`location`]: address parsing
//! - [`error`]: error types
//!
//! ## Example
//!
//! ```
//! use waypoint_router::{MemoryHistory, RouteTable, RouterConfig, create_router};
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
//! let router = create_router(RouterConfig::default(), routes, MemoryHistory::new("/")).unwrap();
//!
//! router.on_route_change(|resolution| println!("now at {:?}", resolution.name()));
//! router.navigate_to("Ping").unwrap();
//! assert_eq!(router.current_view(), Some(Page::Ping));
//! ```

pub mod config;
pub mod error;
pub mod history;
pub mod location;
pub mod route;
mod router;

#[cfg(all(target_family = "wasm", target_os = "unknown"))]
mod browser;

pub use config::{NavigationMode, RouterConfig};
pub use error::{ConfigurationError, HistoryError, RouterError};
pub use history::{History, MemoryHistory, NavigationType};
pub use location::Location;
pub use route::{Resolution, RouteDefinition, RouteState, RouteTable};
pub use router::{RenderCallback, RouteChangeHandler, Router, SubscriptionId, create_router};

#[cfg(all(target_family = "wasm", target_os = "unknown"))]
pub use browser::{BrowserHistory, NavigationListener, listen};
