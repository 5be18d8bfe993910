//! Client-side routing
//!
//! This module provides access to waypoint-router: an ordered table of flat,
//! exact-match routes, resolved against the address bar and kept in sync with
//! the browser's history.
//!
//! ## Architecture
//!
//! - **Route table**: named routes, first match wins
//! - **History backends**: the browser History API on wasm, an in-memory stack elsewhere
//! - **Notifications**: a render callback plus ordered route change subscribers
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::rc::Rc;
//! use waypoint::router::{
//!     BrowserHistory, NavigationListener, RouteTable, Router, RouterConfig, RouterError, listen,
//! };
//!
//! pub fn start(
//!     mount: impl Fn(Option<&Page>) + 'static,
//! ) -> Result<(Rc<Router<Page, BrowserHistory>>, NavigationListener), RouterError> {
//!     let routes = RouteTable::new()
//!         .route("Budget", "/", Page::Budget)
//!         .route("Ping", "/ping", Page::Ping);
//!     let config = RouterConfig::from_build_env()?;
//!     let router = Rc::new(Router::new(config, routes, BrowserHistory::new()?)?);
//!     router.set_renderer(mount);
//!     let listener = listen(&router)?;
//!     Ok((router, listener))
//! }
//! ```

pub use waypoint_router::*;
