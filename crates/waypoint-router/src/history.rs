//! History backends.
//!
//! The router reads and writes the address through the [`History`] trait.
//! [`MemoryHistory`] keeps the entry stack in memory and is what tests and
//! non-browser hosts use; the browser backend lives in `browser` and is only
//! compiled for `wasm32-unknown-unknown`.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::warn;

use crate::error::HistoryError;
use crate::location::Location;

/// Navigation type for history updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationType {
	/// Adds a new history entry.
	Push,
	/// Overwrites the current history entry.
	Replace,
}

/// Access to the address bar and its history stack.
pub trait History {
	/// Returns the current address.
	fn location(&self) -> Result<Location, HistoryError>;

	/// Adds a history entry for `url` and makes it current.
	fn push(&self, url: &str) -> Result<(), HistoryError>;

	/// Replaces the current history entry with `url`.
	fn replace(&self, url: &str) -> Result<(), HistoryError>;

	/// Writes `url` with the given navigation type.
	fn navigate(&self, url: &str, nav_type: NavigationType) -> Result<(), HistoryError> {
		match nav_type {
			NavigationType::Push => self.push(url),
			NavigationType::Replace => self.replace(url),
		}
	}
}

impl<H: History + ?Sized> History for Rc<H> {
	fn location(&self) -> Result<Location, HistoryError> {
		(**self).location()
	}

	fn push(&self, url: &str) -> Result<(), HistoryError> {
		(**self).push(url)
	}

	fn replace(&self, url: &str) -> Result<(), HistoryError> {
		(**self).replace(url)
	}
}

#[derive(Debug)]
struct MemoryStack {
	entries: Vec<Location>,
	index: usize,
}

/// In-memory history stack.
///
/// Clones share the same stack, so a host can keep a handle for
/// back/forward while the router owns another. Moving through the stack does
/// not notify anyone; call [`Router::sync`](crate::Router::sync) afterwards,
/// the way a browser `popstate` listener would.
///
/// # Example
///
/// ```
/// use waypoint_router::{History, MemoryHistory};
///
/// let history = MemoryHistory::new("/");
/// history.push("/ping").unwrap();
/// assert!(history.back());
/// assert_eq!(history.location().unwrap().pathname, "/");
/// ```
#[derive(Debug, Clone)]
pub struct MemoryHistory {
	stack: Rc<RefCell<MemoryStack>>,
}

impl Default for MemoryHistory {
	fn default() -> Self {
		Self::new("/")
	}
}

impl MemoryHistory {
	/// Creates a stack with a single entry for `initial`.
	///
	/// An unparseable `initial` address starts the stack at `/`.
	pub fn new(initial: &str) -> Self {
		let location = Location::parse(initial).unwrap_or_else(|error| {
			warn!(address = initial, %error, "invalid initial address; starting at /");
			Location {
				pathname: "/".to_string(),
				..Location::default()
			}
		});
		Self {
			stack: Rc::new(RefCell::new(MemoryStack {
				entries: vec![location],
				index: 0,
			})),
		}
	}

	/// Moves `delta` entries through the stack. Returns `false` and stays put
	/// when the target is out of range.
	pub fn go(&self, delta: isize) -> bool {
		let mut stack = self.stack.borrow_mut();
		match stack.index.checked_add_signed(delta) {
			Some(target) if target < stack.entries.len() => {
				stack.index = target;
				true
			}
			_ => false,
		}
	}

	/// Equivalent to `go(-1)`.
	pub fn back(&self) -> bool {
		self.go(-1)
	}

	/// Equivalent to `go(1)`.
	pub fn forward(&self) -> bool {
		self.go(1)
	}

	/// Simulates the user typing an address: pushes `url` without going
	/// through the router.
	pub fn visit(&self, url: &str) -> Result<(), HistoryError> {
		self.push_location(parse(url)?);
		Ok(())
	}

	/// Returns the number of entries in the stack.
	pub fn len(&self) -> usize {
		self.stack.borrow().entries.len()
	}

	/// Returns whether the stack is empty. A stack always holds at least its
	/// initial entry.
	pub fn is_empty(&self) -> bool {
		self.stack.borrow().entries.is_empty()
	}

	/// Returns the position of the current entry.
	pub fn index(&self) -> usize {
		self.stack.borrow().index
	}

	/// Returns the hrefs of all entries, oldest first.
	pub fn entries(&self) -> Vec<String> {
		self.stack
			.borrow()
			.entries
			.iter()
			.map(Location::href)
			.collect()
	}

	fn push_location(&self, location: Location) {
		let mut stack = self.stack.borrow_mut();
		let next = stack.index + 1;
		stack.entries.truncate(next);
		stack.entries.push(location);
		stack.index = next;
	}
}

impl History for MemoryHistory {
	fn location(&self) -> Result<Location, HistoryError> {
		let stack = self.stack.borrow();
		stack
			.entries
			.get(stack.index)
			.cloned()
			.ok_or_else(|| HistoryError::Unavailable("empty history stack".to_string()))
	}

	fn push(&self, url: &str) -> Result<(), HistoryError> {
		self.push_location(parse(url)?);
		Ok(())
	}

	fn replace(&self, url: &str) -> Result<(), HistoryError> {
		let location = parse(url)?;
		let mut stack = self.stack.borrow_mut();
		let index = stack.index;
		match stack.entries.get_mut(index) {
			Some(entry) => {
				*entry = location;
				Ok(())
			}
			None => Err(HistoryError::Unavailable("empty history stack".to_string())),
		}
	}
}

// Same failure a browser reports when `pushState` gets a malformed URL.
fn parse(url: &str) -> Result<Location, HistoryError> {
	Location::parse(url).map_err(|error| HistoryError::Rejected(format!("{}: {}", url, error)))
}
