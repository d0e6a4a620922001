//! Overlay containers that sit above a page: modals, side panels, and the
//! navigation drawer.
//!
//! An open overlay holds the page scroll lock, traps Tab focus inside its
//! panel, and closes on Escape, backdrop click, or its close control.

pub mod element;
pub mod focus;
pub mod overlay;
pub mod scroll_lock;

pub use element::{Element, ElementId, ElementKind};
pub use focus::{FocusMove, FocusTrap};
pub use overlay::{Key, Overlay, OverlayEvent, OverlayInput, OverlayKind};
pub use scroll_lock::{ScrollLock, ScrollLockGuard};
