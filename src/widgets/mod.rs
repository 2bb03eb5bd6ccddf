//! Page widgets: the sidebar menu toggle and the live clock.

pub mod clock;
pub mod format;
pub mod menu;
pub mod source;

pub use clock::{ClockDisplay, ClockHandle};
pub use menu::MenuToggle;
