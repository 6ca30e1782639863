//! Client-side routing: the navigation capability and the route guard.
//!
//! - `Navigator`: a host-provided "go to route" operation
//! - `NavigationGuard`: decides on every navigation whether the target route
//!   is reachable with the current session

pub mod guard;
pub mod navigator;

pub use guard::{GuardDecision, NavigationGuard, Routes};
pub use navigator::{Navigator, RecordingNavigator};
