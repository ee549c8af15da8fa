//! Screen and overlay visibility.

mod machine;

pub use machine::{OverlayId, OverlayPolicy, ScreenId, ViewStateMachine};
