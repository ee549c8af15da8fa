use serde::{Deserialize, Serialize};

use crate::events::ViewEvent;

/// Modal screens. Exactly one is current at a time.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum ScreenId {
    Home,
    Character,
    Shop,
    Mail,
    Info,
}

/// Overlays drawn above the modal screens.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum OverlayId {
    Settings,
    Inventory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverlayPolicy {
    /// Opening an overlay hides the current screen.
    pub full_screen: bool,
}

/// Tracks which screen is current and which overlay is open.
///
/// Transitions are pure: each returns the visibility events the host should
/// apply, in order, and an empty list when nothing changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewStateMachine {
    current: ScreenId,
    previous: Option<ScreenId>,
    overlay: Option<OverlayId>,
    policy: OverlayPolicy,
    started: bool,
}

impl ViewStateMachine {
    pub fn new(policy: OverlayPolicy) -> Self {
        Self {
            current: ScreenId::Home,
            previous: None,
            overlay: None,
            policy,
            started: false,
        }
    }

    pub fn current(&self) -> ScreenId {
        self.current
    }

    pub fn previous(&self) -> Option<ScreenId> {
        self.previous
    }

    pub fn overlay(&self) -> Option<OverlayId> {
        self.overlay
    }

    /// Makes `screen` the current modal screen.
    ///
    /// Any open overlay is closed first. Showing the screen that is already
    /// current changes nothing.
    pub fn show_modal(&mut self, screen: ScreenId) -> Vec<ViewEvent> {
        if self.started && screen == self.current {
            return Vec::new();
        }

        let mut events = self.close_overlay();
        if self.started {
            events.push(ViewEvent::ScreenHidden(self.current));
            self.previous = Some(self.current);
        }
        self.started = true;
        self.current = screen;
        events.push(ViewEvent::ScreenShown(screen));
        events.push(ViewEvent::CurrentViewChanged(screen));
        events
    }

    /// Opens `overlay` above the current screen, closing any other overlay.
    pub fn show_overlay(&mut self, overlay: OverlayId) -> Vec<ViewEvent> {
        if self.overlay == Some(overlay) {
            return Vec::new();
        }

        let mut events = self.close_overlay();
        self.previous = Some(self.current);
        if self.policy.full_screen && events.is_empty() {
            events.push(ViewEvent::ScreenHidden(self.current));
        }
        self.overlay = Some(overlay);
        events.push(ViewEvent::OverlayShown(overlay));
        events
    }

    /// Closes `overlay` and restores the screen that was current when it
    /// opened. Closing an overlay that is not open changes nothing.
    pub fn hide_overlay(&mut self, overlay: OverlayId) -> Vec<ViewEvent> {
        if self.overlay != Some(overlay) {
            return Vec::new();
        }

        let mut events = self.close_overlay();
        if let Some(previous) = self.previous {
            self.current = previous;
        }
        if self.policy.full_screen {
            events.push(ViewEvent::ScreenShown(self.current));
        }
        events.push(ViewEvent::CurrentViewChanged(self.current));
        events
    }

    fn close_overlay(&mut self) -> Vec<ViewEvent> {
        self.overlay
            .take()
            .map(|open| vec![ViewEvent::OverlayHidden(open)])
            .unwrap_or_default()
    }
}

impl Default for ViewStateMachine {
    fn default() -> Self {
        Self::new(OverlayPolicy::default())
    }
}
