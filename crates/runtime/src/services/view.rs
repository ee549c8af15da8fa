//! Binds the view state machine to the view topic.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::events::{Event, EventBus, Subscription, Topic, ViewEvent};
use crate::view::{OverlayId, OverlayPolicy, ScreenId, ViewStateMachine};

/// Owns the [`ViewStateMachine`] and publishes its transitions.
#[derive(Debug)]
pub struct ViewService {
    machine: Mutex<ViewStateMachine>,
    bus: EventBus,
}

impl ViewService {
    pub fn new(policy: OverlayPolicy, bus: EventBus) -> Self {
        Self {
            machine: Mutex::new(ViewStateMachine::new(policy)),
            bus,
        }
    }

    pub fn current(&self) -> ScreenId {
        self.lock().current()
    }

    pub fn overlay(&self) -> Option<OverlayId> {
        self.lock().overlay()
    }

    pub fn show_modal(&self, screen: ScreenId) {
        let events = self.lock().show_modal(screen);
        self.emit(events);
    }

    pub fn show_overlay(&self, overlay: OverlayId) {
        let events = self.lock().show_overlay(overlay);
        self.emit(events);
    }

    pub fn hide_overlay(&self, overlay: OverlayId) {
        let events = self.lock().hide_overlay(overlay);
        self.emit(events);
    }

    /// Handles navigation requests published on [`Topic::View`].
    pub fn attach(self: &Arc<Self>) -> Vec<Subscription> {
        let service = Arc::downgrade(self);
        let subscription = self.bus.subscribe(Topic::View, move |event| {
            let Some(service) = service.upgrade() else {
                return;
            };
            match event {
                Event::View(ViewEvent::ShowScreenRequested(screen)) => service.show_modal(*screen),
                Event::View(ViewEvent::OpenOverlayRequested(overlay)) => {
                    service.show_overlay(*overlay)
                }
                Event::View(ViewEvent::CloseOverlayRequested(overlay)) => {
                    service.hide_overlay(*overlay)
                }
                _ => {}
            }
        });
        vec![subscription]
    }

    fn emit(&self, events: Vec<ViewEvent>) {
        for event in events {
            tracing::debug!(?event, "view transition");
            self.bus.publish(event);
        }
    }

    fn lock(&self) -> MutexGuard<'_, ViewStateMachine> {
        // Transitions replace fields without calling out, so a poisoned
        // machine is still consistent.
        self.machine.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
