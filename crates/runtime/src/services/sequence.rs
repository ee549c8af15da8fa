//! Cancellable UI sequences: chat typewriter, balance counters and delayed
//! screen transitions.
//!
//! Each sequence kind has a generation counter. Starting a sequence bumps
//! the counter and hands the task a [`SequenceToken`] holding the new
//! generation; the task checks the token after every wait and stops as soon
//! as a newer sequence of the same kind started. Superseded tasks are never
//! aborted mid-step, they simply publish nothing more.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use menu_core::{ChatLine, Currencies, CurrencyKind};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::config::SequenceConfig;
use crate::events::{Event, EventBus, HomeEvent, Subscription, Topic, ViewEvent, WalletEvent};
use crate::view::ScreenId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceKind {
    Chat,
    Counter(CurrencyKind),
    Transition,
}

/// Generation captured by a running sequence.
#[derive(Debug, Clone)]
pub struct SequenceToken {
    kind: SequenceKind,
    generation: u64,
    counter: Arc<AtomicU64>,
}

impl SequenceToken {
    pub fn kind(&self) -> SequenceKind {
        self.kind
    }

    /// False once a newer sequence of the same kind started or the kind was
    /// cancelled.
    pub fn is_current(&self) -> bool {
        self.counter.load(Ordering::Acquire) == self.generation
    }
}

#[derive(Debug, Default)]
struct Generations {
    counters: Mutex<HashMap<SequenceKind, Arc<AtomicU64>>>,
}

impl Generations {
    fn begin(&self, kind: SequenceKind) -> SequenceToken {
        let counter = Arc::clone(self.lock().entry(kind).or_default());
        let generation = counter.fetch_add(1, Ordering::AcqRel) + 1;
        SequenceToken {
            kind,
            generation,
            counter,
        }
    }

    fn cancel(&self, kind: SequenceKind) {
        if let Some(counter) = self.lock().get(&kind) {
            counter.fetch_add(1, Ordering::AcqRel);
        }
    }

    fn cancel_all(&self) {
        for counter in self.lock().values() {
            counter.fetch_add(1, Ordering::AcqRel);
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SequenceKind, Arc<AtomicU64>>> {
        self.counters.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[derive(Debug)]
struct Inner {
    config: SequenceConfig,
    bus: EventBus,
    chat: Vec<ChatLine>,
    generations: Generations,
    tasks: Mutex<Vec<JoinHandle<()>>>,
    balances: Mutex<Option<Currencies>>,
}

/// Starts and supersedes sequences on the ambient tokio runtime.
///
/// Sequences publish on the bus from a tokio task; starting one outside a
/// runtime logs a warning and does nothing.
#[derive(Debug, Clone)]
pub struct SequenceRunner {
    inner: Arc<Inner>,
}

impl SequenceRunner {
    pub fn new(config: SequenceConfig, bus: EventBus, chat: Vec<ChatLine>) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                bus,
                chat,
                generations: Generations::default(),
                tasks: Mutex::new(Vec::new()),
                balances: Mutex::new(None),
            }),
        }
    }

    /// Types the chat script out line by line.
    pub fn start_chat(&self) -> Option<SequenceToken> {
        let token = self.inner.generations.begin(SequenceKind::Chat);
        let task = run_chat(
            token.clone(),
            self.inner.bus.clone(),
            self.inner.chat.clone(),
            self.inner.config.clone(),
        );
        self.spawn(task).then_some(token)
    }

    /// Animates a balance from `from` to `to`. The last tick is `to`.
    pub fn start_counter(
        &self,
        currency: CurrencyKind,
        from: u32,
        to: u32,
    ) -> Option<SequenceToken> {
        let token = self.inner.generations.begin(SequenceKind::Counter(currency));
        let task = run_counter(
            token.clone(),
            self.inner.bus.clone(),
            currency,
            (from, to),
            self.inner.config.counter_steps,
            self.inner.config.counter_step_delay,
        );
        self.spawn(task).then_some(token)
    }

    /// Requests `screen` after `delay` unless superseded first.
    pub fn schedule_transition(&self, screen: ScreenId, delay: Duration) -> Option<SequenceToken> {
        let token = self.inner.generations.begin(SequenceKind::Transition);
        let bus = self.inner.bus.clone();
        let guard = token.clone();
        let task = async move {
            tokio::time::sleep(delay).await;
            if guard.is_current() {
                bus.publish(ViewEvent::ShowScreenRequested(screen));
            }
        };
        self.spawn(task).then_some(token)
    }

    pub fn cancel(&self, kind: SequenceKind) {
        self.inner.generations.cancel(kind);
    }

    /// Cancels every sequence and aborts the tasks still waiting.
    pub fn shutdown(&self) {
        self.inner.generations.cancel_all();
        let tasks = std::mem::take(
            &mut *self.inner.tasks.lock().unwrap_or_else(PoisonError::into_inner),
        );
        for task in tasks {
            task.abort();
        }
    }

    /// Drives the chat from home-screen visibility and counters from
    /// balance updates.
    pub fn attach(&self) -> Vec<Subscription> {
        let runner = self.clone();
        let view = self.inner.bus.subscribe(Topic::View, move |event| match event {
            Event::View(ViewEvent::ScreenShown(ScreenId::Home)) => {
                runner.start_chat();
            }
            Event::View(ViewEvent::ScreenHidden(ScreenId::Home)) => {
                runner.cancel(SequenceKind::Chat);
            }
            _ => {}
        });

        let runner = self.clone();
        let wallet = self.inner.bus.subscribe(Topic::Wallet, move |event| {
            if let Event::Wallet(WalletEvent::FundsUpdated { gold, gems }) = event {
                runner.animate_funds(Currencies::new(*gold, *gems));
            }
        });

        vec![view, wallet]
    }

    fn animate_funds(&self, next: Currencies) {
        let previous = self
            .inner
            .balances
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(next);
        let Some(previous) = previous else {
            return;
        };
        if previous.gold != next.gold {
            self.start_counter(CurrencyKind::Gold, previous.gold, next.gold);
        }
        if previous.gems != next.gems {
            self.start_counter(CurrencyKind::Gems, previous.gems, next.gems);
        }
    }

    fn spawn<F>(&self, task: F) -> bool
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let Ok(handle) = Handle::try_current() else {
            tracing::warn!("No tokio runtime, sequence not started");
            return false;
        };
        let mut tasks = self.inner.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        tasks.retain(|task| !task.is_finished());
        tasks.push(handle.spawn(task));
        true
    }
}

async fn run_chat(
    token: SequenceToken,
    bus: EventBus,
    lines: Vec<ChatLine>,
    config: SequenceConfig,
) {
    if lines.is_empty() {
        return;
    }
    loop {
        for line in &lines {
            let mut text = String::with_capacity(line.message.len());
            for ch in line.message.chars() {
                tokio::time::sleep(config.chat_key_delay).await;
                if !token.is_current() {
                    return;
                }
                text.push(ch);
                bus.publish(HomeEvent::ChatTyped {
                    speaker: line.speaker.clone(),
                    text: text.clone(),
                });
            }
            tokio::time::sleep(config.chat_line_delay).await;
            if !token.is_current() {
                return;
            }
        }
        if !config.chat_loop {
            return;
        }
    }
}

async fn run_counter(
    token: SequenceToken,
    bus: EventBus,
    currency: CurrencyKind,
    (from, to): (u32, u32),
    steps: u32,
    delay: Duration,
) {
    let steps = steps.max(1);
    for step in 1..=steps {
        tokio::time::sleep(delay).await;
        if !token.is_current() {
            return;
        }
        bus.publish(WalletEvent::CounterTick {
            currency,
            value: interpolate(from, to, step, steps),
        });
    }
}

fn interpolate(from: u32, to: u32, step: u32, steps: u32) -> u32 {
    let (from, to) = (i64::from(from), i64::from(to));
    let value = from + (to - from) * i64::from(step) / i64::from(steps);
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_generation_invalidates_token() {
        let generations = Generations::default();
        let first = generations.begin(SequenceKind::Chat);
        assert!(first.is_current());

        let second = generations.begin(SequenceKind::Chat);
        assert!(!first.is_current());
        assert!(second.is_current());
    }

    #[test]
    fn kinds_have_independent_generations() {
        let generations = Generations::default();
        let gold = generations.begin(SequenceKind::Counter(CurrencyKind::Gold));
        generations.begin(SequenceKind::Counter(CurrencyKind::Gems));
        assert!(gold.is_current());

        generations.cancel(SequenceKind::Counter(CurrencyKind::Gold));
        assert!(!gold.is_current());
    }

    #[test]
    fn interpolation_ends_exactly() {
        assert_eq!(interpolate(500, 450, 1, 2), 475);
        assert_eq!(interpolate(500, 450, 2, 2), 450);
        assert_eq!(interpolate(0, 1000, 3, 3), 1000);
    }

    fn requested_screens(bus: &EventBus) -> Arc<Mutex<Vec<ScreenId>>> {
        let screens = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&screens);
        bus.subscribe(Topic::View, move |event| {
            if let Event::View(ViewEvent::ShowScreenRequested(screen)) = event {
                sink.lock().unwrap().push(*screen);
            }
        });
        screens
    }

    #[tokio::test(start_paused = true)]
    async fn newer_transition_supersedes_pending_one() {
        let bus = EventBus::new();
        let screens = requested_screens(&bus);
        let runner = SequenceRunner::new(SequenceConfig::default(), bus, Vec::new());

        let first = runner
            .schedule_transition(ScreenId::Shop, Duration::from_millis(100))
            .unwrap();
        runner.schedule_transition(ScreenId::Mail, Duration::from_millis(100));
        assert!(!first.is_current());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(*screens.lock().unwrap(), vec![ScreenId::Mail]);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_transition_publishes_nothing() {
        let bus = EventBus::new();
        let screens = requested_screens(&bus);
        let runner = SequenceRunner::new(SequenceConfig::default(), bus, Vec::new());

        runner.schedule_transition(ScreenId::Info, Duration::from_millis(50));
        runner.cancel(SequenceKind::Transition);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(screens.lock().unwrap().is_empty());
    }

    #[test]
    fn starting_outside_runtime_is_refused() {
        let runner = SequenceRunner::new(SequenceConfig::default(), EventBus::new(), Vec::new());
        assert!(runner.start_chat().is_none());
    }
}
