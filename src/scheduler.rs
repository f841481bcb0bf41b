//! Pomodoro/break state machine.
//!
//! ```text
//! Pomodoro -> ShortBreak -> Pomodoro ... (longper times) -> LongBreak -> Pomodoro
//! ```
//!
//! Each phase runs notify -> wait -> alert, strictly in that order, and the
//! next phase only starts after the previous alert has finished.

use std::fmt;

use crate::duration::format_duration;
use crate::notify::Notifier;
use crate::sound::{IntervalWaiter, Sounder};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    Pomodoro,
    ShortBreak,
    LongBreak,
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhaseKind::Pomodoro => write!(f, "Pomodoro"),
            PhaseKind::ShortBreak => write!(f, "Short break"),
            PhaseKind::LongBreak => write!(f, "Long break"),
        }
    }
}

/// Where the scheduler is in the cycle. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseState {
    /// Phase that runs on the next step.
    pub current: PhaseKind,
    /// Pomodoros finished since the last long break.
    pub completed: u32,
}

impl Default for PhaseState {
    fn default() -> Self {
        Self {
            current: PhaseKind::Pomodoro,
            completed: 0,
        }
    }
}

/// One waiter per phase kind.
#[derive(Debug, Clone)]
pub struct PhaseWaiters<W: IntervalWaiter> {
    pub pomodoro: W,
    pub short_break: W,
    pub long_break: W,
}

impl<W: IntervalWaiter> PhaseWaiters<W> {
    fn for_phase(&self, kind: PhaseKind) -> &W {
        match kind {
            PhaseKind::Pomodoro => &self.pomodoro,
            PhaseKind::ShortBreak => &self.short_break,
            PhaseKind::LongBreak => &self.long_break,
        }
    }
}

/// Runs phases forever with injected notifier, alert sound and waiters.
pub struct PhaseScheduler<N, S, W>
where
    N: Notifier,
    S: Sounder,
    W: IntervalWaiter,
{
    notifier: N,
    alert: S,
    waiters: PhaseWaiters<W>,
    /// Pomodoros per long break, at least 1.
    long_per: u32,
    state: PhaseState,
}

impl<N, S, W> PhaseScheduler<N, S, W>
where
    N: Notifier,
    S: Sounder,
    W: IntervalWaiter,
{
    pub fn new(notifier: N, alert: S, waiters: PhaseWaiters<W>, long_per: u32) -> Self {
        Self {
            notifier,
            alert,
            waiters,
            long_per: long_per.max(1),
            state: PhaseState::default(),
        }
    }

    pub fn state(&self) -> PhaseState {
        self.state
    }

    pub fn long_per(&self) -> u32 {
        self.long_per
    }

    /// Announcement for the phase about to start.
    pub fn announcement(&self, kind: PhaseKind) -> String {
        let duration = format_duration(self.waiters.for_phase(kind).duration().as_secs());
        match kind {
            PhaseKind::Pomodoro => {
                let remaining = self.long_per.saturating_sub(self.state.completed + 1);
                format!("{} ({} - {} more until long break)", kind, duration, remaining)
            }
            PhaseKind::ShortBreak | PhaseKind::LongBreak => format!("{} ({})", kind, duration),
        }
    }

    /// Run the current phase to completion and move to the next one.
    ///
    /// Returns the phase that was run.
    pub fn step(&mut self) -> PhaseKind {
        let kind = self.state.current;
        log::info!("Starting {} (completed: {})", kind, self.state.completed);

        self.notifier.notify(&self.announcement(kind));
        self.waiters.for_phase(kind).wait();
        self.alert.play();

        self.state.current = match kind {
            PhaseKind::Pomodoro => {
                self.state.completed += 1;
                if self.state.completed >= self.long_per {
                    PhaseKind::LongBreak
                } else {
                    PhaseKind::ShortBreak
                }
            }
            PhaseKind::ShortBreak => PhaseKind::Pomodoro,
            PhaseKind::LongBreak => {
                self.state.completed = 0;
                PhaseKind::Pomodoro
            }
        };
        log::debug!("Finished {}, next is {}", kind, self.state.current);
        kind
    }

    /// Cycle through phases until the process is interrupted.
    pub fn run(&mut self) -> ! {
        loop {
            self.step();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    type Events = Rc<RefCell<Vec<String>>>;

    struct FakeNotifier(Events);

    impl Notifier for FakeNotifier {
        fn notify(&self, message: &str) {
            self.0.borrow_mut().push(format!("notify:{}", message));
        }
    }

    struct FakeAlert(Events);

    impl Sounder for FakeAlert {
        fn play(&self) {
            self.0.borrow_mut().push("alert".to_string());
        }
    }

    struct FakeWaiter(Events, Duration);

    impl IntervalWaiter for FakeWaiter {
        fn wait(&self) {
            self.0.borrow_mut().push(format!("wait:{}", self.1.as_secs()));
        }

        fn duration(&self) -> Duration {
            self.1
        }
    }

    fn scheduler(long_per: u32) -> (PhaseScheduler<FakeNotifier, FakeAlert, FakeWaiter>, Events) {
        let events: Events = Rc::new(RefCell::new(Vec::new()));
        let waiters = PhaseWaiters {
            pomodoro: FakeWaiter(events.clone(), Duration::from_secs(1500)),
            short_break: FakeWaiter(events.clone(), Duration::from_secs(300)),
            long_break: FakeWaiter(events.clone(), Duration::from_secs(1800)),
        };
        let scheduler = PhaseScheduler::new(
            FakeNotifier(events.clone()),
            FakeAlert(events.clone()),
            waiters,
            long_per,
        );
        (scheduler, events)
    }

    #[test]
    fn test_initial_state() {
        let (scheduler, events) = scheduler(4);
        assert_eq!(scheduler.state(), PhaseState::default());
        assert_eq!(scheduler.state().current, PhaseKind::Pomodoro);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_phase_sequence_with_long_per_four() {
        let (mut scheduler, _) = scheduler(4);
        let phases: Vec<PhaseKind> = (0..8).map(|_| scheduler.step()).collect();

        use PhaseKind::*;
        assert_eq!(
            phases,
            vec![Pomodoro, ShortBreak, Pomodoro, ShortBreak, Pomodoro, ShortBreak, Pomodoro, LongBreak]
        );
        assert_eq!(scheduler.state().completed, 0);
        assert_eq!(scheduler.state().current, Pomodoro);
    }

    #[test]
    fn test_counter_increments_after_pomodoro() {
        let (mut scheduler, _) = scheduler(4);
        scheduler.step();
        assert_eq!(scheduler.state().completed, 1);
        assert_eq!(scheduler.state().current, PhaseKind::ShortBreak);
        scheduler.step();
        assert_eq!(scheduler.state().completed, 1);
    }

    #[test]
    fn test_cycle_repeats_after_long_break() {
        let (mut scheduler, _) = scheduler(2);
        let phases: Vec<PhaseKind> = (0..8).map(|_| scheduler.step()).collect();

        use PhaseKind::*;
        assert_eq!(
            phases,
            vec![Pomodoro, ShortBreak, Pomodoro, LongBreak, Pomodoro, ShortBreak, Pomodoro, LongBreak]
        );
    }

    #[test]
    fn test_long_per_one_always_long_break() {
        let (mut scheduler, _) = scheduler(1);
        let phases: Vec<PhaseKind> = (0..4).map(|_| scheduler.step()).collect();

        use PhaseKind::*;
        assert_eq!(phases, vec![Pomodoro, LongBreak, Pomodoro, LongBreak]);
    }

    #[test]
    fn test_side_effects_are_ordered() {
        let (mut scheduler, events) = scheduler(4);
        scheduler.step();
        scheduler.step();

        assert_eq!(
            *events.borrow(),
            vec![
                "notify:Pomodoro (25m 0s - 3 more until long break)".to_string(),
                "wait:1500".to_string(),
                "alert".to_string(),
                "notify:Short break (5m 0s)".to_string(),
                "wait:300".to_string(),
                "alert".to_string(),
            ]
        );
    }

    #[test]
    fn test_remaining_count_in_announcements() {
        let (mut scheduler, events) = scheduler(3);
        for _ in 0..6 {
            scheduler.step();
        }

        let notes: Vec<String> = events
            .borrow()
            .iter()
            .filter(|e| e.starts_with("notify:"))
            .cloned()
            .collect();
        assert_eq!(
            notes,
            vec![
                "notify:Pomodoro (25m 0s - 2 more until long break)".to_string(),
                "notify:Short break (5m 0s)".to_string(),
                "notify:Pomodoro (25m 0s - 1 more until long break)".to_string(),
                "notify:Short break (5m 0s)".to_string(),
                "notify:Pomodoro (25m 0s - 0 more until long break)".to_string(),
                "notify:Long break (30m 0s)".to_string(),
            ]
        );
    }

    #[test]
    fn test_zero_long_per_treated_as_one() {
        let (scheduler, _) = scheduler(0);
        assert_eq!(scheduler.long_per(), 1);
    }

    #[test]
    fn test_phase_kind_display() {
        assert_eq!(PhaseKind::Pomodoro.to_string(), "Pomodoro");
        assert_eq!(PhaseKind::ShortBreak.to_string(), "Short break");
        assert_eq!(PhaseKind::LongBreak.to_string(), "Long break");
    }
}
