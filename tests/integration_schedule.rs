//! Scheduler integration tests
//!
//! Drives the phase scheduler from a resolved configuration with recording
//! collaborators in place of real notifications, audio and sleeping.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use onomo::config::{CliOverrides, ConfigFile, ConfigResolver, OptionKey, OptionValue};
use onomo::error::Result;
use onomo::notify::Notifier;
use onomo::scheduler::{PhaseKind, PhaseScheduler, PhaseWaiters};
use onomo::sound::{IntervalWaiter, Sounder};

type Log = Rc<RefCell<Vec<String>>>;

struct RecordingNotifier(Log);

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.0.borrow_mut().push(message.to_string());
    }
}

struct CountingAlert(Rc<RefCell<u32>>);

impl Sounder for CountingAlert {
    fn play(&self) {
        *self.0.borrow_mut() += 1;
    }
}

struct RecordingWaiter {
    duration: Duration,
    waited: Rc<RefCell<Vec<Duration>>>,
}

impl IntervalWaiter for RecordingWaiter {
    fn wait(&self) {
        self.waited.borrow_mut().push(self.duration);
    }

    fn duration(&self) -> Duration {
        self.duration
    }
}

/// Integration test: resolved durations flow into announcements and waits
#[test]
fn test_schedule_from_resolved_config() -> Result<()> {
    let file = ConfigFile::parse(
        std::path::Path::new("onomo.cfg"),
        "[onomo]\npomomins = 50\nshortmins = 10\nlongper = 2\n",
    )?;
    let overrides = CliOverrides::none().with(OptionKey::LongMins, OptionValue::Float(90.5));
    let config = ConfigResolver::default().resolve(&file, &overrides)?;

    let messages: Log = Rc::new(RefCell::new(Vec::new()));
    let alerts = Rc::new(RefCell::new(0));
    let waited = Rc::new(RefCell::new(Vec::new()));
    let waiter = |duration| RecordingWaiter {
        duration,
        waited: waited.clone(),
    };
    let waiters = PhaseWaiters {
        pomodoro: waiter(config.pomo_duration()),
        short_break: waiter(config.short_duration()),
        long_break: waiter(config.long_duration()),
    };
    let mut scheduler = PhaseScheduler::new(
        RecordingNotifier(messages.clone()),
        CountingAlert(alerts.clone()),
        waiters,
        config.long_per,
    );

    let phases: Vec<PhaseKind> = (0..4).map(|_| scheduler.step()).collect();

    assert_eq!(
        phases,
        vec![PhaseKind::Pomodoro, PhaseKind::ShortBreak, PhaseKind::Pomodoro, PhaseKind::LongBreak]
    );
    assert_eq!(
        *messages.borrow(),
        vec![
            "Pomodoro (50m 0s - 1 more until long break)".to_string(),
            "Short break (10m 0s)".to_string(),
            "Pomodoro (50m 0s - 0 more until long break)".to_string(),
            "Long break (1hr 30m 30s)".to_string(),
        ]
    );
    assert_eq!(
        *waited.borrow(),
        vec![
            Duration::from_secs(3000),
            Duration::from_secs(600),
            Duration::from_secs(3000),
            Duration::from_secs(5430),
        ]
    );
    assert_eq!(*alerts.borrow(), 4);
    assert_eq!(scheduler.state().completed, 0);

    Ok(())
}

/// Integration test: fractional minutes announce whole seconds
#[test]
fn test_fractional_minutes_announcement() {
    let messages: Log = Rc::new(RefCell::new(Vec::new()));
    let waited = Rc::new(RefCell::new(Vec::new()));
    let waiter = |mins: f64| RecordingWaiter {
        duration: onomo::config::minutes(mins),
        waited: waited.clone(),
    };
    let waiters = PhaseWaiters {
        pomodoro: waiter(0.75),
        short_break: waiter(0.25),
        long_break: waiter(1.0),
    };
    let mut scheduler = PhaseScheduler::new(
        RecordingNotifier(messages.clone()),
        CountingAlert(Rc::new(RefCell::new(0))),
        waiters,
        4,
    );

    scheduler.step();
    scheduler.step();

    assert_eq!(
        *messages.borrow(),
        vec![
            "Pomodoro (45s - 3 more until long break)".to_string(),
            "Short break (15s)".to_string(),
        ]
    );
}
