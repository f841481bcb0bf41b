//! Phase announcements.
//!
//! A [`Notifier`] fans a message out to the configured channels. Channel
//! failures are logged and swallowed so the scheduler never sees them.

use std::io::{self, Write};

use chrono::{DateTime, Local};
use colored::*;
use notify_rust::Notification;

use crate::config::Channel;

/// Application name shown on desktop notifications.
pub const APP_NAME: &str = "Onomo-Pomo";

/// Trait for anything that can announce a phase change
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Prints timestamped messages to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn format_line(at: DateTime<Local>, message: &str) -> String {
        format!("[{}] {}", at.format("%H:%M"), message)
    }

    /// Write one announcement to `out`. A failed write is logged, not raised.
    pub fn write_to<W: Write>(&self, out: &mut W, message: &str) {
        let line = Self::format_line(Local::now(), message);
        let result = writeln!(out, "{}", line.bold().green()).and_then(|_| out.flush());
        if let Err(e) = result {
            log::warn!("Console notification failed: {}", e);
        }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        self.write_to(&mut io::stdout().lock(), message);
    }
}

/// Shows a desktop popup through the platform notification service.
#[derive(Debug, Default, Clone, Copy)]
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&self, message: &str) {
        let result = Notification::new().summary(APP_NAME).appname(APP_NAME).body(message).show();
        if let Err(e) = result {
            log::warn!("Desktop notification failed: {}", e);
        }
    }
}

/// Sends every message to each of its channels in order.
#[derive(Default)]
pub struct FanoutNotifier {
    channels: Vec<Box<dyn Notifier>>,
}

impl FanoutNotifier {
    pub fn new(channels: Vec<Box<dyn Notifier>>) -> Self {
        Self { channels }
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

impl Notifier for FanoutNotifier {
    fn notify(&self, message: &str) {
        log::info!("{}", message);
        for channel in &self.channels {
            channel.notify(message);
        }
    }
}

/// Build the notifier for the configured channels.
///
/// Each channel is used at most once, desktop before console.
pub fn make_notifier(channels: &[Channel]) -> FanoutNotifier {
    let mut notifiers: Vec<Box<dyn Notifier>> = Vec::new();
    if channels.contains(&Channel::Desktop) {
        notifiers.push(Box::new(DesktopNotifier));
    }
    if channels.contains(&Channel::Console) {
        notifiers.push(Box::new(ConsoleNotifier));
    }
    FanoutNotifier::new(notifiers)
}
