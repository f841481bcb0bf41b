//! The final, statically typed configuration for a run.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{OnomoError, Result};

use super::resolution::ConfigSource;
use super::schema::{Channel, OptionKey, OptionValue};

/// Settings after merging defaults, the config file and CLI overrides.
///
/// Only [`ConfigResolver`](super::ConfigResolver) builds this.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub pomo_mins: f64,
    pub short_mins: f64,
    pub long_mins: f64,
    pub long_per: u32,
    pub audio_file: Option<PathBuf>,
    pub pomo_sound: Option<PathBuf>,
    pub break_sound: Option<PathBuf>,
    pub message_by: Vec<Channel>,
    provenance: Vec<(&'static str, OptionKey, ConfigSource)>,
}

impl ResolvedConfig {
    pub(super) fn empty() -> Self {
        Self {
            pomo_mins: 0.0,
            short_mins: 0.0,
            long_mins: 0.0,
            long_per: 0,
            audio_file: None,
            pomo_sound: None,
            break_sound: None,
            message_by: Vec::new(),
            provenance: Vec::new(),
        }
    }

    /// Store `value` in the field named by `key`.
    pub(super) fn assign(
        &mut self,
        name: &'static str,
        key: OptionKey,
        value: OptionValue,
        source: ConfigSource,
    ) -> Result<()> {
        match (key, value) {
            (OptionKey::PomoMins, OptionValue::Float(v)) => self.pomo_mins = v,
            (OptionKey::ShortMins, OptionValue::Float(v)) => self.short_mins = v,
            (OptionKey::LongMins, OptionValue::Float(v)) => self.long_mins = v,
            (OptionKey::LongPer, OptionValue::Integer(v)) => self.long_per = v,
            (OptionKey::AudioFile, OptionValue::Path(p)) => self.audio_file = p,
            (OptionKey::PomoSound, OptionValue::Path(p)) => self.pomo_sound = p,
            (OptionKey::BreakSound, OptionValue::Path(p)) => self.break_sound = p,
            (OptionKey::MessageBy, OptionValue::Channels(c)) => self.message_by = c,
            _ => return Err(OnomoError::TypeMismatch(name.to_string())),
        }
        self.provenance.push((name, key, source));
        Ok(())
    }

    /// Current value of a field, in schema form.
    pub fn value(&self, key: OptionKey) -> OptionValue {
        match key {
            OptionKey::PomoMins => OptionValue::Float(self.pomo_mins),
            OptionKey::ShortMins => OptionValue::Float(self.short_mins),
            OptionKey::LongMins => OptionValue::Float(self.long_mins),
            OptionKey::LongPer => OptionValue::Integer(self.long_per),
            OptionKey::AudioFile => OptionValue::Path(self.audio_file.clone()),
            OptionKey::PomoSound => OptionValue::Path(self.pomo_sound.clone()),
            OptionKey::BreakSound => OptionValue::Path(self.break_sound.clone()),
            OptionKey::MessageBy => OptionValue::Channels(self.message_by.clone()),
        }
    }

    /// Where the value for `key` came from.
    pub fn source(&self, key: OptionKey) -> Option<ConfigSource> {
        self.provenance
            .iter()
            .find(|(_, k, _)| *k == key)
            .map(|(_, _, source)| *source)
    }

    /// One `name = value  (source)` line per option, in schema order.
    pub fn describe(&self) -> Vec<String> {
        self.provenance
            .iter()
            .map(|(name, key, source)| format!("{} = {}  ({})", name, self.value(*key), source))
            .collect()
    }

    pub fn pomo_duration(&self) -> Duration {
        minutes(self.pomo_mins)
    }

    pub fn short_duration(&self) -> Duration {
        minutes(self.short_mins)
    }

    pub fn long_duration(&self) -> Duration {
        minutes(self.long_mins)
    }
}

/// Convert fractional minutes to a whole-millisecond duration.
pub fn minutes(mins: f64) -> Duration {
    Duration::from_millis((mins * 60_000.0).round() as u64)
}
