//! Option schema.
//!
//! The declarative table of every recognized setting. The table drives the
//! command-line flags, the generated config template and resolution.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::validators::{self, ValidationError, Validator};

/// Channel used to announce phase changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Console,
    Desktop,
}

impl Channel {
    /// Allowed vocabulary for the `messageby` option.
    pub const NAMES: [&'static str; 2] = ["console", "desktop"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Console => "console",
            Channel::Desktop => "desktop",
        }
    }
}

impl FromStr for Channel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "console" => Ok(Channel::Console),
            "desktop" => Ok(Channel::Desktop),
            other => Err(ValidationError::new(format!("unknown channel '{}'", other))),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed value produced by a validator.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Float(f64),
    Integer(u32),
    Path(Option<PathBuf>),
    Channels(Vec<Channel>),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Float(v) => write!(f, "{}", v),
            OptionValue::Integer(v) => write!(f, "{}", v),
            OptionValue::Path(None) => Ok(()),
            OptionValue::Path(Some(p)) => write!(f, "{}", p.display()),
            OptionValue::Channels(channels) => {
                let names: Vec<&str> = channels.iter().map(Channel::as_str).collect();
                f.write_str(&names.join(","))
            }
        }
    }
}

/// Identifies the field of [`ResolvedConfig`](super::ResolvedConfig) an option fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OptionKey {
    PomoMins,
    ShortMins,
    LongMins,
    LongPer,
    AudioFile,
    PomoSound,
    BreakSound,
    MessageBy,
}

/// One configurable setting.
#[derive(Debug, Clone, Copy)]
pub struct OptionDescriptor {
    pub key: OptionKey,
    /// Long flag and config file key. Unique across the schema.
    pub name: &'static str,
    pub short: Option<char>,
    pub validator: Validator,
    pub default: fn() -> OptionValue,
    /// Value shown in the generated template instead of the default.
    pub suggested: Option<&'static str>,
    pub description: &'static str,
}

impl OptionDescriptor {
    pub fn validate(&self, raw: &str) -> Result<OptionValue, ValidationError> {
        (self.validator)(raw)
    }

    pub fn default_value(&self) -> OptionValue {
        (self.default)()
    }

    /// Text written after `name =` in the config template.
    pub fn template_value(&self) -> String {
        match self.suggested {
            Some(s) => s.to_string(),
            None => self.default_value().to_string(),
        }
    }
}

pub const DEFAULT_POMO_MINS: f64 = 25.0;
pub const DEFAULT_SHORT_MINS: f64 = 5.0;
pub const DEFAULT_LONG_MINS: f64 = 30.0;
pub const DEFAULT_LONG_PER: u32 = 4;

fn default_pomo_mins() -> OptionValue {
    OptionValue::Float(DEFAULT_POMO_MINS)
}

fn default_short_mins() -> OptionValue {
    OptionValue::Float(DEFAULT_SHORT_MINS)
}

fn default_long_mins() -> OptionValue {
    OptionValue::Float(DEFAULT_LONG_MINS)
}

fn default_long_per() -> OptionValue {
    OptionValue::Integer(DEFAULT_LONG_PER)
}

fn no_path() -> OptionValue {
    OptionValue::Path(None)
}

fn default_message_by() -> OptionValue {
    OptionValue::Channels(vec![Channel::Console, Channel::Desktop])
}

static SCHEMA: [OptionDescriptor; 8] = [
    OptionDescriptor {
        key: OptionKey::PomoMins,
        name: "pomomins",
        short: Some('p'),
        validator: validators::positive_minutes,
        default: default_pomo_mins,
        suggested: None,
        description: "Length of pomodoros in minutes",
    },
    OptionDescriptor {
        key: OptionKey::ShortMins,
        name: "shortmins",
        short: Some('s'),
        validator: validators::positive_minutes,
        default: default_short_mins,
        suggested: None,
        description: "Length of short breaks in minutes",
    },
    OptionDescriptor {
        key: OptionKey::LongMins,
        name: "longmins",
        short: Some('l'),
        validator: validators::positive_minutes,
        default: default_long_mins,
        suggested: None,
        description: "Length of long breaks in minutes",
    },
    OptionDescriptor {
        key: OptionKey::LongPer,
        name: "longper",
        short: Some('n'),
        validator: validators::positive_integer,
        default: default_long_per,
        suggested: None,
        description: "Number of pomodoros between long breaks",
    },
    OptionDescriptor {
        key: OptionKey::AudioFile,
        name: "audiofile",
        short: Some('a'),
        validator: validators::optional_path,
        default: no_path,
        suggested: Some("/usr/share/sounds/alsa/Front_Center.wav"),
        description: "WAV file played at the end of a pomodoro or break. Leave empty for no audio",
    },
    OptionDescriptor {
        key: OptionKey::PomoSound,
        name: "pomosound",
        short: None,
        validator: validators::optional_path,
        default: no_path,
        suggested: Some("/usr/share/sounds/alsa/Noise.wav"),
        description: "WAV file looped for the length of each pomodoro. Leave empty for silence",
    },
    OptionDescriptor {
        key: OptionKey::BreakSound,
        name: "breaksound",
        short: None,
        validator: validators::optional_path,
        default: no_path,
        suggested: None,
        description: "WAV file looped for the length of each break. Leave empty for silence",
    },
    OptionDescriptor {
        key: OptionKey::MessageBy,
        name: "messageby",
        short: Some('m'),
        validator: validators::channel_set,
        default: default_message_by,
        suggested: None,
        description: "How to announce the start of a pomodoro or break. Comma-separated values from: console,desktop",
    },
];

/// The full option table, in template and help order.
pub fn schema() -> &'static [OptionDescriptor] {
    &SCHEMA
}

/// Look up a descriptor by its long name.
pub fn find(name: &str) -> Option<&'static OptionDescriptor> {
    SCHEMA.iter().find(|d| d.name == name)
}
