//! Onomo-Pomo - a simple timer for the Pomodoro working technique
//!
//! Settings are layered (CLI > config file > built-in default) and a phase
//! scheduler cycles through pomodoros, short breaks and long breaks,
//! announcing each phase and playing audio cues.

pub mod config;
pub mod duration;
pub mod error;
pub mod notify;
pub mod scheduler;
pub mod sound;

pub use error::{OnomoError, Result};
