//! Audio cues and phase waiting.
//!
//! Sound clips are WAV files checked at construction time, so a bad path
//! fails at startup instead of inside the scheduling loop. Playback shells
//! out to the platform player and blocks until it exits.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{OnomoError, Result};

/// A validated WAV file and its play length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavClip {
    path: PathBuf,
    length: Duration,
}

impl WavClip {
    /// Read and validate the WAV file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| audio_error(path, e.to_string()))?;
        let length = wav_length(&bytes).map_err(|reason| audio_error(path, reason))?;
        log::debug!("Loaded {} ({:?})", path.display(), length);
        Ok(Self {
            path: path.to_path_buf(),
            length,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn length(&self) -> Duration {
        self.length
    }
}

fn audio_error(path: &Path, reason: impl Into<String>) -> OnomoError {
    OnomoError::AudioLoad {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}

fn read_u16(bytes: &[u8], at: usize) -> Option<u16> {
    bytes.get(at..at + 2).map(|b| u16::from_le_bytes([b[0], b[1]]))
}

fn read_u32(bytes: &[u8], at: usize) -> Option<u32> {
    bytes.get(at..at + 4).map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
}

/// Walk the RIFF chunks and compute the play length from `fmt ` and `data`.
fn wav_length(bytes: &[u8]) -> std::result::Result<Duration, String> {
    if bytes.get(0..4) != Some(b"RIFF".as_slice()) || bytes.get(8..12) != Some(b"WAVE".as_slice()) {
        return Err("not a RIFF/WAVE file".to_string());
    }

    let mut byte_rate = None;
    let mut data_len = None;
    let mut at = 12;

    while at + 8 <= bytes.len() {
        let id = &bytes[at..at + 4];
        let size = read_u32(bytes, at + 4).ok_or("truncated chunk header")? as usize;
        let body = at + 8;

        match id {
            b"fmt " => {
                let channels = read_u16(bytes, body + 2).ok_or("truncated fmt chunk")?;
                let rate = read_u32(bytes, body + 8).ok_or("truncated fmt chunk")?;
                if channels == 0 || rate == 0 {
                    return Err("fmt chunk has no channels or zero byte rate".to_string());
                }
                byte_rate = Some(rate);
            }
            b"data" => {
                let available = bytes.len().saturating_sub(body);
                // Streaming writers leave the size at 0 or all ones; the
                // samples then run to the end of the file.
                if size == 0 || size == u32::MAX as usize {
                    data_len = Some(available);
                    break;
                }
                data_len = Some(size.min(available));
            }
            _ => {}
        }

        // Chunks are word aligned.
        at = body.saturating_add(size).saturating_add(size % 2);
    }

    match (byte_rate, data_len) {
        (Some(_), Some(0)) => Err("empty data chunk".to_string()),
        (Some(rate), Some(len)) => Ok(Duration::from_secs_f64(len as f64 / rate as f64)),
        (None, _) => Err("missing fmt chunk".to_string()),
        (_, None) => Err("missing data chunk".to_string()),
    }
}

/// Plays a sound to completion.
pub trait Sounder {
    fn play(&self);
}

impl<S: Sounder + ?Sized> Sounder for Box<S> {
    fn play(&self) {
        (**self).play()
    }
}

/// Sounder used when no audio file is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSounder;

impl Sounder for SilentSounder {
    fn play(&self) {}
}

/// Plays a WAV clip through the platform player.
#[derive(Debug, Clone)]
pub struct WavSounder {
    clip: WavClip,
}

impl WavSounder {
    pub fn new(clip: WavClip) -> Self {
        Self { clip }
    }

    pub fn clip(&self) -> &WavClip {
        &self.clip
    }
}

/// External player and its leading arguments.
fn player() -> (&'static str, &'static [&'static str]) {
    if cfg!(target_os = "macos") {
        ("afplay", &[])
    } else {
        ("aplay", &["-q"])
    }
}

impl Sounder for WavSounder {
    fn play(&self) {
        let (program, args) = player();
        let status = Command::new(program)
            .args(args)
            .arg(self.clip.path())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        let failure = match status {
            Ok(s) if s.success() => return,
            Ok(s) => format!("{} exited with {}", program, s),
            Err(e) => format!("could not run {}: {}", program, e),
        };
        // Keep the caller's pacing as if the clip had played.
        log::warn!("Playback of {} failed: {}", self.clip.path().display(), failure);
        thread::sleep(self.clip.length());
    }
}

/// Build a sounder for `path`; no path means silence.
pub fn make_sounder(path: Option<&Path>) -> Result<Box<dyn Sounder>> {
    match path {
        None => Ok(Box::new(SilentSounder)),
        Some(p) if p.as_os_str().is_empty() => Ok(Box::new(SilentSounder)),
        Some(p) => Ok(Box::new(WavSounder::new(WavClip::load(p)?))),
    }
}

/// Monotonic time source for waiters.
pub trait Clock {
    /// Time elapsed since the clock's origin.
    fn now(&self) -> Duration;
    fn sleep(&self, duration: Duration);
}

/// Wall clock backed by [`Instant`] and [`thread::sleep`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Blocks for the length of one phase.
pub trait IntervalWaiter {
    fn wait(&self);

    fn duration(&self) -> Duration;
}

impl<W: IntervalWaiter + ?Sized> IntervalWaiter for Box<W> {
    fn wait(&self) {
        (**self).wait()
    }

    fn duration(&self) -> Duration {
        (**self).duration()
    }
}

/// Waits by sleeping.
#[derive(Debug, Clone)]
pub struct SleepWaiter<C: Clock> {
    duration: Duration,
    clock: C,
}

impl<C: Clock> SleepWaiter<C> {
    pub fn new(duration: Duration, clock: C) -> Self {
        Self { duration, clock }
    }
}

impl<C: Clock> IntervalWaiter for SleepWaiter<C> {
    fn wait(&self) {
        self.clock.sleep(self.duration);
    }

    fn duration(&self) -> Duration {
        self.duration
    }
}

/// Waits by playing a clip over and over until the duration has elapsed.
///
/// The last repetition always plays to the end, so the wait can run past
/// the duration by up to one clip length. A play that takes no time ends
/// the loop and the rest of the duration is slept out.
#[derive(Debug, Clone)]
pub struct LoopingWaiter<S: Sounder, C: Clock> {
    duration: Duration,
    sounder: S,
    clock: C,
}

impl<S: Sounder, C: Clock> LoopingWaiter<S, C> {
    pub fn new(duration: Duration, sounder: S, clock: C) -> Self {
        Self {
            duration,
            sounder,
            clock,
        }
    }
}

impl<S: Sounder, C: Clock> IntervalWaiter for LoopingWaiter<S, C> {
    fn wait(&self) {
        let start = self.clock.now();
        loop {
            let before = self.clock.now();
            let elapsed = before.saturating_sub(start);
            if elapsed >= self.duration {
                break;
            }
            self.sounder.play();
            if self.clock.now() <= before {
                log::warn!("Loop sound played in no time, sleeping out the interval");
                self.clock.sleep(self.duration - elapsed);
                break;
            }
        }
    }

    fn duration(&self) -> Duration {
        self.duration
    }
}

/// Build the waiter for one phase kind.
///
/// With a loop sound the wait is filled by repeating that clip, otherwise
/// it is a plain sleep.
pub fn make_interval_waiter(duration: Duration, loop_sound: Option<&Path>) -> Result<Box<dyn IntervalWaiter>> {
    let clock = SystemClock::new();
    match loop_sound {
        Some(p) if !p.as_os_str().is_empty() => {
            let sounder = WavSounder::new(WavClip::load(p)?);
            Ok(Box::new(LoopingWaiter::new(duration, sounder, clock)))
        }
        _ => Ok(Box::new(SleepWaiter::new(duration, clock))),
    }
}
