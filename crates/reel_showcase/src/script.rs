//! Session scripts
//!
//! A script is a TOML list of timed interactions with the demo screen:
//!
//! ```toml
//! [[events]]
//! at_ms = 1200
//! action = "swipe"
//! dx = -140.0
//!
//! [[events]]
//! at_ms = 2000
//! action = "interval_step"
//! delta = -1
//! ```

use reel_carousel::{IndicatorPosition, IndicatorType};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;
use thiserror::Error;

/// Script loading errors
#[derive(Error, Debug)]
pub enum ScriptError {
    /// The file is not valid script TOML
    #[error("invalid script: {0}")]
    Parse(#[from] toml::de::Error),

    /// An event has values that can't be replayed
    #[error("event {index} (at {at_ms}ms): {reason}")]
    InvalidEvent {
        index: usize,
        at_ms: u64,
        reason: String,
    },
}

fn default_samples() -> u32 {
    8
}

/// One interaction with the screen
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Drag horizontally by `dx`, delivered as `samples` pan updates
    Swipe {
        dx: f32,
        #[serde(default = "default_samples")]
        samples: u32,
    },
    /// Press the "next" arrow
    Next,
    /// Press the "previous" arrow
    Prev,
    /// Tap an indicator marker
    Tap { index: usize },
    /// Slide interval stepper, in clicks of 500ms
    IntervalStep { delta: i64 },
    /// Image count stepper
    ImagesStep { delta: i64 },
    /// Autoplay switch
    AutoPlay { enabled: bool },
    /// Controls switch
    Controls { enabled: bool },
    /// Indicator type radio
    IndicatorType { value: IndicatorType },
    /// Indicator position radio
    IndicatorPosition { value: IndicatorPosition },
    /// Layout pass; a non-positive width detaches the view
    Layout { width: f32 },
}

/// An action scheduled at a point in session time
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ScriptEvent {
    pub at_ms: u64,
    #[serde(flatten)]
    pub action: Action,
}

impl ScriptEvent {
    pub fn at(&self) -> Duration {
        Duration::from_millis(self.at_ms)
    }
}

#[derive(Debug, Default, Deserialize)]
struct ScriptFile {
    #[serde(default)]
    events: Vec<ScriptEvent>,
}

/// Time-ordered queue of events
#[derive(Debug, Default)]
pub struct Script {
    events: VecDeque<ScriptEvent>,
}

impl Script {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse and validate a script, ordering events by time
    ///
    /// Events sharing a timestamp keep their file order.
    pub fn parse(content: &str) -> Result<Self, ScriptError> {
        let file: ScriptFile = toml::from_str(content)?;
        for (index, event) in file.events.iter().enumerate() {
            validate(index, event)?;
        }

        let mut events = file.events;
        events.sort_by_key(|e| e.at_ms);
        Ok(Self {
            events: events.into(),
        })
    }

    /// Pop the next event if it is due at `now`
    pub fn next_due(&mut self, now: Duration) -> Option<ScriptEvent> {
        if self.events.front().is_some_and(|e| e.at() <= now) {
            self.events.pop_front()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

fn validate(index: usize, event: &ScriptEvent) -> Result<(), ScriptError> {
    let invalid = |reason: &str| ScriptError::InvalidEvent {
        index,
        at_ms: event.at_ms,
        reason: reason.to_string(),
    };

    match &event.action {
        Action::Swipe { dx, samples } => {
            if !dx.is_finite() {
                return Err(invalid("swipe dx must be finite"));
            }
            if *samples == 0 {
                return Err(invalid("swipe needs at least one sample"));
            }
        }
        Action::Layout { width } if width.is_nan() => {
            return Err(invalid("layout width must be a number"));
        }
        _ => {}
    }
    Ok(())
}
