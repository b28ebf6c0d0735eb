//! Gesture-to-intent translation
//!
//! Pan samples arrive on a sampling context (a gesture thread or worklet)
//! that must never touch carousel state. A [`PanTracker`] accumulates the
//! horizontal translation there and, when the pan ends, hands one discrete
//! [`Intent`] to the carousel through an [`IntentSender`]. The carousel
//! applies queued intents on its own thread in [`pump`](crate::Carousel::pump).

use serde::Serialize;
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};

/// Minimum horizontal travel, in device-independent units, for a swipe
///
/// The comparison is strict: a pan of exactly this distance is ignored.
pub const SWIPE_THRESHOLD: f32 = 50.0;

/// Direction the content was dragged
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    /// Dragged toward the left edge; shows the next slide
    Left,
    /// Dragged toward the right edge; shows the previous slide
    Right,
}

impl SwipeDirection {
    pub fn intent(self) -> Intent {
        match self {
            SwipeDirection::Left => Intent::Advance,
            SwipeDirection::Right => Intent::Retreat,
        }
    }
}

/// A discrete navigation decision handed to the carousel owner
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Show the next slide
    Advance,
    /// Show the previous slide
    Retreat,
    /// Show a specific slide
    Select(usize),
}

/// Result of finishing a pan
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureOutcome {
    /// The pan crossed the threshold
    Intent(Intent),
    /// The pan stayed within the threshold and does nothing
    BelowThreshold,
}

impl GestureOutcome {
    pub fn intent(&self) -> Option<Intent> {
        match self {
            GestureOutcome::Intent(intent) => Some(*intent),
            GestureOutcome::BelowThreshold => None,
        }
    }
}

/// Decide what a finished pan means from its total horizontal displacement
pub fn classify(displacement: f32) -> GestureOutcome {
    if displacement < -SWIPE_THRESHOLD {
        GestureOutcome::Intent(SwipeDirection::Left.intent())
    } else if displacement > SWIPE_THRESHOLD {
        GestureOutcome::Intent(SwipeDirection::Right.intent())
    } else {
        GestureOutcome::BelowThreshold
    }
}

/// Create a connected sender/queue pair
pub fn intent_channel() -> (IntentSender, IntentQueue) {
    let (tx, rx) = mpsc::unbounded_channel();
    (IntentSender { tx }, IntentQueue { rx })
}

/// Cloneable, thread-safe sending half of the intent handoff
#[derive(Clone, Debug)]
pub struct IntentSender {
    tx: UnboundedSender<Intent>,
}

impl IntentSender {
    /// Queue an intent for the owner thread
    ///
    /// Returns false if the carousel has been unmounted.
    pub fn send(&self, intent: Intent) -> bool {
        match self.tx.send(intent) {
            Ok(()) => true,
            Err(_) => {
                tracing::trace!(?intent, "intent dropped: carousel unmounted");
                false
            }
        }
    }

    /// Whether the receiving carousel is gone
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Receiving half, owned by the carousel
#[derive(Debug)]
pub struct IntentQueue {
    rx: UnboundedReceiver<Intent>,
}

impl IntentQueue {
    /// Take every intent queued so far, in arrival order
    pub fn drain(&mut self) -> Vec<Intent> {
        let mut intents = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(intent) => intents.push(intent),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        intents
    }

    /// Stop accepting new intents; senders see `send` return false
    pub fn close(&mut self) {
        self.rx.close();
    }
}

/// Sampling-context half of the pan gesture
///
/// Lives on whichever thread delivers pan samples. It only ever reads its
/// own accumulated translation and writes to the intent channel.
#[derive(Debug)]
pub struct PanTracker {
    sender: IntentSender,
    translation_x: f32,
    active: bool,
}

impl PanTracker {
    pub fn new(sender: IntentSender) -> Self {
        Self {
            sender,
            translation_x: 0.0,
            active: false,
        }
    }

    /// A finger went down
    pub fn begin(&mut self) {
        self.translation_x = 0.0;
        self.active = true;
    }

    /// Report the total horizontal translation since `begin`
    pub fn update(&mut self, translation_x: f32) {
        if self.active && translation_x.is_finite() {
            self.translation_x = translation_x;
        }
    }

    pub fn translation_x(&self) -> f32 {
        self.translation_x
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The finger lifted; classify the pan and hand off any intent
    pub fn end(&mut self) -> GestureOutcome {
        if !self.active {
            return GestureOutcome::BelowThreshold;
        }
        self.active = false;

        let outcome = classify(self.translation_x);
        match outcome {
            GestureOutcome::Intent(intent) => {
                tracing::trace!(dx = self.translation_x, ?intent, "pan ended");
                self.sender.send(intent);
            }
            GestureOutcome::BelowThreshold => {
                tracing::trace!(dx = self.translation_x, "pan below threshold");
            }
        }
        self.translation_x = 0.0;
        outcome
    }

    /// The gesture was interrupted; nothing is handed off
    pub fn cancel(&mut self) {
        self.active = false;
        self.translation_x = 0.0;
    }
}
