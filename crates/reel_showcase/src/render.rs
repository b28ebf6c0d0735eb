//! Session output
//!
//! Text mode prints one line per slide change with a drawn indicator
//! strip. JSON mode writes one record per line.

use crate::screen::INTERVAL_STEP_MS;
use crate::script::Action;
use crate::session::SessionSummary;
use clap::ValueEnum;
use reel_carousel::{CarouselFrame, IndexChange, IndicatorType};
use serde::Serialize;
use std::io::{self, Write};
use std::time::Duration;

/// Output format for session records
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Serialize)]
#[serde(tag = "record", rename_all = "snake_case")]
enum Record<'a> {
    Action {
        at_ms: u64,
        action: &'a Action,
    },
    Change {
        at_ms: u64,
        #[serde(flatten)]
        change: &'a IndexChange,
        frame: &'a CarouselFrame,
    },
    Summary(&'a SessionSummary),
}

/// Writes session records to any sink
pub struct Renderer<W: Write> {
    out: W,
    format: OutputFormat,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// A scripted action was applied
    pub fn action(&mut self, at: Duration, action: &Action) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => writeln!(self.out, "{}  > {}", stamp(at), describe(action)),
            OutputFormat::Json => self.json(&Record::Action {
                at_ms: millis(at),
                action,
            }),
        }
    }

    /// The current slide changed
    pub fn change(
        &mut self,
        at: Duration,
        change: &IndexChange,
        frame: &CarouselFrame,
    ) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => writeln!(
                self.out,
                "{}  slide {}/{} ({:?})  {}",
                stamp(at),
                change.current + 1,
                frame.slide_count,
                change.origin,
                indicator_strip(frame),
            ),
            OutputFormat::Json => self.json(&Record::Change {
                at_ms: millis(at),
                change,
                frame,
            }),
        }
    }

    pub fn summary(&mut self, summary: &SessionSummary) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => {
                writeln!(self.out)?;
                writeln!(
                    self.out,
                    "{} frames over {}ms, {} events",
                    summary.frames, summary.elapsed_ms, summary.events
                )?;
                writeln!(
                    self.out,
                    "{} transitions ({} manual, {} auto), ending on {}",
                    summary.transitions,
                    summary.manual,
                    summary.auto,
                    match summary.final_index {
                        Some(index) => format!("slide {}/{}", index + 1, summary.slide_count),
                        None => "no slide".to_string(),
                    }
                )
            }
            OutputFormat::Json => self.json(&Record::Summary(summary)),
        }
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn json(&mut self, record: &Record<'_>) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, record)?;
        writeln!(self.out)
    }
}

/// Draw the indicator strip, or a plain position counter when hidden
pub fn indicator_strip(frame: &CarouselFrame) -> String {
    let Some(layout) = &frame.indicators else {
        return match frame.current_index {
            Some(index) => format!("[{}/{}]", index + 1, frame.slide_count),
            None => "[-]".to_string(),
        };
    };

    let (active, inactive) = match layout.indicator_type {
        IndicatorType::Dots => ('●', '○'),
        IndicatorType::Bars => ('█', '▁'),
        IndicatorType::Capsules => ('▬', '▭'),
    };
    layout
        .markers
        .iter()
        .map(|m| if m.active { active } else { inactive })
        .collect()
}

fn describe(action: &Action) -> String {
    match action {
        Action::Swipe { dx, .. } => format!("swipe {:+.0}px", dx),
        Action::Next => "next".to_string(),
        Action::Prev => "prev".to_string(),
        Action::Tap { index } => format!("tap indicator {}", index + 1),
        Action::IntervalStep { delta } => format!(
            "interval {:+}ms",
            delta.saturating_mul(INTERVAL_STEP_MS)
        ),
        Action::ImagesStep { delta } => format!("images {:+}", delta),
        Action::AutoPlay { enabled } => format!("autoplay {}", on_off(*enabled)),
        Action::Controls { enabled } => format!("controls {}", on_off(*enabled)),
        Action::IndicatorType { value } => format!("indicator type {:?}", value),
        Action::IndicatorPosition { value } => format!("indicator position {:?}", value),
        Action::Layout { width } => format!("layout width {}", width),
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

fn stamp(at: Duration) -> String {
    format!("[{:>7.3}s]", at.as_secs_f64())
}

fn millis(at: Duration) -> u64 {
    u64::try_from(at.as_millis()).unwrap_or(u64::MAX)
}
