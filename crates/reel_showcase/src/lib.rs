//! Reel Showcase
//!
//! A headless host screen for the carousel engine: the demo controls, a
//! TOML session script, and a frame loop that plays one against the other.

pub mod config;
pub mod render;
pub mod screen;
pub mod script;
pub mod session;

pub use config::ShowcaseConfig;
pub use render::{OutputFormat, Renderer};
pub use screen::CarouselScreen;
pub use script::{Action, Script, ScriptError, ScriptEvent};
pub use session::{Session, SessionOptions, SessionSummary};
