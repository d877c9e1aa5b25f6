//! Core library for the `hottest` display widget.
//!
//! This crate defines:
//! - Configuration handling (data URL, refresh interval)
//! - Abstraction over the reading source (the JSON endpoint)
//! - The headless render target and the renderer itself
//! - The refresh scheduler and the touch-gesture guard
//!
//! It is used by `hottest-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod guard;
pub mod model;
pub mod render;
pub mod schedule;
pub mod source;

pub use config::Config;
pub use error::{FetchError, RenderError};
pub use guard::{GestureDecision, TouchMove};
pub use model::PlaceReading;
pub use render::{RenderTarget, Slot, render};
pub use source::{HttpSource, ReadingSource};
