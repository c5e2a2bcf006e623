//! Core of TimeStory, a personal timeline of dated events.
//!
//! Everything here is headless: the types describe what a front end shows and
//! the operations change it. Nothing is persisted; the state lives as long as
//! the `App` that owns it.

pub mod app;
pub mod config;
pub mod data;
pub mod dialog;
pub mod digest;
pub mod error;
pub mod form;
pub mod list;
pub mod timeline;

pub use app::{App, FilterOption};
pub use config::TimelineConfig;
pub use error::{TimestoryError, TimestoryResult};
