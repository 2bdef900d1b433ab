//! Platform-free core of Slowtide.
//!
//! Everything in here runs on the host as well as in the browser: the web
//! front-end owns the DOM, the canvas and the audio context, and drives these
//! types with explicit timestamps, surfaces and seeded RNGs.

pub mod activities;
pub mod admin;
pub mod analytics;
pub mod config;
pub mod dimmer;
pub mod draw;
pub mod error;
pub mod gate;
pub mod modes;
pub mod noise;
pub mod prefs;
pub mod scenes;
pub mod sound;
pub mod state;
pub mod timer;

pub use config::*;
pub use error::{Result, SlowtideError};
pub use prefs::Preferences;
pub use state::AppState;
