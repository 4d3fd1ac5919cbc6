// SPDX-License-Identifier: MPL-2.0
//! Swipe gesture tracking and the timed animation primitives it runs on.
//!
//! This module is the interaction core of the application: a small state
//! machine that follows a horizontal drag, decides threshold-crossing
//! completion on release, and drives the settle/confirm/reset animations.
//! It is deliberately free of any Iced types so the whole state machine can
//! be exercised in tests by feeding it events with fabricated timestamps.
//!
//! Timers and animations are plain data (a start `Instant` plus a duration
//! compared against the time carried by each event), so dropping a tracker
//! cancels everything outstanding.

mod animation;
mod tracker;

pub use animation::{Oscillation, Timed};
pub use tracker::{Config, Effect, Event, Tracker};
