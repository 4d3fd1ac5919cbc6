// SPDX-License-Identifier: MPL-2.0
//! Toast notification system for user feedback.
//!
//! Notifications appear temporarily as small cards in the bottom-right
//! corner, without blocking interaction. A notification may carry a target
//! screen; tapping its toast dismisses it and navigates there, which is how
//! delivered reminders open the screen they talk about.
//!
//! - [`notification`] - core `Notification` struct with severity levels
//! - [`manager`] - queuing and lifecycle management
//! - [`toast`] - the widget rendering visible notifications

mod manager;
mod notification;
mod toast;

pub use manager::{Manager, Message as NotificationMessage};
pub use notification::{Notification, NotificationId, Severity};
pub use toast::Toast;
