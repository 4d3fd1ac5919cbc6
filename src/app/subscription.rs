// SPDX-License-Identifier: MPL-2.0
//! Periodic subscriptions for the application.
//!
//! Every timer is gated on actual demand so the app sleeps when nothing
//! moves on screen.

use super::Message;
use iced::{time, Subscription};
use std::time::Duration;

/// Frame-rate tick while gesture animations are visible.
const FRAME_TICK: Duration = Duration::from_millis(16);
/// Coarse tick for toast auto-dismiss and scheduled deliveries.
const TIMER_TICK: Duration = Duration::from_millis(100);

pub fn create_tick_subscription(
    animating: bool,
    timers_pending: bool,
    video_playing: bool,
) -> Subscription<Message> {
    let mut subscriptions = Vec::new();

    if animating {
        subscriptions.push(time::every(FRAME_TICK).map(Message::Tick));
    } else if timers_pending {
        subscriptions.push(time::every(TIMER_TICK).map(Message::Tick));
    }

    if video_playing {
        subscriptions.push(time::every(Duration::from_secs(1)).map(|_| Message::PlaybackTick));
    }

    Subscription::batch(subscriptions)
}
