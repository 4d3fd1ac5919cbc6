// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::ui::home;
use crate::ui::notifications;
use crate::ui::video_screen;
use crate::ui::web_screen;
use std::time::Instant;

use super::Screen;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Home(home::Message),
    Web(web_screen::Message),
    Video(video_screen::Message),
    /// Push a screen onto the navigation stack.
    Navigate(Screen),
    /// Pop the navigation stack (header back button).
    NavigateBack,
    Notification(notifications::NotificationMessage),
    /// Periodic tick driving gesture animations, scheduled deliveries and
    /// toast auto-dismiss.
    Tick(Instant),
    /// One-second tick advancing the playback position.
    PlaybackTick,
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional URL opened in the web screen instead of the configured one.
    pub start_url: Option<String>,
    /// Optional directory containing Fluent `.ftl` files for custom builds.
    pub i18n_dir: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `SLIDEKICK_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
}
