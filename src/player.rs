// SPDX-License-Identifier: MPL-2.0
//! Playback model for the HLS video screen.
//!
//! Holds the stream catalog, the load lifecycle of the current stream, and
//! the transport state (position, playing, muted). Positions advance on a
//! one-second tick while playing and always clamp to the stream duration.

use crate::hls::Variant;

/// Seconds moved by the fine seek controls.
pub const SEEK_STEP_SECS: f32 = 10.0;
/// Seconds moved by the coarse skip controls.
pub const SKIP_STEP_SECS: f32 = 30.0;

/// A catalog entry the user can pick from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stream {
    pub name: &'static str,
    pub url: &'static str,
}

/// Demo HLS streams offered by the video screen.
pub const STREAMS: [Stream; 3] = [
    Stream {
        name: "Big Buck Bunny",
        url: "https://test-streams.mux.dev/x36xhzz/x36xhzz.m3u8",
    },
    Stream {
        name: "Sintel",
        url: "https://devstreaming-cdn.apple.com/videos/streaming/examples/img_bipbop_adv_example_fmp4/master.m3u8",
    },
    Stream {
        name: "Tears of Steel",
        url: "https://demo.unified-streaming.com/k8s/features/stable/video/tears-of-steel/tears-of-steel.ism/.m3u8",
    },
];

/// Resolved facts about a loaded stream.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamInfo {
    /// Variant streams advertised by the master playlist, best first.
    pub variants: Vec<Variant>,
    /// Total duration derived from the media playlist, in seconds.
    pub duration_secs: f32,
}

/// Load lifecycle of the current stream.
#[derive(Debug, Clone, PartialEq)]
pub enum Playback {
    Idle,
    Loading,
    Ready {
        info: StreamInfo,
        position_secs: f32,
        playing: bool,
    },
    Failed(String),
}

/// Outcome of a finished load, used by the caller to decide side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The stream loaded for the first time this session.
    FirstLoad { name: &'static str },
    /// The stream had already been loaded once before.
    Reloaded,
    Failed,
    /// The result belonged to a stream the user has switched away from.
    Stale,
}

/// State of the video screen's player.
#[derive(Debug)]
pub struct Player {
    current: usize,
    playback: Playback,
    muted: bool,
    autoplay: bool,
    loaded_once: [bool; STREAMS.len()],
}

impl Player {
    #[must_use]
    pub fn new(autoplay: bool) -> Self {
        Self {
            current: 0,
            playback: Playback::Idle,
            muted: false,
            autoplay,
            loaded_once: [false; STREAMS.len()],
        }
    }

    /// Marks the current stream as loading. Returns its URL for the fetch.
    pub fn begin_load(&mut self) -> &'static str {
        self.playback = Playback::Loading;
        STREAMS[self.current].url
    }

    /// Applies a finished load for stream `index`.
    ///
    /// Results for a stream other than the current one are dropped; the user
    /// switched away while the fetch was in flight.
    pub fn finish_load(
        &mut self,
        index: usize,
        result: Result<StreamInfo, String>,
    ) -> LoadOutcome {
        if index != self.current {
            return LoadOutcome::Stale;
        }
        match result {
            Ok(info) => {
                self.playback = Playback::Ready {
                    info,
                    position_secs: 0.0,
                    playing: self.autoplay,
                };
                if self.loaded_once[index] {
                    LoadOutcome::Reloaded
                } else {
                    self.loaded_once[index] = true;
                    LoadOutcome::FirstLoad {
                        name: STREAMS[index].name,
                    }
                }
            }
            Err(message) => {
                self.playback = Playback::Failed(message);
                LoadOutcome::Failed
            }
        }
    }

    /// Switches to another catalog entry.
    ///
    /// Returns `false` when `index` is out of range or already current.
    /// Switching resets the transport; the caller starts the new load.
    pub fn switch_stream(&mut self, index: usize) -> bool {
        if index >= STREAMS.len() || index == self.current {
            return false;
        }
        self.current = index;
        self.playback = Playback::Idle;
        true
    }

    pub fn toggle_play(&mut self) {
        if let Playback::Ready { playing, .. } = &mut self.playback {
            *playing = !*playing;
        }
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Moves the position by `delta` seconds, clamped to `[0, duration]`.
    pub fn seek_by(&mut self, delta: f32) {
        if let Playback::Ready {
            info,
            position_secs,
            ..
        } = &mut self.playback
        {
            *position_secs = (*position_secs + delta).clamp(0.0, info.duration_secs);
        }
    }

    /// Advances playback by one second; pauses upon reaching the end.
    pub fn tick_second(&mut self) {
        if let Playback::Ready {
            info,
            position_secs,
            playing,
        } = &mut self.playback
        {
            if !*playing {
                return;
            }
            *position_secs = (*position_secs + 1.0).min(info.duration_secs);
            if *position_secs >= info.duration_secs {
                *playing = false;
            }
        }
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_stream(&self) -> Stream {
        STREAMS[self.current]
    }

    #[must_use]
    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        matches!(self.playback, Playback::Ready { playing: true, .. })
    }

    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    #[must_use]
    pub fn position_secs(&self) -> f32 {
        match &self.playback {
            Playback::Ready { position_secs, .. } => *position_secs,
            _ => 0.0,
        }
    }

    #[must_use]
    pub fn duration_secs(&self) -> Option<f32> {
        match &self.playback {
            Playback::Ready { info, .. } => Some(info.duration_secs),
            _ => None,
        }
    }
}

/// Formats seconds as `m:ss` for the transport display.
#[must_use]
pub fn format_time(seconds: f32) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(duration: f32) -> StreamInfo {
        StreamInfo {
            variants: vec![],
            duration_secs: duration,
        }
    }

    fn ready_player(duration: f32) -> Player {
        let mut player = Player::new(false);
        player.begin_load();
        player.finish_load(0, Ok(info(duration)));
        player
    }

    #[test]
    fn first_load_is_reported_once_per_stream() {
        let mut player = Player::new(false);
        player.begin_load();
        assert_eq!(
            player.finish_load(0, Ok(info(60.0))),
            LoadOutcome::FirstLoad {
                name: "Big Buck Bunny"
            }
        );

        player.begin_load();
        assert_eq!(player.finish_load(0, Ok(info(60.0))), LoadOutcome::Reloaded);
    }

    #[test]
    fn stale_results_are_dropped_after_switching() {
        let mut player = Player::new(false);
        player.begin_load();
        assert!(player.switch_stream(1));

        assert_eq!(player.finish_load(0, Ok(info(60.0))), LoadOutcome::Stale);
        assert_eq!(player.playback(), &Playback::Idle);
    }

    #[test]
    fn failed_load_records_the_message() {
        let mut player = Player::new(false);
        player.begin_load();
        assert_eq!(
            player.finish_load(0, Err("connection refused".into())),
            LoadOutcome::Failed
        );
        assert!(matches!(player.playback(), Playback::Failed(m) if m == "connection refused"));
    }

    #[test]
    fn seek_clamps_to_stream_bounds() {
        let mut player = ready_player(100.0);

        player.seek_by(-SEEK_STEP_SECS);
        assert_eq!(player.position_secs(), 0.0);

        player.seek_by(1_000.0);
        assert_eq!(player.position_secs(), 100.0);

        player.seek_by(-SKIP_STEP_SECS);
        assert_eq!(player.position_secs(), 70.0);
    }

    #[test]
    fn tick_advances_only_while_playing() {
        let mut player = ready_player(100.0);

        player.tick_second();
        assert_eq!(player.position_secs(), 0.0);

        player.toggle_play();
        player.tick_second();
        player.tick_second();
        assert_eq!(player.position_secs(), 2.0);
    }

    #[test]
    fn playback_pauses_at_the_end() {
        let mut player = ready_player(2.0);
        player.toggle_play();

        player.tick_second();
        player.tick_second();
        player.tick_second();

        assert_eq!(player.position_secs(), 2.0);
        assert!(!player.is_playing());
    }

    #[test]
    fn switching_to_current_or_invalid_index_is_a_noop() {
        let mut player = ready_player(100.0);
        assert!(!player.switch_stream(0));
        assert!(!player.switch_stream(STREAMS.len()));
        assert!(matches!(player.playback(), Playback::Ready { .. }));
    }

    #[test]
    fn autoplay_starts_playback_on_load() {
        let mut player = Player::new(true);
        player.begin_load();
        player.finish_load(0, Ok(info(60.0)));
        assert!(player.is_playing());
    }

    #[test]
    fn format_time_pads_seconds() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(65.4), "1:05");
        assert_eq!(format_time(634.0), "10:34");
    }
}
