// SPDX-License-Identifier: MPL-2.0
//! The swipe-to-confirm state machine.
//!
//! A `Tracker` advances through `Idle -> Dragging -> Settling/Confirmed`
//! phases in response to pointer events and periodic ticks. It owns no
//! timers: the reset delay and both slide animations are evaluated against
//! the timestamp supplied with each event.

use super::animation::{Oscillation, Timed};
use std::time::{Duration, Instant};

/// Default fraction of the track that must be covered for a swipe to count.
pub const DEFAULT_THRESHOLD_FRACTION: f32 = 0.6;
/// Default cool-down before a confirmed control resets to idle.
pub const DEFAULT_RESET_DELAY: Duration = Duration::from_millis(2000);
/// Duration of the settle and confirm slide animations.
pub const SLIDE_DURATION: Duration = Duration::from_millis(200);
/// Period of the idle hint-arrow oscillation.
pub const OSCILLATION_PERIOD: Duration = Duration::from_millis(1000);
/// Amplitude of the idle hint-arrow oscillation, in pixels.
pub const ARROW_AMPLITUDE: f32 = 10.0;
/// Pixel range over which the label fades out as the handle advances.
pub const TEXT_FADE_DISTANCE: f32 = 200.0;

/// Tunable gesture parameters.
///
/// Changes take effect at the next gesture evaluation; they are never
/// applied retroactively to an in-flight drag.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Completion threshold as a fraction of the track width, in `(0, 1]`.
    pub threshold_fraction: f32,
    /// How long the confirmed state lasts before the control auto-resets.
    pub reset_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold_fraction: DEFAULT_THRESHOLD_FRACTION,
            reset_delay: DEFAULT_RESET_DELAY,
        }
    }
}

impl Config {
    /// Clamps the threshold fraction into its documented `(0, 1]` domain.
    fn effective_fraction(&self) -> f32 {
        self.threshold_fraction.clamp(f32::EPSILON, 1.0)
    }
}

/// Discrete events consumed by the tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// Pointer went down at `x` (widget-local), over a track allowing
    /// `track_max` pixels of handle travel.
    Pressed { x: f32, track_max: f32 },
    /// Pointer moved to `x` while down.
    Moved { x: f32 },
    /// Pointer was released (or the drag was otherwise cancelled).
    Released,
    /// Periodic tick advancing animations and the reset timer.
    Tick,
}

/// Externally observable outcome of handling one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// The swipe crossed the threshold; fire the completion action once.
    Completed,
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    Idle {
        arrow: Oscillation,
    },
    Dragging {
        grab_x: f32,
        offset: f32,
    },
    Settling {
        anim: Timed,
        /// A settle leaving the cool-down refuses new input until it lands;
        /// a settle after a failed swipe can be re-grabbed mid-flight.
        from_confirmed: bool,
    },
    Confirmed {
        anim: Timed,
        since: Instant,
    },
}

/// Gesture state for one swipe-to-confirm control.
#[derive(Debug)]
pub struct Tracker {
    config: Config,
    disabled: bool,
    track_max: f32,
    phase: Phase,
}

impl Tracker {
    /// Creates an idle tracker whose hint arrow starts oscillating at `now`.
    #[must_use]
    pub fn new(config: Config, now: Instant) -> Self {
        Self {
            config,
            disabled: false,
            track_max: 0.0,
            phase: Phase::Idle {
                arrow: Oscillation::new(now, OSCILLATION_PERIOD, ARROW_AMPLITUDE),
            },
        }
    }

    /// Processes one event at time `now`.
    ///
    /// Returns [`Effect::Completed`] exactly once per threshold-crossing
    /// gesture, and never while disabled or confirmed.
    pub fn handle(&mut self, event: Event, now: Instant) -> Effect {
        match event {
            Event::Pressed { x, track_max } => self.on_pressed(x, track_max, now),
            Event::Moved { x } => self.on_moved(x),
            Event::Released => self.on_released(now),
            Event::Tick => self.on_tick(now),
        }
    }

    /// Enables or disables gesture input.
    ///
    /// Disabling mid-drag animates the handle back to rest without firing
    /// the completion action; it is never left stranded mid-track.
    pub fn set_disabled(&mut self, disabled: bool, now: Instant) {
        if self.disabled == disabled {
            return;
        }
        self.disabled = disabled;
        if disabled {
            if let Phase::Dragging { offset, .. } = self.phase {
                self.phase = Phase::Settling {
                    anim: Timed::new(offset, 0.0, now, SLIDE_DURATION),
                    from_confirmed: false,
                };
            }
        } else if matches!(self.phase, Phase::Idle { .. }) {
            self.restart_oscillation(now);
        }
    }

    /// Updates the completion threshold; consumed at the next release.
    pub fn set_threshold_fraction(&mut self, fraction: f32) {
        self.config.threshold_fraction = fraction;
    }

    /// Updates the cool-down length; consumed at the next confirmation.
    pub fn set_reset_delay(&mut self, delay: Duration) {
        self.config.reset_delay = delay;
    }

    fn on_pressed(&mut self, x: f32, track_max: f32, now: Instant) -> Effect {
        if self.disabled {
            return Effect::None;
        }
        self.track_max = track_max.max(0.0);

        match self.phase {
            Phase::Idle { .. } => {
                self.phase = Phase::Dragging {
                    grab_x: x,
                    offset: 0.0,
                };
            }
            Phase::Settling {
                anim,
                from_confirmed: false,
            } => {
                // Re-grab a handle that is still sliding back after a
                // failed swipe, keeping its current position.
                let offset = anim.value(now);
                self.phase = Phase::Dragging {
                    grab_x: x - offset,
                    offset,
                };
            }
            // Input during the cool-down (and its closing settle) is
            // ignored until the control has returned to rest.
            Phase::Settling {
                from_confirmed: true,
                ..
            }
            | Phase::Confirmed { .. }
            | Phase::Dragging { .. } => {}
        }
        Effect::None
    }

    fn on_moved(&mut self, x: f32) -> Effect {
        if self.disabled {
            return Effect::None;
        }
        if let Phase::Dragging { grab_x, offset } = &mut self.phase {
            *offset = (x - *grab_x).clamp(0.0, self.track_max);
        }
        Effect::None
    }

    fn on_released(&mut self, now: Instant) -> Effect {
        let Phase::Dragging { offset, .. } = self.phase else {
            return Effect::None;
        };

        if !self.disabled && offset > self.threshold() {
            self.phase = Phase::Confirmed {
                anim: Timed::new(offset, self.track_max, now, SLIDE_DURATION),
                since: now,
            };
            Effect::Completed
        } else {
            self.phase = Phase::Settling {
                anim: Timed::new(offset, 0.0, now, SLIDE_DURATION),
                from_confirmed: false,
            };
            Effect::None
        }
    }

    fn on_tick(&mut self, now: Instant) -> Effect {
        match self.phase {
            Phase::Settling { anim, .. } if anim.is_finished(now) => {
                self.phase = Phase::Idle {
                    arrow: Oscillation::new(now, OSCILLATION_PERIOD, ARROW_AMPLITUDE),
                };
            }
            Phase::Confirmed { since, .. }
                if now.saturating_duration_since(since) >= self.config.reset_delay =>
            {
                self.phase = Phase::Settling {
                    anim: Timed::new(self.track_max, 0.0, now, SLIDE_DURATION),
                    from_confirmed: true,
                };
            }
            _ => {}
        }
        Effect::None
    }

    fn restart_oscillation(&mut self, now: Instant) {
        self.phase = Phase::Idle {
            arrow: Oscillation::new(now, OSCILLATION_PERIOD, ARROW_AMPLITUDE),
        };
    }

    /// Current handle displacement in pixels, always in `[0, track_max]`.
    #[must_use]
    pub fn offset(&self, now: Instant) -> f32 {
        match &self.phase {
            Phase::Idle { .. } => 0.0,
            Phase::Dragging { offset, .. } => *offset,
            Phase::Settling { anim, .. } | Phase::Confirmed { anim, .. } => anim.value(now),
        }
    }

    /// Background interpolation progress in `[0, 1]`.
    ///
    /// Proportional to the handle displacement, forced to 1 while confirmed.
    #[must_use]
    pub fn color_progress(&self, now: Instant) -> f32 {
        if matches!(self.phase, Phase::Confirmed { .. }) {
            return 1.0;
        }
        if self.track_max <= 0.0 {
            return 0.0;
        }
        (self.offset(now) / self.track_max).clamp(0.0, 1.0)
    }

    /// Idle hint-arrow displacement; 0 outside the idle phase or while
    /// disabled.
    #[must_use]
    pub fn arrow_offset(&self, now: Instant) -> f32 {
        match &self.phase {
            Phase::Idle { arrow } if !self.disabled => arrow.value(now),
            _ => 0.0,
        }
    }

    /// Label opacity, fading out as the handle covers the text.
    #[must_use]
    pub fn label_opacity(&self, now: Instant) -> f32 {
        (1.0 - self.offset(now) / TEXT_FADE_DISTANCE).clamp(0.0, 1.0)
    }

    /// Minimum displacement for a release to count as completed.
    #[must_use]
    pub fn threshold(&self) -> f32 {
        self.track_max * self.config.effective_fraction()
    }

    #[must_use]
    pub fn track_max(&self) -> f32 {
        self.track_max
    }

    /// Whether the control sits in the post-completion cool-down window.
    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        matches!(self.phase, Phase::Confirmed { .. })
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging { .. })
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self.phase, Phase::Idle { .. })
    }

    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Whether any animation or timer still needs ticks to make progress.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        !matches!(self.phase, Phase::Idle { .. })
    }
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new(Config::default(), Instant::now())
    }
}
