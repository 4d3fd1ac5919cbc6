// SPDX-License-Identifier: MPL-2.0
//! Swipe-to-confirm control.
//!
//! A horizontal track with a draggable handle. Dragging the handle past the
//! confirmation threshold and releasing fires [`Effect::Completed`]; anything
//! short of that animates the handle back. The gesture rules live in
//! [`gesture::Tracker`]; this module renders the track on a canvas and maps
//! pointer events onto tracker events.

use crate::gesture::{self, Effect, Tracker};
use crate::ui::design_tokens::{mix, palette, sizing, typography};
use iced::widget::canvas::{Frame, Path, Stroke};
use iced::widget::{container, text, Canvas, Stack};
use iced::{mouse, Color, Element, Length, Point, Rectangle, Size};
use std::time::Instant;

pub use crate::gesture::Config;

/// Pointer events reported by the track canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Message {
    Pressed { x: f32, track_max: f32 },
    Moved { x: f32 },
    Released,
}

/// One swipe-to-confirm control instance.
#[derive(Debug)]
pub struct State {
    tracker: Tracker,
    now: Instant,
}

impl State {
    #[must_use]
    pub fn new(config: Config, now: Instant) -> Self {
        Self {
            tracker: Tracker::new(config, now),
            now,
        }
    }

    /// Feeds a pointer event into the gesture tracker.
    pub fn update(&mut self, message: Message, now: Instant) -> Effect {
        self.now = now;
        let event = match message {
            Message::Pressed { x, track_max } => gesture::Event::Pressed { x, track_max },
            Message::Moved { x } => gesture::Event::Moved { x },
            Message::Released => gesture::Event::Released,
        };
        self.tracker.handle(event, now)
    }

    /// Advances animations and the post-confirmation reset timer.
    pub fn tick(&mut self, now: Instant) {
        self.now = now;
        self.tracker.handle(gesture::Event::Tick, now);
    }

    pub fn set_disabled(&mut self, disabled: bool, now: Instant) {
        self.now = now;
        self.tracker.set_disabled(disabled, now);
    }

    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.tracker.is_disabled()
    }

    /// Whether a redraw tick is needed to make visible progress.
    ///
    /// True in every phase except while disabled and at rest: the idle arrow
    /// oscillates, drags track the cursor, settles and cool-downs run timers.
    #[must_use]
    pub fn needs_tick(&self) -> bool {
        self.tracker.is_animating() || !self.tracker.is_disabled()
    }

    /// Renders the control. `label` invites the swipe; `confirmation`
    /// replaces it while the control sits in its confirmed state.
    pub fn view(&self, label: String, confirmation: String) -> Element<'static, Message> {
        let confirmed = self.tracker.is_confirmed();
        let disabled = self.tracker.is_disabled();

        let (content, alpha) = if confirmed {
            (confirmation, 1.0)
        } else {
            (label, self.tracker.label_opacity(self.now))
        };
        let label_color = if disabled {
            Color {
                a: alpha,
                ..palette::GRAY_400
            }
        } else {
            Color {
                a: alpha,
                ..palette::WHITE
            }
        };

        let track = Canvas::new(Track {
            offset: self.tracker.offset(self.now),
            progress: self.tracker.color_progress(self.now),
            arrow_dx: self.tracker.arrow_offset(self.now),
            dragging: self.tracker.is_dragging(),
            disabled,
        })
        .width(Length::Fill)
        .height(Length::Fixed(sizing::SWIPE_TRACK_HEIGHT));

        let caption = container(text(content).size(typography::BODY_LG).color(label_color))
            .width(Length::Fill)
            .height(Length::Fixed(sizing::SWIPE_TRACK_HEIGHT))
            .align_x(iced::alignment::Horizontal::Center)
            .align_y(iced::alignment::Vertical::Center);

        Stack::new().push(track).push(caption).into()
    }
}

/// Canvas program drawing the track, handle and chevrons.
///
/// The program carries a visual snapshot only; gesture state stays in the
/// tracker so that the canvas can be rebuilt on every view call.
struct Track {
    offset: f32,
    progress: f32,
    arrow_dx: f32,
    dragging: bool,
    disabled: bool,
}

impl Track {
    fn track_max(bounds: &Rectangle) -> f32 {
        (bounds.width - sizing::SWIPE_HANDLE_DIAMETER - 2.0 * sizing::SWIPE_HANDLE_INSET).max(0.0)
    }

    fn handle_center(&self, bounds: &Rectangle) -> Point {
        Point::new(
            sizing::SWIPE_HANDLE_INSET + self.offset + sizing::SWIPE_HANDLE_DIAMETER / 2.0,
            bounds.height / 2.0,
        )
    }

    fn is_over_handle(&self, position: Point, bounds: &Rectangle) -> bool {
        let center = self.handle_center(bounds);
        let radius = sizing::SWIPE_HANDLE_DIAMETER / 2.0;
        let dx = position.x - center.x;
        let dy = position.y - center.y;
        dx * dx + dy * dy <= radius * radius
    }
}

impl iced::widget::canvas::Program<Message> for Track {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: &iced::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<iced::widget::Action<Message>> {
        use iced::widget::Action;

        match event {
            // If cursor leaves the canvas, end any drag operation
            iced::Event::Mouse(mouse::Event::CursorLeft) => {
                if self.dragging {
                    return Some(Action::publish(Message::Released).and_capture());
                }
            }
            iced::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                if let Some(position) = cursor.position_in(bounds) {
                    if self.is_over_handle(position, &bounds) {
                        return Some(
                            Action::publish(Message::Pressed {
                                x: position.x,
                                track_max: Self::track_max(&bounds),
                            })
                            .and_capture(),
                        );
                    }
                }
            }
            iced::Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                if !self.dragging {
                    return None;
                }
                match cursor.position_in(bounds) {
                    Some(position) => {
                        return Some(
                            Action::publish(Message::Moved { x: position.x }).and_capture(),
                        );
                    }
                    // Dragging outside bounds ends the gesture.
                    None => {
                        return Some(Action::publish(Message::Released).and_capture());
                    }
                }
            }
            iced::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                if self.dragging {
                    return Some(Action::publish(Message::Released).and_capture());
                }
            }
            _ => {}
        }

        None
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &iced::Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<iced::widget::canvas::Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());

        let track_color = if self.disabled {
            palette::GRAY_700
        } else {
            mix(palette::TRACK_500, palette::SUCCESS_500, self.progress)
        };
        let pill = Path::rounded_rectangle(
            Point::ORIGIN,
            Size::new(bounds.width, bounds.height),
            (bounds.height / 2.0).into(),
        );
        frame.fill(&pill, track_color);

        let center = self.handle_center(&bounds);
        let radius = sizing::SWIPE_HANDLE_DIAMETER / 2.0;
        let handle_color = if self.disabled {
            palette::GRAY_200
        } else {
            palette::WHITE
        };
        frame.fill(&Path::circle(center, radius), handle_color);

        // Chevron pointing right, nudged by the idle oscillation.
        let chevron_color = if self.disabled {
            palette::GRAY_400
        } else {
            palette::BRAND_500
        };
        let tip = Point::new(center.x + 6.0 + self.arrow_dx, center.y);
        let chevron = Path::new(|builder| {
            builder.move_to(Point::new(tip.x - 8.0, tip.y - 8.0));
            builder.line_to(tip);
            builder.line_to(Point::new(tip.x - 8.0, tip.y + 8.0));
        });
        frame.stroke(
            &chevron,
            Stroke::default().with_width(3.0).with_color(chevron_color),
        );

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if self.disabled {
            return mouse::Interaction::default();
        }
        if self.dragging {
            return mouse::Interaction::Grabbing;
        }
        match cursor.position_in(bounds) {
            Some(position) if self.is_over_handle(position, &bounds) => mouse::Interaction::Grab,
            _ => mouse::Interaction::default(),
        }
    }
}
