// SPDX-License-Identifier: MPL-2.0
//! Video screen: stream picker and transport over the playback model.

use crate::i18n::I18n;
use crate::player::{
    self, format_time, LoadOutcome, Playback, Player, StreamInfo, SEEK_STEP_SECS, SKIP_STEP_SECS,
};
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::styles;
use iced::widget::{button, container, text, Column, Row};
use iced::{Element, Length};

/// State for the video screen.
pub struct State {
    pub player: Player,
}

impl State {
    #[must_use]
    pub fn new(autoplay: bool) -> Self {
        Self {
            player: Player::new(autoplay),
        }
    }
}

/// Messages emitted by the video screen.
#[derive(Debug, Clone)]
pub enum Message {
    PlayPause,
    SeekForward,
    SeekBackward,
    SkipForward,
    SkipBackward,
    ToggleMute,
    SelectStream(usize),
    Loaded {
        index: usize,
        result: Result<StreamInfo, String>,
    },
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    None,
    /// The screen wants the stream at `index` fetched from `url`.
    Load { index: usize, url: &'static str },
    /// A stream finished loading for the first time this session.
    FirstLoaded { name: &'static str },
    /// The in-flight load failed.
    LoadFailed(String),
}

/// Starts loading the current stream; used when the screen is entered.
pub fn begin_load(state: &mut State) -> Event {
    let index = state.player.current_index();
    Event::Load {
        index,
        url: state.player.begin_load(),
    }
}

/// Process a video screen message and return the corresponding event.
pub fn update(state: &mut State, message: Message) -> Event {
    match message {
        Message::PlayPause => {
            state.player.toggle_play();
            Event::None
        }
        Message::SeekForward => {
            state.player.seek_by(SEEK_STEP_SECS);
            Event::None
        }
        Message::SeekBackward => {
            state.player.seek_by(-SEEK_STEP_SECS);
            Event::None
        }
        Message::SkipForward => {
            state.player.seek_by(SKIP_STEP_SECS);
            Event::None
        }
        Message::SkipBackward => {
            state.player.seek_by(-SKIP_STEP_SECS);
            Event::None
        }
        Message::ToggleMute => {
            state.player.toggle_mute();
            Event::None
        }
        Message::SelectStream(index) => {
            if state.player.switch_stream(index) {
                begin_load(state)
            } else {
                Event::None
            }
        }
        Message::Loaded { index, result } => {
            let failure = result.as_ref().err().cloned();
            match state.player.finish_load(index, result) {
                LoadOutcome::FirstLoad { name } => Event::FirstLoaded { name },
                LoadOutcome::Failed => {
                    Event::LoadFailed(failure.unwrap_or_else(|| "load failed".to_string()))
                }
                LoadOutcome::Reloaded | LoadOutcome::Stale => Event::None,
            }
        }
    }
}

/// Contextual data needed to render the video screen.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
}

/// Render the video screen.
pub fn view<'a>(state: &'a State, ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let player = &state.player;

    // Stream picker
    let mut picker = Row::new().spacing(spacing::XS);
    for (index, stream) in player::STREAMS.iter().enumerate() {
        let is_current = index == player.current_index();
        picker = picker.push(
            button(text(stream.name).size(typography::BODY))
                .on_press_maybe((!is_current).then_some(Message::SelectStream(index)))
                .style(if is_current {
                    styles::button::primary
                } else {
                    styles::button::secondary
                }),
        );
    }

    let status: Element<'a, Message> = match player.playback() {
        Playback::Idle => text(ctx.i18n.tr("video-idle")).size(typography::BODY).into(),
        Playback::Loading => text(ctx.i18n.tr("video-loading"))
            .size(typography::BODY)
            .into(),
        Playback::Failed(message) => text(
            ctx.i18n
                .tr_with_args("video-load-failed", &[("reason", message)]),
        )
        .size(typography::BODY)
        .into(),
        Playback::Ready { info, .. } => {
            let mut lines = Column::new().spacing(spacing::XS).push(
                text(format!(
                    "{} / {}",
                    format_time(player.position_secs()),
                    format_time(info.duration_secs)
                ))
                .size(typography::TITLE_MD),
            );
            if !info.variants.is_empty() {
                lines = lines.push(
                    text(
                        ctx.i18n.tr_with_args(
                            "video-variant-count",
                            &[("count", &info.variants.len().to_string())],
                        ),
                    )
                    .size(typography::CAPTION),
                );
            }
            lines.into()
        }
    };

    let transport_enabled = matches!(player.playback(), Playback::Ready { .. });
    let transport_button = |label: String, message: Message| {
        button(text(label).size(typography::BODY))
            .on_press_maybe(transport_enabled.then_some(message))
            .style(styles::button::secondary)
    };

    let play_label = if player.is_playing() {
        ctx.i18n.tr("video-pause")
    } else {
        ctx.i18n.tr("video-play")
    };
    let mute_label = if player.is_muted() {
        ctx.i18n.tr("video-unmute")
    } else {
        ctx.i18n.tr("video-mute")
    };

    let transport = Row::new()
        .spacing(spacing::XS)
        .push(transport_button("\u{21E4}30".to_string(), Message::SkipBackward))
        .push(transport_button("-10".to_string(), Message::SeekBackward))
        .push(
            button(text(play_label).size(typography::BODY))
                .on_press_maybe(transport_enabled.then_some(Message::PlayPause))
                .style(styles::button::primary),
        )
        .push(transport_button("+10".to_string(), Message::SeekForward))
        .push(transport_button("30\u{21E5}".to_string(), Message::SkipForward))
        .push(
            button(text(mute_label).size(typography::BODY))
                .on_press(Message::ToggleMute)
                .style(styles::button::secondary),
        );

    let content = Column::new()
        .spacing(spacing::LG)
        .push(text(player.current_stream().name).size(typography::TITLE_SM))
        .push(picker)
        .push(
            container(status)
                .padding(spacing::MD)
                .width(Length::Fill)
                .height(Length::Fill)
                .style(styles::container::card),
        )
        .push(transport);

    container(content)
        .padding(spacing::LG)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
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

    #[test]
    fn entering_the_screen_requests_the_current_stream() {
        let mut state = State::new(false);
        let event = begin_load(&mut state);
        assert_eq!(
            event,
            Event::Load {
                index: 0,
                url: player::STREAMS[0].url
            }
        );
    }

    #[test]
    fn first_load_bubbles_up_for_notification() {
        let mut state = State::new(false);
        begin_load(&mut state);

        let event = update(
            &mut state,
            Message::Loaded {
                index: 0,
                result: Ok(info(60.0)),
            },
        );
        assert_eq!(
            event,
            Event::FirstLoaded {
                name: "Big Buck Bunny"
            }
        );
    }

    #[test]
    fn reload_does_not_renotify() {
        let mut state = State::new(false);
        begin_load(&mut state);
        update(
            &mut state,
            Message::Loaded {
                index: 0,
                result: Ok(info(60.0)),
            },
        );

        begin_load(&mut state);
        let event = update(
            &mut state,
            Message::Loaded {
                index: 0,
                result: Ok(info(60.0)),
            },
        );
        assert_eq!(event, Event::None);
    }

    #[test]
    fn selecting_a_stream_starts_its_load() {
        let mut state = State::new(false);
        let event = update(&mut state, Message::SelectStream(1));
        assert_eq!(
            event,
            Event::Load {
                index: 1,
                url: player::STREAMS[1].url
            }
        );

        // Re-selecting the current stream is a no-op.
        assert_eq!(update(&mut state, Message::SelectStream(1)), Event::None);
    }

    #[test]
    fn failed_load_reports_the_reason() {
        let mut state = State::new(false);
        begin_load(&mut state);

        let event = update(
            &mut state,
            Message::Loaded {
                index: 0,
                result: Err("dns failure".to_string()),
            },
        );
        assert_eq!(event, Event::LoadFailed("dns failure".to_string()));
    }

    #[test]
    fn transport_messages_drive_the_player() {
        let mut state = State::new(false);
        begin_load(&mut state);
        update(
            &mut state,
            Message::Loaded {
                index: 0,
                result: Ok(info(100.0)),
            },
        );

        update(&mut state, Message::SeekForward);
        update(&mut state, Message::SkipForward);
        assert_eq!(state.player.position_secs(), 40.0);

        update(&mut state, Message::ToggleMute);
        assert!(state.player.is_muted());
    }
}
