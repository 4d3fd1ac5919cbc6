// SPDX-License-Identifier: MPL-2.0
//! Home screen: a list of swipe-gated sections.
//!
//! Each section describes a feature and guards it behind a swipe-to-confirm
//! control, so a stray tap never triggers navigation or scheduling.

use crate::gesture::{self, Effect};
use crate::i18n::I18n;
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::styles;
use crate::ui::swipe_confirm;
use iced::widget::{container, scrollable, text, Column};
use iced::{Element, Length};
use std::time::Instant;

/// What a section unlocks when its swipe completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    OpenWeb,
    PlayVideo,
    ScheduleTest,
}

impl Action {
    const ALL: [Action; 3] = [Action::OpenWeb, Action::PlayVideo, Action::ScheduleTest];

    fn title_key(self) -> &'static str {
        match self {
            Action::OpenWeb => "home-web-title",
            Action::PlayVideo => "home-video-title",
            Action::ScheduleTest => "home-notify-title",
        }
    }

    fn description_key(self) -> &'static str {
        match self {
            Action::OpenWeb => "home-web-desc",
            Action::PlayVideo => "home-video-desc",
            Action::ScheduleTest => "home-notify-desc",
        }
    }

    fn slider_key(self) -> &'static str {
        match self {
            Action::OpenWeb => "home-web-slider",
            Action::PlayVideo => "home-video-slider",
            Action::ScheduleTest => "home-notify-slider",
        }
    }
}

struct Section {
    action: Action,
    swipe: swipe_confirm::State,
}

/// State for the home screen.
pub struct State {
    sections: Vec<Section>,
}

impl State {
    #[must_use]
    pub fn new(config: gesture::Config, now: Instant) -> Self {
        Self {
            sections: Action::ALL
                .into_iter()
                .map(|action| Section {
                    action,
                    swipe: swipe_confirm::State::new(config, now),
                })
                .collect(),
        }
    }

    /// Advances the swipe animations of every section.
    pub fn tick(&mut self, now: Instant) {
        for section in &mut self.sections {
            section.swipe.tick(now);
        }
    }

    /// Grays out the notification section while scheduling is not permitted.
    pub fn set_notifications_enabled(&mut self, enabled: bool, now: Instant) {
        for section in &mut self.sections {
            if section.action == Action::ScheduleTest {
                section.swipe.set_disabled(!enabled, now);
            }
        }
    }

    #[must_use]
    pub fn needs_tick(&self) -> bool {
        self.sections.iter().any(|s| s.swipe.needs_tick())
    }
}

/// Messages emitted by the home screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Message {
    Swipe(usize, swipe_confirm::Message),
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    None,
    /// A section's swipe completed.
    Activated(Action),
}

/// Contextual data needed to render the home screen.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
}

/// Process a home screen message and return the corresponding event.
pub fn update(state: &mut State, message: Message, now: Instant) -> Event {
    match message {
        Message::Swipe(index, swipe_message) => {
            let Some(section) = state.sections.get_mut(index) else {
                return Event::None;
            };
            match section.swipe.update(swipe_message, now) {
                Effect::Completed => Event::Activated(section.action),
                Effect::None => Event::None,
            }
        }
    }
}

/// Render the home screen.
pub fn view<'a>(state: &'a State, ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let title = text(ctx.i18n.tr("home-title")).size(typography::TITLE_LG);

    let mut sections = Column::new().spacing(spacing::LG).push(title);

    for (index, section) in state.sections.iter().enumerate() {
        let card = Column::new()
            .spacing(spacing::SM)
            .push(text(ctx.i18n.tr(section.action.title_key())).size(typography::TITLE_SM))
            .push(text(ctx.i18n.tr(section.action.description_key())).size(typography::BODY))
            .push(
                section
                    .swipe
                    .view(
                        ctx.i18n.tr(section.action.slider_key()),
                        ctx.i18n.tr("swipe-confirmed"),
                    )
                    .map(move |m| Message::Swipe(index, m)),
            );

        sections = sections.push(
            container(card)
                .padding(spacing::MD)
                .width(Length::Fill)
                .style(styles::container::card),
        );
    }

    scrollable(
        container(sections)
            .padding(spacing::LG)
            .width(Length::Fill),
    )
    .into()
}
