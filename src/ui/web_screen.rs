// SPDX-License-Identifier: MPL-2.0
//! Web experience screen.
//!
//! An address bar with back/forward/reload controls over the page model in
//! [`crate::web`], plus two demo buttons that schedule a reminder firing a
//! few seconds later.

use crate::i18n::I18n;
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::styles;
use crate::web::{Browser, PageState};
use iced::widget::{button, container, text, text_input, Column, Row};
use iced::{Element, Length};

/// Delay of the first demo reminder, in seconds.
pub const ACTION_A_DELAY_SECS: u64 = 3;
/// Delay of the second demo reminder, in seconds.
pub const ACTION_B_DELAY_SECS: u64 = 5;

/// State for the web screen.
pub struct State {
    pub browser: Browser,
}

impl State {
    #[must_use]
    pub fn new(home_url: String) -> Self {
        Self {
            browser: Browser::new(home_url),
        }
    }
}

/// Messages emitted by the web screen.
#[derive(Debug, Clone)]
pub enum Message {
    AddressChanged(String),
    Submit,
    Reload,
    Back,
    Forward,
    ActionA,
    ActionB,
    Loaded(Result<crate::web::PageInfo, String>),
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    None,
    /// The screen wants `url` fetched.
    Fetch(String),
    /// The in-flight fetch finished successfully.
    Loaded { title: Option<String> },
    /// The in-flight fetch failed.
    LoadFailed(String),
    /// A demo reminder should be scheduled.
    Schedule { delay_secs: u64 },
}

/// Process a web screen message and return the corresponding event.
pub fn update(state: &mut State, message: Message) -> Event {
    match message {
        Message::AddressChanged(address) => {
            state.browser.address = address;
            Event::None
        }
        Message::Submit => {
            let url = normalize_url(&state.browser.address);
            if url.is_empty() {
                return Event::None;
            }
            Event::Fetch(state.browser.navigate(url))
        }
        Message::Reload => match state.browser.reload() {
            Some(url) => Event::Fetch(url),
            None => Event::None,
        },
        Message::Back => match state.browser.go_back() {
            Some(url) => Event::Fetch(url),
            None => Event::None,
        },
        Message::Forward => match state.browser.go_forward() {
            Some(url) => Event::Fetch(url),
            None => Event::None,
        },
        Message::ActionA => Event::Schedule {
            delay_secs: ACTION_A_DELAY_SECS,
        },
        Message::ActionB => Event::Schedule {
            delay_secs: ACTION_B_DELAY_SECS,
        },
        Message::Loaded(result) => {
            let event = match &result {
                Ok(info) => Event::Loaded {
                    title: info.title.clone(),
                },
                Err(message) => Event::LoadFailed(message.clone()),
            };
            state.browser.finish(result);
            event
        }
    }
}

/// Prepends a scheme when the address bar holds a bare host.
fn normalize_url(address: &str) -> String {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

/// Contextual data needed to render the web screen.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
}

/// Render the web screen.
pub fn view<'a>(state: &'a State, ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let browser = &state.browser;

    let back = button(text("\u{2190}").size(typography::BODY))
        .on_press_maybe(browser.can_go_back().then_some(Message::Back))
        .style(styles::button::secondary);
    let forward = button(text("\u{2192}").size(typography::BODY))
        .on_press_maybe(browser.can_go_forward().then_some(Message::Forward))
        .style(styles::button::secondary);
    let reload = button(text("\u{27F3}").size(typography::BODY))
        .on_press(Message::Reload)
        .style(styles::button::secondary);

    let address_bar = text_input(&ctx.i18n.tr("web-address-placeholder"), &browser.address)
        .on_input(Message::AddressChanged)
        .on_submit(Message::Submit)
        .size(typography::BODY);

    let controls = Row::new()
        .spacing(spacing::XS)
        .push(back)
        .push(forward)
        .push(reload)
        .push(address_bar);

    let status: Element<'a, Message> = match browser.state() {
        PageState::Idle => text(ctx.i18n.tr("web-idle")).size(typography::BODY).into(),
        PageState::Loading => text(ctx.i18n.tr("web-loading"))
            .size(typography::BODY)
            .into(),
        PageState::Loaded(info) => {
            let title = info
                .title
                .clone()
                .unwrap_or_else(|| ctx.i18n.tr("web-untitled"));
            Column::new()
                .spacing(spacing::XS)
                .push(text(title).size(typography::TITLE_SM))
                .push(text(info.final_url.clone()).size(typography::CAPTION))
                .push(
                    text(ctx.i18n.tr_with_args(
                        "web-page-facts",
                        &[
                            ("status", &info.status.to_string()),
                            ("bytes", &info.body_bytes.to_string()),
                        ],
                    ))
                    .size(typography::BODY),
                )
                .into()
        }
        PageState::Failed(message) => text(
            ctx.i18n
                .tr_with_args("web-load-failed", &[("reason", message)]),
        )
        .size(typography::BODY)
        .into(),
    };

    let action_a = button(text(ctx.i18n.tr("web-action-a")).size(typography::BODY))
        .on_press(Message::ActionA)
        .style(styles::button::primary);
    let action_b = button(text(ctx.i18n.tr("web-action-b")).size(typography::BODY))
        .on_press(Message::ActionB)
        .style(styles::button::primary);

    let actions = Row::new()
        .spacing(spacing::SM)
        .push(action_a)
        .push(action_b);

    let content = Column::new()
        .spacing(spacing::LG)
        .push(controls)
        .push(
            container(status)
                .padding(spacing::MD)
                .width(Length::Fill)
                .height(Length::Fill)
                .style(styles::container::card),
        )
        .push(actions);

    container(content)
        .padding(spacing::LG)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::PageInfo;

    fn loaded(url: &str) -> PageInfo {
        PageInfo {
            final_url: url.to_string(),
            status: 200,
            body_bytes: 512,
            title: Some("Example".to_string()),
        }
    }

    #[test]
    fn submit_normalizes_bare_hosts() {
        let mut state = State::new("houseofedtech.in".to_string());
        assert_eq!(
            update(&mut state, Message::Submit),
            Event::Fetch("https://houseofedtech.in".to_string())
        );
    }

    #[test]
    fn submit_of_empty_address_is_ignored() {
        let mut state = State::new(String::new());
        assert_eq!(update(&mut state, Message::Submit), Event::None);
        assert!(!state.browser.is_loading());
    }

    #[test]
    fn finished_load_reports_the_title() {
        let mut state = State::new("https://a.example".to_string());
        update(&mut state, Message::Submit);

        let event = update(&mut state, Message::Loaded(Ok(loaded("https://a.example"))));
        assert_eq!(
            event,
            Event::Loaded {
                title: Some("Example".to_string())
            }
        );
    }

    #[test]
    fn failed_load_surfaces_the_reason() {
        let mut state = State::new("https://a.example".to_string());
        update(&mut state, Message::Submit);

        let event = update(&mut state, Message::Loaded(Err("timed out".to_string())));
        assert_eq!(event, Event::LoadFailed("timed out".to_string()));
        assert!(matches!(state.browser.state(), PageState::Failed(_)));
    }

    #[test]
    fn back_is_ignored_without_history() {
        let mut state = State::new("https://a.example".to_string());
        assert_eq!(update(&mut state, Message::Back), Event::None);
    }

    #[test]
    fn action_buttons_request_their_delays() {
        let mut state = State::new(String::new());
        assert_eq!(
            update(&mut state, Message::ActionA),
            Event::Schedule { delay_secs: 3 }
        );
        assert_eq!(
            update(&mut state, Message::ActionB),
            Event::Schedule { delay_secs: 5 }
        );
    }
}
