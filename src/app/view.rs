// SPDX-License-Identifier: MPL-2.0
//! Top-level view composition: header, current screen, toast overlay.

use super::{Message, Screen};
use crate::i18n::I18n;
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::notifications::{Manager, Toast};
use crate::ui::styles;
use crate::ui::{home, video_screen, web_screen};
use iced::widget::{button, container, text, Column, Row, Stack};
use iced::{Element, Length};

/// Everything the top-level view needs to render, borrowed from `App`.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub screen: Screen,
    pub can_go_back: bool,
    pub home: &'a home::State,
    pub web: &'a web_screen::State,
    pub video: &'a video_screen::State,
    pub notifications: &'a Manager,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let body: Element<'_, Message> = match ctx.screen {
        Screen::Home => home::view(ctx.home, &home::ViewContext { i18n: ctx.i18n }).map(Message::Home),
        Screen::Web => {
            web_screen::view(ctx.web, &web_screen::ViewContext { i18n: ctx.i18n }).map(Message::Web)
        }
        Screen::Video => {
            video_screen::view(ctx.video, &video_screen::ViewContext { i18n: ctx.i18n })
                .map(Message::Video)
        }
    };

    let mut column = Column::new();
    if ctx.can_go_back {
        column = column.push(header(&ctx));
    }
    column = column.push(body);

    let toasts = Toast::view_overlay(ctx.notifications, ctx.i18n).map(Message::Notification);

    Stack::new()
        .push(container(column).width(Length::Fill).height(Length::Fill))
        .push(toasts)
        .into()
}

fn header<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let title_key = match ctx.screen {
        Screen::Home => "app-title",
        Screen::Web => "web-title",
        Screen::Video => "video-title",
    };

    let back = button(text("\u{2190}").size(typography::BODY))
        .on_press(Message::NavigateBack)
        .style(styles::button::secondary);

    let bar = Row::new()
        .spacing(spacing::SM)
        .align_y(iced::alignment::Vertical::Center)
        .push(back)
        .push(text(ctx.i18n.tr(title_key)).size(typography::TITLE_MD));

    container(bar)
        .padding(spacing::SM)
        .width(Length::Fill)
        .style(styles::container::header)
        .into()
}
