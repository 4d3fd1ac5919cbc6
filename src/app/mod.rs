// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the screens.
//!
//! The `App` struct wires together the domains (swipe-gated home sections,
//! web page fetches, HLS playback, notification scheduling) and translates
//! component events into side effects like network tasks or toast pushes.
//! Policy decisions (window size, navigation rules, notification routing)
//! stay close to the main update loop so user-facing behavior is easy to
//! audit.

mod message;
mod screen;
mod subscription;
mod view;

pub use message::{Flags, Message};
pub use screen::Screen;

use crate::config;
use crate::gesture;
use crate::i18n::I18n;
use crate::net;
use crate::notify;
use crate::player::Playback;
use crate::ui::notifications::{self, Notification, NotificationMessage};
use crate::ui::{home, video_screen, web_screen};
use crate::web::PageState;
use iced::{window, Element, Subscription, Task, Theme};
use std::time::{Duration, Instant};

/// Delay of the "website loaded" notification, in seconds.
const WEB_LOADED_DELAY_SECS: u64 = 2;

pub const WINDOW_DEFAULT_WIDTH: u32 = 480;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 800;
pub const MIN_WINDOW_WIDTH: u32 = 360;
pub const MIN_WINDOW_HEIGHT: u32 = 640;

/// Root Iced application state bridging UI components, localization, and
/// the notification scheduler.
pub struct App {
    pub i18n: I18n,
    nav: Vec<Screen>,
    home: home::State,
    web: web_screen::State,
    video: video_screen::State,
    scheduler: notify::Scheduler,
    notifications: notifications::Manager,
    home_url: String,
}

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce)
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Initializes application state from config and CLI flags.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let now = Instant::now();

        let config = match &flags.config_dir {
            Some(dir) => config::load_from_path(&config::path_in(std::path::Path::new(dir))),
            None => config::load(),
        }
        .unwrap_or_default();

        let i18n = I18n::new(flags.lang, flags.i18n_dir, &config);

        let gesture_config = gesture::Config {
            threshold_fraction: config
                .threshold_fraction
                .unwrap_or(config::DEFAULT_THRESHOLD_FRACTION),
            reset_delay: Duration::from_millis(
                config.reset_delay_ms.unwrap_or(config::DEFAULT_RESET_DELAY_MS),
            ),
        };

        let notifications_enabled = config.notifications_enabled.unwrap_or(true);
        let home_url = flags
            .start_url
            .or_else(|| config.home_url.clone())
            .unwrap_or_else(|| config::DEFAULT_HOME_URL.to_string());

        let mut home = home::State::new(gesture_config, now);
        home.set_notifications_enabled(notifications_enabled, now);

        let app = App {
            i18n,
            nav: vec![Screen::Home],
            home,
            web: web_screen::State::new(home_url.clone()),
            video: video_screen::State::new(config.video_autoplay.unwrap_or(false)),
            scheduler: notify::Scheduler::new(notifications_enabled),
            notifications: notifications::Manager::new(),
            home_url,
        };

        (app, Task::none())
    }

    fn title(&self) -> String {
        self.i18n.tr("app-title")
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn screen(&self) -> Screen {
        *self.nav.last().unwrap_or(&Screen::Home)
    }

    fn subscription(&self) -> Subscription<Message> {
        let animating = self.screen() == Screen::Home && self.home.needs_tick();
        let timers_pending =
            self.notifications.has_notifications() || self.scheduler.has_pending();

        subscription::create_tick_subscription(
            animating,
            timers_pending,
            self.video.player.is_playing(),
        )
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let now = Instant::now();

        match message {
            Message::Home(home_message) => {
                match home::update(&mut self.home, home_message, now) {
                    home::Event::None => Task::none(),
                    home::Event::Activated(action) => self.handle_home_action(action, now),
                }
            }
            Message::Web(web_message) => {
                match web_screen::update(&mut self.web, web_message) {
                    web_screen::Event::None => Task::none(),
                    web_screen::Event::Fetch(url) => fetch_page(url),
                    web_screen::Event::Loaded { title } => {
                        let body = match title {
                            Some(title) => self
                                .i18n
                                .tr_with_args("web-loaded-body-titled", &[("title", &title)]),
                            None => self.i18n.tr("web-loaded-body"),
                        };
                        self.schedule_reminder(
                            self.i18n.tr("web-loaded-title"),
                            body,
                            WEB_LOADED_DELAY_SECS,
                            Some(Screen::Web),
                            now,
                        );
                        Task::none()
                    }
                    web_screen::Event::LoadFailed(reason) => {
                        self.notifications.push(
                            Notification::error("web-load-failed").with_arg("reason", reason),
                        );
                        Task::none()
                    }
                    web_screen::Event::Schedule { delay_secs } => {
                        let scheduled = self.schedule_reminder(
                            self.i18n.tr("web-reminder-title"),
                            self.i18n.tr_with_args(
                                "web-reminder-body",
                                &[("seconds", &delay_secs.to_string())],
                            ),
                            delay_secs,
                            Some(Screen::Web),
                            now,
                        );
                        if scheduled {
                            self.notifications.push(
                                Notification::success("web-reminder-scheduled")
                                    .with_arg("seconds", delay_secs.to_string()),
                            );
                        }
                        Task::none()
                    }
                }
            }
            Message::Video(video_message) => {
                match video_screen::update(&mut self.video, video_message) {
                    video_screen::Event::None => Task::none(),
                    video_screen::Event::Load { index, url } => fetch_stream(index, url),
                    video_screen::Event::FirstLoaded { name } => {
                        self.schedule_reminder(
                            self.i18n.tr("video-loaded-title"),
                            self.i18n.tr_with_args("video-loaded-body", &[("name", name)]),
                            notify::MIN_DELAY_SECS,
                            Some(Screen::Video),
                            now,
                        );
                        Task::none()
                    }
                    video_screen::Event::LoadFailed(reason) => {
                        self.notifications.push(
                            Notification::error("video-load-failed").with_arg("reason", reason),
                        );
                        Task::none()
                    }
                }
            }
            Message::Navigate(screen) => self.navigate_to(screen),
            Message::NavigateBack => {
                if self.nav.len() > 1 {
                    self.nav.pop();
                }
                Task::none()
            }
            Message::Notification(notification_message) => {
                match notification_message {
                    NotificationMessage::Dismiss(id) => {
                        self.notifications.dismiss(id);
                        Task::none()
                    }
                    NotificationMessage::Activate(id) => {
                        let target = self.notifications.find(id).and_then(Notification::target);
                        self.notifications.dismiss(id);
                        match target {
                            Some(screen) => self.navigate_to(screen),
                            None => Task::none(),
                        }
                    }
                    NotificationMessage::Tick => {
                        self.notifications.tick();
                        Task::none()
                    }
                }
            }
            Message::Tick(now) => {
                self.home.tick(now);

                for delivered in self.scheduler.tick(now) {
                    let mut notification =
                        Notification::delivered(delivered.title, delivered.body);
                    if let Some(target) = delivered.target {
                        notification = notification.with_target(target);
                    }
                    self.notifications.push(notification);
                }

                self.notifications.tick();
                Task::none()
            }
            Message::PlaybackTick => {
                self.video.player.tick_second();
                Task::none()
            }
        }
    }

    /// Reacts to a completed home swipe.
    fn handle_home_action(&mut self, action: home::Action, now: Instant) -> Task<Message> {
        match action {
            home::Action::OpenWeb => self.navigate_to(Screen::Web),
            home::Action::PlayVideo => self.navigate_to(Screen::Video),
            home::Action::ScheduleTest => {
                self.schedule_reminder(
                    self.i18n.tr("notify-test-title"),
                    self.i18n.tr("notify-test-body"),
                    5,
                    None,
                    now,
                );
                Task::none()
            }
        }
    }

    /// Pushes `screen` and kicks off its initial load when needed.
    fn navigate_to(&mut self, screen: Screen) -> Task<Message> {
        if self.screen() != screen {
            self.nav.push(screen);
        }
        match screen {
            Screen::Web if matches!(self.web.browser.state(), PageState::Idle) => {
                let url = self.web.browser.navigate(self.home_url.clone());
                fetch_page(url)
            }
            Screen::Video if matches!(self.video.player.playback(), Playback::Idle) => {
                match video_screen::begin_load(&mut self.video) {
                    video_screen::Event::Load { index, url } => fetch_stream(index, url),
                    _ => Task::none(),
                }
            }
            _ => Task::none(),
        }
    }

    /// Schedules a reminder; a refusal surfaces as an error toast.
    ///
    /// Returns whether the reminder was accepted.
    fn schedule_reminder(
        &mut self,
        title: String,
        body: String,
        delay_secs: u64,
        target: Option<Screen>,
        now: Instant,
    ) -> bool {
        match self
            .scheduler
            .schedule(title, body, delay_secs, target, now)
        {
            Ok(_) => true,
            Err(error) => {
                self.notifications
                    .push(Notification::error(error.i18n_key()));
                false
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            screen: self.screen(),
            can_go_back: self.nav.len() > 1,
            home: &self.home,
            web: &self.web,
            video: &self.video,
            notifications: &self.notifications,
        })
    }
}

fn fetch_page(url: String) -> Task<Message> {
    Task::perform(net::load_page(url), |result| {
        Message::Web(web_screen::Message::Loaded(
            result.map_err(|e| e.to_string()),
        ))
    })
}

fn fetch_stream(index: usize, url: &'static str) -> Task<Message> {
    Task::perform(net::load_stream(url.to_string()), move |result| {
        Message::Video(video_screen::Message::Loaded {
            index,
            result: result.map_err(|e| e.to_string()),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::StreamInfo;
    use crate::ui::swipe_confirm;

    fn new_app() -> App {
        let (app, _task) = App::new(Flags {
            config_dir: Some("/nonexistent/slidekick-test-config".to_string()),
            ..Flags::default()
        });
        app
    }

    fn complete_swipe(app: &mut App, section: usize) {
        let _ = app.update(Message::Home(home::Message::Swipe(
            section,
            swipe_confirm::Message::Pressed {
                x: 28.0,
                track_max: 400.0,
            },
        )));
        let _ = app.update(Message::Home(home::Message::Swipe(
            section,
            swipe_confirm::Message::Moved { x: 400.0 },
        )));
        let _ = app.update(Message::Home(home::Message::Swipe(
            section,
            swipe_confirm::Message::Released,
        )));
    }

    #[test]
    fn starts_on_the_home_screen() {
        let app = new_app();
        assert_eq!(app.screen(), Screen::Home);
        assert!(app.nav.len() == 1);
    }

    #[test]
    fn completed_web_swipe_navigates_and_starts_a_fetch() {
        let mut app = new_app();
        complete_swipe(&mut app, 0);

        assert_eq!(app.screen(), Screen::Web);
        assert!(app.web.browser.is_loading());
    }

    #[test]
    fn completed_video_swipe_navigates_and_starts_a_load() {
        let mut app = new_app();
        complete_swipe(&mut app, 1);

        assert_eq!(app.screen(), Screen::Video);
        assert!(matches!(
            app.video.player.playback(),
            crate::player::Playback::Loading
        ));
    }

    #[test]
    fn back_pops_to_home_but_never_past_it() {
        let mut app = new_app();
        complete_swipe(&mut app, 0);
        assert_eq!(app.screen(), Screen::Web);

        let _ = app.update(Message::NavigateBack);
        assert_eq!(app.screen(), Screen::Home);

        let _ = app.update(Message::NavigateBack);
        assert_eq!(app.screen(), Screen::Home);
    }

    #[test]
    fn notification_swipe_schedules_a_test_reminder() {
        let mut app = new_app();
        complete_swipe(&mut app, 2);

        assert_eq!(app.screen(), Screen::Home);
        assert_eq!(app.scheduler.pending().len(), 1);
    }

    #[test]
    fn delivered_reminder_becomes_a_toast_with_target() {
        let mut app = new_app();
        let t0 = Instant::now();
        app.scheduler
            .schedule("Title", "Body", 1, Some(Screen::Video), t0)
            .expect("scheduling should succeed");

        let _ = app.update(Message::Tick(t0 + Duration::from_secs(2)));

        let toast = app
            .notifications
            .visible()
            .next()
            .expect("a toast should be visible");
        assert_eq!(toast.target(), Some(Screen::Video));
    }

    #[test]
    fn activating_a_targeted_toast_navigates() {
        let mut app = new_app();
        app.notifications
            .push(Notification::delivered("Title", "Body").with_target(Screen::Video));
        let id = app
            .notifications
            .visible()
            .next()
            .expect("toast should be visible")
            .id();

        let _ = app.update(Message::Notification(NotificationMessage::Activate(id)));

        assert_eq!(app.screen(), Screen::Video);
        assert_eq!(app.notifications.visible_count(), 0);
    }

    #[test]
    fn first_stream_load_schedules_a_reminder() {
        let mut app = new_app();
        complete_swipe(&mut app, 1);

        let _ = app.update(Message::Video(video_screen::Message::Loaded {
            index: 0,
            result: Ok(StreamInfo {
                variants: vec![],
                duration_secs: 60.0,
            }),
        }));

        assert_eq!(app.scheduler.pending().len(), 1);
    }

    #[test]
    fn loaded_page_schedules_a_delayed_notification() {
        let mut app = new_app();
        complete_swipe(&mut app, 0);

        let _ = app.update(Message::Web(web_screen::Message::Loaded(Ok(
            crate::web::PageInfo {
                final_url: "https://a.example".to_string(),
                status: 200,
                body_bytes: 512,
                title: Some("Example".to_string()),
            },
        ))));

        assert_eq!(app.scheduler.pending().len(), 1);
        assert_eq!(app.scheduler.pending()[0].target, Some(Screen::Web));
    }

    #[test]
    fn demo_reminder_buttons_confirm_with_a_toast() {
        let mut app = new_app();
        complete_swipe(&mut app, 0);

        let _ = app.update(Message::Web(web_screen::Message::ActionA));

        assert_eq!(app.scheduler.pending().len(), 1);
        assert_eq!(app.notifications.visible_count(), 1);
    }

    #[test]
    fn failed_page_load_shows_an_error_toast() {
        let mut app = new_app();
        complete_swipe(&mut app, 0);

        let _ = app.update(Message::Web(web_screen::Message::Loaded(Err(
            "timed out".to_string()
        ))));

        assert!(app.notifications.has_notifications());
    }

    #[test]
    fn playback_tick_advances_a_playing_stream() {
        let mut app = new_app();
        complete_swipe(&mut app, 1);
        let _ = app.update(Message::Video(video_screen::Message::Loaded {
            index: 0,
            result: Ok(StreamInfo {
                variants: vec![],
                duration_secs: 60.0,
            }),
        }));
        let _ = app.update(Message::Video(video_screen::Message::PlayPause));

        let _ = app.update(Message::PlaybackTick);
        let _ = app.update(Message::PlaybackTick);

        assert_eq!(app.video.player.position_secs(), 2.0);
    }
}
