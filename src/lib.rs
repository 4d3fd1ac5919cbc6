// SPDX-License-Identifier: MPL-2.0
//! `slidekick` is a mobile-style demo shell built with the Iced GUI framework.
//!
//! Its home screen guards every feature behind a swipe-to-confirm control;
//! completing a swipe opens a web experience screen, an HLS stream inspector,
//! or schedules a local notification. The app demonstrates gesture state
//! machines, stack navigation, internationalization with Fluent, and user
//! preference management.

#![doc(html_root_url = "https://docs.rs/slidekick/0.1.0")]

pub mod app;
pub mod config;
pub mod error;
pub mod gesture;
pub mod hls;
pub mod i18n;
pub mod net;
pub mod notify;
pub mod player;
pub mod ui;
pub mod web;
