// SPDX-License-Identifier: MPL-2.0
//! User interface components and screens.

pub mod design_tokens;
pub mod home;
pub mod notifications;
pub mod styles;
pub mod swipe_confirm;
pub mod video_screen;
pub mod web_screen;
