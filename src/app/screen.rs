// SPDX-License-Identifier: MPL-2.0
//! Screen enumeration for application navigation.

/// Screens the user can navigate between.
///
/// Home is the navigation root; the other screens stack on top of it and
/// are left via the header back button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Web,
    Video,
}
