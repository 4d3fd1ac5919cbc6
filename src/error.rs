// SPDX-License-Identifier: MPL-2.0
use std::fmt;

/// Application-level error type.
///
/// The gesture core cannot fail; errors only arise at the boundaries
/// (config IO, network fetches, playlist parsing, notification scheduling)
/// and are surfaced to the user as one-shot error toasts.
#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Http(String),
    /// An `.m3u8` document could not be understood.
    Playlist(String),
    /// Scheduling was attempted while notifications are disabled.
    NotificationsDisabled,
}

impl Error {
    /// Returns the i18n message key describing this error to the user.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Error::Io(_) => "error-io",
            Error::Config(_) => "error-config",
            Error::Http(_) => "error-http",
            Error::Playlist(_) => "error-playlist",
            Error::NotificationsDisabled => "error-notifications-disabled",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Http(e) => write!(f, "HTTP Error: {}", e),
            Error::Playlist(e) => write!(f, "Playlist Error: {}", e),
            Error::NotificationsDisabled => {
                write!(f, "Notifications are disabled in the settings")
            }
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Http(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn playlist_error_formats_properly() {
        let err = Error::Playlist("missing #EXTM3U header".into());
        assert_eq!(format!("{}", err), "Playlist Error: missing #EXTM3U header");
    }

    #[test]
    fn every_variant_has_an_i18n_key() {
        let variants = [
            Error::Io(String::new()),
            Error::Config(String::new()),
            Error::Http(String::new()),
            Error::Playlist(String::new()),
            Error::NotificationsDisabled,
        ];
        for err in variants {
            assert!(err.i18n_key().starts_with("error-"));
        }
    }
}
