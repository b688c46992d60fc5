// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Image(String),
    Config(String),
    State(String),
    /// A slider name that is not part of the adjustment panel.
    UnknownAdjustment(String),
    /// A CSS filter expression that could not be parsed.
    InvalidFilter(String),
    /// A look name that matches neither a built-in nor a custom look.
    UnknownPreset(String),
    /// A malformed command-line or settings value.
    InvalidArgument(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Image(e) => write!(f, "Image Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::State(e) => write!(f, "State Error: {}", e),
            Error::UnknownAdjustment(name) => write!(f, "Unknown adjustment: {}", name),
            Error::InvalidFilter(e) => write!(f, "Invalid filter: {}", e),
            Error::UnknownPreset(name) => write!(f, "Unknown preset: {}", name),
            Error::InvalidArgument(e) => write!(f, "Invalid argument: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        Error::Image(err.to_string())
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

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Io(format!("JSON: {err}"))
    }
}

impl From<pico_args::Error> for Error {
    fn from(err: pico_args::Error) -> Self {
        Error::InvalidArgument(err.to_string())
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
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn toml_error_becomes_config_variant() {
        let parse = toml::from_str::<toml::Table>("not = valid = toml");
        let err: Error = parse.expect_err("invalid toml").into();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn unknown_adjustment_names_the_slider() {
        let err = Error::UnknownAdjustment("vibrance".into());
        assert_eq!(err.to_string(), "Unknown adjustment: vibrance");
    }

    #[test]
    fn invalid_filter_formats_properly() {
        let err = Error::InvalidFilter("glow(1)".into());
        assert_eq!(err.to_string(), "Invalid filter: glow(1)");
    }
}
