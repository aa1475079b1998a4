use std::{fmt, io, path::PathBuf};
use thiserror::Error;

/// Argument that failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    AppId,
    Version,
    AuthoringKey,
    SubscriptionKey,
}

impl Field {
    /// Flag spelling of the field, as accepted on the command line and in JSON input
    pub fn flag(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::AppId => "appId",
            Field::Version => "version",
            Field::AuthoringKey => "authoringKey",
            Field::SubscriptionKey => "subscriptionKey",
        }
    }

    // `name` keeps its historical capitalised message.
    fn bad(self) -> &'static str {
        match self {
            Field::Name => "Bad",
            _ => "bad",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.flag())
    }
}

/// Everything that can abort `connect luis`
#[derive(Error, Debug)]
pub enum ConnectError {
    #[error("could not load bot file {}: {reason}", .path.display())]
    Load { path: PathBuf, reason: String },

    #[error(
        "no bot file found in {}. Choose a different location or use --bot to point at a .bot file",
        .dir.display()
    )]
    BotFileNotFound { dir: PathBuf },

    #[error("could not read {source_name}: {source}")]
    ReadInput {
        source_name: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON in {source_name}: {source}")]
    Parse {
        source_name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{bad} or missing --{0}", bad = .0.bad())]
    MissingField(Field),

    #[error("bad or missing --{0}")]
    InvalidField(Field),

    #[error("could not save bot file {}: {reason}", .path.display())]
    Store { path: PathBuf, reason: String },
}

impl ConnectError {
    pub(crate) fn load(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        ConnectError::Load {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn store(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        ConnectError::Store {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// The single diagnostic line shown to the user
    pub fn headline(&self) -> String {
        self.to_string()
            .lines()
            .next()
            .unwrap_or_default()
            .to_string()
    }
}

pub type Result<T> = std::result::Result<T, ConnectError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_messages_use_flag_names() {
        assert_eq!(
            ConnectError::MissingField(Field::Name).to_string(),
            "Bad or missing --name"
        );
        assert_eq!(
            ConnectError::InvalidField(Field::AuthoringKey).to_string(),
            "bad or missing --authoringKey"
        );
    }

    #[test]
    fn test_missing_and_invalid_read_the_same_except_for_name() {
        for field in [Field::AppId, Field::Version, Field::AuthoringKey] {
            assert_eq!(
                ConnectError::MissingField(field).to_string(),
                ConnectError::InvalidField(field).to_string()
            );
        }
        assert_eq!(
            ConnectError::MissingField(Field::AppId).to_string(),
            "bad or missing --appId"
        );
    }

    #[test]
    fn test_bot_file_not_found_names_the_folder() {
        let err = ConnectError::BotFileNotFound {
            dir: PathBuf::from("/work/bots"),
        };
        assert!(err.headline().starts_with("no bot file found in /work/bots."));
    }

    #[test]
    fn test_headline_keeps_first_line_only() {
        let err = ConnectError::load("my.bot", "line one\nline two");
        assert_eq!(err.headline(), "could not load bot file my.bot: line one");
    }
}
