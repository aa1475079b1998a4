//! Argument collection
//!
//! Flags form the base candidate. At most one JSON overlay (stdin, or else the
//! `--input` file) is then merged over it, key by key, with the overlay winning.
//! The result is frozen into a [`CandidateArgs`] before validation sees it.

use crate::{
    error::{ConnectError, Result},
    Cli,
};
use serde::{de, Deserialize, Deserializer};
use serde_json::Value;
use std::path::PathBuf;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::debug;

/// Where overriding arguments are read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlaySource {
    Stdin,
    File(PathBuf),
}

impl OverlaySource {
    /// `--stdin` takes priority over `--input`; the other one is ignored
    pub fn from_cli(cli: &Cli) -> Option<Self> {
        if cli.stdin {
            Some(OverlaySource::Stdin)
        } else {
            cli.input.clone().map(OverlaySource::File)
        }
    }

    fn describe(&self) -> String {
        match self {
            OverlaySource::Stdin => "stdin".to_string(),
            OverlaySource::File(path) => path.display().to_string(),
        }
    }
}

/// Fields a JSON overlay may carry
///
/// The outer `Option` records whether the key was present at all; an explicit
/// `null` clears the field.
#[derive(Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ArgsOverlay {
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub name: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub app_id: Option<Option<String>>,
    /// Also accepts a bare JSON number such as `0.1`
    #[serde(default, deserialize_with = "text_or_number")]
    pub version: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub authoring_key: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub subscription_key: Option<Option<String>>,
}

impl ArgsOverlay {
    /// Parse an overlay document, which must be a single JSON object
    pub fn parse(text: &str, source_name: &str) -> Result<Self> {
        let parse_error = |source| ConnectError::Parse {
            source_name: source_name.to_string(),
            source,
        };
        let value: Value = serde_json::from_str(text).map_err(parse_error)?;
        if !value.is_object() {
            return Err(parse_error(de::Error::custom(
                "expected a JSON object",
            )));
        }
        serde_json::from_value(value).map_err(parse_error)
    }

    fn keys(&self) -> Vec<&'static str> {
        [
            ("name", self.name.is_some()),
            ("appId", self.app_id.is_some()),
            ("version", self.version.is_some()),
            ("authoringKey", self.authoring_key.is_some()),
            ("subscriptionKey", self.subscription_key.is_some()),
        ]
        .into_iter()
        .filter_map(|(key, present)| present.then_some(key))
        .collect()
    }
}

fn text_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(Some(None)),
        Value::String(text) => Ok(Some(Some(text))),
        Value::Number(number) => Ok(Some(Some(number.to_string()))),
        other => Err(de::Error::custom(format!(
            "expected a string or a number, found {other}"
        ))),
    }
}

/// Merged LUIS arguments, ready for validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateArgs {
    pub name: Option<String>,
    pub app_id: Option<String>,
    pub version: Option<String>,
    pub authoring_key: Option<String>,
    pub subscription_key: Option<String>,
}

/// Builds a [`CandidateArgs`] from flags plus one optional overlay
#[derive(Debug)]
pub struct CandidateBuilder {
    candidate: CandidateArgs,
}

impl CandidateBuilder {
    /// Start from the flag values; `name` falls back to the bot's own name
    pub fn from_flags(cli: &Cli, bot_name: &str) -> Self {
        CandidateBuilder {
            candidate: CandidateArgs {
                name: cli.name.clone().or_else(|| Some(bot_name.to_string())),
                app_id: cli.app_id.clone(),
                version: cli.version.clone(),
                authoring_key: cli.authoring_key.clone(),
                subscription_key: cli.subscription_key.clone(),
            },
        }
    }

    pub fn overlay(self, overlay: ArgsOverlay) -> Self {
        fn merge(slot: &mut Option<String>, incoming: Option<Option<String>>) {
            if let Some(value) = incoming {
                *slot = value;
            }
        }

        let mut candidate = self.candidate;
        merge(&mut candidate.name, overlay.name);
        merge(&mut candidate.app_id, overlay.app_id);
        merge(&mut candidate.version, overlay.version);
        merge(&mut candidate.authoring_key, overlay.authoring_key);
        merge(&mut candidate.subscription_key, overlay.subscription_key);
        CandidateBuilder { candidate }
    }

    pub fn finish(self) -> CandidateArgs {
        self.candidate
    }
}

/// Read and parse the overlay from `source`
///
/// `stdin` is only consumed when `source` is [`OverlaySource::Stdin`].
pub async fn read_overlay<R>(source: &OverlaySource, mut stdin: R) -> Result<ArgsOverlay>
where
    R: AsyncRead + Unpin,
{
    let source_name = source.describe();
    let read_error = |source| ConnectError::ReadInput {
        source_name: source_name.clone(),
        source,
    };
    let text = match source {
        OverlaySource::Stdin => {
            let mut text = String::new();
            stdin
                .read_to_string(&mut text)
                .await
                .map_err(read_error)?;
            text
        }
        OverlaySource::File(path) => tokio::fs::read_to_string(path)
            .await
            .map_err(read_error)?,
    };
    let overlay = ArgsOverlay::parse(&text, &source_name)?;
    debug!(source = %source_name, keys = ?overlay.keys(), "merging JSON arguments");
    Ok(overlay)
}

/// Collect the candidate arguments for one invocation
pub async fn collect<R>(cli: &Cli, bot_name: &str, stdin: R) -> Result<CandidateArgs>
where
    R: AsyncRead + Unpin,
{
    let builder = CandidateBuilder::from_flags(cli, bot_name);
    let builder = match OverlaySource::from_cli(cli) {
        Some(source) => builder.overlay(read_overlay(&source, stdin).await?),
        None => builder,
    };
    Ok(builder.finish())
}
