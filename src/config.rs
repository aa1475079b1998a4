//! Bot configuration store
//!
//! This module loads, decrypts, mutates and saves `.bot` documents:
//! - Locating the document from an explicit path or by scanning a folder
//! - Decrypting secret-bearing service properties with the bot file secret
//! - Appending connected services
//! - Writing the document back, re-encrypting secrets in the written copy
//!
//! ## Document Format
//!
//! ```json
//! {
//!   "name": "MyBot",
//!   "description": "",
//!   "secretKey": "<encrypted marker, present once a secret is set>",
//!   "services": [
//!     { "type": "luis", "name": "Weather", "id": "...", "appId": "...", "version": "v0.1" }
//!   ]
//! }
//! ```
//!
//! Keys this tool does not understand are carried through a load/save cycle unchanged.

use crate::{
    constants::{BOT_FILE_EXTENSION, SECRET_KEY_MARKER},
    crypto,
    error::{ConnectError, Result},
    schema::ConnectedService,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// The operations the connect pipeline needs from a configuration store
#[async_trait]
pub trait ServiceStore {
    /// Append a service to the connected-services list. Existing entries with
    /// the same name are left alone.
    fn connect_service(&mut self, service: ConnectedService);

    /// Persist the store
    async fn save(&mut self) -> Result<()>;
}

/// On-disk shape of a `.bot` file
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct BotDocument {
    /// Display name of the bot
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Encrypted marker proving which secret the document was written with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,
    #[serde(default)]
    pub services: Vec<ConnectedService>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A loaded bot file, with secrets held in plaintext
#[derive(Debug)]
pub struct BotConfig {
    document: BotDocument,
    location: PathBuf,
    secret: Option<String>,
}

impl BotConfig {
    /// Create an in-memory bot file that will be written to `location` on save
    pub fn new(name: impl Into<String>, location: impl Into<PathBuf>) -> Self {
        BotConfig {
            document: BotDocument {
                name: name.into(),
                ..Default::default()
            },
            location: location.into(),
            secret: None,
        }
    }

    /// Load the bot file at `path`
    ///
    /// # Errors
    /// Returns [`ConnectError::Load`] if the file cannot be read or parsed, if it
    /// is encrypted and no secret is given, or if the secret does not match.
    pub async fn load(path: impl AsRef<Path>, secret: Option<&str>) -> Result<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ConnectError::load(path, e))?;
        let mut document: BotDocument =
            serde_json::from_str(&raw).map_err(|e| ConnectError::load(path, e))?;
        debug!(path = %path.display(), services = document.services.len(), "loaded bot file");

        let secret = secret.filter(|s| !s.is_empty()).map(str::to_string);
        if let Some(marker) = &document.secret_key {
            let Some(secret) = secret.as_deref() else {
                return Err(ConnectError::load(
                    path,
                    "bot file is encrypted, pass --secret to open it",
                ));
            };
            let decoded = crypto::decrypt(marker, secret)
                .map_err(|e| ConnectError::load(path, format!("{e:#}")))?;
            if decoded != SECRET_KEY_MARKER {
                return Err(ConnectError::load(path, "secret does not match this bot file"));
            }
            for service in &mut document.services {
                map_secret_properties(service, |value| crypto::decrypt(value, secret))
                    .map_err(|e| ConnectError::load(path, format!("{e:#}")))?;
            }
        }

        Ok(BotConfig {
            document,
            location: path.to_path_buf(),
            secret,
        })
    }

    /// Load the first `.bot` file found in `dir`
    ///
    /// Candidates are ordered by file name; when several exist the first one
    /// wins and the others are reported at warn level.
    pub async fn load_from_folder(dir: impl AsRef<Path>, secret: Option<&str>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut entries = tokio::fs::read_dir(dir)
            .await
            .map_err(|e| ConnectError::load(dir, e))?;
        let mut candidates = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| ConnectError::load(dir, e))?
        {
            let path = entry.path();
            let is_bot_file = path.extension().and_then(|e| e.to_str()) == Some(BOT_FILE_EXTENSION);
            if is_bot_file && path.is_file() {
                candidates.push(path);
            }
        }
        candidates.sort();

        let Some(first) = candidates.first() else {
            return Err(ConnectError::BotFileNotFound {
                dir: dir.to_path_buf(),
            });
        };
        if candidates.len() > 1 {
            warn!(
                chosen = %first.display(),
                count = candidates.len(),
                "multiple bot files found, using the first"
            );
        }
        Self::load(first, secret).await
    }

    pub fn name(&self) -> &str {
        &self.document.name
    }

    pub fn services(&self) -> &[ConnectedService] {
        &self.document.services
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Build the document exactly as it will be written to disk
    fn to_disk_document(&self) -> anyhow::Result<BotDocument> {
        let mut document = self.document.clone();
        match self.secret.as_deref() {
            Some(secret) => {
                document.secret_key = Some(crypto::encrypt(SECRET_KEY_MARKER, secret)?);
                for service in &mut document.services {
                    map_secret_properties(service, |value| crypto::encrypt(value, secret))?;
                }
            }
            None => document.secret_key = None,
        }
        Ok(document)
    }
}

#[async_trait]
impl ServiceStore for BotConfig {
    fn connect_service(&mut self, service: ConnectedService) {
        info!(
            name = %service.name,
            id = %service.id,
            kind = ?service.service_type,
            "connecting service"
        );
        self.document.services.push(service);
    }

    async fn save(&mut self) -> Result<()> {
        let document = self
            .to_disk_document()
            .map_err(|e| ConnectError::store(&self.location, format!("{e:#}")))?;
        let data = serde_json::to_string_pretty(&document)
            .map_err(|e| ConnectError::store(&self.location, e))?;
        tokio::fs::write(&self.location, data)
            .await
            .map_err(|e| ConnectError::store(&self.location, e))?;
        info!(path = %self.location.display(), "saved bot file");
        Ok(())
    }
}

/// Apply `f` to every string-valued secret property of `service`
fn map_secret_properties<F>(service: &mut ConnectedService, f: F) -> anyhow::Result<()>
where
    F: Fn(&str) -> anyhow::Result<String>,
{
    for key in service.service_type.secret_properties() {
        if let Some(Value::String(value)) = service.properties.get_mut(*key) {
            if !value.is_empty() {
                let mapped = f(value)?;
                *value = mapped;
            }
        }
    }
    Ok(())
}
