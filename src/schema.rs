//! Shapes of the records stored in a bot file's `services` list

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Kind of a connected service, stored as the `type` property
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    Endpoint,
    #[serde(rename = "abs")]
    AzureBotService,
    Luis,
    #[serde(rename = "qna")]
    QnA,
    Dispatch,
}

impl ServiceType {
    /// Properties that are encrypted at rest when the bot file has a secret
    pub fn secret_properties(self) -> &'static [&'static str] {
        match self {
            ServiceType::Endpoint => &["appPassword"],
            ServiceType::AzureBotService => &[],
            ServiceType::Luis | ServiceType::Dispatch => &["authoringKey", "subscriptionKey"],
            ServiceType::QnA => &["subscriptionKey"],
        }
    }
}

/// One entry of the `services` list
///
/// Only the common keys are typed; everything else a service carries is kept
/// in `properties` so that services this tool knows nothing about survive a
/// load/save cycle untouched.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ConnectedService {
    #[serde(rename = "type")]
    pub service_type: ServiceType,
    pub name: String,
    pub id: String,
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl ConnectedService {
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(Value::as_str)
    }
}

/// A LUIS application connected to the bot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LuisService {
    pub name: String,
    pub id: String,
    pub app_id: String,
    pub version: String,
    pub subscription_key: Option<String>,
    pub authoring_key: String,
}

impl From<LuisService> for ConnectedService {
    fn from(luis: LuisService) -> Self {
        let mut properties = Map::new();
        properties.insert("appId".into(), Value::String(luis.app_id));
        properties.insert("version".into(), Value::String(luis.version));
        properties.insert("authoringKey".into(), Value::String(luis.authoring_key));
        if let Some(key) = luis.subscription_key {
            properties.insert("subscriptionKey".into(), Value::String(key));
        }
        ConnectedService {
            service_type: ServiceType::Luis,
            name: luis.name,
            id: luis.id,
            properties,
        }
    }
}

impl LuisService {
    /// Read a LUIS record back out of a generic service entry
    pub fn from_connected(service: &ConnectedService) -> Option<Self> {
        if service.service_type != ServiceType::Luis {
            return None;
        }
        Some(LuisService {
            name: service.name.clone(),
            id: service.id.clone(),
            app_id: service.property("appId")?.to_string(),
            version: service.property("version")?.to_string(),
            subscription_key: service.property("subscriptionKey").map(str::to_string),
            authoring_key: service.property("authoringKey")?.to_string(),
        })
    }
}
