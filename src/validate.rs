//! Validation of the merged LUIS arguments
//!
//! Checks run in a fixed order and the first failure wins:
//! 1. `name` is present
//! 2. `appId` is a canonical UUID
//! 3. `version` has a nonzero leading number
//! 4. `authoringKey` is a canonical UUID
//!
//! `subscriptionKey` is accepted as-is unless
//! [`ValidationOptions::strict_subscription_key`] is turned on.

use crate::{
    args::CandidateArgs,
    constants::STRICT_SUBSCRIPTION_KEY_ENV,
    error::{ConnectError, Field, Result},
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::env;
use uuid::Uuid;

static LEADING_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^0-9+\-.]*([+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)")
        .expect("leading number pattern is valid")
});

/// Knobs for [`validate`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Require `subscriptionKey` to be present and a canonical UUID.
    ///
    /// Off by default: runtime keys are not always UUID shaped.
    pub strict_subscription_key: bool,
}

impl ValidationOptions {
    /// Read options from the environment (`MSBOT_STRICT_SUBSCRIPTION_KEY`)
    pub fn from_env() -> Self {
        let strict = env::var(STRICT_SUBSCRIPTION_KEY_ENV)
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        ValidationOptions {
            strict_subscription_key: strict,
        }
    }
}

/// LUIS arguments that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LuisArgs {
    pub name: String,
    pub app_id: String,
    pub version: String,
    pub authoring_key: String,
    pub subscription_key: Option<String>,
}

/// Check `candidate`, returning the first problem found
pub fn validate(candidate: CandidateArgs, options: &ValidationOptions) -> Result<LuisArgs> {
    let name = candidate.name.ok_or(ConnectError::MissingField(Field::Name))?;

    let app_id = required(candidate.app_id, Field::AppId)?;
    if !is_canonical_uuid(&app_id) {
        return Err(ConnectError::InvalidField(Field::AppId));
    }

    let version = required(candidate.version, Field::Version)?;
    if !leading_number(&version).is_some_and(|n| n != 0.0) {
        return Err(ConnectError::InvalidField(Field::Version));
    }

    let authoring_key = required(candidate.authoring_key, Field::AuthoringKey)?;
    if !is_canonical_uuid(&authoring_key) {
        return Err(ConnectError::InvalidField(Field::AuthoringKey));
    }

    if options.strict_subscription_key {
        let key = required(candidate.subscription_key.clone(), Field::SubscriptionKey)?;
        if !is_canonical_uuid(&key) {
            return Err(ConnectError::InvalidField(Field::SubscriptionKey));
        }
    }

    Ok(LuisArgs {
        name,
        app_id,
        version,
        authoring_key,
        subscription_key: candidate.subscription_key,
    })
}

// Empty strings count as missing.
fn required(value: Option<String>, field: Field) -> Result<String> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(ConnectError::MissingField(field))
}

/// True for the 36 character hyphenated form only
pub fn is_canonical_uuid(value: &str) -> bool {
    value.len() == 36 && Uuid::try_parse(value).is_ok()
}

/// Parse the leading numeric portion of `value`, skipping a non-numeric prefix
/// such as the `v` in `v0.1`
pub fn leading_number(value: &str) -> Option<f64> {
    let caps = LEADING_NUMBER.captures(value.trim_start())?;
    caps.get(1)?.as_str().parse().ok()
}
