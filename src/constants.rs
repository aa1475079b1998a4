/// File extension of bot configuration documents
pub const BOT_FILE_EXTENSION: &str = "bot";

/// Environment variable consulted when `--secret` is not given
pub const BOT_SECRET_ENV: &str = "MSBOT_SECRET";

/// Environment variable holding the log filter (falls back to `RUST_LOG`)
pub const LOG_FILTER_ENV: &str = "MSBOT_LOG";

/// Environment variable that turns on the subscription key UUID check
pub const STRICT_SUBSCRIPTION_KEY_ENV: &str = "MSBOT_STRICT_SUBSCRIPTION_KEY";

/// Plaintext stored (encrypted) in `secretKey` so a wrong secret is caught on load
pub const SECRET_KEY_MARKER: &str = "msbot-secret-key-v1";
