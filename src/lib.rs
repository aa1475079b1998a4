//! # msbot connect luis
//!
//! Core library for connecting a bot configuration (`.bot` file) to a LUIS
//! application.
//!
//! The work is a three stage pipeline:
//! 1. [`args`] collects the LUIS arguments from flags and at most one JSON overlay
//! 2. [`validate`] checks them in a fixed order and stops at the first problem
//! 3. [`commands::connect_luis`] turns them into a service record and saves the bot file

use clap::Parser;
use std::path::PathBuf;

pub mod args;
pub mod commands;
pub mod config;
pub mod constants;
pub mod crypto;
pub mod error;
pub mod schema;
pub mod validate;

/// Connect the bot to a LUIS application
#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "msbot connect luis",
    about = "Connect the bot to a LUIS application",
    disable_version_flag = true
)]
pub struct Cli {
    /// Path to bot file. If omitted, the current folder is searched for a .bot file
    #[arg(short = 'b', long = "bot", value_name = "path")]
    pub bot: Option<PathBuf>,

    /// Bot file secret password for encrypting service secrets
    #[arg(long, value_name = "secret")]
    pub secret: Option<String>,

    /// Name for the LUIS app
    #[arg(short = 'n', long, value_name = "name")]
    pub name: Option<String>,

    /// AppId for the LUIS App
    #[arg(short = 'a', long = "appId", value_name = "appid")]
    pub app_id: Option<String>,

    /// Version for the LUIS App, (example: v0.1)
    #[arg(short = 'v', long = "version", value_name = "version")]
    pub version: Option<String>,

    /// Authoring key for manipulating LUIS apps via the authoring API
    #[arg(long = "authoringKey", value_name = "authoringkey")]
    pub authoring_key: Option<String>,

    /// (OPTIONAL) Subscription key used for querying a LUIS model
    #[arg(long = "subscriptionKey", value_name = "subscriptionKey")]
    pub subscription_key: Option<String>,

    /// (OPTIONAL) Arguments are passed in as JSON object via stdin
    #[arg(long)]
    pub stdin: bool,

    /// (OPTIONAL) Arguments passed in as path to arguments in JSON format
    #[arg(long, value_name = "jsonfile")]
    pub input: Option<PathBuf>,
}
