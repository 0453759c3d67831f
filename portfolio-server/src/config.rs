//! Server configuration.
//!
//! Everything is read through Rocket's figment so the delivery settings live
//! next to Rocket's own (`port`, `address`, `log_level`, `shutdown`, ...).

use std::collections::HashMap;
use std::path::PathBuf;

use rocket::figment::{Figment, Profile};
use rocket::figment::providers::{Env, Format, Serialized, Toml};
use serde::Deserialize;

pub const DEFAULT_PORT: u16 = 3000;

/// One day, in seconds.
pub const DEFAULT_MAX_AGE: u64 = 24 * 60 * 60;

pub const DEFAULT_COMPRESSION_THRESHOLD: usize = 1024;

/// Delivery settings as they appear in `Portfolio.toml` or `PORTFOLIO_*`
/// environment variables. Every key is optional.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DeliveryConfig {
    /// Directory every request path is resolved against.
    pub document_root: PathBuf,
    /// Document served for directories and for unmatched paths.
    pub index_file: String,
    /// `Cache-Control` max-age for found files, in seconds.
    pub max_age: u64,
    /// Send `X-Frame-Options: SAMEORIGIN` instead of `DENY` for resources
    /// with a content-type override so the page can embed them.
    pub allow_framing_for_previewables: bool,
    /// Extension (without dot) to MIME type. Matching files are served
    /// with this type and an inline disposition.
    pub content_type_overrides: HashMap<String, String>,
    pub compression: bool,
    /// Smallest body, in bytes, worth gzipping.
    pub compression_threshold: usize,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            document_root: PathBuf::from("static"),
            index_file: "index.html".to_string(),
            max_age: DEFAULT_MAX_AGE,
            allow_framing_for_previewables: true,
            content_type_overrides: HashMap::from([(
                "pdf".to_string(),
                "application/pdf".to_string(),
            )]),
            compression: true,
            compression_threshold: DEFAULT_COMPRESSION_THRESHOLD,
        }
    }
}

/// The layered configuration used by the binary.
///
/// Later providers win: Rocket defaults, `Portfolio.toml`, `ROCKET_*`,
/// `PORT`, then `PORTFOLIO_*`. `ROCKET_PROFILE` picks the profile.
pub fn figment() -> Figment {
    figment_with_profile(Profile::from_env_or(
        "ROCKET_PROFILE",
        rocket::Config::DEFAULT_PROFILE,
    ))
}

/// [`figment`] with an explicit profile selected.
pub fn figment_with_profile(profile: impl Into<Profile>) -> Figment {
    Figment::from(rocket::Config::default())
        .select(profile)
        .merge(Serialized::default("address", "0.0.0.0"))
        .merge(Serialized::default("port", DEFAULT_PORT))
        .merge(Toml::file("Portfolio.toml").nested())
        .merge(Env::prefixed("ROCKET_").global())
        .merge(Env::raw().only(&["PORT"]).global())
        .merge(Env::prefixed("PORTFOLIO_").global())
}
