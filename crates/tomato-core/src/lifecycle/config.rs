use crate::ranking::RecencyPolicy;
use std::env::VarError;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Runtime settings for the delivery client.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// How often order statuses are re-fetched.
    pub poll_interval: Duration,
    /// Directory backing [`FileStorage`](crate::storage::FileStorage).
    pub storage_dir: PathBuf,
    pub geolocation_timeout: Duration,
    /// Proximity cut the restaurant store applies to coordinate searches.
    pub nearby_radius_km: Option<f64>,
    /// What the `new` category selects.
    pub new_arrivals: RecencyPolicy,
    /// Channel capacity of each resource actor.
    pub actor_buffer: usize,
    /// Tracing filter used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(10),
            storage_dir: PathBuf::from("./.tomato"),
            geolocation_timeout: Duration::from_secs(10),
            nearby_radius_km: None,
            new_arrivals: RecencyPolicy::default(),
            actor_buffer: 32,
            log_filter: "info".to_string(),
        }
    }
}

/// Load configuration from the environment, reading `.env` first if present.
///
/// # Errors
///
/// Returns `ConfigError` if any variable is set to an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    build_app_config(|key| std::env::var(key))
}

/// Build configuration from an arbitrary lookup, so parsing can be tested
/// against a plain map.
pub fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let positive_secs = |var: &str, default: u64| -> Result<Duration, ConfigError> {
        let Ok(raw) = lookup(var) else {
            return Ok(Duration::from_secs(default));
        };
        match raw.trim().parse::<u64>() {
            Ok(0) => Err(invalid(var, "must be greater than 0".into())),
            Ok(secs) => Ok(Duration::from_secs(secs)),
            Err(e) => Err(invalid(var, e.to_string())),
        }
    };

    let defaults = AppConfig::default();

    let poll_interval = positive_secs("TOMATO_POLL_INTERVAL_SECS", 10)?;
    let geolocation_timeout = positive_secs("TOMATO_GEOLOCATION_TIMEOUT_SECS", 10)?;

    let storage_dir = lookup("TOMATO_STORAGE_DIR")
        .map(PathBuf::from)
        .unwrap_or(defaults.storage_dir);

    let nearby_radius_km = match lookup("TOMATO_NEARBY_RADIUS_KM") {
        Err(_) => None,
        Ok(raw) => match raw.trim().parse::<f64>() {
            Ok(km) if km.is_finite() && km > 0.0 => Some(km),
            Ok(km) => {
                return Err(invalid(
                    "TOMATO_NEARBY_RADIUS_KM",
                    format!("must be a positive number, got {km}"),
                ))
            }
            Err(e) => return Err(invalid("TOMATO_NEARBY_RADIUS_KM", e.to_string())),
        },
    };

    let new_arrivals = match lookup("TOMATO_NEW_ARRIVALS") {
        Err(_) => defaults.new_arrivals,
        Ok(raw) => parse_recency(&raw).map_err(|reason| invalid("TOMATO_NEW_ARRIVALS", reason))?,
    };

    let actor_buffer = match lookup("TOMATO_ACTOR_BUFFER") {
        Err(_) => defaults.actor_buffer,
        Ok(raw) => match raw.trim().parse::<usize>() {
            Ok(0) => return Err(invalid("TOMATO_ACTOR_BUFFER", "must be greater than 0".into())),
            Ok(n) => n,
            Err(e) => return Err(invalid("TOMATO_ACTOR_BUFFER", e.to_string())),
        },
    };

    let log_filter = lookup("TOMATO_LOG").unwrap_or(defaults.log_filter);

    Ok(AppConfig {
        poll_interval,
        storage_dir,
        geolocation_timeout,
        nearby_radius_km,
        new_arrivals,
        actor_buffer,
        log_filter,
    })
}

/// `newest:<n>` or `prefix:<id-prefix>`.
fn parse_recency(raw: &str) -> Result<RecencyPolicy, String> {
    let (kind, value) = raw
        .trim()
        .split_once(':')
        .ok_or_else(|| format!("expected newest:<n> or prefix:<id>, got {raw:?}"))?;
    match kind {
        "newest" => value
            .parse::<usize>()
            .map(RecencyPolicy::NewestN)
            .map_err(|e| e.to_string()),
        "prefix" if !value.is_empty() => Ok(RecencyPolicy::IdPrefix(value.to_string())),
        "prefix" => Err("prefix must not be empty".to_string()),
        other => Err(format!("unknown policy {other:?}")),
    }
}
