use std::path::PathBuf;

use anyhow::{Context, Result};

/// Minimum length accepted for `SESSION_SECRET`; the signed cookie key needs 64 bytes.
pub const MIN_SESSION_SECRET_LEN: usize = 64;
/// Upper bound for either chart dimension, in pixels.
pub const MAX_CHART_DIMENSION: u32 = 4096;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the CSV tables (marks, curriculum, credentials, contacts, well-known).
    pub data_dir: PathBuf,
    pub port: u16,
    pub rust_log: String,
    /// Signing secret for the session cookie. `None` means a random key per process.
    pub session_secret: Option<String>,
    pub chart_width: u32,
    pub chart_height: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            data_dir: std::env::var("DATA_DIR")
                .unwrap_or_else(|_| "data".to_string())
                .into(),
            port: parse_value("PORT", env_opt("PORT"), 8080)
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            session_secret: check_session_secret(env_opt("SESSION_SECRET"))?,
            chart_width: parse_dimension("CHART_WIDTH", env_opt("CHART_WIDTH"), 640)?,
            chart_height: parse_dimension("CHART_HEIGHT", env_opt("CHART_HEIGHT"), 480)?,
        })
    }
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Parses `raw` when present, otherwise falls back to `default`.
fn parse_value<T>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Invalid value '{raw}' for '{key}'")),
        None => Ok(default),
    }
}

/// A chart dimension: a pixel count in `1..=MAX_CHART_DIMENSION`.
fn parse_dimension(key: &str, raw: Option<String>, default: u32) -> Result<u32> {
    let value = parse_value(key, raw, default)
        .with_context(|| format!("{key} must be a positive integer"))?;
    if value == 0 || value > MAX_CHART_DIMENSION {
        anyhow::bail!("{key} must be between 1 and {MAX_CHART_DIMENSION} (got {value})");
    }
    Ok(value)
}

fn check_session_secret(secret: Option<String>) -> Result<Option<String>> {
    if let Some(secret) = &secret {
        if secret.len() < MIN_SESSION_SECRET_LEN {
            anyhow::bail!(
                "SESSION_SECRET must be at least {MIN_SESSION_SECRET_LEN} bytes (got {})",
                secret.len()
            );
        }
    }
    Ok(secret)
}

#[cfg(test)]
impl Config {
    /// Config pointing at `data_dir`, with defaults for everything else.
    pub fn for_tests(data_dir: impl Into<PathBuf>) -> Self {
        Config {
            data_dir: data_dir.into(),
            port: 0,
            rust_log: "debug".to_string(),
            session_secret: None,
            chart_width: 320,
            chart_height: 240,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_value_uses_default() {
        assert_eq!(parse_value::<u16>("PORT", None, 8080).unwrap(), 8080);
    }

    #[test]
    fn test_port_parses_with_whitespace() {
        assert_eq!(
            parse_value::<u16>("PORT", Some(" 3000 ".to_string()), 8080).unwrap(),
            3000
        );
    }

    #[test]
    fn test_port_out_of_range_rejected() {
        let err = parse_value::<u16>("PORT", Some("70000".to_string()), 8080).unwrap_err();
        assert!(err.to_string().contains("PORT"), "{err}");
        assert!(parse_value::<u16>("PORT", Some("eighty".to_string()), 8080).is_err());
    }

    #[test]
    fn test_short_session_secret_rejected() {
        let err = check_session_secret(Some("too-short".to_string())).unwrap_err();
        assert!(err.to_string().contains("at least 64 bytes"), "{err}");
    }

    #[test]
    fn test_session_secret_accepted_or_absent() {
        let secret = "k".repeat(MIN_SESSION_SECRET_LEN);
        assert_eq!(
            check_session_secret(Some(secret.clone())).unwrap(),
            Some(secret)
        );
        assert_eq!(check_session_secret(None).unwrap(), None);
    }

    #[test]
    fn test_chart_dimension_bounds() {
        assert_eq!(parse_dimension("CHART_WIDTH", None, 640).unwrap(), 640);
        assert_eq!(
            parse_dimension("CHART_WIDTH", Some("800".to_string()), 640).unwrap(),
            800
        );
        assert!(parse_dimension("CHART_WIDTH", Some("0".to_string()), 640).is_err());
        assert!(parse_dimension("CHART_WIDTH", Some("100000".to_string()), 640).is_err());
        assert!(parse_dimension("CHART_WIDTH", Some("-5".to_string()), 640).is_err());
    }
}
