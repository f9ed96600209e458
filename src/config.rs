use std::env;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_DATABASE_URL: &str = "mongodb://localhost:27017/recipeDB";
const DEFAULT_TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Runtime settings, read once at start-up.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub session_ttl: chrono::Duration,
    /// Expected `aud` of Google identity tokens. Unchecked when unset.
    pub google_client_id: Option<String>,
    pub google_tokeninfo_url: String,
    pub identity_timeout: Duration,
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let jwt_secret = var("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let allowed_origins = var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or("PORT", var("PORT"), 5000)?,
            database_url: var("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            jwt_secret,
            session_ttl: session_ttl(var("SESSION_TTL_HOURS"))?,
            google_client_id: var("GOOGLE_CLIENT_ID"),
            google_tokeninfo_url: var("GOOGLE_TOKENINFO_URL")
                .unwrap_or_else(|| DEFAULT_TOKENINFO_URL.to_string()),
            identity_timeout: Duration::from_secs(parse_or(
                "IDENTITY_TIMEOUT_SECS",
                var("IDENTITY_TIMEOUT_SECS"),
                10,
            )?),
            allowed_origins,
        })
    }
}

// Tokens must outlive their issuance and `iat + ttl` must stay a valid date.
fn session_ttl(value: Option<String>) -> Result<chrono::Duration, ConfigError> {
    let hours: i64 = parse_or("SESSION_TTL_HOURS", value.clone(), 24)?;

    chrono::Duration::try_hours(hours)
        .filter(|ttl| *ttl > chrono::Duration::zero())
        .filter(|ttl| chrono::Utc::now().checked_add_signed(*ttl).is_some())
        .ok_or(ConfigError::Invalid {
            name: "SESSION_TTL_HOURS",
            value: value.unwrap_or_default(),
        })
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[("JWT_SECRET", "s3cret")]).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.session_ttl, chrono::Duration::hours(24));
        assert_eq!(config.google_client_id, None);
        assert_eq!(config.identity_timeout, Duration::from_secs(10));
        assert_eq!(config.allowed_origins, vec!["*".to_string()]);
    }

    #[test]
    fn test_secret_is_required() {
        assert_eq!(
            config_from(&[]).unwrap_err(),
            ConfigError::Missing("JWT_SECRET")
        );
        assert_eq!(
            config_from(&[("JWT_SECRET", "  ")]).unwrap_err(),
            ConfigError::Missing("JWT_SECRET")
        );
    }

    #[test]
    fn test_origins_are_split() {
        let config = config_from(&[
            ("JWT_SECRET", "s3cret"),
            ("CORS_ALLOWED_ORIGINS", "http://localhost:3000, https://recipes.example.com,"),
        ])
        .unwrap();

        assert_eq!(
            config.allowed_origins,
            vec![
                "http://localhost:3000".to_string(),
                "https://recipes.example.com".to_string()
            ]
        );
    }

    #[test]
    fn test_session_ttl_must_be_positive_and_in_range() {
        for ttl in ["0", "-1", "1000000000000", "2500000000"] {
            let err = config_from(&[("JWT_SECRET", "s3cret"), ("SESSION_TTL_HOURS", ttl)])
                .unwrap_err();
            assert_eq!(
                err,
                ConfigError::Invalid {
                    name: "SESSION_TTL_HOURS",
                    value: ttl.to_string()
                }
            );
        }

        let config = config_from(&[("JWT_SECRET", "s3cret"), ("SESSION_TTL_HOURS", "1")]).unwrap();
        assert_eq!(config.session_ttl, chrono::Duration::hours(1));
    }

    #[test]
    fn test_invalid_port() {
        let err = config_from(&[("JWT_SECRET", "s3cret"), ("PORT", "http")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                name: "PORT",
                value: "http".to_string()
            }
        );
    }
}
