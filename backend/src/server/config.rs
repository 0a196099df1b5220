//! Environment-driven server configuration.
//!
//! Settings are read through [`mockable::Env`] so parsing is testable
//! without touching the process environment.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use tracing::warn;

use backend::outbound::persistence::DbPool;

const BIND_ADDR_ENV: &str = "BIND_ADDR";
const BIND_ADDR_DEFAULT: &str = "0.0.0.0:8080";
const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
const KEY_FILE_DEFAULT: &str = "/var/run/secrets/session_key";
const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";
const DATABASE_URL_ENV: &str = "DATABASE_URL";
const SESSION_KEY_MIN_LEN: usize = 64;

/// Failures while reading server settings from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The bind address did not parse as `host:port`.
    #[error("{BIND_ADDR_ENV} must be a host:port address, got {value}")]
    InvalidBindAddr {
        /// The rejected value.
        value: String,
    },
    /// The session key file was unreadable and ephemeral keys are not
    /// allowed.
    #[error("failed to read session key at {path}: {message}")]
    UnreadableKey {
        /// Path that was tried.
        path: String,
        /// Underlying IO error description.
        message: String,
    },
    /// The session key file was too short to derive a signing key from.
    #[error("session key at {path} must be at least {SESSION_KEY_MIN_LEN} bytes")]
    ShortKey {
        /// Path that was tried.
        path: String,
    },
}

/// Settings parsed from the environment before any I/O-heavy setup.
pub struct ServerSettings {
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// Whether session cookies require HTTPS.
    pub cookie_secure: bool,
    /// Cookie signing key.
    pub key: Key,
    /// PostgreSQL connection string; absent means fixture ports.
    pub database_url: Option<String>,
}

impl std::fmt::Debug for ServerSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerSettings")
            .field("bind_addr", &self.bind_addr)
            .field("cookie_secure", &self.cookie_secure)
            .field("key", &"<redacted>")
            .field("database_url", &self.database_url)
            .finish()
    }
}

impl ServerSettings {
    /// Read settings from the provided environment.
    ///
    /// The session key is loaded from `SESSION_KEY_FILE`; when unreadable,
    /// debug builds (or `SESSION_ALLOW_EPHEMERAL=1`) fall back to a
    /// generated throwaway key so local development works out of the box.
    pub fn from_env<E: Env>(env: &E) -> Result<Self, ConfigError> {
        let raw_addr = env
            .string(BIND_ADDR_ENV)
            .unwrap_or_else(|| BIND_ADDR_DEFAULT.to_owned());
        let bind_addr = raw_addr
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr { value: raw_addr })?;

        let cookie_secure = env
            .string(COOKIE_SECURE_ENV)
            .map(|value| value != "0")
            .unwrap_or(true);

        let key = load_session_key(env)?;

        Ok(Self {
            bind_addr,
            cookie_secure,
            key,
            database_url: env.string(DATABASE_URL_ENV),
        })
    }
}

fn load_session_key<E: Env>(env: &E) -> Result<Key, ConfigError> {
    let key_path = env
        .string(KEY_FILE_ENV)
        .unwrap_or_else(|| KEY_FILE_DEFAULT.to_owned());

    match std::fs::read(&key_path) {
        Ok(bytes) if bytes.len() >= SESSION_KEY_MIN_LEN => Ok(Key::derive_from(&bytes)),
        Ok(_) => Err(ConfigError::ShortKey { path: key_path }),
        Err(error) => {
            let allow_ephemeral = env.string(ALLOW_EPHEMERAL_ENV).as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_ephemeral {
                warn!(path = %key_path, %error, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(ConfigError::UnreadableKey {
                    path: key_path,
                    message: error.to_string(),
                })
            }
        }
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration from parsed settings.
    #[must_use]
    pub fn new(settings: &ServerSettings) -> Self {
        Self {
            key: settings.key.clone(),
            cookie_secure: settings.cookie_secure,
            same_site: SameSite::Lax,
            bind_addr: settings.bind_addr,
            db_pool: None,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// When provided, the server uses Diesel-backed repositories; otherwise
    /// the fixture ports respond with `503 Service Unavailable`.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
