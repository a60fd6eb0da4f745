//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI arguments, environment variables prefixed with
//! `BACKEND_`, or a configuration file, in OrthoConfig's usual precedence
//! order.

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::auth::JwtSettings;

/// Settings controlling the HTTP server and its collaborators.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BACKEND")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    #[ortho_config(default = "0.0.0.0:8080".to_owned())]
    pub bind_addr: String,
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Maximum connections held by the database pool.
    #[ortho_config(default = 10)]
    pub db_pool_size: u32,
    /// HMAC secret for signing bearer tokens.
    pub jwt_secret: String,
    /// Issuer claim embedded in bearer tokens.
    #[ortho_config(default = "backend".to_owned())]
    pub jwt_issuer: String,
    /// Access-token lifetime in seconds.
    #[ortho_config(default = 900)]
    pub access_ttl_secs: i64,
    /// Refresh-token lifetime in seconds.
    #[ortho_config(default = 604_800)]
    pub refresh_ttl_secs: i64,
}

impl AppSettings {
    /// Derive JWT signing settings from the application settings.
    pub fn jwt_settings(&self) -> JwtSettings {
        JwtSettings {
            secret: self.jwt_secret.clone(),
            issuer: self.jwt_issuer.clone(),
            access_ttl_secs: self.access_ttl_secs,
            refresh_ttl_secs: self.refresh_ttl_secs,
        }
    }
}
