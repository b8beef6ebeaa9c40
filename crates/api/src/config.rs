use blog_core::retention::DEFAULT_KEEP_COUNT;

use crate::auth::jwt::JwtConfig;

/// Default redirect target after GitHub authorizes the app.
const DEFAULT_GITHUB_REDIRECT_URI: &str = "http://localhost:5173/callback";

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Time allowed for background tasks to drain on shutdown (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// JWT token configuration.
    pub jwt: JwtConfig,
    /// Visit-log rows kept by the retention pass (default: `20`).
    pub visit_log_keep_count: usize,
    /// Owner account seeded at startup, if configured.
    pub owner: Option<OwnerConfig>,
    pub github: GitHubConfig,
    /// Upload target for `/upload`. Uploads are rejected when unset.
    pub image_host_url: Option<String>,
    /// Directory served under `/static` (default: `static`).
    pub static_dir: String,
}

/// Credentials for the blog owner's local account.
#[derive(Debug, Clone)]
pub struct OwnerConfig {
    pub account: String,
    pub password: String,
}

/// GitHub OAuth application settings.
#[derive(Debug, Clone, Default)]
pub struct GitHubConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_uri: String,
    /// GitHub user id granted the owner role on sign-in.
    pub owner_github_id: Option<i64>,
    /// Login whose public repositories `/github/repos` lists.
    pub owner_login: Option<String>,
}

impl GitHubConfig {
    /// `(client_id, client_secret)` when both are configured.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.client_id.as_deref(), self.client_secret.as_deref()) {
            (Some(id), Some(secret)) => Some((id, secret)),
            _ => None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                          |
    /// |--------------------------|----------------------------------|
    /// | `HOST`                   | `0.0.0.0`                        |
    /// | `PORT`                   | `8080`                           |
    /// | `CORS_ORIGINS`           | `http://localhost:5173`          |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                             |
    /// | `SHUTDOWN_TIMEOUT_SECS`  | `30`                             |
    /// | `VISIT_LOG_KEEP_COUNT`   | `20`                             |
    /// | `OWNER_ACCOUNT`          | unset                            |
    /// | `OWNER_PASSWORD`         | unset                            |
    /// | `OWNER_GITHUB_ID`        | unset                            |
    /// | `GITHUB_CLIENT_ID`       | unset                            |
    /// | `GITHUB_CLIENT_SECRET`   | unset                            |
    /// | `GITHUB_REDIRECT_URI`    | `http://localhost:5173/callback` |
    /// | `GITHUB_OWNER_LOGIN`     | unset                            |
    /// | `IMAGE_HOST_URL`         | unset                            |
    /// | `STATIC_DIR`             | `static`                         |
    ///
    /// JWT settings are read by [`JwtConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let visit_log_keep_count: usize = std::env::var("VISIT_LOG_KEEP_COUNT")
            .unwrap_or_else(|_| DEFAULT_KEEP_COUNT.to_string())
            .parse()
            .expect("VISIT_LOG_KEEP_COUNT must be a valid usize");
        assert!(visit_log_keep_count > 0, "VISIT_LOG_KEEP_COUNT must be at least 1");

        let owner = match (optional_var("OWNER_ACCOUNT"), optional_var("OWNER_PASSWORD")) {
            (Some(account), Some(password)) => Some(OwnerConfig { account, password }),
            _ => None,
        };

        let github = GitHubConfig {
            client_id: optional_var("GITHUB_CLIENT_ID"),
            client_secret: optional_var("GITHUB_CLIENT_SECRET"),
            redirect_uri: optional_var("GITHUB_REDIRECT_URI")
                .unwrap_or_else(|| DEFAULT_GITHUB_REDIRECT_URI.into()),
            owner_github_id: optional_var("OWNER_GITHUB_ID")
                .map(|v| v.parse().expect("OWNER_GITHUB_ID must be a valid i64")),
            owner_login: optional_var("GITHUB_OWNER_LOGIN"),
        };

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            jwt,
            visit_log_keep_count,
            owner,
            github,
            image_host_url: optional_var("IMAGE_HOST_URL"),
            static_dir: std::env::var("STATIC_DIR").unwrap_or_else(|_| "static".into()),
        }
    }
}

/// Read an env var, treating unset and blank the same.
fn optional_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
