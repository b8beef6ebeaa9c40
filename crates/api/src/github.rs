//! GitHub REST client for the OAuth sign-in flow and the repository list.

use blog_db::models::user::GitHubProfile;
use serde::{Deserialize, Serialize};

const AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";
const TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
const API_URL: &str = "https://api.github.com";

/// GitHub's API rejects requests without a User-Agent.
const USER_AGENT: &str = concat!("blog-api/", env!("CARGO_PKG_VERSION"));

/// Errors from the GitHub client.
#[derive(Debug, thiserror::Error)]
pub enum GitHubError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// GitHub returned a non-2xx status code.
    #[error("GitHub API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The code exchange answered 200 but carried an OAuth error.
    #[error("OAuth error: {0}")]
    OAuth(String),
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

/// A public repository as listed by `/github/repos`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub id: i64,
    pub name: String,
    pub full_name: String,
    pub html_url: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub stargazers_count: i64,
    pub forks_count: i64,
    pub updated_at: Option<String>,
}

/// Thin wrapper over a shared [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: reqwest::Client,
}

impl GitHubClient {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// URL the browser is sent to for consent.
    pub fn authorize_url(client_id: &str, redirect_uri: &str) -> String {
        format!(
            "{AUTHORIZE_URL}?client_id={client_id}&redirect_uri={redirect_uri}&scope=read:user"
        )
    }

    /// Exchange an authorization `code` for an access token.
    pub async fn exchange_code(
        &self,
        client_id: &str,
        client_secret: &str,
        code: &str,
    ) -> Result<String, GitHubError> {
        let response = self
            .client
            .post(TOKEN_URL)
            .header(reqwest::header::ACCEPT, "application/json")
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .form(&[
                ("client_id", client_id),
                ("client_secret", client_secret),
                ("code", code),
            ])
            .send()
            .await?;

        let token: TokenResponse = Self::parse_response(response).await?;
        match (token.access_token, token.error) {
            (Some(access_token), None) => Ok(access_token),
            (_, Some(error)) => Err(GitHubError::OAuth(
                token.error_description.unwrap_or(error),
            )),
            (None, None) => Err(GitHubError::OAuth("no access token returned".into())),
        }
    }

    /// Fetch the profile of the user owning `access_token`.
    pub async fn fetch_user(&self, access_token: &str) -> Result<GitHubProfile, GitHubError> {
        let response = self
            .client
            .get(format!("{API_URL}/user"))
            .bearer_auth(access_token)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Public repositories of `login`, most recently updated first.
    pub async fn list_repos(&self, login: &str) -> Result<Vec<Repository>, GitHubError> {
        let response = self
            .client
            .get(format!("{API_URL}/users/{login}/repos"))
            .query(&[("sort", "updated"), ("per_page", "100")])
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, GitHubError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GitHubError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<T>().await?)
    }
}
