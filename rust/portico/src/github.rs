use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::{PorticoConfig, PorticoError};

const GITHUB_AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";
const GITHUB_TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
const GITHUB_EMAILS_URL: &str = "https://api.github.com/user/emails";

/// Why the OAuth callback could not produce a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginFailure {
    ExchangeFailed,
    EmailUnavailable,
}

impl LoginFailure {
    pub fn message(&self) -> &'static str {
        match self {
            LoginFailure::ExchangeFailed => "OAuth exchange failed",
            LoginFailure::EmailUnavailable => "Failed to get email",
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct AccountEmail {
    pub email: String,
    #[serde(default)]
    pub primary: bool,
    #[serde(default)]
    pub verified: bool,
}

/// Picks the address GitHub marks as both primary and verified.
pub fn primary_verified_email(emails: &[AccountEmail]) -> Option<&str> {
    emails
        .iter()
        .find(|email| email.primary && email.verified)
        .map(|email| email.email.as_str())
}

/// The external party that authenticates users.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    fn authorize_url(&self, state: &str) -> String;

    /// Redeems an authorization code for the user's e-mail addresses.
    async fn account_emails(&self, code: &str) -> Result<Vec<AccountEmail>, LoginFailure>;
}

#[derive(Deserialize)]
struct AccessTokenResponse {
    access_token: String,
}

pub struct GithubProvider {
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    http: reqwest::Client,
}

impl GithubProvider {
    pub fn new(config: &PorticoConfig) -> Result<Self, PorticoError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("portico/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(GithubProvider {
            client_id: config.github_client_id.clone(),
            client_secret: config.github_client_secret.clone(),
            redirect_uri: config.github_redirect_uri.clone(),
            http,
        })
    }

    async fn exchange(&self, code: &str) -> Result<String, PorticoError> {
        let response = self
            .http
            .post(GITHUB_TOKEN_URL)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
                ("redirect_uri", self.redirect_uri.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json::<AccessTokenResponse>()
            .await?;

        Ok(response.access_token)
    }

    async fn emails(&self, access_token: &str) -> Result<Vec<AccountEmail>, PorticoError> {
        Ok(self
            .http
            .get(GITHUB_EMAILS_URL)
            .bearer_auth(access_token)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<AccountEmail>>()
            .await?)
    }
}

#[async_trait]
impl IdentityProvider for GithubProvider {
    fn authorize_url(&self, state: &str) -> String {
        let mut url = match Url::parse(GITHUB_AUTHORIZE_URL) {
            Ok(url) => url,
            Err(_) => return GITHUB_AUTHORIZE_URL.to_string(),
        };

        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("scope", "user:email")
            .append_pair("state", state);

        url.into()
    }

    async fn account_emails(&self, code: &str) -> Result<Vec<AccountEmail>, LoginFailure> {
        let access_token = self.exchange(code).await.map_err(|error| {
            warn!("GitHub code exchange failed: {}", error);
            LoginFailure::ExchangeFailed
        })?;

        self.emails(&access_token).await.map_err(|error| {
            warn!("GitHub e-mail lookup failed: {}", error);
            LoginFailure::EmailUnavailable
        })
    }
}
