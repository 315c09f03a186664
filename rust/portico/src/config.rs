use std::path::PathBuf;

use clap::Parser;

use crate::PorticoError;

/// Every option may also be supplied through the environment (or a `.env`
/// file next to the binary).
#[derive(Parser, Clone, Debug)]
#[command(version, about, long_about = None)]
pub struct PorticoConfig {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// GitHub OAuth application client id
    #[arg(long, env = "GITHUB_CLIENT_ID", default_value = "")]
    pub github_client_id: String,

    /// GitHub OAuth application client secret
    #[arg(long, env = "GITHUB_CLIENT_SECRET", default_value = "", hide_env_values = true)]
    pub github_client_secret: String,

    /// Callback URL registered with the GitHub OAuth application
    #[arg(long, env = "GITHUB_REDIRECT_URI", default_value = "")]
    pub github_redirect_uri: String,

    /// Secret used to sign session tokens
    #[arg(long, env = "JWT_SECRET", default_value = "", hide_env_values = true)]
    pub jwt_secret: String,

    /// Only users whose primary e-mail belongs to this domain may log in
    #[arg(long, env = "ALLOWED_DOMAIN", default_value = "")]
    pub allowed_domain: String,

    /// Where the single-page application is served from
    #[arg(long, env = "FRONTEND_URL", default_value = "http://127.0.0.1:3000")]
    pub frontend_url: String,

    /// Directory holding the uploaded API description and its backups
    #[arg(long, env = "UPLOADS_DIR", default_value = "./uploads")]
    pub uploads_dir: PathBuf,

    /// Directory with the built web application, served for unknown paths
    #[arg(long, env = "UI_DIR", default_value = "./rust/portico-web/dist")]
    pub ui_dir: PathBuf,
}

impl PorticoConfig {
    /// Rejects configurations the OAuth handshake cannot work with.
    pub fn validate(&self) -> Result<(), PorticoError> {
        let missing: Vec<&str> = [
            ("GITHUB_CLIENT_ID", &self.github_client_id),
            ("GITHUB_CLIENT_SECRET", &self.github_client_secret),
            ("GITHUB_REDIRECT_URI", &self.github_redirect_uri),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if !missing.is_empty() {
            return Err(PorticoError::InvalidConfiguration(format!(
                "Missing required GitHub OAuth settings: {}",
                missing.join(", ")
            )));
        }

        if self.jwt_secret.is_empty() {
            warn!("JWT_SECRET is empty; session tokens are trivially forgeable");
        }

        Ok(())
    }

    /// The frontend URL for a page, with query parameters appended.
    pub fn frontend_page(&self, page: &str, query: &[(&str, &str)]) -> String {
        let mut location = format!("{}/{}", self.frontend_url.trim_end_matches('/'), page);

        if !query.is_empty() {
            let encoded = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(query)
                .finish();
            location.push('?');
            location.push_str(&encoded);
        }

        location
    }
}
