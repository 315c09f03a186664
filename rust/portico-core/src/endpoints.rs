use url::Url;

use crate::CoreError;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Backend locations, all derived from one base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    pub fn new(base_url: &str) -> Result<Self, CoreError> {
        let base = Url::parse(base_url)?;

        Ok(Endpoints {
            base: base.as_str().trim_end_matches('/').to_string(),
        })
    }

    fn join(&self, path: &str) -> String {
        format!("{}/{}", self.base, path)
    }

    pub fn login(&self) -> String {
        self.join("auth/github")
    }

    pub fn profile(&self) -> String {
        self.join("user")
    }

    pub fn secure(&self) -> String {
        self.join("secure")
    }

    pub fn upload(&self) -> String {
        self.join("upload")
    }

    /// The API description with a cache-busting `v` marker.
    pub fn document(&self, version: u64) -> String {
        format!("{}?v={}", self.join("swagger.yaml"), version)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Endpoints {
            base: DEFAULT_API_URL.to_string(),
        }
    }
}

#[cfg(test)]
pub mod tests {
    use anyhow::Result;

    use super::Endpoints;
    use crate::CoreError;

    #[test]
    fn it_derives_every_endpoint_from_the_base() -> Result<()> {
        let endpoints = Endpoints::new("https://docs.example.com/backend")?;

        assert_eq!(endpoints.login(), "https://docs.example.com/backend/auth/github");
        assert_eq!(endpoints.profile(), "https://docs.example.com/backend/user");
        assert_eq!(endpoints.secure(), "https://docs.example.com/backend/secure");
        assert_eq!(endpoints.upload(), "https://docs.example.com/backend/upload");
        assert_eq!(
            endpoints.document(3),
            "https://docs.example.com/backend/swagger.yaml?v=3"
        );

        Ok(())
    }

    #[test]
    fn it_defaults_to_the_local_backend() {
        assert_eq!(Endpoints::default().login(), "http://127.0.0.1:8000/auth/github");
    }

    #[test]
    fn it_rejects_a_base_that_is_not_a_url() {
        assert!(matches!(
            Endpoints::new("not a url"),
            Err(CoreError::InvalidConfiguration(_))
        ));
    }
}
