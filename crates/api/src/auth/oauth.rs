//! Google OAuth code exchange and userinfo lookup.
//!
//! The client is constructed once at startup from [`GoogleOAuthConfig`] and
//! injected into application state; configuration problems surface as a
//! startup panic, never mid-request. Network calls inherit the inbound
//! request's lifetime (axum drops the handler future on disconnect) and are
//! additionally bounded by the client timeout.

use serde::Deserialize;

/// Google OAuth configuration.
#[derive(Debug, Clone)]
pub struct GoogleOAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Callback URL registered with the provider.
    pub redirect_uri: String,
    /// Authorization endpoint; overridable for tests.
    pub auth_url: String,
    /// Token exchange endpoint; overridable for tests.
    pub token_url: String,
    /// Userinfo endpoint; overridable for tests.
    pub userinfo_url: String,
}

impl GoogleOAuthConfig {
    /// Load OAuth configuration from environment variables.
    ///
    /// | Env Var                     | Required | Default                   |
    /// |-----------------------------|----------|---------------------------|
    /// | `GOOGLE_OAUTH_CLIENT_ID`    | **yes**  | --                        |
    /// | `GOOGLE_OAUTH_CLIENT_SECRET`| **yes**  | --                        |
    /// | `GOOGLE_OAUTH_REDIRECT_URI` | **yes**  | --                        |
    /// | `GOOGLE_OAUTH_AUTH_URL`     | no       | Google authorize endpoint |
    /// | `GOOGLE_OAUTH_TOKEN_URL`    | no       | Google token endpoint     |
    /// | `GOOGLE_OAUTH_USERINFO_URL` | no       | Google userinfo endpoint  |
    ///
    /// # Panics
    ///
    /// Panics if a required variable is missing or empty.
    pub fn from_env() -> Self {
        let client_id = std::env::var("GOOGLE_OAUTH_CLIENT_ID")
            .expect("GOOGLE_OAUTH_CLIENT_ID must be set in the environment");
        let client_secret = std::env::var("GOOGLE_OAUTH_CLIENT_SECRET")
            .expect("GOOGLE_OAUTH_CLIENT_SECRET must be set in the environment");
        let redirect_uri = std::env::var("GOOGLE_OAUTH_REDIRECT_URI")
            .expect("GOOGLE_OAUTH_REDIRECT_URI must be set in the environment");
        assert!(!client_id.is_empty(), "GOOGLE_OAUTH_CLIENT_ID must not be empty");
        assert!(
            !client_secret.is_empty(),
            "GOOGLE_OAUTH_CLIENT_SECRET must not be empty"
        );

        let auth_url = std::env::var("GOOGLE_OAUTH_AUTH_URL")
            .unwrap_or_else(|_| "https://accounts.google.com/o/oauth2/v2/auth".into());
        let token_url = std::env::var("GOOGLE_OAUTH_TOKEN_URL")
            .unwrap_or_else(|_| "https://oauth2.googleapis.com/token".into());
        let userinfo_url = std::env::var("GOOGLE_OAUTH_USERINFO_URL")
            .unwrap_or_else(|_| "https://openidconnect.googleapis.com/v1/userinfo".into());

        Self {
            client_id,
            client_secret,
            redirect_uri,
            auth_url,
            token_url,
            userinfo_url,
        }
    }
}

/// Errors from the OAuth provider round trips.
#[derive(Debug, thiserror::Error)]
pub enum OAuthError {
    #[error("token exchange failed: {0}")]
    Exchange(String),

    #[error("userinfo fetch failed: {0}")]
    Userinfo(String),

    #[error("provider returned no verified email")]
    MissingEmail,
}

/// Token endpoint response. Only the access token is consumed.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Userinfo endpoint response.
#[derive(Debug, Deserialize)]
struct UserInfo {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    email_verified: Option<bool>,
}

/// OAuth client for the Google provider.
pub struct GoogleOAuthClient {
    config: GoogleOAuthConfig,
    http: reqwest::Client,
}

impl GoogleOAuthClient {
    pub fn new(config: GoogleOAuthConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("failed to build OAuth HTTP client");
        Self { config, http }
    }

    /// Build the provider authorization URL carrying the CSRF state nonce.
    pub fn authorize_url(&self, state: &str) -> String {
        let url = reqwest::Url::parse_with_params(
            &self.config.auth_url,
            &[
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("response_type", "code"),
                ("scope", "openid email profile"),
                ("state", state),
            ],
        )
        .expect("auth_url validated at startup");
        url.into()
    }

    /// Exchange an authorization code for an access token.
    pub async fn exchange_code(&self, code: &str) -> Result<String, OAuthError> {
        let params = [
            ("code", code),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];

        let response = self
            .http
            .post(&self.config.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| OAuthError::Exchange(e.to_string()))?;

        if !response.status().is_success() {
            return Err(OAuthError::Exchange(format!(
                "provider returned {}",
                response.status()
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| OAuthError::Exchange(e.to_string()))?;
        Ok(token.access_token)
    }

    /// Fetch the verified email for an access token.
    pub async fn fetch_email(&self, access_token: &str) -> Result<String, OAuthError> {
        let response = self
            .http
            .get(&self.config.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| OAuthError::Userinfo(e.to_string()))?;

        if !response.status().is_success() {
            return Err(OAuthError::Userinfo(format!(
                "provider returned {}",
                response.status()
            )));
        }

        let info: UserInfo = response
            .json()
            .await
            .map_err(|e| OAuthError::Userinfo(e.to_string()))?;

        match info.email {
            Some(email) if info.email_verified.unwrap_or(true) => Ok(email),
            _ => Err(OAuthError::MissingEmail),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> GoogleOAuthConfig {
        GoogleOAuthConfig {
            client_id: "client-123".into(),
            client_secret: "shh".into(),
            redirect_uri: "http://localhost:3000/api/v1/auth/callback".into(),
            auth_url: "https://accounts.google.com/o/oauth2/v2/auth".into(),
            token_url: "https://oauth2.googleapis.com/token".into(),
            userinfo_url: "https://openidconnect.googleapis.com/v1/userinfo".into(),
        }
    }

    #[test]
    fn test_authorize_url_carries_state() {
        let client = GoogleOAuthClient::new(test_config());
        let url = client.authorize_url("nonce-abc");
        assert!(url.contains("state=nonce-abc"));
        assert!(url.contains("client_id=client-123"));
        assert!(url.contains("response_type=code"));
    }
}
