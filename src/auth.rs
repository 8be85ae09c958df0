use crate::api::ApiError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Authentication failed: {message}")]
    AuthFailed {
        message: String,
        #[source]
        source: ApiError,
    },
    #[error("missing credential: {0}")]
    MissingCredential(&'static str),
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: u64,
    #[serde(default)]
    pub token_type: String,
}

/// An API3 client id/secret pair.
#[derive(Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Exchanges API3 credentials for a session token.
pub struct AuthClient<'a> {
    http: &'a reqwest::Client,
    login_url: String,
}

impl<'a> AuthClient<'a> {
    pub fn new(http: &'a reqwest::Client, login_url: String) -> Self {
        Self { http, login_url }
    }

    pub async fn get_access_token(&self, credentials: &Credentials) -> Result<TokenResponse, AuthError> {
        if credentials.client_id.is_empty() {
            return Err(AuthError::MissingCredential("client id"));
        }
        if credentials.client_secret.is_empty() {
            return Err(AuthError::MissingCredential("client secret"));
        }

        tracing::debug!("Authenticating with login URL: {}", &self.login_url);
        tracing::debug!("Client ID: {}", &credentials.client_id);

        let params = [
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
        ];

        let response = self.http.post(&self.login_url).form(&params).send().await?;

        tracing::debug!("Authentication response status: {}", response.status());

        if response.status().is_success() {
            let body = response.text().await?;
            let token: TokenResponse = serde_json::from_str(&body)?;
            tracing::debug!("Authentication successful, token expires in {}s", token.expires_in);
            Ok(token)
        } else {
            let status = response.status();
            let error_body = match response.text().await {
                Ok(text) => text,
                Err(e) => {
                    tracing::error!("Failed to read error response body: {}", e);
                    "Unable to read error response body".to_string()
                }
            };

            tracing::error!("Authentication request failed with status {}: {}", status, &error_body);

            // The service reports failures as {"message": "...", "documentation_url": "..."}
            let error_details = match serde_json::from_str::<serde_json::Value>(&error_body) {
                Ok(error_json) => match error_json.get("message").and_then(|m| m.as_str()) {
                    Some(message) => message.to_string(),
                    None => error_body.clone(),
                },
                Err(json_err) => {
                    tracing::warn!("Failed to parse error response as JSON: {}", json_err);
                    error_body.clone()
                }
            };

            Err(AuthError::AuthFailed {
                message: format!("HTTP {} {}", status, error_details),
                source: ApiError::from_status(status, error_body),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_hides_secret() {
        let credentials = Credentials::new("abc", "very-secret");
        let printed = format!("{:?}", credentials);
        assert!(printed.contains("abc"));
        assert!(!printed.contains("very-secret"));
    }

    #[tokio::test]
    async fn test_missing_secret_is_rejected_before_any_request() {
        let http = reqwest::Client::new();
        let auth = AuthClient::new(&http, "http://127.0.0.1:9/api/4.0/login".to_string());
        let result = auth.get_access_token(&Credentials::new("abc", "")).await;
        assert!(matches!(result, Err(AuthError::MissingCredential("client secret"))));
    }
}
