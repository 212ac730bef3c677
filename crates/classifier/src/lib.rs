//! HTTP client for the external AI text-classification service.
//!
//! The service categorizes complaint descriptions, suggests relevant
//! government schemes, and answers help-assistant questions. It is treated
//! as a black box: categorization and scheme lookup degrade to defaults
//! when the service is unreachable or unconfigured, so filing a complaint
//! never fails because the collaborator is down. Only the chat passthrough
//! surfaces errors to its caller.

use nivaran_core::complaint::Category;
use serde::Deserialize;

/// HTTP client for the classification/advisory service.
///
/// Built from `CLASSIFIER_URL`; when that is unset the client is disabled
/// and every call takes the degraded path immediately.
pub struct Classifier {
    client: reqwest::Client,
    base_url: Option<String>,
}

/// Errors from the classifier REST layer.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    /// No `CLASSIFIER_URL` configured.
    #[error("Classifier service is not configured")]
    Unconfigured,

    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("Classifier API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

#[derive(Debug, Deserialize)]
struct CategorizeResponse {
    category: String,
}

#[derive(Debug, Deserialize)]
struct SchemeResponse {
    schemes: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    response: String,
}

impl Classifier {
    /// Create a client for the service at `base_url`, e.g. `http://host:8600`.
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: Some(base_url),
        }
    }

    /// Create a disabled client: every call degrades without any network I/O.
    pub fn disabled() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: None,
        }
    }

    /// Build from the `CLASSIFIER_URL` environment variable.
    pub fn from_env() -> Self {
        match std::env::var("CLASSIFIER_URL") {
            Ok(url) if !url.is_empty() => Self::new(url),
            _ => {
                tracing::warn!(
                    "CLASSIFIER_URL not set; complaints will be filed under the OTHER category"
                );
                Self::disabled()
            }
        }
    }

    /// Categorize a complaint description.
    ///
    /// Degrades to [`Category::Other`] on any failure, including an
    /// unparsable category name in the response.
    pub async fn categorize(&self, description: &str) -> Category {
        match self.try_categorize(description).await {
            Ok(category) => category,
            Err(err) => {
                tracing::warn!(error = %err, "Categorization failed, defaulting to OTHER");
                Category::Other
            }
        }
    }

    /// Fetch government-scheme advisory text for a categorized complaint.
    ///
    /// Degrades to an empty advisory on any failure.
    pub async fn scheme_info(&self, category: Category, description: &str) -> String {
        match self.try_scheme_info(category, description).await {
            Ok(schemes) => schemes,
            Err(err) => {
                tracing::warn!(error = %err, "Scheme lookup failed, returning empty advisory");
                String::new()
            }
        }
    }

    /// Help-assistant passthrough. Unlike categorization this propagates
    /// failure; the chat endpoint reports it in its own error envelope.
    pub async fn chat(&self, message: &str) -> Result<String, ClassifierError> {
        let base = self.base_url.as_deref().ok_or(ClassifierError::Unconfigured)?;

        let response = self
            .client
            .post(format!("{base}/chat"))
            .json(&serde_json::json!({ "message": message }))
            .send()
            .await?;

        let parsed: ChatResponse = Self::parse_response(response).await?;
        Ok(parsed.response)
    }

    async fn try_categorize(&self, description: &str) -> Result<Category, ClassifierError> {
        let base = self.base_url.as_deref().ok_or(ClassifierError::Unconfigured)?;

        let response = self
            .client
            .post(format!("{base}/categorize"))
            .json(&serde_json::json!({ "description": description }))
            .send()
            .await?;

        let parsed: CategorizeResponse = Self::parse_response(response).await?;
        Ok(parsed.category.parse().unwrap_or(Category::Other))
    }

    async fn try_scheme_info(
        &self,
        category: Category,
        description: &str,
    ) -> Result<String, ClassifierError> {
        let base = self.base_url.as_deref().ok_or(ClassifierError::Unconfigured)?;

        let response = self
            .client
            .post(format!("{base}/schemes"))
            .json(&serde_json::json!({
                "category": category,
                "description": description,
            }))
            .send()
            .await?;

        let parsed: SchemeResponse = Self::parse_response(response).await?;
        Ok(parsed.schemes)
    }

    /// Decode a 2xx response as JSON, or capture the error body.
    async fn parse_response<T: for<'de> Deserialize<'de>>(
        response: reqwest::Response,
    ) -> Result<T, ClassifierError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifierError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[tokio::test]
    async fn test_disabled_client_degrades_to_other() {
        let classifier = Classifier::disabled();
        let category = classifier.categorize("water pipe burst on our street").await;
        assert_eq!(category, Category::Other);
    }

    #[tokio::test]
    async fn test_disabled_client_returns_empty_advisory() {
        let classifier = Classifier::disabled();
        let schemes = classifier.scheme_info(Category::WaterSupply, "pipe burst").await;
        assert!(schemes.is_empty());
    }

    #[tokio::test]
    async fn test_disabled_client_chat_errors() {
        let classifier = Classifier::disabled();
        let result = classifier.chat("how do I track my complaint?").await;
        assert_matches!(result, Err(ClassifierError::Unconfigured));
    }
}
