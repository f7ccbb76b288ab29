//! Remote Threat Classifier
//!
//! HTTP client for the external classification service, behind the
//! `ThreatClassifier` trait so the coordinator never depends on the
//! transport directly.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::threat::{AgentDescriptor, ThreatReport};
use crate::constants;

// ============================================================================
// CLASSIFIER BOUNDARY
// ============================================================================

/// An asynchronous capability that maps an agent descriptor to a
/// ThreatReport. Anything that errors here degrades to the heuristic path.
#[async_trait]
pub trait ThreatClassifier: Send + Sync {
    async fn classify(&self, agent: &AgentDescriptor) -> Result<ThreatReport, ClassifierError>;
}

/// Classifier errors. An absent classifier is not an error - the
/// coordinator models that edge as having no classifier at all.
#[derive(Debug, Clone)]
pub enum ClassifierError {
    NetworkError(String),
    ServerError(u16),
    ParseError(String),
    Timeout,
}

impl std::fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError(e) => write!(f, "Network error: {}", e),
            Self::ServerError(code) => write!(f, "Server error: {}", code),
            Self::ParseError(e) => write!(f, "Parse error: {}", e),
            Self::Timeout => write!(f, "Classify call timed out"),
        }
    }
}

impl std::error::Error for ClassifierError {}

// ============================================================================
// REMOTE CLASSIFIER (HTTP)
// ============================================================================

/// Classifier server configuration
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub server_url: String,
    pub api_token: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            server_url: constants::get_classifier_url(),
            api_token: constants::get_classifier_token(),
            timeout_seconds: constants::get_classifier_timeout(),
        }
    }
}

/// Health probe response
#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: i64,
}

/// HTTP client for the remote classifier
pub struct RemoteClassifier {
    config: ClassifierConfig,
    http_client: reqwest::Client,
}

impl RemoteClassifier {
    /// Create new classifier client
    pub fn new(config: ClassifierConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            http_client,
        }
    }

    /// Build from environment. Returns None when the classifier is
    /// disabled - the "not configured" edge of the analysis pipeline.
    pub fn from_env() -> Option<Self> {
        if !constants::is_classifier_enabled() {
            return None;
        }
        Some(Self::new(ClassifierConfig::default()))
    }

    /// Check classifier server health
    pub async fn health_check(&self) -> Result<HealthResponse, ClassifierError> {
        let url = format!("{}/health", self.config.server_url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| ClassifierError::NetworkError(e.to_string()))?;

        if response.status().is_success() {
            response
                .json()
                .await
                .map_err(|e| ClassifierError::ParseError(e.to_string()))
        } else {
            Err(ClassifierError::ServerError(response.status().as_u16()))
        }
    }

    /// POST the descriptor to the classify endpoint
    async fn request_classification(
        &self,
        agent: &AgentDescriptor,
    ) -> Result<ThreatReport, ClassifierError> {
        let url = format!("{}/api/v1/classify", self.config.server_url);

        let mut request = self.http_client.post(&url).json(agent);
        if let Some(token) = &self.config.api_token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClassifierError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ClassifierError::ServerError(response.status().as_u16()));
        }

        let report: ThreatReport = response
            .json()
            .await
            .map_err(|e| ClassifierError::ParseError(e.to_string()))?;

        // A structurally valid but nonsensical score counts as malformed
        if !report.threat_score.is_finite() || report.threat_score < 0.0 {
            return Err(ClassifierError::ParseError(format!(
                "invalid threat score: {}",
                report.threat_score
            )));
        }

        Ok(report)
    }
}

#[async_trait]
impl ThreatClassifier for RemoteClassifier {
    async fn classify(&self, agent: &AgentDescriptor) -> Result<ThreatReport, ClassifierError> {
        self.request_classification(agent).await
    }
}

// ============================================================================
// TESTS
// ============================================================================
