//! Threat Types
//!
//! Core types for agent security vetting.
//! KHÔNG chứa logic - chỉ data structures.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ============================================================================
// AGENT DESCRIPTOR (input)
// ============================================================================

/// Agent descriptor submitted for registration/vetting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentDescriptor {
    pub name: String,
    #[serde(default)]
    pub metadata: AgentMetadata,
}

/// Declared agent metadata. Every field is optional - an empty
/// metadata block is a valid (threat-free) input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub capabilities: Vec<String>,
    /// Arbitrary extra fields are carried along untouched
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl AgentDescriptor {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            metadata: AgentMetadata::default(),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.metadata.description = Some(description.to_string());
        self
    }

    pub fn with_capabilities(mut self, capabilities: &[&str]) -> Self {
        self.metadata.capabilities = capabilities.iter().map(|c| c.to_string()).collect();
        self
    }
}

// ============================================================================
// SEVERITY
// ============================================================================

/// Ordinal risk bucket derived from the aggregate threat score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Low = 0,
    Medium = 1,
    High = 2,
    Critical = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
            Severity::Critical => "CRITICAL",
        }
    }

    pub fn rank(&self) -> u8 {
        *self as u8
    }

    pub fn color(&self) -> &'static str {
        match self {
            Severity::Low => "#10b981",      // Green
            Severity::Medium => "#f1c40f",   // Yellow
            Severity::High => "#e67e22",     // Orange
            Severity::Critical => "#ef4444", // Red
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// RECOMMENDED ACTIONS
// ============================================================================

/// Action recommended to the registration endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendedAction {
    #[serde(rename = "REJECT_REGISTRATION")]
    RejectRegistration,
    #[serde(rename = "LOG_SECURITY_EVENT")]
    LogSecurityEvent,
    #[serde(rename = "FLAG_FOR_REVIEW")]
    FlagForReview,
}

impl RecommendedAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendedAction::RejectRegistration => "REJECT_REGISTRATION",
            RecommendedAction::LogSecurityEvent => "LOG_SECURITY_EVENT",
            RecommendedAction::FlagForReview => "FLAG_FOR_REVIEW",
        }
    }
}

// ============================================================================
// ANALYSIS SOURCE (provenance)
// ============================================================================

/// Which path produced a report: the remote model or the local heuristic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisSource {
    Model,
    Fallback,
}

impl AnalysisSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisSource::Model => "model",
            AnalysisSource::Fallback => "fallback",
        }
    }
}

// ============================================================================
// THREAT REPORT (output)
// ============================================================================

/// Per-category finding, kept for explainability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryFinding {
    /// Confidence of the detection (0.0 - 1.0)
    pub confidence: f32,
    /// Every trigger term that actually occurred in the input
    pub matched_terms: Vec<String>,
}

/// Analysis details attached to every report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisDetails {
    pub analysis_source: AnalysisSource,
    /// Category name -> finding
    pub threat_categories: HashMap<String, CategoryFinding>,
}

/// Result of a security analysis. Constructed fresh per call,
/// never mutated after return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatReport {
    /// True iff `detected_threats` is non-empty
    pub threats_detected: bool,
    /// Unique category names, in detection order
    pub detected_threats: Vec<String>,
    /// Sum of fired-rule weights, clamped >= 0
    pub threat_score: f32,
    pub severity: Severity,
    pub recommended_actions: Vec<RecommendedAction>,
    pub details: AnalysisDetails,
}

impl ThreatReport {
    /// A threat-free report, used when nothing matched
    pub fn clean(source: AnalysisSource) -> Self {
        Self {
            threats_detected: false,
            detected_threats: vec![],
            threat_score: 0.0,
            severity: Severity::Low,
            recommended_actions: vec![],
            details: AnalysisDetails {
                analysis_source: source,
                threat_categories: HashMap::new(),
            },
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
