//! Threat Detection Rules & Thresholds
//!
//! Định nghĩa rule table và thresholds cho scoring.
//! KHÔNG chứa logic - chỉ constants và config.

use serde::{Deserialize, Serialize};

// ============================================================================
// DETECTION RULE TABLE
// ============================================================================

/// Which fields a rule scans
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleScope {
    /// Agent name only
    Name,
    /// Description + declared capabilities
    Profile,
}

/// One keyword detection rule. The table below is data, not branching
/// code - adding a category never touches control flow.
#[derive(Debug, Clone, Copy)]
pub struct DetectionRule {
    pub category: &'static str,
    pub scope: RuleScope,
    pub terms: &'static [&'static str],
    pub confidence: f32,
    pub weight: f32,
}

/// The default rule set
pub const DETECTION_RULES: &[DetectionRule] = &[
    DetectionRule {
        category: "NETWORK_ACCESS",
        scope: RuleScope::Profile,
        terms: &["fetch", "network", "request", "http"],
        confidence: 0.6,
        weight: 15.0,
    },
    DetectionRule {
        category: "PRIVILEGED_NAME",
        scope: RuleScope::Name,
        terms: &["admin", "root", "sudo", "system"],
        confidence: 0.8,
        weight: 25.0,
    },
    DetectionRule {
        category: "DESTRUCTIVE_CAPABILITY",
        scope: RuleScope::Profile,
        terms: &["delete", "destroy", "attack", "hack"],
        confidence: 0.7,
        weight: 30.0,
    },
    DetectionRule {
        category: "COMMAND_EXECUTION",
        scope: RuleScope::Profile,
        terms: &["execute", "exec", "shell", "command"],
        confidence: 0.7,
        weight: 25.0,
    },
];

// ============================================================================
// THRESHOLDS (Constants - không đổi lúc runtime)
// ============================================================================

/// At or above this score = High severity
pub const HIGH_THRESHOLD: f32 = 40.0;

/// At or above this score = Critical severity
pub const CRITICAL_THRESHOLD: f32 = 60.0;

/// At or above this score = recommend rejecting the registration
pub const REJECT_THRESHOLD: f32 = 60.0;

// ============================================================================
// CONFIGURABLE POLICY (for runtime adjustment)
// ============================================================================

/// Scoring thresholds (configurable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringPolicy {
    /// At or above this = High
    pub high_min: f32,
    /// At or above this = Critical
    pub critical_min: f32,
    /// At or above this = recommend REJECT_REGISTRATION
    pub reject_min: f32,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            high_min: HIGH_THRESHOLD,
            critical_min: CRITICAL_THRESHOLD,
            reject_min: REJECT_THRESHOLD,
        }
    }
}

impl ScoringPolicy {
    /// High sensitivity - lower thresholds, more rejections
    pub fn high_sensitivity() -> Self {
        Self {
            high_min: 25.0,
            critical_min: 40.0,
            reject_min: 40.0,
        }
    }

    /// Low sensitivity - higher thresholds, fewer rejections
    pub fn low_sensitivity() -> Self {
        Self {
            high_min: 55.0,
            critical_min: 80.0,
            reject_min: 80.0,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
