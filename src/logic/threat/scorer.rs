//! Heuristic Threat Scorer
//!
//! CHỈ chứa logic scoring - không có types, không có policy.
//! Input: AgentDescriptor
//! Output: ThreatReport
//!
//! Pure and total: no I/O, no clock, no randomness, and no error path.
//! Missing or empty metadata simply means nothing to flag.

use std::collections::HashMap;

use super::rules::{DetectionRule, RuleScope, ScoringPolicy, DETECTION_RULES};
use super::types::{
    AgentDescriptor, AnalysisDetails, AnalysisSource, CategoryFinding, RecommendedAction,
    Severity, ThreatReport,
};

// ============================================================================
// MAIN SCORING FUNCTION
// ============================================================================

/// Score an agent descriptor with the default policy
///
/// CORE LOGIC - Deterministic and Explainable
pub fn analyze(agent: &AgentDescriptor) -> ThreatReport {
    analyze_with_policy(agent, &ScoringPolicy::default())
}

/// Score an agent descriptor with custom thresholds
pub fn analyze_with_policy(agent: &AgentDescriptor, policy: &ScoringPolicy) -> ThreatReport {
    let name_corpus = agent.name.to_lowercase();
    let profile_corpus = build_profile_corpus(agent);

    let mut detected_threats = Vec::new();
    let mut threat_categories = HashMap::new();
    let mut threat_score = 0.0f32;

    for rule in DETECTION_RULES {
        let corpus = match rule.scope {
            RuleScope::Name => &name_corpus,
            RuleScope::Profile => &profile_corpus,
        };

        let matched_terms = matched_terms(rule, corpus);
        if matched_terms.is_empty() {
            continue;
        }

        // A rule fires at most once, no matter how many terms hit
        threat_score += rule.weight;
        detected_threats.push(rule.category.to_string());
        threat_categories.insert(
            rule.category.to_string(),
            CategoryFinding {
                confidence: rule.confidence,
                matched_terms,
            },
        );
    }

    let threat_score = threat_score.max(0.0);
    let severity = severity_for(threat_score, policy);
    let recommended_actions = actions_for(threat_score, policy);

    ThreatReport {
        threats_detected: !detected_threats.is_empty(),
        detected_threats,
        threat_score,
        severity,
        recommended_actions,
        details: AnalysisDetails {
            analysis_source: AnalysisSource::Fallback,
            threat_categories,
        },
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// Lowercased description + joined capabilities
fn build_profile_corpus(agent: &AgentDescriptor) -> String {
    let mut corpus = agent
        .metadata
        .description
        .clone()
        .unwrap_or_default();

    for capability in &agent.metadata.capabilities {
        corpus.push(' ');
        corpus.push_str(capability);
    }

    corpus.to_lowercase()
}

/// Every trigger term occurring as a substring of the corpus
fn matched_terms(rule: &DetectionRule, corpus: &str) -> Vec<String> {
    rule.terms
        .iter()
        .filter(|term| corpus.contains(*term))
        .map(|term| term.to_string())
        .collect()
}

/// Severity bucketing - monotonic, non-overlapping
fn severity_for(score: f32, policy: &ScoringPolicy) -> Severity {
    if score <= 0.0 {
        Severity::Low
    } else if score >= policy.critical_min {
        Severity::Critical
    } else if score >= policy.high_min {
        Severity::High
    } else {
        Severity::Medium
    }
}

/// Recommended actions derived from the aggregate score
fn actions_for(score: f32, policy: &ScoringPolicy) -> Vec<RecommendedAction> {
    if score <= 0.0 {
        vec![]
    } else if score >= policy.reject_min {
        vec![
            RecommendedAction::RejectRegistration,
            RecommendedAction::LogSecurityEvent,
        ]
    } else if score >= policy.high_min {
        vec![
            RecommendedAction::LogSecurityEvent,
            RecommendedAction::FlagForReview,
        ]
    } else {
        vec![RecommendedAction::LogSecurityEvent]
    }
}

// ============================================================================
// TESTS
// ============================================================================
