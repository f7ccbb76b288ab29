//! Analysis History
//!
//! In-memory record of every security analysis, capped to a fixed
//! window. Lets the surrounding service answer "what did we vet
//! recently" without any persistence.

use std::collections::HashMap;

use chrono::Utc;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::Serialize;
use uuid::Uuid;

use super::threat::{AnalysisSource, ThreatReport};

// ============================================================================
// STATE
// ============================================================================

static ANALYSIS_HISTORY: Lazy<RwLock<Vec<AnalysisEvent>>> =
    Lazy::new(|| RwLock::new(Vec::new()));

const MAX_HISTORY: usize = 500;

// ============================================================================
// EVENT TYPES
// ============================================================================

/// One completed analysis
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisEvent {
    pub id: Uuid,
    pub agent_name: String,
    pub threat_score: f32,
    pub severity: String,
    pub source: AnalysisSource,
    pub timestamp: i64,
}

// ============================================================================
// RECORDING
// ============================================================================

/// Record a completed analysis
pub fn record_analysis(agent_name: &str, report: &ThreatReport) -> AnalysisEvent {
    let event = AnalysisEvent {
        id: Uuid::new_v4(),
        agent_name: agent_name.to_string(),
        threat_score: report.threat_score,
        severity: report.severity.as_str().to_string(),
        source: report.details.analysis_source,
        timestamp: Utc::now().timestamp(),
    };

    push_capped(&mut ANALYSIS_HISTORY.write(), event.clone(), MAX_HISTORY);

    event
}

/// Append an event, evicting the oldest entries past `max`
fn push_capped(history: &mut Vec<AnalysisEvent>, event: AnalysisEvent, max: usize) {
    history.push(event);

    let current_len = history.len();
    if current_len > max {
        history.drain(0..current_len - max);
    }
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Get recent analyses, newest last
pub fn recent(limit: usize) -> Vec<AnalysisEvent> {
    let history = ANALYSIS_HISTORY.read();
    let start = history.len().saturating_sub(limit);
    history[start..].to_vec()
}

/// Clear the history
pub fn clear() {
    ANALYSIS_HISTORY.write().clear();
}

// ============================================================================
// STATISTICS
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisStats {
    pub total: usize,
    pub model_count: usize,
    pub fallback_count: usize,
    pub by_severity: HashMap<String, usize>,
}

pub fn get_stats() -> AnalysisStats {
    let history = ANALYSIS_HISTORY.read();

    let mut by_severity: HashMap<String, usize> = HashMap::new();
    let mut model = 0;
    let mut fallback = 0;

    for event in history.iter() {
        *by_severity.entry(event.severity.clone()).or_insert(0) += 1;
        match event.source {
            AnalysisSource::Model => model += 1,
            AnalysisSource::Fallback => fallback += 1,
        }
    }

    AnalysisStats {
        total: history.len(),
        model_count: model,
        fallback_count: fallback,
        by_severity,
    }
}

// ============================================================================
// TESTS
// ============================================================================
