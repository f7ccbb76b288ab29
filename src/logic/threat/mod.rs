//! Threat Module
//!
//! Heuristic threat scoring cho agent descriptors. Đây là CORE STEP -
//! the deterministic path every analysis can fall back to.
//!
//! ## Structure
//! - `types`: Core types (AgentDescriptor, ThreatReport, Severity, etc.)
//! - `rules`: Detection rule table, thresholds and scoring policy
//! - `scorer`: Scoring logic
//!
//! ## Usage
//! ```ignore
//! use crate::logic::threat::{analyze, AgentDescriptor, Severity};
//!
//! let report = analyze(&agent);
//! match report.severity {
//!     Severity::Low => println!("Safe"),
//!     Severity::Medium | Severity::High => println!("Review"),
//!     Severity::Critical => println!("Reject"),
//! }
//! ```

pub mod rules;
pub mod scorer;
pub mod types;

// Re-export main types for convenience
pub use types::{
    AgentDescriptor,
    AgentMetadata,
    AnalysisDetails,
    AnalysisSource,
    CategoryFinding,
    RecommendedAction,
    Severity,
    ThreatReport,
};

pub use rules::{DetectionRule, RuleScope, ScoringPolicy, DETECTION_RULES};

pub use scorer::{analyze, analyze_with_policy};
