//! Agent Security Vetting - Core Service
//!
//! Vets agent descriptors submitted for registration. The remote threat
//! classifier is tried first when configured; every failure mode degrades
//! to a deterministic keyword heuristic, so analysis never fails.

pub mod constants;
pub mod logic;

pub use logic::analysis::{AnalyzerStatus, SecurityAnalysisCoordinator};
pub use logic::classifier::{
    ClassifierConfig, ClassifierError, RemoteClassifier, ThreatClassifier,
};
pub use logic::threat::{
    analyze, analyze_with_policy, AgentDescriptor, AgentMetadata, AnalysisSource,
    RecommendedAction, ScoringPolicy, Severity, ThreatReport,
};
