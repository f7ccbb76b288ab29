//! Security Analysis Coordinator
//!
//! Attempts the remote classifier first; any failure signal (not
//! configured, network error, malformed response, timeout) collapses
//! into one edge: use the heuristic scorer. From the caller's side
//! `analyze_agent_security` is total - it always resolves with a
//! ThreatReport and never surfaces an error.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;

use super::classifier::{RemoteClassifier, ThreatClassifier};
use super::history;
use super::threat::{self, AgentDescriptor, AnalysisSource, ScoringPolicy, ThreatReport};
use crate::constants;

// ============================================================================
// COORDINATOR
// ============================================================================

/// Coordinator status snapshot
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzerStatus {
    pub classifier_configured: bool,
    pub model_count: u64,
    pub fallback_count: u64,
}

pub struct SecurityAnalysisCoordinator {
    classifier: Option<Box<dyn ThreatClassifier>>,
    policy: ScoringPolicy,
    timeout: Duration,
    // Per-source counters for this coordinator instance
    model_count: AtomicU64,
    fallback_count: AtomicU64,
}

impl SecurityAnalysisCoordinator {
    pub fn new(classifier: Option<Box<dyn ThreatClassifier>>) -> Self {
        Self {
            classifier,
            policy: ScoringPolicy::default(),
            timeout: Duration::from_secs(constants::get_classifier_timeout()),
            model_count: AtomicU64::new(0),
            fallback_count: AtomicU64::new(0),
        }
    }

    /// Build from environment: remote classifier when enabled,
    /// heuristic-only otherwise
    pub fn from_env() -> Self {
        let classifier = RemoteClassifier::from_env()
            .map(|c| Box::new(c) as Box<dyn ThreatClassifier>);
        Self::new(classifier)
    }

    pub fn with_policy(mut self, policy: ScoringPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Analyze an agent descriptor. Never fails.
    pub async fn analyze_agent_security(&self, agent: &AgentDescriptor) -> ThreatReport {
        let report = match &self.classifier {
            None => {
                log::warn!("Threat classifier is unavailable. Using fallback analysis.");
                self.fallback(agent)
            }
            Some(classifier) => {
                match tokio::time::timeout(self.timeout, classifier.classify(agent)).await {
                    Ok(Ok(mut report)) => {
                        report.details.analysis_source = AnalysisSource::Model;
                        self.model_count.fetch_add(1, Ordering::Relaxed);
                        report
                    }
                    Ok(Err(e)) => {
                        log::warn!(
                            "Threat classifier failed ({}). Using fallback analysis.",
                            e
                        );
                        self.fallback(agent)
                    }
                    Err(_) => {
                        log::warn!(
                            "Threat classifier timed out after {:?}. Using fallback analysis.",
                            self.timeout
                        );
                        self.fallback(agent)
                    }
                }
            }
        };

        history::record_analysis(&agent.name, &report);
        report
    }

    /// The deterministic path. Already tagged `fallback` by the scorer.
    fn fallback(&self, agent: &AgentDescriptor) -> ThreatReport {
        self.fallback_count.fetch_add(1, Ordering::Relaxed);
        threat::analyze_with_policy(agent, &self.policy)
    }

    pub fn status(&self) -> AnalyzerStatus {
        AnalyzerStatus {
            classifier_configured: self.classifier.is_some(),
            model_count: self.model_count.load(Ordering::Relaxed),
            fallback_count: self.fallback_count.load(Ordering::Relaxed),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::classifier::ClassifierError;
    use async_trait::async_trait;
    use std::sync::Once;
    use std::thread::ThreadId;

    struct StubClassifier {
        report: ThreatReport,
    }

    #[async_trait]
    impl ThreatClassifier for StubClassifier {
        async fn classify(
            &self,
            _agent: &AgentDescriptor,
        ) -> Result<ThreatReport, ClassifierError> {
            Ok(self.report.clone())
        }
    }

    struct FailingClassifier;

    #[async_trait]
    impl ThreatClassifier for FailingClassifier {
        async fn classify(
            &self,
            _agent: &AgentDescriptor,
        ) -> Result<ThreatReport, ClassifierError> {
            Err(ClassifierError::ServerError(500))
        }
    }

    struct HangingClassifier;

    #[async_trait]
    impl ThreatClassifier for HangingClassifier {
        async fn classify(
            &self,
            _agent: &AgentDescriptor,
        ) -> Result<ThreatReport, ClassifierError> {
            tokio::time::sleep(Duration::from_secs(300)).await;
            Err(ClassifierError::Timeout)
        }
    }

    /// Logger that keeps every record with the emitting thread, so each
    /// test can assert on its own warnings while tests run in parallel.
    struct CapturingLogger {
        records: parking_lot::Mutex<Vec<(ThreadId, log::Level, String)>>,
    }

    impl log::Log for CapturingLogger {
        fn enabled(&self, _metadata: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            self.records.lock().push((
                std::thread::current().id(),
                record.level(),
                record.args().to_string(),
            ));
        }

        fn flush(&self) {}
    }

    static CAPTURE: CapturingLogger = CapturingLogger {
        records: parking_lot::Mutex::new(Vec::new()),
    };

    fn install_capture() {
        static INSTALL: Once = Once::new();
        INSTALL.call_once(|| {
            log::set_logger(&CAPTURE).expect("logger already installed");
            log::set_max_level(log::LevelFilter::Warn);
        });
    }

    /// Warning messages emitted by the current thread
    fn warns_here() -> Vec<String> {
        let me = std::thread::current().id();
        CAPTURE
            .records
            .lock()
            .iter()
            .filter(|(tid, level, _)| *tid == me && *level == log::Level::Warn)
            .map(|(_, _, message)| message.clone())
            .collect()
    }

    fn risky_agent() -> AgentDescriptor {
        AgentDescriptor::new("root-admin")
            .with_description("Admin agent that can execute commands and hack systems")
            .with_capabilities(&["admin", "execute", "delete", "attack"])
    }

    #[tokio::test]
    async fn test_unavailable_classifier_falls_back() {
        let coordinator = SecurityAnalysisCoordinator::new(None);
        let agent = risky_agent();

        let report = coordinator.analyze_agent_security(&agent).await;

        assert_eq!(report.details.analysis_source, AnalysisSource::Fallback);
        // Fallback result must equal a direct heuristic call
        assert_eq!(report, threat::analyze(&agent));
    }

    #[tokio::test]
    async fn test_unavailable_classifier_warns_exactly_once() {
        install_capture();
        let coordinator = SecurityAnalysisCoordinator::new(None);
        let before = warns_here().len();

        coordinator
            .analyze_agent_security(&AgentDescriptor::new("quiet-agent"))
            .await;

        let warns = warns_here();
        assert_eq!(warns.len() - before, 1);
        assert!(warns.last().unwrap().contains("unavailable"));
    }

    #[tokio::test]
    async fn test_failing_classifier_warns_exactly_once() {
        install_capture();
        let coordinator = SecurityAnalysisCoordinator::new(Some(Box::new(FailingClassifier)));
        let before = warns_here().len();

        coordinator
            .analyze_agent_security(&AgentDescriptor::new("quiet-agent"))
            .await;

        let warns = warns_here();
        assert_eq!(warns.len() - before, 1);
        assert!(warns.last().unwrap().contains("failed"));
    }

    #[tokio::test]
    async fn test_model_path_does_not_warn() {
        install_capture();
        let canned = threat::analyze(&risky_agent());
        let coordinator =
            SecurityAnalysisCoordinator::new(Some(Box::new(StubClassifier { report: canned })));
        let before = warns_here().len();

        coordinator
            .analyze_agent_security(&AgentDescriptor::new("any"))
            .await;

        assert_eq!(warns_here().len(), before);
    }

    #[tokio::test]
    async fn test_model_result_is_tagged() {
        let canned = threat::analyze(&risky_agent());
        let coordinator =
            SecurityAnalysisCoordinator::new(Some(Box::new(StubClassifier { report: canned })));

        let report = coordinator
            .analyze_agent_security(&AgentDescriptor::new("any"))
            .await;

        assert_eq!(report.details.analysis_source, AnalysisSource::Model);
    }

    #[tokio::test]
    async fn test_classifier_error_falls_back() {
        let coordinator = SecurityAnalysisCoordinator::new(Some(Box::new(FailingClassifier)));
        let agent = risky_agent();

        let report = coordinator.analyze_agent_security(&agent).await;

        assert_eq!(report.details.analysis_source, AnalysisSource::Fallback);
        assert_eq!(report, threat::analyze(&agent));
    }

    #[tokio::test]
    async fn test_classifier_timeout_falls_back() {
        let coordinator = SecurityAnalysisCoordinator::new(Some(Box::new(HangingClassifier)))
            .with_timeout(Duration::from_millis(50));
        let agent = AgentDescriptor::new("slow-agent").with_capabilities(&["fetch"]);

        let report = coordinator.analyze_agent_security(&agent).await;

        assert_eq!(report.details.analysis_source, AnalysisSource::Fallback);
        assert!(report
            .detected_threats
            .contains(&"NETWORK_ACCESS".to_string()));
    }

    #[tokio::test]
    async fn test_never_fails_on_degenerate_input() {
        let coordinator = SecurityAnalysisCoordinator::new(Some(Box::new(FailingClassifier)));
        let agent = AgentDescriptor::new("");

        let report = coordinator.analyze_agent_security(&agent).await;

        assert!(!report.threats_detected);
        assert_eq!(report.threat_score, 0.0);
    }

    #[tokio::test]
    async fn test_custom_policy_applies_to_fallback() {
        let coordinator = SecurityAnalysisCoordinator::new(None)
            .with_policy(ScoringPolicy::high_sensitivity());
        // PRIVILEGED_NAME + NETWORK_ACCESS = 40, rejectable under high sensitivity
        let agent = AgentDescriptor::new("sudo-agent").with_capabilities(&["fetch"]);

        let report = coordinator.analyze_agent_security(&agent).await;

        assert_eq!(
            report,
            threat::analyze_with_policy(&agent, &ScoringPolicy::high_sensitivity())
        );
    }

    #[tokio::test]
    async fn test_counters_are_per_instance() {
        let first = SecurityAnalysisCoordinator::new(None);
        let second = SecurityAnalysisCoordinator::new(None);

        first
            .analyze_agent_security(&AgentDescriptor::new("counted"))
            .await;
        first
            .analyze_agent_security(&AgentDescriptor::new("counted"))
            .await;

        let status = first.status();
        assert!(!status.classifier_configured);
        assert_eq!(status.fallback_count, 2);
        assert_eq!(status.model_count, 0);
        // A sibling coordinator's counters stay untouched
        assert_eq!(second.status().fallback_count, 0);
    }

    #[tokio::test]
    async fn test_analysis_is_recorded() {
        let coordinator = SecurityAnalysisCoordinator::new(None);
        let agent = AgentDescriptor::new("recorded-agent");

        coordinator.analyze_agent_security(&agent).await;

        let seen = history::recent(500);
        assert!(seen.iter().any(|e| e.agent_name == "recorded-agent"));
    }
}
