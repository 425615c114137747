//! Submit Evaluation use case
//!
//! Runs an evaluation and appends the resulting record to the evaluation log.
//! A judge failure means nothing is written. A log failure is reported
//! together with the record that could not be stored, so the caller can still
//! show the verdict.

use super::run_evaluation::{RunEvaluationError, RunEvaluationUseCase};
use crate::ports::evaluation_log::{EvaluationLog, LogError};
use crate::ports::progress::{EvaluationProgress, NoProgress};
use judge_domain::{EvaluationRecord, EvaluationRequest};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

/// Errors that can occur while submitting an evaluation
#[derive(Error, Debug)]
pub enum SubmitEvaluationError {
    #[error(transparent)]
    Evaluation(#[from] RunEvaluationError),

    #[error("Evaluation finished but could not be saved: {source}")]
    Persistence {
        record: Box<EvaluationRecord>,
        #[source]
        source: LogError,
    },
}

impl SubmitEvaluationError {
    /// The evaluated record, when the judge call itself succeeded.
    pub fn record(&self) -> Option<&EvaluationRecord> {
        match self {
            Self::Persistence { record, .. } => Some(record),
            Self::Evaluation(_) => None,
        }
    }
}

/// Use case for evaluating an answer and persisting the outcome
pub struct SubmitEvaluationUseCase {
    evaluation: RunEvaluationUseCase,
    log: Arc<dyn EvaluationLog>,
}

impl SubmitEvaluationUseCase {
    pub fn new(evaluation: RunEvaluationUseCase, log: Arc<dyn EvaluationLog>) -> Self {
        Self { evaluation, log }
    }

    pub async fn execute(
        &self,
        request: &EvaluationRequest,
    ) -> Result<EvaluationRecord, SubmitEvaluationError> {
        self.execute_with_progress(request, &NoProgress).await
    }

    pub async fn execute_with_progress(
        &self,
        request: &EvaluationRequest,
        progress: &dyn EvaluationProgress,
    ) -> Result<EvaluationRecord, SubmitEvaluationError> {
        let record = self
            .evaluation
            .execute_with_progress(request, progress)
            .await?;

        match self.log.append(&record) {
            Ok(()) => {
                info!("Saved evaluation to {}", self.log.location());
                Ok(record)
            }
            Err(source) => {
                error!(
                    "Failed to save evaluation to {}: {}",
                    self.log.location(),
                    source
                );
                Err(SubmitEvaluationError::Persistence {
                    record: Box::new(record),
                    source,
                })
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::EvaluationParams;
    use crate::ports::judge_gateway::GatewayError;
    use crate::use_cases::run_evaluation::tests::MockGateway;
    use judge_domain::JudgeModel;
    use std::sync::Mutex;

    #[derive(Default)]
    pub(crate) struct MemoryLog {
        pub(crate) records: Mutex<Vec<EvaluationRecord>>,
        pub(crate) fail: bool,
    }

    impl MemoryLog {
        pub(crate) fn failing() -> Self {
            Self {
                records: Mutex::new(Vec::new()),
                fail: true,
            }
        }
    }

    impl EvaluationLog for MemoryLog {
        fn append(&self, record: &EvaluationRecord) -> Result<(), LogError> {
            if self.fail {
                return Err(LogError::Io(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "read-only",
                )));
            }
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }

        fn history(&self) -> Result<Vec<EvaluationRecord>, LogError> {
            Ok(self.records.lock().unwrap().clone())
        }

        fn location(&self) -> String {
            "memory".to_string()
        }
    }

    fn submit(gateway: MockGateway, log: Arc<MemoryLog>) -> SubmitEvaluationUseCase {
        let evaluation = RunEvaluationUseCase::new(Arc::new(gateway), EvaluationParams::default());
        SubmitEvaluationUseCase::new(evaluation, log)
    }

    fn request() -> EvaluationRequest {
        EvaluationRequest::new("Why Rust?", "Memory safety.", JudgeModel::Gemini25Flash).unwrap()
    }

    #[tokio::test]
    async fn test_record_is_appended() {
        let log = Arc::new(MemoryLog::default());
        let use_case = submit(
            MockGateway::replying("Evaluation: Short but right.\nTotal rating: 3"),
            log.clone(),
        );

        let record = use_case.execute(&request()).await.unwrap();

        let stored = log.records.lock().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0], record);
        assert_eq!(stored[0].rating(), Some(3));
    }

    #[tokio::test]
    async fn test_upstream_failure_writes_nothing() {
        let log = Arc::new(MemoryLog::default());
        let use_case = submit(
            MockGateway::new(vec![Err(GatewayError::Authentication(
                "bad key".to_string(),
            ))]),
            log.clone(),
        );

        let err = use_case.execute(&request()).await.unwrap_err();
        assert!(matches!(err, SubmitEvaluationError::Evaluation(_)));
        assert!(err.record().is_none());
        assert!(log.records.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_persistence_failure_keeps_record() {
        let log = Arc::new(MemoryLog::failing());
        let use_case = submit(
            MockGateway::replying("Evaluation: Fine.\nTotal rating: 4"),
            log,
        );

        let err = use_case.execute(&request()).await.unwrap_err();
        let record = err.record().expect("record should survive a log failure");
        assert_eq!(record.rating(), Some(4));
        assert_eq!(record.feedback(), "Fine.");
        assert!(err.to_string().contains("could not be saved"));
    }
}
