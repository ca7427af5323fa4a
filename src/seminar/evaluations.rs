use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use super::domain::{Evaluation, EvaluationDraft, EvaluationId, EvaluatorId, PresenterId};
use super::error::{NotFoundError, SeminarError, ValidationError};
use super::repository::SeminarRepository;
use super::rubric::is_valid_score;

/// Validates, stores, and aggregates rubric evaluations.
pub struct EvaluationService<R> {
    repository: Arc<R>,
}

static EVALUATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_evaluation_id() -> EvaluationId {
    let id = EVALUATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    EvaluationId(format!("eval-{id:06}"))
}

impl<R: SeminarRepository> EvaluationService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Validate and store a submission.
    ///
    /// At most one evaluation exists per (evaluator, presenter) pair: a
    /// second submission for the pair replaces the stored scores, comment,
    /// and session under the original identifier and timestamp.
    pub fn submit(&self, draft: EvaluationDraft) -> Result<Evaluation, SeminarError> {
        let presenter = draft
            .presenter
            .ok_or(ValidationError::MissingField("presenter id"))?;
        let evaluator = draft
            .evaluator
            .ok_or(ValidationError::MissingField("evaluator id"))?;
        let session = draft
            .session
            .ok_or(ValidationError::MissingField("session id"))?;
        let scores = draft.scores.ok_or(ValidationError::MissingField("scores"))?;
        for (criterion, value) in scores.criteria() {
            if !is_valid_score(value) {
                return Err(ValidationError::ScoreOutOfRange { criterion, value }.into());
            }
        }

        let evaluation = match self.find_for_pair(&evaluator, &presenter)? {
            Some(previous) => Evaluation {
                id: previous.id,
                presenter,
                evaluator,
                session,
                scores,
                comment: draft.comment,
                recorded_at: previous.recorded_at,
            },
            None => Evaluation {
                id: next_evaluation_id(),
                presenter,
                evaluator,
                session,
                scores,
                comment: draft.comment,
                recorded_at: Utc::now(),
            },
        };
        self.repository.put_evaluation(evaluation.clone())?;
        debug!(
            evaluation = %evaluation.id,
            presenter = %evaluation.presenter,
            evaluator = %evaluation.evaluator,
            total = evaluation.scores.total(),
            "evaluation recorded"
        );
        Ok(evaluation)
    }

    /// Arithmetic mean of rubric totals across every evaluation of the
    /// presenter. A presenter with no evaluations averages 0.0; that is a
    /// valid state, not an error.
    pub fn average_score(&self, presenter: &PresenterId) -> Result<f64, SeminarError> {
        let totals: Vec<u16> = self
            .repository
            .list_evaluations()?
            .into_iter()
            .filter(|evaluation| &evaluation.presenter == presenter)
            .map(|evaluation| evaluation.scores.total())
            .collect();
        if totals.is_empty() {
            return Ok(0.0);
        }
        let sum: f64 = totals.iter().map(|total| f64::from(*total)).sum();
        Ok(sum / totals.len() as f64)
    }

    pub fn fetch(&self, id: &EvaluationId) -> Result<Evaluation, SeminarError> {
        let evaluation = self
            .repository
            .fetch_evaluation(id)?
            .ok_or_else(|| NotFoundError::Evaluation(id.clone()))?;
        Ok(evaluation)
    }

    pub fn for_presenter(&self, presenter: &PresenterId) -> Result<Vec<Evaluation>, SeminarError> {
        let evaluations = self
            .repository
            .list_evaluations()?
            .into_iter()
            .filter(|evaluation| &evaluation.presenter == presenter)
            .collect();
        Ok(evaluations)
    }

    pub fn by_evaluator(&self, evaluator: &EvaluatorId) -> Result<Vec<Evaluation>, SeminarError> {
        let evaluations = self
            .repository
            .list_evaluations()?
            .into_iter()
            .filter(|evaluation| &evaluation.evaluator == evaluator)
            .collect();
        Ok(evaluations)
    }

    pub fn delete(&self, id: &EvaluationId) -> Result<(), SeminarError> {
        self.fetch(id)?;
        self.repository.delete_evaluation(id)?;
        Ok(())
    }

    fn find_for_pair(
        &self,
        evaluator: &EvaluatorId,
        presenter: &PresenterId,
    ) -> Result<Option<Evaluation>, SeminarError> {
        let existing = self
            .repository
            .list_evaluations()?
            .into_iter()
            .find(|evaluation| {
                &evaluation.evaluator == evaluator && &evaluation.presenter == presenter
            });
        Ok(existing)
    }
}
