use std::sync::Arc;

use tracing::info;

use super::domain::{Award, AwardCategory, PresentationCategory, PresenterId};
use super::error::SeminarError;
use super::evaluations::EvaluationService;
use super::repository::SeminarRepository;

/// Derives closing-ceremony awards from stored evaluations and vote tallies.
///
/// Awards are recomputed values: the service may clear and regenerate them at
/// will without losing information.
pub struct AwardService<R> {
    repository: Arc<R>,
    evaluations: EvaluationService<R>,
}

impl<R: SeminarRepository> AwardService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            evaluations: EvaluationService::new(Arc::clone(&repository)),
            repository,
        }
    }

    /// Highest average rubric total among presenters of the category.
    ///
    /// Presenters are visited in registration order and the running maximum
    /// only moves on a strict improvement, so the first presenter to reach
    /// the best score keeps it on ties. No award while every average is zero.
    pub fn best_by_category(
        &self,
        category: PresentationCategory,
    ) -> Result<Option<Award>, SeminarError> {
        let mut best: Option<Award> = None;
        for presenter in self.repository.list_presenters()? {
            if presenter.category != category {
                continue;
            }
            let average = self.evaluations.average_score(&presenter.id)?;
            let current = best.as_ref().map_or(0.0, |award| award.score);
            if average > current {
                best = Some(Award {
                    category: AwardCategory::best_of(category),
                    presenter: presenter.id,
                    score: average,
                });
            }
        }
        Ok(best)
    }

    /// Highest raw vote count from an externally supplied tally. The tally is
    /// an ordered sequence: on equal counts the earlier entry wins.
    pub fn peoples_choice(&self, votes: &[(PresenterId, u64)]) -> Option<Award> {
        let mut best: Option<Award> = None;
        for (presenter, count) in votes {
            let score = *count as f64;
            let current = best.as_ref().map_or(0.0, |award| award.score);
            if score > current {
                best = Some(Award {
                    category: AwardCategory::PeoplesChoice,
                    presenter: presenter.clone(),
                    score,
                });
            }
        }
        best
    }

    /// Ordered tally built from stored presenter vote counts, suitable for
    /// [`Self::peoples_choice`]. Presenters without a recorded count are
    /// skipped.
    pub fn vote_tally(&self) -> Result<Vec<(PresenterId, u64)>, SeminarError> {
        let mut tally = Vec::new();
        for presenter in self.repository.list_presenters()? {
            if let Some(count) = presenter.vote_count {
                tally.push((presenter.id, u64::from(count)));
            }
        }
        Ok(tally)
    }

    /// Compute and persist the closing-ceremony agenda: Best Oral, Best
    /// Poster, and, only when a tally is supplied, People's Choice. Previously
    /// persisted awards are discarded first; slots without a winner are
    /// omitted rather than filled with placeholders.
    pub fn generate_agenda(
        &self,
        votes: Option<&[(PresenterId, u64)]>,
    ) -> Result<Vec<Award>, SeminarError> {
        self.repository.clear_awards()?;
        let mut agenda = Vec::new();
        if let Some(award) = self.best_by_category(PresentationCategory::Oral)? {
            agenda.push(award);
        }
        if let Some(award) = self.best_by_category(PresentationCategory::Poster)? {
            agenda.push(award);
        }
        if let Some(tally) = votes {
            if let Some(award) = self.peoples_choice(tally) {
                agenda.push(award);
            }
        }
        for award in &agenda {
            self.repository.append_award(award.clone())?;
        }
        info!(awards = agenda.len(), "closing ceremony agenda generated");
        Ok(agenda)
    }

    /// Discard all persisted awards.
    pub fn clear_awards(&self) -> Result<(), SeminarError> {
        self.repository.clear_awards()?;
        Ok(())
    }
}
