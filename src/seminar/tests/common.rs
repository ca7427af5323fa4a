use std::sync::Arc;

use chrono::NaiveDate;

use crate::seminar::domain::{
    EvaluationDraft, EvaluatorId, PresentationCategory, Presenter, PresenterId, SessionDraft,
    SessionId,
};
use crate::seminar::rubric::RubricScores;
use crate::seminar::{
    AwardService, BoardAssignmentService, BoardSpace, EvaluationService, InMemoryRepository,
    SessionAssignmentService,
};

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn presenter(id: &str, category: PresentationCategory) -> Presenter {
    Presenter {
        id: PresenterId(id.to_string()),
        category,
        vote_count: None,
        has_voted: None,
    }
}

pub(super) fn voting_presenter(id: &str, category: PresentationCategory, votes: u32) -> Presenter {
    Presenter {
        id: PresenterId(id.to_string()),
        category,
        vote_count: Some(votes),
        has_voted: Some(true),
    }
}

/// Repository with two oral and one poster presenter registered, in that
/// order.
pub(super) fn seeded_repository() -> Arc<InMemoryRepository> {
    let repository = Arc::new(InMemoryRepository::new());
    repository.register_presenter(presenter("pres-ada", PresentationCategory::Oral));
    repository.register_presenter(presenter("pres-bjorn", PresentationCategory::Oral));
    repository.register_presenter(presenter("pres-chen", PresentationCategory::Poster));
    repository
}

pub(super) fn session_service(
    repository: &Arc<InMemoryRepository>,
) -> SessionAssignmentService<InMemoryRepository> {
    SessionAssignmentService::new(Arc::clone(repository))
}

pub(super) fn evaluation_service(
    repository: &Arc<InMemoryRepository>,
) -> EvaluationService<InMemoryRepository> {
    EvaluationService::new(Arc::clone(repository))
}

pub(super) fn board_service(
    repository: &Arc<InMemoryRepository>,
    space: BoardSpace,
) -> BoardAssignmentService<InMemoryRepository> {
    BoardAssignmentService::new(Arc::clone(repository), space)
}

pub(super) fn award_service(
    repository: &Arc<InMemoryRepository>,
) -> AwardService<InMemoryRepository> {
    AwardService::new(Arc::clone(repository))
}

pub(super) fn draft(date: NaiveDate, venue: &str, category: PresentationCategory) -> SessionDraft {
    SessionDraft {
        date: Some(date),
        venue: venue.to_string(),
        category: Some(category),
    }
}

pub(super) fn scores(content: u8, organization: u8, delivery: u8, engagement: u8) -> RubricScores {
    RubricScores::new(content, organization, delivery, engagement)
}

pub(super) fn evaluation_draft(
    evaluator: &str,
    presenter: &str,
    session: &SessionId,
    scores: RubricScores,
) -> EvaluationDraft {
    EvaluationDraft {
        presenter: Some(PresenterId(presenter.to_string())),
        evaluator: Some(EvaluatorId(evaluator.to_string())),
        session: Some(session.clone()),
        scores: Some(scores),
        comment: None,
    }
}

pub(super) fn presenter_id(id: &str) -> PresenterId {
    PresenterId(id.to_string())
}

pub(super) fn evaluator_id(id: &str) -> EvaluatorId {
    EvaluatorId(id.to_string())
}
