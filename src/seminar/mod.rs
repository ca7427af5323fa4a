//! Session assignment, rubric evaluation, poster board allocation, and award
//! computation over a shared repository.
//!
//! Every service holds an `Arc` to the same [`SeminarRepository`] instance
//! and is a pure function of (repository state, arguments); no service keeps
//! state of its own across calls beyond the per-key lock tables guarding the
//! conflict checks.

pub mod awards;
pub mod boards;
pub mod domain;
mod error;
pub mod evaluations;
mod locks;
pub mod repository;
pub mod rubric;
pub mod sessions;

#[cfg(test)]
mod tests;

pub use awards::AwardService;
pub use boards::{BoardAssignmentService, BoardSpace};
pub use domain::{
    Award, AwardCategory, BoardId, Evaluation, EvaluationDraft, EvaluationId, Evaluator,
    EvaluatorId, PosterBoard, PresentationCategory, Presenter, PresenterId, Session, SessionDraft,
    SessionId,
};
pub use error::{ConflictError, NotFoundError, SeminarError, ValidationError};
pub use evaluations::EvaluationService;
pub use repository::{InMemoryRepository, RepositoryError, SeminarRepository};
pub use rubric::{is_valid_score, RubricScores, MAX_CRITERION_SCORE, MIN_CRITERION_SCORE};
pub use sessions::SessionAssignmentService;
