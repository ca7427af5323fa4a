use chrono::NaiveDate;

use super::domain::{
    BoardId, EvaluationId, PresentationCategory, PresenterId, SessionId,
};
use super::repository::RepositoryError;

/// Malformed or missing required input. Always caller-recoverable; the caller
/// is expected to re-prompt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("session date is required")]
    MissingDate,
    #[error("venue must not be blank")]
    BlankVenue,
    #[error("session category is required")]
    MissingCategory,
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("{0} must not be blank")]
    BlankField(&'static str),
    #[error("{criterion} score {value} is outside the 1-10 rubric range")]
    ScoreOutOfRange { criterion: &'static str, value: u8 },
    #[error("board {0} is outside the configured board space")]
    UnknownBoard(BoardId),
}

/// An operation referenced a record that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotFoundError {
    #[error("session {0} not found")]
    Session(SessionId),
    #[error("presenter {0} not found")]
    Presenter(PresenterId),
    #[error("evaluation {0} not found")]
    Evaluation(EvaluationId),
}

/// An assignment would violate a uniqueness invariant. Carries the conflicting
/// occupant so callers can render a useful message.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConflictError {
    #[error("participant {participant} is already booked on {date} in session {session}")]
    DateBooked {
        participant: String,
        date: NaiveDate,
        session: SessionId,
    },
    #[error("board {board} is already assigned to presenter {occupant}")]
    BoardOccupied { board: BoardId, occupant: PresenterId },
    #[error(
        "presenter {presenter} is registered for {presenter_category} but session {session} is {session_category}"
    )]
    CategoryMismatch {
        presenter: PresenterId,
        presenter_category: PresentationCategory,
        session: SessionId,
        session_category: PresentationCategory,
    },
}

/// Error raised by the engine services. Every operation either succeeds or
/// returns one of these, leaving the repository in its prior consistent state.
#[derive(Debug, thiserror::Error)]
pub enum SeminarError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    NotFound(#[from] NotFoundError),
    #[error(transparent)]
    Conflict(#[from] ConflictError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
