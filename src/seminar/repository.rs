use std::sync::{Mutex, MutexGuard, PoisonError};

use super::domain::{
    Award, BoardId, Evaluation, EvaluationId, Evaluator, EvaluatorId, PosterBoard, Presenter,
    PresenterId, Session, SessionId,
};

/// Storage abstraction so the services can be exercised in isolation.
///
/// All services share one instance and observe each other's writes
/// immediately. Implementations must return `list_*` results in insertion
/// order; award selection treats that order as its tie-break.
pub trait SeminarRepository: Send + Sync {
    fn fetch_session(&self, id: &SessionId) -> Result<Option<Session>, RepositoryError>;
    fn put_session(&self, session: Session) -> Result<(), RepositoryError>;
    fn delete_session(&self, id: &SessionId) -> Result<(), RepositoryError>;
    fn list_sessions(&self) -> Result<Vec<Session>, RepositoryError>;

    fn fetch_evaluation(&self, id: &EvaluationId) -> Result<Option<Evaluation>, RepositoryError>;
    fn list_evaluations(&self) -> Result<Vec<Evaluation>, RepositoryError>;
    fn put_evaluation(&self, evaluation: Evaluation) -> Result<(), RepositoryError>;
    fn delete_evaluation(&self, id: &EvaluationId) -> Result<(), RepositoryError>;

    fn fetch_presenter(&self, id: &PresenterId) -> Result<Option<Presenter>, RepositoryError>;
    fn list_presenters(&self) -> Result<Vec<Presenter>, RepositoryError>;

    fn fetch_evaluator(&self, id: &EvaluatorId) -> Result<Option<Evaluator>, RepositoryError>;
    fn put_evaluator(&self, evaluator: Evaluator) -> Result<(), RepositoryError>;

    fn fetch_board(&self, id: &BoardId) -> Result<Option<PosterBoard>, RepositoryError>;
    fn put_board(&self, board: PosterBoard) -> Result<(), RepositoryError>;
    fn delete_board(&self, id: &BoardId) -> Result<(), RepositoryError>;
    fn list_boards(&self) -> Result<Vec<PosterBoard>, RepositoryError>;

    fn append_award(&self, award: Award) -> Result<(), RepositoryError>;
    fn list_awards(&self) -> Result<Vec<Award>, RepositoryError>;
    fn clear_awards(&self) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Insertion-ordered in-memory store backing the test suite and
/// single-process deployments.
#[derive(Default)]
pub struct InMemoryRepository {
    state: Mutex<Stores>,
}

#[derive(Default)]
struct Stores {
    sessions: Vec<Session>,
    evaluations: Vec<Evaluation>,
    presenters: Vec<Presenter>,
    evaluators: Vec<Evaluator>,
    boards: Vec<PosterBoard>,
    awards: Vec<Award>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a presenter record. Registration is owned by an external
    /// collaborator, so the repository trait itself only reads presenters.
    pub fn register_presenter(&self, presenter: Presenter) {
        let mut stores = self.state();
        match stores
            .presenters
            .iter_mut()
            .find(|stored| stored.id == presenter.id)
        {
            Some(stored) => *stored = presenter,
            None => stores.presenters.push(presenter),
        }
    }

    fn state(&self) -> MutexGuard<'_, Stores> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SeminarRepository for InMemoryRepository {
    fn fetch_session(&self, id: &SessionId) -> Result<Option<Session>, RepositoryError> {
        let stores = self.state();
        Ok(stores
            .sessions
            .iter()
            .find(|session| &session.id == id)
            .cloned())
    }

    fn put_session(&self, session: Session) -> Result<(), RepositoryError> {
        let mut stores = self.state();
        match stores
            .sessions
            .iter_mut()
            .find(|stored| stored.id == session.id)
        {
            Some(stored) => *stored = session,
            None => stores.sessions.push(session),
        }
        Ok(())
    }

    fn delete_session(&self, id: &SessionId) -> Result<(), RepositoryError> {
        let mut stores = self.state();
        let position = stores
            .sessions
            .iter()
            .position(|session| &session.id == id)
            .ok_or(RepositoryError::NotFound)?;
        stores.sessions.remove(position);
        Ok(())
    }

    fn list_sessions(&self) -> Result<Vec<Session>, RepositoryError> {
        Ok(self.state().sessions.clone())
    }

    fn fetch_evaluation(&self, id: &EvaluationId) -> Result<Option<Evaluation>, RepositoryError> {
        let stores = self.state();
        Ok(stores
            .evaluations
            .iter()
            .find(|evaluation| &evaluation.id == id)
            .cloned())
    }

    fn list_evaluations(&self) -> Result<Vec<Evaluation>, RepositoryError> {
        Ok(self.state().evaluations.clone())
    }

    fn put_evaluation(&self, evaluation: Evaluation) -> Result<(), RepositoryError> {
        let mut stores = self.state();
        match stores
            .evaluations
            .iter_mut()
            .find(|stored| stored.id == evaluation.id)
        {
            Some(stored) => *stored = evaluation,
            None => stores.evaluations.push(evaluation),
        }
        Ok(())
    }

    fn delete_evaluation(&self, id: &EvaluationId) -> Result<(), RepositoryError> {
        let mut stores = self.state();
        let position = stores
            .evaluations
            .iter()
            .position(|evaluation| &evaluation.id == id)
            .ok_or(RepositoryError::NotFound)?;
        stores.evaluations.remove(position);
        Ok(())
    }

    fn fetch_presenter(&self, id: &PresenterId) -> Result<Option<Presenter>, RepositoryError> {
        let stores = self.state();
        Ok(stores
            .presenters
            .iter()
            .find(|presenter| &presenter.id == id)
            .cloned())
    }

    fn list_presenters(&self) -> Result<Vec<Presenter>, RepositoryError> {
        Ok(self.state().presenters.clone())
    }

    fn fetch_evaluator(&self, id: &EvaluatorId) -> Result<Option<Evaluator>, RepositoryError> {
        let stores = self.state();
        Ok(stores
            .evaluators
            .iter()
            .find(|evaluator| &evaluator.id == id)
            .cloned())
    }

    fn put_evaluator(&self, evaluator: Evaluator) -> Result<(), RepositoryError> {
        let mut stores = self.state();
        match stores
            .evaluators
            .iter_mut()
            .find(|stored| stored.id == evaluator.id)
        {
            Some(stored) => *stored = evaluator,
            None => stores.evaluators.push(evaluator),
        }
        Ok(())
    }

    fn fetch_board(&self, id: &BoardId) -> Result<Option<PosterBoard>, RepositoryError> {
        let stores = self.state();
        Ok(stores.boards.iter().find(|board| &board.id == id).cloned())
    }

    fn put_board(&self, board: PosterBoard) -> Result<(), RepositoryError> {
        let mut stores = self.state();
        match stores.boards.iter_mut().find(|stored| stored.id == board.id) {
            Some(stored) => *stored = board,
            None => stores.boards.push(board),
        }
        Ok(())
    }

    fn delete_board(&self, id: &BoardId) -> Result<(), RepositoryError> {
        let mut stores = self.state();
        let position = stores
            .boards
            .iter()
            .position(|board| &board.id == id)
            .ok_or(RepositoryError::NotFound)?;
        stores.boards.remove(position);
        Ok(())
    }

    fn list_boards(&self) -> Result<Vec<PosterBoard>, RepositoryError> {
        Ok(self.state().boards.clone())
    }

    fn append_award(&self, award: Award) -> Result<(), RepositoryError> {
        self.state().awards.push(award);
        Ok(())
    }

    fn list_awards(&self) -> Result<Vec<Award>, RepositoryError> {
        Ok(self.state().awards.clone())
    }

    fn clear_awards(&self) -> Result<(), RepositoryError> {
        self.state().awards.clear();
        Ok(())
    }
}
