use std::collections::BTreeSet;
use std::sync::{Arc, PoisonError};

use tracing::info;

use crate::config::BoardConfig;

use super::domain::{BoardId, PosterBoard, PresenterId, SessionId};
use super::error::{ConflictError, SeminarError, ValidationError};
use super::locks::KeyedLocks;
use super::repository::{RepositoryError, SeminarRepository};

const DEFAULT_BOARD_COUNT: u32 = 100;

/// Bounded, enumerable poster board identifier space (`B001`, `B002`, ...).
#[derive(Debug, Clone)]
pub struct BoardSpace {
    count: u32,
}

impl BoardSpace {
    pub fn new(count: u32) -> Self {
        let count = if count == 0 { DEFAULT_BOARD_COUNT } else { count };
        Self { count }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn contains(&self, id: &BoardId) -> bool {
        self.ids().any(|known| &known == id)
    }

    /// Every board id in the space, ascending. Zero-padding keeps the
    /// lexicographic and numeric orders identical.
    pub fn ids(&self) -> impl Iterator<Item = BoardId> + '_ {
        (1..=self.count).map(|number| BoardId(format!("B{number:03}")))
    }
}

impl Default for BoardSpace {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_COUNT)
    }
}

impl From<&BoardConfig> for BoardSpace {
    fn from(config: &BoardConfig) -> Self {
        Self::new(config.count)
    }
}

/// Assigns poster boards to presenters, keeping each board occupied by at
/// most one presenter. The occupancy check and the insert run under a
/// per-board lock.
pub struct BoardAssignmentService<R> {
    repository: Arc<R>,
    space: BoardSpace,
    board_locks: KeyedLocks<BoardId>,
}

impl<R: SeminarRepository> BoardAssignmentService<R> {
    pub fn new(repository: Arc<R>, space: BoardSpace) -> Self {
        Self {
            repository,
            space,
            board_locks: KeyedLocks::new(),
        }
    }

    pub fn space(&self) -> &BoardSpace {
        &self.space
    }

    /// Assign a board to a presenter for a session. Fails when the board is
    /// already occupied, naming the occupant.
    pub fn assign_board(
        &self,
        board: &BoardId,
        presenter: &PresenterId,
        session: &SessionId,
    ) -> Result<PosterBoard, SeminarError> {
        if board.0.trim().is_empty() {
            return Err(ValidationError::BlankField("board id").into());
        }
        if presenter.0.trim().is_empty() {
            return Err(ValidationError::BlankField("presenter id").into());
        }
        if session.0.trim().is_empty() {
            return Err(ValidationError::BlankField("session id").into());
        }
        if !self.space.contains(board) {
            return Err(ValidationError::UnknownBoard(board.clone()).into());
        }

        let slot = self.board_locks.acquire(board);
        let _serialized = slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = self.repository.fetch_board(board)? {
            return Err(ConflictError::BoardOccupied {
                board: board.clone(),
                occupant: existing.presenter,
            }
            .into());
        }
        let assignment = PosterBoard {
            id: board.clone(),
            presenter: presenter.clone(),
            session: session.clone(),
        };
        self.repository.put_board(assignment.clone())?;
        info!(board = %board, presenter = %presenter, "poster board assigned");
        Ok(assignment)
    }

    /// Unoccupied board ids, ascending.
    pub fn available_boards(&self) -> Result<Vec<BoardId>, SeminarError> {
        let taken: BTreeSet<BoardId> = self
            .repository
            .list_boards()?
            .into_iter()
            .map(|board| board.id)
            .collect();
        Ok(self.space.ids().filter(|id| !taken.contains(id)).collect())
    }

    /// Release a board. No-op if it was not assigned.
    pub fn unassign_board(&self, board: &BoardId) -> Result<(), SeminarError> {
        match self.repository.delete_board(board) {
            Ok(()) | Err(RepositoryError::NotFound) => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
