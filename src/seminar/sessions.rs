use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError};

use chrono::NaiveDate;
use tracing::info;

use super::domain::{
    Evaluator, EvaluatorId, PresentationCategory, PresenterId, Session, SessionDraft, SessionId,
};
use super::error::{ConflictError, NotFoundError, SeminarError, ValidationError};
use super::locks::KeyedLocks;
use super::repository::SeminarRepository;

/// Schedules sessions and keeps participant assignments free of calendar
/// conflicts.
///
/// Sessions carry no time-of-day field, so the conflict granularity is the
/// calendar date: a participant holds at most one booking per date, in either
/// role. The check and the subsequent write run under a per-date lock.
pub struct SessionAssignmentService<R> {
    repository: Arc<R>,
    date_locks: KeyedLocks<NaiveDate>,
}

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> SessionId {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionId(format!("ses-{id:06}"))
}

fn validated(
    draft: SessionDraft,
) -> Result<(NaiveDate, String, PresentationCategory), ValidationError> {
    let date = draft.date.ok_or(ValidationError::MissingDate)?;
    let venue = draft.venue.trim();
    if venue.is_empty() {
        return Err(ValidationError::BlankVenue);
    }
    let category = draft.category.ok_or(ValidationError::MissingCategory)?;
    Ok((date, venue.to_string(), category))
}

impl<R: SeminarRepository> SessionAssignmentService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            date_locks: KeyedLocks::new(),
        }
    }

    /// Validate the draft, allocate an identifier, and persist an empty
    /// session.
    pub fn create_session(&self, draft: SessionDraft) -> Result<Session, SeminarError> {
        let (date, venue, category) = validated(draft)?;
        let session = Session {
            id: next_session_id(),
            date,
            venue,
            category,
            presenters: BTreeSet::new(),
            evaluators: BTreeSet::new(),
        };
        self.repository.put_session(session.clone())?;
        info!(session = %session.id, date = %session.date, "session scheduled");
        Ok(session)
    }

    /// Overwrite date, venue, and category of an existing session. Participant
    /// sets are preserved.
    pub fn update_session(
        &self,
        id: &SessionId,
        draft: SessionDraft,
    ) -> Result<Session, SeminarError> {
        let (date, venue, category) = validated(draft)?;
        let mut session = self.require_session(id)?;
        session.date = date;
        session.venue = venue;
        session.category = category;
        self.repository.put_session(session.clone())?;
        Ok(session)
    }

    /// Delete a session, removing it from every assigned evaluator's
    /// assigned-session set first.
    pub fn delete_session(&self, id: &SessionId) -> Result<(), SeminarError> {
        let session = self.require_session(id)?;
        for evaluator_id in &session.evaluators {
            if let Some(mut evaluator) = self.repository.fetch_evaluator(evaluator_id)? {
                evaluator.assigned_sessions.remove(id);
                self.repository.put_evaluator(evaluator)?;
            }
        }
        self.repository.delete_session(id)?;
        info!(session = %id, "session deleted");
        Ok(())
    }

    /// Add a presenter to a session. Re-adding an already assigned presenter
    /// is a no-op; a booking elsewhere on the same date is a conflict, and so
    /// is a category mismatch.
    pub fn assign_presenter(
        &self,
        session_id: &SessionId,
        presenter_id: &PresenterId,
    ) -> Result<(), SeminarError> {
        let mut session = self.require_session(session_id)?;
        let presenter = self
            .repository
            .fetch_presenter(presenter_id)?
            .ok_or_else(|| NotFoundError::Presenter(presenter_id.clone()))?;
        if presenter.category != session.category {
            return Err(ConflictError::CategoryMismatch {
                presenter: presenter_id.clone(),
                presenter_category: presenter.category,
                session: session_id.clone(),
                session_category: session.category,
            }
            .into());
        }
        if session.presenters.contains(presenter_id) {
            return Ok(());
        }

        let slot = self.date_locks.acquire(&session.date);
        let _serialized = slot.lock().unwrap_or_else(PoisonError::into_inner);
        self.ensure_free(&presenter_id.0, session.date)?;
        session.presenters.insert(presenter_id.clone());
        self.repository.put_session(session)?;
        info!(session = %session_id, presenter = %presenter_id, "presenter assigned");
        Ok(())
    }

    /// Add an evaluator to a session and record the session in the
    /// evaluator's assigned-session set. The evaluator record is materialized
    /// on first assignment if absent.
    pub fn assign_evaluator(
        &self,
        session_id: &SessionId,
        evaluator_id: &EvaluatorId,
    ) -> Result<(), SeminarError> {
        let mut session = self.require_session(session_id)?;
        if session.evaluators.contains(evaluator_id) {
            return Ok(());
        }

        let slot = self.date_locks.acquire(&session.date);
        let _serialized = slot.lock().unwrap_or_else(PoisonError::into_inner);
        self.ensure_free(&evaluator_id.0, session.date)?;
        session.evaluators.insert(evaluator_id.clone());
        self.repository.put_session(session)?;

        let mut evaluator = self
            .repository
            .fetch_evaluator(evaluator_id)?
            .unwrap_or_else(|| Evaluator::new(evaluator_id.clone()));
        evaluator.assigned_sessions.insert(session_id.clone());
        self.repository.put_evaluator(evaluator)?;
        info!(session = %session_id, evaluator = %evaluator_id, "evaluator assigned");
        Ok(())
    }

    /// Remove a presenter from a session. No-op if the session or the
    /// assignment is absent.
    pub fn remove_presenter(
        &self,
        session_id: &SessionId,
        presenter_id: &PresenterId,
    ) -> Result<(), SeminarError> {
        let mut session = match self.repository.fetch_session(session_id)? {
            Some(session) => session,
            None => return Ok(()),
        };
        if session.presenters.remove(presenter_id) {
            self.repository.put_session(session)?;
        }
        Ok(())
    }

    /// Remove an evaluator from a session, keeping the evaluator's
    /// assigned-session set in step. No-op if either side is absent.
    pub fn remove_evaluator(
        &self,
        session_id: &SessionId,
        evaluator_id: &EvaluatorId,
    ) -> Result<(), SeminarError> {
        if let Some(mut session) = self.repository.fetch_session(session_id)? {
            if session.evaluators.remove(evaluator_id) {
                self.repository.put_session(session)?;
            }
        }
        if let Some(mut evaluator) = self.repository.fetch_evaluator(evaluator_id)? {
            if evaluator.assigned_sessions.remove(session_id) {
                self.repository.put_evaluator(evaluator)?;
            }
        }
        Ok(())
    }

    /// Whether any session on `date` already lists the participant in either
    /// role.
    pub fn has_conflict(&self, participant: &str, date: NaiveDate) -> Result<bool, SeminarError> {
        Ok(self.booking_for(participant, date)?.is_some())
    }

    fn ensure_free(&self, participant: &str, date: NaiveDate) -> Result<(), SeminarError> {
        if let Some(session) = self.booking_for(participant, date)? {
            return Err(ConflictError::DateBooked {
                participant: participant.to_string(),
                date,
                session,
            }
            .into());
        }
        Ok(())
    }

    fn booking_for(
        &self,
        participant: &str,
        date: NaiveDate,
    ) -> Result<Option<SessionId>, SeminarError> {
        for session in self.repository.list_sessions()? {
            if session.date == date && session.holds_participant(participant) {
                return Ok(Some(session.id));
            }
        }
        Ok(None)
    }

    fn require_session(&self, id: &SessionId) -> Result<Session, SeminarError> {
        let session = self
            .repository
            .fetch_session(id)?
            .ok_or_else(|| NotFoundError::Session(id.clone()))?;
        Ok(session)
    }
}
