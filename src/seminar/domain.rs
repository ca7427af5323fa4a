use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::rubric::RubricScores;

/// Identifier wrapper for registered presenters.
///
/// Stable domain identifier, distinct from any login identity. Assigned once
/// at registration and never reused.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PresenterId(pub String);

/// Identifier wrapper for registered evaluators.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EvaluatorId(pub String);

/// Identifier wrapper for scheduled sessions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

/// Identifier wrapper for stored evaluations.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EvaluationId(pub String);

/// Identifier wrapper for poster boards, drawn from a bounded space.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BoardId(pub String);

impl fmt::Display for PresenterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for EvaluatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for EvaluationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Presentation format a presenter registered for.
///
/// Fixed once the presenter has been assigned to a session; sessions only
/// admit presenters of their own category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresentationCategory {
    Oral,
    Poster,
}

impl PresentationCategory {
    pub const fn label(self) -> &'static str {
        match self {
            PresentationCategory::Oral => "oral",
            PresentationCategory::Poster => "poster",
        }
    }
}

impl fmt::Display for PresentationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Registered presenter record. Registration itself happens outside the
/// engine; the services only read these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Presenter {
    pub id: PresenterId,
    pub category: PresentationCategory,
    pub vote_count: Option<u32>,
    pub has_voted: Option<bool>,
}

/// Evaluator record carrying the derived index of sessions the evaluator is
/// assigned to. The session's evaluator set is the source of truth; only the
/// Session Assignment Service writes this back-reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluator {
    pub id: EvaluatorId,
    pub assigned_sessions: BTreeSet<SessionId>,
}

impl Evaluator {
    pub fn new(id: EvaluatorId) -> Self {
        Self {
            id,
            assigned_sessions: BTreeSet::new(),
        }
    }
}

/// A scheduled seminar slot with its assigned participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub date: NaiveDate,
    pub venue: String,
    pub category: PresentationCategory,
    pub presenters: BTreeSet<PresenterId>,
    pub evaluators: BTreeSet<EvaluatorId>,
}

impl Session {
    /// Whether the raw participant id appears in either role. Presenter and
    /// evaluator ids share one namespace for conflict purposes.
    pub fn holds_participant(&self, participant: &str) -> bool {
        self.presenters.iter().any(|id| id.0 == participant)
            || self.evaluators.iter().any(|id| id.0 == participant)
    }
}

/// Unvalidated session form payload; the Session Assignment Service turns it
/// into a stored [`Session`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDraft {
    pub date: Option<NaiveDate>,
    pub venue: String,
    pub category: Option<PresentationCategory>,
}

/// A stored rubric evaluation of one presenter by one evaluator.
///
/// At most one exists per (evaluator, presenter) pair; resubmission replaces
/// scores, comment, and session under the original identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub id: EvaluationId,
    pub presenter: PresenterId,
    pub evaluator: EvaluatorId,
    pub session: SessionId,
    pub scores: RubricScores,
    pub comment: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

/// Unvalidated evaluation submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationDraft {
    pub presenter: Option<PresenterId>,
    pub evaluator: Option<EvaluatorId>,
    pub session: Option<SessionId>,
    pub scores: Option<RubricScores>,
    pub comment: Option<String>,
}

/// Assignment of a poster board to a presenter for a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PosterBoard {
    pub id: BoardId,
    pub presenter: PresenterId,
    pub session: SessionId,
}

/// Closing-ceremony award slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AwardCategory {
    BestOral,
    BestPoster,
    PeoplesChoice,
}

impl AwardCategory {
    /// The rubric-based award slot for a presentation category.
    pub const fn best_of(category: PresentationCategory) -> Self {
        match category {
            PresentationCategory::Oral => AwardCategory::BestOral,
            PresentationCategory::Poster => AwardCategory::BestPoster,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            AwardCategory::BestOral => "best_oral",
            AwardCategory::BestPoster => "best_poster",
            AwardCategory::PeoplesChoice => "peoples_choice",
        }
    }
}

/// Derived award record: the highest-ranked presenter in a slot together with
/// the winning score (average rubric total or raw vote count). Recomputable
/// at any time, never authoritative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Award {
    pub category: AwardCategory,
    pub presenter: PresenterId,
    pub score: f64,
}
