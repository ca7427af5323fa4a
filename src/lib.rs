//! Assignment and scoring engine for running an academic research seminar:
//! scheduling sessions without double-booking participants, validating and
//! aggregating rubric evaluations, assigning poster boards, and computing
//! closing-ceremony awards.
//!
//! Forms, dialogs, report rendering, authentication, and the concrete
//! persistence mechanism live in the surrounding application. The engine
//! works against the [`seminar::SeminarRepository`] abstraction and ships an
//! insertion-ordered [`seminar::InMemoryRepository`] so its invariants are
//! testable in isolation.

pub mod config;
pub mod seminar;
pub mod telemetry;
