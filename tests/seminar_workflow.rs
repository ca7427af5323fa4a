use std::sync::Arc;

use chrono::NaiveDate;
use seminar_engine::config::AppConfig;
use seminar_engine::seminar::{
    AwardCategory, AwardService, BoardAssignmentService, BoardId, BoardSpace, ConflictError,
    EvaluationDraft, EvaluatorId, EvaluationService, InMemoryRepository, PresentationCategory,
    Presenter, PresenterId, RubricScores, SeminarError, SeminarRepository,
    SessionAssignmentService, SessionDraft,
};
use seminar_engine::telemetry;

fn seminar_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 4, 17).expect("valid seminar date")
}

fn presenter(id: &str, category: PresentationCategory, votes: Option<u32>) -> Presenter {
    Presenter {
        id: PresenterId(id.to_string()),
        category,
        vote_count: votes,
        has_voted: votes.map(|_| true),
    }
}

fn draft(date: NaiveDate, venue: &str, category: PresentationCategory) -> SessionDraft {
    SessionDraft {
        date: Some(date),
        venue: venue.to_string(),
        category: Some(category),
    }
}

fn evaluation(
    evaluator: &str,
    presenter: &str,
    session: &seminar_engine::seminar::SessionId,
    scores: RubricScores,
    comment: &str,
) -> EvaluationDraft {
    EvaluationDraft {
        presenter: Some(PresenterId(presenter.to_string())),
        evaluator: Some(EvaluatorId(evaluator.to_string())),
        session: Some(session.clone()),
        scores: Some(scores),
        comment: Some(comment.to_string()),
    }
}

#[test]
fn closing_ceremony_flow_from_scheduling_to_awards() {
    let config = AppConfig::load().expect("config loads");
    let _ = telemetry::init(&config.telemetry);

    let repository = Arc::new(InMemoryRepository::new());
    repository.register_presenter(presenter("pres-ada", PresentationCategory::Oral, Some(4)));
    repository.register_presenter(presenter("pres-bjorn", PresentationCategory::Oral, None));
    repository.register_presenter(presenter("pres-chen", PresentationCategory::Poster, Some(11)));

    let sessions = SessionAssignmentService::new(Arc::clone(&repository));
    let evaluations = EvaluationService::new(Arc::clone(&repository));
    let boards =
        BoardAssignmentService::new(Arc::clone(&repository), BoardSpace::from(&config.boards));
    let awards = AwardService::new(Arc::clone(&repository));

    // Morning oral session and an afternoon poster session on the same day.
    let oral = sessions
        .create_session(draft(seminar_day(), "Lecture Hall A", PresentationCategory::Oral))
        .expect("oral session scheduled");
    let poster = sessions
        .create_session(draft(seminar_day(), "Atrium", PresentationCategory::Poster))
        .expect("poster session scheduled");

    sessions
        .assign_presenter(&oral.id, &PresenterId("pres-ada".to_string()))
        .expect("ada presents");
    sessions
        .assign_presenter(&poster.id, &PresenterId("pres-chen".to_string()))
        .expect("chen presents");
    sessions
        .assign_evaluator(&oral.id, &EvaluatorId("eva-dana".to_string()))
        .expect("dana evaluates the oral session");

    // The same day is fully booked for both of them.
    match sessions.assign_presenter(&poster.id, &PresenterId("pres-ada".to_string())) {
        Err(SeminarError::Conflict(ConflictError::CategoryMismatch { .. })) => {}
        other => panic!("expected category mismatch, got {other:?}"),
    }
    match sessions.assign_evaluator(&poster.id, &EvaluatorId("eva-dana".to_string())) {
        Err(SeminarError::Conflict(ConflictError::DateBooked { .. })) => {}
        other => panic!("expected date conflict, got {other:?}"),
    }

    // Rubric evaluations come in; dana revises the ada scores once.
    let first_pass = RubricScores::new(7, 7, 7, 7);
    evaluations
        .submit(evaluation("eva-dana", "pres-ada", &oral.id, first_pass, "solid"))
        .expect("initial scores stored");
    let revision = RubricScores::new(8, 8, 8, 8);
    evaluations
        .submit(evaluation("eva-dana", "pres-ada", &oral.id, revision, "revised"))
        .expect("revised scores stored");
    let poster_scores = RubricScores::new(9, 9, 9, 9);
    evaluations
        .submit(evaluation("eva-ed", "pres-chen", &poster.id, poster_scores, "great poster"))
        .expect("poster scores stored");

    let ada_average = evaluations
        .average_score(&PresenterId("pres-ada".to_string()))
        .expect("average computed");
    assert!((ada_average - 32.0).abs() < 1e-9, "upsert left only the revision");

    // Poster boards for the poster session.
    let first_free = boards.available_boards().expect("boards listed")[0].clone();
    assert_eq!(first_free, BoardId("B001".to_string()));
    boards
        .assign_board(&first_free, &PresenterId("pres-chen".to_string()), &poster.id)
        .expect("board assigned");
    match boards.assign_board(&first_free, &PresenterId("pres-ada".to_string()), &poster.id) {
        Err(SeminarError::Conflict(ConflictError::BoardOccupied { occupant, .. })) => {
            assert_eq!(occupant, PresenterId("pres-chen".to_string()));
        }
        other => panic!("expected board occupied, got {other:?}"),
    }

    // Closing ceremony: rubric awards plus people's choice from stored votes.
    let tally = awards.vote_tally().expect("tally built");
    let agenda = awards
        .generate_agenda(Some(&tally))
        .expect("agenda generated");

    let categories: Vec<AwardCategory> = agenda.iter().map(|award| award.category).collect();
    assert_eq!(
        categories,
        vec![
            AwardCategory::BestOral,
            AwardCategory::BestPoster,
            AwardCategory::PeoplesChoice
        ]
    );
    assert_eq!(agenda[0].presenter, PresenterId("pres-ada".to_string()));
    assert!((agenda[0].score - 32.0).abs() < 1e-9);
    assert_eq!(agenda[2].presenter, PresenterId("pres-chen".to_string()));
    assert!((agenda[2].score - 11.0).abs() < 1e-9);
    assert_eq!(
        repository.list_awards().expect("awards listed").len(),
        agenda.len()
    );

    // Tearing the day down cascades into the evaluator's assignments.
    sessions.delete_session(&oral.id).expect("oral session deleted");
    let dana = repository
        .fetch_evaluator(&EvaluatorId("eva-dana".to_string()))
        .expect("fetch succeeds")
        .expect("evaluator record kept");
    assert!(dana.assigned_sessions.is_empty());
    assert!(repository
        .fetch_session(&oral.id)
        .expect("fetch succeeds")
        .is_none());
}
