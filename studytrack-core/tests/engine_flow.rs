//! Cross-component flows through the engine facade.

use chrono::{NaiveDate, NaiveTime};
use studytrack_core::{EngineError, REVIEW_PRIORITY, StudyEngine};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn engine_on(today: NaiveDate) -> StudyEngine {
    StudyEngine::with_today(today)
}

#[test]
fn completing_writes_one_log_and_enqueues_one_review() {
    let today = date(2026, 8, 28);
    let engine = engine_on(today);

    let submitted = engine
        .submit_task("Integrals", "calculus", 90, date(2026, 9, 15))
        .unwrap();

    let completed = engine.complete_top(1.5, Some("good pace")).unwrap();
    assert_eq!(completed.id, submitted.id);

    let logs = engine.logs();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].date, today);
    assert_eq!(logs[0].subject, "calculus");
    assert_eq!(logs[0].duration_hours, 1.5);
    assert_eq!(logs[0].description, "Integrals: good pace");

    let pending = engine.tasks();
    assert_eq!(pending.len(), 1);
    let review = &pending[0];
    assert!(review.review);
    assert_eq!(review.title, "Review: Integrals");
    assert_eq!(review.subject, "calculus");
    assert_eq!(review.priority, REVIEW_PRIORITY);
    assert_eq!(review.deadline, date(2026, 8, 31));
    assert_ne!(review.id, completed.id);
}

#[test]
fn completing_a_review_does_not_stack_the_prefix() {
    let engine = engine_on(date(2026, 8, 28));
    engine
        .submit_task("Integrals", "calculus", 90, date(2026, 9, 15))
        .unwrap();

    engine.complete_top(1.0, None).unwrap();
    // Only the spawned review is pending now; complete it too.
    let review = engine.complete_top(0.5, None).unwrap();
    assert_eq!(review.title, "Review: Integrals");

    let next = engine.peek_top().unwrap();
    assert_eq!(next.title, "Review: Integrals");
}

#[test]
fn peek_top_always_returns_a_maximal_task() {
    let engine = engine_on(date(2026, 8, 28));
    for (i, priority) in [40, 80, 80, 10, 55].into_iter().enumerate() {
        engine
            .submit_task(&format!("t{i}"), "math", priority, date(2026, 9, 15))
            .unwrap();
    }

    let top = engine.peek_top().unwrap();
    assert!(engine.tasks().iter().all(|t| top.priority >= t.priority));
    assert_eq!(top.priority, 80);
}

#[test]
fn undo_of_a_submission_removes_it_and_redo_restores_the_same_id() {
    let engine = engine_on(date(2026, 8, 28));
    let task = engine
        .submit_task("Integrals", "calculus", 90, date(2026, 9, 15))
        .unwrap();

    let msg = engine.undo();
    assert!(msg.contains("Integrals"), "unexpected message: {msg}");
    assert!(engine.tasks().is_empty());
    assert!(engine.peek_top().is_none());

    engine.redo();
    let pending = engine.tasks();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, task.id);
}

#[test]
fn undo_of_a_completion_retracts_log_and_review() {
    let engine = engine_on(date(2026, 8, 28));
    let task = engine
        .submit_task("Integrals", "calculus", 90, date(2026, 9, 15))
        .unwrap();
    engine.complete_top(2.0, None).unwrap();
    let review_id = engine.peek_top().unwrap().id;

    engine.undo();
    let pending = engine.tasks();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, task.id);
    assert!(pending.iter().all(|t| t.id != review_id));
    assert!(engine.logs().is_empty());

    engine.redo();
    let pending = engine.tasks();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, review_id);
    assert_eq!(engine.logs().len(), 1);
}

#[test]
fn undo_and_redo_on_empty_history_are_explicit_no_ops() {
    let engine = engine_on(date(2026, 8, 28));
    assert_eq!(engine.undo(), "Nothing to undo.");
    assert_eq!(engine.redo(), "Nothing to redo.");
}

#[test]
fn a_new_action_after_undo_discards_redo_history() {
    let engine = engine_on(date(2026, 8, 28));
    engine
        .submit_task("a", "math", 10, date(2026, 9, 15))
        .unwrap();
    engine.undo();

    engine
        .submit_task("b", "math", 20, date(2026, 9, 15))
        .unwrap();
    assert_eq!(engine.redo(), "Nothing to redo.");
    let titles: Vec<String> = engine.tasks().into_iter().map(|t| t.title).collect();
    assert_eq!(titles, vec!["b".to_string()]);
}

#[test]
fn duplicate_dependency_adds_record_one_undoable_action() {
    let engine = engine_on(date(2026, 8, 28));
    engine.add_dependency("algebra", "calculus").unwrap();
    engine.add_dependency("algebra", "calculus").unwrap();

    assert!(engine.undo().contains("algebra -> calculus"));
    assert_eq!(engine.undo(), "Nothing to undo.");
    // The edge is really gone: both orders are now valid.
    assert_eq!(engine.study_path().unwrap().len(), 2);
}

#[test]
fn study_path_orders_prerequisites_and_reports_cycles() {
    let engine = engine_on(date(2026, 8, 28));
    engine.add_dependency("algebra", "calculus").unwrap();
    engine.add_dependency("calculus", "analysis").unwrap();

    let path = engine.study_path().unwrap();
    let pos = |name: &str| path.iter().position(|s| s == name).unwrap();
    assert!(pos("algebra") < pos("calculus"));
    assert!(pos("calculus") < pos("analysis"));

    engine.add_dependency("analysis", "algebra").unwrap();
    assert_eq!(engine.study_path(), Err(EngineError::CircularDependency));
    assert_eq!(engine.subjects().len(), 3);
}

#[test]
fn blocked_intervals_reject_overlaps_but_allow_shared_boundaries() {
    let engine = engine_on(date(2026, 8, 28));
    assert_eq!(
        engine.add_blocked_interval(time(9, 0), time(10, 0)),
        Ok(true)
    );
    assert_eq!(
        engine.add_blocked_interval(time(9, 30), time(10, 30)),
        Ok(false)
    );
    assert_eq!(
        engine.add_blocked_interval(time(10, 0), time(11, 0)),
        Ok(true)
    );
    assert!(matches!(
        engine.add_blocked_interval(time(12, 0), time(12, 0)),
        Err(EngineError::InvalidInterval { .. })
    ));
}

#[test]
fn weekly_plan_cycles_the_sorted_task_list_without_mutating() {
    let engine = engine_on(date(2026, 8, 28));
    let high = engine
        .submit_task("high", "math", 90, date(2026, 9, 15))
        .unwrap();
    let low = engine
        .submit_task("low", "math", 50, date(2026, 9, 15))
        .unwrap();

    let plan = engine.weekly_plan(Some(3));
    let flat: Vec<u64> = plan
        .days
        .iter()
        .flat_map(|d| d.slots.iter().map(|s| s.task_id))
        .collect();
    assert_eq!(flat.len(), 21);
    for (i, id) in flat.iter().enumerate() {
        let expected = if i % 2 == 0 { high.id } else { low.id };
        assert_eq!(*id, expected, "slot {i}");
    }

    // Defaulting kicks in for absent or non-positive slot counts.
    assert!(
        engine
            .weekly_plan(None)
            .days
            .iter()
            .all(|d| d.slots.len() == 3)
    );
    assert!(
        engine
            .weekly_plan(Some(-1))
            .days
            .iter()
            .all(|d| d.slots.len() == 3)
    );

    // The report never drains the scheduler.
    assert_eq!(engine.tasks().len(), 2);
}

#[test]
fn manual_logs_sum_into_the_subject_summary() {
    let engine = engine_on(date(2026, 8, 28));
    engine.insert_log("math", 1.5, Some("problem set")).unwrap();
    engine.insert_log("physics", 2.0, None).unwrap();
    engine
        .submit_task("Integrals", "math", 90, date(2026, 9, 15))
        .unwrap();
    engine.complete_top(0.5, None).unwrap();

    let summary = engine.summary_by_subject();
    assert_eq!(summary["math"], 2.0);
    assert_eq!(summary["physics"], 2.0);

    // Logging a subject makes it a graph node.
    assert!(engine.subjects().contains(&"physics".to_string()));
}

#[test]
fn rejected_manual_logs_mutate_nothing() {
    let engine = engine_on(date(2026, 8, 28));

    for bad_hours in [-1.0, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            engine.insert_log("math", bad_hours, None),
            Err(EngineError::InvalidDuration { .. })
        ));
    }
    assert!(matches!(
        engine.insert_log("  ", 1.0, None),
        Err(EngineError::EmptyField { field: "subject" })
    ));

    // Neither the logbook nor the graph saw anything.
    assert!(engine.logs().is_empty());
    assert!(engine.summary_by_subject().is_empty());
    assert!(engine.subjects().is_empty());
}

#[test]
fn engine_is_shareable_across_threads() {
    use std::sync::Arc;
    use std::thread;

    let engine = Arc::new(engine_on(date(2026, 8, 28)));
    let mut handles = Vec::new();
    for w in 0..8 {
        let engine = Arc::clone(&engine);
        handles.push(thread::spawn(move || {
            for i in 0..50 {
                engine
                    .submit_task(&format!("t{w}-{i}"), "math", i, date(2026, 9, 15))
                    .unwrap();
            }
        }));
    }
    for h in handles {
        h.join().unwrap();
    }

    let tasks = engine.tasks();
    assert_eq!(tasks.len(), 400);
    let mut ids: Vec<u64> = tasks.iter().map(|t| t.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 400, "task ids must be unique");
}
