//! Tests for the manager module.

use std::sync::{Arc, Mutex};

use super::*;
use crate::{
    display::{AbortReport, ExecutionReport},
    error::PlanError,
    models::{PlanStatus, StepStatus},
    observer::{NullObserver, PlanEvent, PlanObserver},
    params::{AbortPlan, CreatePlan, ExecuteStep, FailStep},
};

/// Observer that records rendered events for assertions.
#[derive(Clone, Default)]
struct RecordingObserver {
    events: Arc<Mutex<Vec<String>>>,
}

impl PlanObserver for RecordingObserver {
    fn on_event(&self, event: &PlanEvent) {
        self.events
            .lock()
            .expect("observer lock poisoned")
            .push(event.to_string());
    }
}

impl RecordingObserver {
    fn events(&self) -> Vec<String> {
        self.events.lock().expect("observer lock poisoned").clone()
    }
}

fn quiet_manager() -> PlanManager {
    PlanManager::builder().with_observer(NullObserver).build()
}

fn create_params(steps: &[&str]) -> CreatePlan {
    CreatePlan {
        goal: "Ship feature X".to_string(),
        description: "incremental rollout".to_string(),
        steps: steps.iter().map(|s| (*s).to_string()).collect(),
    }
}

fn execute(result: &str) -> ExecuteStep {
    ExecuteStep {
        step_result: result.to_string(),
    }
}

#[test]
fn test_create_plan_builds_pending_steps_in_order() {
    let mut manager = quiet_manager();
    let report = manager
        .create_plan(&create_params(&["Write code", "Write tests", "Deploy"]))
        .expect("create plan");

    assert_eq!(report.snapshot.total_steps, 3);
    assert!(!report.superseded_previous);

    let plan = manager.current_plan().expect("plan exists");
    assert_eq!(plan.status, PlanStatus::Created);
    let ids: Vec<u32> = plan.steps.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert!(plan.steps.iter().all(|s| s.status == StepStatus::Pending));
}

#[test]
fn test_create_plan_rejects_empty_step_list() {
    let mut manager = quiet_manager();
    let err = manager
        .create_plan(&CreatePlan {
            goal: "goal".to_string(),
            description: String::new(),
            steps: vec![],
        })
        .expect_err("empty step list");
    assert!(matches!(err, PlanError::InvalidPlan { .. }));
    assert!(manager.current_plan().is_none());
}

#[test]
fn test_create_plan_rejects_blank_step_and_keeps_prior_plan() {
    let mut manager = quiet_manager();
    manager
        .create_plan(&create_params(&["Only step"]))
        .expect("create plan");

    let err = manager
        .create_plan(&create_params(&["Fine", "   "]))
        .expect_err("blank step");
    assert!(matches!(err, PlanError::InvalidPlan { .. }));

    // The prior plan is untouched and nothing went to history
    let plan = manager.current_plan().expect("prior plan kept");
    assert_eq!(plan.steps[0].description, "Only step");
    assert!(manager.history().is_empty());
}

#[test]
fn test_create_plan_trims_step_descriptions() {
    let mut manager = quiet_manager();
    manager
        .create_plan(&create_params(&["  Write code  "]))
        .expect("create plan");
    let plan = manager.current_plan().expect("plan exists");
    assert_eq!(plan.steps[0].description, "Write code");
}

#[test]
fn test_create_plan_supersede_moves_previous_to_history() {
    let mut manager = quiet_manager();
    manager
        .create_plan(&create_params(&["Old step"]))
        .expect("first plan");
    let report = manager
        .create_plan(&create_params(&["New step"]))
        .expect("second plan");

    assert!(report.superseded_previous);
    assert_eq!(manager.history().len(), 1);
    assert_eq!(manager.history()[0].steps[0].description, "Old step");
    assert_eq!(
        manager.current_plan().expect("current").steps[0].description,
        "New step"
    );
}

#[test]
fn test_execute_next_step_completes_head_and_arms_next() {
    let mut manager = quiet_manager();
    manager
        .create_plan(&create_params(&["Write code", "Write tests"]))
        .expect("create plan");

    let report = manager
        .execute_next_step(&execute("wrote the code"))
        .expect("execute");

    match report {
        ExecutionReport::Advanced {
            completed,
            next,
            remaining,
        } => {
            assert_eq!(completed.id, 1);
            assert_eq!(next.id, 2);
            assert_eq!(remaining, 0);
        }
        other => panic!("expected Advanced, got {other:?}"),
    }

    let plan = manager.current_plan().expect("plan");
    assert_eq!(plan.status, PlanStatus::Executing);
    assert_eq!(plan.steps[0].status, StepStatus::Completed);
    assert_eq!(plan.steps[0].result.as_deref(), Some("wrote the code"));
    assert_eq!(plan.steps[1].status, StepStatus::InProgress);
}

#[test]
fn test_execute_last_step_completes_plan() {
    let mut manager = quiet_manager();
    manager
        .create_plan(&create_params(&["Only step"]))
        .expect("create plan");

    let report = manager.execute_next_step(&execute("did it")).expect("execute");
    match report {
        ExecutionReport::PlanComplete {
            total_steps,
            failed_steps,
            ..
        } => {
            assert_eq!(total_steps, 1);
            assert_eq!(failed_steps, 0);
        }
        other => panic!("expected PlanComplete, got {other:?}"),
    }

    let plan = manager.current_plan().expect("plan");
    assert_eq!(plan.status, PlanStatus::Completed);
    assert!(plan.total_duration().is_some());
}

#[test]
fn test_execute_without_plan_is_no_plan_error() {
    let mut manager = quiet_manager();
    let err = manager
        .execute_next_step(&execute("anything"))
        .expect_err("no plan yet");
    assert!(matches!(err, PlanError::NoPlan));
}

#[test]
fn test_execute_on_finished_plan_is_plan_finished_error() {
    let mut manager = quiet_manager();
    manager
        .create_plan(&create_params(&["Only step"]))
        .expect("create plan");
    manager.execute_next_step(&execute("done")).expect("execute");

    let err = manager
        .execute_next_step(&execute("again"))
        .expect_err("plan finished");
    assert!(matches!(
        err,
        PlanError::PlanFinished {
            status: PlanStatus::Completed
        }
    ));
}

#[test]
fn test_fine_grained_split_matches_wrapper_semantics() {
    let mut manager = quiet_manager();
    manager
        .create_plan(&create_params(&["Write code", "Write tests"]))
        .expect("create plan");

    // Arm step 1 explicitly, then complete it
    let started = manager.start_next_step().expect("start").expect("step 1");
    assert_eq!(started.id, 1);
    assert_eq!(
        manager.current_plan().expect("plan").status,
        PlanStatus::Executing
    );

    // Starting again is idempotent while a step is in progress
    let again = manager.start_next_step().expect("start").expect("same step");
    assert_eq!(again.id, 1);

    let completed = manager
        .complete_current_step("wrote the code")
        .expect("complete");
    assert_eq!(completed.id, 1);
    assert!(manager.current_plan().expect("plan").current_step().is_none());
}

#[test]
fn test_complete_current_step_without_active_step_errors() {
    let mut manager = quiet_manager();
    manager
        .create_plan(&create_params(&["Only step"]))
        .expect("create plan");
    let err = manager
        .complete_current_step("nothing running")
        .expect_err("no active step");
    assert!(matches!(err, PlanError::NoActiveStep));
}

#[test]
fn test_mark_step_failed_records_error_and_does_not_advance() {
    let mut manager = quiet_manager();
    manager
        .create_plan(&create_params(&["Write code", "Write tests", "Deploy"]))
        .expect("create plan");
    manager.execute_next_step(&execute("code done")).expect("execute");

    // Step 2 is now in progress; fail it
    let report = manager
        .mark_step_failed(&FailStep {
            error_message: "tests flaky, cannot verify".to_string(),
        })
        .expect("fail step");

    assert_eq!(report.failed.id, 2);
    assert!(!report.plan_complete());
    assert_eq!(report.next.as_ref().map(|s| s.id), Some(3));

    let plan = manager.current_plan().expect("plan");
    assert_eq!(plan.steps[1].status, StepStatus::Failed);
    assert_eq!(
        plan.steps[1].error_message.as_deref(),
        Some("tests flaky, cannot verify")
    );
    // The failure path must not auto-start the next step
    assert_eq!(plan.steps[2].status, StepStatus::Pending);
    assert_eq!(plan.status, PlanStatus::Executing);
}

#[test]
fn test_mark_step_failed_on_last_step_completes_plan() {
    let mut manager = quiet_manager();
    manager
        .create_plan(&create_params(&["Only step"]))
        .expect("create plan");
    manager.start_next_step().expect("start");

    let report = manager
        .mark_step_failed(&FailStep {
            error_message: "no luck".to_string(),
        })
        .expect("fail step");

    assert!(report.plan_complete());
    let plan = manager.current_plan().expect("plan");
    assert_eq!(plan.status, PlanStatus::Completed);
    assert_eq!(plan.completed_steps(), plan.total_steps());
}

#[test]
fn test_mark_step_failed_without_active_step_errors() {
    let mut manager = quiet_manager();
    manager
        .create_plan(&create_params(&["Only step"]))
        .expect("create plan");

    let err = manager
        .mark_step_failed(&FailStep {
            error_message: "nothing running".to_string(),
        })
        .expect_err("no active step");
    assert!(matches!(err, PlanError::NoActiveStep));
}

#[test]
fn test_abort_plan_skips_remaining_steps() {
    let mut manager = quiet_manager();
    manager
        .create_plan(&create_params(&["Write code", "Write tests", "Deploy"]))
        .expect("create plan");
    manager.execute_next_step(&execute("code done")).expect("execute");

    let report = manager
        .abort_plan(&AbortPlan {
            reason: "giving up".to_string(),
        })
        .expect("abort");

    match report {
        AbortReport::Aborted {
            completed_before,
            skipped,
            ..
        } => {
            assert_eq!(completed_before, 1);
            assert_eq!(skipped, 2);
        }
        other => panic!("expected Aborted, got {other:?}"),
    }

    let plan = manager.current_plan().expect("plan");
    assert_eq!(plan.status, PlanStatus::Cancelled);
    assert_eq!(plan.steps[0].status, StepStatus::Completed);
    // Both the in-progress and the pending step were skipped with the reason
    assert_eq!(plan.steps[1].status, StepStatus::Skipped);
    assert_eq!(plan.steps[2].status, StepStatus::Skipped);
    assert_eq!(plan.steps[2].result.as_deref(), Some("giving up"));
}

#[test]
fn test_abort_plan_is_idempotent() {
    let mut manager = quiet_manager();

    let report = manager
        .abort_plan(&AbortPlan {
            reason: "nothing here".to_string(),
        })
        .expect("abort");
    assert!(matches!(report, AbortReport::NoPlan));

    manager
        .create_plan(&create_params(&["Only step"]))
        .expect("create plan");
    manager
        .abort_plan(&AbortPlan {
            reason: "first".to_string(),
        })
        .expect("abort");

    let before = manager.plan_status().expect("snapshot");
    let report = manager
        .abort_plan(&AbortPlan {
            reason: "second".to_string(),
        })
        .expect("abort");
    assert!(matches!(
        report,
        AbortReport::AlreadyFinished {
            status: PlanStatus::Cancelled
        }
    ));
    // Nothing changed on the repeat call
    assert_eq!(manager.plan_status().expect("snapshot"), before);
}

#[test]
fn test_plan_status_is_pure_read() {
    let mut manager = quiet_manager();
    assert!(manager.plan_status().is_none());

    manager
        .create_plan(&create_params(&["Write code", "Write tests"]))
        .expect("create plan");
    manager.execute_next_step(&execute("done")).expect("execute");

    let first = manager.plan_status().expect("snapshot");
    let second = manager.plan_status().expect("snapshot");
    assert_eq!(first, second);
}

#[test]
fn test_observer_sees_every_state_change() {
    let recorder = RecordingObserver::default();
    let mut manager = PlanManager::builder()
        .with_observer(recorder.clone())
        .build();

    manager
        .create_plan(&create_params(&["Write code", "Write tests"]))
        .expect("create plan");
    manager.execute_next_step(&execute("code done")).expect("execute");
    manager
        .abort_plan(&AbortPlan {
            reason: "enough".to_string(),
        })
        .expect("abort");

    let events = recorder.events();
    // One creation line plus one per declared step
    assert!(events[0].contains("plan created"));
    assert!(events[1].contains("step 1 added"));
    assert!(events[2].contains("step 2 added"));
    // Execution emits start-of-plan, start, completion, and the next start
    assert!(events.iter().any(|e| e.contains("plan started")));
    assert!(events.iter().any(|e| e.contains("step 1 completed")));
    assert!(events.iter().any(|e| e.contains("step 2 started")));
    // Abort skips the in-progress step and cancels the plan
    assert!(events.iter().any(|e| e.contains("step 2 skipped")));
    assert!(events.iter().any(|e| e.contains("plan aborted")));
}
