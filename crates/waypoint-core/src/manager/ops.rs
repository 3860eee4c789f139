//! The manager's operation set.
//!
//! Five public operations drive a plan through its lifecycle: `create_plan`,
//! `execute_next_step`, `plan_status`, `mark_step_failed`, and `abort_plan`.
//! `execute_next_step` is a convenience wrapper over the two fine-grained
//! operations `complete_current_step` and `start_next_step`, which are also
//! public for drivers that want explicit control over each half.

use jiff::Timestamp;

use super::PlanManager;
use crate::{
    display::{AbortReport, CreateReport, ExecutionReport, FailureReport},
    error::{PlanError, Result},
    models::{Plan, PlanSnapshot, PlanStatus, Step, StepDigest, StepStatus},
    observer::PlanEvent,
    params::{AbortPlan, CreatePlan, ExecuteStep, FailStep},
};

impl PlanManager {
    /// Creates a new plan from an ordered list of step descriptions,
    /// replacing the current plan.
    ///
    /// Steps get sequential 1-based ids in list order and all start out
    /// pending. The displaced plan, if any, moves into
    /// [`history`](PlanManager::history). On validation failure nothing
    /// changes: the prior plan stays current.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::InvalidPlan`] when the step list is empty or any
    /// step description is blank after trimming.
    pub fn create_plan(&mut self, params: &CreatePlan) -> Result<CreateReport> {
        if params.steps.is_empty() {
            return Err(PlanError::InvalidPlan {
                reason: "the step list is empty".to_string(),
            });
        }

        let mut steps = Vec::with_capacity(params.steps.len());
        for (index, description) in params.steps.iter().enumerate() {
            let description = description.trim();
            if description.is_empty() {
                return Err(PlanError::InvalidPlan {
                    reason: format!("step {} is blank", index + 1),
                });
            }
            steps.push(Step::new(index as u32 + 1, description));
        }

        let now = Timestamp::now();
        let plan = Plan::new(params.goal.clone(), params.description.clone(), steps, now);

        self.observer.on_event(&PlanEvent::PlanCreated {
            goal: plan.goal.clone(),
            total_steps: plan.total_steps(),
        });
        for step in &plan.steps {
            self.observer.on_event(&PlanEvent::StepAdded {
                id: step.id,
                description: step.description.clone(),
            });
        }

        let snapshot = PlanSnapshot::from(&plan);
        let superseded_previous = self.current.is_some();
        if let Some(previous) = self.current.replace(plan) {
            self.history.push(previous);
        }

        Ok(CreateReport {
            snapshot,
            superseded_previous,
        })
    }

    /// Completes the step just worked on and arms the next one.
    ///
    /// This is the core transition driver: the caller works on a step, then
    /// reports the outcome here without tracking phase itself.
    ///
    /// - If no step is in progress, the lowest pending step is treated as
    ///   the one just worked on: it is started and immediately completed
    ///   with `step_result`.
    /// - If a step is already in progress (a fine-grained driver started it
    ///   explicitly), that step is completed directly.
    /// - Afterwards, the next pending step is started so the following call
    ///   completes it; when none remains the plan itself completes.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::NoPlan`] when no plan exists, or
    /// [`PlanError::PlanFinished`] when the plan already reached a terminal
    /// status.
    pub fn execute_next_step(&mut self, params: &ExecuteStep) -> Result<ExecutionReport> {
        {
            let plan = self.current.as_ref().ok_or(PlanError::NoPlan)?;
            if plan.is_terminal() {
                return Err(PlanError::PlanFinished {
                    status: plan.status,
                });
            }
        }

        if self
            .current
            .as_ref()
            .is_some_and(|p| p.current_step().is_none())
        {
            self.start_next_step()?;
        }

        let completed = self.complete_current_step(&params.step_result)?;

        match self.start_next_step()? {
            Some(next) => {
                let plan = self.current.as_ref().ok_or(PlanError::NoPlan)?;
                let remaining = plan
                    .steps
                    .iter()
                    .filter(|s| s.status == StepStatus::Pending)
                    .count() as u32;
                Ok(ExecutionReport::Advanced {
                    completed,
                    next,
                    remaining,
                })
            }
            None => {
                let now = Timestamp::now();
                let Self {
                    current, observer, ..
                } = self;
                let plan = current.as_mut().ok_or(PlanError::NoPlan)?;
                plan.finish(now)?;
                observer.on_event(&PlanEvent::PlanCompleted {
                    goal: plan.goal.clone(),
                    total_steps: plan.total_steps(),
                    duration: plan.total_duration(),
                });
                Ok(ExecutionReport::PlanComplete {
                    goal: plan.goal.clone(),
                    total_steps: plan.total_steps(),
                    failed_steps: plan.failed_steps(),
                    duration: plan.total_duration(),
                })
            }
        }
    }

    /// Completes the step currently in progress, recording `result`.
    ///
    /// Fine-grained half of [`execute_next_step`](Self::execute_next_step);
    /// does not start anything.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::NoPlan`] when no plan exists, or
    /// [`PlanError::NoActiveStep`] when no step is in progress.
    pub fn complete_current_step(&mut self, result: &str) -> Result<StepDigest> {
        let now = Timestamp::now();
        let Self {
            current, observer, ..
        } = self;
        let plan = current.as_mut().ok_or(PlanError::NoPlan)?;
        let step = plan.current_step_mut().ok_or(PlanError::NoActiveStep)?;
        step.complete(result, now)?;
        let digest = StepDigest::from(&*step);
        observer.on_event(&PlanEvent::StepCompleted {
            id: digest.id,
            duration: step.duration(),
        });
        Ok(digest)
    }

    /// Starts the lowest pending step, transitioning the plan to executing
    /// on the first start.
    ///
    /// Fine-grained half of [`execute_next_step`](Self::execute_next_step).
    /// Returns the step now in progress, the already-in-progress step if one
    /// was armed earlier, or `None` when no pending step remains (the plan
    /// is not finished by this operation).
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::NoPlan`] when no plan exists, or
    /// [`PlanError::PlanFinished`] when the plan already reached a terminal
    /// status.
    pub fn start_next_step(&mut self) -> Result<Option<StepDigest>> {
        let now = Timestamp::now();
        let Self {
            current, observer, ..
        } = self;
        let plan = current.as_mut().ok_or(PlanError::NoPlan)?;
        if plan.is_terminal() {
            return Err(PlanError::PlanFinished {
                status: plan.status,
            });
        }
        if let Some(step) = plan.current_step() {
            return Ok(Some(step.into()));
        }
        if plan.next_step().is_none() {
            return Ok(None);
        }
        if plan.status == PlanStatus::Created {
            plan.begin(now)?;
            observer.on_event(&PlanEvent::PlanStarted {
                goal: plan.goal.clone(),
            });
        }
        let Some(step) = plan.next_step_mut() else {
            return Ok(None);
        };
        step.start(now)?;
        let digest = StepDigest::from(&*step);
        observer.on_event(&PlanEvent::StepStarted {
            id: digest.id,
            description: digest.description.clone(),
        });
        Ok(Some(digest))
    }

    /// Returns a snapshot of the current plan, or `None` when no plan
    /// exists. Pure read; repeated calls with no intervening operation
    /// return identical snapshots.
    pub fn plan_status(&self) -> Option<PlanSnapshot> {
        self.current.as_ref().map(Into::into)
    }

    /// Marks the in-progress step as failed, recording the error.
    ///
    /// Unlike the success path, the next pending step is **not** started:
    /// the caller decides whether to continue
    /// ([`execute_next_step`](Self::execute_next_step)) or give up
    /// ([`abort_plan`](Self::abort_plan)). When the failed step was the last
    /// one, the plan completes with failures.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::NoPlan`] when no plan exists, or
    /// [`PlanError::NoActiveStep`] when no step is in progress.
    pub fn mark_step_failed(&mut self, params: &FailStep) -> Result<FailureReport> {
        let now = Timestamp::now();
        let Self {
            current, observer, ..
        } = self;
        let plan = current.as_mut().ok_or(PlanError::NoPlan)?;
        let step = plan.current_step_mut().ok_or(PlanError::NoActiveStep)?;
        step.fail(params.error_message.clone(), now)?;
        let failed = StepDigest::from(&*step);
        observer.on_event(&PlanEvent::StepFailed {
            id: failed.id,
            error_message: params.error_message.clone(),
        });

        let next = plan.next_step().map(StepDigest::from);
        if next.is_none() {
            plan.finish(now)?;
            observer.on_event(&PlanEvent::PlanCompleted {
                goal: plan.goal.clone(),
                total_steps: plan.total_steps(),
                duration: plan.total_duration(),
            });
        }

        Ok(FailureReport {
            failed,
            error_message: params.error_message.clone(),
            next,
        })
    }

    /// Aborts the current plan: every step not yet terminal is skipped with
    /// `reason` recorded, and the plan is cancelled.
    ///
    /// Idempotent at the surface: with no plan, or with a plan that already
    /// finished, nothing changes and the report says so.
    ///
    /// # Errors
    ///
    /// Only [`PlanError::IllegalTransition`], and only if an internal
    /// invariant is broken; the documented outcomes are all `Ok`.
    pub fn abort_plan(&mut self, params: &AbortPlan) -> Result<AbortReport> {
        let now = Timestamp::now();
        let Self {
            current, observer, ..
        } = self;
        let Some(plan) = current.as_mut() else {
            return Ok(AbortReport::NoPlan);
        };
        if plan.is_terminal() {
            return Ok(AbortReport::AlreadyFinished {
                status: plan.status,
            });
        }

        let completed_before = plan.completed_steps();
        let mut skipped = 0u32;
        for step in plan.steps.iter_mut().filter(|s| !s.is_terminal()) {
            step.skip(params.reason.clone(), now)?;
            observer.on_event(&PlanEvent::StepSkipped { id: step.id });
            skipped += 1;
        }
        plan.cancel(now)?;
        observer.on_event(&PlanEvent::PlanAborted {
            reason: params.reason.clone(),
            skipped_steps: skipped,
        });

        Ok(AbortReport::Aborted {
            goal: plan.goal.clone(),
            completed_before,
            skipped,
        })
    }
}
