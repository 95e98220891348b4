//! Cooperative task scheduling.
//!
//! Scheduled tasks do one step of work per simulation tick and report whether
//! they are still running. Everything runs on the simulation thread; stopping a
//! task simply removes it so it is never resumed again.

use crate::camera::Camera;
use crate::control::{Control, Screen};
use crate::effects::PresentationEffects;
use crate::events::EventQueue;
use crate::input::InputState;
use hecs::World;

/// Result of resuming a task for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoroutineStatus {
    Running,
    Success,
    Failure,
}

/// Everything a scheduled task may touch during a tick
pub struct TickContext<'a> {
    pub camera: &'a mut Camera,
    pub world: &'a World,
    pub control: &'a mut Control,
    pub screen: Screen,
    pub input: &'a InputState,
    pub effects: &'a mut dyn PresentationEffects,
    pub events: &'a mut EventQueue,
}

/// A task that advances once per tick until it finishes
pub trait Coroutine {
    fn resume(&mut self, ctx: &mut TickContext<'_>, dt: f32) -> CoroutineStatus;

    /// Called when the task is stopped before finishing on its own
    fn cancel(&mut self, _ctx: &mut TickContext<'_>) {}
}

/// Handle to a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

struct ScheduledTask {
    id: TaskId,
    tag: String,
    task: Box<dyn Coroutine>,
}

/// Runs cooperative tasks, at most one step per task per tick
#[derive(Default)]
pub struct CoroutineManager {
    tasks: Vec<ScheduledTask>,
    next_id: u64,
}

impl CoroutineManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a task. Any running task with the same tag is stopped first.
    pub fn start(
        &mut self,
        tag: &str,
        task: Box<dyn Coroutine>,
        ctx: &mut TickContext<'_>,
    ) -> TaskId {
        let replaced = self.stop_tagged(tag, ctx);
        if replaced > 0 {
            tracing::debug!(tag, replaced, "Replaced running tasks");
        }

        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(ScheduledTask {
            id,
            tag: tag.to_string(),
            task,
        });
        id
    }

    /// Resume every running task once. Finished tasks are dropped.
    pub fn update(&mut self, ctx: &mut TickContext<'_>, dt: f32) {
        puffin::profile_function!();

        self.tasks.retain_mut(|scheduled| match scheduled.task.resume(ctx, dt) {
            CoroutineStatus::Running => true,
            CoroutineStatus::Success => false,
            CoroutineStatus::Failure => {
                tracing::warn!(tag = %scheduled.tag, "Scheduled task failed");
                false
            }
        });
    }

    /// Stop a task. Returns false if it had already finished.
    pub fn stop(&mut self, id: TaskId, ctx: &mut TickContext<'_>) -> bool {
        let Some(index) = self.tasks.iter().position(|t| t.id == id) else {
            return false;
        };
        let mut scheduled = self.tasks.remove(index);
        scheduled.task.cancel(ctx);
        true
    }

    /// Stop every task with the given tag. Returns how many were stopped.
    pub fn stop_tagged(&mut self, tag: &str, ctx: &mut TickContext<'_>) -> usize {
        let (stopped, remaining): (Vec<_>, Vec<_>) =
            self.tasks.drain(..).partition(|t| t.tag == tag);
        self.tasks = remaining;

        let count = stopped.len();
        for mut scheduled in stopped {
            scheduled.task.cancel(ctx);
        }
        count
    }

    pub fn is_running(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|t| t.id == id)
    }

    pub fn is_tag_running(&self, tag: &str) -> bool {
        self.tasks.iter().any(|t| t.tag == tag)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
