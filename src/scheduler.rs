//! Single shared tick source.
//!
//! One [`Scheduler`] drives every registered [`Animated`] participant and fires
//! one-shot delayed tasks. The host calls [`run_tick`] once per display
//! refresh, so the number of animation loops stays at one no matter how many
//! renderers are mounted.

use crate::constants::{MAX_FRAME_STEP, REFERENCE_FRAME_MS};
use std::cell::RefCell;
use std::rc::Rc;

/// Something that advances and repaints once per tick.
pub trait Animated {
    /// Advances by `dt` reference frames and repaints.
    fn frame(&mut self, dt: f32);
}

/// A queued one-shot task.
type Task = Box<dyn FnOnce()>;

struct Timer {
    due_ms: f64,
    seq: u64,
    task: Task,
}

/// Participants and pending timers.
#[derive(Default)]
pub struct Scheduler {
    clock_ms: Option<f64>,
    next_seq: u64,
    timers: Vec<Timer>,
    animated: Vec<Rc<RefCell<dyn Animated>>>,
}

impl Scheduler {
    /// Creates an idle scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a participant that receives `frame` on every tick.
    pub fn register(&mut self, participant: Rc<RefCell<dyn Animated>>) {
        self.animated.push(participant);
    }

    /// Queues `task` to run on the first tick at least `delay_ms` after the
    /// latest tick. Tasks with equal due time run in the order they were queued.
    pub fn after(&mut self, delay_ms: f64, task: impl FnOnce() + 'static) {
        let now = self.clock_ms.unwrap_or(0.0);
        self.after_from(now, delay_ms, task);
    }

    /// Queues `task` to run `delay_ms` after `queued_ms`, a time on the tick
    /// clock. Event handlers pass their event's timestamp so the delay counts
    /// from the event rather than from the previous frame.
    pub fn after_from(&mut self, queued_ms: f64, delay_ms: f64, task: impl FnOnce() + 'static) {
        self.timers.push(Timer {
            due_ms: queued_ms + delay_ms.max(0.0),
            seq: self.next_seq,
            task: Box::new(task),
        });
        self.next_seq += 1;
    }

    /// Number of tasks still waiting.
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Number of registered participants.
    pub fn participants(&self) -> usize {
        self.animated.len()
    }

    /// Advances the clock and takes what the tick has to run.
    ///
    /// # Returns
    ///
    /// The frame step in reference frames, the due tasks in due order and the
    /// participants to drive.
    fn advance(&mut self, now_ms: f64) -> (f32, Vec<Task>, Vec<Rc<RefCell<dyn Animated>>>) {
        let dt = match self.clock_ms {
            Some(previous) => (((now_ms - previous) / REFERENCE_FRAME_MS) as f32).clamp(0.0, MAX_FRAME_STEP),
            None => 1.0,
        };
        self.clock_ms = Some(now_ms);

        let (mut due, waiting): (Vec<Timer>, Vec<Timer>) =
            self.timers.drain(..).partition(|t| t.due_ms <= now_ms);
        self.timers = waiting;
        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms).then(a.seq.cmp(&b.seq)));

        let tasks = due.into_iter().map(|t| t.task).collect();
        (dt, tasks, self.animated.clone())
    }
}

/// Runs one tick: due tasks first, then one frame per participant.
///
/// The scheduler borrow is released before anything runs, so tasks may queue
/// further tasks.
pub fn run_tick(scheduler: &RefCell<Scheduler>, now_ms: f64) {
    let (dt, tasks, animated) = scheduler.borrow_mut().advance(now_ms);
    for task in tasks {
        task();
    }
    for participant in animated {
        participant.borrow_mut().frame(dt);
    }
}
