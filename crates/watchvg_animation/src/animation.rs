//! Frame-driven animations
//!
//! An [`Animation`] is ticked once per frame with the current time and reports
//! whether it wants more frames. The [`Animator`] owns running animations and
//! drops them as soon as they report completion.

use slotmap::{new_key_type, SlotMap};
use tracing::{debug, trace};

use crate::motion::Motion;

/// Per-frame callback receiving the current motion value
pub type ValueCallback = Box<dyn FnMut(f32)>;

/// Something that evolves with time
pub trait Animation {
    /// Advance to `now_ms`
    ///
    /// Returns `true` while the animation still needs frames.
    fn tick(&mut self, now_ms: u64) -> bool;
}

impl<A: Animation + ?Sized> Animation for Box<A> {
    fn tick(&mut self, now_ms: u64) -> bool {
        (**self).tick(now_ms)
    }
}

/// A motion started at a given time, feeding its value to a callback
pub struct MotionAnimation<F: FnMut(f32)> {
    motion: Motion,
    started_at: u64,
    on_value: F,
}

impl<F: FnMut(f32)> MotionAnimation<F> {
    pub fn new(motion: Motion, started_at: u64, on_value: F) -> Self {
        Self {
            motion,
            started_at,
            on_value,
        }
    }

    pub fn motion(&self) -> &Motion {
        &self.motion
    }
}

impl<F: FnMut(f32)> Animation for MotionAnimation<F> {
    fn tick(&mut self, now_ms: u64) -> bool {
        let elapsed = now_ms.saturating_sub(self.started_at);
        (self.on_value)(self.motion.value_at(elapsed));
        !self.motion.is_finished(elapsed)
    }
}

struct Step {
    motion: Motion,
    on_value: ValueCallback,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StackState {
    Running { step: usize, started_at: u64 },
    Done,
}

/// Motions played one after another
///
/// The first step starts with the animation; each following step starts on
/// the frame where the previous one finishes.
pub struct StackAnimation {
    steps: Vec<Step>,
    state: StackState,
}

impl StackAnimation {
    pub fn new(started_at: u64) -> Self {
        Self {
            steps: Vec::new(),
            state: StackState::Running {
                step: 0,
                started_at,
            },
        }
    }

    /// Append a step
    pub fn add_step(&mut self, motion: Motion, on_value: impl FnMut(f32) + 'static) {
        self.steps.push(Step {
            motion,
            on_value: Box::new(on_value),
        });
    }

    /// Builder form of [`StackAnimation::add_step`]
    pub fn step(mut self, motion: Motion, on_value: impl FnMut(f32) + 'static) -> Self {
        self.add_step(motion, on_value);
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Index of the running step, `None` once every step is over
    pub fn current_step(&self) -> Option<usize> {
        match self.state {
            StackState::Running { step, .. } if step < self.steps.len() => Some(step),
            _ => None,
        }
    }
}

impl Animation for StackAnimation {
    fn tick(&mut self, now_ms: u64) -> bool {
        let StackState::Running { step, started_at } = self.state else {
            return false;
        };
        let Some(current) = self.steps.get_mut(step) else {
            self.state = StackState::Done;
            return false;
        };

        let elapsed = now_ms.saturating_sub(started_at);
        (current.on_value)(current.motion.value_at(elapsed));
        if !current.motion.is_finished(elapsed) {
            return true;
        }

        let next = step + 1;
        if next < self.steps.len() {
            trace!(step = next, at = now_ms, "stack animation advancing");
            self.state = StackState::Running {
                step: next,
                started_at: now_ms,
            };
            true
        } else {
            trace!(at = now_ms, "stack animation done");
            self.state = StackState::Done;
            false
        }
    }
}

/// Animations ticked together against a shared clock
///
/// Children receive the time elapsed since this animation started, so their
/// own start times are relative to it. Every child is ticked on every frame
/// until all of them are done.
pub struct ParallelAnimation {
    children: Vec<Box<dyn Animation>>,
    started_at: u64,
}

impl ParallelAnimation {
    pub fn new(started_at: u64) -> Self {
        Self {
            children: Vec::new(),
            started_at,
        }
    }

    pub fn add(&mut self, animation: impl Animation + 'static) {
        self.children.push(Box::new(animation));
    }

    /// Builder form of [`ParallelAnimation::add`]
    pub fn with(mut self, animation: impl Animation + 'static) -> Self {
        self.add(animation);
        self
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Animation for ParallelAnimation {
    fn tick(&mut self, now_ms: u64) -> bool {
        let elapsed = now_ms.saturating_sub(self.started_at);
        let mut running = false;
        for child in &mut self.children {
            running |= child.tick(elapsed);
        }
        running
    }
}

new_key_type! {
    /// Handle to an animation owned by an [`Animator`]
    pub struct AnimationId;
}

/// Owner of the running animations of one UI
#[derive(Default)]
pub struct Animator {
    animations: SlotMap<AnimationId, Box<dyn Animation>>,
}

impl Animator {
    pub fn new() -> Self {
        Self {
            animations: SlotMap::with_key(),
        }
    }

    /// Take ownership of an animation; it is ticked from the next frame on
    pub fn start(&mut self, animation: impl Animation + 'static) -> AnimationId {
        let id = self.animations.insert(Box::new(animation));
        debug!(?id, running = self.animations.len(), "animation started");
        id
    }

    /// Drop an animation before it finishes
    ///
    /// Returns `false` if it had already finished or been stopped.
    pub fn stop(&mut self, id: AnimationId) -> bool {
        let removed = self.animations.remove(id).is_some();
        if removed {
            debug!(?id, "animation stopped");
        }
        removed
    }

    pub fn is_running(&self, id: AnimationId) -> bool {
        self.animations.contains_key(id)
    }

    /// Tick every animation and drop the finished ones
    ///
    /// Returns `true` while animations remain.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let before = self.animations.len();
        self.animations.retain(|_, animation| animation.tick(now_ms));
        let finished = before - self.animations.len();
        if finished > 0 {
            debug!(finished, running = self.animations.len(), "animations finished");
        }
        !self.animations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }
}
