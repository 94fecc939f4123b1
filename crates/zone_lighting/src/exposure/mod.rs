//! Exposure animator
//!
//! Smoothly walks the renderer's tone-mapping exposure toward a target in
//! fixed steps. The animator is a two-state machine:
//!
//! | state        | event            | next         | effect                          |
//! |--------------|------------------|--------------|---------------------------------|
//! | any          | `set_target`     | `Converging` | cancel old timer, schedule new  |
//! | `Converging` | tick, not near   | `Converging` | write stepped exposure          |
//! | `Converging` | tick, near       | `Idle`       | write target, cancel timer      |
//! | any          | `stop`           | `Idle`       | cancel timer, no write          |
//!
//! Ticks carrying a handle other than the active one are stale and ignored,
//! so a superseded loop can never write over a newer one.

use std::time::Duration;

use crate::core::config::AnimationConfig;
use crate::render::RenderConfigSurface;
use crate::timer::{TimerFacility, TimerHandle};

/// Animator state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimatorState {
    /// No loop scheduled
    Idle,
    /// A loop is scheduled and moving `current` toward `target`
    Converging {
        /// Active timer
        handle: TimerHandle,
        /// Value last written (or read at start)
        current: f32,
        /// Value being approached
        target: f32,
    },
}

/// Result of delivering a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Handle is not the active loop, nothing written
    Stale,
    /// Exposure moved one step and the loop continues
    Stepped(f32),
    /// Exposure snapped to the target and the loop ended
    Reached(f32),
}

/// Move `current` one step toward `target`
///
/// Returns the new value and whether it is within
/// `step * tolerance_steps` of the target, in which case the value is
/// snapped to exactly `target`.
pub fn step_toward(current: f32, target: f32, step: f32, tolerance_steps: f32) -> (f32, bool) {
    let moved = if current > target {
        current - step
    } else if current < target {
        current + step
    } else {
        current
    };

    if (moved - target).abs() < step * tolerance_steps {
        (target, true)
    } else {
        (moved, false)
    }
}

/// Fixed-step exposure convergence loop
#[derive(Debug, Clone)]
pub struct ExposureAnimator {
    step: f32,
    tolerance_steps: f32,
    interval: Duration,
    state: AnimatorState,
}

impl ExposureAnimator {
    /// Create an idle animator from animation settings
    pub fn new(config: &AnimationConfig) -> Self {
        Self {
            step: config.exposure_step,
            tolerance_steps: config.snap_tolerance_steps,
            interval: config.frame_interval(),
            state: AnimatorState::Idle,
        }
    }

    /// Current state
    pub fn state(&self) -> AnimatorState {
        self.state
    }

    /// Whether a loop is scheduled
    pub fn is_active(&self) -> bool {
        matches!(self.state, AnimatorState::Converging { .. })
    }

    /// Target of the active loop
    pub fn target(&self) -> Option<f32> {
        match self.state {
            AnimatorState::Converging { target, .. } => Some(target),
            AnimatorState::Idle => None,
        }
    }

    /// Step size per tick
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Start converging toward `target`
    ///
    /// Without a renderer this is a no-op and returns `false`. Otherwise the
    /// previous loop is cancelled and a new one scheduled from the
    /// renderer's current exposure.
    pub fn set_target<R, T>(&mut self, target: f32, renderer: Option<&R>, timer: &mut T) -> bool
    where
        R: RenderConfigSurface + ?Sized,
        T: TimerFacility + ?Sized,
    {
        let Some(renderer) = renderer else {
            log::debug!("No renderer attached, skipping exposure target {}", target);
            return false;
        };
        if !target.is_finite() {
            log::warn!("Ignoring non-finite exposure target {}", target);
            return false;
        }

        self.cancel_active(timer);

        let current = renderer.exposure();
        let handle = timer.schedule_recurring(self.interval);
        log::debug!("Exposure {} -> {} ({:?})", current, target, handle);

        self.state = AnimatorState::Converging { handle, current, target };
        true
    }

    /// Deliver a fired timer
    pub fn tick<R, T>(&mut self, handle: TimerHandle, renderer: Option<&mut R>, timer: &mut T) -> TickOutcome
    where
        R: RenderConfigSurface + ?Sized,
        T: TimerFacility + ?Sized,
    {
        let AnimatorState::Converging { handle: active, current, target } = self.state else {
            return TickOutcome::Stale;
        };
        if active != handle {
            return TickOutcome::Stale;
        }

        let Some(renderer) = renderer else {
            // Renderer went away mid-animation
            log::debug!("Renderer detached, stopping exposure loop");
            self.stop(timer);
            return TickOutcome::Stale;
        };

        let (value, reached) = step_toward(current, target, self.step, self.tolerance_steps);
        renderer.set_exposure(value);

        if reached {
            timer.cancel(handle);
            self.state = AnimatorState::Idle;
            log::debug!("Exposure reached {}", value);
            TickOutcome::Reached(value)
        } else {
            self.state = AnimatorState::Converging { handle, current: value, target };
            log::trace!("Exposure stepped to {}", value);
            TickOutcome::Stepped(value)
        }
    }

    /// Cancel the active loop without snapping
    pub fn stop<T: TimerFacility + ?Sized>(&mut self, timer: &mut T) {
        if self.cancel_active(timer) {
            log::debug!("Exposure animation stopped");
        }
    }

    fn cancel_active<T: TimerFacility + ?Sized>(&mut self, timer: &mut T) -> bool {
        match std::mem::replace(&mut self.state, AnimatorState::Idle) {
            AnimatorState::Converging { handle, .. } => {
                timer.cancel(handle);
                true
            }
            AnimatorState::Idle => false,
        }
    }
}
