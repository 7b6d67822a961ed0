//! Time based interpolation of numeric state, ticked by a [`Clock`].
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use svgbezier::{Clock, Easing, Tween, TweenState};
//!
//! let state = Rc::new(RefCell::new(TweenState::from([("x".to_string(), 0.0)])));
//! let clock = Clock::new();
//! let end = TweenState::from([("x".to_string(), 100.0)]);
//! Tween::new(state.clone())
//!     .to(&end, 1000.0)?
//!     .easing(Easing::Linear)
//!     .start(&clock)?;
//!
//! clock.frame(0.0)?;
//! clock.frame(500.0)?;
//! assert_eq!(state.borrow()["x"], 50.0);
//! # Ok::<(), svgbezier::Error>(())
//! ```

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::easing::Easing;
use crate::error::{Error, Result};
use crate::scheduler::{callback, Clock, TickCallback, TickStatus};

/// Flat mapping from names to the numbers being interpolated
pub type TweenState = BTreeMap<String, f64>;

/// Default duration of a tween in ms
pub const DEFAULT_DURATION: f64 = 1000.0;
/// Default delay of a tween in ms
pub const DEFAULT_DELAY: f64 = 0.0;
/// Default rate a tween updates its state at
pub const DEFAULT_FPS: f64 = 30.0;

/// Interpolates every key of a shared [`TweenState`] from its value at
/// construction towards a target state.
pub struct Tween {
    state: Rc<RefCell<TweenState>>,
    start: TweenState,
    deltas: TweenState,
    duration: f64,
    delay: f64,
    frequency: f64,
    easing: Easing,
    on_update: Option<Box<dyn FnMut(&TweenState)>>,
    on_complete: Option<Box<dyn FnOnce(&TweenState)>>,
}

impl Tween {
    /// Starts a tween on `state`, remembering its current values as the start.
    ///
    /// Until [`Tween::to`] is called, the target equals the start.
    pub fn new(state: Rc<RefCell<TweenState>>) -> Self {
        let start = state.borrow().clone();
        Tween {
            state,
            start,
            deltas: TweenState::new(),
            duration: DEFAULT_DURATION,
            delay: DEFAULT_DELAY,
            frequency: 1000.0 / DEFAULT_FPS,
            easing: Easing::default(),
            on_update: None,
            on_complete: None,
        }
    }

    /// Sets the target state and the animation's duration in ms.
    ///
    /// `end` must contain every key of the start state,
    /// keys only present in `end` are ignored.
    pub fn to(mut self, end: &TweenState, duration: f64) -> Result<Self> {
        if !duration.is_finite() || duration < 0.0 {
            return Err(Error::InvalidTiming {
                what: "duration",
                value: duration,
            });
        }
        self.deltas = self
            .start
            .iter()
            .map(|(key, start)| match end.get(key) {
                Some(target) => Ok((key.clone(), target - start)),
                None => Err(Error::MissingKey(key.clone())),
            })
            .collect::<Result<_>>()?;
        self.duration = duration;
        Ok(self)
    }

    /// Limits the updates to `fps` per second
    pub fn fps(mut self, fps: f64) -> Self {
        self.frequency = 1000.0 / fps;
        self
    }

    /// Waits `delay` ms before the first update
    pub fn delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    /// Sets the easing function
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Called after every update of the state
    pub fn on_update<F: FnMut(&TweenState) + 'static>(mut self, f: F) -> Self {
        self.on_update = Some(Box::new(f));
        self
    }

    /// Called once after the final update
    pub fn on_complete<F: FnOnce(&TweenState) + 'static>(mut self, f: F) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    /// Applies the interpolation for `elapsed` ms since the tween's start.
    fn update(&mut self, elapsed: f64) -> TickStatus {
        let progress = if self.duration > 0.0 {
            (elapsed / self.duration).min(1.0)
        } else {
            1.0
        };
        let eased = self.easing.apply(progress);

        {
            let mut state = self.state.borrow_mut();
            for (key, start) in self.start.iter() {
                let delta = self.deltas.get(key).copied().unwrap_or(0.0);
                state.insert(key.clone(), start + delta * eased);
            }
        }

        // Callbacks may borrow the shared state themselves
        let snapshot = self.state.borrow().clone();
        if let Some(on_update) = self.on_update.as_mut() {
            on_update(&snapshot);
        }
        if progress == 1.0 {
            if let Some(on_complete) = self.on_complete.take() {
                on_complete(&snapshot);
            }
            TickStatus::Completed
        } else {
            TickStatus::Running
        }
    }

    /// Subscribes the tween to `clock`.
    pub fn start(self, clock: &Clock) -> Result<TweenHandle> {
        let (frequency, delay) = (self.frequency, self.delay);
        let finished = Rc::new(Cell::new(false));

        let mut tween = self;
        let done = finished.clone();
        let callback = callback(move |tick| {
            let status = tween.update(tick.elapsed);
            if status == TickStatus::Completed {
                done.set(true);
            }
            Ok(status)
        });
        clock.subscribe(callback.clone(), frequency, delay)?;
        Ok(TweenHandle { callback, finished })
    }
}

/// A started [`Tween`]
pub struct TweenHandle {
    callback: TickCallback,
    finished: Rc<Cell<bool>>,
}

impl TweenHandle {
    /// Stops the tween, leaving the state at its last update.
    ///
    /// Returns whether the tween was still running.
    pub fn cancel(&self, clock: &Clock) -> bool {
        let running = clock.contains(&self.callback);
        clock.unsubscribe(&self.callback);
        running
    }

    /// Check whether the tween reached its target
    pub fn is_finished(&self) -> bool {
        self.finished.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn state(pairs: &[(&str, f64)]) -> TweenState {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn linear_midpoint() {
        let clock = Clock::new();
        let current = Rc::new(RefCell::new(state(&[("x", 0.0)])));
        Tween::new(current.clone())
            .to(&state(&[("x", 100.0)]), 1000.0)
            .unwrap()
            .easing(Easing::Linear)
            .start(&clock)
            .unwrap();

        clock.frame(0.0).unwrap();
        clock.frame(500.0).unwrap();
        assert_relative_eq!(current.borrow()["x"], 50.0);
    }

    #[test]
    fn progress_is_monotonic_and_completes_once() {
        let clock = Clock::new();
        let current = Rc::new(RefCell::new(state(&[("x", 10.0), ("y", -5.0)])));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let completions = Rc::new(Cell::new(0));

        let trace = seen.clone();
        let count = completions.clone();
        let handle = Tween::new(current.clone())
            .to(&state(&[("x", 110.0), ("y", 5.0), ("z", 1.0)]), 300.0)
            .unwrap()
            .on_update(move |s| trace.borrow_mut().push(s["x"]))
            .on_complete(move |_| count.set(count.get() + 1))
            .start(&clock)
            .unwrap();

        clock.run(0.0, 16.0, 1000).unwrap();

        let seen = seen.borrow();
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*seen.last().unwrap(), 110.0);
        assert_eq!(completions.get(), 1);
        assert!(handle.is_finished());
        assert_eq!(current.borrow()["y"], 5.0);
        assert!(!current.borrow().contains_key("z"));
        assert!(clock.is_empty());
    }

    #[test]
    fn frame_rate_limits_updates() {
        let clock = Clock::new();
        let current = Rc::new(RefCell::new(state(&[("x", 0.0)])));
        let updates = Rc::new(Cell::new(0));
        let count = updates.clone();
        Tween::new(current)
            .to(&state(&[("x", 1.0)]), 1000.0)
            .unwrap()
            .fps(10.0)
            .on_update(move |_| count.set(count.get() + 1))
            .start(&clock)
            .unwrap();

        // 60 Hz display, 10 updates per second
        clock.run(0.0, 1000.0 / 60.0, 1000).unwrap();
        assert!(updates.get() >= 9 && updates.get() <= 11);
    }

    #[test]
    fn delay_holds_start_values() {
        let clock = Clock::new();
        let current = Rc::new(RefCell::new(state(&[("x", 0.0)])));
        Tween::new(current.clone())
            .to(&state(&[("x", 100.0)]), 100.0)
            .unwrap()
            .easing(Easing::Linear)
            .fps(1000.0)
            .delay(200.0)
            .start(&clock)
            .unwrap();

        clock.frame(0.0).unwrap();
        clock.frame(150.0).unwrap();
        assert_eq!(current.borrow()["x"], 0.0);
        clock.frame(250.0).unwrap();
        assert_relative_eq!(current.borrow()["x"], 50.0);
    }

    #[test]
    fn callbacks_may_modify_shared_state() {
        let clock = Clock::new();
        let current = Rc::new(RefCell::new(state(&[("x", 0.0)])));
        let (on_update, on_complete) = (current.clone(), current.clone());
        let handle = Tween::new(current.clone())
            .to(&state(&[("x", 10.0)]), 100.0)
            .unwrap()
            .on_update(move |s| {
                on_update.borrow_mut().insert("seen".to_string(), s["x"]);
            })
            .on_complete(move |_| {
                on_complete.borrow_mut().insert("x".to_string(), -1.0);
            })
            .start(&clock)
            .unwrap();

        clock.frame(0.0).unwrap();
        clock.frame(50.0).unwrap();
        assert_eq!(current.borrow()["seen"], current.borrow()["x"]);

        clock.run(100.0, 16.0, 100).unwrap();
        assert!(handle.is_finished());
        assert_eq!(current.borrow()["seen"], 10.0);
        assert_eq!(current.borrow()["x"], -1.0);
    }

    #[test]
    fn missing_target_key_is_rejected() {
        let current = Rc::new(RefCell::new(state(&[("x", 0.0), ("y", 0.0)])));
        let result = Tween::new(current).to(&state(&[("x", 1.0)]), 100.0);
        assert!(matches!(result, Err(Error::MissingKey(key)) if key == "y"));
    }

    #[test]
    fn zero_duration_jumps_to_target() {
        let clock = Clock::new();
        let current = Rc::new(RefCell::new(state(&[("x", 3.0)])));
        let handle = Tween::new(current.clone())
            .to(&state(&[("x", 7.0)]), 0.0)
            .unwrap()
            .start(&clock)
            .unwrap();
        clock.run(0.0, 16.0, 10).unwrap();
        assert_eq!(current.borrow()["x"], 7.0);
        assert!(handle.is_finished());
        assert!(Tween::new(current).to(&TweenState::new(), -1.0).is_err());
    }

    #[test]
    fn cancel_stops_midway() {
        let clock = Clock::new();
        let current = Rc::new(RefCell::new(state(&[("x", 0.0)])));
        let handle = Tween::new(current.clone())
            .to(&state(&[("x", 100.0)]), 1000.0)
            .unwrap()
            .easing(Easing::Linear)
            .start(&clock)
            .unwrap();

        clock.frame(0.0).unwrap();
        clock.frame(400.0).unwrap();
        assert!(handle.cancel(&clock));
        assert!(!handle.cancel(&clock));
        clock.frame(800.0).unwrap();
        assert_relative_eq!(current.borrow()["x"], 40.0);
        assert!(!handle.is_finished());
    }
}
