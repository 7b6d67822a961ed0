//! Animation clock
//!
//! A single clock multiplexes any number of subscribers onto the host's
//! display refresh. The host calls [`Clock::frame`] once per refresh with a
//! high resolution timestamp (milliseconds) for as long as the clock asks for
//! frames. Every subscriber is throttled by its own frequency and delay:
//!
//! - on the first frame a subscriber sees, its start is recorded and nothing fires
//! - afterwards its callback fires once at least `frequency` ms passed since its
//!   previous tick and more than `delay` ms passed since its start
//! - a callback returning [`TickStatus::Completed`] (or an error) is unsubscribed
//!
//! The clock is single threaded. [`Clock`] is a cheap handle around shared state
//! and can be cloned into callbacks, which may subscribe or unsubscribe while a
//! frame is being processed.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use log::{debug, trace, warn};
use smallvec::SmallVec;

use crate::error::{CallbackError, Error, Result};

/// Timing information handed to a subscriber's callback
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tick {
    /// Timestamp of the current frame
    pub timestamp: f64,
    /// Milliseconds since the subscriber's previous tick (or its start)
    pub since_prev: f64,
    /// Milliseconds since the subscriber's start minus its delay
    pub elapsed: f64,
}

/// What a callback wants to happen after its tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickStatus {
    /// Keep ticking
    Running,
    /// Unsubscribe, no further ticks will be delivered
    Completed,
}

/// Result of a single callback invocation
pub type TickResult = std::result::Result<TickStatus, CallbackError>;

/// Shared callback; its `Rc` identity is the subscriber's identity.
pub type TickCallback = Rc<RefCell<dyn FnMut(Tick) -> TickResult>>;

/// Wraps a closure into a [`TickCallback`]
pub fn callback<F>(f: F) -> TickCallback
where
    F: FnMut(Tick) -> TickResult + 'static,
{
    Rc::new(RefCell::new(f))
}

fn same_callback(a: &TickCallback, b: &TickCallback) -> bool {
    Rc::as_ptr(a) as *const () == Rc::as_ptr(b) as *const ()
}

fn check_timing(what: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidTiming { what, value })
    }
}

struct Subscriber {
    id: u64,
    callback: TickCallback,
    frequency: f64,
    delay: f64,
    last_tick: Option<f64>,
    start_tick: Option<f64>,
}

#[derive(Default)]
struct ClockState {
    subscribers: Vec<Subscriber>,
    next_id: u64,
    frame_pending: bool,
    shut_down: bool,
    requester: Option<Box<dyn FnMut()>>,
}

impl ClockState {
    fn position(&self, callback: &TickCallback) -> Option<usize> {
        self.subscribers
            .iter()
            .position(|s| same_callback(&s.callback, callback))
    }
}

/// Handle to an animation clock.
///
/// Clones share the same clock.
#[derive(Clone, Default)]
pub struct Clock {
    inner: Rc<RefCell<ClockState>>,
}

impl fmt::Debug for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("Clock")
            .field("subscribers", &state.subscribers.len())
            .field("frame_pending", &state.frame_pending)
            .field("shut_down", &state.shut_down)
            .finish()
    }
}

impl Clock {
    /// Creates an idle clock without subscribers
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a hook which is called whenever the clock needs another frame.
    ///
    /// Use this to schedule the host's next display refresh
    /// (e.g. `requestAnimationFrame` or a window redraw request).
    pub fn set_frame_requester<F>(&self, requester: F)
    where
        F: FnMut() + 'static,
    {
        self.inner.borrow_mut().requester = Some(Box::new(requester));
    }

    /// Check whether the clock is waiting for the host's next frame
    pub fn frame_pending(&self) -> bool {
        self.inner.borrow().frame_pending
    }

    /// Number of active subscribers
    pub fn len(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    /// Check if there are no active subscribers
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check whether `callback` is currently subscribed
    pub fn contains(&self, callback: &TickCallback) -> bool {
        self.inner.borrow().position(callback).is_some()
    }

    /// Subscribe `callback` to be ticked every `frequency` ms after an initial `delay`.
    ///
    /// Subscribing an already subscribed callback changes nothing.
    /// Returns the number of active subscribers.
    pub fn subscribe(&self, callback: TickCallback, frequency: f64, delay: f64) -> Result<usize> {
        check_timing("frequency", frequency)?;
        check_timing("delay", delay)?;

        let count = {
            let mut state = self.inner.borrow_mut();
            if state.shut_down {
                return Err(Error::ClockShutdown);
            }
            if state.position(&callback).is_none() {
                let id = state.next_id;
                state.next_id += 1;
                state.subscribers.push(Subscriber {
                    id,
                    callback,
                    frequency,
                    delay,
                    last_tick: None,
                    start_tick: None,
                });
                debug!(
                    "subscribed #{} (frequency {} ms, delay {} ms)",
                    id, frequency, delay
                );
            }
            state.subscribers.len()
        };

        // Kickstart the loop again if it went idle
        if count == 1 {
            self.request_frame();
        }
        Ok(count)
    }

    /// Removes `callback` from the active subscribers.
    ///
    /// Safe to call from within any callback, including `callback` itself.
    /// Returns the number of active subscribers.
    pub fn unsubscribe(&self, callback: &TickCallback) -> usize {
        let mut state = self.inner.borrow_mut();
        if let Some(i) = state.position(callback) {
            let removed = state.subscribers.remove(i);
            debug!("unsubscribed #{}", removed.id);
        }
        state.subscribers.len()
    }

    /// Drops every subscriber and refuses new ones.
    pub fn shutdown(&self) {
        // Callbacks may own clock handles, drop them after releasing the borrow
        let subscribers = {
            let mut state = self.inner.borrow_mut();
            state.shut_down = true;
            state.frame_pending = false;
            std::mem::take(&mut state.subscribers)
        };
        debug!("clock shut down, dropped {} subscribers", subscribers.len());
        drop(subscribers);
    }

    fn request_frame(&self) {
        let requester = {
            let mut state = self.inner.borrow_mut();
            if state.frame_pending || state.shut_down {
                return;
            }
            state.frame_pending = true;
            state.requester.take()
        };
        if let Some(mut requester) = requester {
            requester();
            let mut state = self.inner.borrow_mut();
            if state.requester.is_none() {
                state.requester = Some(requester);
            }
        }
    }

    /// Advance every subscriber to `timestamp`.
    ///
    /// Subscribers are processed in subscription order.
    /// A failing callback is unsubscribed while the remaining subscribers are
    /// still ticked; the first failure is returned once the frame is done.
    ///
    /// Returns the number of subscribers still active.
    pub fn frame(&self, timestamp: f64) -> Result<usize> {
        let ids: SmallVec<[u64; 16]> = {
            let mut state = self.inner.borrow_mut();
            state.frame_pending = false;
            state.subscribers.iter().map(|s| s.id).collect()
        };

        let mut failure = None;
        for id in ids {
            let fire = {
                let mut state = self.inner.borrow_mut();
                // Removed by an earlier callback of this frame
                let Some(s) = state.subscribers.iter_mut().find(|s| s.id == id) else {
                    continue;
                };
                match (s.start_tick, s.last_tick) {
                    (Some(start), Some(last)) => {
                        let since_prev = timestamp - last;
                        let since_start = timestamp - start;
                        if since_prev >= s.frequency && since_start > s.delay {
                            let tick = Tick {
                                timestamp,
                                since_prev,
                                elapsed: since_start - s.delay,
                            };
                            Some((s.callback.clone(), tick))
                        } else {
                            None
                        }
                    }
                    _ => {
                        s.start_tick = Some(timestamp);
                        s.last_tick = Some(timestamp);
                        None
                    }
                }
            };
            let Some((callback, tick)) = fire else {
                continue;
            };

            trace!("tick #{} {:?}", id, tick);
            let result = match callback.try_borrow_mut() {
                Ok(mut f) => (&mut *f)(tick),
                Err(_) => Err(CallbackError::from("callback ticked while already running")),
            };

            let mut state = self.inner.borrow_mut();
            let position = state.subscribers.iter().position(|s| s.id == id);
            match result {
                Ok(TickStatus::Running) => {
                    if let Some(i) = position {
                        state.subscribers[i].last_tick = Some(timestamp);
                    }
                }
                Ok(TickStatus::Completed) => {
                    if let Some(i) = position {
                        state.subscribers.remove(i);
                        debug!("#{} completed", id);
                    }
                }
                Err(error) => {
                    if let Some(i) = position {
                        state.subscribers.remove(i);
                    }
                    warn!("#{} failed and was unsubscribed: {}", id, error);
                    failure.get_or_insert(error);
                }
            }
        }

        let remaining = self.len();
        if remaining > 0 {
            self.request_frame();
        } else {
            debug!("no subscribers left, clock idle");
        }

        match failure {
            Some(error) => Err(Error::Callback(error)),
            None => Ok(remaining),
        }
    }

    /// Drives frames `interval` ms apart, starting at `start`, until the clock
    /// goes idle or `max_frames` frames were run.
    ///
    /// This stands in for a display when there is none, e.g. in tests.
    /// Returns the number of frames run.
    pub fn run(&self, start: f64, interval: f64, max_frames: usize) -> Result<usize> {
        let mut timestamp = start;
        let mut frames = 0;
        while frames < max_frames && self.frame_pending() {
            self.frame(timestamp)?;
            timestamp += interval;
            frames += 1;
        }
        Ok(frames)
    }
}
