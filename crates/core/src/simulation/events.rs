//! Outbound events and cancellation
//!
//! Renderers and writers live outside the core. They observe a run through a
//! [`TickSubscriber`], stop it through a [`CancelHandle`] or by returning
//! `ControlFlow::Break`, and receive the final grid in a [`RunOutcome`].

use super::RunState;
use crate::error::HeatDiffusionError;
use crate::grid::Grid;
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Snapshot published after every completed tick
#[derive(Debug, Clone, Copy)]
pub struct TickEvent<'a> {
    /// 1-based tick number
    pub tick: u64,
    /// Largest per-cell change made by this tick
    pub delta: f64,
    /// Grid after the buffer swap (read-only)
    pub grid: &'a Grid,
}

/// Receiver of per-tick events
///
/// Returning `ControlFlow::Break(())` closes the subscription and cancels the
/// run before the next tick starts.
pub trait TickSubscriber {
    /// Called once per completed tick
    fn on_tick(&mut self, event: &TickEvent<'_>) -> ControlFlow<()>;
}

impl<F> TickSubscriber for F
where
    F: FnMut(&TickEvent<'_>) -> ControlFlow<()>,
{
    fn on_tick(&mut self, event: &TickEvent<'_>) -> ControlFlow<()> {
        self(event)
    }
}

/// Subscriber that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSubscriber;

impl TickSubscriber for NoopSubscriber {
    fn on_tick(&mut self, _event: &TickEvent<'_>) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

/// Thread-safe cancellation flag, checked between ticks
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    /// Create an unset flag
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// True once `cancel` has been called on any clone
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Terminal event: how the run ended and the grid it ended with
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// `Converged`, `Cancelled` or `Failed` (or `Running` if never driven)
    pub state: RunState,
    /// Completed ticks
    pub ticks: u64,
    /// Delta of the last completed tick
    pub final_delta: Option<f64>,
    /// Latest grid
    pub grid: Grid,
    /// Failure that aborted the run, if any
    pub error: Option<HeatDiffusionError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_handle_shared_between_clones() {
        let handle = CancelHandle::new();
        let clone = handle.clone();
        assert!(!handle.is_cancelled());
        clone.cancel();
        assert!(handle.is_cancelled());
    }

    #[test]
    fn test_closure_is_subscriber() {
        let grid = Grid::new(2);
        let mut seen = Vec::new();
        let mut subscriber = |event: &TickEvent<'_>| {
            seen.push(event.tick);
            ControlFlow::Continue(())
        };
        let event = TickEvent {
            tick: 3,
            delta: 0.5,
            grid: &grid,
        };
        assert_eq!(subscriber.on_tick(&event), ControlFlow::Continue(()));
        assert_eq!(seen, vec![3]);
    }
}
