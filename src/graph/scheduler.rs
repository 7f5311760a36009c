//! Explicit driver for the tick loop.
//!
//! The browser calls [`TickScheduler::tick`] once per animation frame; the
//! scheduler decides whether the simulation advances and whether another
//! frame should be requested. Tests call `tick` directly to single-step.

use std::cell::Cell;
use std::rc::Rc;

use log::debug;

use super::simulation::Simulation;

/// Shared flag that stops a running loop. Cloning shares the flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn cancel(&self) {
		self.0.set(true);
	}

	pub fn is_cancelled(&self) -> bool {
		self.0.get()
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerState {
	Idle,
	Running,
	Stopped,
}

#[derive(Debug)]
pub struct TickScheduler {
	state: SchedulerState,
	token: CancelToken,
	ticks: u64,
}

impl Default for TickScheduler {
	fn default() -> Self {
		Self::new()
	}
}

impl TickScheduler {
	pub fn new() -> Self {
		Self {
			state: SchedulerState::Idle,
			token: CancelToken::new(),
			ticks: 0,
		}
	}

	/// Begin (or keep) running. Returns the token that stops this run.
	///
	/// Starting after a stop issues a fresh token; the old one stays
	/// cancelled.
	pub fn start(&mut self) -> CancelToken {
		if self.is_running() {
			return self.token.clone();
		}
		if self.token.is_cancelled() {
			self.token = CancelToken::new();
		}
		self.state = SchedulerState::Running;
		debug!("Tick loop started");
		self.token.clone()
	}

	pub fn stop(&mut self) {
		self.token.cancel();
		if self.state != SchedulerState::Stopped {
			debug!("Tick loop stopped after {} ticks", self.ticks);
		}
		self.state = SchedulerState::Stopped;
	}

	pub fn state(&self) -> SchedulerState {
		self.state
	}

	pub fn is_running(&self) -> bool {
		self.state == SchedulerState::Running && !self.token.is_cancelled()
	}

	/// Frames in which the simulation was handed a tick.
	pub fn ticks(&self) -> u64 {
		self.ticks
	}

	/// Run one frame. Returns whether the caller should schedule another.
	///
	/// A settled simulation still counts as running: the loop keeps
	/// drawing until stopped.
	pub fn tick(&mut self, simulation: &mut Simulation) -> bool {
		if self.state == SchedulerState::Running && self.token.is_cancelled() {
			self.stop();
		}
		if !self.is_running() {
			return false;
		}
		simulation.tick();
		self.ticks += 1;
		true
	}
}
