//! Simulation driver
//!
//! Owns the session, route, tuning and progress store. Turns variable frame
//! times into whole fixed ticks, persists checkpoint advances as they happen
//! and buffers events for the presentation layer.

use super::route::RouteData;
use super::state::{GameEvent, Session};
use super::tick::{TickInput, tick};
use super::triggers::guidance_heading;
use crate::consts::{MAX_FRAME_DT, SIM_DT};
use crate::persistence::{ProgressStore, load_checkpoint, save_checkpoint};
use crate::tuning::Tuning;

pub struct Driver<S: ProgressStore> {
    route: RouteData,
    tuning: Tuning,
    store: S,
    session: Session,
    /// Input held for every tick until replaced
    input: TickInput,
    /// Unsimulated time carried between frames
    accumulator: f32,
    paused: bool,
    started: bool,
    events: Vec<GameEvent>,
}

impl<S: ProgressStore> Driver<S> {
    /// Build a driver, restoring saved progress. Ticking starts with
    /// [`Driver::start_new_run`] or [`Driver::continue_run`].
    pub fn new(route: RouteData, tuning: Tuning, store: S) -> Self {
        let checkpoint = load_checkpoint(&store, route.checkpoint_count());
        log::info!(
            "Progress loaded: checkpoint {} / {}",
            checkpoint + 1,
            route.checkpoint_count()
        );
        let session = Session::new(&route, &tuning, checkpoint);

        Self {
            route,
            tuning,
            store,
            session,
            input: TickInput::default(),
            accumulator: 0.0,
            paused: true,
            started: false,
            events: Vec::new(),
        }
    }

    /// Feed one frame of wall time; returns how many ticks ran.
    ///
    /// Elapsed time is clamped to [`MAX_FRAME_DT`]. While paused (or before a
    /// run starts) nothing is accumulated and no ticks run.
    pub fn frame(&mut self, elapsed: f32) -> u32 {
        if !self.is_running() {
            return 0;
        }

        let elapsed = if elapsed.is_finite() {
            elapsed.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += elapsed;

        let mut ticks = 0;
        while self.accumulator >= SIM_DT {
            self.step();
            self.accumulator -= SIM_DT;
            ticks += 1;
        }
        ticks
    }

    fn step(&mut self) {
        let events = tick(
            &mut self.session,
            &self.route,
            &self.input,
            &self.tuning,
            SIM_DT,
        );
        for event in &events {
            if let GameEvent::CheckpointReached(index) = *event {
                self.persist(index);
            }
        }
        self.events.extend(events);
    }

    fn persist(&mut self, checkpoint: u32) {
        if let Err(e) = save_checkpoint(&mut self.store, checkpoint) {
            log::warn!("Failed to save checkpoint {}: {}", checkpoint, e);
        }
    }

    /// Replace the input used by subsequent ticks
    pub fn set_input(&mut self, input: TickInput) {
        self.input = input;
    }

    /// Start from checkpoint 0, overwriting saved progress
    pub fn start_new_run(&mut self) {
        self.session.player.set_checkpoint(0, &self.route);
        self.persist(0);
        self.begin();
        log::info!("New run started");
    }

    /// Resume from the saved checkpoint
    pub fn continue_run(&mut self) {
        let checkpoint = load_checkpoint(&self.store, self.route.checkpoint_count());
        self.session.player.set_checkpoint(checkpoint, &self.route);
        self.begin();
        log::info!("Continuing from checkpoint {}", checkpoint + 1);
    }

    fn begin(&mut self) {
        self.session.player.place_at_respawn(&self.tuning);
        self.started = true;
        self.paused = false;
    }

    /// Pause or resume (ignored before a run starts)
    pub fn set_paused(&mut self, paused: bool) {
        if self.started {
            self.paused = paused;
        }
    }

    pub fn toggle_pause(&mut self) {
        self.set_paused(!self.paused);
    }

    /// Stop the run; progress is kept
    pub fn quit(&mut self) {
        self.started = false;
        self.paused = true;
    }

    /// Clear saved progress and return to checkpoint 0 immediately
    pub fn reset_progress(&mut self) {
        if let Err(e) = self.store.clear() {
            log::warn!("Failed to clear saved progress: {}", e);
        }
        self.session.player.set_checkpoint(0, &self.route);
        self.events.push(GameEvent::ProgressReset);
        log::info!("Progress reset");
    }

    /// Take all buffered events in the order they happened
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Whether a saved checkpoint exists (enables "continue")
    pub fn has_saved_progress(&self) -> bool {
        matches!(self.store.read(), Ok(Some(_)))
    }

    /// HUD text, e.g. "Checkpoint 3 / 45"
    pub fn progress_label(&self) -> String {
        format!(
            "Checkpoint {} / {}",
            self.session.player.checkpoint + 1,
            self.route.checkpoint_count()
        )
    }

    /// Direction from the player to the next checkpoint (atan2(dx, dz))
    pub fn guidance_heading(&self) -> Option<f32> {
        guidance_heading(&self.session.player, &self.route)
    }

    pub fn is_running(&self) -> bool {
        self.started && !self.paused
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Mutable session access (teleports, scripted scenarios)
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn route(&self) -> &RouteData {
        &self.route
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Time waiting to be simulated
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }
}
