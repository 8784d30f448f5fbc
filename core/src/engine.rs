//! The game engine — wires the clock, the cycle machine, and the store.
//!
//! RULES:
//!   - All randomness flows through the RngBank.
//!   - All state changes are recorded in the event log.
//!   - A failed command never partially mutates state: invalid cycle
//!     names leave the economy untouched, rejected drafts leave stored
//!     records and soldier balances untouched.

use crate::{
    action::{self, ActionDraft},
    clock::{WeekClock, DAYS_PER_WEEK},
    command::PlayerCommand,
    config::GameConfig,
    cycle::{CycleMachine, EconomicCycle},
    error::{EngineError, EngineResult},
    event::{event_type_name, EventLogEntry, GameEvent},
    rng::{GameRng, RngBank, StreamSlot},
    snapshot::EconomySnapshot,
    store::{ActionRecord, GameStore},
    types::{RunId, Week},
};

pub struct GameEngine {
    pub run_id: RunId,
    pub clock:  WeekClock,
    pub cycles: CycleMachine,
    rng_bank:   RngBank,
    /// Persistent stream for cycle draws — held for the run's lifetime
    /// so consecutive draws advance through the stream.
    cycle_rng:  GameRng,
    store:      GameStore,
}

impl GameEngine {
    /// Build a fully wired engine: run record inserted, RNG streams
    /// derived, economy seeded at `stable`.
    pub fn build(
        run_id: RunId,
        seed: u64,
        store: GameStore,
        config: &GameConfig,
    ) -> EngineResult<Self> {
        store.insert_run(&run_id, seed, env!("CARGO_PKG_VERSION"))?;
        let rng_bank = RngBank::new(seed);
        let cycle_rng = rng_bank.for_stream(StreamSlot::Cycle);
        let engine = Self {
            clock: WeekClock::new(),
            cycles: CycleMachine::new(config),
            rng_bank,
            cycle_rng,
            store,
            run_id: run_id.clone(),
        };
        engine.record_event(&GameEvent::RunInitialized { run_id, seed })?;
        engine.take_snapshot()?;
        Ok(engine)
    }

    /// In-memory engine with the built-in catalog. Used by tests.
    pub fn build_test(run_id: RunId, seed: u64) -> EngineResult<Self> {
        let store = GameStore::in_memory()?;
        store.migrate()?;
        Self::build(run_id, seed, store, &GameConfig::builtin())
    }

    pub fn store(&self) -> &GameStore {
        &self.store
    }

    pub fn rng_bank(&self) -> &RngBank {
        &self.rng_bank
    }

    /// Advance one simulated day. Fires the auto-simulation cycle draw
    /// on seven-day boundaries and snapshots the economy at each week
    /// boundary.
    pub fn tick(&mut self) -> EngineResult<Vec<GameEvent>> {
        assert!(!self.clock.paused, "tick() called on paused engine");

        let day = self.clock.advance();
        let mut events = Vec::new();

        if day.is_multiple_of(DAYS_PER_WEEK) {
            if self.cycles.auto_simulation() {
                let cycle = self.cycles.generate_random_event(&mut self.cycle_rng);
                let event = GameEvent::CycleChanged {
                    day,
                    cycle,
                    returns: self.cycles.market_returns(),
                    random: true,
                };
                self.record_event(&event)?;
                events.push(event);
            }

            self.take_snapshot()?;
            let completed = day / DAYS_PER_WEEK - 1;
            let event = GameEvent::WeekCompleted { week: completed };
            self.record_event(&event)?;
            events.push(event);
        }

        Ok(events)
    }

    /// Run n days in a loop. Used for testing and fast-forward.
    pub fn run_days(&mut self, n: u64) -> EngineResult<()> {
        self.clock.resume();
        for _ in 0..n {
            self.tick()?;
        }
        self.clock.pause();
        Ok(())
    }

    /// Apply one external command. Failures are reported through the
    /// returned error (and, for rejected moves, the event log); state
    /// is never partially mutated.
    pub fn apply(&mut self, command: PlayerCommand) -> EngineResult<Vec<GameEvent>> {
        match command {
            PlayerCommand::Pause => {
                self.clock.pause();
                Ok(Vec::new())
            }
            PlayerCommand::Resume => {
                self.clock.resume();
                Ok(Vec::new())
            }
            PlayerCommand::SetCycle { cycle } => {
                // Parse first: an unknown name fails here, before any
                // market is touched.
                let cycle: EconomicCycle = cycle.parse()?;
                self.cycles.set_cycle(cycle);
                let event = GameEvent::CycleChanged {
                    day: self.clock.current_day,
                    cycle,
                    returns: self.cycles.market_returns(),
                    random: false,
                };
                self.record_event(&event)?;
                Ok(vec![event])
            }
            PlayerCommand::TriggerRandomEvent => {
                let cycle = self.cycles.generate_random_event(&mut self.cycle_rng);
                let event = GameEvent::CycleChanged {
                    day: self.clock.current_day,
                    cycle,
                    returns: self.cycles.market_returns(),
                    random: true,
                };
                self.record_event(&event)?;
                Ok(vec![event])
            }
            PlayerCommand::ToggleAutoSimulation => {
                let enabled = self.cycles.toggle_auto_simulation();
                log::info!("auto simulation {}", if enabled { "on" } else { "off" });
                let event = GameEvent::AutoSimulationToggled {
                    day: self.clock.current_day,
                    enabled,
                };
                self.record_event(&event)?;
                Ok(vec![event])
            }
            PlayerCommand::SubmitActions { player_id, draft } => {
                let week = self.clock.current_week();
                self.submit_actions(&player_id, week, &draft, false)
            }
            PlayerCommand::EditMoves {
                player_id,
                week,
                draft,
            } => self.submit_actions(&player_id, week, &draft, true),
        }
    }

    fn submit_actions(
        &mut self,
        player_id: &str,
        week: Week,
        draft: &ActionDraft,
        replace: bool,
    ) -> EngineResult<Vec<GameEvent>> {
        let current_week = self.clock.current_week();
        if week != current_week {
            return Err(EngineError::WeekClosed { week });
        }

        let player = self
            .store
            .player(&self.run_id, player_id)?
            .ok_or_else(|| EngineError::UnknownPlayer {
                id: player_id.to_string(),
            })?;

        let validated = match action::validate(draft, player.soldiers) {
            Ok(validated) => validated,
            Err(err) => {
                log::warn!("week={week} move rejected for {player_id}: {err}");
                let event = GameEvent::ActionRejected {
                    week,
                    player_id: player_id.to_string(),
                    reason: err.to_string(),
                };
                self.record_event(&event)?;
                return Err(err.into());
            }
        };

        let existing = self.store.action_for_week(&self.run_id, week, player_id)?;
        let record = ActionRecord {
            id: existing
                .as_ref()
                .map(|r| r.id.clone())
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            run_id: self.run_id.clone(),
            week,
            player_id: player_id.to_string(),
            action: validated,
            submitted_day: self.clock.current_day,
        };

        let event = match (existing.is_some(), replace) {
            (true, false) => return Err(EngineError::AlreadySubmitted { week }),
            (true, true) => {
                self.store.replace_action(&record)?;
                log::info!("week={week} moves replaced for {player_id}");
                GameEvent::ActionReplaced {
                    week,
                    player_id: player_id.to_string(),
                    move_kind: record.action.primary.kind_str().to_string(),
                }
            }
            (false, _) => {
                self.store.insert_action(&record)?;
                log::info!(
                    "week={week} {} submitted for {player_id}",
                    record.action.primary.kind_str()
                );
                GameEvent::ActionSubmitted {
                    week,
                    player_id: player_id.to_string(),
                    move_kind: record.action.primary.kind_str().to_string(),
                }
            }
        };

        self.record_event(&event)?;
        Ok(vec![event])
    }

    fn take_snapshot(&self) -> EngineResult<()> {
        let snapshot = EconomySnapshot {
            run_id: self.run_id.clone(),
            week: self.clock.current_week(),
            cycle: self.cycles.state.current_cycle,
            returns: self.cycles.market_returns(),
        };
        self.store.save_snapshot(&snapshot)?;
        log::debug!("economy snapshot saved for week {}", snapshot.week);
        Ok(())
    }

    fn record_event(&self, event: &GameEvent) -> EngineResult<()> {
        let entry = EventLogEntry {
            id: None,
            run_id: self.run_id.clone(),
            day: self.clock.current_day,
            event_type: event_type_name(event).to_string(),
            payload: serde_json::to_string(event)?,
        };
        self.store.append_event(&entry)
    }
}
