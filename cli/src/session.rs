use chrono::prelude::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use sweeper_core::{GameConfig, GameEngine, GameError, GameStatus, Observation};

use crate::command::Command;
use crate::config::Settings;

/// What the prompt loop should do after a command.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Step {
    /// Board changed, redraw it.
    Redraw,
    /// Nothing visible changed.
    Unchanged,
    ShowHelp,
    Quit,
}

/// One player at one terminal: the engine plus the elapsed-time clock the
/// engine knows nothing about.
pub(crate) struct Session {
    config: GameConfig,
    engine: GameEngine,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(settings: Settings, seed: u64) -> Result<Self, GameError> {
        log::debug!("seed: {}", seed);
        let rng = SmallRng::seed_from_u64(seed);
        let engine = GameEngine::with_limits(settings.limits, settings.game, rng)?;
        Ok(Self::from_engine(settings.game, engine))
    }

    pub(crate) fn from_engine(config: GameConfig, engine: GameEngine) -> Self {
        Self {
            config,
            engine,
            started_at: None,
            ended_at: None,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.engine.status()
    }

    pub fn observe(&self) -> Observation {
        Observation::from_engine(&self.engine)
    }

    /// Seconds since the first reveal, frozen once the game is over.
    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs_at(Utc::now())
    }

    fn elapsed_secs_at(&self, now: DateTime<Utc>) -> u32 {
        if let Some(started_at) = self.started_at {
            (self.ended_at.unwrap_or(now) - started_at)
                .num_seconds()
                .max(0) as u32
        } else {
            0
        }
    }

    pub fn apply(&mut self, command: Command) -> Result<Step, GameError> {
        Ok(match command {
            Command::Reveal(coords) => {
                let result = self.engine.reveal(coords)?;
                if result.has_update() {
                    self.mark_started();
                }
                if result.status.is_finished() {
                    self.mark_ended();
                }
                if result.has_update() {
                    Step::Redraw
                } else {
                    Step::Unchanged
                }
            }
            Command::Flag(coords) => {
                if self.engine.toggle_flag(coords)?.has_update() {
                    Step::Redraw
                } else {
                    Step::Unchanged
                }
            }
            Command::NewGame => {
                self.engine.start(self.config)?;
                self.started_at = None;
                self.ended_at = None;
                Step::Redraw
            }
            Command::Help => Step::ShowHelp,
            Command::Quit => Step::Quit,
        })
    }

    fn mark_started(&mut self) {
        if self.started_at.is_none() {
            let now = Utc::now();
            log::debug!("started at {}", now);
            self.started_at = Some(now);
        }
    }

    fn mark_ended(&mut self) {
        if self.ended_at.is_none() {
            let now = Utc::now();
            log::debug!("ended at {}", now);
            self.ended_at = Some(now);
        }
    }
}
