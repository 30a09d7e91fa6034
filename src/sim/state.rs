//! Game state and core simulation types
//!
//! All state that a replay needs lives here: config, seed, RNG, entities.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::CrashCause;
use super::entity::Entity;
use super::spawner;
use crate::config::GameConfig;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Before the first launch, waiting for a flap (sprite variant only)
    Idle,
    /// Active gameplay
    Running,
    /// Round ended; entities frozen where they were
    GameOver,
}

/// Things the platform layer reacts to (sound cues, logging)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    RoundStarted,
    Flapped,
    Scored { score: u32 },
    /// `score` is the final score of the round, including a pair spawned
    /// on the crash tick
    Crashed { cause: CrashCause, score: u32 },
    QuitRequested,
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Immutable configuration for this session
    pub config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Pairs spawned this round
    pub score: u32,
    /// True until the first launch out of `Idle`
    pub first_launch: bool,
    /// Ticks advanced this round
    pub time_ticks: u64,
    /// The bird
    pub player: Entity,
    /// Obstacles, oldest first; the last one is the most recently spawned
    pub obstacles: Vec<Entity>,
    /// Scrolling background tiles (two, or none for the solid variant)
    pub backgrounds: Vec<Entity>,
    /// Events raised since the platform last drained them
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Gap RNG
    pub(crate) rng: Pcg32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed.
    ///
    /// Variants with an idle screen wait in `Idle`; the others start a round
    /// immediately.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut state = Self {
            player: Entity::player(1, &config),
            config,
            seed,
            phase: GamePhase::Idle,
            score: 0,
            first_launch: true,
            time_ticks: 0,
            obstacles: Vec::new(),
            backgrounds: Vec::new(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 2,
        };

        if state.config.variant.has_background() {
            let width = state.config.screen_width as f32;
            for left in [0.0, width] {
                let id = state.next_entity_id();
                let tile = Entity::background_tile(id, left, &state.config);
                state.backgrounds.push(tile);
            }
        }

        if !state.config.variant.has_idle_screen() {
            state.reset();
        }

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Start a fresh round: player back at spawn, one pair queued, score 0.
    ///
    /// Background tiles keep scrolling from wherever they are.
    pub fn reset(&mut self) {
        self.obstacles.clear();
        self.score = 0;
        self.time_ticks = 0;
        self.player = Entity::player(self.player.id, &self.config);
        spawner::spawn_pair(self);
        self.phase = GamePhase::Running;
        self.first_launch = false;
        self.events.push(GameEvent::RoundStarted);
        log::info!("Round started (seed {})", self.seed);
    }

    /// Apply a flap to the player
    pub fn flap(&mut self) {
        self.player.flap(self.config.flap_strength);
        self.events.push(GameEvent::Flapped);
    }

    /// End the round. Only the first cause in a tick is recorded.
    pub fn crash(&mut self, cause: CrashCause) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::Crashed {
            cause,
            score: self.score,
        });
        log::info!(
            "Game over ({:?}) with score {} after {} ticks",
            cause,
            self.score,
            self.time_ticks
        );
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
