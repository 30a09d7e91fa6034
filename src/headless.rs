//! Headless autopilot runs
//!
//! Plays the game with no window: the autopilot flaps, a crashed round is
//! restarted with a flap like a player would, and the outcome is summarized.

use serde::{Deserialize, Serialize};

use crate::audio::{SoundEffect, cue_for};
use crate::config::{GameConfig, Variant};
use crate::sim::{
    Command, CrashCause, GameEvent, GamePhase, GameState, TickInput, apply_command, tick,
};

/// One finished round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub score: u32,
    pub cause: CrashCause,
    /// Tick (counted over the whole run) on which it ended
    pub ended_at: u64,
}

/// Outcome of a headless run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub variant: Variant,
    pub seed: u64,
    pub ticks: u64,
    pub rounds_started: u32,
    pub finished_rounds: Vec<RoundRecord>,
    /// Score of the round still in progress when the budget ran out
    pub final_score: u32,
    pub final_phase: GamePhase,
    pub best_score: u32,
    pub flaps: u32,
    /// Clips that would have played (sprite variant only)
    pub sound_cues: CueCounts,
}

/// Per-clip play counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CueCounts {
    pub flap: u32,
    pub point: u32,
    pub hit: u32,
}

impl CueCounts {
    fn record(&mut self, effect: SoundEffect) {
        match effect {
            SoundEffect::Flap => self.flap += 1,
            SoundEffect::Point => self.point += 1,
            SoundEffect::Hit => self.hit += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.flap + self.point + self.hit
    }
}

/// Run `ticks` ticks of autopilot play
pub fn run(config: GameConfig, seed: u64, ticks: u64) -> RunSummary {
    let variant = config.variant;
    let sounds = variant.uses_assets();
    let mut state = GameState::new(config, seed);
    let input = TickInput { autopilot: true };

    let mut summary = RunSummary {
        variant,
        seed,
        ticks,
        rounds_started: 0,
        finished_rounds: Vec::new(),
        final_score: 0,
        final_phase: state.phase,
        best_score: 0,
        flaps: 0,
        sound_cues: CueCounts::default(),
    };

    log::info!(
        "Headless run: {} variant, seed {}, {} ticks",
        variant.as_str(),
        seed,
        ticks
    );

    for now in 0..ticks {
        if state.phase != GamePhase::Running {
            apply_command(&mut state, Command::Flap);
        }
        tick(&mut state, &input);

        for event in state.drain_events() {
            if let Some(effect) = cue_for(&event).filter(|_| sounds) {
                summary.sound_cues.record(effect);
            }
            match event {
                GameEvent::RoundStarted => summary.rounds_started += 1,
                GameEvent::Flapped => summary.flaps += 1,
                GameEvent::Scored { score } => {
                    summary.best_score = summary.best_score.max(score);
                }
                GameEvent::Crashed { cause, score } => summary.finished_rounds.push(RoundRecord {
                    score,
                    cause,
                    ended_at: now + 1,
                }),
                GameEvent::QuitRequested => {}
            }
        }
    }

    summary.final_score = state.score;
    summary.final_phase = state.phase;
    log::info!(
        "Headless run finished: {} rounds, best score {}",
        summary.rounds_started,
        summary.best_score
    );
    summary
}
