//! Discrete player commands
//!
//! Key presses are applied to the state as soon as they arrive; nothing is
//! buffered until the next tick. Several flaps in one frame simply overwrite
//! the velocity again.

use super::state::{GameEvent, GamePhase, GameState};

/// A key-press level command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Space: flap while running, otherwise start a new round
    Flap,
    /// Escape: leave the game (variants with a quit key only)
    Quit,
}

/// What the platform loop should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Apply a command to the state
pub fn apply_command(state: &mut GameState, command: Command) -> Flow {
    match command {
        Command::Flap => {
            match state.phase {
                GamePhase::Idle | GamePhase::GameOver => state.reset(),
                GamePhase::Running => state.flap(),
            }
            Flow::Continue
        }
        Command::Quit if state.config.variant.has_quit_key() => {
            state.events.push(GameEvent::QuitRequested);
            log::info!("Quit requested");
            Flow::Quit
        }
        Command::Quit => Flow::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::tick::{TickInput, tick};

    #[test]
    fn test_flap_starts_from_idle() {
        let mut state = GameState::new(GameConfig::sprite(), 1);
        assert_eq!(apply_command(&mut state, Command::Flap), Flow::Continue);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.obstacles.len(), 2);
        // Starting a round does not also flap
        assert_eq!(state.player.vel.y, 0.0);
    }

    #[test]
    fn test_flap_while_running_overwrites_velocity() {
        let mut state = GameState::new(GameConfig::solid(), 1);
        state.player.vel.y = -6.0;
        state.drain_events();

        apply_command(&mut state, Command::Flap);
        apply_command(&mut state, Command::Flap);

        assert_eq!(state.player.vel.y, 8.0);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Flapped, GameEvent::Flapped]
        );
    }

    #[test]
    fn test_flap_after_game_over_resets() {
        let mut state = GameState::new(GameConfig::solid(), 1);
        state.obstacles.clear();
        state.player.pos.y = -10.0;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);

        apply_command(&mut state, Command::Flap);

        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.player.pos, state.config.player_spawn());
    }

    #[test]
    fn test_quit_depends_on_variant() {
        let mut solid = GameState::new(GameConfig::solid(), 1);
        assert_eq!(apply_command(&mut solid, Command::Quit), Flow::Continue);
        assert_eq!(solid.phase, GamePhase::Running);

        let mut sprite = GameState::new(GameConfig::sprite(), 1);
        sprite.drain_events();
        assert_eq!(apply_command(&mut sprite, Command::Quit), Flow::Quit);
        assert_eq!(sprite.drain_events(), vec![GameEvent::QuitRequested]);
        // Quit is not a phase transition
        assert_eq!(sprite.phase, GamePhase::Idle);
    }
}
