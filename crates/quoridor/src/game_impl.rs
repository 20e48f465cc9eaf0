//! `Game` trait implementation for the tree search.

use quorzero_core::Game;

use crate::{observation, Action, Environment, ACTION_SPACE_SIZE};

/// The Quoridor-style game as seen by the search.
#[derive(Clone, Copy, Default)]
pub struct Quoridor;

impl Game for Quoridor {
    type State = Environment;
    type Action = Action;

    fn initial_state(&self) -> Environment {
        Environment::new()
    }

    fn legal_actions(&self, state: &Environment) -> Vec<Action> {
        state.legal_actions()
    }

    fn apply(&self, state: &Environment, action: Action) -> Environment {
        debug_assert!(
            state.legal_actions().contains(&action),
            "BUG: apply called with illegal action {action}"
        );
        let mut next = state.clone();
        next.apply_unchecked(action);
        next
    }

    fn is_terminal(&self, state: &Environment) -> bool {
        state.is_end()
    }

    fn outcome(&self, state: &Environment) -> Option<f32> {
        // The winner is always the player who just moved: a pawn only ever
        // enters its goal row on its own move.
        state.winner().map(|winner| {
            if winner == state.opponent_player() {
                1.0
            } else {
                -1.0
            }
        })
    }

    fn observe(&self, state: &Environment) -> Vec<f32> {
        observation::encode(state)
    }

    fn action_to_index(&self, action: Action) -> usize {
        action.index()
    }

    fn index_to_action(&self, index: usize) -> Option<Action> {
        Action::from_index(index)
    }

    fn num_actions(&self) -> usize {
        ACTION_SPACE_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Player, Point};

    #[test]
    fn trait_basics() {
        let game = Quoridor;
        let state = game.initial_state();
        assert!(!game.is_terminal(&state));
        assert_eq!(game.outcome(&state), None);
        assert_eq!(game.num_actions(), 209);
        assert_eq!(game.legal_actions(&state).len(), 131);
    }

    #[test]
    fn apply_does_not_mutate_the_source() {
        let game = Quoridor;
        let state = game.initial_state();
        let action = game.legal_actions(&state)[0];
        let next = game.apply(&state, action);
        assert_eq!(state.turns(), 1);
        assert_eq!(next.turns(), 2);
    }

    #[test]
    fn outcome_is_from_the_mover_perspective() {
        let game = Quoridor;
        let mut state = game.initial_state();

        // Walk Blue straight to its goal row while Red shuffles sideways.
        for _ in 0..7 {
            let blue = state.player_position(Player::Blue);
            state = game.apply(&state, Action::Move(Point::new(blue.x, blue.y - 1)));
            let red = state.player_position(Player::Red);
            let dx = if red.x > 1 { -1 } else { 1 };
            state = game.apply(&state, Action::Move(Point::new(red.x + dx, red.y)));
        }
        let blue = state.player_position(Player::Blue);
        state = game.apply(&state, Action::Move(Point::new(blue.x, blue.y - 1)));

        assert!(game.is_terminal(&state));
        assert_eq!(state.winner(), Some(Player::Blue));
        // Blue just moved, so the outcome reads +1.
        assert_eq!(game.outcome(&state), Some(1.0));
    }
}
