//! Position evaluation at the search's leaf nodes.
//!
//! The evaluator is an external collaborator: the search only sees this
//! trait. In production the policy/value pair comes from a trained network;
//! the bundled [`RolloutEvaluator`] provides a dependency-free stand-in.

use std::cell::RefCell;

use quorzero_core::{Game, Result};
use rand::Rng;

/// Evaluator output: prior policy over the full action space plus a value
/// estimate in [-1, 1] from the perspective of the player to move.
#[derive(Clone, Debug)]
pub struct Evaluation {
    pub policy: Vec<f32>,
    pub value: f32,
}

/// Maps a position to (prior policy, value estimate).
///
/// The policy must sum to ~1 over legal actions and be zero elsewhere. A
/// failure is fatal to the current search step and propagates unchanged.
pub trait Evaluator<G: Game> {
    fn evaluate(&self, game: &G, state: &G::State) -> Result<Evaluation>;
}

/// Uniform priors plus one bounded random playout for the value.
pub struct RolloutEvaluator<R: Rng> {
    rng: RefCell<R>,
    max_rollout_depth: usize,
}

impl<R: Rng> RolloutEvaluator<R> {
    pub fn new(rng: R, max_rollout_depth: usize) -> Self {
        Self {
            rng: RefCell::new(rng),
            max_rollout_depth,
        }
    }

    /// Plays random moves from `initial` until the game ends or the depth
    /// budget runs out; returns the outcome from the perspective of the
    /// player to move at `initial` (0 when the playout was truncated).
    fn rollout<G: Game>(&self, game: &G, initial: &G::State) -> f32 {
        let mut state = initial.clone();
        let mut depth = 0;

        while !game.is_terminal(&state) && depth < self.max_rollout_depth {
            let actions = game.legal_actions(&state);
            if actions.is_empty() {
                break;
            }
            let pick = self.rng.borrow_mut().gen_range(0..actions.len());
            state = game.apply(&state, actions[pick]);
            depth += 1;
        }

        match game.outcome(&state) {
            // outcome() speaks for the player who made the last move; an odd
            // number of plies means that was the player we evaluate for.
            Some(outcome) if depth % 2 == 1 => outcome,
            Some(outcome) => -outcome,
            None => 0.0,
        }
    }
}

impl<G: Game, R: Rng> Evaluator<G> for RolloutEvaluator<R> {
    fn evaluate(&self, game: &G, state: &G::State) -> Result<Evaluation> {
        let legal = game.legal_actions(state);
        let mut policy = vec![0.0; game.num_actions()];
        if !legal.is_empty() {
            let prior = 1.0 / legal.len() as f32;
            for action in &legal {
                policy[game.action_to_index(*action)] = prior;
            }
        }

        let value = self.rollout(game, state);
        Ok(Evaluation { policy, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    // Nim-like toy game: players alternately take 1 or 2 from a pile of 5;
    // whoever takes the last token wins.
    #[derive(Clone)]
    struct TakeFive;

    #[derive(Clone, PartialEq, Eq)]
    struct Pile(u8);

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    struct Take(u8);

    impl Game for TakeFive {
        type State = Pile;
        type Action = Take;

        fn initial_state(&self) -> Pile {
            Pile(5)
        }

        fn legal_actions(&self, state: &Pile) -> Vec<Take> {
            (1..=2).filter(|&n| n <= state.0).map(Take).collect()
        }

        fn apply(&self, state: &Pile, action: Take) -> Pile {
            Pile(state.0 - action.0)
        }

        fn is_terminal(&self, state: &Pile) -> bool {
            state.0 == 0
        }

        fn outcome(&self, state: &Pile) -> Option<f32> {
            (state.0 == 0).then_some(1.0)
        }

        fn observe(&self, state: &Pile) -> Vec<f32> {
            vec![state.0 as f32 / 5.0]
        }

        fn action_to_index(&self, action: Take) -> usize {
            (action.0 - 1) as usize
        }

        fn index_to_action(&self, index: usize) -> Option<Take> {
            (index < 2).then(|| Take(index as u8 + 1))
        }

        fn num_actions(&self) -> usize {
            2
        }
    }

    #[test]
    fn uniform_priors_over_legal_actions() {
        let evaluator = RolloutEvaluator::new(ChaCha8Rng::seed_from_u64(7), 10);
        let eval = evaluator.evaluate(&TakeFive, &Pile(5)).unwrap();
        assert_eq!(eval.policy, vec![0.5, 0.5]);

        let eval = evaluator.evaluate(&TakeFive, &Pile(1)).unwrap();
        assert_eq!(eval.policy, vec![1.0, 0.0]);
    }

    #[test]
    fn rollout_value_stays_in_range() {
        let evaluator = RolloutEvaluator::new(ChaCha8Rng::seed_from_u64(7), 10);
        for pile in 1..=5 {
            let eval = evaluator.evaluate(&TakeFive, &Pile(pile)).unwrap();
            assert!((-1.0..=1.0).contains(&eval.value));
        }
    }
}
