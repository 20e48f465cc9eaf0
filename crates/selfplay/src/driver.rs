//! Plays one game between two search agents and records training data.

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use quorzero_core::Value;
use quorzero_mcts::{Evaluator, Mcts, MctsConfig};
use quorzero_quoridor::{observation, Environment, Player, Quoridor, ACTION_SPACE_SIZE, STATE_SIZE};

use crate::record::GameRecord;

/// Orchestrates two agents over one shared environment.
///
/// The environment is authoritative; after every committed action BOTH
/// agents advance their trees so each stays consistent with the true game
/// even on turns it did not act.
pub struct SelfPlayDriver<E: Evaluator<Quoridor>> {
    env: Environment,
    agents: [Mcts<Quoridor, E, ChaCha8Rng>; 2],
}

impl<E: Evaluator<Quoridor>> SelfPlayDriver<E> {
    /// Both agents share the configuration; each gets its own evaluator and
    /// RNG stream.
    pub fn new(config: MctsConfig, evaluators: [E; 2], seed: u64) -> Self {
        let game = Quoridor;
        let env = Environment::new();
        let [blue_eval, red_eval] = evaluators;
        let blue = Mcts::new(
            game,
            env.clone(),
            config.clone(),
            blue_eval,
            ChaCha8Rng::seed_from_u64(seed),
        );
        let red = Mcts::new(
            game,
            env.clone(),
            config,
            red_eval,
            ChaCha8Rng::seed_from_u64(seed.wrapping_add(1)),
        );
        Self {
            env,
            agents: [blue, red],
        }
    }

    /// Runs the game to completion and returns the labeled record.
    ///
    /// Per turn: the acting side searches under its simulation budget, the
    /// pre-move state tensor and the acting agent's visit distribution are
    /// buffered, and the visit-maximal action is committed everywhere.
    pub fn run_single_game(&mut self) -> Result<GameRecord> {
        let mut record = GameRecord::new(STATE_SIZE, ACTION_SPACE_SIZE);

        while !self.env.is_end() {
            let acting = self.env.current_player();
            let agent = &mut self.agents[acting.index()];

            agent.run_search().context("search failed")?;
            let action = agent.best_action();

            record.push_turn(
                observation::encode(&self.env),
                agent.root_policy().into_inner(),
            );

            debug!(turn = self.env.turns(), player = %acting, %action, "committing");
            self.env
                .play(action)
                .context("search proposed an illegal action")?;
            for agent in &mut self.agents {
                agent.advance(action);
            }
        }

        let winner = self
            .env
            .winner()
            .expect("BUG: game ended without a winner");
        info!(%winner, turns = record.total_turns(), "game finished");

        // Turn 1 (record index 0) is Blue's; labels follow that parity.
        let labels = (0..record.total_turns())
            .map(|i| {
                let acted = if i % 2 == 0 { Player::Blue } else { Player::Red };
                let label = if acted == winner {
                    Value::WIN
                } else {
                    Value::LOSS
                };
                label.get()
            })
            .collect();
        record.set_outcomes(labels);

        Ok(record)
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristic::ShortestPathEvaluator;

    fn run_quick_game(seed: u64) -> (GameRecord, Option<Player>) {
        // Noise-free so the test is fully deterministic.
        let config = MctsConfig::deterministic(24);
        let mut driver = SelfPlayDriver::new(
            config,
            [ShortestPathEvaluator, ShortestPathEvaluator],
            seed,
        );
        let record = driver.run_single_game().unwrap();
        let winner = driver.environment().winner();
        (record, winner)
    }

    #[test]
    fn game_runs_to_completion_and_is_labeled() {
        let (record, winner) = run_quick_game(42);
        let winner = winner.expect("game must end with a winner");

        // Blue needs at least eight moves to cross the board.
        assert!(record.total_turns() >= 15);
        assert_eq!(record.outcomes().len(), record.total_turns());

        for (i, &label) in record.outcomes().iter().enumerate() {
            let acted = if i % 2 == 0 { Player::Blue } else { Player::Red };
            let expected = if acted == winner { 1.0 } else { -1.0 };
            assert_eq!(label, expected, "turn {i}");
        }
    }

    #[test]
    fn recorded_policies_are_distributions() {
        let (record, _) = run_quick_game(7);
        for (i, policy) in record.policies().iter().enumerate() {
            let sum: f32 = policy.iter().sum();
            assert!((sum - 1.0).abs() < 1e-4, "turn {i} sums to {sum}");
            assert!(policy.iter().all(|&p| p >= 0.0), "turn {i} negative");
        }
        for state in record.states() {
            assert_eq!(state.len(), STATE_SIZE);
        }
    }

    #[test]
    fn identical_seeds_replay_identically() {
        let (a, _) = run_quick_game(123);
        let (b, _) = run_quick_game(123);
        assert_eq!(a, b);
    }
}
