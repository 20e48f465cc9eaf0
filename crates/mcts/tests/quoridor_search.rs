//! End-to-end search over the real board game with a flat evaluator.

use quorzero_core::{Game, Result};
use quorzero_mcts::{Evaluation, Evaluator, Mcts, MctsConfig};
use quorzero_quoridor::Quoridor;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Uniform priors, neutral value. Cheap enough for exhaustive-ish tests.
struct FlatEvaluator;

impl Evaluator<Quoridor> for FlatEvaluator {
    fn evaluate(&self, game: &Quoridor, state: &<Quoridor as Game>::State) -> Result<Evaluation> {
        let legal = game.legal_actions(state);
        let mut policy = vec![0.0; game.num_actions()];
        let prior = 1.0 / legal.len() as f32;
        for action in &legal {
            policy[game.action_to_index(*action)] = prior;
        }
        Ok(Evaluation { policy, value: 0.0 })
    }
}

fn searched_agent(simulations: usize, seed: u64) -> Mcts<Quoridor, FlatEvaluator, ChaCha8Rng> {
    let game = Quoridor;
    let state = game.initial_state();
    let mut mcts = Mcts::new(
        game,
        state,
        MctsConfig::with_simulations(simulations),
        FlatEvaluator,
        ChaCha8Rng::seed_from_u64(seed),
    );
    mcts.run_search().unwrap();
    mcts
}

#[test]
fn search_covers_only_legal_quoridor_actions() {
    let mcts = searched_agent(48, 17);

    let policy = mcts.root_policy();
    assert!((policy.sum() - 1.0).abs() < 1e-4);

    let game = Quoridor;
    let legal = game.legal_actions(mcts.root_state());
    assert_eq!(mcts.root().children.len(), legal.len());
    for index in 0..game.num_actions() {
        let is_legal = legal.iter().any(|&a| game.action_to_index(a) == index);
        if !is_legal {
            assert_eq!(policy.get_or_zero(index), 0.0);
        }
    }
}

#[test]
fn quoridor_search_is_reproducible() {
    let a = searched_agent(32, 99);
    let b = searched_agent(32, 99);
    assert_eq!(a.root_visit_counts(), b.root_visit_counts());
    assert_eq!(a.best_action(), b.best_action());
}

#[test]
fn advancing_both_sides_keeps_the_trees_consistent() {
    let game = Quoridor;
    let mut acting = searched_agent(32, 7);
    let mut observing = Mcts::new(
        game,
        game.initial_state(),
        MctsConfig::with_simulations(32),
        FlatEvaluator,
        ChaCha8Rng::seed_from_u64(8),
    );

    let action = acting.best_action();
    acting.advance(action);
    // The observer never searched, so its tree has no child for the
    // action; it must still follow the game with a fresh root.
    observing.advance(action);

    assert_eq!(acting.root_state(), observing.root_state());
    assert!(!observing.root().expanded);
}
