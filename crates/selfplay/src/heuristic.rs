//! Deterministic baseline evaluator built on shortest-path distances.
//!
//! Stands in for the trained network: the value is the squashed difference
//! between the two pawns' remaining BFS distances, and the priors nudge the
//! search toward distance-reducing pawn moves. Good enough to finish games
//! decisively, cheap enough for tests.

use std::collections::VecDeque;

use quorzero_core::{EngineError, Game, Result, Value};
use quorzero_mcts::{Evaluation, Evaluator};
use quorzero_quoridor::{Action, Direction, Environment, Point, Quoridor, WallBoard, BOARD_SIZE};

/// Prior weight multiplier for pawn moves that shorten the path.
const FORWARD_WEIGHT: f32 = 4.0;
/// Prior weight for pawn moves that do not shorten the path.
const NEUTRAL_WEIGHT: f32 = 1.0;
/// Prior weight for wall placements.
const WALL_WEIGHT: f32 = 0.5;
/// Distance-difference scale before the tanh squash.
const VALUE_SCALE: f32 = 5.0;

/// Shortest path length in moves from `from` to any cell of `target_row`,
/// ignoring the opponent's pawn. `None` when no path exists.
pub fn goal_distance(board: &WallBoard, from: Point, target_row: i32) -> Option<u32> {
    if from.y == target_row {
        return Some(0);
    }

    let cell_index = |p: Point| ((p.y - 1) * BOARD_SIZE + (p.x - 1)) as usize;
    let mut distance = [u32::MAX; (BOARD_SIZE * BOARD_SIZE) as usize];
    let mut queue = VecDeque::new();
    distance[cell_index(from)] = 0;
    queue.push_back(from);

    while let Some(cell) = queue.pop_front() {
        let next_distance = distance[cell_index(cell)] + 1;
        for dir in Direction::ALL {
            if board.blocks(cell, dir) {
                continue;
            }
            let next = cell.step(dir);
            if !next.in_board() || distance[cell_index(next)] != u32::MAX {
                continue;
            }
            if next.y == target_row {
                return Some(next_distance);
            }
            distance[cell_index(next)] = next_distance;
            queue.push_back(next);
        }
    }
    None
}

/// The baseline evaluator.
#[derive(Clone, Copy, Default)]
pub struct ShortestPathEvaluator;

impl Evaluator<Quoridor> for ShortestPathEvaluator {
    fn evaluate(&self, game: &Quoridor, env: &Environment) -> Result<Evaluation> {
        let me = env.current_player();
        let opp = env.opponent_player();
        let board = env.wall_board();

        // Legal wall placement keeps both paths alive, so a missing path
        // here means the position itself is corrupt.
        let my_distance = goal_distance(board, env.player_position(me), me.goal_row())
            .ok_or_else(|| EngineError::Evaluator(format!("{me} has no path to its goal")))?;
        let opp_distance = goal_distance(board, env.player_position(opp), opp.goal_row())
            .ok_or_else(|| EngineError::Evaluator(format!("{opp} has no path to its goal")))?;

        let lead = opp_distance as f32 - my_distance as f32;
        let value = Value::clamped((lead / VALUE_SCALE).tanh());

        let legal = game.legal_actions(env);
        let mut policy = vec![0.0; game.num_actions()];
        let mut total = 0.0;
        for &action in &legal {
            let weight = match action {
                Action::Move(target) => {
                    match goal_distance(board, target, me.goal_row()) {
                        Some(d) if d < my_distance => FORWARD_WEIGHT,
                        _ => NEUTRAL_WEIGHT,
                    }
                }
                Action::PlaceHorizontalWall(_) | Action::PlaceVerticalWall(_) => WALL_WEIGHT,
            };
            policy[game.action_to_index(action)] = weight;
            total += weight;
        }
        for p in &mut policy {
            *p /= total;
        }

        Ok(Evaluation {
            policy,
            value: value.get(),
        })
    }
}
