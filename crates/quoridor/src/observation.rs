//! State-tensor encoding.
//!
//! The layout is the external contract shared with the trainer: seven 9x9
//! planes, flattened plane-major with cells row-major (`(y-1)*9 + (x-1)`).
//!
//! | plane | contents                                   |
//! |-------|--------------------------------------------|
//! | 0     | Blue pawn (one-hot)                        |
//! | 1     | Red pawn (one-hot)                         |
//! | 2     | horizontal wall anchors                    |
//! | 3     | vertical wall anchors                      |
//! | 4     | Blue walls remaining / 10, filled          |
//! | 5     | Red walls remaining / 10, filled           |
//! | 6     | side to move (all ones when Blue)          |

use crate::{Environment, Player, WallOrientation, WALLS_PER_PLAYER, BOARD_SIZE};

/// Cells per plane.
const PLANE_SIZE: usize = (BOARD_SIZE * BOARD_SIZE) as usize;

/// Number of planes.
pub const NUM_PLANES: usize = 7;

/// Length of the flat state tensor.
pub const STATE_SIZE: usize = NUM_PLANES * PLANE_SIZE;

mod planes {
    pub const BLUE_PAWN: usize = 0;
    pub const RED_PAWN: usize = 1;
    pub const HORIZONTAL_WALLS: usize = 2;
    pub const VERTICAL_WALLS: usize = 3;
    pub const BLUE_WALL_BUDGET: usize = 4;
    pub const RED_WALL_BUDGET: usize = 5;
    pub const SIDE_TO_MOVE: usize = 6;
}

/// Encodes an environment as the flat float tensor fed to the evaluator and
/// written to the training dump.
pub fn encode(env: &Environment) -> Vec<f32> {
    let mut state = vec![0.0f32; STATE_SIZE];

    let cell = |plane: usize, x: i32, y: i32| -> usize {
        plane * PLANE_SIZE + ((y - 1) * BOARD_SIZE + (x - 1)) as usize
    };

    let blue = env.player_position(Player::Blue);
    let red = env.player_position(Player::Red);
    state[cell(planes::BLUE_PAWN, blue.x, blue.y)] = 1.0;
    state[cell(planes::RED_PAWN, red.x, red.y)] = 1.0;

    for wall in env.wall_board().walls() {
        let a = wall.anchor;
        if !a.in_board() {
            continue;
        }
        let plane = match wall.orientation {
            WallOrientation::Horizontal => planes::HORIZONTAL_WALLS,
            WallOrientation::Vertical => planes::VERTICAL_WALLS,
        };
        state[cell(plane, a.x, a.y)] = 1.0;
    }

    let budget = |player: Player| -> f32 {
        env.remaining_wall_count(player) as f32 / WALLS_PER_PLAYER as f32
    };
    fill_plane(&mut state, planes::BLUE_WALL_BUDGET, budget(Player::Blue));
    fill_plane(&mut state, planes::RED_WALL_BUDGET, budget(Player::Red));

    if env.current_player() == Player::Blue {
        fill_plane(&mut state, planes::SIDE_TO_MOVE, 1.0);
    }

    state
}

fn fill_plane(state: &mut [f32], plane: usize, value: f32) {
    let base = plane * PLANE_SIZE;
    state[base..base + PLANE_SIZE].fill(value);
}
