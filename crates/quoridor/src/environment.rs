//! Game state: pawns, wall budgets, turn order, and move legality.

use std::fmt;

use quorzero_core::EngineError;

use crate::{Action, Direction, Player, Point, WallBoard, BOARD_SIZE};

/// Wall quota each side starts with.
pub const WALLS_PER_PLAYER: u8 = 10;

/// Authoritative state of one game in progress.
///
/// Created fresh per game and mutated only through [`Environment::play`];
/// every mutation either fully succeeds or rejects the action before any
/// state changes.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Environment {
    board: WallBoard,
    positions: [Point; 2],
    remaining_walls: [u8; 2],
    turns: u32,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    pub fn new() -> Self {
        Self {
            board: WallBoard::new(),
            positions: [
                Player::Blue.start_position(),
                Player::Red.start_position(),
            ],
            remaining_walls: [WALLS_PER_PLAYER; 2],
            turns: 1,
        }
    }

    /// Side to move; Blue acts on odd turns.
    pub fn current_player(&self) -> Player {
        if self.turns % 2 == 1 {
            Player::Blue
        } else {
            Player::Red
        }
    }

    pub fn opponent_player(&self) -> Player {
        self.current_player().opponent()
    }

    pub fn player_position(&self, player: Player) -> Point {
        self.positions[player.index()]
    }

    pub fn remaining_wall_count(&self, player: Player) -> u8 {
        self.remaining_walls[player.index()]
    }

    /// 1-based turn counter.
    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn wall_board(&self) -> &WallBoard {
        &self.board
    }

    /// Every action the side to move may legally take, sorted ascending by
    /// action id.
    pub fn legal_actions(&self) -> Vec<Action> {
        let mut actions = self.pawn_moves();
        if self.remaining_wall_count(self.current_player()) > 0 {
            self.collect_wall_placements(&mut actions);
        }
        actions.sort_unstable_by_key(|a| a.index());
        actions
    }

    /// Applies `action` if it is legal for the side to move, advancing the
    /// turn; otherwise fails without mutating anything.
    pub fn play(&mut self, action: Action) -> Result<(), EngineError> {
        if !self.legal_actions().contains(&action) {
            return Err(EngineError::IllegalAction(action.index()));
        }
        self.apply_unchecked(action);
        Ok(())
    }

    /// True once either pawn stands on its goal row.
    pub fn is_end(&self) -> bool {
        self.winner().is_some()
    }

    pub fn winner(&self) -> Option<Player> {
        for player in [Player::Blue, Player::Red] {
            if self.player_position(player).y == player.goal_row() {
                return Some(player);
            }
        }
        None
    }

    /// Applies an action known to be legal. Used by the search on cloned
    /// states where legality was already established during expansion.
    pub(crate) fn apply_unchecked(&mut self, action: Action) {
        let me = self.current_player();
        match action {
            Action::Move(target) => {
                self.positions[me.index()] = target;
            }
            Action::PlaceHorizontalWall(anchor) => {
                self.board.place_horizontal_wall(anchor.x, anchor.y);
                self.remaining_walls[me.index()] -= 1;
            }
            Action::PlaceVerticalWall(anchor) => {
                self.board.place_vertical_wall(anchor.x, anchor.y);
                self.remaining_walls[me.index()] -= 1;
            }
        }
        self.turns += 1;
    }

    /// Orthogonal steps, straight jumps over an adjacent opponent, and
    /// diagonal jumps when the straight jump is blocked by a wall or the
    /// board edge.
    fn pawn_moves(&self) -> Vec<Action> {
        let me = self.current_player();
        let pos = self.player_position(me);
        let opp = self.player_position(me.opponent());
        let mut moves = Vec::new();

        for dir in Direction::ALL {
            if self.board.blocks(pos, dir) {
                continue;
            }
            let next = pos.step(dir);
            if !next.in_board() {
                continue;
            }
            if next != opp {
                moves.push(Action::Move(next));
                continue;
            }

            // Opponent occupies the adjacent cell: jump straight over if the
            // far cell is open, otherwise sidestep diagonally around them.
            let over = next.step(dir);
            if !self.board.blocks(next, dir) && over.in_board() {
                moves.push(Action::Move(over));
            } else {
                for side in dir.perpendicular() {
                    if self.board.blocks(next, side) {
                        continue;
                    }
                    let diagonal = next.step(side);
                    if diagonal.in_board() {
                        moves.push(Action::Move(diagonal));
                    }
                }
            }
        }
        moves
    }

    /// Every anchor/orientation that neither overlaps an existing wall nor
    /// removes the last path of either player to their goal row.
    fn collect_wall_placements(&self, actions: &mut Vec<Action>) {
        for y in 1..BOARD_SIZE {
            for x in 1..BOARD_SIZE {
                if !self.board.horizontal_wall_overlaps(x, y) {
                    let mut probe = self.board.clone();
                    probe.place_horizontal_wall(x, y);
                    if self.both_players_can_finish(&probe) {
                        actions.push(Action::PlaceHorizontalWall(Point::new(x, y)));
                    }
                }
                if !self.board.vertical_wall_overlaps(x, y) {
                    let mut probe = self.board.clone();
                    probe.place_vertical_wall(x, y);
                    if self.both_players_can_finish(&probe) {
                        actions.push(Action::PlaceVerticalWall(Point::new(x, y)));
                    }
                }
            }
        }
    }

    fn both_players_can_finish(&self, board: &WallBoard) -> bool {
        [Player::Blue, Player::Red].iter().all(|&player| {
            board.check_reachability(self.player_position(player), player.goal_row())
        })
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let blue = self.player_position(Player::Blue);
        let red = self.player_position(Player::Red);
        for y in 1..=BOARD_SIZE {
            for x in 1..=BOARD_SIZE {
                let here = Point::new(x, y);
                let glyph = if here == blue {
                    'B'
                } else if here == red {
                    'R'
                } else {
                    '.'
                };
                write!(f, " {glyph}")?;
                if x < BOARD_SIZE {
                    let sep = if self.board.is_vertical_wall_placed(x, y) {
                        '|'
                    } else {
                        ' '
                    };
                    write!(f, " {sep}")?;
                }
            }
            writeln!(f)?;
            if y < BOARD_SIZE {
                for x in 1..=BOARD_SIZE {
                    let bar = if self.board.is_horizontal_wall_placed(x, y) {
                        "---"
                    } else {
                        "   "
                    };
                    write!(f, " {bar}")?;
                }
                writeln!(f)?;
            }
        }
        writeln!(
            f,
            "turn {} ({} to move), walls B:{} R:{}",
            self.turns,
            self.current_player(),
            self.remaining_wall_count(Player::Blue),
            self.remaining_wall_count(Player::Red),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_game_setup() {
        let env = Environment::new();
        assert_eq!(env.current_player(), Player::Blue);
        assert_eq!(env.opponent_player(), Player::Red);
        assert_eq!(env.player_position(Player::Blue), Point::new(5, 9));
        assert_eq!(env.player_position(Player::Red), Point::new(5, 1));
        assert_eq!(env.remaining_wall_count(Player::Blue), 10);
        assert_eq!(env.remaining_wall_count(Player::Red), 10);
        assert_eq!(env.turns(), 1);
        assert!(!env.is_end());
        assert_eq!(env.winner(), None);
    }

    #[test]
    fn opening_legal_actions() {
        let env = Environment::new();
        let actions = env.legal_actions();

        // Three pawn steps (up, left, right; down leaves the board) and all
        // 128 wall placements.
        let moves: Vec<_> = actions
            .iter()
            .filter(|a| matches!(a, Action::Move(_)))
            .collect();
        assert_eq!(moves.len(), 3);
        assert!(actions.contains(&Action::Move(Point::new(5, 8))));
        assert!(actions.contains(&Action::Move(Point::new(4, 9))));
        assert!(actions.contains(&Action::Move(Point::new(6, 9))));
        assert_eq!(actions.len(), 3 + 128);

        // Sorted by action id.
        let ids: Vec<_> = actions.iter().map(|a| a.index()).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn play_rejects_illegal_actions_without_mutation() {
        let mut env = Environment::new();
        let before = env.clone();
        let err = env.play(Action::Move(Point::new(1, 1))).unwrap_err();
        assert!(matches!(err, EngineError::IllegalAction(_)));
        assert_eq!(env, before);
    }

    #[test]
    fn play_advances_turn_and_toggles_player() {
        let mut env = Environment::new();
        env.play(Action::Move(Point::new(5, 8))).unwrap();
        assert_eq!(env.turns(), 2);
        assert_eq!(env.current_player(), Player::Red);
        assert_eq!(env.player_position(Player::Blue), Point::new(5, 8));
    }

    #[test]
    fn wall_placement_spends_budget() {
        let mut env = Environment::new();
        env.play(Action::PlaceHorizontalWall(Point::new(3, 4)))
            .unwrap();
        assert_eq!(env.remaining_wall_count(Player::Blue), 9);
        assert_eq!(env.remaining_wall_count(Player::Red), 10);
        assert!(env.wall_board().is_horizontal_wall_placed(3, 4));
        assert!(env.wall_board().is_horizontal_wall_placed(4, 4));
        assert!(env.wall_board().is_intersection(3, 4));
    }

    #[test]
    fn no_wall_actions_once_budget_is_spent() {
        let mut env = Environment::new();
        env.remaining_walls = [0, 0];
        assert!(env
            .legal_actions()
            .iter()
            .all(|a| matches!(a, Action::Move(_))));
    }

    #[test]
    fn straight_jump_over_adjacent_opponent() {
        let mut env = Environment::new();
        env.positions = [Point::new(5, 5), Point::new(5, 4)];
        let actions = env.legal_actions();
        // Straight jump lands behind the opponent...
        assert!(actions.contains(&Action::Move(Point::new(5, 3))));
        // ...and the opponent's cell itself is never a destination.
        assert!(!actions.contains(&Action::Move(Point::new(5, 4))));
    }

    #[test]
    fn blocked_jump_falls_back_to_diagonals() {
        let mut env = Environment::new();
        env.positions = [Point::new(5, 5), Point::new(5, 4)];
        // Wall behind the opponent seals the straight jump.
        env.board.place_horizontal_wall(5, 3);
        let actions = env.legal_actions();
        assert!(!actions.contains(&Action::Move(Point::new(5, 3))));
        assert!(actions.contains(&Action::Move(Point::new(4, 4))));
        assert!(actions.contains(&Action::Move(Point::new(6, 4))));
    }

    #[test]
    fn jump_against_board_edge_goes_diagonal() {
        let mut env = Environment::new();
        // Red on its start row; Blue directly below.
        env.positions = [Point::new(5, 2), Point::new(5, 1)];
        let actions = env.legal_actions();
        assert!(actions.contains(&Action::Move(Point::new(4, 1))));
        assert!(actions.contains(&Action::Move(Point::new(6, 1))));
    }

    #[test]
    fn walls_that_seal_a_player_in_are_not_offered() {
        let mut env = Environment::new();
        // Recreate the sealed pocket around Blue at (4, 6) except for one
        // closing wall, then confirm that closing wall is not legal.
        env.positions = [Point::new(4, 6), Point::new(5, 1)];
        env.board.place_horizontal_wall(1, 5);
        env.board.place_horizontal_wall(3, 5);
        env.board.place_vertical_wall(4, 6);
        let closing = Action::PlaceVerticalWall(Point::new(4, 8));
        assert!(!env.legal_actions().contains(&closing));
        // A harmless wall elsewhere is still available.
        assert!(env
            .legal_actions()
            .contains(&Action::PlaceHorizontalWall(Point::new(7, 2))));
    }

    #[test]
    fn board_renders_pawns_and_walls() {
        let mut env = Environment::new();
        env.play(Action::PlaceVerticalWall(Point::new(6, 5))).unwrap();
        let rendered = env.to_string();
        assert!(rendered.contains('B'));
        assert!(rendered.contains('R'));
        assert!(rendered.contains('|'));
        assert!(rendered.contains("RED to move"));
    }

    #[test]
    fn reaching_the_goal_row_ends_the_game() {
        let mut env = Environment::new();
        env.positions = [Point::new(5, 2), Point::new(4, 9)];
        env.play(Action::Move(Point::new(5, 1))).unwrap();
        assert!(env.is_end());
        assert_eq!(env.winner(), Some(Player::Blue));
    }
}
