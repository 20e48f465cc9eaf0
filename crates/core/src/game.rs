use std::hash::Hash;

/// A two-player zero-sum game, as seen by the tree search.
///
/// The search never inspects game state directly; it only enumerates legal
/// actions, applies them to cloned states, and maps actions to dense indices
/// in the fixed action space. Action indices double as the total order used
/// for deterministic tie-breaking, so `action_to_index` must be stable across
/// runs and processes.
pub trait Game: Clone {
    /// Full game state (board, pawns, turn counter, ...).
    type State: Clone;

    /// A single move, cheap to copy.
    type Action: Clone + Copy + Eq + Hash;

    /// Starting state of a fresh game.
    fn initial_state(&self) -> Self::State;

    /// Legal actions from `state`, sorted ascending by action index.
    fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// Applies a legal action to a copy of `state`.
    ///
    /// Legality is the caller's contract; implementations may check it only
    /// in debug builds.
    fn apply(&self, state: &Self::State, action: Self::Action) -> Self::State;

    /// True once the game has been decided.
    fn is_terminal(&self, state: &Self::State) -> bool;

    /// Outcome from the perspective of the player who just moved:
    /// `Some(1.0)` if that player won, `Some(-1.0)` if they lost,
    /// `None` while the game is still running.
    fn outcome(&self, state: &Self::State) -> Option<f32>;

    /// Encodes `state` as the flat float tensor consumed by the evaluator
    /// and written to the training dump.
    fn observe(&self, state: &Self::State) -> Vec<f32>;

    /// Dense index of `action` in `0..num_actions()`.
    fn action_to_index(&self, action: Self::Action) -> usize;

    /// Inverse of `action_to_index`; `None` for indices that encode no
    /// action.
    fn index_to_action(&self, index: usize) -> Option<Self::Action>;

    /// Size of the action space (and of every policy vector).
    fn num_actions(&self) -> usize;
}
