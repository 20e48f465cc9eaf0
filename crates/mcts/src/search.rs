//! The search proper: selection, expansion, evaluation, backup.

use quorzero_core::{Game, Policy, Result};
use rand::Rng;
use rand_distr::{Dirichlet, Distribution};

use crate::{
    config::MctsConfig,
    evaluator::{Evaluation, Evaluator},
    node::{Node, NodeId},
    tree::Tree,
};

/// Monte Carlo Tree Search agent with a persistent root.
///
/// The agent owns its view of the game: a root state kept in lockstep with
/// the authoritative environment via [`Mcts::advance`], and the tree of
/// states reachable from it. One instance serves one side for one game.
pub struct Mcts<G: Game, E: Evaluator<G>, R: Rng> {
    game: G,
    config: MctsConfig,
    evaluator: E,
    rng: R,
    tree: Tree<G::Action>,
    root_state: G::State,
}

impl<G, E, R> Mcts<G, E, R>
where
    G: Game,
    E: Evaluator<G>,
    R: Rng,
{
    pub fn new(game: G, root_state: G::State, config: MctsConfig, evaluator: E, rng: R) -> Self {
        Self {
            game,
            config,
            evaluator,
            rng,
            tree: Tree::new(),
            root_state,
        }
    }

    pub fn root_state(&self) -> &G::State {
        &self.root_state
    }

    /// The current root node (introspection for the driver and tests).
    pub fn root(&self) -> &Node<G::Action> {
        self.tree.root()
    }

    /// Visit count per root child, in ascending action-id order.
    pub fn root_visit_counts(&self) -> Vec<(G::Action, u32)> {
        self.tree
            .root()
            .children
            .iter()
            .map(|&(action, child)| (action, self.tree.get(child).stats.visit_count))
            .collect()
    }

    /// Runs exactly the configured number of simulation cycles from the
    /// current root. No-op on a terminal root.
    pub fn run_search(&mut self) -> Result<()> {
        if self.game.is_terminal(&self.root_state) {
            return Ok(());
        }

        if !self.tree.root().expanded {
            let root_state = self.root_state.clone();
            let evaluation = self.evaluator.evaluate(&self.game, &root_state)?;
            self.expand_node(NodeId::ROOT, &root_state, &evaluation);
        }
        if self.config.exploration_fraction > 0.0 {
            self.add_root_noise();
        }

        for _ in 0..self.config.num_simulations {
            self.simulate()?;
        }
        Ok(())
    }

    /// The root action whose subtree absorbed the most visits; ties go to
    /// the lowest action id. Visit count, not value, is the robust
    /// selection criterion.
    ///
    /// # Panics
    /// If called before the root was expanded by [`Mcts::run_search`].
    pub fn best_action(&self) -> G::Action {
        let mut best: Option<(G::Action, u32)> = None;
        for (action, visits) in self.root_visit_counts() {
            if best.map_or(true, |(_, most)| visits > most) {
                best = Some((action, visits));
            }
        }
        best.expect("BUG: best_action called on an unexpanded root").0
    }

    /// Visit-count distribution over the whole action space, the training
    /// policy label for the current position. Normalized by total visits
    /// plus a tiny floor, so it is all zeros (not NaN) if nothing was
    /// visited.
    pub fn root_policy(&self) -> Policy {
        let mut counts = vec![0u32; self.game.num_actions()];
        for (action, visits) in self.root_visit_counts() {
            counts[self.game.action_to_index(action)] = visits;
        }
        Policy::from_visit_counts(&counts)
    }

    /// Commits `action`: the matching child subtree becomes the new root
    /// (all siblings are released) and the root state advances. An action
    /// the search never explored gets a fresh, unexpanded root.
    pub fn advance(&mut self, action: G::Action) {
        self.root_state = self.game.apply(&self.root_state, action);
        let matched = self
            .tree
            .root()
            .children
            .iter()
            .find(|&&(a, _)| a == action)
            .map(|&(_, id)| id);
        match matched {
            Some(child) => self.tree.promote(child),
            None => self.tree.reset(),
        }
    }

    /// One selection -> expansion -> evaluation -> backup cycle.
    fn simulate(&mut self) -> Result<()> {
        let mut path = vec![NodeId::ROOT];
        let mut state = self.root_state.clone();
        let mut current = NodeId::ROOT;

        // SELECT: descend until an unexpanded or terminal node.
        loop {
            let node = self.tree.get(current);

            if node.terminal {
                // Terminal value is already from this node's side to move.
                let value = node.terminal_value.unwrap_or(0.0);
                self.backpropagate(&path, value);
                return Ok(());
            }
            if !node.expanded {
                break;
            }

            let action = self.select_child(current);
            state = self.game.apply(&state, action);
            let child = self
                .tree
                .get(current)
                .children
                .iter()
                .find(|&&(a, _)| a == action)
                .map(|&(_, id)| id)
                .expect("BUG: selected action has no child node");
            path.push(child);
            current = child;
        }

        // EXPAND/EVALUATE: freshly reached leaf.
        if self.game.is_terminal(&state) {
            // outcome() speaks for the player who just moved; the node's
            // perspective is the player to move, so negate.
            let value = -self.game.outcome(&state).unwrap_or(0.0);
            let node = self.tree.get_mut(current);
            node.terminal = true;
            node.terminal_value = Some(value);
            self.backpropagate(&path, value);
            return Ok(());
        }

        let evaluation = self.evaluator.evaluate(&self.game, &state)?;
        self.expand_node(current, &state, &evaluation);
        self.backpropagate(&path, evaluation.value);
        Ok(())
    }

    /// Creates one child per legal action, with priors from the evaluator.
    /// Children inherit `legal_actions`' ascending-id order, which the
    /// tie-breaks rely on.
    fn expand_node(&mut self, node_id: NodeId, state: &G::State, evaluation: &Evaluation) {
        for action in self.game.legal_actions(state) {
            let prior = evaluation.policy[self.game.action_to_index(action)];
            let child = self.tree.add(Node::new(prior));
            self.tree.get_mut(node_id).children.push((action, child));
        }
        self.tree.get_mut(node_id).expanded = true;
    }

    /// PUCT: pick the child maximizing
    /// `Q + c(N) * P * sqrt(N_parent) / (1 + N_child)`; the first (lowest
    /// action id) child wins ties.
    fn select_child(&self, node_id: NodeId) -> G::Action {
        let node = self.tree.get(node_id);
        let parent_visits = node.stats.visit_count.max(1) as f32;
        let pb_c = ((parent_visits + self.config.pb_c_base + 1.0) / self.config.pb_c_base).ln()
            + self.config.pb_c_init;

        let mut best_action = None;
        let mut best_score = f32::NEG_INFINITY;
        for &(action, child_id) in &node.children {
            let child = self.tree.get(child_id);
            // Child values are stored from the child's (opponent's)
            // perspective.
            let q = -child.stats.mean_value();
            let u = pb_c * child.stats.prior * parent_visits.sqrt()
                / (1.0 + child.stats.visit_count as f32);
            let score = q + u;
            if score > best_score {
                best_score = score;
                best_action = Some(action);
            }
        }
        best_action.expect("BUG: select_child called on a childless node")
    }

    /// Adds visits and values along the path, flipping the sign each ply to
    /// match the alternating perspective.
    fn backpropagate(&mut self, path: &[NodeId], leaf_value: f32) {
        let mut value = leaf_value;
        for &node_id in path.iter().rev() {
            let node = self.tree.get_mut(node_id);
            node.stats.visit_count += 1;
            node.stats.value_sum += value;
            value = -value;
        }
    }

    /// Mixes Dirichlet noise into the root priors so self-play keeps
    /// exploring moves the raw priors would starve.
    fn add_root_noise(&mut self) {
        let num_children = self.tree.root().children.len();
        if num_children < 2 {
            return;
        }

        let alpha = vec![self.config.dirichlet_alpha; num_children];
        let dirichlet = Dirichlet::new(&alpha).expect("BUG: invalid Dirichlet parameters");
        let noise: Vec<f32> = dirichlet.sample(&mut self.rng);

        let eps = self.config.exploration_fraction;
        let children: Vec<NodeId> = self
            .tree
            .root()
            .children
            .iter()
            .map(|&(_, id)| id)
            .collect();
        for (i, child_id) in children.into_iter().enumerate() {
            let child = self.tree.get_mut(child_id);
            child.stats.prior = (1.0 - eps) * child.stats.prior + eps * noise[i];
        }
    }
}
