//! Depth-limited adversarial search
//!
//! Minimax and alpha-beta over any two-player zero-sum game that
//! implements [`Game`]. Both searches are stateless between calls: every
//! branch works on its own copy of the state returned by [`Game::result`],
//! and only the current path is alive at any time.
//!
//! Node roles follow whose turn it is rather than strict ply parity, so a
//! game that grants extra turns keeps the same player maximizing across
//! consecutive plies.

use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

// ============================================================================
// GAME CONTRACT
// ============================================================================

/// Rules of a two-player zero-sum game
pub trait Game {
    type State: Clone;
    type Move: Copy + PartialEq + fmt::Debug;
    type Player: Copy + PartialEq;

    /// Player whose move it is
    fn to_move(state: &Self::State) -> Self::Player;

    /// Legal moves in a fixed order (ties break toward the front)
    fn legal_moves(state: &Self::State) -> Vec<Self::Move>;

    /// New state after `mv`; never touches `state`
    ///
    /// `mv` must come from [`Game::legal_moves`] for the same state.
    fn result(state: &Self::State, mv: Self::Move) -> Self::State;

    fn is_terminal(state: &Self::State) -> bool;

    /// Value of `state` from `player`'s point of view
    fn utility(state: &Self::State, player: Self::Player) -> f32;
}

// ============================================================================
// POLICIES
// ============================================================================

/// Scores a leaf from the perspective of the searching player
pub trait Evaluator<G: Game> {
    fn evaluate(&self, state: &G::State, perspective: G::Player) -> f32;
}

/// Decides when expansion stops; `depth` is the ply count from the root
pub trait CutoffTest<G: Game> {
    fn cutoff(&self, state: &G::State, depth: u32) -> bool;
}

/// Evaluate with the game's own utility
#[derive(Clone, Copy, Debug, Default)]
pub struct UtilityEvaluator;

impl<G: Game> Evaluator<G> for UtilityEvaluator {
    fn evaluate(&self, state: &G::State, perspective: G::Player) -> f32 {
        G::utility(state, perspective)
    }
}

impl<G, F> Evaluator<G> for F
where
    G: Game,
    F: Fn(&G::State, G::Player) -> f32,
{
    fn evaluate(&self, state: &G::State, perspective: G::Player) -> f32 {
        self(state, perspective)
    }
}

/// Stop at a fixed ply depth or at the end of the game
#[derive(Clone, Copy, Debug)]
pub struct DepthCutoff {
    pub limit: u32,
}

impl DepthCutoff {
    pub fn new(limit: u32) -> Self {
        Self { limit }
    }
}

impl<G: Game> CutoffTest<G> for DepthCutoff {
    fn cutoff(&self, state: &G::State, depth: u32) -> bool {
        depth >= self.limit || G::is_terminal(state)
    }
}

impl<G, F> CutoffTest<G> for F
where
    G: Game,
    F: Fn(&G::State, u32) -> bool,
{
    fn cutoff(&self, state: &G::State, depth: u32) -> bool {
        self(state, depth)
    }
}

// ============================================================================
// RESULTS
// ============================================================================

/// Search strategy
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchAlgorithm {
    Minimax,
    AlphaBeta,
}

impl fmt::Display for SearchAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchAlgorithm::Minimax => f.write_str("Basic Minimax"),
            SearchAlgorithm::AlphaBeta => f.write_str("Alpha-Beta Pruning"),
        }
    }
}

/// Outcome of one search call
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchResult<M> {
    /// None when the root has no legal moves
    pub best_move: Option<M>,
    /// Backed-up value of `best_move` for the root player
    pub value: f32,
    /// Nodes visited below the root
    pub nodes: u64,
}

// ============================================================================
// SEARCH
// ============================================================================

struct Searcher<'a, G: Game, C, E> {
    root_player: G::Player,
    cutoff: &'a C,
    eval: &'a E,
    nodes: u64,
    _game: PhantomData<G>,
}

impl<'a, G, C, E> Searcher<'a, G, C, E>
where
    G: Game,
    C: CutoffTest<G>,
    E: Evaluator<G>,
{
    fn new(state: &G::State, cutoff: &'a C, eval: &'a E) -> Self {
        Self {
            root_player: G::to_move(state),
            cutoff,
            eval,
            nodes: 0,
            _game: PhantomData,
        }
    }

    fn leaf(&self, state: &G::State) -> f32 {
        self.eval.evaluate(state, self.root_player)
    }

    fn minimax_value(&mut self, state: &G::State, depth: u32) -> f32 {
        self.nodes += 1;
        if self.cutoff.cutoff(state, depth) {
            return self.leaf(state);
        }
        let moves = G::legal_moves(state);
        if moves.is_empty() {
            return self.leaf(state);
        }

        let maximizing = G::to_move(state) == self.root_player;
        let mut v = if maximizing {
            f32::NEG_INFINITY
        } else {
            f32::INFINITY
        };
        for mv in moves {
            let child = G::result(state, mv);
            let score = self.minimax_value(&child, depth + 1);
            v = if maximizing { v.max(score) } else { v.min(score) };
        }
        v
    }

    fn alpha_beta_value(&mut self, state: &G::State, mut alpha: f32, mut beta: f32, depth: u32) -> f32 {
        self.nodes += 1;
        if self.cutoff.cutoff(state, depth) {
            return self.leaf(state);
        }
        let moves = G::legal_moves(state);
        if moves.is_empty() {
            return self.leaf(state);
        }

        if G::to_move(state) == self.root_player {
            let mut v = f32::NEG_INFINITY;
            for mv in moves {
                let child = G::result(state, mv);
                v = v.max(self.alpha_beta_value(&child, alpha, beta, depth + 1));
                if v >= beta {
                    return v;
                }
                alpha = alpha.max(v);
            }
            v
        } else {
            let mut v = f32::INFINITY;
            for mv in moves {
                let child = G::result(state, mv);
                v = v.min(self.alpha_beta_value(&child, alpha, beta, depth + 1));
                if v <= alpha {
                    return v;
                }
                beta = beta.min(v);
            }
            v
        }
    }

    /// Root loop shared by both strategies: first strictly better move wins
    fn run(mut self, state: &G::State, algorithm: SearchAlgorithm) -> SearchResult<G::Move> {
        let moves = G::legal_moves(state);
        if moves.is_empty() {
            return SearchResult {
                best_move: None,
                value: self.leaf(state),
                nodes: 0,
            };
        }

        let mut best_move = None;
        let mut best_value = f32::NEG_INFINITY;

        for mv in moves {
            let child = G::result(state, mv);
            let value = match algorithm {
                SearchAlgorithm::Minimax => self.minimax_value(&child, 1),
                SearchAlgorithm::AlphaBeta => {
                    self.alpha_beta_value(&child, best_value, f32::INFINITY, 1)
                }
            };
            if value > best_value || best_move.is_none() {
                best_value = value;
                best_move = Some(mv);
            }
        }

        SearchResult {
            best_move,
            value: best_value,
            nodes: self.nodes,
        }
    }
}

/// Run `algorithm` from `state` with explicit cutoff and evaluation policies
pub fn search<G, C, E>(
    state: &G::State,
    algorithm: SearchAlgorithm,
    cutoff: &C,
    eval: &E,
) -> SearchResult<G::Move>
where
    G: Game,
    C: CutoffTest<G>,
    E: Evaluator<G>,
{
    Searcher::<G, C, E>::new(state, cutoff, eval).run(state, algorithm)
}

/// Full-width minimax to `depth` plies using the game's utility
pub fn minimax_search<G: Game>(state: &G::State, depth: u32) -> SearchResult<G::Move> {
    search::<G, _, _>(
        state,
        SearchAlgorithm::Minimax,
        &DepthCutoff::new(depth),
        &UtilityEvaluator,
    )
}

/// Alpha-beta to `depth` plies using the game's utility
pub fn alpha_beta_search<G: Game>(state: &G::State, depth: u32) -> SearchResult<G::Move> {
    search::<G, _, _>(
        state,
        SearchAlgorithm::AlphaBeta,
        &DepthCutoff::new(depth),
        &UtilityEvaluator,
    )
}

// ============================================================================
// TESTS
// ============================================================================
