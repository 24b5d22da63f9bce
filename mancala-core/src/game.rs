//! Game state and the sowing rules

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::config::GameConfig;
use crate::error::GameError;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Side of the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One = 1,
    Two = 2,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// 1 or 2
    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            _ => None,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// Final result of a finished game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win(Player),
    Tie,
}

/// What happened during one applied move
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveReport {
    pub player: Player,
    pub pit: usize,
    /// Board index of the last sown stone
    pub landing: usize,
    /// Stones banked by a capture (opposite pit plus the capturing stone)
    pub captured: u32,
    /// Mover keeps the turn
    pub extra_turn: bool,
    /// The move ended the game and the sides were swept
    pub finished: bool,
}

// ============================================================================
// GAME STATE
// ============================================================================

/// Full game state. Cloning yields an independent copy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    current_player: Player,
    history: Vec<(Player, usize)>,
}

/// Start a game from raw (possibly invalid) dimensions
pub fn new_game(pits_per_player: i64, stones_per_pit: i64) -> Result<GameState, GameError> {
    let config = GameConfig::new(pits_per_player, stones_per_pit)?;
    Ok(GameState::new(&config))
}

impl GameState {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Initial position, player one to move
    pub fn new(config: &GameConfig) -> Self {
        Self {
            board: Board::new(config.pits_per_player(), config.stones_per_pit()),
            current_player: Player::One,
            history: Vec::new(),
        }
    }

    /// Arbitrary position with an empty history
    pub fn from_board(board: Board, current_player: Player) -> Self {
        Self {
            board,
            current_player,
            history: Vec::new(),
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn pits_per_player(&self) -> usize {
        self.board.pits_per_player()
    }

    /// Stones in a player's store
    pub fn score(&self, player: Player) -> u32 {
        self.board.store(player)
    }

    /// Every move applied so far, as (mover, pit)
    pub fn history(&self) -> &[(Player, usize)] {
        &self.history
    }

    // ========================================================================
    // LEGALITY
    // ========================================================================

    /// Whether the side to move may sow from this 1-indexed pit
    pub fn is_legal(&self, pit: usize) -> bool {
        self.board
            .pit_index(self.current_player, pit)
            .is_some_and(|index| self.board.get(index) > 0)
    }

    /// Legal pits in ascending order
    pub fn legal_moves(&self) -> Vec<usize> {
        (1..=self.pits_per_player())
            .filter(|&pit| self.is_legal(pit))
            .collect()
    }

    /// Uniformly chosen legal move, None once the game is over
    pub fn random_move<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        if self.is_terminal() {
            return None;
        }
        self.legal_moves().choose(rng).copied()
    }

    // ========================================================================
    // TERMINAL STATE
    // ========================================================================

    /// Either side's pits are empty
    pub fn is_terminal(&self) -> bool {
        self.board.either_side_empty()
    }

    /// Higher store wins; None while the game is running
    pub fn winner(&self) -> Option<Outcome> {
        if !self.is_terminal() {
            return None;
        }
        let one = self.score(Player::One);
        let two = self.score(Player::Two);
        Some(match one.cmp(&two) {
            std::cmp::Ordering::Greater => Outcome::Win(Player::One),
            std::cmp::Ordering::Less => Outcome::Win(Player::Two),
            std::cmp::Ordering::Equal => Outcome::Tie,
        })
    }

    // ========================================================================
    // APPLY MOVE
    // ========================================================================

    /// Apply move, return new state
    pub fn apply_move(&self, pit: usize) -> Result<Self, GameError> {
        let mut new_state = self.clone();
        new_state.apply(pit)?;
        Ok(new_state)
    }

    /// Sow from `pit` for the side to move, in place
    pub fn apply(&mut self, pit: usize) -> Result<MoveReport, GameError> {
        if self.is_terminal() {
            return Err(GameError::GameOver);
        }
        if !self.is_legal(pit) {
            return Err(GameError::InvalidMove { pit });
        }

        let mover = self.current_player;
        let from = self
            .board
            .pit_index(mover, pit)
            .ok_or(GameError::InvalidMove { pit })?;
        self.history.push((mover, pit));

        let landing = self.board.sow(from, mover);
        let captured = self.capture(landing, mover);

        // Either side running dry ends the game, whoever emptied it
        let finished = self.is_terminal();
        if finished {
            self.board.sweep();
        }

        let extra_turn = !finished && landing == self.board.store_index(mover);
        if !finished && !extra_turn {
            self.current_player = mover.opponent();
        }

        Ok(MoveReport {
            player: mover,
            pit,
            landing,
            captured,
            extra_turn,
            finished,
        })
    }

    /// Last stone in a previously empty pit on the mover's side takes the
    /// opposite pit with it
    fn capture(&mut self, landing: usize, mover: Player) -> u32 {
        if self.board.owner_of_pit(landing) != Some(mover) || self.board.get(landing) != 1 {
            return 0;
        }
        let opposite = self.board.opposite(landing);
        if self.board.get(opposite) == 0 {
            return 0;
        }
        self.board.bank(opposite, mover) + self.board.bank(landing, mover)
    }
}

// ============================================================================
// TESTS
// ============================================================================
