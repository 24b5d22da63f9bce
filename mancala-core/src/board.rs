//! Board layout and stone sowing
//!
//! The board is a flat vector of `2 * (P + 1)` cells:
//!
//! ```text
//! [0 .. P-1]      player one's pits
//! [P]             player one's store
//! [P+1 .. 2P]     player two's pits
//! [2P+1]          player two's store
//! ```
//!
//! Pits are numbered 1..=P from each player's own point of view, so pit 1
//! of player two lives at index `P + 1`.

use std::ops::Range;

use crate::error::GameError;
use crate::game::Player;

/// Stone counts for every pit and store
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    cells: Vec<u32>,
    pits_per_player: usize,
}

impl Board {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Fresh board: every pit holds `stones_per_pit`, both stores empty
    pub fn new(pits_per_player: usize, stones_per_pit: u32) -> Self {
        let mut cells = vec![stones_per_pit; 2 * (pits_per_player + 1)];
        cells[pits_per_player] = 0;
        cells[2 * pits_per_player + 1] = 0;
        Self {
            cells,
            pits_per_player,
        }
    }

    /// Board from explicit cell counts (for setting up positions)
    pub fn from_cells(pits_per_player: usize, cells: Vec<u32>) -> Result<Self, GameError> {
        if pits_per_player < 1 {
            return Err(GameError::config("pits_per_player must be at least 1"));
        }
        let expected = 2 * (pits_per_player + 1);
        if cells.len() != expected {
            return Err(GameError::config(format!(
                "board with {} pits per player needs {} cells, got {}",
                pits_per_player,
                expected,
                cells.len()
            )));
        }
        Ok(Self {
            cells,
            pits_per_player,
        })
    }

    // ========================================================================
    // LAYOUT
    // ========================================================================

    pub fn pits_per_player(&self) -> usize {
        self.pits_per_player
    }

    /// Number of cells including both stores
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Raw cell counts in board order
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// Board indices of a player's pits (stores excluded)
    pub fn pit_range(&self, player: Player) -> Range<usize> {
        let p = self.pits_per_player;
        match player {
            Player::One => 0..p,
            Player::Two => p + 1..2 * p + 1,
        }
    }

    /// Board index of a player's store
    pub fn store_index(&self, player: Player) -> usize {
        match player {
            Player::One => self.pits_per_player,
            Player::Two => 2 * self.pits_per_player + 1,
        }
    }

    /// Board index of a 1-indexed pit, or None when out of range
    pub fn pit_index(&self, player: Player, pit: usize) -> Option<usize> {
        if pit < 1 || pit > self.pits_per_player {
            return None;
        }
        Some(self.pit_range(player).start + pit - 1)
    }

    /// Index of the pit facing `index` across the board
    ///
    /// Only meaningful for pit indices, never for stores.
    pub fn opposite(&self, index: usize) -> usize {
        2 * self.pits_per_player - index
    }

    /// Which player owns the pit at `index` (None for stores)
    pub fn owner_of_pit(&self, index: usize) -> Option<Player> {
        if self.pit_range(Player::One).contains(&index) {
            Some(Player::One)
        } else if self.pit_range(Player::Two).contains(&index) {
            Some(Player::Two)
        } else {
            None
        }
    }

    // ========================================================================
    // COUNTS
    // ========================================================================

    pub fn get(&self, index: usize) -> u32 {
        self.cells[index]
    }

    /// Stones in a player's store
    pub fn store(&self, player: Player) -> u32 {
        self.cells[self.store_index(player)]
    }

    /// Stones on a player's side, stores excluded
    pub fn side_total(&self, player: Player) -> u32 {
        self.cells[self.pit_range(player)].iter().sum()
    }

    /// A player's pits in board order
    pub fn side(&self, player: Player) -> &[u32] {
        &self.cells[self.pit_range(player)]
    }

    /// Every stone on the board
    pub fn total_stones(&self) -> u64 {
        self.cells.iter().map(|&c| c as u64).sum()
    }

    /// True when either side has no stones left in its pits
    pub fn either_side_empty(&self) -> bool {
        self.side_total(Player::One) == 0 || self.side_total(Player::Two) == 0
    }

    // ========================================================================
    // MUTATION
    // ========================================================================

    /// Lift every stone out of `from` and drop them one per cell
    /// counter-clockwise, skipping the opponent's store.
    ///
    /// Returns the index where the last stone landed. Sowing an empty pit
    /// lands on the pit itself.
    pub fn sow(&mut self, from: usize, mover: Player) -> usize {
        let skip = self.store_index(mover.opponent());
        let len = self.cells.len();

        let mut stones = std::mem::take(&mut self.cells[from]);
        let mut index = from;
        while stones > 0 {
            index = (index + 1) % len;
            if index == skip {
                continue;
            }
            self.cells[index] += 1;
            stones -= 1;
        }
        index
    }

    /// Empty the cell at `index` into `player`'s store
    pub(crate) fn bank(&mut self, index: usize, player: Player) -> u32 {
        let stones = std::mem::take(&mut self.cells[index]);
        let store = self.store_index(player);
        self.cells[store] += stones;
        stones
    }

    /// Sweep both sides into their owners' stores
    pub fn sweep(&mut self) {
        for player in [Player::One, Player::Two] {
            for index in self.pit_range(player) {
                self.bank(index, player);
            }
        }
    }
}
