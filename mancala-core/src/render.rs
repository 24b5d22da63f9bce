//! Text rendering of the board
//!
//! Player two sits across the top reading right to left with their store
//! on the left; player one runs left to right along the bottom into the
//! store on the right:
//!
//! ```text
//!          6   5   4   3   2   1
//!  ┌────┬────────────────────────┬────┐
//!  │  0 │  4   4   4   4   4   4 │    │
//!  │ P2 ├────────────────────────┤ P1 │
//!  │    │  4   4   4   4   4   4 │  0 │
//!  └────┴────────────────────────┴────┘
//!          1   2   3   4   5   6
//! ```
//!
//! Columns widen to fit the largest count on the board.

use std::fmt;

use crate::game::{GameState, Outcome, Player};

const MIN_WIDTH: usize = 3;

/// Multi-line board picture followed by the turn or the final result
pub fn render_board(state: &GameState) -> String {
    state.to_string()
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.board();
        let pits = board.pits_per_player();
        let w = number_width(board.cells().iter().copied().max().unwrap_or(0) as usize)
            .max(number_width(pits))
            .max(MIN_WIDTH);
        let col = "─".repeat(w + 1);
        let rule = "─".repeat(pits * (w + 1));
        let blank = " ".repeat(w + 1);
        let indent = " ".repeat(w + 4);

        let top_labels: String = (1..=pits).rev().map(|n| cell(n, w)).collect();
        writeln!(f, "{}{}", indent, top_labels.trim_end())?;
        writeln!(f, " ┌{}┬{}┬{}┐", col, rule, col)?;

        let top_row: String = board.side(Player::Two).iter().rev().map(|&s| cell(s, w)).collect();
        writeln!(f, " │{:>w$} │{}│{}│", board.store(Player::Two), top_row, blank, w = w)?;
        writeln!(f, " │{:^c$}├{}┤{:^c$}│", "P2", rule, "P1", c = w + 1)?;

        let bottom_row: String = board.side(Player::One).iter().map(|&s| cell(s, w)).collect();
        writeln!(f, " │{}│{}│{:>w$} │", blank, bottom_row, board.store(Player::One), w = w)?;
        writeln!(f, " └{}┴{}┴{}┘", col, rule, col)?;

        let bottom_labels: String = (1..=pits).map(|n| cell(n, w)).collect();
        writeln!(f, "{}{}", indent, bottom_labels.trim_end())?;
        writeln!(f)?;

        match self.winner() {
            None => write!(f, "    {}'s turn", self.current_player()),
            Some(Outcome::Tie) => write!(f, "    Game Over - It's a tie!"),
            Some(Outcome::Win(player)) => write!(f, "    Game Over - {} wins!", player),
        }
    }
}

fn cell(value: impl fmt::Display, width: usize) -> String {
    format!("{:>width$} ", value, width = width)
}

fn number_width(n: usize) -> usize {
    n.to_string().len()
}
