//! Mancala as a searchable game, and its evaluation

use crate::game::{GameState, Player};
use crate::search::{Evaluator, Game};

/// Stateless rules object plugging [`GameState`] into the search engine
#[derive(Clone, Copy, Debug, Default)]
pub struct Mancala;

impl Game for Mancala {
    type State = GameState;
    type Move = usize;
    type Player = Player;

    fn to_move(state: &GameState) -> Player {
        state.current_player()
    }

    fn legal_moves(state: &GameState) -> Vec<usize> {
        if state.is_terminal() {
            return vec![];
        }
        state.legal_moves()
    }

    fn result(state: &GameState, pit: usize) -> GameState {
        debug_assert!(
            state.is_legal(pit) && !state.is_terminal(),
            "pit {} is not a legal move",
            pit
        );
        state.apply_move(pit).unwrap_or_else(|_| state.clone())
    }

    fn is_terminal(state: &GameState) -> bool {
        state.is_terminal()
    }

    fn utility(state: &GameState, player: Player) -> f32 {
        store_difference(state, player)
    }
}

/// Store count difference, positive when `player` is ahead
pub fn store_difference(state: &GameState, player: Player) -> f32 {
    let diff = state.score(Player::One) as f32 - state.score(Player::Two) as f32;
    match player {
        Player::One => diff,
        Player::Two => -diff,
    }
}

/// The fixed linear heuristic: own store minus opponent's store
#[derive(Clone, Copy, Debug, Default)]
pub struct StoreDifference;

impl Evaluator<Mancala> for StoreDifference {
    fn evaluate(&self, state: &GameState, perspective: Player) -> f32 {
        store_difference(state, perspective)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::config::GameConfig;

    #[test]
    fn test_initial_utility_is_zero() {
        let game = GameState::new(&GameConfig::default());
        assert_eq!(Mancala::utility(&game, Player::One), 0.0);
        assert_eq!(Mancala::utility(&game, Player::Two), 0.0);
    }

    #[test]
    fn test_utility_sign_flips() {
        let board = Board::from_cells(3, vec![1, 1, 1, 7, 1, 1, 1, 2]).unwrap();
        let game = GameState::from_board(board, Player::Two);
        assert_eq!(Mancala::utility(&game, Player::One), 5.0);
        assert_eq!(Mancala::utility(&game, Player::Two), -5.0);
        assert_eq!(StoreDifference.evaluate(&game, Player::Two), -5.0);
    }

    #[test]
    fn test_result_does_not_mutate() {
        let game = GameState::new(&GameConfig::default());
        let next = Mancala::result(&game, 1);
        assert_eq!(game.board().get(0), 4);
        assert_eq!(next.board().get(0), 0);
        assert_eq!(Mancala::to_move(&next), Player::Two);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "not a legal move")]
    fn test_result_rejects_illegal_move() {
        let game = GameState::new(&GameConfig::default());
        let _ = Mancala::result(&game, 9);
    }

    #[test]
    fn test_terminal_has_no_moves() {
        // Player two still holds stones, but the game is over
        let board = Board::from_cells(3, vec![0, 0, 0, 5, 1, 1, 1, 0]).unwrap();
        let game = GameState::from_board(board, Player::Two);
        assert!(Mancala::is_terminal(&game));
        assert!(Mancala::legal_moves(&game).is_empty());
    }
}
