// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Hypothetical moves. A `MoveGuard` plays a move on the real board and
//! reverts it when dropped, so every exit path (including early returns)
//! leaves the game exactly as it found it.
use std::ops::Deref;

use crate::game::{Game, Undo};
use crate::moves::Move;
use crate::types::Square;

pub(crate) struct MoveGuard<'a> {
    game: &'a mut Game,
    undo: Option<Undo>,
}

impl<'a> MoveGuard<'a> {
    pub fn apply(game: &'a mut Game, mov: &Move) -> MoveGuard<'a> {
        let undo = game.apply(mov);
        MoveGuard::adopt(game, undo)
    }

    /// Takes responsibility for a move that has already been applied.
    pub fn adopt(game: &'a mut Game, undo: Undo) -> MoveGuard<'a> {
        MoveGuard {
            game,
            undo: Some(undo),
        }
    }

    /// Keeps the move on the board.
    pub fn commit(mut self) {
        self.undo = None;
    }
}

impl<'a> Deref for MoveGuard<'a> {
    type Target = Game;

    fn deref(&self) -> &Game {
        self.game
    }
}

impl<'a> Drop for MoveGuard<'a> {
    fn drop(&mut self) {
        if let Some(undo) = self.undo.take() {
            trace!("reverting simulated move");
            self.game.revert(undo);
        }
    }
}

impl Game {
    /// Would playing `mov` leave the king on `king` attacked? `king` is where
    /// the mover's king stands after the move; callers moving the king itself
    /// pass its destination.
    pub fn would_leave_in_check(&mut self, mov: &Move, king: Square) -> bool {
        let attacker = match mov.source.piece {
            Some(piece) => piece.color.toggle(),
            None => return false,
        };

        let guard = MoveGuard::apply(self, mov);
        guard.is_attacked(king, attacker)
    }

    /// True if `mov` does not expose its own king. The king's square is read
    /// from the cache after the move, so king moves need no special casing.
    pub(crate) fn is_safe(&mut self, mov: &Move) -> bool {
        let color = match mov.source.piece {
            Some(piece) => piece.color,
            None => return false,
        };

        let guard = MoveGuard::apply(self, mov);
        !guard.is_check(color)
    }
}

#[cfg(test)]
mod tests {
    use super::MoveGuard;
    use crate::board::Board;
    use crate::game::Game;
    use crate::moves::{Action, Move};
    use crate::types::{Color, Piece, PieceKind, Square};

    fn setup(placement: &str) -> Game {
        Game::from_board(Board::from_placement(placement).unwrap()).unwrap()
    }

    fn white(kind: PieceKind) -> Piece {
        Piece::new(kind, Color::White)
    }

    #[test]
    fn guard_reverts_on_drop() {
        let mut game = setup("4k3/8/8/3p4/4P3/8/8/4K3");
        let before = game.clone();
        {
            let mov = Move::capture(
                white(PieceKind::Pawn),
                Square::E4,
                Piece::new(PieceKind::Pawn, Color::Black),
                Square::D5,
            );
            let guard = MoveGuard::apply(&mut game, &mov);
            assert!(guard.board().is_empty(Square::E4));
            assert_eq!(1, guard.piece_count(Color::Black));
        }

        assert_eq!(before, game);
    }

    #[test]
    fn committed_guard_keeps_move() {
        let mut game = setup("4k3/8/8/8/8/8/8/4K3");
        let mov = Move::movement(white(PieceKind::King), Square::E1, Square::F2);
        MoveGuard::apply(&mut game, &mov).commit();
        assert_eq!(Square::F2, game.king_square(Color::White));
        assert!(game.board().is_empty(Square::E1));
    }

    #[test]
    fn simulated_castle_is_reverted() {
        let mut game = setup("4k3/8/8/8/8/8/8/R3K3");
        let before = game.clone();
        {
            let mov = Move::castle(Color::White, Action::QueenCastling);
            let guard = MoveGuard::apply(&mut game, &mov);
            assert_eq!(Some(white(PieceKind::Rook)), guard.board().piece_at(Square::D1));
            assert_eq!(Square::C1, guard.king_square(Color::White));
        }

        assert_eq!(before, game);
    }

    #[test]
    fn simulated_en_passant_is_reverted() {
        let mut game = setup("4k3/8/8/8/1p6/8/P7/4K3");
        game.process_move(Move::movement(white(PieceKind::Pawn), Square::A2, Square::A4))
            .unwrap();
        let before = game.clone();
        {
            let pawn = Piece::new(PieceKind::Pawn, Color::Black);
            let mov = Move::en_passant(pawn, Square::B4, Square::A3);
            let guard = MoveGuard::apply(&mut game, &mov);
            assert!(guard.board().is_empty(Square::A4));
            assert_eq!(1, guard.piece_count(Color::White));
        }

        assert_eq!(before, game);
    }

    #[test]
    fn pinned_piece_would_leave_in_check() {
        let mut game = setup("k3r3/8/8/8/8/8/4B3/4K3");
        let before = game.clone();
        let pinned = Move::movement(white(PieceKind::Bishop), Square::E2, Square::D3);
        assert!(game.would_leave_in_check(&pinned, Square::E1));
        assert!(!game.is_safe(&pinned));

        let king = Move::movement(white(PieceKind::King), Square::E1, Square::D1);
        assert!(!game.would_leave_in_check(&king, Square::D1));
        assert!(game.is_safe(&king));
        assert_eq!(before, game);
    }
}
