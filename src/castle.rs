// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Castling. There are no castling-rights flags; each request rescans the
//! move history to see whether the king or the relevant rook has ever left
//! home.
use crate::game::{Game, MoveError, Undo};
use crate::moves::{Action, CastleRoute, Move};
use crate::types::{Color, Piece, PieceKind};

impl Game {
    pub(crate) fn process_castling(&mut self, mov: &Move) -> Result<Undo, MoveError> {
        let side = match mov.source.piece {
            Some(piece) => piece.color,
            None => return Err(MoveError::KingNotInPosition),
        };

        self.check_castle(side, mov.action)?;
        Ok(self.apply(mov))
    }

    /// Checks, in order: the king has never moved, the rook has never moved
    /// or been taken, the squares between them are empty, the king does not
    /// pass over an attacked square, and the king neither starts nor ends in
    /// check.
    pub(crate) fn check_castle(&self, side: Color, action: Action) -> Result<(), MoveError> {
        let route = CastleRoute::new(side, action);
        let king = Piece::new(PieceKind::King, side);
        let rook = Piece::new(PieceKind::Rook, side);

        let king_moved = self.moves.iter().any(|mov| mov.source.piece == Some(king));
        if king_moved || self.board.piece_at(route.king_from) != Some(king) {
            return Err(MoveError::KingNotInPosition);
        }

        let rook_moved = self
            .moves
            .iter()
            .any(|mov| mov.from() == route.rook_from || mov.to() == route.rook_from);
        if rook_moved || self.board.piece_at(route.rook_from) != Some(rook) {
            return Err(MoveError::RookNotInPosition);
        }

        if !self.path_is_clear(route.king_from, route.rook_from) {
            return Err(MoveError::PiecesBetween);
        }

        let opponent = side.toggle();
        if self.is_attacked(route.crossover, opponent) {
            return Err(MoveError::CrossoverAttacked);
        }

        if self.is_attacked(route.king_from, opponent) || self.is_attacked(route.king_to, opponent) {
            return Err(MoveError::KingInCheck);
        }

        Ok(())
    }
}
