// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Per-action move processors. Each one validates the preconditions of its
//! action in a fixed order, reporting the first failure, and only touches
//! the board once every check has passed.
use crate::game::{Game, MoveError, Undo};
use crate::moves::Move;
use crate::types::{Piece, PieceKind, Square};

/// Whether `piece` may travel from `from` to `to` on an empty board, ignoring
/// captures. Pawns only move straight ahead here.
pub(crate) fn movement_geometry(piece: Piece, from: Square, to: Square) -> bool {
    let (dfile, drank) = from.delta(to);
    let (adx, ady) = (dfile.abs(), drank.abs());
    match piece.kind {
        PieceKind::Pawn => {
            let advance = piece.color.advance();
            dfile == 0
                && (drank == advance
                    || (drank == 2 * advance && from.rank() == piece.color.pawn_rank()))
        }
        PieceKind::Knight => (adx == 1 && ady == 2) || (adx == 2 && ady == 1),
        PieceKind::Bishop => adx == ady && adx > 0,
        PieceKind::Rook => (adx == 0) != (ady == 0),
        PieceKind::Queen => (adx == ady && adx > 0) || ((adx == 0) != (ady == 0)),
        PieceKind::King => adx.max(ady) == 1,
    }
}

/// Pawns capture one square diagonally forward.
fn pawn_attack_geometry(pawn: Piece, from: Square, to: Square) -> bool {
    let (dfile, drank) = from.delta(to);
    dfile.abs() == 1 && drank == pawn.color.advance()
}

fn reaches_last_rank(piece: Piece, to: Square) -> bool {
    piece.kind == PieceKind::Pawn && to.rank() == piece.color.promotion_rank()
}

fn mover(mov: &Move) -> Result<Piece, MoveError> {
    mov.source.piece.ok_or(MoveError::SourceMismatch)
}

impl Game {
    /// True if every square strictly between `from` and `to` is empty.
    /// Unaligned squares have nothing between them.
    pub(crate) fn path_is_clear(&self, from: Square, to: Square) -> bool {
        match from.between(to) {
            Some(squares) => squares.iter().all(|&sq| self.board.is_empty(sq)),
            None => true,
        }
    }

    /// Movement may end on an enemy piece, which is taken. Pawns are the
    /// exception: they only take through `check_capture`.
    fn check_movement(&self, piece: Piece, from: Square, to: Square) -> Result<(), MoveError> {
        if let Some(occupant) = self.board.piece_at(to) {
            if occupant.color == piece.color {
                return Err(MoveError::CellOccupied);
            }

            if occupant.kind == PieceKind::King {
                return Err(MoveError::InvalidAttack);
            }

            if piece.kind == PieceKind::Pawn {
                return Err(MoveError::MoveBlocked);
            }
        }

        if piece.kind.needs_clear_path() && !self.path_is_clear(from, to) {
            return Err(MoveError::MoveBlocked);
        }

        if !movement_geometry(piece, from, to) {
            return Err(MoveError::InvalidMove);
        }

        Ok(())
    }

    fn check_capture(&self, piece: Piece, from: Square, to: Square) -> Result<(), MoveError> {
        let victim = match self.board.piece_at(to) {
            Some(victim) => victim,
            None => return Err(MoveError::CellEmpty),
        };

        if victim.color == piece.color {
            return Err(MoveError::CellOccupied);
        }

        if victim.kind == PieceKind::King {
            return Err(MoveError::InvalidAttack);
        }

        if piece.kind != PieceKind::Pawn {
            return self.check_movement(piece, from, to);
        }

        if !pawn_attack_geometry(piece, from, to) {
            return Err(MoveError::InvalidAttack);
        }

        Ok(())
    }

    pub(crate) fn process_movement(&mut self, mov: &Move) -> Result<Undo, MoveError> {
        let piece = mover(mov)?;
        self.check_movement(piece, mov.from(), mov.to())?;
        if reaches_last_rank(piece, mov.to()) {
            return Err(MoveError::InvalidMove);
        }

        Ok(self.apply(mov))
    }

    pub(crate) fn process_capture(&mut self, mov: &Move) -> Result<Undo, MoveError> {
        let piece = mover(mov)?;
        self.check_capture(piece, mov.from(), mov.to())?;
        if reaches_last_rank(piece, mov.to()) {
            return Err(MoveError::InvalidMove);
        }

        Ok(self.apply(mov))
    }

    /// A promotion is a pawn movement or capture onto the last rank whose
    /// target cell names the replacement piece.
    pub(crate) fn process_promotion(&mut self, mov: &Move) -> Result<Undo, MoveError> {
        let pawn = mover(mov)?;
        if pawn.kind != PieceKind::Pawn {
            return Err(MoveError::InvalidMove);
        }

        match mov.target.piece {
            Some(promoted) if promoted.color == pawn.color && promoted.kind.is_promotion_target() => {}
            _ => return Err(MoveError::InvalidMove),
        }

        if !reaches_last_rank(pawn, mov.to()) {
            return Err(MoveError::InvalidMove);
        }

        if mov.from().file() == mov.to().file() {
            self.check_movement(pawn, mov.from(), mov.to())?;
        } else {
            self.check_capture(pawn, mov.from(), mov.to())?;
        }

        Ok(self.apply(mov))
    }

    pub(crate) fn process_en_passant(&mut self, mov: &Move) -> Result<Undo, MoveError> {
        let pawn = mover(mov)?;
        if !self.board.is_empty(mov.to()) {
            return Err(MoveError::CellOccupied);
        }

        if pawn.kind != PieceKind::Pawn || !pawn_attack_geometry(pawn, mov.from(), mov.to()) {
            return Err(MoveError::InvalidMove);
        }

        if !self.just_double_stepped(mov.en_passant_victim(), pawn.color.toggle()) {
            return Err(MoveError::InvalidMove);
        }

        Ok(self.apply(mov))
    }
}
