// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Checkmate and stalemate detection for the side to move.
//!
//! Rather than generating every legal reply, a king in check is examined
//! with escape, capture and block reasoning, each candidate confirmed with
//! the simulator. Only a side that is not in check falls back to searching
//! for any legal move, and that search stops at the first one found.
use crate::attacks::{king_squares, AttackKind};
use crate::game::{Game, Outcome};
use crate::moves::Move;
use crate::types::{Color, Piece, PieceKind, Square};

fn mate_unless(defended: bool) -> Outcome {
    if defended {
        Outcome::InProgress
    } else {
        Outcome::Checkmate
    }
}

impl Game {
    pub(crate) fn evaluate_outcome(&mut self) -> Outcome {
        // a bare king on either side ends the game.
        if self.piece_count(Color::White) == 1 || self.piece_count(Color::Black) == 1 {
            return Outcome::Stalemate;
        }

        let side = self.side_to_move();
        let king = self.king_square(side);
        let attackers = self.attackers_of(king, side.toggle());
        match *attackers.squares() {
            [] if self.has_legal_move(side) => Outcome::InProgress,
            [] => Outcome::Stalemate,
            [checker] => {
                let defended = self.king_can_escape(side)
                    || self.can_capture_checker(side, checker)
                    || (attackers.is_blockable() && self.can_block(side, checker));
                mate_unless(defended)
            }
            // only the king can answer a double check.
            _ => mate_unless(self.king_can_escape(side)),
        }
    }

    fn king_can_escape(&mut self, side: Color) -> bool {
        let king = self.king_square(side);
        for &to in king_squares(king) {
            if let Some(mov) = self.build_move(king, to) {
                if self.is_safe(&mov) {
                    return true;
                }
            }
        }

        false
    }

    /// Can some piece other than the king take the lone checker?
    fn can_capture_checker(&mut self, side: Color, checker: Square) -> bool {
        let king = self.king_square(side);
        for (from, kind) in self.all_attackers(checker, side) {
            if from == king {
                continue;
            }

            let mov = match kind {
                AttackKind::EnPassant => match checker.offset(0, side.advance()) {
                    Some(to) => Move::en_passant(Piece::new(PieceKind::Pawn, side), from, to),
                    None => continue,
                },
                _ => match self.build_move(from, checker) {
                    Some(mov) => mov,
                    None => continue,
                },
            };

            if self.is_safe(&mov) {
                return true;
            }
        }

        false
    }

    /// Can some piece other than the king interpose on the checking line?
    fn can_block(&mut self, side: Color, checker: Square) -> bool {
        let king = self.king_square(side);
        let squares = match king.between(checker) {
            Some(squares) => squares,
            None => return false,
        };

        for &sq in squares.iter() {
            for from in self.source_cells_for(sq, side) {
                if from == king {
                    continue;
                }

                if let Some(mov) = self.build_move(from, sq) {
                    if self.is_safe(&mov) {
                        return true;
                    }
                }
            }
        }

        false
    }

    fn has_legal_move(&mut self, side: Color) -> bool {
        if self.king_can_escape(side) {
            return true;
        }

        let pieces: Vec<Square> = self
            .board
            .pieces()
            .filter(|&(_, piece)| piece.color == side && piece.kind != PieceKind::King)
            .map(|(sq, _)| sq)
            .collect();

        let mut candidates = Vec::new();
        for from in pieces {
            candidates.clear();
            self.pseudo_legal_moves(from, &mut candidates);
            for mov in &candidates {
                if self.is_safe(mov) {
                    return true;
                }
            }
        }

        false
    }

    /// The move that takes the piece on `from` to `to`, classified from the
    /// board. Pawns reaching the last rank promote to a queen; the choice of
    /// piece does not affect whether the move is safe.
    pub(crate) fn build_move(&self, from: Square, to: Square) -> Option<Move> {
        let piece = self.board.piece_at(from)?;
        let occupant = self.board.piece_at(to);
        if let Some(victim) = occupant {
            if victim.color == piece.color || victim.kind == PieceKind::King {
                return None;
            }
        }

        if piece.kind == PieceKind::Pawn {
            if to.rank() == piece.color.promotion_rank() {
                let queen = Piece::new(PieceKind::Queen, piece.color);
                return Some(Move::promotion(piece, from, to, queen));
            }

            if from.file() != to.file() && occupant.is_none() {
                return Some(Move::en_passant(piece, from, to));
            }
        }

        Some(match occupant {
            Some(victim) => Move::capture(piece, from, victim, to),
            None => Move::movement(piece, from, to),
        })
    }
}
