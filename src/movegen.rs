// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Move generation. Pseudo-legal moves are produced per piece by walking
//! the board directly; legality is then decided by the simulator.
use crate::attacks::{king_squares, knight_squares};
use crate::game::{Game, Outcome};
use crate::moves::{Action, Move};
use crate::types::{Direction, Piece, PieceKind, Square};
use crate::types::{DIAGONALS, ORTHOGONALS, PROMOTION_KINDS};

impl Game {
    /// Every legal move for the side to move, in the form `process_move`
    /// records them. Empty once the game is over.
    pub fn legal_moves(&mut self) -> Vec<Move> {
        if self.outcome() != Outcome::InProgress {
            return Vec::new();
        }

        let side = self.side_to_move();
        let pieces: Vec<Square> = self
            .board
            .pieces()
            .filter(|&(_, piece)| piece.color == side)
            .map(|(sq, _)| sq)
            .collect();

        let mut moves = Vec::new();
        for from in pieces {
            self.pseudo_legal_moves(from, &mut moves);
        }

        moves.retain(|mov| self.is_safe(mov));
        for &action in &[Action::KingCastling, Action::QueenCastling] {
            let mov = Move::castle(side, action);
            if self.check_castle(side, action).is_ok() && self.is_safe(&mov) {
                moves.push(mov);
            }
        }

        moves
    }

    /// Moves for the piece on `from` that obey its movement rules, without
    /// regard to its own king. Castling is not included.
    pub(crate) fn pseudo_legal_moves(&self, from: Square, out: &mut Vec<Move>) {
        let piece = match self.board.piece_at(from) {
            Some(piece) => piece,
            None => return,
        };

        match piece.kind {
            PieceKind::Pawn => self.pawn_moves(piece, from, out),
            PieceKind::Knight => {
                for &to in knight_squares(from) {
                    self.step(piece, from, to, out);
                }
            }
            PieceKind::King => {
                for &to in king_squares(from) {
                    self.step(piece, from, to, out);
                }
            }
            PieceKind::Bishop => self.slide(piece, from, &DIAGONALS, out),
            PieceKind::Rook => self.slide(piece, from, &ORTHOGONALS, out),
            PieceKind::Queen => {
                self.slide(piece, from, &DIAGONALS, out);
                self.slide(piece, from, &ORTHOGONALS, out);
            }
        }
    }

    fn capturable(&self, piece: Piece, to: Square) -> Option<Piece> {
        self.board
            .piece_at(to)
            .filter(|victim| victim.color != piece.color && victim.kind != PieceKind::King)
    }

    fn step(&self, piece: Piece, from: Square, to: Square, out: &mut Vec<Move>) {
        if self.board.is_empty(to) {
            out.push(Move::movement(piece, from, to));
        } else if let Some(victim) = self.capturable(piece, to) {
            out.push(Move::capture(piece, from, victim, to));
        }
    }

    fn slide(&self, piece: Piece, from: Square, dirs: &[Direction], out: &mut Vec<Move>) {
        for &dir in dirs {
            let mut cursor = from.towards(dir);
            while let Some(to) = cursor {
                self.step(piece, from, to, out);
                if !self.board.is_empty(to) {
                    break;
                }

                cursor = to.towards(dir);
            }
        }
    }

    fn pawn_moves(&self, pawn: Piece, from: Square, out: &mut Vec<Move>) {
        let color = pawn.color;
        let advance = color.advance();
        if let Some(one) = from.offset(0, advance) {
            if self.board.is_empty(one) {
                push_pawn_move(pawn, from, one, None, out);
                if from.rank() == color.pawn_rank() {
                    if let Some(two) = one.offset(0, advance) {
                        if self.board.is_empty(two) {
                            out.push(Move::movement(pawn, from, two));
                        }
                    }
                }
            }
        }

        for &dfile in &[-1, 1] {
            let to = match from.offset(dfile, advance) {
                Some(to) => to,
                None => continue,
            };

            if let Some(victim) = self.capturable(pawn, to) {
                push_pawn_move(pawn, from, to, Some(victim), out);
            } else if self.board.is_empty(to) {
                let victim = Square::of(from.rank(), to.file());
                if self.just_double_stepped(victim, color.toggle()) {
                    out.push(Move::en_passant(pawn, from, to));
                }
            }
        }
    }
}

/// A pawn advance or capture, expanded into the four promotions when it
/// reaches the last rank.
fn push_pawn_move(pawn: Piece, from: Square, to: Square, victim: Option<Piece>, out: &mut Vec<Move>) {
    if to.rank() == pawn.color.promotion_rank() {
        for &kind in PROMOTION_KINDS.iter() {
            out.push(Move::promotion(pawn, from, to, Piece::new(kind, pawn.color)));
        }

        return;
    }

    out.push(match victim {
        Some(victim) => Move::capture(pawn, from, victim, to),
        None => Move::movement(pawn, from, to),
    });
}
