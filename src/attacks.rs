// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Attack detection. Given a square and a side, find the pieces of that side
//! which attack (or could move to) the square, by ray-casting along lines,
//! looking up fixed knight and king offsets, and reconstructing en passant
//! from the last played move.
use arrayvec::ArrayVec;

use crate::board::Board;
use crate::game::Game;
use crate::moves::Move;
use crate::types::{Color, Direction, Piece, PieceKind, Square, TableIndex};
use crate::types::{DIAGONALS, ORTHOGONALS, SQUARES};

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
];

/// Squares reachable from each square by a fixed set of offsets.
struct OffsetTable {
    table: Vec<ArrayVec<[Square; 8]>>,
}

impl OffsetTable {
    pub fn new(offsets: &[(i8, i8)]) -> OffsetTable {
        let table = SQUARES
            .iter()
            .map(|&sq| {
                offsets
                    .iter()
                    .filter_map(|&(dfile, drank)| sq.offset(dfile, drank))
                    .collect()
            })
            .collect();

        OffsetTable { table }
    }

    pub fn squares(&self, sq: Square) -> &[Square] {
        &self.table[sq.as_index()]
    }
}

lazy_static! {
    static ref KNIGHT_TABLE: OffsetTable = OffsetTable::new(&KNIGHT_OFFSETS);
    static ref KING_TABLE: OffsetTable = OffsetTable::new(&KING_OFFSETS);
}

pub fn knight_squares(sq: Square) -> &'static [Square] {
    KNIGHT_TABLE.squares(sq)
}

pub fn king_squares(sq: Square) -> &'static [Square] {
    KING_TABLE.squares(sq)
}

/// The first occupied square walking away from `from` in `dir`, and the piece
/// on it.
pub fn first_occupied(board: &Board, from: Square, dir: Direction) -> Option<(Square, Piece)> {
    let mut cursor = from.towards(dir);
    while let Some(sq) = cursor {
        if let Some(piece) = board.piece_at(sq) {
            return Some((sq, piece));
        }

        cursor = sq.towards(dir);
    }

    None
}

/// How an attacker reaches its target. Only line attacks can be blocked.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AttackKind {
    Line,
    Pawn,
    Knight,
    EnPassant,
    King,
}

/// At most two attackers of a square: enough to tell a single check from a
/// double check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attackers {
    squares: ArrayVec<[Square; 2]>,
    blockable: bool,
}

impl Attackers {
    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    pub fn len(&self) -> usize {
        self.squares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }

    /// True iff exactly one attacker was found along a line (rook, bishop or
    /// queen), so that a piece could be interposed.
    pub fn is_blockable(&self) -> bool {
        self.blockable
    }
}

fn slides_along(piece: Piece, color: Color, line_kind: PieceKind) -> bool {
    piece.color == color && (piece.kind == line_kind || piece.kind == PieceKind::Queen)
}

impl Game {
    /// Finds up to two pieces of side `by` attacking `target`.
    pub fn attackers_of(&self, target: Square, by: Color) -> Attackers {
        let mut squares = ArrayVec::new();
        let mut lines = 0;
        self.visit_attackers(target, by, |sq, kind| {
            if kind == AttackKind::Line {
                lines += 1;
            }

            squares.push(sq);
            !squares.is_full()
        });

        Attackers {
            squares,
            blockable: lines == 1,
        }
    }

    pub fn is_attacked(&self, target: Square, by: Color) -> bool {
        let mut attacked = false;
        self.visit_attackers(target, by, |_, _| {
            attacked = true;
            false
        });
        attacked
    }

    /// Every attacker of `target`, uncapped, along with how it attacks.
    pub(crate) fn all_attackers(&self, target: Square, by: Color) -> Vec<(Square, AttackKind)> {
        let mut attackers = Vec::new();
        self.visit_attackers(target, by, |sq, kind| {
            attackers.push((sq, kind));
            true
        });
        attackers
    }

    /// Feeds each attacker of `target` belonging to `by` to `visit`, in the
    /// order lines, pawns, knights, en passant, king. Stops as soon as `visit`
    /// returns false.
    pub(crate) fn visit_attackers<F>(&self, target: Square, by: Color, mut visit: F)
    where
        F: FnMut(Square, AttackKind) -> bool,
    {
        let board = &self.board;
        for &(dirs, line_kind) in &[(&ORTHOGONALS, PieceKind::Rook), (&DIAGONALS, PieceKind::Bishop)] {
            for &dir in dirs.iter() {
                if let Some((sq, piece)) = first_occupied(board, target, dir) {
                    if slides_along(piece, by, line_kind) && !visit(sq, AttackKind::Line) {
                        return;
                    }
                }
            }
        }

        // A pawn attacks diagonally forward, so look diagonally backward from
        // the attacking side's point of view.
        let pawn = Piece::new(PieceKind::Pawn, by);
        for &dfile in &[-1, 1] {
            if let Some(sq) = target.offset(dfile, -by.advance()) {
                if board.piece_at(sq) == Some(pawn) && !visit(sq, AttackKind::Pawn) {
                    return;
                }
            }
        }

        let knight = Piece::new(PieceKind::Knight, by);
        for &sq in knight_squares(target) {
            if board.piece_at(sq) == Some(knight) && !visit(sq, AttackKind::Knight) {
                return;
            }
        }

        if self.just_double_stepped(target, by.toggle()) {
            for &dfile in &[-1, 1] {
                if let Some(sq) = target.offset(dfile, 0) {
                    if board.piece_at(sq) == Some(pawn) && !visit(sq, AttackKind::EnPassant) {
                        return;
                    }
                }
            }
        }

        let king = Piece::new(PieceKind::King, by);
        for &sq in king_squares(target) {
            if board.piece_at(sq) == Some(king) {
                visit(sq, AttackKind::King);
                return;
            }
        }
    }

    /// True if a pawn of `color` stands on `square` having arrived there by a
    /// two-square advance on the immediately preceding ply.
    pub(crate) fn just_double_stepped(&self, square: Square, color: Color) -> bool {
        if self.board.piece_at(square) != Some(Piece::new(PieceKind::Pawn, color)) {
            return false;
        }

        match (self.moves.last(), Move::double_step(color, square)) {
            (Some(last), Some(expected)) => *last == expected,
            _ => false,
        }
    }

    /// The first piece of `side` found that could move to `target` on its
    /// next ply, not counting castling.
    pub fn source_cell_for(&self, target: Square, side: Color) -> Option<Square> {
        let mut found = None;
        self.visit_sources(target, side, |sq| {
            found = Some(sq);
            false
        });
        found
    }

    pub(crate) fn source_cells_for(&self, target: Square, side: Color) -> Vec<Square> {
        let mut sources = Vec::new();
        self.visit_sources(target, side, |sq| {
            sources.push(sq);
            true
        });
        sources
    }

    /// Feeds each piece of `side` that could move to `target` to `visit`. This
    /// reuses the attack machinery and adds pawn advances and en passant
    /// landings; it does not check king safety.
    fn visit_sources<F>(&self, target: Square, side: Color, mut visit: F)
    where
        F: FnMut(Square) -> bool,
    {
        let board = &self.board;
        let occupant = board.piece_at(target);
        if occupant.map_or(false, |piece| piece.color == side) {
            return;
        }

        let mut keep_going = true;
        self.visit_attackers(target, side, |sq, kind| {
            match kind {
                AttackKind::Line | AttackKind::Knight | AttackKind::King => {
                    keep_going = visit(sq);
                }
                // pawns only move diagonally when capturing.
                AttackKind::Pawn if occupant.is_some() => keep_going = visit(sq),
                _ => {}
            }
            keep_going
        });

        if !keep_going || occupant.is_some() {
            return;
        }

        let pawn = Piece::new(PieceKind::Pawn, side);
        let back = -side.advance();
        let one = match target.offset(0, back) {
            Some(sq) => sq,
            None => return,
        };

        match board.piece_at(one) {
            Some(piece) if piece == pawn => {
                visit(one);
            }
            None => {
                if let Some(two) = one.offset(0, back) {
                    if two.rank() == side.pawn_rank() && board.piece_at(two) == Some(pawn) {
                        visit(two);
                    }
                }
            }
            Some(_) if self.just_double_stepped(one, side.toggle()) => {
                // en passant: the capturing pawn lands on `target`, behind the
                // pawn it takes.
                for &dfile in &[-1, 1] {
                    if let Some(sq) = one.offset(dfile, 0) {
                        if board.piece_at(sq) == Some(pawn) && !visit(sq) {
                            return;
                        }
                    }
                }
            }
            Some(_) => {}
        }
    }
}
