// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::types::{Color, File, Piece, PieceKind, Square};

/// The kind of a ply. Each action is validated by its own processor.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Movement,
    Capture,
    KingCastling,
    QueenCastling,
    Promotion,
    Enpassant,
}

impl Action {
    pub fn is_castle(self) -> bool {
        match self {
            Action::KingCastling | Action::QueenCastling => true,
            _ => false,
        }
    }
}

/// What is (or was) on a square, independent of the current board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub piece: Option<Piece>,
    pub square: Square,
}

impl Cell {
    pub fn new(piece: Option<Piece>, square: Square) -> Cell {
        Cell { piece, square }
    }

    pub fn empty(square: Square) -> Cell {
        Cell::new(None, square)
    }
}

/// A complete record of one ply. The source cell names the moving piece, the
/// target cell names what was on the destination (the captured piece, if
/// any), except for promotions where it names the piece the pawn becomes.
///
/// Moves are self-describing so that the game history can be replayed and
/// scanned (castling rights, en passant) without consulting the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub source: Cell,
    pub target: Cell,
    pub action: Action,
}

impl Move {
    pub fn movement(piece: Piece, from: Square, to: Square) -> Move {
        Move {
            source: Cell::new(Some(piece), from),
            target: Cell::empty(to),
            action: Action::Movement,
        }
    }

    pub fn capture(piece: Piece, from: Square, captured: Piece, to: Square) -> Move {
        Move {
            source: Cell::new(Some(piece), from),
            target: Cell::new(Some(captured), to),
            action: Action::Capture,
        }
    }

    pub fn en_passant(pawn: Piece, from: Square, to: Square) -> Move {
        Move {
            source: Cell::new(Some(pawn), from),
            target: Cell::empty(to),
            action: Action::Enpassant,
        }
    }

    pub fn promotion(pawn: Piece, from: Square, to: Square, promoted: Piece) -> Move {
        Move {
            source: Cell::new(Some(pawn), from),
            target: Cell::new(Some(promoted), to),
            action: Action::Promotion,
        }
    }

    /// The canonical record of a castle: the king's home square and its
    /// destination. The rook's journey is implied by the action.
    pub fn castle(color: Color, action: Action) -> Move {
        let route = CastleRoute::new(color, action);
        Move {
            source: Cell::new(Some(Piece::new(PieceKind::King, color)), route.king_from),
            target: Cell::empty(route.king_to),
            action,
        }
    }

    /// The two-square pawn advance of `color` that ends on `to`. En passant
    /// eligibility is decided by comparing the last played move against this.
    pub fn double_step(color: Color, to: Square) -> Option<Move> {
        let from = to.offset(0, -2 * color.advance())?;
        Some(Move::movement(
            Piece::new(PieceKind::Pawn, color),
            from,
            to,
        ))
    }

    pub fn from(&self) -> Square {
        self.source.square
    }

    pub fn to(&self) -> Square {
        self.target.square
    }

    /// Square of the pawn removed by an en passant capture: beside the
    /// mover, on the destination's file.
    pub fn en_passant_victim(&self) -> Square {
        Square::of(self.from().rank(), self.to().file())
    }
}

/// Fixed squares involved in one castle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct CastleRoute {
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// The square the king passes over.
    pub crossover: Square,
}

impl CastleRoute {
    pub fn new(color: Color, action: Action) -> CastleRoute {
        let rank = color.back_rank();
        let (rook_file, crossover, king_to) = match action {
            Action::QueenCastling => (File::A, File::D, File::C),
            _ => (File::H, File::F, File::G),
        };

        CastleRoute {
            king_from: Square::of(rank, File::E),
            king_to: Square::of(rank, king_to),
            rook_from: Square::of(rank, rook_file),
            rook_to: Square::of(rank, crossover),
            crossover: Square::of(rank, crossover),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Action, CastleRoute, Move};
    use crate::types::{Color, Piece, PieceKind, Square};

    #[test]
    fn double_step_from_start_rank() {
        let white = Move::double_step(Color::White, Square::A4).unwrap();
        assert_eq!(Square::A2, white.from());
        assert_eq!(Square::A4, white.to());
        assert_eq!(Action::Movement, white.action);
        assert_eq!(Some(Piece::new(PieceKind::Pawn, Color::White)), white.source.piece);
        assert!(white.target.piece.is_none());

        let black = Move::double_step(Color::Black, Square::D5).unwrap();
        assert_eq!(Square::D7, black.from());
        assert!(Move::double_step(Color::Black, Square::D7).is_none());
    }

    #[test]
    fn castle_routes() {
        let route = CastleRoute::new(Color::Black, Action::QueenCastling);
        assert_eq!(Square::E8, route.king_from);
        assert_eq!(Square::C8, route.king_to);
        assert_eq!(Square::A8, route.rook_from);
        assert_eq!(Square::D8, route.rook_to);
        assert_eq!(Square::D8, route.crossover);

        let mov = Move::castle(Color::White, Action::KingCastling);
        assert_eq!(Square::E1, mov.from());
        assert_eq!(Square::G1, mov.to());
    }

    #[test]
    fn en_passant_victim_is_beside_mover() {
        let pawn = Piece::new(PieceKind::Pawn, Color::Black);
        let mov = Move::en_passant(pawn, Square::B4, Square::A3);
        assert_eq!(Square::A4, mov.en_passant_victim());
    }
}
