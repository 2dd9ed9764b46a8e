// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The `Game` aggregate: the board, the append-only move history and the
//! bookkeeping derived from them. All board mutation funnels through
//! `apply` and its exact inverse `revert`.
use arrayvec::ArrayVec;
use std::fmt;

use crate::board::Board;
use crate::moves::{Action, CastleRoute, Cell, Move};
use crate::simulate::MoveGuard;
use crate::types::TableIndex;
use crate::types::{Color, Piece, PieceKind, Square};

/// Reasons a move is rejected. The `Display` text of each variant is a short,
/// stable message suitable for showing to a player.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveError {
    GameEnded,
    NotYourTurn,
    SourceMismatch,
    CellOccupied,
    CellEmpty,
    MoveBlocked,
    InvalidMove,
    InvalidAttack,
    KingNotInPosition,
    RookNotInPosition,
    PiecesBetween,
    CrossoverAttacked,
    KingInCheck,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = match self {
            MoveError::GameEnded => "game has ended",
            MoveError::NotYourTurn => "wrong side to move",
            MoveError::SourceMismatch => "piece not in position",
            MoveError::CellOccupied => "cell is occupied",
            MoveError::CellEmpty => "cell is empty",
            MoveError::MoveBlocked => "move is blocked",
            MoveError::InvalidMove => "invalid move",
            MoveError::InvalidAttack => "invalid attack",
            MoveError::KingNotInPosition => "king not in position",
            MoveError::RookNotInPosition => "rook not in position",
            MoveError::PiecesBetween => "pieces between king and rook",
            MoveError::CrossoverAttacked => "crossover cell attacked",
            MoveError::KingInCheck => "king is in check",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for MoveError {}

/// Possible errors when starting a game from an arbitrary board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SetupError {
    MissingKing(Color),
    ExtraKing(Color),
    /// The side that just "moved" (Black, since White is to move) is in check.
    OpponentInCheck,
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SetupError::MissingKing(color) => write!(f, "no king for side {}", color),
            SetupError::ExtraKing(color) => write!(f, "more than one king for side {}", color),
            SetupError::OpponentInCheck => write!(f, "side not to move is in check"),
        }
    }
}

impl std::error::Error for SetupError {}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    InProgress,
    Checkmate,
    Stalemate,
}

/// Everything needed to undo one `apply`: the prior contents of each written
/// square (in write order) and the bookkeeping as it was.
#[derive(Debug)]
pub(crate) struct Undo {
    writes: ArrayVec<[(Square, Option<Piece>); 4]>,
    kings: [Square; 2],
    counts: [u32; 2],
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Game {
    pub(crate) board: Board,
    pub(crate) moves: Vec<Move>,
    kings: [Square; 2],
    counts: [u32; 2],
    outcome: Outcome,
}

//
// Construction and state getters
//

impl Game {
    /// A game in the standard starting position.
    pub fn new() -> Game {
        Game {
            board: Board::starting(),
            moves: Vec::new(),
            kings: [Square::E1, Square::E8],
            counts: [16, 16],
            outcome: Outcome::InProgress,
        }
    }

    /// A game starting from an arbitrary board with White to move and an
    /// empty history. The outcome is evaluated immediately, so a board that
    /// is already mate or stalemate yields a finished game.
    pub fn from_board(board: Board) -> Result<Game, SetupError> {
        fn find_king(board: &Board, color: Color) -> Result<Square, SetupError> {
            let mut kings = board
                .pieces()
                .filter(|&(_, piece)| piece.is(PieceKind::King, color))
                .map(|(square, _)| square);
            let king = kings.next().ok_or(SetupError::MissingKing(color))?;
            if kings.next().is_some() {
                return Err(SetupError::ExtraKing(color));
            }

            Ok(king)
        }

        let mut game = Game {
            board,
            moves: Vec::new(),
            kings: [
                find_king(&board, Color::White)?,
                find_king(&board, Color::Black)?,
            ],
            counts: [board.count(Color::White), board.count(Color::Black)],
            outcome: Outcome::InProgress,
        };

        if game.is_check(Color::Black) {
            return Err(SetupError::OpponentInCheck);
        }

        game.outcome = game.evaluate_outcome();
        Ok(game)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// The side to move is a pure function of the history length.
    pub fn side_to_move(&self) -> Color {
        if self.moves.len() % 2 == 0 {
            Color::White
        } else {
            Color::Black
        }
    }

    pub fn king_square(&self, color: Color) -> Square {
        self.kings[color.as_index()]
    }

    pub fn piece_count(&self, color: Color) -> u32 {
        self.counts[color.as_index()]
    }

    pub fn is_check(&self, color: Color) -> bool {
        self.is_attacked(self.king_square(color), color.toggle())
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

//
// Move processing
//

impl Game {
    /// Validates and plays one move for the side to move. On error the game
    /// is left exactly as it was.
    pub fn process_move(&mut self, mov: Move) -> Result<(), MoveError> {
        if self.outcome != Outcome::InProgress {
            return Err(MoveError::GameEnded);
        }

        let side = self.side_to_move();
        let mov = self.normalize(mov)?;
        let undo = match self.dispatch(&mov) {
            Ok(undo) => undo,
            Err(err) => {
                debug!("rejected {:?} {}-{}: {}", mov.action, mov.from(), mov.to(), err);
                return Err(err);
            }
        };

        // The processors only check geometry and occupancy. Own-king safety is
        // checked on the mutated board, which the guard restores on rejection.
        let guard = MoveGuard::adopt(self, undo);
        if guard.is_check(side) {
            debug!("rejected {:?} {}-{}: king is in check", mov.action, mov.from(), mov.to());
            return Err(MoveError::KingInCheck);
        }
        guard.commit();

        debug!("{} played {:?} {}-{}", side, mov.action, mov.from(), mov.to());
        self.moves.push(mov);
        self.outcome = self.evaluate_outcome();
        if self.outcome != Outcome::InProgress {
            info!("game over after {} plies: {:?}", self.moves.len(), self.outcome);
        }

        Ok(())
    }

    fn dispatch(&mut self, mov: &Move) -> Result<Undo, MoveError> {
        match mov.action {
            Action::Movement => self.process_movement(mov),
            Action::Capture => self.process_capture(mov),
            Action::KingCastling | Action::QueenCastling => self.process_castling(mov),
            Action::Promotion => self.process_promotion(mov),
            Action::Enpassant => self.process_en_passant(mov),
        }
    }

    /// Checks that the move's source cell agrees with the board and belongs
    /// to the side to move, and produces the record that goes into history.
    fn normalize(&self, mov: Move) -> Result<Move, MoveError> {
        let side = self.side_to_move();
        if mov.action.is_castle() {
            return match mov.source.piece {
                Some(piece) if piece.kind == PieceKind::King && piece.color != side => {
                    Err(MoveError::NotYourTurn)
                }
                Some(piece) if piece.kind == PieceKind::King => Ok(Move::castle(side, mov.action)),
                _ => Err(MoveError::SourceMismatch),
            };
        }

        let piece = match self.board.piece_at(mov.from()) {
            Some(piece) if Some(piece) == mov.source.piece => piece,
            _ => return Err(MoveError::SourceMismatch),
        };

        if piece.color != side {
            return Err(MoveError::NotYourTurn);
        }

        let target = match mov.action {
            Action::Promotion => mov.target.piece,
            _ => self.board.piece_at(mov.to()),
        };

        Ok(Move {
            source: Cell::new(Some(piece), mov.from()),
            target: Cell::new(target, mov.to()),
            action: mov.action,
        })
    }
}

//
// Board mutation primitives
//

impl Game {
    /// Plays a move on the board without any validation, keeping the king
    /// cache and piece counts in step. The returned `Undo` restores the exact
    /// prior state through `revert`.
    pub(crate) fn apply(&mut self, mov: &Move) -> Undo {
        let mut undo = Undo {
            writes: ArrayVec::new(),
            kings: self.kings,
            counts: self.counts,
        };

        let mover = match self.board.piece_at(mov.from()) {
            Some(piece) => piece,
            None => {
                debug_assert!(false, "apply with no piece at {}", mov.from());
                return undo;
            }
        };

        let king_to = if mov.action.is_castle() {
            let route = CastleRoute::new(mover.color, mov.action);
            let rook = self.write(&mut undo, route.rook_from, None);
            self.write(&mut undo, route.king_from, None);
            self.write(&mut undo, route.rook_to, rook);
            self.write(&mut undo, route.king_to, Some(mover));
            route.king_to
        } else {
            let placed = match mov.action {
                Action::Promotion => mov.target.piece.or(Some(mover)),
                _ => Some(mover),
            };

            self.write(&mut undo, mov.from(), None);
            let mut victim = self.write(&mut undo, mov.to(), placed);
            if mov.action == Action::Enpassant {
                victim = self.write(&mut undo, mov.en_passant_victim(), None);
            }

            if let Some(victim) = victim {
                let count = &mut self.counts[victim.color.as_index()];
                *count = count.saturating_sub(1);
            }

            mov.to()
        };

        if mover.kind == PieceKind::King {
            self.kings[mover.color.as_index()] = king_to;
        }

        undo
    }

    pub(crate) fn revert(&mut self, undo: Undo) {
        for &(square, previous) in undo.writes.iter().rev() {
            self.board.set(square, previous);
        }

        self.kings = undo.kings;
        self.counts = undo.counts;
    }

    fn write(&mut self, undo: &mut Undo, square: Square, piece: Option<Piece>) -> Option<Piece> {
        let previous = self.board.set(square, piece);
        undo.writes.push((square, previous));
        previous
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.board)?;
        writeln!(f, "{} to move, {:?}", self.side_to_move(), self.outcome)
    }
}
