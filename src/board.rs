// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The `Board` is the 8x8 grid of squares shared by every part of the
//! engine. It knows nothing about the rules of chess; it only answers
//! "what is on this square" and lets the game overwrite squares.
use std::convert::TryFrom;
use std::fmt;

use crate::types::TableIndex;
use crate::types::{Color, File, Piece, PieceKind, Rank, Square};
use crate::types::{FILES, RANKS};

pub const START_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

/// Possible errors that can arise when parsing a piece placement string into
/// a `Board`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlacementParseError {
    UnexpectedChar(char),
    UnexpectedEnd,
    InvalidDigit,
    FileDoesNotSumToEight,
    UnknownPiece,
    TrailingInput,
}

impl fmt::Display for PlacementParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PlacementParseError::UnexpectedChar(c) => write!(f, "unexpected character '{}'", c),
            PlacementParseError::UnexpectedEnd => write!(f, "unexpected end of placement"),
            PlacementParseError::InvalidDigit => write!(f, "invalid digit"),
            PlacementParseError::FileDoesNotSumToEight => write!(f, "rank does not sum to eight"),
            PlacementParseError::UnknownPiece => write!(f, "unknown piece"),
            PlacementParseError::TrailingInput => write!(f, "trailing input after placement"),
        }
    }
}

impl std::error::Error for PlacementParseError {}

/// Row-major grid of squares, rank 1 (White's back rank) first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    pub const fn empty() -> Board {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    pub fn starting() -> Board {
        let mut board = Board::empty();
        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        for &color in &[Color::White, Color::Black] {
            for (&file, &kind) in FILES.iter().zip(back_rank.iter()) {
                board.set(Square::of(color.back_rank(), file), Some(Piece::new(kind, color)));
                board.set(
                    Square::of(color.pawn_rank(), file),
                    Some(Piece::new(PieceKind::Pawn, color)),
                );
            }
        }

        board
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.rank().as_index()][square.file().as_index()]
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    /// Overwrites a square, returning whatever occupied it before.
    pub fn set(&mut self, square: Square, piece: Option<Piece>) -> Option<Piece> {
        let slot = &mut self.squares[square.rank().as_index()][square.file().as_index()];
        std::mem::replace(slot, piece)
    }

    /// Iterates every occupied square along with its piece.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        RANKS.iter().flat_map(move |&rank| {
            FILES.iter().filter_map(move |&file| {
                let square = Square::of(rank, file);
                self.piece_at(square).map(|piece| (square, piece))
            })
        })
    }

    pub fn count(&self, color: Color) -> u32 {
        self.pieces().filter(|&(_, piece)| piece.color == color).count() as u32
    }

    /// Parses the piece placement field of a FEN string, e.g.
    /// `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR`.
    pub fn from_placement<S: AsRef<str>>(placement: S) -> Result<Board, PlacementParseError> {
        use std::iter::Peekable;
        use std::str::Chars;

        type Stream<'a> = Peekable<Chars<'a>>;

        fn eat<'a>(iter: &mut Stream<'a>, expected: char) -> Result<(), PlacementParseError> {
            match iter.next() {
                Some(c) if c == expected => Ok(()),
                Some(c) => Err(PlacementParseError::UnexpectedChar(c)),
                None => Err(PlacementParseError::UnexpectedEnd),
            }
        }

        fn peek<'a>(iter: &mut Stream<'a>) -> Result<char, PlacementParseError> {
            if let Some(c) = iter.peek() {
                Ok(*c)
            } else {
                Err(PlacementParseError::UnexpectedEnd)
            }
        }

        let mut board = Board::empty();
        let iter = &mut placement.as_ref().chars().peekable();
        for &rank in RANKS.iter().rev() {
            let mut file = File::A as usize;
            while file <= File::H as usize {
                let c = peek(iter)?;
                // digits 1 through 8 indicate empty squares.
                if c.is_digit(10) {
                    if c < '1' || c > '8' {
                        return Err(PlacementParseError::InvalidDigit);
                    }

                    file += c as usize - '0' as usize;
                    if file > 8 {
                        return Err(PlacementParseError::FileDoesNotSumToEight);
                    }

                    iter.next();
                    continue;
                }

                let piece = Piece::try_from(c).map_err(|_| PlacementParseError::UnknownPiece)?;
                board.set(Square::of(rank, File::from_index(file)), Some(piece));
                iter.next();
                file += 1;
            }

            if rank != Rank::One {
                eat(iter, '/')?;
            }
        }

        if iter.peek().is_some() {
            return Err(PlacementParseError::TrailingInput);
        }

        Ok(board)
    }

    pub fn placement(&self) -> String {
        let mut buf = String::new();
        for &rank in RANKS.iter().rev() {
            let mut empty_squares = 0;
            for &file in &FILES {
                if let Some(piece) = self.piece_at(Square::of(rank, file)) {
                    if empty_squares != 0 {
                        buf.push_str(&empty_squares.to_string());
                    }
                    buf.push_str(&piece.to_string());
                    empty_squares = 0;
                } else {
                    empty_squares += 1;
                }
            }

            if empty_squares != 0 {
                buf.push_str(&empty_squares.to_string());
            }

            if rank != Rank::One {
                buf.push('/');
            }
        }

        buf
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::starting()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &rank in RANKS.iter().rev() {
            for &file in &FILES {
                if let Some(piece) = self.piece_at(Square::of(rank, file)) {
                    write!(f, " {} ", piece)?;
                } else {
                    write!(f, " . ")?;
                }
            }

            writeln!(f, "| {}", rank)?;
        }

        for _ in &FILES {
            write!(f, "---")?;
        }

        writeln!(f)?;
        for &file in &FILES {
            write!(f, " {} ", file)?;
        }

        writeln!(f)
    }
}
