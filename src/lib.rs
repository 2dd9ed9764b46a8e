// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A chess move-legality and game-state engine. A `Game` accepts fully
//! described `Move`s one ply at a time, rejects illegal ones with a
//! `MoveError`, and tracks whether the game has ended in checkmate or
//! stalemate.

#[macro_use]
extern crate num_derive;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

mod attacks;
mod board;
mod castle;
mod game;
mod movegen;
mod moves;
mod outcome;
mod perft;
mod process;
mod simulate;
mod types;

pub use attacks::{AttackKind, Attackers};
pub use board::{Board, PlacementParseError, START_PLACEMENT};
pub use game::{Game, MoveError, Outcome, SetupError};
pub use moves::{Action, Cell, Move};
pub use perft::perft;
pub use types::{Color, Direction, File, Piece, PieceKind, Rank, Square};
pub use types::{FILES, RANKS, SQUARES};
