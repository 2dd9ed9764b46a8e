// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use rayon::prelude::*;

use crate::game::{Game, MoveError};

/// Counts the leaf nodes of the legal move tree rooted at `game`, `depth`
/// plies deep. Every move is played through `process_move`, so a move that
/// the generator lists but the engine rejects surfaces as an error.
pub fn perft(game: &Game, depth: u32) -> Result<u64, MoveError> {
    if depth == 0 {
        return Ok(1);
    }

    let mut root = game.clone();
    let moves = root.legal_moves();
    if depth == 1 {
        return Ok(moves.len() as u64);
    }

    moves
        .par_iter()
        .map(|&mov| {
            let mut child = root.clone();
            child.process_move(mov)?;
            perft(&child, depth - 1)
        })
        .sum()
}
