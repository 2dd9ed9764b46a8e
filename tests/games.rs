// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Whole games played through the public API.
use shahio::{Action, Board, Color, Game, Move, MoveError, Outcome, Piece, PieceKind, Square};

fn setup() {
    let _ = env_logger::try_init();
}

fn white(kind: PieceKind) -> Piece {
    Piece::new(kind, Color::White)
}

fn black(kind: PieceKind) -> Piece {
    Piece::new(kind, Color::Black)
}

fn from_placement(placement: &str) -> Game {
    Game::from_board(Board::from_placement(placement).unwrap()).unwrap()
}

#[test]
fn fools_mate() {
    setup();
    let mut game = Game::new();
    let plies = [
        Move::movement(white(PieceKind::Pawn), Square::F2, Square::F3),
        Move::movement(black(PieceKind::Pawn), Square::E7, Square::E5),
        Move::movement(white(PieceKind::Pawn), Square::G2, Square::G4),
        Move::movement(black(PieceKind::Queen), Square::D8, Square::H4),
    ];

    for &mov in &plies {
        assert_eq!(Outcome::InProgress, game.outcome());
        game.process_move(mov).unwrap();
    }

    assert_eq!(Outcome::Checkmate, game.outcome());
    assert!(game.is_check(Color::White));

    let mov = Move::movement(white(PieceKind::Pawn), Square::A2, Square::A3);
    assert_eq!(Err(MoveError::GameEnded), game.process_move(mov));
    assert_eq!(4, game.moves().len());
}

#[test]
fn back_rank_mate() {
    setup();
    let mut game = from_placement("6k1/5ppp/8/8/8/8/5PPP/3R2K1");
    let mov = Move::movement(white(PieceKind::Rook), Square::D1, Square::D8);
    game.process_move(mov).unwrap();
    assert_eq!(Outcome::Checkmate, game.outcome());

    let mov = Move::movement(black(PieceKind::King), Square::G8, Square::H8);
    assert_eq!(Err(MoveError::GameEnded), game.process_move(mov));
}

#[test]
fn stalemate_is_not_checkmate() {
    setup();
    let mut game = from_placement("k7/p7/P1K5/8/8/8/7P/8");
    let mov = Move::movement(white(PieceKind::King), Square::C6, Square::C7);
    game.process_move(mov).unwrap();
    assert!(!game.is_check(Color::Black));
    assert_eq!(Outcome::Stalemate, game.outcome());
}

#[test]
fn en_passant_round_trip() {
    setup();
    let mut board = Board::starting();
    board.set(Square::B7, None);
    board.set(Square::B4, Some(black(PieceKind::Pawn)));
    let mut game = Game::from_board(board).unwrap();

    game.process_move(Move::movement(white(PieceKind::Pawn), Square::A2, Square::A4))
        .unwrap();
    game.process_move(Move::en_passant(black(PieceKind::Pawn), Square::B4, Square::A3))
        .unwrap();

    assert!(game.board().is_empty(Square::A4));
    assert!(game.board().is_empty(Square::B4));
    assert_eq!(Some(black(PieceKind::Pawn)), game.board().piece_at(Square::A3));
    assert_eq!(15, game.piece_count(Color::White));
}

#[test]
fn promotion_by_movement_and_capture() {
    setup();
    let mut game = from_placement("1n6/P7/4k3/8/8/8/7p/4K3");
    let mov = Move::promotion(
        white(PieceKind::Pawn),
        Square::A7,
        Square::B8,
        white(PieceKind::Queen),
    );
    game.process_move(mov).unwrap();
    assert_eq!(Some(white(PieceKind::Queen)), game.board().piece_at(Square::B8));

    let mov = Move::promotion(
        black(PieceKind::Pawn),
        Square::H2,
        Square::H1,
        black(PieceKind::Rook),
    );
    game.process_move(mov).unwrap();
    assert_eq!(Some(black(PieceKind::Rook)), game.board().piece_at(Square::H1));
    assert!(game.is_check(Color::White));
}

#[test]
fn check_answered_by_block() {
    setup();
    // after Bb5+ black can interpose on c6 or d7.
    let mut game = Game::new();
    let plies = [
        Move::movement(white(PieceKind::Pawn), Square::E2, Square::E4),
        Move::movement(black(PieceKind::Pawn), Square::D7, Square::D5),
        Move::movement(white(PieceKind::Bishop), Square::F1, Square::B5),
    ];
    for &mov in &plies {
        game.process_move(mov).unwrap();
    }

    assert!(game.is_check(Color::Black));
    assert_eq!(Outcome::InProgress, game.outcome());

    // a move that ignores the check is rejected and changes nothing.
    let before = game.clone();
    let mov = Move::movement(black(PieceKind::Pawn), Square::H7, Square::H6);
    assert_eq!(Err(MoveError::KingInCheck), game.process_move(mov));
    assert_eq!(before, game);

    let mov = Move::movement(black(PieceKind::Pawn), Square::C7, Square::C6);
    game.process_move(mov).unwrap();
    assert!(!game.is_check(Color::Black));
}

#[test]
fn castling_through_the_public_api() {
    setup();
    let mut game = Game::new();
    let plies = [
        Move::movement(white(PieceKind::Pawn), Square::E2, Square::E4),
        Move::movement(black(PieceKind::Pawn), Square::E7, Square::E5),
        Move::movement(white(PieceKind::Knight), Square::G1, Square::F3),
        Move::movement(black(PieceKind::Knight), Square::B8, Square::C6),
        Move::movement(white(PieceKind::Bishop), Square::F1, Square::C4),
        Move::movement(black(PieceKind::Knight), Square::G8, Square::F6),
    ];
    for &mov in &plies {
        game.process_move(mov).unwrap();
    }

    game.process_move(Move::castle(Color::White, Action::KingCastling))
        .unwrap();
    assert_eq!(Square::G1, game.king_square(Color::White));
    assert_eq!(Some(white(PieceKind::Rook)), game.board().piece_at(Square::F1));
    assert_eq!(
        "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQ1RK1",
        game.board().placement()
    );
}

#[test]
fn attackers_through_the_public_api() {
    setup();
    let game = from_placement("4k3/8/8/8/1b2r3/8/8/4K3");
    let attackers = game.attackers_of(Square::E1, Color::Black);
    assert_eq!(2, attackers.len());
    assert!(!attackers.is_blockable());
    assert_eq!(Some(Square::E4), game.source_cell_for(Square::E2, Color::Black));
}
