//! Bitboard chess kernel: position representation, legal move
//! generation, and make/unmake with incremental Zobrist hashing.
//!
//! The crate answers three questions about a legal position: what are
//! all legal moves, what is the position after one of them, and how is
//! that application reverted exactly.
//!
//! - [`Bitboard`] - 64-bit square sets with the usual operations
//! - [`Board`] - the mutable position: piece sets per side, castling
//!   rights, en-passant target, clocks, and the incremental hash
//! - [`Board::generate_legal_into`] - appends every legal move to a
//!   caller-owned [`MoveList`], handling pins, checks, castling, and
//!   en passant up front rather than by filtering afterwards
//! - [`Board::apply`] / [`Board::unapply`] - in-place make/unmake via
//!   an [`Undo`] record that restores the position byte for byte
//! - [`movegen::perft`] - the standard correctness oracle
//!
//! # Example
//!
//! ```
//! use skewer_movegen::{Board, MoveList};
//!
//! let mut board = Board::startpos();
//! let mut moves = MoveList::new();
//! board.generate_legal_into(&mut moves);
//! assert_eq!(moves.len(), 20);
//!
//! let m = board.parse_move("e2e4").unwrap();
//! let undo = board.apply(m);
//! assert!(board.to_fen().starts_with("rnbqkbnr/pppppppp/8/8/4P3"));
//! board.unapply(undo);
//! assert_eq!(board.to_fen(), Board::startpos().to_fen());
//! ```
//!
//! A `Board` is plain data: copying it copies the position, and two
//! boards never share state. The attack and key tables are process-wide
//! constants, safe to read from any number of threads.

mod apply;
mod bitboard;
mod board;
pub mod movegen;
pub mod zobrist;

pub use apply::Undo;
pub use bitboard::Bitboard;
pub use board::{Board, CastlingRights, SideBitboards};
pub use movegen::{
    between, bishop_attacks, king_attacks, knight_attacks, line, pawn_attacks, queen_attacks,
    rook_attacks, MoveList,
};
