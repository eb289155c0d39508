//! Core types for the skewer move-generation kernel.
//!
//! This crate provides the value types shared by every consumer of the
//! kernel:
//! - [`Color`] and [`Piece`] for piece identity
//! - [`Square`] for board coordinates (bare 0-63 indices)
//! - [`Move`] and [`MoveFlag`] for compact move encoding
//! - [`FenFields`] for raw FEN field splitting and validation

mod fen;
mod mov;
mod piece;
mod square;

pub use fen::{FenError, FenFields};
pub use mov::{Move, MoveFlag};
pub use piece::{Color, Piece};
pub use square::Square;
