//! Making and unmaking moves.
//!
//! `apply` mutates the board in place and hands back an [`Undo`] record;
//! `unapply` replays it in reverse, restoring every field including the
//! incremental hash.

use skewer_core::{Color, Move, MoveFlag, Piece, Square};

use crate::board::CastlingRights;
use crate::movegen::{ep_victim, pawn_attacks, push_step};
use crate::zobrist::KEYS;
use crate::Board;

/// Everything needed to revert one `apply`.
///
/// Holds the pre-move castling rights, en-passant target, halfmove
/// clock, and hash, plus the move itself, the piece that moved, and any
/// captured piece kind. The capture square is implied by the move.
#[derive(Debug, Clone, Copy)]
#[must_use = "dropping an Undo makes the move permanent"]
pub struct Undo {
    mv: Move,
    piece: Piece,
    captured: Option<Piece>,
    castling: CastlingRights,
    ep_target: Option<Square>,
    halfmove_clock: u32,
    hash: u64,
}

/// Per-square masks applied to the rights nibble on every move: moving
/// from or capturing on a king or rook home square turns the matching
/// rights off. Covers the easy-to-miss capture of an untouched rook.
static RIGHTS_MASK: [u8; 64] = rights_mask_table();

const fn rights_mask_table() -> [u8; 64] {
    let mut table = [0b1111u8; 64];
    table[Square::A1.index() as usize] = 0b1111 & !CastlingRights::WHITE_QUEENSIDE;
    table[Square::E1.index() as usize] =
        0b1111 & !(CastlingRights::WHITE_KINGSIDE | CastlingRights::WHITE_QUEENSIDE);
    table[Square::H1.index() as usize] = 0b1111 & !CastlingRights::WHITE_KINGSIDE;
    table[Square::A8.index() as usize] = 0b1111 & !CastlingRights::BLACK_QUEENSIDE;
    table[Square::E8.index() as usize] =
        0b1111 & !(CastlingRights::BLACK_KINGSIDE | CastlingRights::BLACK_QUEENSIDE);
    table[Square::H8.index() as usize] = 0b1111 & !CastlingRights::BLACK_KINGSIDE;
    table
}

/// The rook's from/to squares for a castling move.
#[inline]
fn rook_path(flag: MoveFlag, color: Color) -> (Square, Square) {
    let home = color.home_rank();
    if matches!(flag, MoveFlag::CastleKingside) {
        (Square::at(7, home), Square::at(5, home))
    } else {
        (Square::at(0, home), Square::at(3, home))
    }
}

impl Board {
    /// Plays a move, mutating the board and returning the undo record.
    ///
    /// The move must come from the legal move generator (or
    /// `parse_move` on a legal move); applying anything else leaves the
    /// board in an unspecified state.
    pub fn apply(&mut self, m: Move) -> Undo {
        let us = self.side_to_move;
        let them = us.opposite();
        let from = m.from();
        let to = m.to();
        let flag = m.flag();

        let piece = self
            .side(us)
            .piece_on(from)
            .expect("no piece of the moving side on the from-square");

        let snapshot = Undo {
            mv: m,
            piece,
            captured: None,
            castling: self.castling,
            ep_target: self.ep_target,
            halfmove_clock: self.halfmove_clock,
            hash: self.hash,
        };

        // Lift the mover off its square.
        let side = self.side_mut(us);
        side.piece_mut(piece).toggle(from);
        side.all.toggle(from);
        self.hash ^= KEYS.piece(us, piece, from);

        // Remove any captured piece; the en-passant victim sits one rank
        // behind the arrival square.
        let mut captured = None;
        if flag == MoveFlag::EnPassant {
            let victim = ep_victim(to, us);
            let side = self.side_mut(them);
            side.pawns.toggle(victim);
            side.all.toggle(victim);
            self.hash ^= KEYS.piece(them, Piece::Pawn, victim);
            captured = Some(Piece::Pawn);
        } else if let Some(kind) = self.side(them).piece_on(to) {
            let side = self.side_mut(them);
            side.piece_mut(kind).toggle(to);
            side.all.toggle(to);
            self.hash ^= KEYS.piece(them, kind, to);
            captured = Some(kind);
        }

        // Drop the mover, or its promotion, on the arrival square.
        let placed = flag.promotion_piece().unwrap_or(piece);
        let side = self.side_mut(us);
        side.piece_mut(placed).toggle(to);
        side.all.toggle(to);
        self.hash ^= KEYS.piece(us, placed, to);

        // Castling also moves the rook across the king.
        if flag.is_castling() {
            let (rook_from, rook_to) = rook_path(flag, us);
            let side = self.side_mut(us);
            side.rooks.toggle(rook_from);
            side.rooks.toggle(rook_to);
            side.all.toggle(rook_from);
            side.all.toggle(rook_to);
            self.hash ^= KEYS.piece(us, Piece::Rook, rook_from);
            self.hash ^= KEYS.piece(us, Piece::Rook, rook_to);
        }

        let rights = CastlingRights::new(
            self.castling.raw()
                & RIGHTS_MASK[from.index() as usize]
                & RIGHTS_MASK[to.index() as usize],
        );
        let changed = self.castling.raw() ^ rights.raw();
        for bit in 0..4 {
            if changed & (1 << bit) != 0 {
                self.hash ^= KEYS.castling(bit);
            }
        }
        self.castling = rights;

        // A new en-passant target appears only after a double push with
        // an enemy pawn standing by to take it.
        if let Some(old) = self.ep_target {
            self.hash ^= KEYS.ep_file(old.file() as usize);
        }
        self.ep_target = None;
        if flag == MoveFlag::DoublePush {
            let skipped = from.offset(push_step(us));
            if (pawn_attacks(skipped, us) & self.side(them).pawns).is_not_empty() {
                self.ep_target = Some(skipped);
                self.hash ^= KEYS.ep_file(skipped.file() as usize);
            }
        }

        if piece == Piece::Pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if us == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = them;
        self.hash ^= KEYS.side();

        Undo {
            captured,
            ..snapshot
        }
    }

    /// Reverts the most recent `apply` this undo record came from.
    pub fn unapply(&mut self, undo: Undo) {
        let us = self.side_to_move.opposite();
        let them = self.side_to_move;
        let m = undo.mv;
        let from = m.from();
        let to = m.to();
        let flag = m.flag();

        let placed = flag.promotion_piece().unwrap_or(undo.piece);
        let side = self.side_mut(us);
        side.piece_mut(placed).toggle(to);
        side.all.toggle(to);
        side.piece_mut(undo.piece).toggle(from);
        side.all.toggle(from);

        if flag.is_castling() {
            let (rook_from, rook_to) = rook_path(flag, us);
            let side = self.side_mut(us);
            side.rooks.toggle(rook_from);
            side.rooks.toggle(rook_to);
            side.all.toggle(rook_from);
            side.all.toggle(rook_to);
        }

        if let Some(kind) = undo.captured {
            let sq = if flag == MoveFlag::EnPassant {
                ep_victim(to, us)
            } else {
                to
            };
            let side = self.side_mut(them);
            side.piece_mut(kind).toggle(sq);
            side.all.toggle(sq);
        }

        if us == Color::Black {
            self.fullmove_number -= 1;
        }
        self.side_to_move = us;
        self.castling = undo.castling;
        self.ep_target = undo.ep_target;
        self.halfmove_clock = undo.halfmove_clock;
        self.hash = undo.hash;
    }
}
