//! The pinned-piece pass.
//!
//! Pinned pieces are generated here, restricted to their pin rays, and
//! the returned set masks them out of the ordinary generators so their
//! moves are never emitted twice.

use skewer_core::{Move, MoveFlag, Piece, Square};

use super::{
    between, bishop_attacks, double_push_rank, line, pawn_attacks, push_pawn_move, queen_attacks,
    rook_attacks, MoveList,
};
use crate::{Bitboard, Board};

impl Board {
    /// Emits the legal moves of every absolutely pinned piece, with
    /// destinations limited to `targets`, and returns the pinned set.
    ///
    /// A piece is pinned when it is the only piece standing between its
    /// king and an enemy slider of the matching kind. Two pieces on the
    /// ray shield each other, so neither is pinned. The pin ray
    /// includes the sniper's square: capturing the pinner is allowed.
    pub(crate) fn pinned_moves(&self, moves: &mut MoveList, targets: Bitboard) -> Bitboard {
        let us = self.side_to_move;
        let them = us.opposite();
        let ours = self.side(us);
        let theirs = self.side(them);
        let Some(king_sq) = ours.king.first() else {
            return Bitboard::EMPTY;
        };
        let occupied = self.occupied();

        let mut pinned = Bitboard::EMPTY;

        let scans = [
            (theirs.rooks | theirs.queens, false),
            (theirs.bishops | theirs.queens, true),
        ];
        for (snipers, diagonal) in scans {
            for sniper in snipers {
                let on_file_or_rank =
                    king_sq.rank() == sniper.rank() || king_sq.file() == sniper.file();
                let aligned = if diagonal {
                    !on_file_or_rank && line(king_sq, sniper).is_not_empty()
                } else {
                    on_file_or_rank
                };
                if !aligned {
                    continue;
                }

                let ray = between(king_sq, sniper);
                let blockers = ray & occupied;
                if blockers.count() != 1 {
                    continue;
                }
                let Some(pin_sq) = (blockers & ours.all).first() else {
                    continue;
                };

                pinned |= blockers;
                let allowed = (ray | Bitboard::from_square(sniper)) & targets;
                self.pinned_piece_moves(moves, pin_sq, allowed);
            }
        }

        pinned
    }

    /// Moves of one pinned piece, already restricted to its pin ray.
    fn pinned_piece_moves(&self, moves: &mut MoveList, from: Square, allowed: Bitboard) {
        let us = self.side_to_move;
        let them = us.opposite();
        let occupied = self.occupied();
        let Some(piece) = self.side(us).piece_on(from) else {
            return;
        };

        match piece {
            // A pinned knight can never stay on the ray.
            Piece::Knight | Piece::King => {}
            Piece::Pawn => {
                let empty = !occupied;
                let singles = Bitboard::from_square(from).advance(us) & empty;
                let doubles = (singles & double_push_rank(us)).advance(us) & empty;
                for to in singles & allowed {
                    push_pawn_move(moves, from, to);
                }
                for to in doubles & allowed {
                    moves.push(Move::new(from, to, MoveFlag::DoublePush));
                }
                for to in pawn_attacks(from, us) & self.side(them).all & allowed {
                    push_pawn_move(moves, from, to);
                }
                if let Some(ep) = self.ep_target {
                    if (pawn_attacks(from, us) & allowed).contains(ep)
                        && !self.ep_discovers_rank_check(from, ep)
                    {
                        moves.push(Move::new(from, ep, MoveFlag::EnPassant));
                    }
                }
            }
            Piece::Bishop => {
                for to in bishop_attacks(from, occupied) & allowed {
                    moves.push(Move::normal(from, to));
                }
            }
            Piece::Rook => {
                for to in rook_attacks(from, occupied) & allowed {
                    moves.push(Move::normal(from, to));
                }
            }
            Piece::Queen => {
                for to in queen_attacks(from, occupied) & allowed {
                    moves.push(Move::normal(from, to));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pinned_pass(fen: &str) -> (MoveList, Bitboard) {
        let board = Board::from_fen(fen).unwrap();
        let mut moves = MoveList::new();
        let pinned = board.pinned_moves(&mut moves, Bitboard::FULL);
        (moves, pinned)
    }

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    #[test]
    fn pinned_bishops() {
        let cases = [
            // A pinned bishop slides along the pin diagonal.
            ("4k3/3b4/8/8/Q7/8/8/4K3 b - - 0 0", 3),
            // Two own pieces on the ray shield each other.
            ("4k3/3b4/2b5/8/Q7/8/8/4K3 b - - 0 0", 0),
            // Two separate short pins.
            ("4k3/3b1b2/2Q3Q1/8/8/8/8/4K3 b - - 0 0", 2),
        ];
        for (fen, expected) in cases {
            let (moves, _) = pinned_pass(fen);
            assert_eq!(moves.len(), expected, "{fen}");
        }
    }

    #[test]
    fn pinned_knights_cannot_move() {
        for fen in [
            "4k3/3n1n2/2Q3Q1/8/8/8/8/4K3 b - - 0 0",
            "4k3/8/8/8/1q6/2N5/8/4K3 w - - 0 0",
        ] {
            let (moves, pinned) = pinned_pass(fen);
            assert_eq!(moves.len(), 0, "{fen}");
            assert!(pinned.is_not_empty(), "{fen}");
        }
    }

    #[test]
    fn pinned_queens() {
        let (moves, _) = pinned_pass("4k3/8/8/8/1q6/2Q5/8/4K3 w - - 0 0");
        assert_eq!(moves.len(), 2);

        let (moves, _) = pinned_pass("4k3/8/4r3/4Q3/1q6/2Q5/8/4K3 w - - 0 0");
        assert_eq!(moves.len(), 6);
    }

    #[test]
    fn diagonal_pins() {
        let cases = [
            ("4k3/3p4/2B1p3/8/1q6/4R3/3P4/4K3 w - - 0 0", 0, Some("d2")),
            ("4k3/3p4/2B1p3/8/1q6/4R3/3P4/4K3 b - - 0 0", 2, Some("e6")),
            ("4k3/8/8/8/1q6/2Q5/8/4K3 w - - 0 0", 2, Some("c3")),
            ("4k3/8/4r3/4Q3/1q6/2Q5/8/4K3 w - - 0 0", 6, Some("c3")),
            ("4k3/8/2p5/8/B7/6q1/5N2/4K3 w - - 0 0", 0, Some("f2")),
            ("4k3/8/2p5/8/B7/6q1/5N2/4K3 b - - 0 0", 0, Some("c6")),
            ("4k3/8/6p1/3b3Q/2P5/1K6/8/8 w - - 0 0", 1, Some("c4")),
            ("4k3/8/6p1/3b3Q/2P5/1K6/8/8 b - - 0 0", 1, Some("g6")),
            // The pin scan is independent of a check elsewhere.
            ("4k3/8/8/b7/7q/6P1/8/4K3 w - - 0 0", 1, Some("g3")),
        ];
        for (fen, expected, pin_loc) in cases {
            let (moves, pinned) = pinned_pass(fen);
            assert_eq!(moves.len(), expected, "{fen}");
            assert_eq!(
                pinned.first(),
                pin_loc.map(sq),
                "pinned square for {fen}"
            );
        }
    }

    #[test]
    fn orthogonal_pins() {
        let cases = [
            ("4k3/8/4r3/4Q3/1q6/2Q5/8/4K3 b - - 0 0", 2, Some("e6")),
            // Sniper aligned with a piece but not with the king: no pin.
            ("7k/8/8/8/1r2R3/8/8/4K3 w - - 0 0", 0, None),
            ("7k/8/8/8/1r2R3/8/8/4K3 b - - 0 0", 0, None),
            ("3k4/8/3n4/8/8/8/3Q4/7K b - - 0 0", 0, Some("d6")),
            ("8/8/1r3QK1/3QQ3/8/kr6/8/8 w - - 0 0", 4, Some("f6")),
            // A horizontally pinned pawn cannot push.
            ("4k3/4p3/8/8/8/4R3/q2PK3/8 w - - 0 0", 0, Some("d2")),
            ("4k3/4p3/8/8/8/4R3/q2PK3/8 b - - 0 0", 2, Some("e7")),
            ("8/4k3/8/4p3/8/4R3/q2PK3/8 b - - 0 0", 1, Some("e5")),
            ("2q1k3/8/2R5/8/2K4r/8/8/8 w - - 0 0", 3, Some("c6")),
            ("rnbqkbnr/ppp1pppp/4Q3/8/4p3/8/PPPP1PPP/RNB1KBNR b KQkq - 0 3", 0, Some("e7")),
        ];
        for (fen, expected, pin_loc) in cases {
            let (moves, pinned) = pinned_pass(fen);
            assert_eq!(moves.len(), expected, "{fen}");
            assert_eq!(
                pinned.first(),
                pin_loc.map(sq),
                "pinned square for {fen}"
            );
        }
    }

    #[test]
    fn file_pinned_pawn_still_pushes() {
        // Pinned on the e-file by the rook; pushes stay on the ray.
        let (moves, pinned) = pinned_pass("4k3/8/8/4r3/8/8/4P3/4K3 w - - 0 0");
        assert_eq!(pinned.first(), Some(sq("e2")));
        assert_eq!(moves.len(), 2);
        assert!(moves.contains(Move::normal(sq("e2"), sq("e3"))));
        assert!(moves.contains(Move::new(sq("e2"), sq("e4"), MoveFlag::DoublePush)));
    }
}
