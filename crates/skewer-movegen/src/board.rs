//! Board state: piece placement, side to move, castling rights,
//! en-passant target, clocks, and the incremental position hash.

use skewer_core::{Color, FenError, FenFields, Move, MoveFlag, Piece, Square};

use crate::movegen::{ep_victim, pawn_attacks};
use crate::{zobrist, Bitboard};

/// The four castling flags packed into a nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;

    /// Creates rights from raw flags; extra bits are dropped.
    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b1111)
    }

    /// Returns true if the given side may still castle kingside.
    #[inline]
    pub const fn kingside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_KINGSIDE,
            Color::Black => Self::BLACK_KINGSIDE,
        };
        self.0 & flag != 0
    }

    /// Returns true if the given side may still castle queenside.
    #[inline]
    pub const fn queenside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_QUEENSIDE,
            Color::Black => Self::BLACK_QUEENSIDE,
        };
        self.0 & flag != 0
    }

    /// Returns the raw flag nibble.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

/// One side's piece sets plus the cached union.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SideBitboards {
    pub pawns: Bitboard,
    pub knights: Bitboard,
    pub bishops: Bitboard,
    pub rooks: Bitboard,
    pub queens: Bitboard,
    pub king: Bitboard,
    /// Union of the six piece boards, kept in sync by make/unmake.
    pub all: Bitboard,
}

impl SideBitboards {
    pub const EMPTY: SideBitboards = SideBitboards {
        pawns: Bitboard::EMPTY,
        knights: Bitboard::EMPTY,
        bishops: Bitboard::EMPTY,
        rooks: Bitboard::EMPTY,
        queens: Bitboard::EMPTY,
        king: Bitboard::EMPTY,
        all: Bitboard::EMPTY,
    };

    /// Returns the board for one piece kind.
    #[inline]
    pub const fn piece(&self, piece: Piece) -> Bitboard {
        match piece {
            Piece::Pawn => self.pawns,
            Piece::Knight => self.knights,
            Piece::Bishop => self.bishops,
            Piece::Rook => self.rooks,
            Piece::Queen => self.queens,
            Piece::King => self.king,
        }
    }

    #[inline]
    pub(crate) fn piece_mut(&mut self, piece: Piece) -> &mut Bitboard {
        match piece {
            Piece::Pawn => &mut self.pawns,
            Piece::Knight => &mut self.knights,
            Piece::Bishop => &mut self.bishops,
            Piece::Rook => &mut self.rooks,
            Piece::Queen => &mut self.queens,
            Piece::King => &mut self.king,
        }
    }

    /// Probes the piece boards for the piece on a square.
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        if !self.all.contains(sq) {
            return None;
        }
        Piece::ALL.into_iter().find(|&p| self.piece(p).contains(sq))
    }
}

/// A chess position.
///
/// Plain old data: boards are cheap to copy, and two boards never share
/// state. Mutation happens only through `apply` and `unapply`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub white: SideBitboards,
    pub black: SideBitboards,
    pub side_to_move: Color,
    pub castling: CastlingRights,
    /// Square a pawn could be captured on en passant next ply. Present
    /// only when an enemy pawn is actually positioned to capture, which
    /// keeps hashing and FEN output canonical across transpositions.
    pub ep_target: Option<Square>,
    /// Plies since the last capture or pawn move.
    pub halfmove_clock: u32,
    /// Increments after each black move.
    pub fullmove_number: u32,
    pub(crate) hash: u64,
}

impl Board {
    /// Creates a board with no pieces.
    pub fn empty() -> Self {
        Board {
            white: SideBitboards::EMPTY,
            black: SideBitboards::EMPTY,
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            ep_target: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            hash: 0,
        }
    }

    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        Self::from_fen(FenFields::STARTPOS).expect("starting position FEN is valid")
    }

    /// Parses a FEN string into a board.
    ///
    /// The en-passant field is canonicalized on the way in: a target
    /// square that no pawn of the side to move can capture on is
    /// dropped, so `to_fen` of the result may differ from the input in
    /// that field alone.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let fields = FenFields::parse(fen)?;
        let mut board = Board::empty();

        for (rank_idx, rank_str) in fields.placement.split('/').enumerate() {
            let rank = 7 - rank_idx as u8;
            let mut file = 0u8;
            for c in rank_str.chars() {
                if let Some(digit) = c.to_digit(10) {
                    file += digit as u8;
                } else if let Some((piece, color)) = Piece::from_fen_char(c) {
                    let sq = Square::at(file, rank);
                    let side = board.side_mut(color);
                    side.piece_mut(piece).set(sq);
                    side.all.set(sq);
                    file += 1;
                }
            }
        }

        board.side_to_move = match fields.active_color {
            'w' => Color::White,
            _ => Color::Black,
        };

        let mut rights = 0u8;
        for c in fields.castling.chars() {
            match c {
                'K' => rights |= CastlingRights::WHITE_KINGSIDE,
                'Q' => rights |= CastlingRights::WHITE_QUEENSIDE,
                'k' => rights |= CastlingRights::BLACK_KINGSIDE,
                'q' => rights |= CastlingRights::BLACK_QUEENSIDE,
                _ => {}
            }
        }
        board.castling = CastlingRights::new(rights);

        board.ep_target = if fields.en_passant == "-" {
            None
        } else {
            Square::from_algebraic(&fields.en_passant).filter(|&sq| board.ep_capture_possible(sq))
        };

        board.halfmove_clock = fields.halfmove_clock;
        board.fullmove_number = fields.fullmove_number;
        board.hash = zobrist::recompute(&board);

        Ok(board)
    }

    /// Serializes the board to FEN.
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();

        for rank in (0..8u8).rev() {
            let mut empty_run = 0;
            for file in 0..8u8 {
                let sq = Square::at(file, rank);
                if let Some((piece, color)) = self.piece_at(sq) {
                    if empty_run > 0 {
                        fen.push_str(&empty_run.to_string());
                        empty_run = 0;
                    }
                    fen.push(piece.to_fen_char(color));
                } else {
                    empty_run += 1;
                }
            }
            if empty_run > 0 {
                fen.push_str(&empty_run.to_string());
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        fen.push(' ');
        if self.castling.raw() == 0 {
            fen.push('-');
        } else {
            if self.castling.kingside(Color::White) {
                fen.push('K');
            }
            if self.castling.queenside(Color::White) {
                fen.push('Q');
            }
            if self.castling.kingside(Color::Black) {
                fen.push('k');
            }
            if self.castling.queenside(Color::Black) {
                fen.push('q');
            }
        }

        fen.push(' ');
        match self.ep_target {
            Some(sq) => fen.push_str(&sq.to_algebraic()),
            None => fen.push('-'),
        }

        fen.push(' ');
        fen.push_str(&self.halfmove_clock.to_string());
        fen.push(' ');
        fen.push_str(&self.fullmove_number.to_string());

        fen
    }

    /// Returns one side's piece sets.
    #[inline]
    pub const fn side(&self, color: Color) -> &SideBitboards {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    #[inline]
    pub(crate) fn side_mut(&mut self, color: Color) -> &mut SideBitboards {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }

    /// All occupied squares.
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.white.all | self.black.all
    }

    /// The piece and color on a square, if any.
    pub fn piece_at(&self, sq: Square) -> Option<(Piece, Color)> {
        if let Some(piece) = self.white.piece_on(sq) {
            return Some((piece, Color::White));
        }
        if let Some(piece) = self.black.piece_on(sq) {
            return Some((piece, Color::Black));
        }
        None
    }

    /// The incrementally maintained Zobrist hash.
    #[inline]
    pub const fn hash(&self) -> u64 {
        self.hash
    }

    /// Resolves a long-algebraic move string against this position,
    /// recovering the double-push, castling, and en-passant flags the
    /// bare text cannot carry.
    pub fn parse_move(&self, s: &str) -> Option<Move> {
        let parsed = Move::from_uci(s)?;
        let from = parsed.from();
        let to = parsed.to();
        let piece = self.side(self.side_to_move).piece_on(from)?;

        let flag = if parsed.flag().is_promotion() {
            parsed.flag()
        } else if piece == Piece::Pawn {
            if self.ep_target == Some(to) {
                MoveFlag::EnPassant
            } else if (from.index() as i8 - to.index() as i8).abs() == 16 {
                MoveFlag::DoublePush
            } else {
                MoveFlag::Normal
            }
        } else if piece == Piece::King && (from.file() as i8 - to.file() as i8).abs() == 2 {
            if to.file() == 6 {
                MoveFlag::CastleKingside
            } else {
                MoveFlag::CastleQueenside
            }
        } else {
            MoveFlag::Normal
        };

        Some(Move::new(from, to, flag))
    }

    /// True if a pawn of the side to move can capture on `ep`.
    pub(crate) fn ep_capture_possible(&self, ep: Square) -> bool {
        let us = self.side_to_move;
        let them = us.opposite();
        self.side(them).pawns.contains(ep_victim(ep, us))
            && (pawn_attacks(ep, them) & self.side(us).pawns).is_not_empty()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::startpos()
    }
}
