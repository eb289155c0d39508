//! Piece identity: the two sides and the six piece kinds.

/// One of the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// The other side.
    #[inline]
    pub const fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Table index: 0 for white, 1 for black.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The rank this side's pieces start on (0 or 7); the castling
    /// geometry is derived from it.
    #[inline]
    pub const fn home_rank(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }
}

/// The six piece kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Piece {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// FEN letters in kind order; uppercase is derived from the color.
const FEN_LETTERS: &[u8; 6] = b"pnbrqk";

impl Piece {
    /// All piece kinds in index order.
    pub const ALL: [Piece; 6] = [
        Piece::Pawn,
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
        Piece::King,
    ];

    /// Table index: 0 for pawn through 5 for king.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The FEN letter for this piece of the given color.
    pub const fn to_fen_char(self, color: Color) -> char {
        let letter = FEN_LETTERS[self.index()];
        match color {
            Color::White => letter.to_ascii_uppercase() as char,
            Color::Black => letter as char,
        }
    }

    /// Decodes a FEN letter into kind and color.
    pub const fn from_fen_char(c: char) -> Option<(Piece, Color)> {
        let kind = match c.to_ascii_lowercase() {
            'p' => Piece::Pawn,
            'n' => Piece::Knight,
            'b' => Piece::Bishop,
            'r' => Piece::Rook,
            'q' => Piece::Queen,
            'k' => Piece::King,
            _ => return None,
        };
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some((kind, color))
    }
}
