//! Raw FEN (Forsyth-Edwards Notation) field splitting and validation.

use thiserror::Error;

/// Errors produced while validating a FEN string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 4 to 6 fields, got {0}")]
    InvalidFieldCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),
}

/// The validated fields of a FEN string.
///
/// This is a purely textual split; turning the fields into a position is
/// the board's job. The clock fields are optional on input: positions
/// written as `.... w KQkq -` parse with a zero halfmove clock and
/// fullmove number 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenFields {
    /// Piece placement, e.g. "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR".
    pub placement: String,
    /// Active color, 'w' or 'b'.
    pub active_color: char,
    /// Castling availability, e.g. "KQkq" or "-".
    pub castling: String,
    /// En passant target square, e.g. "e3" or "-".
    pub en_passant: String,
    /// Halfmove clock for the 50-move rule.
    pub halfmove_clock: u32,
    /// Fullmove number.
    pub fullmove_number: u32,
}

impl FenFields {
    /// The standard starting position.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Splits and validates a FEN string.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();

        if !(4..=6).contains(&fields.len()) {
            return Err(FenError::InvalidFieldCount(fields.len()));
        }

        Self::validate_placement(fields[0])?;

        let active_color = match fields[1] {
            "w" => 'w',
            "b" => 'b',
            other => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        Self::validate_castling(fields[2])?;
        Self::validate_en_passant(fields[3])?;

        let halfmove_clock = match fields.get(4) {
            Some(s) => s
                .parse::<u32>()
                .map_err(|_| FenError::InvalidHalfmoveClock(s.to_string()))?,
            None => 0,
        };
        let fullmove_number = match fields.get(5) {
            Some(s) => s
                .parse::<u32>()
                .map_err(|_| FenError::InvalidFullmoveNumber(s.to_string()))?,
            None => 1,
        };

        Ok(FenFields {
            placement: fields[0].to_string(),
            active_color,
            castling: fields[2].to_string(),
            en_passant: fields[3].to_string(),
            halfmove_clock,
            fullmove_number,
        })
    }

    fn validate_placement(placement: &str) -> Result<(), FenError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "expected 8 ranks, got {}",
                ranks.len()
            )));
        }

        for (i, rank) in ranks.iter().enumerate() {
            let mut squares = 0;
            for c in rank.chars() {
                if let Some(d) = c.to_digit(10) {
                    squares += d;
                } else if "pnbrqkPNBRQK".contains(c) {
                    squares += 1;
                } else {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "invalid character '{}' in rank {}",
                        c,
                        8 - i
                    )));
                }
            }
            if squares != 8 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "rank {} has {} squares, expected 8",
                    8 - i,
                    squares
                )));
            }
        }

        Ok(())
    }

    fn validate_castling(castling: &str) -> Result<(), FenError> {
        if castling == "-" {
            return Ok(());
        }
        if castling.is_empty() {
            return Err(FenError::InvalidCastlingRights("empty field".to_string()));
        }
        for c in castling.chars() {
            if !"KQkq".contains(c) {
                return Err(FenError::InvalidCastlingRights(format!(
                    "invalid character '{}'",
                    c
                )));
            }
        }
        Ok(())
    }

    fn validate_en_passant(ep: &str) -> Result<(), FenError> {
        if ep == "-" {
            return Ok(());
        }
        let bytes = ep.as_bytes();
        if bytes.len() != 2
            || !(b'a'..=b'h').contains(&bytes[0])
            || !(bytes[1] == b'3' || bytes[1] == b'6')
        {
            return Err(FenError::InvalidEnPassantSquare(ep.to_string()));
        }
        Ok(())
    }
}
