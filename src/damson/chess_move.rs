use core::fmt;
use crate::*;

/*----------------------------------------------------------------*/

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Normal,
    Castle,
    EnPassant,
    PromoteQueen,
    PromoteRook,
    PromoteBishop,
    PromoteKnight,
}

impl MoveKind {
    #[inline]
    pub const fn promotion(self) -> Option<Piece> {
        match self {
            MoveKind::PromoteQueen => Some(Piece::Queen),
            MoveKind::PromoteRook => Some(Piece::Rook),
            MoveKind::PromoteBishop => Some(Piece::Bishop),
            MoveKind::PromoteKnight => Some(Piece::Knight),
            _ => None,
        }
    }

    #[inline]
    pub const fn promoting_to(piece: Piece) -> Option<MoveKind> {
        match piece {
            Piece::Queen => Some(MoveKind::PromoteQueen),
            Piece::Rook => Some(MoveKind::PromoteRook),
            Piece::Bishop => Some(MoveKind::PromoteBishop),
            Piece::Knight => Some(MoveKind::PromoteKnight),
            _ => None,
        }
    }
}

/*----------------------------------------------------------------*/

/// A move as source, destination, and kind tag. Castling is encoded from
/// the king's square to its two-step destination.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub kind: MoveKind,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square, kind: MoveKind) -> Move {
        Move { from, to, kind }
    }

    #[inline]
    pub const fn promotion(self) -> Option<Piece> {
        self.kind.promotion()
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.promotion().is_some()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;

        if let Some(piece) = self.promotion() {
            write!(f, "{}", piece)?;
        }

        Ok(())
    }
}

/*----------------------------------------------------------------*/

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MoveParseError {
    BadSquare,
    BadPromotion,
    TrailingInput,
}

impl Move {
    /// Parses long-algebraic notation against a position. The board decides
    /// the kind: a two-file king step becomes castling, a diagonal pawn move
    /// onto the en-passant target becomes an en-passant capture.
    pub fn parse(board: &Board, s: &str) -> Result<Move, MoveParseError> {
        if s.len() < 4 || !s.is_ascii() {
            return Err(MoveParseError::BadSquare);
        }

        let from = s[0..2].parse::<Square>().map_err(|_| MoveParseError::BadSquare)?;
        let to = s[2..4].parse::<Square>().map_err(|_| MoveParseError::BadSquare)?;
        let promo = &s[4..];

        let mut kind = MoveKind::Normal;

        if !promo.is_empty() {
            if promo.len() > 1 {
                return Err(MoveParseError::TrailingInput);
            }

            let piece = promo
                .chars()
                .next()
                .and_then(|c| Piece::try_from(c).ok())
                .ok_or(MoveParseError::BadPromotion)?;

            kind = MoveKind::promoting_to(piece).ok_or(MoveParseError::BadPromotion)?;
        } else if let Some((_, piece)) = board.piece_on(from) {
            match piece {
                Piece::King if (from.file() as i8 - to.file() as i8).abs() == 2 => {
                    kind = MoveKind::Castle;
                }
                Piece::Pawn if Some(to) == board.en_passant() && from.file() != to.file() => {
                    kind = MoveKind::EnPassant;
                }
                _ => {}
            }
        }

        Ok(Move::new(from, to, kind))
    }
}

/*----------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn display_round_trip() {
        let board = Board::startpos(&Tables::new());
        let mv = Move::new(Square::E2, Square::E4, MoveKind::Normal);

        assert_eq!(mv.to_string(), "e2e4");
        assert_eq!(Move::parse(&board, "e2e4"), Ok(mv));

        let promo = Move::new(Square::A7, Square::A8, MoveKind::PromoteQueen);

        assert_eq!(promo.to_string(), "a7a8q");
        assert_eq!(Move::parse(&board, "a7a8q"), Ok(promo));
        assert_eq!(Move::parse(&board, "a7a8k"), Err(MoveParseError::BadPromotion));
        assert_eq!(Move::parse(&board, "e2"), Err(MoveParseError::BadSquare));
    }

    #[test]
    fn non_ascii_input_is_rejected() {
        let board = Board::startpos(&Tables::new());

        assert_eq!(Move::parse(&board, "\u{1F600}e4"), Err(MoveParseError::BadSquare));
        assert_eq!(Move::parse(&board, "e2é4"), Err(MoveParseError::BadSquare));
    }

    #[test]
    fn castling_inferred_from_king_step() {
        let tables = Tables::new();
        let board = Board::from_fen(&tables, "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();

        assert_eq!(
            Move::parse(&board, "e1g1"),
            Ok(Move::new(Square::E1, Square::G1, MoveKind::Castle))
        );
        assert_eq!(
            Move::parse(&board, "e1c1"),
            Ok(Move::new(Square::E1, Square::C1, MoveKind::Castle))
        );
        assert_eq!(
            Move::parse(&board, "e1f1"),
            Ok(Move::new(Square::E1, Square::F1, MoveKind::Normal))
        );
    }
}
