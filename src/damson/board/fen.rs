use core::fmt;

use crate::*;

/*----------------------------------------------------------------*/

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    MissingField(&'static str),
    BadPiece(char),
    BadRank,
    BadSideToMove,
    BadCastleRights,
    BadEnPassant,
    BadClock,
    MissingKing,
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FenError::MissingField(field) => write!(f, "missing {field} field"),
            FenError::BadPiece(c) => write!(f, "invalid piece character '{c}'"),
            FenError::BadRank => write!(f, "rank does not describe 8 squares"),
            FenError::BadSideToMove => write!(f, "side to move must be 'w' or 'b'"),
            FenError::BadCastleRights => write!(f, "invalid castling rights"),
            FenError::BadEnPassant => write!(f, "invalid en passant square"),
            FenError::BadClock => write!(f, "invalid move clock"),
            FenError::MissingKing => write!(f, "each side needs exactly one king"),
        }
    }
}

impl std::error::Error for FenError {}

/*----------------------------------------------------------------*/

impl Board {
    pub fn from_fen(tables: &Tables, fen: &str) -> Result<Board, FenError> {
        let mut fields = fen.split_ascii_whitespace();
        let mut board = Board::empty();

        /*----------------------------------------------------------------*/

        let placement = fields.next().ok_or(FenError::MissingField("placement"))?;

        for (row, rank_str) in placement.split('/').enumerate() {
            if row > 7 {
                return Err(FenError::BadRank);
            }

            let rank = Rank::try_index(7 - row).ok_or(FenError::BadRank)?;
            let mut file = 0;

            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                } else {
                    let sq = Square::new(File::try_index(file).ok_or(FenError::BadRank)?, rank);
                    let piece = Piece::try_from(c).map_err(|_| FenError::BadPiece(c))?;
                    let color = if c.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };

                    board.put(color, piece, sq);
                    file += 1;
                }
            }

            if file != 8 {
                return Err(FenError::BadRank);
            }
        }

        for &color in &Color::ALL {
            if !board.colored_pieces(color, Piece::King).exactly_one() {
                return Err(FenError::MissingKing);
            }
        }

        /*----------------------------------------------------------------*/

        let side = fields.next().ok_or(FenError::MissingField("side to move"))?;
        if side.parse::<Color>().map(|c| board.flip_if(c)).is_err() {
            return Err(FenError::BadSideToMove);
        }

        /*----------------------------------------------------------------*/

        let castling = fields.next().ok_or(FenError::MissingField("castling"))?;
        let mut rights = CastleRights::NONE;

        if castling != "-" {
            for c in castling.chars() {
                match c {
                    'K' => rights.short[Color::White] = true,
                    'Q' => rights.long[Color::White] = true,
                    'k' => rights.short[Color::Black] = true,
                    'q' => rights.long[Color::Black] = true,
                    _ => return Err(FenError::BadCastleRights),
                }
            }
        }

        board.restore_castle_rights(rights);

        /*----------------------------------------------------------------*/

        let ep = fields.next().ok_or(FenError::MissingField("en passant"))?;

        if ep != "-" {
            let sq: Square = ep.parse().map_err(|_| FenError::BadEnPassant)?;

            if sq.rank() != Rank::Third.relative_to(!board.side_to_move()) {
                return Err(FenError::BadEnPassant);
            }

            board.restore_en_passant(Some(sq));
        }

        /*----------------------------------------------------------------*/

        if let Some(clock) = fields.next() {
            board.set_halfmove_clock(clock.parse().map_err(|_| FenError::BadClock)?);
        }

        if let Some(number) = fields.next() {
            board.set_fullmove_number(number.parse().map_err(|_| FenError::BadClock)?);
        }

        /*----------------------------------------------------------------*/

        let hash = board.calc_hash();
        board.set_hash(hash);
        board.history_push(hash);
        board.update_analysis(tables);

        Ok(board)
    }

    fn flip_if(&mut self, color: Color) {
        if color == Color::Black {
            self.flip_side_raw();
        }
    }

    /*----------------------------------------------------------------*/

    pub fn to_fen(&self) -> String {
        let mut fen = String::new();

        for &rank in Rank::ALL.iter().rev() {
            let mut empty = 0;

            for &file in &File::ALL {
                match self.piece_on(Square::new(file, rank)) {
                    Some((color, piece)) => {
                        if empty > 0 {
                            fen.push(char::from_digit(empty, 10).unwrap_or('0'));
                            empty = 0;
                        }
                        fen.push(piece.to_char(color));
                    }
                    None => empty += 1,
                }
            }

            if empty > 0 {
                fen.push(char::from_digit(empty, 10).unwrap_or('0'));
            }

            if rank != Rank::First {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push_str(&self.side_to_move().to_string());

        fen.push(' ');
        let rights = self.castle_rights();
        if rights == CastleRights::NONE {
            fen.push('-');
        } else {
            for (flag, c) in [
                (rights.short[Color::White], 'K'),
                (rights.long[Color::White], 'Q'),
                (rights.short[Color::Black], 'k'),
                (rights.long[Color::Black], 'q'),
            ] {
                if flag {
                    fen.push(c);
                }
            }
        }

        fen.push(' ');
        match self.en_passant() {
            Some(sq) => fen.push_str(&sq.to_string()),
            None => fen.push('-'),
        }

        fen.push_str(&format!(
            " {} {}",
            self.halfmove_clock(),
            self.fullmove_number()
        ));

        fen
    }
}

/*----------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_round_trip() {
        let tables = Tables::new();
        let board = Board::startpos(&tables);

        assert_eq!(
            board.to_fen(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
        );
        assert_eq!(board.king(Color::White), Square::E1);
        assert_eq!(board.hash(), board.calc_hash());
        assert!(!board.in_check());
    }

    #[test]
    fn parses_full_fen() {
        let tables = Tables::new();
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        let board = Board::from_fen(&tables, fen).unwrap();

        assert_eq!(board.to_fen(), fen);
        assert_eq!(board.piece_on(Square::E5), Some((Color::White, Piece::Knight)));
        assert_eq!(board.hash(), board.calc_hash());
    }

    #[test]
    fn en_passant_square() {
        let tables = Tables::new();
        let board = Board::from_fen(
            &tables,
            "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2",
        )
        .unwrap();

        assert_eq!(board.en_passant(), Some(Square::D6));
    }

    #[test]
    fn rejects_malformed() {
        let tables = Tables::new();

        assert!(Board::from_fen(&tables, "").is_err());
        assert!(Board::from_fen(&tables, "8/8/8/8/8/8/8/8 w - - 0 1").is_err());
        assert!(Board::from_fen(&tables, "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1").is_err());
        assert!(Board::from_fen(&tables, "rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").is_err());
    }

    #[test]
    fn rejects_too_many_ranks() {
        let tables = Tables::new();

        assert_eq!(
            Board::from_fen(&tables, "8/8/8/8/8/8/8/4k3/4K3 w - - 0 1"),
            Err(FenError::BadRank)
        );
    }
}
