use crate::*;

/*----------------------------------------------------------------*/

const START_MATERIAL: i32 = Piece::Queen.value() as i32
    + Piece::Rook.value() as i32 * 2
    + Piece::Bishop.value() as i32 * 2
    + Piece::Knight.value() as i32 * 2
    + Piece::Pawn.value() as i32 * 8;

const ISOLATED_PAWN_PENALTY: i32 = 50;
const PASSED_PAWN_BONUS: [i32; Rank::COUNT] = [0, 0, 10, 20, 40, 60, 80, 0];

/*----------------------------------------------------------------*/

// Piece-square tables, written from the mover's point of view with the
// eighth rank on top. Indexed by sq.relative_to(color).flip_rank().

#[rustfmt::skip]
const PAWN_TABLE: [i32; Square::COUNT] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    50, 50, 50, 50, 50, 50, 50, 50,
    10, 10, 20, 30, 30, 20, 10, 10,
     5,  5, 10, 25, 25, 10,  5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5, -5,-10,  0,  0,-10, -5,  5,
     5, 10, 10,-20,-20, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_TABLE: [i32; Square::COUNT] = [
    -50,-40,-30,-30,-30,-30,-40,-50,
    -40,-20,  0,  0,  0,  0,-20,-40,
    -30,  0, 10, 15, 15, 10,  0,-30,
    -30,  5, 15, 20, 20, 15,  5,-30,
    -30,  0, 15, 20, 20, 15,  0,-30,
    -30,  5, 10, 15, 15, 10,  5,-30,
    -40,-20,  0,  5,  5,  0,-20,-40,
    -50,-40,-30,-30,-30,-30,-40,-50,
];

#[rustfmt::skip]
const BISHOP_TABLE: [i32; Square::COUNT] = [
    -20,-10,-10,-10,-10,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5, 10, 10,  5,  0,-10,
    -10,  5,  5, 10, 10,  5,  5,-10,
    -10,  0, 10, 10, 10, 10,  0,-10,
    -10, 10, 10, 10, 10, 10, 10,-10,
    -10,  5,  0,  0,  0,  0,  5,-10,
    -20,-10,-10,-10,-10,-10,-10,-20,
];

#[rustfmt::skip]
const ROOK_TABLE: [i32; Square::COUNT] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10, 10, 10, 10, 10,  5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     0,  0,  0,  5,  5,  0,  0,  0,
];

#[rustfmt::skip]
const QUEEN_TABLE: [i32; Square::COUNT] = [
    -20,-10,-10, -5, -5,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5,  5,  5,  5,  0,-10,
     -5,  0,  5,  5,  5,  5,  0, -5,
      0,  0,  5,  5,  5,  5,  0, -5,
    -10,  5,  5,  5,  5,  5,  0,-10,
    -10,  0,  5,  0,  0,  0,  0,-10,
    -20,-10,-10, -5, -5,-10,-10,-20,
];

#[rustfmt::skip]
const KING_MIDGAME_TABLE: [i32; Square::COUNT] = [
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -20,-30,-30,-40,-40,-30,-30,-20,
    -10,-20,-20,-20,-20,-20,-20,-10,
     20, 20,  0,  0,  0,  0, 20, 20,
     20, 30, 10,  0,  0, 10, 30, 20,
];

#[rustfmt::skip]
const KING_ENDGAME_TABLE: [i32; Square::COUNT] = [
    -50,-40,-30,-20,-20,-30,-40,-50,
    -30,-20,-10,  0,  0,-10,-20,-30,
    -30,-10, 20, 30, 30, 20,-10,-30,
    -30,-10, 30, 40, 40, 30,-10,-30,
    -30,-10, 30, 40, 40, 30,-10,-30,
    -30,-10, 20, 30, 30, 20,-10,-30,
    -30,-20,-10,  0,  0,-10,-20,-30,
    -50,-30,-30,-30,-30,-30,-50,-50,
];

const fn table_for(piece: Piece, endgame: bool) -> &'static [i32; Square::COUNT] {
    match piece {
        Piece::Pawn => &PAWN_TABLE,
        Piece::Knight => &KNIGHT_TABLE,
        Piece::Bishop => &BISHOP_TABLE,
        Piece::Rook => &ROOK_TABLE,
        Piece::Queen => &QUEEN_TABLE,
        Piece::King => {
            if endgame {
                &KING_ENDGAME_TABLE
            } else {
                &KING_MIDGAME_TABLE
            }
        }
    }
}

/*----------------------------------------------------------------*/

/// 0.0 at full material, 1.0 towards bare kings. The blend starts moving
/// once the combined material drops below one army's worth.
fn endgame_weight(total_material: i32) -> f32 {
    (1.0 - total_material as f32 / START_MATERIAL as f32).max(0.0)
}

fn forward_ranks(color: Color, rank: Rank) -> Bitboard {
    match color {
        Color::White => Bitboard(u64::MAX << (8 * (rank as usize + 1))),
        Color::Black => Bitboard(u64::MAX >> (8 * (8 - rank as usize))),
    }
}

fn passed_pawn_mask(color: Color, sq: Square) -> Bitboard {
    (sq.file().bitboard() | sq.file().adjacent()) & forward_ranks(color, sq.rank())
}

/*----------------------------------------------------------------*/

/// Static evaluation from the side to move's point of view: tapered
/// material and piece placement plus pawn structure.
pub fn evaluate(board: &Board) -> Score {
    let mut material = [0i32; Color::COUNT];
    let mut position = [0i32; Color::COUNT];
    let mut pawns = [0i32; Color::COUNT];

    for &color in &Color::ALL {
        for &piece in &Piece::ALL {
            material[color] +=
                piece.value() as i32 * board.colored_pieces(color, piece).popcnt() as i32;
        }
    }

    let weight = endgame_weight(material[Color::White] + material[Color::Black]);

    /*----------------------------------------------------------------*/

    for &color in &Color::ALL {
        for &piece in &Piece::ALL {
            for sq in board.colored_pieces(color, piece) {
                let idx = sq.relative_to(color).flip_rank();
                let mg = table_for(piece, false)[idx] as f32;
                let eg = table_for(piece, true)[idx] as f32;

                position[color] += (mg + (eg - mg) * weight) as i32;
            }
        }
    }

    /*----------------------------------------------------------------*/

    for &color in &Color::ALL {
        let our_pawns = board.colored_pieces(color, Piece::Pawn);
        let their_pawns = board.colored_pieces(!color, Piece::Pawn);

        for sq in our_pawns {
            if (their_pawns & passed_pawn_mask(color, sq)).is_empty() {
                pawns[color] += PASSED_PAWN_BONUS[sq.relative_to(color).rank() as usize];
            }

            if (our_pawns & sq.file().adjacent()).is_empty() {
                pawns[color] -= ISOLATED_PAWN_PENALTY;
            }
        }
    }

    /*----------------------------------------------------------------*/

    let us = board.side_to_move();
    let score = |c: Color| material[c] + position[c] + pawns[c];

    Score(score(us) - score(!us))
}

/*----------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_is_balanced() {
        let tables = Tables::new();
        let board = Board::startpos(&tables);

        assert_eq!(evaluate(&board), Score::ZERO);
    }

    #[test]
    fn evaluation_is_symmetric() {
        let tables = Tables::new();
        let fen_w = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
        let fen_b = "rnbqkb1r/pppp1ppp/5n2/4p3/4P3/2N5/PPPP1PPP/R1BQKBNR b KQkq - 2 3";

        let white = Board::from_fen(&tables, fen_w).unwrap();
        let black = Board::from_fen(&tables, fen_b).unwrap();

        assert_eq!(evaluate(&white), evaluate(&black));
    }

    #[test]
    fn material_advantage_shows() {
        let tables = Tables::new();
        let board = Board::from_fen(&tables, "4k3/8/8/8/8/8/8/Q3K3 w - - 0 1").unwrap();

        assert!(evaluate(&board) > Score(500));

        let board = Board::from_fen(&tables, "4k3/8/8/8/8/8/8/Q3K3 b - - 0 1").unwrap();

        assert!(evaluate(&board) < Score(-500));
    }

    #[test]
    fn passed_pawn_outranks_isolated() {
        let tables = Tables::new();

        // A far-advanced passer, isolated on both sides.
        let passer = Board::from_fen(&tables, "4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let base = evaluate(&passer);

        let board = Board::from_fen(&tables, "4k3/2P5/8/8/8/8/8/4K3 w - - 0 1").unwrap();

        assert!(evaluate(&board) - base > Score(100));
    }

    #[test]
    fn pawn_mask_shapes() {
        assert_eq!(
            passed_pawn_mask(Color::White, Square::B2)
                & (Square::A3.bitboard() | Square::B3.bitboard() | Square::C3.bitboard()),
            Square::A3.bitboard() | Square::B3.bitboard() | Square::C3.bitboard()
        );
        assert!(passed_pawn_mask(Color::White, Square::B2).has(Square::C7));
        assert!(!passed_pawn_mask(Color::White, Square::B2).has(Square::B2));
        assert!(passed_pawn_mask(Color::Black, Square::B7).has(Square::B6));
        assert!(!passed_pawn_mask(Color::Black, Square::B7).has(Square::B8));
    }
}
