use crate::*;

/*----------------------------------------------------------------*/

/// Occupancy bits that can alter a bishop's attack set from `sq`. The board
/// edges never matter because the ray stops there regardless.
pub const fn bishop_relevant_blockers(sq: Square) -> Bitboard {
    Bitboard(bishop_rays(sq).0 & !Bitboard::EDGES.0)
}

/// Occupancy bits that can alter a rook's attack set from `sq`. The last
/// square of each ray is excluded per direction, so an edge rook still keeps
/// its own rank and file interior.
pub const fn rook_relevant_blockers(sq: Square) -> Bitboard {
    let rank_interior =
        sq.rank().bitboard().0 & !(File::A.bitboard().0 | File::H.bitboard().0);
    let file_interior =
        sq.file().bitboard().0 & !(Rank::First.bitboard().0 | Rank::Eighth.bitboard().0);

    Bitboard((rank_interior | file_interior) & !sq.bitboard().0)
}

/*----------------------------------------------------------------*/

const fn slider_moves_slow(sq: Square, mut blockers: Bitboard, deltas: &[(i8, i8); 4]) -> Bitboard {
    blockers.0 &= !sq.bitboard().0;

    let mut moves = Bitboard::EMPTY;
    let mut i = 0;

    while i < deltas.len() {
        let (dx, dy) = deltas[i];
        let mut sq = sq;

        while !blockers.has(sq) {
            if let Some(next) = sq.try_offset(dx, dy) {
                sq = next;
                moves.0 |= sq.bitboard().0;
            } else {
                break;
            }
        }

        i += 1;
    }

    moves
}

pub const fn bishop_moves_slow(sq: Square, blockers: Bitboard) -> Bitboard {
    slider_moves_slow(sq, blockers, &[(1, 1), (1, -1), (-1, -1), (-1, 1)])
}

pub const fn rook_moves_slow(sq: Square, blockers: Bitboard) -> Bitboard {
    slider_moves_slow(sq, blockers, &[(1, 0), (0, -1), (-1, 0), (0, 1)])
}

/*----------------------------------------------------------------*/

#[inline]
pub const fn bishop_rays(sq: Square) -> Bitboard {
    const TABLE: [Bitboard; Square::COUNT] = {
        let mut table = [Bitboard::EMPTY; Square::COUNT];
        let mut i = 0;

        while i < Square::COUNT {
            table[i] = bishop_moves_slow(Square::index(i), Bitboard::EMPTY);
            i += 1;
        }

        table
    };

    TABLE[sq as usize]
}

#[inline]
pub const fn rook_rays(sq: Square) -> Bitboard {
    const TABLE: [Bitboard; Square::COUNT] = {
        let mut table = [Bitboard::EMPTY; Square::COUNT];
        let mut i = 0;

        while i < Square::COUNT {
            table[i] = rook_moves_slow(Square::index(i), Bitboard::EMPTY);
            i += 1;
        }

        table
    };

    TABLE[sq as usize]
}

#[inline]
pub const fn queen_rays(sq: Square) -> Bitboard {
    Bitboard(rook_rays(sq).0 | bishop_rays(sq).0)
}

/*----------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn relevant_blockers_popcounts() {
        assert_eq!(rook_relevant_blockers(Square::A1).popcnt(), 12);
        assert_eq!(rook_relevant_blockers(Square::B2).popcnt(), 10);
        assert_eq!(rook_relevant_blockers(Square::E4).popcnt(), 10);
        assert_eq!(bishop_relevant_blockers(Square::A1).popcnt(), 6);
        assert_eq!(bishop_relevant_blockers(Square::D4).popcnt(), 9);
        assert_eq!(bishop_relevant_blockers(Square::C3).popcnt(), 7);
        assert_eq!(bishop_relevant_blockers(Square::B1).popcnt(), 5);
    }

    #[test]
    fn slow_moves_stop_at_blockers() {
        let blockers = Square::E6.bitboard() | Square::B4.bitboard();
        let rook = rook_moves_slow(Square::E4, blockers);

        assert!(rook.has(Square::E5));
        assert!(rook.has(Square::E6));
        assert!(!rook.has(Square::E7));
        assert!(rook.has(Square::B4));
        assert!(!rook.has(Square::A4));
        assert!(rook.has(Square::H4));
        assert!(rook.has(Square::E1));

        let bishop = bishop_moves_slow(Square::C1, Square::E3.bitboard());

        assert!(bishop.has(Square::D2));
        assert!(bishop.has(Square::E3));
        assert!(!bishop.has(Square::F4));
        assert!(bishop.has(Square::A3));
    }
}
