use crate::*;

/*----------------------------------------------------------------*/

struct Xorshift64(u64);

impl Xorshift64 {
    const fn new(seed: u64) -> Xorshift64 {
        Xorshift64(seed)
    }

    const fn next(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }
}

/*----------------------------------------------------------------*/

/// Random codes xored together into a position fingerprint. Generated at
/// compile time from a fixed seed so hashes are stable across runs.
pub struct Zobrist {
    pieces: [[[u64; Square::COUNT]; Piece::COUNT]; Color::COUNT],
    castle_rights: [u64; 16],
    en_passant: [u64; File::COUNT],
    side_to_move: u64,
}

pub const ZOBRIST: Zobrist = {
    let mut rng = Xorshift64::new(0x9E3779B97F4A7C15);
    let mut zobrist = Zobrist {
        pieces: [[[0; Square::COUNT]; Piece::COUNT]; Color::COUNT],
        castle_rights: [0; 16],
        en_passant: [0; File::COUNT],
        side_to_move: 0,
    };

    let mut color = 0;
    while color < Color::COUNT {
        let mut piece = 0;
        while piece < Piece::COUNT {
            let mut sq = 0;
            while sq < Square::COUNT {
                zobrist.pieces[color][piece][sq] = rng.next();
                sq += 1;
            }

            piece += 1;
        }

        color += 1;
    }

    let mut rights = 0;
    while rights < 16 {
        zobrist.castle_rights[rights] = rng.next();
        rights += 1;
    }

    let mut file = 0;
    while file < File::COUNT {
        zobrist.en_passant[file] = rng.next();
        file += 1;
    }

    zobrist.side_to_move = rng.next();
    zobrist
};

impl Zobrist {
    #[inline(always)]
    pub const fn piece(&self, color: Color, piece: Piece, sq: Square) -> u64 {
        self.pieces[color as usize][piece as usize][sq as usize]
    }

    /// One code per combination of the four castling-right bits, so any
    /// rights change alters the hash.
    #[inline(always)]
    pub const fn castle_rights(&self, packed: u8) -> u64 {
        self.castle_rights[packed as usize & 0xF]
    }

    #[inline(always)]
    pub const fn en_passant(&self, file: File) -> u64 {
        self.en_passant[file as usize]
    }

    #[inline(always)]
    pub const fn side_to_move(&self) -> u64 {
        self.side_to_move
    }
}

/*----------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn codes_are_distinct_and_stable() {
        let a = ZOBRIST.piece(Color::White, Piece::Pawn, Square::E2);
        let b = ZOBRIST.piece(Color::Black, Piece::Pawn, Square::E2);
        let c = ZOBRIST.piece(Color::White, Piece::Knight, Square::E2);

        assert_ne!(a, 0);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(ZOBRIST.side_to_move(), 0);
        assert_ne!(ZOBRIST.castle_rights(0), ZOBRIST.castle_rights(0xF));
        assert_ne!(ZOBRIST.en_passant(File::A), ZOBRIST.en_passant(File::H));
    }
}
