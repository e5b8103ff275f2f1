use crate::*;

/*----------------------------------------------------------------*/

#[inline]
pub const fn knight_attacks(sq: Square) -> Bitboard {
    const TABLE: [Bitboard; Square::COUNT] = {
        let mut table = [Bitboard::EMPTY; Square::COUNT];
        let mut i = 0;

        while i < Square::COUNT {
            let sq = Square::index(i).bitboard();

            table[i] = Bitboard(
                sq.shift::<Up>().shift::<UpLeft>().0
                    | sq.shift::<Up>().shift::<UpRight>().0
                    | sq.shift::<Right>().shift::<UpRight>().0
                    | sq.shift::<Right>().shift::<DownRight>().0
                    | sq.shift::<Down>().shift::<DownRight>().0
                    | sq.shift::<Down>().shift::<DownLeft>().0
                    | sq.shift::<Left>().shift::<DownLeft>().0
                    | sq.shift::<Left>().shift::<UpLeft>().0,
            );

            i += 1;
        }

        table
    };

    TABLE[sq as usize]
}

#[inline]
pub const fn king_attacks(sq: Square) -> Bitboard {
    const TABLE: [Bitboard; Square::COUNT] = {
        let mut table = [Bitboard::EMPTY; Square::COUNT];
        let mut i = 0;

        while i < Square::COUNT {
            let sq = Square::index(i).bitboard();

            table[i] = Bitboard(
                sq.shift::<Up>().0
                    | sq.shift::<Down>().0
                    | sq.shift::<Left>().0
                    | sq.shift::<Right>().0
                    | sq.shift::<UpLeft>().0
                    | sq.shift::<UpRight>().0
                    | sq.shift::<DownLeft>().0
                    | sq.shift::<DownRight>().0,
            );

            i += 1;
        }

        table
    };

    TABLE[sq as usize]
}

/// Squares a pawn of `color` on `sq` attacks. The reverse lookup (which
/// pawns attack `sq`) is the same table with the colors swapped.
#[inline]
pub const fn pawn_attacks(sq: Square, color: Color) -> Bitboard {
    const TABLE: [[Bitboard; Square::COUNT]; Color::COUNT] = {
        let mut table = [[Bitboard::EMPTY; Square::COUNT]; Color::COUNT];
        let mut i = 0;

        while i < Square::COUNT {
            let sq = Square::index(i).bitboard();

            table[Color::White as usize][i] =
                Bitboard(sq.shift::<UpLeft>().0 | sq.shift::<UpRight>().0);
            table[Color::Black as usize][i] =
                Bitboard(sq.shift::<DownLeft>().0 | sq.shift::<DownRight>().0);

            i += 1;
        }

        table
    };

    TABLE[color as usize][sq as usize]
}

/*----------------------------------------------------------------*/

/// Squares strictly between two aligned squares; empty when they do not
/// share a rank, file, or diagonal.
#[inline]
pub fn between(a: Square, b: Square) -> Bitboard {
    static TABLE: [[Bitboard; Square::COUNT]; Square::COUNT] = {
        let mut table = [[Bitboard::EMPTY; Square::COUNT]; Square::COUNT];
        let mut i = 0;

        while i < Square::COUNT {
            let a = Square::index(i);
            let mut j = 0;

            while j < Square::COUNT {
                let b = Square::index(j);

                if rook_rays(a).has(b) {
                    table[i][j] = Bitboard(
                        rook_moves_slow(a, b.bitboard()).0 & rook_moves_slow(b, a.bitboard()).0,
                    );
                } else if bishop_rays(a).has(b) {
                    table[i][j] = Bitboard(
                        bishop_moves_slow(a, b.bitboard()).0 & bishop_moves_slow(b, a.bitboard()).0,
                    );
                }

                j += 1;
            }

            i += 1;
        }

        table
    };

    TABLE[a as usize][b as usize]
}

/// The full line through two aligned squares, both endpoints included;
/// empty when they are not aligned.
#[inline]
pub fn line(a: Square, b: Square) -> Bitboard {
    static TABLE: [[Bitboard; Square::COUNT]; Square::COUNT] = {
        let mut table = [[Bitboard::EMPTY; Square::COUNT]; Square::COUNT];
        let mut i = 0;

        while i < Square::COUNT {
            let a = Square::index(i);
            let mut j = 0;

            while j < Square::COUNT {
                let b = Square::index(j);

                if rook_rays(a).has(b) {
                    table[i][j] = Bitboard(
                        (rook_rays(a).0 & rook_rays(b).0) | a.bitboard().0 | b.bitboard().0,
                    );
                } else if bishop_rays(a).has(b) {
                    table[i][j] = Bitboard(
                        (bishop_rays(a).0 & bishop_rays(b).0) | a.bitboard().0 | b.bitboard().0,
                    );
                }

                j += 1;
            }

            i += 1;
        }

        table
    };

    TABLE[a as usize][b as usize]
}

/*----------------------------------------------------------------*/

// Multipliers discovered offline by randomized search; each maps every
// blocker subset of its square's relevant mask to a distinct table slot.
#[rustfmt::skip]
const ROOK_MAGICS: [u64; Square::COUNT] = [
    0x0080008040001120, 0x0040004410002000, 0x4480085000802004, 0x4080048008001000,
    0x1A00080201201084, 0x0200090200100844, 0x2080048051000600, 0x0A0000408400A512,
    0x2000800220C01080, 0x0186400420035002, 0x00850011C1006002, 0x0701801002880081,
    0x4000800800828400, 0x4800808084000200, 0x0081008100060004, 0x0085000051000482,
    0x0801208000804000, 0x0100820021004200, 0x0008220052008040, 0x2000120009420020,
    0x0011010048000490, 0x0042008044008002, 0x3000010100020004, 0xC0110200009C0141,
    0x0001800080204000, 0x08045001C0002008, 0x2005410100102004, 0x8940082100100300,
    0x2008040080080080, 0x00000C0801201040, 0x0000040101000200, 0x4912942200044089,
    0x0450400021800088, 0x1080412008401000, 0x000241001B002000, 0x0122080082801000,
    0x0180800C01800800, 0x8224800200800400, 0x1400020001010004, 0x0001000445000082,
    0x2480002009424001, 0x0AC008100120A000, 0x3001002001110041, 0x01004049A2020010,
    0x0018002040140400, 0x2002004410420009, 0x1881000A00010004, 0x0101004100820004,
    0x8080800040002180, 0x0100310040058100, 0x0060002880100080, 0x5810080084100180,
    0x0880080004008280, 0x0000240080120080, 0x0108100806010400, 0x80A180034B000080,
    0x4085044020108005, 0x302100A080400A31, 0x102042200A001082, 0x0312210004081001,
    0x00220020084410C6, 0x4A2700080C002205, 0x4102002804008102, 0x0840005024008102,
];

#[rustfmt::skip]
const BISHOP_MAGICS: [u64; Square::COUNT] = [
    0x0020081001024210, 0x8010900480838409, 0x0012080201221100, 0x04844102A0023004,
    0x180202100005E801, 0x0244900420009000, 0x20218808080C0804, 0x4003040202020200,
    0x10000C2028112102, 0x0010300148050452, 0xA1000C010C010200, 0x80C8040502091040,
    0x9000041460081020, 0x4600108220200504, 0x30022104420A4100, 0x003204A407045080,
    0x0822C00820010220, 0x0260000484808608, 0x0008021B00410200, 0x000200602A004000,
    0x40010028200828C0, 0x012080010080C020, 0x4402001401820800, 0x0002400600420800,
    0x1010400010020208, 0x0530250808080080, 0x22008800100120A6, 0x400340400C010200,
    0x000A002082008051, 0x0441020010405010, 0x08060C08408C1100, 0x8024102025091100,
    0x0196424000101128, 0x00040402010C3004, 0x8000282800500080, 0x0100040400080120,
    0x0008146400804100, 0x00E1004602010100, 0x0004044041040104, 0x8000820148220101,
    0x0882080554004000, 0x0054210908005018, 0x1031031082011000, 0x00C4002024208806,
    0x1210401048800500, 0x10420850110028A0, 0x2042A40102010410, 0x00100120C4828300,
    0x0018440208410001, 0x0444840508230600, 0x9000A08401884000, 0x80101810840C00C0,
    0x0001442012049000, 0x000A410408048000, 0x8108200420820010, 0x0082100E008100A0,
    0x0402021202020200, 0x008600D108080242, 0x1204408046009000, 0x8010008000618800,
    0x008C040008210100, 0xE428082004291200, 0x000040840802004E, 0x3020091002008021,
];

/*----------------------------------------------------------------*/

#[derive(Debug, Copy, Clone)]
struct MagicEntry {
    mask: Bitboard,
    magic: u64,
    shift: u32,
    offset: u32,
}

impl MagicEntry {
    #[inline(always)]
    fn index(&self, occ: Bitboard) -> usize {
        self.offset as usize + (((occ & self.mask).0.wrapping_mul(self.magic)) >> self.shift) as usize
    }
}

/// Precomputed slider attack tables, built once and owned by the engine so
/// instances stay independent of each other.
pub struct Tables {
    rook_entries: [MagicEntry; Square::COUNT],
    bishop_entries: [MagicEntry; Square::COUNT],
    rook_attacks: Box<[Bitboard]>,
    bishop_attacks: Box<[Bitboard]>,
}

impl Tables {
    pub fn new() -> Tables {
        let (rook_entries, rook_attacks) =
            build_tables(&ROOK_MAGICS, rook_relevant_blockers, rook_moves_slow);
        let (bishop_entries, bishop_attacks) =
            build_tables(&BISHOP_MAGICS, bishop_relevant_blockers, bishop_moves_slow);

        Tables {
            rook_entries,
            bishop_entries,
            rook_attacks,
            bishop_attacks,
        }
    }

    /*----------------------------------------------------------------*/

    #[inline(always)]
    pub fn rook_moves(&self, sq: Square, occ: Bitboard) -> Bitboard {
        self.rook_attacks[self.rook_entries[sq as usize].index(occ)]
    }

    #[inline(always)]
    pub fn bishop_moves(&self, sq: Square, occ: Bitboard) -> Bitboard {
        self.bishop_attacks[self.bishop_entries[sq as usize].index(occ)]
    }

    #[inline(always)]
    pub fn queen_moves(&self, sq: Square, occ: Bitboard) -> Bitboard {
        self.rook_moves(sq, occ) | self.bishop_moves(sq, occ)
    }

    #[inline]
    pub fn piece_moves(&self, piece: Piece, sq: Square, occ: Bitboard) -> Bitboard {
        match piece {
            Piece::Knight => knight_attacks(sq),
            Piece::Bishop => self.bishop_moves(sq, occ),
            Piece::Rook => self.rook_moves(sq, occ),
            Piece::Queen => self.queen_moves(sq, occ),
            Piece::King => king_attacks(sq),
            Piece::Pawn => Bitboard::EMPTY,
        }
    }
}

impl Default for Tables {
    fn default() -> Tables {
        Tables::new()
    }
}

/*----------------------------------------------------------------*/

/// Distributes the low bits of `index` onto the set bits of `mask`, low bit
/// first, enumerating every blocker subset as `index` counts up.
fn scatter(mut index: u64, mut mask: Bitboard) -> Bitboard {
    let mut scattered = Bitboard::EMPTY;

    while !mask.is_empty() {
        let bit = mask.0 & mask.0.wrapping_neg();

        if index & 1 != 0 {
            scattered |= bit;
        }

        index >>= 1;
        mask ^= bit;
    }

    scattered
}

fn build_tables(
    magics: &[u64; Square::COUNT],
    relevant: fn(Square) -> Bitboard,
    moves_slow: fn(Square, Bitboard) -> Bitboard,
) -> ([MagicEntry; Square::COUNT], Box<[Bitboard]>) {
    let mut entries = [MagicEntry {
        mask: Bitboard::EMPTY,
        magic: 0,
        shift: 0,
        offset: 0,
    }; Square::COUNT];
    let mut attacks = Vec::new();

    for &sq in &Square::ALL {
        let mask = relevant(sq);
        let bits = mask.popcnt() as u32;
        let offset = attacks.len() as u32;

        entries[sq as usize] = MagicEntry {
            mask,
            magic: magics[sq as usize],
            shift: Square::COUNT as u32 - bits,
            offset,
        };

        attacks.resize(attacks.len() + (1 << bits), Bitboard::EMPTY);
        for index in 0..1u64 << bits {
            let blockers = scatter(index, mask);
            let slot = entries[sq as usize].index(blockers);

            debug_assert!(
                attacks[slot].is_empty() || attacks[slot] == moves_slow(sq, blockers),
                "magic collision on {sq}"
            );
            attacks[slot] = moves_slow(sq, blockers);
        }
    }

    (entries, attacks.into_boxed_slice())
}

/*----------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn magic_lookups_match_ray_walks() {
        let tables = Tables::new();
        let occs = [
            Bitboard::EMPTY,
            Bitboard(0x00FF00000000FF00),
            Bitboard(0x0000001818000000),
            Bitboard(0x55AA55AA55AA55AA),
            Bitboard::FULL,
        ];

        for &sq in &Square::ALL {
            for &occ in &occs {
                assert_eq!(tables.rook_moves(sq, occ), rook_moves_slow(sq, occ));
                assert_eq!(tables.bishop_moves(sq, occ), bishop_moves_slow(sq, occ));
            }
        }
    }

    #[test]
    fn leaper_tables() {
        assert_eq!(knight_attacks(Square::A1), Square::B3.bitboard() | Square::C2.bitboard());
        assert_eq!(knight_attacks(Square::D4).popcnt(), 8);
        assert_eq!(king_attacks(Square::A1).popcnt(), 3);
        assert_eq!(king_attacks(Square::E4).popcnt(), 8);
        assert_eq!(
            pawn_attacks(Square::E4, Color::White),
            Square::D5.bitboard() | Square::F5.bitboard()
        );
        assert_eq!(pawn_attacks(Square::A2, Color::Black), Square::B1.bitboard());
    }

    #[test]
    fn between_and_line() {
        assert_eq!(
            between(Square::A1, Square::D4),
            Square::B2.bitboard() | Square::C3.bitboard()
        );
        assert_eq!(between(Square::E1, Square::E3), Square::E2.bitboard());
        assert_eq!(between(Square::A1, Square::B3), Bitboard::EMPTY);
        assert!(line(Square::A1, Square::H8).has(Square::D4));
        assert!(line(Square::E1, Square::E8).has(Square::E5));
        assert_eq!(line(Square::A1, Square::C2), Bitboard::EMPTY);
    }
}
