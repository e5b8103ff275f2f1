use core::{fmt, str::FromStr};
use core::ops::{Index, IndexMut};
use crate::{Bitboard, Color, File, Rank};

/*----------------------------------------------------------------*/

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[rustfmt::skip]
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
}

impl Square {
    #[inline]
    pub const fn new(file: File, rank: Rank) -> Square {
        Square::index(((rank as usize) << 3) | file as usize)
    }

    #[inline]
    pub const fn index(i: usize) -> Square {
        if i < Square::COUNT {
            return unsafe { ::core::mem::transmute::<u8, Square>(i as u8) };
        }

        panic!("Square::index(): Index out of bounds");
    }

    #[inline]
    pub const fn try_index(i: usize) -> Option<Square> {
        if i < Square::COUNT {
            return Some(unsafe { ::core::mem::transmute::<u8, Square>(i as u8) });
        }

        None
    }

    /*----------------------------------------------------------------*/

    #[inline]
    pub const fn try_offset(self, dx: i8, dy: i8) -> Option<Square> {
        let i = self.file() as i8 + dx;
        let j = self.rank() as i8 + dy;

        if i < 0 || i >= File::COUNT as i8 {
            return None;
        }

        if j < 0 || j >= Rank::COUNT as i8 {
            return None;
        }

        Some(Square::new(File::index(i as usize), Rank::index(j as usize)))
    }

    /*----------------------------------------------------------------*/

    #[inline]
    pub const fn flip_rank(self) -> Square {
        Square::index(self as usize ^ 56)
    }

    #[inline]
    pub const fn relative_to(self, color: Color) -> Square {
        match color {
            Color::White => self,
            Color::Black => self.flip_rank(),
        }
    }

    /*----------------------------------------------------------------*/

    #[inline]
    pub const fn file(self) -> File {
        File::index(self as usize & 7)
    }

    #[inline]
    pub const fn rank(self) -> Rank {
        Rank::index(self as usize >> 3)
    }

    #[inline]
    pub const fn bitboard(self) -> Bitboard {
        Bitboard(1u64 << self as u8)
    }

    /*----------------------------------------------------------------*/

    pub const COUNT: usize = 64;
    #[rustfmt::skip]
    pub const ALL: [Square; Self::COUNT] = {
        let mut all = [Square::A1; Self::COUNT];
        let mut i = 0;

        while i < Self::COUNT {
            all[i] = Square::index(i);
            i += 1;
        }

        all
    };
}

impl<T> Index<Square> for [T; Square::COUNT] {
    type Output = T;

    #[inline]
    fn index(&self, sq: Square) -> &Self::Output {
        unsafe { self.get_unchecked(sq as usize) }
    }
}

impl<T> IndexMut<Square> for [T; Square::COUNT] {
    #[inline]
    fn index_mut(&mut self, sq: Square) -> &mut Self::Output {
        unsafe { self.get_unchecked_mut(sq as usize) }
    }
}

/*----------------------------------------------------------------*/

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SquareParseError {
    InvalidFile,
    InvalidRank,
}

impl FromStr for Square {
    type Err = SquareParseError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let file = chars
            .next()
            .and_then(|c| File::try_from(c).ok())
            .ok_or(SquareParseError::InvalidFile)?;
        let rank = chars
            .next()
            .and_then(|c| Rank::try_from(c).ok())
            .ok_or(SquareParseError::InvalidRank)?;

        Ok(Square::new(file, rank))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

/*----------------------------------------------------------------*/

#[test]
fn validate_square() {
    let a1 = Square::A1;

    assert_eq!(Square::index(0), a1);
    assert_eq!(a1.bitboard(), Bitboard(0x1));
    assert_eq!(a1.try_offset(-1, 0), None);
    assert_eq!(a1.try_offset(1, 0), Some(Square::B1));
    assert_eq!(a1.try_offset(0, 1), Some(Square::A2));

    let e4 = Square::E4;

    assert_eq!(Square::index(28), e4);
    assert_eq!(e4.bitboard(), Bitboard(0x10000000));
    assert_eq!(e4.file(), File::E);
    assert_eq!(e4.rank(), Rank::Fourth);
    assert_eq!(e4.try_offset(1, 1), Some(Square::F5));
    assert_eq!(e4.flip_rank(), Square::E5);
    assert_eq!(e4.relative_to(Color::Black), Square::E5);

    let h8 = Square::H8;

    assert_eq!(Square::index(63), h8);
    assert_eq!(h8.bitboard(), Bitboard(0x8000000000000000));
    assert_eq!(h8.try_offset(1, 0), None);
    assert_eq!(h8.try_offset(0, 1), None);
    assert_eq!("h8".parse::<Square>(), Ok(h8));
    assert_eq!("i9".parse::<Square>(), Err(SquareParseError::InvalidFile));
}
