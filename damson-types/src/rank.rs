use core::{fmt, str::FromStr};
use crate::{Bitboard, Color};

/*----------------------------------------------------------------*/

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    First,
    Second,
    Third,
    Fourth,
    Fifth,
    Sixth,
    Seventh,
    Eighth,
}

impl Rank {
    #[inline]
    pub const fn index(i: usize) -> Rank {
        if i < Rank::COUNT {
            return unsafe { ::core::mem::transmute::<u8, Rank>(i as u8) };
        }

        panic!("Rank::index(): Index out of bounds");
    }

    #[inline]
    pub const fn try_index(i: usize) -> Option<Rank> {
        if i < Rank::COUNT {
            return Some(unsafe { ::core::mem::transmute::<u8, Rank>(i as u8) });
        }

        None
    }

    /*----------------------------------------------------------------*/

    #[inline]
    pub const fn try_offset(self, dy: i8) -> Option<Rank> {
        let i = self as i8 + dy;

        if i < 0 || i >= Rank::COUNT as i8 {
            return None;
        }

        Rank::try_index(i as usize)
    }

    #[inline]
    pub const fn flip(self) -> Rank {
        Rank::index(Rank::Eighth as usize - self as usize)
    }

    #[inline]
    pub const fn relative_to(self, color: Color) -> Rank {
        match color {
            Color::White => self,
            Color::Black => self.flip(),
        }
    }

    /*----------------------------------------------------------------*/

    #[inline]
    pub const fn bitboard(self) -> Bitboard {
        Bitboard(0xFF << (8 * self as u8))
    }

    /*----------------------------------------------------------------*/

    pub const COUNT: usize = 8;
    pub const ALL: [Rank; Self::COUNT] = [
        Rank::First,
        Rank::Second,
        Rank::Third,
        Rank::Fourth,
        Rank::Fifth,
        Rank::Sixth,
        Rank::Seventh,
        Rank::Eighth,
    ];
}

impl fmt::Display for Rank {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", char::from(*self))
    }
}

/*----------------------------------------------------------------*/

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct RankParseError;

impl From<Rank> for char {
    #[inline]
    fn from(r: Rank) -> char {
        (b'1' + r as u8) as char
    }
}

impl TryFrom<char> for Rank {
    type Error = RankParseError;

    #[inline]
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '1'..='8' => Ok(Rank::index(c as usize - '1' as usize)),
            _ => Err(RankParseError),
        }
    }
}

impl FromStr for Rank {
    type Err = RankParseError;

    #[inline]
    fn from_str(s: &str) -> Result<Rank, RankParseError> {
        let mut chars = s.chars();
        let c = chars.next().ok_or(RankParseError)?;

        if chars.next().is_none() {
            c.try_into()
        } else {
            Err(RankParseError)
        }
    }
}

/*----------------------------------------------------------------*/

#[test]
fn validate_rank() {
    assert_eq!(Rank::index(0), Rank::First);
    assert_eq!(Rank::First.bitboard(), Bitboard(0xFF));
    assert_eq!(Rank::First.try_offset(-1), None);
    assert_eq!(Rank::First.try_offset(1), Some(Rank::Second));
    assert_eq!(Rank::Seventh.bitboard(), Bitboard(0xFF000000000000));
    assert_eq!(Rank::Seventh.relative_to(Color::Black), Rank::Second);
    assert_eq!(Rank::Eighth.try_offset(1), None);
    assert_eq!(Rank::Eighth.flip(), Rank::First);
}
