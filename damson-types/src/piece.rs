use core::ops::{Index, IndexMut};
use core::fmt;
use crate::Color;

/*----------------------------------------------------------------*/

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Piece {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl Piece {
    #[inline]
    pub const fn index(i: usize) -> Piece {
        if i < Piece::COUNT {
            return unsafe { ::core::mem::transmute::<u8, Piece>(i as u8) };
        }
        panic!("Piece::index(): Index out of bounds");
    }

    #[inline]
    pub const fn try_index(i: usize) -> Option<Piece> {
        if i < Piece::COUNT {
            return Some(unsafe { ::core::mem::transmute::<u8, Piece>(i as u8) });
        }

        None
    }

    /*----------------------------------------------------------------*/

    /// Material value in centipawns. The king is worthless because it can
    /// never be captured or traded.
    #[inline]
    pub const fn value(self) -> i16 {
        match self {
            Piece::Pawn => 100,
            Piece::Knight => 300,
            Piece::Bishop => 350,
            Piece::Rook => 400,
            Piece::Queen => 900,
            Piece::King => 0,
        }
    }

    /*----------------------------------------------------------------*/

    pub const COUNT: usize = 6;
    pub const ALL: [Piece; Self::COUNT] = [
        Piece::Pawn,
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
        Piece::King,
    ];
}

impl<T> Index<Piece> for [T; Piece::COUNT] {
    type Output = T;

    #[inline]
    fn index(&self, piece: Piece) -> &Self::Output {
        unsafe { self.get_unchecked(piece as usize) }
    }
}

impl<T> IndexMut<Piece> for [T; Piece::COUNT] {
    #[inline]
    fn index_mut(&mut self, piece: Piece) -> &mut Self::Output {
        unsafe { self.get_unchecked_mut(piece as usize) }
    }
}

/*----------------------------------------------------------------*/

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PieceParseError;

impl TryFrom<char> for Piece {
    type Error = PieceParseError;

    #[inline]
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_lowercase() {
            'p' => Ok(Piece::Pawn),
            'n' => Ok(Piece::Knight),
            'b' => Ok(Piece::Bishop),
            'r' => Ok(Piece::Rook),
            'q' => Ok(Piece::Queen),
            'k' => Ok(Piece::King),
            _ => Err(PieceParseError),
        }
    }
}

impl Piece {
    #[inline]
    pub const fn to_char(self, color: Color) -> char {
        let c = match self {
            Piece::Pawn => 'p',
            Piece::Knight => 'n',
            Piece::Bishop => 'b',
            Piece::Rook => 'r',
            Piece::Queen => 'q',
            Piece::King => 'k',
        };

        match color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_char(Color::Black))
    }
}
