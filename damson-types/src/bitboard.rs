use core::{fmt, ops::*};
use crate::{Direction, File, Rank, Square};

/*----------------------------------------------------------------*/

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Bitboard(pub u64);

impl Bitboard {
    /// Shifts every set bit one step in `D`, dropping bits that would wrap
    /// around the board edge.
    #[inline(always)]
    pub const fn shift<D: Direction>(self) -> Bitboard {
        let masked = self.0 & file_shift_mask(D::DX);
        let amount = D::DX + 8 * D::DY;

        if amount > 0 {
            Bitboard(masked << amount)
        } else {
            Bitboard(masked >> -amount)
        }
    }

    /*----------------------------------------------------------------*/

    #[inline(always)]
    pub const fn next_square(self) -> Square {
        Square::index(self.0.trailing_zeros() as usize)
    }

    #[inline(always)]
    pub const fn try_next_square(self) -> Option<Square> {
        Square::try_index(self.0.trailing_zeros() as usize)
    }

    /*----------------------------------------------------------------*/

    #[inline(always)]
    pub const fn has(self, sq: Square) -> bool {
        self.0 & sq.bitboard().0 != 0
    }

    #[inline(always)]
    pub const fn overlaps(self, rhs: Bitboard) -> bool {
        self.0 & rhs.0 != 0
    }

    #[inline(always)]
    pub const fn popcnt(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline(always)]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline(always)]
    pub const fn exactly_one(self) -> bool {
        self.0 != 0 && self.0 & (self.0 - 1) == 0
    }

    /*----------------------------------------------------------------*/

    pub const EMPTY: Bitboard = Bitboard(0);
    pub const FULL: Bitboard = Bitboard(u64::MAX);

    pub const EDGES: Bitboard = Bitboard(0xFF818181818181FF);
}

/// Files that survive a horizontal shift by `dx` without wrapping.
#[inline(always)]
const fn file_shift_mask(dx: i8) -> u64 {
    0x101010101010101u64
        * if dx > 0 {
            0xFFu8 >> dx
        } else {
            0xFFu8 << -dx
        } as u64
}

/*----------------------------------------------------------------*/

impl From<u64> for Bitboard {
    #[inline(always)]
    fn from(value: u64) -> Self {
        Bitboard(value)
    }
}

impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &rank in Rank::ALL.iter().rev() {
            writeln!(f)?;

            for &file in &File::ALL {
                if self.has(Square::new(file, rank)) {
                    write!(f, " x")?;
                } else {
                    write!(f, " .")?;
                }
            }
        }

        Ok(())
    }
}

/*----------------------------------------------------------------*/

impl Not for Bitboard {
    type Output = Bitboard;

    #[inline(always)]
    fn not(self) -> Self::Output {
        Bitboard(!self.0)
    }
}

macro_rules! impl_bb_ops {
    ($($trait:ident, $fn:ident;)*) => {$(
        impl $trait<Bitboard> for Bitboard {
            type Output = Bitboard;

            #[inline(always)]
            fn $fn(self, rhs: Bitboard) -> Self::Output {
                Bitboard(self.0.$fn(rhs.0))
            }
        }

        impl $trait<u64> for Bitboard {
            type Output = Bitboard;

            #[inline(always)]
            fn $fn(self, rhs: u64) -> Self::Output {
                Bitboard(self.0.$fn(rhs))
            }
        }
    )*}
}

macro_rules! impl_bb_assign_ops {
    ($($trait:ident, $fn:ident;)*) => {$(
        impl $trait<Bitboard> for Bitboard {
            #[inline(always)]
            fn $fn(&mut self, rhs: Bitboard) {
                self.0.$fn(rhs.0);
            }
        }

        impl $trait<u64> for Bitboard {
            #[inline(always)]
            fn $fn(&mut self, rhs: u64) {
                self.0.$fn(rhs);
            }
        }
    )*}
}

impl_bb_ops! {
    BitAnd, bitand;
    BitOr, bitor;
    BitXor, bitxor;
}

impl_bb_assign_ops! {
    BitAndAssign, bitand_assign;
    BitOrAssign, bitor_assign;
    BitXorAssign, bitxor_assign;
}

/*----------------------------------------------------------------*/

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = BitboardIter;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        BitboardIter(self)
    }
}

pub struct BitboardIter(Bitboard);

impl Iterator for BitboardIter {
    type Item = Square;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        let sq = self.0.try_next_square();

        if let Some(sq) = sq {
            self.0 ^= sq.bitboard();
        }

        sq
    }
}

/*----------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn shifts_drop_wrapping_bits() {
        let h4 = Square::H4.bitboard();

        assert_eq!(h4.shift::<Right>(), Bitboard::EMPTY);
        assert_eq!(h4.shift::<Left>(), Square::G4.bitboard());
        assert_eq!(h4.shift::<Up>(), Square::H5.bitboard());
        assert_eq!(h4.shift::<UpRight>(), Bitboard::EMPTY);
        assert_eq!(h4.shift::<DownLeft>(), Square::G3.bitboard());

        let a1 = Square::A1.bitboard();

        assert_eq!(a1.shift::<Down>(), Bitboard::EMPTY);
        assert_eq!(a1.shift::<Left>(), Bitboard::EMPTY);
        assert_eq!(a1.shift::<UpRight>(), Square::B2.bitboard());
    }

    #[test]
    fn iteration_visits_each_bit_once() {
        let bb = Square::A1.bitboard() | Square::E4.bitboard() | Square::H8.bitboard();
        let squares = bb.into_iter().collect::<Vec<_>>();

        assert_eq!(squares, vec![Square::A1, Square::E4, Square::H8]);
        assert_eq!(bb.popcnt(), 3);
        assert!(!bb.exactly_one());
        assert!(Square::E4.bitboard().exactly_one());
    }
}
