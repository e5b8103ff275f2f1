use core::{fmt, ops::*};

use crate::MAX_PLY;

/*----------------------------------------------------------------*/

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Score(pub i32);

impl Score {
    /// Mating the opponent `ply` plies from the root; closer mates score
    /// higher.
    #[inline]
    pub const fn mate(ply: u16) -> Score {
        Score(Score::MATE.0 - ply as i32)
    }

    #[inline]
    pub const fn mated(ply: u16) -> Score {
        Score(-Score::MATE.0 + ply as i32)
    }

    /*----------------------------------------------------------------*/

    #[inline]
    pub const fn is_mate(self) -> bool {
        self.0.abs() >= Score::MATE_THRESHOLD.0
    }

    #[inline]
    pub fn mate_in(self) -> Option<i16> {
        if self.is_mate() {
            let plies = (Score::MATE.0 - self.0.abs()) as i16;

            return Some(self.0.signum() as i16 * plies);
        }

        None
    }

    #[inline]
    pub const fn abs(self) -> Score {
        Score(self.0.abs())
    }

    /*----------------------------------------------------------------*/

    pub const ZERO: Score = Score(0);
    pub const MATE: Score = Score(24000);
    pub const MATE_THRESHOLD: Score = Score(Score::MATE.0 - MAX_PLY as i32);
    pub const INFINITE: Score = Score(30000);
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(plies) = self.mate_in() {
            write!(f, "mate {}", (plies + plies.signum()) / 2)
        } else {
            write!(f, "cp {}", self.0)
        }
    }
}

/*----------------------------------------------------------------*/

impl Neg for Score {
    type Output = Score;

    #[inline]
    fn neg(self) -> Self::Output {
        Score(-self.0)
    }
}

macro_rules! impl_score_ops {
    ($($trait:ident, $fn:ident;)*) => {$(
        impl $trait<Score> for Score {
            type Output = Score;

            #[inline]
            fn $fn(self, rhs: Score) -> Self::Output {
                Score(self.0.$fn(rhs.0))
            }
        }

        impl $trait<i32> for Score {
            type Output = Score;

            #[inline]
            fn $fn(self, rhs: i32) -> Self::Output {
                Score(self.0.$fn(rhs))
            }
        }
    )*};
}

macro_rules! impl_score_assign_ops {
    ($($trait:ident, $fn:ident;)*) => {$(
        impl $trait<Score> for Score {
            #[inline]
            fn $fn(&mut self, rhs: Score) {
                self.0.$fn(rhs.0);
            }
        }

        impl $trait<i32> for Score {
            #[inline]
            fn $fn(&mut self, rhs: i32) {
                self.0.$fn(rhs);
            }
        }
    )*};
}

impl_score_ops! {
    Add, add;
    Sub, sub;
}

impl_score_assign_ops! {
    AddAssign, add_assign;
    SubAssign, sub_assign;
}

/*----------------------------------------------------------------*/

#[test]
fn test_score() {
    for ply in 0..MAX_PLY as u16 {
        let mate = Score::mate(ply);
        let mated = Score::mated(ply);

        assert!(mate.is_mate());
        assert!(mated.is_mate());
        assert_eq!(mate.mate_in().unwrap(), ply as i16);
        assert_eq!(mated.mate_in().unwrap(), -(ply as i16));
        assert!(Score::INFINITE > mate);
        assert!(-Score::INFINITE < mated);
    }

    assert!(!Score::ZERO.is_mate());
    assert_eq!(Score(42).to_string(), "cp 42");
    assert_eq!(Score::mate(1).to_string(), "mate 1");
    assert_eq!(Score::mate(4).to_string(), "mate 2");
    assert_eq!(Score::mated(2).to_string(), "mate -1");
}
