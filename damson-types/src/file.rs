use core::{fmt, str::FromStr};
use crate::Bitboard;

/*----------------------------------------------------------------*/

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum File {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl File {
    #[inline]
    pub const fn index(i: usize) -> File {
        if i < File::COUNT {
            return unsafe { ::core::mem::transmute::<u8, File>(i as u8) };
        }

        panic!("File::index(): Index out of bounds");
    }

    #[inline]
    pub const fn try_index(i: usize) -> Option<File> {
        if i < File::COUNT {
            return Some(unsafe { ::core::mem::transmute::<u8, File>(i as u8) });
        }

        None
    }

    /*----------------------------------------------------------------*/

    #[inline]
    pub const fn try_offset(self, dx: i8) -> Option<File> {
        let i = self as i8 + dx;

        if i < 0 || i >= File::COUNT as i8 {
            return None;
        }

        File::try_index(i as usize)
    }

    /*----------------------------------------------------------------*/

    #[inline]
    pub const fn bitboard(self) -> Bitboard {
        Bitboard(0x101010101010101 << self as u8)
    }

    #[inline]
    pub const fn adjacent(self) -> Bitboard {
        let bb = self.bitboard().0;
        Bitboard((bb & !File::A.bitboard().0) >> 1 | (bb & !File::H.bitboard().0) << 1)
    }

    /*----------------------------------------------------------------*/

    pub const COUNT: usize = 8;
    pub const ALL: [File; Self::COUNT] = [
        File::A,
        File::B,
        File::C,
        File::D,
        File::E,
        File::F,
        File::G,
        File::H,
    ];
}

impl fmt::Display for File {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", char::from(*self))
    }
}

/*----------------------------------------------------------------*/

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FileParseError;

impl From<File> for char {
    #[inline]
    fn from(f: File) -> char {
        (b'a' + f as u8) as char
    }
}

impl TryFrom<char> for File {
    type Error = FileParseError;

    #[inline]
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'a'..='h' => Ok(File::index(c as usize - 'a' as usize)),
            _ => Err(FileParseError),
        }
    }
}

impl FromStr for File {
    type Err = FileParseError;

    #[inline]
    fn from_str(s: &str) -> Result<File, FileParseError> {
        let mut chars = s.chars();
        let c = chars.next().ok_or(FileParseError)?;

        if chars.next().is_none() {
            c.try_into()
        } else {
            Err(FileParseError)
        }
    }
}

/*----------------------------------------------------------------*/

#[test]
fn validate_file() {
    assert_eq!(File::index(0), File::A);
    assert_eq!(File::A.bitboard(), Bitboard(0x101010101010101));
    assert_eq!(File::A.try_offset(-1), None);
    assert_eq!(File::A.try_offset(1), Some(File::B));
    assert_eq!(File::A.adjacent(), File::B.bitboard());
    assert_eq!(File::D.adjacent(), File::C.bitboard() | File::E.bitboard());
    assert_eq!(File::H.try_offset(1), None);
    assert_eq!(char::from(File::H), 'h');
}
