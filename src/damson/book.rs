use std::{fs, io, path::Path};

use rand::Rng;

use crate::*;

/*----------------------------------------------------------------*/

/// One 16-byte big-endian book record: position hash, packed move,
/// selection weight, and an unused learn field.
#[derive(Debug, Copy, Clone)]
struct BookEntry {
    key: u64,
    mv: u16,
    weight: u16,
}

const RECORD_SIZE: usize = 16;

/*----------------------------------------------------------------*/

/// Opening book held fully in memory. Lookups draw randomly among the
/// entries for a position, proportionally to their weights.
pub struct Book {
    entries: Vec<BookEntry>,
}

impl Book {
    pub fn load(path: &Path) -> io::Result<Book> {
        let data = fs::read(path)?;

        if data.len() % RECORD_SIZE != 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "book size is not a multiple of the record size",
            ));
        }

        let entries = data
            .chunks_exact(RECORD_SIZE)
            .filter_map(|chunk| {
                let (key, rest) = chunk.split_first_chunk::<8>()?;
                let (mv, rest) = rest.split_first_chunk::<2>()?;
                let (weight, _) = rest.split_first_chunk::<2>()?;

                Some(BookEntry {
                    key: u64::from_be_bytes(*key),
                    mv: u16::from_be_bytes(*mv),
                    weight: u16::from_be_bytes(*weight),
                })
            })
            .collect();

        Ok(Book { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /*----------------------------------------------------------------*/

    /// Weighted random pick among the book moves for this position. The
    /// decoded move must match a legal one or the probe misses.
    pub fn probe(&self, board: &Board, tables: &Tables) -> Option<Move> {
        let hits = || {
            self.entries
                .iter()
                .filter(|e| e.key == board.hash() && e.weight > 0)
        };

        let total: u32 = hits().map(|e| e.weight as u32).sum();

        if total == 0 {
            return None;
        }

        let mut roll = rand::rng().random_range(0..total);

        for entry in hits() {
            if roll < entry.weight as u32 {
                return decode(entry.mv, board, tables);
            }

            roll -= entry.weight as u32;
        }

        None
    }
}

/*----------------------------------------------------------------*/

// Packed move layout: destination file and rank in the low six bits,
// origin file and rank above them, promotion piece on top.

fn decode(packed: u16, board: &Board, tables: &Tables) -> Option<Move> {
    let to = Square::new(
        File::try_index((packed & 0x7) as usize)?,
        Rank::try_index((packed >> 3 & 0x7) as usize)?,
    );
    let from = Square::new(
        File::try_index((packed >> 6 & 0x7) as usize)?,
        Rank::try_index((packed >> 9 & 0x7) as usize)?,
    );

    let promotion = match packed >> 12 & 0x7 {
        0 => None,
        1 => Some(Piece::Knight),
        2 => Some(Piece::Bishop),
        3 => Some(Piece::Rook),
        4 => Some(Piece::Queen),
        _ => return None,
    };

    board
        .gen_moves(tables)
        .into_iter()
        .find(|mv| mv.from == from && mv.to == to && mv.promotion() == promotion)
}

/*----------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;

    fn record(key: u64, mv: u16, weight: u16) -> [u8; RECORD_SIZE] {
        let mut out = [0; RECORD_SIZE];
        out[0..8].copy_from_slice(&key.to_be_bytes());
        out[8..10].copy_from_slice(&mv.to_be_bytes());
        out[10..12].copy_from_slice(&weight.to_be_bytes());
        out
    }

    fn pack(from: Square, to: Square) -> u16 {
        to.file() as u16
            | (to.rank() as u16) << 3
            | (from.file() as u16) << 6
            | (from.rank() as u16) << 9
    }

    #[test]
    fn decodes_packed_moves() {
        let tables = Tables::new();
        let board = Board::startpos(&tables);

        let mv = decode(pack(Square::E2, Square::E4), &board, &tables).unwrap();
        assert_eq!(mv, Move::parse(&board, "e2e4").unwrap());

        // Not a legal move, so the probe must come up empty.
        assert!(decode(pack(Square::E2, Square::E5), &board, &tables).is_none());
    }

    #[test]
    fn probe_respects_keys_and_weights() {
        let tables = Tables::new();
        let board = Board::startpos(&tables);

        let mut data = Vec::new();
        data.extend_from_slice(&record(board.hash(), pack(Square::E2, Square::E4), 10));
        data.extend_from_slice(&record(board.hash() ^ 1, pack(Square::A2, Square::A3), 50));
        data.extend_from_slice(&record(board.hash(), pack(Square::D2, Square::D4), 0));

        let dir = std::env::temp_dir().join("damson-book-test.bin");
        fs::write(&dir, &data).unwrap();

        let book = Book::load(&dir).unwrap();
        assert_eq!(book.len(), 3);

        let expected = Move::parse(&board, "e2e4").unwrap();

        for _ in 0..10 {
            assert_eq!(book.probe(&board, &tables), Some(expected));
        }

        fs::remove_file(&dir).ok();
    }

    #[test]
    fn truncated_book_is_rejected() {
        let dir = std::env::temp_dir().join("damson-book-truncated.bin");
        fs::write(&dir, [0u8; RECORD_SIZE + 3]).unwrap();

        assert!(Book::load(&dir).is_err());

        fs::remove_file(&dir).ok();
    }
}
