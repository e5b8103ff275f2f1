use crate::*;

/*----------------------------------------------------------------*/

/// Depth tag for terminal stores (mate and stalemate); outranks any real
/// search depth so the entry is always deep enough.
pub const TERMINAL_DEPTH: u8 = u8::MAX;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TtBound {
    Exact,
    Lower,
    Upper,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TtEntry {
    pub hash: u64,
    pub depth: u8,
    pub bound: TtBound,
    pub score: Score,
    pub best_move: Option<Move>,
}

/*----------------------------------------------------------------*/

/// Fixed-capacity always-replace transposition table, indexed by hash
/// modulo capacity. The zero hash is reserved as the empty marker and is
/// neither stored nor probed.
pub struct TTable {
    entries: Box<[Option<TtEntry>]>,
}

impl TTable {
    pub fn new(size_mb: usize) -> TTable {
        let len = (size_mb * 1024 * 1024 / size_of::<Option<TtEntry>>()).max(1);

        TTable {
            entries: vec![None; len].into_boxed_slice(),
        }
    }

    pub fn resize(&mut self, size_mb: usize) {
        *self = TTable::new(size_mb);
    }

    pub fn clear(&mut self) {
        self.entries.fill(None);
    }

    #[inline]
    fn index(&self, hash: u64) -> usize {
        (hash % self.entries.len() as u64) as usize
    }

    /*----------------------------------------------------------------*/

    /// A hit must be deep enough for the caller, unless `relaxed`, and its
    /// bound must actually bind at the current window: a lower bound below
    /// beta or an upper bound at or above alpha decides nothing.
    pub fn probe(
        &self,
        hash: u64,
        depth: u8,
        ply: u16,
        alpha: Score,
        beta: Score,
        relaxed: bool,
    ) -> Option<TtEntry> {
        if hash == 0 {
            return None;
        }

        let mut entry = self.entries[self.index(hash)]?;

        if entry.hash != hash || (entry.depth < depth && !relaxed) {
            return None;
        }

        entry.score = score_from_tt(entry.score, ply);

        match entry.bound {
            TtBound::Exact => Some(entry),
            TtBound::Lower if entry.score >= beta => Some(entry),
            TtBound::Upper if entry.score < alpha => Some(entry),
            _ => None,
        }
    }

    /// The move alone, regardless of depth and window, for ordering.
    pub fn probe_move(&self, hash: u64) -> Option<Move> {
        if hash == 0 {
            return None;
        }

        self.entries[self.index(hash)]
            .filter(|entry| entry.hash == hash)
            .and_then(|entry| entry.best_move)
    }

    pub fn store(
        &mut self,
        hash: u64,
        depth: u8,
        ply: u16,
        score: Score,
        bound: TtBound,
        best_move: Option<Move>,
    ) {
        if hash == 0 {
            return;
        }

        let idx = self.index(hash);
        self.entries[idx] = Some(TtEntry {
            hash,
            depth,
            bound,
            score: score_to_tt(score, ply),
            best_move,
        });
    }

    /*----------------------------------------------------------------*/

    /// Occupancy per mille, sampled over the first thousand slots.
    pub fn hashfull(&self) -> usize {
        self.entries
            .iter()
            .take(1000)
            .filter(|slot| slot.is_some())
            .count()
    }
}

/*----------------------------------------------------------------*/

// Mate scores are stored relative to the probing node so a shared entry
// reports the right distance from any ply.

#[inline]
fn score_to_tt(score: Score, ply: u16) -> Score {
    if score >= Score::MATE_THRESHOLD {
        score + ply as i32
    } else if score <= -Score::MATE_THRESHOLD {
        score - ply as i32
    } else {
        score
    }
}

#[inline]
fn score_from_tt(score: Score, ply: u16) -> Score {
    if score >= Score::MATE_THRESHOLD {
        score - ply as i32
    } else if score <= -Score::MATE_THRESHOLD {
        score + ply as i32
    } else {
        score
    }
}

/*----------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: (Score, Score) = (Score(-100), Score(100));

    #[test]
    fn store_and_probe() {
        let mut tt = TTable::new(1);
        let mv = Move::new(Square::E2, Square::E4, MoveKind::Normal);

        tt.store(0xDEAD, 5, 0, Score(42), TtBound::Exact, Some(mv));

        let entry = tt.probe(0xDEAD, 5, 0, WINDOW.0, WINDOW.1, false).unwrap();
        assert_eq!(entry.score, Score(42));
        assert_eq!(entry.best_move, Some(mv));

        assert!(tt.probe(0xBEEF, 5, 0, WINDOW.0, WINDOW.1, false).is_none());
    }

    #[test]
    fn shallow_entries_need_relaxed_probe() {
        let mut tt = TTable::new(1);

        tt.store(0xDEAD, 3, 0, Score(42), TtBound::Exact, None);

        assert!(tt.probe(0xDEAD, 5, 0, WINDOW.0, WINDOW.1, false).is_none());
        assert!(tt.probe(0xDEAD, 5, 0, WINDOW.0, WINDOW.1, true).is_some());
    }

    #[test]
    fn bounds_must_bind() {
        let mut tt = TTable::new(1);

        tt.store(0xDEAD, 5, 0, Score(42), TtBound::Lower, None);
        assert!(tt.probe(0xDEAD, 5, 0, WINDOW.0, WINDOW.1, false).is_none());
        assert!(tt.probe(0xDEAD, 5, 0, Score(-100), Score(42), false).is_some());

        tt.store(0xDEAD, 5, 0, Score(-42), TtBound::Upper, None);
        assert!(tt.probe(0xDEAD, 5, 0, Score(-100), Score(100), false).is_none());
        assert!(tt.probe(0xDEAD, 5, 0, Score(-42), Score(100), false).is_none());
        assert!(tt.probe(0xDEAD, 5, 0, Score(-41), Score(100), false).is_some());
    }

    #[test]
    fn zero_hash_is_never_stored() {
        let mut tt = TTable::new(1);

        tt.store(0, 5, 0, Score(42), TtBound::Exact, None);
        assert!(tt.probe(0, 5, 0, WINDOW.0, WINDOW.1, false).is_none());
        assert!(tt.probe_move(0).is_none());
    }

    #[test]
    fn mate_scores_rebase_by_ply() {
        let mut tt = TTable::new(1);

        // Mate in 3 plies seen at ply 4 is mate in 7 from the root.
        tt.store(0xDEAD, 5, 4, Score::mate(7), TtBound::Exact, None);

        let entry = tt.probe(0xDEAD, 5, 2, -Score::INFINITE, Score::INFINITE, false).unwrap();
        assert_eq!(entry.score, Score::mate(5));
    }
}
