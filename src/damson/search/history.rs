use crate::*;

/*----------------------------------------------------------------*/

pub const KILLER_SLOTS: usize = 2;

/// Quiet-move ordering state: two rotating killer slots per ply, a
/// from-to history counter per side, and one counter move per opposing
/// reply. Cleared at the start of every search.
pub struct Heuristics {
    killers: [[Option<Move>; KILLER_SLOTS]; MAX_PLY],
    killer_cursor: [usize; MAX_PLY],
    history: Box<[[[i32; Square::COUNT]; Square::COUNT]; Color::COUNT]>,
    counters: Box<[[[Option<Move>; Square::COUNT]; Square::COUNT]; Color::COUNT]>,
}

impl Heuristics {
    pub fn new() -> Heuristics {
        Heuristics {
            killers: [[None; KILLER_SLOTS]; MAX_PLY],
            killer_cursor: [0; MAX_PLY],
            history: Box::new([[[0; Square::COUNT]; Square::COUNT]; Color::COUNT]),
            counters: Box::new([[[None; Square::COUNT]; Square::COUNT]; Color::COUNT]),
        }
    }

    pub fn clear(&mut self) {
        self.killers = [[None; KILLER_SLOTS]; MAX_PLY];
        self.killer_cursor = [0; MAX_PLY];
        self.history.fill([[0; Square::COUNT]; Square::COUNT]);
        self.counters.fill([[None; Square::COUNT]; Square::COUNT]);
    }

    /*----------------------------------------------------------------*/

    #[inline]
    pub fn killers(&self, ply: u16) -> [Option<Move>; KILLER_SLOTS] {
        self.killers[ply as usize]
    }

    /// Overwrites the older of the two slots unless the move is already
    /// remembered at this ply.
    pub fn store_killer(&mut self, ply: u16, mv: Move) {
        let ply = ply as usize;

        if self.killers[ply].contains(&Some(mv)) {
            return;
        }

        let slot = self.killer_cursor[ply];
        self.killers[ply][slot] = Some(mv);
        self.killer_cursor[ply] = (slot + 1) % KILLER_SLOTS;
    }

    /*----------------------------------------------------------------*/

    #[inline]
    pub fn history(&self, color: Color, mv: Move) -> i32 {
        self.history[color][mv.from][mv.to]
    }

    #[inline]
    pub fn bump_history(&mut self, color: Color, mv: Move, depth: u8) {
        self.history[color][mv.from][mv.to] += depth as i32;
    }

    /*----------------------------------------------------------------*/

    #[inline]
    pub fn counter(&self, color: Color, prev: Option<Move>) -> Option<Move> {
        prev.and_then(|prev| self.counters[color][prev.from][prev.to])
    }

    #[inline]
    pub fn store_counter(&mut self, color: Color, prev: Option<Move>, mv: Move) {
        if let Some(prev) = prev {
            self.counters[color][prev.from][prev.to] = Some(mv);
        }
    }
}

impl Default for Heuristics {
    fn default() -> Heuristics {
        Heuristics::new()
    }
}

/*----------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(from: Square, to: Square) -> Move {
        Move::new(from, to, MoveKind::Normal)
    }

    #[test]
    fn killers_rotate() {
        let mut heur = Heuristics::new();
        let (a, b, c) = (mv(Square::A1, Square::A2), mv(Square::B1, Square::B2), mv(Square::C1, Square::C2));

        heur.store_killer(3, a);
        heur.store_killer(3, b);
        assert_eq!(heur.killers(3), [Some(a), Some(b)]);

        // The oldest slot goes first; duplicates are ignored.
        heur.store_killer(3, b);
        heur.store_killer(3, c);
        assert_eq!(heur.killers(3), [Some(c), Some(b)]);

        assert_eq!(heur.killers(4), [None, None]);
    }

    #[test]
    fn history_accumulates_per_side() {
        let mut heur = Heuristics::new();
        let m = mv(Square::G1, Square::F3);

        heur.bump_history(Color::White, m, 4);
        heur.bump_history(Color::White, m, 2);

        assert_eq!(heur.history(Color::White, m), 6);
        assert_eq!(heur.history(Color::Black, m), 0);

        heur.clear();
        assert_eq!(heur.history(Color::White, m), 0);
    }

    #[test]
    fn counters_key_on_previous_move() {
        let mut heur = Heuristics::new();
        let prev = mv(Square::E7, Square::E5);
        let reply = mv(Square::G1, Square::F3);

        heur.store_counter(Color::White, Some(prev), reply);

        assert_eq!(heur.counter(Color::White, Some(prev)), Some(reply));
        assert_eq!(heur.counter(Color::White, None), None);
        assert_eq!(heur.counter(Color::Black, Some(prev)), None);
    }
}
