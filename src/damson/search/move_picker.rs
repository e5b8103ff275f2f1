use arrayvec::ArrayVec;

use crate::*;

/*----------------------------------------------------------------*/

const COUNTER_BONUS: i32 = 30_000;

#[derive(Debug, Copy, Clone)]
pub struct ScoredMove(pub Move, pub i32);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Phase {
    HashMove,
    Checks,
    GoodCaptures,
    Killers,
    Quiets,
    BadCaptures,
    Finished,
}

/*----------------------------------------------------------------*/

/// Staged move ordering over an already generated legal move list: the
/// table move, then checking moves, winning captures, killers, quiets by
/// history, and losing captures last. Each stage yields lazily with a
/// partial selection sort.
pub struct MovePicker {
    phase: Phase,
    hash_move: Option<Move>,
    checks: ArrayVec<ScoredMove, MAX_MOVES>,
    good_captures: ArrayVec<ScoredMove, MAX_MOVES>,
    killers: ArrayVec<Move, KILLER_SLOTS>,
    quiets: ArrayVec<ScoredMove, MAX_MOVES>,
    bad_captures: ArrayVec<ScoredMove, MAX_MOVES>,
}

impl MovePicker {
    pub fn new(
        board: &Board,
        tables: &Tables,
        heur: &Heuristics,
        moves: &MoveList,
        hash_move: Option<Move>,
        ply: u16,
        prev: Option<Move>,
    ) -> MovePicker {
        let mut picker = MovePicker::empty();
        let us = board.side_to_move();
        let killers = heur.killers(ply);
        let counter = heur.counter(us, prev);

        for &mv in moves {
            if hash_move == Some(mv) {
                picker.hash_move = Some(mv);
                continue;
            }

            if board.gives_check(tables, mv) {
                let score = capture_score(board, mv)
                    .unwrap_or_else(|| heur.history(us, mv));
                picker.checks.push(ScoredMove(mv, score));
                continue;
            }

            if let Some(score) = capture_score(board, mv) {
                if score >= 0 {
                    picker.good_captures.push(ScoredMove(mv, score));
                } else {
                    picker.bad_captures.push(ScoredMove(mv, score));
                }
                continue;
            }

            if killers.contains(&Some(mv)) {
                picker.killers.push(mv);
                continue;
            }

            let bonus = if counter == Some(mv) { COUNTER_BONUS } else { 0 };
            picker.quiets.push(ScoredMove(mv, heur.history(us, mv) + bonus));
        }

        picker
    }

    /// Ordering for quiescence: captures only, winners before losers, no
    /// staged extras.
    pub fn captures(board: &Board, moves: &MoveList) -> MovePicker {
        let mut picker = MovePicker::empty();
        picker.phase = Phase::GoodCaptures;

        for &mv in moves {
            if let Some(score) = capture_score(board, mv) {
                if score >= 0 {
                    picker.good_captures.push(ScoredMove(mv, score));
                } else {
                    picker.bad_captures.push(ScoredMove(mv, score));
                }
            }
        }

        picker
    }

    fn empty() -> MovePicker {
        MovePicker {
            phase: Phase::HashMove,
            hash_move: None,
            checks: ArrayVec::new(),
            good_captures: ArrayVec::new(),
            killers: ArrayVec::new(),
            quiets: ArrayVec::new(),
            bad_captures: ArrayVec::new(),
        }
    }

    /*----------------------------------------------------------------*/

    pub fn next(&mut self) -> Option<Move> {
        if self.phase == Phase::HashMove {
            self.phase = Phase::Checks;

            if self.hash_move.is_some() {
                return self.hash_move;
            }
        }

        if self.phase == Phase::Checks {
            if let Some(mv) = select_next(&mut self.checks) {
                return Some(mv);
            }

            self.phase = Phase::GoodCaptures;
        }

        if self.phase == Phase::GoodCaptures {
            if let Some(mv) = select_next(&mut self.good_captures) {
                return Some(mv);
            }

            self.phase = Phase::Killers;
        }

        if self.phase == Phase::Killers {
            if let Some(mv) = self.killers.pop_at(0) {
                return Some(mv);
            }

            self.phase = Phase::Quiets;
        }

        if self.phase == Phase::Quiets {
            if let Some(mv) = select_next(&mut self.quiets) {
                return Some(mv);
            }

            self.phase = Phase::BadCaptures;
        }

        if self.phase == Phase::BadCaptures {
            if let Some(mv) = select_next(&mut self.bad_captures) {
                return Some(mv);
            }

            self.phase = Phase::Finished;
        }

        None
    }
}

/*----------------------------------------------------------------*/

/// Best-first without sorting the whole bucket; most nodes cut off after
/// a move or two.
fn select_next(moves: &mut ArrayVec<ScoredMove, MAX_MOVES>) -> Option<Move> {
    let best = moves
        .iter()
        .enumerate()
        .max_by_key(|(_, sm)| sm.1)
        .map(|(i, _)| i)?;

    Some(moves.swap_remove(best).0)
}

/// None for quiets. A capture counts as winning when the victim is worth
/// at least the attacker, or the destination is undefended.
fn capture_score(board: &Board, mv: Move) -> Option<i32> {
    let victim = match mv.kind {
        MoveKind::EnPassant => Piece::Pawn,
        _ => board.piece_on(mv.to).map(|(_, p)| p)?,
    };

    let attacker = board
        .piece_on(mv.from)
        .map_or(Piece::Pawn, |(_, p)| p);

    let risk = if board.opponent_attacks().has(mv.to) {
        attacker.value() as i32
    } else {
        0
    };

    Some(victim.value() as i32 - risk)
}

/*----------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(picker: &mut MovePicker) -> Vec<Move> {
        let mut out = Vec::new();

        while let Some(mv) = picker.next() {
            out.push(mv);
        }

        out
    }

    #[test]
    fn hash_move_comes_first_and_once() {
        let tables = Tables::new();
        let board = Board::startpos(&tables);
        let heur = Heuristics::new();
        let moves = board.gen_moves(&tables);
        let hash_move = Move::parse(&board, "e2e4").unwrap();

        let mut picker =
            MovePicker::new(&board, &tables, &heur, &moves, Some(hash_move), 0, None);
        let yielded = drain(&mut picker);

        assert_eq!(yielded[0], hash_move);
        assert_eq!(yielded.len(), moves.len());
        assert_eq!(yielded.iter().filter(|&&m| m == hash_move).count(), 1);
    }

    #[test]
    fn winning_capture_before_losing_capture() {
        let tables = Tables::new();
        // The d5 pawn is defended by e6, so grabbing it with the queen
        // risks far more than grabbing it with the knight.
        let board = Board::from_fen(
            &tables,
            "4k3/8/4p3/3p4/8/2N5/3Q4/4K3 w - - 0 1",
        )
        .unwrap();
        let heur = Heuristics::new();
        let moves = board.gen_moves(&tables);

        let mut picker = MovePicker::new(&board, &tables, &heur, &moves, None, 0, None);
        let yielded = drain(&mut picker);

        let nxd5 = Move::parse(&board, "c3d5").unwrap();
        let qxd5 = Move::parse(&board, "d2d5").unwrap();
        let n_pos = yielded.iter().position(|&m| m == nxd5).unwrap();
        let q_pos = yielded.iter().position(|&m| m == qxd5).unwrap();

        assert!(n_pos < q_pos);
    }

    #[test]
    fn killers_come_before_plain_quiets() {
        let tables = Tables::new();
        let board = Board::startpos(&tables);
        let mut heur = Heuristics::new();
        let moves = board.gen_moves(&tables);

        let killer = Move::parse(&board, "b1c3").unwrap();
        heur.store_killer(0, killer);

        let quiet = Move::parse(&board, "a2a3").unwrap();
        heur.bump_history(Color::White, quiet, 12);

        let mut picker = MovePicker::new(&board, &tables, &heur, &moves, None, 0, None);
        let yielded = drain(&mut picker);

        let k_pos = yielded.iter().position(|&m| m == killer).unwrap();
        let q_pos = yielded.iter().position(|&m| m == quiet).unwrap();

        assert!(k_pos < q_pos);
        assert_eq!(yielded.len(), moves.len());
    }

    #[test]
    fn history_orders_quiets() {
        let tables = Tables::new();
        let board = Board::startpos(&tables);
        let mut heur = Heuristics::new();
        let moves = board.gen_moves(&tables);

        let hot = Move::parse(&board, "d2d4").unwrap();
        let cold = Move::parse(&board, "h2h3").unwrap();
        heur.bump_history(Color::White, hot, 20);

        let mut picker = MovePicker::new(&board, &tables, &heur, &moves, None, 0, None);
        let yielded = drain(&mut picker);

        let hot_pos = yielded.iter().position(|&m| m == hot).unwrap();
        let cold_pos = yielded.iter().position(|&m| m == cold).unwrap();

        assert!(hot_pos < cold_pos);
    }

    #[test]
    fn capture_picker_yields_only_captures() {
        let tables = Tables::new();
        let board = Board::from_fen(
            &tables,
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .unwrap();
        let caps = board.gen_captures(&tables);

        let mut picker = MovePicker::captures(&board, &caps);
        let yielded = drain(&mut picker);

        assert_eq!(yielded.len(), caps.len());
    }
}
