use std::{sync::Arc, time::Duration};

use crate::*;

/*----------------------------------------------------------------*/

pub const MAX_PLY: usize = 128;
pub const DEFAULT_HASH_MB: usize = 16;

/// Per-search mutable state threaded through the recursion. The board
/// travels separately so a move guard can borrow it across the recursive
/// call.
pub struct SearchContext<'a> {
    pub tables: &'a Tables,
    pub tt: &'a mut TTable,
    pub heur: &'a mut Heuristics,
    pub time: &'a TimeManager,
    pub info: &'a mut dyn SearchInfo,

    pub nodes: u64,
    pub seldepth: u16,
    pub next_tick: Duration,
}

impl SearchContext<'_> {
    /// Counts the node and polls the clock. None aborts the search; the
    /// driver keeps the last finished iteration.
    #[inline]
    pub fn visit(&mut self) -> Option<()> {
        self.nodes += 1;

        if self.nodes % 2048 == 0 {
            if self.time.out_of_time(self.nodes) {
                return None;
            }

            let elapsed = self.time.elapsed();

            if elapsed >= self.next_tick {
                self.info.tick(self.nodes, elapsed);
                self.next_tick = elapsed + INFO_PERIOD;
            }
        }

        Some(())
    }
}

/*----------------------------------------------------------------*/

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub score: Score,
    pub depth: u8,
    pub nodes: u64,
}

/*----------------------------------------------------------------*/

pub struct Searcher {
    pub board: Board,
    pub tt: TTable,
    pub heur: Heuristics,
    pub book: Option<Book>,
    pub tables: Arc<Tables>,
    pub time: Arc<TimeManager>,
}

impl Searcher {
    pub fn new(tables: Arc<Tables>, time: Arc<TimeManager>, hash_mb: usize) -> Searcher {
        Searcher {
            board: Board::startpos(&tables),
            tt: TTable::new(hash_mb),
            heur: Heuristics::new(),
            book: None,
            tables,
            time,
        }
    }

    pub fn new_game(&mut self) {
        self.tt.clear();
        self.heur.clear();
    }

    /*----------------------------------------------------------------*/

    /// Iterative deepening with an aspiration window. Each depth searches
    /// a narrow window around the previous score and repeats with the
    /// full window when the score lands outside it.
    pub fn search(&mut self, limits: &[SearchLimit], info: &mut dyn SearchInfo) -> SearchResult {
        self.time.init(self.board.side_to_move(), limits);
        self.heur.clear();

        let mut nodes = 0;
        let mut seldepth = 0;
        let mut next_tick = INFO_PERIOD;
        let mut window = Window::FULL;
        let mut result = SearchResult {
            best_move: None,
            score: Score::ZERO,
            depth: 0,
            nodes: 0,
        };

        'iterate: for depth in 1..=self.time.max_depth() {
            let score = loop {
                let mut ctx = SearchContext {
                    tables: &self.tables,
                    tt: &mut self.tt,
                    heur: &mut self.heur,
                    time: &self.time,
                    info: &mut *info,
                    nodes,
                    seldepth,
                    next_tick,
                };

                let outcome = negamax(
                    &mut ctx,
                    &mut self.board,
                    depth,
                    0,
                    window.alpha,
                    window.beta,
                    EXTENSION_BUDGET,
                    None,
                    true,
                );

                nodes = ctx.nodes;
                seldepth = ctx.seldepth;
                next_tick = ctx.next_tick;

                match outcome {
                    None => break 'iterate,
                    Some(score) if !window.is_full() && !window.contains(score) => {
                        window = Window::FULL;
                    }
                    Some(score) => break score,
                }
            };

            result.score = score;
            result.depth = depth;
            result.nodes = nodes;

            if let Some(mv) = self.tt.probe_move(self.board.hash()) {
                result.best_move = Some(mv);
            }

            let pv = self.extract_pv(depth);
            info.iteration(&SearchStats {
                depth,
                seldepth,
                score,
                nodes,
                elapsed: self.time.elapsed(),
                hashfull: self.tt.hashfull(),
                pv: &pv,
            });

            window = Window::around(score);
        }

        result.nodes = nodes;

        // Even a cancelled first iteration must answer with a legal move.
        if result.best_move.is_none() {
            result.best_move = self.board.gen_moves(&self.tables).first().copied();
        }

        result
    }

    /*----------------------------------------------------------------*/

    /// Principal variation read back from the table, cut short at the
    /// first illegal or missing link.
    fn extract_pv(&mut self, depth: u8) -> Vec<Move> {
        let mut pv = Vec::new();
        let mut undos = Vec::new();

        for _ in 0..depth {
            let Some(mv) = self.tt.probe_move(self.board.hash()) else {
                break;
            };

            if !self.board.gen_moves(&self.tables).contains(&mv) {
                break;
            }

            undos.push(self.board.make_move(&self.tables, mv));
            pv.push(mv);
        }

        while let Some(undo) = undos.pop() {
            self.board.unmake_move(undo);
        }

        pv
    }
}

/*----------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh_searcher() -> Searcher {
        let tables = Arc::new(Tables::new());
        let time = Arc::new(TimeManager::new());

        Searcher::new(tables, time, 1)
    }

    fn searcher_for(fen: &str) -> Searcher {
        let mut searcher = fresh_searcher();

        searcher.board = Board::from_fen(&searcher.tables, fen).unwrap();
        searcher
    }

    fn best_move_str(result: &SearchResult) -> String {
        result.best_move.map(|m| m.to_string()).unwrap()
    }

    #[test]
    fn finds_mate_in_one() {
        let mut searcher = searcher_for("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1");
        let result = searcher.search(&[SearchLimit::MaxDepth(4)], &mut NoInfo);

        assert_eq!(best_move_str(&result), "a1a8");
        assert_eq!(result.score.mate_in(), Some(1));
    }

    #[test]
    fn finds_mate_in_two() {
        let mut searcher = searcher_for("7k/8/8/8/8/8/R7/1R4K1 w - - 0 1");
        let result = searcher.search(&[SearchLimit::MaxDepth(6)], &mut NoInfo);

        assert_eq!(result.score.mate_in(), Some(3));
    }

    #[test]
    fn sole_legal_move_is_returned() {
        let mut searcher = searcher_for("7k/8/5K2/8/8/8/8/7R b - - 0 1");
        let result = searcher.search(&[SearchLimit::MaxDepth(2)], &mut NoInfo);

        assert_eq!(best_move_str(&result), "h8g8");
    }

    #[test]
    fn node_limit_still_yields_a_move() {
        let mut searcher = fresh_searcher();
        searcher.board = Board::startpos(&searcher.tables);

        let result = searcher.search(&[SearchLimit::MaxNodes(500)], &mut NoInfo);

        assert!(result.best_move.is_some());
        let best = result.best_move.unwrap();
        assert!(searcher.board.gen_moves(&searcher.tables).contains(&best));
    }

    #[test]
    fn first_move_searches_the_full_window_once() {
        // One legal reply, no captures behind it: the root plus one
        // horizon child (counted at entry and again in quiescence). A
        // null-window first search would re-visit the child to confirm
        // the score.
        let mut searcher = searcher_for("7k/8/5K2/8/8/8/8/7R b - - 0 1");
        let result = searcher.search(&[SearchLimit::MaxDepth(1)], &mut NoInfo);

        assert_eq!(result.nodes, 3);
    }

    #[test]
    fn stalemate_scores_zero() {
        let mut searcher = searcher_for("7k/5Q2/8/8/8/8/8/K7 b - - 0 1");
        let result = searcher.search(&[SearchLimit::MaxDepth(2)], &mut NoInfo);

        assert_eq!(result.best_move, None);
        assert_eq!(result.score, Score::ZERO);
    }

    #[test]
    fn fixed_depth_search_is_deterministic() {
        let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
        let first = searcher_for(fen).search(&[SearchLimit::MaxDepth(4)], &mut NoInfo);
        let second = searcher_for(fen).search(&[SearchLimit::MaxDepth(4)], &mut NoInfo);

        assert_eq!(first.best_move, second.best_move);
        assert_eq!(first.score, second.score);
        assert_eq!(first.nodes, second.nodes);
    }

    #[test]
    fn prefers_winning_material() {
        // Black queen hangs on d5.
        let mut searcher = searcher_for("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1");
        let result = searcher.search(&[SearchLimit::MaxDepth(5)], &mut NoInfo);

        assert_eq!(best_move_str(&result), "d2d5");
        assert!(result.score > Score::ZERO);
    }

    #[test]
    fn deeper_iterations_are_kept() {
        let mut searcher = fresh_searcher();
        searcher.board = Board::startpos(&searcher.tables);

        let result = searcher.search(&[SearchLimit::MaxDepth(4)], &mut NoInfo);

        assert_eq!(result.depth, 4);
        assert!(result.nodes > 0);
    }
}
