use std::{sync::atomic::*, time::*};

use atomic_time::AtomicInstant;

use crate::*;

/*----------------------------------------------------------------*/

pub const MAX_DEPTH: u8 = 127;

/// Fraction of the remaining clock spent on one move.
const CLOCK_FRACTION: u64 = 25;
/// Never budget less than this, even on a nearly flat clock.
const MIN_BUDGET_MS: u64 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchLimit {
    WhiteTime(u64),
    BlackTime(u64),
    WhiteInc(u64),
    BlackInc(u64),
    MoveTime(u64),
    MovesToGo(u16),
    MaxDepth(u8),
    MaxNodes(u64),
    Infinite,
}

/*----------------------------------------------------------------*/

/// Shared clock and stop flag. The searcher polls it from the worker
/// thread while the input thread can flip the abort at any moment.
pub struct TimeManager {
    start: AtomicInstant,
    abort: AtomicBool,
    budget_ms: AtomicU64,
    max_nodes: AtomicU64,
    max_depth: AtomicU8,
}

impl TimeManager {
    pub fn new() -> TimeManager {
        TimeManager {
            start: AtomicInstant::new(Instant::now()),
            abort: AtomicBool::new(false),
            budget_ms: AtomicU64::new(u64::MAX),
            max_nodes: AtomicU64::new(u64::MAX),
            max_depth: AtomicU8::new(MAX_DEPTH),
        }
    }

    /*----------------------------------------------------------------*/

    pub fn init(&self, stm: Color, limits: &[SearchLimit]) {
        let mut my_time = None;
        let mut my_inc = 0;
        let mut moves_to_go = None;
        let mut move_time = None;
        let mut max_depth = MAX_DEPTH;
        let mut max_nodes = u64::MAX;

        for limit in limits {
            match limit {
                SearchLimit::WhiteTime(time) if stm == Color::White => my_time = Some(*time),
                SearchLimit::BlackTime(time) if stm == Color::Black => my_time = Some(*time),
                SearchLimit::WhiteInc(inc) if stm == Color::White => my_inc = *inc,
                SearchLimit::BlackInc(inc) if stm == Color::Black => my_inc = *inc,
                SearchLimit::MovesToGo(moves) => moves_to_go = Some(*moves),
                SearchLimit::MoveTime(time) => move_time = Some(*time),
                SearchLimit::MaxDepth(depth) => max_depth = (*depth).min(MAX_DEPTH),
                SearchLimit::MaxNodes(nodes) => max_nodes = *nodes,
                _ => {}
            }
        }

        // With a move counter the clock is split evenly over what is
        // left; otherwise a fixed fraction. The increment is added on
        // top, and the budget never exceeds the clock itself.
        let budget = match (move_time, my_time) {
            (Some(time), _) => time,
            (None, Some(time)) => {
                let slice = match moves_to_go {
                    Some(moves) => time / u64::from(moves.max(1)),
                    None => time / CLOCK_FRACTION,
                };

                (slice + my_inc).max(MIN_BUDGET_MS).min(time.max(1))
            }
            (None, None) => u64::MAX,
        };

        self.start.store(Instant::now(), Ordering::Relaxed);
        self.abort.store(false, Ordering::Relaxed);
        self.budget_ms.store(budget, Ordering::Relaxed);
        self.max_nodes.store(max_nodes, Ordering::Relaxed);
        self.max_depth.store(max_depth, Ordering::Relaxed);
    }

    /*----------------------------------------------------------------*/

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start.load(Ordering::Relaxed).elapsed()
    }

    #[inline]
    pub fn budget_ms(&self) -> u64 {
        self.budget_ms.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn stop(&self) {
        self.abort.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn stopped(&self) -> bool {
        self.abort.load(Ordering::Relaxed)
    }

    /// Aborts once the budget is spent; the caller unwinds and keeps the
    /// last completed iteration's move.
    #[inline]
    pub fn out_of_time(&self, nodes: u64) -> bool {
        if self.stopped() {
            return true;
        }

        if nodes >= self.max_nodes.load(Ordering::Relaxed)
            || self.elapsed().as_millis() as u64 >= self.budget_ms.load(Ordering::Relaxed)
        {
            self.stop();
            return true;
        }

        false
    }

    #[inline]
    pub fn max_depth(&self) -> u8 {
        self.max_depth.load(Ordering::Relaxed)
    }
}

impl Default for TimeManager {
    fn default() -> TimeManager {
        TimeManager::new()
    }
}

/*----------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movetime_overrides_clock() {
        let tm = TimeManager::new();
        tm.init(
            Color::White,
            &[SearchLimit::WhiteTime(60_000), SearchLimit::MoveTime(5)],
        );

        std::thread::sleep(Duration::from_millis(10));
        assert!(tm.out_of_time(0));
    }

    #[test]
    fn clock_budget_uses_own_time() {
        let tm = TimeManager::new();
        tm.init(
            Color::Black,
            &[SearchLimit::WhiteTime(50), SearchLimit::BlackTime(100_000)],
        );

        assert!(!tm.out_of_time(0));
    }

    #[test]
    fn increment_extends_the_budget() {
        let tm = TimeManager::new();
        tm.init(
            Color::Black,
            &[
                SearchLimit::BlackTime(25_000),
                SearchLimit::BlackInc(2_000),
                SearchLimit::WhiteInc(9_000),
            ],
        );

        assert_eq!(tm.budget_ms(), 25_000 / 25 + 2_000);
    }

    #[test]
    fn moves_to_go_splits_the_clock() {
        let tm = TimeManager::new();
        tm.init(
            Color::White,
            &[SearchLimit::WhiteTime(60_000), SearchLimit::MovesToGo(10)],
        );

        assert_eq!(tm.budget_ms(), 6_000);
    }

    #[test]
    fn budget_never_exceeds_the_clock() {
        let tm = TimeManager::new();
        tm.init(
            Color::White,
            &[SearchLimit::WhiteTime(40), SearchLimit::WhiteInc(5_000)],
        );

        assert_eq!(tm.budget_ms(), 40);
    }

    #[test]
    fn stop_is_sticky() {
        let tm = TimeManager::new();
        tm.init(Color::White, &[SearchLimit::Infinite]);

        assert!(!tm.out_of_time(0));
        tm.stop();
        assert!(tm.out_of_time(0));
    }

    #[test]
    fn node_limit_aborts() {
        let tm = TimeManager::new();
        tm.init(Color::White, &[SearchLimit::MaxNodes(1000)]);

        assert!(!tm.out_of_time(999));
        assert!(tm.out_of_time(1000));
    }
}
