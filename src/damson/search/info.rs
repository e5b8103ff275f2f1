use std::time::Duration;

use crate::*;

/*----------------------------------------------------------------*/

/// How often the periodic node-count line is emitted mid-iteration.
pub const INFO_PERIOD: Duration = Duration::from_millis(100);

pub struct SearchStats<'a> {
    pub depth: u8,
    pub seldepth: u16,
    pub score: Score,
    pub nodes: u64,
    pub elapsed: Duration,
    pub hashfull: usize,
    pub pv: &'a [Move],
}

/// Sink for search progress. The engine plugs in the UCI printer; tests
/// and bench run silent.
pub trait SearchInfo {
    fn iteration(&mut self, stats: &SearchStats);

    fn tick(&mut self, _nodes: u64, _elapsed: Duration) {}
}

/*----------------------------------------------------------------*/

pub struct UciInfo;

impl SearchInfo for UciInfo {
    fn iteration(&mut self, stats: &SearchStats) {
        let millis = stats.elapsed.as_millis() as u64;
        let nps = stats.nodes * 1000 / millis.max(1);

        print!(
            "info depth {} seldepth {} score {} time {} nodes {} nps {} hashfull {}",
            stats.depth, stats.seldepth, stats.score, millis, stats.nodes, nps, stats.hashfull,
        );

        if !stats.pv.is_empty() {
            print!(" pv");

            for mv in stats.pv {
                print!(" {mv}");
            }
        }

        println!();
    }

    fn tick(&mut self, nodes: u64, elapsed: Duration) {
        let millis = elapsed.as_millis() as u64;

        println!(
            "info nodes {} nps {} time {}",
            nodes,
            nodes * 1000 / millis.max(1),
            millis,
        );
    }
}

/*----------------------------------------------------------------*/

pub struct NoInfo;

impl SearchInfo for NoInfo {
    fn iteration(&mut self, _stats: &SearchStats) {}
}
