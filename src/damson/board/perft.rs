use crate::*;

impl Board {
    /// Leaf count of the legal move tree, the standard movegen correctness
    /// benchmark.
    pub fn perft(&mut self, tables: &Tables, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }

        let moves = self.gen_moves(tables);

        if depth == 1 {
            return moves.len() as u64;
        }

        let mut nodes = 0;

        for mv in moves {
            let mut child = self.play(tables, mv);
            nodes += child.perft(tables, depth - 1);
        }

        nodes
    }

    /// Perft with a per-root-move breakdown printed to stdout.
    pub fn divide(&mut self, tables: &Tables, depth: u32) -> u64 {
        let mut nodes = 0;

        for mv in self.gen_moves(tables) {
            let count = if depth > 1 {
                let mut child = self.play(tables, mv);
                child.perft(tables, depth - 1)
            } else {
                1
            };

            println!("{mv}: {count}");
            nodes += count;
        }

        println!("\nnodes: {nodes}");
        nodes
    }
}

/*----------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! perft_test {
        ($name:ident, $fen:expr, $($depth:expr => $nodes:expr),+ $(,)?) => {
            #[test]
            fn $name() {
                let tables = Tables::new();
                let mut board = Board::from_fen(&tables, $fen).unwrap();

                $(assert_eq!(board.perft(&tables, $depth), $nodes);)+
            }
        };
    }

    perft_test!(
        perft_startpos,
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        1 => 20,
        2 => 400,
        3 => 8902,
        4 => 197281,
    );

    perft_test!(
        perft_kiwipete,
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        1 => 48,
        2 => 2039,
        3 => 97862,
    );

    perft_test!(
        perft_endgame_pins,
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        1 => 14,
        2 => 191,
        3 => 2812,
        4 => 43238,
    );

    perft_test!(
        perft_promotions,
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        1 => 6,
        2 => 264,
        3 => 9467,
    );

    perft_test!(
        perft_buggy_castle_rights,
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        1 => 44,
        2 => 1486,
        3 => 62379,
    );
}
