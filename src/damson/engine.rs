use std::{
    path::Path,
    sync::{Arc, Mutex, mpsc::*},
    time::Instant,
};

use crate::*;

/*----------------------------------------------------------------*/

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

const BENCH_POSITIONS: &[&str] = &[
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
    "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
    "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
    "4rrk1/2p1b1p1/p1p3q1/4p3/2P2n1p/1P1NR2P/PB3PP1/3R1QK1 b - - 2 24",
    "6k1/1R3p2/6p1/2Bp3p/3P2q1/P7/1P2rQ1K/5R2 b - - 4 44",
    "8/8/1p2k1p1/3p3p/1p1P1P1P/1P2PK2/8/8 w - - 3 54",
    "r1bq1rk1/pp2b1pp/n1pp1n2/3P1p2/2P1p3/2N1P2N/PP2BPPP/R1BQ1RK1 b - - 2 10",
    "8/5k2/1pnrp1p1/p1p4p/P6P/4R1PK/1P3P2/4R3 b - - 1 38",
    "2r2b2/5p2/5k2/p1r1pP2/P2pB3/1P3P2/K1P3R1/7R w - - 23 93",
];

/*----------------------------------------------------------------*/

pub enum ThreadCommand {
    Go(Arc<Mutex<Searcher>>, Vec<SearchLimit>),
    Position(Arc<Mutex<Searcher>>, Board, Vec<Move>),
    SetOption(Arc<Mutex<Searcher>>, String, String),
    NewGame(Arc<Mutex<Searcher>>),
    Quit,
}

pub struct Engine {
    searcher: Arc<Mutex<Searcher>>,
    time_man: Arc<TimeManager>,
    tables: Arc<Tables>,
    sender: Sender<ThreadCommand>,
}

impl Engine {
    pub fn new() -> Engine {
        let tables = Arc::new(Tables::new());
        let time_man = Arc::new(TimeManager::new());
        let searcher = Arc::new(Mutex::new(Searcher::new(
            Arc::clone(&tables),
            Arc::clone(&time_man),
            DEFAULT_HASH_MB,
        )));

        {
            let time_man = Arc::clone(&time_man);
            ctrlc::set_handler(move || time_man.stop()).ok();
        }

        let (tx, rx): (Sender<ThreadCommand>, Receiver<ThreadCommand>) = channel();
        std::thread::spawn(move || {
            while let Ok(cmd) = rx.recv() {
                match cmd {
                    ThreadCommand::Go(searcher, limits) => {
                        let mut searcher = searcher.lock().unwrap();
                        let searcher = &mut *searcher;

                        let book_move = searcher
                            .book
                            .as_ref()
                            .and_then(|b| b.probe(&searcher.board, &searcher.tables));

                        let best = match book_move {
                            Some(mv) => Some(mv),
                            None => searcher.search(&limits, &mut UciInfo).best_move,
                        };

                        match best {
                            Some(mv) => println!("bestmove {mv}"),
                            None => println!("bestmove 0000"),
                        }
                    }
                    ThreadCommand::Position(searcher, board, moves) => {
                        let mut searcher = searcher.lock().unwrap();
                        let searcher = &mut *searcher;

                        searcher.board = board;

                        for mv in moves {
                            searcher.board.make_move(&searcher.tables, mv);
                        }
                    }
                    ThreadCommand::SetOption(searcher, name, value) => {
                        let mut searcher = searcher.lock().unwrap();

                        match name.as_str() {
                            "Hash" => {
                                if let Ok(mb) = value.parse::<usize>() {
                                    searcher.tt.resize(mb.max(1));
                                }
                            }
                            "Book" => match Book::load(Path::new(&value)) {
                                Ok(book) => {
                                    println!("info string book loaded, {} entries", book.len());
                                    searcher.book = Some(book);
                                }
                                Err(e) => {
                                    println!("info string book not loaded: {e}");
                                    searcher.book = None;
                                }
                            },
                            _ => {}
                        }
                    }
                    ThreadCommand::Quit => return,
                    ThreadCommand::NewGame(searcher) => searcher.lock().unwrap().new_game(),
                }
            }
        });

        Engine {
            searcher,
            time_man,
            tables,
            sender: tx,
        }
    }

    /*----------------------------------------------------------------*/

    /// Handles one line of input. Returns false when the engine should
    /// exit.
    pub fn input(&mut self, input: &str, bytes: usize) -> bool {
        let cmd = if bytes == 0 {
            UciCommand::Quit
        } else {
            match UciCommand::parse(&self.tables, input) {
                Ok(cmd) => cmd,
                Err(e) => {
                    println!("info string {e:?}");
                    return true;
                }
            }
        };

        match cmd {
            UciCommand::Uci => {
                println!("id name Damson v{ENGINE_VERSION}");
                println!("id author the Damson developers");
                println!("option name Hash type spin default {DEFAULT_HASH_MB} min 1 max 65535");
                println!("option name Book type string default <empty>");
                println!("uciok");
            }
            UciCommand::IsReady => println!("readyok"),
            UciCommand::Stop => self.time_man.stop(),
            UciCommand::NewGame => {
                self.send(ThreadCommand::NewGame(Arc::clone(&self.searcher)));
            }
            UciCommand::Display => {
                let searcher = self.searcher.lock().unwrap();

                println!("\n{}", searcher.board);
                println!("FEN: {}", searcher.board.to_fen());
            }
            UciCommand::Eval => {
                let searcher = self.searcher.lock().unwrap();

                println!("eval: {}", evaluate(&searcher.board));
            }
            UciCommand::Perft(depth) => {
                let mut searcher = self.searcher.lock().unwrap();
                let searcher = &mut *searcher;
                let start = Instant::now();
                let nodes = searcher.board.divide(&searcher.tables, depth);
                let millis = start.elapsed().as_millis() as u64;

                println!("time: {millis} ms ({} nps)", nodes * 1000 / millis.max(1));
            }
            UciCommand::Position(board, moves) => {
                self.send(ThreadCommand::Position(
                    Arc::clone(&self.searcher),
                    board,
                    moves,
                ));
            }
            UciCommand::Go(limits) => {
                self.send(ThreadCommand::Go(Arc::clone(&self.searcher), limits));
            }
            UciCommand::SetOption { name, value } => {
                self.send(ThreadCommand::SetOption(
                    Arc::clone(&self.searcher),
                    name,
                    value,
                ));
            }
            UciCommand::Bench { depth, hash } => self.bench(depth, hash),
            UciCommand::Quit => {
                self.time_man.stop();
                self.send(ThreadCommand::Quit);
                return false;
            }
        }

        true
    }

    fn send(&self, cmd: ThreadCommand) {
        self.sender.send(cmd).ok();
    }

    /*----------------------------------------------------------------*/

    fn bench(&self, depth: u8, hash: usize) {
        let mut searcher = self.searcher.lock().unwrap();
        let searcher = &mut *searcher;
        let limits = vec![SearchLimit::MaxDepth(depth)];

        searcher.tt.resize(hash.max(1));

        let mut total_nodes = 0;
        let start = Instant::now();

        for (i, fen) in BENCH_POSITIONS.iter().enumerate() {
            let Ok(board) = Board::from_fen(&searcher.tables, fen) else {
                continue;
            };

            searcher.board = board;
            searcher.new_game();

            let result = searcher.search(&limits, &mut NoInfo);
            total_nodes += result.nodes;

            println!(
                "[#{:>2}] {:>8} nodes, best {}, score {}",
                i + 1,
                result.nodes,
                result.best_move.map_or("0000".into(), |m| m.to_string()),
                result.score,
            );
        }

        let millis = start.elapsed().as_millis() as u64;

        println!(
            "\n{total_nodes} nodes {} nps",
            total_nodes * 1000 / millis.max(1)
        );
    }
}

impl Default for Engine {
    fn default() -> Engine {
        Engine::new()
    }
}
