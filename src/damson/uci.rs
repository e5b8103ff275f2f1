use crate::*;

/*----------------------------------------------------------------*/

#[derive(Debug, Clone)]
pub enum UciCommand {
    Uci,
    NewGame,
    IsReady,
    Position(Board, Vec<Move>),
    Go(Vec<SearchLimit>),
    SetOption { name: String, value: String },
    Eval,
    Display,
    Perft(u32),
    Bench { depth: u8, hash: usize },
    Stop,
    Quit,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UciParseError {
    InvalidCommand,
    InvalidArguments,
}

/*----------------------------------------------------------------*/

impl UciCommand {
    pub fn parse(tables: &Tables, s: &str) -> Result<UciCommand, UciParseError> {
        let mut reader = s.split_ascii_whitespace();
        let token = reader.next().ok_or(UciParseError::InvalidCommand)?;

        match token {
            "uci" => Ok(UciCommand::Uci),
            "ucinewgame" => Ok(UciCommand::NewGame),
            "isready" => Ok(UciCommand::IsReady),
            "stop" => Ok(UciCommand::Stop),
            "quit" | "q" => Ok(UciCommand::Quit),
            "eval" => Ok(UciCommand::Eval),
            "display" | "d" => Ok(UciCommand::Display),
            "perft" => Ok(UciCommand::Perft(
                reader
                    .next()
                    .and_then(|s| s.parse().ok())
                    .ok_or(UciParseError::InvalidArguments)?,
            )),
            "bench" => Ok(UciCommand::Bench {
                depth: reader.next().and_then(|s| s.parse().ok()).unwrap_or(5),
                hash: reader
                    .next()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_HASH_MB),
            }),
            "position" => {
                let board_kind = reader.next().ok_or(UciParseError::InvalidArguments)?;
                let mut saw_moves = false;

                let board = match board_kind {
                    "startpos" => Board::startpos(tables),
                    "fen" => {
                        let mut fen = String::new();

                        for part in reader.by_ref() {
                            if part == "moves" {
                                saw_moves = true;
                                break;
                            }

                            fen.push_str(part);
                            fen.push(' ');
                        }

                        Board::from_fen(tables, fen.trim())
                            .map_err(|_| UciParseError::InvalidArguments)?
                    }
                    _ => return Err(UciParseError::InvalidArguments),
                };

                if !saw_moves {
                    saw_moves = reader.next().is_some_and(|s| s == "moves");
                }

                let mut moves = Vec::new();

                if saw_moves {
                    let mut scratch = board.clone();

                    for token in reader {
                        let mv = Move::parse(&scratch, token)
                            .map_err(|_| UciParseError::InvalidArguments)?;

                        if !scratch.gen_moves(tables).contains(&mv) {
                            return Err(UciParseError::InvalidArguments);
                        }

                        scratch.make_move(tables, mv);
                        moves.push(mv);
                    }
                }

                Ok(UciCommand::Position(board, moves))
            }
            "go" => {
                let mut limits = Vec::new();

                while let Some(token) = reader.next() {
                    limits.push(match token {
                        "wtime" => SearchLimit::WhiteTime(parse_millis(&mut reader)?),
                        "btime" => SearchLimit::BlackTime(parse_millis(&mut reader)?),
                        "winc" => SearchLimit::WhiteInc(parse_millis(&mut reader)?),
                        "binc" => SearchLimit::BlackInc(parse_millis(&mut reader)?),
                        "movetime" => SearchLimit::MoveTime(parse_millis(&mut reader)?),
                        "movestogo" => SearchLimit::MovesToGo(parse_next(&mut reader)?),
                        "depth" => SearchLimit::MaxDepth(parse_next(&mut reader)?),
                        "nodes" => SearchLimit::MaxNodes(parse_next(&mut reader)?),
                        "infinite" => SearchLimit::Infinite,
                        _ => return Err(UciParseError::InvalidArguments),
                    });
                }

                Ok(UciCommand::Go(limits))
            }
            "setoption" => {
                reader
                    .next()
                    .filter(|&s| s == "name")
                    .ok_or(UciParseError::InvalidArguments)?;

                let mut name_parts = Vec::new();

                for token in reader.by_ref() {
                    if token == "value" {
                        break;
                    }

                    name_parts.push(token);
                }

                Ok(UciCommand::SetOption {
                    name: name_parts.join(" "),
                    value: reader.collect::<Vec<_>>().join(" "),
                })
            }
            _ => Err(UciParseError::InvalidCommand),
        }
    }
}

/*----------------------------------------------------------------*/

fn parse_next<'a, T, I>(tokens: &mut I) -> Result<T, UciParseError>
where
    T: std::str::FromStr,
    I: Iterator<Item = &'a str>,
{
    tokens
        .next()
        .and_then(|s| s.parse().ok())
        .ok_or(UciParseError::InvalidArguments)
}

/// Clocks can go negative in some GUIs; clamp instead of failing.
fn parse_millis<'a, I: Iterator<Item = &'a str>>(tokens: &mut I) -> Result<u64, UciParseError> {
    parse_next::<i64, I>(tokens).map(|n| n.max(0) as u64)
}

/*----------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_position_with_moves() {
        let tables = Tables::new();
        let cmd = UciCommand::parse(&tables, "position startpos moves e2e4 e7e5").unwrap();

        let UciCommand::Position(board, moves) = cmd else {
            panic!("wrong command");
        };

        assert_eq!(board, Board::startpos(&tables));
        assert_eq!(moves.len(), 2);
        assert_eq!(moves[0].to_string(), "e2e4");
    }

    #[test]
    fn parses_position_from_fen() {
        let tables = Tables::new();
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        let cmd = UciCommand::parse(&tables, &format!("position fen {fen} moves e5g6")).unwrap();

        let UciCommand::Position(board, moves) = cmd else {
            panic!("wrong command");
        };

        assert_eq!(board.to_fen(), fen);
        assert_eq!(moves.len(), 1);
    }

    #[test]
    fn rejects_illegal_position_moves() {
        let tables = Tables::new();

        assert!(UciCommand::parse(&tables, "position startpos moves e2e5").is_err());
        assert!(UciCommand::parse(&tables, "position fen bogus").is_err());
    }

    #[test]
    fn parses_go_limits() {
        let tables = Tables::new();
        let cmd =
            UciCommand::parse(&tables, "go wtime 30000 btime 28000 winc 500 depth 12").unwrap();

        let UciCommand::Go(limits) = cmd else {
            panic!("wrong command");
        };

        assert_eq!(
            limits,
            vec![
                SearchLimit::WhiteTime(30000),
                SearchLimit::BlackTime(28000),
                SearchLimit::WhiteInc(500),
                SearchLimit::MaxDepth(12),
            ]
        );
    }

    #[test]
    fn parses_setoption_with_spaces() {
        let tables = Tables::new();
        let cmd =
            UciCommand::parse(&tables, "setoption name Book File value /tmp/openings.bin")
                .unwrap();

        let UciCommand::SetOption { name, value } = cmd else {
            panic!("wrong command");
        };

        assert_eq!(name, "Book File");
        assert_eq!(value, "/tmp/openings.bin");
    }

    #[test]
    fn unknown_commands_error_out() {
        let tables = Tables::new();

        assert!(UciCommand::parse(&tables, "flarp").is_err());
        assert!(UciCommand::parse(&tables, "").is_err());
    }
}
