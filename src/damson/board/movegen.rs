use arrayvec::ArrayVec;

use crate::*;

/*----------------------------------------------------------------*/

/// Upper bound on legal moves in any reachable position.
pub const MAX_MOVES: usize = 218;

pub type MoveList = ArrayVec<Move, MAX_MOVES>;

/*----------------------------------------------------------------*/

impl Board {
    /// Generates every legal move for the side to move.
    pub fn gen_moves(&self, tables: &Tables) -> MoveList {
        self.generate(tables, false)
    }

    /// Generates legal captures only, for quiescence.
    pub fn gen_captures(&self, tables: &Tables) -> MoveList {
        self.generate(tables, true)
    }

    fn generate(&self, tables: &Tables, captures_only: bool) -> MoveList {
        let mut moves = MoveList::new();

        let us = self.side_to_move();
        let them = !us;
        let our_occ = self.colors(us);
        let their_occ = self.colors(them);
        let occ = self.occupied();
        let king = self.king(us);

        /*----------------------------------------------------------------*/

        let mut king_targets = king_attacks(king) & !our_occ & !self.analysis.attacks;

        if captures_only {
            king_targets &= their_occ;
        }

        for to in king_targets {
            moves.push(Move::new(king, to, MoveKind::Normal));
        }

        // Only the king can move out of a double check.
        if self.analysis.double_check {
            return moves;
        }

        /*----------------------------------------------------------------*/

        let check_mask = if self.analysis.check {
            self.analysis.threat
        } else {
            Bitboard::FULL
        };
        let base_targets = if captures_only { their_occ } else { !our_occ };

        let dy: i8 = if us == Color::White { 1 } else { -1 };
        let promo_rank = Rank::Eighth.relative_to(us);
        let double_rank = Rank::Second.relative_to(us);

        for from in self.colored_pieces(us, Piece::Pawn) {
            let mask = check_mask & self.analysis.pin_ray(from);

            if !captures_only {
                if let Some(to) = from.try_offset(0, dy) {
                    if !occ.has(to) {
                        if mask.has(to) {
                            push_pawn_moves(&mut moves, from, to, promo_rank);
                        }

                        if from.rank() == double_rank {
                            if let Some(to2) = from.try_offset(0, 2 * dy) {
                                if !occ.has(to2) && mask.has(to2) {
                                    moves.push(Move::new(from, to2, MoveKind::Normal));
                                }
                            }
                        }
                    }
                }
            }

            for to in pawn_attacks(from, us) & their_occ & mask {
                push_pawn_moves(&mut moves, from, to, promo_rank);
            }

            if let Some(ep) = self.en_passant() {
                if pawn_attacks(from, us).has(ep) && self.ep_is_legal(tables, from, ep) {
                    moves.push(Move::new(from, ep, MoveKind::EnPassant));
                }
            }
        }

        /*----------------------------------------------------------------*/

        for from in self.colored_pieces(us, Piece::Knight) {
            // A pinned knight never has a legal move; the ray intersection
            // comes out empty by itself.
            let targets =
                knight_attacks(from) & base_targets & check_mask & self.analysis.pin_ray(from);

            for to in targets {
                moves.push(Move::new(from, to, MoveKind::Normal));
            }
        }

        for from in self.colored_pieces(us, Piece::Bishop) {
            let targets = tables.bishop_moves(from, occ)
                & base_targets
                & check_mask
                & self.analysis.pin_ray(from);

            for to in targets {
                moves.push(Move::new(from, to, MoveKind::Normal));
            }
        }

        for from in self.colored_pieces(us, Piece::Rook) {
            let targets = tables.rook_moves(from, occ)
                & base_targets
                & check_mask
                & self.analysis.pin_ray(from);

            for to in targets {
                moves.push(Move::new(from, to, MoveKind::Normal));
            }
        }

        for from in self.colored_pieces(us, Piece::Queen) {
            let targets = tables.queen_moves(from, occ)
                & base_targets
                & check_mask
                & self.analysis.pin_ray(from);

            for to in targets {
                moves.push(Move::new(from, to, MoveKind::Normal));
            }
        }

        /*----------------------------------------------------------------*/

        if !captures_only && !self.analysis.check {
            self.gen_castles(&mut moves);
        }

        moves
    }

    /*----------------------------------------------------------------*/

    fn gen_castles(&self, moves: &mut MoveList) {
        let us = self.side_to_move();
        let home = Rank::First.relative_to(us);
        let occ = self.occupied();
        let unsafe_squares = self.analysis.attacks;
        let rights = self.castle_rights();

        let king = Square::new(File::E, home);
        let rooks = self.colored_pieces(us, Piece::Rook);

        if self.king(us) != king {
            return;
        }

        if rights.short[us] && rooks.has(Square::new(File::H, home)) {
            let f = Square::new(File::F, home);
            let g = Square::new(File::G, home);

            if !occ.has(f) && !occ.has(g) && !unsafe_squares.has(f) && !unsafe_squares.has(g) {
                moves.push(Move::new(king, g, MoveKind::Castle));
            }
        }

        if rights.long[us] && rooks.has(Square::new(File::A, home)) {
            let b = Square::new(File::B, home);
            let c = Square::new(File::C, home);
            let d = Square::new(File::D, home);

            // The rook may pass through an attacked b-square.
            if !occ.has(b)
                && !occ.has(c)
                && !occ.has(d)
                && !unsafe_squares.has(c)
                && !unsafe_squares.has(d)
            {
                moves.push(Move::new(king, c, MoveKind::Castle));
            }
        }
    }

    /*----------------------------------------------------------------*/

    /// En passant is the one move the pin and check masks cannot vet, since
    /// it clears two squares on the capturing rank at once. Replay it on a
    /// scratch occupancy and test the king directly.
    fn ep_is_legal(&self, tables: &Tables, from: Square, to: Square) -> bool {
        let us = self.side_to_move();
        let them = !us;
        let king = self.king(us);
        let captured = Square::new(to.file(), from.rank());

        let occ = (self.occupied() ^ from.bitboard() ^ captured.bitboard()) | to.bitboard();

        let diag_sliders =
            self.colored_pieces(them, Piece::Bishop) | self.colored_pieces(them, Piece::Queen);
        let line_sliders =
            self.colored_pieces(them, Piece::Rook) | self.colored_pieces(them, Piece::Queen);

        (tables.bishop_moves(king, occ) & diag_sliders).is_empty()
            && (tables.rook_moves(king, occ) & line_sliders).is_empty()
            && (knight_attacks(king) & self.colored_pieces(them, Piece::Knight)).is_empty()
            && (pawn_attacks(king, us)
                & (self.colored_pieces(them, Piece::Pawn) & !captured.bitboard()))
            .is_empty()
    }

    /*----------------------------------------------------------------*/

    /// Whether a legal move for the side to move checks the opponent,
    /// either directly from its destination or by discovery.
    pub fn gives_check(&self, tables: &Tables, mv: Move) -> bool {
        let us = self.side_to_move();
        let them = !us;
        let their_king = self.king(them);

        let Some((_, piece)) = self.piece_on(mv.from) else {
            return false;
        };
        let final_piece = mv.promotion().unwrap_or(piece);

        let mut occ = (self.occupied() ^ mv.from.bitboard()) | mv.to.bitboard();

        match mv.kind {
            MoveKind::EnPassant => {
                occ ^= Square::new(mv.to.file(), mv.from.rank()).bitboard();
            }
            MoveKind::Castle => {
                let (rook_from, rook_to) = castle_rook_squares(mv.to);
                occ = (occ ^ rook_from.bitboard()) | rook_to.bitboard();

                if tables.rook_moves(rook_to, occ).has(their_king) {
                    return true;
                }
            }
            _ => {}
        }

        let direct = match final_piece {
            Piece::Pawn => pawn_attacks(mv.to, us).has(their_king),
            Piece::Knight => knight_attacks(mv.to).has(their_king),
            Piece::Bishop => tables.bishop_moves(mv.to, occ).has(their_king),
            Piece::Rook => tables.rook_moves(mv.to, occ).has(their_king),
            Piece::Queen => tables.queen_moves(mv.to, occ).has(their_king),
            Piece::King => false,
        };

        if direct {
            return true;
        }

        // The moved piece already had its say from the destination; drop it
        // from the slider sets and look for a discovered attacker behind the
        // vacated square.
        let diag_sliders = (self.colored_pieces(us, Piece::Bishop)
            | self.colored_pieces(us, Piece::Queen))
            & !mv.from.bitboard();
        let line_sliders = (self.colored_pieces(us, Piece::Rook)
            | self.colored_pieces(us, Piece::Queen))
            & !mv.from.bitboard();

        !(tables.bishop_moves(their_king, occ) & diag_sliders).is_empty()
            || !(tables.rook_moves(their_king, occ) & line_sliders).is_empty()
    }
}

/*----------------------------------------------------------------*/

/// Rook relocation for a castling move keyed by the king's destination.
pub(crate) fn castle_rook_squares(king_to: Square) -> (Square, Square) {
    let home = king_to.rank();

    if king_to.file() == File::G {
        (Square::new(File::H, home), Square::new(File::F, home))
    } else {
        (Square::new(File::A, home), Square::new(File::D, home))
    }
}

fn push_pawn_moves(moves: &mut MoveList, from: Square, to: Square, promo_rank: Rank) {
    if to.rank() == promo_rank {
        moves.push(Move::new(from, to, MoveKind::PromoteQueen));
        moves.push(Move::new(from, to, MoveKind::PromoteRook));
        moves.push(Move::new(from, to, MoveKind::PromoteBishop));
        moves.push(Move::new(from, to, MoveKind::PromoteKnight));
    } else {
        moves.push(Move::new(from, to, MoveKind::Normal));
    }
}

/*----------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;

    fn moves_of(fen: &str) -> (Tables, MoveList) {
        let tables = Tables::new();
        let board = Board::from_fen(&tables, fen).unwrap();
        let moves = board.gen_moves(&tables);
        (tables, moves)
    }

    fn contains(moves: &MoveList, s: &str) -> bool {
        moves.iter().any(|m| m.to_string() == s)
    }

    #[test]
    fn startpos_has_twenty_moves() {
        let tables = Tables::new();
        let board = Board::startpos(&tables);

        assert_eq!(board.gen_moves(&tables).len(), 20);
        assert_eq!(board.gen_captures(&tables).len(), 0);
    }

    #[test]
    fn double_check_only_king_moves() {
        let (_, moves) = moves_of("4k3/8/8/8/8/5n2/3q4/4K3 w - - 0 1");

        assert!(moves.iter().all(|m| m.from == Square::E1));
    }

    #[test]
    fn check_must_be_resolved() {
        // Rook check along the e-file; block with the queen or step aside.
        let (_, moves) = moves_of("4k3/8/8/8/4r3/8/3P1P2/4KQ2 w - - 0 1");

        assert!(contains(&moves, "f1e2"));
        assert!(contains(&moves, "e1d1"));
        assert!(!contains(&moves, "d2d4"));
        assert!(!contains(&moves, "f1g2"));
    }

    #[test]
    fn pinned_piece_stays_on_ray() {
        let (_, moves) = moves_of("4k3/4r3/8/8/8/8/4R3/4K3 w - - 0 1");

        assert!(moves
            .iter()
            .filter(|m| m.from == Square::E2)
            .all(|m| m.to.file() == File::E));
    }

    #[test]
    fn en_passant_discovered_check_is_illegal() {
        // Capturing e5xd6 would clear the fifth rank for the h5 rook.
        let (_, moves) = moves_of("8/8/8/K2pP2r/8/8/8/4k3 w - d6 0 1");

        assert!(!contains(&moves, "e5d6"));
    }

    #[test]
    fn en_passant_resolves_pawn_check() {
        let tables = Tables::new();
        let board = Board::from_fen(&tables, "8/8/8/2k5/3Pp3/8/8/4K3 b - d3 0 1").unwrap();
        let moves = board.gen_moves(&tables);

        assert!(contains(&moves, "e4d3"));
    }

    #[test]
    fn castling_through_attack_is_illegal() {
        let (_, moves) = moves_of("r3k2r/8/8/8/8/8/5q2/R3K2R w KQkq - 0 1");

        assert!(!contains(&moves, "e1g1"));
        assert!(!contains(&moves, "e1c1"));

        let (_, moves) = moves_of("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");

        assert!(contains(&moves, "e1g1"));
        assert!(contains(&moves, "e1c1"));
    }

    #[test]
    fn promotions_fan_out() {
        let (_, moves) = moves_of("8/P6k/8/8/8/8/8/K7 w - - 0 1");

        for s in ["a7a8q", "a7a8r", "a7a8b", "a7a8n"] {
            assert!(contains(&moves, s));
        }
    }

    #[test]
    fn captures_only_is_a_subset() {
        let tables = Tables::new();
        let board = Board::from_fen(
            &tables,
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .unwrap();

        let all = board.gen_moves(&tables);
        let caps = board.gen_captures(&tables);

        assert_eq!(all.len(), 48);
        assert!(caps.len() < all.len());

        for m in &caps {
            assert!(all.contains(m));
            assert!(
                board.piece_on(m.to).is_some() || m.kind == MoveKind::EnPassant,
                "{m} is not a capture"
            );
        }
    }

    #[test]
    fn gives_check_direct_and_discovered() {
        let tables = Tables::new();

        let board = Board::from_fen(&tables, "4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        let mv = Move::parse(&board, "a1a8").unwrap();
        assert!(board.gives_check(&tables, mv));

        // Knight steps off the e-file and uncovers the rook.
        let board = Board::from_fen(&tables, "4k3/8/8/8/4N3/8/8/4RK2 w - - 0 1").unwrap();
        let mv = Move::parse(&board, "e4g3").unwrap();
        assert!(board.gives_check(&tables, mv));

        let mv = Move::parse(&board, "f1g2").unwrap();
        assert!(!board.gives_check(&tables, mv));
    }
}
