use core::ops::{Deref, DerefMut};

use crate::*;

/*----------------------------------------------------------------*/

/// Everything make_move cannot cheaply recompute on the way back. Undo
/// records must be applied in reverse order of creation.
#[derive(Debug, Clone)]
pub struct UndoRecord {
    mv: Move,
    captured: Option<(Piece, Square)>,
    en_passant: Option<Square>,
    castle_rights: CastleRights,
    halfmove_clock: u8,
    last_irreversible: usize,
    hash: u64,
    draw: bool,
    analysis: Analysis,
}

#[derive(Debug, Clone)]
pub struct NullUndo {
    en_passant: Option<Square>,
    hash: u64,
    analysis: Analysis,
}

/*----------------------------------------------------------------*/

impl Board {
    /// Applies a legal move and returns the record needed to take it back.
    pub fn make_move(&mut self, tables: &Tables, mv: Move) -> UndoRecord {
        let us = self.side_to_move();
        let them = !us;
        let (_, piece) = self
            .piece_on(mv.from)
            .unwrap_or_else(|| unreachable!("make_move() from empty square"));

        let mut undo = UndoRecord {
            mv,
            captured: None,
            en_passant: self.en_passant(),
            castle_rights: self.castle_rights(),
            halfmove_clock: self.halfmove_clock(),
            last_irreversible: self.last_irreversible(),
            hash: self.hash(),
            draw: self.is_draw(),
            analysis: self.analysis.clone(),
        };

        /*----------------------------------------------------------------*/

        self.bump_halfmove_clock();

        let captured = match mv.kind {
            MoveKind::EnPassant => Some((Piece::Pawn, Square::new(mv.to.file(), mv.from.rank()))),
            _ => self.piece_on(mv.to).map(|(_, p)| (p, mv.to)),
        };

        if let Some((cap_piece, cap_sq)) = captured {
            self.remove_piece(them, cap_piece, cap_sq);
            self.set_halfmove_clock(0);
        }

        if piece == Piece::Pawn {
            self.set_halfmove_clock(0);
        }

        undo.captured = captured;

        /*----------------------------------------------------------------*/

        match mv.promotion() {
            Some(promo) => {
                self.remove_piece(us, Piece::Pawn, mv.from);
                self.add_piece(us, promo, mv.to);
            }
            None => self.move_piece(us, piece, mv.from, mv.to),
        }

        if mv.kind == MoveKind::Castle {
            let (rook_from, rook_to) = castle_rook_squares(mv.to);
            self.move_piece(us, Piece::Rook, rook_from, rook_to);
        }

        /*----------------------------------------------------------------*/

        let mut rights = self.castle_rights();
        strip_rights(&mut rights, mv.from);
        strip_rights(&mut rights, mv.to);

        if rights != self.castle_rights() {
            self.set_castle_rights(rights);
        }

        let double_push = piece == Piece::Pawn
            && (mv.from.rank() as i8 - mv.to.rank() as i8).abs() == 2;

        self.set_en_passant(
            double_push.then(|| Square::new(mv.from.file(), Rank::Third.relative_to(us))),
        );

        self.toggle_side_to_move();

        if us == Color::Black {
            self.bump_fullmove_number();
        }

        /*----------------------------------------------------------------*/

        if piece == Piece::Pawn || captured.is_some() {
            self.set_last_irreversible(self.history_len());
        }

        self.history_push(self.hash());
        self.set_draw(self.halfmove_clock() >= 100 || self.repetitions() >= 3);
        self.update_analysis(tables);

        debug_assert_eq!(self.hash(), self.calc_hash());
        debug_assert!(
            !self.square_attacked(tables, self.king(us), them),
            "make_move() left the mover in check: {mv}"
        );

        undo
    }

    /// Reverts the most recent make_move.
    pub fn unmake_move(&mut self, undo: UndoRecord) {
        self.flip_side_raw();

        let us = self.side_to_move();
        let them = !us;
        let mv = undo.mv;

        match mv.promotion() {
            Some(promo) => {
                self.take(us, promo, mv.to);
                self.put(us, Piece::Pawn, mv.from);
            }
            None => {
                let (_, piece) = self
                    .piece_on(mv.to)
                    .unwrap_or_else(|| unreachable!("unmake_move() of empty square"));
                self.relocate(us, piece, mv.to, mv.from);
            }
        }

        if mv.kind == MoveKind::Castle {
            let (rook_from, rook_to) = castle_rook_squares(mv.to);
            self.relocate(us, Piece::Rook, rook_to, rook_from);
        }

        if let Some((cap_piece, cap_sq)) = undo.captured {
            self.put(them, cap_piece, cap_sq);
        }

        /*----------------------------------------------------------------*/

        self.restore_en_passant(undo.en_passant);
        self.restore_castle_rights(undo.castle_rights);
        self.set_halfmove_clock(undo.halfmove_clock);
        self.set_last_irreversible(undo.last_irreversible);
        self.set_hash(undo.hash);
        self.set_draw(undo.draw);
        self.analysis = undo.analysis;
        self.history_pop();

        if us == Color::Black {
            self.set_fullmove_number(self.fullmove_number() - 1);
        }
    }

    /*----------------------------------------------------------------*/

    /// Passes the turn. Only the side to move, the en-passant target, and
    /// the derived analysis change; the move counters stay put.
    pub fn make_null(&mut self, tables: &Tables) -> NullUndo {
        let undo = NullUndo {
            en_passant: self.en_passant(),
            hash: self.hash(),
            analysis: self.analysis.clone(),
        };

        self.set_en_passant(None);
        self.toggle_side_to_move();
        self.update_analysis(tables);

        undo
    }

    pub fn unmake_null(&mut self, undo: NullUndo) {
        self.flip_side_raw();
        self.restore_en_passant(undo.en_passant);
        self.set_hash(undo.hash);
        self.analysis = undo.analysis;
    }

    /*----------------------------------------------------------------*/

    #[inline]
    pub fn play<'a>(&'a mut self, tables: &Tables, mv: Move) -> MoveGuard<'a> {
        let undo = self.make_move(tables, mv);

        MoveGuard {
            board: self,
            undo: Some(undo),
        }
    }

    #[inline]
    pub fn play_null<'a>(&'a mut self, tables: &Tables) -> NullGuard<'a> {
        let undo = self.make_null(tables);

        NullGuard {
            board: self,
            undo: Some(undo),
        }
    }
}

/*----------------------------------------------------------------*/

fn strip_rights(rights: &mut CastleRights, sq: Square) {
    match sq {
        Square::A1 => rights.long[Color::White] = false,
        Square::H1 => rights.short[Color::White] = false,
        Square::E1 => {
            rights.short[Color::White] = false;
            rights.long[Color::White] = false;
        }
        Square::A8 => rights.long[Color::Black] = false,
        Square::H8 => rights.short[Color::Black] = false,
        Square::E8 => {
            rights.short[Color::Black] = false;
            rights.long[Color::Black] = false;
        }
        _ => {}
    }
}

/*----------------------------------------------------------------*/

/// Scoped unmake. The move is taken back when the guard drops, which keeps
/// make and unmake paired even on early returns.
pub struct MoveGuard<'a> {
    board: &'a mut Board,
    undo: Option<UndoRecord>,
}

impl Deref for MoveGuard<'_> {
    type Target = Board;

    #[inline]
    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for MoveGuard<'_> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for MoveGuard<'_> {
    #[inline]
    fn drop(&mut self) {
        if let Some(undo) = self.undo.take() {
            self.board.unmake_move(undo);
        }
    }
}

pub struct NullGuard<'a> {
    board: &'a mut Board,
    undo: Option<NullUndo>,
}

impl Deref for NullGuard<'_> {
    type Target = Board;

    #[inline]
    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for NullGuard<'_> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for NullGuard<'_> {
    #[inline]
    fn drop(&mut self) {
        if let Some(undo) = self.undo.take() {
            self.board.unmake_null(undo);
        }
    }
}

/*----------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn make_unmake_round_trip() {
        let tables = Tables::new();
        let mut board = Board::from_fen(
            &tables,
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .unwrap();
        let original = board.clone();

        for mv in board.gen_moves(&tables) {
            {
                let child = board.play(&tables, mv);
                assert_eq!(child.hash(), child.calc_hash(), "hash drift after {mv}");
            }

            assert_eq!(board, original, "round trip failed for {mv}");
            assert_eq!(board.hash(), original.hash());
        }
    }

    #[test]
    fn null_move_round_trip() {
        let tables = Tables::new();
        let mut board = Board::from_fen(
            &tables,
            "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2",
        )
        .unwrap();
        let original = board.clone();

        {
            let passed = board.play_null(&tables);
            assert_eq!(passed.side_to_move(), Color::Black);
            assert_eq!(passed.en_passant(), None);
            assert_eq!(passed.hash(), passed.calc_hash());
        }

        assert_eq!(board, original);
    }

    #[test]
    fn en_passant_make_restores_pawn() {
        let tables = Tables::new();
        let mut board = Board::from_fen(
            &tables,
            "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2",
        )
        .unwrap();
        let original = board.clone();
        let mv = Move::parse(&board, "e5d6").unwrap();

        {
            let child = board.play(&tables, mv);
            assert_eq!(child.piece_on(Square::D6), Some((Color::White, Piece::Pawn)));
            assert_eq!(child.piece_on(Square::D5), None);
        }

        assert_eq!(board, original);
    }

    #[test]
    fn castling_moves_the_rook() {
        let tables = Tables::new();
        let mut board =
            Board::from_fen(&tables, "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let mv = Move::parse(&board, "e1g1").unwrap();

        let child = board.play(&tables, mv);

        assert_eq!(child.piece_on(Square::G1), Some((Color::White, Piece::King)));
        assert_eq!(child.piece_on(Square::F1), Some((Color::White, Piece::Rook)));
        assert!(!child.castle_rights().short[Color::White]);
        assert!(!child.castle_rights().long[Color::White]);
        assert!(child.castle_rights().short[Color::Black]);
    }

    #[test]
    fn threefold_repetition_is_a_draw() {
        let tables = Tables::new();
        let mut board = Board::startpos(&tables);

        for _ in 0..2 {
            for s in ["g1f3", "g8f6", "f3g1", "f6g8"] {
                let mv = Move::parse(&board, s).unwrap();
                board.make_move(&tables, mv);
            }
        }

        assert!(board.is_draw());
    }

    #[test]
    fn fifty_move_rule_is_a_draw() {
        let tables = Tables::new();
        let mut board =
            Board::from_fen(&tables, "4k3/8/8/8/8/8/8/R3K3 w - - 99 80").unwrap();
        let mv = Move::parse(&board, "a1a2").unwrap();

        board.make_move(&tables, mv);

        assert!(board.is_draw());
    }
}
