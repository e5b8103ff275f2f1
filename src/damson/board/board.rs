use core::fmt;
use arrayvec::ArrayVec;

use crate::*;

/*----------------------------------------------------------------*/

pub const MAX_PIECES: usize = 16;
pub const MAX_PINS: usize = 16;

/*----------------------------------------------------------------*/

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CastleRights {
    pub short: [bool; Color::COUNT],
    pub long: [bool; Color::COUNT],
}

impl CastleRights {
    pub const NONE: CastleRights = CastleRights {
        short: [false; Color::COUNT],
        long: [false; Color::COUNT],
    };

    #[inline]
    pub const fn packed(self) -> u8 {
        self.short[0] as u8
            | (self.long[0] as u8) << 1
            | (self.short[1] as u8) << 2
            | (self.long[1] as u8) << 3
    }
}

/*----------------------------------------------------------------*/

/// A piece pinned to its own king and the ray it is confined to. The ray
/// includes the pinning slider, so capturing it stays legal.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Pin {
    pub sq: Square,
    pub ray: Bitboard,
}

/// Per-ply derived state for the side to move, recomputed after every make
/// and restored from the undo record on unmake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    /// Squares the opponent attacks, with our king removed from slider
    /// occupancy so it cannot shelter behind itself.
    pub attacks: Bitboard,
    /// Squares a non-king move must land on to resolve a single check.
    pub threat: Bitboard,
    pub pins: ArrayVec<Pin, MAX_PINS>,
    pub check: bool,
    pub double_check: bool,
}

impl Analysis {
    pub const fn empty() -> Analysis {
        Analysis {
            attacks: Bitboard::EMPTY,
            threat: Bitboard::EMPTY,
            pins: ArrayVec::new_const(),
            check: false,
            double_check: false,
        }
    }

    #[inline]
    pub fn pin_ray(&self, sq: Square) -> Bitboard {
        self.pins
            .iter()
            .find(|pin| pin.sq == sq)
            .map_or(Bitboard::FULL, |pin| pin.ray)
    }
}

/*----------------------------------------------------------------*/

#[derive(Debug, Clone)]
pub struct Board {
    pieces: [[Bitboard; Piece::COUNT]; Color::COUNT],
    occupied: [Bitboard; Color::COUNT],
    mailbox: [Option<(Color, Piece)>; Square::COUNT],
    piece_list: [ArrayVec<Square, MAX_PIECES>; Color::COUNT],

    side_to_move: Color,
    castle_rights: CastleRights,
    en_passant: Option<Square>,
    halfmove_clock: u8,
    fullmove_number: u16,

    hash: u64,
    hash_history: Vec<u64>,
    last_irreversible: usize,
    draw: bool,

    pub(crate) analysis: Analysis,
}

impl Board {
    pub(crate) fn empty() -> Board {
        Board {
            pieces: [[Bitboard::EMPTY; Piece::COUNT]; Color::COUNT],
            occupied: [Bitboard::EMPTY; Color::COUNT],
            mailbox: [None; Square::COUNT],
            piece_list: [ArrayVec::new_const(), ArrayVec::new_const()],
            side_to_move: Color::White,
            castle_rights: CastleRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            hash: 0,
            hash_history: Vec::new(),
            last_irreversible: 0,
            draw: false,
            analysis: Analysis::empty(),
        }
    }

    pub fn startpos(tables: &Tables) -> Board {
        Board::from_fen(
            tables,
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        )
        .unwrap_or_else(|_| unreachable!())
    }

    /*----------------------------------------------------------------*/

    #[inline]
    pub fn colored_pieces(&self, color: Color, piece: Piece) -> Bitboard {
        self.pieces[color][piece]
    }

    #[inline]
    pub fn colors(&self, color: Color) -> Bitboard {
        self.occupied[color]
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.occupied[Color::White] | self.occupied[Color::Black]
    }

    #[inline]
    pub fn piece_on(&self, sq: Square) -> Option<(Color, Piece)> {
        self.mailbox[sq]
    }

    #[inline]
    pub fn king(&self, color: Color) -> Square {
        self.pieces[color][Piece::King].next_square()
    }

    #[inline]
    pub fn piece_squares(&self, color: Color) -> &[Square] {
        &self.piece_list[color]
    }

    /*----------------------------------------------------------------*/

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castle_rights(&self) -> CastleRights {
        self.castle_rights
    }

    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u8 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Fifty-move rule reached or the current hash occurred three times
    /// since the last irreversible move.
    #[inline]
    pub fn is_draw(&self) -> bool {
        self.draw
    }

    #[inline]
    pub fn in_check(&self) -> bool {
        self.analysis.check
    }

    #[inline]
    pub fn opponent_attacks(&self) -> Bitboard {
        self.analysis.attacks
    }

    /*----------------------------------------------------------------*/

    /// Everything except the king and pawns is gone for the side to move.
    /// Null-move pruning is unsound in these endgames because zugzwang is
    /// common.
    #[inline]
    pub fn only_king_and_pawns(&self) -> bool {
        let us = self.side_to_move;

        (self.pieces[us][Piece::King] | self.pieces[us][Piece::Pawn]) == self.occupied[us]
    }

    /*----------------------------------------------------------------*/

    /// Whether `by` attacks `sq` on the current occupancy. Slower than the
    /// cached attack map; used where the cache is for the wrong side.
    pub fn square_attacked(&self, tables: &Tables, sq: Square, by: Color) -> bool {
        let occ = self.occupied();

        !(knight_attacks(sq) & self.pieces[by][Piece::Knight]).is_empty()
            || !(king_attacks(sq) & self.pieces[by][Piece::King]).is_empty()
            || !(pawn_attacks(sq, !by) & self.pieces[by][Piece::Pawn]).is_empty()
            || !(tables.rook_moves(sq, occ)
                & (self.pieces[by][Piece::Rook] | self.pieces[by][Piece::Queen]))
                .is_empty()
            || !(tables.bishop_moves(sq, occ)
                & (self.pieces[by][Piece::Bishop] | self.pieces[by][Piece::Queen]))
                .is_empty()
    }

    /*----------------------------------------------------------------*/

    /// Hash recomputed from scratch; must always equal the incrementally
    /// maintained value.
    pub fn calc_hash(&self) -> u64 {
        let mut hash = 0;

        for &sq in &Square::ALL {
            if let Some((color, piece)) = self.mailbox[sq] {
                hash ^= ZOBRIST.piece(color, piece, sq);
            }
        }

        hash ^= ZOBRIST.castle_rights(self.castle_rights.packed());

        if let Some(ep) = self.en_passant {
            hash ^= ZOBRIST.en_passant(ep.file());
        }

        if self.side_to_move == Color::Black {
            hash ^= ZOBRIST.side_to_move();
        }

        hash
    }

    /*----------------------------------------------------------------*/

    // Raw placement updates. Bitboards, mailbox, and piece list only; the
    // hashed wrappers below keep the fingerprint in sync during make.

    pub(crate) fn put(&mut self, color: Color, piece: Piece, sq: Square) {
        debug_assert!(self.mailbox[sq].is_none(), "put() onto occupied {sq}");

        self.pieces[color][piece] |= sq.bitboard();
        self.occupied[color] |= sq.bitboard();
        self.mailbox[sq] = Some((color, piece));
        self.piece_list[color].push(sq);
    }

    pub(crate) fn take(&mut self, color: Color, piece: Piece, sq: Square) {
        debug_assert_eq!(self.mailbox[sq], Some((color, piece)), "take() mismatch on {sq}");

        self.pieces[color][piece] ^= sq.bitboard();
        self.occupied[color] ^= sq.bitboard();
        self.mailbox[sq] = None;

        let idx = self.piece_list[color]
            .iter()
            .position(|&s| s == sq)
            .unwrap_or_else(|| unreachable!());
        self.piece_list[color].swap_remove(idx);
    }

    pub(crate) fn relocate(&mut self, color: Color, piece: Piece, from: Square, to: Square) {
        debug_assert_eq!(self.mailbox[from], Some((color, piece)));
        debug_assert!(self.mailbox[to].is_none());

        self.pieces[color][piece] ^= from.bitboard() | to.bitboard();
        self.occupied[color] ^= from.bitboard() | to.bitboard();
        self.mailbox[from] = None;
        self.mailbox[to] = Some((color, piece));

        for s in &mut self.piece_list[color] {
            if *s == from {
                *s = to;
                break;
            }
        }
    }

    /*----------------------------------------------------------------*/

    pub(crate) fn add_piece(&mut self, color: Color, piece: Piece, sq: Square) {
        self.put(color, piece, sq);
        self.hash ^= ZOBRIST.piece(color, piece, sq);
    }

    pub(crate) fn remove_piece(&mut self, color: Color, piece: Piece, sq: Square) {
        self.take(color, piece, sq);
        self.hash ^= ZOBRIST.piece(color, piece, sq);
    }

    pub(crate) fn move_piece(&mut self, color: Color, piece: Piece, from: Square, to: Square) {
        self.relocate(color, piece, from, to);
        self.hash ^= ZOBRIST.piece(color, piece, from) ^ ZOBRIST.piece(color, piece, to);
    }

    pub(crate) fn set_castle_rights(&mut self, rights: CastleRights) {
        self.hash ^= ZOBRIST.castle_rights(self.castle_rights.packed())
            ^ ZOBRIST.castle_rights(rights.packed());
        self.castle_rights = rights;
    }

    pub(crate) fn set_en_passant(&mut self, ep: Option<Square>) {
        if let Some(old) = self.en_passant {
            self.hash ^= ZOBRIST.en_passant(old.file());
        }

        if let Some(new) = ep {
            self.hash ^= ZOBRIST.en_passant(new.file());
        }

        self.en_passant = ep;
    }

    pub(crate) fn toggle_side_to_move(&mut self) {
        self.hash ^= ZOBRIST.side_to_move();
        self.side_to_move = !self.side_to_move;
    }

    /*----------------------------------------------------------------*/

    pub(crate) fn set_halfmove_clock(&mut self, clock: u8) {
        self.halfmove_clock = clock;
    }

    pub(crate) fn set_fullmove_number(&mut self, number: u16) {
        self.fullmove_number = number;
    }

    pub(crate) fn set_hash(&mut self, hash: u64) {
        self.hash = hash;
    }

    pub(crate) fn set_draw(&mut self, draw: bool) {
        self.draw = draw;
    }

    pub(crate) fn bump_halfmove_clock(&mut self) {
        self.halfmove_clock += 1;
    }

    pub(crate) fn bump_fullmove_number(&mut self) {
        self.fullmove_number += 1;
    }

    pub(crate) fn restore_en_passant(&mut self, ep: Option<Square>) {
        self.en_passant = ep;
    }

    pub(crate) fn restore_castle_rights(&mut self, rights: CastleRights) {
        self.castle_rights = rights;
    }

    pub(crate) fn flip_side_raw(&mut self) {
        self.side_to_move = !self.side_to_move;
    }

    /*----------------------------------------------------------------*/

    pub(crate) fn history_push(&mut self, hash: u64) {
        self.hash_history.push(hash);
    }

    pub(crate) fn history_pop(&mut self) {
        self.hash_history.pop();
    }

    pub(crate) fn history_len(&self) -> usize {
        self.hash_history.len()
    }

    pub(crate) fn last_irreversible(&self) -> usize {
        self.last_irreversible
    }

    pub(crate) fn set_last_irreversible(&mut self, idx: usize) {
        self.last_irreversible = idx;
    }

    /// Occurrences of the current hash since the last irreversible move,
    /// the current position included.
    pub(crate) fn repetitions(&self) -> usize {
        self.hash_history[self.last_irreversible..]
            .iter()
            .filter(|&&h| h == self.hash)
            .count()
    }
}

/*----------------------------------------------------------------*/

impl PartialEq for Board {
    /// Positions compare by state, not by history or derived caches; the
    /// piece lists are order-insensitive mirrors of the bitboards.
    fn eq(&self, other: &Board) -> bool {
        self.pieces == other.pieces
            && self.occupied == other.occupied
            && self.mailbox == other.mailbox
            && self.side_to_move == other.side_to_move
            && self.castle_rights == other.castle_rights
            && self.en_passant == other.en_passant
            && self.halfmove_clock == other.halfmove_clock
            && self.hash == other.hash
    }
}

impl Eq for Board {}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &rank in Rank::ALL.iter().rev() {
            write!(f, "{} ", rank)?;

            for &file in &File::ALL {
                match self.mailbox[Square::new(file, rank)] {
                    Some((color, piece)) => write!(f, " {}", piece.to_char(color))?,
                    None => write!(f, " .")?,
                }
            }

            writeln!(f)?;
        }

        writeln!(f, "   a b c d e f g h")?;
        write!(f, "{} to move", self.side_to_move)
    }
}
