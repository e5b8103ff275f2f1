use crate::*;

impl Board {
    /// Recomputes the cached threat picture for the side to move. Called
    /// after every make and from FEN setup; unmake restores the previous
    /// snapshot instead.
    pub(crate) fn update_analysis(&mut self, tables: &Tables) {
        let us = self.side_to_move();
        let them = !us;
        let king = self.king(us);
        let occ = self.occupied();

        // Sliders see through our king so it cannot step back along a
        // check ray and stay "safe".
        let occ_no_king = occ ^ king.bitboard();

        let mut attacks = Bitboard::EMPTY;

        for sq in self.colored_pieces(them, Piece::Pawn) {
            attacks |= pawn_attacks(sq, them);
        }

        for sq in self.colored_pieces(them, Piece::Knight) {
            attacks |= knight_attacks(sq);
        }

        for sq in self.colored_pieces(them, Piece::Bishop) | self.colored_pieces(them, Piece::Queen)
        {
            attacks |= tables.bishop_moves(sq, occ_no_king);
        }

        for sq in self.colored_pieces(them, Piece::Rook) | self.colored_pieces(them, Piece::Queen) {
            attacks |= tables.rook_moves(sq, occ_no_king);
        }

        attacks |= king_attacks(self.king(them));

        /*----------------------------------------------------------------*/

        let diag_sliders =
            self.colored_pieces(them, Piece::Bishop) | self.colored_pieces(them, Piece::Queen);
        let line_sliders =
            self.colored_pieces(them, Piece::Rook) | self.colored_pieces(them, Piece::Queen);

        let checkers = (knight_attacks(king) & self.colored_pieces(them, Piece::Knight))
            | (pawn_attacks(king, us) & self.colored_pieces(them, Piece::Pawn))
            | (tables.bishop_moves(king, occ) & diag_sliders)
            | (tables.rook_moves(king, occ) & line_sliders);

        let check = !checkers.is_empty();
        let double_check = checkers.popcnt() > 1;

        // With a single checker, a non-king move must capture it or block
        // the ray. between() is empty for contact checks and knights.
        let threat = if check && !double_check {
            let checker = checkers.next_square();
            between(king, checker) | checker.bitboard()
        } else {
            Bitboard::EMPTY
        };

        /*----------------------------------------------------------------*/

        self.analysis.pins.clear();

        let pinner_candidates =
            (bishop_rays(king) & diag_sliders) | (rook_rays(king) & line_sliders);

        for pinner in pinner_candidates {
            let ray = between(king, pinner);
            let blockers = ray & occ;

            if blockers.exactly_one() && !(blockers & self.colors(us)).is_empty() {
                self.analysis.pins.push(Pin {
                    sq: blockers.next_square(),
                    ray: ray | pinner.bitboard(),
                });
            }
        }

        self.analysis.attacks = attacks;
        self.analysis.threat = threat;
        self.analysis.check = check;
        self.analysis.double_check = double_check;
    }
}
