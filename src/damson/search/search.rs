use crate::*;

/*----------------------------------------------------------------*/

/// Plies the null reduction skips, the passed turn included.
const NULL_REDUCTION: u8 = 3;
const LMR_REDUCTION: u8 = 2;

/// Late quiets past this index at shallow depth are not searched at all.
const LMP_THRESHOLD: usize = 8;
const LMP_MAX_DEPTH: u8 = 3;

const FUTILITY_MAX_DEPTH: u8 = 3;
const FUTILITY_MARGIN: i32 = 128;

/// Delta margin for quiescence: a queen plus slack.
const DELTA_MARGIN: i32 = Piece::Queen.value() as i32 + 256;

/// Total extension plies available on any root-to-leaf path, so forcing
/// lines cannot deepen without bound.
pub const EXTENSION_BUDGET: u8 = 16;

/*----------------------------------------------------------------*/

/// One extension ply per forcing feature, paid out of the path budget:
/// giving check, pushing a pawn to the seventh, promoting.
fn extension(board: &Board, mv: Move, gives_check: bool, budget: u8) -> u8 {
    let mut ext = 0;

    if gives_check {
        ext += 1;
    }

    if let Some((color, Piece::Pawn)) = board.piece_on(mv.from) {
        if mv.to.rank() == Rank::Seventh.relative_to(color) {
            ext += 1;
        }
    }

    if mv.is_promotion() {
        ext += 1;
    }

    ext.min(budget)
}

#[inline]
fn is_capture(board: &Board, mv: Move) -> bool {
    board.piece_on(mv.to).is_some() || mv.kind == MoveKind::EnPassant
}

/*----------------------------------------------------------------*/

/// Fail-soft alpha-beta. Returns None when the clock ran out; the partial
/// iteration's results are discarded by the driver.
#[allow(clippy::too_many_arguments)]
pub fn negamax(
    ctx: &mut SearchContext,
    board: &mut Board,
    depth: u8,
    ply: u16,
    mut alpha: Score,
    beta: Score,
    ext_budget: u8,
    prev: Option<Move>,
    allow_null: bool,
) -> Option<Score> {
    ctx.visit()?;
    ctx.seldepth = ctx.seldepth.max(ply);

    let root = ply == 0;
    let us = board.side_to_move();
    let in_check = board.in_check();

    if !root && board.is_draw() {
        return Some(Score::ZERO);
    }

    if ply as usize >= MAX_PLY {
        return Some(evaluate(board));
    }

    if !root {
        if let Some(entry) = ctx.tt.probe(board.hash(), depth, ply, alpha, beta, false) {
            return Some(entry.score);
        }
    }

    if depth == 0 {
        return quiescence(ctx, board, ply, alpha, beta);
    }

    /*----------------------------------------------------------------*/

    let moves = board.gen_moves(ctx.tables);

    if moves.is_empty() {
        let score = if in_check {
            Score::mated(ply)
        } else {
            Score::ZERO
        };

        ctx.tt
            .store(board.hash(), TERMINAL_DEPTH, ply, score, TtBound::Exact, None);
        return Some(score);
    }

    /*----------------------------------------------------------------*/

    // A null move tests whether standing pat already beats beta. Skipped
    // in check, at low depth, and in king-and-pawn endgames where
    // zugzwang makes the bound unsound.
    if allow_null
        && !root
        && !in_check
        && depth > NULL_REDUCTION
        && !board.only_king_and_pawns()
    {
        let tables = ctx.tables;
        let mut passed = board.play_null(tables);
        let score = -negamax(
            ctx,
            &mut passed,
            depth - NULL_REDUCTION,
            ply + 1,
            -beta,
            -beta + 1,
            ext_budget,
            None,
            false,
        )?;
        drop(passed);

        if score >= beta {
            ctx.tt
                .store(board.hash(), depth, ply, score, TtBound::Lower, None);
            return Some(score);
        }
    }

    /*----------------------------------------------------------------*/

    let hash_move = ctx.tt.probe_move(board.hash());
    let mut picker = MovePicker::new(board, ctx.tables, ctx.heur, &moves, hash_move, ply, prev);

    let futility_base = if depth <= FUTILITY_MAX_DEPTH && !in_check {
        Some(evaluate(board) + FUTILITY_MARGIN * depth as i32)
    } else {
        None
    };

    let mut best_score = -Score::INFINITE;
    let mut best_move = None;
    let mut raised_alpha = false;
    let mut index = 0usize;

    while let Some(mv) = picker.next() {
        let capture = is_capture(board, mv);
        let gives_check = board.gives_check(ctx.tables, mv);
        let quiet = !capture && !gives_check;

        // Late move pruning: shallow quiets far down the ordering.
        if depth <= LMP_MAX_DEPTH && index > LMP_THRESHOLD && !in_check && quiet && !root {
            index += 1;
            continue;
        }

        // Futility: a shallow quiet cannot lift a hopeless static eval
        // past alpha. Off near mate scores.
        if let Some(margin) = futility_base {
            if quiet && !root && !alpha.is_mate() && !beta.is_mate() && margin <= alpha {
                index += 1;
                continue;
            }
        }

        /*----------------------------------------------------------------*/

        // Only the first move of a node gets the full window straight
        // away; later moves must first beat alpha on a null window.
        let nonpv = index > 0;

        let ext = extension(board, mv, gives_check, ext_budget);
        let reduction = if index >= 2 && depth > 2 && ext == 0 && !capture {
            LMR_REDUCTION
        } else {
            0
        };

        let child_depth = (depth as i16 - 1 + ext as i16 - reduction as i16).max(0) as u8;
        let full_depth = (depth as i16 - 1 + ext as i16).max(0) as u8;
        let next_budget = ext_budget - ext;

        let tables = ctx.tables;
        let mut child = board.play(tables, mv);

        let first_window = if nonpv {
            (-alpha - 1, -alpha)
        } else {
            (-beta, -alpha)
        };

        let mut score = -negamax(
            ctx,
            &mut child,
            child_depth,
            ply + 1,
            first_window.0,
            first_window.1,
            next_budget,
            Some(mv),
            true,
        )?;

        // A reduced or null-window search that beats alpha must be
        // confirmed at full depth and window.
        if (reduction > 0 || nonpv) && score > alpha {
            score = -negamax(
                ctx,
                &mut child,
                full_depth,
                ply + 1,
                -beta,
                -alpha,
                next_budget,
                Some(mv),
                true,
            )?;
        }

        drop(child);

        /*----------------------------------------------------------------*/

        if score > best_score {
            best_score = score;
            best_move = Some(mv);
        }

        if score > alpha {
            alpha = score;
            raised_alpha = true;

            if alpha >= beta {
                if !capture {
                    ctx.heur.store_killer(ply, mv);
                    ctx.heur.bump_history(us, mv, depth);
                    ctx.heur.store_counter(us, prev, mv);
                }

                ctx.tt
                    .store(board.hash(), depth, ply, best_score, TtBound::Lower, Some(mv));
                return Some(best_score);
            }
        }

        index += 1;
    }

    /*----------------------------------------------------------------*/

    // Every move was pruned; fail low on the window bound instead of
    // storing a fake minus-infinity score.
    if best_move.is_none() {
        return Some(alpha);
    }

    let bound = if raised_alpha {
        TtBound::Exact
    } else {
        TtBound::Upper
    };

    ctx.tt
        .store(board.hash(), depth, ply, best_score, bound, best_move);

    Some(best_score)
}

/*----------------------------------------------------------------*/

/// Captures-only search at the horizon. Standing pat bounds the score
/// from below; hopeless captures are delta pruned as a whole once even a
/// free queen cannot reach alpha.
pub fn quiescence(
    ctx: &mut SearchContext,
    board: &mut Board,
    ply: u16,
    mut alpha: Score,
    beta: Score,
) -> Option<Score> {
    ctx.visit()?;
    ctx.seldepth = ctx.seldepth.max(ply);

    let stand_pat = evaluate(board);

    if stand_pat >= beta || ply as usize >= MAX_PLY {
        return Some(stand_pat);
    }

    if stand_pat + DELTA_MARGIN < alpha {
        return Some(stand_pat);
    }

    if stand_pat > alpha {
        alpha = stand_pat;
    }

    /*----------------------------------------------------------------*/

    let captures = board.gen_captures(ctx.tables);
    let mut picker = MovePicker::captures(board, &captures);
    let mut best_score = stand_pat;

    while let Some(mv) = picker.next() {
        let tables = ctx.tables;
        let mut child = board.play(tables, mv);
        let score = -quiescence(ctx, &mut child, ply + 1, -beta, -alpha)?;
        drop(child);

        if score > best_score {
            best_score = score;
        }

        if score > alpha {
            alpha = score;

            if alpha >= beta {
                break;
            }
        }
    }

    Some(best_score)
}
