use std::cell::Cell;

use chess_core::{CastlingRights, Piece};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;
use crate::budget::SearchBudget;
use crate::eval::{MIN_EVAL, evaluate};
use crate::leaf::HeuristicLeaf;

fn pos(fen: &str) -> Position {
    Position::from_fen(fen).unwrap()
}

fn run(pos: &Position, depth: u8) -> SearchOutcome {
    let leaf = HeuristicLeaf;
    let mut ctx = SearchContext::new(&leaf, SearchBudget::unlimited());
    search(pos, depth, &mut ctx).unwrap()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// Leaf that counts its calls and returns a constant.
struct Constant {
    score: f64,
    calls: Cell<u32>,
}

impl LeafEvaluator for Constant {
    fn evaluate(&self, _pos: &Position) -> f64 {
        self.calls.set(self.calls.get() + 1);
        self.score
    }
}

/// Unpruned reference: same frontier and terminal rules, every move searched.
fn minimax(pos: &Position, depth: u8, ply: u32) -> f64 {
    if depth == 0 {
        return perspective(pos.side_to_move) * evaluate(pos);
    }
    let moves = legal_moves(pos);
    if moves.is_empty() {
        return if pos.in_check(pos.side_to_move) { -MAX_EVAL } else { 0.0 };
    }
    if ply > 0 && (pos.is_insufficient_material() || pos.is_seventy_five_move_draw()) {
        return 0.0;
    }
    moves
        .into_iter()
        .map(|mv| -minimax(&pos.apply(mv), depth - 1, ply + 1))
        .fold(f64::NEG_INFINITY, f64::max)
}

/// Same position with colors swapped and the board flipped top to bottom.
fn mirror(pos: &Position) -> Position {
    let mut board = [None; 64];
    for sq in 0..64u8 {
        board[(sq ^ 56) as usize] = pos
            .piece_at(sq)
            .map(|pc| Piece::new(pc.color.other(), pc.kind));
    }
    Position {
        board,
        side_to_move: pos.side_to_move.other(),
        castling: CastlingRights {
            wk: pos.castling.bk,
            wq: pos.castling.bq,
            bk: pos.castling.wk,
            bq: pos.castling.wq,
        },
        en_passant: pos.en_passant.map(|sq| sq ^ 56),
        ..pos.clone()
    }
}

/// Plays a few random moves from the start, skipping finished games.
fn random_positions(seed: u64, count: usize) -> Vec<Position> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = Vec::with_capacity(count);
    while out.len() < count {
        let mut p = Position::startpos();
        let plies = rng.gen_range(2..24);
        for _ in 0..plies {
            let moves = legal_moves(&p);
            if moves.is_empty() {
                break;
            }
            p = p.apply(moves[rng.gen_range(0..moves.len())]);
        }
        if !legal_moves(&p).is_empty() {
            out.push(p);
        }
    }
    out
}

#[test]
fn test_depth_zero_returns_leaf_score() {
    let leaf = Constant {
        score: 1.5,
        calls: Cell::new(0),
    };
    for fen in [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
    ] {
        let mut ctx = SearchContext::new(&leaf, SearchBudget::unlimited());
        let outcome = search(&pos(fen), 0, &mut ctx).unwrap();
        assert_eq!(outcome.evaluation, 1.5, "{fen}");
        assert!(outcome.lines.is_empty());
        assert_eq!(outcome.nodes, 0);
    }
    assert_eq!(leaf.calls.get(), 2);
}

#[test]
fn test_depth_zero_leaf_scores_finished_games_too() {
    let leaf = Constant {
        score: 1.5,
        calls: Cell::new(0),
    };
    // Fool's mate: White is mated, but the frontier comes first.
    let mated = pos("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
    let mut ctx = SearchContext::new(&leaf, SearchBudget::unlimited());
    let outcome = search(&mated, 0, &mut ctx).unwrap();
    assert_eq!(outcome.evaluation, 1.5);
    assert!(outcome.lines.is_empty());
    assert_eq!(leaf.calls.get(), 1);
}

#[test]
fn test_terminal_roots() {
    // White mated (fool's mate)
    let white_mated = pos("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
    // Black mated (scholar's mate)
    let black_mated = pos("r1bqkbnr/pppp1Qpp/2n5/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 1");
    let stalemate = pos("k7/8/1Q6/8/8/8/8/1K6 b - - 0 1");

    for depth in 1..=2 {
        let outcome = run(&white_mated, depth);
        assert_eq!(outcome.evaluation, MIN_EVAL);
        assert!(outcome.lines.is_empty());

        assert_eq!(run(&black_mated, depth).evaluation, MAX_EVAL);

        let outcome = run(&stalemate, depth);
        assert_eq!(outcome.evaluation, 0.0);
        assert!(outcome.evaluation.is_sign_positive());
    }
}

#[test]
fn test_mate_in_one() {
    // The mated position must sit above the frontier to be recognised.
    let outcome = run(&pos("6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1"), 2);
    assert_eq!(outcome.evaluation, MAX_EVAL);
    assert_eq!(outcome.lines[0].mv.to_string(), "e1e8");
    assert_eq!(outcome.lines[0].evaluation, MAX_EVAL);
}

#[test]
fn test_forced_mate_against_the_mover() {
    // Ka2 is the only move and Ra8 mates.
    let outcome = run(&pos("7r/8/8/8/8/8/2k5/K7 w - - 0 1"), 3);
    assert_eq!(outcome.evaluation, MIN_EVAL);
    assert_eq!(outcome.lines.len(), 1);
    let line = &outcome.lines[0];
    assert_eq!(line.mv.to_string(), "a1a2");
    assert_eq!(line.evaluation, MIN_EVAL);
    let continuation: Vec<String> = line.continuation.iter().map(|m| m.to_string()).collect();
    assert_eq!(continuation, vec!["h8a8"]);
}

#[test]
fn test_start_position_depth_one() {
    let outcome = run(&Position::startpos(), 1);
    assert_eq!(outcome.lines.len(), 20);
    assert_eq!(outcome.nodes, 20);
    assert!((MIN_EVAL..=MAX_EVAL).contains(&outcome.evaluation));
    assert_eq!(outcome.evaluation, outcome.lines[0].evaluation);
    // White to move: best for White first.
    assert!(
        outcome
            .lines
            .windows(2)
            .all(|w| w[0].evaluation >= w[1].evaluation)
    );
}

#[test]
fn test_black_lines_rank_lowest_first() {
    let outcome = run(
        &pos("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"),
        1,
    );
    assert_eq!(outcome.lines.len(), 20);
    assert!(
        outcome
            .lines
            .windows(2)
            .all(|w| w[0].evaluation <= w[1].evaluation)
    );
}

#[test]
fn test_draw_by_rule_below_root_scores_zero() {
    // Kxd2 leaves bare kings; the only alternative keeps Black a queen up.
    let outcome = run(&pos("4k3/8/8/8/8/8/3q4/4K3 w - - 0 1"), 2);
    assert_eq!(outcome.lines[0].mv.to_string(), "e1d2");
    assert_eq!(outcome.evaluation, 0.0);
    assert!(outcome.lines[1].evaluation < 0.0);
}

#[test]
fn test_depth_one_lines_match_child_search() {
    for p in random_positions(7, 6) {
        let outcome = run(&p, 1);
        for line in &outcome.lines {
            let child = run(&p.apply(line.mv), 0);
            assert_eq!(line.evaluation, child.evaluation, "{} {}", p.to_fen(), line.mv);
        }
    }
}

#[test]
fn test_principal_line_matches_child_search() {
    for p in random_positions(11, 4) {
        let outcome = run(&p, 2);
        let best = &outcome.lines[0];
        let child = run(&p.apply(best.mv), 1);
        assert!(approx(best.evaluation, child.evaluation), "{}", p.to_fen());
        assert_eq!(best.continuation.first(), child.lines.first().map(|l| &l.mv));

        // Pruned siblings carry bounds that never beat the principal line.
        let sign = perspective(p.side_to_move);
        for line in &outcome.lines[1..] {
            let exact = run(&p.apply(line.mv), 1).evaluation;
            assert!(sign * line.evaluation >= sign * exact - 1e-9);
            assert!(sign * line.evaluation <= sign * best.evaluation + 1e-9);
        }
    }
}

#[test]
fn test_alpha_beta_matches_minimax() {
    for (i, p) in random_positions(2024, 12).into_iter().enumerate() {
        for depth in 1..=2 {
            let outcome = run(&p, depth);
            let reference = perspective(p.side_to_move) * minimax(&p, depth, 0);
            assert!(
                approx(outcome.evaluation, reference),
                "position {i} depth {depth}: {} vs {reference} ({})",
                outcome.evaluation,
                p.to_fen()
            );
        }
    }
}

#[test]
fn test_negation_symmetry_on_mirrored_positions() {
    for p in random_positions(99, 8) {
        // Keep both sides out of the opening so the development term never
        // switches off between a position and its mirror.
        let p = Position {
            fullmove_number: 40,
            ..p
        };
        let m = mirror(&p);
        for depth in 1..=2 {
            let a = run(&p, depth).evaluation;
            let b = run(&m, depth).evaluation;
            assert!(approx(a, -b), "{} depth {depth}: {a} vs {b}", p.to_fen());
        }
    }
}

#[test]
fn test_node_budget_aborts() {
    let leaf = HeuristicLeaf;
    let budget = SearchBudget::unlimited().with_max_nodes(5);
    let mut ctx = SearchContext::new(&leaf, budget);
    let err = search(&Position::startpos(), 2, &mut ctx).unwrap_err();
    assert_eq!(err, SearchError::Aborted { nodes: 5 });
}

#[test]
fn test_stop_flag_aborts_before_any_work() {
    let leaf = HeuristicLeaf;
    let budget = SearchBudget::unlimited();
    budget.stop_handle().stop();
    let mut ctx = SearchContext::new(&leaf, budget);
    let err = search(&Position::startpos(), 1, &mut ctx).unwrap_err();
    assert_eq!(err, SearchError::Aborted { nodes: 0 });
    assert_eq!(ctx.nodes(), 0);
}
