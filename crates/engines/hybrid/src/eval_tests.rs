use super::*;

fn pos(fen: &str) -> Position {
    Position::from_fen(fen).unwrap()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_start_position_is_mobility_only() {
    // No material imbalance, no center attacks, nothing developed:
    // only 20 legal moves for White at 0.2 each.
    let score = evaluate(&Position::startpos());
    assert!(approx(score, 4.0), "got {score}");
}

#[test]
fn test_after_e4_black_to_move() {
    // e4 pawn hits d5 (+0.1); Black's 20 replies count against it.
    let score = evaluate(&pos(
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
    ));
    assert!(approx(score, 0.1 - 4.0), "got {score}");
}

#[test]
fn test_development_only_in_opening() {
    let early = "rnbqkbnr/pppppppp/8/8/8/5N2/PPPPPPPP/RNBQKB1R b KQkq - 1 1";
    let late = "rnbqkbnr/pppppppp/8/8/8/5N2/PPPPPPPP/RNBQKB1R b KQkq - 1 11";
    let diff = evaluate(&pos(early)) - evaluate(&pos(late));
    assert!(approx(diff, DEVELOPMENT_BONUS), "got {diff}");
}

#[test]
fn test_material_counts_without_kings() {
    let p = Position::startpos();
    assert!(approx(material(&p, Color::White), 39.0));
    assert!(approx(material(&p, Color::Black), 39.0));
}

#[test]
fn test_score_is_clamped() {
    // White is a queen and two rooks up.
    let score = evaluate(&pos("4k3/8/8/8/8/8/8/RR1QK3 w - - 0 40"));
    assert!(approx(score, MAX_EVAL));

    let score = evaluate(&pos("rr1qk3/8/8/8/8/8/8/4K3 b - - 0 40"));
    assert!(approx(score, MIN_EVAL));
}

#[test]
fn test_deterministic() {
    let p = pos("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    assert_eq!(evaluate(&p), evaluate(&p));
    assert!((MIN_EVAL..=MAX_EVAL).contains(&evaluate(&p)));
}
