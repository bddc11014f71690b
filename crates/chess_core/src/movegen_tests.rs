use super::*;

fn moves_of(fen: &str) -> Vec<String> {
    let pos = Position::from_fen(fen).unwrap();
    legal_moves(&pos).iter().map(|m| m.to_string()).collect()
}

#[test]
fn test_startpos_moves() {
    let pos = Position::startpos();
    let moves = legal_moves(&pos);
    // Starting position has 20 legal moves
    assert_eq!(moves.len(), 20);
}

#[test]
fn test_kiwipete_moves() {
    // Kiwipete position - complex with many move types
    let moves = moves_of("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -");
    assert_eq!(moves.len(), 48);
    assert!(moves.contains(&"e1g1".to_string()));
    assert!(moves.contains(&"e1c1".to_string()));
}

#[test]
fn test_generation_order_is_stable() {
    let pos = Position::startpos();
    assert_eq!(legal_moves(&pos), legal_moves(&pos));
    // Origin squares ascend: b1 knight moves come before any pawn move.
    assert_eq!(legal_moves(&pos)[0].from, 1);
}

#[test]
fn test_castling_blocked_through_attacked_square() {
    // Black rook on f8 covers f1, so White may not castle king side.
    let moves = moves_of("k4r2/8/8/8/8/8/8/4K2R w K - 0 1");
    assert!(!moves.contains(&"e1g1".to_string()));
}

#[test]
fn test_no_castling_out_of_check() {
    let moves = moves_of("1k2r3/8/8/8/8/8/8/R3K2R w KQ - 0 1");
    assert!(!moves.iter().any(|m| m == "e1g1" || m == "e1c1"));
}

#[test]
fn test_promotions_generated() {
    let moves = moves_of("k7/4P3/8/8/8/8/8/4K3 w - - 0 1");
    for promo in ["e7e8q", "e7e8r", "e7e8b", "e7e8n"] {
        assert!(moves.contains(&promo.to_string()), "missing {promo}");
    }
    assert!(!moves.contains(&"e7e8".to_string()));
}

#[test]
fn test_en_passant_generated_and_applied() {
    let pos = Position::from_fen("k7/8/8/3pP3/8/8/8/4K3 w - d6 0 2").unwrap();
    let ep = legal_moves(&pos)
        .into_iter()
        .find(|m| m.is_en_passant)
        .unwrap();
    assert_eq!(ep.to_string(), "e5d6");

    let next = pos.apply(ep);
    assert_eq!(next.piece_at(coord_to_sq("d5").unwrap()), None);
    assert_eq!(
        next.piece_at(coord_to_sq("d6").unwrap()),
        Some(Piece::new(Color::White, PieceKind::Pawn))
    );
}

#[test]
fn test_pinned_piece_cannot_move() {
    // Knight on e2 is pinned by the rook on e8.
    let moves = moves_of("k3r3/8/8/8/8/8/4N3/4K3 w - - 0 1");
    assert!(!moves.iter().any(|m| m.starts_with("e2")));
}
