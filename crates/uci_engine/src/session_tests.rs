use hybrid_engine::HybridConfig;

use super::*;

fn session() -> Session {
    Session::new(HybridEngine::heuristic(HybridConfig::default()))
}

fn send(session: &mut Session, line: &str) -> (Flow, String) {
    let mut out = Vec::new();
    let flow = session.handle(line, &mut out).unwrap();
    (flow, String::from_utf8(out).unwrap())
}

#[test]
fn test_handshake() {
    let mut s = session();
    let (_, out) = send(&mut s, "uci");
    assert!(out.contains("option name Depth type spin default 2 min 1 max 3"));
    assert!(out.ends_with("uciok\n"));
    assert_eq!(send(&mut s, "isready").1, "readyok\n");
    assert_eq!(send(&mut s, "quit").0, Flow::Quit);
    assert_eq!(send(&mut s, "   ").0, Flow::Continue);
}

#[test]
fn test_position_startpos_with_moves() {
    let pos = parse_position(&["startpos", "moves", "e2e4", "e7e5"]).unwrap();
    assert_eq!(
        pos.to_fen(),
        "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2"
    );
}

#[test]
fn test_position_fen() {
    let args: Vec<&str> = "fen 6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1 moves e1e8"
        .split(' ')
        .collect();
    let pos = parse_position(&args).unwrap();
    assert!(pos.is_checkmate());
}

#[test]
fn test_position_errors() {
    assert_eq!(parse_position(&[]), Err(PositionCommandError::MissingKind));
    assert!(matches!(
        parse_position(&["fen", "nonsense"]),
        Err(PositionCommandError::Fen(_))
    ));
    assert!(matches!(
        parse_position(&["startpos", "moves", "e2e5"]),
        Err(PositionCommandError::Move(MoveParseError::Illegal { .. }))
    ));
}

#[test]
fn test_bad_position_keeps_previous() {
    let mut s = session();
    send(&mut s, "position startpos moves e2e4");
    let before = s.position().clone();
    send(&mut s, "position startpos moves e2e4 e2e4");
    assert_eq!(s.position(), &before);
    send(&mut s, "ucinewgame");
    assert_eq!(s.position(), &Position::startpos());
}

#[test]
fn test_parse_go() {
    assert_eq!(
        parse_go(&["depth", "3", "movetime", "500"]),
        GoParams {
            depth: Some(3),
            movetime_ms: Some(500)
        }
    );
    assert_eq!(parse_go(&["wtime", "1000", "btime", "1000"]), GoParams::default());
}

#[test]
fn test_go_finds_mate() {
    let mut s = session();
    send(&mut s, "position fen 6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1");
    let (_, out) = send(&mut s, "go depth 2");
    assert!(out.contains("score cp 1000"), "{out}");
    assert!(out.contains("pv e1e8"), "{out}");
    assert!(out.ends_with("bestmove e1e8\n"), "{out}");
}

#[test]
fn test_go_black_score_is_from_black_side() {
    let mut s = session();
    // Black mates with Ra8 after White's only move.
    send(&mut s, "position fen 7r/8/8/8/8/8/2k5/K7 w - - 0 1 moves a1a2");
    let (_, out) = send(&mut s, "go depth 2");
    assert!(out.contains("score cp 1000"), "{out}");
    assert!(out.ends_with("bestmove h8a8\n"), "{out}");
}

#[test]
fn test_go_on_finished_game() {
    let mut s = session();
    send(&mut s, "position fen k7/8/1Q6/8/8/8/8/1K6 b - - 0 1");
    let (_, out) = send(&mut s, "go");
    assert_eq!(out, "bestmove 0000\n");
}

#[test]
fn test_setoption_depth_is_clamped() {
    let mut s = session();
    send(&mut s, "setoption name Depth value 9");
    assert_eq!(s.depth, MAX_DEPTH);
    send(&mut s, "setoption name Depth value 1");
    assert_eq!(s.depth, 1);
    send(&mut s, "setoption name Hash value 64");
    assert_eq!(s.depth, 1);
}
