use crate::{board::Position, error::MoveParseError, movegen::legal_moves, types::*};

/// Resolves UCI long algebraic text (`e2e4`, `e7e8q`) against `pos`.
///
/// The text is matched against the legal move list so castling and en
/// passant flags come out right.
pub fn parse_uci_move(pos: &Position, txt: &str) -> Result<Move, MoveParseError> {
    let malformed = || MoveParseError::Malformed {
        text: txt.to_string(),
    };
    if !txt.is_ascii() || !(4..=5).contains(&txt.len()) {
        return Err(malformed());
    }
    let from = coord_to_sq(&txt[0..2]).ok_or_else(malformed)?;
    let to = coord_to_sq(&txt[2..4]).ok_or_else(malformed)?;
    let promo = match txt[4..].chars().next() {
        None => None,
        Some(ch) => match PieceKind::from_symbol(ch) {
            Some(kind) if PieceKind::PROMOTIONS.contains(&kind) => Some(kind),
            _ => return Err(malformed()),
        },
    };

    legal_moves(pos)
        .into_iter()
        .find(|m| m.from == from && m.to == to && m.promo == promo)
        .ok_or_else(|| MoveParseError::Illegal {
            text: txt.to_string(),
        })
}

/// Plays a sequence of UCI moves from `start`, stopping at the first one
/// that does not resolve.
pub fn play_uci_moves<'a, I>(start: Position, moves: I) -> Result<Position, MoveParseError>
where
    I: IntoIterator<Item = &'a str>,
{
    moves.into_iter().try_fold(start, |pos, txt| {
        let mv = parse_uci_move(&pos, txt)?;
        Ok(pos.apply(mv))
    })
}
