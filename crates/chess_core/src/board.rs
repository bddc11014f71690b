use crate::{bitboard::Bitboard, movegen::legal_moves, types::*};

pub(crate) const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];
pub(crate) const KING_STEPS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];
pub(crate) const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub(crate) const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Halfmove clock value at which the game is drawn without a claim.
pub const SEVENTY_FIVE_MOVE_PLIES: u32 = 150;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CastlingRights {
    pub wk: bool,
    pub wq: bool,
    pub bk: bool,
    pub bq: bool,
}

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights {
        wk: false,
        wq: false,
        bk: false,
        bq: false,
    };
    pub const ALL: CastlingRights = CastlingRights {
        wk: true,
        wq: true,
        bk: true,
        bq: true,
    };

    /// Whether `color` keeps at least one castling right.
    pub fn any(&self, color: Color) -> bool {
        match color {
            Color::White => self.wk || self.wq,
            Color::Black => self.bk || self.bq,
        }
    }

    /// Drops every right that depends on a piece standing on `square`.
    fn touch(&mut self, square: u8) {
        match square {
            0 => self.wq = false,
            7 => self.wk = false,
            4 => {
                self.wk = false;
                self.wq = false;
            }
            56 => self.bq = false,
            63 => self.bk = false,
            60 => {
                self.bk = false;
                self.bq = false;
            }
            _ => {}
        }
    }
}

/// How a finished game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
    InsufficientMaterial,
    SeventyFiveMoves,
}

/// An immutable-by-convention board state.
///
/// Fields are public for inspection; the engine never edits them directly
/// and derives successors with [`Position::apply`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub board: [Option<Piece>; 64],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<u8>, // square behind a pawn that just advanced 2
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl Position {
    pub fn startpos() -> Self {
        let mut p = Position {
            board: [None; 64],
            side_to_move: Color::White,
            castling: CastlingRights::ALL,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        };

        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (f, &kind) in back.iter().enumerate() {
            p.board[f] = Some(Piece::new(Color::White, kind));
            p.board[8 + f] = Some(Piece::new(Color::White, PieceKind::Pawn));
            p.board[48 + f] = Some(Piece::new(Color::Black, PieceKind::Pawn));
            p.board[56 + f] = Some(Piece::new(Color::Black, kind));
        }
        p
    }

    pub fn piece_at(&self, sq: u8) -> Option<Piece> {
        self.board[sq as usize]
    }

    fn set_piece(&mut self, sq: u8, pc: Option<Piece>) {
        self.board[sq as usize] = pc;
    }

    pub fn king_sq(&self, c: Color) -> Option<u8> {
        (0..64u8).find(|&s| self.piece_at(s) == Some(Piece::new(c, PieceKind::King)))
    }

    /// Number of `kind` pieces `color` has on the board.
    pub fn count(&self, color: Color, kind: PieceKind) -> u32 {
        let target = Some(Piece::new(color, kind));
        self.board.iter().filter(|&&pc| pc == target).count() as u32
    }

    /// Squares holding `kind` pieces of `color`.
    pub fn pieces(&self, color: Color, kind: PieceKind) -> Bitboard {
        let target = Some(Piece::new(color, kind));
        (0..64u8).filter(|&s| self.piece_at(s) == target).collect()
    }

    /// Total pieces on the board, kings included.
    pub fn piece_count(&self) -> u32 {
        self.board.iter().filter(|pc| pc.is_some()).count() as u32
    }

    pub fn in_check(&self, c: Color) -> bool {
        match self.king_sq(c) {
            Some(ksq) => self.is_square_attacked(ksq, c.other()),
            None => false,
        }
    }

    pub fn is_square_attacked(&self, target: u8, by: Color) -> bool {
        !self.attackers(target, by).is_empty()
    }

    /// Squares of every `by` piece that attacks `target`.
    ///
    /// Sliders only count when nothing stands between them and the target;
    /// pinned pieces still count as attackers.
    pub fn attackers(&self, target: u8, by: Color) -> Bitboard {
        let tf = file_of(target);
        let tr = rank_of(target);
        let mut found = Bitboard::EMPTY;

        let mut leaper = |steps: &[(i8, i8)], kind: PieceKind| {
            for (df, dr) in steps {
                if let Some(s) = sq(tf + df, tr + dr)
                    && self.piece_at(s) == Some(Piece::new(by, kind))
                {
                    found.insert(s);
                }
            }
        };
        // A pawn of `by` attacks the target from one rank behind it.
        let back = -by.forward();
        leaper(&[(-1, back), (1, back)], PieceKind::Pawn);
        leaper(&KNIGHT_JUMPS, PieceKind::Knight);
        leaper(&KING_STEPS, PieceKind::King);

        let mut slider = |dirs: &[(i8, i8)], kind: PieceKind| {
            for (df, dr) in dirs {
                let mut f = tf + df;
                let mut r = tr + dr;
                while let Some(s) = sq(f, r) {
                    if let Some(pc) = self.piece_at(s) {
                        if pc.color == by && (pc.kind == kind || pc.kind == PieceKind::Queen) {
                            found.insert(s);
                        }
                        break;
                    }
                    f += df;
                    r += dr;
                }
            }
        };
        slider(&DIAGONALS, PieceKind::Bishop);
        slider(&ORTHOGONALS, PieceKind::Rook);

        found
    }

    /// Returns the position reached by playing `mv`.
    ///
    /// `mv` must come from this position's legal move list.
    pub fn apply(&self, mv: Move) -> Position {
        let mut next = self.clone();
        next.play(mv);
        next
    }

    fn play(&mut self, mv: Move) {
        let (from, to) = (mv.from, mv.to);
        let Some(moved) = self.piece_at(from) else {
            return;
        };
        let mut captured = self.piece_at(to);

        self.en_passant = None;

        if mv.is_en_passant
            && let Some(cs) = sq(file_of(to), rank_of(to) - moved.color.forward())
        {
            captured = self.piece_at(cs);
            self.set_piece(cs, None);
        }

        let placed = match mv.promo {
            Some(kind) if moved.kind == PieceKind::Pawn => Piece::new(moved.color, kind),
            _ => moved,
        };
        self.set_piece(from, None);
        self.set_piece(to, Some(placed));

        if mv.is_castle {
            // Rook hops to the square the king passed over.
            let rank = moved.color.home_rank();
            let (rook_from, rook_to) = if file_of(to) == 6 { (7, 5) } else { (0, 3) };
            if let (Some(rf), Some(rt)) = (sq(rook_from, rank), sq(rook_to, rank)) {
                let rook = self.piece_at(rf);
                self.set_piece(rf, None);
                self.set_piece(rt, rook);
            }
        }

        self.castling.touch(from);
        self.castling.touch(to);

        if moved.kind == PieceKind::Pawn && (rank_of(to) - rank_of(from)).abs() == 2 {
            self.en_passant = sq(file_of(from), (rank_of(from) + rank_of(to)) / 2);
        }

        self.halfmove_clock = if moved.kind == PieceKind::Pawn || captured.is_some() {
            0
        } else {
            self.halfmove_clock + 1
        };

        if self.side_to_move == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = self.side_to_move.other();
    }

    /// True when neither side can possibly deliver mate: bare kings, a
    /// single minor piece, or bishops that all stand on one square color.
    pub fn is_insufficient_material(&self) -> bool {
        let mut minors = 0;
        let mut bishops = Bitboard::EMPTY;
        for s in 0..64u8 {
            let Some(pc) = self.piece_at(s) else { continue };
            match pc.kind {
                PieceKind::King => {}
                PieceKind::Knight => minors += 1,
                PieceKind::Bishop => {
                    minors += 1;
                    bishops.insert(s);
                }
                _ => return false,
            }
        }
        if minors <= 1 {
            return true;
        }
        // Only bishops left, all on the same square color.
        bishops.popcount() == minors
            && (bishops.squares().all(is_dark) || !bishops.squares().any(is_dark))
    }

    pub fn is_seventy_five_move_draw(&self) -> bool {
        self.halfmove_clock >= SEVENTY_FIVE_MOVE_PLIES
    }

    pub fn is_checkmate(&self) -> bool {
        matches!(self.outcome(), Some(Outcome::Checkmate { .. }))
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome().is_some()
    }

    /// The game result if the position is final, `None` while play goes on.
    pub fn outcome(&self) -> Option<Outcome> {
        if legal_moves(self).is_empty() {
            return Some(if self.in_check(self.side_to_move) {
                Outcome::Checkmate {
                    winner: self.side_to_move.other(),
                }
            } else {
                Outcome::Stalemate
            });
        }
        if self.is_insufficient_material() {
            return Some(Outcome::InsufficientMaterial);
        }
        if self.is_seventy_five_move_draw() {
            return Some(Outcome::SeventyFiveMoves);
        }
        None
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
