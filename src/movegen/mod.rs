//! Move generation and application for the Game of the Amazons
//!
//! A move has two parts: slide one of your pieces like a chess queen, then
//! fire an arrow from the piece's new square along another queen line. The
//! arrow's landing cell is blocked for the rest of the game.
//!
//! Contains:
//! - Queen-line slide enumeration ([`slide_targets`])
//! - Full legal-move generation ([`legal_moves`]) and counting
//! - Short-circuit move-existence check ([`has_any_legal_move`])
//! - Validated move application ([`apply_move`])

use thiserror::Error;

use crate::board::{Board, Cell, Player, Pos};

/// The 8 queen directions, scanned in row-major order of the offset.
pub const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A complete move: slide a piece from `from` to `to`, then shoot an arrow
/// that lands on `arrow`.
///
/// Invariants: `to` must be reachable from `from` by an unobstructed
/// queen-line slide on the pre-move board, and `arrow` must be reachable
/// from `to` on the board with the piece already relocated. The vacated
/// `from` cell counts as empty for the arrow, so shooting back through the
/// origin is legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Pos,
    pub to: Pos,
    pub arrow: Pos,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {} / arrow {}", self.from, self.to, self.arrow)
    }
}

/// A move that violates one of the [`Move`] invariants.
///
/// The engine only ever applies moves it generated itself, so these arise
/// solely from hand-built moves at the public API boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IllegalMove {
    #[error("no piece to move at {0}")]
    NoPieceAtOrigin(Pos),
    #[error("destination {to} is not queen-reachable from {from}")]
    UnreachableDestination { from: Pos, to: Pos },
    #[error("arrow target {arrow} is not queen-reachable from {to}")]
    UnreachableArrow { to: Pos, arrow: Pos },
}

/// Every empty cell reachable from `origin` by a queen-line slide.
///
/// Steps outward in each of the 8 directions, stopping at the first
/// non-empty cell or the board edge. No distance limit applies beyond
/// those two obstructions.
#[must_use]
pub fn slide_targets(board: &Board, origin: Pos) -> Vec<Pos> {
    let mut targets = Vec::with_capacity(16);
    for &(dr, dc) in &QUEEN_DIRECTIONS {
        let mut row = i32::from(origin.row) + i32::from(dr);
        let mut col = i32::from(origin.col) + i32::from(dc);
        while Pos::is_valid(row, col) {
            let pos = Pos::new(row as u8, col as u8);
            if !board.is_empty_at(pos) {
                break;
            }
            targets.push(pos);
            row += i32::from(dr);
            col += i32::from(dc);
        }
    }
    targets
}

/// Count of [`slide_targets`] without materializing the list.
fn slide_target_count(board: &Board, origin: Pos) -> u32 {
    let mut count = 0;
    for &(dr, dc) in &QUEEN_DIRECTIONS {
        let mut row = i32::from(origin.row) + i32::from(dr);
        let mut col = i32::from(origin.col) + i32::from(dc);
        while Pos::is_valid(row, col) && board.is_empty_at(Pos::new(row as u8, col as u8)) {
            count += 1;
            row += i32::from(dr);
            col += i32::from(dc);
        }
    }
    count
}

/// Generate every legal move for a player.
///
/// For each piece, for each slide destination, the piece is relocated and
/// every arrow target of the relocated piece yields one [`Move`].
/// Enumeration order is deterministic (pieces row-major, then direction
/// order) but carries no meaning; the search re-orders by heuristic value.
#[must_use]
pub fn legal_moves(board: &Board, player: Player) -> Vec<Move> {
    let mut moves = Vec::new();
    for from in board.pieces(player) {
        // One scratch board per piece: lift the piece, then try each
        // destination by placing and removing it again.
        let mut scratch = board.clone();
        scratch.set(from, Cell::Empty);

        for to in slide_targets(board, from) {
            scratch.set(to, Cell::Occupied(player));
            for arrow in slide_targets(&scratch, to) {
                moves.push(Move { from, to, arrow });
            }
            scratch.set(to, Cell::Empty);
        }
    }
    moves
}

/// Total number of legal (destination, arrow) pairs for a player.
///
/// Same enumeration as [`legal_moves`] without building the move list.
/// This is the evaluator's mobility measure, called at every search leaf,
/// so it avoids all per-move allocation.
#[must_use]
pub fn count_legal_moves(board: &Board, player: Player) -> u32 {
    let mut count = 0;
    for from in board.pieces(player) {
        let mut scratch = board.clone();
        scratch.set(from, Cell::Empty);

        for to in slide_targets(board, from) {
            scratch.set(to, Cell::Occupied(player));
            count += slide_target_count(&scratch, to);
            scratch.set(to, Cell::Empty);
        }
    }
    count
}

/// Whether a player has at least one legal move.
///
/// A piece that can slide one step always has a full move: the vacated
/// origin is queen-reachable from the destination, so an arrow target
/// always exists. One empty neighbor in any of the 8 directions therefore
/// decides the question in O(pieces * 8), without generating moves. This
/// runs at every search-tree leaf.
#[must_use]
pub fn has_any_legal_move(board: &Board, player: Player) -> bool {
    for from in board.pieces(player) {
        for &(dr, dc) in &QUEEN_DIRECTIONS {
            let row = i32::from(from.row) + i32::from(dr);
            let col = i32::from(from.col) + i32::from(dc);
            if Pos::is_valid(row, col) && board.is_empty_at(Pos::new(row as u8, col as u8)) {
                return true;
            }
        }
    }
    false
}

/// Whether `to` is reachable from `from` by one unobstructed queen-line
/// slide over empty cells (the destination itself included).
#[must_use]
pub fn is_slide_reachable(board: &Board, from: Pos, to: Pos) -> bool {
    if from == to {
        return false;
    }
    let dr = i32::from(to.row) - i32::from(from.row);
    let dc = i32::from(to.col) - i32::from(from.col);
    if dr != 0 && dc != 0 && dr.abs() != dc.abs() {
        return false; // not a straight or diagonal line
    }

    let step_r = dr.signum();
    let step_c = dc.signum();
    let mut row = i32::from(from.row) + step_r;
    let mut col = i32::from(from.col) + step_c;
    loop {
        if !board.is_empty_at(Pos::new(row as u8, col as u8)) {
            return false;
        }
        if row == i32::from(to.row) && col == i32::from(to.col) {
            return true;
        }
        row += step_r;
        col += step_c;
    }
}

/// Apply a move, producing the successor board.
///
/// The origin becomes empty, the destination holds the moved piece, and
/// the arrow's landing cell is permanently blocked. No other cell changes.
///
/// # Errors
///
/// Returns [`IllegalMove`] if the move violates a [`Move`] invariant. The
/// search only applies moves it generated, so it never sees this error;
/// it exists for callers that build moves by hand.
pub fn apply_move(board: &Board, mv: Move) -> Result<Board, IllegalMove> {
    let Cell::Occupied(player) = board.get(mv.from) else {
        return Err(IllegalMove::NoPieceAtOrigin(mv.from));
    };
    if !is_slide_reachable(board, mv.from, mv.to) {
        return Err(IllegalMove::UnreachableDestination {
            from: mv.from,
            to: mv.to,
        });
    }

    let mut next = board.clone();
    next.set(mv.from, Cell::Empty);
    next.set(mv.to, Cell::Occupied(player));

    if !is_slide_reachable(&next, mv.to, mv.arrow) {
        return Err(IllegalMove::UnreachableArrow {
            to: mv.to,
            arrow: mv.arrow,
        });
    }
    next.set(mv.arrow, Cell::Blocked);
    Ok(next)
}

/// Apply a generated move without re-validating its invariants.
///
/// Hot path of the search: every node applies each of its children once.
/// Callers must pass moves obtained from [`legal_moves`].
#[must_use]
pub(crate) fn apply_move_unchecked(board: &Board, mv: Move) -> Board {
    debug_assert!(apply_move(board, mv).is_ok(), "generated move {mv} is illegal");

    let mut next = board.clone();
    if let Cell::Occupied(player) = next.get(mv.from) {
        next.set(mv.from, Cell::Empty);
        next.set(mv.to, Cell::Occupied(player));
        next.set(mv.arrow, Cell::Blocked);
    }
    next
}
