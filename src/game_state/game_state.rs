//! The central game-state aggregate.
//!
//! `GameState` is the full serializable snapshot handed to collaborators
//! after every mutating operation: board, turn machinery, history, captured
//! lists, the power store, and all timed-effect state. It replaces the
//! original design's ambient globals so multiple sessions can coexist.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::powers::economy::StoreState;
use crate::powers::power_list::PendingPower;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    // --- Board and base-rule state ---
    pub board: Board,
    pub turn: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_target: Option<BoardLocation>,
    pub status: GameStatus,

    // --- Selection / suspension machinery ---
    pub selected: Option<BoardLocation>,
    pub pending_promotion: Option<PendingPromotion>,
    pub pending_power: Option<PendingPower>,

    // --- Bookkeeping ---
    pub last_move: Option<(BoardLocation, BoardLocation)>,
    pub history: Vec<HistoryRecord>,
    pub captured: ByColor<Vec<Piece>>,
    pub next_identity: u32,

    // --- Power store ---
    pub store: StoreState,

    // --- Timed effects ---
    pub frozen: Vec<FreezeEntry>,
    pub hazard_zone: Option<HazardZone>,
    pub bonus_token: Option<BoardLocation>,
}

impl GameState {
    /// Fresh game from the standard starting position with a shuffled offer.
    pub fn new_game<R: Rng>(rng: &mut R) -> Self {
        Self {
            board: Board::starting_position(),
            turn: Color::Light,
            castling_rights: CastlingRights::initial(),
            en_passant_target: None,
            status: GameStatus::Playing,

            selected: None,
            pending_promotion: None,
            pending_power: None,

            last_move: None,
            history: Vec::new(),
            captured: ByColor {
                light: Vec::new(),
                dark: Vec::new(),
            },
            // Setup hands out identities 1..=32.
            next_identity: 33,

            store: StoreState::new(rng),

            frozen: Vec::new(),
            hazard_zone: None,
            bonus_token: None,
        }
    }

    /// Half-moves played so far; drives periodic-event cadence.
    #[inline]
    pub fn half_move_count(&self) -> usize {
        self.history.len()
    }

    /// Hand out a fresh piece identity (duplication).
    #[inline]
    pub fn allocate_identity(&mut self) -> u32 {
        let identity = self.next_identity;
        self.next_identity += 1;
        identity
    }

    /// Whether `color` currently may not move pieces standing in `column`.
    pub fn is_square_frozen(&self, column: i8, color: Color) -> bool {
        self.frozen.iter().any(|entry| {
            entry.column == column
                && entry.affected_color == color
                && entry.remaining_half_moves > 0
        })
    }

    /// Flip the super-pawn movement override on a pawn. Returns `false` when
    /// the location holds no pawn. The granting trigger lives with external
    /// passive systems; the core only honors the flag.
    pub fn set_super_pawn(&mut self, location: BoardLocation) -> bool {
        match self.board.piece_at_mut(location) {
            Some(piece) if piece.kind == PieceKind::Pawn => {
                piece.super_pawn = true;
                true
            }
            _ => false,
        }
    }
}
