//! `GameSession`: the single owner of a game's state.
//!
//! Collaborators submit discrete intents and read back the full snapshot
//! after every mutating operation. Each entry point is atomic: it either
//! applies completely or rejects without touching the state.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::legal_moves;
use crate::powers::activation;
use crate::powers::economy::{self, PurchaseOutcome};
use crate::powers::knight_passive;
use crate::session::intents::{IntentOutcome, RejectReason};
use crate::session::resolution;

pub struct GameSession {
    state: GameState,
    rng: StdRng,
}

impl GameSession {
    /// New session with OS-seeded randomness.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    /// Deterministic session for tests and reproducible self-play.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(mut rng: StdRng) -> Self {
        let state = GameState::new_game(&mut rng);
        Self { state, rng }
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Full snapshot for rendering/replication collaborators.
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    /// Adopt an externally supplied snapshot wholesale (restored state).
    pub fn adopt_snapshot(&mut self, snapshot: GameState) {
        self.state = snapshot;
    }

    pub fn available_points(&self, color: Color) -> u32 {
        economy::available_points(&self.state, color)
    }

    pub fn is_square_frozen(&self, column: i8, color: Color) -> bool {
        self.state.is_square_frozen(column, color)
    }

    /// Legal destinations of the piece on `from`; empty for frozen pieces.
    pub fn legal_moves(&self, from: BoardLocation) -> Vec<MoveCandidate> {
        let Some(piece) = self.state.board.piece_at(from) else {
            return Vec::new();
        };
        if self.state.is_square_frozen(from.1, piece.color) {
            return Vec::new();
        }
        legal_moves(
            &self.state.board,
            from,
            self.state.en_passant_target,
            &self.state.castling_rights,
        )
    }

    /// Main board intent: selects a piece, resolves a move, or routes the
    /// target of a pending power.
    pub fn select_or_move(&mut self, target: BoardLocation) -> IntentOutcome {
        if !on_board(target) {
            return IntentOutcome::Rejected(RejectReason::InvalidSelection);
        }
        if self.state.status.is_game_over() {
            return IntentOutcome::Rejected(RejectReason::GameOver);
        }
        if self.state.pending_promotion.is_some() {
            return IntentOutcome::Rejected(RejectReason::InvalidSelection);
        }
        if self.state.pending_power.is_some() {
            return self.supply_power_target(target);
        }

        match self.state.selected {
            Some(selected) => self.continue_selection(selected, target),
            None => self.try_select(target),
        }
    }

    fn try_select(&mut self, target: BoardLocation) -> IntentOutcome {
        let Some(piece) = self.state.board.piece_at(target) else {
            return IntentOutcome::Rejected(RejectReason::InvalidSelection);
        };
        if piece.color != self.state.turn {
            return IntentOutcome::Rejected(RejectReason::InvalidSelection);
        }
        if self.state.is_square_frozen(target.1, piece.color) {
            return IntentOutcome::Rejected(RejectReason::InvalidSelection);
        }
        self.state.selected = Some(target);
        IntentOutcome::Selected
    }

    fn continue_selection(
        &mut self,
        selected: BoardLocation,
        target: BoardLocation,
    ) -> IntentOutcome {
        let candidates = legal_moves(
            &self.state.board,
            selected,
            self.state.en_passant_target,
            &self.state.castling_rights,
        );

        if let Some(candidate) = candidates.iter().find(|m| m.to == target).copied() {
            let is_pawn = self
                .state
                .board
                .piece_at(selected)
                .is_some_and(|p| p.kind == PieceKind::Pawn);
            if is_pawn && (target.0 == 0 || target.0 == 7) {
                self.state.pending_promotion = Some(PendingPromotion {
                    from: selected,
                    to: target,
                    en_passant: candidate.en_passant,
                });
                self.state.selected = None;
                return IntentOutcome::AwaitingPromotion;
            }

            let Self { state, rng } = self;
            resolution::resolve_move(
                state,
                rng,
                selected,
                target,
                candidate.en_passant,
                candidate.castle,
                None,
            );
            return IntentOutcome::MoveResolved;
        }

        // Switching to another own piece is a fresh selection; anything else
        // is an illegal destination and leaves the selection standing.
        if self
            .state
            .board
            .piece_at(target)
            .is_some_and(|p| p.color == self.state.turn)
        {
            return self.try_select(target);
        }
        IntentOutcome::Rejected(RejectReason::IllegalDestination)
    }

    /// Supply the promotion piece for a suspended pawn move.
    pub fn choose_promotion(&mut self, kind: PieceKind) -> IntentOutcome {
        if self.state.status.is_game_over() {
            return IntentOutcome::Rejected(RejectReason::GameOver);
        }
        let Some(pending) = self.state.pending_promotion else {
            return IntentOutcome::Rejected(RejectReason::InvalidSelection);
        };
        if !matches!(
            kind,
            PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight
        ) {
            return IntentOutcome::Rejected(RejectReason::InvalidSelection);
        }

        self.state.pending_promotion = None;
        let Self { state, rng } = self;
        resolution::resolve_move(
            state,
            rng,
            pending.from,
            pending.to,
            pending.en_passant,
            None,
            Some(kind),
        );
        IntentOutcome::MoveResolved
    }

    /// Purchase the offer slot `slot` for the side to move.
    pub fn purchase(&mut self, slot: usize) -> IntentOutcome {
        let Self { state, rng } = self;
        match economy::purchase(state, rng, slot) {
            Ok(PurchaseOutcome::TurnConsumed) => IntentOutcome::PowerResolved,
            Ok(PurchaseOutcome::TargetPending) => IntentOutcome::AwaitingPowerTarget,
            Err(reason) => IntentOutcome::Rejected(reason),
        }
    }

    /// Supply the board target for the pending power.
    pub fn supply_power_target(&mut self, target: BoardLocation) -> IntentOutcome {
        let Self { state, rng } = self;
        match activation::supply_power_target(state, rng, target) {
            Ok(()) => IntentOutcome::PowerResolved,
            Err(reason) => IntentOutcome::Rejected(reason),
        }
    }

    /// Arm a charged knight's swap passive; the next target picks the
    /// exchange partner.
    pub fn begin_knight_passive(&mut self, source: BoardLocation) -> IntentOutcome {
        match knight_passive::begin_swap(&mut self.state, source) {
            Ok(()) => IntentOutcome::AwaitingPowerTarget,
            Err(reason) => IntentOutcome::Rejected(reason),
        }
    }

    /// Terminal transition: `color` concedes the game.
    pub fn resign(&mut self, color: Color) -> IntentOutcome {
        if self.state.status.is_game_over() {
            return IntentOutcome::Rejected(RejectReason::GameOver);
        }
        self.state.history.push(HistoryRecord {
            notation: "[Resigns]".to_owned(),
            color,
        });
        self.state.status = GameStatus::Resigned(color);
        self.state.selected = None;
        self.state.pending_promotion = None;
        self.state.pending_power = None;
        IntentOutcome::Resigned
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
