//! Timed-effects scheduler.
//!
//! Runs once at the end of every half-move, including turn-consuming power
//! activations. Counters tick strictly on half-moves; nothing here is
//! wall-clock based.

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;

/// A bonus token spawns every `TOKEN_SPAWN_INTERVAL`th half-move when absent.
pub const TOKEN_SPAWN_INTERVAL: usize = 6;
/// A hazard zone spawns every `HAZARD_SPAWN_INTERVAL`th half-move when absent.
pub const HAZARD_SPAWN_INTERVAL: usize = 16;
/// Half-moves from hazard spawn to detonation.
pub const HAZARD_COUNTDOWN_HALF_MOVES: i8 = 4;

/// Advance every countdown by one half-move and run the periodic spawns.
pub fn advance_timers<R: Rng>(state: &mut GameState, rng: &mut R) {
    tick_obstacles(state);
    tick_blessings(state);
    tick_freezes(state);
    tick_hazard_zone(state);

    let half_moves = state.half_move_count();
    if half_moves > 0 && half_moves % TOKEN_SPAWN_INTERVAL == 0 && state.bonus_token.is_none() {
        spawn_bonus_token(state, rng);
    }
    if half_moves > 0 && half_moves % HAZARD_SPAWN_INTERVAL == 0 && state.hazard_zone.is_none() {
        spawn_hazard_zone(state, rng);
    }
}

fn tick_obstacles(state: &mut GameState) {
    for location in state.board.obstacle_locations() {
        let expired = match state.board.obstacle_at_mut(location) {
            Some(obstacle) => {
                obstacle.remaining_half_moves -= 1;
                obstacle.remaining_half_moves <= 0
            }
            None => false,
        };
        if expired {
            state.board.take(location);
        }
    }
}

fn tick_blessings(state: &mut GameState) {
    for color in [Color::Light, Color::Dark] {
        let remaining = state.store.blessing_half_moves.get_mut(color);
        if *remaining > 0 {
            *remaining -= 1;
        }
    }
}

fn tick_freezes(state: &mut GameState) {
    for entry in &mut state.frozen {
        entry.remaining_half_moves -= 1;
    }
    state.frozen.retain(|entry| entry.remaining_half_moves > 0);
}

fn tick_hazard_zone(state: &mut GameState) {
    let Some(zone) = &mut state.hazard_zone else {
        return;
    };
    zone.remaining_half_moves -= 1;
    if zone.remaining_half_moves > 0 {
        return;
    }
    let zone = *zone;
    // Detonation removes pieces only; obstacles outlive the blast and nobody
    // is credited.
    for row in zone.top_row..=zone.top_row + 1 {
        for col in zone.left_col..=zone.left_col + 1 {
            if state.board.piece_at((row, col)).is_some() {
                state.board.take((row, col));
            }
        }
    }
    state.hazard_zone = None;
}

fn spawn_bonus_token<R: Rng>(state: &mut GameState, rng: &mut R) {
    let empty = state.board.empty_locations();
    if let Some(&location) = empty.choose(rng) {
        state.bonus_token = Some(location);
    }
}

fn spawn_hazard_zone<R: Rng>(state: &mut GameState, rng: &mut R) {
    // Anchor rows 2..=4 keep the 2x2 footprint inside ranks 3..6.
    let top_row = rng.random_range(2..5);
    let left_col = rng.random_range(0..7);
    state.hazard_zone = Some(HazardZone {
        top_row,
        left_col,
        remaining_half_moves: HAZARD_COUNTDOWN_HALF_MOVES,
    });
}
