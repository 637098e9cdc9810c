//! Seeded random self-play driver.
//!
//! Run with:
//! `cargo run --release --bin random_match`
//! `cargo run --release --bin random_match -- --verbose --seed 99`
//!
//! Plays one bounded game making uniform random choices over the whole
//! intent surface (moves, store purchases, power targets, promotions) and
//! checks the one-king-per-color invariant after every ply.

use chrono::Utc;
use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};

use rune_chess::game_state::chess_types::{BoardLocation, Color, PieceKind};
use rune_chess::session::game_session::GameSession;
use rune_chess::session::intents::IntentOutcome;
use rune_chess::utils::render_game_state::render_game_state;

const MAX_PLIES: usize = 200;
const PURCHASE_CHANCE: f64 = 0.25;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let verbose = args.iter().any(|a| a == "--verbose" || a == "-v");
    let seed = args
        .iter()
        .position(|a| a == "--seed")
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(1234);

    let started = Utc::now();
    let mut session = GameSession::with_seed(seed);
    let mut driver_rng = StdRng::seed_from_u64(seed ^ 0x5eed);

    for ply in 0..MAX_PLIES {
        if session.state().status.is_game_over() {
            break;
        }

        if driver_rng.random_bool(PURCHASE_CHANCE) && try_random_purchase(&mut session, &mut driver_rng) {
            continue;
        }

        if !play_random_move(&mut session, &mut driver_rng) {
            // No movable piece outside frozen columns; spend the ply on a
            // purchase if possible, otherwise resign.
            if !try_random_purchase(&mut session, &mut driver_rng) {
                let stuck = session.state().turn;
                session.resign(stuck);
            }
        }

        let state = session.state();
        assert_eq!(state.board.king_count(Color::Light), 1, "light king count");
        assert_eq!(state.board.king_count(Color::Dark), 1, "dark king count");

        if verbose {
            println!("--- ply {} ---", ply + 1);
            println!("{}", render_game_state(state));
        }
    }

    let elapsed = Utc::now() - started;
    let state = session.state();
    println!("{}", render_game_state(state));
    println!("moves played:");
    for (i, record) in state.history.iter().enumerate() {
        println!("  {:3}. {:?} {}", i + 1, record.color, record.notation);
    }
    println!(
        "seed {} | {} half-moves | finished as {:?} in {} ms",
        seed,
        state.history.len(),
        state.status,
        elapsed.num_milliseconds()
    );
}

/// Pick a random piece with legal moves and play a random destination.
fn play_random_move(session: &mut GameSession, rng: &mut StdRng) -> bool {
    let state = session.state();
    let color = state.turn;
    let mut playable: Vec<(BoardLocation, Vec<BoardLocation>)> = Vec::new();
    for from in state.board.piece_locations(color) {
        let moves = session.legal_moves(from);
        if !moves.is_empty() {
            playable.push((from, moves.iter().map(|m| m.to).collect()));
        }
    }
    let Some((from, destinations)) = playable.choose(rng) else {
        return false;
    };
    let to = *destinations.choose(rng).expect("non-empty destination list");

    assert_eq!(session.select_or_move(*from), IntentOutcome::Selected);
    match session.select_or_move(to) {
        IntentOutcome::MoveResolved => true,
        IntentOutcome::AwaitingPromotion => {
            let kind = *[
                PieceKind::Queen,
                PieceKind::Rook,
                PieceKind::Bishop,
                PieceKind::Knight,
            ]
            .choose(rng)
            .expect("promotion kinds");
            session.choose_promotion(kind) == IntentOutcome::MoveResolved
        }
        other => panic!("legal destination was rejected: {other:?}"),
    }
}

/// Attempt one affordable purchase and drive its activation to completion.
/// Rolls the session back when no valid target can be found.
fn try_random_purchase(session: &mut GameSession, rng: &mut StdRng) -> bool {
    let state = session.state();
    let color = state.turn;
    let affordable: Vec<usize> = state
        .store
        .offer
        .iter()
        .enumerate()
        .filter(|(_, &id)| {
            session.available_points(color)
                >= rune_chess::powers::power_list::power_definition(id).cost
        })
        .map(|(slot, _)| slot)
        .collect();
    let Some(&slot) = affordable.choose(rng) else {
        return false;
    };

    let checkpoint = session.snapshot();
    match session.purchase(slot) {
        IntentOutcome::PowerResolved => true,
        IntentOutcome::AwaitingPowerTarget => {
            let mut candidates: Vec<BoardLocation> = (0..8i8)
                .flat_map(|row| (0..8i8).map(move |col| (row, col)))
                .collect();
            candidates.shuffle(rng);
            for target in candidates {
                if session.supply_power_target(target) == IntentOutcome::PowerResolved {
                    return true;
                }
            }
            // No square satisfied the power; undo the purchase entirely.
            session.adopt_snapshot(checkpoint);
            false
        }
        IntentOutcome::Rejected(_) => false,
        other => panic!("unexpected purchase outcome: {other:?}"),
    }
}
