//! The fixed roster of purchasable powers.

use serde::{Deserialize, Serialize};

use crate::game_state::chess_types::{BoardLocation, Color};

/// Lifespan of a placed obstacle, in half-moves.
pub const OBSTACLE_LIFESPAN_HALF_MOVES: i8 = 10;
/// Duration of a column freeze, in half-moves (4 full rounds).
pub const FREEZE_DURATION_HALF_MOVES: i8 = 8;
/// Duration of the blessing's point-doubling window, in half-moves.
pub const BLESSING_DURATION_HALF_MOVES: u8 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerId {
    Obstacle,
    Duplicate,
    Hunt,
    Freeze,
    Shield,
    Blessing,
}

pub const ALL_POWER_IDS: [PowerId; 6] = [
    PowerId::Obstacle,
    PowerId::Duplicate,
    PowerId::Hunt,
    PowerId::Freeze,
    PowerId::Shield,
    PowerId::Blessing,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerDefinition {
    pub id: PowerId,
    pub name: &'static str,
    pub cost: u32,
    pub description: &'static str,
}

const POWER_ROSTER: [PowerDefinition; 6] = [
    PowerDefinition {
        id: PowerId::Obstacle,
        name: "Obstacle",
        cost: 15,
        description: "Opens an impassable pit on an empty square",
    },
    PowerDefinition {
        id: PowerId::Duplicate,
        name: "Duplicate",
        cost: 14,
        description: "Creates a copy of an allied piece (king and queen excluded)",
    },
    PowerDefinition {
        id: PowerId::Hunt,
        name: "Hunt",
        cost: 17,
        description: "Pulls the nearest enemy in a piece's column next to it",
    },
    PowerDefinition {
        id: PowerId::Freeze,
        name: "Freeze",
        cost: 18,
        description: "Freezes a column against the opponent for 4 rounds",
    },
    PowerDefinition {
        id: PowerId::Shield,
        name: "Shield",
        cost: 19,
        description: "Protects an allied piece from one capture",
    },
    PowerDefinition {
        id: PowerId::Blessing,
        name: "Blessing",
        cost: 17,
        description: "Doubles capture and token points for 6 half-moves",
    },
];

#[inline]
pub fn power_definition(id: PowerId) -> &'static PowerDefinition {
    POWER_ROSTER
        .iter()
        .find(|definition| definition.id == id)
        .expect("every power id has a roster entry")
}

/// What the next target-selection intent must resolve. `KnightSwap` is the
/// knight's capture passive, which shares the activation machinery without
/// going through the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingPowerKind {
    Obstacle,
    Duplicate,
    Hunt,
    Freeze,
    Shield,
    KnightSwap { source: BoardLocation },
}

/// Marks that the next board-target intent belongs to the activation machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingPower {
    pub kind: PendingPowerKind,
    pub owner: Color,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_costs_are_stable() {
        assert_eq!(power_definition(PowerId::Obstacle).cost, 15);
        assert_eq!(power_definition(PowerId::Duplicate).cost, 14);
        assert_eq!(power_definition(PowerId::Hunt).cost, 17);
        assert_eq!(power_definition(PowerId::Freeze).cost, 18);
        assert_eq!(power_definition(PowerId::Shield).cost, 19);
        assert_eq!(power_definition(PowerId::Blessing).cost, 17);
    }
}
