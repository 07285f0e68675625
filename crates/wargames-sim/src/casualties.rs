//! Casualty tally from the destruction record.

use wargames_core::cities::CityRegistry;
use wargames_core::enums::Side;
use wargames_core::state::{CasualtyReport, SideCasualties};

use crate::destruction::DestructionRecord;

/// Sum destroyed populations per side against each side's total population.
pub fn calculate(registry: &CityRegistry, destruction: &DestructionRecord) -> CasualtyReport {
    let side = |side: Side| {
        let casualties = destruction
            .side(side)
            .destroyed_indices()
            .filter_map(|i| registry.city(side, i))
            .map(|c| c.population)
            .sum();
        SideCasualties::new(casualties, registry.total_population(side))
    };
    CasualtyReport {
        player: side(Side::Player),
        opponent: side(Side::Opponent),
    }
}
