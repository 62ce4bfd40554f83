//! Plant species: phenology, seed bank and life-history strategies.

pub mod plant;
pub mod reproduction;
pub mod seed_bank;

pub use plant::{GrowthState, PlantSpecies, SpeciesError, SpeciesParams};
pub use reproduction::Reproduction;
pub use seed_bank::{SeedBank, SeedOutput};
