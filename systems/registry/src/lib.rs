#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Catalogue of every rule engine, keyed by a stable identifier.

use lifeworks_core::Life;
use lifeworks_system_amoeba::AmoebaLife;
use lifeworks_system_classic::{ClassicLife, SparseLife};
use lifeworks_system_species::{LifeInColor, RockPaperScissorsLife};
use lifeworks_system_vampire::VampireLife;
use thiserror::Error;

/// Builds a zero-sized engine from an RNG seed.
pub type Factory = fn(u64) -> Box<dyn Life>;

/// One selectable rule engine.
#[derive(Clone, Copy, Debug)]
pub struct VariantEntry {
    key: &'static str,
    name: &'static str,
    factory: Factory,
}

impl VariantEntry {
    /// Stable identifier used on the command line.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        self.key
    }

    /// Human readable name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Creates a fresh engine seeded with `seed`.
    #[must_use]
    pub fn create(&self, seed: u64) -> Box<dyn Life> {
        (self.factory)(seed)
    }
}

/// Failures raised while looking up engines.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// No engine is registered under the key.
    #[error("unknown variant `{key}`, expected one of: {known}")]
    UnknownVariant {
        /// Key that was requested.
        key: String,
        /// Comma separated list of valid keys.
        known: String,
    },
}

static VARIANTS: [VariantEntry; 8] = [
    VariantEntry {
        key: "simple",
        name: "Simple Life",
        factory: |seed| Box::new(ClassicLife::simple(seed)),
    },
    VariantEntry {
        key: "sparse",
        name: "Sparse Life",
        factory: |seed| Box::new(SparseLife::new(seed)),
    },
    VariantEntry {
        key: "hex",
        name: "Hex Life",
        factory: |seed| Box::new(ClassicLife::hex(seed)),
    },
    VariantEntry {
        key: "knight",
        name: "Knight Life",
        factory: |seed| Box::new(ClassicLife::knight(seed)),
    },
    VariantEntry {
        key: "color",
        name: "Life in Color",
        factory: |seed| Box::new(LifeInColor::new(seed)),
    },
    VariantEntry {
        key: "rock-paper-scissors",
        name: "Rock Paper Scissors",
        factory: |seed| Box::new(RockPaperScissorsLife::new(seed)),
    },
    VariantEntry {
        key: "vampire",
        name: "Vampire Life",
        factory: |seed| Box::new(VampireLife::new(seed)),
    },
    VariantEntry {
        key: "amoeba",
        name: "Amoeba Life",
        factory: |seed| Box::new(AmoebaLife::new(seed)),
    },
];

/// Every registered engine in presentation order.
#[must_use]
pub fn variants() -> &'static [VariantEntry] {
    &VARIANTS
}

/// Looks up the engine registered under `key`.
#[must_use]
pub fn find(key: &str) -> Option<&'static VariantEntry> {
    VARIANTS.iter().find(|entry| entry.key == key)
}

/// Creates the engine registered under `key`.
pub fn create(key: &str, seed: u64) -> Result<Box<dyn Life>, RegistryError> {
    let entry = find(key).ok_or_else(|| RegistryError::UnknownVariant {
        key: key.to_owned(),
        known: VARIANTS
            .iter()
            .map(VariantEntry::key)
            .collect::<Vec<_>>()
            .join(", "),
    })?;
    log::debug!("creating {} with seed {seed}", entry.name);
    Ok(entry.create(seed))
}
