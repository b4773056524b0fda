//! Crop growth durations and the harvest readiness rule.

use crate::state::CropInstance;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub struct CropDetails {
    /// The time from planting until the crop can be harvested.
    pub harvest_seconds: u32,
}

impl CropDetails {
    pub fn harvest_millis(&self) -> i64 {
        i64::from(self.harvest_seconds) * 1000
    }
}

/// Looks up how crops grow. A crop missing from the catalog is not an error,
/// callers decide how to treat it.
pub trait CropCatalog {
    fn crop(&self, name: &str) -> Option<CropDetails>;
}

const MINUTE: u32 = 60;
const HOUR: u32 = 60 * MINUTE;

const CROPS: [(&str, u32); 13] = [
    ("Sunflower", MINUTE),
    ("Potato", 5 * MINUTE),
    ("Pumpkin", 30 * MINUTE),
    ("Carrot", HOUR),
    ("Cabbage", 2 * HOUR),
    ("Beetroot", 4 * HOUR),
    ("Cauliflower", 8 * HOUR),
    ("Parsnip", 12 * HOUR),
    ("Eggplant", 16 * HOUR),
    ("Corn", 20 * HOUR),
    ("Radish", 24 * HOUR),
    ("Wheat", 24 * HOUR),
    ("Kale", 36 * HOUR),
];

/// The crops that ship with the game.
#[derive(Debug, Clone, Copy, Default)]
pub struct Crops;

impl CropCatalog for Crops {
    fn crop(&self, name: &str) -> Option<CropDetails> {
        CROPS
            .iter()
            .find(|(crop_name, _)| *crop_name == name)
            .map(|&(_, harvest_seconds)| CropDetails { harvest_seconds })
    }
}

/// A catalog loaded from data, see `persist::load_crops`.
impl CropCatalog for BTreeMap<String, CropDetails> {
    fn crop(&self, name: &str) -> Option<CropDetails> {
        self.get(name).copied()
    }
}

/// A crop is ready once its full growth time has passed since it was planted.
pub fn is_ready_to_harvest(now: i64, crop: &CropInstance, details: &CropDetails) -> bool {
    match crop.planted_at.checked_add(details.harvest_millis()) {
        Some(harvest_at) => now >= harvest_at,
        None => false,
    }
}
