use crate::{crops::CropCatalog, reducers, Action, GameError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, rc::Rc};

pub type Plots = BTreeMap<String, PlotState>;
pub type Inventory = BTreeMap<String, Decimal>;
pub type Collectibles = BTreeMap<String, Vec<Placement>>;
pub type Buildings = BTreeMap<String, Vec<Building>>;

/// A snapshot of the game. Every slice is reference counted so that a new
/// snapshot shares the slices an action did not touch with the previous one.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Saved games call these "crops", even for plots with nothing planted.
    #[serde(default, alias = "crops")]
    pub(crate) plots: Rc<Plots>,
    #[serde(default)]
    pub(crate) inventory: Rc<Inventory>,
    #[serde(default)]
    pub(crate) collectibles: Rc<Collectibles>,
    #[serde(default)]
    pub(crate) buildings: Rc<Buildings>,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an action at the time `now`, in milliseconds. The current state is
    /// left untouched.
    pub fn reduce(
        &self,
        action: &Action,
        now: i64,
        crops: &dyn CropCatalog,
    ) -> Result<GameState, GameError> {
        reducers::reduce(self, action, now, crops)
    }

    pub fn with_plot(mut self, plot_id: impl Into<String>, plot: PlotState) -> Self {
        Rc::make_mut(&mut self.plots).insert(plot_id.into(), plot);
        self
    }

    pub fn with_item(mut self, name: impl Into<String>, amount: Decimal) -> Self {
        Rc::make_mut(&mut self.inventory).insert(name.into(), amount);
        self
    }

    pub fn with_collectible(mut self, name: impl Into<String>, placement: Placement) -> Self {
        Rc::make_mut(&mut self.collectibles)
            .entry(name.into())
            .or_default()
            .push(placement);
        self
    }

    pub fn with_building(mut self, name: impl Into<String>, building: Building) -> Self {
        Rc::make_mut(&mut self.buildings)
            .entry(name.into())
            .or_default()
            .push(building);
        self
    }

    pub fn plots(&self) -> &Plots {
        &self.plots
    }

    pub fn plot(&self, plot_id: &str) -> Option<&PlotState> {
        self.plots.get(plot_id)
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// The amount of an item held, missing items count as zero.
    pub fn item_count(&self, name: &str) -> Decimal {
        self.inventory.get(name).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn collectibles(&self) -> &Collectibles {
        &self.collectibles
    }

    pub fn buildings(&self) -> &Buildings {
        &self.buildings
    }
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone, Default)]
pub struct PlotState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop: Option<CropInstance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fertiliser: Option<FertiliserApplication>,
}

impl PlotState {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn planted(crop: CropInstance) -> Self {
        Self {
            crop: Some(crop),
            fertiliser: None,
        }
    }
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CropInstance {
    pub name: String,
    pub planted_at: i64,
    /// The yield of the crop, a missing amount is a yield of 1. Saved as a
    /// JSON number.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub amount: Option<Decimal>,
}

impl CropInstance {
    pub fn new(name: impl Into<String>, planted_at: i64) -> Self {
        Self {
            name: name.into(),
            planted_at,
            amount: None,
        }
    }
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FertiliserApplication {
    pub name: String,
    pub fertilised_at: i64,
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Copy, Default)]
pub struct Coordinates {
    pub x: i32,
    pub y: i32,
}

/// A collectible placed on the island.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub id: String,
    #[serde(default)]
    pub coordinates: Coordinates,
    #[serde(default)]
    pub created_at: i64,
    /// When construction finishes. Placements without one are already built.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ready_at: Option<i64>,
}

impl Placement {
    pub fn new(id: impl Into<String>, ready_at: i64) -> Self {
        Self {
            id: id.into(),
            coordinates: Coordinates::default(),
            created_at: ready_at,
            ready_at: Some(ready_at),
        }
    }
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Building {
    pub id: String,
    #[serde(default)]
    pub coordinates: Coordinates,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub ready_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub producing: Option<Production>,
}

impl Building {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            coordinates: Coordinates::default(),
            created_at: 0,
            ready_at: 0,
            producing: None,
        }
    }

    pub fn producing(mut self, started_at: i64, ready_at: i64) -> Self {
        self.producing = Some(Production {
            started_at,
            ready_at,
        });
        self
    }
}

/// An in-progress production run of a building.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub struct Production {
    pub started_at: i64,
    pub ready_at: i64,
}

/// Whether at least one placement of the collectible has finished building by
/// `now`.
pub fn is_collectible_built(name: &str, collectibles: &Collectibles, now: i64) -> bool {
    collectibles.get(name).map_or(false, |placements| {
        placements
            .iter()
            .any(|placement| placement.ready_at.map_or(true, |ready_at| ready_at <= now))
    })
}

pub mod selectors;
mod utils;
