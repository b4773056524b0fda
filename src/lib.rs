pub mod actions;
pub mod commands;
pub mod crops;
pub mod error;
pub mod game;
pub mod persist;
pub mod reducers;
mod state;
pub mod store;
pub mod utils;

pub use actions::{Action, FertilisePlotAction};
pub use commands::{Command, CommandBus};
pub use error::{FertiliseError, GameError};
pub use state::{
    is_collectible_built, selectors, Building, Buildings, Collectibles, Coordinates,
    CropInstance, FertiliserApplication, GameState, Inventory, Placement, PlotState, Plots,
    Production,
};
pub use store::Store;

#[macro_use]
extern crate static_assertions;
