use crate::{
    game::composter::ComposterName,
    selector,
    state::{Building, Buildings, Collectibles, GameState, Inventory, Plots},
};
use std::{collections::BTreeMap, rc::Rc};

pub type Composters = BTreeMap<ComposterName, Building>;

pub fn get_plots(state: Rc<GameState>) -> Rc<Plots> {
    state.plots.clone()
}

pub fn get_inventory(state: Rc<GameState>) -> Rc<Inventory> {
    state.inventory.clone()
}

pub fn get_collectibles(state: Rc<GameState>) -> Rc<Collectibles> {
    state.collectibles.clone()
}

pub fn get_buildings(state: Rc<GameState>) -> Rc<Buildings> {
    state.buildings.clone()
}

selector!(
    pub fn get_composters(state: Rc<GameState>) -> Rc<Composters> {
        memoize | buildings: get_buildings -> Rc<Buildings> | {
            // Only the first placed composter of each kind is operated.
            Rc::new(
                ComposterName::ALL
                    .iter()
                    .filter_map(|name| {
                        buildings
                            .get(name.as_str())
                            .and_then(|placed| placed.first())
                            .map(|building| (*name, building.clone()))
                    })
                    .collect(),
            )
        }
    }
);
