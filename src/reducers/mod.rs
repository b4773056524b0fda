use crate::{crops::CropCatalog, Action, GameError, GameState};

mod fertilise_plot;

pub use fertilise_plot::{
    fertilise_plot, fertilise_plot_now, get_planted_at, KNOWLEDGE_CRAB, RAPID_ROOT, SPROUT_MIX,
};

/// Route an action to the transition that handles it.
pub fn reduce(
    state: &GameState,
    action: &Action,
    now: i64,
    crops: &dyn CropCatalog,
) -> Result<GameState, GameError> {
    match action {
        Action::PlotFertilised(action) => Ok(fertilise_plot(state, action, now, crops)?),
    }
}
