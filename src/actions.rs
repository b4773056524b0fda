use serde::{Deserialize, Serialize};

/// Player actions that change the game state. The JSON form is tagged by the
/// event name the game client dispatches.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(tag = "type")]
pub enum Action {
    #[serde(rename = "plot.fertilised")]
    PlotFertilised(FertilisePlotAction),
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::PlotFertilised(_) => "plot.fertilised",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct FertilisePlotAction {
    #[serde(rename = "plotID")]
    pub plot_id: String,
    /// Sent by the client, fertilising does not depend on it.
    #[serde(default)]
    pub expansion_index: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fertiliser: Option<String>,
}

impl From<FertilisePlotAction> for Action {
    fn from(other: FertilisePlotAction) -> Self {
        Self::PlotFertilised(other)
    }
}

pub fn fertilise_plot(plot_id: impl Into<String>, fertiliser: impl Into<String>) -> Action {
    FertilisePlotAction {
        plot_id: plot_id.into(),
        expansion_index: 0,
        fertiliser: Some(fertiliser.into()),
    }
    .into()
}
