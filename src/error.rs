use thiserror::Error;

/// The reasons a plot can fail to be fertilised. The messages are the ones
/// surfaced to the player.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FertiliseError {
    #[error("Plot does not exist!")]
    EmptyPlot,
    /// Shared with the planting transition, never raised while fertilising.
    #[error("There is a crop planted!")]
    CropExists,
    #[error("Crop is ready to harvest!")]
    ReadyToHarvest,
    #[error("Crop is already fertilised!")]
    CropAlreadyFertilised,
    #[error("No fertiliser selected!")]
    NoFertiliserSelected,
    /// Shared with the planting transition, never raised while fertilising.
    #[error("Not a fertiliser!")]
    NotAFertiliser,
    #[error("Not enough fertiliser!")]
    NotEnoughFertiliser,
    #[error("Timestamp arithmetic overflowed!")]
    ArithmeticOverflow,
}

impl FertiliseError {
    /// A stable identifier for the error, suitable for matching on in a client.
    pub fn code(&self) -> &'static str {
        match self {
            FertiliseError::EmptyPlot => "EMPTY_PLOT",
            FertiliseError::CropExists => "CROP_EXISTS",
            FertiliseError::ReadyToHarvest => "READY_TO_HARVEST",
            FertiliseError::CropAlreadyFertilised => "CROP_ALREADY_FERTILISED",
            FertiliseError::NoFertiliserSelected => "NO_FERTILISER_SELECTED",
            FertiliseError::NotAFertiliser => "NOT_A_FERTILISER",
            FertiliseError::NotEnoughFertiliser => "NOT_ENOUGH_FERTILISER",
            FertiliseError::ArithmeticOverflow => "ARITHMETIC_OVERFLOW",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error(transparent)]
    Fertilise(#[from] FertiliseError),
    #[error("There is no {0} placed!")]
    MissingBuilding(String),
}

impl GameError {
    pub fn code(&self) -> &'static str {
        match self {
            GameError::Fertilise(err) => err.code(),
            GameError::MissingBuilding(_) => "MISSING_BUILDING",
        }
    }
}

assert_impl_all!(FertiliseError: std::error::Error, Send, Sync);
assert_impl_all!(GameError: std::error::Error, Send, Sync);
