use crate::{
    actions::FertilisePlotAction,
    crops::{is_ready_to_harvest, CropCatalog, CropDetails, Crops},
    state::{is_collectible_built, Collectibles, CropInstance, FertiliserApplication},
    utils::get_timestamp,
    FertiliseError, GameState,
};
use rust_decimal::Decimal;
use std::rc::Rc;

pub const RAPID_ROOT: &str = "Rapid Root";
pub const SPROUT_MIX: &str = "Sprout Mix";
/// Doubles the yield bonus of Sprout Mix once built.
pub const KNOWLEDGE_CRAB: &str = "Knowledge Crab";

/// What a buff can look at when it is applied to a crop.
struct BuffContext<'a> {
    fertilised_at: i64,
    details: &'a CropDetails,
    collectibles: &'a Collectibles,
}

type CropBuff = fn(&mut CropInstance, &BuffContext<'_>) -> Result<(), FertiliseError>;

/// Fertilisers that change the crop they are spread on. A fertiliser missing
/// from this table is still used up, it just does nothing to the crop.
const CROP_BUFFS: [(&str, CropBuff); 2] = [
    (RAPID_ROOT, apply_rapid_root),
    (SPROUT_MIX, apply_sprout_mix),
];

fn crop_buff(fertiliser: &str) -> Option<CropBuff> {
    CROP_BUFFS
        .iter()
        .find(|(name, _)| *name == fertiliser)
        .map(|&(_, buff)| buff)
}

/// Compute the planting time that halves the growing time left at
/// `fertilised_at`. Returns `None` if the timestamps overflow.
pub fn get_planted_at(planted_at: i64, fertilised_at: i64, details: &CropDetails) -> Option<i64> {
    let harvest_at = planted_at.checked_add(details.harvest_millis())?;
    let time_reduction = harvest_at.checked_sub(fertilised_at)? / 2;
    planted_at.checked_sub(time_reduction)
}

fn apply_rapid_root(crop: &mut CropInstance, context: &BuffContext<'_>) -> Result<(), FertiliseError> {
    crop.planted_at = get_planted_at(crop.planted_at, context.fertilised_at, context.details)
        .ok_or(FertiliseError::ArithmeticOverflow)?;
    Ok(())
}

fn apply_sprout_mix(crop: &mut CropInstance, context: &BuffContext<'_>) -> Result<(), FertiliseError> {
    let bonus = if is_collectible_built(KNOWLEDGE_CRAB, context.collectibles, context.fertilised_at) {
        Decimal::new(4, 1)
    } else {
        Decimal::new(2, 1)
    };
    crop.amount = Some(crop.amount.unwrap_or(Decimal::ONE) + bonus);
    Ok(())
}

/// Spread fertiliser on a plot at the time `now`, in milliseconds.
///
/// Either everything applies or nothing does: on error the returned state is
/// never built, and the input state is never modified. Only the plots and the
/// inventory are replaced in the returned state, the other slices are shared
/// with the input.
pub fn fertilise_plot(
    state: &GameState,
    action: &FertilisePlotAction,
    now: i64,
    crops: &dyn CropCatalog,
) -> Result<GameState, FertiliseError> {
    let plot = state
        .plots
        .get(&action.plot_id)
        .ok_or(FertiliseError::EmptyPlot)?;

    if plot.fertiliser.is_some() {
        return Err(FertiliseError::CropAlreadyFertilised);
    }

    let fertiliser = match action.fertiliser.as_deref() {
        Some(name) if !name.is_empty() => name,
        _ => return Err(FertiliseError::NoFertiliserSelected),
    };

    let owned = state.item_count(fertiliser);
    if owned < Decimal::ONE {
        return Err(FertiliseError::NotEnoughFertiliser);
    }

    let mut plot = plot.clone();

    // Crops missing from the catalog are fertilised without any buff.
    if let Some(crop) = plot.crop.as_mut() {
        if let Some(details) = crops.crop(&crop.name) {
            if is_ready_to_harvest(now, crop, &details) {
                return Err(FertiliseError::ReadyToHarvest);
            }

            if let Some(buff) = crop_buff(fertiliser) {
                let context = BuffContext {
                    fertilised_at: now,
                    details: &details,
                    collectibles: &state.collectibles,
                };
                buff(crop, &context)?;
            }
        }
    }

    plot.fertiliser = Some(FertiliserApplication {
        name: fertiliser.to_string(),
        fertilised_at: now,
    });

    let mut next = state.clone();
    Rc::make_mut(&mut next.plots).insert(action.plot_id.clone(), plot);
    Rc::make_mut(&mut next.inventory).insert(fertiliser.to_string(), owned - Decimal::ONE);
    Ok(next)
}

/// Fertilise with the standard crops at the current wall-clock time.
pub fn fertilise_plot_now(
    state: &GameState,
    action: &FertilisePlotAction,
) -> Result<GameState, FertiliseError> {
    fertilise_plot(state, action, get_timestamp(), &Crops)
}
