//! Reading and writing game state files. The reducers never call into this, it
//! is for whatever hosts the store and answers `SAVE`.

use crate::{crops::CropDetails, GameState};
use anyhow::{Context, Result};
use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::BufReader,
    path::Path,
};
use tracing::info;

pub fn load_state(path: &Path) -> Result<GameState> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open the game state at {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse the game state at {}", path.display()))
}

pub fn save_state(path: &Path, state: &GameState) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    let json = serde_json::to_string_pretty(state).context("Failed to serialize the game state")?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write the game state to {}", path.display()))?;
    info!(path = %path.display(), "saved game state");
    Ok(())
}

/// Load a crop catalog, a JSON object of crop names to `{ "harvestSeconds": n }`.
pub fn load_crops(path: &Path) -> Result<BTreeMap<String, CropDetails>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open the crop catalog at {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse the crop catalog at {}", path.display()))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        crops::CropCatalog,
        state::{CropInstance, PlotState},
    };
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use std::path::PathBuf;
    use tempdir::TempDir;

    #[test]
    fn test_save_and_load() {
        let tmp_dir = TempDir::new("homestead").expect("Failed to create a temp directory");
        let mut path: PathBuf = tmp_dir.path().into();
        path.push(".homestead");
        path.push("state.json");

        let state = GameState::new()
            .with_plot("1", PlotState::planted(CropInstance::new("Corn", 5)))
            .with_item("Sprout Mix", dec!(2.5));
        save_state(&path, &state).expect("Failed to save");

        assert_eq!(load_state(&path).expect("Failed to load"), state);
    }

    #[test]
    fn test_load_errors() {
        let tmp_dir = TempDir::new("homestead").expect("Failed to create a temp directory");
        let path = tmp_dir.path().join("missing.json");
        let err = load_state(&path).expect_err("Loading a missing file fails");
        assert!(err.to_string().starts_with("Failed to open the game state"));

        fs::write(&path, "{ not json").expect("Failed to write");
        let err = load_state(&path).expect_err("Loading garbage fails");
        assert!(err.to_string().starts_with("Failed to parse the game state"));
    }

    #[test]
    fn test_load_crops() {
        let tmp_dir = TempDir::new("homestead").expect("Failed to create a temp directory");
        let path = tmp_dir.path().join("crops.json");
        fs::write(&path, r#"{ "Moonberry": { "harvestSeconds": 90 } }"#).expect("Failed to write");

        let crops = load_crops(&path).expect("Failed to load");
        assert_eq!(
            crops.crop("Moonberry"),
            Some(CropDetails {
                harvest_seconds: 90
            })
        );
    }
}
