//! The composter on the island. This holds no state of its own: it reads the
//! composter out of the game state, works out what to show, and tells the game
//! service when the player starts or collects a batch.

use crate::{
    commands::{Command, CommandBus},
    selectors,
    state::Building,
    GameError, GameState,
};
use serde::{Deserialize, Serialize};
use std::{fmt, rc::Rc, str::FromStr};
use thiserror::Error;

#[derive(Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub enum ComposterName {
    #[serde(rename = "Compost Bin")]
    CompostBin,
    #[serde(rename = "Turbo Composter")]
    TurboComposter,
    #[serde(rename = "Premium Composter")]
    PremiumComposter,
}

impl ComposterName {
    pub const ALL: [ComposterName; 3] = [
        ComposterName::CompostBin,
        ComposterName::TurboComposter,
        ComposterName::PremiumComposter,
    ];

    /// The building name the composter is stored under.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComposterName::CompostBin => "Compost Bin",
            ComposterName::TurboComposter => "Turbo Composter",
            ComposterName::PremiumComposter => "Premium Composter",
        }
    }
}

impl fmt::Display for ComposterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
#[error("{0:?} is not a composter")]
pub struct UnknownComposter(String);

impl FromStr for ComposterName {
    type Err = UnknownComposter;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ComposterName::ALL
            .iter()
            .find(|name| name.as_str() == value)
            .copied()
            .ok_or_else(|| UnknownComposter(value.to_string()))
    }
}

#[derive(Serialize, PartialEq, Eq, Debug, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum ComposterStatus {
    Idle,
    Composting,
    Ready,
}

#[derive(Debug, Clone)]
pub struct ComposterWidget {
    name: ComposterName,
    bus: CommandBus,
}

impl ComposterWidget {
    pub fn new(name: ComposterName, bus: CommandBus) -> Self {
        Self { name, bus }
    }

    pub fn name(&self) -> ComposterName {
        self.name
    }

    fn composter(&self, state: Rc<GameState>) -> Option<Building> {
        selectors::get_composters(state).get(&self.name).cloned()
    }

    fn require_composter(&self, state: Rc<GameState>) -> Result<Building, GameError> {
        self.composter(state)
            .ok_or_else(|| GameError::MissingBuilding(self.name.to_string()))
    }

    pub fn status(&self, state: Rc<GameState>, now: i64) -> ComposterStatus {
        match self.composter(state).and_then(|composter| composter.producing) {
            None => ComposterStatus::Idle,
            Some(producing) if now < producing.ready_at => ComposterStatus::Composting,
            Some(_) => ComposterStatus::Ready,
        }
    }

    /// How far along the current batch is, from 0 to 1. `None` when idle.
    pub fn progress(&self, state: Rc<GameState>, now: i64) -> Option<f64> {
        let producing = self.composter(state)?.producing?;
        let total = producing.ready_at.saturating_sub(producing.started_at);
        if total <= 0 {
            return Some(1.0);
        }
        let elapsed = now.saturating_sub(producing.started_at).clamp(0, total);
        Some(elapsed as f64 / total as f64)
    }

    /// When the widget next needs to be redrawn, which is the moment a batch
    /// finishes.
    pub fn next_render_at(&self, state: Rc<GameState>, now: i64) -> Option<i64> {
        self.composter(state)
            .and_then(|composter| composter.producing)
            .map(|producing| producing.ready_at)
            .filter(|ready_at| now < *ready_at)
    }

    pub fn start(&self, state: Rc<GameState>) -> Result<(), GameError> {
        let composter = self.require_composter(state)?;
        self.bus.send(Command::ComposterStarted {
            building_id: composter.id,
            building: self.name,
        });
        Ok(())
    }

    /// Collect the compost, then ask for the game to be saved.
    pub fn collect(&self, state: Rc<GameState>) -> Result<(), GameError> {
        let composter = self.require_composter(state)?;
        self.bus.send(Command::CompostCollected {
            building_id: composter.id,
            building: self.name,
        });
        self.bus.send(Command::Save);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;
    use tokio::sync::mpsc::UnboundedReceiver;

    fn drain(receiver: &mut UnboundedReceiver<Command>) -> Vec<Command> {
        let mut commands = vec![];
        while let Ok(command) = receiver.try_recv() {
            commands.push(command);
        }
        commands
    }

    fn state_with(name: ComposterName, building: Building) -> Rc<GameState> {
        Rc::new(GameState::new().with_building(name.as_str(), building))
    }

    #[test]
    fn test_composter_names() {
        for name in ComposterName::ALL {
            assert_eq!(name.as_str().parse::<ComposterName>().ok(), Some(name));
        }
        assert_eq!(ComposterName::TurboComposter.to_string(), "Turbo Composter");
        assert!("Water Well".parse::<ComposterName>().is_err());
    }

    #[test]
    fn test_status() {
        let (bus, _receiver) = CommandBus::new();
        let widget = ComposterWidget::new(ComposterName::CompostBin, bus);

        assert_eq!(widget.status(Rc::new(GameState::new()), 0), ComposterStatus::Idle);

        let idle = state_with(ComposterName::CompostBin, Building::new("bin"));
        assert_eq!(widget.status(idle, 0), ComposterStatus::Idle);

        let producing =
            state_with(ComposterName::CompostBin, Building::new("bin").producing(100, 200));
        assert_eq!(widget.status(producing.clone(), 150), ComposterStatus::Composting);
        assert_eq!(widget.status(producing.clone(), 199), ComposterStatus::Composting);
        assert_eq!(widget.status(producing.clone(), 200), ComposterStatus::Ready);
        assert_eq!(widget.status(producing, 1_000), ComposterStatus::Ready);
    }

    #[test]
    fn test_status_reads_its_own_kind() {
        let (bus, _receiver) = CommandBus::new();
        let widget = ComposterWidget::new(ComposterName::PremiumComposter, bus);
        let state = state_with(ComposterName::CompostBin, Building::new("bin").producing(0, 10));
        assert_eq!(widget.status(state, 5), ComposterStatus::Idle);
    }

    #[test]
    fn test_progress_and_timer() {
        let (bus, _receiver) = CommandBus::new();
        let widget = ComposterWidget::new(ComposterName::TurboComposter, bus);
        let state =
            state_with(ComposterName::TurboComposter, Building::new("turbo").producing(1_000, 2_000));

        assert_eq!(widget.progress(state.clone(), 500), Some(0.0));
        assert_eq!(widget.progress(state.clone(), 1_500), Some(0.5));
        assert_eq!(widget.progress(state.clone(), 5_000), Some(1.0));
        assert_eq!(widget.next_render_at(state.clone(), 1_500), Some(2_000));
        assert_eq!(widget.next_render_at(state, 2_000), None);

        let idle = state_with(ComposterName::TurboComposter, Building::new("turbo"));
        assert_eq!(widget.progress(idle.clone(), 0), None);
        assert_eq!(widget.next_render_at(idle, 0), None);
    }

    #[test]
    fn test_progress_at_extreme_times() {
        let (bus, _receiver) = CommandBus::new();
        let widget = ComposterWidget::new(ComposterName::CompostBin, bus);

        let endless = state_with(
            ComposterName::CompostBin,
            Building::new("bin").producing(-10, i64::MAX),
        );
        let progress = widget.progress(endless.clone(), 0).expect("The bin is composting");
        assert!((0.0..1e-9).contains(&progress));
        assert_eq!(widget.progress(endless, i64::MIN), Some(0.0));

        let state = state_with(
            ComposterName::CompostBin,
            Building::new("bin").producing(-1_000, 1_000),
        );
        assert_eq!(widget.progress(state.clone(), i64::MAX), Some(1.0));
        assert_eq!(widget.progress(state, i64::MIN), Some(0.0));
    }

    #[test]
    fn test_start() {
        let (bus, mut receiver) = CommandBus::new();
        let widget = ComposterWidget::new(ComposterName::CompostBin, bus);
        let state = state_with(ComposterName::CompostBin, Building::new("bin-7"));

        widget.start(state).expect("Starting succeeds");
        assert_eq!(
            drain(&mut receiver),
            vec![Command::ComposterStarted {
                building_id: "bin-7".into(),
                building: ComposterName::CompostBin,
            }]
        );
    }

    #[test]
    fn test_collect_then_save() {
        let (bus, mut receiver) = CommandBus::new();
        let widget = ComposterWidget::new(ComposterName::PremiumComposter, bus);
        let state = state_with(
            ComposterName::PremiumComposter,
            Building::new("premium").producing(0, 10),
        );

        widget.collect(state).expect("Collecting succeeds");
        assert_eq!(
            drain(&mut receiver),
            vec![
                Command::CompostCollected {
                    building_id: "premium".into(),
                    building: ComposterName::PremiumComposter,
                },
                Command::Save,
            ]
        );
    }

    #[test]
    fn test_missing_composter() {
        let (bus, mut receiver) = CommandBus::new();
        let widget = ComposterWidget::new(ComposterName::CompostBin, bus);
        let state = Rc::new(GameState::new());

        assert_eq!(
            widget.start(state.clone()),
            Err(GameError::MissingBuilding("Compost Bin".into()))
        );
        assert_eq!(
            widget.collect(state),
            Err(GameError::MissingBuilding("Compost Bin".into()))
        );
        assert_eq!(drain(&mut receiver), Vec::<Command>::new());
    }
}
