use std::{fmt, rc::Rc};

use tracing::{debug, warn};

use crate::{
    crops::{CropCatalog, Crops},
    utils::get_timestamp,
    Action, GameError, GameState,
};

type Subscriber = Box<dyn Fn(&Rc<GameState>)>;

/// Holds the current game state and applies actions to it one at a time.
pub struct Store {
    state: Rc<GameState>,
    crops: Box<dyn CropCatalog>,
    subscribers: Vec<Subscriber>,
}

impl Store {
    pub fn new(state: GameState) -> Self {
        Self::with_crops(state, Box::new(Crops))
    }

    pub fn with_crops(state: GameState, crops: Box<dyn CropCatalog>) -> Self {
        Self {
            state: Rc::new(state),
            crops,
            subscribers: vec![],
        }
    }

    pub fn state(&self) -> Rc<GameState> {
        self.state.clone()
    }

    /// Call `subscriber` with every new state.
    pub fn subscribe(&mut self, subscriber: impl Fn(&Rc<GameState>) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Apply an action at the current time.
    pub fn dispatch(&mut self, action: Action) -> Result<(), GameError> {
        self.dispatch_at(action, get_timestamp())
    }

    /// Apply an action at the time `now`. A rejected action leaves the state as
    /// it was and nobody is notified.
    pub fn dispatch_at(&mut self, action: Action, now: i64) -> Result<(), GameError> {
        match self.state.reduce(&action, now, self.crops.as_ref()) {
            Ok(state) => {
                debug!(action = action.name(), now, "applied action");
                self.state = Rc::new(state);
                for subscriber in &self.subscribers {
                    subscriber(&self.state);
                }
                Ok(())
            }
            Err(err) => {
                warn!(action = action.name(), now, code = err.code(), %err, "rejected action");
                Err(err)
            }
        }
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
