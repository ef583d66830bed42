//! Wiring between a store, its sync bridge and a view.

use tracing::{debug, info, instrument};

use crate::intents::{Intent, IntentDispatcher};
use crate::storage::StateStorage;
use crate::store::{GameStore, GameView, StatsView, StoreError};
use crate::sync::SyncBridge;

/// Something that draws fully derived game data.
///
/// Views make no game decisions; they render what they are given and
/// report user actions as [`Intent`]s.
pub trait View {
    /// Draws the board and statistics.
    fn render(&mut self, game: &GameView, stats: &StatsView);
}

/// Drives one store instance and its view.
///
/// Intents go through the store and trigger a re-render; external changes
/// seen by the bridge trigger a reload and a re-render.
#[derive(Debug)]
pub struct GameController<S, V> {
    store: GameStore<S>,
    bridge: SyncBridge,
    dispatcher: IntentDispatcher<GameStore<S>>,
    view: V,
}

impl<S: StateStorage + 'static, V: View> GameController<S, V> {
    /// Wires `store` to `view`. Call [`render`](Self::render) for the
    /// first frame.
    #[instrument(skip(store, view), fields(key = %store.key(), instance = %store.instance()))]
    pub fn new(store: GameStore<S>, view: V) -> Self {
        let bridge = store.bridge();
        info!("Controller ready");
        Self {
            store,
            bridge,
            dispatcher: IntentDispatcher::for_store(),
            view,
        }
    }

    /// Returns the store.
    pub fn store(&self) -> &GameStore<S> {
        &self.store
    }

    /// Returns the view.
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Applies an intent and re-renders.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store could not persist the change;
    /// nothing is rendered in that case.
    #[instrument(skip(self))]
    pub fn handle(&mut self, intent: Intent) -> Result<(), StoreError> {
        self.dispatcher.dispatch(&mut self.store, intent)?;
        self.render();
        Ok(())
    }

    /// Clears recorded round results and re-renders.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store could not persist the change.
    #[instrument(skip(self))]
    pub fn clear_stats(&mut self) -> Result<(), StoreError> {
        self.store.clear_stats()?;
        self.render();
        Ok(())
    }

    /// Re-renders if another instance changed the shared state.
    ///
    /// Returns whether a re-render happened.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the new state could not be read.
    #[instrument(skip(self))]
    pub fn sync(&mut self) -> Result<bool, StoreError> {
        if !self.bridge.poll_change() {
            return Ok(false);
        }
        debug!("External change, reloading");
        self.reload()?;
        Ok(true)
    }

    /// Reloads from storage and re-renders unconditionally.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the state could not be read.
    pub fn reload(&mut self) -> Result<(), StoreError> {
        self.store.refresh()?;
        self.render();
        Ok(())
    }

    /// Draws the current derived state.
    pub fn render(&mut self) {
        let game = self.store.game();
        let stats = self.store.stats();
        self.view.render(&game, &stats);
    }
}
