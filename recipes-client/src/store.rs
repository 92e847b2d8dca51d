use std::collections::VecDeque;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use recipes_common::reducer::app_reducer;
use recipes_common::route::guard;
use recipes_common::{Action, AppState, Route};
use crate::effects::{Effect, Effects};
use crate::{ClientConfig, LocalStorage};

/// The single source of application state.
///
/// `dispatch` reduces the action, runs its effects and keeps going until
/// every follow-up action has been handled. Actions produced in the
/// background (the logout timer) wait in a channel until
/// [`Store::process_scheduled`] or [`Store::next_scheduled`] picks them up.
pub struct Store {
    state: AppState,
    route: Route,
    effects: Effects,
    scheduled: UnboundedReceiver<Action>,
}

impl Store {
    pub fn new(config: ClientConfig, storage: LocalStorage) -> Self {
        let (sender, scheduled) = mpsc::unbounded_channel();
        let state = AppState::default();
        Self {
            route: guard(&state.auth, Route::default()),
            state,
            effects: Effects::new(config, storage, sender),
            scheduled,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn storage(&self) -> &LocalStorage {
        self.effects.storage()
    }

    pub fn logout_pending(&self) -> bool {
        self.effects.logout_pending()
    }

    pub async fn dispatch(&mut self, action: Action) {
        let mut queue = VecDeque::from([action]);
        while let Some(action) = queue.pop_front() {
            tracing::debug!(action = action.type_tag(), "dispatch");
            self.state = app_reducer(&self.state, &action);
            for effect in self.effects.run(&action, &self.state).await {
                match effect {
                    Effect::Dispatch(next) => queue.push_back(next),
                    Effect::Navigate(route) => {
                        self.navigate(route);
                    }
                }
            }
        }
    }

    /// Moves to `route`, or to wherever the guard redirects it.
    pub fn navigate(&mut self, route: Route) -> Route {
        self.route = guard(&self.state.auth, route);
        self.route
    }

    /// Dispatches every background action that is already waiting.
    pub async fn process_scheduled(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(action) = self.scheduled.try_recv() {
            self.dispatch(action).await;
            handled += 1;
        }
        handled
    }

    /// Waits for the next background action without dispatching it.
    pub async fn next_scheduled(&mut self) -> Option<Action> {
        self.scheduled.recv().await
    }
}
