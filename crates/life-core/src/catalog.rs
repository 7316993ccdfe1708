//! Event definitions and the catalog that indexes them.
//!
//! The catalog is built once at startup from every content module and never
//! changes afterwards. Construction validates the authoring contract
//! (unique ids, background events with a usable first action) so content
//! bugs stop the process before the first tick instead of surfacing as
//! silently skipped events.

use life_events::{EventId, GameState};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::action::{Action, Condition};

type DayFn = dyn Fn(&GameState) -> u32 + Send + Sync;
type TextFn = dyn Fn(&GameState) -> String + Send + Sync;

/// Errors raised while building a catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate event id {0}")]
    DuplicateId(EventId),
    #[error("background event {0} has no actions")]
    BackgroundWithoutAction(EventId),
    #[error("background event {0} has a first action with nothing to perform")]
    BackgroundWithoutEffect(EventId),
}

/// An authored event.
#[derive(Clone)]
pub struct EventDefinition {
    pub id: EventId,
    pub title: String,
    text: Arc<TextFn>,
    /// Eligibility gate, re-evaluated on every reconciliation.
    pub condition: Condition,
    mean_time_to_happen: Option<Arc<DayFn>>,
    fixed_time_to_happen: Option<Arc<DayFn>>,
    /// Never shown to the player; the first action applies automatically.
    pub background: bool,
    pub actions: Vec<Action>,
}

impl EventDefinition {
    /// An event that becomes eligible on its own. Eligible in every state
    /// and untimed until the author says otherwise.
    pub fn regular(id: impl Into<EventId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            text: Arc::new(|_| String::new()),
            condition: Condition::always(),
            mean_time_to_happen: None,
            fixed_time_to_happen: None,
            background: false,
            actions: Vec::new(),
        }
    }

    /// An event reachable only through a chain: never eligible on its own,
    /// zero mean time to happen.
    pub fn triggered(id: impl Into<EventId>, title: impl Into<String>) -> Self {
        Self::regular(id, title)
            .with_condition(Condition::never())
            .with_mtth(0)
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = condition;
        self
    }

    pub fn with_mtth(self, days: u32) -> Self {
        self.with_mtth_fn(move |_| days)
    }

    pub fn with_mtth_fn(mut self, f: impl Fn(&GameState) -> u32 + Send + Sync + 'static) -> Self {
        self.mean_time_to_happen = Some(Arc::new(f));
        self
    }

    pub fn with_fixed_delay(self, days: u32) -> Self {
        self.with_fixed_delay_fn(move |_| days)
    }

    pub fn with_fixed_delay_fn(
        mut self,
        f: impl Fn(&GameState) -> u32 + Send + Sync + 'static,
    ) -> Self {
        self.fixed_time_to_happen = Some(Arc::new(f));
        self
    }

    pub fn in_background(mut self) -> Self {
        self.background = true;
        self
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.with_text_fn(move |_| text.clone())
    }

    pub fn with_text_fn(mut self, f: impl Fn(&GameState) -> String + Send + Sync + 'static) -> Self {
        self.text = Arc::new(f);
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Checks eligibility in the given state.
    pub fn is_eligible(&self, state: &GameState) -> bool {
        self.condition.holds(state)
    }

    /// Evaluates the mean time to happen, if the event has one.
    pub fn mean_time_to_happen(&self, state: &GameState) -> Option<u32> {
        self.mean_time_to_happen.as_ref().map(|f| f(state))
    }

    /// Evaluates the fixed delay, if the event has one.
    pub fn fixed_time_to_happen(&self, state: &GameState) -> Option<u32> {
        self.fixed_time_to_happen.as_ref().map(|f| f(state))
    }

    /// Body text for the current state.
    pub fn text(&self, state: &GameState) -> String {
        (self.text)(state)
    }

    pub fn first_action(&self) -> Option<&Action> {
        self.actions.first()
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.background {
            let first = self
                .first_action()
                .ok_or(CatalogError::BackgroundWithoutAction(self.id))?;
            if first.perform.is_none() {
                return Err(CatalogError::BackgroundWithoutEffect(self.id));
            }
        }
        Ok(())
    }
}

impl fmt::Debug for EventDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDefinition")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("has_mtth", &self.mean_time_to_happen.is_some())
            .field("has_fixed_delay", &self.fixed_time_to_happen.is_some())
            .field("background", &self.background)
            .field("actions", &self.actions.len())
            .finish()
    }
}

/// Immutable, indexed collection of event definitions.
#[derive(Debug, Clone)]
pub struct Catalog {
    events: Vec<EventDefinition>,
    index: HashMap<EventId, usize>,
}

impl Catalog {
    /// Builds and validates a catalog. Catalog order is preserved and decides
    /// the order in which newly eligible events join the queue.
    pub fn new(events: Vec<EventDefinition>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(events.len());
        for (position, event) in events.iter().enumerate() {
            event.validate()?;
            if index.insert(event.id, position).is_some() {
                return Err(CatalogError::DuplicateId(event.id));
            }
        }
        Ok(Self { events, index })
    }

    /// Builds a catalog from several content modules in order.
    pub fn from_modules(
        modules: impl IntoIterator<Item = Vec<EventDefinition>>,
    ) -> Result<Self, CatalogError> {
        Self::new(modules.into_iter().flatten().collect())
    }

    pub fn events(&self) -> &[EventDefinition] {
        &self.events
    }

    pub fn get(&self, id: EventId) -> Option<&EventDefinition> {
        self.index.get(&id).map(|&i| &self.events[i])
    }

    pub fn contains(&self, id: EventId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
