use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

use futures_util::future::join_all;
use serde_json::Value;

use super::state::{DashboardState, SectionState};
use crate::model::dashboard::{DashboardData, DashboardSection};

/// Network seam of the aggregator: fetches the payload of one reporting section.
///
/// The browser implementation lives in the frontend; tests use in-memory sources.
pub trait DashboardSource {
    fn fetch(&self, section: DashboardSection) -> impl Future<Output = Result<Value, String>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Listener = Rc<dyn Fn(DashboardSection)>;

/// Owns the dashboard state and resolves section requests independently of each other.
///
/// The aggregator is single-threaded (it lives on the browser event loop), so state sits in a
/// `RefCell` that is never borrowed across an `.await`. Views hold it behind an `Rc` and
/// subscribe to per-section transitions.
pub struct DashboardAggregator<S> {
    source: S,
    state: RefCell<DashboardState>,
    listeners: RefCell<Vec<(SubscriptionId, Listener)>>,
    next_subscription: Cell<u64>,
}

impl<S: DashboardSource> DashboardAggregator<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: RefCell::new(DashboardState::default()),
            listeners: RefCell::new(Vec::new()),
            next_subscription: Cell::new(0),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Starts every section at once and waits for all of them to settle. A failing section
    /// never prevents the others from updating.
    pub async fn refresh_all(&self) {
        let started: Vec<(DashboardSection, u64)> = DashboardSection::ALL
            .into_iter()
            .map(|section| (section, self.state.borrow_mut().begin(section)))
            .collect();
        for (section, _) in &started {
            self.notify(*section);
        }
        join_all(
            started
                .into_iter()
                .map(|(section, generation)| self.resolve(section, generation)),
        )
        .await;
    }

    /// Refetches one section; siblings keep whatever state they are in.
    pub async fn refresh_section(&self, section: DashboardSection) {
        let generation = self.state.borrow_mut().begin(section);
        self.notify(section);
        self.resolve(section, generation).await;
    }

    async fn resolve(&self, section: DashboardSection, generation: u64) {
        let outcome = self.source.fetch(section).await;
        let applied = self
            .state
            .borrow_mut()
            .settle(section, generation, outcome);
        if applied {
            self.notify(section);
        }
    }

    pub fn data(&self) -> DashboardData {
        self.state.borrow().data.clone()
    }

    pub fn section(&self, section: DashboardSection) -> SectionState {
        self.state.borrow().section(section)
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    pub fn has_errors(&self) -> bool {
        self.state.borrow().has_errors()
    }

    pub fn errors(&self) -> Vec<(DashboardSection, String)> {
        self.state.borrow().errors()
    }

    /// Registers `listener`, called after every transition of any section.
    pub fn subscribe(&self, listener: impl Fn(DashboardSection) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.get());
        self.next_subscription.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners.borrow_mut().retain(|(existing, _)| *existing != id);
    }

    fn notify(&self, section: DashboardSection) {
        // Listeners may subscribe or read state, so call them on a snapshot.
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(section);
        }
    }
}
