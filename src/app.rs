use crate::api::{BackendClient, Transport};
use crate::booking::PendingAction;
use crate::conversation::ChatHistory;
use crate::favorites::FavoriteSet;
use crate::pricing::{Catalog, HotelListing};
use crate::session::Session;
use rand::rngs::StdRng;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub text: String,
}

/// Requests for the presentation layer that are not plain messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiSignal {
    /// An action needs a session; show the login form.
    PromptLogin,
    /// Registration succeeded; switch the auth form back to login.
    SwitchToLogin,
    /// The favorites view has nothing to show until the user signs in.
    FavoritesLocked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Notice(Notification),
    Signal(UiSignal),
}

/// Owns all client-side state and the backend client. Every state transition goes
/// through here; rendering only reads state and drains `events`.
pub struct App<T: Transport> {
    pub(crate) client: BackendClient<T>,
    pub(crate) session: Session,
    pub(crate) favorites: FavoriteSet,
    pub(crate) pending: PendingAction,
    pub(crate) chat: ChatHistory,
    pub(crate) catalog: Catalog,
    pub(crate) rng: StdRng,
    events: VecDeque<AppEvent>,
}

impl<T: Transport> App<T> {
    pub fn new(client: BackendClient<T>, mut rng: StdRng) -> Self {
        let catalog = Catalog::generate(&mut rng);
        Self {
            client,
            session: Session::default(),
            favorites: FavoriteSet::default(),
            pending: PendingAction::default(),
            chat: ChatHistory::new(),
            catalog,
            rng,
            events: VecDeque::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn favorites(&self) -> &FavoriteSet {
        &self.favorites
    }

    pub fn pending(&self) -> &PendingAction {
        &self.pending
    }

    pub fn chat(&self) -> &ChatHistory {
        &self.chat
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn search(&self, city: &str, min_rating: f64) -> Vec<&HotelListing> {
        self.catalog.search_and_compare(city, min_rating)
    }

    /// Catalog hotels currently in the favorite set, in catalog order.
    pub fn favorite_hotels(&self) -> Vec<&HotelListing> {
        self.catalog
            .listings()
            .iter()
            .filter(|l| self.favorites.contains(l.name()))
            .collect()
    }

    pub fn drain_events(&mut self) -> Vec<AppEvent> {
        self.events.drain(..).collect()
    }

    pub(crate) fn notify(&mut self, level: Level, text: impl Into<String>) {
        self.events.push_back(AppEvent::Notice(Notification {
            level,
            text: text.into(),
        }));
    }

    pub(crate) fn signal(&mut self, signal: UiSignal) {
        self.events.push_back(AppEvent::Signal(signal));
    }
}
