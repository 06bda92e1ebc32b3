use crate::api::{ToggleFavoriteRequest, Transport};
use crate::app::{App, UiSignal};
use crate::error::{RestavoError, Result};
use std::collections::HashMap;

/// Local mirror of the user's favorites, keyed by hotel name.
///
/// Empty whenever nobody is signed in. Rebuilt wholesale on refresh; a toggle writes a
/// single key from the server's answer and is not re-checked until the next refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoriteSet {
    items: HashMap<String, bool>,
}

impl FavoriteSet {
    pub fn contains(&self, name: &str) -> bool {
        self.items.get(name).copied().unwrap_or(false)
    }

    pub fn set(&mut self, name: impl Into<String>, is_favorite: bool) {
        self.items.insert(name.into(), is_favorite);
    }

    pub fn replace<I>(&mut self, names: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.items = names.into_iter().map(|name| (name, true)).collect();
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.values().filter(|v| **v).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Transport> App<T> {
    /// Flip `item_name` on the server and mirror the server's answer locally.
    pub async fn toggle_favorite(&mut self, item_name: &str, city: &str) -> Result<bool> {
        if !self.session.is_authenticated() {
            self.signal(UiSignal::PromptLogin);
            return Err(RestavoError::AuthRequired(
                "sign in to save favorites".to_string(),
            ));
        }

        let request = ToggleFavoriteRequest {
            item_name: item_name.to_string(),
            city: city.to_string(),
        };

        let response = match self.client.toggle_favorite(&request).await {
            Ok(response) => response,
            Err(e) if e.is_unauthorized() => {
                self.signal(UiSignal::PromptLogin);
                return Err(RestavoError::AuthRequired(
                    "sign in to save favorites".to_string(),
                ));
            }
            Err(e) => return Err(e),
        };

        if !response.success {
            return Err(RestavoError::ServerRejected {
                status: 200,
                message: response
                    .message
                    .unwrap_or_else(|| "Unknown error".to_string()),
            });
        }

        tracing::debug!(item = item_name, is_favorite = response.is_favorite, "Favorite toggled");
        self.favorites.set(item_name, response.is_favorite);
        Ok(response.is_favorite)
    }

    /// Replace the local set with the server's list. Signed out, this empties the set and
    /// locks the view without touching the network.
    pub async fn refresh_favorites(&mut self) -> Result<&FavoriteSet> {
        if !self.session.is_authenticated() {
            self.favorites.clear();
            self.signal(UiSignal::FavoritesLocked);
            return Ok(&self.favorites);
        }

        match self.client.favorites().await {
            Ok(records) => {
                tracing::debug!(count = records.len(), "Favorites refreshed");
                self.favorites
                    .replace(records.into_iter().map(|r| r.item_name));
                Ok(&self.favorites)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Favorites refresh failed, keeping local set");
                Err(e)
            }
        }
    }
}
