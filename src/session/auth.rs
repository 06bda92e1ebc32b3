use super::User;
use crate::api::{Credentials, Transport};
use crate::app::{App, Level, UiSignal};
use crate::error::{RestavoError, Result};

fn credentials(username: &str, password: &str) -> Result<Credentials> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(RestavoError::Validation(
            "Please enter both a username and a password.".to_string(),
        ));
    }
    Ok(Credentials {
        username: username.trim().to_string(),
        password: password.to_string(),
    })
}

impl<T: Transport> App<T> {
    /// Reconcile the session with the server. Any failure counts as signed out.
    ///
    /// A session restored from signed out completes any deferred booking, as `login` does.
    pub async fn check_status(&mut self) -> Option<&User> {
        match self.client.status().await {
            Ok(status) if status.is_authenticated => match status.user_id {
                Some(id) => {
                    let was_signed_in = self.session.is_authenticated();
                    let username = status.username.unwrap_or_default();
                    tracing::debug!(user_id = id, "Session restored from server");
                    self.session.sign_in(User::new(id, username));
                    if !was_signed_in {
                        self.replay_if_pending().await;
                    }
                }
                None => {
                    tracing::warn!("Status reported authenticated without a user id");
                    self.sign_out_locally();
                }
            },
            Ok(_) => self.sign_out_locally(),
            Err(e) => {
                tracing::warn!(error = %e, "Could not check login status");
                self.sign_out_locally();
            }
        }
        self.session.user()
    }

    /// Sign in, then refresh favorites and replay any booking deferred for lack of a session.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<User> {
        let credentials = credentials(username, password)?;
        let response = self.client.login(&credentials).await?;

        let user = User::new(response.user_id, response.username);
        tracing::info!(user_id = user.id, "Logged in");
        self.session.sign_in(user.clone());
        if !response.message.is_empty() {
            self.notify(Level::Success, response.message);
        }

        if let Err(e) = self.refresh_favorites().await {
            tracing::warn!(error = %e, "Favorites refresh after login failed");
            self.notify(Level::Error, format!("Could not load favorites: {}", e));
        }

        self.replay_if_pending().await;

        Ok(user)
    }

    /// Create an account. Never signs in; the UI is told to switch to the login form.
    pub async fn register(&mut self, username: &str, password: &str) -> Result<()> {
        let credentials = credentials(username, password)?;
        let response = self.client.register(&credentials).await?;

        tracing::info!(username = %credentials.username, "Registered");
        self.notify(Level::Success, response.message);
        self.signal(UiSignal::SwitchToLogin);
        Ok(())
    }

    /// Local state is cleared only once the server confirms the logout.
    pub async fn logout(&mut self) -> Result<()> {
        let response = self.client.logout().await?;

        tracing::info!("Logged out");
        self.sign_out_locally();
        if !response.message.is_empty() {
            self.notify(Level::Success, response.message);
        }
        self.refresh_favorites().await?;
        Ok(())
    }

    fn sign_out_locally(&mut self) {
        self.session.clear();
        self.favorites.clear();
    }
}

#[cfg(test)]
mod tests {
    use crate::api::mock::MockReply;
    use crate::app::testing::*;
    use crate::app::{Level, UiSignal};
    use crate::error::RestavoError;
    use serde_json::json;

    #[tokio::test]
    async fn test_check_status_restores_session() {
        let mut app = mock_app();
        transport(&app).script(
            "GET /status",
            MockReply::ok(json!({"is_authenticated": true, "user_id": 4, "username": "omar"})),
        );

        let user = app.check_status().await.cloned();
        assert_eq!(user.map(|u| u.username), Some("omar".to_string()));
        assert!(app.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_check_status_clears_on_unauthenticated() {
        let mut app = signed_in_app();
        app.favorites.set("Palm Beach Hotel", true);
        transport(&app).script(
            "GET /status",
            MockReply::ok(json!({"is_authenticated": false})),
        );

        assert!(app.check_status().await.is_none());
        assert!(!app.session().is_authenticated());
        assert!(app.favorites().is_empty());
    }

    #[tokio::test]
    async fn test_check_status_clears_on_transport_failure() {
        let mut app = signed_in_app();
        transport(&app).script("GET /status", MockReply::TransportFailure);

        assert!(app.check_status().await.is_none());
        assert!(!app.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_empty_credentials_rejected_locally() {
        let mut app = mock_app();

        let result = app.login("", "secret").await;
        assert!(matches!(result, Err(RestavoError::Validation(_))));
        let result = app.register("amal", "").await;
        assert!(matches!(result, Err(RestavoError::Validation(_))));

        assert!(transport(&app).requests().is_empty());
    }

    #[tokio::test]
    async fn test_login_refreshes_favorites() {
        let mut app = mock_app();
        transport(&app).script(
            "POST /login",
            MockReply::ok(json!({"message": "Logged in", "user_id": 7, "username": "amal"})),
        );
        transport(&app).script(
            "GET /favorites",
            MockReply::ok(json!([{"item_name": "Palm Beach Hotel", "city": "Dubai"}])),
        );

        let user = app.login("amal", "secret").await.unwrap();

        assert_eq!(user.id, 7);
        assert!(app.session().is_authenticated());
        assert!(app.favorites().contains("Palm Beach Hotel"));
        assert_eq!(transport(&app).call_count("POST /booking"), 0);

        let events = app.drain_events();
        assert_eq!(notices(&events, Level::Success), vec!["Logged in".to_string()]);
    }

    #[tokio::test]
    async fn test_failed_login_leaves_session_empty() {
        let mut app = mock_app();
        transport(&app).script(
            "POST /login",
            MockReply::status(401, r#"{"message": "Wrong username or password"}"#),
        );

        let result = app.login("amal", "nope").await;

        assert!(matches!(
            result,
            Err(RestavoError::ServerRejected { status: 401, .. })
        ));
        assert!(!app.session().is_authenticated());
        assert_eq!(transport(&app).call_count("GET /favorites"), 0);
    }

    #[tokio::test]
    async fn test_register_switches_to_login_without_signing_in() {
        let mut app = mock_app();
        transport(&app).script(
            "POST /register",
            MockReply::status(201, r#"{"message": "Account created for amal"}"#),
        );

        app.register("amal", "secret").await.unwrap();

        assert!(!app.session().is_authenticated());
        let events = app.drain_events();
        assert!(has_signal(&events, UiSignal::SwitchToLogin));
        assert_eq!(
            notices(&events, Level::Success),
            vec!["Account created for amal".to_string()]
        );
    }

    #[tokio::test]
    async fn test_logout_clears_state_after_confirmation() {
        let mut app = signed_in_app();
        app.favorites.set("Grand View Towers", true);
        transport(&app).script(
            "POST /logout",
            MockReply::ok(json!({"message": "Logged out"})),
        );

        app.logout().await.unwrap();

        assert!(!app.session().is_authenticated());
        assert!(app.favorites().is_empty());
        assert_eq!(transport(&app).call_count("GET /favorites"), 0);
        assert!(has_signal(&app.drain_events(), UiSignal::FavoritesLocked));
    }

    #[tokio::test]
    async fn test_failed_logout_keeps_session() {
        let mut app = signed_in_app();
        app.favorites.set("Grand View Towers", true);
        transport(&app).script("POST /logout", MockReply::TransportFailure);

        let result = app.logout().await;

        assert!(matches!(result, Err(RestavoError::Transport(_))));
        assert!(app.session().is_authenticated());
        assert!(app.favorites().contains("Grand View Towers"));
    }
}
