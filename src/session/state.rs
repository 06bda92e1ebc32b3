const FALLBACK_DISPLAY_NAME: &str = "Guest";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
}

impl User {
    pub fn new(id: i64, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
        }
    }

    /// Username up to the `@` for e-mail style logins.
    pub fn display_name(&self) -> String {
        let name = match self.username.split_once('@') {
            Some((local, _)) => local,
            None => self.username.as_str(),
        };

        if name.trim().is_empty() {
            FALLBACK_DISPLAY_NAME.to_string()
        } else {
            name.to_string()
        }
    }
}

/// Identity of the signed-in user, reconciled from the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn user_id(&self) -> Option<i64> {
        self.user.as_ref().map(|u| u.id)
    }

    pub(crate) fn sign_in(&mut self, user: User) {
        self.user = Some(user);
    }

    pub(crate) fn clear(&mut self) {
        self.user = None;
    }
}
