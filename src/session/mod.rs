mod auth;
mod state;

pub use state::{Session, User};
