pub mod auth;
pub mod error;
pub mod extract;
pub mod messages;
pub mod services;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use chirp_db::Database;

use crate::services::{AccountService, MessageService};

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub accounts: AccountService,
    pub messages: MessageService,
}

impl AppStateInner {
    pub fn new(db: Database) -> AppState {
        let db = Arc::new(db);
        Arc::new(Self {
            accounts: AccountService::new(db.clone()),
            messages: MessageService::new(db),
        })
    }
}

/// All eight public routes. Middleware (CORS, tracing) is layered on by the
/// server binary.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route(
            "/messages",
            post(messages::create_message).get(messages::list_messages),
        )
        .route(
            "/messages/{message_id}",
            get(messages::get_message)
                .delete(messages::delete_message)
                .patch(messages::patch_message),
        )
        .route(
            "/accounts/{account_id}/messages",
            get(messages::list_account_messages),
        )
        .with_state(state)
}
