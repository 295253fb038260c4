//! Business rules between the HTTP handlers and the database.
//!
//! Services are synchronous; handlers call them from `spawn_blocking`.

mod accounts;
mod messages;

pub use accounts::AccountService;
pub use messages::MessageService;

use chirp_db::DbError;
use chirp_types::rules::Rejection;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Rejected(#[from] Rejection),

    #[error(transparent)]
    Storage(#[from] DbError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
