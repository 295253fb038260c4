use std::sync::Arc;

use chirp_db::Database;
use chirp_types::api::AccountRequest;
use chirp_types::models::Account;
use chirp_types::rules::Rejection;
use tracing::info;

use super::ServiceResult;

#[derive(Clone)]
pub struct AccountService {
    db: Arc<Database>,
}

impl AccountService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub fn register(&self, req: &AccountRequest) -> ServiceResult<Account> {
        if !self.db.account_credentials_valid(&req.username, &req.password)? {
            return Err(Rejection::InvalidAccount.into());
        }

        self.create_account(req)
    }

    /// Insert step of `register`. The UNIQUE constraint still catches a
    /// registration that raced past `account_credentials_valid`.
    fn create_account(&self, req: &AccountRequest) -> ServiceResult<Account> {
        let account = self
            .db
            .insert_account(&req.username, &req.password)?
            .ok_or(Rejection::UsernameTaken)?;

        info!("Registered account {} ({})", account.account_id, account.username);
        Ok(account)
    }

    /// Plain credential check; nothing is issued on success.
    pub fn login(&self, req: &AccountRequest) -> ServiceResult<Account> {
        let account = self
            .db
            .find_account_by_credentials(&req.username, &req.password)?
            .ok_or(Rejection::BadCredentials)?;

        Ok(account)
    }
}
