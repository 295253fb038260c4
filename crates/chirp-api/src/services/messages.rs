use std::sync::Arc;

use chirp_db::Database;
use chirp_types::api::MessageRequest;
use chirp_types::models::Message;
use chirp_types::rules::Rejection;

use super::ServiceResult;

#[derive(Clone)]
pub struct MessageService {
    db: Arc<Database>,
}

impl MessageService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub fn create(&self, req: &MessageRequest) -> ServiceResult<Message> {
        if !self.db.message_parameters_valid(&req.message_text, req.posted_by)? {
            return Err(Rejection::InvalidMessage.into());
        }

        let message = self
            .db
            .insert_message(req.posted_by, &req.message_text, req.time_posted_epoch)?
            .ok_or(Rejection::InvalidMessage)?;

        Ok(message)
    }

    pub fn list_all(&self) -> ServiceResult<Vec<Message>> {
        Ok(self.db.list_all_messages()?)
    }

    pub fn get(&self, message_id: i64) -> ServiceResult<Option<Message>> {
        Ok(self.db.find_message_by_id(message_id)?)
    }

    pub fn delete(&self, message_id: i64) -> ServiceResult<Option<Message>> {
        Ok(self.db.delete_message_by_id(message_id)?)
    }

    /// Only the text changes; author and timestamp are fixed at creation.
    pub fn patch_text(&self, message_id: i64, new_text: &str) -> ServiceResult<Message> {
        let message = self
            .db
            .update_message_text(message_id, new_text)?
            .ok_or(Rejection::InvalidPatch)?;

        Ok(message)
    }

    pub fn list_by_account(&self, account_id: i64) -> ServiceResult<Vec<Message>> {
        Ok(self.db.list_messages_by_account(account_id)?)
    }
}
