use chirp_types::models::{Account, Message};
use chirp_types::rules;
use rusqlite::{Connection, OptionalExtension, Row, ffi};
use tracing::debug;

use crate::{Database, DbResult};

const ACCOUNT_COLUMNS: &str = "account_id, username, password";
const MESSAGE_COLUMNS: &str = "message_id, posted_by, message_text, time_posted_epoch";

impl Database {
    // -- Accounts --

    pub fn find_account_by_username(&self, username: &str) -> DbResult<Option<Account>> {
        self.with_conn(|conn| query_account_by_username(conn, username))
    }

    pub fn find_account_by_id(&self, account_id: i64) -> DbResult<Option<Account>> {
        self.with_conn(|conn| query_account_by_id(conn, account_id))
    }

    /// Exact match on both username and password.
    pub fn find_account_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> DbResult<Option<Account>> {
        self.with_conn(|conn| {
            let account = conn
                .query_row(
                    &format!(
                        "SELECT {ACCOUNT_COLUMNS} FROM Account WHERE username = ?1 AND password = ?2"
                    ),
                    (username, password),
                    account_from_row,
                )
                .optional()?;
            Ok(account)
        })
    }

    /// Insert a new account and return it with its generated id.
    /// Returns `None` when the username is already taken.
    pub fn insert_account(&self, username: &str, password: &str) -> DbResult<Option<Account>> {
        self.with_conn(|conn| {
            let inserted = conn.query_row(
                &format!(
                    "INSERT INTO Account (username, password) VALUES (?1, ?2) RETURNING {ACCOUNT_COLUMNS}"
                ),
                (username, password),
                account_from_row,
            );

            match inserted {
                Ok(account) => Ok(Some(account)),
                Err(e) if is_constraint(&e, ffi::SQLITE_CONSTRAINT_UNIQUE) => {
                    debug!("Username '{}' already taken", username);
                    Ok(None)
                }
                Err(e) => Err(e.into()),
            }
        })
    }

    /// Registration rules: non-empty username of at most 255 characters,
    /// password of 4 to 255 characters, and no account already holding the
    /// username.
    pub fn account_credentials_valid(&self, username: &str, password: &str) -> DbResult<bool> {
        if !rules::username_ok(username) {
            debug!("Rejecting registration: username empty or too long");
            return Ok(false);
        }
        if !rules::password_ok(password) {
            debug!("Rejecting registration: password length out of range");
            return Ok(false);
        }
        if self.find_account_by_username(username)?.is_some() {
            debug!("Rejecting registration: username '{}' exists", username);
            return Ok(false);
        }
        Ok(true)
    }

    // -- Messages --

    /// Text must be 1 to 255 characters and `posted_by` an existing account.
    pub fn message_parameters_valid(&self, text: &str, posted_by: i64) -> DbResult<bool> {
        if !rules::message_text_ok(text) {
            debug!("Rejecting message: text empty or too long");
            return Ok(false);
        }
        if self.find_account_by_id(posted_by)?.is_none() {
            debug!("Rejecting message: no account {}", posted_by);
            return Ok(false);
        }
        Ok(true)
    }

    /// Insert a message and return it with its generated id. Returns `None`
    /// if the author does not exist at insert time.
    pub fn insert_message(
        &self,
        posted_by: i64,
        text: &str,
        time_posted_epoch: i64,
    ) -> DbResult<Option<Message>> {
        self.with_tx(|tx| {
            if query_account_by_id(tx, posted_by)?.is_none() {
                return Ok(None);
            }

            let inserted = tx.query_row(
                &format!(
                    "INSERT INTO Message (posted_by, message_text, time_posted_epoch)
                     VALUES (?1, ?2, ?3) RETURNING {MESSAGE_COLUMNS}"
                ),
                (posted_by, text, time_posted_epoch),
                message_from_row,
            );

            match inserted {
                Ok(message) => Ok(Some(message)),
                Err(e) if is_constraint(&e, ffi::SQLITE_CONSTRAINT_FOREIGNKEY) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
    }

    pub fn find_message_by_id(&self, message_id: i64) -> DbResult<Option<Message>> {
        self.with_conn(|conn| query_message_by_id(conn, message_id))
    }

    pub fn list_all_messages(&self) -> DbResult<Vec<Message>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {MESSAGE_COLUMNS} FROM Message ORDER BY message_id"))?;

            let rows = stmt
                .query_map([], message_from_row)?
                .collect::<Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }

    /// Delete a message, returning it as it was before deletion.
    /// Nothing is deleted when the message does not exist.
    pub fn delete_message_by_id(&self, message_id: i64) -> DbResult<Option<Message>> {
        self.with_tx(|tx| {
            let Some(existing) = query_message_by_id(tx, message_id)? else {
                return Ok(None);
            };

            tx.execute("DELETE FROM Message WHERE message_id = ?1", [message_id])?;
            Ok(Some(existing))
        })
    }

    /// Replace a message's text and return the updated row. Returns `None`
    /// for invalid text or an unknown message.
    pub fn update_message_text(&self, message_id: i64, new_text: &str) -> DbResult<Option<Message>> {
        if !rules::message_text_ok(new_text) {
            debug!("Rejecting patch of message {}: text empty or too long", message_id);
            return Ok(None);
        }

        self.with_tx(|tx| {
            if query_message_by_id(tx, message_id)?.is_none() {
                return Ok(None);
            }

            let updated = tx.query_row(
                &format!(
                    "UPDATE Message SET message_text = ?1 WHERE message_id = ?2 RETURNING {MESSAGE_COLUMNS}"
                ),
                (new_text, message_id),
                message_from_row,
            )?;
            Ok(Some(updated))
        })
    }

    pub fn list_messages_by_account(&self, account_id: i64) -> DbResult<Vec<Message>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {MESSAGE_COLUMNS} FROM Message WHERE posted_by = ?1 ORDER BY message_id"
            ))?;

            let rows = stmt
                .query_map([account_id], message_from_row)?
                .collect::<Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }
}

fn query_account_by_username(conn: &Connection, username: &str) -> DbResult<Option<Account>> {
    let account = conn
        .query_row(
            &format!("SELECT {ACCOUNT_COLUMNS} FROM Account WHERE username = ?1"),
            [username],
            account_from_row,
        )
        .optional()?;

    Ok(account)
}

fn query_account_by_id(conn: &Connection, account_id: i64) -> DbResult<Option<Account>> {
    let account = conn
        .query_row(
            &format!("SELECT {ACCOUNT_COLUMNS} FROM Account WHERE account_id = ?1"),
            [account_id],
            account_from_row,
        )
        .optional()?;

    Ok(account)
}

fn query_message_by_id(conn: &Connection, message_id: i64) -> DbResult<Option<Message>> {
    let message = conn
        .query_row(
            &format!("SELECT {MESSAGE_COLUMNS} FROM Message WHERE message_id = ?1"),
            [message_id],
            message_from_row,
        )
        .optional()?;

    Ok(message)
}

fn account_from_row(row: &Row<'_>) -> rusqlite::Result<Account> {
    Ok(Account {
        account_id: row.get(0)?,
        username: row.get(1)?,
        password: row.get(2)?,
    })
}

fn message_from_row(row: &Row<'_>) -> rusqlite::Result<Message> {
    Ok(Message {
        message_id: row.get(0)?,
        posted_by: row.get(1)?,
        message_text: row.get(2)?,
        time_posted_epoch: row.get(3)?,
    })
}

/// True if `err` is the given extended SQLITE_CONSTRAINT_* failure.
fn is_constraint(err: &rusqlite::Error, extended_code: std::os::raw::c_int) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.extended_code == extended_code
    )
}
