use serde::Deserialize;

// -- Accounts --

/// Body of `POST /register` and `POST /login`.
///
/// Clients often echo a full account back; `account_id` is skipped like any
/// other unknown key.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AccountRequest {
    pub username: String,
    pub password: String,
}

// -- Messages --

/// Body of `POST /messages` and `PATCH /messages/{message_id}`.
///
/// Every field is optional on the wire: a patch only carries `message_text`,
/// and a missing `posted_by` simply fails the author check. A client-supplied
/// `message_id` is skipped.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MessageRequest {
    pub posted_by: i64,
    pub message_text: String,
    pub time_posted_epoch: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_request_ignores_id() {
        let req: AccountRequest =
            serde_json::from_str(r#"{"account_id":7,"username":"alice","password":"secret"}"#)
                .unwrap();
        assert_eq!(req.username, "alice");
        assert_eq!(req.password, "secret");
    }

    #[test]
    fn non_integer_ids_are_skipped() {
        let req: AccountRequest =
            serde_json::from_str(r#"{"account_id":"n/a","username":"zed","password":"secret"}"#)
                .unwrap();
        assert_eq!(req.username, "zed");

        let req: MessageRequest = serde_json::from_str(
            r#"{"message_id":null,"posted_by":3,"message_text":"hi","time_posted_epoch":9}"#,
        )
        .unwrap();
        assert_eq!(req.posted_by, 3);
        assert_eq!(req.time_posted_epoch, 9);
    }

    #[test]
    fn patch_body_only_needs_text() {
        let req: MessageRequest = serde_json::from_str(r#"{"message_text":"edited"}"#).unwrap();
        assert_eq!(req.message_text, "edited");
        assert_eq!(req.posted_by, 0);
    }
}
