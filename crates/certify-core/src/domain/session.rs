use serde::{Deserialize, Serialize};

use super::UserSummary;

/// A signed-in session as persisted on the client.
///
/// Token and user record are written together; a session without either is
/// treated as no session at all. The refresh token is optional because older
/// stores may predate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub user: UserSummary,
}
