use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sled::{Db, Tree};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserRecord {
    pub local_id: String,
    pub email: String,
    salt: String,
    password_hash: String,
}
impl UserRecord {
    pub fn new(email: impl Into<String>, password: &str) -> Self {
        let salt = Uuid::new_v4().simple().to_string();
        Self {
            local_id: Uuid::new_v4().simple().to_string(),
            email: email.into(),
            password_hash: hash_password(&salt, password),
            salt,
        }
    }
    pub fn verify(&self, password: &str) -> bool {
        hash_password(&self.salt, password) == self.password_hash
    }
}

fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hasher.finalize().to_hex().to_string()
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    pub local_id: String,
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct Users {
    users: Tree,
    sessions: Tree,
}

impl Users {
    pub fn new(db: &Db) -> Result<Self> {
        Ok(Self {
            users: db.open_tree("users")?,
            sessions: db.open_tree("sessions")?,
        })
    }
    pub fn get(&self, email: &str) -> Result<Option<UserRecord>> {
        Ok(match self.users.get(email)? {
            Some(bytes) => Some(serde_json::from_slice(&bytes)?),
            None => None,
        })
    }
    /// Inserts the user unless the email is taken. Returns `false` if it was.
    pub fn create(&self, user: &UserRecord) -> Result<bool> {
        let swapped = self.users.compare_and_swap(
            user.email.as_str(),
            None as Option<&[u8]>,
            Some(serde_json::to_vec(user)?),
        )?;
        Ok(swapped.is_ok())
    }
    pub fn open_session(&self, user: &UserRecord, lifetime: Duration) -> Result<String> {
        self.sweep_sessions()?;
        let token = Uuid::new_v4().simple().to_string();
        let session = Session {
            local_id: user.local_id.clone(),
            email: user.email.clone(),
            expires_at: Utc::now() + lifetime,
        };
        self.sessions.insert(token.as_str(), serde_json::to_vec(&session)?)?;
        Ok(token)
    }
    /// Removes every expired session. Returns how many were dropped.
    pub fn sweep_sessions(&self) -> Result<usize> {
        let now = Utc::now();
        let mut dropped = 0;
        for entry in self.sessions.iter() {
            let (token, bytes) = entry?;
            let session: Session = serde_json::from_slice(&bytes)?;
            if session.expires_at <= now {
                self.sessions.remove(token)?;
                dropped += 1;
            }
        }
        Ok(dropped)
    }
    /// Looks up a token, dropping it if it has expired.
    pub fn session(&self, token: &str) -> Result<Option<Session>> {
        let Some(bytes) = self.sessions.get(token)? else {
            return Ok(None);
        };
        let session: Session = serde_json::from_slice(&bytes)?;
        if session.expires_at <= Utc::now() {
            self.sessions.remove(token)?;
            return Ok(None);
        }
        Ok(Some(session))
    }
}
