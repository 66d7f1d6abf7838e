//! Student accounts and the administrator credential.
//!
//! Passwords are compared as plain strings.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::QuizError;

/// A registered student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub display_name: String,
    pub roll_number: String,
    pub username: String,
    pub password: String,
}

/// The single administrator id/password pair.
///
/// Note: Custom Debug impl masks the password.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminCredential {
    #[serde(default = "default_admin_id")]
    pub id: String,
    #[serde(default = "default_admin_password")]
    pub password: String,
}

impl std::fmt::Debug for AdminCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredential")
            .field("id", &self.id)
            .field("password", &"***")
            .finish()
    }
}

fn default_admin_id() -> String {
    "admin".to_string()
}

fn default_admin_password() -> String {
    "admin123".to_string()
}

impl Default for AdminCredential {
    fn default() -> Self {
        Self {
            id: default_admin_id(),
            password: default_admin_password(),
        }
    }
}

impl AdminCredential {
    pub fn new(id: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            password: password.into(),
        }
    }

    pub fn matches(&self, id: &str, password: &str) -> bool {
        self.id == id && self.password == password
    }
}

/// Account store: students keyed by username, plus the admin credential.
#[derive(Debug, Clone, Default)]
pub struct UserManager {
    accounts: HashMap<String, Account>,
    admin: AdminCredential,
}

impl UserManager {
    pub fn new(admin: AdminCredential) -> Self {
        Self {
            accounts: HashMap::new(),
            admin,
        }
    }

    /// Register a student, overwriting any account with the same username.
    ///
    /// Returns `true` if an existing account was overwritten.
    pub fn register_student(
        &mut self,
        roll: impl Into<String>,
        name: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> bool {
        let username = username.into();
        let account = Account {
            display_name: name.into(),
            roll_number: roll.into(),
            username: username.clone(),
            password: password.into(),
        };

        let replaced = self.accounts.insert(username.clone(), account).is_some();
        if replaced {
            tracing::warn!(username = %username, "username already registered, overwriting");
        } else {
            tracing::info!(username = %username, "student registered");
        }
        replaced
    }

    pub fn is_registered(&self, username: &str) -> bool {
        self.accounts.contains_key(username)
    }

    pub fn login(&self, username: &str, password: &str) -> bool {
        self.accounts
            .get(username)
            .is_some_and(|acc| acc.password == password)
    }

    pub fn admin_login(&self, id: &str, password: &str) -> bool {
        self.admin.matches(id, password)
    }

    pub fn get_account(&self, username: &str) -> Result<&Account, QuizError> {
        self.accounts
            .get(username)
            .ok_or_else(|| QuizError::NotFound(username.to_string()))
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
