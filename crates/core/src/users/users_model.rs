//! User domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How the account was established with the identity stand-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    Google,
    Email,
}

impl AuthMethod {
    pub fn as_db_str(&self) -> &'static str {
        match self {
            AuthMethod::Google => "google",
            AuthMethod::Email => "email",
        }
    }

    pub fn from_db_str(value: &str) -> Self {
        match value {
            "google" => AuthMethod::Google,
            _ => AuthMethod::Email,
        }
    }
}

/// An identity record. The sync core only ever checks existence; mutation
/// goes through the identity service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub avatar: Option<String>,
    pub auth_method: AuthMethod,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Registration payload. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    pub auth_method: AuthMethod,
    #[serde(default)]
    pub is_admin: bool,
}

#[cfg(test)]
mod tests {
    use super::AuthMethod;

    #[test]
    fn auth_method_serialization_matches_db_strings() {
        for method in [AuthMethod::Google, AuthMethod::Email] {
            let json = serde_json::to_string(&method).expect("serialize auth method");
            assert_eq!(json.trim_matches('"'), method.as_db_str());
            assert_eq!(AuthMethod::from_db_str(method.as_db_str()), method);
        }
    }
}
