use serde::Serialize;

use cantoria_db::db::enums::UserRole;
use cantoria_db::model::user::AuthUser;

/// Casbin subject for requests without a valid token.
pub const ANONYMOUS_SUBJECT: &str = "anonymous";

/// Account details returned to clients. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "tipo")]
    pub role: UserRole,
    #[serde(rename = "instrumento")]
    pub instrument: Option<String>,
    #[serde(rename = "telefone")]
    pub phone: Option<String>,
    #[serde(rename = "foto")]
    pub photo: Option<String>,
}

impl From<AuthUser> for UserProfile {
    fn from(user: AuthUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
            instrument: user.instrument,
            phone: user.phone,
            photo: user.photo,
        }
    }
}

/// Identity resolved for one request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    Anonymous,
    User(UserProfile),
}

impl Session {
    #[must_use]
    pub const fn user(&self) -> Option<&UserProfile> {
        match self {
            Self::Anonymous => None,
            Self::User(user) => Some(user),
        }
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::User(_))
    }

    /// Subject used for Casbin enforcement: the role name, or `anonymous`.
    #[must_use]
    pub const fn casbin_subject(&self) -> &'static str {
        match self {
            Self::Anonymous => ANONYMOUS_SUBJECT,
            Self::User(user) => user.role.as_str(),
        }
    }
}
