use std::fmt::{Debug, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Describe the possible ways to authenticate oneself
///
/// Opensky wants the credentials on every call, there is no token to fetch first.
///
#[derive(Clone, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Auth {
    /// Nothing special, no auth
    #[default]
    Anon,
    /// Using plain login/password, sent as the URL userinfo
    Login { username: String, password: String },
}

impl Auth {
    pub fn login(username: &str, password: &str) -> Self {
        Auth::Login {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[inline]
    pub fn is_anon(&self) -> bool {
        matches!(self, Auth::Anon)
    }
}

impl Debug for Auth {
    /// Obfuscate the passwords
    ///
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Auth::Anon => write!(f, "Anon"),
            Auth::Login { username, .. } => f
                .debug_struct("Login")
                .field("username", username)
                .field("password", &"HIDDEN")
                .finish(),
        }
    }
}

impl Display for Auth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
