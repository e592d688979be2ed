//! Authentication parameters.
//!
//! ClouDNS does not use headers or tokens. Credentials travel as ordinary
//! request parameters next to the business parameters of every call.

use serde_json::Value;

use crate::error::{ErrorKind, Result};
use crate::http_client::HttpParams;

const AUTH_ID: &str = "auth-id";
const SUB_AUTH_ID: &str = "sub-auth-id";
const SUB_AUTH_USER: &str = "sub-auth-user";
const AUTH_PASSWORD: &str = "auth-password";

/// One of the supported ways of authenticating against the API.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Credentials {
    /// No credentials. Only a handful of endpoints accept this.
    #[default]
    None,
    /// Main account, identified by its numeric API user id.
    UserId {
        /// API user id.
        id: u64,
        /// API user password.
        password: String,
    },
    /// Sub-user, identified by its numeric id.
    SubUserId {
        /// Sub-user id.
        id: u64,
        /// Sub-user password.
        password: String,
    },
    /// Sub-user, identified by its name.
    SubUserName {
        /// Sub-user name.
        name: String,
        /// Sub-user password.
        password: String,
    },
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::UserId { id, .. } => f
                .debug_struct("UserId")
                .field("id", id)
                .field("password", &"[filtered]")
                .finish(),
            Self::SubUserId { id, .. } => f
                .debug_struct("SubUserId")
                .field("id", id)
                .field("password", &"[filtered]")
                .finish(),
            Self::SubUserName { name, .. } => f
                .debug_struct("SubUserName")
                .field("name", name)
                .field("password", &"[filtered]")
                .finish(),
        }
    }
}

/// The credentials of a client, turned into API parameters on demand.
///
/// At most one non-[`None`](Credentials::None) credential can be set.
#[derive(Debug, Clone, Default)]
pub struct Auth {
    credentials: Credentials,
}

impl Auth {
    /// An `Auth` without credentials.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure `credentials`.
    ///
    /// Fails with [`ErrorKind::MultipleCredentials`] if credentials are already
    /// configured. Setting [`Credentials::None`] never changes anything.
    pub fn set(&mut self, credentials: Credentials) -> Result<()> {
        if credentials == Credentials::None {
            return Ok(());
        }
        if self.credentials != Credentials::None {
            return Err(ErrorKind::MultipleCredentials.into());
        }

        self.credentials = credentials;
        Ok(())
    }

    /// The active credentials.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Whether no credentials are configured.
    pub fn is_none(&self) -> bool {
        self.credentials == Credentials::None
    }

    /// Parameters to merge into every request.
    ///
    /// Empty for [`Credentials::None`], exactly two entries otherwise.
    pub fn params(&self) -> HttpParams {
        let mut params = HttpParams::new();

        match &self.credentials {
            Credentials::None => {}
            Credentials::UserId { id, password } => {
                params.insert(AUTH_ID.to_string(), Value::from(*id));
                params.insert(AUTH_PASSWORD.to_string(), Value::from(password.as_str()));
            }
            Credentials::SubUserId { id, password } => {
                params.insert(SUB_AUTH_ID.to_string(), Value::from(*id));
                params.insert(AUTH_PASSWORD.to_string(), Value::from(password.as_str()));
            }
            Credentials::SubUserName { name, password } => {
                params.insert(SUB_AUTH_USER.to_string(), Value::from(name.as_str()));
                params.insert(AUTH_PASSWORD.to_string(), Value::from(password.as_str()));
            }
        }

        params
    }

    /// Every parameter name that may carry credential material.
    pub fn sensitive_keys() -> &'static [&'static str] {
        &[AUTH_ID, SUB_AUTH_ID, SUB_AUTH_USER, AUTH_PASSWORD]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_credentials() -> Vec<Credentials> {
        vec![
            Credentials::UserId {
                id: 13,
                password: "test".into(),
            },
            Credentials::SubUserId {
                id: 42,
                password: "dummy".into(),
            },
            Credentials::SubUserName {
                name: "hello".into(),
                password: "world".into(),
            },
        ]
    }

    #[test]
    fn params_none_is_empty() {
        assert!(Auth::new().params().is_empty());
    }

    #[test]
    fn params_user_id() {
        let mut auth = Auth::new();
        auth.set(Credentials::UserId {
            id: 13,
            password: "test".into(),
        })
        .unwrap();

        let params = auth.params();
        assert_eq!(params.len(), 2);
        assert_eq!(params["auth-id"], Value::from(13));
        assert_eq!(params["auth-password"], Value::from("test"));
    }

    #[test]
    fn params_sub_user_id() {
        let mut auth = Auth::new();
        auth.set(Credentials::SubUserId {
            id: 42,
            password: "dummy".into(),
        })
        .unwrap();

        let params = auth.params();
        assert_eq!(params.len(), 2);
        assert_eq!(params["sub-auth-id"], Value::from(42));
        assert_eq!(params["auth-password"], Value::from("dummy"));
    }

    #[test]
    fn params_sub_user_name() {
        let mut auth = Auth::new();
        auth.set(Credentials::SubUserName {
            name: "hello".into(),
            password: "world".into(),
        })
        .unwrap();

        let params = auth.params();
        assert_eq!(params.len(), 2);
        assert_eq!(params["sub-auth-user"], Value::from("hello"));
        assert_eq!(params["auth-password"], Value::from("world"));
    }

    #[test]
    fn second_credential_always_conflicts() {
        for first in all_credentials() {
            for second in all_credentials() {
                let mut auth = Auth::new();
                auth.set(first.clone()).unwrap();

                let err = auth.set(second.clone()).unwrap_err();
                assert!(
                    err.is(ErrorKind::MultipleCredentials),
                    "{first:?} then {second:?} gave {err}"
                );
                assert_eq!(auth.credentials(), &first, "first credential must survive");
            }
        }
    }

    #[test]
    fn setting_none_is_noop() {
        let mut auth = Auth::new();
        auth.set(Credentials::None).unwrap();
        assert!(auth.is_none());

        auth.set(all_credentials().remove(0)).unwrap();
        auth.set(Credentials::None).unwrap();
        assert!(!auth.is_none());
    }

    #[test]
    fn debug_hides_password() {
        let rendered = format!("{:?}", all_credentials());
        assert!(!rendered.contains("test\""));
        assert!(!rendered.contains("dummy"));
        assert!(!rendered.contains("world"));
        assert!(rendered.contains("hello"));
    }
}
