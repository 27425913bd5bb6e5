//! Domain values produced by the stock decoders.

use std::collections::HashMap;

use derive_more::{Display, Error};

/// Tokens returned by a successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Token used to call protected APIs.
    pub access_token: String,
    /// Token type, usually `Bearer`.
    pub token_type: String,
    /// OpenID Connect ID token.
    pub id_token: Option<String>,
    /// Token used to obtain new credentials.
    pub refresh_token: Option<String>,
    /// Lifetime of the access token in seconds.
    pub expires_in: Option<u64>,
    /// Granted scopes, space separated.
    pub scope: Option<String>,
}

/// Why [`Credentials::from_map`] rejected its input.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum CredentialsError {
    /// A required field is absent or empty.
    #[display("missing required field `{_0}`")]
    MissingField(#[error(not(source))] &'static str),

    /// A field is present but cannot be interpreted.
    #[display("invalid value for `{field}`: {value}")]
    InvalidField {
        /// Field name.
        field: &'static str,
        /// Offending value.
        value: String,
    },
}

impl Credentials {
    /// Build credentials from a token endpoint response flattened to strings.
    ///
    /// `access_token` and `token_type` are required; `expires_in` must be a
    /// non-negative integer when present.
    pub fn from_map(values: &HashMap<String, String>) -> Result<Self, CredentialsError> {
        let required = |field: &'static str| {
            values
                .get(field)
                .filter(|value| !value.is_empty())
                .cloned()
                .ok_or(CredentialsError::MissingField(field))
        };
        let optional = |field: &str| values.get(field).filter(|value| !value.is_empty()).cloned();

        let expires_in = optional("expires_in")
            .map(|value| {
                value
                    .parse::<u64>()
                    .map_err(|_| CredentialsError::InvalidField {
                        field: "expires_in",
                        value,
                    })
            })
            .transpose()?;

        Ok(Self {
            access_token: required("access_token")?,
            token_type: required("token_type")?,
            id_token: optional("id_token"),
            refresh_token: optional("refresh_token"),
            expires_in,
            scope: optional("scope"),
        })
    }
}

/// Basic profile of the authenticated user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// Email address.
    pub email: String,
    /// Username, for connections that have one.
    pub username: Option<String>,
    /// Whether the email address was verified.
    pub verified: bool,
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};

    use super::*;

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect()
    }

    #[test]
    fn credentials_from_full_map() {
        let values = map(&[
            ("access_token", "at"),
            ("token_type", "Bearer"),
            ("id_token", "idt"),
            ("refresh_token", "rt"),
            ("expires_in", "86400"),
            ("scope", "openid profile"),
        ]);

        let_assert!(Ok(credentials) = Credentials::from_map(&values));
        check!(credentials.access_token == "at");
        check!(credentials.token_type == "Bearer");
        check!(credentials.id_token.as_deref() == Some("idt"));
        check!(credentials.refresh_token.as_deref() == Some("rt"));
        check!(credentials.expires_in == Some(86_400));
        check!(credentials.scope.as_deref() == Some("openid profile"));
    }

    #[test]
    fn credentials_optional_fields_default_to_none() {
        let values = map(&[("access_token", "at"), ("token_type", "Bearer")]);

        let_assert!(Ok(credentials) = Credentials::from_map(&values));
        check!(credentials.id_token.is_none());
        check!(credentials.expires_in.is_none());
    }

    #[test]
    fn credentials_require_access_token() {
        let values = map(&[("token_type", "Bearer")]);

        let result = Credentials::from_map(&values);

        check!(result == Err(CredentialsError::MissingField("access_token")));
    }

    #[test]
    fn credentials_reject_empty_token_type() {
        let values = map(&[("access_token", "at"), ("token_type", "")]);

        let result = Credentials::from_map(&values);

        check!(result == Err(CredentialsError::MissingField("token_type")));
    }

    #[test]
    fn credentials_reject_bad_expiry() {
        let values = map(&[
            ("access_token", "at"),
            ("token_type", "Bearer"),
            ("expires_in", "soon"),
        ]);

        let result = Credentials::from_map(&values);
        let_assert!(Err(CredentialsError::InvalidField { field, value }) = result);
        check!(field == "expires_in");
        check!(value == "soon");
    }
}
