use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, ValueObject};

const LOCAL_PART_SYMBOLS: &str = ".!#$%&'*+/=?^_`{|}~-";

/// Checkout contact address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate `local@label(.label)*`.
    ///
    /// The local part allows ASCII alphanumerics plus `.!#$%&'*+/=?^_`{|}~-`;
    /// domain labels allow ASCII alphanumerics and `-`.
    pub fn parse(raw: impl Into<String>) -> DomainResult<Self> {
        let raw = raw.into();
        let value = raw.trim();

        let Some((local, domain)) = value.split_once('@') else {
            return Err(DomainError::validation(format!("email missing '@': {value}")));
        };

        let local_ok = !local.is_empty()
            && local
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || LOCAL_PART_SYMBOLS.contains(c));
        if !local_ok {
            return Err(DomainError::validation(format!("invalid email local part: {value}")));
        }

        let domain_ok = domain.split('.').all(|label| {
            !label.is_empty() && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        });
        if !domain_ok {
            return Err(DomainError::validation(format!("invalid email domain: {value}")));
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Email {}

impl core::fmt::Display for Email {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}
