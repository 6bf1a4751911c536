use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// VoIP.ms API username (the account e-mail address).
///
/// Invariant: non-empty after trimming.
pub struct ApiUsername(String);

impl ApiUsername {
    /// Query parameter name used by VoIP.ms (`api_username`).
    pub const FIELD: &'static str = "api_username";

    /// Create a validated [`ApiUsername`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated username.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// VoIP.ms API password (the API key configured in the customer portal).
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
pub struct ApiPassword(String);

impl ApiPassword {
    /// Query parameter name used by VoIP.ms (`api_password`).
    pub const FIELD: &'static str = "api_password";

    /// Create a validated [`ApiPassword`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the password as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiPassword(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// A DID (phone number) managed by the account, e.g. `5551234567`.
///
/// Invariant: non-empty after trimming and made of ASCII digits only.
pub struct Did(String);

impl Did {
    /// Query parameter name used by VoIP.ms (`did`).
    pub const FIELD: &'static str = "did";

    /// Create a validated [`Did`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidDid { input: value });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated DID.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Reseller client identifier (`client`).
///
/// Invariant: non-empty after trimming.
pub struct ClientId(String);

impl ClientId {
    /// Query parameter name used by VoIP.ms (`client`).
    pub const FIELD: &'static str = "client";

    /// Create a validated [`ClientId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated client id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SIP account (main account or sub-account) whose registration is queried.
///
/// Invariant: non-empty after trimming.
pub struct Account(String);

impl Account {
    /// Query parameter name used by VoIP.ms (`account`).
    pub const FIELD: &'static str = "account";

    /// Create a validated [`Account`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated account.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Hostname of a VoIP.ms server (POP), e.g. `atlanta1.voip.ms`.
///
/// Invariant: non-empty after trimming, no interior whitespace. Case is preserved
/// because hostname lookups compare exactly.
pub struct ServerHostname(String);

impl ServerHostname {
    /// Response field name used by VoIP.ms (`server_hostname`).
    pub const FIELD: &'static str = "server_hostname";

    /// Create a validated [`ServerHostname`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(ValidationError::InvalidHostname { input: value });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated hostname.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Numeric POP (point of presence) identifier.
pub struct Pop(i64);

impl Pop {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for Pop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_newtypes_trim_or_validate() {
        assert_eq!(
            ApiUsername::new("  a@x.com ").unwrap().as_str(),
            "a@x.com"
        );
        assert!(matches!(
            ApiUsername::new("   "),
            Err(ValidationError::Empty {
                field: ApiUsername::FIELD
            })
        ));

        assert_eq!(ApiPassword::new(" k ").unwrap().as_str(), " k ");
        assert!(ApiPassword::new("").is_err());

        assert_eq!(ClientId::new(" 561115 ").unwrap().as_str(), "561115");
        assert!(ClientId::new("").is_err());

        assert_eq!(Account::new("100000_VoIP").unwrap().as_str(), "100000_VoIP");
        assert!(Account::new(" ").is_err());
    }

    #[test]
    fn did_requires_digits() {
        assert_eq!(Did::new(" 5551234567 ").unwrap().as_str(), "5551234567");
        assert!(matches!(
            Did::new("555-123-4567"),
            Err(ValidationError::InvalidDid { .. })
        ));
        assert!(matches!(
            Did::new(""),
            Err(ValidationError::Empty { field: Did::FIELD })
        ));
    }

    #[test]
    fn hostname_rejects_interior_whitespace_and_keeps_case() {
        assert_eq!(
            ServerHostname::new("Atlanta1.voip.ms").unwrap().as_str(),
            "Atlanta1.voip.ms"
        );
        assert!(matches!(
            ServerHostname::new("atl 1"),
            Err(ValidationError::InvalidHostname { .. })
        ));
    }

    #[test]
    fn password_debug_is_redacted() {
        let password = ApiPassword::new("secret").unwrap();
        assert_eq!(format!("{password:?}"), "ApiPassword(***)");
    }

    #[test]
    fn pop_displays_as_number() {
        assert_eq!(Pop::new(-1).to_string(), "-1");
        assert_eq!(Pop::new(42).value(), 42);
    }
}
