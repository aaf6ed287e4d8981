//! Choosing how to log in from whichever credentials were supplied.
//!
//! The credential combinations overlap (a password-grant bundle also has
//! everything a plain SOAP login needs), so the order of [`SELECTION_ORDER`]
//! decides the outcome. Selection only inspects the bundle; it performs no I/O.

use crate::credentials::{LoginCredentials, PrivateKey};
use crate::error::{Error, ErrorKind, Result};

/// Login domain used when none is given.
pub const DEFAULT_DOMAIN: &str = "login";

/// Domains that never qualify for the client credentials grant.
pub const GENERIC_DOMAINS: [&str; 2] = ["login", "test"];

/// Discriminant of a [`LoginStrategy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    SecurityTokenSoap,
    PasswordGrant,
    OrganizationSoap,
    PlainSoap,
    JwtBearer,
    ClientCredentials,
}

/// A selected login strategy with the inputs it needs.
#[derive(Clone)]
pub enum LoginStrategy<'a> {
    /// SOAP login with the security token appended to the password.
    SecurityTokenSoap {
        username: &'a str,
        password: &'a str,
        security_token: &'a str,
    },
    /// OAuth username-password grant.
    PasswordGrant {
        username: &'a str,
        password: &'a str,
        consumer_key: &'a str,
        consumer_secret: &'a str,
    },
    /// SOAP login restricted to one organization.
    OrganizationSoap {
        username: &'a str,
        password: &'a str,
        organization_id: &'a str,
    },
    /// SOAP login with username and password only.
    PlainSoap { username: &'a str, password: &'a str },
    /// OAuth JWT bearer grant.
    JwtBearer {
        username: &'a str,
        consumer_key: &'a str,
        private_key: PrivateKey,
    },
    /// OAuth client credentials grant against a My Domain.
    ClientCredentials {
        consumer_key: &'a str,
        consumer_secret: &'a str,
        domain: &'a str,
    },
}

impl std::fmt::Debug for LoginStrategy<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.kind())
    }
}

impl LoginStrategy<'_> {
    pub fn kind(&self) -> StrategyKind {
        match self {
            LoginStrategy::SecurityTokenSoap { .. } => StrategyKind::SecurityTokenSoap,
            LoginStrategy::PasswordGrant { .. } => StrategyKind::PasswordGrant,
            LoginStrategy::OrganizationSoap { .. } => StrategyKind::OrganizationSoap,
            LoginStrategy::PlainSoap { .. } => StrategyKind::PlainSoap,
            LoginStrategy::JwtBearer { .. } => StrategyKind::JwtBearer,
            LoginStrategy::ClientCredentials { .. } => StrategyKind::ClientCredentials,
        }
    }
}

/// Recognizes one strategy, returning it only if every required field is present.
pub type StrategyMatcher = for<'a> fn(&'a LoginCredentials) -> Option<LoginStrategy<'a>>;

/// Strategies in priority order; the first match wins.
pub const SELECTION_ORDER: [(StrategyKind, StrategyMatcher); 6] = [
    (StrategyKind::SecurityTokenSoap, security_token_soap),
    (StrategyKind::PasswordGrant, password_grant),
    (StrategyKind::OrganizationSoap, organization_soap),
    (StrategyKind::PlainSoap, plain_soap),
    (StrategyKind::JwtBearer, jwt_bearer),
    (StrategyKind::ClientCredentials, client_credentials),
];

/// Pick the login strategy for `creds`.
pub fn select(creds: &LoginCredentials) -> Result<LoginStrategy<'_>> {
    SELECTION_ORDER
        .iter()
        .find_map(|(_, matcher)| matcher(creds))
        .ok_or_else(|| Error::new(ErrorKind::NoMatchingStrategy))
}

/// Username, ignoring an empty string.
fn username(creds: &LoginCredentials) -> Option<&str> {
    creds.username.as_deref().filter(|u| !u.is_empty())
}

/// Password, ignoring an empty string.
fn password(creds: &LoginCredentials) -> Option<&str> {
    creds.password_value().filter(|p| !p.is_empty())
}

fn security_token_soap(creds: &LoginCredentials) -> Option<LoginStrategy<'_>> {
    Some(LoginStrategy::SecurityTokenSoap {
        username: username(creds)?,
        password: password(creds)?,
        security_token: creds.security_token_value()?,
    })
}

fn password_grant(creds: &LoginCredentials) -> Option<LoginStrategy<'_>> {
    Some(LoginStrategy::PasswordGrant {
        username: username(creds)?,
        password: password(creds)?,
        consumer_key: creds.consumer_key.as_deref()?,
        consumer_secret: creds.consumer_secret_value()?,
    })
}

fn organization_soap(creds: &LoginCredentials) -> Option<LoginStrategy<'_>> {
    Some(LoginStrategy::OrganizationSoap {
        username: username(creds)?,
        password: password(creds)?,
        organization_id: creds.organization_id.as_deref()?,
    })
}

fn plain_soap(creds: &LoginCredentials) -> Option<LoginStrategy<'_>> {
    Some(LoginStrategy::PlainSoap {
        username: username(creds)?,
        password: password(creds)?,
    })
}

fn jwt_bearer(creds: &LoginCredentials) -> Option<LoginStrategy<'_>> {
    Some(LoginStrategy::JwtBearer {
        username: username(creds)?,
        consumer_key: creds.consumer_key.as_deref()?,
        private_key: creds.private_key_source()?,
    })
}

fn client_credentials(creds: &LoginCredentials) -> Option<LoginStrategy<'_>> {
    let domain = creds.domain.as_deref().unwrap_or(DEFAULT_DOMAIN);
    if GENERIC_DOMAINS.contains(&domain) {
        return None;
    }

    Some(LoginStrategy::ClientCredentials {
        consumer_key: creds.consumer_key.as_deref()?,
        consumer_secret: creds.consumer_secret_value()?,
        domain,
    })
}
