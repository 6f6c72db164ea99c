//! Password strength checking and bcrypt hashing for user accounts.

use std::fmt;

use bcrypt::{BcryptError, hash, verify};
use zxcvbn::{Score, zxcvbn};

use crate::Error;

/// A raw password that has passed the strength check.
#[derive(Clone, PartialEq)]
pub struct ValidatedPassword(String);

impl ValidatedPassword {
    /// Check `raw_password` with zxcvbn, keeping it only when it scores three
    /// or higher out of four.
    ///
    /// # Errors
    ///
    /// Returns [Error::TooWeak] with the checker's feedback when the password
    /// scores too low.
    pub fn new(raw_password: &str) -> Result<Self, Error> {
        let analysis = zxcvbn(raw_password, &[]);

        if matches!(analysis.score(), Score::Three | Score::Four) {
            Ok(Self(raw_password.to_owned()))
        } else {
            let feedback = analysis
                .feedback()
                .map(ToString::to_string)
                .unwrap_or_default();

            Err(Error::TooWeak(feedback))
        }
    }

    /// Wrap a password without checking its strength.
    ///
    /// The caller is responsible for ensuring the password is acceptable.
    /// Skipping the check cannot cause memory unsafety, only a weak account
    /// password.
    pub fn new_unchecked(raw_password: &str) -> Self {
        Self(raw_password.to_owned())
    }
}

// Keeps raw passwords out of logs and panic messages.
impl fmt::Debug for ValidatedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ValidatedPassword(********)")
    }
}

/// A bcrypt hash of a user's password, as stored in the user table.
#[derive(Debug, Clone, PartialEq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// The bcrypt cost used outside of tests. Tests pass a lower cost to keep
    /// hashing fast.
    pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

    /// Hash a validated password with the given bcrypt `cost`.
    ///
    /// # Errors
    ///
    /// Returns [Error::HashingError] when bcrypt rejects the input.
    pub fn new(password: ValidatedPassword, cost: u32) -> Result<Self, Error> {
        hash(&password.0, cost)
            .map(Self)
            .map_err(|error| Error::HashingError(error.to_string()))
    }

    /// Wrap an existing hash string, for rows loaded from the database.
    pub fn new_unchecked(raw_password_hash: &str) -> Self {
        Self(raw_password_hash.to_owned())
    }

    /// Validate and hash `raw_password` in one step.
    ///
    /// # Errors
    ///
    /// Returns [Error::TooWeak] for weak passwords and [Error::HashingError]
    /// when bcrypt rejects the input.
    pub fn from_raw_password(raw_password: &str, cost: u32) -> Result<Self, Error> {
        PasswordHash::new(ValidatedPassword::new(raw_password)?, cost)
    }

    /// Whether `raw_password` matches this hash.
    ///
    /// # Errors
    ///
    /// Returns a [BcryptError] when the stored hash cannot be parsed.
    pub fn verify(&self, raw_password: &str) -> Result<bool, BcryptError> {
        verify(raw_password, &self.0)
    }
}

impl AsRef<str> for PasswordHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
