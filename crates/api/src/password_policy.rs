// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Password policy validation.
//!
//! This module enforces password requirements for employee credentials,
//! at registration, self-service change and reset.

use thiserror::Error;

/// Password policy errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    /// Password is too short.
    #[error("Password must be at least {min_length} characters long")]
    TooShort { min_length: usize },

    /// Password does not meet complexity requirements.
    #[error(
        "Password must contain at least {required} of the following: uppercase letter, lowercase letter, digit, symbol (found {found})"
    )]
    InsufficientComplexity { required: usize, found: usize },

    /// Password matches a forbidden value.
    #[error("Password must not match {field}")]
    MatchesForbiddenField { field: String },

    /// Password and confirmation do not match.
    #[error("Password and confirmation do not match")]
    ConfirmationMismatch,
}

/// Password policy configuration.
pub struct PasswordPolicy {
    /// Minimum password length.
    pub min_length: usize,
    /// Minimum number of character classes required (out of 4).
    pub min_complexity: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            min_complexity: 3,
        }
    }
}

impl PasswordPolicy {
    /// Validates a password against the policy.
    ///
    /// # Arguments
    ///
    /// * `password` - The password to validate
    /// * `email` - The employee's email (password must not match)
    /// * `name` - The employee's name (password must not match)
    ///
    /// # Errors
    ///
    /// Returns a `PasswordPolicyError` if the password does not meet policy requirements.
    pub fn validate(
        &self,
        password: &str,
        email: &str,
        name: &str,
    ) -> Result<(), PasswordPolicyError> {
        if password.chars().count() < self.min_length {
            return Err(PasswordPolicyError::TooShort {
                min_length: self.min_length,
            });
        }

        let complexity: usize = Self::calculate_complexity(password);
        if complexity < self.min_complexity {
            return Err(PasswordPolicyError::InsufficientComplexity {
                required: self.min_complexity,
                found: complexity,
            });
        }

        // Forbidden values compare case-insensitively
        let password_lower: String = password.to_lowercase();
        if password_lower == email.trim().to_lowercase() {
            return Err(PasswordPolicyError::MatchesForbiddenField {
                field: String::from("email"),
            });
        }
        if password_lower == name.trim().to_lowercase() {
            return Err(PasswordPolicyError::MatchesForbiddenField {
                field: String::from("name"),
            });
        }

        Ok(())
    }

    /// Validates a password and its confirmation.
    ///
    /// # Errors
    ///
    /// Returns `ConfirmationMismatch` first, then any error from [`Self::validate`].
    pub fn validate_with_confirmation(
        &self,
        password: &str,
        confirmation: &str,
        email: &str,
        name: &str,
    ) -> Result<(), PasswordPolicyError> {
        if password != confirmation {
            return Err(PasswordPolicyError::ConfirmationMismatch);
        }
        self.validate(password, email, name)
    }

    /// Calculates the complexity score of a password.
    ///
    /// Returns the number of character classes present:
    /// - Uppercase letters
    /// - Lowercase letters
    /// - Digits
    /// - Symbols
    fn calculate_complexity(password: &str) -> usize {
        let mut has_uppercase: bool = false;
        let mut has_lowercase: bool = false;
        let mut has_digit: bool = false;
        let mut has_symbol: bool = false;

        for c in password.chars() {
            if c.is_uppercase() {
                has_uppercase = true;
            } else if c.is_lowercase() {
                has_lowercase = true;
            } else if c.is_ascii_digit() {
                has_digit = true;
            } else if !c.is_whitespace() && !c.is_alphanumeric() {
                has_symbol = true;
            }
        }

        [has_uppercase, has_lowercase, has_digit, has_symbol]
            .into_iter()
            .filter(|present| *present)
            .count()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_password() {
        let policy: PasswordPolicy = PasswordPolicy::default();

        // All four classes
        assert!(
            policy
                .validate("Password1!", "erin@example.com", "Erin Employee")
                .is_ok()
        );

        // Three of four, exactly the minimum length
        assert!(policy.validate("Abcdefg1", "erin@example.com", "Erin").is_ok());
        assert!(policy.validate("abcdef1!", "erin@example.com", "Erin").is_ok());
    }

    #[test]
    fn test_password_too_short() {
        let policy: PasswordPolicy = PasswordPolicy::default();

        let result: Result<(), PasswordPolicyError> =
            policy.validate("Ab1!xyz", "erin@example.com", "Erin");

        assert_eq!(result, Err(PasswordPolicyError::TooShort { min_length: 8 }));
    }

    #[test]
    fn test_insufficient_complexity() {
        let policy: PasswordPolicy = PasswordPolicy::default();

        let result: Result<(), PasswordPolicyError> =
            policy.validate("alllowercase", "erin@example.com", "Erin");
        assert_eq!(
            result,
            Err(PasswordPolicyError::InsufficientComplexity {
                required: 3,
                found: 1
            })
        );

        let result: Result<(), PasswordPolicyError> =
            policy.validate("OnlyLettersHere", "erin@example.com", "Erin");
        assert_eq!(
            result,
            Err(PasswordPolicyError::InsufficientComplexity {
                required: 3,
                found: 2
            })
        );
    }

    #[test]
    fn test_matches_email() {
        let policy: PasswordPolicy = PasswordPolicy::default();

        let result: Result<(), PasswordPolicyError> =
            policy.validate("Erin1@Example.com", "erin1@example.com", "Erin");

        assert_eq!(
            result,
            Err(PasswordPolicyError::MatchesForbiddenField {
                field: String::from("email")
            })
        );
    }

    #[test]
    fn test_matches_name() {
        let policy: PasswordPolicy = PasswordPolicy::default();

        let result: Result<(), PasswordPolicyError> =
            policy.validate("erin Employee1", "erin@example.com", "Erin Employee1");

        assert_eq!(
            result,
            Err(PasswordPolicyError::MatchesForbiddenField {
                field: String::from("name")
            })
        );
    }

    #[test]
    fn test_confirmation_mismatch() {
        let policy: PasswordPolicy = PasswordPolicy::default();

        let result: Result<(), PasswordPolicyError> = policy.validate_with_confirmation(
            "Password1!",
            "Password2!",
            "erin@example.com",
            "Erin",
        );

        assert_eq!(result, Err(PasswordPolicyError::ConfirmationMismatch));
    }

    #[test]
    fn test_complexity_calculation() {
        assert_eq!(PasswordPolicy::calculate_complexity("Aa1!"), 4);
        assert_eq!(PasswordPolicy::calculate_complexity("Aa1"), 3);
        assert_eq!(PasswordPolicy::calculate_complexity("abc!"), 2);
        assert_eq!(PasswordPolicy::calculate_complexity("abc"), 1);
        assert_eq!(PasswordPolicy::calculate_complexity(""), 0);
    }
}
