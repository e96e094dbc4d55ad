// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Passcode policy validation.
//!
//! Applied whenever the project registry creates or updates a project's
//! passcodes. The policy is intentionally lightweight: passcodes gate a
//! shared workflow, they are not personal credentials.

use thiserror::Error;

/// Passcode policy errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasscodePolicyError {
    /// Passcode is too short.
    #[error("Passcode must be at least {min_length} characters long")]
    TooShort {
        /// The minimum length the policy requires.
        min_length: usize,
    },

    /// Passcode contains whitespace.
    #[error("Passcode must not contain whitespace")]
    ContainsWhitespace,

    /// Admin and project passcodes are identical.
    #[error("Admin passcode must differ from the project passcode")]
    AdminMatchesProject,
}

/// Passcode policy configuration.
pub struct PasscodePolicy {
    /// Minimum passcode length.
    pub min_length: usize,
}

impl Default for PasscodePolicy {
    fn default() -> Self {
        Self { min_length: 6 }
    }
}

impl PasscodePolicy {
    /// Validates a project/admin passcode pair against the policy.
    ///
    /// # Arguments
    ///
    /// * `project_passcode` - The passcode for non-admin roles
    /// * `admin_passcode` - The passcode for the admin role
    ///
    /// # Errors
    ///
    /// Returns a `PasscodePolicyError` if either passcode violates the
    /// policy or the two are identical.
    pub fn validate(
        &self,
        project_passcode: &str,
        admin_passcode: &str,
    ) -> Result<(), PasscodePolicyError> {
        self.validate_one(project_passcode)?;
        self.validate_one(admin_passcode)?;

        if project_passcode == admin_passcode {
            return Err(PasscodePolicyError::AdminMatchesProject);
        }

        Ok(())
    }

    fn validate_one(&self, passcode: &str) -> Result<(), PasscodePolicyError> {
        if passcode.len() < self.min_length {
            return Err(PasscodePolicyError::TooShort {
                min_length: self.min_length,
            });
        }

        if passcode.chars().any(char::is_whitespace) {
            return Err(PasscodePolicyError::ContainsWhitespace);
        }

        Ok(())
    }
}
