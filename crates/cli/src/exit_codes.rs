//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain     | Description                              |
//! |---------|------------|------------------------------------------|
//! | 0       | Universal  | Success                                  |
//! | 1       | Universal  | General error (unspecified)              |
//! | 2       | Universal  | CLI usage error (bad args, missing file) |
//! | 3-9     | Input      | File I/O and article/script parsing      |
//! | 10-19   | ai         | Provider, key and generation codes       |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

use pressroom_core::GenerateError;

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Input (3-9)
// =============================================================================

/// Cannot read or write a file.
pub const EXIT_IO: u8 = 3;

/// Article JSON does not match the comparison shape.
pub const EXIT_ARTICLE_PARSE: u8 = 4;

/// Canvas script has a bad command or reference.
pub const EXIT_SCRIPT: u8 = 5;

// =============================================================================
// AI (10-19)
// =============================================================================

/// Generation disabled (provider=none).
pub const EXIT_AI_DISABLED: u8 = 10;

/// Provider configured but API key missing.
pub const EXIT_AI_MISSING_KEY: u8 = 11;

/// Could not reach the provider.
pub const EXIT_AI_NETWORK: u8 = 12;

/// Provider answered with an error status.
pub const EXIT_AI_PROVIDER: u8 = 13;

/// Provider answered but the article could not be read.
pub const EXIT_AI_FORMAT: u8 = 14;

/// Map a generation failure to its exit code.
pub fn generate_exit_code(err: &GenerateError) -> u8 {
    match err {
        GenerateError::NotConfigured(_) => EXIT_AI_DISABLED,
        GenerateError::MissingKey => EXIT_AI_MISSING_KEY,
        GenerateError::Network(_) => EXIT_AI_NETWORK,
        GenerateError::Api { .. } => EXIT_AI_PROVIDER,
        GenerateError::Parse(_) | GenerateError::EmptyResponse => EXIT_AI_FORMAT,
    }
}
