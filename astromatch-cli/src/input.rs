//! Resolve people given on the command line.

use astromatch_core::{BirthDate, Signature, SignatureError};

use crate::CliError;

/// Resolve a birth date (`1990-04-12`) or a signature key (`aries_horse`).
///
/// Input starting with a digit is treated as a date and carries a year
/// element; anything else is parsed as a key.
pub(crate) fn resolve_person(field: &'static str, input: &str) -> Result<Signature, CliError> {
    let trimmed = input.trim();
    let resolved: Result<Signature, SignatureError> =
        if trimmed.starts_with(|c: char| c.is_ascii_digit()) {
            BirthDate::parse(trimmed).map(Signature::from_birth_date)
        } else {
            trimmed.parse()
        };
    resolved.map_err(|source| CliError::InvalidPerson {
        field,
        input: input.to_owned(),
        source,
    })
}
