//! # Slateboard Idgen
//!
//! Human-readable business identifiers for documents and transactions.
//!
//! Printed and exported documents (receipts, certificates, hall tickets)
//! carry a short code staff can read out loud, distinct from any surrogate
//! primary key: `<TAG>_<YYYYMMDD>_<RANDOM>`, e.g. `CHEQUE_20240305_K7Q2M9`.
//! Exam identifiers instead use a running sequence scoped to an academic
//! year: `EXAM-2024-0004`.
//!
//! Uniqueness is probabilistic, not guaranteed. The generator never consults
//! existing identifiers; collision risk is bounded only by the day-granular
//! date stamp and the suffix entropy (36^4 for documents, 36^6 for financial
//! transactions). Callers must back the column with a unique constraint and
//! retry creation with a fresh identifier on conflict. The sequential scheme
//! additionally races when two writers read the same count before either
//! commits; see [`generate_sequential`].

pub mod clock;

pub use clock::{Clock, FixedClock, SystemClock};

use rand::Rng;
use thiserror::Error;

/// Suffix length used for ordinary document identifiers (notices, circulars,
/// certificates).
pub const DOCUMENT_SUFFIX_LEN: usize = 4;

/// Suffix length used for financial transaction identifiers (cheques, fee
/// receipts). Longer because the collision cost is higher.
pub const TRANSACTION_SUFFIX_LEN: usize = 6;

/// Number of digits in a sequential identifier's counter.
const SEQUENCE_WIDTH: usize = 4;

/// Uppercase base-36 alphabet the random suffix is sampled from.
const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdError {
    #[error("identifier type tag must not be empty")]
    EmptyTypeTag,

    #[error("sequential identifier scope year must not be empty")]
    EmptyScopeYear,
}

/// Generate a document/transaction identifier from the system clock and
/// thread-local randomness.
///
/// Format: `<UPPERCASE(tag)>_<YYYYMMDD>_<suffix>`. The suffix length is a
/// per-call-site choice; use [`DOCUMENT_SUFFIX_LEN`] or
/// [`TRANSACTION_SUFFIX_LEN`]. The tag is not checked against any
/// enumeration, only required to be non-empty.
pub fn generate(type_tag: &str, suffix_len: usize) -> Result<String, IdError> {
    generate_with(type_tag, suffix_len, &SystemClock, &mut rand::thread_rng())
}

/// [`generate`] with an injected clock and RNG, for deterministic tests.
pub fn generate_with(
    type_tag: &str,
    suffix_len: usize,
    clock: &impl Clock,
    rng: &mut impl Rng,
) -> Result<String, IdError> {
    if type_tag.is_empty() {
        return Err(IdError::EmptyTypeTag);
    }

    let stamp = clock.now().format("%Y%m%d");
    let suffix: String = (0..suffix_len)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect();

    Ok(format!("{}_{}_{}", type_tag.to_uppercase(), stamp, suffix))
}

/// Generate a sequential identifier scoped to an academic year.
///
/// Format: `<tag>-<year>-<count+1, zero-padded to 4>`. A scope of
/// `"2024-2025"` contributes its leading year, so
/// `generate_sequential("EXAM", "2024-2025", 3)` yields `EXAM-2024-0004`.
///
/// The caller supplies `count_in_scope` from its own query of existing
/// records. That read-then-format is a check-then-act race: two concurrent
/// creations reading the same count both produce the same identifier. This
/// function reproduces the scheme as-is; real duplicate protection belongs to
/// the storage layer (unique constraint plus retry, or a database sequence).
pub fn generate_sequential(
    type_tag: &str,
    scope_year: &str,
    count_in_scope: i64,
) -> Result<String, IdError> {
    if type_tag.is_empty() {
        return Err(IdError::EmptyTypeTag);
    }

    // "2024-2025" scopes by its leading year; a bare "2024" is used as-is.
    let year = scope_year
        .split('-')
        .next()
        .filter(|y| !y.is_empty())
        .ok_or(IdError::EmptyScopeYear)?;

    Ok(format!(
        "{}-{}-{:0width$}",
        type_tag,
        year,
        count_in_scope + 1,
        width = SEQUENCE_WIDTH
    ))
}
