//! Leader validation.
//!
//! Real-world records break these rules often enough that validation is
//! optional; see [`crate::options::ReadOptions::set_validate_leader`].
//!
//! # References
//!
//! * <https://www.loc.gov/marc/bibliographic/bdleader.html>
use crate::error::Error;
use crate::LEADER_SIZE;

/// Permitted values per leader position.  Positions 0-4 (record length)
/// and 12-16 (base address) are numeric and checked elsewhere.
pub const LEADER_RULES: &[(usize, &str)] = &[
    (5, "acdnp"),
    (6, "acdefgijkmoprt"),
    (7, "abcdims"),
    (8, " a"),
    (9, " a"),
    (10, "2"),
    (11, "2"),
    (17, " 1234578uz"),
    (18, " aciu"),
    (19, " abc"),
    (20, "4"),
    (21, "5"),
    (22, "0"),
    (23, "0"),
];

/// Check the leader of a record against [`LEADER_RULES`].
///
/// Returns the first violation found.
///
/// ```
/// use marc21::leader::validate_leader;
///
/// assert!(validate_leader(b"00458nam a22001577u 4500").is_ok());
/// assert!(validate_leader(b"00458nam a32001577u 4500").is_err());
/// ```
pub fn validate_leader(bytes: &[u8]) -> Result<(), Error> {
    validate_leader_except(bytes, &[])
}

/// Like [`validate_leader`], but positions listed in `exempt` are not
/// checked.
///
/// ```
/// use marc21::leader::validate_leader_except;
///
/// let leader = b"00458namqa22001577u 4500";
/// assert!(validate_leader_except(leader, &[]).is_err());
/// assert!(validate_leader_except(leader, &[8]).is_ok());
/// ```
pub fn validate_leader_except(bytes: &[u8], exempt: &[usize]) -> Result<(), Error> {
    if bytes.len() < LEADER_SIZE {
        return Err(Error::InvalidLength(
            String::from_utf8_lossy(bytes).into_owned(),
        ));
    }

    for &(position, expected) in LEADER_RULES {
        if exempt.contains(&position) {
            continue;
        }

        let found = bytes[position];
        if !expected.as_bytes().contains(&found) {
            return Err(Error::InvalidLeader {
                position,
                expected,
                found,
            });
        }
    }

    Ok(())
}

/// True if the leader passes every rule.
pub fn is_valid_leader(bytes: &[u8]) -> bool {
    validate_leader(bytes).is_ok()
}
