//! Short identifier generation.
//!
//! Identifiers are the first [`CODE_LENGTH`] characters of a random (v4) UUID
//! in its hyphenated form, i.e. 8 lowercase hex digits (32 bits of entropy).
//! No existence check is made against storage before use.

use uuid::Uuid;

/// Number of characters kept from the UUID string.
pub const CODE_LENGTH: usize = 8;

/// Generates a new short identifier.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code();
/// assert_eq!(code.len(), 8);
/// assert!(code.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
pub fn generate_code() -> String {
    let mut code = Uuid::new_v4().to_string();
    code.truncate(CODE_LENGTH);
    code
}
