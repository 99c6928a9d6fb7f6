//! Note identifier generation.
//!
//! Note ids are opaque strings on the wire. They are minted as UUIDv7 so
//! they sort roughly by creation time and never collide, and are rendered
//! in the canonical hyphenated form.

use uuid::Uuid;

/// Generate a fresh note id.
///
/// ```
/// use brainpad_core::ids::new_note_id;
///
/// let a = new_note_id();
/// let b = new_note_id();
/// assert_ne!(a, b);
/// ```
#[inline]
pub fn new_note_id() -> String {
    Uuid::now_v7().to_string()
}
