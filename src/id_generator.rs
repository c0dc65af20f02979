//! Identifier generation for new records.

use uuid::Uuid;

/// Supplies fresh identifiers for records created without one.
pub trait IdGenerator {
    /// A new identifier. It should be unique, but the store still checks.
    fn next_id(&mut self) -> String;
}

/// Generates random (version 4) UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}
