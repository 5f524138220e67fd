use std::time::Duration;

use crate::runtime::storage::ObjectLocation;

/// Storage backend for the result object.
pub trait ObjectStore {
    /// Writes `body` to `location`, replacing any existing content.
    fn put_object(&self, location: &ObjectLocation, body: &[u8]) -> Result<(), String>;

    /// Returns a link that downloads `location` without credentials until `expires_in` elapses.
    fn presign_get_url(
        &self,
        location: &ObjectLocation,
        expires_in: Duration,
    ) -> Result<String, String>;
}
