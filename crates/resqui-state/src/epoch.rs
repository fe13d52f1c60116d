//! Request generations.

/// Generation counter for a controller's listing requests.
///
/// Bumped whenever the parameters of the listing change. A completion is only
/// applied if it was issued under the epoch that is still current.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Epoch(u64);

impl Epoch {
    /// Advance to a new generation and return it.
    pub fn bump(&mut self) -> Epoch {
        self.0 = self.0.wrapping_add(1);
        *self
    }

    pub fn get(self) -> u64 {
        self.0
    }
}
