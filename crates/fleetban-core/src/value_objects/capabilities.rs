//! Operator capability flags
//!
//! Carried in access tokens issued by the panel's session layer. Only the
//! presence of at least one of them is checked here; finer-grained rules
//! live with whoever issues the token.

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

bitflags! {
    /// Capabilities granted to a panel operator
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Capabilities: u32 {
        /// Site administrator
        const ADMIN      = 1 << 0;
        /// Operator linked to an in-game admin profile
        const GAME_ADMIN = 1 << 1;
    }
}

impl Capabilities {
    /// Whether these capabilities open the ban management routes
    #[inline]
    pub fn can_manage_bans(&self) -> bool {
        self.intersects(Self::ADMIN | Self::GAME_ADMIN)
    }
}

impl Serialize for Capabilities {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.bits())
    }
}

impl<'de> Deserialize<'de> for Capabilities {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bits = u32::deserialize(deserializer)?;
        Ok(Self::from_bits_truncate(bits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_manage_bans() {
        assert!(!Capabilities::empty().can_manage_bans());
        assert!(Capabilities::ADMIN.can_manage_bans());
        assert!(Capabilities::GAME_ADMIN.can_manage_bans());
    }

    #[test]
    fn test_unknown_bits_are_dropped() {
        let caps: Capabilities = serde_json::from_str("255").unwrap();
        assert_eq!(caps, Capabilities::ADMIN | Capabilities::GAME_ADMIN);
    }
}
