//! Fleet node and game admin entities (read-only lookups)

use serde::Serialize;

use crate::value_objects::Snowflake;

/// One server instance in the fleet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub id: Snowflake,
    pub name: String,
    pub active: bool,
    pub invisible: bool,
}

impl Node {
    /// Whether broadcasts should reach this node
    #[inline]
    pub fn receives_broadcasts(&self) -> bool {
        self.active && !self.invisible
    }
}

/// In-game administrator profile that issues and removes bans
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameAdmin {
    pub id: Snowflake,
    pub handle: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receives_broadcasts() {
        let mut node = Node {
            id: Snowflake::new(1),
            name: "main".to_string(),
            active: true,
            invisible: false,
        };
        assert!(node.receives_broadcasts());

        node.invisible = true;
        assert!(!node.receives_broadcasts());

        node.invisible = false;
        node.active = false;
        assert!(!node.receives_broadcasts());
    }
}
