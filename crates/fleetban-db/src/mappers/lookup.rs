//! Node and game admin model -> entity mappers

use fleetban_core::entities::{GameAdmin, Node};
use fleetban_core::value_objects::Snowflake;

use crate::models::{GameAdminModel, NodeModel};

impl From<NodeModel> for Node {
    fn from(model: NodeModel) -> Self {
        Node {
            id: Snowflake::new(model.id),
            name: model.name,
            active: model.active,
            invisible: model.invisible,
        }
    }
}

impl From<GameAdminModel> for GameAdmin {
    fn from(model: GameAdminModel) -> Self {
        GameAdmin {
            id: Snowflake::new(model.id),
            handle: model.handle,
        }
    }
}
