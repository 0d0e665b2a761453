//! Node and game admin database models

use sqlx::FromRow;

/// Database model for nodes table
#[derive(Debug, Clone, FromRow)]
pub struct NodeModel {
    pub id: i64,
    pub name: String,
    pub active: bool,
    pub invisible: bool,
}

/// Database model for game_admins table
#[derive(Debug, Clone, FromRow)]
pub struct GameAdminModel {
    pub id: i64,
    pub handle: String,
}
