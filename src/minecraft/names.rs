//! The method surfaces under test, as configuration data. The proxy
//! builder knows nothing about these; callers pass whichever list
//! matches the object being wrapped.

/// Transport-level operations.
pub const CONNECTION_NAMES: &[&str] = &["drain", "send", "receive", "sendReceive"];

/// World-level operations, including the dotted namespaces.
pub const MINECRAFT_NAMES: &[&str] = &[
    // world
    "getBlock",
    "getBlockWithData",
    "getBlocks",
    "setBlock",
    "setBlocks",
    "getHeight",
    "getPlayerEntityIds",
    "saveCheckpoint",
    "restoreCheckpoint",
    "postToChat",
    "setting",
    // camera
    "camera.setNormal",
    "camera.setFixed",
    "camera.setFollow",
    "camera.setPos",
    // entity
    "entity.getPos",
    "entity.setPos",
    "entity.getTilePos",
    "entity.setTilePos",
    "entity.setting",
    // events
    "events.clearAll",
    "events.pollBlockHits",
    // player
    "player.getPos",
    "player.setPos",
    "player.getTilePos",
    "player.setTilePos",
    "player.setting",
];
