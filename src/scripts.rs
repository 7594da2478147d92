//! Built-in test scenarios.

use crate::error::Error;
use crate::target::{CallTarget, CallTargetExt};
use crate::transcript::Value;

/// The canonical record/replay scenario: one chat line, a player
/// position query, a camera move.
pub fn chat_and_camera(world: &mut dyn CallTarget) -> Result<(), Error> {
    world.invoke("postToChat", &[Value::from("hi")])?;
    let _pos = world.invoke("player.getPos", &[])?;
    world.invoke(
        "camera.setPos",
        &[Value::Int(36), Value::Int(40), Value::Int(14)],
    )?;
    Ok(())
}

/// Minimal live-server exercise.
pub fn smoke(world: &mut dyn CallTarget) -> Result<(), Error> {
    world.invoke("postToChat", &[Value::from("smoke test")])?;
    world.invoke("player.getPos", &[])?;
    Ok(())
}
