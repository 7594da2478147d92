use std::cell::RefCell;
use std::rc::Rc;

use crate::error::Error;
use crate::minecraft::api::Minecraft;
use crate::minecraft::names::{CONNECTION_NAMES, MINECRAFT_NAMES};
use crate::record::logger::CallLogger;
use crate::record::proxy::ProxyTree;
use crate::target::CallTarget;
use crate::transcript::Transcript;

/// A fixed, deterministic sequence of domain calls.
pub type Script = fn(&mut dyn CallTarget) -> Result<(), Error>;

/// Run `script` against `conn` through logged proxies, appending every
/// connection-level and world-level call to `log`.
///
/// The connection is wrapped under key "conn", the Minecraft API is
/// layered over that proxy and wrapped under key "world"; both levels
/// share the same transcript, so nested calls interleave in call
/// order.
pub fn record(
    log: &Transcript,
    script: Script,
    conn: Rc<RefCell<dyn CallTarget>>,
) -> Result<(), Error> {
    let logger = CallLogger::new(log.clone());

    let conn_proxy = ProxyTree::wrap(&logger, conn, "conn", CONNECTION_NAMES)?;
    let world = Minecraft::new(Box::new(conn_proxy));
    let world: Rc<RefCell<dyn CallTarget>> = Rc::new(RefCell::new(world));
    let mut world_proxy = ProxyTree::wrap(&logger, world, "world", MINECRAFT_NAMES)?;

    script(&mut world_proxy)
}
