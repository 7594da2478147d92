//! Minimal Minecraft Pi client API over a pluggable transport.

use crate::error::Error;
use crate::minecraft::names::MINECRAFT_NAMES;
use crate::target::CallTarget;
use crate::transcript::{Kwargs, MethodPath, Value};

/// Client API for the Minecraft Pi protocol. Each operation formats a
/// wire command and issues it through the transport **by method path**,
/// so a logged transport records the nested call.
pub struct Minecraft {
    conn: Box<dyn CallTarget>,
}

impl Minecraft {
    pub fn new(conn: Box<dyn CallTarget>) -> Self {
        Minecraft { conn }
    }

    /// Fire-and-forget command.
    fn send(&mut self, command: String) -> Result<Value, Error> {
        let path = MethodPath::parse("send")?;
        self.conn.call(&path, &[Value::Str(command)], &Kwargs::new())?;
        Ok(Value::Unit)
    }

    /// Command with a one-line reply.
    fn send_receive(&mut self, command: String) -> Result<(String, String), Error> {
        let path = MethodPath::parse("sendReceive")?;
        let reply = self
            .conn
            .call(&path, &[Value::Str(command.clone())], &Kwargs::new())?;
        match reply {
            Value::Str(reply) => Ok((command, reply)),
            other => Err(Error::Protocol {
                command,
                reply: other.to_string(),
            }),
        }
    }
}

/// Render one argument the way the wire expects it.
fn wire_arg(value: &Value) -> String {
    match value {
        Value::Unit => String::new(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) => "0".to_string(),
        Value::Int(i) => i.to_string(),
        Value::Float(x) => x.to_string(),
        Value::Str(s) => s.clone(),
        Value::Seq(items) => items
            .iter()
            .map(wire_arg)
            .collect::<Vec<_>>()
            .join(","),
    }
}

fn command(wire_name: &str, args: &[Value]) -> String {
    let rendered: Vec<String> = args.iter().map(wire_arg).collect();
    format!("{}({})", wire_name, rendered.join(","))
}

fn protocol_error(command: &str, reply: &str) -> Error {
    Error::Protocol {
        command: command.to_string(),
        reply: reply.to_string(),
    }
}

fn parse_int(command: &str, reply: &str) -> Result<Value, Error> {
    reply
        .trim()
        .parse::<i64>()
        .map(Value::Int)
        .map_err(|_| protocol_error(command, reply))
}

/// Comma-separated floats, e.g. a position reply "12.3,9.0,-4.5".
fn parse_floats(command: &str, reply: &str) -> Result<Value, Error> {
    let mut items = Vec::new();
    for part in reply.split(',') {
        let x: f64 = part
            .trim()
            .parse()
            .map_err(|_| protocol_error(command, reply))?;
        items.push(Value::Float(x));
    }
    Ok(Value::Seq(items))
}

/// Separator-delimited integers; empty items are skipped, so an empty
/// reply parses as an empty sequence.
fn parse_ints(command: &str, reply: &str, separator: char) -> Result<Value, Error> {
    let mut items = Vec::new();
    for part in reply.split(separator) {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let i: i64 = part.parse().map_err(|_| protocol_error(command, reply))?;
        items.push(Value::Int(i));
    }
    Ok(Value::Seq(items))
}

/// Block-hit reply: "x,y,z,face,entityId" groups separated by '|'.
fn parse_hits(command: &str, reply: &str) -> Result<Value, Error> {
    let mut hits = Vec::new();
    for group in reply.split('|') {
        if group.is_empty() {
            continue;
        }
        hits.push(parse_ints(command, group, ',')?);
    }
    Ok(Value::Seq(hits))
}

impl CallTarget for Minecraft {
    fn call(
        &mut self,
        method: &MethodPath,
        args: &[Value],
        _kwargs: &Kwargs,
    ) -> Result<Value, Error> {
        let name = method.dotted();
        match name.as_str() {
            "getBlock" => {
                let (cmd, reply) = self.send_receive(command("world.getBlock", args))?;
                parse_int(&cmd, &reply)
            }
            "getBlockWithData" => {
                let (cmd, reply) = self.send_receive(command("world.getBlockWithData", args))?;
                parse_ints(&cmd, &reply, ',')
            }
            "getBlocks" => {
                let (cmd, reply) = self.send_receive(command("world.getBlocks", args))?;
                parse_ints(&cmd, &reply, ',')
            }
            "setBlock" => self.send(command("world.setBlock", args)),
            "setBlocks" => self.send(command("world.setBlocks", args)),
            "getHeight" => {
                let (cmd, reply) = self.send_receive(command("world.getHeight", args))?;
                parse_int(&cmd, &reply)
            }
            "getPlayerEntityIds" => {
                let (cmd, reply) = self.send_receive(command("world.getPlayerIds", args))?;
                parse_ints(&cmd, &reply, '|')
            }
            "saveCheckpoint" => self.send(command("world.checkpoint.save", args)),
            "restoreCheckpoint" => self.send(command("world.checkpoint.restore", args)),
            "postToChat" => self.send(command("chat.post", args)),
            "setting" => self.send(command("world.setting", args)),
            "camera.setNormal" => self.send(command("camera.mode.setNormal", args)),
            "camera.setFixed" => self.send(command("camera.mode.setFixed", args)),
            "camera.setFollow" => self.send(command("camera.mode.setFollow", args)),
            "camera.setPos" => self.send(command("camera.setPos", args)),
            "entity.getPos" => {
                let (cmd, reply) = self.send_receive(command("entity.getPos", args))?;
                parse_floats(&cmd, &reply)
            }
            "entity.setPos" => self.send(command("entity.setPos", args)),
            "entity.getTilePos" => {
                let (cmd, reply) = self.send_receive(command("entity.getTile", args))?;
                parse_ints(&cmd, &reply, ',')
            }
            "entity.setTilePos" => self.send(command("entity.setTile", args)),
            "entity.setting" => self.send(command("entity.setting", args)),
            "events.clearAll" => self.send(command("events.clear", args)),
            "events.pollBlockHits" => {
                let (cmd, reply) = self.send_receive(command("events.block.hits", args))?;
                parse_hits(&cmd, &reply)
            }
            "player.getPos" => {
                let (cmd, reply) = self.send_receive(command("player.getPos", args))?;
                parse_floats(&cmd, &reply)
            }
            "player.setPos" => self.send(command("player.setPos", args)),
            "player.getTilePos" => {
                let (cmd, reply) = self.send_receive(command("player.getTile", args))?;
                parse_ints(&cmd, &reply, ',')
            }
            "player.setTilePos" => self.send(command("player.setTile", args)),
            "player.setting" => self.send(command("player.setting", args)),
            _ => Err(Error::UnknownMethod {
                target: "minecraft".to_string(),
                name,
            }),
        }
    }

    fn has_method(&self, method: &MethodPath) -> bool {
        MINECRAFT_NAMES.contains(&method.dotted().as_str())
    }
}
