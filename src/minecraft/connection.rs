use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::net::TcpStream;

use crate::error::Error;
use crate::minecraft::names::CONNECTION_NAMES;
use crate::target::CallTarget;
use crate::transcript::{Kwargs, MethodPath, Value};

pub const DEFAULT_PORT: u16 = 4711;

/// Live transport: blocking line-oriented TCP to a Minecraft server.
pub struct Connection {
    stream: TcpStream,
    reader: BufReader<TcpStream>,
}

impl Connection {
    pub fn connect(host: &str, port: u16) -> Result<Self, Error> {
        let stream = TcpStream::connect((host, port))?;
        let reader = BufReader::new(stream.try_clone()?);
        tracing::debug!("connected to {}:{}", host, port);
        Ok(Connection { stream, reader })
    }

    fn send(&mut self, line: &str) -> Result<(), Error> {
        self.stream.write_all(line.as_bytes())?;
        self.stream.write_all(b"\n")?;
        self.stream.flush()?;
        Ok(())
    }

    fn receive(&mut self) -> Result<String, Error> {
        let mut line = String::new();
        self.reader.read_line(&mut line)?;
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(line)
    }

    /// Read and discard any replies the server already queued.
    fn drain(&mut self) -> Result<(), Error> {
        self.stream.set_nonblocking(true)?;
        let outcome = self.drain_pending();
        self.stream.set_nonblocking(false)?;
        outcome
    }

    fn drain_pending(&mut self) -> Result<(), Error> {
        loop {
            let mut line = String::new();
            match self.reader.read_line(&mut line) {
                Ok(0) => return Ok(()),
                Ok(_) => tracing::debug!("drained {:?}", line.trim_end()),
                Err(e) if e.kind() == ErrorKind::WouldBlock => return Ok(()),
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn line_arg<'a>(method: &MethodPath, args: &'a [Value]) -> Result<&'a str, Error> {
        match args {
            [Value::Str(line)] => Ok(line),
            _ => Err(Error::BadArguments {
                method: method.dotted(),
                detail: "expected a single string".to_string(),
            }),
        }
    }
}

impl CallTarget for Connection {
    fn call(
        &mut self,
        method: &MethodPath,
        args: &[Value],
        _kwargs: &Kwargs,
    ) -> Result<Value, Error> {
        match method.dotted().as_str() {
            "drain" => {
                self.drain()?;
                Ok(Value::Unit)
            }
            "send" => {
                let line = Self::line_arg(method, args)?.to_string();
                self.send(&line)?;
                Ok(Value::Unit)
            }
            "receive" => Ok(Value::Str(self.receive()?)),
            "sendReceive" => {
                let line = Self::line_arg(method, args)?.to_string();
                self.send(&line)?;
                Ok(Value::Str(self.receive()?))
            }
            other => Err(Error::UnknownMethod {
                target: "connection".to_string(),
                name: other.to_string(),
            }),
        }
    }

    fn has_method(&self, method: &MethodPath) -> bool {
        method.segments().len() == 1 && CONNECTION_NAMES.contains(&method.leaf())
    }
}
