//! The closed call surface every wrappable object implements.

use crate::error::Error;
use crate::transcript::{Kwargs, MethodPath, Value};

/// A dispatchable set of named methods. The live connection, the
/// replay connection, the Minecraft API and the proxy tree all
/// implement this, which is what lets proxies layer over one another.
pub trait CallTarget {
    /// Invoke `method` with positional and keyword arguments.
    fn call(
        &mut self,
        method: &MethodPath,
        args: &[Value],
        kwargs: &Kwargs,
    ) -> Result<Value, Error>;

    /// Whether `method` is part of this target's surface.
    fn has_method(&self, method: &MethodPath) -> bool;
}

/// Dotted-name convenience over [`CallTarget`]; scripts are written
/// against this.
pub trait CallTargetExt: CallTarget {
    fn invoke(&mut self, name: &str, args: &[Value]) -> Result<Value, Error> {
        let path = MethodPath::parse(name)?;
        self.call(&path, args, &Kwargs::new())
    }
}

impl<T: CallTarget + ?Sized> CallTargetExt for T {}
