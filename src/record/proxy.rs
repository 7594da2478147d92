use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::error::Error;
use crate::record::logger::{BoundMethod, CallLogger};
use crate::target::CallTarget;
use crate::transcript::{Kwargs, MethodPath, Value};

/// One node of the mirrored dotted-name structure: an intermediate
/// namespace, or a logged leaf method.
enum ProxyNode {
    Group(BTreeMap<String, ProxyNode>),
    Method(BoundMethod),
}

/// A structurally mirrored stand-in for a wrapped target: same dotted
/// shape as the configured names, every leaf a logged wrapper
/// delegating to the original. Group nodes are freshly created, never
/// borrowed from the target.
pub struct ProxyTree {
    key: String,
    root: BTreeMap<String, ProxyNode>,
}

impl ProxyTree {
    /// Build a logged proxy over `target` for the configured `names`.
    ///
    /// Every name is validated against the target up front; an unknown
    /// name is a fatal configuration error and no proxy is returned.
    /// The tree shape depends only on `names`.
    pub fn wrap(
        logger: &CallLogger,
        target: Rc<RefCell<dyn CallTarget>>,
        key: &str,
        names: &[&str],
    ) -> Result<Self, Error> {
        let mut paths = Vec::with_capacity(names.len());
        for name in names {
            let path = MethodPath::parse(name)?;
            if !target.borrow().has_method(&path) {
                return Err(Error::UnknownMethod {
                    target: key.to_string(),
                    name: (*name).to_string(),
                });
            }
            paths.push(path);
        }

        let mut root = BTreeMap::new();
        for path in paths {
            let bound: BoundMethod = {
                let target = Rc::clone(&target);
                let path = path.clone();
                Box::new(move |args: &[Value], kwargs: &Kwargs| {
                    target.borrow_mut().call(&path, args, kwargs)
                })
            };
            let wrapped = logger.wrap_method(key, &path.dotted(), bound);
            Self::insert(&mut root, path.segments(), wrapped);
        }

        Ok(ProxyTree {
            key: key.to_string(),
            root,
        })
    }

    fn insert(children: &mut BTreeMap<String, ProxyNode>, segments: &[String], method: BoundMethod) {
        // segments is never empty: MethodPath rejects empty paths
        if segments.len() == 1 {
            children.insert(segments[0].clone(), ProxyNode::Method(method));
            return;
        }
        let node = children
            .entry(segments[0].clone())
            .or_insert_with(|| ProxyNode::Group(BTreeMap::new()));
        if !matches!(node, ProxyNode::Group(_)) {
            // a name that is both a leaf and a prefix of another name;
            // the group wins
            *node = ProxyNode::Group(BTreeMap::new());
        }
        let ProxyNode::Group(inner) = node else {
            unreachable!()
        };
        Self::insert(inner, &segments[1..], method);
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Leaf method names in dotted form, sorted; exposes the tree
    /// shape for inspection.
    pub fn leaf_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        Self::collect(&self.root, "", &mut names);
        names
    }

    fn collect(children: &BTreeMap<String, ProxyNode>, prefix: &str, out: &mut Vec<String>) {
        for (segment, node) in children {
            let name = if prefix.is_empty() {
                segment.clone()
            } else {
                format!("{}.{}", prefix, segment)
            };
            match node {
                ProxyNode::Method(_) => out.push(name),
                ProxyNode::Group(inner) => Self::collect(inner, &name, out),
            }
        }
    }

    fn lookup(&mut self, method: &MethodPath) -> Option<&mut BoundMethod> {
        let (leaf, groups) = method.segments().split_last()?;
        let mut children = &mut self.root;
        for segment in groups {
            match children.get_mut(segment) {
                Some(ProxyNode::Group(inner)) => children = inner,
                _ => return None,
            }
        }
        match children.get_mut(leaf) {
            Some(ProxyNode::Method(wrapped)) => Some(wrapped),
            _ => None,
        }
    }

    fn contains(&self, method: &MethodPath) -> bool {
        let Some((leaf, groups)) = method.segments().split_last() else {
            return false;
        };
        let mut children = &self.root;
        for segment in groups {
            match children.get(segment) {
                Some(ProxyNode::Group(inner)) => children = inner,
                _ => return false,
            }
        }
        matches!(children.get(leaf), Some(ProxyNode::Method(_)))
    }
}

impl CallTarget for ProxyTree {
    fn call(
        &mut self,
        method: &MethodPath,
        args: &[Value],
        kwargs: &Kwargs,
    ) -> Result<Value, Error> {
        let key = self.key.clone();
        match self.lookup(method) {
            Some(wrapped) => wrapped(args, kwargs),
            None => Err(Error::UnknownMethod {
                target: key,
                name: method.dotted(),
            }),
        }
    }

    fn has_method(&self, method: &MethodPath) -> bool {
        self.contains(method)
    }
}
