//! Which tree, if any, a request is about

use std::convert::Infallible;
use std::sync::Arc;

use tracing::debug;

use crate::error::TreeError;
use crate::service::TreeService;
use crate::tree::Tree;

/// Lazily resolves the current tree.
///
/// Resolution may be costly or fail, so callers only invoke it when they
/// actually need the tree. Errors are the implementor's own and are passed
/// through untouched.
pub trait TreeContext {
    type Error;

    fn current_tree(&self) -> Result<Option<Arc<Tree>>, Self::Error>;
}

/// The tree named by a request parameter, looked up in a [`TreeService`]
#[derive(Debug, Clone, Copy)]
pub struct RequestedTree<'a> {
    service: &'a TreeService,
    name: Option<&'a str>,
}

impl<'a> RequestedTree<'a> {
    pub fn new(service: &'a TreeService, name: Option<&'a str>) -> Self {
        Self { service, name }
    }
}

impl TreeContext for RequestedTree<'_> {
    type Error = TreeError;

    /// No name (or an empty one) means no tree; an unknown name is an error.
    fn current_tree(&self) -> Result<Option<Arc<Tree>>, TreeError> {
        match self.name.filter(|name| !name.is_empty()) {
            None => Ok(None),
            Some(name) => {
                debug!("Resolving current tree {}", name);
                self.service.find(name).map(Some)
            }
        }
    }
}

/// An already-known tree (or none)
impl TreeContext for Option<Arc<Tree>> {
    type Error = Infallible;

    fn current_tree(&self) -> Result<Option<Arc<Tree>>, Infallible> {
        Ok(self.clone())
    }
}
