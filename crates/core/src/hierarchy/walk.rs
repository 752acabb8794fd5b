//! Pre-order traversal.

use std::slice;

use super::node::AccountNode;

/// Lazy pre-order walk over one or more forests.
///
/// Visits each node exactly once, a parent before its children and siblings
/// in array order. Holds only a stack of slice iterators, so creating a new
/// walk is cheap and restarts from the beginning.
#[derive(Debug, Clone)]
pub struct PreOrder<'a> {
    stack: Vec<slice::Iter<'a, AccountNode>>,
}

impl<'a> PreOrder<'a> {
    /// Walks a single forest.
    #[must_use]
    pub fn new(roots: &'a [AccountNode]) -> Self {
        Self {
            stack: vec![roots.iter()],
        }
    }

    /// Walks several forests one after another, in the given order.
    pub fn over_forests<I>(forests: I) -> Self
    where
        I: IntoIterator<Item = &'a [AccountNode]>,
    {
        let mut stack: Vec<_> = forests.into_iter().map(<[AccountNode]>::iter).collect();
        stack.reverse();
        Self { stack }
    }
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a AccountNode;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(node) => {
                    if !node.children().is_empty() {
                        self.stack.push(node.children().iter());
                    }
                    return Some(node);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

/// Flattens forests into a single pre-order sequence.
pub fn flatten_forests<'a, I>(forests: I) -> PreOrder<'a>
where
    I: IntoIterator<Item = &'a [AccountNode]>,
{
    PreOrder::over_forests(forests)
}
