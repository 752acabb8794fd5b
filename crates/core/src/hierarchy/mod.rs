//! Account hierarchies.
//!
//! Account trees come back from the service as recursive JSON. Each node is
//! either fully resolved (a detail node, carrying balances) or a placeholder
//! marking where the service pruned the tree at the requested depth.
//!
//! - `types` - Account classification
//! - `node` - The two node shapes and their accessors
//! - `decode` - The discriminator that picks a shape per JSON element
//! - `walk` - Pre-order traversal over nodes and forests

pub mod decode;
pub mod node;
pub mod types;
pub mod walk;

#[cfg(test)]
mod tests;

pub use decode::{decode_children, decode_node};
pub use node::{AccountNode, DetailNode, PlaceholderNode};
pub use types::AccountType;
pub use walk::{PreOrder, flatten_forests};
