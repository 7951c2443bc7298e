//! Fugue (§4.4.5): a binary-tree-of-siblings backend, distinct from the
//! flat-array representation the other three algorithms share.

mod node;
mod save_load;
mod tree;

pub use save_load::{load, save};
pub use tree::FugueDoc;
