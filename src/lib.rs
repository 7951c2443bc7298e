//! list-crdts - reference implementations of the insert-position
//! integration algorithms behind Yjs, Automerge/RGA, Sync9, and Fugue.
//!
//! # Quick Start
//!
//! ```
//! use list_crdts::{Algorithm, Document};
//! use list_crdts::id::AgentId;
//!
//! let alice: AgentId = "alice".into();
//! let bob: AgentId = "bob".into();
//!
//! let mut a = Document::new(Algorithm::YjsMod);
//! a.local_insert(&alice, 0, 'a').unwrap();
//!
//! let mut b = Document::new(Algorithm::YjsMod);
//! b.local_insert(&bob, 0, 'b').unwrap();
//!
//! list_crdts::merge::merge_into(&mut a, &b).unwrap();
//! assert_eq!(a.get_array(), vec![&'a', &'b']);
//! ```

pub mod algorithm;
pub mod document;
pub mod error;
pub mod fugue;
pub mod generator;
pub mod id;
pub mod item;
pub mod kernel;
pub mod list_crdt;
pub mod merge;
pub mod oracle;
pub mod version;

pub use algorithm::Algorithm;
pub use document::Document;
pub use error::Error;
pub use item::{Item, ItemRecord};
pub use list_crdt::ListCrdt;
