//! The four flat-array integration kernels (§4.4.1–4.4.4). Each scans
//! forward from the new item's left boundary and picks an insertion index
//! using the variant's tie-breaking rules; Fugue (§4.4.5) lives in
//! [`crate::fugue`] since it operates on a tree instead.

pub mod rga;
pub mod sync9;
pub mod yjs_classic;
pub mod yjs_mod;
