//! The tagged variant selecting generator and integration kernel at
//! document construction time (§9: "Use a tagged variant ... do not rely
//! on dynamic dispatch through inheritance").

/// Which of the four flat-array integration kernels a [`crate::document::Document`]
/// uses. Fugue is not a variant of this enum: it uses a different backing
/// representation entirely (see [`crate::fugue`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Reference-compatible Yjs/YATA ordering (§4.4.2).
    YjsClassic,
    /// The modified Yjs tie-break used by this library by default (§4.4.1).
    YjsMod,
    /// RGA / Automerge ordering (§4.4.3).
    Rga,
    /// Sync9's split-marker tree-over-array ordering (§4.4.4).
    Sync9,
}

impl Algorithm {
    /// Whether this variant's local-insert generator and integration
    /// kernel read `seq` (RGA) rather than dual origins (Yjs family).
    pub fn uses_seq_ordering(self) -> bool {
        matches!(self, Algorithm::Rga)
    }

    /// Whether this variant's generator emits the `insertAfter` anchoring
    /// flag (Sync9 only).
    pub fn uses_insert_after(self) -> bool {
        matches!(self, Algorithm::Sync9)
    }
}
