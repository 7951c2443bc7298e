//! Typed errors for every fatal condition in the integration and merge
//! routines. Nothing in this crate panics on bad input; callers decide
//! whether to unwrap, log, or recover.

use crate::id::{AgentId, Id};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("causal gap: {agent} seq {got} is not version+1 ({expected})")]
    CausalGap { agent: AgentId, expected: u64, got: u64 },

    #[error("origin {0:?} referenced but not present in version")]
    UnknownOrigin(Id),

    #[error("id {0:?} not found")]
    NotFound(Id),

    #[error("position {pos} out of range (visible length {len})")]
    PositionOutOfRange { pos: u64, len: u64 },

    #[error("merge pass placed zero items; {remaining} item(s) still pending")]
    MergeStall { remaining: usize },

    #[error("delete integration across merged histories is not supported")]
    UnsupportedOp,
}
