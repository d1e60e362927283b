use thiserror::Error;

/// Engine-level error type.
///
/// The scoring pipeline is deliberately hard to fail: low-quality input
/// (empty CV, no detectable sections, unparsable dates) degrades the result
/// instead of erroring, and an unreachable embedding provider is recovered
/// internally via the reweighted lexical/evidence path. The only input the
/// engine rejects outright is a document over the size bound.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{which} document is {len} bytes, over the {max}-byte limit")]
    InputTooLarge {
        which: &'static str,
        len: usize,
        max: usize,
    },
}
