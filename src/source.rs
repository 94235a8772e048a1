//! Source locations for nodes produced by the (external) front-end. The
//! middle-end only ever carries spans through to diagnostics; it never
//! resolves them back to file contents itself.

/// A half-open byte range into the source file a node was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Span for nodes synthesized by the compiler itself rather than parsed
    /// from source.
    pub const SYNTHESIZED: Self = Self { start: 0, end: 0 };
}

impl core::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
