//! Stale-response guard. Two rapid fetches for the same scope may resolve in
//! either order; only the outcome carrying the most recently issued token is
//! allowed to touch state.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeqToken(u64);

#[derive(Debug, Default)]
pub struct RequestSeq {
    latest: u64,
}

impl RequestSeq {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> SeqToken {
        self.latest += 1;
        SeqToken(self.latest)
    }

    pub fn is_current(&self, token: SeqToken) -> bool {
        token.0 == self.latest
    }
}
