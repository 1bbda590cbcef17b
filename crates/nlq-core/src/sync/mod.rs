//! Request sequencing for async operations
//!
//! Every schema discovery or query gets a monotonically increasing token.
//! Only the completion carrying the latest token of its kind is applied, so
//! a slow earlier request can never overwrite a newer answer.

use std::fmt;

/// Kinds of request tracked independently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Schema,
    Query,
}

/// Identifies one issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken {
    kind: RequestKind,
    seq: u64,
}

impl RequestToken {
    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}#{}", self.kind, self.seq)
    }
}

/// Issues tokens and remembers the latest per kind
#[derive(Debug, Default)]
pub struct RequestSequencer {
    next_seq: u64,
    latest_schema: Option<u64>,
    latest_query: Option<u64>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new token, superseding every earlier token of the same kind
    pub fn issue(&mut self, kind: RequestKind) -> RequestToken {
        self.next_seq += 1;
        let seq = self.next_seq;
        *self.slot(kind) = Some(seq);
        RequestToken { kind, seq }
    }

    /// Whether `token` is still the newest of its kind
    pub fn is_current(&self, token: RequestToken) -> bool {
        let latest = match token.kind {
            RequestKind::Schema => self.latest_schema,
            RequestKind::Query => self.latest_query,
        };
        latest == Some(token.seq)
    }

    /// Consume the token if current. Returns false for stale or already settled tokens.
    pub fn settle(&mut self, token: RequestToken) -> bool {
        if !self.is_current(token) {
            return false;
        }
        *self.slot(token.kind) = None;
        true
    }

    fn slot(&mut self, kind: RequestKind) -> &mut Option<u64> {
        match kind {
            RequestKind::Schema => &mut self.latest_schema,
            RequestKind::Query => &mut self.latest_query,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_token_supersedes_older() {
        let mut seq = RequestSequencer::new();
        let first = seq.issue(RequestKind::Query);
        let second = seq.issue(RequestKind::Query);

        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
        assert!(!seq.settle(first));
        assert!(seq.settle(second));
        assert!(!seq.is_current(second));
    }

    #[test]
    fn test_kinds_are_independent() {
        let mut seq = RequestSequencer::new();
        let schema = seq.issue(RequestKind::Schema);
        let query = seq.issue(RequestKind::Query);

        assert!(seq.is_current(schema));
        assert!(seq.is_current(query));
        assert!(seq.settle(schema));
        assert!(seq.is_current(query));
    }

    #[test]
    fn test_token_settles_once() {
        let mut seq = RequestSequencer::new();
        let token = seq.issue(RequestKind::Schema);
        assert!(seq.settle(token));
        assert!(!seq.settle(token));
    }
}
