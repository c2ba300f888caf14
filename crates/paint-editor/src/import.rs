//! Image import tracking.
//!
//! Decoding a selected file is asynchronous on every host. Each selection is
//! issued an `ImportTicket`; only the most recently issued ticket may draw
//! when its decode completes. Completions for superseded tickets are dropped,
//! so overlapping imports resolve to the latest selection rather than to
//! whichever decode happens to finish last.

/// Handle for one in-flight image import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImportTicket(u64);

impl ImportTicket {
    pub fn id(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct ImportTracker {
    issued: u64,
    pending: Option<u64>,
}

impl ImportTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for a new selection, superseding any pending one.
    pub fn begin(&mut self) -> ImportTicket {
        self.issued += 1;
        if let Some(stale) = self.pending.replace(self.issued) {
            log::debug!("image import #{stale} superseded by #{}", self.issued);
        }
        ImportTicket(self.issued)
    }

    /// Consume `ticket` on successful decode. Returns `true` when it is
    /// still the current import and should be drawn.
    pub fn complete(&mut self, ticket: ImportTicket) -> bool {
        if self.pending == Some(ticket.0) {
            self.pending = None;
            true
        } else {
            log::debug!("dropping stale image import #{}", ticket.0);
            false
        }
    }

    /// Forget `ticket` after a failed decode.
    pub fn abandon(&mut self, ticket: ImportTicket) {
        if self.pending == Some(ticket.0) {
            self.pending = None;
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_import_completes() {
        let mut tracker = ImportTracker::new();
        let ticket = tracker.begin();
        assert!(tracker.is_pending());
        assert!(tracker.complete(ticket));
        assert!(!tracker.is_pending());
    }

    #[test]
    fn ticket_completes_once() {
        let mut tracker = ImportTracker::new();
        let ticket = tracker.begin();
        assert!(tracker.complete(ticket));
        assert!(!tracker.complete(ticket));
    }

    #[test]
    fn newer_selection_supersedes_older() {
        let mut tracker = ImportTracker::new();
        let first = tracker.begin();
        let second = tracker.begin();
        // Second decode finishes first, then the stale one arrives
        assert!(tracker.complete(second));
        assert!(!tracker.complete(first));
    }

    #[test]
    fn stale_completion_does_not_cancel_current() {
        let mut tracker = ImportTracker::new();
        let first = tracker.begin();
        let second = tracker.begin();
        assert!(!tracker.complete(first));
        assert!(tracker.is_pending());
        assert!(tracker.complete(second));
    }

    #[test]
    fn abandon_only_clears_matching_ticket() {
        let mut tracker = ImportTracker::new();
        let first = tracker.begin();
        let second = tracker.begin();
        tracker.abandon(first);
        assert!(tracker.is_pending());
        tracker.abandon(second);
        assert!(!tracker.is_pending());
    }
}
