//! Content-change notifications and re-initialization coalescing.
//!
//! Hosts report page mutations as [`ContentChange`] values. A burst of them
//! collapses into one scheduled re-initialization, and decoration itself is
//! idempotent, so the script's own insertions settle after one extra pass.

/// One notification from the host's mutation source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContentChange {
    pub added_nodes: usize,
}

impl ContentChange {
    #[must_use]
    pub const fn added(added_nodes: usize) -> Self {
        Self { added_nodes }
    }

    #[must_use]
    pub const fn is_relevant(&self) -> bool {
        self.added_nodes > 0
    }
}

#[derive(Debug, Clone, Default)]
pub struct RefreshGate {
    scheduled: bool,
    runs: u64,
}

impl RefreshGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a change. Returns `true` when the host should schedule a run.
    pub fn request(&mut self, change: ContentChange) -> bool {
        if !change.is_relevant() || self.scheduled {
            return false;
        }
        self.scheduled = true;
        true
    }

    /// Called when the scheduled run starts; later changes schedule again.
    pub fn begin_run(&mut self) {
        self.scheduled = false;
        self.runs += 1;
    }

    #[must_use]
    pub const fn is_scheduled(&self) -> bool {
        self.scheduled
    }

    #[must_use]
    pub const fn runs(&self) -> u64 {
        self.runs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bursts_collapse_into_one_run() {
        let mut gate = RefreshGate::new();
        assert!(gate.request(ContentChange::added(3)));
        assert!(!gate.request(ContentChange::added(1)));
        assert!(gate.is_scheduled());
        gate.begin_run();
        assert!(gate.request(ContentChange::added(1)));
        assert_eq!(gate.runs(), 1);
    }

    #[test]
    fn removals_alone_are_ignored() {
        let mut gate = RefreshGate::new();
        assert!(!gate.request(ContentChange::added(0)));
        assert!(!gate.is_scheduled());
    }
}
