//! Per-widget viewport visibility tracking for lazy rendering.
//!
//! The tracker keeps the set of widgets currently scrolled into view so
//! expensive widget bodies can defer rendering until first observed. The
//! set is owned entirely client-side, never persisted, and rebuilt from
//! scratch each session. The platform-specific viewport observer (a
//! browser intersection observer, a test driver) sits in front of this
//! and feeds boundary crossings through [`VisibilityTracker::record`].

use std::collections::{HashMap, HashSet};

/// Handle for one observed widget element.
///
/// Returned by [`VisibilityTracker::observe`]; pass it back to
/// [`VisibilityTracker::unobserve`] on widget unmount so observations for
/// destroyed views are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Subscription {
    id: u64,
}

/// Tracks which widgets are currently within the viewport.
#[derive(Debug, Default)]
pub struct VisibilityTracker {
    next_id: u64,
    /// Active subscriptions, keyed by handle id.
    observed: HashMap<u64, String>,
    /// Widget ids currently in view.
    visible: HashSet<String>,
}

impl VisibilityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin observing a widget's element.
    ///
    /// The widget reports as not visible until the first recorded
    /// observation, so off-screen widgets never flash their real content
    /// before being measured.
    pub fn observe(&mut self, widget_id: &str) -> Subscription {
        let id = self.next_id;
        self.next_id += 1;
        self.observed.insert(id, widget_id.to_string());
        Subscription { id }
    }

    /// Record a viewport boundary crossing for a subscription.
    ///
    /// Fires repeatedly in both directions: widgets scrolled out and back
    /// in re-hide and re-show. Observations against a subscription that
    /// was already unobserved are dropped (the view is gone).
    pub fn record(&mut self, subscription: &Subscription, in_view: bool) {
        let Some(widget_id) = self.observed.get(&subscription.id) else {
            return;
        };
        if in_view {
            self.visible.insert(widget_id.clone());
        } else {
            self.visible.remove(widget_id);
        }
    }

    /// Stop observing; called on widget unmount.
    ///
    /// Also clears the widget's visibility so an unmounted widget does not
    /// read as in-view.
    pub fn unobserve(&mut self, subscription: Subscription) {
        if let Some(widget_id) = self.observed.remove(&subscription.id) {
            self.visible.remove(&widget_id);
        }
    }

    /// Whether the widget is currently within the viewport.
    ///
    /// Defaults to `false` until the first observation fires.
    pub fn is_visible(&self, widget_id: &str) -> bool {
        self.visible.contains(widget_id)
    }

    /// Number of active subscriptions; used to assert observers are not
    /// leaked across unmounts.
    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widgets_default_to_not_visible() {
        let mut tracker = VisibilityTracker::new();
        let _sub = tracker.observe("weather");
        assert!(!tracker.is_visible("weather"));
        assert!(!tracker.is_visible("never-observed"));
    }

    #[test]
    fn enter_exit_enter_toggles_in_order() {
        let mut tracker = VisibilityTracker::new();
        let sub = tracker.observe("weather");

        tracker.record(&sub, true);
        assert!(tracker.is_visible("weather"));

        tracker.record(&sub, false);
        assert!(!tracker.is_visible("weather"));

        tracker.record(&sub, true);
        assert!(tracker.is_visible("weather"));
    }

    #[test]
    fn widgets_toggle_independently() {
        let mut tracker = VisibilityTracker::new();
        let weather = tracker.observe("weather");
        let news = tracker.observe("news");

        tracker.record(&weather, true);
        tracker.record(&news, false);

        assert!(tracker.is_visible("weather"));
        assert!(!tracker.is_visible("news"));
    }

    #[test]
    fn unobserve_detaches_and_clears_visibility() {
        let mut tracker = VisibilityTracker::new();
        let sub = tracker.observe("weather");
        tracker.record(&sub, true);

        tracker.unobserve(sub.clone());

        assert!(!tracker.is_visible("weather"));
        assert_eq!(tracker.observed_count(), 0);

        // A stale observation after unmount must not resurrect the widget.
        tracker.record(&sub, true);
        assert!(!tracker.is_visible("weather"));
    }

    #[test]
    fn remounting_starts_hidden_again() {
        let mut tracker = VisibilityTracker::new();
        let first = tracker.observe("weather");
        tracker.record(&first, true);
        tracker.unobserve(first);

        let _second = tracker.observe("weather");
        assert!(!tracker.is_visible("weather"), "Rebuilt from scratch on mount");
    }
}
