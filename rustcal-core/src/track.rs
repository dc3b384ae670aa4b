//! Per-track marker store: the "already recorded" latch.

use std::collections::HashMap;

/// Event-scoped per-track state, keyed by simulation track id.
///
/// The digitizer reads the history flag to decide whether a track still
/// needs a truth point and sets it when one is recorded; the
/// reconstruction track id travels alongside. Passed explicitly into
/// step processing rather than threaded through ambient state.
pub trait TrackMarkers {
    /// Returns the history flag (0 = nothing recorded yet).
    fn history(&self, track: i32) -> u32;

    /// Returns the reconstruction track id (0 if unset).
    fn track_id(&self, track: i32) -> i32;

    /// Sets the history flag and reconstruction track id.
    fn set(&mut self, track: i32, history: u32, track_id: i32);
}

/// `HashMap`-backed marker store for one event.
#[derive(Debug, Clone, Default)]
pub struct EventTrackMarkers {
    entries: HashMap<i32, (u32, i32)>,
}

impl EventTrackMarkers {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all markers for the next event.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl TrackMarkers for EventTrackMarkers {
    fn history(&self, track: i32) -> u32 {
        self.entries.get(&track).map_or(0, |&(history, _)| history)
    }

    fn track_id(&self, track: i32) -> i32 {
        self.entries.get(&track).map_or(0, |&(_, id)| id)
    }

    fn set(&mut self, track: i32, history: u32, track_id: i32) {
        self.entries.insert(track, (history, track_id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_track_reads_zero() {
        let markers = EventTrackMarkers::new();
        assert_eq!(markers.history(5), 0);
        assert_eq!(markers.track_id(5), 0);
    }

    #[test]
    fn test_set_and_clear() {
        let mut markers = EventTrackMarkers::new();
        markers.set(5, 2, 5);
        assert_eq!(markers.history(5), 2);
        assert_eq!(markers.track_id(5), 5);
        markers.clear();
        assert_eq!(markers.history(5), 0);
    }
}
