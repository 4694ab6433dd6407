//! Cue lookup by playback time.
//!
//! `lookup` is the reference: a linear scan returning the first cue (in
//! start order) whose inclusive interval contains `t`. `TimeIndex` answers
//! the same question in O(log n) for long transcripts.

use crate::session::SubtitleCue;

/// Find the first cue containing `t`.
///
/// # Arguments
/// * `cues` - Cues sorted ascending by start
/// * `t` - Playback time in seconds
///
/// # Returns
/// Index of the first cue with `start <= t <= end`, or `None`
pub fn lookup(cues: &[SubtitleCue], t: f64) -> Option<usize> {
    if t.is_nan() {
        return None;
    }
    cues.iter().position(|c| c.contains(t))
}

/// Precomputed index over a start-sorted cue list.
///
/// Cues that can contain `t` are exactly the prefix with `start <= t`.
/// Within that prefix the first cue with `end >= t` is also the first
/// position where the running maximum of `end` reaches `t`, and the running
/// maximum is monotone, so both bounds are binary searches.
#[derive(Debug, Clone, Default)]
pub struct TimeIndex {
    starts: Vec<f64>,
    max_end: Vec<f64>,
}

impl TimeIndex {
    pub fn new(cues: &[SubtitleCue]) -> Self {
        let starts = cues.iter().map(|c| c.start).collect();
        let mut max_end = Vec::with_capacity(cues.len());
        let mut running = f64::NEG_INFINITY;
        for cue in cues {
            running = running.max(cue.end);
            max_end.push(running);
        }
        Self { starts, max_end }
    }

    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// Same result as [`lookup`] on the cues this index was built from.
    pub fn lookup(&self, t: f64) -> Option<usize> {
        if t.is_nan() {
            return None;
        }
        let candidates = self.starts.partition_point(|&s| s <= t);
        let first = self.max_end.partition_point(|&e| e < t);
        (first < candidates).then_some(first)
    }
}
