//! Row occupancy for one track
//!
//! A track is a fixed array of row slots. Each slot remembers the last comment
//! that claimed it and the extent that comment needs for this track's
//! occupancy rule. Rows are never released explicitly; a later comment simply
//! tests whether the remembered occupant still blocks it.

use crate::utils::safe_div;

/// Occupancy rule family a track applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TrackFamily {
    /// Scroll and reverse comments share one horizontal track
    Horizontal,
    /// Stationary comments anchored to the top
    Top,
    /// Stationary comments anchored to the bottom
    Bottom,
}

impl TrackFamily {
    /// Whether occupancy is decided by the horizontal clearance rule
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Horizontal)
    }
}

/// Last comment to claim a row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Occupant {
    /// Start time of the occupying comment
    pub start_time: f64,
    /// Its effective display duration
    pub duration: f64,
    /// Its measured width
    pub width: f64,
    /// Its arrival index
    pub arrival_index: u64,
}

/// The comment being placed, as seen by the occupancy rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Probe {
    /// Start time of the incoming comment
    pub start_time: f64,
    /// Its effective display duration
    pub duration: f64,
    /// Its measured width
    pub width: f64,
    /// Canvas width the comment crosses
    pub canvas_width: f64,
}

impl Probe {
    /// Latest occupant start that still leaves the incoming comment room
    ///
    /// `t - D * (1 - W / (w + W))`; a zero combined width falls back to
    /// `t - D`.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        let share = safe_div(self.canvas_width, self.width + self.canvas_width, 0.0);
        self.start_time - self.duration * (1.0 - share)
    }
}

/// Does `occupant` block a row for `probe` under `family`'s rule
#[must_use]
pub fn blocks(family: TrackFamily, occupant: &Occupant, probe: &Probe) -> bool {
    if !family.is_horizontal() {
        return occupant.start_time + occupant.duration > probe.start_time;
    }

    let combined = occupant.width + probe.canvas_width;
    if combined <= 0.0 {
        // Nothing to clear
        return false;
    }
    let trailing = occupant.width * occupant.duration / combined;
    occupant.start_time > probe.threshold() || occupant.start_time + trailing > probe.start_time
}

/// Row slots for one `(family, pool)` pair
#[derive(Debug, Clone)]
pub struct Track {
    family: TrackFamily,
    slots: Vec<Option<Occupant>>,
}

impl Track {
    /// Create an empty track of `rows` slots
    #[must_use]
    pub fn new(family: TrackFamily, rows: usize) -> Self {
        Self {
            family,
            slots: vec![None; rows],
        }
    }

    /// Rule family of this track
    #[must_use]
    pub const fn family(&self) -> TrackFamily {
        self.family
    }

    /// Number of row slots
    #[must_use]
    pub fn rows(&self) -> usize {
        self.slots.len()
    }

    /// Current occupant of `row`
    #[must_use]
    pub fn occupant(&self, row: usize) -> Option<&Occupant> {
        self.slots.get(row).and_then(Option::as_ref)
    }

    /// Is `row` free for `probe`
    #[must_use]
    pub fn is_free(&self, row: usize, probe: &Probe) -> bool {
        match self.slots.get(row) {
            Some(Some(occupant)) => !blocks(self.family, occupant, probe),
            Some(None) => true,
            None => false,
        }
    }

    /// Length of the free run starting at `row`, counting at most `limit` rows
    #[must_use]
    pub fn free_run(&self, row: usize, limit: usize, probe: &Probe) -> usize {
        (row..self.rows())
            .take(limit)
            .take_while(|&candidate| self.is_free(candidate, probe))
            .count()
    }

    /// First start row of `height` contiguous free rows
    ///
    /// Scans upward and, after a short run, jumps past it instead of retrying
    /// every row inside it.
    #[must_use]
    pub fn find_run(&self, height: usize, probe: &Probe) -> Option<usize> {
        if height == 0 || height > self.rows() {
            return None;
        }
        let last_start = self.rows() - height;
        let mut row = 0;
        while row <= last_start {
            let run = self.free_run(row, height, probe);
            if run >= height {
                return Some(row);
            }
            row += run.max(1);
        }
        None
    }

    /// Candidate start row whose occupant is oldest
    ///
    /// An empty slot counts as oldest; ties go to the lowest row. A comment
    /// taller than the track starts at row 0.
    #[must_use]
    pub fn oldest_start_row(&self, height: usize) -> usize {
        let last_start = self.rows().saturating_sub(height);
        let mut best_row = 0;
        let mut best_start = f64::INFINITY;
        for row in 0..=last_start {
            match self.occupant(row) {
                None => return row,
                Some(occupant) if occupant.start_time < best_start => {
                    best_start = occupant.start_time;
                    best_row = row;
                }
                Some(_) => {}
            }
        }
        best_row
    }

    /// Record `occupant` in rows `[row, row + height)`, clamped to the track
    pub fn claim(&mut self, row: usize, height: usize, occupant: Occupant) {
        let end = row.saturating_add(height).min(self.rows());
        if let Some(slots) = self.slots.get_mut(row..end) {
            slots.fill(Some(occupant));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occupant(start_time: f64, duration: f64, width: f64) -> Occupant {
        Occupant {
            start_time,
            duration,
            width,
            arrival_index: 0,
        }
    }

    fn probe(start_time: f64, width: f64) -> Probe {
        Probe {
            start_time,
            duration: 5.0,
            width,
            canvas_width: 1920.0,
        }
    }

    #[test]
    fn stationary_rule_is_half_open() {
        let occ = occupant(0.0, 5.0, 0.0);
        assert!(blocks(TrackFamily::Top, &occ, &probe(4.9, 0.0)));
        assert!(!blocks(TrackFamily::Top, &occ, &probe(5.0, 0.0)));
    }

    #[test]
    fn horizontal_rule_by_hand() {
        // occupant trailing edge clears at 100 * 5 / 2020 ~= 0.2475s
        let occ = occupant(0.0, 5.0, 100.0);
        assert!(blocks(TrackFamily::Horizontal, &occ, &probe(0.2, 100.0)));
        // threshold for w=100 at t=1: 1 - 5 * (1 - 1920/2020) ~= 0.7525
        assert!(!blocks(TrackFamily::Horizontal, &occ, &probe(1.0, 100.0)));
        // a very wide follower needs the leader to have started much earlier
        assert!(blocks(TrackFamily::Horizontal, &occ, &probe(1.0, 4000.0)));
    }

    #[test]
    fn horizontal_rule_uses_each_sides_duration() {
        // slow leader: trailing edge clears at 100 * 10 / 2020 ~= 0.495s
        let slow = occupant(0.0, 10.0, 100.0);
        let follower = probe(0.4, 100.0);
        assert!(blocks(TrackFamily::Horizontal, &slow, &follower));
        // the same leader at the default 5s clears at ~0.2475s, and the
        // threshold 0.4 - 5 * (100 / 2020) ~= 0.1525 is past its start
        assert!(!blocks(TrackFamily::Horizontal, &occupant(0.0, 5.0, 100.0), &follower));

        // wide follower: threshold 3 - D * (1 - 1920 / 5920)
        let leader = occupant(0.0, 5.0, 100.0);
        let wide = probe(3.0, 4000.0);
        // D = 5: threshold ~= -0.378, the leader started too late
        assert!(blocks(TrackFamily::Horizontal, &leader, &wide));
        // D = 2: threshold ~= 1.649, the leader is clear
        let quick = Probe {
            duration: 2.0,
            ..wide
        };
        assert!(!blocks(TrackFamily::Horizontal, &leader, &quick));
    }

    #[test]
    fn zero_combined_width_is_vacated() {
        let occ = occupant(10.0, 5.0, 0.0);
        let zero = Probe {
            start_time: 10.0,
            duration: 5.0,
            width: 0.0,
            canvas_width: 0.0,
        };
        assert!(!blocks(TrackFamily::Horizontal, &occ, &zero));
        assert!((zero.threshold() - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn skip_ahead_lands_on_first_wide_enough_run() {
        let mut track = Track::new(TrackFamily::Top, 8);
        let busy = occupant(0.0, 100.0, 0.0);
        // rows: 0 busy, 1 free, 2 busy, 3..=5 free, 6 busy, 7 free
        track.claim(0, 1, busy);
        track.claim(2, 1, busy);
        track.claim(6, 1, busy);
        let p = probe(1.0, 0.0);
        assert_eq!(track.free_run(1, 3, &p), 1);
        assert_eq!(track.find_run(3, &p), Some(3));
        assert_eq!(track.find_run(1, &p), Some(1));
        assert_eq!(track.find_run(4, &p), None);
    }

    #[test]
    fn oldest_start_row_prefers_empty_then_oldest() {
        let mut track = Track::new(TrackFamily::Bottom, 3);
        track.claim(0, 1, occupant(2.0, 5.0, 0.0));
        track.claim(1, 1, occupant(1.0, 5.0, 0.0));
        assert_eq!(track.oldest_start_row(1), 2);
        track.claim(2, 1, occupant(1.0, 5.0, 0.0));
        assert_eq!(track.oldest_start_row(1), 1);
        assert_eq!(track.oldest_start_row(10), 0);
    }

    #[test]
    fn claim_is_clamped() {
        let mut track = Track::new(TrackFamily::Top, 2);
        track.claim(1, 5, occupant(0.0, 1.0, 0.0));
        assert!(track.occupant(0).is_none());
        assert!(track.occupant(1).is_some());
        track.claim(7, 1, occupant(0.0, 1.0, 0.0));
        assert_eq!(track.rows(), 2);
    }
}
