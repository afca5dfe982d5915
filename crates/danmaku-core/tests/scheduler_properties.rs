//! Property-based tests for the row scheduler
//!
//! Generates time-ordered comment streams of mixed heights, widths and
//! display durations on a small canvas, so that rows are contended, and
//! checks the collision and determinism guarantees against the occupancy
//! rules directly.

use danmaku_core::{
    comment::{Comment, Footprint, MotionClass},
    scheduler::{track, Placement, Probe, Scheduler, SchedulerOptions, TrackFamily},
};
use proptest::prelude::*;

const CANVAS_WIDTH: f64 = 1920.0;
const DURATION: f64 = 5.0;

fn options(rows: usize, reduced: bool) -> SchedulerOptions {
    SchedulerOptions {
        canvas_width: CANVAS_WIDTH,
        canvas_rows: rows,
        marquee_duration: DURATION,
        still_duration: DURATION,
        reduced,
        ..SchedulerOptions::default()
    }
}

fn arb_motion() -> impl Strategy<Value = MotionClass> {
    prop_oneof![
        Just(MotionClass::Scroll),
        Just(MotionClass::Reverse),
        Just(MotionClass::Top),
        Just(MotionClass::Bottom),
    ]
}

/// Per-comment duration override, absent for about half the comments
fn arb_duration() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![Just(None), (0.5f64..12.0).prop_map(Some)]
}

/// Time-ordered comments with strictly increasing arrival indices
fn arb_stream() -> impl Strategy<Value = Vec<Comment>> {
    prop::collection::vec(
        (
            0.0f64..2.0,
            arb_motion(),
            1usize..4,
            0.0f64..3000.0,
            arb_duration(),
        ),
        1..60,
    )
    .prop_map(|specs| {
        let mut t = 0.0;
        specs
            .into_iter()
            .enumerate()
            .map(|(index, (gap, motion, height, width, duration))| {
                t += gap;
                let comment = Comment::new(t, index as u64, "x", motion)
                    .with_footprint(Footprint::new(height, width));
                match duration {
                    Some(seconds) => comment.with_duration(seconds),
                    None => comment,
                }
            })
            .collect()
    })
}

fn duration_of(comment: &Comment) -> f64 {
    comment.display_duration(DURATION, DURATION)
}

fn rows_overlap(a: (usize, usize), b: (usize, usize)) -> bool {
    a.0 < b.0 + b.1 && b.0 < a.0 + a.1
}

fn occupant_of(comment: &Comment) -> track::Occupant {
    track::Occupant {
        start_time: comment.start_time,
        duration: duration_of(comment),
        width: comment.footprint.measured_width,
        arrival_index: comment.arrival_index,
    }
}

fn probe_of(comment: &Comment) -> Probe {
    Probe {
        start_time: comment.start_time,
        duration: duration_of(comment),
        width: comment.footprint.measured_width,
        canvas_width: CANVAS_WIDTH,
    }
}

proptest! {
    #[test]
    fn placed_comments_never_collide(stream in arb_stream(), rows in 3usize..8) {
        let mut scheduler = Scheduler::new(options(rows, true));
        let placed: Vec<(&Comment, usize)> = stream
            .iter()
            .filter_map(|comment| match scheduler.place(comment) {
                Placement::Placed(row) => Some((comment, row)),
                _ => None,
            })
            .collect();

        for (i, &(earlier, earlier_row)) in placed.iter().enumerate() {
            for &(later, later_row) in &placed[i + 1..] {
                let family = earlier.motion.track_family();
                if family != later.motion.track_family() {
                    continue;
                }
                let earlier_rows = (earlier_row, earlier.footprint.height_rows);
                let later_rows = (later_row, later.footprint.height_rows);
                if !rows_overlap(earlier_rows, later_rows) {
                    continue;
                }
                let family = family.unwrap_or(TrackFamily::Top);
                prop_assert!(
                    !track::blocks(family, &occupant_of(earlier), &probe_of(later)),
                    "comment {} collides with {} on rows {:?}/{:?}",
                    later.arrival_index,
                    earlier.arrival_index,
                    earlier_rows,
                    later_rows
                );
            }
        }
    }

    #[test]
    fn placement_is_deterministic(stream in arb_stream(), rows in 1usize..8, reduced in any::<bool>()) {
        let run = || {
            let mut scheduler = Scheduler::new(options(rows, reduced));
            stream.iter().map(|c| scheduler.place(c)).collect::<Vec<_>>()
        };
        prop_assert_eq!(run(), run());
    }

    #[test]
    fn placements_stay_inside_canvas(stream in arb_stream(), rows in 1usize..8, reduced in any::<bool>()) {
        let mut scheduler = Scheduler::new(options(rows, reduced));
        for comment in &stream {
            match scheduler.place(comment) {
                Placement::Placed(row) => {
                    prop_assert!(row + comment.footprint.height_rows <= rows);
                }
                Placement::Forced(row) => {
                    prop_assert!(!reduced);
                    prop_assert!(row < rows);
                }
                Placement::Dropped => prop_assert!(reduced),
                Placement::Positioned => prop_assert!(false, "no positioned comments generated"),
            }
        }
    }
}
