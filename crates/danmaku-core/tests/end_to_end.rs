//! End-to-end conversion scenarios
//!
//! Drives the full pipeline from raw records to placements or ASS text and
//! checks results that can be recomputed by hand from the occupancy rules.

use danmaku_core::{
    comment::{Channel, MotionClass, RawComment},
    config::{LayoutConfig, RowUnit},
    emit::{PlacedComment, Slot},
    scheduler::{Placement, Scheduler, SchedulerOptions},
    style::{Position, SizeClass},
    Comment, Converter, Footprint,
};
use pretty_assertions::assert_eq;

/// A 1920 px wide canvas holding exactly one 25 px text line
fn single_line_canvas(reduced: bool) -> LayoutConfig {
    LayoutConfig::new(1920, 25)
        .with_row_unit(RowUnit::Line)
        .with_durations(5.0, 5.0)
        .with_reduced(reduced)
}

fn convert(config: LayoutConfig, raw: &[RawComment]) -> Vec<PlacedComment> {
    let mut out = Vec::new();
    Converter::new(config)
        .expect("valid layout")
        .convert(raw, &mut out)
        .expect("conversion succeeds");
    out
}

fn three_scrolls() -> Vec<RawComment> {
    vec![
        // 4 chars at size 25: width 100
        RawComment::new(0.0, 0, "abcd"),
        RawComment::new(1.0, 1, "efgh"),
        // 80 chars: width 2000
        RawComment::new(2.0, 2, "w".repeat(80)),
    ]
}

#[test]
fn three_scrolls_on_one_row_reduced() {
    // second: threshold = 1 - 5 * (1 - 1920 / 2020) ~= 0.75 >= 0 and the
    // leader's tail clears at 100 * 5 / 2020 ~= 0.25 <= 1, so it fits.
    // third: threshold = 2 - 5 * (1 - 1920 / 3920) ~= -0.55 < 1, blocked.
    let out = convert(single_line_canvas(true), &three_scrolls());
    let rows: Vec<Option<usize>> = out.iter().map(PlacedComment::row).collect();
    assert_eq!(rows, vec![Some(0), Some(0)]);
}

#[test]
fn three_scrolls_on_one_row_forced() {
    let out = convert(single_line_canvas(false), &three_scrolls());
    let summary: Vec<(u64, Option<usize>, bool)> = out
        .iter()
        .map(|p| (p.comment.arrival_index, p.row(), p.forced))
        .collect();
    assert_eq!(
        summary,
        vec![(0, Some(0), false), (1, Some(0), false), (2, Some(0), true)]
    );
}

#[test]
fn overlapping_top_comments_on_one_row() {
    let raw = [
        RawComment::new(0.0, 0, "first").with_mail("ue"),
        RawComment::new(1.0, 1, "second").with_mail("ue"),
    ];
    let reduced = convert(single_line_canvas(true), &raw);
    assert_eq!(reduced.len(), 1);

    let forced = convert(single_line_canvas(false), &raw);
    assert_eq!(forced.len(), 2);
    assert_eq!(forced[1].slot, Slot::Row(0));
    assert!(forced[1].forced);
}

#[test]
fn tall_comment_skips_isolated_free_row() {
    let mut scheduler = Scheduler::new(SchedulerOptions {
        canvas_rows: 6,
        reduced: true,
        ..SchedulerOptions::default()
    });
    let one_row = |start: f64, index: u64| {
        Comment::new(start, index, "x", MotionClass::Top).with_footprint(Footprint::new(1, 25.0))
    };
    assert_eq!(scheduler.place(&one_row(0.0, 0)), Placement::Placed(0));
    assert_eq!(
        scheduler.place(&one_row(0.0, 1).with_duration(1.0)),
        Placement::Placed(1)
    );
    assert_eq!(scheduler.place(&one_row(0.0, 2)), Placement::Placed(2));

    // at t=2 row 1 is free again but isolated; rows 3..6 form the first run of 3
    let tall = Comment::new(2.0, 3, "a\nb\nc", MotionClass::Top);
    assert_eq!(tall.footprint.height_rows, 3);
    assert_eq!(scheduler.place(&tall), Placement::Placed(3));
}

#[test]
fn mail_precedence_end_to_end() {
    let raw = [RawComment::new(0.0, 0, "hi").with_mail("big shita ue")];
    let out = convert(LayoutConfig::default(), &raw);
    assert_eq!(out[0].comment.motion, MotionClass::Top);
    assert_eq!(out[0].comment.style.position, Position::Top);
    assert_eq!(out[0].comment.style.size, SizeClass::Big);
}

#[test]
fn substitution_window_is_half_open() {
    let raw = [
        RawComment::new(10.0, 0, "@置換 草 森").with_channel(Channel::Owner),
        RawComment::new(10.0, 1, "草"),
        RawComment::new(39.9, 2, "草生える"),
        RawComment::new(41.0, 3, "草"),
    ];
    let out = convert(LayoutConfig::default(), &raw);
    let texts: Vec<&str> = out.iter().map(|p| p.comment.text.as_str()).collect();
    assert_eq!(texts, vec!["森", "森生える", "草"]);
}

#[test]
fn reverse_directive_changes_output_motion() {
    let raw = [
        RawComment::new(0.0, 0, "/逆 コメ").with_channel(Channel::Owner),
        RawComment::new(1.0, 1, "viewer"),
        RawComment::new(1.0, 2, "owner").with_channel(Channel::Owner),
    ];
    let config = LayoutConfig::new(1920, 1080);
    let (script, stats) = Converter::new(config).unwrap().to_ass(&raw).unwrap();
    assert_eq!(stats.directives, 1);
    assert_eq!(stats.placed, 2);
    // viewer comment moves left to right, owner comment right to left
    assert!(script.contains("{\\move(-150, 0, 1920, 0)}viewer"));
    assert!(script.contains("{\\move(1920, "));
}

#[test]
fn ass_output_is_stable_across_runs() {
    let raw: Vec<RawComment> = (0..200u32)
        .map(|i| {
            let mail = match i % 4 {
                0 => "ue",
                1 => "shita small",
                2 => "big red",
                _ => "",
            };
            RawComment::new(f64::from(i) * 0.05, u64::from(i), format!("comment {i}"))
                .with_mail(mail)
        })
        .collect();
    let converter = Converter::new(LayoutConfig::new(1280, 720).with_reserve_blank(40)).unwrap();
    let (first, first_stats) = converter.to_ass(&raw).unwrap();
    let (second, second_stats) = converter.to_ass(&raw).unwrap();
    assert_eq!(first, second);
    assert_eq!(first_stats, second_stats);
    assert_eq!(first_stats.emitted(), 200);
}
