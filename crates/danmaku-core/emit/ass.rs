//! Advanced SubStation Alpha output
//!
//! One `[V4+ Styles]` entry carries the configured font and opacity; each
//! comment becomes a `Dialogue` line whose override block positions or moves
//! it and applies whatever differs from the base style.
//!
//! # Example
//!
//! ```rust
//! use danmaku_core::comment::{Comment, MotionClass};
//! use danmaku_core::config::LayoutConfig;
//! use danmaku_core::emit::{AssWriter, Emitter, PlacedComment, Slot};
//!
//! let mut writer = AssWriter::new(&LayoutConfig::new(1280, 720));
//! writer.begin()?;
//! writer.emit(PlacedComment {
//!     comment: Comment::new(1.5, 0, "hello", MotionClass::Top),
//!     slot: Slot::Row(0),
//!     duration: 5.0,
//!     forced: false,
//! })?;
//! let script = writer.into_inner();
//! assert!(script.contains("PlayResX: 1280"));
//! assert!(script.contains("Dialogue: 2,0:00:01.50,0:00:06.50,danmaku,,0000,0000,0000,,{\\an8\\pos(640, 0)}hello"));
//! # Ok::<(), danmaku_core::CoreError>(())
//! ```

use super::{viewport::Viewport, Emitter, PlacedComment, Slot};
use crate::{
    comment::MotionClass,
    config::LayoutConfig,
    style::WHITE,
    utils::{format_ass_time, seconds_to_centiseconds},
    Result,
};
use core::fmt::{self, Write};

/// Name of the single style every dialogue line uses
pub const STYLE_NAME: &str = "danmaku";

/// Layer every dialogue line is written on
const DIALOGUE_LAYER: u8 = 2;

/// Canvas size dialogue colours are corrected for, whatever the output size
const COLOR_REFERENCE_SIZE: (u32, u32) = (1280, 576);

/// Writes an ASS script into any [`fmt::Write`] sink
#[derive(Debug, Clone)]
pub struct AssWriter<W = String> {
    config: LayoutConfig,
    viewport: Viewport,
    sink: W,
    lines: usize,
}

impl AssWriter<String> {
    /// Create a writer that collects the script into a `String`
    #[must_use]
    pub fn new(config: &LayoutConfig) -> Self {
        Self::with_sink(config, String::new())
    }
}

impl<W: Write> AssWriter<W> {
    /// Create a writer over `sink`
    #[must_use]
    pub fn with_sink(config: &LayoutConfig, sink: W) -> Self {
        Self {
            config: config.clone(),
            viewport: Viewport::for_canvas(config.width, config.height),
            sink,
            lines: 0,
        }
    }

    /// Number of dialogue lines written so far
    #[must_use]
    pub const fn dialogue_count(&self) -> usize {
        self.lines
    }

    /// Consume the writer and return its sink
    pub fn into_inner(self) -> W {
        self.sink
    }

    fn write_header(&mut self) -> fmt::Result {
        let config = &self.config;
        let alpha = header_alpha(config.alpha);
        let outline = (config.font_size / 25.0).max(1.0);

        let out = &mut self.sink;
        writeln!(out, "[Script Info]")?;
        writeln!(out, "; Script generated by danmaku {}", crate::VERSION)?;
        writeln!(out, "ScriptType: v4.00+")?;
        writeln!(out, "PlayResX: {}", config.width)?;
        writeln!(out, "PlayResY: {}", config.height)?;
        writeln!(out, "Aspect Ratio: {}:{}", config.width, config.height)?;
        writeln!(out, "Collisions: Normal")?;
        writeln!(out, "WrapStyle: 2")?;
        writeln!(out, "ScaledBorderAndShadow: yes")?;
        writeln!(out, "YCbCr Matrix: TV.601")?;
        writeln!(out)?;
        writeln!(out, "[V4+ Styles]")?;
        writeln!(
            out,
            "Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, \
             BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, \
             BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding"
        )?;
        writeln!(
            out,
            "Style: {STYLE_NAME}, {face}, {size:.0}, &H{alpha:02X}FFFFFF, &H{alpha:02X}FFFFFF, \
             &H{alpha:02X}000000, &H{alpha:02X}000000, 0, 0, 0, 0, 100, 100, 0.00, 0.00, 1, \
             {outline:.0}, 0, 7, 0, 0, 0, 0",
            face = config.font_face,
            size = config.font_size,
        )?;
        writeln!(out)?;
        writeln!(out, "[Events]")?;
        writeln!(
            out,
            "Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text"
        )
    }

    fn overrides(&self, placed: &PlacedComment) -> core::result::Result<String, fmt::Error> {
        let config = &self.config;
        let comment = &placed.comment;
        let width = config.width;
        let pitch = config.row_pitch();
        let text_width = comment.footprint.measured_width.ceil() as i64;

        let mut tags = String::new();
        match (placed.slot, comment.motion) {
            (Slot::Anchor(anchor), _) => {
                let (x, y) = self.viewport.map(anchor);
                write!(tags, "\\an7\\pos({}, {})", coord(x), coord(y))
            }
            (Slot::Row(row), MotionClass::Top) => {
                write!(tags, "\\an8\\pos({}, {})", width / 2, coord(row as f64 * pitch))
            }
            (Slot::Row(row), MotionClass::Bottom) => {
                let from_bottom = config.canvas_rows().saturating_sub(row);
                write!(tags, "\\an2\\pos({}, {})", width / 2, coord(from_bottom as f64 * pitch))
            }
            (Slot::Row(row), MotionClass::Reverse) => {
                let y = coord(row as f64 * pitch);
                write!(tags, "\\move({}, {y}, {width}, {y})", -text_width)
            }
            (Slot::Row(row), MotionClass::Scroll | MotionClass::Positioned) => {
                let y = coord(row as f64 * pitch);
                write!(tags, "\\move({width}, {y}, {}, {y})", -text_width)
            }
        }?;

        if (comment.effective_size - config.font_size).abs() >= 1.0 {
            write!(tags, "\\fs{:.0}", comment.effective_size)?;
        }
        let color = comment.style.color;
        if color != WHITE {
            let (ref_width, ref_height) = COLOR_REFERENCE_SIZE;
            write!(tags, "\\c&H{}&", ass_color(color, ref_width, ref_height))?;
            if color == 0x00_00_00 {
                tags.push_str("\\3c&HFFFFFF&");
            }
        }
        if comment.alpha() < 1.0 {
            tags.push_str("\\alpha&H80&");
        }
        if let Some(face) = comment.style.font.face() {
            write!(tags, "\\fn{face}")?;
        }
        Ok(tags)
    }
}

impl<W: Write> Emitter for AssWriter<W> {
    fn begin(&mut self) -> Result<()> {
        self.write_header()?;
        Ok(())
    }

    fn emit(&mut self, placed: PlacedComment) -> Result<()> {
        let start = seconds_to_centiseconds(placed.comment.start_time);
        let end = seconds_to_centiseconds(placed.end_time());
        let tags = self.overrides(&placed)?;
        writeln!(
            self.sink,
            "Dialogue: {DIALOGUE_LAYER},{},{},{STYLE_NAME},,0000,0000,0000,,{{{tags}}}{}",
            format_ass_time(start),
            format_ass_time(end),
            escape_text(&placed.comment.text),
        )?;
        self.lines += 1;
        Ok(())
    }
}

/// Alpha byte of the base style: 0 is opaque, 255 fully transparent
fn header_alpha(alpha: f64) -> u8 {
    ((1.0 - alpha.clamp(0.0, 1.0)) * 255.0).round() as u8
}

fn coord(value: f64) -> i64 {
    value.round() as i64
}

fn clip_byte(value: f64) -> u8 {
    value.clamp(0.0, 255.0).round() as u8
}

/// ASS `BBGGRR` colour for an `RRGGBB` value
///
/// Unless the canvas is below 1280x576 in both dimensions, players decode it
/// with BT.709 and the colour is corrected from BT.601. Black and white pass
/// through. Dialogue lines always use the corrected form, computed for a
/// 1280x576 canvas.
#[must_use]
pub fn ass_color(rgb: u32, width: u32, height: u32) -> String {
    match rgb {
        0x00_00_00 => return "000000".to_string(),
        0xFF_FF_FF => return "FFFFFF".to_string(),
        _ => {}
    }
    let r = f64::from((rgb >> 16) & 0xFF);
    let g = f64::from((rgb >> 8) & 0xFF);
    let b = f64::from(rgb & 0xFF);
    if width < 1280 && height < 576 {
        return format!("{:02X}{:02X}{:02X}", b as u8, g as u8, r as u8);
    }
    format!(
        "{:02X}{:02X}{:02X}",
        clip_byte(r * 0.009_563_840_880_807 + g * 0.032_172_545_402_037 + b * 0.958_263_613_717_156),
        clip_byte(r * -0.104_939_331_420_754 + g * 1.172_314_781_918_55 + b * -0.067_375_450_497_798),
        clip_byte(r * 0.913_489_123_739_876 + g * 0.078_585_363_725_325 + b * 0.007_925_512_534_798),
    )
}

/// Escape comment text for a dialogue line
///
/// Backslashes are followed by a zero-width space so they never start an
/// override sequence, braces are escaped, line breaks become `\N`, and spaces
/// at either end of a line become hard spaces.
#[must_use]
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    for (index, line) in text.split('\n').enumerate() {
        if index > 0 {
            out.push_str("\\N");
        }
        let line = line.trim_end_matches('\r');
        let body = line.trim_matches(' ');
        let leading = line.len() - line.trim_start_matches(' ').len();
        let trailing = if body.is_empty() {
            0
        } else {
            line.len() - line.trim_end_matches(' ').len()
        };

        out.push_str(&"\\h".repeat(leading));
        for ch in body.chars() {
            match ch {
                '\\' => out.push_str("\\\\\u{200B}"),
                '{' => out.push_str("\\{"),
                '}' => out.push_str("\\}"),
                _ => out.push(ch),
            }
        }
        out.push_str(&"\\h".repeat(trailing));
    }
    out
}
