//! # danmaku-core
//!
//! Turns timed video comments ("danmaku") into a subtitle timeline in which
//! scrolling and stationary comments do not collide.
//!
//! ## Pipeline
//!
//! - [`script`]: resolves each comment's mail commands and applies
//!   time-windowed style-script directives declared by owner comments
//! - [`scheduler`]: assigns every resolved comment a contiguous run of rows in
//!   one forward pass, dropping or forcing it when the canvas is full
//! - [`emit`]: writes the placements, by default as an ASS script
//! - [`pipeline`]: runs the stages in order and reports what happened
//!
//! ## Quick Start
//!
//! ```rust
//! use danmaku_core::{Converter, LayoutConfig, RawComment};
//!
//! let comments = vec![
//!     RawComment::new(0.0, 0, "first!"),
//!     RawComment::new(0.5, 1, "hello from the top").with_mail("ue red"),
//! ];
//!
//! let converter = Converter::new(LayoutConfig::new(1920, 1080))?;
//! let (script, stats) = converter.to_ass(&comments)?;
//! assert_eq!(stats.placed, 2);
//! assert!(script.contains("[Events]"));
//! # Ok::<(), danmaku_core::CoreError>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(clippy::all)]
#![deny(unsafe_code)]

pub mod comment;
pub mod config;
pub mod emit;
pub mod pipeline;
pub mod scheduler;
pub mod script;
pub mod style;
pub mod utils;

pub use comment::{Anchor, Channel, Comment, Footprint, MotionClass, RawComment};
pub use config::{LayoutConfig, PoolPolicy, RowUnit};
pub use emit::{AssWriter, Emitter, PlacedComment, Slot};
pub use pipeline::{ConversionStats, Converter};
pub use scheduler::{Placement, Scheduler, SchedulerOptions};
pub use script::{DirectiveLog, Resolution, StyleResolver};
pub use utils::{CoreError, Result};

/// Crate version, written into generated script headers
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
