//! Timeline layout engine for Gantry
//!
//! Turns loosely-typed records plus a field mapping into normalized tasks, a
//! padded day-by-day axis, and per-task bar positions expressed as
//! percentages of that axis.
//!
//! ```rust,ignore
//! let mut ids = ContentHashIdGenerator::new();
//! let layout = Layout::compute(&records, &FieldMapping::default(), &mut ids);
//! for (task, pos) in layout.rows() {
//!     println!("{} {:.1}% +{:.1}%", task.name, pos.left, pos.width);
//! }
//! ```

pub mod annotate;
pub mod axis;
pub mod config;
pub mod error;
pub mod id;
pub mod layout;
pub mod mapping;
pub mod normalize;
pub mod position;
pub mod record;
pub mod source;

pub use annotate::{Annotation, display_annotations, resolve_color, tooltip_lines};
pub use axis::{AXIS_PADDING_DAYS, TimelineAxis};
pub use config::{MAPPING_ENV, MappingSource, load_effective_mapping, resolve_mapping_source};
pub use error::{GantryError, GantryResult};
pub use id::{
    ContentHashIdGenerator, IdGenerator, IdStrategy, RandomIdGenerator, SequentialIdGenerator,
};
pub use layout::{Layout, TimelineState};
pub use mapping::{FieldMapping, FieldRole};
pub use normalize::{NormalizedTask, TaskDate, UNNAMED_TASK, normalize_records, parse_date};
pub use position::{MIN_WIDTH_PERCENT, PositionResult, calculate_position, compute_positions};
pub use record::RawRecord;
pub use source::{load_mapping, load_records, parse_records, read_stdin_records};

// Layout output is handed to presenters that may live on other threads
static_assertions::assert_impl_all!(Layout: Send, Sync);
static_assertions::assert_impl_all!(TimelineAxis: Send, Sync);
static_assertions::assert_impl_all!(FieldMapping: Send, Sync);
static_assertions::assert_impl_all!(NormalizedTask: Send, Sync);
static_assertions::assert_impl_all!(TimelineState: Send);
