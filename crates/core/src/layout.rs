//! The three engine outputs bundled together, and a holder that recomputes
//! them whenever its inputs change.

use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

use crate::axis::TimelineAxis;
use crate::id::IdGenerator;
use crate::mapping::FieldMapping;
use crate::normalize::{NormalizedTask, normalize_records};
use crate::position::{PositionResult, compute_positions};
use crate::record::RawRecord;

/// Normalized tasks, their axis, and one position per task.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Layout {
    tasks: Vec<NormalizedTask>,
    axis: TimelineAxis,
    positions: Vec<PositionResult>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl Layout {
    /// Normalize the records and lay them out.
    pub fn compute(
        records: &[RawRecord],
        mapping: &FieldMapping,
        ids: &mut dyn IdGenerator,
    ) -> Self {
        Self::from_tasks(normalize_records(records, mapping, ids))
    }

    /// Lay out already-normalized tasks.
    pub fn from_tasks(tasks: Vec<NormalizedTask>) -> Self {
        let axis = TimelineAxis::build(&tasks);
        let positions = compute_positions(&tasks, &axis);

        let mut index = HashMap::with_capacity(tasks.len());
        for (i, task) in tasks.iter().enumerate() {
            // First occurrence wins for duplicate ids
            index.entry(task.id.clone()).or_insert(i);
        }

        debug!(
            tasks = tasks.len(),
            axis_days = axis.len(),
            "computed timeline layout"
        );

        Self {
            tasks,
            axis,
            positions,
            index,
        }
    }

    pub fn tasks(&self) -> &[NormalizedTask] {
        &self.tasks
    }

    pub fn axis(&self) -> &TimelineAxis {
        &self.axis
    }

    /// Positions aligned with [`Layout::tasks`].
    pub fn positions(&self) -> &[PositionResult] {
        &self.positions
    }

    /// Position of the task with the given id.
    pub fn position(&self, id: &str) -> Option<&PositionResult> {
        self.index.get(id).and_then(|&i| self.positions.get(i))
    }

    /// Iterate tasks together with their positions.
    pub fn rows(&self) -> impl Iterator<Item = (&NormalizedTask, &PositionResult)> {
        self.tasks.iter().zip(self.positions.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }
}

/// Inputs plus the layout derived from them.
///
/// Setting new records or a new mapping discards the previous layout and
/// computes a fresh one.
pub struct TimelineState {
    records: Vec<RawRecord>,
    mapping: FieldMapping,
    ids: Box<dyn IdGenerator + Send>,
    layout: Layout,
}

impl TimelineState {
    pub fn new(mapping: FieldMapping, ids: Box<dyn IdGenerator + Send>) -> Self {
        Self {
            records: Vec::new(),
            mapping,
            ids,
            layout: Layout::default(),
        }
    }

    /// Replace the records and recompute.
    pub fn set_records(&mut self, records: Vec<RawRecord>) {
        self.records = records;
        self.recompute();
    }

    /// Replace the mapping and recompute.
    pub fn set_mapping(&mut self, mapping: FieldMapping) {
        self.mapping = mapping;
        self.recompute();
    }

    /// Replace records and mapping together with a single recompute.
    pub fn set_inputs(&mut self, records: Vec<RawRecord>, mapping: FieldMapping) {
        self.records = records;
        self.mapping = mapping;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.ids.begin_pass();
        self.layout = Layout::compute(&self.records, &self.mapping, self.ids.as_mut());
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn mapping(&self) -> &FieldMapping {
        &self.mapping
    }

    pub fn records(&self) -> &[RawRecord] {
        &self.records
    }
}
