//! Display helpers for presenters: bar colours, display-field annotations,
//! and tooltip text.

use crate::mapping::{FieldMapping, FieldRole};
use crate::normalize::{NormalizedTask, TaskDate};
use crate::record::value_to_text;

/// A labelled value shown next to a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub label: String,
    pub value: String,
}

/// The colour token configured for this task's category, if any.
pub fn resolve_color<'m>(task: &NormalizedTask, mapping: &'m FieldMapping) -> Option<&'m str> {
    let colors = mapping.color_map.as_ref()?;
    let category = task.field(mapping.field_name(FieldRole::ColorField))?;
    colors.get(&value_to_text(category)).map(String::as_str)
}

/// Values of the mapping's display fields present on the task, in order.
pub fn display_annotations(task: &NormalizedTask, mapping: &FieldMapping) -> Vec<Annotation> {
    mapping
        .display_fields
        .iter()
        .filter_map(|field| {
            task.field(field).map(|value| Annotation {
                label: field.clone(),
                value: value_to_text(value),
            })
        })
        .collect()
}

fn format_date(date: &TaskDate) -> String {
    match date.get() {
        Some(at) => at.format("%Y-%m-%d").to_string(),
        None => "invalid date".to_string(),
    }
}

/// Tooltip text for a task, one entry per line.
pub fn tooltip_lines(task: &NormalizedTask, mapping: &FieldMapping) -> Vec<String> {
    let mut lines = vec![
        task.name.clone(),
        format!("Start: {}", format_date(&task.start_date)),
        format!("End: {}", format_date(&task.end_date)),
    ];

    if let Some(progress) = task.progress {
        lines.push(format!("Progress: {}%", progress));
    }

    lines.extend(
        display_annotations(task, mapping)
            .into_iter()
            .map(|a| format!("{}: {}", a.label, a.value)),
    );

    lines
}
