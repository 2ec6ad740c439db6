/*!
 * Preview pagination and view-model construction.
 *
 * Everything here is a pure function over an entry and a cursor position;
 * the host transport decides how the view model becomes buttons and embeds.
 * Navigation clamps at both ends and never wraps around.
 */

use crate::entry::{FieldTag, LogEntry};

/// One displayable field row of an entry preview
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewRow {
    /// Field label
    pub label: &'static str,

    /// Field this row renders, for edit affordances
    pub field: FieldTag,

    /// Display text
    pub value: String,

    /// Whether the user rewrote this field after the initial parse
    pub edited: bool,
}

/// View model for "entry N of M" during batch review
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewViewModel {
    /// Field rows in display order
    pub rows: Vec<PreviewRow>,

    /// Position text, e.g. `"2 of 5"`
    pub position: String,

    /// Whether a "previous" affordance applies
    pub has_previous: bool,

    /// Whether a "next" affordance applies
    pub has_next: bool,
}

/// Whether a previous entry exists before `index`
pub fn has_previous(index: usize) -> bool {
    index > 0
}

/// Whether a next entry exists after `index` in a batch of `total`
pub fn has_next(index: usize, total: usize) -> bool {
    total > 0 && index < total - 1
}

/// Index of the previous entry, clamped at 0
pub fn previous_index(index: usize) -> usize {
    index.saturating_sub(1)
}

/// Index of the next entry, clamped at `total - 1`
pub fn next_index(index: usize, total: usize) -> usize {
    if total == 0 {
        return 0;
    }
    (index + 1).min(total - 1)
}

/// Build the preview for the entry at `index` of `total`
pub fn build_preview(entry: &LogEntry, index: usize, total: usize) -> PreviewViewModel {
    let person_value = if entry.for_whole_squad {
        format!("{} (whole squad)", entry.person_name)
    } else {
        entry.person_name.clone()
    };

    let rows = vec![
        PreviewRow {
            label: "Squad",
            field: FieldTag::Squad,
            value: entry.squad_name.clone(),
            edited: entry.is_edited(FieldTag::Squad),
        },
        PreviewRow {
            label: "Person",
            field: FieldTag::Person,
            value: person_value,
            edited: entry.is_edited(FieldTag::Person),
        },
        PreviewRow {
            label: "Type",
            field: FieldTag::Type,
            value: entry.log_type_name.clone(),
            edited: entry.is_edited(FieldTag::Type),
        },
        PreviewRow {
            label: "Categories",
            field: FieldTag::Categories,
            value: entry.category_names.join(", "),
            edited: entry.is_edited(FieldTag::Categories),
        },
        PreviewRow {
            label: "Dates",
            field: FieldTag::Dates,
            value: entry.dates_display(),
            edited: entry.is_edited(FieldTag::Dates),
        },
        PreviewRow {
            label: "Description",
            field: FieldTag::Description,
            value: entry.description.clone(),
            edited: entry.is_edited(FieldTag::Description),
        },
    ];

    PreviewViewModel {
        rows,
        position: format!("{} of {}", index + 1, total),
        has_previous: has_previous(index),
        has_next: has_next(index, total),
    }
}
