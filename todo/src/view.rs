//! Plain-text rendering of the task list.

use crate::types::{Task, TaskState};
use std::fmt::Write;

const COMBINING_LONG_STROKE: char = '\u{0336}';

/// Renders `state` as the text shown after every change
///
/// ```text
/// Tasks (1/2 done)
///   [ ] 1  Buy milk
///   [x] 2  W̶a̶l̶k̶ ̶d̶o̶g̶
/// > draft text
/// ! Could not add task: ...
/// ```
#[must_use]
pub fn render(state: &TaskState) -> String {
    let mut out = String::new();

    if state.loaded || !state.tasks.is_empty() {
        let _ = writeln!(out, "Tasks ({}/{} done)", state.completed_count(), state.count());
    } else {
        out.push_str("Tasks (loading)\n");
    }

    if state.tasks.is_empty() && state.loaded {
        out.push_str("  (no tasks)\n");
    }

    for task in &state.tasks {
        out.push_str(&render_task(task));
        out.push('\n');
    }

    let _ = writeln!(out, "> {}", state.input);

    if let Some(error) = &state.last_error {
        let _ = writeln!(out, "! {error}");
    }

    out
}

/// Renders one row with its checkbox, id, and description
#[must_use]
pub fn render_task(task: &Task) -> String {
    if task.completed {
        format!("  [x] {}  {}", task.id, strike(&task.description))
    } else {
        format!("  [ ] {}  {}", task.id, task.description)
    }
}

fn strike(text: &str) -> String {
    text.chars().flat_map(|c| [c, COMBINING_LONG_STROKE]).collect()
}
