//! Collapse overlapping match windows into consecutive line groups.
//!
//! Hound returns one [`LineMatch`] per hit, each carrying its own before/after
//! context. Hits close to each other share context lines, so the raw windows
//! overlap. Merging writes every window into a single line-number map and then
//! splits that map into maximal runs of consecutive numbers.

use std::collections::BTreeMap;

use crate::models::{FileMatch, LineGroup, LineMatch};

/// Merge all match windows of `file_match` into non-overlapping groups,
/// ordered by ascending first line number.
///
/// When two windows write the same line number, the later match in
/// `file_match.matches` wins.
pub fn merge(file_match: &FileMatch) -> Vec<LineGroup> {
    group_runs(line_map(&file_match.matches))
}

/// Sparse line number → content map covering every window.
fn line_map(matches: &[LineMatch]) -> BTreeMap<i64, &str> {
    let mut lines = BTreeMap::new();

    for m in matches {
        let first_before = m.line_number - m.before.len() as i64;
        for (i, line) in m.before.iter().enumerate() {
            lines.insert(first_before + i as i64, line.as_str());
        }

        lines.insert(m.line_number, m.line.as_str());

        for (i, line) in m.after.iter().enumerate() {
            lines.insert(m.line_number + i as i64 + 1, line.as_str());
        }
    }

    lines
}

/// Split an ordered line map into runs with no gaps.
fn group_runs(lines: BTreeMap<i64, &str>) -> Vec<LineGroup> {
    let mut groups: Vec<LineGroup> = Vec::new();

    for (number, content) in lines {
        match groups.last_mut() {
            Some(group) if group.last_line_number() + 1 == number => {
                group.lines.push(content.to_string());
            }
            _ => groups.push(LineGroup {
                first_line_number: number,
                lines: vec![content.to_string()],
            }),
        }
    }

    groups
}
