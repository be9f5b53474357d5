//! Positional line diff.

use memobank_entity::version::DiffEntry;

/// Compares two texts line by line, keyed purely by line index.
///
/// There is no re-alignment: inserting a line near the top shows up as a
/// modification on every following line plus one trailing addition.
#[derive(Debug, Clone, Copy, Default)]
pub struct VersionDiffer;

impl VersionDiffer {
    /// Differences between `old` and `new`, in ascending line order.
    pub fn diff(old: &str, new: &str) -> Vec<DiffEntry> {
        let old_lines: Vec<&str> = old.split('\n').collect();
        let new_lines: Vec<&str> = new.split('\n').collect();
        let len = old_lines.len().max(new_lines.len());

        (0..len)
            .filter_map(|i| {
                let line = i + 1;
                match (old_lines.get(i), new_lines.get(i)) {
                    (None, Some(added)) => Some(DiffEntry::addition(line, added)),
                    (Some(removed), None) => Some(DiffEntry::deletion(line, removed)),
                    (Some(before), Some(after)) if before != after => {
                        Some(DiffEntry::modification(line, before, after))
                    }
                    _ => None,
                }
            })
            .collect()
    }
}
