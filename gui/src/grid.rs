//! Sorting and filtering for the tabular panels.

use artifact_parser::{DataEntry, TokensMapEntry};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridKind {
    Data,
    TokensMap,
}

/// A row type that can be shown in a grid.
pub trait GridRow {
    const COLUMNS: &'static [&'static str];

    fn cell(&self, column: usize) -> String;

    fn compare(&self, other: &Self, column: usize) -> Ordering {
        self.cell(column).cmp(&other.cell(column))
    }
}

impl GridRow for DataEntry {
    const COLUMNS: &'static [&'static str] = &["Title", "Tokens"];

    fn cell(&self, column: usize) -> String {
        match column {
            0 => self.title.clone(),
            _ => self
                .tokens
                .iter()
                .map(i64::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    fn compare(&self, other: &Self, column: usize) -> Ordering {
        match column {
            0 => self.title.cmp(&other.title),
            _ => self.tokens.cmp(&other.tokens),
        }
    }
}

impl GridRow for TokensMapEntry {
    const COLUMNS: &'static [&'static str] = &["Id", "Token"];

    fn cell(&self, column: usize) -> String {
        match column {
            0 => self.id.to_string(),
            _ => self.token.clone(),
        }
    }

    fn compare(&self, other: &Self, column: usize) -> Ordering {
        match column {
            0 => self.id.cmp(&other.id),
            _ => self.token.cmp(&other.token),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridState {
    sort: Option<(usize, SortDirection)>,
    filter: String,
}

impl GridState {
    pub fn sort(&self) -> Option<(usize, SortDirection)> {
        self.sort
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Sorts ascending by a new column, or flips the direction when the
    /// column is already the sort key.
    pub fn toggle_sort(&mut self, column: usize) {
        self.sort = match self.sort {
            Some((current, SortDirection::Ascending)) if current == column => {
                Some((column, SortDirection::Descending))
            }
            _ => Some((column, SortDirection::Ascending)),
        };
    }

    pub fn set_filter(&mut self, filter: String) {
        self.filter = filter;
    }

    /// Rows matching the filter in display order, each with its position in
    /// the source list.
    pub fn visible_rows<'a, R: GridRow>(&self, rows: &'a [R]) -> Vec<(usize, &'a R)> {
        let needle = self.filter.trim().to_lowercase();
        let mut visible: Vec<(usize, &R)> = rows
            .iter()
            .enumerate()
            .filter(|(_, row)| {
                needle.is_empty()
                    || (0..R::COLUMNS.len())
                        .any(|column| row.cell(column).to_lowercase().contains(&needle))
            })
            .collect();

        if let Some((column, direction)) = self.sort {
            // stable, so equal keys keep file order
            visible.sort_by(|(_, a), (_, b)| {
                let ordering = a.compare(b, column);
                match direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }
        visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens() -> Vec<TokensMapEntry> {
        [(10, "Tokio"), (2, "rust"), (7, "async")]
            .into_iter()
            .map(|(id, token)| TokensMapEntry {
                id,
                token: token.to_string(),
            })
            .collect()
    }

    fn ids(rows: &[(usize, &TokensMapEntry)]) -> Vec<i64> {
        rows.iter().map(|(_, row)| row.id).collect()
    }

    #[test]
    fn test_sort_toggles_direction() {
        let rows = tokens();
        let mut grid = GridState::default();
        assert_eq!(ids(&grid.visible_rows(&rows)), vec![10, 2, 7]);

        grid.toggle_sort(0);
        assert_eq!(ids(&grid.visible_rows(&rows)), vec![2, 7, 10]);
        grid.toggle_sort(0);
        assert_eq!(ids(&grid.visible_rows(&rows)), vec![10, 7, 2]);

        grid.toggle_sort(1);
        assert_eq!(grid.sort(), Some((1, SortDirection::Ascending)));
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let rows = tokens();
        let mut grid = GridState::default();
        grid.set_filter("TOK".to_string());

        let visible = grid.visible_rows(&rows);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].0, 0);
    }

    #[test]
    fn test_data_rows_filter_on_tokens() {
        let rows = vec![
            DataEntry {
                title: "Rust 2024".to_string(),
                tokens: vec![1, 2],
            },
            DataEntry {
                title: "Go".to_string(),
                tokens: vec![3],
            },
        ];
        let mut grid = GridState::default();
        grid.set_filter("3".to_string());

        let visible = grid.visible_rows(&rows);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].1.title, "Go");
    }
}
