//! Selection state for the two independent flows: service names picked from the
//! name search, and row indices checked in the waitlist table.

use std::collections::BTreeSet;

/// Selected service names, kept in the order they were picked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceSelection {
    names: Vec<String>,
}

impl ServiceSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes `name` when selected, appends it otherwise.
    pub fn toggle(&mut self, name: &str) {
        if let Some(position) = self.names.iter().position(|selected| selected == name) {
            self.names.remove(position);
        } else {
            self.names.push(name.to_string());
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|selected| selected == name)
    }

    pub fn select_all<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names.clear();
        for name in names {
            let name = name.into();
            if !self.contains(&name) {
                self.names.push(name);
            }
        }
    }

    pub fn clear_all(&mut self) {
        self.names.clear();
    }

    /// 依外部的「全選」勾選狀態重建選取集合
    pub fn set_all_selected<I, S>(&mut self, all_selected: bool, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if all_selected {
            self.select_all(names);
        } else {
            self.clear_all();
        }
    }

    /// Compares counts only: `visible_count` must be the size of a set that
    /// contains every selected name.
    pub fn is_all_selected(&self, visible_count: usize) -> bool {
        visible_count > 0 && self.names.len() == visible_count
    }

    pub fn selected(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Selected table rows by global index, so a selection survives page changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSelection {
    indices: BTreeSet<usize>,
}

impl RowSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, index: usize) {
        if !self.indices.remove(&index) {
            self.indices.insert(index);
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    pub fn select_all<I>(&mut self, indices: I)
    where
        I: IntoIterator<Item = usize>,
    {
        self.indices = indices.into_iter().collect();
    }

    pub fn clear_all(&mut self) {
        self.indices.clear();
    }

    pub fn set_all_selected<I>(&mut self, all_selected: bool, indices: I)
    where
        I: IntoIterator<Item = usize>,
    {
        if all_selected {
            self.select_all(indices);
        } else {
            self.clear_all();
        }
    }

    pub fn is_all_selected(&self, visible_count: usize) -> bool {
        visible_count > 0 && self.indices.len() == visible_count
    }

    /// Selected indices in ascending order.
    pub fn selected(&self) -> Vec<usize> {
        self.indices.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}
