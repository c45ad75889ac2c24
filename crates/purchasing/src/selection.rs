//! Row selection state for the index table.
//!
//! A selected row reveals its line items in a nested sub-table. The state is
//! passed explicitly between requests and never persisted.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use poview_core::{DomainError, Entity, PurchaseOrderId};

/// Set of selected purchase orders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<PurchaseOrderId>,
}

/// How many rows are selected, as shown above the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectedCount {
    All,
    Some(usize),
}

impl fmt::Display for SelectedCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectedCount::All => f.write_str("All"),
            SelectedCount::Some(n) => write!(f, "{n}"),
        }
    }
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_selected(&self, id: PurchaseOrderId) -> bool {
        self.ids.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Select the row if it was not selected, deselect it otherwise.
    pub fn toggle(&mut self, id: PurchaseOrderId) {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
    }

    /// The selection a click on `id`'s toggle produces, leaving `self` untouched.
    pub fn toggled(&self, id: PurchaseOrderId) -> Selection {
        let mut next = self.clone();
        next.toggle(id);
        next
    }

    pub fn select_all<'a, E>(&mut self, rows: impl IntoIterator<Item = &'a E>)
    where
        E: Entity<Id = PurchaseOrderId> + 'a,
    {
        self.ids.extend(rows.into_iter().map(|row| row.id()));
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drop ids that no longer refer to a visible row.
    pub fn retain_visible<'a, E>(&mut self, rows: impl IntoIterator<Item = &'a E>)
    where
        E: Entity<Id = PurchaseOrderId> + 'a,
    {
        let visible: BTreeSet<PurchaseOrderId> = rows.into_iter().map(|row| row.id()).collect();
        self.ids.retain(|id| visible.contains(id));
    }

    /// `All` when every row is selected (and there is at least one row).
    pub fn count<E>(&self, rows: &[E]) -> SelectedCount
    where
        E: Entity<Id = PurchaseOrderId>,
    {
        let selected = rows.iter().filter(|r| self.is_selected(r.id())).count();
        if !rows.is_empty() && selected == rows.len() {
            SelectedCount::All
        } else {
            SelectedCount::Some(selected)
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = PurchaseOrderId> + '_ {
        self.ids.iter().copied()
    }
}

/// Comma-separated ids, e.g. `3,7,12`; the query-string encoding.
impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for id in &self.ids {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "{id}")?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for Selection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ids = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(PurchaseOrderId::from_str)
            .collect::<Result<BTreeSet<_>, _>>()?;
        Ok(Self { ids })
    }
}

impl FromIterator<PurchaseOrderId> for Selection {
    fn from_iter<T: IntoIterator<Item = PurchaseOrderId>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
