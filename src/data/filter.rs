use super::model::{Column, Dataset, Record, SignalCategory};

// ---------------------------------------------------------------------------
// Filter selection
// ---------------------------------------------------------------------------

/// One filter widget: either unconstrained or pinned to a single value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice<T> {
    All,
    Only(T),
}

impl<T> Default for Choice<T> {
    fn default() -> Self {
        Choice::All
    }
}

impl<T> Choice<T> {
    pub fn as_only(&self) -> Option<&T> {
        match self {
            Choice::All => None,
            Choice::Only(v) => Some(v),
        }
    }
}

/// The three dashboard filters. `Default` selects everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub category: Choice<SignalCategory>,
    pub device: Choice<String>,
    pub traffic: Choice<String>,
}

impl FilterState {
    /// The constrained filters as predicates; `All` contributes nothing.
    pub fn predicates(&self) -> Vec<Predicate> {
        let mut preds = Vec::new();
        if let Choice::Only(c) = &self.category {
            preds.push(Predicate::Category(*c));
        }
        if let Choice::Only(d) = &self.device {
            preds.push(Predicate::Device(d.clone()));
        }
        if let Choice::Only(t) = &self.traffic {
            preds.push(Predicate::Traffic(t.clone()));
        }
        preds
    }

    /// Drop selections that no longer exist in `dataset` (after loading a
    /// different file).
    pub fn retain_valid(&mut self, dataset: &Dataset) {
        if matches!(&self.category, Choice::Only(c) if !dataset.categories.contains(c)) {
            self.category = Choice::All;
        }
        if matches!(&self.device, Choice::Only(d) if !dataset.devices.contains(d)) {
            self.device = Choice::All;
        }
        if matches!(&self.traffic, Choice::Only(t) if !dataset.traffic.contains(t)) {
            self.traffic = Choice::All;
        }
    }
}

/// A single equality test against a normalized field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Category(SignalCategory),
    Device(String),
    Traffic(String),
}

impl Predicate {
    /// A missing field never matches.
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Predicate::Category(c) => record.category == Some(*c),
            Predicate::Device(d) => record.device.as_deref() == Some(d.as_str()),
            Predicate::Traffic(t) => record.traffic.as_deref() == Some(t.as_str()),
        }
    }
}

// ---------------------------------------------------------------------------
// Selectable values
// ---------------------------------------------------------------------------

/// Values offered by the filter widgets, drawn from the observed data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// In category order (Excellent first), only those present.
    pub categories: Vec<SignalCategory>,
    /// Sorted, distinct.
    pub devices: Vec<String>,
    /// Sorted, distinct.
    pub traffic: Vec<String>,
}

impl FilterOptions {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self {
            categories: dataset.categories.iter().copied().collect(),
            devices: dataset.devices.iter().cloned().collect(),
            traffic: dataset.traffic.iter().cloned().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Filtered view
// ---------------------------------------------------------------------------

/// A subset of dataset rows. Borrowing the dataset keeps the table
/// immutable for as long as any view of it is alive.
#[derive(Debug, Clone)]
pub struct View<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

impl<'a> View<'a> {
    /// Every row.
    pub fn all(dataset: &'a Dataset) -> Self {
        Self {
            dataset,
            indices: (0..dataset.len()).collect(),
        }
    }

    /// Rows passing every constrained filter.
    pub fn filtered(dataset: &'a Dataset, filters: &FilterState) -> Self {
        Self {
            dataset,
            indices: filtered_indices(dataset, filters),
        }
    }

    /// Narrow by one more predicate.
    pub fn refine(&self, predicate: &Predicate) -> Self {
        let indices = self
            .indices
            .iter()
            .copied()
            .filter(|&i| predicate.matches(&self.dataset.records[i]))
            .collect();
        Self {
            dataset: self.dataset,
            indices,
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &'a Record> + '_ {
        let dataset = self.dataset;
        self.indices.iter().map(move |&i| &dataset.records[i])
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn has(&self, column: Column) -> bool {
        self.dataset.has(column)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Return indices of rows that pass all active filters.
///
/// A row passes when, for every filter:
/// * The filter is `All` → passes (no constraint)
/// * The row's normalized value equals the selected value → passes
/// * The row has no value for that field → fails
pub fn filtered_indices(dataset: &Dataset, filters: &FilterState) -> Vec<usize> {
    let predicates = filters.predicates();
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| predicates.iter().all(|p| p.matches(rec)))
        .map(|(i, _)| i)
        .collect()
}
