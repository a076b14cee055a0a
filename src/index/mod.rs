//! `Index`: an ordered, named sequence of labels with O(1)/O(log n)
//! membership and set-algebraic operations.
//!
//! Backed by a hashmap from label to position rather than a sorted `Vec`,
//! since lookups, not insertion order, dominate the alignment workload.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::NdframeError;
use crate::temporal::DateTime;

/// A polymorphic index label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Label {
    Int(i64),
    Str(String),
    Timestamp(DateTime),
    Tuple(Vec<Label>),
}

impl PartialOrd for Label {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        match (self, other) {
            (Label::Int(a), Label::Int(b)) => a.partial_cmp(b),
            (Label::Str(a), Label::Str(b)) => a.partial_cmp(b),
            (Label::Timestamp(a), Label::Timestamp(b)) => a.partial_cmp(b),
            (Label::Tuple(a), Label::Tuple(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Label::Int(v) => write!(f, "{v}"),
            Label::Str(v) => write!(f, "{v}"),
            Label::Timestamp(v) => write!(f, "{v}"),
            Label::Tuple(parts) => {
                write!(f, "(")?;
                for (i, p) in parts.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{p}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// An ordered, named sequence of [`Label`]s.
///
/// `positions` gives O(1) membership/`get_loc`; duplicates are permitted (the
/// position map stores the first occurrence's index) but callers that need
/// strict uniqueness should call [`Index::drop_duplicates`].
#[derive(Debug, Clone)]
pub struct Index {
    name: Option<String>,
    labels: Arc<Vec<Label>>,
    positions: Arc<HashMap<Label, usize>>,
}

impl Index {
    pub fn new(labels: Vec<Label>) -> Self {
        Self::named(None, labels)
    }

    pub fn named(name: Option<String>, labels: Vec<Label>) -> Self {
        let mut positions = HashMap::with_capacity(labels.len());
        for (i, label) in labels.iter().enumerate() {
            positions.entry(label.clone()).or_insert(i);
        }
        Self {
            name,
            labels: Arc::new(labels),
            positions: Arc::new(positions),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn contains(&self, label: &Label) -> bool {
        self.positions.contains_key(label)
    }

    pub fn get_loc(&self, label: &Label) -> Result<usize, NdframeError> {
        self.positions
            .get(label)
            .copied()
            .ok_or_else(|| NdframeError::LabelNotFound(label.to_string()))
    }

    /// Returns the `[start, end)` position range for `labels[start..end]` matching
    /// an inclusive slice between two boundary labels, assuming `self` is sorted.
    pub fn slice_locs(&self, start: Option<&Label>, end: Option<&Label>) -> (usize, usize) {
        let lo = match start {
            Some(label) => self
                .labels
                .iter()
                .position(|l| l.partial_cmp(label) != Some(std::cmp::Ordering::Less))
                .unwrap_or(self.labels.len()),
            None => 0,
        };
        let hi = match end {
            Some(label) => self
                .labels
                .iter()
                .position(|l| l.partial_cmp(label) == Some(std::cmp::Ordering::Greater))
                .unwrap_or(self.labels.len()),
            None => self.labels.len(),
        };
        (lo, hi.max(lo))
    }

    pub fn take(&self, positions: &[usize]) -> Index {
        let labels = positions
            .iter()
            .filter_map(|&p| self.labels.get(p).cloned())
            .collect();
        Index::named(self.name.clone(), labels)
    }

    pub fn filter(&self, keep: &[bool]) -> Index {
        let labels = self
            .labels
            .iter()
            .zip(keep.iter())
            .filter_map(|(l, &k)| k.then(|| l.clone()))
            .collect();
        Index::named(self.name.clone(), labels)
    }

    pub fn equals(&self, other: &Index) -> bool {
        self.labels.as_slice() == other.labels.as_slice()
    }

    fn sorted_labels(mut labels: Vec<Label>) -> Vec<Label> {
        labels.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        labels
    }

    pub fn union(&self, other: &Index) -> Index {
        let mut seen: HashMap<Label, ()> = HashMap::new();
        let mut merged = Vec::with_capacity(self.len() + other.len());
        for label in self.labels.iter().chain(other.labels.iter()) {
            if seen.insert(label.clone(), ()).is_none() {
                merged.push(label.clone());
            }
        }
        Index::named(self.name.clone(), Self::sorted_labels(merged))
    }

    pub fn intersection(&self, other: &Index) -> Index {
        let mut seen = std::collections::HashSet::new();
        let labels = self
            .labels
            .iter()
            .filter(|l| other.contains(l) && seen.insert((*l).clone()))
            .cloned()
            .collect();
        Index::named(self.name.clone(), Self::sorted_labels(labels))
    }

    pub fn difference(&self, other: &Index) -> Index {
        let labels = self
            .labels
            .iter()
            .filter(|l| !other.contains(l))
            .cloned()
            .collect();
        Index::named(self.name.clone(), Self::sorted_labels(labels))
    }

    pub fn symmetric_difference(&self, other: &Index) -> Index {
        let a_minus_b = self.difference(other);
        let b_minus_a = other.difference(self);
        a_minus_b.union(&b_minus_a)
    }

    pub fn sort_values(&self) -> (Index, Vec<usize>) {
        let mut order: Vec<usize> = (0..self.labels.len()).collect();
        order.sort_by(|&a, &b| {
            self.labels[a]
                .partial_cmp(&self.labels[b])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        (self.take(&order), order)
    }

    pub fn drop_duplicates(&self) -> Index {
        let mut seen = std::collections::HashSet::new();
        let labels = self
            .labels
            .iter()
            .filter(|l| seen.insert((*l).clone()))
            .cloned()
            .collect();
        Index::named(self.name.clone(), labels)
    }
}

pub fn from_range(start: i64, end: i64) -> Index {
    Index::new((start..end).map(Label::Int).collect())
}

pub fn make_datetime_index(timestamps: Vec<DateTime>) -> Index {
    Index::new(timestamps.into_iter().map(Label::Timestamp).collect())
}

pub fn make_object_index(values: Vec<String>) -> Index {
    Index::new(values.into_iter().map(Label::Str).collect())
}

pub fn date_range(start: DateTime, end: DateTime, step: crate::temporal::TimeDelta) -> Index {
    let mut out = Vec::new();
    let mut current = start;
    while current <= end {
        out.push(Label::Timestamp(current));
        current = step.apply_to(current);
    }
    Index::new(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_loc_finds_first_occurrence_on_duplicates() {
        let idx = Index::new(vec![Label::Int(1), Label::Int(2), Label::Int(1)]);
        assert_eq!(idx.get_loc(&Label::Int(1)).unwrap(), 0);
    }

    #[test]
    fn union_deduplicates_and_sorts() {
        let a = Index::new(vec![Label::Int(3), Label::Int(1)]);
        let b = Index::new(vec![Label::Int(1), Label::Int(2)]);
        let u = a.union(&b);
        assert_eq!(
            u.labels(),
            &[Label::Int(1), Label::Int(2), Label::Int(3)]
        );
    }

    #[test]
    fn difference_removes_shared_labels() {
        let a = Index::new(vec![Label::Int(1), Label::Int(2), Label::Int(3)]);
        let b = Index::new(vec![Label::Int(2)]);
        assert_eq!(a.difference(&b).labels(), &[Label::Int(1), Label::Int(3)]);
    }

    #[test]
    fn from_range_is_contiguous() {
        let idx = from_range(0, 3);
        assert_eq!(idx.len(), 3);
        assert!(idx.contains(&Label::Int(2)));
    }
}
