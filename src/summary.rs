//! Summary statistics over a descriptor stream

use std::collections::BTreeMap;
use std::fmt;

use crate::mesh::{DescriptorRecord, MeshDate, MeshError};

/// Summary statistics about a descriptor file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescriptorSummary {
    /// Number of descriptor records
    pub num_descriptors: usize,
    /// Number of concepts across all descriptors
    pub num_concepts: usize,
    /// Number of terms across all concepts
    pub num_terms: usize,
    /// Number of tree numbers across all descriptors
    pub num_tree_numbers: usize,
    /// Number of allowable qualifier references
    pub num_qualifier_refs: usize,
    /// Descriptors carrying a pharmacological action list
    pub num_with_pharmacological_actions: usize,
    /// Descriptors without any tree number
    pub num_without_tree_numbers: usize,
    /// Earliest and latest `DateCreated`
    pub date_created_range: Option<(MeshDate, MeshDate)>,
    /// Tree numbers per top-level category letter (`A` anatomy, `C` diseases, ...)
    pub categories: BTreeMap<char, usize>,
}

impl DescriptorSummary {
    /// Summarize a record sequence, stopping at the first error
    pub fn from_records<I>(records: I) -> Result<Self, MeshError>
    where
        I: IntoIterator<Item = Result<DescriptorRecord, MeshError>>,
    {
        let mut summary = Self::default();
        for record in records {
            summary.observe(&record?);
        }
        Ok(summary)
    }

    /// Add one record to the summary
    pub fn observe(&mut self, record: &DescriptorRecord) {
        self.num_descriptors += 1;
        self.num_concepts += record.concepts.len();
        self.num_terms += record.term_count();
        self.num_tree_numbers += record.tree_numbers.len();
        self.num_qualifier_refs += record.allowable_qualifiers.len();

        if record.pharmacological_actions.is_some() {
            self.num_with_pharmacological_actions += 1;
        }
        if record.tree_numbers.is_empty() {
            self.num_without_tree_numbers += 1;
        }

        for tree in &record.tree_numbers {
            if let Some(category) = tree.chars().next() {
                *self.categories.entry(category).or_insert(0) += 1;
            }
        }

        if let Some(date) = record.date_created {
            self.date_created_range = Some(match self.date_created_range {
                Some((min, max)) => (min.min(date), max.max(date)),
                None => (date, date),
            });
        }
    }
}

impl fmt::Display for DescriptorSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Descriptors: {}", self.num_descriptors)?;
        writeln!(f, "Concepts: {}", self.num_concepts)?;
        writeln!(f, "Terms: {}", self.num_terms)?;
        writeln!(f, "Tree numbers: {}", self.num_tree_numbers)?;
        writeln!(f, "Qualifier references: {}", self.num_qualifier_refs)?;
        writeln!(
            f,
            "With pharmacological actions: {}",
            self.num_with_pharmacological_actions
        )?;
        writeln!(f, "Without tree numbers: {}", self.num_without_tree_numbers)?;
        if let Some((min, max)) = self.date_created_range {
            writeln!(f, "Created: {} to {}", min, max)?;
        }
        Ok(())
    }
}
