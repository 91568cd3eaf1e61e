//! Data models for MeSH descriptor records
//!
//! These models are the validated, owned output of the descriptor streamer.
//! Every record is self-contained (no shared substructure) and serializes
//! to a single JSON object.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A calendar date from a `Year`/`Month`/`Day` block
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MeshDate {
    /// Year
    pub year: i32,
    /// Month (1-12)
    pub month: u32,
    /// Day of month (1-31)
    pub day: u32,
}

impl MeshDate {
    /// Create a new date without calendar validation
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// Convert to a chrono date, if the components form a real date
    pub fn to_naive_date(&self) -> Option<chrono::NaiveDate> {
        chrono::NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

impl fmt::Display for MeshDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Reference to an allowable qualifier, as given inline in the record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualifierReference {
    /// Qualifier unique identifier (e.g. `Q000097`)
    pub qualifier_ui: String,
    /// Qualifier display name (e.g. `blood`)
    pub qualifier_name: String,
    /// Two-letter abbreviation (e.g. `BL`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abbreviation: Option<String>,
}

/// A term (string form) within a concept
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    /// Term unique identifier
    pub term_ui: String,
    /// The term string
    pub term_name: String,
    /// `ConceptPreferredTermYN`
    pub is_concept_preferred_term: bool,
    /// `IsPermutedTermYN`
    pub is_permuted: bool,
    /// `RecordPreferredTermYN`
    pub is_record_preferred: bool,
    /// Lexical tag (`NON`, `ABB`, `NAM`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lexical_tag: Option<String>,
    /// Date the term was created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<MeshDate>,
    /// Thesaurus identifiers the term was taken from
    #[serde(default)]
    pub thesaurus_ids: Vec<String>,
}

/// A UMLS semantic type attached to a concept
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemanticType {
    /// Semantic type identifier (e.g. `T109`)
    pub semantic_type_ui: String,
    /// Semantic type name
    pub semantic_type_name: String,
}

/// A concept grouped under a descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    /// Concept unique identifier
    pub concept_ui: String,
    /// Concept display name
    pub concept_name: String,
    /// `PreferredConceptYN`
    pub is_preferred: bool,
    /// CAS type 1 name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub casn1_name: Option<String>,
    /// Registry number (CAS, EC, UNII, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_number: Option<String>,
    /// Scope note, mixed content flattened to text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope_note: Option<String>,
    /// Semantic types
    #[serde(default)]
    pub semantic_types: Vec<SemanticType>,
    /// Terms in document order
    #[serde(default)]
    pub terms: Vec<Term>,
}

/// A pharmacological action cross-reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PharmacologicalAction {
    /// UI of the referred-to descriptor
    pub descriptor_ui: String,
    /// Name of the referred-to descriptor, when given inline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descriptor_name: Option<String>,
}

/// A tree-number prefix of one of the record's tree numbers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AncestorTreeNumber {
    /// Dotted prefix (e.g. `D03.633`)
    pub tree: String,
    /// Number of levels between the prefix and the full tree number
    pub distance: u32,
}

/// A validated MeSH descriptor record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptorRecord {
    /// Descriptor unique identifier (e.g. `D000001`)
    pub descriptor_ui: String,
    /// Descriptor display name
    pub descriptor_name: String,
    /// `DescriptorClass` attribute (1-4)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descriptor_class: Option<String>,
    /// Creation date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<MeshDate>,
    /// Last revision date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_revised: Option<MeshDate>,
    /// Date established
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_established: Option<MeshDate>,
    /// Allowable qualifiers in document order
    #[serde(default)]
    pub allowable_qualifiers: Vec<QualifierReference>,
    /// Tree numbers in document order
    #[serde(default)]
    pub tree_numbers: Vec<String>,
    /// All distinct prefixes of `tree_numbers`
    #[serde(default)]
    pub ancestor_tree_numbers: Vec<AncestorTreeNumber>,
    /// Concepts in document order
    #[serde(default)]
    pub concepts: Vec<Concept>,
    /// Pharmacological actions; `None` when the record has no action list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pharmacological_actions: Option<Vec<PharmacologicalAction>>,
}

impl DescriptorRecord {
    /// The concept flagged as preferred, if any
    pub fn preferred_concept(&self) -> Option<&Concept> {
        self.concepts.iter().find(|c| c.is_preferred)
    }

    /// Total number of terms across all concepts
    pub fn term_count(&self) -> usize {
        self.concepts.iter().map(|c| c.terms.len()).sum()
    }
}

/// Expand tree numbers into all of their dotted prefixes
///
/// `A01.236.500` yields `A01` (distance 2), `A01.236` (1) and `A01.236.500`
/// (0). Identical (prefix, distance) pairs shared by several tree numbers
/// appear once, at their first position.
pub fn ancestor_tree_numbers(tree_numbers: &[String]) -> Vec<AncestorTreeNumber> {
    let mut seen = HashSet::new();
    let mut ancestors = Vec::new();

    for tree in tree_numbers {
        let parts: Vec<&str> = tree.split('.').collect();
        let depth = parts.len();
        for i in 1..=depth {
            let ancestor = AncestorTreeNumber {
                tree: parts[..i].join("."),
                distance: (depth - i) as u32,
            };
            if seen.insert(ancestor.clone()) {
                ancestors.push(ancestor);
            }
        }
    }

    ancestors
}
