//! Mapping of a completed `DescriptorRecord` subtree onto [`DescriptorRecord`]
//!
//! Mapping and validation happen in one pass once the closing boundary tag
//! has been seen. Text values are trimmed; date components are coerced to
//! integers and checked as calendar dates; `Y`/`N` attributes become
//! booleans. Any failure is reported as a [`RecordValidationError`] naming
//! the record and the offending field path.

use super::error::{RecordValidationError, ValidationIssue};
use super::models::{
    ancestor_tree_numbers, Concept, DescriptorRecord, MeshDate, PharmacologicalAction,
    QualifierReference, SemanticType, Term,
};
use super::tree::ElementNode;

/// Map a descriptor record subtree into a validated record
pub fn map_descriptor(node: &ElementNode) -> Result<DescriptorRecord, RecordValidationError> {
    let mut mapper = Mapper { descriptor_ui: None };

    let descriptor_ui = mapper.required_unique_text(node, "DescriptorUI")?;
    mapper.descriptor_ui = Some(descriptor_ui.clone());

    let descriptor_name = mapper.required_unique_text(node, "DescriptorName/String")?;

    let date_created = mapper.date(node, "DateCreated", "DateCreated")?;
    let date_revised = mapper.date(node, "DateRevised", "DateRevised")?;
    let date_established = mapper.date(node, "DateEstablished", "DateEstablished")?;

    let allowable_qualifiers = node
        .find_all("AllowableQualifiersList/AllowableQualifier")
        .into_iter()
        .enumerate()
        .map(|(i, q)| mapper.qualifier(q, &indexed("AllowableQualifiersList/AllowableQualifier", i)))
        .collect::<Result<Vec<_>, _>>()?;

    let tree_numbers = node
        .find_all("TreeNumberList/TreeNumber")
        .into_iter()
        .enumerate()
        .map(|(i, t)| mapper.leaf_text(t, &indexed("TreeNumberList/TreeNumber", i)))
        .collect::<Result<Vec<_>, _>>()?;

    let concepts = node
        .find_all("ConceptList/Concept")
        .into_iter()
        .enumerate()
        .map(|(i, c)| mapper.concept(c, &indexed("ConceptList/Concept", i)))
        .collect::<Result<Vec<_>, _>>()?;

    let pharmacological_actions = match node.child("PharmacologicalActionList") {
        Some(list) => Some(
            list.children("PharmacologicalAction")
                .enumerate()
                .map(|(i, pa)| {
                    mapper.pharmacological_action(
                        pa,
                        &indexed("PharmacologicalActionList/PharmacologicalAction", i),
                    )
                })
                .collect::<Result<Vec<_>, _>>()?,
        ),
        None => None,
    };

    Ok(DescriptorRecord {
        descriptor_ui,
        descriptor_name,
        descriptor_class: optional_attribute(node, "DescriptorClass"),
        date_created,
        date_revised,
        date_established,
        allowable_qualifiers,
        ancestor_tree_numbers: ancestor_tree_numbers(&tree_numbers),
        tree_numbers,
        concepts,
        pharmacological_actions,
    })
}

/// `Parent/Child` at zero-based position `i` rendered as `Parent/Child[i+1]`
fn indexed(path: &str, i: usize) -> String {
    format!("{}[{}]", path, i + 1)
}

fn join(parent: &str, child: &str) -> String {
    format!("{}/{}", parent, child)
}

fn optional_text(node: &ElementNode, path: &str) -> Option<String> {
    node.find(path)
        .map(|n| n.text_content().trim().to_string())
        .filter(|s| !s.is_empty())
}

fn optional_attribute(node: &ElementNode, name: &str) -> Option<String> {
    node.attribute(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

struct Mapper {
    descriptor_ui: Option<String>,
}

impl Mapper {
    fn error(&self, field: impl Into<String>, issue: ValidationIssue) -> RecordValidationError {
        RecordValidationError::new(self.descriptor_ui.clone(), field, issue)
    }

    fn leaf_text(&self, node: &ElementNode, field: &str) -> Result<String, RecordValidationError> {
        let text = node.text_content();
        let text = text.trim();
        if text.is_empty() {
            return Err(self.error(field, ValidationIssue::Empty));
        }
        Ok(text.to_string())
    }

    fn required_text(
        &self,
        node: &ElementNode,
        path: &str,
        field: &str,
    ) -> Result<String, RecordValidationError> {
        match node.find(path) {
            Some(n) => self.leaf_text(n, field),
            None => Err(self.error(field, ValidationIssue::Missing)),
        }
    }

    /// Like `required_text`, but a second match is an error rather than ignored
    fn required_unique_text(
        &self,
        node: &ElementNode,
        path: &str,
    ) -> Result<String, RecordValidationError> {
        match node.find_all(path).as_slice() {
            [] => Err(self.error(path, ValidationIssue::Missing)),
            [only] => self.leaf_text(only, path),
            many => Err(self.error(path, ValidationIssue::Duplicate(many.len()))),
        }
    }

    fn flag(&self, node: &ElementNode, name: &str, field: &str) -> Result<bool, RecordValidationError> {
        match node.attribute(name).map(str::trim) {
            None | Some("N") => Ok(false),
            Some("Y") => Ok(true),
            Some(other) => Err(self.error(
                format!("{}@{}", field, name),
                ValidationIssue::InvalidFlag(other.to_string()),
            )),
        }
    }

    fn integer<T: std::str::FromStr>(
        &self,
        node: &ElementNode,
        tag: &str,
        field: &str,
    ) -> Result<T, RecordValidationError> {
        let field = join(field, tag);
        let text = self.required_text(node, tag, &field)?;
        text.parse()
            .map_err(|_| self.error(field, ValidationIssue::InvalidInteger(text)))
    }

    /// A date block without child elements maps to `None`, not a zero date
    fn date(
        &self,
        node: &ElementNode,
        tag: &str,
        field: &str,
    ) -> Result<Option<MeshDate>, RecordValidationError> {
        let block = match node.child(tag) {
            Some(block) if block.has_elements() => block,
            _ => return Ok(None),
        };

        let date = MeshDate::new(
            self.integer(block, "Year", field)?,
            self.integer(block, "Month", field)?,
            self.integer(block, "Day", field)?,
        );
        if date.to_naive_date().is_none() {
            return Err(self.error(
                field,
                ValidationIssue::InvalidDate {
                    year: date.year,
                    month: date.month,
                    day: date.day,
                },
            ));
        }
        Ok(Some(date))
    }

    fn qualifier(
        &self,
        node: &ElementNode,
        field: &str,
    ) -> Result<QualifierReference, RecordValidationError> {
        let referred = join(field, "QualifierReferredTo");
        Ok(QualifierReference {
            qualifier_ui: self.required_text(
                node,
                "QualifierReferredTo/QualifierUI",
                &join(&referred, "QualifierUI"),
            )?,
            qualifier_name: self.required_text(
                node,
                "QualifierReferredTo/QualifierName/String",
                &join(&referred, "QualifierName/String"),
            )?,
            abbreviation: optional_text(node, "Abbreviation"),
        })
    }

    fn concept(&self, node: &ElementNode, field: &str) -> Result<Concept, RecordValidationError> {
        let semantic_types = node
            .find_all("SemanticTypeList/SemanticType")
            .into_iter()
            .enumerate()
            .map(|(i, st)| {
                let field = join(field, &indexed("SemanticTypeList/SemanticType", i));
                Ok::<_, RecordValidationError>(SemanticType {
                    semantic_type_ui: self.required_text(
                        st,
                        "SemanticTypeUI",
                        &join(&field, "SemanticTypeUI"),
                    )?,
                    semantic_type_name: self.required_text(
                        st,
                        "SemanticTypeName",
                        &join(&field, "SemanticTypeName"),
                    )?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let terms = node
            .find_all("TermList/Term")
            .into_iter()
            .enumerate()
            .map(|(i, t)| self.term(t, &join(field, &indexed("TermList/Term", i))))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Concept {
            concept_ui: self.required_text(node, "ConceptUI", &join(field, "ConceptUI"))?,
            concept_name: self.required_text(
                node,
                "ConceptName/String",
                &join(field, "ConceptName/String"),
            )?,
            is_preferred: self.flag(node, "PreferredConceptYN", field)?,
            casn1_name: optional_text(node, "CASN1Name"),
            registry_number: optional_text(node, "RegistryNumber"),
            scope_note: optional_text(node, "ScopeNote"),
            semantic_types,
            terms,
        })
    }

    fn term(&self, node: &ElementNode, field: &str) -> Result<Term, RecordValidationError> {
        Ok(Term {
            term_ui: self.required_text(node, "TermUI", &join(field, "TermUI"))?,
            term_name: self.required_text(node, "String", &join(field, "String"))?,
            is_concept_preferred_term: self.flag(node, "ConceptPreferredTermYN", field)?,
            is_permuted: self.flag(node, "IsPermutedTermYN", field)?,
            is_record_preferred: self.flag(node, "RecordPreferredTermYN", field)?,
            lexical_tag: optional_attribute(node, "LexicalTag"),
            date_created: self.date(node, "DateCreated", &join(field, "DateCreated"))?,
            thesaurus_ids: node
                .find_all("ThesaurusIDlist/ThesaurusID")
                .into_iter()
                .filter_map(|t| {
                    let text = t.text_content();
                    let text = text.trim();
                    (!text.is_empty()).then(|| text.to_string())
                })
                .collect(),
        })
    }

    fn pharmacological_action(
        &self,
        node: &ElementNode,
        field: &str,
    ) -> Result<PharmacologicalAction, RecordValidationError> {
        Ok(PharmacologicalAction {
            descriptor_ui: self.required_text(
                node,
                "DescriptorReferredTo/DescriptorUI",
                &join(field, "DescriptorReferredTo/DescriptorUI"),
            )?,
            descriptor_name: optional_text(node, "DescriptorReferredTo/DescriptorName/String"),
        })
    }
}
