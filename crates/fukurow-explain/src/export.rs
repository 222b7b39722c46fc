//! Export records and text rendering of explanation results

use crate::context::ProcessingContext;
use crate::error::ExplainResult;
use crate::path::{JustificationPath, QueryTarget};
use crate::tagger::Tagger;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use uuid::Uuid;

const UNCLEAR: &str = "Explanation available but details unclear";

/// Justification strings of a path: its own strings, else its formatted
/// statements, else its description.
pub fn extract_justifications(path: &JustificationPath) -> Vec<String> {
    if !path.justifications().is_empty() {
        return path.justifications().to_vec();
    }
    let formatted: Vec<String> = path
        .formatted_axioms()
        .into_iter()
        .filter(|s| !s.trim().is_empty())
        .collect();
    if !formatted.is_empty() {
        return formatted;
    }
    if !path.description().trim().is_empty() {
        return vec![path.description().to_string()];
    }
    vec![UNCLEAR.to_string()]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferredTriple {
    pub subject: String,
    pub predicate: String,
    pub object: String,
}

/// One alternative explanation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplanationEntry {
    pub justifications: Vec<String>,
    pub tag: String,
}

/// Statement-count range across alternatives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeRange {
    pub min: usize,
    pub max: usize,
}

/// Export record for one target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplanationRecord {
    pub inferred: InferredTriple,
    pub explanations: Vec<ExplanationEntry>,
    /// Absent when there is no explanation
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub size: Option<SizeRange>,
    pub explanation_count: usize,
    pub task_ids: Vec<String>,
}

impl ExplanationRecord {
    pub fn assemble(
        target: &QueryTarget,
        paths: &[JustificationPath],
        tagger: &Tagger,
        context: &ProcessingContext,
    ) -> Self {
        let (subject, predicate, object) = target.triple();
        let explanations = paths
            .iter()
            .map(|path| ExplanationEntry { justifications: extract_justifications(path), tag: tagger.tag(path) })
            .collect();

        let complexities = paths.iter().map(JustificationPath::complexity);
        let size = match (complexities.clone().min(), complexities.max()) {
            (Some(min), Some(max)) => Some(SizeRange { min, max }),
            _ => None,
        };

        let task_ids = context.task_ids(&target.key()).to_vec();

        Self {
            inferred: InferredTriple { subject, predicate, object },
            explanations,
            size,
            explanation_count: paths.len(),
            task_ids,
        }
    }
}

/// Records of one run keyed by triple key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplanationReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub records: BTreeMap<String, ExplanationRecord>,
}

impl ExplanationReport {
    pub fn new(context: &ProcessingContext) -> Self {
        Self { run_id: context.run_id(), generated_at: Utc::now(), records: BTreeMap::new() }
    }

    pub fn insert(&mut self, target: &QueryTarget, record: ExplanationRecord) {
        self.records.insert(target.key(), record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn to_json_pretty(&self) -> ExplainResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> ExplainResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Plain-text listing: one numbered block per path with its justifications and tag
pub fn format_paths(header: &str, paths: &[JustificationPath], tagger: &Tagger) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", header);
    if paths.is_empty() {
        let _ = writeln!(out, "  No explanation found");
        return out;
    }
    for (i, path) in paths.iter().enumerate() {
        let _ = writeln!(out, "Path {}: {}", i + 1, path.description());
        for justification in extract_justifications(path) {
            let _ = writeln!(out, "    {}", justification);
        }
        let tag = tagger.tag(path);
        if !tag.is_empty() {
            let _ = writeln!(out, "  Tag: {}", tag);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::ReasoningType;
    use fukurow_core::model::{Axiom, Individual, OwlIri};

    fn iri(name: &str) -> OwlIri {
        OwlIri::new(format!("http://example.org/family#{}", name))
    }

    fn ind(name: &str) -> Individual {
        Individual(iri(name))
    }

    fn paths() -> Vec<JustificationPath> {
        let subclass = JustificationPath::new(
            vec![Axiom::class_assertion(&iri("Man"), &ind("john")), Axiom::subclass(&iri("Man"), &iri("Person"))],
            "Subclass reasoning: Man ⊑ Person (1 steps)",
            ReasoningType::Subsumption,
            "class_hierarchy",
        );
        let longer = JustificationPath::new(
            vec![
                Axiom::class_assertion(&iri("Father"), &ind("john")),
                Axiom::subclass(&iri("Father"), &iri("Man")),
                Axiom::subclass(&iri("Man"), &iri("Person")),
            ],
            "Subclass reasoning: Father ⊑ Person (2 steps)",
            ReasoningType::Subsumption,
            "class_hierarchy",
        );
        vec![subclass, longer]
    }

    #[test]
    fn test_extract_justifications_fallbacks() {
        let empty = JustificationPath::new(Vec::new(), "", ReasoningType::OracleNative, "oracle_native");
        assert_eq!(extract_justifications(&empty), vec![UNCLEAR.to_string()]);

        let described = JustificationPath::new(Vec::new(), "only text", ReasoningType::OracleNative, "oracle_native");
        assert_eq!(extract_justifications(&described), vec!["only text".to_string()]);

        let formatted = &paths()[0];
        assert_eq!(
            extract_justifications(formatted),
            vec!["john rdf:type Man".to_string(), "Man SubClassOf Person".to_string()]
        );
    }

    #[test]
    fn test_record_size_and_count() {
        let target = QueryTarget::class_membership(&ind("john"), &iri("Person"));
        let mut context = ProcessingContext::new();
        context.mark_processed(&target.key(), "family.owl");
        context.add_task_id(&target.key(), "T1-BIN");
        context.add_task_id(&target.key(), "T1-MC");

        let record = ExplanationRecord::assemble(&target, &paths(), &Tagger::new(), &context);
        assert_eq!(record.explanation_count, 2);
        assert_eq!(record.size, Some(SizeRange { min: 2, max: 3 }));
        assert_eq!(record.inferred.predicate, "rdf:type");
        assert_eq!(record.explanations[0].tag, "H");
        assert_eq!(record.explanations[1].tag, "HH");
        assert_eq!(record.task_ids, vec!["T1-BIN".to_string(), "T1-MC".to_string()]);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["explanationCount"], 2);
        assert_eq!(json["taskIds"][1], "T1-MC");
        assert_eq!(json["size"]["max"], 3);
        assert_eq!(json["inferred"]["subject"], "john");
    }

    #[test]
    fn test_empty_record_has_no_size() {
        let target = QueryTarget::class_membership(&ind("john"), &iri("Person"));
        let record = ExplanationRecord::assemble(&target, &[], &Tagger::new(), &ProcessingContext::new());
        assert_eq!(record.size, None);
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("size").is_none());
        assert_eq!(json.as_object().unwrap().len(), 4);
        assert!(json.get("sparqlQueries").is_none());
    }

    #[test]
    fn test_report_json_round_trip() {
        let context = ProcessingContext::new();
        let target = QueryTarget::class_membership(&ind("john"), &iri("Person"));
        let mut report = ExplanationReport::new(&context);
        report.insert(&target, ExplanationRecord::assemble(&target, &paths(), &Tagger::new(), &context));

        let json = report.to_json_pretty().unwrap();
        assert!(json.contains("\"john|rdf:type|Person\""));
        let parsed = ExplanationReport::from_json(&json).unwrap();
        assert_eq!(parsed.run_id, context.run_id());
        assert_eq!(parsed.records, report.records);
    }

    #[test]
    fn test_format_paths() {
        let text = format_paths("john rdf:type Person", &paths(), &Tagger::new());
        assert!(text.starts_with("john rdf:type Person\n"));
        assert!(text.contains("Path 1: Subclass reasoning: Man ⊑ Person (1 steps)"));
        assert!(text.contains("    Man SubClassOf Person"));
        assert!(text.contains("  Tag: HH"));
        assert!(format_paths("x", &[], &Tagger::new()).contains("No explanation found"));
    }
}
