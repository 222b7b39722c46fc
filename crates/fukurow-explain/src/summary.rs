//! Tagging statistics over a set of paths

use crate::path::JustificationPath;
use crate::tagger::Tagger;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaggingSummary {
    pub total_explanations: usize,
    pub tags: Vec<String>,
    pub tag_frequency: BTreeMap<String, usize>,
    /// Number of paths each code occurs in
    pub feature_frequency: BTreeMap<char, usize>,
    pub avg_complexity: f64,
    pub min_complexity: usize,
    pub max_complexity: usize,
    pub complexity_range: usize,
}

impl TaggingSummary {
    pub fn from_paths(paths: &[JustificationPath], tagger: &Tagger) -> Self {
        let mut tags = Vec::with_capacity(paths.len());
        let mut tag_frequency = BTreeMap::new();
        let mut feature_frequency = BTreeMap::new();

        for path in paths {
            let analysis = tagger.analyze(path);
            for (code, _) in &analysis.counts {
                *feature_frequency.entry(*code).or_insert(0) += 1;
            }
            *tag_frequency.entry(analysis.tag.clone()).or_insert(0) += 1;
            tags.push(analysis.tag);
        }

        let complexities: Vec<usize> = paths.iter().map(JustificationPath::complexity).collect();
        let min_complexity = complexities.iter().copied().min().unwrap_or(0);
        let max_complexity = complexities.iter().copied().max().unwrap_or(0);
        let avg_complexity = if complexities.is_empty() {
            0.0
        } else {
            complexities.iter().sum::<usize>() as f64 / complexities.len() as f64
        };

        Self {
            total_explanations: paths.len(),
            tags,
            tag_frequency,
            feature_frequency,
            avg_complexity,
            min_complexity,
            max_complexity,
            complexity_range: max_complexity - min_complexity,
        }
    }

    /// Sorted unique non-empty tags, comma separated
    pub fn tag_string(&self) -> String {
        self.tags.iter().filter(|t| !t.is_empty()).sorted().dedup().join(",")
    }

    pub fn has_feature(&self, code: char) -> bool {
        self.feature_frequency.contains_key(&code)
    }

    pub fn log(&self) {
        info!("=== Explanation Tagging Summary ===");
        info!("Total explanations: {}", self.total_explanations);
        info!("All tags: {:?}", self.tags);
        info!("Tag frequency:");
        for (tag, count) in self.tag_frequency.iter().sorted_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0))) {
            info!("  {}: {}", tag, count);
        }
        info!("Feature frequency:");
        for (code, count) in self.feature_frequency.iter().sorted_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0))) {
            info!("  {}: {}", code, count);
        }
        info!(
            "Complexity: average {:.2}, range {} - {} (size {})",
            self.avg_complexity, self.min_complexity, self.max_complexity, self.complexity_range
        );
    }
}
