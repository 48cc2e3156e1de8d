/// In-process vector index over precomputed podcast-description embeddings
///
/// The index file is JSONL: one record per line with the document text, a
/// metadata object, and the embedding vector. Building the file (ingestion,
/// chunking, embedding generation) happens offline; this module only loads
/// and queries it.
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Deserialize;

/// One record of the precomputed index
#[derive(Debug, Clone, Deserialize)]
pub struct IndexedDocument {
    #[serde(default)]
    pub pod_id: String,
    pub text: String,
    #[serde(default)]
    pub metadata: serde_json::Value,
    pub embedding: Vec<f32>,
}

impl IndexedDocument {
    /// Podcast key for catalog joins. Records written without a top-level
    /// pod id fall back to the metadata keys older index builds used.
    pub fn pod_id(&self) -> String {
        if !self.pod_id.is_empty() {
            return self.pod_id.clone();
        }
        for key in ["pod_id", "clientId", "id"] {
            if let Some(id) = self.metadata.get(key).and_then(|v| v.as_str()) {
                return id.to_string();
            }
        }
        "unknown".to_string()
    }
}

/// A scored query hit
#[derive(Debug, Clone)]
pub struct VectorHit {
    pub pod_id: String,
    pub text: String,
    pub metadata: serde_json::Value,
    /// Cosine distance in [0, 2]; lower is closer
    pub distance: f32,
}

#[derive(Debug, Default)]
pub struct VectorIndex {
    docs: Vec<IndexedDocument>,
    norms: Vec<f32>,
}

impl VectorIndex {
    /// Loads the index from a JSONL file. Malformed lines and vectors whose
    /// dimension disagrees with the first record are skipped with a warning;
    /// a missing file yields an empty index so queries return no hits
    /// instead of failing the server.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to open vector index; queries will return no hits"
                );
                return Self::default();
            }
        };

        let mut docs: Vec<IndexedDocument> = Vec::new();
        let mut dim: Option<usize> = None;

        for (line_no, line) in BufReader::new(file).lines().enumerate() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    tracing::warn!(line = line_no + 1, error = %e, "Unreadable index line");
                    continue;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            let doc: IndexedDocument = match serde_json::from_str(&line) {
                Ok(doc) => doc,
                Err(e) => {
                    tracing::warn!(line = line_no + 1, error = %e, "Skipping malformed index record");
                    continue;
                }
            };
            match dim {
                None => dim = Some(doc.embedding.len()),
                Some(dim) if doc.embedding.len() != dim => {
                    tracing::warn!(
                        line = line_no + 1,
                        expected = dim,
                        found = doc.embedding.len(),
                        "Skipping index record with mismatched embedding dimension"
                    );
                    continue;
                }
                Some(_) => {}
            }
            docs.push(doc);
        }

        tracing::info!(path = %path.display(), documents = docs.len(), "Vector index loaded");
        Self::from_documents(docs)
    }

    /// Builds an index from in-memory records
    pub fn from_documents(docs: Vec<IndexedDocument>) -> Self {
        let norms = docs
            .iter()
            .map(|doc| doc.embedding.iter().map(|x| x * x).sum::<f32>().sqrt())
            .collect();
        Self { docs, norms }
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Top-k nearest documents by cosine distance, sorted in non-decreasing
    /// distance order. k is capped by the index size.
    pub fn query(&self, embedding: &[f32], k: usize) -> Vec<VectorHit> {
        let query_norm = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();

        let mut hits: Vec<VectorHit> = self
            .docs
            .iter()
            .zip(&self.norms)
            .filter(|(doc, _)| doc.embedding.len() == embedding.len())
            .map(|(doc, norm)| {
                let dot: f32 = doc
                    .embedding
                    .iter()
                    .zip(embedding)
                    .map(|(a, b)| a * b)
                    .sum();
                let denom = norm * query_norm;
                let similarity = if denom > 0.0 { dot / denom } else { 0.0 };
                VectorHit {
                    pod_id: doc.pod_id(),
                    text: doc.text.clone(),
                    metadata: doc.metadata.clone(),
                    distance: 1.0 - similarity,
                }
            })
            .collect();

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits.truncate(k);
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn doc(pod_id: &str, embedding: Vec<f32>) -> IndexedDocument {
        IndexedDocument {
            pod_id: pod_id.to_string(),
            text: format!("description of {}", pod_id),
            metadata: json!({}),
            embedding,
        }
    }

    #[test]
    fn test_query_orders_by_nondecreasing_distance() {
        let index = VectorIndex::from_documents(vec![
            doc("far", vec![-1.0, 0.0]),
            doc("near", vec![1.0, 0.1]),
            doc("mid", vec![0.0, 1.0]),
        ]);

        let hits = index.query(&[1.0, 0.0], 3);
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].pod_id, "near");
        assert_eq!(hits[2].pod_id, "far");
        for pair in hits.windows(2) {
            assert!(pair[0].distance <= pair[1].distance);
        }
    }

    #[test]
    fn test_query_caps_k_at_index_size() {
        let index = VectorIndex::from_documents(vec![doc("only", vec![1.0, 0.0])]);
        let hits = index.query(&[1.0, 0.0], 5);
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_identical_vector_has_zero_distance() {
        let index = VectorIndex::from_documents(vec![doc("same", vec![0.6, 0.8])]);
        let hits = index.query(&[0.6, 0.8], 1);
        assert!(hits[0].distance.abs() < 1e-6);
    }

    #[test]
    fn test_zero_vector_query_yields_max_distance() {
        let index = VectorIndex::from_documents(vec![doc("a", vec![1.0, 0.0])]);
        let hits = index.query(&[0.0, 0.0], 1);
        assert_eq!(hits[0].distance, 1.0);
    }

    #[test]
    fn test_pod_id_falls_back_to_metadata() {
        let mut record = doc("", vec![1.0]);
        record.metadata = json!({"clientId": "meta-pod"});
        assert_eq!(record.pod_id(), "meta-pod");

        let record = doc("", vec![1.0]);
        assert_eq!(record.pod_id(), "unknown");
    }

    #[test]
    fn test_load_skips_malformed_lines_and_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.jsonl");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, r#"{{"pod_id":"p1","text":"t1","embedding":[1.0,0.0]}}"#).unwrap();
        writeln!(file, "not json").unwrap();
        writeln!(file, r#"{{"pod_id":"p2","text":"t2","embedding":[0.0]}}"#).unwrap();
        writeln!(file, r#"{{"pod_id":"p3","text":"t3","embedding":[0.0,1.0]}}"#).unwrap();

        let index = VectorIndex::load(&path);
        assert_eq!(index.len(), 2);

        let empty = VectorIndex::load(dir.path().join("nope.jsonl"));
        assert!(empty.is_empty());
        assert!(empty.query(&[1.0, 0.0], 3).is_empty());
    }
}
