//! Vector distance functions

use serde::{Deserialize, Serialize};

/// Calculate cosine similarity between two vectors
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product = dot(a, b);
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Distance metric a semantic index ranks by; smaller is more similar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    /// 1 - cosine similarity
    #[default]
    Cosine,
    /// Euclidean (L2) distance
    Euclidean,
    /// 1 - dot product
    InnerProduct,
}

impl DistanceMetric {
    pub fn distance(&self, a: &[f32], b: &[f32]) -> f32 {
        match self {
            Self::Cosine => 1.0 - cosine_similarity(a, b),
            Self::Euclidean => {
                if a.len() != b.len() {
                    return f32::INFINITY;
                }
                a.iter()
                    .zip(b.iter())
                    .map(|(x, y)| (x - y) * (x - y))
                    .sum::<f32>()
                    .sqrt()
            }
            Self::InnerProduct => {
                if a.len() != b.len() {
                    return f32::INFINITY;
                }
                1.0 - dot(a, b)
            }
        }
    }
}

impl std::fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cosine => write!(f, "cosine"),
            Self::Euclidean => write!(f, "euclidean"),
            Self::InnerProduct => write!(f, "inner_product"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity_identical() {
        let similarity = cosine_similarity(&[1.0, 0.0, 0.0], &[1.0, 0.0, 0.0]);
        assert!((similarity - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_cosine_similarity_orthogonal() {
        let similarity = cosine_similarity(&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0]);
        assert!(similarity.abs() < 0.0001);
    }

    #[test]
    fn test_cosine_similarity_zero_vector() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
    }

    #[test]
    fn test_cosine_similarity_different_lengths() {
        assert_eq!(cosine_similarity(&[1.0, 2.0], &[1.0, 2.0, 3.0]), 0.0);
    }

    #[test]
    fn test_cosine_distance_orders_by_similarity() {
        let query = [1.0, 0.0];
        let near = DistanceMetric::Cosine.distance(&query, &[0.9, 0.1]);
        let far = DistanceMetric::Cosine.distance(&query, &[0.0, 1.0]);

        assert!(near < far);
        assert!((far - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_euclidean_distance() {
        let distance = DistanceMetric::Euclidean.distance(&[0.0, 0.0], &[3.0, 4.0]);
        assert!((distance - 5.0).abs() < 0.0001);
    }

    #[test]
    fn test_inner_product_distance() {
        let distance = DistanceMetric::InnerProduct.distance(&[1.0, 0.0], &[1.0, 0.0]);
        assert!(distance.abs() < 0.0001);
    }

    #[test]
    fn test_metric_deserialization() {
        let metric: DistanceMetric = serde_json::from_str("\"inner_product\"").unwrap();
        assert_eq!(metric, DistanceMetric::InnerProduct);
        assert_eq!(metric.to_string(), "inner_product");
    }
}
