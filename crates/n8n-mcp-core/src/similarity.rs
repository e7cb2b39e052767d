//! Cosine similarity and top-k ranking over embedding vectors.

/// Cosine similarity of two vectors.
///
/// Returns `None` when the lengths differ or either vector has zero magnitude.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Option<f32> {
    if a.len() != b.len() {
        return None;
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return None;
    }

    Some(dot / (norm_a * norm_b))
}

/// Rank candidates by similarity to `query`, best first.
///
/// Returns `(index, score)` pairs truncated to `k`. Equal scores keep ascending
/// index order. Candidates with an undefined similarity are left out.
pub fn rank<V: AsRef<[f32]>>(query: &[f32], candidates: &[V], k: usize) -> Vec<(usize, f32)> {
    let mut scored: Vec<(usize, f32)> = candidates
        .iter()
        .enumerate()
        .filter_map(|(index, candidate)| {
            cosine_similarity(query, candidate.as_ref())
                .filter(|score| !score.is_nan())
                .map(|score| (index, score))
        })
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(k);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_and_orthogonal_vectors() {
        let score = cosine_similarity(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]).unwrap();
        assert!((score - 1.0).abs() < 1e-6);
        let score = cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap();
        assert!(score.abs() < 1e-6);
        let score = cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]).unwrap();
        assert!((score + 1.0).abs() < 1e-6);
    }

    #[test]
    fn zero_magnitude_is_undefined() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), None);
        assert_eq!(cosine_similarity(&[], &[]), None);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), None);
    }

    #[test]
    fn rank_skips_undefined_candidates() {
        let candidates: Vec<Vec<f32>> = vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![1.0]];
        assert_eq!(rank(&[1.0, 0.0], &candidates, 5), vec![(1, 1.0)]);
    }

    #[test]
    fn rank_with_zero_k_is_empty() {
        let candidates: Vec<Vec<f32>> = vec![vec![1.0, 0.0]];
        assert!(rank(&[1.0, 0.0], &candidates, 0).is_empty());
    }
}
