/// Cosine similarity rescaled from [-1, 1] to [0, 1].
///
/// Absent, empty, mismatched or zero-magnitude inputs score exactly `0.0`.
pub fn similarity(a: Option<&[f32]>, b: Option<&[f32]>) -> f64 {
    match (a, b) {
        (Some(a), Some(b)) => cosine_similarity(a, b)
            .map(|cos| ((cos + 1.0) / 2.0).clamp(0.0, 1.0))
            .unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Raw cosine in [-1, 1]; `None` when undefined.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Option<f64> {
    if a.len() != b.len() || a.is_empty() {
        return None;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = (norm_a * norm_b).sqrt();
    if denom == 0.0 || !denom.is_finite() {
        return None;
    }
    Some((dot / denom).clamp(-1.0, 1.0))
}
