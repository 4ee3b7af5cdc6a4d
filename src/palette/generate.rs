use crate::color::Swatch;

/// `n` fresh swatches: new colors, new ids, all unlocked.
pub fn generate_palette(n: usize) -> Vec<Swatch> {
    (0..n).map(|_| Swatch::random()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_palette_len_and_ids() {
        let swatches = generate_palette(8);
        assert_eq!(swatches.len(), 8);
        let ids: HashSet<_> = swatches.iter().map(|s| s.id).collect();
        assert_eq!(ids.len(), 8);
        assert!(swatches.iter().all(|s| !s.locked));
    }

    #[test]
    fn test_ids_not_reused_across_calls() {
        let a: HashSet<_> = generate_palette(5).iter().map(|s| s.id).collect();
        let b: HashSet<_> = generate_palette(5).iter().map(|s| s.id).collect();
        assert!(a.is_disjoint(&b));
    }

    #[test]
    fn test_generate_empty() {
        assert!(generate_palette(0).is_empty());
    }
}
