//! Best-variant selection for a requested (weight, style).
//!
//! The resolver ranks a descriptor's declared `variants` only; whether a
//! resource actually exists for the winner is a separate question, answered
//! against `files` at load time.

use crate::catalog::{FontDescriptor, FontStyle, VariantSpec};

/// Picks the best declared variant for the desired weight and style.
///
/// Selection order, first match wins:
/// 1. exact (weight, style)
/// 2. closest weight among variants with the desired style; ties go to the
///    earlier entry in declaration order
/// 3. exact (weight, normal), when the desired style is italic
/// 4. the first declared variant
///
/// Staying in the requested style outranks matching the exact weight: a
/// substituted weight reads less wrong than a substituted slant.
///
/// An empty `variants` list yields a synthetic 400/normal variant; such a
/// descriptor has nothing to load and callers treat it as unloadable.
pub fn resolve(descriptor: &FontDescriptor, weight: u16, style: FontStyle) -> VariantSpec {
    let variants = &descriptor.variants;
    if variants.is_empty() {
        return VariantSpec::new(400, FontStyle::Normal);
    }

    if let Some(exact) = variants
        .iter()
        .find(|v| v.weight == weight && v.style == style)
    {
        return *exact;
    }

    // min_by_key keeps the first of equally-close weights, which makes the
    // tie-break deterministic in declaration order.
    if let Some(closest) = variants
        .iter()
        .filter(|v| v.style == style)
        .min_by_key(|v| v.weight.abs_diff(weight))
    {
        return *closest;
    }

    if style != FontStyle::Normal {
        if let Some(upright) = variants
            .iter()
            .find(|v| v.weight == weight && v.style == FontStyle::Normal)
        {
            return *upright;
        }
    }

    variants[0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FontSource;
    use std::collections::BTreeMap;

    fn descriptor(variants: &[(u16, FontStyle)]) -> FontDescriptor {
        FontDescriptor {
            id: "test".to_string(),
            family: "Test".to_string(),
            category: None,
            variants: variants
                .iter()
                .map(|&(w, s)| VariantSpec::new(w, s))
                .collect(),
            files: BTreeMap::new(),
            source: FontSource::Bundled,
        }
    }

    const N: FontStyle = FontStyle::Normal;
    const I: FontStyle = FontStyle::Italic;

    #[test]
    fn exact_match_wins() {
        let d = descriptor(&[(400, N), (700, N), (700, I)]);
        assert_eq!(resolve(&d, 700, I), VariantSpec::new(700, I));
    }

    #[test]
    fn style_preserved_over_weight_match() {
        let d = descriptor(&[(400, N), (400, I), (700, N)]);
        assert_eq!(resolve(&d, 700, I), VariantSpec::new(400, I));
    }

    #[test]
    fn closest_weight_within_style() {
        let d = descriptor(&[(100, N), (300, N), (900, N)]);
        assert_eq!(resolve(&d, 400, N), VariantSpec::new(300, N));
    }

    #[test]
    fn weight_tie_breaks_to_declaration_order() {
        let d = descriptor(&[(300, N), (500, N)]);
        assert_eq!(resolve(&d, 400, N), VariantSpec::new(300, N));
    }

    #[test]
    fn italic_request_falls_back_to_upright_weight_match() {
        let d = descriptor(&[(300, N), (700, N)]);
        assert_eq!(resolve(&d, 700, I), VariantSpec::new(700, N));
    }

    #[test]
    fn last_resort_is_first_declared_variant() {
        let d = descriptor(&[(500, I), (900, I)]);
        assert_eq!(resolve(&d, 200, N), VariantSpec::new(500, I));
    }

    #[test]
    fn empty_variants_yield_synthetic_default() {
        let d = descriptor(&[]);
        assert_eq!(resolve(&d, 700, I), VariantSpec::new(400, N));
    }

    #[test]
    fn always_returns_a_declared_variant() {
        let d = descriptor(&[(100, N), (400, I), (800, N)]);
        for weight in (100..=900).step_by(100) {
            for style in [N, I] {
                let resolved = resolve(&d, weight, style);
                assert!(d.variants.contains(&resolved));
            }
        }
    }
}
