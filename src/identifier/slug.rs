//! Identifier extraction from SEO and legacy slugs.

use crate::identifier::classify::{classify, Classification};

/// Prefix of the last segment of every canonical listing path.
pub const SEO_SLUG_PREFIX: &str = "prodazha-uchastka-";

/// Extract the identifier from a canonical last segment (`prodazha-uchastka-<id>`).
pub fn parse_seo_slug(slug: &str) -> Classification {
    match slug.trim().strip_prefix(SEO_SLUG_PREFIX) {
        Some(rest) => classify(rest),
        None => Classification::Invalid,
    }
}

/// Extract the trailing identifier from an old `/uchastok/<words>-<id>` slug.
///
/// A trailing hyphenated UUID wins over trailing digits, since a UUID itself
/// ends in a hex group that may be all digits.
pub fn parse_legacy_slug(slug: &str) -> Classification {
    let slug = slug.trim();

    if slug.len() >= 36 && slug.is_char_boundary(slug.len() - 36) {
        let tail = &slug[slug.len() - 36..];
        let head = &slug[..slug.len() - 36];
        if head.is_empty() || head.ends_with('-') {
            if let found @ Classification::Uuid(_) = classify(tail) {
                return found;
            }
        }
    }

    let tail = slug.rsplit('-').next().unwrap_or(slug);
    classify(tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::IntId;

    const ID: &str = "0b9e6f3a-1c2d-4e5f-8a9b-0c1d2e3f4a5b";

    #[test]
    fn test_seo_slug() {
        assert_eq!(
            parse_seo_slug("prodazha-uchastka-123"),
            Classification::IntId(IntId::new(123).unwrap())
        );
        assert!(matches!(
            parse_seo_slug(&format!("prodazha-uchastka-{ID}")),
            Classification::Uuid(_)
        ));
        assert_eq!(parse_seo_slug("prodazha-uchastka-"), Classification::Invalid);
        assert_eq!(parse_seo_slug("uchastok-123"), Classification::Invalid);
        assert_eq!(parse_seo_slug("prodazha-uchastka--5"), Classification::Invalid);
    }

    #[test]
    fn test_legacy_slug_trailing_int() {
        assert_eq!(
            parse_legacy_slug("uchastok-kumachevo-10-sotok-123"),
            Classification::IntId(IntId::new(123).unwrap())
        );
        assert_eq!(parse_legacy_slug("55"), Classification::IntId(IntId::new(55).unwrap()));
    }

    #[test]
    fn test_legacy_slug_trailing_uuid() {
        match parse_legacy_slug(&format!("uchastok-kumachevo-{ID}")) {
            Classification::Uuid(id) => assert_eq!(id.to_string(), ID),
            other => panic!("expected uuid, got {other:?}"),
        }
        assert!(matches!(parse_legacy_slug(ID), Classification::Uuid(_)));
    }

    #[test]
    fn test_legacy_slug_without_id() {
        assert_eq!(parse_legacy_slug("uchastok-kumachevo-10-sotok"), Classification::Invalid);
        assert_eq!(parse_legacy_slug(""), Classification::Invalid);
        assert_eq!(parse_legacy_slug("участок-кумачёво"), Classification::Invalid);
    }
}
