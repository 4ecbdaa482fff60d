use super::*;

#[test]
fn directed_name_keeps_marker_in_code() {
    let p = ParsedName::parse("name&R.jpg").unwrap();
    assert_eq!(p.stem, "name&R.");
    assert_eq!(p.normalized, "name&R.png");
    assert_eq!(p.directive_code.as_deref(), Some("&R"));
    assert!(p.is_directed());
    assert_eq!(p.base(), "name&R");
}

#[test]
fn stem_ends_at_first_dot() {
    let p = ParsedName::parse("my.stamp&R.jpeg").unwrap();
    assert_eq!(p.stem, "my.");
    assert_eq!(p.normalized, "my.png");
    assert!(!p.is_directed());
}

#[test]
fn undirected_name() {
    let p = ParsedName::parse("stampA.webp").unwrap();
    assert_eq!(p.stem, "stampA.");
    assert_eq!(p.directive_code, None);
    assert_eq!(p.directive(&Palette::default()), Directive::Default);
    assert!(p.needs_rename());
    assert!(!ParsedName::parse("stampA.png").unwrap().needs_rename());
}

#[test]
fn missing_dot_is_malformed() {
    let err = ParsedName::parse("stampjpg").unwrap_err();
    assert!(matches!(err, StampError::MalformedFilename(ref n) if n == "stampjpg"));
}

#[test]
fn two_markers_are_ambiguous() {
    let err = ParsedName::parse("a&R&G.jpg").unwrap_err();
    assert!(matches!(err, StampError::AmbiguousDirective(_)));
    // Markers after the first dot are outside the stem.
    assert!(ParsedName::parse("a&R.b&G.jpg").is_ok());
}

#[test]
fn directive_resolution() {
    let palette = Palette::default();
    let d = |raw: &str| ParsedName::parse(raw).unwrap().directive(&palette);
    assert_eq!(d("x&PP.jpg"), Directive::Color("PP".to_string()));
    assert_eq!(d("x&R.png"), Directive::Color("R".to_string()));
    assert_eq!(d("x&E.jpg"), Directive::Expand);
    assert_eq!(d("x&Q.jpg"), Directive::Unrecognized("Q".to_string()));
    assert_eq!(d("x&.jpg"), Directive::Unrecognized(String::new()));
    assert_eq!(d("x&Black.jpg"), Directive::Color("Black".to_string()));
}
