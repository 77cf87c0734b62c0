use mockwarp::{MockwarpError, ProductType, TemplateCatalog, TemplateFilter};

#[test]
fn builtin_catalog_is_deterministic_across_loads() {
    let a = TemplateCatalog::builtin().unwrap();
    let b = TemplateCatalog::builtin().unwrap();
    let ids_a: Vec<&str> = a.list(None).iter().map(|t| t.id.as_str()).collect();
    let ids_b: Vec<&str> = b.list(None).iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids_a, ids_b);
    assert!(!ids_a.is_empty());
}

#[test]
fn list_filters_match_dedicated_queries() {
    let cat = TemplateCatalog::builtin().unwrap();

    let by_type = cat.list(Some(&TemplateFilter::Type(ProductType::Poster)));
    assert_eq!(by_type.len(), cat.by_type(ProductType::Poster).len());
    assert!(by_type.iter().all(|t| t.product_type == ProductType::Poster));

    let by_cat = cat.list(Some(&TemplateFilter::Category("Wall Art".to_string())));
    assert!(!by_cat.is_empty());

    let searched = cat.list(Some(&TemplateFilter::Search("poster".to_string())));
    assert!(searched.len() >= by_type.len());
}

#[test]
fn every_builtin_template_passes_validation_and_has_sane_geometry() {
    let cat = TemplateCatalog::builtin().unwrap();
    for t in cat.all() {
        t.validate().unwrap();
        let (w, h) = t.recommended_canvas_dimensions();
        assert!(w > 0 && h > 0, "template {}", t.id);
        assert!((0.0..=1.0).contains(&t.curve_intensity), "template {}", t.id);
    }
}

#[test]
fn catalog_json_roundtrip_preserves_records() {
    let cat = TemplateCatalog::builtin().unwrap();
    let json = serde_json::to_string(cat.all()).unwrap();
    let back = TemplateCatalog::from_json(&json).unwrap();
    assert_eq!(back.all(), cat.all());
}

#[test]
fn malformed_catalog_json_is_a_serde_error() {
    assert!(matches!(
        TemplateCatalog::from_json("{ not json"),
        Err(MockwarpError::Serde(_))
    ));
}

#[test]
fn missing_template_reports_the_requested_id() {
    let cat = TemplateCatalog::builtin().unwrap();
    let err = cat.get("mug-white-20oz").unwrap_err();
    assert!(err.to_string().contains("mug-white-20oz"));
}
