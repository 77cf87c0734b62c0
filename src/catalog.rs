use crate::{
    error::{MockwarpError, MockwarpResult},
    template::{MockupTemplate, ProductType},
};

/// One filter for [`TemplateCatalog::list`].
#[derive(Clone, Debug, PartialEq)]
pub enum TemplateFilter {
    Type(ProductType),
    /// Exact, case-sensitive category match.
    Category(String),
    /// Case-insensitive substring match over name, description and category.
    Search(String),
}

/// Immutable, queryable set of mockup templates.
///
/// Built once at startup (from bundled JSON or caller-supplied records) and
/// shared by reference; iteration order is always construction order, so
/// repeated queries return identical sequences.
#[derive(Clone, Debug)]
pub struct TemplateCatalog {
    templates: Vec<MockupTemplate>,
}

impl TemplateCatalog {
    /// Validates every template and rejects duplicate ids.
    pub fn new(templates: Vec<MockupTemplate>) -> MockwarpResult<Self> {
        let mut seen = std::collections::HashSet::new();
        for t in &templates {
            t.validate()?;
            if !seen.insert(t.id.as_str()) {
                return Err(MockwarpError::invalid_parameter(format!(
                    "duplicate template id '{}'",
                    t.id
                )));
            }
        }
        drop(seen);
        Ok(Self { templates })
    }

    pub fn from_json(json: &str) -> MockwarpResult<Self> {
        let templates: Vec<MockupTemplate> = serde_json::from_str(json)
            .map_err(|e| MockwarpError::serde(format!("template catalog: {e}")))?;
        Self::new(templates)
    }

    /// The catalog bundled with the crate (`data/templates.json`).
    pub fn builtin() -> MockwarpResult<Self> {
        Self::from_json(include_str!("../data/templates.json"))
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn all(&self) -> &[MockupTemplate] {
        &self.templates
    }

    pub fn get(&self, id: &str) -> MockwarpResult<&MockupTemplate> {
        self.templates
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| MockwarpError::template_not_found(id))
    }

    pub fn by_type(&self, product_type: ProductType) -> Vec<&MockupTemplate> {
        self.templates
            .iter()
            .filter(|t| t.product_type == product_type)
            .collect()
    }

    pub fn by_category(&self, category: &str) -> Vec<&MockupTemplate> {
        self.templates
            .iter()
            .filter(|t| t.category == category)
            .collect()
    }

    /// Distinct product types, first-seen order.
    pub fn all_types(&self) -> Vec<ProductType> {
        let mut out = Vec::new();
        for t in &self.templates {
            if !out.contains(&t.product_type) {
                out.push(t.product_type);
            }
        }
        out
    }

    /// Distinct categories, first-seen order.
    pub fn all_categories(&self) -> Vec<&str> {
        let mut out = Vec::<&str>::new();
        for t in &self.templates {
            if !out.contains(&t.category.as_str()) {
                out.push(&t.category);
            }
        }
        out
    }

    /// Case-insensitive substring search over name, description and
    /// category, in catalog order (not relevance-ranked).
    pub fn search(&self, query: &str) -> Vec<&MockupTemplate> {
        let q = query.to_lowercase();
        self.templates
            .iter()
            .filter(|t| {
                t.name.to_lowercase().contains(&q)
                    || t.description.to_lowercase().contains(&q)
                    || t.category.to_lowercase().contains(&q)
            })
            .collect()
    }

    /// `listTemplates` contract: no filter returns the whole catalog.
    pub fn list(&self, filter: Option<&TemplateFilter>) -> Vec<&MockupTemplate> {
        match filter {
            None => self.templates.iter().collect(),
            Some(TemplateFilter::Type(ty)) => self.by_type(*ty),
            Some(TemplateFilter::Category(c)) => self.by_category(c),
            Some(TemplateFilter::Search(q)) => self.search(q),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_parses_and_validates() {
        let cat = TemplateCatalog::builtin().unwrap();
        assert!(!cat.is_empty());
        assert!(cat.get("mug-white-11oz").is_ok());
    }

    #[test]
    fn unknown_id_is_template_not_found() {
        let cat = TemplateCatalog::builtin().unwrap();
        assert!(matches!(
            cat.get("no-such-template"),
            Err(MockwarpError::TemplateNotFound(_))
        ));
    }

    #[test]
    fn by_type_filters_and_misses_are_empty() {
        let cat = TemplateCatalog::builtin().unwrap();
        let mugs = cat.by_type(ProductType::Mug);
        assert!(!mugs.is_empty());
        assert!(mugs.iter().all(|t| t.product_type == ProductType::Mug));

        let none = cat.by_category("No Such Category");
        assert!(none.is_empty());
    }

    #[test]
    fn category_match_is_case_sensitive() {
        let cat = TemplateCatalog::builtin().unwrap();
        assert!(!cat.by_category("Drinkware").is_empty());
        assert!(cat.by_category("drinkware").is_empty());
    }

    #[test]
    fn search_is_case_insensitive_and_in_catalog_order() {
        let cat = TemplateCatalog::builtin().unwrap();
        let hits = cat.search("MUG");
        assert!(hits.len() >= 2);
        let ids: Vec<&str> = hits.iter().map(|t| t.id.as_str()).collect();
        let in_catalog_order: Vec<&str> = cat
            .all()
            .iter()
            .filter(|t| ids.contains(&t.id.as_str()))
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, in_catalog_order);
    }

    #[test]
    fn list_twice_is_identical() {
        let cat = TemplateCatalog::builtin().unwrap();
        let a: Vec<&str> = cat.list(None).iter().map(|t| t.id.as_str()).collect();
        let b: Vec<&str> = cat.list(None).iter().map(|t| t.id.as_str()).collect();
        assert_eq!(a, b);
        assert_eq!(a.len(), cat.len());
    }

    #[test]
    fn all_types_and_categories_dedupe_in_insertion_order() {
        let cat = TemplateCatalog::builtin().unwrap();
        let types = cat.all_types();
        let mut unique = types.clone();
        unique.dedup();
        assert_eq!(types.len(), {
            let set: std::collections::HashSet<_> = types.iter().collect();
            set.len()
        });
        assert_eq!(types, unique);

        let cats = cat.all_categories();
        let set: std::collections::HashSet<_> = cats.iter().collect();
        assert_eq!(cats.len(), set.len());
        assert_eq!(cats[0], "Apparel");
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let cat = TemplateCatalog::builtin().unwrap();
        let mut templates = cat.all().to_vec();
        templates.push(templates[0].clone());
        assert!(matches!(
            TemplateCatalog::new(templates),
            Err(MockwarpError::InvalidParameter(_))
        ));
    }
}
