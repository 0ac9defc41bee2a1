//! Read-only catalogs offered to the page editor: single-section components and whole-page
//! templates. Filtering happens client side over the fetched list.

use serde::{Deserialize, Serialize};

use super::page::{PageContent, TemplateType};
use super::section::{CONTACT, CONTENT, CTA, FEATURES, HERO, SectionKind};

/// A reusable section template. Adding it to a page creates a section whose props come from
/// the default-prop factory for `component_type`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComponentEntry {
    #[serde(
        deserialize_with = "crate::model::optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub component_type: String,
    pub default_render_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ComponentEntry {
    pub fn section_kind(&self) -> SectionKind {
        SectionKind::defaults_for(&self.component_type)
    }
}

/// A whole-page starting point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TemplateEntry {
    #[serde(
        deserialize_with = "crate::model::optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    pub template_type: TemplateType,
    pub template_content: PageContent,
    pub category: String,
}

/// Client-side predicate over a fetched catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogFilter {
    pub search: String,
    pub category: Option<String>,
}

impl CatalogFilter {
    fn matches_text(&self, fields: &[&str]) -> bool {
        let needle = self.search.trim().to_lowercase();
        needle.is_empty() || fields.iter().any(|f| f.to_lowercase().contains(&needle))
    }

    fn matches_category(&self, category: Option<&str>) -> bool {
        match self.category.as_deref() {
            None | Some("") | Some("all") => true,
            Some(wanted) => category.is_some_and(|c| c.eq_ignore_ascii_case(wanted)),
        }
    }

    pub fn matches_component(&self, entry: &ComponentEntry) -> bool {
        let fields = [
            entry.name.as_str(),
            entry.description.as_str(),
            entry.component_type.as_str(),
        ];
        self.matches_text(&fields) && self.matches_category(entry.category.as_deref())
    }

    pub fn matches_template(&self, entry: &TemplateEntry) -> bool {
        self.matches_text(&[entry.name.as_str(), entry.description.as_str()])
            && self.matches_category(Some(entry.category.as_str()))
    }

    pub fn components<'a>(&self, entries: &'a [ComponentEntry]) -> Vec<&'a ComponentEntry> {
        entries.iter().filter(|e| self.matches_component(e)).collect()
    }

    pub fn templates<'a>(&self, entries: &'a [TemplateEntry]) -> Vec<&'a TemplateEntry> {
        entries.iter().filter(|e| self.matches_template(e)).collect()
    }
}

fn distinct_categories<'a>(categories: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut categories: Vec<String> = categories
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect();
    categories.sort();
    categories.dedup();
    categories
}

/// Distinct, sorted, non-empty template categories.
pub fn template_categories(entries: &[TemplateEntry]) -> Vec<String> {
    distinct_categories(entries.iter().map(|e| e.category.as_str()))
}

/// Distinct, sorted, non-empty component categories.
pub fn component_categories(entries: &[ComponentEntry]) -> Vec<String> {
    distinct_categories(entries.iter().filter_map(|e| e.category.as_deref()))
}

/// One catalog entry per section type the builder knows natively.
pub fn builtin_components() -> Vec<ComponentEntry> {
    let entry = |component_type: &str, name: &str, description: &str| ComponentEntry {
        id: Some(format!("builtin-{component_type}")),
        name: name.to_string(),
        description: description.to_string(),
        component_type: component_type.to_string(),
        default_render_code: String::new(),
        thumbnail_url: None,
        category: Some("basic".to_string()),
    };
    vec![
        entry(HERO, "Hero Banner", "Large heading with a call-to-action button"),
        entry(FEATURES, "Features Grid", "Highlight key benefits in a grid"),
        entry(CONTENT, "Text Content", "Rich text block written in Markdown"),
        entry(CONTACT, "Contact Details", "Email, phone and address"),
        entry(CTA, "Call to Action", "Short pitch with a single button"),
    ]
}

/// The template offered when the catalog cannot be fetched.
pub fn blank_template() -> TemplateEntry {
    TemplateEntry {
        id: Some("builtin-blank".to_string()),
        name: "Blank Page".to_string(),
        description: "Start from an empty page".to_string(),
        thumbnail_url: None,
        template_type: TemplateType::Blank,
        template_content: PageContent::default(),
        category: "basic".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::page::PageDocument;
    use crate::model::section::props_json;
    use serde_json::json;

    fn templates() -> Vec<TemplateEntry> {
        serde_json::from_value(json!([
            {"name": "Course Landing", "description": "Sell a course", "templateType": "course", "category": "Marketing"},
            {"name": "About", "description": "Company story", "templateType": "about", "category": "company"},
            {"name": "Contact", "description": "Reach the team", "templateType": "contact", "category": "company"}
        ]))
        .unwrap()
    }

    #[test]
    fn test_adding_cta_component_uses_factory_defaults() {
        let entry = ComponentEntry {
            name: "CTA".into(),
            component_type: "cta".into(),
            ..Default::default()
        };
        let mut doc = PageDocument::default();
        let id = doc.add_section(entry.section_kind());

        let section = doc.content.section(&id).unwrap();
        assert_eq!(section.section_type(), "cta");
        assert_eq!(
            props_json(section),
            json!({
                "title": "Get Started Today",
                "text": "Join thousands of satisfied customers",
                "buttonText": "Start Free Trial",
                "buttonLink": "#"
            })
        );
    }

    #[test]
    fn test_filter_by_search_is_case_insensitive() {
        let entries = templates();
        let filter = CatalogFilter {
            search: "TEAM".into(),
            category: None,
        };
        let found = filter.templates(&entries);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Contact");
    }

    #[test]
    fn test_filter_by_category() {
        let entries = templates();
        let filter = CatalogFilter {
            search: String::new(),
            category: Some("company".into()),
        };
        assert_eq!(filter.templates(&entries).len(), 2);

        let all = CatalogFilter {
            search: String::new(),
            category: Some("all".into()),
        };
        assert_eq!(all.templates(&entries).len(), 3);
    }

    #[test]
    fn test_component_search_matches_type() {
        let entries = builtin_components();
        let filter = CatalogFilter {
            search: "cta".into(),
            category: None,
        };
        let found = filter.components(&entries);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].component_type, "cta");
    }

    #[test]
    fn test_template_categories_are_distinct_and_sorted() {
        assert_eq!(template_categories(&templates()), ["Marketing", "company"]);
    }

    #[test]
    fn test_component_categories_skip_missing_and_blank() {
        let entries: Vec<ComponentEntry> = serde_json::from_value(json!([
            {"name": "Hero", "componentType": "hero", "category": "Layout"},
            {"name": "CTA", "componentType": "cta", "category": " "},
            {"name": "Contact", "componentType": "contact"},
            {"name": "Features", "componentType": "features", "category": "Layout"},
            {"name": "Content", "componentType": "content", "category": "Text"}
        ]))
        .unwrap();
        assert_eq!(component_categories(&entries), ["Layout", "Text"]);
    }

    #[test]
    fn test_component_entry_reads_camel_case() {
        let entry: ComponentEntry = serde_json::from_value(json!({
            "name": "Hero",
            "description": "Top banner",
            "componentType": "hero",
            "defaultRenderCode": "<section/>",
            "thumbnailUrl": "/img/hero.png"
        }))
        .unwrap();
        assert_eq!(entry.component_type, "hero");
        assert_eq!(entry.thumbnail_url.as_deref(), Some("/img/hero.png"));
        assert!(entry.section_kind().is_known());
    }
}
