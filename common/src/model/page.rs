//! The page document edited by the builder.
//!
//! `PageContent` is stored exactly as it is edited: `{ "sections": [{id, type, props}, ...] }`.
//! The canvas, the previews and the persistence layer all read and write this one shape.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::catalog::TemplateEntry;
use super::section::{Props, Section, SectionKind, generate_section_id};
use super::validation::{ValidationError, require};

/// Ordered body of a page. Array order is render order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageContent {
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl PageContent {
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    fn contains_id(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Appends a section of the given kind and returns its id.
    pub fn add_section(&mut self, kind: SectionKind) -> String {
        let mut id = generate_section_id();
        while self.contains_id(&id) {
            id = generate_section_id();
        }
        self.sections.push(Section {
            id: id.clone(),
            kind,
        });
        id
    }

    /// Appends the default section for `section_type`.
    pub fn add_default_section(&mut self, section_type: &str) -> String {
        self.add_section(SectionKind::defaults_for(section_type))
    }

    /// Removes the section with `id`. Returns `false` (and changes nothing) when absent.
    pub fn remove_section(&mut self, id: &str) -> bool {
        let before = self.sections.len();
        self.sections.retain(|s| s.id != id);
        self.sections.len() != before
    }

    /// Moves the section `from_id` to the index currently held by `to_id`.
    ///
    /// Dragging downwards therefore lands the section just after the drop target and dragging
    /// upwards just before it. Returns `false` when either id is absent or both are the same.
    pub fn reorder_sections(&mut self, from_id: &str, to_id: &str) -> bool {
        let (Some(from), Some(to)) = (self.position(from_id), self.position(to_id)) else {
            return false;
        };
        if from == to {
            return false;
        }
        let section = self.sections.remove(from);
        self.sections.insert(to, section);
        true
    }

    /// Moves a section `offset` places (negative is up), clamped to the list bounds.
    pub fn move_section(&mut self, id: &str, offset: isize) -> bool {
        let Some(from) = self.position(id) else {
            return false;
        };
        let last = self.sections.len().saturating_sub(1) as isize;
        let to = (from as isize + offset).clamp(0, last) as usize;
        let target = self.sections[to].id.clone();
        self.reorder_sections(id, &target)
    }

    /// Shallow-merges `patch` into the props of section `id`. Unknown ids are ignored.
    pub fn update_section_props(&mut self, id: &str, patch: &Props) -> bool {
        match self.sections.iter_mut().find(|s| s.id == id) {
            Some(section) => {
                section.merge_props(patch);
                true
            }
            None => false,
        }
    }

    /// Replaces the props of section `id` wholesale, keeping its type tag.
    pub fn replace_section_props(&mut self, id: &str, props: Props) -> bool {
        match self.sections.iter_mut().find(|s| s.id == id) {
            Some(section) => {
                let section_type = section.section_type().to_string();
                section.kind = SectionKind::from_parts(&section_type, props);
                true
            }
            None => false,
        }
    }

    /// Gives every empty or repeated id a fresh one. First occurrences keep their id.
    pub fn ensure_unique_ids(&mut self) {
        let mut seen: HashSet<String> = HashSet::new();
        let taken: HashSet<String> = self.sections.iter().map(|s| s.id.clone()).collect();
        for section in &mut self.sections {
            if section.id.is_empty() || seen.contains(&section.id) {
                let mut id = generate_section_id();
                while taken.contains(&id) || seen.contains(&id) {
                    id = generate_section_id();
                }
                section.id = id;
            }
            seen.insert(section.id.clone());
        }
    }

    fn first_duplicate_id(&self) -> Option<&str> {
        let mut seen = HashSet::new();
        self.sections
            .iter()
            .map(|s| s.id.as_str())
            .find(|id| !seen.insert(*id))
    }
}

/// Which whole-page template a document started from. Informational only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TemplateType {
    #[default]
    Blank,
    Landing,
    About,
    Course,
    Contact,
    Custom,
    Other(String),
}

impl TemplateType {
    pub fn as_str(&self) -> &str {
        match self {
            TemplateType::Blank => "blank",
            TemplateType::Landing => "landing",
            TemplateType::About => "about",
            TemplateType::Course => "course",
            TemplateType::Contact => "contact",
            TemplateType::Custom => "custom",
            TemplateType::Other(other) => other,
        }
    }
}

impl From<String> for TemplateType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "blank" => TemplateType::Blank,
            "landing" => TemplateType::Landing,
            "about" => TemplateType::About,
            "course" => TemplateType::Course,
            "contact" => TemplateType::Contact,
            "custom" => TemplateType::Custom,
            _ => TemplateType::Other(value),
        }
    }
}

impl From<TemplateType> for String {
    fn from(value: TemplateType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full persisted representation of one dynamic page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDocument {
    /// Assigned by the backend on first save; `None` for a new, unsaved page.
    #[serde(
        default,
        deserialize_with = "crate::model::optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub template_type: TemplateType,
    #[serde(default)]
    pub content: PageContent,
    #[serde(default)]
    pub meta_title: String,
    #[serde(default)]
    pub meta_description: String,
    #[serde(default)]
    pub meta_keywords: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub show_in_navbar: bool,
    #[serde(default)]
    pub navbar_position: i32,
    #[serde(default)]
    pub navbar_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Default for PageDocument {
    fn default() -> Self {
        Self {
            id: None,
            title: String::new(),
            slug: String::new(),
            template_type: TemplateType::Blank,
            content: PageContent::default(),
            meta_title: String::new(),
            meta_description: String::new(),
            meta_keywords: String::new(),
            is_active: true,
            show_in_navbar: false,
            navbar_position: 0,
            navbar_label: String::new(),
            created_at: None,
            updated_at: None,
        }
    }
}

impl PageDocument {
    /// Seeds a new, unsaved document from a whole-page template.
    pub fn from_template(template: &TemplateEntry) -> Self {
        let mut content = template.template_content.clone();
        content.ensure_unique_ids();
        Self {
            title: template.name.clone(),
            slug: slugify(&template.name),
            template_type: template.template_type.clone(),
            content,
            ..Self::default()
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.as_deref().is_none_or(str::is_empty)
    }

    pub fn add_section(&mut self, kind: SectionKind) -> String {
        self.content.add_section(kind)
    }

    pub fn remove_section(&mut self, id: &str) -> bool {
        self.content.remove_section(id)
    }

    pub fn reorder_sections(&mut self, from_id: &str, to_id: &str) -> bool {
        self.content.reorder_sections(from_id, to_id)
    }

    pub fn update_section_props(&mut self, id: &str, patch: &Props) -> bool {
        self.content.update_section_props(id, patch)
    }

    /// Checks the fields the persistence layer requires.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("title", &self.title)?;
        require("slug", &self.slug)?;
        if !is_valid_slug(&self.slug) {
            return Err(ValidationError::InvalidSlug(self.slug.clone()));
        }
        if let Some(id) = self.content.first_duplicate_id() {
            return Err(ValidationError::DuplicateSectionId(id.to_string()));
        }
        Ok(())
    }
}

/// `true` for lowercase alphanumeric words joined by single hyphens.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Derives a URL-safe slug from a title: `"About Our Courses!"` becomes `"about-our-courses"`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::section::{patch, props_json};
    use serde_json::json;

    fn ids(content: &PageContent) -> Vec<String> {
        content.sections.iter().map(|s| s.id.clone()).collect()
    }

    fn sample_content() -> PageContent {
        serde_json::from_value(json!({
            "sections": [
                {"id": "a", "type": "hero", "props": {"title": "A"}},
                {"id": "b", "type": "content", "props": {"title": "B"}},
                {"id": "c", "type": "cta", "props": {"title": "C"}},
                {"id": "d", "type": "contact", "props": {"title": "D"}}
            ]
        }))
        .unwrap()
    }

    fn assert_unique(content: &PageContent) {
        let ids = ids(content);
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(ids.len(), unique.len(), "duplicate ids in {ids:?}");
    }

    #[test]
    fn test_ids_stay_unique_across_mixed_operations() {
        let mut content = sample_content();
        for step in 0..40 {
            match step % 4 {
                0 | 1 => {
                    content.add_default_section("cta");
                }
                2 => {
                    let first = content.sections[0].id.clone();
                    let last = content.sections[content.len() - 1].id.clone();
                    content.reorder_sections(&first, &last);
                }
                _ => {
                    let middle = content.sections[content.len() / 2].id.clone();
                    content.remove_section(&middle);
                }
            }
            assert_unique(&content);
        }
    }

    #[test]
    fn test_reorder_downwards_lands_after_target() {
        let mut content = sample_content();
        assert!(content.reorder_sections("a", "c"));
        assert_eq!(ids(&content), ["b", "c", "a", "d"]);
    }

    #[test]
    fn test_reorder_upwards_lands_before_target() {
        let mut content = sample_content();
        assert!(content.reorder_sections("d", "b"));
        assert_eq!(ids(&content), ["a", "d", "b", "c"]);
    }

    #[test]
    fn test_reorder_preserves_length_and_identity() {
        let mut content = sample_content();
        let original = content.clone();
        content.reorder_sections("b", "d");

        assert_eq!(content.len(), original.len());
        let mut before = original.sections.clone();
        let mut after = content.sections.clone();
        before.sort_by(|x, y| x.id.cmp(&y.id));
        after.sort_by(|x, y| x.id.cmp(&y.id));
        assert_eq!(before, after);
    }

    #[test]
    fn test_reorder_with_missing_id_is_noop() {
        let mut content = sample_content();
        let original = content.clone();
        assert!(!content.reorder_sections("a", "zzz"));
        assert!(!content.reorder_sections("zzz", "a"));
        assert!(!content.reorder_sections("a", "a"));
        assert_eq!(content, original);
    }

    #[test]
    fn test_move_section_clamps_at_edges() {
        let mut content = sample_content();
        assert!(!content.move_section("a", -1));
        assert!(content.move_section("a", 1));
        assert_eq!(ids(&content), ["b", "a", "c", "d"]);
        assert!(content.move_section("b", 10));
        assert_eq!(ids(&content), ["a", "c", "d", "b"]);
    }

    #[test]
    fn test_remove_missing_section_is_noop() {
        let mut doc = PageDocument {
            title: "Home".into(),
            slug: "home".into(),
            content: sample_content(),
            ..PageDocument::default()
        };
        let original = doc.clone();
        assert!(!doc.remove_section("missing"));
        assert_eq!(doc, original);
    }

    #[test]
    fn test_remove_section_drops_only_target() {
        let mut content = sample_content();
        assert!(content.remove_section("b"));
        assert_eq!(ids(&content), ["a", "c", "d"]);
    }

    #[test]
    fn test_update_props_merges_and_ignores_unknown_id() {
        let mut content = sample_content();
        assert!(content.update_section_props("c", &patch("buttonText", json!("Buy"))));
        assert_eq!(
            props_json(content.section("c").unwrap()),
            json!({"title": "C", "buttonText": "Buy"})
        );

        let before = content.clone();
        assert!(!content.update_section_props("nope", &patch("title", json!("x"))));
        assert_eq!(content, before);
    }

    #[test]
    fn test_replace_props_keeps_type() {
        let mut content = sample_content();
        let mut props = Props::new();
        props.insert("title".into(), json!("Replaced"));
        assert!(content.replace_section_props("c", props));
        let section = content.section("c").unwrap();
        assert_eq!(section.section_type(), "cta");
        assert_eq!(props_json(section), json!({"title": "Replaced"}));
        assert!(!content.replace_section_props("nope", Props::new()));
    }

    #[test]
    fn test_document_round_trips_through_json() {
        let mut doc = PageDocument {
            id: Some("42".into()),
            title: "Landing".into(),
            slug: "landing".into(),
            template_type: TemplateType::Landing,
            meta_title: "Meta".into(),
            meta_description: "Description".into(),
            meta_keywords: "security,courses".into(),
            is_active: false,
            show_in_navbar: true,
            navbar_position: 3,
            navbar_label: "Start".into(),
            ..PageDocument::default()
        };
        doc.add_section(SectionKind::defaults_for("features"));
        doc.add_section(SectionKind::defaults_for("pricing"));
        doc.content.sections[1].merge_props(&patch(
            "plans",
            json!([{"name": "Pro", "tiers": [{"seats": 5, "annual": true}]}]),
        ));

        let text = serde_json::to_string(&doc).unwrap();
        let parsed: PageDocument = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, doc);
    }

    #[test]
    fn test_document_uses_camel_case_fields() {
        let value = serde_json::to_value(PageDocument {
            title: "T".into(),
            slug: "t".into(),
            ..PageDocument::default()
        })
        .unwrap();
        assert_eq!(value["templateType"], json!("blank"));
        assert_eq!(value["isActive"], json!(true));
        assert_eq!(value["content"], json!({"sections": []}));
        assert!(value.get("id").is_none());
    }

    #[test]
    fn test_unknown_template_type_survives() {
        let parsed: TemplateType = serde_json::from_value(json!("webinar")).unwrap();
        assert_eq!(parsed, TemplateType::Other("webinar".into()));
        assert_eq!(serde_json::to_value(&parsed).unwrap(), json!("webinar"));
    }

    #[test]
    fn test_from_template_clones_content_and_type() {
        let template: TemplateEntry = serde_json::from_value(json!({
            "name": "Landing Page",
            "description": "Hero first",
            "templateType": "landing",
            "templateContent": {"sections": [{"id": "s1", "type": "hero", "props": {"title": "Welcome"}}]},
            "category": "marketing"
        }))
        .unwrap();

        let doc = PageDocument::from_template(&template);
        assert_eq!(props_json(&doc.content.sections[0])["title"], json!("Welcome"));
        assert_eq!(doc.content.sections[0].id, "s1");
        assert_eq!(doc.template_type, TemplateType::Landing);
        assert_eq!(doc.slug, "landing-page");
        assert!(doc.is_new());
    }

    #[test]
    fn test_ensure_unique_ids_repairs_duplicates_and_blanks() {
        let mut content: PageContent = serde_json::from_value(json!({
            "sections": [
                {"id": "s1", "type": "hero"},
                {"id": "s1", "type": "cta"},
                {"type": "content"}
            ]
        }))
        .unwrap();
        content.ensure_unique_ids();
        assert_eq!(content.sections[0].id, "s1");
        assert_unique(&content);
        assert!(content.sections.iter().all(|s| !s.id.is_empty()));
    }

    #[test]
    fn test_validate_reports_first_problem() {
        let mut doc = PageDocument::default();
        assert_eq!(doc.validate(), Err(ValidationError::MissingField("title")));

        doc.title = "About".into();
        assert_eq!(doc.validate(), Err(ValidationError::MissingField("slug")));

        doc.slug = "About Us".into();
        assert_eq!(
            doc.validate(),
            Err(ValidationError::InvalidSlug("About Us".into()))
        );

        doc.slug = "about-us".into();
        doc.content = serde_json::from_value(json!({
            "sections": [{"id": "x", "type": "hero"}, {"id": "x", "type": "cta"}]
        }))
        .unwrap();
        assert_eq!(
            doc.validate(),
            Err(ValidationError::DuplicateSectionId("x".into()))
        );

        doc.content.ensure_unique_ids();
        assert_eq!(doc.validate(), Ok(()));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("About Our Courses!"), "about-our-courses");
        assert_eq!(slugify("  --Cyber  101-- "), "cyber-101");
        assert_eq!(slugify("¿Qué?"), "qu");
        assert!(is_valid_slug(&slugify("Pricing & Plans 2026")));
        assert!(!is_valid_slug("double--hyphen"));
        assert!(!is_valid_slug("-leading"));
    }
}
