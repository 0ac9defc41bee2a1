//! Runtime state of the page editor.

use common::model::page::{slugify, PageDocument};

use crate::helpers::{compute_md5, set_dirty_flag};

pub struct PageEditor {
    /// The document being edited. Every builder operation goes through this value.
    pub page: PageDocument,

    /// Section currently open in the section editor.
    pub selected: Option<String>,

    /// Set once the user edits the slug by hand; from then on the title no longer drives it.
    pub slug_touched: bool,

    pub loading: bool,
    pub saving: bool,

    /// Guard for the one-time load in `rendered`.
    pub loaded: bool,

    /// MD5 of the serialized document at last load or save.
    pub original_md5: Option<String>,

    /// MD5 of the snapshot sent by the save currently in flight.
    pub saving_digest: Option<String>,
}

fn digest_of(page: &PageDocument) -> String {
    compute_md5(&serde_json::to_string(page).unwrap_or_default())
}

impl PageEditor {
    pub fn new(page: PageDocument) -> Self {
        let slug_touched = !page.slug.is_empty() && page.slug != slugify(&page.title);
        Self {
            page,
            selected: None,
            slug_touched,
            loading: false,
            saving: false,
            loaded: false,
            original_md5: None,
            saving_digest: None,
        }
    }

    pub fn digest(&self) -> String {
        digest_of(&self.page)
    }

    pub fn is_dirty(&self) -> bool {
        match &self.original_md5 {
            Some(original) => *original != self.digest(),
            None => true,
        }
    }

    /// Takes the current document as the clean baseline.
    pub fn mark_clean(&mut self) {
        self.original_md5 = Some(self.digest());
        set_dirty_flag(false);
    }

    /// Publishes the dirty state to the navigation and unload guards.
    pub fn sync_dirty_flag(&self) {
        set_dirty_flag(self.is_dirty());
    }

    /// Takes the stored copy returned for the snapshot that was sent.
    ///
    /// When the document was edited while the request was in flight, only the fields the
    /// platform assigns are copied onto it and it stays dirty against the stored copy.
    pub fn absorb_saved(&mut self, saved: PageDocument) {
        let sent = self.saving_digest.take();
        if sent.as_deref() == Some(self.digest().as_str()) {
            self.set_page(saved);
            self.original_md5 = Some(self.digest());
        } else {
            self.original_md5 = Some(digest_of(&saved));
            self.page.id = saved.id;
            self.page.created_at = saved.created_at;
            self.page.updated_at = saved.updated_at;
        }
    }

    /// Replaces the document, keeping the selection only if its section still exists.
    pub fn set_page(&mut self, page: PageDocument) {
        self.page = page;
        if let Some(id) = &self.selected {
            if self.page.content.section(id).is_none() {
                self.selected = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::section::SectionKind;

    fn editor_saving() -> (PageEditor, PageDocument) {
        let mut editor = PageEditor::new(PageDocument {
            title: "Home".into(),
            slug: "home".into(),
            ..PageDocument::default()
        });
        editor.original_md5 = Some(editor.digest());
        editor.saving_digest = Some(editor.digest());
        let mut stored = editor.page.clone();
        stored.id = Some("7".into());
        stored.created_at = Some("2026-10-16T10:00:00Z".into());
        (editor, stored)
    }

    #[test]
    fn test_unchanged_document_takes_stored_copy() {
        let (mut editor, stored) = editor_saving();
        editor.absorb_saved(stored.clone());
        assert_eq!(editor.page, stored);
        assert!(!editor.is_dirty());
        assert!(editor.saving_digest.is_none());
    }

    #[test]
    fn test_edits_made_while_saving_are_kept() {
        let (mut editor, stored) = editor_saving();
        let id = editor.page.add_section(SectionKind::defaults_for("cta"));
        editor.page.meta_title = "Changed meanwhile".into();

        editor.absorb_saved(stored);

        assert_eq!(editor.page.id.as_deref(), Some("7"));
        assert_eq!(editor.page.created_at.as_deref(), Some("2026-10-16T10:00:00Z"));
        assert!(editor.page.content.section(&id).is_some());
        assert_eq!(editor.page.meta_title, "Changed meanwhile");
        assert!(editor.is_dirty());
    }
}
