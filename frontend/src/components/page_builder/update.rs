//! Update function for the page editor.
//!
//! Every document edit runs through here so the dirty flag follows the document: after each
//! mutation the MD5 of the serialized page is compared with the digest taken at load or save
//! time. Saving validates locally first and only talks to the proxy when the document passes.

use yew::platform::spawn_local;
use yew::prelude::*;

use common::model::page::slugify;

use crate::api;
use crate::helpers::{confirm_discard, show_error_toast, show_toast};

use super::messages::{Msg, PageField};
use super::state::PageEditor;

pub fn update(editor: &mut PageEditor, ctx: &Context<PageEditor>, msg: Msg) -> bool {
    match msg {
        Msg::Loaded(Ok(page)) => {
            editor.loading = false;
            editor.slug_touched = !page.slug.is_empty() && page.slug != slugify(&page.title);
            editor.set_page(page);
            editor.mark_clean();
            true
        }
        Msg::Loaded(Err(e)) => {
            editor.loading = false;
            show_error_toast(&format!("Could not load page: {}", e));
            ctx.props().on_close.emit(());
            false
        }
        Msg::SetTitle(title) => {
            if !editor.slug_touched {
                editor.page.slug = slugify(&title);
            }
            editor.page.title = title;
            editor.sync_dirty_flag();
            true
        }
        Msg::SetSlug(slug) => {
            editor.slug_touched = !slug.is_empty();
            editor.page.slug = slug;
            editor.sync_dirty_flag();
            true
        }
        Msg::SetField(field, value) => {
            let page = &mut editor.page;
            match field {
                PageField::MetaTitle => page.meta_title = value,
                PageField::MetaDescription => page.meta_description = value,
                PageField::MetaKeywords => page.meta_keywords = value,
                PageField::NavbarLabel => page.navbar_label = value,
                PageField::NavbarPosition => {
                    // Non-numeric input keeps the previous position.
                    match value.trim().parse() {
                        Ok(position) => page.navbar_position = position,
                        Err(_) if value.trim().is_empty() => page.navbar_position = 0,
                        Err(_) => return true,
                    }
                }
            }
            editor.sync_dirty_flag();
            true
        }
        Msg::ToggleActive => {
            editor.page.is_active = !editor.page.is_active;
            editor.sync_dirty_flag();
            true
        }
        Msg::ToggleNavbar => {
            editor.page.show_in_navbar = !editor.page.show_in_navbar;
            editor.sync_dirty_flag();
            true
        }
        Msg::ContentChanged(content) => {
            let mut page = editor.page.clone();
            page.content = content;
            editor.set_page(page);
            editor.sync_dirty_flag();
            true
        }
        Msg::AddComponent(entry) => {
            let id = editor.page.add_section(entry.section_kind());
            editor.selected = Some(id);
            editor.sync_dirty_flag();
            true
        }
        Msg::SelectSection(id) => {
            editor.selected = id;
            true
        }
        Msg::PatchSection { id, patch } => {
            if editor.page.update_section_props(&id, &patch) {
                editor.sync_dirty_flag();
            }
            true
        }
        Msg::ReplaceSectionProps { id, props } => {
            if editor.page.content.replace_section_props(&id, props) {
                editor.sync_dirty_flag();
            }
            true
        }
        Msg::Save => {
            if editor.saving {
                return false;
            }
            if let Err(e) = editor.page.validate() {
                show_error_toast(&e.to_string());
                return false;
            }
            editor.saving = true;
            editor.saving_digest = Some(editor.digest());
            let page = editor.page.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = api::save_page(&page).await;
                link.send_message(Msg::Saved(result));
            });
            true
        }
        Msg::Saved(Ok(page)) => {
            editor.saving = false;
            editor.absorb_saved(page.clone());
            editor.sync_dirty_flag();
            show_toast("Page saved.");
            ctx.props().on_saved.emit(page);
            true
        }
        Msg::Saved(Err(e)) => {
            editor.saving = false;
            editor.saving_digest = None;
            show_error_toast(&format!("Save failed: {}", e));
            true
        }
        Msg::Close => {
            if !confirm_discard() {
                return false;
            }
            ctx.props().on_close.emit(());
            false
        }
    }
}
