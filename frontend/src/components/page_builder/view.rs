//! View rendering for the page editor.
//!
//! Layout: a header with the dirty marker and the save/close actions, the page settings form,
//! then three columns: component library, canvas, section editor.

use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::components::catalog::ComponentLibrary;

use super::canvas::BuilderCanvas;
use super::messages::{Msg, PageField};
use super::section_editor::SectionEditor;
use super::state::PageEditor;

pub fn view(editor: &PageEditor, ctx: &Context<PageEditor>) -> Html {
    if editor.loading {
        return html! { <div class="panel">{ "Loading page..." }</div> };
    }

    html! {
        <div class="page-editor">
            { header(editor, ctx) }
            { settings_form(editor, ctx) }
            <div class="editor-layout">
                <ComponentLibrary on_add={ctx.link().callback(Msg::AddComponent)} />
                <BuilderCanvas
                    content={editor.page.content.clone()}
                    selected={editor.selected.clone()}
                    on_change={ctx.link().callback(Msg::ContentChanged)}
                    on_edit={ctx.link().callback(|id| Msg::SelectSection(Some(id)))}
                />
                { section_panel(editor, ctx) }
            </div>
        </div>
    }
}

fn header(editor: &PageEditor, ctx: &Context<PageEditor>) -> Html {
    let link = ctx.link();
    let title = if editor.page.is_new() {
        "New page".to_string()
    } else {
        format!("Edit: {}", editor.page.title)
    };

    html! {
        <div style="display:flex;align-items:center;gap:8px;margin-bottom:12px;">
            <h2 style="flex:1;margin:0;">
                { title }
                if editor.is_dirty() {
                    <span class="dirty-dot" title="Unsaved changes"></span>
                }
            </h2>
            <button class="icon-btn" onclick={link.callback(|_| Msg::Close)}>
                <i class="material-icons">{ "arrow_back" }</i>{ " Back" }
            </button>
            <button class="icon-btn primary" disabled={editor.saving} onclick={link.callback(|_| Msg::Save)}>
                <i class="material-icons">{ "save" }</i>
                { if editor.saving { " Saving..." } else { " Save" } }
            </button>
        </div>
    }
}

fn text_input(label: &'static str, value: String, on_input: Callback<String>) -> Html {
    html! {
        <label>
            { label }
            <input type="text" value={value} oninput={move |e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                on_input.emit(input.value());
            }} />
        </label>
    }
}

fn settings_form(editor: &PageEditor, ctx: &Context<PageEditor>) -> Html {
    let link = ctx.link();
    let page = &editor.page;
    let field = |field: PageField| link.callback(move |value: String| Msg::SetField(field, value));

    html! {
        <div class="panel settings-form">
            { text_input("Title", page.title.clone(), link.callback(Msg::SetTitle)) }
            { text_input("Slug", page.slug.clone(), link.callback(Msg::SetSlug)) }
            { text_input("Meta title", page.meta_title.clone(), field(PageField::MetaTitle)) }
            { text_input("Meta keywords", page.meta_keywords.clone(), field(PageField::MetaKeywords)) }
            <label style="grid-column:1 / -1;">
                { "Meta description" }
                <textarea rows="2" value={page.meta_description.clone()} oninput={link.callback(|e: InputEvent| {
                    let area: HtmlTextAreaElement = e.target_unchecked_into();
                    Msg::SetField(PageField::MetaDescription, area.value())
                })} />
            </label>
            <label>
                <input type="checkbox" checked={page.is_active} onchange={link.callback(|_| Msg::ToggleActive)} />
                { " Active" }
            </label>
            <label>
                <input type="checkbox" checked={page.show_in_navbar} onchange={link.callback(|_| Msg::ToggleNavbar)} />
                { " Show in navbar" }
            </label>
            if page.show_in_navbar {
                <>
                    { text_input("Navbar label", page.navbar_label.clone(), field(PageField::NavbarLabel)) }
                    { text_input("Navbar position", page.navbar_position.to_string(), field(PageField::NavbarPosition)) }
                </>
            }
            <div style="grid-column:1 / -1;">
                <small>{ format!("Template: {}", page.template_type) }</small>
            </div>
        </div>
    }
}

fn section_panel(editor: &PageEditor, ctx: &Context<PageEditor>) -> Html {
    let selected = editor
        .selected
        .as_deref()
        .and_then(|id| editor.page.content.section(id));

    let Some(section) = selected else {
        return html! {
            <div class="panel">
                <p><small>{ "Select a section to edit its content." }</small></p>
            </div>
        };
    };

    let link = ctx.link();
    let patch_id = section.id.clone();
    let replace_id = section.id.clone();
    html! {
        <SectionEditor
            key={section.id.clone()}
            section={section.clone()}
            on_patch={link.callback(move |patch| Msg::PatchSection { id: patch_id.clone(), patch })}
            on_replace={link.callback(move |props| Msg::ReplaceSectionProps { id: replace_id.clone(), props })}
            on_close={link.callback(|_| Msg::SelectSection(None))}
        />
    }
}
