//! Page list: every stored dynamic page with open/delete actions and the entry point for
//! creating a page from a template.

use common::model::catalog::TemplateEntry;
use common::model::page::PageDocument;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::components::catalog::TemplateSelector;
use crate::helpers::{show_error_toast, show_toast};
use crate::tops_sheet::yw_material_top_sheet::{close_top_sheet, open_top_sheet};

#[derive(Properties, PartialEq)]
pub struct PagesListProps {
    pub on_open: Callback<String>,
    /// Receives the unsaved document seeded from the chosen template.
    pub on_create: Callback<PageDocument>,
}

pub enum Msg {
    Reload,
    Loaded(Result<api::Reply<Vec<PageDocument>>, String>),
    NewPage,
    TemplatePicked(TemplateEntry),
    CancelTemplate,
    Delete(String),
    Deleted(String, Result<(), String>),
}

pub struct PagesList {
    pages: Vec<PageDocument>,
    loading: bool,
    error: Option<String>,
    notice: Option<String>,
    sheet_ref: NodeRef,
}

fn confirm_delete(title: &str) -> bool {
    web_sys::window()
        .and_then(|w| {
            w.confirm_with_message(&format!("Delete the page \"{}\"? This cannot be undone.", title))
                .ok()
        })
        .unwrap_or(false)
}

impl Component for PagesList {
    type Message = Msg;
    type Properties = PagesListProps;

    fn create(ctx: &Context<Self>) -> Self {
        ctx.link().send_message(Msg::Reload);
        Self {
            pages: Vec::new(),
            loading: true,
            error: None,
            notice: None,
            sheet_ref: NodeRef::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Reload => {
                self.loading = true;
                let link = ctx.link().clone();
                spawn_local(async move {
                    link.send_message(Msg::Loaded(api::list_pages().await));
                });
                true
            }
            Msg::Loaded(Ok(reply)) => {
                self.loading = false;
                self.error = None;
                self.pages = reply.data;
                self.notice = reply.message;
                true
            }
            Msg::Loaded(Err(e)) => {
                self.loading = false;
                self.error = Some(e);
                true
            }
            Msg::NewPage => {
                open_top_sheet(&self.sheet_ref);
                false
            }
            Msg::TemplatePicked(template) => {
                close_top_sheet(&self.sheet_ref);
                ctx.props().on_create.emit(PageDocument::from_template(&template));
                false
            }
            Msg::CancelTemplate => {
                close_top_sheet(&self.sheet_ref);
                false
            }
            Msg::Delete(id) => {
                let title = self
                    .pages
                    .iter()
                    .find(|p| p.id.as_deref() == Some(id.as_str()))
                    .map(|p| p.title.clone())
                    .unwrap_or_default();
                if !confirm_delete(&title) {
                    return false;
                }
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = api::delete_page(&id).await;
                    link.send_message(Msg::Deleted(id, result));
                });
                false
            }
            Msg::Deleted(id, Ok(())) => {
                self.pages.retain(|p| p.id.as_deref() != Some(id.as_str()));
                show_toast("Page deleted.");
                true
            }
            Msg::Deleted(_, Err(e)) => {
                show_error_toast(&format!("Delete failed: {}", e));
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();

        html! {
            <div class="panel">
                <div style="display:flex;align-items:center;gap:8px;">
                    <h2 style="flex:1;">{ "Pages" }</h2>
                    <button class="icon-btn" title="Reload" onclick={link.callback(|_| Msg::Reload)}>
                        <i class="material-icons">{ "refresh" }</i>
                    </button>
                    <button class="icon-btn primary" onclick={link.callback(|_| Msg::NewPage)}>
                        <i class="material-icons">{ "add" }</i>{ " New page" }
                    </button>
                </div>
                if let Some(notice) = &self.notice {
                    <p><small>{ notice.clone() }</small></p>
                }
                { self.table(ctx) }
                <TemplateSelector
                    node_ref={self.sheet_ref.clone()}
                    on_select={link.callback(Msg::TemplatePicked)}
                    on_cancel={link.callback(|_| Msg::CancelTemplate)}
                />
            </div>
        }
    }
}

impl PagesList {
    fn table(&self, ctx: &Context<Self>) -> Html {
        if self.loading {
            return html! { <p>{ "Loading pages..." }</p> };
        }
        if let Some(error) = &self.error {
            return html! { <div class="widget-error">{ format!("Could not load pages: {}", error) }</div> };
        }
        if self.pages.is_empty() {
            return html! { <p class="canvas-empty">{ "No pages yet. Create one from a template." }</p> };
        }

        let link = ctx.link();
        html! {
            <table class="page-table">
                <thead>
                    <tr>
                        <th>{ "Title" }</th>
                        <th>{ "Slug" }</th>
                        <th>{ "Sections" }</th>
                        <th>{ "Status" }</th>
                        <th>{ "Updated" }</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    { for self.pages.iter().filter_map(|page| {
                        let id = page.id.clone()?;
                        let open_id = id.clone();
                        let delete_id = id.clone();
                        let on_open = ctx.props().on_open.clone();
                        Some(html! {
                            <tr key={id}>
                                <td>{ page.title.clone() }</td>
                                <td><code>{ format!("/{}", page.slug) }</code></td>
                                <td>{ page.content.len() }</td>
                                <td>
                                    if page.is_active {
                                        <span class="badge">{ "Active" }</span>
                                    } else {
                                        <span class="badge off">{ "Inactive" }</span>
                                    }
                                </td>
                                <td>{ page.updated_at.clone().or_else(|| page.created_at.clone()).unwrap_or_default() }</td>
                                <td style="white-space:nowrap;">
                                    <button class="icon-btn" title="Edit" onclick={move |_: MouseEvent| on_open.emit(open_id.clone())}>
                                        <i class="material-icons">{ "edit" }</i>
                                    </button>
                                    <button class="icon-btn danger" title="Delete" onclick={link.callback(move |_| Msg::Delete(delete_id.clone()))}>
                                        <i class="material-icons">{ "delete" }</i>
                                    </button>
                                </td>
                            </tr>
                        })
                    }) }
                </tbody>
            </table>
        }
    }
}
