//! # Template Selector
//!
//! Whole-page templates from `/api/templates`, shown in a top sheet when a new page is
//! created. Picking one hands the entry to `on_select`; the caller seeds the new document
//! from it.

use common::model::catalog::{template_categories, CatalogFilter, TemplateEntry};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::tops_sheet::yw_material_top_sheet::YwMaterialTopSheet;

use super::filter_bar;

#[derive(Properties, PartialEq)]
pub struct TemplateSelectorProps {
    /// Ref of the enclosing top sheet; open and close it with the `tops_sheet` helpers.
    pub node_ref: NodeRef,
    pub on_select: Callback<TemplateEntry>,
    pub on_cancel: Callback<()>,
}

pub enum Msg {
    Loaded(Result<api::Reply<Vec<TemplateEntry>>, String>),
    Search(String),
    Category(Option<String>),
}

pub struct TemplateSelector {
    templates: Vec<TemplateEntry>,
    filter: CatalogFilter,
    loading: bool,
    error: Option<String>,
    notice: Option<String>,
}

impl Component for TemplateSelector {
    type Message = Msg;
    type Properties = TemplateSelectorProps;

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();
        spawn_local(async move {
            link.send_message(Msg::Loaded(api::list_templates().await));
        });
        Self {
            templates: Vec::new(),
            filter: CatalogFilter::default(),
            loading: true,
            error: None,
            notice: None,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Loaded(Ok(reply)) => {
                self.loading = false;
                self.templates = reply.data;
                self.notice = reply.message;
            }
            Msg::Loaded(Err(e)) => {
                self.loading = false;
                self.error = Some(e);
            }
            Msg::Search(search) => self.filter.search = search,
            Msg::Category(category) => self.filter.category = category,
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let props = ctx.props();
        let on_cancel = props.on_cancel.reform(|_: MouseEvent| ());

        html! {
            <YwMaterialTopSheet node_ref={props.node_ref.clone()}>
                <div style="display:flex;align-items:center;">
                    <h3 style="flex:1;">{ "Choose a template" }</h3>
                    <button class="icon-btn" title="Cancel" onclick={on_cancel}>
                        <i class="material-icons">{ "close" }</i>
                    </button>
                </div>
                { filter_bar(
                    &self.filter.search,
                    self.filter.category.as_deref(),
                    &template_categories(&self.templates),
                    link.callback(Msg::Search),
                    link.callback(Msg::Category),
                ) }
                if let Some(notice) = &self.notice {
                    <p><small>{ notice.clone() }</small></p>
                }
                { self.entries(ctx) }
            </YwMaterialTopSheet>
        }
    }
}

impl TemplateSelector {
    fn entries(&self, ctx: &Context<Self>) -> Html {
        if self.loading {
            return html! { <p>{ "Loading templates..." }</p> };
        }
        if let Some(error) = &self.error {
            return html! {
                <div class="widget-error">{ format!("Could not load templates: {}", error) }</div>
            };
        }
        let visible = self.filter.templates(&self.templates);
        if visible.is_empty() {
            return html! { <p><small>{ "No templates match." }</small></p> };
        }

        html! {
            <div class="template-grid">
                { for visible.into_iter().map(|template| {
                    let picked = template.clone();
                    let on_select = ctx.props().on_select.clone();
                    html! {
                        <div
                            class="catalog-entry"
                            key={template.id.clone().unwrap_or_else(|| template.name.clone())}
                            onclick={move |_: MouseEvent| on_select.emit(picked.clone())}
                        >
                            {
                                match &template.thumbnail_url {
                                    Some(url) => html! { <img src={url.clone()} alt="" style="width:64px;height:48px;object-fit:cover;" /> },
                                    None => html! { <i class="material-icons">{ "description" }</i> },
                                }
                            }
                            <div>
                                <strong>{ template.name.clone() }</strong>
                                <div><small>{ template.description.clone() }</small></div>
                                <div><small>{ format!("{} sections", template.template_content.len()) }</small></div>
                            </div>
                        </div>
                    }
                }) }
            </div>
        }
    }
}
