//! # Component Library
//!
//! Lists the reusable section templates from `/api/components`, filtered client side. Adding
//! an entry hands it to `on_add`; the page editor turns it into a section with the default
//! props for its `componentType`.

use common::model::catalog::{component_categories, CatalogFilter, ComponentEntry};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api;

use super::filter_bar;

#[derive(Properties, PartialEq)]
pub struct ComponentLibraryProps {
    pub on_add: Callback<ComponentEntry>,
}

pub enum Msg {
    Loaded(Result<api::Reply<Vec<ComponentEntry>>, String>),
    Search(String),
    Category(Option<String>),
    Add(ComponentEntry),
}

pub struct ComponentLibrary {
    entries: Vec<ComponentEntry>,
    filter: CatalogFilter,
    loading: bool,
    error: Option<String>,
    notice: Option<String>,
}

impl Component for ComponentLibrary {
    type Message = Msg;
    type Properties = ComponentLibraryProps;

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();
        spawn_local(async move {
            link.send_message(Msg::Loaded(api::list_components().await));
        });
        Self {
            entries: Vec::new(),
            filter: CatalogFilter::default(),
            loading: true,
            error: None,
            notice: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Loaded(Ok(reply)) => {
                self.loading = false;
                self.entries = reply.data;
                self.notice = reply.message;
            }
            Msg::Loaded(Err(e)) => {
                self.loading = false;
                self.error = Some(e);
            }
            Msg::Search(search) => self.filter.search = search,
            Msg::Category(category) => self.filter.category = category,
            Msg::Add(entry) => {
                ctx.props().on_add.emit(entry);
                return false;
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let visible = self.filter.components(&self.entries);

        html! {
            <div class="panel">
                <h3>{ "Components" }</h3>
                { filter_bar(
                    &self.filter.search,
                    self.filter.category.as_deref(),
                    &component_categories(&self.entries),
                    link.callback(Msg::Search),
                    link.callback(Msg::Category),
                ) }
                if let Some(notice) = &self.notice {
                    <p><small>{ notice.clone() }</small></p>
                }
                {
                    if self.loading {
                        html! { <p>{ "Loading components..." }</p> }
                    } else if let Some(error) = &self.error {
                        html! { <div class="widget-error">{ format!("Could not load components: {}", error) }</div> }
                    } else if visible.is_empty() {
                        html! { <p><small>{ "No components match." }</small></p> }
                    } else {
                        html! {
                            <>{ for visible.into_iter().map(|entry| {
                                let add = entry.clone();
                                html! {
                                    <div class="catalog-entry" key={entry.id.clone().unwrap_or_else(|| entry.name.clone())}>
                                        <div style="flex:1;">
                                            <strong>{ entry.name.clone() }</strong>
                                            <div><small>{ entry.description.clone() }</small></div>
                                        </div>
                                        <button
                                            class="icon-btn primary"
                                            title={format!("Add {}", entry.component_type)}
                                            onclick={link.callback(move |_| Msg::Add(add.clone()))}
                                        >
                                            <i class="material-icons">{ "add" }</i>
                                        </button>
                                    </div>
                                }
                            }) }</>
                        }
                    }
                }
            </div>
        }
    }
}
