//! Application shell: navigation, the shared dashboard aggregator and the unsaved-changes
//! guards.
//!
//! Leaving the page editor (through the nav bar or by closing the tab) asks for confirmation
//! while the global dirty flag is set.

use common::model::page::PageDocument;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::BeforeUnloadEvent;
use yew::{html, Callback, Component, Context, ContextProvider, Html};

use crate::components::dashboard::{DashboardHandle, DashboardView};
use crate::components::notifications::BroadcastForm;
use crate::components::page_builder::PageEditor;
use crate::components::pages::PagesList;
use crate::helpers::{confirm_discard, is_dirty};

#[derive(Clone, PartialEq)]
pub enum View {
    Dashboard,
    Pages,
    NewPage(PageDocument),
    EditPage(String),
    Notifications,
}

pub enum Msg {
    Navigate(View),
    PageSaved(PageDocument),
    EditorClosed,
}

pub struct App {
    view: View,
    dashboard: DashboardHandle,
    /// Bumped whenever a different document is opened so the editor remounts.
    editor_session: u32,
    _unload_guard: Option<Closure<dyn FnMut(BeforeUnloadEvent)>>,
}

fn install_unload_guard() -> Option<Closure<dyn FnMut(BeforeUnloadEvent)>> {
    let window = web_sys::window()?;
    let guard = Closure::<dyn FnMut(BeforeUnloadEvent)>::new(|event: BeforeUnloadEvent| {
        if is_dirty() {
            event.prevent_default();
            event.set_return_value("You have unsaved changes.");
        }
    });
    window.set_onbeforeunload(Some(guard.as_ref().unchecked_ref()));
    Some(guard)
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            view: View::Dashboard,
            dashboard: DashboardHandle::new(),
            editor_session: 0,
            _unload_guard: install_unload_guard(),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Navigate(view) => {
                if view == self.view || !confirm_discard() {
                    return false;
                }
                if matches!(view, View::NewPage(_) | View::EditPage(_)) {
                    self.editor_session += 1;
                }
                self.view = view;
                true
            }
            Msg::PageSaved(page) => {
                // A new page keeps its editor; later saves go to the stored id.
                if let (View::NewPage(_), Some(id)) = (&self.view, page.id) {
                    self.view = View::EditPage(id);
                }
                false
            }
            Msg::EditorClosed => {
                self.view = View::Pages;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let nav_item = |label: &'static str, icon: &'static str, target: View| {
            let active = match (&self.view, &target) {
                (View::NewPage(_) | View::EditPage(_), View::Pages) => true,
                (current, target) => current == target,
            };
            html! {
                <button
                    class={if active { "icon-btn primary" } else { "icon-btn" }}
                    onclick={link.callback(move |_| Msg::Navigate(target.clone()))}
                >
                    <i class="material-icons">{ icon }</i>{ format!(" {}", label) }
                </button>
            }
        };

        html! {
            <ContextProvider<DashboardHandle> context={self.dashboard.clone()}>
                <nav class="app-nav">
                    <strong style="margin-right:16px;">{ "ThinkCyber Admin" }</strong>
                    { nav_item("Dashboard", "dashboard", View::Dashboard) }
                    { nav_item("Pages", "web", View::Pages) }
                    { nav_item("Notifications", "campaign", View::Notifications) }
                </nav>
                <main class="app-main">
                    { self.main_view(ctx) }
                </main>
            </ContextProvider<DashboardHandle>>
        }
    }
}

impl App {
    fn main_view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let on_close: Callback<()> = link.callback(|_| Msg::EditorClosed);
        let on_saved = link.callback(Msg::PageSaved);

        match &self.view {
            View::Dashboard => html! { <DashboardView /> },
            View::Pages => html! {
                <PagesList
                    on_open={link.callback(|id| Msg::Navigate(View::EditPage(id)))}
                    on_create={link.callback(|page| Msg::Navigate(View::NewPage(page)))}
                />
            },
            View::NewPage(page) => html! {
                <PageEditor
                    key={self.editor_session}
                    initial={Some(page.clone())}
                    {on_close}
                    {on_saved}
                />
            },
            View::EditPage(id) => html! {
                <PageEditor
                    key={self.editor_session}
                    page_id={Some(id.clone())}
                    {on_close}
                    {on_saved}
                />
            },
            View::Notifications => html! { <BroadcastForm /> },
        }
    }
}
