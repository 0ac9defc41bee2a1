//! Dashboard page: six independent widgets fed by the shared [`DashboardHandle`].
//!
//! The view subscribes to the aggregator on mount and re-renders on every section
//! transition. "Refresh all" starts every section at once; each widget's refresh button
//! restarts only its own section.

mod source;
mod widgets;

use common::dashboard::SubscriptionId;
use common::model::dashboard::DashboardSection;
use yew::context::ContextHandle;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::workspace_grid::WorkspaceGrid;
pub use source::DashboardHandle;
use widgets::DashboardWidget;

pub enum Msg {
    ContextChanged(DashboardHandle),
    Changed(DashboardSection),
    RefreshAll,
    Refresh(DashboardSection),
}

pub struct DashboardView {
    handle: Option<DashboardHandle>,
    subscription: Option<SubscriptionId>,
    _context: Option<ContextHandle<DashboardHandle>>,
}

impl DashboardView {
    fn subscribe(&mut self, ctx: &Context<Self>) {
        if let Some(handle) = &self.handle {
            let link = ctx.link().clone();
            self.subscription = Some(
                handle
                    .0
                    .subscribe(move |section| link.send_message(Msg::Changed(section))),
            );
        }
    }

    fn unsubscribe(&mut self) {
        if let (Some(handle), Some(id)) = (&self.handle, self.subscription.take()) {
            handle.0.unsubscribe(id);
        }
    }
}

impl Component for DashboardView {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let (handle, context) = ctx
            .link()
            .context::<DashboardHandle>(ctx.link().callback(Msg::ContextChanged))
            .unzip();
        let mut view = Self {
            handle,
            subscription: None,
            _context: context,
        };
        view.subscribe(ctx);
        view
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::ContextChanged(handle) => {
                self.unsubscribe();
                self.handle = Some(handle);
                self.subscribe(ctx);
                true
            }
            Msg::Changed(_) => true,
            Msg::RefreshAll => {
                if let Some(handle) = self.handle.clone() {
                    spawn_local(async move { handle.0.refresh_all().await });
                }
                false
            }
            Msg::Refresh(section) => {
                if let Some(handle) = self.handle.clone() {
                    spawn_local(async move { handle.0.refresh_section(section).await });
                }
                false
            }
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if !first_render {
            return;
        }
        let never_loaded = self.handle.as_ref().is_some_and(|handle| {
            DashboardSection::ALL
                .into_iter()
                .all(|section| handle.0.section(section).generation == 0)
        });
        if never_loaded {
            ctx.link().send_message(Msg::RefreshAll);
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.unsubscribe();
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let Some(handle) = &self.handle else {
            return html! { <p>{ "Dashboard unavailable" }</p> };
        };
        let aggregator = &handle.0;
        let data = aggregator.data();
        let loading = aggregator.is_loading();
        let failed = aggregator.errors().len();

        html! {
            <div>
                <div style="display:flex;align-items:center;gap:12px;margin-bottom:12px;">
                    <h2 style="flex:1;">{ "Dashboard" }</h2>
                    {
                        if failed > 0 {
                            html! { <span class="widget-error">{ format!("{} of {} sections failed to load", failed, DashboardSection::ALL.len()) }</span> }
                        } else {
                            html! {}
                        }
                    }
                    <button class="icon-btn primary" disabled={loading} onclick={ctx.link().callback(|_| Msg::RefreshAll)}>
                        <i class="material-icons">{ "refresh" }</i>
                        <span>{ "Refresh all" }</span>
                    </button>
                </div>
                <WorkspaceGrid columns={3} gap_px={16}>
                    { for DashboardSection::ALL.into_iter().map(|section| html! {
                        <DashboardWidget
                            key={section.key()}
                            {section}
                            state={aggregator.section(section)}
                            data={data.clone()}
                            on_refresh={ctx.link().callback(Msg::Refresh)}
                        />
                    }) }
                </WorkspaceGrid>
            </div>
        }
    }
}
