//! One widget per dashboard section. Widgets render from the aggregator's data and keep
//! showing the last good record while a refresh fails.

use common::dashboard::{LoadStatus, SectionState};
use common::model::dashboard::{DashboardData, DashboardSection};
use yew::prelude::*;

use crate::helpers::{format_count, format_money};

#[derive(Properties, PartialEq)]
pub struct WidgetProps {
    pub section: DashboardSection,
    pub state: SectionState,
    pub data: DashboardData,
    pub on_refresh: Callback<DashboardSection>,
}

#[function_component(DashboardWidget)]
pub fn dashboard_widget(props: &WidgetProps) -> Html {
    let section = props.section;
    let on_refresh = {
        let on_refresh = props.on_refresh.clone();
        Callback::from(move |_: MouseEvent| on_refresh.emit(section))
    };
    let loading = props.state.status == LoadStatus::Loading;

    html! {
        <div class="panel widget">
            <div class="widget-header">
                <h3>{ section.title() }</h3>
                <button class="icon-btn" title="Refresh" disabled={loading} onclick={on_refresh}>
                    <i class="material-icons">{ if loading { "hourglass_empty" } else { "refresh" } }</i>
                </button>
            </div>
            {
                if let Some(error) = &props.state.error {
                    html! { <div class="widget-error">{ error.clone() }</div> }
                } else {
                    html! {}
                }
            }
            {
                if props.data.has(section) {
                    section_body(section, &props.data)
                } else if loading || props.state.status == LoadStatus::Idle {
                    html! { <p>{ "Loading..." }</p> }
                } else {
                    html! { <p>{ "No data" }</p> }
                }
            }
        </div>
    }
}

fn stat(label: &str, value: String) -> Html {
    html! {
        <div>
            <div class="widget-stat">{ value }</div>
            <small>{ label.to_string() }</small>
        </div>
    }
}

fn section_body(section: DashboardSection, data: &DashboardData) -> Html {
    match section {
        DashboardSection::Overview => match &data.overview {
            Some(o) => html! {
                <div style="display:grid;grid-template-columns:1fr 1fr;gap:8px;">
                    { stat("Users", format_count(o.total_users)) }
                    { stat("Courses", format_count(o.total_courses)) }
                    { stat("Categories", format_count(o.total_categories)) }
                    { stat("Active subscriptions", format_count(o.active_subscriptions)) }
                </div>
            },
            None => html! {},
        },
        DashboardSection::Earnings => match &data.earnings {
            Some(e) => {
                let growth_color = if e.growth_percentage < 0.0 { "#c62828" } else { "#2e7d32" };
                html! {
                    <>
                        { stat("Total earnings", format_money(e.total_earnings, &e.currency)) }
                        <p>
                            { format!("This month: {}", format_money(e.this_month, &e.currency)) }
                            <br />
                            { format!("Last month: {}", format_money(e.last_month, &e.currency)) }
                        </p>
                        <span style={format!("color:{};", growth_color)}>
                            { format!("{:+.1}%", e.growth_percentage) }
                        </span>
                    </>
                }
            }
            None => html! {},
        },
        DashboardSection::MonthlyProgress => match &data.monthly_progress {
            Some(progress) if progress.months.is_empty() => html! { <p>{ "No activity yet" }</p> },
            Some(progress) => {
                let peak = progress.months.iter().map(|m| m.enrollments).max().unwrap_or(0).max(1);
                html! {
                    <div style="display:flex;align-items:flex-end;gap:4px;height:100px;">
                        { for progress.months.iter().map(|m| {
                            let height = (m.enrollments * 100 / peak).max(2);
                            html! {
                                <div
                                    title={format!("{}: {} enrollments", m.month, format_count(m.enrollments))}
                                    style={format!("flex:1;height:{}%;background:#0b3d91;", height)}
                                />
                            }
                        }) }
                    </div>
                }
            }
            None => html! {},
        },
        DashboardSection::MonthlyReport => match &data.monthly_report {
            Some(r) => html! {
                <>
                    <p><strong>{ if r.month.is_empty() { "Current month".to_string() } else { r.month.clone() } }</strong></p>
                    { stat("New users", format_count(r.new_users)) }
                    <p>
                        { format!("{} new subscriptions, {} completed courses", format_count(r.new_subscriptions), format_count(r.completed_courses)) }
                        <br />
                        { format!("Revenue {}", format_money(r.revenue, "")) }
                    </p>
                </>
            },
            None => html! {},
        },
        DashboardSection::Updates => match &data.updates {
            Some(updates) if updates.items.is_empty() => html! { <p>{ "Nothing new" }</p> },
            Some(updates) => html! {
                <ul>
                    { for updates.items.iter().take(6).map(|item| html! {
                        <li key={item.id.clone()}>
                            <strong>{ item.title.clone() }</strong>
                            { " " }
                            <small>{ item.created_at.clone() }</small>
                            <div>{ item.description.clone() }</div>
                        </li>
                    }) }
                </ul>
            },
            None => html! {},
        },
        DashboardSection::Analytics => match &data.analytics {
            Some(a) => html! {
                <>
                    { stat("Page views", format_count(a.page_views)) }
                    <p>
                        { format!("{} unique visitors, bounce rate {:.1}%", format_count(a.unique_visitors), a.bounce_rate) }
                    </p>
                    <ol>
                        { for a.top_courses.iter().take(5).map(|c| html! {
                            <li>{ format!("{} ({})", c.title, format_count(c.enrollments)) }</li>
                        }) }
                    </ol>
                </>
            },
            None => html! {},
        },
    }
}
