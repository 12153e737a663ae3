// ============================================================================
// WAREHOUSE COURIER VIEW - MANIFIESTO LINE-HAUL (hub a hub)
// ============================================================================

use yew::prelude::*;

use crate::hooks::use_courier_route;
use crate::models::{RouteStatus, RouteType};
use crate::utils::{dialog, format};
use crate::viewmodels::RouteAction;
use crate::views::app::UiPrefs;

#[derive(Properties, PartialEq)]
pub struct WarehouseCourierProps {
    pub prefs: UiPrefs,
}

#[function_component(WarehouseCourierView)]
pub fn warehouse_courier_view(props: &WarehouseCourierProps) -> Html {
    let handle = use_courier_route();
    let state = (*handle.state).clone();

    if state.loading {
        return html! { <div class="view-placeholder"><p>{"Loading manifest..."}</p></div> };
    }

    if let Some(ref error) = state.error {
        let retry = {
            let reload = handle.reload.clone();
            Callback::from(move |_| reload.emit(()))
        };
        return html! {
            <div class="view-placeholder view-error">
                <p>{ error.clone() }</p>
                <button class="secondary-button" onclick={retry}>{"Retry"}</button>
            </div>
        };
    }

    let Some(route) = state.route else {
        let check_again = {
            let reload = handle.reload.clone();
            Callback::from(move |_| reload.emit(()))
        };
        return html! {
            <div class="view-placeholder">
                <h2>{"No Active Manifest"}</h2>
                <p>{"You are currently on standby. Check back later."}</p>
                <button class="secondary-button" onclick={check_again}>{"Check Again"}</button>
            </div>
        };
    };

    let next_stop_id = route.next_stop().map(|stop| stop.id.clone());
    let next_stop_city = route
        .next_stop()
        .map(|stop| stop.location_name())
        .unwrap_or_else(|| "DEPOT".to_string());
    let action = RouteAction::available_for(&route);

    let on_action = {
        let start_route = handle.start_route.clone();
        let finish_route = handle.finish_route.clone();
        Callback::from(move |action: RouteAction| {
            if !dialog::confirm(action.confirmation_prompt(RouteType::LineHaul)) {
                return;
            }
            match action {
                RouteAction::Start => start_route.emit(()),
                RouteAction::Finish => finish_route.emit(()),
            }
        })
    };

    html! {
        <div class={classes!("warehouse-courier", props.prefs.dark_mode.then_some("dark"))}>
            <section class="manifest-card">
                <div class="manifest-header">
                    <div>
                        <h1 class="manifest-title">{"Line Haul"}</h1>
                        <p class="manifest-id">{ format::short_route_code(&route.id) }</p>
                    </div>
                    <div class="manifest-next">
                        <span class="manifest-next-label">{"Next Stop"}</span>
                        <span class="manifest-next-city">{ next_stop_city }</span>
                    </div>
                </div>

                <div class="manifest-stats">
                    <div class="stat-cell">
                        <span class="stat-label">{"Distance"}</span>
                        <span class="stat-value">{ format::format_distance(route.total_distance) }</span>
                    </div>
                    <div class="stat-cell">
                        <span class="stat-label">{"Stops"}</span>
                        <span class="stat-value">{ route.stops.len() }</span>
                    </div>
                    <div class="stat-cell">
                        <span class="stat-label">{"Time"}</span>
                        <span class="stat-value">{ format::format_duration(route.estimated_duration) }</span>
                    </div>
                </div>

                {
                    match action {
                        Some(act) => {
                            let onclick = {
                                let on_action = on_action.clone();
                                Callback::from(move |_| on_action.emit(act))
                            };
                            html! {
                                <button class="primary-button full-width" disabled={state.action_loading} {onclick}>
                                    { act.label(RouteType::LineHaul) }
                                </button>
                            }
                        }
                        None => html! {},
                    }
                }
            </section>

            <section class="itinerary-card">
                <h3 class="itinerary-heading">{"Route Plan"}</h3>
                <div class="itinerary-list">
                    {
                        route.stops.iter().enumerate().map(|(i, stop)| {
                            let is_done = stop.is_completed();
                            let is_current = next_stop_id.as_deref() == Some(stop.id.as_str());

                            let confirm_stop = {
                                let complete_stop = handle.complete_stop.clone();
                                let stop_id = stop.id.clone();
                                Callback::from(move |_| {
                                    if dialog::confirm("Confirm stop completion?") {
                                        complete_stop.emit(stop_id.clone());
                                    }
                                })
                            };

                            html! {
                                <div
                                    key={stop.id.clone()}
                                    class={classes!(
                                        "itinerary-stop",
                                        is_done.then_some("stop-done"),
                                        is_current.then_some("stop-current"),
                                    )}
                                >
                                    <div class="stop-badge">
                                        { if is_done { html! {"✓"} } else { html! { {i + 1} } } }
                                    </div>
                                    <div class="stop-info">
                                        <h4 class="stop-name">{ stop.location_name() }</h4>
                                        <p class="stop-address">{ stop.address().unwrap_or_default() }</p>
                                        <div class="stop-cargo">
                                            { if !stop.dropoffs.is_empty() { html! { <span class="cargo-badge cargo-drop">{ format!("UNLOAD: {}", stop.dropoffs.len()) }</span> } } else { html!{} } }
                                            { if !stop.pickups.is_empty() { html! { <span class="cargo-badge cargo-pick">{ format!("LOAD: {}", stop.pickups.len()) }</span> } } else { html!{} } }
                                        </div>
                                    </div>
                                    {
                                        if is_current && route.status == RouteStatus::InProgress {
                                            html! {
                                                <button
                                                    class="primary-button"
                                                    disabled={state.action_loading}
                                                    onclick={confirm_stop}
                                                >
                                                    {"CONFIRM STOP"}
                                                </button>
                                            }
                                        } else {
                                            html! {}
                                        }
                                    }
                                </div>
                            }
                        }).collect::<Html>()
                    }
                </div>
            </section>
        </div>
    }
}
