// ============================================================================
// LOCAL COURIER VIEW - RUTA LAST-MILE (postmats)
// ============================================================================

use yew::prelude::*;

use crate::hooks::use_courier_route;
use crate::models::{RouteStatus, RouteStop};
use crate::utils::{dialog, format};
use crate::viewmodels::RouteAction;
use crate::views::app::UiPrefs;
use crate::views::locker_modal::LockerModal;

#[derive(Properties, PartialEq)]
pub struct LocalCourierProps {
    pub prefs: UiPrefs,
}

#[function_component(LocalCourierView)]
pub fn local_courier_view(props: &LocalCourierProps) -> Html {
    let handle = use_courier_route();
    let active_stop_id = use_state(|| None::<String>);

    let state = (*handle.state).clone();

    if state.loading {
        return html! {
            <div class="view-placeholder">
                <p>{"Loading route data..."}</p>
            </div>
        };
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
                <h2>{"No Active Route"}</h2>
                <p>{"You don't have any assigned routes currently."}</p>
                <button class="secondary-button" onclick={check_again}>{"Check Again"}</button>
            </div>
        };
    };

    let next_stop_id = route.next_stop().map(|stop| stop.id.clone());
    let action = RouteAction::available_for(&route);

    let on_action = {
        let start_route = handle.start_route.clone();
        let finish_route = handle.finish_route.clone();
        let route_type = route.route_type;
        Callback::from(move |action: RouteAction| {
            // La confirmación es contrato de la vista, no del viewmodel
            if !dialog::confirm(action.confirmation_prompt(route_type)) {
                return;
            }
            match action {
                RouteAction::Start => start_route.emit(()),
                RouteAction::Finish => finish_route.emit(()),
            }
        })
    };

    // La parada abierta en el modal se rederiva SIEMPRE del estado fresco
    // de la ruta; cerrada la parada (recarga posterior) el modal se va solo
    let active_stop: Option<RouteStop> = active_stop_id
        .as_ref()
        .and_then(|id| route.stop_by_id(id))
        .filter(|stop| !stop.is_completed())
        .cloned();

    html! {
        <div class={classes!("local-courier", props.prefs.dark_mode.then_some("dark"))}>
            <section class="route-header-card">
                <div class="route-progress-track">
                    <div class="route-progress-fill" style={format!("width: {:.0}%", route.progress())}></div>
                </div>
                <div class="route-header-main">
                    <div>
                        <h1 class="route-title">{ format!("Route #{}", format::short_route_code(&route.id)) }</h1>
                        <p class="route-meta">
                            { route.scheduled_date.to_string() }
                            {" • "}{ route.stops.len() }{" stops"}
                            {" • ~"}{ format::format_distance(route.total_distance) }
                        </p>
                    </div>
                    <div class="route-header-action">
                        {
                            match (action, route.status) {
                                (Some(act), _) => {
                                    let onclick = {
                                        let on_action = on_action.clone();
                                        Callback::from(move |_| on_action.emit(act))
                                    };
                                    html! {
                                        <button class="primary-button" disabled={state.action_loading} {onclick}>
                                            { act.label(route.route_type) }
                                        </button>
                                    }
                                }
                                (None, RouteStatus::InProgress) => html! {
                                    <span class="status-pill status-progress">{"IN PROGRESS"}</span>
                                },
                                (None, RouteStatus::Completed) => html! {
                                    <span class="status-pill status-done">{"COMPLETED"}</span>
                                },
                                _ => html! {},
                            }
                        }
                    </div>
                </div>
            </section>

            <section class="stops-list">
                {
                    route.stops.iter().enumerate().map(|(i, stop)| {
                        let is_completed = stop.is_completed();
                        let is_next = next_stop_id.as_deref() == Some(stop.id.as_str());

                        let open_locker = {
                            let active_stop_id = active_stop_id.clone();
                            let stop_id = stop.id.clone();
                            Callback::from(move |_| active_stop_id.set(Some(stop_id.clone())))
                        };

                        html! {
                            <div
                                key={stop.id.clone()}
                                class={classes!(
                                    "stop-card",
                                    is_completed.then_some("stop-done"),
                                    is_next.then_some("stop-next"),
                                )}
                            >
                                <div class="stop-badge">
                                    { if is_completed { html! {"✓"} } else { html! { {i + 1} } } }
                                </div>
                                <div class="stop-info">
                                    <h3 class="stop-name">
                                        { stop.location_name() }
                                        { if is_next { html! { <span class="next-pill">{"NEXT STOP"}</span> } } else { html!{} } }
                                    </h3>
                                    <p class="stop-address">{ stop.address().unwrap_or_else(|| "No address data".to_string()) }</p>
                                    {
                                        if stop.has_cargo() {
                                            html! {
                                                <div class="stop-cargo">
                                                    { if !stop.dropoffs.is_empty() { html! { <span class="cargo-badge cargo-drop">{ format!("{} DROP", stop.dropoffs.len()) }</span> } } else { html!{} } }
                                                    { if !stop.pickups.is_empty() { html! { <span class="cargo-badge cargo-pick">{ format!("{} PICK", stop.pickups.len()) }</span> } } else { html!{} } }
                                                </div>
                                            }
                                        } else {
                                            html! {}
                                        }
                                    }
                                </div>
                                <div class="stop-action">
                                    {
                                        if is_next && route.status == RouteStatus::InProgress {
                                            html! {
                                                <button class="primary-button" onclick={open_locker}>
                                                    {"OPEN LOCKER INTERFACE"}
                                                </button>
                                            }
                                        } else if !is_completed && route.status == RouteStatus::InProgress {
                                            match stop.coordinates() {
                                                Some((lat, lon)) => html! {
                                                    <a
                                                        class="secondary-button"
                                                        href={format!("https://www.google.com/maps/dir/?api=1&destination={},{}", lat, lon)}
                                                        target="_blank"
                                                        rel="noreferrer"
                                                    >
                                                        {"Navigate"}
                                                    </a>
                                                },
                                                None => html! {},
                                            }
                                        } else {
                                            html! {}
                                        }
                                    }
                                </div>
                            </div>
                        }
                    }).collect::<Html>()
                }
            </section>

            {
                match active_stop {
                    Some(stop) => {
                        let on_close = {
                            let active_stop_id = active_stop_id.clone();
                            Callback::from(move |_| active_stop_id.set(None))
                        };
                        html! {
                            <LockerModal
                                stop={stop}
                                route_id={route.id.clone()}
                                busy={state.action_loading}
                                dark_mode={props.prefs.dark_mode}
                                {on_close}
                                on_complete={handle.complete_stop.clone()}
                                on_scan_success={handle.apply_scan.clone()}
                            />
                        }
                    }
                    None => html! {},
                }
            }
        </div>
    }
}
