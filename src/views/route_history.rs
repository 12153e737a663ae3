// ============================================================================
// ROUTE HISTORY VIEW - HISTÓRICO DE RUTAS (solo lectura)
// ============================================================================

use yew::prelude::*;

use crate::models::{Route, RouteStatus};
use crate::utils::format;
use crate::viewmodels::RouteViewModel;
use crate::views::app::UiPrefs;

#[derive(Properties, PartialEq)]
pub struct RouteHistoryProps {
    pub prefs: UiPrefs,
}

#[function_component(RouteHistoryView)]
pub fn route_history_view(props: &RouteHistoryProps) -> Html {
    let history = use_state(Vec::<Route>::new);
    let loading = use_state(|| true);
    let selected = use_state(|| None::<Route>);

    {
        let history = history.clone();
        let loading = loading.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                match RouteViewModel::new().load_history().await {
                    Ok(routes) => {
                        log::info!("📋 Histórico cargado: {} rutas", routes.len());
                        history.set(routes);
                    }
                    Err(e) => log::error!("❌ Error cargando histórico: {}", e),
                }
                loading.set(false);
            });
            || ()
        });
    }

    if *loading {
        return html! { <div class="view-placeholder"><p>{"Loading history..."}</p></div> };
    }

    // --- Detalle ---
    if let Some(ref route) = *selected {
        let back = {
            let selected = selected.clone();
            Callback::from(move |_| selected.set(None))
        };
        return html! {
            <div class={classes!("history-detail", props.prefs.dark_mode.then_some("dark"))}>
                <button class="secondary-button" onclick={back}>{"← Back to List"}</button>

                <section class="history-card">
                    <div class="history-card-header">
                        <div>
                            <h2>{"Route Details"}</h2>
                            <p class="history-date">{ route.scheduled_date.to_string() }</p>
                        </div>
                        <span class={classes!("status-pill", (route.status == RouteStatus::Completed).then_some("status-done"))}>
                            { route.status.as_str() }
                        </span>
                    </div>

                    <div class="history-stats">
                        <div class="stat-cell">
                            <span class="stat-label">{"Distance"}</span>
                            <span class="stat-value">{ format::format_distance(route.total_distance) }</span>
                        </div>
                        <div class="stat-cell">
                            <span class="stat-label">{"Stops"}</span>
                            <span class="stat-value">{ route.stops.len() }</span>
                        </div>
                    </div>

                    <h3 class="itinerary-heading">{"Itinerary"}</h3>
                    <div class="itinerary-list">
                        {
                            route.stops.iter().enumerate().map(|(i, stop)| html! {
                                <div key={stop.id.clone()} class="itinerary-stop">
                                    <div class="stop-badge">{ i + 1 }</div>
                                    <div class="stop-info">
                                        <h4 class="stop-name">{ stop.location_name() }</h4>
                                        <p class="stop-address">{ stop.address().unwrap_or_default() }</p>
                                        {
                                            match stop.completed_at {
                                                Some(ref timestamp) => html! {
                                                    <p class="stop-completed">{ format!("Completed: {}", format::format_completed_time(timestamp)) }</p>
                                                },
                                                None => html! {},
                                            }
                                        }
                                    </div>
                                </div>
                            }).collect::<Html>()
                        }
                    </div>
                </section>
            </div>
        };
    }

    // --- Listado ---
    html! {
        <div class={classes!("history-list", props.prefs.dark_mode.then_some("dark"))}>
            {
                if history.is_empty() {
                    html! { <div class="view-placeholder"><p>{"No past routes yet."}</p></div> }
                } else {
                    history.iter().map(|route| {
                        let open = {
                            let selected = selected.clone();
                            let route = route.clone();
                            Callback::from(move |_| selected.set(Some(route.clone())))
                        };
                        html! {
                            <div key={route.id.clone()} class="history-row" onclick={open}>
                                <div>
                                    <h4>{ format!("Route #{}", format::short_route_code(&route.id)) }</h4>
                                    <p class="history-date">{ route.scheduled_date.to_string() }</p>
                                </div>
                                <div class="history-row-meta">
                                    <span>{ route.stops.len() }{" stops"}</span>
                                    <span>{ format::format_distance(route.total_distance) }</span>
                                    <span class={classes!("status-pill", (route.status == RouteStatus::Completed).then_some("status-done"))}>
                                        { route.status.as_str() }
                                    </span>
                                </div>
                            </div>
                        }
                    }).collect::<Html>()
                }
            }
        </div>
    }
}
