// ============================================================================
// LOCKER MODAL - INTERACCIÓN CON UN POSTMAT/ALMACÉN
// ============================================================================
// Dos pestañas (dropoff / pickup), escaneo por entrada o masivo, y cierre
// de la parada cuando todo el manifiesto está resuelto. El status de cada
// entrada se deriva del modelo en cada render, nunca se cachea aquí.
// ============================================================================

use yew::prelude::*;

use crate::models::{is_package_completed, PackageInfo, RouteStop, ScanAction};
use crate::utils::dialog;
use crate::viewmodels::LockerViewModel;

#[derive(Properties, PartialEq)]
pub struct LockerModalProps {
    pub stop: RouteStop,
    pub route_id: String,
    /// Flag de acción global del padre (complete-stop en vuelo)
    pub busy: bool,
    pub dark_mode: bool,
    pub on_close: Callback<()>,
    pub on_complete: Callback<String>,
    /// (stop_id, package_id, nuevo status) hacia el modelo de ruta
    pub on_scan_success: Callback<(String, String, String)>,
}

#[function_component(LockerModal)]
pub fn locker_modal(props: &LockerModalProps) -> Html {
    let active_tab = use_state(|| ScanAction::Drop);
    // Id de la entrada con escaneo en vuelo; una sola a la vez
    let scanning_id = use_state(|| None::<String>);
    let bulk_running = use_state(|| false);

    let stop = &props.stop;
    let drops_left = stop.drops_left();
    let picks_left = stop.picks_left();
    let is_ready = stop.is_ready_to_finish();
    let progress = stop.cargo_progress();

    let on_scan = {
        let scanning_id = scanning_id.clone();
        let on_scan_success = props.on_scan_success.clone();
        let route_id = props.route_id.clone();
        let stop_id = stop.id.clone();
        Callback::from(move |(info, action): (PackageInfo, ScanAction)| {
            if scanning_id.is_some() {
                return;
            }
            scanning_id.set(Some(info.id.clone()));

            let scanning_id = scanning_id.clone();
            let on_scan_success = on_scan_success.clone();
            let route_id = route_id.clone();
            let stop_id = stop_id.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match LockerViewModel::new()
                    .scan_item(&route_id, &stop_id, &info, action)
                    .await
                {
                    Ok(Some(new_status)) => {
                        on_scan_success.emit((stop_id, info.id, new_status));
                    }
                    // Entrada ya resuelta: nada que hacer
                    Ok(None) => {}
                    Err(e) => {
                        log::error!("❌ Error escaneando {}: {}", info.display_code, e);
                        dialog::alert(&format!("Scan error: {}", e));
                    }
                }
                scanning_id.set(None);
            });
        })
    };

    let on_scan_all = {
        let bulk_running = bulk_running.clone();
        let scanning_id = scanning_id.clone();
        let active_tab = active_tab.clone();
        let on_scan_success = props.on_scan_success.clone();
        let route_id = props.route_id.clone();
        let stop = stop.clone();
        Callback::from(move |_| {
            if *bulk_running || scanning_id.is_some() {
                return;
            }
            if !dialog::confirm("Scan ALL remaining packages in this list?") {
                return;
            }
            bulk_running.set(true);

            let bulk_running = bulk_running.clone();
            let on_scan_success = on_scan_success.clone();
            let route_id = route_id.clone();
            let stop = stop.clone();
            let action = *active_tab;
            wasm_bindgen_futures::spawn_local(async move {
                let stop_id = stop.id.clone();
                let report = LockerViewModel::new()
                    .scan_all(&route_id, &stop, action, |package_id, new_status| {
                        on_scan_success.emit((
                            stop_id.clone(),
                            package_id.to_string(),
                            new_status.to_string(),
                        ));
                    })
                    .await;

                if report.failed > 0 {
                    dialog::alert(&format!("{} package(s) failed to scan", report.failed));
                }
                bulk_running.set(false);
            });
        })
    };

    let on_confirm = {
        let on_complete = props.on_complete.clone();
        let stop_id = stop.id.clone();
        Callback::from(move |_| on_complete.emit(stop_id.clone()))
    };

    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_| on_close.emit(()))
    };

    let select_tab = |action: ScanAction| {
        let active_tab = active_tab.clone();
        Callback::from(move |_| active_tab.set(action))
    };

    let action = *active_tab;
    let items: Vec<(PackageInfo, bool)> = stop
        .cargo(action)
        .iter()
        .map(|item| {
            let info = item.info();
            let completed = is_package_completed(info.status.as_deref(), action);
            (info, completed)
        })
        .collect();

    let confirm_disabled = !is_ready || props.busy || *bulk_running;

    html! {
        <div class="modal-backdrop">
            <div class={classes!("locker-modal", props.dark_mode.then_some("dark"))}>
                <div class="locker-summary">
                    <button class="modal-close" onclick={on_close}>{"✕"}</button>
                    <h2 class="locker-title">{ stop.location_name() }</h2>
                    <p class="locker-address">{ stop.address().unwrap_or_else(|| "No address data".to_string()) }</p>

                    <div class="locker-counters">
                        <div class={classes!("counter-card", (drops_left == 0).then_some("counter-done"))}>
                            <span class="counter-label">{"Drop"}</span>
                            <span class="counter-value">{ drops_left }{" / "}{ stop.dropoffs.len() }</span>
                        </div>
                        <div class={classes!("counter-card", (picks_left == 0).then_some("counter-done"))}>
                            <span class="counter-label">{"Pick"}</span>
                            <span class="counter-value">{ picks_left }{" / "}{ stop.pickups.len() }</span>
                        </div>
                    </div>

                    <div class="locker-progress">
                        <span>{ format!("{:.0}%", progress) }</span>
                        <div class="progress-track">
                            <div class="progress-fill" style={format!("width: {:.0}%", progress)}></div>
                        </div>
                    </div>

                    <button class="confirm-button" disabled={confirm_disabled} onclick={on_confirm}>
                        {
                            if props.busy {
                                "Working..."
                            } else if is_ready {
                                "Finish stop"
                            } else {
                                "Finish scanning first"
                            }
                        }
                    </button>
                </div>

                <div class="locker-manifest">
                    <div class="manifest-tabs">
                        <button
                            class={classes!("manifest-tab", (action == ScanAction::Drop).then_some("tab-active"))}
                            onclick={select_tab(ScanAction::Drop)}
                        >
                            {"Drop off"} <span class="tab-count">{ stop.dropoffs.len() }</span>
                        </button>
                        <button
                            class={classes!("manifest-tab", (action == ScanAction::Pick).then_some("tab-active"))}
                            onclick={select_tab(ScanAction::Pick)}
                        >
                            {"Pick up"} <span class="tab-count">{ stop.pickups.len() }</span>
                        </button>
                    </div>

                    {
                        if items.is_empty() {
                            html! { <p class="manifest-empty">{"No packages in this category."}</p> }
                        } else {
                            html! {
                                <>
                                    <div class="manifest-toolbar">
                                        <span class="manifest-hint">{"Tap a card to scan it"}</span>
                                        <button class="scan-all-button" onclick={on_scan_all} disabled={*bulk_running}>
                                            { if *bulk_running { "Scanning..." } else { "Scan all" } }
                                        </button>
                                    </div>
                                    <div class="manifest-list">
                                        {
                                            items.iter().map(|(info, completed)| {
                                                let is_scanning = scanning_id.as_deref() == Some(info.id.as_str());
                                                let onclick = {
                                                    let on_scan = on_scan.clone();
                                                    let info = info.clone();
                                                    let completed = *completed;
                                                    Callback::from(move |_| {
                                                        if !completed {
                                                            on_scan.emit((info.clone(), action));
                                                        }
                                                    })
                                                };
                                                html! {
                                                    <div
                                                        key={info.id.clone()}
                                                        class={classes!(
                                                            "manifest-card",
                                                            completed.then_some("card-done"),
                                                            is_scanning.then_some("card-scanning"),
                                                        )}
                                                        {onclick}
                                                    >
                                                        <div class="card-main">
                                                            <span class="card-code">{ &info.display_code }</span>
                                                            <span class="card-size">{ format!("Size: {}", info.size.to_uppercase()) }</span>
                                                        </div>
                                                        <div class="card-state">
                                                            {
                                                                if is_scanning {
                                                                    html! { <span class="spinner">{"…"}</span> }
                                                                } else if *completed {
                                                                    html! { <span class="card-check">{"✓"}</span> }
                                                                } else {
                                                                    html! { <span class="card-scan-icon">{"⌁"}</span> }
                                                                }
                                                            }
                                                        </div>
                                                    </div>
                                                }
                                            }).collect::<Html>()
                                        }
                                    </div>
                                </>
                            }
                        }
                    }
                </div>
            </div>
        </div>
    }
}
