use yew::prelude::*;

use crate::models::Route;
use crate::utils::dialog;
use crate::viewmodels::RouteViewModel;

/// Estado reactivo de la ruta activa del courier.
///
/// La ruta solo muta por dos caminos: recarga completa desde el backend
/// (mount, start, finish, complete-stop) o parche optimista de un escaneo
/// (`apply_scan`). Nadie más toca el modelo.
#[derive(Clone, PartialEq)]
pub struct CourierRouteState {
    pub route: Option<Route>,
    pub loading: bool,
    pub action_loading: bool,
    pub error: Option<String>,
}

pub struct UseCourierRouteHandle {
    pub state: UseStateHandle<CourierRouteState>,
    pub reload: Callback<()>,
    pub start_route: Callback<()>,
    pub finish_route: Callback<()>,
    /// Cierra la parada indicada y recarga la ruta completa
    pub complete_stop: Callback<String>,
    /// (stop_id, package_id, nuevo status) confirmado por un escaneo
    pub apply_scan: Callback<(String, String, String)>,
}

fn reload_into(state: UseStateHandle<CourierRouteState>) {
    wasm_bindgen_futures::spawn_local(async move {
        let mut current_state = (*state).clone();
        current_state.loading = true;
        current_state.error = None;
        state.set(current_state);

        match RouteViewModel::new().load_current().await {
            Ok(route) => {
                let mut current_state = (*state).clone();
                current_state.route = route;
                current_state.loading = false;
                state.set(current_state);
            }
            Err(e) => {
                log::error!("❌ Error cargando ruta: {}", e);
                let mut current_state = (*state).clone();
                current_state.loading = false;
                current_state.error = Some("Failed to load route data. Please try refreshing.".to_string());
                state.set(current_state);
            }
        }
    });
}

#[hook]
pub fn use_courier_route() -> UseCourierRouteHandle {
    let state = use_state(|| CourierRouteState {
        route: None,
        loading: true,
        action_loading: false,
        error: None,
    });

    // Cargar la ruta activa al montar
    {
        let state = state.clone();
        use_effect_with((), move |_| {
            reload_into(state);
            || ()
        });
    }

    let reload = {
        let state = state.clone();
        Callback::from(move |_| reload_into(state.clone()))
    };

    // Arrancar turno
    let start_route = {
        let state = state.clone();
        Callback::from(move |_| {
            let current = (*state).clone();
            if current.action_loading {
                log::warn!("⚠️ Acción en curso, se ignora el reenvío");
                return;
            }
            let Some(route) = current.route else {
                return;
            };

            let state = state.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let mut current_state = (*state).clone();
                current_state.action_loading = true;
                state.set(current_state);

                match RouteViewModel::new().start_route(&route).await {
                    Ok(()) => {
                        let mut current_state = (*state).clone();
                        current_state.action_loading = false;
                        state.set(current_state);
                        reload_into(state);
                    }
                    Err(e) => {
                        log::error!("❌ Error arrancando ruta: {}", e);
                        dialog::alert(&format!("Error: {}", e));
                        let mut current_state = (*state).clone();
                        current_state.action_loading = false;
                        state.set(current_state);
                    }
                }
            });
        })
    };

    // Cerrar turno
    let finish_route = {
        let state = state.clone();
        Callback::from(move |_| {
            let current = (*state).clone();
            if current.action_loading {
                log::warn!("⚠️ Acción en curso, se ignora el reenvío");
                return;
            }
            let Some(route) = current.route else {
                return;
            };

            let state = state.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let mut current_state = (*state).clone();
                current_state.action_loading = true;
                state.set(current_state);

                match RouteViewModel::new().finish_route(&route).await {
                    Ok(()) => {
                        let mut current_state = (*state).clone();
                        current_state.action_loading = false;
                        state.set(current_state);
                        reload_into(state);
                    }
                    Err(e) => {
                        log::error!("❌ Error cerrando ruta: {}", e);
                        dialog::alert(&format!("Error: {}", e));
                        let mut current_state = (*state).clone();
                        current_state.action_loading = false;
                        state.set(current_state);
                    }
                }
            });
        })
    };

    // Cerrar una parada y refrescar todo
    let complete_stop = {
        let state = state.clone();
        Callback::from(move |stop_id: String| {
            let current = (*state).clone();
            if current.action_loading {
                log::warn!("⚠️ Acción en curso, se ignora el reenvío");
                return;
            }
            let Some(route) = current.route else {
                return;
            };

            let state = state.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let mut current_state = (*state).clone();
                current_state.action_loading = true;
                state.set(current_state);

                match RouteViewModel::new().complete_stop(&route.id, &stop_id).await {
                    Ok(()) => {
                        log::info!("✅ Parada {} cerrada", stop_id);
                        let mut current_state = (*state).clone();
                        current_state.action_loading = false;
                        state.set(current_state);
                        reload_into(state);
                    }
                    Err(e) => {
                        log::error!("❌ Error cerrando parada: {}", e);
                        dialog::alert(&format!("Error completing stop: {}", e));
                        let mut current_state = (*state).clone();
                        current_state.action_loading = false;
                        state.set(current_state);
                    }
                }
            });
        })
    };

    // Parche optimista tras un escaneo confirmado
    let apply_scan = {
        let state = state.clone();
        Callback::from(move |(stop_id, package_id, new_status): (String, String, String)| {
            let mut current_state = (*state).clone();
            match current_state.route.as_mut() {
                Some(route) => {
                    route.apply_scan_result(&stop_id, &package_id, &new_status);
                }
                // Sin ruta cargada el parche es un no-op, nunca un panic
                None => {
                    log::warn!("⚠️ Parche de escaneo sin ruta cargada, ignorado");
                    return;
                }
            }
            state.set(current_state);
        })
    };

    UseCourierRouteHandle {
        state,
        reload,
        start_route,
        finish_route,
        complete_stop,
        apply_scan,
    }
}
