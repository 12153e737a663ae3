// ============================================================================
// ROUTE VIEWMODEL - TRANSICIONES DE RUTA COMPLETA
// ============================================================================
// planned → in_progress → completed, lineal. `cancelled` es terminal y
// solo lo pone el backend. Devuelve valores; los hooks actualizan estado.
// ============================================================================

use crate::models::{Route, RouteStatus, RouteType};
use crate::services::{ApiClient, ApiError, RouteApi};

/// Acción de ciclo de vida disponible para la ruta en su estado actual.
///
/// Las acciones destructivas requieren confirmación del usuario; el core
/// no abre diálogos, expone el prompt y la vista decide cómo preguntarlo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAction {
    Start,
    Finish,
}

impl RouteAction {
    /// Única acción ofrecida para el estado actual, o ninguna
    pub fn available_for(route: &Route) -> Option<RouteAction> {
        match route.status {
            RouteStatus::Planned => Some(RouteAction::Start),
            RouteStatus::InProgress if route.all_stops_completed() => Some(RouteAction::Finish),
            _ => None,
        }
    }

    pub fn confirmation_prompt(&self, route_type: RouteType) -> &'static str {
        match (self, route_type) {
            (RouteAction::Start, RouteType::LastMile) => "Start route timing?",
            (RouteAction::Start, RouteType::LineHaul) => "Start transport?",
            (RouteAction::Finish, RouteType::LastMile) => "Finish shift and submit report?",
            (RouteAction::Finish, RouteType::LineHaul) => "Complete manifest?",
        }
    }

    pub fn label(&self, route_type: RouteType) -> &'static str {
        match (self, route_type) {
            (RouteAction::Start, RouteType::LastMile) => "START SHIFT",
            (RouteAction::Start, RouteType::LineHaul) => "START TRANSPORT",
            (RouteAction::Finish, RouteType::LastMile) => "FINISH SHIFT",
            (RouteAction::Finish, RouteType::LineHaul) => "COMPLETE MANIFEST",
        }
    }
}

/// ViewModel de ciclo de vida de ruta - SOLO lógica de negocio
pub struct RouteViewModel<A: RouteApi = ApiClient> {
    api: A,
}

impl RouteViewModel<ApiClient> {
    pub fn new() -> Self {
        Self { api: ApiClient::new() }
    }
}

impl Default for RouteViewModel<ApiClient> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: RouteApi> RouteViewModel<A> {
    pub fn with_api(api: A) -> Self {
        Self { api }
    }

    /// Ruta activa; `Ok(None)` significa "sin ruta asignada", no error
    pub async fn load_current(&self) -> Result<Option<Route>, ApiError> {
        self.api.fetch_current_route().await
    }

    /// Arranca el turno. El servidor es la autoridad; el gate local solo
    /// evita mandar una transición que la UI no debería ofrecer.
    pub async fn start_route(&self, route: &Route) -> Result<(), ApiError> {
        if route.status != RouteStatus::Planned {
            return Err(ApiError::RequestFailed {
                status: 0,
                message: "Route is not in planned state".to_string(),
            });
        }
        self.api.start_route(&route.id).await
    }

    /// Cierra el turno; solo válido con todas las paradas completadas
    pub async fn finish_route(&self, route: &Route) -> Result<(), ApiError> {
        if route.status != RouteStatus::InProgress || !route.all_stops_completed() {
            return Err(ApiError::RequestFailed {
                status: 0,
                message: "Cannot finish route. Complete all stops first.".to_string(),
            });
        }
        self.api.finish_route(&route.id).await
    }

    /// Cierra una parada. El pre-check de readiness vive en la vista
    /// (botón deshabilitado); el servidor revalida de todas formas.
    pub async fn complete_stop(&self, route_id: &str, stop_id: &str) -> Result<(), ApiError> {
        self.api.complete_stop(route_id, stop_id).await
    }

    pub async fn load_history(&self) -> Result<Vec<Route>, ApiError> {
        self.api.route_history().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewmodels::test_api::{ApiCall, MockApi};
    use chrono::{NaiveDate, Utc};
    use futures::executor::block_on;

    fn route(status: RouteStatus, stops_completed: &[bool]) -> Route {
        Route {
            id: "r1".to_string(),
            status,
            route_type: RouteType::LastMile,
            scheduled_date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            total_distance: 10.0,
            estimated_duration: 60,
            started_at: None,
            completed_at: None,
            stops: stops_completed
                .iter()
                .enumerate()
                .map(|(i, done)| crate::models::RouteStop {
                    id: format!("s{}", i),
                    order: i as u32,
                    postmat: None,
                    warehouse: None,
                    distance_from_previous: None,
                    estimated_arrival: None,
                    completed_at: done.then(Utc::now),
                    dropoffs: vec![],
                    pickups: vec![],
                })
                .collect(),
        }
    }

    #[test]
    fn accion_disponible_por_estado() {
        assert_eq!(
            RouteAction::available_for(&route(RouteStatus::Planned, &[false])),
            Some(RouteAction::Start)
        );
        // En progreso con paradas pendientes no se ofrece nada global
        assert_eq!(
            RouteAction::available_for(&route(RouteStatus::InProgress, &[true, false])),
            None
        );
        assert_eq!(
            RouteAction::available_for(&route(RouteStatus::InProgress, &[true, true])),
            Some(RouteAction::Finish)
        );
        assert_eq!(
            RouteAction::available_for(&route(RouteStatus::Completed, &[true])),
            None
        );
        assert_eq!(
            RouteAction::available_for(&route(RouteStatus::Cancelled, &[false])),
            None
        );
    }

    #[test]
    fn start_rechazado_fuera_de_planned_sin_llamar_red() {
        let api = MockApi::default();
        let vm = RouteViewModel::with_api(api.clone());

        let result = block_on(vm.start_route(&route(RouteStatus::InProgress, &[false])));
        assert!(result.is_err());
        assert!(api.calls.borrow().is_empty());
    }

    #[test]
    fn start_en_planned_llama_al_backend() {
        let api = MockApi::default();
        let vm = RouteViewModel::with_api(api.clone());

        block_on(vm.start_route(&route(RouteStatus::Planned, &[false]))).unwrap();
        assert_eq!(*api.calls.borrow(), vec![ApiCall::Start("r1".to_string())]);
    }

    #[test]
    fn finish_rechazado_con_paradas_pendientes() {
        let api = MockApi::default();
        let vm = RouteViewModel::with_api(api.clone());

        let result = block_on(vm.finish_route(&route(RouteStatus::InProgress, &[true, false])));
        assert!(result.is_err());
        assert!(api.calls.borrow().is_empty());
    }

    #[test]
    fn finish_con_todo_completado() {
        let api = MockApi::default();
        let vm = RouteViewModel::with_api(api.clone());

        block_on(vm.finish_route(&route(RouteStatus::InProgress, &[true, true]))).unwrap();
        assert_eq!(*api.calls.borrow(), vec![ApiCall::Finish("r1".to_string())]);
    }

    #[test]
    fn load_current_sin_ruta_no_es_error() {
        let api = MockApi::default();
        let vm = RouteViewModel::with_api(api.clone());

        let loaded = block_on(vm.load_current()).unwrap();
        assert!(loaded.is_none());
        assert_eq!(*api.calls.borrow(), vec![ApiCall::FetchCurrent]);
    }
}
