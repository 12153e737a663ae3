// ============================================================================
// LOCKER VIEWMODEL - WORKFLOW DE ESCANEO POR PARADA
// ============================================================================
// Maneja la interacción con el locker: escanear una entrada, escanear todo
// lo pendiente de una pestaña y el gate de cierre de parada. Devuelve
// valores; la vista actualiza estado y muestra errores.
// ============================================================================

use crate::models::{is_package_completed, PackageInfo, RouteStop, ScanAction};
use crate::services::{ApiClient, ApiError, RouteApi};

/// Resultado del escaneo masivo de una pestaña
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanAllReport {
    pub scanned: usize,
    pub failed: usize,
}

/// ViewModel de interacción con locker - SOLO lógica de negocio
pub struct LockerViewModel<A: RouteApi = ApiClient> {
    api: A,
}

impl LockerViewModel<ApiClient> {
    pub fn new() -> Self {
        Self { api: ApiClient::new() }
    }
}

impl Default for LockerViewModel<ApiClient> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: RouteApi> LockerViewModel<A> {
    pub fn with_api(api: A) -> Self {
        Self { api }
    }

    /// Escanea una entrada del manifiesto.
    ///
    /// Una entrada ya resuelta es un no-op: devuelve `Ok(None)` sin tocar
    /// la red, aunque la UI llegue aquí con estado optimista rancio.
    /// `Ok(Some(status))` trae el status nuevo confirmado por el backend.
    pub async fn scan_item(
        &self,
        route_id: &str,
        stop_id: &str,
        item: &PackageInfo,
        action: ScanAction,
    ) -> Result<Option<String>, ApiError> {
        if is_package_completed(item.status.as_deref(), action) {
            log::warn!("⚠️ {} ya está resuelto, no se reescanea", item.display_code);
            return Ok(None);
        }

        let new_state = self
            .api
            .scan_package(route_id, stop_id, &item.id, action)
            .await?;
        Ok(Some(new_state))
    }

    /// Escanea todo lo pendiente de la pestaña activa, en orden de
    /// manifiesto y estrictamente secuencial: el endpoint de scan muta
    /// agregados compartidos por parada y por ruta, así que cada llamada
    /// espera a la anterior. Una entrada que falla se salta y se sigue con
    /// la siguiente; `on_scanned` recibe cada status confirmado para que
    /// el caller parchee el modelo entrada a entrada.
    pub async fn scan_all<F>(
        &self,
        route_id: &str,
        stop: &RouteStop,
        action: ScanAction,
        mut on_scanned: F,
    ) -> ScanAllReport
    where
        F: FnMut(&str, &str),
    {
        let mut report = ScanAllReport::default();

        for item in stop.cargo(action) {
            let info = item.info();
            if is_package_completed(info.status.as_deref(), action) {
                continue;
            }

            match self
                .api
                .scan_package(route_id, &stop.id, &info.id, action)
                .await
            {
                Ok(new_state) => {
                    on_scanned(&info.id, &new_state);
                    report.scanned += 1;
                }
                Err(err) => {
                    log::error!("❌ Error escaneando {}: {}", info.display_code, err);
                    report.failed += 1;
                }
            }
        }

        log::info!(
            "📦 Escaneo masivo {}: {} ok, {} fallidos",
            action.as_str(),
            report.scanned,
            report.failed
        );
        report
    }
}
