// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// NO tiene lógica de negocio, solo hace requests HTTP contra el backend
// de FasterPost. Los controladores deciden qué llamar y cuándo.
// ============================================================================

use async_trait::async_trait;
use futures::future::{self, Either};
use futures::pin_mut;
use futures::Future;
use gloo_net::http::{Request, RequestBuilder, Response};
use gloo_storage::{LocalStorage, Storage};
use gloo_timers::future::TimeoutFuture;
use serde::{Deserialize, Serialize};

use crate::config::CONFIG;
use crate::models::{Route, ScanAction};

const TOKEN_STORAGE_KEY: &str = "token";

/// Fallo de una operación contra el backend.
///
/// `NotFound` solo se distingue para el caso "no hay ruta activa" del
/// fetch; cualquier otro no-2xx o error de red es `RequestFailed` con el
/// mensaje del servidor cuando existe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    NotFound,
    RequestFailed { status: u16, message: String },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NotFound => write!(f, "not found"),
            ApiError::RequestFailed { status, message } => {
                write!(f, "request failed ({}): {}", status, message)
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Adaptador del único 404 no-fatal: "sin ruta activa" pasa a `Ok(None)`
pub fn not_found_as_none<T>(result: Result<T, ApiError>) -> Result<Option<T>, ApiError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(ApiError::NotFound) => Ok(None),
        Err(err) => Err(err),
    }
}

/// Extrae el mensaje de error del body JSON del backend (claves `error`
/// o `detail`, el formato de DRF)
pub fn extract_server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    for key in ["error", "detail"] {
        if let Some(message) = value.get(key).and_then(|v| v.as_str()) {
            return Some(message.to_string());
        }
    }
    None
}

/// Las operaciones de ruta que consume el workspace del courier.
///
/// Seam para poder ejercitar los controladores con un doble en tests;
/// en producción la única implementación es [`ApiClient`].
#[async_trait(?Send)]
pub trait RouteApi {
    /// Ruta activa del courier; `Ok(None)` cuando el backend responde 404
    async fn fetch_current_route(&self) -> Result<Option<Route>, ApiError>;

    async fn start_route(&self, route_id: &str) -> Result<(), ApiError>;

    /// Devuelve el nuevo status del paquete confirmado por el backend
    async fn scan_package(
        &self,
        route_id: &str,
        stop_id: &str,
        package_id: &str,
        action: ScanAction,
    ) -> Result<String, ApiError>;

    async fn complete_stop(&self, route_id: &str, stop_id: &str) -> Result<(), ApiError>;

    async fn finish_route(&self, route_id: &str) -> Result<(), ApiError>;

    /// Histórico de rutas del courier (solo lectura)
    async fn route_history(&self) -> Result<Vec<Route>, ApiError>;
}

/// Cliente HTTP - SOLO comunicación (stateless)
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    timeout_ms: u32,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            base_url: CONFIG.backend_url().to_string(),
            timeout_ms: CONFIG.network_timeout_seconds * 1000,
        }
    }

    fn routes_url(&self, suffix: &str) -> String {
        format!("{}/api/courier/routes{}", self.base_url, suffix)
    }

    /// Token de sesión guardado al hacer login (lo escribe el shell de la app)
    fn auth_header() -> Option<String> {
        LocalStorage::get::<String>(TOKEN_STORAGE_KEY)
            .ok()
            .map(|token| format!("Token {}", token))
    }

    fn get(&self, url: &str) -> RequestBuilder {
        let builder = Request::get(url);
        match Self::auth_header() {
            Some(value) => builder.header("Authorization", &value),
            None => builder,
        }
    }

    fn post(&self, url: &str) -> RequestBuilder {
        let builder = Request::post(url);
        match Self::auth_header() {
            Some(value) => builder.header("Authorization", &value),
            None => builder,
        }
    }

    /// Corre la petición contra el timeout de configuración; una petición
    /// colgada nunca deja un busy flag encendido para siempre
    async fn with_timeout<T>(
        &self,
        fut: impl Future<Output = Result<T, gloo_net::Error>>,
    ) -> Result<T, ApiError> {
        let timeout = TimeoutFuture::new(self.timeout_ms);
        pin_mut!(fut);
        pin_mut!(timeout);

        match future::select(fut, timeout).await {
            Either::Left((result, _)) => result.map_err(|e| ApiError::RequestFailed {
                status: 0,
                message: format!("Network error: {}", e),
            }),
            Either::Right(_) => {
                log::error!("⏱️ Petición cortada por timeout ({} ms)", self.timeout_ms);
                Err(ApiError::RequestFailed {
                    status: 0,
                    message: format!("request timed out after {}s", self.timeout_ms / 1000),
                })
            }
        }
    }

    async fn error_from(response: Response) -> ApiError {
        let status = response.status();
        let message = match response.text().await {
            Ok(body) => extract_server_message(&body)
                .unwrap_or_else(|| format!("HTTP {}: {}", status, response.status_text())),
            Err(_) => format!("HTTP {}: {}", status, response.status_text()),
        };
        ApiError::RequestFailed { status, message }
    }

    async fn ensure_ok(response: Response) -> Result<Response, ApiError> {
        if response.ok() {
            Ok(response)
        } else {
            Err(Self::error_from(response).await)
        }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl RouteApi for ApiClient {
    async fn fetch_current_route(&self) -> Result<Option<Route>, ApiError> {
        let url = self.routes_url("/current/");

        let response = self.with_timeout(self.get(&url).send()).await?;

        if response.status() == 404 {
            // No hay ruta asignada hoy; no es un error
            log::info!("ℹ️ Sin ruta activa para el courier");
            return not_found_as_none(Err(ApiError::NotFound));
        }

        let response = Self::ensure_ok(response).await?;
        let route = response.json::<Route>().await.map_err(|e| ApiError::RequestFailed {
            status: 0,
            message: format!("Parse error: {}", e),
        })?;

        log::info!(
            "✅ Ruta obtenida: {} ({} paradas, {:?})",
            route.id,
            route.stops.len(),
            route.status
        );
        not_found_as_none(Ok(route))
    }

    async fn start_route(&self, route_id: &str) -> Result<(), ApiError> {
        let url = self.routes_url(&format!("/{}/start/", route_id));
        log::info!("🚚 Iniciando ruta {}", route_id);

        let response = self.with_timeout(self.post(&url).send()).await?;
        Self::ensure_ok(response).await?;
        Ok(())
    }

    async fn scan_package(
        &self,
        route_id: &str,
        stop_id: &str,
        package_id: &str,
        action: ScanAction,
    ) -> Result<String, ApiError> {
        let url = self.routes_url(&format!("/{}/scan-package/", route_id));
        let request = ScanRequest {
            package_id: package_id.to_string(),
            stop_id: stop_id.to_string(),
            action,
        };

        log::info!("📱 Escaneando paquete {} ({}) en parada {}", package_id, action.as_str(), stop_id);

        let builder = self.post(&url).json(&request).map_err(|e| ApiError::RequestFailed {
            status: 0,
            message: format!("Serialization error: {}", e),
        })?;
        let response = self.with_timeout(builder.send()).await?;
        let response = Self::ensure_ok(response).await?;

        let scan = response
            .json::<ScanResponse>()
            .await
            .map_err(|e| ApiError::RequestFailed {
                status: 0,
                message: format!("Parse error: {}", e),
            })?;

        log::info!("✅ Paquete {} → {}", package_id, scan.new_state);
        Ok(scan.new_state)
    }

    async fn complete_stop(&self, route_id: &str, stop_id: &str) -> Result<(), ApiError> {
        let url = self.routes_url(&format!("/{}/complete-stop/{}/", route_id, stop_id));
        log::info!("🏁 Cerrando parada {} de la ruta {}", stop_id, route_id);

        let response = self.with_timeout(self.post(&url).send()).await?;
        Self::ensure_ok(response).await?;
        Ok(())
    }

    async fn finish_route(&self, route_id: &str) -> Result<(), ApiError> {
        let url = self.routes_url(&format!("/{}/finish/", route_id));
        log::info!("🏁 Cerrando ruta {}", route_id);

        let response = self.with_timeout(self.post(&url).send()).await?;
        Self::ensure_ok(response).await?;
        Ok(())
    }

    async fn route_history(&self) -> Result<Vec<Route>, ApiError> {
        let url = self.routes_url("/");

        let response = self.with_timeout(self.get(&url).send()).await?;
        let response = Self::ensure_ok(response).await?;

        let list = response
            .json::<RouteListResponse>()
            .await
            .map_err(|e| ApiError::RequestFailed {
                status: 0,
                message: format!("Parse error: {}", e),
            })?;
        Ok(list.into_routes())
    }
}

#[derive(Serialize)]
struct ScanRequest {
    package_id: String,
    stop_id: String,
    action: ScanAction,
}

#[derive(Deserialize)]
struct ScanResponse {
    new_state: String,
}

/// El listado llega paginado (`{results: [...]}`) o plano según la vista
#[derive(Deserialize)]
#[serde(untagged)]
enum RouteListResponse {
    Paginated { results: Vec<Route> },
    Plain(Vec<Route>),
}

impl RouteListResponse {
    fn into_routes(self) -> Vec<Route> {
        match self {
            RouteListResponse::Paginated { results } => results,
            RouteListResponse::Plain(routes) => routes,
        }
    }
}
