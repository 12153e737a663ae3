use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::location::{Postmat, Warehouse};
use crate::models::package::{is_package_completed, CargoItem, ScanAction};

/// Ciclo de vida de la ruta. `cancelled` solo lo pone el backend,
/// este cliente nunca transiciona hacia ahí.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteStatus {
    Planned,
    InProgress,
    Completed,
    Cancelled,
}

impl RouteStatus {
    /// El literal del wire, tal cual lo muestra la UI
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteStatus::Planned => "planned",
            RouteStatus::InProgress => "in_progress",
            RouteStatus::Completed => "completed",
            RouteStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteType {
    LineHaul,
    LastMile,
}

impl Default for RouteType {
    fn default() -> Self {
        // El serializer del courier no siempre incluye route_type
        RouteType::LastMile
    }
}

/// Una visita física dentro de la ruta: postmat o almacén, nunca ambos
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStop {
    pub id: String,
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub postmat: Option<Postmat>,
    #[serde(default)]
    pub warehouse: Option<Warehouse>,
    #[serde(default)]
    pub distance_from_previous: Option<f64>,
    #[serde(default)]
    pub estimated_arrival: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub dropoffs: Vec<CargoItem>,
    #[serde(default)]
    pub pickups: Vec<CargoItem>,
}

impl RouteStop {
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    pub fn location_name(&self) -> String {
        if let Some(ref postmat) = self.postmat {
            postmat.name.clone()
        } else if let Some(ref warehouse) = self.warehouse {
            warehouse.city.clone()
        } else {
            "Unknown Stop".to_string()
        }
    }

    pub fn address(&self) -> Option<String> {
        self.postmat
            .as_ref()
            .and_then(|p| p.address.clone())
            .or_else(|| self.warehouse.as_ref().and_then(|w| w.address.clone()))
    }

    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let (lat, lon) = if let Some(ref postmat) = self.postmat {
            (postmat.latitude, postmat.longitude)
        } else if let Some(ref warehouse) = self.warehouse {
            (warehouse.latitude, warehouse.longitude)
        } else {
            (None, None)
        };
        Some((lat?, lon?))
    }

    pub fn cargo(&self, action: ScanAction) -> &[CargoItem] {
        match action {
            ScanAction::Drop => &self.dropoffs,
            ScanAction::Pick => &self.pickups,
        }
    }

    /// Entradas de la lista que aún no cumplen el predicado de completado
    pub fn remaining(&self, action: ScanAction) -> usize {
        self.cargo(action)
            .iter()
            .filter(|item| !is_package_completed(item.status(), action))
            .count()
    }

    pub fn drops_left(&self) -> usize {
        self.remaining(ScanAction::Drop)
    }

    pub fn picks_left(&self) -> usize {
        self.remaining(ScanAction::Pick)
    }

    /// Ids de paquete pendientes de escanear, en orden de manifiesto
    pub fn pending_package_ids(&self, action: ScanAction) -> Vec<String> {
        self.cargo(action)
            .iter()
            .filter(|item| !is_package_completed(item.status(), action))
            .filter_map(|item| item.package_id().map(|id| id.to_string()))
            .collect()
    }

    /// Gate de UX para "Finish stop": todo drop y todo pick resueltos
    pub fn is_ready_to_finish(&self) -> bool {
        self.drops_left() == 0 && self.picks_left() == 0
    }

    /// Progreso de manejo de carga de ESTA parada, 0..=100
    pub fn cargo_progress(&self) -> f64 {
        let total = self.dropoffs.len() + self.pickups.len();
        if total == 0 {
            return 0.0;
        }
        let done = (self.dropoffs.len() - self.drops_left()) + (self.pickups.len() - self.picks_left());
        (done as f64 / total as f64) * 100.0
    }

    pub fn has_cargo(&self) -> bool {
        !self.dropoffs.is_empty() || !self.pickups.is_empty()
    }
}

/// Asignación completa de un courier para un turno: paradas ordenadas
/// más la derivación de progreso que consume la UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: String,
    pub status: RouteStatus,
    #[serde(default)]
    pub route_type: RouteType,
    pub scheduled_date: NaiveDate,
    #[serde(default)]
    pub total_distance: f64,
    /// Duración estimada en minutos
    #[serde(default)]
    pub estimated_duration: i64,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub stops: Vec<RouteStop>,
}

impl Route {
    /// Primera parada sin timestamp de completado; las paradas se visitan
    /// en orden de lista
    pub fn next_stop(&self) -> Option<&RouteStop> {
        self.stops.iter().find(|stop| !stop.is_completed())
    }

    pub fn stop_by_id(&self, stop_id: &str) -> Option<&RouteStop> {
        self.stops.iter().find(|stop| stop.id == stop_id)
    }

    pub fn completed_stops(&self) -> usize {
        self.stops.iter().filter(|stop| stop.is_completed()).count()
    }

    pub fn all_stops_completed(&self) -> bool {
        self.stops.iter().all(|stop| stop.is_completed())
    }

    /// Progreso global 0..=100 (0 con cero paradas)
    pub fn progress(&self) -> f64 {
        if self.stops.is_empty() {
            return 0.0;
        }
        (self.completed_stops() as f64 / self.stops.len() as f64) * 100.0
    }

    /// Parche optimista tras un escaneo confirmado por el backend.
    ///
    /// Localiza la parada por id y, dentro de sus dropoffs y pickups,
    /// reemplaza solo el campo `status` de las entradas cuyo id de paquete
    /// coincide, preservando la forma plana/anidada con la que llegaron.
    /// Ninguna otra parada ni campo se toca. Devuelve cuántas entradas
    /// cambiaron (0 si la parada o el paquete no existen).
    pub fn apply_scan_result(&mut self, stop_id: &str, package_id: &str, new_status: &str) -> usize {
        let Some(stop) = self.stops.iter_mut().find(|s| s.id == stop_id) else {
            return 0;
        };

        let mut patched = 0;
        for item in stop
            .dropoffs
            .iter_mut()
            .chain(stop.pickups.iter_mut())
            .filter(|item| item.matches(package_id))
        {
            item.set_status(new_status);
            patched += 1;
        }
        patched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::package::PackageRef;

    fn flat(id: &str, status: &str) -> CargoItem {
        CargoItem {
            id: Some(id.to_string()),
            pickup_code: None,
            status: Some(status.to_string()),
            size: None,
            weight: None,
            package: None,
        }
    }

    fn nested(id: &str, status: &str) -> CargoItem {
        CargoItem {
            id: Some(id.to_string()),
            pickup_code: None,
            status: None,
            size: None,
            weight: None,
            package: Some(PackageRef {
                id: Some(id.to_string()),
                pickup_code: None,
                status: Some(status.to_string()),
                size: None,
            }),
        }
    }

    fn stop(id: &str, completed: bool, dropoffs: Vec<CargoItem>, pickups: Vec<CargoItem>) -> RouteStop {
        RouteStop {
            id: id.to_string(),
            order: 0,
            postmat: None,
            warehouse: None,
            distance_from_previous: None,
            estimated_arrival: None,
            completed_at: completed.then(Utc::now),
            dropoffs,
            pickups,
        }
    }

    fn route(stops: Vec<RouteStop>) -> Route {
        Route {
            id: "r1".to_string(),
            status: RouteStatus::InProgress,
            route_type: RouteType::LastMile,
            scheduled_date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            total_distance: 42.5,
            estimated_duration: 180,
            started_at: None,
            completed_at: None,
            stops,
        }
    }

    #[test]
    fn next_stop_es_la_primera_pendiente() {
        let r = route(vec![
            stop("s1", true, vec![], vec![]),
            stop("s2", false, vec![], vec![]),
            stop("s3", false, vec![], vec![]),
        ]);
        assert_eq!(r.next_stop().map(|s| s.id.as_str()), Some("s2"));
        assert_eq!(r.completed_stops(), 1);
        assert!(!r.all_stops_completed());
    }

    #[test]
    fn next_stop_none_cuando_todo_completado() {
        let r = route(vec![stop("s1", true, vec![], vec![])]);
        assert!(r.next_stop().is_none());
        assert!(r.all_stops_completed());
        assert_eq!(r.progress(), 100.0);
    }

    #[test]
    fn progreso_cero_sin_paradas() {
        let r = route(vec![]);
        assert_eq!(r.progress(), 0.0);
        // Sin paradas no queda nada pendiente
        assert!(r.all_stops_completed());
    }

    #[test]
    fn readiness_depende_del_predicado() {
        let mut s = stop("s1", false, vec![flat("p1", "created")], vec![]);
        assert_eq!(s.drops_left(), 1);
        assert!(!s.is_ready_to_finish());

        s.dropoffs[0].set_status("placed_in_stash");
        assert_eq!(s.drops_left(), 0);
        assert!(s.is_ready_to_finish());
    }

    #[test]
    fn pendientes_solo_de_la_lista_activa() {
        let s = stop(
            "s1",
            false,
            vec![flat("d1", "created"), flat("d2", "placed_in_stash")],
            vec![flat("p1", "in_warehouse")],
        );
        assert_eq!(s.pending_package_ids(ScanAction::Drop), vec!["d1"]);
        assert_eq!(s.pending_package_ids(ScanAction::Pick), vec!["p1"]);
        assert_eq!(s.drops_left(), 1);
        assert_eq!(s.picks_left(), 1);
    }

    #[test]
    fn progreso_de_carga_por_parada() {
        let s = stop(
            "s1",
            false,
            vec![flat("d1", "placed_in_stash"), flat("d2", "created")],
            vec![],
        );
        assert_eq!(s.cargo_progress(), 50.0);

        let vacia = stop("s2", false, vec![], vec![]);
        assert_eq!(vacia.cargo_progress(), 0.0);
    }

    #[test]
    fn parche_optimista_aisla_la_parada_y_el_paquete() {
        let mut r = route(vec![
            stop("a", true, vec![flat("p7", "created")], vec![]),
            stop("b", false, vec![flat("p7", "created"), nested("p8", "created")], vec![flat("p9", "created")]),
            stop("c", false, vec![flat("p7", "created")], vec![]),
        ]);
        let before_a = r.stops[0].clone();
        let before_c = r.stops[2].clone();

        let patched = r.apply_scan_result("b", "p7", "delivered");
        assert_eq!(patched, 1);

        // Solo p7 dentro de b cambió
        assert_eq!(r.stops[1].dropoffs[0].status(), Some("delivered"));
        assert_eq!(r.stops[1].dropoffs[1].status(), Some("created"));
        assert_eq!(r.stops[1].pickups[0].status(), Some("created"));

        // Las otras paradas quedan estructuralmente intactas, aunque
        // contengan el mismo id de paquete
        assert_eq!(r.stops[0], before_a);
        assert_eq!(r.stops[2], before_c);
    }

    #[test]
    fn parche_optimista_respeta_forma_anidada() {
        let mut r = route(vec![stop("b", false, vec![nested("p8", "created")], vec![])]);
        assert_eq!(r.apply_scan_result("b", "p8", "in_transit"), 1);

        let item = &r.stops[0].dropoffs[0];
        assert!(item.status.is_none());
        assert_eq!(item.status(), Some("in_transit"));
    }

    #[test]
    fn parche_optimista_ignora_ids_desconocidos() {
        let mut r = route(vec![stop("a", false, vec![flat("p1", "created")], vec![])]);
        let before = r.clone();
        assert_eq!(r.apply_scan_result("zz", "p1", "delivered"), 0);
        assert_eq!(r.apply_scan_result("a", "zz", "delivered"), 0);
        assert_eq!(r, before);
    }

    #[test]
    fn deserializa_payload_del_backend() {
        let json = r#"{
            "id": "7b1c",
            "status": "in_progress",
            "scheduled_date": "2025-06-02",
            "total_distance": 12.75,
            "estimated_duration": 95,
            "started_at": "2025-06-02T08:05:00Z",
            "completed_at": null,
            "stops": [
                {
                    "id": "st1",
                    "order": 0,
                    "warehouse": {"id": "w1", "city": "Gdansk"},
                    "completed_at": "2025-06-02T08:30:00Z",
                    "dropoffs": [],
                    "pickups": [{"id": "pk1", "status": "in_transit", "size": "small", "pickup_code": "QX41"}]
                },
                {
                    "id": "st2",
                    "order": 1,
                    "postmat": {"id": "pm1", "name": "PM-004", "address": "Dluga 7"},
                    "completed_at": null,
                    "dropoffs": [{"id": "pk1", "package": {"id": "pk1", "status": "in_transit"}}],
                    "pickups": []
                }
            ]
        }"#;

        let r: Route = serde_json::from_str(json).unwrap();
        assert_eq!(r.status, RouteStatus::InProgress);
        // route_type ausente cae al default
        assert_eq!(r.route_type, RouteType::LastMile);
        assert_eq!(r.next_stop().map(|s| s.id.as_str()), Some("st2"));
        assert_eq!(r.stops[0].location_name(), "Gdansk");
        assert_eq!(r.stops[1].location_name(), "PM-004");
        assert_eq!(r.progress(), 50.0);
    }
}
