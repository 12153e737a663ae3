use serde::{Deserialize, Serialize};

/// Acción de escaneo sobre un paquete en una parada
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanAction {
    Drop,
    Pick,
}

impl ScanAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanAction::Drop => "drop",
            ScanAction::Pick => "pick",
        }
    }
}

/// Sub-objeto `package` cuando el backend devuelve la entrada anidada
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageRef {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub pickup_code: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
}

/// Entrada de carga en el manifiesto de una parada (dropoff o pickup).
///
/// El backend devuelve dos formas para la misma semántica: plana
/// (`{id, status, ...}`) o anidada (`{id, package: {status, ...}}`).
/// Este struct acepta ambas; el resto del código trabaja sobre
/// [`PackageInfo`] vía [`CargoItem::info`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CargoItem {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub pickup_code: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub package: Option<PackageRef>,
}

/// Forma interna única de una entrada de carga, normalizada al ingerir
#[derive(Debug, Clone, PartialEq)]
pub struct PackageInfo {
    pub id: String,
    pub display_code: String,
    pub status: Option<String>,
    pub size: String,
}

impl CargoItem {
    /// Id del paquete referenciado (forma plana, o anidada como fallback)
    pub fn package_id(&self) -> Option<&str> {
        self.id
            .as_deref()
            .or_else(|| self.package.as_ref().and_then(|p| p.id.as_deref()))
    }

    /// Status vigente del paquete, venga donde venga en el JSON
    pub fn status(&self) -> Option<&str> {
        self.status
            .as_deref()
            .or_else(|| self.package.as_ref().and_then(|p| p.status.as_deref()))
    }

    pub fn matches(&self, package_id: &str) -> bool {
        self.package_id() == Some(package_id)
    }

    /// Normaliza al shape interno único
    pub fn info(&self) -> PackageInfo {
        let id = self.package_id().unwrap_or_default().to_string();

        let code = self
            .pickup_code
            .as_deref()
            .or_else(|| self.package.as_ref().and_then(|p| p.pickup_code.as_deref()));
        let display_code = match code {
            Some(c) if !c.is_empty() => c.to_string(),
            _ => {
                let prefix: String = id.chars().take(4).collect::<String>().to_uppercase();
                format!("PKG-{}", prefix)
            }
        };

        let size = self
            .size
            .as_deref()
            .or_else(|| self.package.as_ref().and_then(|p| p.size.as_deref()))
            .unwrap_or("m")
            .to_string();

        PackageInfo {
            id,
            display_code,
            status: self.status().map(|s| s.to_string()),
            size,
        }
    }

    /// Escribe el nuevo status preservando la forma original del JSON
    /// (anidada si llegó anidada, plana si llegó plana)
    pub fn set_status(&mut self, new_status: &str) {
        if let Some(ref mut package) = self.package {
            package.status = Some(new_status.to_string());
        } else {
            self.status = Some(new_status.to_string());
        }
    }
}

/// ¿La entrada ya está resuelta para esta acción?
///
/// Única fuente de verdad de "hecho" por línea de carga; se recalcula del
/// status en cada render, nunca se guarda como booleano.
pub fn is_package_completed(status: Option<&str>, action: ScanAction) -> bool {
    let Some(status) = status else {
        return false;
    };
    match action {
        ScanAction::Drop => matches!(status, "placed_in_stash" | "in_warehouse" | "delivered"),
        ScanAction::Pick => matches!(status, "in_transit" | "picked_up" | "delivered"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_item(id: &str, status: &str) -> CargoItem {
        CargoItem {
            id: Some(id.to_string()),
            pickup_code: None,
            status: Some(status.to_string()),
            size: Some("small".to_string()),
            weight: None,
            package: None,
        }
    }

    fn nested_item(id: &str, status: &str) -> CargoItem {
        CargoItem {
            id: Some(id.to_string()),
            pickup_code: None,
            status: None,
            size: None,
            weight: None,
            package: Some(PackageRef {
                id: Some(id.to_string()),
                pickup_code: Some("A1B2C3".to_string()),
                status: Some(status.to_string()),
                size: Some("large".to_string()),
            }),
        }
    }

    #[test]
    fn predicado_de_completado_por_accion() {
        assert!(is_package_completed(Some("placed_in_stash"), ScanAction::Drop));
        assert!(is_package_completed(Some("in_warehouse"), ScanAction::Drop));
        assert!(!is_package_completed(Some("in_transit"), ScanAction::Drop));
        assert!(!is_package_completed(Some("created"), ScanAction::Drop));

        assert!(is_package_completed(Some("in_transit"), ScanAction::Pick));
        assert!(is_package_completed(Some("picked_up"), ScanAction::Pick));
        assert!(!is_package_completed(Some("created"), ScanAction::Pick));
        assert!(!is_package_completed(Some("placed_in_stash"), ScanAction::Pick));

        // delivered es terminal para ambos tipos
        assert!(is_package_completed(Some("delivered"), ScanAction::Drop));
        assert!(is_package_completed(Some("delivered"), ScanAction::Pick));

        assert!(!is_package_completed(None, ScanAction::Drop));
        assert!(!is_package_completed(None, ScanAction::Pick));
    }

    #[test]
    fn normaliza_forma_plana() {
        let info = flat_item("abc123", "created").info();
        assert_eq!(info.id, "abc123");
        assert_eq!(info.status.as_deref(), Some("created"));
        assert_eq!(info.size, "small");
        // Sin pickup_code cae al código derivado del id
        assert_eq!(info.display_code, "PKG-ABC1");
    }

    #[test]
    fn normaliza_forma_anidada() {
        let info = nested_item("def456", "in_transit").info();
        assert_eq!(info.id, "def456");
        assert_eq!(info.status.as_deref(), Some("in_transit"));
        assert_eq!(info.size, "large");
        assert_eq!(info.display_code, "A1B2C3");
    }

    #[test]
    fn set_status_preserva_la_forma() {
        let mut flat = flat_item("p1", "created");
        flat.set_status("placed_in_stash");
        assert_eq!(flat.status.as_deref(), Some("placed_in_stash"));
        assert!(flat.package.is_none());

        let mut nested = nested_item("p2", "created");
        nested.set_status("in_transit");
        // El status vive en el sub-objeto, el campo plano sigue vacío
        assert!(nested.status.is_none());
        assert_eq!(
            nested.package.as_ref().unwrap().status.as_deref(),
            Some("in_transit")
        );
        assert_eq!(nested.status(), Some("in_transit"));
    }

    #[test]
    fn deserializa_ambas_formas() {
        let flat: CargoItem =
            serde_json::from_str(r#"{"id":"x1","status":"created","size":"small"}"#).unwrap();
        assert_eq!(flat.status(), Some("created"));

        let nested: CargoItem = serde_json::from_str(
            r#"{"id":"x2","package":{"id":"x2","status":"in_warehouse","pickup_code":"Z9"}}"#,
        )
        .unwrap();
        assert_eq!(nested.status(), Some("in_warehouse"));
        assert_eq!(nested.info().display_code, "Z9");
    }
}
