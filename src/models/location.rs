use serde::{Deserialize, Serialize};

/// Postmat (parcel locker) referenciado por una parada last-mile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Postmat {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub postal_code: Option<String>,
}

/// Almacén/hub referenciado por una parada line-haul (o la carga inicial)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: String,
    pub city: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}
