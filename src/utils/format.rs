use chrono::{DateTime, Local, Utc};

/// Código corto de ruta para cabeceras: primeros 6 caracteres del id
pub fn short_route_code(id: &str) -> String {
    id.chars().take(6).collect::<String>().to_uppercase()
}

/// Duración estimada en minutos como "3h 15m"
pub fn format_duration(minutes: i64) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

pub fn format_distance(km: f64) -> String {
    format!("{:.1} km", km)
}

/// Hora local de completado de una parada, para el histórico
pub fn format_completed_time(timestamp: &DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codigo_corto_de_ruta() {
        assert_eq!(short_route_code("7b1c2d9e-aa"), "7B1C2D");
        assert_eq!(short_route_code("ab"), "AB");
    }

    #[test]
    fn duracion_en_horas_y_minutos() {
        assert_eq!(format_duration(95), "1h 35m");
        assert_eq!(format_duration(60), "1h 0m");
        assert_eq!(format_duration(0), "0h 0m");
    }

    #[test]
    fn distancia_con_un_decimal() {
        assert_eq!(format_distance(12.75), "12.8 km");
        assert_eq!(format_distance(42.0), "42.0 km");
    }
}
