// Diálogos nativos del navegador. Las confirmaciones son contrato de las
// vistas: el core expone el prompt y aquí se pregunta; los viewmodels
// nunca abren diálogos.

use web_sys::window;

pub fn alert(message: &str) {
    if let Some(win) = window() {
        let _ = win.alert_with_message(message);
    }
}

pub fn confirm(message: &str) -> bool {
    window()
        .and_then(|win| win.confirm_with_message(message).ok())
        .unwrap_or(false)
}
