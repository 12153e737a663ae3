use gloo_storage::{LocalStorage, Storage};
use serde::{Deserialize, Serialize};
use yew::prelude::*;

use super::{LocalCourierView, RouteHistoryView, WarehouseCourierView};

const PREFS_STORAGE_KEY: &str = "fasterpost_ui_prefs";

/// Preferencias de UI del courier. Se pasan explícitamente por props a
/// cada vista en vez de vivir en estado global, y se persisten en
/// localStorage entre sesiones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UiPrefs {
    pub dark_mode: bool,
    pub muted: bool,
}

impl UiPrefs {
    fn load() -> Self {
        LocalStorage::get(PREFS_STORAGE_KEY).unwrap_or_default()
    }

    fn save(&self) {
        if let Err(e) = LocalStorage::set(PREFS_STORAGE_KEY, self) {
            log::warn!("⚠️ No se pudieron guardar las preferencias: {}", e);
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum CourierTab {
    Route,
    LineHaul,
    History,
}

/// Shell del workspace del courier: tabs + preferencias
#[function_component(App)]
pub fn app() -> Html {
    let prefs = use_state(UiPrefs::load);
    let active_tab = use_state(|| CourierTab::Route);

    let toggle_dark = {
        let prefs = prefs.clone();
        Callback::from(move |_| {
            let next = UiPrefs {
                dark_mode: !prefs.dark_mode,
                ..*prefs
            };
            next.save();
            prefs.set(next);
        })
    };

    let toggle_mute = {
        let prefs = prefs.clone();
        Callback::from(move |_| {
            let next = UiPrefs {
                muted: !prefs.muted,
                ..*prefs
            };
            next.save();
            prefs.set(next);
        })
    };

    let select_tab = |tab: CourierTab| {
        let active_tab = active_tab.clone();
        Callback::from(move |_| active_tab.set(tab))
    };

    let tab_class = |tab: CourierTab| {
        classes!("tab-button", (*active_tab == tab).then_some("tab-active"))
    };

    html! {
        <div class={classes!("app", prefs.dark_mode.then_some("dark"))}>
            <header class="app-header">
                <h1 class="app-title">{"FasterPost Courier"}</h1>
                <nav class="app-tabs">
                    <button class={tab_class(CourierTab::Route)} onclick={select_tab(CourierTab::Route)}>
                        {"My Route"}
                    </button>
                    <button class={tab_class(CourierTab::LineHaul)} onclick={select_tab(CourierTab::LineHaul)}>
                        {"Line Haul"}
                    </button>
                    <button class={tab_class(CourierTab::History)} onclick={select_tab(CourierTab::History)}>
                        {"History"}
                    </button>
                </nav>
                <div class="app-toggles">
                    <button class="toggle-button" onclick={toggle_dark}>
                        { if prefs.dark_mode { "☀" } else { "🌙" } }
                    </button>
                    <button class="toggle-button" onclick={toggle_mute}>
                        { if prefs.muted { "🔇" } else { "🔊" } }
                    </button>
                </div>
            </header>

            <main class="app-body">
                {
                    match *active_tab {
                        CourierTab::Route => html! { <LocalCourierView prefs={*prefs} /> },
                        CourierTab::LineHaul => html! { <WarehouseCourierView prefs={*prefs} /> },
                        CourierTab::History => html! { <RouteHistoryView prefs={*prefs} /> },
                    }
                }
            </main>
        </div>
    }
}
