//! The "Mining insights" card.

use crate::backend::utils::config::AppConfig;
use crate::backend::utils::css::ResourceLoader;
use crate::frontend::components::common::{Button, ProgressGradient};
use crate::frontend::services::progress::use_progress_animator;
use dioxus::prelude::*;

pub const TITLE: &str = "Mining insights";

#[component]
pub fn MiningCard() -> Element {
    let config = try_use_context::<AppConfig>().unwrap_or_default();
    let (snapshot, actions) = use_progress_animator(config);
    let current = snapshot.read().clone();
    let can_skip = current.can_skip();
    let restart = actions.clone();

    rsx! {
        style {
            dangerous_inner_html: ResourceLoader::get_css("card")
        }

        div {
            class: "mining-card",

            div {
                class: "mining-card-header",
                h3 { class: "mining-card-title", "{TITLE}" }
                div { class: "mining-card-subtitle", "{current.label}" }
            }

            div {
                class: "mining-card-content",

                if current.complete {
                    div { class: "mining-card-celebration", "🎉" }
                } else {
                    ProgressGradient { value: current.percentage }
                }

                div {
                    class: "mining-card-actions",
                    Button {
                        label: "Restart",
                        onclick: move |_| restart.restart(),
                    }
                    Button {
                        label: "Go to next stage",
                        disabled: !can_skip,
                        onclick: move |_| actions.skip(),
                    }
                }
            }
        }
    }
}
