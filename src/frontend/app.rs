//! Application root.

use crate::backend::utils::css::ResourceLoader;
use crate::frontend::components::MiningCard;
use dioxus::prelude::*;

#[component]
pub fn App() -> Element {
    rsx! {
        style {
            dangerous_inner_html: ResourceLoader::get_css("base")
        }

        div {
            class: "app-root",
            MiningCard {}
        }
    }
}
