//! Outline button.

use crate::backend::utils::css::ResourceLoader;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ButtonProps {
    #[props(into)]
    pub label: String,
    pub onclick: EventHandler<MouseEvent>,
    #[props(default)]
    pub disabled: bool,
}

#[component]
pub fn Button(props: ButtonProps) -> Element {
    let ButtonProps {
        label,
        onclick,
        disabled,
    } = props;

    rsx! {
        style {
            dangerous_inner_html: ResourceLoader::get_css("button")
        }

        button {
            class: "button outline",
            disabled,
            onclick: move |evt| onclick.call(evt),
            "{label}"
        }
    }
}
