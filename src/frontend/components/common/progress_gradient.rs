//! Rounded gradient progress bar.

use crate::backend::utils::css::ResourceLoader;
use dioxus::prelude::*;

/// How far, in percent of its width, the gradient is shifted left.
/// Non-finite values render as an empty bar.
pub fn bar_offset(value: f64) -> f64 {
    let value = if value.is_finite() { value } else { 0.0 };
    100.0 - value.clamp(0.0, 100.0)
}

#[derive(Props, Clone, PartialEq)]
pub struct ProgressGradientProps {
    pub value: f64,
}

#[component]
pub fn ProgressGradient(props: ProgressGradientProps) -> Element {
    let offset = bar_offset(props.value);

    rsx! {
        style {
            dangerous_inner_html: ResourceLoader::get_css("progress")
        }

        div {
            class: "progress-gradient-track",

            div {
                class: "progress-gradient-fill",
                style: "--progress-offset: {offset}",

                div {
                    class: "progress-gradient-colors"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_hides_the_unfilled_part() {
        assert_eq!(bar_offset(0.0), 100.0);
        assert_eq!(bar_offset(33.0), 67.0);
        assert_eq!(bar_offset(100.0), 0.0);
    }

    #[test]
    fn offset_clamps_bad_values() {
        assert_eq!(bar_offset(-5.0), 100.0);
        assert_eq!(bar_offset(140.0), 0.0);
        assert_eq!(bar_offset(f64::NAN), 100.0);
    }
}
