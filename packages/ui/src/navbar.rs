use dioxus::prelude::*;

use crate::icons::FaDumbbell;
use crate::views::VIEWS_CSS;
use crate::Icon;

/// Top bar shared by every signed-in page. Links are passed as children by the app.
#[component]
pub fn Navbar(children: Element) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        nav {
            class: "navbar",
            span { class: "navbar-brand",
                Icon { icon: FaDumbbell, width: 18, height: 18 }
                span { "Underdogs Fitness" }
            }
            div { class: "navbar-links", {children} }
        }
    }
}
