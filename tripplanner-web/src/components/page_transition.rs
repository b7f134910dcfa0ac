use yew::{Children, Html, Properties, function_component, html};

#[derive(Properties, PartialEq)]
pub struct PageTransitionProps {
    /// Path of the routed view; a new path remounts the wrapper.
    pub path: String,
    pub children: Children,
}

/// Keyed wrapper replaying the CSS enter animation on every path change.
///
/// The animation is purely presentational; the routed view renders
/// immediately.
#[function_component(PageTransition)]
pub fn page_transition(props: &PageTransitionProps) -> Html {
    html! {
        <div key={props.path.clone()} class="page-wrapper animate-fadeIn">
            {props.children.clone()}
        </div>
    }
}
