//! UI components for the URL preview page.

use url_peek::{Affordance, Component, StructuredUrl};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::app::LocaleContext;

#[hook]
fn use_locale() -> LocaleContext {
    use_context::<LocaleContext>().expect("LocaleContext is provided by App")
}

/// Title bar with the locale selector.
#[function_component(Header)]
pub fn header() -> Html {
    let ctx = use_locale();

    let on_change = {
        let set_locale = ctx.set_locale.clone();
        Callback::from(move |e: Event| {
            let target: HtmlSelectElement = e.target_unchecked_into();
            set_locale.emit(target.value());
        })
    };

    html! {
        <header class="header">
            <div class="header-left">
                <h1>{ ctx.locale.message("app.title") }</h1>
                <p class="subtitle">{ ctx.locale.message("app.subtitle") }</p>
            </div>
            <div class="header-right">
                <label class="locale-label">
                    { ctx.locale.message("header.locale") }
                    { " " }
                    <select class="locale-select" onchange={on_change}>
                        { for ctx.available.iter().map(|id| {
                            html! {
                                <option value={id.clone()} selected={*id == ctx.locale.id}>
                                    { id.clone() }
                                </option>
                            }
                        })}
                    </select>
                </label>
            </div>
        </header>
    }
}

/// Paste trigger.
#[derive(Properties, PartialEq)]
pub struct PasteButtonProps {
    pub affordance: Affordance,
    pub on_paste: Callback<()>,
}

#[function_component(PasteButton)]
pub fn paste_button(props: &PasteButtonProps) -> Html {
    let ctx = use_locale();
    let label = ctx.locale.message("pasteButton.alt").to_string();

    let on_click = {
        let on_paste = props.on_paste.clone();
        Callback::from(move |_: MouseEvent| {
            on_paste.emit(());
        })
    };

    html! {
        <button
            class="paste-button"
            style={props.affordance.style()}
            aria-busy={props.affordance.is_busy().to_string()}
            title={label.clone()}
            aria-label={label}
            onclick={on_click}
        >
            { "\u{1F4CB}" }
        </button>
    }
}

/// Component table for a URL.
#[derive(Properties, PartialEq)]
pub struct UrlPreviewProps {
    pub url: StructuredUrl,
}

#[function_component(UrlPreview)]
pub fn url_preview(props: &UrlPreviewProps) -> Html {
    let ctx = use_locale();
    let url = &props.url;
    let params = url.query_params();

    let value_cell = |value: String| {
        if value.is_empty() {
            html! { <td class="empty">{ ctx.locale.message("urlPreview.empty") }</td> }
        } else {
            html! { <td>{ value }</td> }
        }
    };

    html! {
        <div class="url-preview-container">
            <table class="url-preview">
                <tbody>
                    <tr>
                        <th>{ ctx.locale.message("urlPreview.href") }</th>
                        { value_cell(url.href().to_string()) }
                    </tr>
                    { for Component::ALL.iter().map(|&c| html! {
                        <tr>
                            <th>{ ctx.locale.message(c.message_key()) }</th>
                            { value_cell(url.component(c)) }
                        </tr>
                    })}
                </tbody>
            </table>
            if !params.is_empty() {
                <>
                    <h3 class="params-title">{ ctx.locale.message("urlPreview.params") }</h3>
                    <table class="url-preview params">
                        <tbody>
                            { for params.iter().map(|(name, value)| html! {
                                <tr>
                                    <th>{ name.clone() }</th>
                                    { value_cell(value.clone()) }
                                </tr>
                            })}
                        </tbody>
                    </table>
                </>
            }
        </div>
    }
}

/// Page footer with build info.
#[function_component(Footer)]
pub fn footer() -> Html {
    let ctx = use_locale();

    html! {
        <footer class="footer">
            <span class="footer-left">
                { ctx.locale.message("app.title") }
                { " | MIT License" }
            </span>
            <span class="footer-build">
                { format!("Build: {} {}", env!("BUILD_COMMIT"), env!("BUILD_TIMESTAMP")) }
            </span>
        </footer>
    }
}
