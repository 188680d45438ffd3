//! Main application component.

use std::rc::Rc;

use gloo::console;
use url_peek::{
    LocaleCatalog, LocaleResolver, PasteController, PasteOutcome, PreviewConfig, ResolvedLocale,
    run_paste,
};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::browser::{
    GlooDelay, LocalStorageStore, WebClipboard, is_root_path, preferred_languages,
};
use crate::components::{Footer, Header, PasteButton, UrlPreview};

/// Locale shared with every component below `App`.
#[derive(Clone, PartialEq)]
pub struct LocaleContext {
    pub locale: ResolvedLocale,
    pub available: Rc<Vec<String>>,
    pub set_locale: Callback<String>,
}

// No tracing subscriber runs in the browser, so library warnings are
// repeated here.
fn warn_if_fallback(resolved: &ResolvedLocale) {
    if resolved.is_fallback() {
        console::warn!(
            "no bundle for locale",
            resolved.requested.clone(),
            "using",
            resolved.id.clone()
        );
    }
}

/// Main application component.
#[function_component(App)]
pub fn app() -> Html {
    let resolver = use_mut_ref(|| {
        LocaleResolver::new(
            LocaleCatalog::builtin(),
            LocalStorageStore,
            &PreviewConfig::default(),
        )
    });
    let locale = {
        let resolver = resolver.clone();
        use_state(move || {
            let resolved = resolver.borrow_mut().startup(&preferred_languages());
            warn_if_fallback(&resolved);
            resolved
        })
    };
    let available = {
        let resolver = resolver.clone();
        use_memo((), move |_| {
            resolver
                .borrow()
                .catalog()
                .available()
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
    };

    // The controller lives outside Yew state so the paste task can mutate it
    // across awaits; `view` mirrors it for rendering.
    let controller = use_mut_ref(PasteController::default);
    let view = {
        let controller = controller.clone();
        use_state(move || controller.borrow().view())
    };

    let set_locale = {
        let resolver = resolver.clone();
        let locale = locale.clone();
        Callback::from(move |id: String| {
            let resolved = resolver.borrow_mut().select(&id);
            warn_if_fallback(&resolved);
            locale.set(resolved);
        })
    };

    let on_paste = {
        let controller = controller.clone();
        let view = view.clone();
        Callback::from(move |_: ()| {
            let controller = controller.clone();
            let view = view.clone();
            spawn_local(async move {
                let outcome =
                    run_paste(&controller, &WebClipboard, &GlooDelay, |c| view.set(c.view()))
                        .await;
                if let Some(PasteOutcome::Fallback(err)) = outcome {
                    console::warn!("paste fell back to default URL:", err.to_string());
                }
            });
        })
    };

    let context = LocaleContext {
        locale: (*locale).clone(),
        available,
        set_locale,
    };

    html! {
        <ContextProvider<LocaleContext> {context}>
            <div class="app">
                <Header />
                <main class="main">
                    <div class="grid">
                        <div class="main-container">
                            if is_root_path() {
                                <p class="placeholder">
                                    { locale.message("homepage.urlPreview.placeholder") }
                                </p>
                            }
                            <PasteButton affordance={view.affordance} {on_paste} />
                            <UrlPreview url={view.url.clone()} />
                        </div>
                    </div>
                </main>
                <Footer />
            </div>
        </ContextProvider<LocaleContext>>
    }
}
