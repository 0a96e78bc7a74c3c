//! Demo route tree.
//!
//! ```text
//! _layout          navigator chrome + slot
//! index
//! about
//! guides/_layout   single-active navigator with tabs
//! guides/index
//! guides/routing
//! guides/[topic]
//! [...missing]
//! ```

use std::sync::Arc;

use leptos::prelude::*;
use serde_json::json;
use slotnav_core::{Params, RouteNode, RouteTree, Screen, ScreenOptions, router};

use crate::components::navigator::{Navigator, Slot, SlotView, use_navigator_context};
use crate::config::APP_NAME;

stylance::import_crate_style!(css, "src/components/pages.module.css");

/// Builds the application's route tree.
pub fn route_tree() -> Arc<RouteNode<SlotView>> {
    RouteTree::new()
        .route("_layout", || SlotView::page(RootLayout))
        .route("index", || SlotView::page(Home))
        .route("about", || SlotView::page(About))
        .route("guides/_layout", || SlotView::page(GuidesLayout))
        .route("guides/index", || {
            SlotView::page(|| view! { <p>"Pick a guide above."</p> })
        })
        .route("guides/routing", || {
            SlotView::page(|| view! { <p>"Route files become screens."</p> })
        })
        .route("guides/[topic]", || SlotView::page(Topic))
        .route("[...missing]", || SlotView::page(NotFound))
        .build()
}

// ============================================================================
// Layouts
// ============================================================================

#[component]
fn RootLayout() -> impl IntoView {
    view! {
        <div class=css::shell>
            <Navigator screen_options=ScreenOptions::new().with("title", APP_NAME)>
                <NavBar />
                <main class=css::content>
                    <Slot />
                </main>
            </Navigator>
        </div>
    }
}

#[component]
fn NavBar() -> impl IntoView {
    let scope = use_navigator_context();
    view! {
        <nav class=css::nav>
            {scope.map(|scope| {
                [("index", "Home"), ("guides", "Guides"), ("about", "About")]
                    .into_iter()
                    .map(|(name, label)| {
                        let scope = scope.clone();
                        let is_active = {
                            let scope = scope.clone();
                            move || scope.state().active().is_some_and(|route| route.name == name)
                        };
                        view! {
                            <button
                                class=css::link
                                class:active=is_active
                                on:click=move |_| {
                                    scope.navigation().navigate(name);
                                }
                            >
                                {label}
                            </button>
                        }
                    })
                    .collect_view()
            })}
        </nav>
    }
}

#[component]
fn GuidesLayout() -> impl IntoView {
    let mut params = Params::new();
    params.insert("topic".into(), json!("state"));
    let screens = vec![
        Screen::new("index").options(ScreenOptions::new().with("title", "Guides")),
        Screen::new("[topic]")
            .options(ScreenOptions::new().with("title", "Topic"))
            .initial_params(params),
    ];

    view! {
        <Navigator router=router::single_active() screens=screens>
            <GuideTabs />
            <Slot />
        </Navigator>
    }
}

#[component]
fn GuideTabs() -> impl IntoView {
    let scope = use_navigator_context();
    view! {
        <div class=css::tabs>
            {scope.map(|scope| {
                let title = {
                    let scope = scope.clone();
                    move || {
                        scope
                            .active_options()
                            .get("title")
                            .and_then(|title| title.as_str().map(str::to_string))
                            .unwrap_or_default()
                    }
                };
                let routes = scope
                    .navigation()
                    .state()
                    .map(|state| state.routes)
                    .unwrap_or_default()
                    .into_iter()
                    .enumerate()
                    .map(|(index, route)| {
                        let scope = scope.clone();
                        view! {
                            <button class=css::link on:click=move |_| {
                                scope.navigation().set_index(index);
                            }>
                                {route.name}
                            </button>
                        }
                    })
                    .collect_view();
                view! {
                    <h2>{title}</h2>
                    {routes}
                }
            })}
        </div>
    }
}

// ============================================================================
// Pages
// ============================================================================

#[component]
fn Home() -> impl IntoView {
    view! {
        <section>
            <h1>{APP_NAME}</h1>
            <p>"Each layout owns a navigator; slots render whichever route is active."</p>
        </section>
    }
}

#[component]
fn About() -> impl IntoView {
    view! {
        <section>
            <h1>"About"</h1>
            <p>"Navigation state lives in one store, keyed by each navigator's context key."</p>
        </section>
    }
}

#[component]
fn Topic() -> impl IntoView {
    let topic = use_navigator_context().map(|scope| {
        move || {
            scope
                .state()
                .active()
                .and_then(|route| route.params.as_ref())
                .and_then(|params| params.get("topic"))
                .and_then(|topic| topic.as_str().map(str::to_string))
                .unwrap_or_default()
        }
    });

    view! {
        <section>
            <h3>"Topic: " {topic}</h3>
        </section>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! { <p class=css::muted>"Nothing here."</p> }
}
