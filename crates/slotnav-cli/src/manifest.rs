//! Route manifests.
//!
//! A manifest lists route files and optionally configures the navigators of
//! layout directories:
//!
//! ```toml
//! routes = ["_layout", "index", "blog/_layout", "blog/index", "blog/[slug]"]
//!
//! [flags]
//! prevent_layout_remounting = true
//!
//! [navigators."/blog"]
//! router = "single-active"
//! initial_route_name = "[slug]"
//! screen_options = { title = "Blog" }
//!
//! [[navigators."/blog".screens]]
//! name = "[slug]"
//! options = { title = "Post" }
//! ```
//!
//! Layouts with a navigator entry render an explicit navigator around a
//! heading and a slot; other layouts render the heading and a bare slot.
//! Every route renders a one-line text view naming itself.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use slotnav_core::config::{LAYOUT_ROUTE, PATH_SEPARATOR};
use slotnav_core::host::{Element, NavigatorProps};
use slotnav_core::{
    ContextKey, FlagSet, NavigatorConfig, Params, RouteNode, RouteTree, RouterHandle, Screen,
    ScreenOptions, router,
};

use crate::error::ManifestError;

/// Element type the CLI renders.
pub type TextElement = Element<String>;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    pub routes: Vec<String>,
    #[serde(default)]
    pub flags: FlagSet,
    /// Navigator configuration keyed by context key.
    #[serde(default)]
    pub navigators: BTreeMap<String, NavigatorSpec>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RouterKind {
    #[default]
    Stack,
    SingleActive,
}

impl RouterKind {
    pub fn handle(self) -> RouterHandle {
        match self {
            RouterKind::Stack => router::stack(),
            RouterKind::SingleActive => router::single_active(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavigatorSpec {
    pub initial_route_name: Option<String>,
    pub router: RouterKind,
    pub screen_options: ScreenOptions,
    pub screens: Vec<ScreenSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScreenSpec {
    pub name: String,
    #[serde(default)]
    pub options: ScreenOptions,
    pub initial_params: Option<Params>,
    /// Text for a screen with no route file of its own.
    pub view: Option<String>,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let source = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ManifestError> {
        let manifest: Manifest = toml::from_str(source)?;
        if manifest.routes.is_empty() {
            return Err(ManifestError::Empty);
        }
        Ok(manifest)
    }

    /// Navigator configuration for `context_key`, matching keys after normalization.
    pub fn navigator(&self, context_key: &ContextKey) -> Option<&NavigatorSpec> {
        self.navigators
            .iter()
            .find(|(key, _)| ContextKey::from(key.as_str()) == *context_key)
            .map(|(_, spec)| spec)
    }

    /// Builds the renderable route tree.
    pub fn tree(&self) -> Arc<RouteNode<TextElement>> {
        let mut tree = RouteTree::new();
        for path in &self.routes {
            let (dir, file) = match path.rsplit_once(PATH_SEPARATOR) {
                Some((dir, file)) => (dir, file),
                None => ("", path.as_str()),
            };

            if file == LAYOUT_ROUTE {
                let context_key = ContextKey::from(dir);
                let spec = self.navigator(&context_key).cloned();
                tree.insert(
                    path,
                    Arc::new(move || layout_element(&context_key, spec.as_ref())),
                );
            } else {
                let text = format!("page {}", path);
                tree.insert(path, Arc::new(move || Element::view(text.clone())));
            }
        }
        tree.build()
    }
}

impl NavigatorSpec {
    pub fn config(&self) -> NavigatorConfig {
        NavigatorConfig {
            initial_route_name: self.initial_route_name.clone(),
            screen_options: self.screen_options.clone(),
            router: Some(self.router.handle()),
        }
    }

    pub fn screens(&self) -> Vec<Screen<TextElement>> {
        self.screens.iter().map(ScreenSpec::screen).collect()
    }

    fn props(&self) -> NavigatorProps<String> {
        let mut props = NavigatorProps::new();
        props.config = self.config();
        self.screens()
            .into_iter()
            .fold(props, NavigatorProps::screen)
    }
}

impl ScreenSpec {
    pub fn screen(&self) -> Screen<TextElement> {
        let mut screen = Screen::new(self.name.clone()).options(self.options.clone());
        if let Some(params) = &self.initial_params {
            screen = screen.initial_params(params.clone());
        }
        if let Some(text) = &self.view {
            let text = text.clone();
            screen = screen.render(move || Element::view(text.clone()));
        }
        screen
    }
}

fn layout_element(context_key: &ContextKey, spec: Option<&NavigatorSpec>) -> TextElement {
    let heading = Element::view(format!("layout {}", context_key));
    match spec {
        Some(spec) => {
            let props = spec.props().child(heading).child(Element::slot());
            Element::navigator(props)
        }
        None => Element::fragment([heading, Element::slot()]),
    }
}
