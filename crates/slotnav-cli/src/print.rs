//! Indented text rendering of route tables and render output.

use std::fmt::Write;

use slotnav_core::host::Output;
use slotnav_core::{
    Child, FilterOptions, NavigatorConfig, RouteNode, filter_screen_children, router, sort_screens,
};

use crate::manifest::{Manifest, TextElement};

const INDENT: &str = "  ";

/// The ordered route table of every navigator in the manifest's tree.
pub fn route_table(manifest: &Manifest) -> String {
    let mut out = String::new();
    write_table(&mut out, manifest, &manifest.tree(), 0);
    out
}

fn write_table(out: &mut String, manifest: &Manifest, node: &RouteNode<TextElement>, depth: usize) {
    let context_key = node.context_key();
    let spec = manifest.navigator(context_key);
    let config = spec.map(|spec| spec.config()).unwrap_or_default();
    let children: Vec<Child<TextElement, ()>> = spec
        .map(|spec| spec.screens().into_iter().map(Child::Screen).collect())
        .unwrap_or_default();

    let filtered = filter_screen_children(
        children,
        &FilterOptions {
            is_custom: spec.is_some(),
            context_key: context_key.clone(),
        },
    );
    let entries = sort_screens(Some(node), context_key, filtered.screens);

    let pad = INDENT.repeat(depth);
    let _ = writeln!(out, "{}navigator \"{}\" ({})", pad, context_key, router_name(&config));
    for entry in &entries {
        let _ = write!(out, "{}{}{}", pad, INDENT, entry.key);
        if let Some(initial) = &config.initial_route_name
            && *initial == entry.name
        {
            out.push_str(" (initial)");
        }
        out.push('\n');
        if entry.node.is_layout() {
            write_table(out, manifest, &entry.node, depth + 2);
        }
    }
}

fn router_name(config: &NavigatorConfig) -> &'static str {
    config.router.as_ref().map_or_else(|| router::stack().name(), |router| router.name())
}

/// Render output as an indented tree. Fragments are flattened.
pub fn output_tree(output: &Output<String>) -> String {
    let mut out = String::new();
    write_output(&mut out, output, 0);
    out
}

fn write_output(out: &mut String, output: &Output<String>, depth: usize) {
    let pad = INDENT.repeat(depth);
    match output {
        Output::Empty => {}
        Output::View(text) => {
            let _ = writeln!(out, "{}{}", pad, text);
        }
        Output::Fragment(children) => {
            for child in children {
                write_output(out, child, depth);
            }
        }
        Output::Keyed { key, child } => {
            let _ = writeln!(out, "{}[{}]", pad, key);
            write_output(out, child, depth + 1);
        }
        Output::Navigator {
            context_key,
            children,
        } => {
            let _ = writeln!(out, "{}<Navigator \"{}\">", pad, context_key);
            for child in children {
                write_output(out, child, depth + 1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use slotnav_core::FlagSet;

    const MANIFEST: &str = r#"
        routes = ["_layout", "index", "[...missing]", "blog/_layout", "blog/[slug]", "blog/index"]

        [navigators."/blog"]
        router = "single-active"
        initial_route_name = "[slug]"

        [[navigators."/blog".screens]]
        name = "drafts"
        view = "drafts list"
    "#;

    #[test]
    fn test_route_table() {
        let manifest = Manifest::from_toml_str(MANIFEST).unwrap();
        let expected = "\
navigator \"/\" (stack)
  /:index
  /:blog
    navigator \"/blog\" (single-active)
      /blog:drafts
      /blog:index
      /blog:[slug] (initial)
  /:[...missing]
";
        assert_eq!(route_table(&manifest), expected);
    }

    #[test]
    fn test_output_tree() {
        let manifest = Manifest::from_toml_str(MANIFEST).unwrap();
        let session = Session::new(&manifest, FlagSet::default());
        let output = session.run(&["/=blog".parse().unwrap()]).unwrap();
        let expected = "\
layout /
<Navigator \"/\">
  [/:blog]
    <Navigator \"/blog\">
      layout /blog
      [/blog:[slug]]
        page blog/[slug]
";
        assert_eq!(output_tree(&output), expected);
    }
}
