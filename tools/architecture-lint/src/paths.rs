//! Path extraction from parsed sources.

use std::collections::BTreeSet;

use syn::UseTree;
use syn::visit::{self, Visit};

/// Every distinct path a file names, as segment lists.
///
/// `use` trees are flattened so `use a::{b, c::d}` yields `a::b` and
/// `a::c::d`. Paths inside macro bodies are opaque tokens and are skipped.
pub(crate) fn named_paths(file: &syn::File) -> BTreeSet<Vec<String>> {
    let mut collector = Collector::default();
    collector.visit_file(file);
    collector.paths
}

#[derive(Default)]
struct Collector {
    paths: BTreeSet<Vec<String>>,
}

impl Collector {
    fn flatten_use(&mut self, tree: &UseTree) {
        let mut pending = vec![(Vec::new(), tree)];
        while let Some((mut prefix, tree)) = pending.pop() {
            match tree {
                UseTree::Path(path) => {
                    prefix.push(path.ident.to_string());
                    pending.push((prefix, &*path.tree));
                }
                UseTree::Name(name) => {
                    prefix.push(name.ident.to_string());
                    self.paths.insert(prefix);
                }
                UseTree::Rename(rename) => {
                    prefix.push(rename.ident.to_string());
                    self.paths.insert(prefix);
                }
                UseTree::Glob(_) => {
                    prefix.push("*".to_owned());
                    self.paths.insert(prefix);
                }
                UseTree::Group(group) => {
                    pending.extend(group.items.iter().map(|item| (prefix.clone(), item)));
                }
            }
        }
    }
}

impl<'ast> Visit<'ast> for Collector {
    fn visit_item_use(&mut self, node: &'ast syn::ItemUse) {
        self.flatten_use(&node.tree);
    }

    fn visit_path(&mut self, node: &'ast syn::Path) {
        let segments: Vec<String> = node
            .segments
            .iter()
            .map(|segment| segment.ident.to_string())
            .collect();
        if !segments.is_empty() {
            self.paths.insert(segments);
        }
        visit::visit_path(self, node);
    }
}
