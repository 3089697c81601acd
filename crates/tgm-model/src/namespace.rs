//! # Namespace Tree
//!
//! One node per distinct prefix of every object type's namespace path,
//! plus the root. Nodes are keyed by path; parent and child links are
//! structural (a child's path is its parent's path plus one segment).

use std::collections::BTreeMap;

/// A node of the namespace tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace {
    path: Vec<String>,
}

impl Namespace {
    fn new(path: Vec<String>) -> Self {
        Self { path }
    }

    /// The last path segment; `None` at the root.
    pub fn name(&self) -> Option<&str> {
        self.path.last().map(String::as_str)
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    /// `None` at the root.
    pub fn parent_path(&self) -> Option<&[String]> {
        self.path.split_last().map(|(_, parent)| parent)
    }

    /// Path as `a.b.c`; empty at the root.
    pub fn dotted(&self) -> String {
        self.path.join(".")
    }
}

/// All namespaces of a model, sorted by path with the root first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceTree {
    nodes: BTreeMap<Vec<String>, Namespace>,
}

impl Default for NamespaceTree {
    fn default() -> Self {
        Self::build(std::iter::empty::<&[String]>())
    }
}

impl NamespaceTree {
    /// Build the tree from every declared namespace path.
    pub fn build<P>(paths: impl IntoIterator<Item = P>) -> Self
    where
        P: AsRef<[String]>,
    {
        let mut nodes = BTreeMap::new();
        nodes.insert(Vec::new(), Namespace::new(Vec::new()));
        for path in paths {
            let path = path.as_ref();
            for len in 1..=path.len() {
                let prefix = &path[..len];
                if !nodes.contains_key(prefix) {
                    nodes.insert(prefix.to_vec(), Namespace::new(prefix.to_vec()));
                }
            }
        }
        Self { nodes }
    }

    pub fn root(&self) -> &Namespace {
        // `build` always inserts the root.
        &self.nodes[&Vec::<String>::new()]
    }

    /// All nodes in path order; the root is first.
    pub fn namespaces(&self) -> impl Iterator<Item = &Namespace> {
        self.nodes.values()
    }

    /// Number of nodes, the root included. Always at least one.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Exact-path lookup. An unknown path is `None`, not an error.
    pub fn get<S: AsRef<str>>(&self, path: &[S]) -> Option<&Namespace> {
        let key: Vec<String> = path.iter().map(|s| s.as_ref().to_string()).collect();
        self.nodes.get(&key)
    }

    /// Direct children of `namespace`, in path order.
    pub fn children<'a>(&'a self, namespace: &'a Namespace) -> impl Iterator<Item = &'a Namespace> + 'a {
        let depth = namespace.path.len() + 1;
        self.nodes
            .range(namespace.path.clone()..)
            .map(|(_, node)| node)
            .take_while(move |node| node.path.starts_with(&namespace.path))
            .filter(move |node| node.path.len() == depth)
    }

    /// Paths of the direct children of `namespace`.
    pub fn child_paths(&self, namespace: &Namespace) -> Vec<Vec<String>> {
        self.children(namespace).map(|n| n.path.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(segments: &[&str]) -> Vec<String> {
        segments.iter().map(|s| s.to_string()).collect()
    }

    fn sample() -> NamespaceTree {
        NamespaceTree::build(vec![
            path(&[]),
            path(&["generic"]),
            path(&["logistics", "shipments"]),
            path(&["logistics"]),
        ])
    }

    #[test]
    fn test_one_node_per_prefix_plus_root() {
        let tree = sample();
        let paths: Vec<Vec<String>> = tree.namespaces().map(|n| n.path().to_vec()).collect();
        assert_eq!(
            paths,
            vec![
                path(&[]),
                path(&["generic"]),
                path(&["logistics"]),
                path(&["logistics", "shipments"]),
            ]
        );
        let roots: Vec<bool> = tree.namespaces().map(Namespace::is_root).collect();
        assert_eq!(roots, vec![true, false, false, false]);
    }

    #[test]
    fn test_root_always_exists() {
        let tree = NamespaceTree::default();
        assert_eq!(tree.node_count(), 1);
        assert!(tree.root().is_root());
        assert_eq!(tree.root().name(), None);
        assert_eq!(tree.root().parent_path(), None);
    }

    #[test]
    fn test_lookup_by_path() {
        let tree = sample();
        let ns = tree.get(&["logistics", "shipments"]).unwrap();
        assert_eq!(ns.name(), Some("shipments"));
        assert_eq!(ns.parent_path(), Some(&path(&["logistics"])[..]));
        assert_eq!(ns.dotted(), "logistics.shipments");
        assert!(tree.get(&["unknown"]).is_none());
        assert!(tree.get::<&str>(&[]).unwrap().is_root());
    }

    #[test]
    fn test_children() {
        let tree = sample();
        assert_eq!(
            tree.child_paths(tree.root()),
            vec![path(&["generic"]), path(&["logistics"])]
        );
        let logistics = tree.get(&["logistics"]).unwrap();
        assert_eq!(tree.child_paths(logistics), vec![path(&["logistics", "shipments"])]);
        let generic = tree.get(&["generic"]).unwrap();
        assert!(tree.child_paths(generic).is_empty());
    }

    #[test]
    fn test_intermediate_prefixes_are_created() {
        let tree = NamespaceTree::build(vec![path(&["a", "b", "c"])]);
        assert_eq!(tree.node_count(), 4);
        assert!(tree.get(&["a", "b"]).is_some());
    }
}
