//! Recursion detection over the class reference graph.
//!
//! Nodes are class declarations. There is an edge `A -> B` when A (including what it inherits)
//! has a field or relationship whose type resolves to class B, array or not. A class is recursive
//! when it can reach itself along these edges. Sharing a type through two paths (a diamond) is not
//! recursion, and neither is sitting next to a cycle that does not pass through the class.
//!
//! Every query is a depth-first walk with an explicit path stack plus a set of nodes already shown
//! not to reach the target, so one query is O(V + E).

use std::collections::HashSet;

use crate::frontend::model::{DeclId, Declaration, ModelGraph, PropertyKind};

use super::type_conv::resolve_type;

pub struct RecursionDetector<'g> {
    graph: &'g ModelGraph,
}

impl<'g> RecursionDetector<'g> {
    pub fn new(graph: &'g ModelGraph) -> Self {
        Self { graph }
    }

    /// Whether `decl` is reachable from itself. Always false for enums and scalars.
    pub fn is_recursive(&self, decl: &'g Declaration) -> bool {
        if !decl.is_class() {
            return false;
        }
        let origin = decl.id();
        let mut path = vec![origin.clone()];
        let mut explored = HashSet::new();
        self.class_targets(decl)
            .into_iter()
            .any(|next| self.reaches(next, &origin, &mut path, &mut explored))
    }

    /// Whether `origin` is reachable from `from` (zero or more edges, so `from == origin` counts).
    pub fn leads_back(&self, from: &'g Declaration, origin: &Declaration) -> bool {
        self.reaches(from, &origin.id(), &mut Vec::new(), &mut HashSet::new())
    }

    fn reaches(
        &self,
        node: &'g Declaration,
        origin: &DeclId,
        path: &mut Vec<DeclId>,
        explored: &mut HashSet<DeclId>,
    ) -> bool {
        let id = node.id();
        if &id == origin {
            return true;
        }
        // On the path but not the origin: a cycle that does not close on the origin.
        if path.contains(&id) || explored.contains(&id) {
            return false;
        }

        path.push(id);
        let mut found = false;
        for next in self.class_targets(node) {
            if self.reaches(next, origin, path, explored) {
                found = true;
                break;
            }
        }
        if let Some(id) = path.pop() {
            if !found {
                explored.insert(id);
            }
        }
        found
    }

    /// Classes referenced by the full property list of `decl`, in member order.
    fn class_targets(&self, decl: &'g Declaration) -> Vec<&'g Declaration> {
        self.graph
            .properties(decl)
            .into_iter()
            .filter(|m| m.property.kind != PropertyKind::EnumValue)
            .filter_map(|m| {
                resolve_type(self.graph, &m.declared_in.namespace, m.property.kind, &m.property.type_ref).as_class()
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::frontend::model::{Namespace, Property, TypeRef};

    fn class(name: &str, targets: &[&str]) -> Declaration {
        let properties = targets
            .iter()
            .enumerate()
            .map(|(i, t)| Property::field(format!("p{}", i), TypeRef::named(*t)))
            .collect();
        Declaration::class("", name, properties)
    }

    fn graph(decls: Vec<Declaration>) -> ModelGraph {
        let ns = decls.into_iter().fold(Namespace::new("t"), |ns, d| ns.with_declaration(d));
        ModelGraph::new(vec![ns])
    }

    fn decl<'g>(g: &'g ModelGraph, name: &str) -> &'g Declaration {
        g.declaration(&DeclId::new("t", name)).unwrap()
    }

    #[test]
    fn test_three_cycle() {
        let g = graph(vec![class("A", &["B"]), class("B", &["C"]), class("C", &["A"])]);
        let detector = RecursionDetector::new(&g);
        for name in ["A", "B", "C"] {
            assert!(detector.is_recursive(decl(&g, name)), "{} should be recursive", name);
        }
    }

    #[test]
    fn test_diamond_is_not_recursive() {
        let g = graph(vec![
            class("A", &["B", "C"]),
            class("B", &["D"]),
            class("C", &["D"]),
            class("D", &[]),
        ]);
        let detector = RecursionDetector::new(&g);
        for name in ["A", "B", "C", "D"] {
            assert!(!detector.is_recursive(decl(&g, name)), "{} should not be recursive", name);
        }
    }

    #[test]
    fn test_self_reference() {
        let g = graph(vec![class("Node", &["Node"])]);
        assert!(RecursionDetector::new(&g).is_recursive(decl(&g, "Node")));
    }

    #[test]
    fn test_cycle_elsewhere_does_not_count() {
        // A -> B <-> C: B and C recurse, A only points into the cycle.
        let g = graph(vec![class("A", &["B"]), class("B", &["C"]), class("C", &["B"])]);
        let detector = RecursionDetector::new(&g);
        assert!(!detector.is_recursive(decl(&g, "A")));
        assert!(detector.is_recursive(decl(&g, "B")));
        assert!(detector.is_recursive(decl(&g, "C")));
    }

    #[test]
    fn test_leads_back() {
        let g = graph(vec![class("A", &["B"]), class("B", &["A"]), class("C", &["A"])]);
        let detector = RecursionDetector::new(&g);
        assert!(detector.leads_back(decl(&g, "B"), decl(&g, "A")));
        assert!(detector.leads_back(decl(&g, "A"), decl(&g, "A")));
        assert!(!detector.leads_back(decl(&g, "A"), decl(&g, "C")));
    }

    #[test]
    fn test_inherited_members_are_edges() {
        let base = class("Base", &["Tree"]);
        let tree = Declaration::class("", "Tree", vec![]).extending(TypeRef::named("Base"));
        let g = graph(vec![base, tree]);
        assert!(RecursionDetector::new(&g).is_recursive(decl(&g, "Tree")));
    }

    #[test]
    fn test_primitive_and_enum_members_are_not_edges() {
        let ns = Namespace::new("t")
            .with_declaration(Declaration::enumeration("", "Color", &["RED"]))
            .with_declaration(Declaration::class(
                "",
                "Car",
                vec![
                    Property::field("color", TypeRef::named("Color")),
                    Property::field("name", TypeRef::named("String")),
                ],
            ));
        let g = ModelGraph::new(vec![ns]);
        assert!(!RecursionDetector::new(&g).is_recursive(decl(&g, "Car")));
        assert!(!RecursionDetector::new(&g).is_recursive(decl(&g, "Color")));
    }
}
