//! Property tests for dependency resolution.

use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;

use genesis3_conformance::domain::services::{DependencyResolver, ModuleGraph, ResolveError};

/// Modules `m0..mN`; edges only point at lower indices, so the graph is
/// acyclic.
#[derive(Debug)]
struct Dag {
    deps: BTreeMap<String, Vec<String>>,
}

impl ModuleGraph for Dag {
    fn contains_module(&self, module_id: &str) -> bool {
        self.deps.contains_key(module_id)
    }

    fn dependencies_of(&self, module_id: &str) -> Option<&[String]> {
        self.deps.get(module_id).map(Vec::as_slice)
    }
}

fn name(i: usize) -> String {
    format!("m{}", i)
}

fn dag() -> impl Strategy<Value = Dag> {
    (1usize..10)
        .prop_flat_map(|n| {
            let targets = proptest::collection::vec(any::<prop::sample::Index>(), 0..4);
            proptest::collection::vec(targets, n)
        })
        .prop_map(|edges| {
            let deps = edges
                .iter()
                .enumerate()
                .map(|(i, targets)| {
                    let mut children: Vec<String> = Vec::new();
                    if i > 0 {
                        for target in targets {
                            let child = name(target.index(i));
                            if !children.contains(&child) {
                                children.push(child);
                            }
                        }
                    }
                    (name(i), children)
                })
                .collect();
            Dag { deps }
        })
}

fn reachable(graph: &Dag, roots: &[String]) -> BTreeSet<String> {
    let mut seen = BTreeSet::new();
    let mut stack: Vec<String> = roots.to_vec();
    while let Some(id) = stack.pop() {
        if seen.insert(id.clone()) {
            stack.extend(graph.deps[&id].iter().cloned());
        }
    }
    seen
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// PROPERTY: on an acyclic graph every reachable module appears exactly
    /// once, after all of its own dependencies.
    #[test]
    fn property_dependencies_come_first(graph in dag()) {
        let top = graph.deps.len() - 1;
        let roots = graph.deps[&name(top)].clone();

        let order = DependencyResolver::new(&graph)
            .resolve("target", &roots)
            .unwrap();

        let unique: BTreeSet<String> = order.iter().cloned().collect();
        prop_assert_eq!(unique.len(), order.len(), "duplicates in {:?}", order);
        prop_assert_eq!(unique, reachable(&graph, &roots));
        for (position, module_id) in order.iter().enumerate() {
            for dep in &graph.deps[module_id] {
                let dep_position = order.iter().position(|m| m == dep).unwrap();
                prop_assert!(
                    dep_position < position,
                    "{} before {} in {:?}",
                    module_id,
                    dep,
                    order
                );
            }
        }
    }

    /// PROPERTY: without transitivity only the declared modules come back,
    /// in declaration order.
    #[test]
    fn property_direct_only_keeps_declaration_order(graph in dag()) {
        let top = graph.deps.len() - 1;
        let roots = graph.deps[&name(top)].clone();

        let order = DependencyResolver::new(&graph)
            .with_transitive(false)
            .resolve("target", &roots)
            .unwrap();

        prop_assert_eq!(order, roots);
    }

    /// PROPERTY: a back edge from any module to the target is a cycle that
    /// starts and ends at the target.
    #[test]
    fn property_back_edge_to_target_is_a_cycle(
        graph in dag(),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut graph = graph;
        let culprit = name(pick.index(graph.deps.len()));
        graph.deps.get_mut(&culprit).unwrap().push("target".to_string());
        graph.deps.insert("target".to_string(), vec![culprit.clone()]);

        let err = DependencyResolver::new(&graph)
            .resolve("target", &[culprit])
            .unwrap_err();

        match err {
            ResolveError::Cycle { cycle } => {
                prop_assert_eq!(cycle.first().map(String::as_str), Some("target"));
                prop_assert_eq!(cycle.last().map(String::as_str), Some("target"));
            }
            other => prop_assert!(false, "expected a cycle, got {:?}", other),
        }
    }
}
