//! Dependency resolver
//!
//! Computes the order in which a scenario's prerequisite modules are
//! materialized: dependencies before dependents, ties broken by declaration
//! order. Iterative depth-first search with explicit in-progress marking,
//! so a misconfigured suite fails with a reportable cycle instead of
//! overflowing the stack.

use std::collections::HashMap;

/// Read-only view of the modules known to the harness
pub trait ModuleGraph {
    fn contains_module(&self, module_id: &str) -> bool;

    /// Dependencies of `module_id` when it is materialized as a dependency,
    /// or `None` when the module is unknown
    fn dependencies_of(&self, module_id: &str) -> Option<&[String]>;
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("unknown module dependency '{module_id}'")]
    UnknownModule { module_id: String },

    #[error("dependency cycle detected: {}", .cycle.join(" -> "))]
    Cycle { cycle: Vec<String> },
}

impl ResolveError {
    /// Module the error is attributed to in reports
    pub fn module_id(&self) -> &str {
        match self {
            ResolveError::UnknownModule { module_id } => module_id,
            ResolveError::Cycle { cycle } => cycle.first().map(String::as_str).unwrap_or(""),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    InProgress,
    Done,
}

struct Frame {
    module_id: String,
    children: Vec<String>,
    next: usize,
}

/// Resolves materialization order against a [`ModuleGraph`]
pub struct DependencyResolver<'a, G: ?Sized> {
    graph: &'a G,
    transitive: bool,
}

impl<'a, G: ModuleGraph + ?Sized> DependencyResolver<'a, G> {
    pub fn new(graph: &'a G) -> Self {
        Self {
            graph,
            transitive: true,
        }
    }

    /// When disabled, only the declared dependencies are materialized;
    /// their own dependencies are not followed.
    pub fn with_transitive(mut self, transitive: bool) -> Self {
        self.transitive = transitive;
        self
    }

    /// Order in which `dependencies` of `target` must be materialized.
    ///
    /// The target itself is not part of the result.
    pub fn resolve(
        &self,
        target: &str,
        dependencies: &[String],
    ) -> Result<Vec<String>, ResolveError> {
        let mut order: Vec<String> = Vec::new();
        let mut marks: HashMap<String, Mark> = HashMap::new();
        marks.insert(target.to_string(), Mark::InProgress);

        for root in dependencies {
            match marks.get(root.as_str()) {
                Some(Mark::Done) => continue,
                Some(Mark::InProgress) => {
                    return Err(ResolveError::Cycle {
                        cycle: vec![target.to_string(), root.clone()],
                    });
                }
                None => {}
            }

            let children = self.children_of(root)?;
            marks.insert(root.clone(), Mark::InProgress);
            let mut stack = vec![Frame {
                module_id: root.clone(),
                children,
                next: 0,
            }];

            loop {
                let next_child = match stack.last_mut() {
                    None => break,
                    Some(frame) if frame.next < frame.children.len() => {
                        frame.next += 1;
                        Some(frame.children[frame.next - 1].clone())
                    }
                    Some(_) => None,
                };

                match next_child {
                    Some(child) => match marks.get(child.as_str()) {
                        Some(Mark::Done) => {}
                        Some(Mark::InProgress) => {
                            return Err(ResolveError::Cycle {
                                cycle: cycle_path(target, &stack, &child),
                            });
                        }
                        None => {
                            let children = self.children_of(&child)?;
                            marks.insert(child.clone(), Mark::InProgress);
                            stack.push(Frame {
                                module_id: child,
                                children,
                                next: 0,
                            });
                        }
                    },
                    None => {
                        if let Some(done) = stack.pop() {
                            marks.insert(done.module_id.clone(), Mark::Done);
                            order.push(done.module_id);
                        }
                    }
                }
            }
        }

        Ok(order)
    }

    fn children_of(&self, module_id: &str) -> Result<Vec<String>, ResolveError> {
        let unknown = || ResolveError::UnknownModule {
            module_id: module_id.to_string(),
        };
        if !self.transitive {
            return if self.graph.contains_module(module_id) {
                Ok(Vec::new())
            } else {
                Err(unknown())
            };
        }
        self.graph
            .dependencies_of(module_id)
            .map(<[String]>::to_vec)
            .ok_or_else(unknown)
    }
}

/// Chain `target -> stack... -> child`, cut at the first occurrence of `child`
fn cycle_path(target: &str, stack: &[Frame], child: &str) -> Vec<String> {
    let chain: Vec<&str> = std::iter::once(target)
        .chain(stack.iter().map(|f| f.module_id.as_str()))
        .collect();
    let start = chain.iter().position(|id| *id == child).unwrap_or(0);
    chain[start..]
        .iter()
        .map(|id| id.to_string())
        .chain(std::iter::once(child.to_string()))
        .collect()
}
