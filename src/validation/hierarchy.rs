//! Type hierarchy validation
//!
//! Detects cycles in the inheritance graph (base-type chains must form a
//! tree) and in the containment graph (an entity must not contain itself
//! through a chain of contained navigation properties).

use crate::models::EntityType;
use petgraph::graph::NodeIndex;
use petgraph::{Directed, Graph};
use std::collections::HashMap;

/// Inheritance cycle detected
#[derive(Debug, Clone, PartialEq)]
pub struct InheritanceCycle {
    /// Qualified name of the type where the cycle was detected
    pub entity_type: String,
    /// Qualified names along the cycle, starting and ending at `entity_type`
    pub cycle_path: Vec<String>,
}

/// Containment cycle detected
#[derive(Debug, Clone, PartialEq)]
pub struct ContainmentCycle {
    /// Qualified name of the containing type
    pub entity_type: String,
    /// Containment navigation property that closes the cycle
    pub navigation_property: String,
    /// Qualified names along the cycle
    pub cycle_path: Vec<String>,
}

/// Result of hierarchy validation
#[derive(Debug, Default)]
pub struct HierarchyValidationResult {
    pub inheritance_cycles: Vec<InheritanceCycle>,
    pub containment_cycles: Vec<ContainmentCycle>,
}

impl HierarchyValidationResult {
    pub fn is_valid(&self) -> bool {
        self.inheritance_cycles.is_empty() && self.containment_cycles.is_empty()
    }
}

/// Hierarchy validator
pub struct HierarchyValidator;

impl Default for HierarchyValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl HierarchyValidator {
    /// Create a new hierarchy validator
    pub fn new() -> Self {
        Self
    }

    /// Run both cycle checks over the given types.
    pub fn validate(&self, types: &[EntityType]) -> HierarchyValidationResult {
        HierarchyValidationResult {
            inheritance_cycles: self.check_inheritance_cycles(types),
            containment_cycles: self.check_containment_cycles(types),
        }
    }

    /// Check the base-type graph for cycles.
    ///
    /// Builds a directed graph with one edge per base-type declaration and
    /// reports, for each declaring type, whether its base can reach it back.
    /// Each cycle is reported once, at the first member encountered.
    pub fn check_inheritance_cycles(&self, types: &[EntityType]) -> Vec<InheritanceCycle> {
        let mut graph = Graph::<String, (), Directed>::new();
        let mut node_map: HashMap<String, NodeIndex> = HashMap::new();

        for ty in types {
            let qualified = ty.qualified_name();
            let sub = Self::node(&mut graph, &mut node_map, &qualified);
            if let Some(base) = ty.base_type.as_deref() {
                let base_node = Self::node(&mut graph, &mut node_map, base);
                graph.add_edge(sub, base_node, ());
            }
        }

        let mut cycles = Vec::new();
        let mut reported: std::collections::HashSet<String> = std::collections::HashSet::new();
        for ty in types {
            let qualified = ty.qualified_name();
            if reported.contains(&qualified) {
                continue;
            }
            let Some(base) = ty.base_type.as_deref() else {
                continue;
            };
            if self.can_reach(&graph, &node_map, base, &qualified) {
                let mut cycle_path = self
                    .find_path(&graph, &node_map, base, &qualified)
                    .unwrap_or_default();
                cycle_path.insert(0, qualified.clone());
                for member in &cycle_path {
                    reported.insert(member.clone());
                }
                cycles.push(InheritanceCycle {
                    entity_type: qualified,
                    cycle_path,
                });
            }
        }
        cycles
    }

    /// Check the containment graph for cycles.
    ///
    /// Edges run from a containing type to the target type of each contained
    /// navigation property; a target that reaches its container back means
    /// the container transitively contains itself.
    pub fn check_containment_cycles(&self, types: &[EntityType]) -> Vec<ContainmentCycle> {
        let mut graph = Graph::<String, (), Directed>::new();
        let mut node_map: HashMap<String, NodeIndex> = HashMap::new();

        for ty in types {
            let qualified = ty.qualified_name();
            let owner = Self::node(&mut graph, &mut node_map, &qualified);
            for nav in ty.navigation_properties.iter().filter(|p| p.contains_target) {
                let target = Self::node(&mut graph, &mut node_map, &nav.target_type);
                graph.add_edge(owner, target, ());
            }
        }

        let mut cycles = Vec::new();
        for ty in types {
            let qualified = ty.qualified_name();
            for nav in ty.navigation_properties.iter().filter(|p| p.contains_target) {
                if self.can_reach(&graph, &node_map, &nav.target_type, &qualified) {
                    let mut cycle_path = self
                        .find_path(&graph, &node_map, &nav.target_type, &qualified)
                        .unwrap_or_default();
                    cycle_path.insert(0, qualified.clone());
                    cycles.push(ContainmentCycle {
                        entity_type: qualified.clone(),
                        navigation_property: nav.name.clone(),
                        cycle_path,
                    });
                }
            }
        }
        cycles
    }

    fn node(
        graph: &mut Graph<String, (), Directed>,
        node_map: &mut HashMap<String, NodeIndex>,
        name: &str,
    ) -> NodeIndex {
        *node_map
            .entry(name.to_string())
            .or_insert_with(|| graph.add_node(name.to_string()))
    }

    /// Check if `from` can reach `to` in the graph
    fn can_reach(
        &self,
        graph: &Graph<String, (), Directed>,
        node_map: &HashMap<String, NodeIndex>,
        from: &str,
        to: &str,
    ) -> bool {
        if let (Some(&from_idx), Some(&to_idx)) = (node_map.get(from), node_map.get(to)) {
            // Use DFS to check reachability
            let mut visited = std::collections::HashSet::new();
            let mut stack = vec![from_idx];

            while let Some(node) = stack.pop() {
                if node == to_idx {
                    return true;
                }
                if visited.insert(node) {
                    for neighbor in graph.neighbors(node) {
                        if !visited.contains(&neighbor) {
                            stack.push(neighbor);
                        }
                    }
                }
            }
        }
        false
    }

    /// Find a path from `from` to `to`
    fn find_path(
        &self,
        graph: &Graph<String, (), Directed>,
        node_map: &HashMap<String, NodeIndex>,
        from: &str,
        to: &str,
    ) -> Option<Vec<String>> {
        if let (Some(&from_idx), Some(&to_idx)) = (node_map.get(from), node_map.get(to)) {
            // Use BFS to find path
            let mut visited = std::collections::HashSet::new();
            let mut queue = std::collections::VecDeque::new();
            let mut parent = std::collections::HashMap::new();

            queue.push_back(from_idx);
            visited.insert(from_idx);

            while let Some(node) = queue.pop_front() {
                if node == to_idx {
                    // Reconstruct path
                    let mut path = Vec::new();
                    let mut current = Some(to_idx);
                    while let Some(node_idx) = current {
                        path.push(graph[node_idx].clone());
                        current = parent.get(&node_idx).copied();
                    }
                    path.reverse();
                    return Some(path);
                }

                for neighbor in graph.neighbors(node) {
                    if !visited.contains(&neighbor) {
                        visited.insert(neighbor);
                        parent.insert(neighbor, node);
                        queue.push_back(neighbor);
                    }
                }
            }
        }
        None
    }
}
