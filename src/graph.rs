use crate::config::DEFAULT_MAX_NODES_REMEMBERED;
use crate::position::Position;
use std::collections::VecDeque;

/// An ant's internal search graph
///
/// Records every position the ant has stood on and keeps a loop-free path
/// from the start position to wherever the ant is now. Once a target has
/// been set the loop-free path, reversed, is the ant's way home.
#[derive(Clone, Debug)]
pub struct AntGraph {
    max_nodes_remembered: usize,
    /// Every node ever visited, unique, in visiting order
    all_visited: Vec<Position>,
    /// Simple path from the start node to the current node
    path_so_far: Vec<Position>,
    /// `path_so_far` reversed at the moment the target was found
    reversed_shortest_path: Vec<Position>,
    recently_visited: VecDeque<Position>,
}

impl AntGraph {
    /// Create a graph rooted at `start` (the node to return to once a target is found)
    pub fn new(start: Position) -> Self {
        Self {
            max_nodes_remembered: DEFAULT_MAX_NODES_REMEMBERED,
            all_visited: vec![start],
            path_so_far: vec![start],
            reversed_shortest_path: Vec::new(),
            recently_visited: VecDeque::with_capacity(DEFAULT_MAX_NODES_REMEMBERED),
        }
    }

    /// Add a node to the graph
    ///
    /// If the position is already known the ant has looped back on itself:
    /// everything walked since the earlier visit is cut from the path.
    pub fn add_node(&mut self, position: Position) {
        if self.all_visited.contains(&position) {
            if let Some(idx) = self.path_so_far.iter().position(|p| *p == position) {
                self.path_so_far.truncate(idx);
            }
        } else {
            self.all_visited.push(position);
        }

        self.path_so_far.push(position);

        if !self.recently_visited(position) {
            if self.recently_visited.len() >= self.max_nodes_remembered {
                self.recently_visited.pop_front();
            }
            self.recently_visited.push_back(position);
        }
    }

    /// Mark `position` as the target and reverse the current path for the return trip
    pub fn set_found_target(&mut self, position: Position) {
        self.add_node(position);
        self.reversed_shortest_path.clear();
        self.reversed_shortest_path
            .extend(self.path_so_far.iter().rev().copied());
    }

    /// Path from target (first) to start (last); empty until a target is set
    pub fn shortest_path(&self) -> &[Position] {
        &self.reversed_shortest_path
    }

    /// Loop-free path from the start to the most recent node
    pub fn path_so_far(&self) -> &[Position] {
        &self.path_so_far
    }

    /// Number of distinct nodes ever visited
    pub fn visited_count(&self) -> usize {
        self.all_visited.len()
    }

    /// True if `position` is one of the last few distinct nodes visited
    pub fn recently_visited(&self, position: Position) -> bool {
        self.recently_visited.contains(&position)
    }

    /// Resize the recency window; shrinking forgets the oldest entries first
    pub fn set_max_nodes_remembered(&mut self, max_nodes_remembered: usize) {
        self.max_nodes_remembered = max_nodes_remembered;
        while self.recently_visited.len() > max_nodes_remembered {
            self.recently_visited.pop_front();
        }
    }

    pub fn max_nodes_remembered(&self) -> usize {
        self.max_nodes_remembered
    }
}
