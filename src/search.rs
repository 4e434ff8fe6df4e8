//! Path search over a [`Grid`] with three interchangeable strategies.
//!
//! Every strategy runs the same exploration loop and differs only in its frontier: a FIFO queue
//! for breadth-first, a LIFO stack for depth-first and a binary heap keyed by `g + h` for greedy
//! best-first. Neighbours are always discovered in [`Direction::ALL`](crate::grid::Direction::ALL)
//! order (down, up, right, left).
//!
//! Explored nodes are kept in an arena and point at their parent, so a path is only materialised
//! once the goal is reached.

use std::{
    cmp::Reverse,
    collections::{BinaryHeap, VecDeque},
    fmt,
};

use clap::ValueEnum;
use log::{debug, trace};

use crate::grid::{Coord, Grid, Path};

/// Available search strategies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ValueEnum)]
pub enum Strategy {
    /// FIFO exploration; always returns a shortest path.
    #[default]
    #[value(name = "bfs")]
    BreadthFirst,
    /// LIFO exploration; returns the first path it stumbles upon.
    #[value(name = "dfs")]
    DepthFirst,
    /// Lowest `path length + Manhattan distance` first; fast but not guaranteed shortest.
    #[value(name = "greedy", alias = "astar")]
    BestFirst,
}

impl Strategy {
    /// Every strategy, in the order the interface cycles through them.
    pub const ALL: [Self; 3] = [Self::BreadthFirst, Self::DepthFirst, Self::BestFirst];

    /// Searches `grid` for a path from its start marker to its goal marker.
    ///
    /// Returns [`None`] when either marker is missing or the goal cannot be reached.
    #[must_use]
    pub fn search(self, grid: &Grid) -> Option<Path> {
        match self {
            Self::BreadthFirst => breadth_first(grid),
            Self::DepthFirst => depth_first(grid),
            Self::BestFirst => best_first(grid),
        }
    }

    /// The strategy that follows this one in [`Strategy::ALL`], wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::BreadthFirst => Self::DepthFirst,
            Self::DepthFirst => Self::BestFirst,
            Self::BestFirst => Self::BreadthFirst,
        }
    }

    /// Short display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::BreadthFirst => "BFS",
            Self::DepthFirst => "DFS",
            Self::BestFirst => "Greedy",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.label())
    }
}

/// Breadth-first search. Cells are marked visited as soon as they are enqueued, and the returned
/// path is a shortest one.
#[must_use]
pub fn breadth_first(grid: &Grid) -> Option<Path> {
    explore(grid, Queue::default())
}

/// Depth-first search. Cells are marked visited when popped, so the last neighbour discovered is
/// explored first. The returned path need not be shortest.
#[must_use]
pub fn depth_first(grid: &Grid) -> Option<Path> {
    explore(grid, Stack::default())
}

/// Greedy best-first search ordered by `f = g + h`.
///
/// `g` is the length of the path so far counting the start as one cell and `h` the Manhattan
/// distance to the goal. Among equal scores the entry inserted first wins. Cells are marked
/// visited when extracted, and scores are never revised, so the result is not guaranteed to be
/// shortest.
#[must_use]
pub fn best_first(grid: &Grid) -> Option<Path> {
    explore(grid, Ranked::default())
}

/// A discovered cell and the way it was reached.
#[derive(Clone, Copy, Debug)]
struct Node {
    /// Position of the node.
    cell: Coord,
    /// Arena index of the node it was reached from.
    parent: Option<usize>,
    /// Cells on the path from the start to this node, both included.
    length: usize,
}

/// Work list of arena indices awaiting expansion.
trait Frontier {
    /// Whether cells are marked visited on discovery rather than on extraction.
    const VISIT_ON_DISCOVERY: bool;

    /// Adds the node stored at `id`.
    fn push(&mut self, id: usize, node: &Node, goal: Coord);

    /// Takes the next node to expand.
    fn pop(&mut self) -> Option<usize>;
}

/// FIFO frontier.
#[derive(Default)]
struct Queue(VecDeque<usize>);

impl Frontier for Queue {
    const VISIT_ON_DISCOVERY: bool = true;

    fn push(&mut self, id: usize, _node: &Node, _goal: Coord) {
        self.0.push_back(id);
    }

    fn pop(&mut self) -> Option<usize> {
        self.0.pop_front()
    }
}

/// LIFO frontier.
#[derive(Default)]
struct Stack(Vec<usize>);

impl Frontier for Stack {
    const VISIT_ON_DISCOVERY: bool = false;

    fn push(&mut self, id: usize, _node: &Node, _goal: Coord) {
        self.0.push(id);
    }

    fn pop(&mut self) -> Option<usize> {
        self.0.pop()
    }
}

/// Min-heap frontier keyed by `(score, insertion sequence)`.
#[derive(Default)]
struct Ranked {
    /// Entries as `(score, sequence, id)`, reversed so the smallest comes out first.
    heap: BinaryHeap<Reverse<(usize, u64, usize)>>,
    /// Insertion counter used to break score ties first-in first-out.
    sequence: u64,
}

impl Frontier for Ranked {
    const VISIT_ON_DISCOVERY: bool = false;

    fn push(&mut self, id: usize, node: &Node, goal: Coord) {
        let score = node.length + node.cell.manhattan(goal);
        self.heap.push(Reverse((score, self.sequence, id)));
        self.sequence += 1;
    }

    fn pop(&mut self) -> Option<usize> {
        self.heap.pop().map(|Reverse((_, _, id))| id)
    }
}

/// Per-search record of finalised cells.
struct Visited {
    /// One flag per grid position, row-major.
    flags: Vec<bool>,
}

impl Visited {
    /// Creates an empty record sized for `grid`.
    fn new(grid: &Grid) -> Self {
        Self {
            flags: vec![false; grid.rows() * grid.cols()],
        }
    }

    /// Returns whether `coord` has been marked.
    fn contains(&self, grid: &Grid, coord: Coord) -> bool {
        grid.index(coord)
            .and_then(|idx| self.flags.get(idx))
            .copied()
            .unwrap_or(true)
    }

    /// Marks `coord`, returning `false` if it was already marked or lies outside the grid.
    fn insert(&mut self, grid: &Grid, coord: Coord) -> bool {
        match grid.index(coord).and_then(|idx| self.flags.get_mut(idx)) {
            Some(flag) if !*flag => {
                *flag = true;
                true
            }
            _ => false,
        }
    }
}

/// Runs the shared exploration loop with the given frontier.
fn explore<F: Frontier>(grid: &Grid, mut frontier: F) -> Option<Path> {
    let Some(start) = grid.start() else {
        debug!("search aborted: grid has no start marker");
        return None;
    };
    let Some(goal) = grid.goal() else {
        debug!("search aborted: grid has no goal marker");
        return None;
    };

    let root = Node {
        cell: start,
        parent: None,
        length: 1,
    };
    let mut visited = Visited::new(grid);
    if F::VISIT_ON_DISCOVERY {
        let _ = visited.insert(grid, start);
    }
    let mut arena = vec![root];
    frontier.push(0, &root, goal);

    let mut expanded = 0_usize;
    while let Some(id) = frontier.pop() {
        let Some(&node) = arena.get(id) else {
            continue;
        };

        if node.cell == goal {
            let path = trace_back(&arena, id);
            debug!(
                "found path of {} cells after expanding {expanded} nodes",
                path.len()
            );
            return Some(path);
        }

        if !F::VISIT_ON_DISCOVERY && !visited.insert(grid, node.cell) {
            continue;
        }
        expanded += 1;
        trace!("expanding {}", node.cell);

        for next in grid.neighbors(node.cell) {
            let fresh = if F::VISIT_ON_DISCOVERY {
                visited.insert(grid, next)
            } else {
                !visited.contains(grid, next)
            };
            if !fresh {
                continue;
            }

            let child = Node {
                cell: next,
                parent: Some(id),
                length: node.length + 1,
            };
            arena.push(child);
            frontier.push(arena.len() - 1, &child, goal);
        }
    }

    debug!("no path from {start} to {goal} after expanding {expanded} nodes");
    None
}

/// Rebuilds the path ending at arena node `id` by following parent links.
fn trace_back(arena: &[Node], id: usize) -> Path {
    let mut cells = Vec::new();
    let mut cursor = Some(id);
    while let Some(node) = cursor.and_then(|idx| arena.get(idx)) {
        cells.push(node.cell);
        cursor = node.parent;
    }
    cells.reverse();

    Path::new(cells)
}
