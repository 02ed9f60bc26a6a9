// src/connectivity.rs
//! Анализ связности проходимых клеток
//!
//! Коридоры соединяют только соседние в построчном порядке клетки пола,
//! поэтому отдельные «карманы» возможны. Модуль ничего не меняет в сетке,
//! а лишь считает, насколько карта связна:
//! - число 4-связных областей проходимых клеток;
//! - число проходимых клеток, недостижимых от входа.

use crate::tile::{TileGrid, TileType};
use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::Bfs;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConnectivityReport {
    pub walkable_tiles: usize,
    pub regions: usize,
    /// Проходимые клетки вне области входа (все, если входа нет)
    pub unreachable_from_start: usize,
}

impl ConnectivityReport {
    #[must_use]
    pub fn is_fully_connected(&self) -> bool {
        self.regions <= 1
    }
}

/// Граф смежности проходимых клеток: узел хранит координаты клетки
#[must_use]
pub fn build_walkable_graph(grid: &TileGrid) -> UnGraph<(u32, u32), ()> {
    let mut graph = UnGraph::new_undirected();
    let mut cell_to_node: Vec<Option<NodeIndex>> = vec![None; grid.tiles().len()];

    for (idx, tile) in grid.tiles().iter().enumerate() {
        if tile.is_walkable {
            cell_to_node[idx] = Some(graph.add_node((tile.x, tile.y)));
        }
    }

    let width = grid.width() as usize;
    for (idx, node) in cell_to_node.iter().enumerate() {
        let Some(node) = *node else { continue };
        // Достаточно правого и нижнего соседа: граф неориентированный
        if (idx + 1) % width != 0 {
            if let Some(right) = cell_to_node[idx + 1] {
                graph.add_edge(node, right, ());
            }
        }
        if let Some(Some(below)) = cell_to_node.get(idx + width) {
            graph.add_edge(node, *below, ());
        }
    }
    graph
}

#[must_use]
pub fn analyze(grid: &TileGrid) -> ConnectivityReport {
    let graph = build_walkable_graph(grid);
    let walkable_tiles = graph.node_count();
    if walkable_tiles == 0 {
        return ConnectivityReport::default();
    }

    let start = graph.node_indices().find(|&n| {
        let (x, y) = graph[n];
        grid.get(x, y).is_some_and(|t| t.kind == TileType::Start)
    });

    let reachable = start.map_or(0, |start| {
        let mut bfs = Bfs::new(&graph, start);
        let mut count = 0;
        while bfs.next(&graph).is_some() {
            count += 1;
        }
        count
    });

    ConnectivityReport {
        walkable_tiles,
        regions: connected_components(&graph),
        unreachable_from_start: walkable_tiles - reachable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_wall_grid_has_no_regions() {
        let report = analyze(&TileGrid::new(5, 5));
        assert_eq!(report, ConnectivityReport::default());
        assert!(report.is_fully_connected());
    }

    #[test]
    fn separate_pockets_are_counted() {
        let mut grid = TileGrid::new(5, 3);
        grid.set(0, 0, TileType::Start);
        grid.set(1, 0, TileType::Floor);
        grid.set(4, 2, TileType::Exit);

        let report = analyze(&grid);
        assert_eq!(report.walkable_tiles, 3);
        assert_eq!(report.regions, 2);
        assert_eq!(report.unreachable_from_start, 1);
        assert!(!report.is_fully_connected());
    }

    #[test]
    fn rows_do_not_wrap_into_each_other() {
        let mut grid = TileGrid::new(3, 2);
        grid.set(2, 0, TileType::Floor);
        grid.set(0, 1, TileType::Floor);
        assert_eq!(analyze(&grid).regions, 2);
    }

    #[test]
    fn without_start_everything_is_unreachable() {
        let mut grid = TileGrid::new(2, 2);
        grid.set(0, 0, TileType::Floor);
        grid.set(0, 1, TileType::Floor);
        let report = analyze(&grid);
        assert_eq!(report.regions, 1);
        assert_eq!(report.unreachable_from_start, 2);
    }
}
