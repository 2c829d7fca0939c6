//! Die zentrale RoadMap-Datenstruktur mit Nodes, Connections und Markern.

use super::{Connection, MapMarker, MapNode};
use indexmap::IndexMap;

/// Vollständige AutoDrive-Konfiguration
///
/// Nodes behalten die Reihenfolge aus der Config (IndexMap), damit die
/// generierten Dateien bei gleicher Eingabe byte-identisch bleiben.
#[derive(Debug, Clone)]
pub struct RoadMap {
    /// Alle Wegpunkte in Config-Reihenfolge, indexiert nach ihrer ID
    pub nodes: IndexMap<u64, MapNode>,
    /// Alle klassifizierten Verbindungen in Emissions-Reihenfolge
    pub connections: Vec<Connection>,
    /// Alle Map-Marker
    pub map_markers: Vec<MapMarker>,
    /// Version der Config (3 = FS25, Legacy: 1 = FS19, 2 = FS22)
    pub version: u32,
    /// Name der Map (optional)
    pub map_name: Option<String>,
}

impl RoadMap {
    /// Erstellt eine neue leere RoadMap
    pub fn new(version: u32) -> Self {
        Self {
            nodes: IndexMap::new(),
            connections: Vec::new(),
            map_markers: Vec::new(),
            version,
            map_name: None,
        }
    }

    /// Anzahl der Wegpunkte
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Anzahl der Verbindungen
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// true, wenn die Config eigene Map-Marker mitbringt
    pub fn has_markers(&self) -> bool {
        !self.map_markers.is_empty()
    }

    /// ID des Wegpunkts mit dem kleinsten Bodenabstand zum Ursprung.
    ///
    /// Bei Gleichstand gewinnt der zuerst in der Config gelistete Node.
    /// Wird als Standard-Marker verwendet, wenn die Config keine Marker hat.
    pub fn nearest_to_origin(&self) -> Option<u64> {
        let mut best: Option<(u64, f32)> = None;

        for node in self.nodes.values() {
            let distance = node.planar_distance_to_origin();
            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((node.id, distance)),
            }
        }

        best.map(|(id, _)| id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NodeFlag;
    use glam::Vec3;

    fn road_map_with(positions: &[(u64, f32, f32)]) -> RoadMap {
        let mut road_map = RoadMap::new(3);
        for &(id, x, z) in positions {
            road_map
                .nodes
                .insert(id, MapNode::new(id, Vec3::new(x, 0.0, z), NodeFlag::Regular));
        }
        road_map
    }

    #[test]
    fn test_nearest_to_origin_picks_minimum() {
        let road_map = road_map_with(&[(1, 100.0, 0.0), (2, 3.0, 4.0), (3, -80.0, 5.0)]);
        assert_eq!(road_map.nearest_to_origin(), Some(2));
    }

    #[test]
    fn test_nearest_to_origin_keeps_first_on_tie() {
        let road_map = road_map_with(&[(7, 5.0, 0.0), (8, 0.0, 5.0)]);
        assert_eq!(road_map.nearest_to_origin(), Some(7));
    }

    #[test]
    fn test_nearest_to_origin_empty() {
        let road_map = RoadMap::new(3);
        assert_eq!(road_map.nearest_to_origin(), None);
    }
}
