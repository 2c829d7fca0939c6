//! Core-Datenmodelle für AutoDrive-Konfigurationen
//!
//! Dieses Modul definiert die Haupt-Datenstrukturen:
//! - RoadMap: Container für alle Nodes, Connections und Marker
//! - MapNode: Einzelner Wegpunkt mit Position und Flag
//! - Connection: Klassifizierte Verbindung zwischen zwei Nodes

pub mod connection;
pub mod map_marker;
pub mod node;
pub mod road_map;

pub use connection::{Connection, ConnectionDirection, ConnectionPriority};
pub use map_marker::MapMarker;
pub use node::{MapNode, NodeFlag};
pub use road_map::RoadMap;
