//! Beschreibt einen Map-Marker aus der AutoDrive-Config.

/// Ein Map-Marker verweist auf einen Node und erscheint im Spiel als Ziel.
#[derive(Debug, Clone)]
pub struct MapMarker {
    /// Node-ID des Markers
    pub id: u64,
    /// Anzeigename
    pub name: String,
    /// Marker-Gruppe
    pub group: String,
    /// Laufende Nummer im XML (mm1, mm2, ...)
    pub marker_index: u32,
}

impl MapMarker {
    /// Erstellt einen neuen Map-Marker
    pub fn new(id: u64, name: String, group: String, marker_index: u32) -> Self {
        Self {
            id,
            name,
            group,
            marker_index,
        }
    }
}
