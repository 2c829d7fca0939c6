//! Stil-Tabelle für die generierte i3d-Szene.
//!
//! Alle Material-/Shape-IDs und Offsets liegen als Daten in einer Tabelle,
//! damit ein weiteres Ziel-Szenenformat nur eine zweite Tabelle braucht und
//! nie einen zweiten Code-Pfad.

use crate::core::{ConnectionDirection, ConnectionPriority};

/// Darstellung einer Linien-Klasse im i3d
#[derive(Debug, Clone, Copy)]
pub struct LineStyle {
    /// Linien-Name (Farbe), taucht in den Shape-Namen auf
    pub name: &'static str,
    /// materialIds-Attribut
    pub material_id: u32,
    /// shapeId-Attribut (verweist in die externe Shapes-Datei)
    pub shape_id: u32,
    /// Richtungs-Pfeile anhängen?
    pub has_arrows: bool,
}

/// Darstellung der Wegpunkt-Marker ("Beams")
#[derive(Debug, Clone, Copy)]
pub struct BeamStyle {
    /// shapeId-Attribut
    pub shape_id: u32,
    /// materialIds-Attribut
    pub material_id: u32,
    /// scale-Attribut (schmale, hohe Säule)
    pub scale: &'static str,
}

/// Komplette Stil-Tabelle für ein Ziel-Szenenformat
#[derive(Debug, Clone, Copy)]
pub struct StyleTable {
    /// Wegpunkt-Marker
    pub beam: BeamStyle,
    /// Bidirektional, keine Flags (blau)
    pub dual: LineStyle,
    /// Bidirektional, mindestens ein Flag (braun)
    pub dual_subprio: LineStyle,
    /// Einbahn, keine Flags (grün)
    pub regular: LineStyle,
    /// Einbahn, mindestens ein Flag (gelb)
    pub regular_subprio: LineStyle,
    /// Tote Kante (cyan), Flags spielen keine Rolle
    pub reverse: LineStyle,
    /// Startwert des nodeId-Zählers für generierte Shapes
    pub node_id_base: u32,
    /// Festes nodeId-Attribut der "beams"-Gruppe
    pub beams_group_node_id: u32,
    /// Festes nodeId-Attribut der "lines"-Gruppe
    pub lines_group_node_id: u32,
    /// translation-Attribut der "lines"-Gruppe (leicht über dem Boden)
    pub lines_group_translation: &'static str,
    /// clipDistance-Attribut aller generierten Shapes
    pub clip_distance: u32,
}

/// Stil-Tabelle für Farming Simulator 25
const FS25: StyleTable = StyleTable {
    beam: BeamStyle {
        shape_id: 3,
        material_id: 228,
        scale: "0.1 2 0.1",
    },
    dual: LineStyle {
        name: "blue",
        material_id: 229,
        shape_id: 6,
        has_arrows: false,
    },
    dual_subprio: LineStyle {
        name: "brown",
        material_id: 230,
        shape_id: 5,
        has_arrows: false,
    },
    regular: LineStyle {
        name: "green",
        material_id: 232,
        shape_id: 4,
        has_arrows: true,
    },
    regular_subprio: LineStyle {
        name: "yellow",
        material_id: 234,
        shape_id: 7,
        has_arrows: true,
    },
    reverse: LineStyle {
        name: "cyan",
        material_id: 231,
        shape_id: 8,
        has_arrows: true,
    },
    node_id_base: 1000,
    beams_group_node_id: 974,
    lines_group_node_id: 975,
    lines_group_translation: "0.0 0.9 0.0",
    clip_distance: 300,
};

impl StyleTable {
    /// Tabelle für FS25
    pub fn fs25() -> &'static StyleTable {
        &FS25
    }

    /// Wählt den Linien-Stil für eine klassifizierte Kante
    pub fn line_style(&self, direction: ConnectionDirection, priority: ConnectionPriority) -> &LineStyle {
        match (direction, priority) {
            (ConnectionDirection::Dual, ConnectionPriority::Regular) => &self.dual,
            (ConnectionDirection::Dual, ConnectionPriority::SubPriority) => &self.dual_subprio,
            (ConnectionDirection::Regular, ConnectionPriority::Regular) => &self.regular,
            (ConnectionDirection::Regular, ConnectionPriority::SubPriority) => {
                &self.regular_subprio
            }
            (ConnectionDirection::Reverse, _) => &self.reverse,
        }
    }
}
