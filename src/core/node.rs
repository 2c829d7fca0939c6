//! Einzelner Wegpunkt mit Position und Flag.

use glam::Vec3;

/// Flag eines Wegpunkts (bestimmt die Darstellungs-Priorität der angrenzenden Linien)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeFlag {
    /// Normaler Wegpunkt (Flag 0)
    #[default]
    Regular,
    /// Subpriorisierter Wegpunkt (Flag != 0)
    SubPrio,
}

impl NodeFlag {
    /// Konvertiert den Flag-Rohwert aus der Config
    pub fn from_u32(value: u32) -> Self {
        if value == 0 {
            NodeFlag::Regular
        } else {
            NodeFlag::SubPrio
        }
    }

    /// true, wenn der Wegpunkt subpriorisiert ist
    pub fn is_subprio(self) -> bool {
        self == NodeFlag::SubPrio
    }
}

/// Ein Wegpunkt aus der AutoDrive-Config
#[derive(Debug, Clone)]
pub struct MapNode {
    /// Eindeutige ID aus der Config
    pub id: u64,
    /// Position in Weltkoordinaten (x, y, z)
    pub position: Vec3,
    /// Flag des Wegpunkts
    pub flag: NodeFlag,
}

impl MapNode {
    /// Erstellt einen neuen Wegpunkt
    pub fn new(id: u64, position: Vec3, flag: NodeFlag) -> Self {
        Self { id, position, flag }
    }

    /// Abstand zum Ursprung in der Bodenebene (y wird ignoriert)
    pub fn planar_distance_to_origin(&self) -> f32 {
        glam::Vec2::new(self.position.x, self.position.z).length()
    }
}
