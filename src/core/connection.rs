//! Repräsentiert eine Verbindung zwischen zwei Wegpunkten.

use glam::{Vec2, Vec3};

/// Richtung der Verbindung
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionDirection {
    /// Einfache Einbahnstraße
    #[default]
    Regular,
    /// Zweispurige Verbindung (beide Richtungen)
    Dual,
    /// Tote Verbindung: das Ziel führt die Quelle nicht als incoming
    Reverse,
}

/// Priorität der Verbindung
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionPriority {
    /// Normale Verbindung
    #[default]
    Regular,
    /// Subpriorisiert: mindestens ein Endpunkt hat ein gesetztes Flag
    SubPriority,
}

/// Eine Verbindung zwischen zwei Wegpunkten inklusive abgeleiteter Geometrie
#[derive(Debug, Clone)]
pub struct Connection {
    /// Start-Node-ID
    pub start_id: u64,
    /// End-Node-ID
    pub end_id: u64,
    /// Richtung der Verbindung
    pub direction: ConnectionDirection,
    /// Priorität der Verbindung
    pub priority: ConnectionPriority,
    /// Mittelpunkt der Verbindung (3D, arithmetisches Mittel beider Endpunkte)
    pub midpoint: Vec3,
    /// Länge in der Bodenebene (x/z; die Höhe geht nicht ein, da die Linien
    /// als flache Bodenmarker gerendert werden)
    pub length: f32,
    /// Y-Rotation in Grad: atan2(dx, dz) nach GIANTS-Konvention
    pub yaw_deg: f32,
}

impl Connection {
    /// Erstellt eine neue Verbindung und berechnet die Geometrie
    pub fn new(
        start_id: u64,
        end_id: u64,
        direction: ConnectionDirection,
        priority: ConnectionPriority,
        start_pos: Vec3,
        end_pos: Vec3,
    ) -> Self {
        let (midpoint, length, yaw_deg) = Self::calculate_geometry(start_pos, end_pos);

        Self {
            start_id,
            end_id,
            direction,
            priority,
            midpoint,
            length,
            yaw_deg,
        }
    }

    fn calculate_geometry(start_pos: Vec3, end_pos: Vec3) -> (Vec3, f32, f32) {
        let midpoint = (start_pos + end_pos) * 0.5;
        let delta = end_pos - start_pos;
        let length = Vec2::new(delta.x, delta.z).length();
        let yaw_deg = delta.x.atan2(delta.z).to_degrees();

        (midpoint, length, yaw_deg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn conn(start: Vec3, end: Vec3) -> Connection {
        Connection::new(
            1,
            2,
            ConnectionDirection::Regular,
            ConnectionPriority::Regular,
            start,
            end,
        )
    }

    #[test]
    fn test_geometry_along_x_axis() {
        let c = conn(Vec3::new(0.0, 0.0, 0.0), Vec3::new(10.0, 0.0, 0.0));
        assert_relative_eq!(c.midpoint.x, 5.0);
        assert_relative_eq!(c.midpoint.y, 0.0);
        assert_relative_eq!(c.midpoint.z, 0.0);
        assert_relative_eq!(c.length, 10.0);
        assert_relative_eq!(c.yaw_deg, 90.0, epsilon = 1e-4);
    }

    #[test]
    fn test_length_ignores_height() {
        // Höhenunterschied darf die Bodenlänge nicht beeinflussen
        let c = conn(Vec3::new(0.0, 5.0, 0.0), Vec3::new(3.0, 50.0, 4.0));
        assert_relative_eq!(c.length, 5.0);
        assert_relative_eq!(c.midpoint.y, 27.5);
    }

    #[test]
    fn test_swapped_endpoints_flip_yaw_by_180() {
        let a = Vec3::new(-3.0, 1.0, 7.5);
        let b = Vec3::new(12.0, 2.0, -4.0);
        let forward = conn(a, b);
        let backward = conn(b, a);

        assert_relative_eq!(forward.midpoint.x, backward.midpoint.x);
        assert_relative_eq!(forward.midpoint.y, backward.midpoint.y);
        assert_relative_eq!(forward.midpoint.z, backward.midpoint.z);
        assert_relative_eq!(forward.length, backward.length);

        let diff = (forward.yaw_deg - backward.yaw_deg).rem_euclid(360.0);
        assert_relative_eq!(diff, 180.0, epsilon = 1e-4);
    }

    #[test]
    fn test_self_loop_is_degenerate() {
        let p = Vec3::new(4.0, 0.0, 4.0);
        let c = conn(p, p);
        assert_relative_eq!(c.length, 0.0);
        assert_relative_eq!(c.midpoint.x, 4.0);
    }
}
