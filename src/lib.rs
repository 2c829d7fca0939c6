//! FS25 AutoDrive Placeable Generator Library.
//! Core-Funktionalität als Library exportiert für Tests und Wiederverwendung.

pub mod core;
pub mod emit;
pub mod error;
pub mod shared;
pub mod xml;

pub use core::{
    Connection, ConnectionDirection, ConnectionPriority, MapMarker, MapNode, NodeFlag, RoadMap,
};
pub use emit::{generate_descriptor, generate_i3d, prepare_mod, update_mod_desc, StyleTable};
pub use error::GenError;
pub use shared::GeneratorOptions;
pub use xml::{parse_autodrive_config, Element, XmlNode};
