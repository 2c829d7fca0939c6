//! Erzeugung der Ausgabe-Artefakte.
//!
//! - `i3d`: Szenen-Datei mit Markern und Linien
//! - `descriptor`: Placeable-XML aus dem Template
//! - `mod_desc`: gemeinsame modDesc.xml
//! - `pipeline`: Batch-Lauf über alle Configs
//! - `style`: Daten-Tabelle mit Material-/Shape-IDs

pub mod descriptor;
pub mod i3d;
pub mod mod_desc;
pub mod pipeline;
pub mod style;

pub use descriptor::generate_descriptor;
pub use i3d::generate_i3d;
pub use mod_desc::{prepare_mod, update_mod_desc};
pub use style::{BeamStyle, LineStyle, StyleTable};
