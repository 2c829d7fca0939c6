//! FS25 AutoDrive Placeable Generator.
//!
//! Liest AutoDrive-Wegpunkt-Configs und erzeugt daraus einen platzierbaren
//! Mod: i3d-Szene, Placeable-XML, Shapes-Kopie und modDesc-Einträge.

use fs25_auto_drive_placeable_gen::{emit, GeneratorOptions};
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!(
        "FS25 AutoDrive Placeable Generator v{} startet...",
        env!("CARGO_PKG_VERSION")
    );

    // Optionen aus TOML laden (oder Standardwerte); erstes Argument
    // überschreibt den Pfad der Optionen-Datei
    let options_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(GeneratorOptions::config_path);
    let options = GeneratorOptions::load_from_file(&options_path);

    emit::pipeline::run(&options)
}
