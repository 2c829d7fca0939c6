//! Zentrale Konfiguration für den Generator.
//!
//! `GeneratorOptions` enthält alle Pfade und das Platzhalter-Token.
//! Die Standardwerte entsprechen dem klassischen Projekt-Layout
//! (`configs/` + `placeholders/` neben der Binary).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Reserviertes Token, das in den Templates durch den Config-Namen ersetzt wird
pub const DEFAULT_PLACEHOLDER_TOKEN: &str = "PLACEHOLDER";

/// Alle Laufzeit-Optionen des Generators.
/// Wird als `fs25_placeable_gen.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorOptions {
    /// Ordner mit den AutoDrive-Config-XMLs
    pub config_dir: PathBuf,
    /// Szenen-Template (i3d)
    pub i3d_template: PathBuf,
    /// Externe Shapes-Datei (optional, wird unverändert kopiert)
    pub shapes_template: PathBuf,
    /// Placeable-XML-Template
    pub descriptor_template: PathBuf,
    /// modDesc-Template
    pub mod_desc_template: PathBuf,
    /// Store-Icon
    pub icon_file: PathBuf,
    /// Ziel-Ordner des Mods
    pub mod_folder: PathBuf,
    /// Platzhalter-Token in den Templates
    #[serde(default = "default_placeholder_token")]
    pub placeholder_token: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            config_dir: PathBuf::from("configs"),
            i3d_template: PathBuf::from("placeholders").join("placeholder.i3d"),
            shapes_template: PathBuf::from("placeholders").join("placeholder.i3d.shapes"),
            descriptor_template: PathBuf::from("placeholders").join("placeholder.xml"),
            mod_desc_template: PathBuf::from("placeholders").join("modDesc.xml"),
            icon_file: PathBuf::from("placeholders").join("icon.dds"),
            mod_folder: PathBuf::from("FS25_autodrive_placeables"),
            placeholder_token: DEFAULT_PLACEHOLDER_TOKEN.to_string(),
        }
    }
}

/// Serde-Default für `placeholder_token` (Abwärtskompatibilität bestehender TOML-Dateien)
fn default_placeholder_token() -> String {
    DEFAULT_PLACEHOLDER_TOKEN.to_string()
}

impl GeneratorOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(options) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    options
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| PathBuf::from("fs25_placeable_gen"))
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join("fs25_placeable_gen.toml")
    }

    /// Name des Mod-Ordners (letzte Pfad-Komponente), z.B. für das Icon
    pub fn mod_folder_name(&self) -> &str {
        self.mod_folder
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("FS25_autodrive_placeables")
    }
}
