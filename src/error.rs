//! Fehler-Taxonomie des Generators.
//!
//! Alle Fehler sind config-bezogen: ein fehlgeschlagener Durchlauf darf die
//! Verarbeitung der übrigen Configs nicht verhindern.

use std::path::PathBuf;
use thiserror::Error;

/// Klassifizierte Generator-Fehler
#[derive(Debug, Error)]
pub enum GenError {
    /// Strukturell ungültige oder inkonsistente Wegpunkt-Daten
    #[error("Ungueltige Config: {0}")]
    MalformedConfig(String),

    /// Pflicht-Einfügepunkt fehlt in einem Template
    #[error("Einfuegepunkt '{anchor}' fehlt im Template")]
    TemplateAnchorMissing { anchor: String },

    /// Platzhalter-Token kommt im Template nicht vor
    #[error("Platzhalter '{token}' kommt im Template nicht vor")]
    PlaceholderNotFound { token: String },

    /// Optionales Artefakt fehlt (Warnung, kein Abbruch)
    #[error("Optionales Artefakt fehlt: {}", path.display())]
    MissingOptionalAsset { path: PathBuf },
}
