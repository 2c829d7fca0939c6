//! Batch-Pipeline: verarbeitet alle Configs eines Ordners nacheinander.
//!
//! Fehler sind config-bezogen: scheitert eine Config in einer Stufe, wird sie
//! mit Config-Name und Stufe geloggt und die nächste Config verarbeitet. Nur
//! die gemeinsame modDesc.xml wird über alle Configs hinweg fortgeschrieben.

use crate::emit::descriptor::generate_descriptor;
use crate::emit::i3d::generate_i3d;
use crate::emit::mod_desc::{prepare_mod, update_mod_desc};
use crate::emit::style::StyleTable;
use crate::error::GenError;
use crate::shared::GeneratorOptions;
use crate::xml::parse_autodrive_config;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Einmal geladene Template-Inhalte
struct Templates {
    i3d: String,
    descriptor: String,
}

/// Führt den kompletten Generator-Lauf aus
pub fn run(options: &GeneratorOptions) -> Result<()> {
    let mod_desc_path =
        prepare_mod(options).context("Mod-Ordner konnte nicht vorbereitet werden")?;

    let templates = Templates {
        i3d: std::fs::read_to_string(&options.i3d_template).with_context(|| {
            format!(
                "i3d-Template '{}' konnte nicht gelesen werden",
                options.i3d_template.display()
            )
        })?,
        descriptor: std::fs::read_to_string(&options.descriptor_template).with_context(|| {
            format!(
                "Descriptor-Template '{}' konnte nicht gelesen werden",
                options.descriptor_template.display()
            )
        })?,
    };

    let config_files = discover_configs(&options.config_dir)?;
    if config_files.is_empty() {
        log::warn!(
            "Keine Config-XMLs in '{}' gefunden",
            options.config_dir.display()
        );
        return Ok(());
    }

    let mut failed = 0usize;
    for config_path in &config_files {
        let base_name = match config_path.file_stem().and_then(|stem| stem.to_str()) {
            Some(stem) => stem.to_string(),
            None => {
                log::error!("Ungueltiger Dateiname: {}", config_path.display());
                failed += 1;
                continue;
            }
        };

        match process_config(options, &templates, &mod_desc_path, config_path, &base_name) {
            Ok(()) => log::info!("Config '{}' fertig", base_name),
            Err(err) => {
                log::error!("Config '{}' uebersprungen: {:#}", base_name, err);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        log::warn!(
            "{} von {} Configs fehlgeschlagen",
            failed,
            config_files.len()
        );
    }

    Ok(())
}

/// Sammelt alle `.xml`-Dateien des Config-Ordners, sortiert für
/// deterministische Verarbeitungs-Reihenfolge.
fn discover_configs(config_dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(config_dir).with_context(|| {
        format!(
            "Config-Ordner '{}' konnte nicht gelesen werden",
            config_dir.display()
        )
    })?;

    let mut config_files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case("xml"))
                    .unwrap_or(false)
        })
        .collect();

    config_files.sort();
    Ok(config_files)
}

/// Verarbeitet eine einzelne Config komplett (alle Ausgabe-Dateien)
fn process_config(
    options: &GeneratorOptions,
    templates: &Templates,
    mod_desc_path: &Path,
    config_path: &Path,
    base_name: &str,
) -> Result<()> {
    let config_xml = std::fs::read_to_string(config_path)
        .with_context(|| format!("Config '{}' konnte nicht gelesen werden", config_path.display()))?;

    let road_map =
        parse_autodrive_config(&config_xml).context("Parsen der Config fehlgeschlagen")?;
    log::info!(
        "Config '{}': {} Nodes, {} Verbindungen, {} Marker",
        base_name,
        road_map.node_count(),
        road_map.connection_count(),
        road_map.map_markers.len()
    );

    let i3d_bytes = generate_i3d(&templates.i3d, &road_map, base_name, StyleTable::fs25())
        .context("i3d-Generierung fehlgeschlagen")?;
    std::fs::write(
        options.mod_folder.join(format!("{}.i3d", base_name)),
        i3d_bytes,
    )
    .context("i3d-Datei konnte nicht geschrieben werden")?;

    // Shapes-Datei ist optional: fehlt sie, wird nur gewarnt
    if options.shapes_template.is_file() {
        std::fs::copy(
            &options.shapes_template,
            options.mod_folder.join(format!("{}.i3d.shapes", base_name)),
        )
        .context("Shapes-Datei konnte nicht kopiert werden")?;
    } else {
        log::warn!(
            "{}",
            GenError::MissingOptionalAsset {
                path: options.shapes_template.clone(),
            }
        );
    }

    let descriptor = generate_descriptor(
        &templates.descriptor,
        &config_xml,
        base_name,
        &road_map,
        &options.placeholder_token,
    )
    .context("Descriptor-Generierung fehlgeschlagen")?;
    std::fs::write(
        options.mod_folder.join(format!("{}.xml", base_name)),
        descriptor,
    )
    .context("Descriptor-Datei konnte nicht geschrieben werden")?;

    update_mod_desc(mod_desc_path, base_name).context("modDesc-Update fehlgeschlagen")?;

    let store_icon = format!(
        "store_{}{}",
        base_name,
        options
            .icon_file
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default()
    );
    std::fs::copy(&options.icon_file, options.mod_folder.join(store_icon))
        .context("Store-Icon konnte nicht kopiert werden")?;

    Ok(())
}
