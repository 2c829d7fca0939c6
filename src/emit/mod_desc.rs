//! Pflege der gemeinsamen modDesc.xml.
//!
//! `prepare_mod` legt den Mod-Ordner einmalig an, `update_mod_desc` hängt pro
//! verarbeiteter Config einen l10n- und einen storeItem-Eintrag an. Die Datei
//! wächst bewusst nur: doppelte Aufrufe für denselben Namen erzeugen doppelte
//! Einträge (dokumentierte Eigenschaft, keine Deduplizierung).

use crate::error::GenError;
use crate::shared::GeneratorOptions;
use crate::xml::{Element, XML_DECL_UTF8};
use anyhow::{Context, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Legt den Mod-Ordner an, kopiert modDesc-Template und Icon hinein und
/// ersetzt das Token im `<iconFilename>` (Fehlen des Tokens ist hier harmlos).
///
/// Liefert den Pfad der modDesc.xml im Mod-Ordner.
pub fn prepare_mod(options: &GeneratorOptions) -> Result<PathBuf> {
    std::fs::create_dir_all(&options.mod_folder).with_context(|| {
        format!(
            "Mod-Ordner '{}' konnte nicht angelegt werden",
            options.mod_folder.display()
        )
    })?;

    let mod_desc_path = options.mod_folder.join(
        options
            .mod_desc_template
            .file_name()
            .context("modDesc-Template hat keinen Dateinamen")?,
    );
    std::fs::copy(&options.mod_desc_template, &mod_desc_path).with_context(|| {
        format!(
            "modDesc-Template '{}' konnte nicht kopiert werden",
            options.mod_desc_template.display()
        )
    })?;

    let icon_name = format!(
        "icon_{}{}",
        options.mod_folder_name(),
        icon_extension(&options.icon_file)
    );
    std::fs::copy(&options.icon_file, options.mod_folder.join(&icon_name)).with_context(|| {
        format!(
            "Icon '{}' konnte nicht kopiert werden",
            options.icon_file.display()
        )
    })?;

    let content = std::fs::read_to_string(&mod_desc_path)?;
    let mut root = Element::parse(&content).context("modDesc-Template ist kein gueltiges XML")?;

    if let Some(icon_filename) = root.find_child_mut("iconFilename") {
        icon_filename.replace_in_text(&options.placeholder_token, options.mod_folder_name());
    }

    std::fs::write(&mod_desc_path, root.to_xml_string(XML_DECL_UTF8))?;
    Ok(mod_desc_path)
}

/// Hängt die Store-Einträge für eine Config an die modDesc.xml an
pub fn update_mod_desc(mod_desc_path: &Path, config_name: &str) -> Result<()> {
    let content = std::fs::read_to_string(mod_desc_path).with_context(|| {
        format!("modDesc '{}' konnte nicht gelesen werden", mod_desc_path.display())
    })?;
    let mut root = Element::parse(&content)?;

    append_store_entries(&mut root, config_name)?;

    std::fs::write(mod_desc_path, root.to_xml_string(XML_DECL_UTF8)).with_context(|| {
        format!(
            "modDesc '{}' konnte nicht geschrieben werden",
            mod_desc_path.display()
        )
    })?;
    Ok(())
}

/// Fügt einen l10n-Text und einen storeItem-Verweis an (reine Baum-Operation)
pub fn append_store_entries(mod_desc: &mut Element, config_name: &str) -> Result<()> {
    let l10n = mod_desc
        .find_child_mut("l10n")
        .ok_or_else(|| GenError::TemplateAnchorMissing {
            anchor: "l10n".to_string(),
        })?;

    let mut text = Element::new("text");
    text.set_attr("name", format!("storeItem_{}", config_name));
    let mut en = Element::new("en");
    en.set_text(display_name(config_name));
    text.push_element(en);
    l10n.push_element(text);

    let store_items =
        mod_desc
            .find_child_mut("storeItems")
            .ok_or_else(|| GenError::TemplateAnchorMissing {
                anchor: "storeItems".to_string(),
            })?;

    let mut store_item = Element::new("storeItem");
    store_item.set_attr("xmlFilename", format!("{}.xml", config_name));
    store_items.push_element(store_item);

    Ok(())
}

/// Anzeigename: Läufe von Nicht-Wort-Zeichen werden zu einzelnen Leerzeichen
fn display_name(config_name: &str) -> String {
    static NON_WORD: OnceLock<Regex> = OnceLock::new();
    let regex = NON_WORD.get_or_init(|| Regex::new(r"\W+").expect("statisches Regex"));
    regex.replace_all(config_name, " ").into_owned()
}

fn icon_extension(icon_file: &Path) -> String {
    icon_file
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}
