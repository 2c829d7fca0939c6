/// Integration-Tests für den Batch-Lauf (Fehler-Isolation, optionale Artefakte)
use fs25_auto_drive_placeable_gen::emit::pipeline;
use fs25_auto_drive_placeable_gen::{Element, GeneratorOptions};
use std::path::PathBuf;

const CONFIG: &str = include_str!("fixtures/simple_config.xml");
const I3D_TEMPLATE: &str = include_str!("fixtures/placeholder.i3d");
const XML_TEMPLATE: &str = include_str!("fixtures/placeholder.xml");
const MOD_DESC: &str = include_str!("fixtures/modDesc.xml");

/// Config mit abweichenden Feld-Längen (id: 2 Werte, x: 1 Wert)
const BROKEN_CONFIG: &str = r#"<?xml version="1.0" encoding="utf-8" standalone="no"?>
<AutoDrive version="3">
    <waypoints>
        <id>1,2</id>
        <x>0</x>
        <y>0,0</y>
        <z>0,5</z>
        <out>-1;-1</out>
        <incoming>;</incoming>
        <flags>0,0</flags>
    </waypoints>
</AutoDrive>
"#;

/// Legt einen frischen Arbeitsordner unter dem System-Temp-Verzeichnis an
/// und befüllt ihn mit Templates und zwei Configs (eine kaputt, eine gut).
/// Die Shapes-Datei wird absichtlich nicht angelegt.
fn setup(test_name: &str) -> (PathBuf, GeneratorOptions) {
    let base = std::env::temp_dir().join(format!(
        "fs25_placeable_gen_{}_{}",
        test_name,
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&base);

    let config_dir = base.join("configs");
    let template_dir = base.join("placeholders");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::create_dir_all(&template_dir).unwrap();

    std::fs::write(config_dir.join("aaa_kaputt.xml"), BROKEN_CONFIG).unwrap();
    std::fs::write(config_dir.join("bbb_gut.xml"), CONFIG).unwrap();
    std::fs::write(template_dir.join("placeholder.i3d"), I3D_TEMPLATE).unwrap();
    std::fs::write(template_dir.join("placeholder.xml"), XML_TEMPLATE).unwrap();
    std::fs::write(template_dir.join("modDesc.xml"), MOD_DESC).unwrap();
    std::fs::write(template_dir.join("icon.dds"), b"dds-dummy").unwrap();

    let options = GeneratorOptions {
        config_dir,
        i3d_template: template_dir.join("placeholder.i3d"),
        shapes_template: template_dir.join("placeholder.i3d.shapes"),
        descriptor_template: template_dir.join("placeholder.xml"),
        mod_desc_template: template_dir.join("modDesc.xml"),
        icon_file: template_dir.join("icon.dds"),
        mod_folder: base.join("FS25_test_mod"),
        placeholder_token: "PLACEHOLDER".to_string(),
    };
    (base, options)
}

#[test]
fn test_kaputte_config_blockiert_folgende_configs_nicht() {
    let (base, options) = setup("isolation");

    pipeline::run(&options).unwrap();

    // Die kaputte Config (alphabetisch zuerst) hinterlässt keine Artefakte
    let mod_folder = &options.mod_folder;
    assert!(!mod_folder.join("aaa_kaputt.i3d").exists());
    assert!(!mod_folder.join("aaa_kaputt.xml").exists());

    // Die gültige danach wird vollständig verarbeitet
    assert!(mod_folder.join("bbb_gut.i3d").exists());
    assert!(mod_folder.join("bbb_gut.xml").exists());
    assert!(mod_folder.join("store_bbb_gut.dds").exists());
    assert!(mod_folder.join("icon_FS25_test_mod.dds").exists());

    // modDesc führt genau einen Eintrag, nur für die gültige Config
    let mod_desc = std::fs::read_to_string(mod_folder.join("modDesc.xml")).unwrap();
    let root = Element::parse(&mod_desc).unwrap();
    let store_items = root.find_child("storeItems").unwrap();
    let filenames: Vec<_> = store_items
        .child_elements()
        .filter_map(|item| item.attr("xmlFilename"))
        .collect();
    assert_eq!(filenames, vec!["bbb_gut.xml"]);
    assert_eq!(root.find_child("l10n").unwrap().child_elements().count(), 1);

    let _ = std::fs::remove_dir_all(&base);
}

#[test]
fn test_fehlende_shapes_datei_ist_kein_abbruch() {
    let (base, options) = setup("shapes");

    pipeline::run(&options).unwrap();

    // Szene und Descriptor entstehen trotzdem, nur die Shapes-Kopie fehlt
    let mod_folder = &options.mod_folder;
    assert!(mod_folder.join("bbb_gut.i3d").exists());
    assert!(mod_folder.join("bbb_gut.xml").exists());
    assert!(!mod_folder.join("bbb_gut.i3d.shapes").exists());

    let _ = std::fs::remove_dir_all(&base);
}
