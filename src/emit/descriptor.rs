//! Erzeugt die Placeable-XML aus dem Descriptor-Template.
//!
//! Das Template enthält das Platzhalter-Token in Text-Knoten (Dateinamen,
//! Store-Namen); alle Vorkommen werden durch den Config-Namen ersetzt und der
//! Wegpunkt-Teilbaum der Config wird frisch eingehängt.

use crate::core::RoadMap;
use crate::error::GenError;
use crate::xml::{Element, XML_DECL_UTF8};
use anyhow::Result;

/// Generiert die Placeable-XML als UTF-8-String.
///
/// `config_xml` ist die unveränderte Config-Datei: ihr `<waypoints>`-Teilbaum
/// wandert wörtlich in die Ausgabe, statt aus der RoadMap re-serialisiert zu
/// werden (Roundtrip-Treue).
pub fn generate_descriptor(
    template_xml: &str,
    config_xml: &str,
    config_name: &str,
    road_map: &RoadMap,
    placeholder_token: &str,
) -> Result<String> {
    let mut root = Element::parse(template_xml)?;

    let replaced = root.replace_in_text(placeholder_token, config_name);
    if replaced == 0 {
        // Ohne Token blieben Pflichtfelder (Dateinamen, Store-Name) ungesetzt
        return Err(GenError::PlaceholderNotFound {
            token: placeholder_token.to_string(),
        }
        .into());
    }

    let mut config_root = Element::parse(config_xml)?;
    let waypoints = config_root
        .take_child("waypoints")
        .ok_or_else(|| GenError::MalformedConfig("<waypoints> fehlt in der Config".to_string()))?;
    let config_markers = config_root.take_child("mapmarker");

    let autodrive =
        root.find_child_mut("AutoDrive")
            .ok_or_else(|| GenError::TemplateAnchorMissing {
                anchor: "AutoDrive".to_string(),
            })?;

    autodrive.take_child("waypoints");

    match config_markers {
        Some(markers) if markers.has_element_children() => {
            // Config bringt eigene Marker mit: Template-Block ersetzen
            autodrive.take_child("mapmarker");
            autodrive.push_element(markers);
        }
        _ => {
            // Kein Marker in der Config: Template-Marker auf den Wegpunkt
            // mit dem kleinsten Bodenabstand zum Ursprung zeigen lassen
            let center_id = road_map.nearest_to_origin().ok_or_else(|| {
                GenError::MalformedConfig("Config enthaelt keine Wegpunkte".to_string())
            })?;

            let marker_id = autodrive
                .find_child_mut("mapmarker")
                .and_then(|markers| markers.find_child_mut("mm1"))
                .and_then(|mm1| mm1.find_child_mut("id"))
                .ok_or_else(|| GenError::TemplateAnchorMissing {
                    anchor: "mapmarker/mm1/id".to_string(),
                })?;

            // AutoDrive schreibt Marker-IDs als Gleitkommazahl
            marker_id.set_text(format!("{:.1}", center_id as f64));
        }
    }

    autodrive.insert_element(0, waypoints);

    Ok(root.to_xml_string(XML_DECL_UTF8))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parse_autodrive_config;

    const TEMPLATE: &str = r#"<placeable>
        <storeData>
            <name>store_PLACEHOLDER</name>
            <filename>PLACEHOLDER.i3d</filename>
        </storeData>
        <AutoDrive>
            <waypoints><id>0</id></waypoints>
            <mapmarker>
                <mm1>
                    <id>1.0</id>
                    <name>Start</name>
                    <group>All</group>
                </mm1>
            </mapmarker>
        </AutoDrive>
    </placeable>"#;

    const CONFIG_WITHOUT_MARKERS: &str = r#"
    <AutoDrive version="3">
        <waypoints>
            <id>1,2</id>
            <x>50,3</x>
            <y>0,0</y>
            <z>0,4</z>
            <out>2;-1</out>
            <incoming>;1</incoming>
            <flags>0,0</flags>
        </waypoints>
        <mapmarker></mapmarker>
    </AutoDrive>
    "#;

    #[test]
    fn test_placeholder_replaced_everywhere() {
        let road_map = parse_autodrive_config(CONFIG_WITHOUT_MARKERS).unwrap();
        let output = generate_descriptor(
            TEMPLATE,
            CONFIG_WITHOUT_MARKERS,
            "Farm_01",
            &road_map,
            "PLACEHOLDER",
        )
        .unwrap();

        assert!(!output.contains("PLACEHOLDER"));
        assert!(output.contains("store_Farm_01"));
        assert!(output.contains("Farm_01.i3d"));
    }

    #[test]
    fn test_waypoints_subtree_is_replaced_at_front() {
        let road_map = parse_autodrive_config(CONFIG_WITHOUT_MARKERS).unwrap();
        let output = generate_descriptor(
            TEMPLATE,
            CONFIG_WITHOUT_MARKERS,
            "Farm_01",
            &road_map,
            "PLACEHOLDER",
        )
        .unwrap();

        let mut root = Element::parse(&output).unwrap();
        let autodrive = root.find_child_mut("AutoDrive").unwrap();
        let first = autodrive.child_elements().next().unwrap();
        assert_eq!(first.name, "waypoints");
        // Wegpunkte der Config, nicht die des Templates
        assert_eq!(first.find_child("id").unwrap().text(), Some("1,2"));
    }

    #[test]
    fn test_default_marker_points_to_nearest_origin_waypoint() {
        let road_map = parse_autodrive_config(CONFIG_WITHOUT_MARKERS).unwrap();
        let output = generate_descriptor(
            TEMPLATE,
            CONFIG_WITHOUT_MARKERS,
            "Farm_01",
            &road_map,
            "PLACEHOLDER",
        )
        .unwrap();

        // Node 2 liegt bei (3, 4) -> Abstand 5, Node 1 bei (50, 0)
        let root = Element::parse(&output).unwrap();
        let id = root
            .find_child("AutoDrive")
            .and_then(|ad| ad.find_child("mapmarker"))
            .and_then(|mm| mm.find_child("mm1"))
            .and_then(|mm1| mm1.find_child("id"))
            .unwrap();
        assert_eq!(id.text(), Some("2.0"));
    }

    #[test]
    fn test_config_markers_replace_template_markers() {
        let config = r#"
        <AutoDrive version="3">
            <waypoints>
                <id>1,2</id>
                <x>50,3</x>
                <y>0,0</y>
                <z>0,4</z>
                <out>2;-1</out>
                <incoming>;1</incoming>
                <flags>0,0</flags>
            </waypoints>
            <mapmarker>
                <mm1><id>1.000000</id><name>Hof</name><group>All</group></mm1>
            </mapmarker>
        </AutoDrive>
        "#;

        let road_map = parse_autodrive_config(config).unwrap();
        let output =
            generate_descriptor(TEMPLATE, config, "Farm_01", &road_map, "PLACEHOLDER").unwrap();

        let root = Element::parse(&output).unwrap();
        let marker_name = root
            .find_child("AutoDrive")
            .and_then(|ad| ad.find_child("mapmarker"))
            .and_then(|mm| mm.find_child("mm1"))
            .and_then(|mm1| mm1.find_child("name"))
            .unwrap();
        assert_eq!(marker_name.text(), Some("Hof"));
    }

    #[test]
    fn test_missing_placeholder_is_an_error() {
        let template = "<placeable><AutoDrive><waypoints/></AutoDrive></placeable>";
        let road_map = parse_autodrive_config(CONFIG_WITHOUT_MARKERS).unwrap();

        let err = generate_descriptor(
            template,
            CONFIG_WITHOUT_MARKERS,
            "Farm_01",
            &road_map,
            "PLACEHOLDER",
        )
        .expect_err("fehlendes Token muss gemeldet werden");
        assert!(format!("{err:#}").contains("'PLACEHOLDER'"));
    }
}
