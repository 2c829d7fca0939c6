//! Erzeugt die i3d-Szene aus der RoadMap und dem Szenen-Template.
//!
//! Pro Wegpunkt entsteht ein Marker-Beam, pro klassifizierter Kante eine
//! Linien-Gruppe. Beide Gruppen werden unter der TransformGroup "generated"
//! des Templates eingehängt; vorhandene Generate werden vorher entfernt,
//! damit wiederholte Läufe keine Duplikate ansammeln.

use crate::core::{Connection, RoadMap};
use crate::emit::style::{LineStyle, StyleTable};
use crate::error::GenError;
use crate::xml::{encode_latin1, Element, XmlNode, XML_DECL_ISO_8859_1};
use anyhow::Result;

/// Generiert die komplette i3d-Datei als ISO-8859-1-Bytes
pub fn generate_i3d(
    template_xml: &str,
    road_map: &RoadMap,
    config_name: &str,
    styles: &StyleTable,
) -> Result<Vec<u8>> {
    let mut root = Element::parse(template_xml)?;

    if root.attr("name").is_some() {
        root.set_attr("name", format!("{}.i3d", config_name));
    }

    if let Some(shapes) = root.find_child_mut("Shapes") {
        if shapes.attr("externalShapesFile").is_some() {
            shapes.set_attr("externalShapesFile", format!("{}.i3d.shapes", config_name));
        }
    }

    let scene = root
        .find_child_mut("Scene")
        .ok_or_else(|| GenError::TemplateAnchorMissing {
            anchor: "Scene".to_string(),
        })?;

    let generated =
        scene
            .find_transform_group_mut("generated")
            .ok_or_else(|| GenError::TemplateAnchorMissing {
                anchor: "generated".to_string(),
            })?;

    // Alte Generate entfernen (idempotente Regenerierung)
    generated.children.retain(|child| match child {
        XmlNode::Element(el) => {
            !(el.name == "TransformGroup"
                && matches!(el.attr("name"), Some("beams") | Some("lines")))
        }
        XmlNode::Text(_) => true,
    });

    let mut node_id = styles.node_id_base;
    generated.push_element(build_beams_group(road_map, styles, &mut node_id));
    generated.push_element(build_lines_group(road_map, styles, &mut node_id));

    encode_latin1(&root.to_xml_string(XML_DECL_ISO_8859_1))
}

/// Baut die "beams"-Gruppe: ein Marker-Shape pro Wegpunkt
fn build_beams_group(road_map: &RoadMap, styles: &StyleTable, node_id: &mut u32) -> Element {
    let mut group = Element::new("TransformGroup");
    group.set_attr("name", "beams");
    group.set_attr("nodeId", styles.beams_group_node_id.to_string());

    for node in road_map.nodes.values() {
        let mut beam = Element::new("Shape");
        beam.set_attr("name", "beam");
        beam.set_attr(
            "translation",
            format!(
                "{} {} {}",
                format_coord(node.position.x),
                format_coord(node.position.y),
                format_coord(node.position.z)
            ),
        );
        beam.set_attr("scale", styles.beam.scale);
        beam.set_attr("shapeId", styles.beam.shape_id.to_string());
        beam.set_attr("clipDistance", styles.clip_distance.to_string());
        beam.set_attr("nodeId", node_id.to_string());
        set_render_flags(&mut beam);
        beam.set_attr("materialIds", styles.beam.material_id.to_string());

        group.push_element(beam);
        *node_id += 1;
    }

    group
}

/// Baut die "lines"-Gruppe: eine TransformGroup pro klassifizierter Kante
fn build_lines_group(road_map: &RoadMap, styles: &StyleTable, node_id: &mut u32) -> Element {
    let mut group = Element::new("TransformGroup");
    group.set_attr("name", "lines");
    group.set_attr("translation", styles.lines_group_translation);
    group.set_attr("nodeId", styles.lines_group_node_id.to_string());

    for connection in &road_map.connections {
        let style = styles.line_style(connection.direction, connection.priority);
        group.push_element(build_line(connection, style, styles, node_id));
    }

    group
}

/// Eine Linien-Gruppe: in den Kanten-Mittelpunkt verschoben, um yaw gedreht,
/// enthält das auf Kantenlänge skalierte Linien-Shape und ggf. zwei Pfeile.
fn build_line(
    connection: &Connection,
    style: &LineStyle,
    styles: &StyleTable,
    node_id: &mut u32,
) -> Element {
    let mut container = Element::new("TransformGroup");
    container.set_attr("name", format!("{}Line", style.name));
    container.set_attr(
        "translation",
        format!(
            "{:.2} {:.2} {:.2}",
            connection.midpoint.x, connection.midpoint.y, connection.midpoint.z
        ),
    );
    container.set_attr("rotation", format!("0 {:.2} 0", connection.yaw_deg));
    container.set_attr("nodeId", node_id.to_string());

    let mut line = Element::new("Shape");
    line.set_attr("name", format!("{}Line", style.name));
    line.set_attr("rotation", "90 0 0");
    line.set_attr("scale", format!("1 {:.2} 1", connection.length));
    line.set_attr("shapeId", style.shape_id.to_string());
    line.set_attr("clipDistance", styles.clip_distance.to_string());
    line.set_attr("nodeId", node_id.to_string());
    set_render_flags(&mut line);
    line.set_attr("materialIds", style.material_id.to_string());
    container.push_element(line);

    if style.has_arrows {
        container.push_element(build_arrow(style, styles, "R", "-0.032 0 0.032", "90 45 0", *node_id + 1));
        container.push_element(build_arrow(style, styles, "L", "0.032 0 0.032", "90 -45 0", *node_id + 2));
        *node_id += 2;
    }

    *node_id += 1;
    container
}

fn build_arrow(
    style: &LineStyle,
    styles: &StyleTable,
    side: &str,
    translation: &str,
    rotation: &str,
    node_id: u32,
) -> Element {
    let mut arrow = Element::new("Shape");
    arrow.set_attr("name", format!("{}Arrow{}", style.name, side));
    arrow.set_attr("translation", translation);
    arrow.set_attr("rotation", rotation);
    arrow.set_attr("scale", "1 0.1 1");
    arrow.set_attr("shapeId", style.shape_id.to_string());
    arrow.set_attr("clipDistance", styles.clip_distance.to_string());
    arrow.set_attr("nodeId", node_id.to_string());
    set_render_flags(&mut arrow);
    arrow.set_attr("materialIds", style.material_id.to_string());
    arrow
}

fn set_render_flags(shape: &mut Element) {
    shape.set_attr("castsShadows", "false");
    shape.set_attr("receiveShadows", "false");
    shape.set_attr("distanceBlending", "false");
}

/// Formatiert eine Koordinate mit 3 Dezimalstellen (Marker-Positionen)
fn format_coord(value: f32) -> String {
    format!("{:.3}", value)
}
