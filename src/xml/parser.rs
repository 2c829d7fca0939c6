//! Parser für AutoDrive XML-Konfigurationen.
//!
//! Das Format nutzt "Structure of Arrays": parallele komma- bzw.
//! semikolon-getrennte Listen in den Tags unter `<waypoints>`.

use crate::core::{Connection, ConnectionDirection, ConnectionPriority, MapMarker};
use crate::core::{MapNode, NodeFlag, RoadMap};
use crate::error::GenError;
use anyhow::{bail, Context, Result};
use glam::Vec3;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::{HashMap, HashSet};

/// Parsed eine AutoDrive-Config aus einem XML-String
pub fn parse_autodrive_config(xml_content: &str) -> Result<RoadMap> {
    let mut reader = Reader::from_str(xml_content);
    reader.config_mut().trim_text(true);

    let mut buffer = Vec::new();

    let mut version_text: Option<String> = None;
    let mut version_attr: Option<String> = None;
    let mut map_name: Option<String> = None;

    let mut in_waypoints = false;
    let mut in_mapmarker = false;
    let mut in_marker_element = false;
    let mut current_tag: Option<String> = None;

    let mut waypoint_ids = String::new();
    let mut waypoint_x = String::new();
    let mut waypoint_y = String::new();
    let mut waypoint_z = String::new();
    let mut waypoint_out = String::new();
    let mut waypoint_incoming = String::new();
    let mut waypoint_flags = String::new();

    let mut map_markers: Vec<MapMarker> = Vec::new();
    let mut marker_index = 1u32;
    let mut current_marker_tag: Option<String> = None;
    let mut current_marker_id: Option<u64> = None;
    let mut current_marker_name: Option<String> = None;
    let mut current_marker_group: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buffer) {
            Ok(Event::Start(ref e)) => {
                let name = e.name();
                let tag = reader.decoder().decode(name.as_ref())?;

                if tag == "AutoDrive" {
                    for attr in e.attributes().with_checks(false) {
                        let attr = attr?;
                        let key = reader.decoder().decode(attr.key.as_ref())?;
                        if key == "version" {
                            version_attr = Some(attr.unescape_value()?.into_owned());
                        }
                    }
                } else if tag == "waypoints" {
                    in_waypoints = true;
                } else if tag == "mapmarker" {
                    in_mapmarker = true;
                } else if in_mapmarker && tag.starts_with("mm") {
                    // Marker-Element beginnt (z.B. <mm1>, <mm2>, ...)
                    in_marker_element = true;
                    current_marker_tag = Some(tag.to_string());
                    current_marker_id = None;
                    current_marker_name = None;
                    current_marker_group = None;
                } else {
                    current_tag = Some(tag.to_string());
                }
            }
            Ok(Event::Text(e)) => {
                let text = e.xml_content()?.into_owned();

                if in_waypoints {
                    match current_tag.as_deref() {
                        Some("id") => waypoint_ids.push_str(&text),
                        Some("x") => waypoint_x.push_str(&text),
                        Some("y") => waypoint_y.push_str(&text),
                        Some("z") => waypoint_z.push_str(&text),
                        Some("out") => waypoint_out.push_str(&text),
                        Some("incoming") => waypoint_incoming.push_str(&text),
                        Some("flags") => waypoint_flags.push_str(&text),
                        _ => {}
                    }
                } else if in_marker_element {
                    match current_tag.as_deref() {
                        Some("id") => {
                            let marker_tag = current_marker_tag.as_deref().unwrap_or("<unknown>");
                            let id = parse_marker_id(&text).with_context(|| {
                                format!("Ungueltige Marker-ID in {}: '{}'", marker_tag, text)
                            })?;
                            current_marker_id = Some(id);
                        }
                        Some("name") => current_marker_name = Some(text),
                        Some("group") => current_marker_group = Some(text),
                        _ => {}
                    }
                } else {
                    match current_tag.as_deref() {
                        Some("version") => version_text = Some(text),
                        Some("MapName") => map_name = Some(text),
                        _ => {}
                    }
                }
            }
            Ok(Event::End(ref e)) => {
                let name = e.name();
                let tag = reader.decoder().decode(name.as_ref())?;
                if tag == "waypoints" {
                    in_waypoints = false;
                } else if tag == "mapmarker" {
                    in_mapmarker = false;
                } else if in_marker_element && tag.starts_with("mm") {
                    // Marker-Element endet - füge Marker hinzu
                    in_marker_element = false;
                    current_marker_tag = None;
                    if let Some(id) = current_marker_id {
                        let name = current_marker_name
                            .take()
                            .unwrap_or_else(|| "Unnamed".to_string());
                        let group = current_marker_group
                            .take()
                            .unwrap_or_else(|| "All".to_string());
                        map_markers.push(MapMarker::new(id, name, group, marker_index));
                        marker_index += 1;
                    }
                } else if current_tag.as_deref() == Some(tag.as_ref()) {
                    current_tag = None;
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(err).context("Fehler beim Parsen des XML"),
            _ => {}
        }

        buffer.clear();
    }

    let version = match version_attr.or(version_text) {
        Some(value) => parse_version(&value)?,
        None => {
            log::warn!("Keine Version in der Config gefunden, nehme FS25 (3) an");
            3
        }
    };

    let mut road_map = build_road_map(
        version,
        &waypoint_ids,
        &waypoint_x,
        &waypoint_y,
        &waypoint_z,
        &waypoint_out,
        &waypoint_incoming,
        &waypoint_flags,
    )
    .map_err(|err| GenError::MalformedConfig(format!("{err:#}")))?;

    road_map.map_name = map_name;
    road_map.map_markers = map_markers;

    Ok(road_map)
}

/// Baut die RoadMap aus den rohen Listen-Strings des `<waypoints>`-Blocks auf
/// und klassifiziert dabei alle Kanten.
#[allow(clippy::too_many_arguments)]
fn build_road_map(
    version: u32,
    ids_raw: &str,
    x_raw: &str,
    y_raw: &str,
    z_raw: &str,
    out_raw: &str,
    incoming_raw: &str,
    flags_raw: &str,
) -> Result<RoadMap> {
    if ids_raw.is_empty()
        || x_raw.is_empty()
        || z_raw.is_empty()
        || out_raw.is_empty()
        || incoming_raw.is_empty()
        || flags_raw.is_empty()
    {
        bail!("Pflichtfelder in <waypoints> fehlen");
    }

    let ids = parse_list::<u64>(ids_raw, ',').context("Fehler beim Parsen der ID-Liste")?;
    let xs = parse_list::<f32>(x_raw, ',').context("Fehler beim Parsen der X-Koordinaten")?;
    let zs = parse_list::<f32>(z_raw, ',').context("Fehler beim Parsen der Z-Koordinaten")?;
    let flags = parse_list::<u32>(flags_raw, ',').context("Fehler beim Parsen der Flags")?;
    let outgoing = parse_nested_list(out_raw).context("Fehler beim Parsen der Outgoing-Liste")?;
    let incoming =
        parse_nested_list(incoming_raw).context("Fehler beim Parsen der Incoming-Liste")?;

    // y ist in alten Configs optional, dann liegen alle Punkte auf Höhe 0
    let ys: Option<Vec<f32>> = if y_raw.is_empty() {
        None
    } else {
        Some(parse_list::<f32>(y_raw, ',').context("Fehler beim Parsen der Y-Koordinaten")?)
    };

    let expected_len = ids.len();
    if xs.len() != expected_len
        || zs.len() != expected_len
        || flags.len() != expected_len
        || outgoing.len() != expected_len
        || incoming.len() != expected_len
    {
        bail!("Laengen der Waypoint-Listen stimmen nicht ueberein");
    }

    if let Some(ref ys) = ys {
        if ys.len() != expected_len {
            bail!("Laenge der y-Liste stimmt nicht ueberein");
        }
    }

    // Phase 1: Nodes aufbauen (Config-Reihenfolge bleibt erhalten)
    let mut road_map = RoadMap::new(version);
    let mut id_to_index: HashMap<u64, usize> = HashMap::new();

    for (index, id) in ids.iter().enumerate() {
        let flag = NodeFlag::from_u32(flags[index]);
        let y = ys.as_ref().map(|ys| ys[index]).unwrap_or(0.0);
        let position = Vec3::new(xs[index], y, zs[index]);
        road_map.nodes.insert(*id, MapNode::new(*id, position, flag));
        id_to_index.insert(*id, index);
    }

    // Phase 2: Kanten klassifizieren. Jedes ungeordnete Paar wird genau einmal
    // angelegt, damit A→B und B→A nicht zwei Linien erzeugen.
    let mut processed_pairs: HashSet<(u64, u64)> = HashSet::new();

    for (index, source_id) in ids.iter().enumerate() {
        for target_id in &outgoing[index] {
            let pair = ((*source_id).min(*target_id), (*source_id).max(*target_id));
            if processed_pairs.contains(&pair) {
                continue;
            }

            let target_index = match id_to_index.get(target_id) {
                Some(idx) => *idx,
                None => {
                    log::warn!("Missing target node: {}", target_id);
                    continue;
                }
            };

            // Reziprozität über die incoming-Listen beider Endpunkte:
            // beidseitig gelistet = Dual, quellseitig fehlend = tote Kante
            let direction = if incoming[target_index].contains(source_id)
                && incoming[index].contains(target_id)
            {
                ConnectionDirection::Dual
            } else if !incoming[target_index].contains(source_id) {
                ConnectionDirection::Reverse
            } else {
                ConnectionDirection::Regular
            };

            let priority = if flags[index] != 0 || flags[target_index] != 0 {
                ConnectionPriority::SubPriority
            } else {
                ConnectionPriority::Regular
            };

            let start_pos = road_map
                .nodes
                .get(source_id)
                .context("Start-Node fehlt")?
                .position;
            let end_pos = road_map
                .nodes
                .get(target_id)
                .context("End-Node fehlt")?
                .position;

            road_map.connections.push(Connection::new(
                *source_id, *target_id, direction, priority, start_pos, end_pos,
            ));
            processed_pairs.insert(pair);
        }
    }

    Ok(road_map)
}

fn parse_marker_id(text: &str) -> Result<u64> {
    let value = text
        .trim()
        .parse::<f64>()
        .context("Marker-ID ist keine gueltige Zahl")?;

    if !value.is_finite() {
        bail!("Marker-ID muss endlich sein");
    }

    if value < 0.0 {
        bail!("Marker-ID darf nicht negativ sein");
    }

    if value.fract() != 0.0 {
        bail!("Marker-ID muss ganzzahlig sein");
    }

    Ok(value as u64)
}

/// Hilfsfunktion zum Parsen einer kommagetrennten Liste
fn parse_list<T: std::str::FromStr>(text: &str, delimiter: char) -> Result<Vec<T>>
where
    <T as std::str::FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    text.split(delimiter)
        .filter(|s| !s.is_empty())
        .map(|s| {
            let trimmed = s.trim();
            trimmed.parse::<T>().with_context(|| {
                format!(
                    "Wert '{}' konnte nicht geparst werden",
                    truncate_for_error(trimmed)
                )
            })
        })
        .collect::<Result<Vec<T>, _>>()
}

/// Kürzt einen String für Fehlermeldungen auf max. 40 Zeichen
fn truncate_for_error(s: &str) -> &str {
    if s.len() <= 40 {
        s
    } else {
        &s[..40]
    }
}

/// Hilfsfunktion zum Parsen verschachtelter Listen (für out/incoming).
/// Werte <= 0 (z.B. -1) werden ignoriert — sie markieren Endpunkte oder
/// rückwärts befahrene Strecken in AutoDrive.
fn parse_nested_list(text: &str) -> Result<Vec<Vec<u64>>> {
    text.split(';')
        .map(|part| {
            if part.trim().is_empty() {
                Ok(Vec::new())
            } else {
                part.split(',')
                    .filter(|s| !s.is_empty())
                    .filter_map(|s| {
                        let trimmed = s.trim();
                        // -1 (und andere negative Werte) = kein Ziel / Endpunkt
                        if trimmed.starts_with('-') {
                            None
                        } else {
                            Some(trimmed.parse::<u64>().with_context(|| {
                                format!(
                                    "Wert '{}' konnte nicht geparst werden",
                                    truncate_for_error(trimmed)
                                )
                            }))
                        }
                    })
                    .collect()
            }
        })
        .collect()
}

fn parse_version(value: &str) -> Result<u32> {
    let major = value.split('.').next().unwrap_or(value).trim();

    major
        .parse::<u32>()
        .context("Version konnte nicht gelesen werden")
}
