/// Integration-Tests für XML-Parsing
use fs25_auto_drive_placeable_gen::xml::parse_autodrive_config;
use fs25_auto_drive_placeable_gen::{ConnectionDirection, ConnectionPriority};

#[test]
fn test_parse_simple_config() {
    let xml_content = include_str!("fixtures/simple_config.xml");
    let road_map = parse_autodrive_config(xml_content).unwrap();

    assert_eq!(road_map.version, 3);
    assert_eq!(road_map.map_name.as_deref(), Some("ZielitzFields"));
    assert_eq!(road_map.node_count(), 4);
    assert_eq!(road_map.connection_count(), 4);
    assert_eq!(road_map.map_markers.len(), 1);
    assert_eq!(road_map.map_markers[0].name, "Hof");
}

#[test]
fn test_simple_config_covers_all_edge_classes() {
    let xml_content = include_str!("fixtures/simple_config.xml");
    let road_map = parse_autodrive_config(xml_content).unwrap();

    let classes: Vec<_> = road_map
        .connections
        .iter()
        .map(|c| (c.start_id, c.end_id, c.direction, c.priority))
        .collect();

    assert_eq!(
        classes,
        vec![
            // 1 ↔ 2: beidseitig incoming
            (
                1,
                2,
                ConnectionDirection::Dual,
                ConnectionPriority::Regular
            ),
            // 2 → 3: Ziel-Flag gesetzt
            (
                2,
                3,
                ConnectionDirection::Regular,
                ConnectionPriority::SubPriority
            ),
            // 3 → 4: Quell-Flag gesetzt
            (
                3,
                4,
                ConnectionDirection::Regular,
                ConnectionPriority::SubPriority
            ),
            // 4 → 1: Node 1 führt 4 nicht als incoming
            (
                4,
                1,
                ConnectionDirection::Reverse,
                ConnectionPriority::Regular
            ),
        ]
    );
}

#[test]
fn test_node_order_follows_config() {
    let xml_content = include_str!("fixtures/simple_config.xml");
    let road_map = parse_autodrive_config(xml_content).unwrap();

    let ids: Vec<u64> = road_map.nodes.keys().copied().collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
}
