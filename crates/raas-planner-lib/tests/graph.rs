mod common;

use common::{sample_data, LaneGraphBuilder};
use raas_planner_lib::{build_graph, Error, Side};

#[test]
fn narva_points_are_deduplicated_across_lanes() {
    let data = sample_data();
    let layer = data.layer("Narva", "RAAS v1").expect("layer");
    let graph = build_graph(&layer.lanes).expect("graph builds");

    // blufor_main, crossroads, castle, harbour, opfor_main, factory
    assert_eq!(graph.len(), 6);

    let crossroads = graph.find("crossroads").expect("crossroads");
    assert!(
        graph.find("south_crossroads").is_none(),
        "nearby record merges into the first one seen"
    );
    let point = graph.point(crossroads);
    assert_eq!(point.display_name, "Crossroads");
    assert_eq!(point.depth_on("North"), Some(1));
    assert_eq!(point.depth_on("South"), Some(1));
}

#[test]
fn main_bases_are_shared_by_every_lane() {
    let data = sample_data();
    let layer = data.layer("Narva", "RAAS v1").expect("layer");
    let graph = build_graph(&layer.lanes).expect("graph builds");

    let blufor = graph.main_base(Side::Blufor);
    let opfor = graph.main_base(Side::Opfor);
    assert_eq!(graph.point(blufor).name, "blufor_main");
    assert_eq!(graph.point(opfor).name, "opfor_main");
    assert_eq!(graph.side_of(opfor), Some(Side::Opfor));
    assert_eq!(graph.point(opfor).depth_on("North"), Some(4));
    assert_eq!(graph.point(opfor).depth_on("South"), Some(3));

    let lengths: Vec<_> = graph
        .lanes()
        .iter()
        .map(|lane| (lane.name.as_str(), lane.length()))
        .collect();
    assert_eq!(lengths, vec![("North", 3), ("South", 2)]);
}

#[test]
fn edges_only_join_adjacent_depths_of_one_lane() {
    let data = sample_data();
    let layer = data.layer("Narva", "RAAS v1").expect("layer");
    let graph = build_graph(&layer.lanes).expect("graph builds");

    let crossroads = graph.find("crossroads").expect("crossroads");
    let castle = graph.find("castle").expect("castle");
    let factory = graph.find("factory").expect("factory");
    let harbour = graph.find("harbour").expect("harbour");

    assert!(graph.is_neighbour_on(crossroads, castle, "North"));
    assert!(graph.is_neighbour_on(castle, crossroads, "North"));
    assert!(!graph.is_neighbour_on(crossroads, castle, "South"));
    assert!(graph.is_neighbour_on(crossroads, factory, "South"));
    assert!(!graph.is_neighbour(crossroads, harbour));
    assert!(!graph.is_neighbour(castle, factory));

    for (id, _) in graph.points() {
        for (lane, neighbours) in graph.neighbour_lanes(id) {
            let depth = graph.point(id).depth_on(lane).expect("member of lane");
            for &nb in neighbours {
                let other = graph.point(nb).depth_on(lane).expect("member of lane");
                assert_eq!(depth.abs_diff(other), 1);
            }
        }
    }
}

#[test]
fn missing_start_depth_is_a_build_error() {
    let lanes = LaneGraphBuilder::new()
        .point("North", 1, "a", 0.0, 0.0)
        .point("North", 2, "b", 1000.0, 0.0)
        .build();

    let err = build_graph(&lanes).expect_err("no depth 0");
    assert!(matches!(err, Error::MissingStartDepth { ref lane } if lane == "North"));
}

#[test]
fn non_contiguous_depths_are_a_build_error() {
    let lanes = LaneGraphBuilder::new()
        .point("North", 0, "a", 0.0, 0.0)
        .point("North", 1, "b", 1000.0, 0.0)
        .point("North", 3, "c", 2000.0, 0.0)
        .build();

    assert!(matches!(
        build_graph(&lanes),
        Err(Error::NonContiguousDepths { missing: 2, .. })
    ));
}

#[test]
fn lane_with_only_one_depth_is_rejected() {
    let lanes = LaneGraphBuilder::new()
        .point("North", 0, "a", 0.0, 0.0)
        .build();

    assert!(matches!(
        build_graph(&lanes),
        Err(Error::LaneTooShort { .. })
    ));
}

#[test]
fn several_points_at_main_depth_are_rejected() {
    let lanes = LaneGraphBuilder::new()
        .point("North", 0, "a", 0.0, 0.0)
        .point("North", 0, "b", 0.0, 5000.0)
        .point("North", 1, "c", 1000.0, 0.0)
        .build();

    assert!(matches!(
        build_graph(&lanes),
        Err(Error::AmbiguousMainBase { depth: 0, count: 2, .. })
    ));
}

#[test]
fn empty_layer_is_rejected() {
    let lanes = LaneGraphBuilder::new().build();
    assert!(matches!(build_graph(&lanes), Err(Error::NoLanes)));
}

#[test]
fn unknown_point_suggests_close_names() {
    let lanes = LaneGraphBuilder::new()
        .straight_lane("North", &["main_a", "radio_hill", "main_b"], 500.0)
        .build();
    let graph = build_graph(&lanes).expect("graph builds");

    let err = graph.resolve("radio_hil").expect_err("typo");
    assert!(err.to_string().contains("Did you mean 'radio_hill'?"));
}
