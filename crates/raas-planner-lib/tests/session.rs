mod common;

use common::{gorodok_session, narva_session, sample_data};
use raas_planner_lib::{
    Category, ClickOutcome, IgnoreReason, PlannerSession, PointStatus, Side,
};

fn classification(session: &PlannerSession, name: &str) -> (Category, Option<usize>) {
    let id = session.graph().find(name).expect("known point");
    let c = session.evaluate().classify(id);
    (c.category, c.depth)
}

fn all_statuses(session: &PlannerSession) -> Vec<PointStatus> {
    let view = session.evaluate();
    session.graph().point_ids().map(|id| view.status(id)).collect()
}

#[test]
fn nothing_is_possible_before_a_main_base_is_selected() {
    let session = narva_session();
    assert_eq!(session.own_main(), None);

    let view = session.evaluate();
    for (id, point) in session.graph().points() {
        let c = view.classify(id);
        if session.graph().is_main_base(id) {
            assert_eq!(c.category, Category::MainBase);
            assert_eq!(c.depth, None, "{} shows a blank depth", point.name);
        } else {
            assert_eq!(c.category, Category::Impossible, "{}", point.name);
        }
    }
}

#[test]
fn clicking_an_interior_point_without_main_is_ignored() {
    let mut session = narva_session();
    let outcome = session.on_point_click("castle").expect("known point");
    assert_eq!(outcome, ClickOutcome::Ignored(IgnoreReason::Impossible));
}

#[test]
fn selecting_a_main_base_anchors_the_chain() {
    let mut session = narva_session();
    let outcome = session.on_point_click("blufor_main").expect("known point");
    assert_eq!(outcome, ClickOutcome::MainBaseSelected(Side::Blufor));
    assert_eq!(session.own_side(), Some(Side::Blufor));

    assert_eq!(classification(&session, "blufor_main"), (Category::MainBase, Some(0)));
    assert_eq!(classification(&session, "opfor_main"), (Category::MainBase, Some(3)));
    assert_eq!(classification(&session, "crossroads"), (Category::Active, Some(1)));
    assert_eq!(classification(&session, "castle"), (Category::MidPoint, Some(2)));
    assert_eq!(classification(&session, "harbour"), (Category::OffPoint, Some(3)));
    assert_eq!(classification(&session, "factory"), (Category::OffPoint, Some(2)));

    let again = session.on_point_click("blufor_main").expect("known point");
    assert_eq!(again, ClickOutcome::Ignored(IgnoreReason::OwnMainBase));
}

#[test]
fn confirming_off_lane_step_makes_other_lane_impossible() {
    let mut session = narva_session();
    session.on_point_click("blufor_main").expect("select main");

    assert_eq!(
        session.on_point_click("crossroads").expect("click"),
        ClickOutcome::Confirmed
    );
    assert_eq!(session.evaluate().possible_lanes().len(), 2);
    assert_eq!(classification(&session, "castle"), (Category::Active, Some(2)));
    assert_eq!(classification(&session, "factory"), (Category::Active, Some(2)));

    assert_eq!(
        session.on_point_click("castle").expect("click"),
        ClickOutcome::Confirmed
    );
    let view = session.evaluate();
    let possible: Vec<_> = view.possible_lanes().iter().cloned().collect();
    assert_eq!(possible, vec!["North".to_string()]);

    let factory = session.graph().find("factory").expect("factory");
    assert_eq!(view.status(factory), PointStatus::Impossible);
    assert_eq!(classification(&session, "factory"), (Category::Impossible, None));
    assert_eq!(classification(&session, "opfor_main"), (Category::MainBase, Some(4)));
    assert_eq!(classification(&session, "castle"), (Category::Confirmed, Some(2)));
    assert_eq!(classification(&session, "harbour"), (Category::Active, Some(3)));

    let ignored = session.on_point_click("factory").expect("click");
    assert_eq!(ignored, ClickOutcome::Ignored(IgnoreReason::Impossible));
}

#[test]
fn inactive_and_mid_chain_clicks_are_ignored() {
    let mut session = narva_session();
    session.on_point_click("blufor_main").expect("select main");

    assert_eq!(
        session.on_point_click("harbour").expect("click"),
        ClickOutcome::Ignored(IgnoreReason::NotActive)
    );

    session.on_point_click("crossroads").expect("click");
    session.on_point_click("castle").expect("click");
    assert_eq!(
        session.on_point_click("crossroads").expect("click"),
        ClickOutcome::Ignored(IgnoreReason::MidChain)
    );
    assert_eq!(session.line().len(), 2);
}

#[test]
fn unconfirming_terminus_restores_previous_classification() {
    let mut session = narva_session();
    session.on_point_click("blufor_main").expect("select main");
    session.on_point_click("crossroads").expect("click");
    let before_castle = classification(&session, "castle");
    let before_factory = classification(&session, "factory");

    session.on_point_click("castle").expect("confirm");
    assert_eq!(
        session.on_point_click("castle").expect("unconfirm"),
        ClickOutcome::Unconfirmed
    );

    assert_eq!(classification(&session, "castle"), before_castle);
    assert_eq!(classification(&session, "factory"), before_factory);
    let terminus = session.line().terminus().expect("anchored");
    assert_eq!(session.graph().point(terminus).name, "crossroads");
}

#[test]
fn possible_lanes_shrink_monotonically_and_reset_restores_them() {
    let mut session = narva_session();
    session.on_point_click("blufor_main").expect("select main");
    let initial_statuses = all_statuses(&session);

    let mut sizes = vec![session.evaluate().possible_lanes().len()];
    for name in ["crossroads", "castle", "harbour"] {
        assert_eq!(session.on_point_click(name).expect("click"), ClickOutcome::Confirmed);
        sizes.push(session.evaluate().possible_lanes().len());
    }
    assert!(sizes.windows(2).all(|w| w[0] >= w[1]), "sizes: {sizes:?}");
    assert_eq!(sizes.last(), Some(&1));

    session.on_reset();
    assert_eq!(session.evaluate().possible_lanes().len(), 2);
    assert!(session.line().is_empty());
    assert_eq!(all_statuses(&session), initial_statuses);
    assert_eq!(session.own_side(), Some(Side::Blufor));
}

#[test]
fn switching_main_base_resets_the_chain() {
    let mut session = narva_session();
    session.on_point_click("blufor_main").expect("select main");
    session.on_point_click("crossroads").expect("click");

    let outcome = session.on_main_base_select("opfor_main").expect("select");
    assert_eq!(outcome, ClickOutcome::MainBaseSelected(Side::Opfor));
    assert!(session.line().is_empty());

    // From OPFOR the harbour and factory neighbour the main base.
    assert_eq!(classification(&session, "harbour"), (Category::Active, Some(1)));
    assert_eq!(classification(&session, "factory"), (Category::Active, Some(1)));
    assert_eq!(classification(&session, "castle"), (Category::MidPoint, Some(2)));
    assert_eq!(classification(&session, "blufor_main"), (Category::MainBase, Some(3)));
}

#[test]
fn main_base_selection_ignores_interior_points() {
    let mut session = narva_session();
    let outcome = session.on_main_base_select("castle").expect("known point");
    assert_eq!(outcome, ClickOutcome::Ignored(IgnoreReason::NotMainBase));
    assert_eq!(session.own_main(), None);
}

#[test]
fn unknown_point_is_an_error() {
    let mut session = narva_session();
    assert!(session.on_point_click("castel").is_err());
}

#[test]
fn chain_stays_simple_through_a_full_walk() {
    let mut session = gorodok_session();
    session.on_point_click("gorodok_blufor_main").expect("select main");
    for name in ["checkpoint", "school", "church", "factory", "rail_yard"] {
        assert_eq!(session.on_point_click(name).expect("click"), ClickOutcome::Confirmed);
    }

    let chain: Vec<_> = session.line().points().collect();
    assert_eq!(chain.len(), 6);
    let mut unique = chain.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), chain.len());
    for pair in chain.windows(2) {
        assert!(session.graph().is_neighbour(pair[0], pair[1]));
    }
}

#[test]
fn loading_a_layer_discards_the_chain() {
    let mut session = narva_session();
    session.on_point_click("blufor_main").expect("select main");
    session.on_point_click("crossroads").expect("click");

    let data = sample_data();
    let gorodok = data.layer("Gorodok", "RAAS v1").expect("layer");
    session.load_layer(&gorodok.lanes).expect("layer loads");

    assert_eq!(session.own_main(), None);
    assert!(session.graph().find("crossroads").is_none());
    assert!(session.graph().find("school").is_some());
}

#[test]
fn failed_layer_load_keeps_previous_state() {
    let mut session = narva_session();
    session.on_point_click("blufor_main").expect("select main");
    session.on_point_click("crossroads").expect("click");

    let broken = common::LaneGraphBuilder::new()
        .point("North", 1, "orphan", 0.0, 0.0)
        .build();
    assert!(session.load_layer(&broken).is_err());

    assert_eq!(session.own_side(), Some(Side::Blufor));
    assert_eq!(session.line().len(), 1);
}
