//! End-to-end coverage of six named planning scenarios, driven entirely
//! through the public `plan()` entry point.

use query_planner::{plan, test_util::CatalogBuilder, test_util::RequestBuilder, Error};

#[test]
fn scenario_1_single_schema_highest_res_ample_ttl() {
    test_helpers::maybe_start_logging();
    let catalog = CatalogBuilder::new()
        .with_schema(
            1,
            [
                (10, 7 * 86_400 / 10, 0),
                (60, 30 * 86_400 / 60, 0),
                (3_600, 400 * 86_400 / 3_600, 0),
            ],
        )
        .build();

    let mut requests = vec![RequestBuilder::new(1, 0, 86_400).build()];

    let summary = plan(&catalog, 86_400, 0, 86_400, &mut requests, 800, 0, 0).unwrap();

    assert_eq!(requests[0].archive(), Some(0));
    assert_eq!(requests[0].out_interval(), Some(10));
    assert_eq!(summary.points_fetch, 8_640);
}

#[test]
fn scenario_2_single_schema_mdp_yes() {
    test_helpers::maybe_start_logging();
    let catalog = CatalogBuilder::new()
        .with_schema(
            1,
            [
                (10, 7 * 86_400 / 10, 0),
                (60, 30 * 86_400 / 60, 0),
                (3_600, 400 * 86_400 / 3_600, 0),
            ],
        )
        .build();

    let mut requests = vec![RequestBuilder::new(1, 0, 2 * 86_400)
        .mdp(800)
        .mdp_optimisable(true)
        .build()];

    let summary = plan(&catalog, 2 * 86_400, 0, 2 * 86_400, &mut requests, 800, 0, 0).unwrap();

    assert_eq!(requests[0].archive(), Some(1));
    assert_eq!(summary.points_fetch, 2_880);
}

#[test]
fn scenario_3_two_schemas_one_pn_group_highest_res() {
    test_helpers::maybe_start_logging();
    let catalog = CatalogBuilder::new()
        .with_schema(1, [(10, 100_000, 0), (300, 100_000, 0)])
        .with_schema(2, [(10, 100_000, 0), (240, 100_000, 0)])
        .build();

    let mut requests = vec![
        RequestBuilder::new(1, 0, 2 * 86_400).pn_group(1).build(),
        RequestBuilder::new(2, 0, 2 * 86_400).pn_group(1).build(),
    ];

    plan(&catalog, 2 * 86_400, 0, 2 * 86_400, &mut requests, 800, 0, 0).unwrap();

    assert_eq!(requests[0].out_interval(), Some(10));
    assert_eq!(requests[1].out_interval(), Some(10));
}

#[test]
fn scenario_4_two_schemas_one_pn_group_mdp_yes() {
    test_helpers::maybe_start_logging();
    let catalog = CatalogBuilder::new()
        .with_schema(1, [(10, 7 * 86_400 / 10, 0), (300, 70 * 86_400 / 300, 0)])
        .with_schema(2, [(10, 7 * 86_400 / 10, 0), (240, 30 * 86_400 / 240, 0)])
        .build();

    let mut requests = vec![
        RequestBuilder::new(1, 0, 2 * 86_400)
            .pn_group(1)
            .mdp(800)
            .mdp_optimisable(true)
            .build(),
        RequestBuilder::new(2, 0, 2 * 86_400)
            .pn_group(1)
            .mdp(800)
            .mdp_optimisable(true)
            .build(),
    ];

    plan(&catalog, 2 * 86_400, 0, 2 * 86_400, &mut requests, 800, 0, 0).unwrap();

    assert_eq!(requests[0].out_interval(), Some(300));
    assert_eq!(requests[0].arch_interval(), Some(300));
    assert_eq!(requests[1].out_interval(), Some(300));
    assert_eq!(requests[1].arch_interval(), Some(10));
}

#[test]
fn scenario_5_soft_limit_triggers_two_step_coarsening() {
    test_helpers::maybe_start_logging();
    let catalog = CatalogBuilder::new()
        .with_schema(
            1,
            [
                (10, 7 * 86_400 / 10, 0),
                (60, 30 * 86_400 / 60, 0),
                (3_600, 400 * 86_400 / 3_600, 0),
            ],
        )
        .build();

    let mut requests = vec![RequestBuilder::new(1, 0, 7 * 86_400).build()];

    let summary = plan(&catalog, 7 * 86_400, 0, 7 * 86_400, &mut requests, 800, 10_000, 0).unwrap();

    assert_eq!(requests[0].archive(), Some(2));
    assert_eq!(summary.points_fetch, 168);
}

#[test]
fn scenario_6_unsatisfiable_when_window_predates_readiness() {
    test_helpers::maybe_start_logging();
    let catalog = CatalogBuilder::new()
        .with_schema(1, [(10, 7 * 86_400 / 10, 1_000_000)])
        .build();

    let mut requests = vec![RequestBuilder::new(1, 0, 86_400).build()];

    let err = plan(&catalog, 86_400, 0, 86_400, &mut requests, 800, 0, 0).unwrap_err();
    assert_eq!(err, Error::Unsatisfiable);
}
