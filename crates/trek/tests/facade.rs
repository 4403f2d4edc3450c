//! The facade exposes a complete tour pipeline through its prelude.

use trek::prelude::*;

#[test]
fn config_from_json_drives_a_full_tour() {
    let config: SolveConfig = serde_json::from_str(
        r#"{"maze_mode": true, "grid_width": 6, "grid_height": 6,
            "obstacles": [[3, 0], [3, 1], [3, 2], [3, 3], [3, 4]],
            "waypoint_count": 3}"#,
    )
    .unwrap();
    config.validate().unwrap();

    let bare = LocomotionState::initialize(&[], &[], &config).unwrap();
    let waypoints = generate_waypoints(
        config.waypoint_count,
        bare.position_space(),
        bare.rotation_space(),
        bare.navmesh(),
    );
    let robot = EntitySpec::new("robot", Point::ORIGIN);
    let state = LocomotionState::initialize(&[robot], &waypoints, &config).unwrap();

    let id = EntityId::from("robot");
    let start = state.quantized_position(&id);
    let tour = plan_tour(&waypoints, start, |a, b| {
        state.distance(a, b).unwrap_or(f64::INFINITY)
    });
    let plan = run_agenda(&state, tour_steps(&id, &tour.order)).unwrap();
    for wp in &waypoints {
        assert!(plan.state.waypoint_reached(&id, &wp.id));
    }

    let export = TrajectoryExport::new(reconstruct(&state, &plan.actions).unwrap());
    assert_eq!(export.steps.len(), plan.actions.len());
    assert!((export.metadata.total_time - plan.total_seconds()).abs() < 1e-9);
}
