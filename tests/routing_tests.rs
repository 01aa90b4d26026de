//! End-to-end routing tests
//!
//! Exercise the session across pathfinding, the distance domain, floor
//! transitions, and frame output on the two-floor fixture building.

mod fixtures;

use std::sync::Arc;

use pretty_assertions::assert_eq;

use fixtures::{FakeFetcher, building, config};
use wayfinder::color::Rgb;
use wayfinder::error::NavError;
use wayfinder::graph_data::StaticGraphData;
use wayfinder::schedule::Schedule;
use wayfinder::session::{NavigationSession, SessionState};
use wayfinder::transition::Floor;

fn session() -> NavigationSession<StaticGraphData, FakeFetcher> {
    NavigationSession::new(Arc::new(building()), FakeFetcher::new(), config())
}

#[test]
fn test_route_between_floors_reconstructs_full_path() {
    let mut session = session();
    let frame = session.request_route("101", "204").unwrap();

    assert_eq!(session.path(), Some(&[0, 1, 2, 3, 5, 6, 7][..]));
    assert_eq!(session.state(), SessionState::Rendering);
    // Matrix distance 10050 minus the stair sentinel.
    assert_eq!(session.total_distance(), Some(50.0));

    // The prefix up to the stairwell is rendered first.
    assert_eq!(frame.floor, Floor::First);
    assert_eq!(frame.background_image, "mainfloorcrunched.png");
    assert_eq!(frame.trajectory.len(), 4);
    assert!(!frame.transition_occurred);
    assert_eq!(frame.agent.point.x, 0.0);
    assert_eq!(frame.agent.color, Rgb { r: 255, g: 0, b: 0 });
}

#[test]
fn test_multi_vertex_room_picks_nearest_candidate() {
    let mut session = session();
    session.request_route("102", "204").unwrap();
    // Room 102 touches vertices 1 and 2; vertex 2 is nearer to 204.
    assert_eq!(session.path(), Some(&[2, 3, 5, 6, 7][..]));
}

#[test]
fn test_room_matching_is_case_insensitive() {
    let mut session = session();
    assert!(session.request_route(" storage ", "101").is_err());
    assert!(session.request_route("101", "204").is_ok());
}

#[test]
fn test_seek_crosses_stair_exactly_once_per_direction() {
    let mut session = session();
    session.request_route("101", "204").unwrap();

    // Still on the first floor.
    let frame = session.seek(15.0).unwrap();
    assert_eq!(session.state(), SessionState::Tracking);
    assert!(!frame.transition_occurred);
    assert_eq!(frame.floor, Floor::First);

    // Crossing the stair swaps to the suffix trajectory.
    let frame = session.seek(30.0).unwrap();
    assert!(frame.transition_occurred);
    assert_eq!(frame.floor, Floor::Second);
    assert_eq!(frame.background_image, "combscaled.png");
    assert_eq!(frame.trajectory.len(), 3);
    // Mirrored addressing lands the agent on the stair top.
    assert_eq!(frame.agent.point.x, 40.0);

    // Further forward movement does not re-fire.
    let frame = session.seek(35.0).unwrap();
    assert!(!frame.transition_occurred);

    // Scrolling back re-arms and fires the reverse transition once.
    let frame = session.seek(10.0).unwrap();
    assert!(frame.transition_occurred);
    assert_eq!(frame.floor, Floor::First);
    let frame = session.seek(5.0).unwrap();
    assert!(!frame.transition_occurred);
}

#[test]
fn test_segment_indices_are_monotonic_on_forward_seek() {
    let mut session = session();
    session.request_route("101", "204").unwrap();

    let mut last = 0;
    for distance in [0.0, 5.0, 10.0, 19.0, 25.0, 30.0, 42.0, 50.0] {
        session.seek(distance).unwrap();
        let segment = session.current_segment().unwrap();
        assert!(segment >= last, "segment went backwards at {}", distance);
        last = segment;
    }
}

#[test]
fn test_seek_at_route_end_completes() {
    let mut session = session();
    session.request_route("101", "204").unwrap();

    let frame = session.seek(50.0).unwrap();
    assert_eq!(frame.agent.color, Rgb { r: 0, g: 255, b: 0 });
    assert_eq!(frame.agent.point.x, 60.0);
    // The final vertex has no outgoing segment, so the placeholder shows.
    assert_eq!(frame.segment_image, "no-streetview.jpg");
}

#[test]
fn test_agent_heading_follows_the_corridor() {
    let mut session = session();
    session.request_route("101", "204").unwrap();

    // Travelling +x along the first corridor: 270 - atan2(0, +).
    let frame = session.seek(5.0).unwrap();
    assert!((frame.agent.heading_degrees - 270.0).abs() < 1e-9);

    // On the vertical leg toward the stair the agent turns: 270 - 90.
    let frame = session.seek(25.0).unwrap();
    assert!((frame.agent.heading_degrees - 180.0).abs() < 1e-9);
}

#[test]
fn test_lock_north_suppresses_rotation() {
    let mut cfg = config();
    cfg.lock_north = true;
    let mut session = NavigationSession::new(Arc::new(building()), FakeFetcher::new(), cfg);
    session.request_route("101", "204").unwrap();

    let frame = session.seek(25.0).unwrap();
    assert_eq!(frame.agent.heading_degrees, 90.0);
}

#[test]
fn test_seek_before_any_route_is_a_noop() {
    let mut session = session();
    assert!(session.seek(10.0).is_none());
    assert_eq!(session.state(), SessionState::Idle);
}

#[test]
fn test_input_errors_leave_session_untouched() {
    let mut session = session();

    assert!(matches!(
        session.request_route("101", "attic"),
        Err(NavError::UnknownRoom(room)) if room == "ATTIC"
    ));
    assert_eq!(session.state(), SessionState::Idle);

    session.request_route("101", "204").unwrap();
    assert!(matches!(
        session.request_route(" 101 ", "101"),
        Err(NavError::SameRoom)
    ));
    // The active route survived the rejected request.
    assert_eq!(session.path().map(|p| p.len()), Some(7));
}

#[test]
fn test_disconnected_rooms_report_no_path() {
    let mut session = session();
    assert!(matches!(
        session.request_route("STORAGE", "101"),
        Err(NavError::NoPath { .. })
    ));
    assert!(matches!(
        session.request_route("101", "STORAGE"),
        Err(NavError::NoPath { .. })
    ));
    assert_eq!(session.state(), SessionState::Idle);
}

#[test]
fn test_reset_is_always_safe() {
    let mut session = session();
    session.reset();
    assert_eq!(session.state(), SessionState::Idle);

    session.request_route("101", "204").unwrap();
    session.seek(30.0).unwrap();
    session.reset();

    assert_eq!(session.state(), SessionState::Idle);
    assert!(session.path().is_none());
    assert!(session.seek(10.0).is_none());
}

#[test]
fn test_schedule_navigation_advances_and_wraps() {
    let mut session = session();
    let schedule = Schedule::new(["101", "201", "204"]);

    session.route_next_scheduled(&schedule).unwrap();
    assert_eq!(session.path(), Some(&[0, 1, 2, 3, 5][..]));

    session.route_next_scheduled(&schedule).unwrap();
    assert_eq!(session.path(), Some(&[5, 6, 7][..]));

    // Wraps back to the first room.
    session.route_next_scheduled(&schedule).unwrap();
    assert_eq!(session.path(), Some(&[7, 6, 5, 3, 2, 1, 0][..]));
}

#[test]
fn test_empty_schedule_is_an_input_error() {
    let mut session = session();
    let schedule = Schedule::new(Vec::<String>::new());
    assert!(matches!(
        session.route_next_scheduled(&schedule),
        Err(NavError::EmptySchedule)
    ));
    assert_eq!(session.state(), SessionState::Idle);
}

#[test]
fn test_descending_route_swaps_floors_in_reverse() {
    let mut session = session();
    let frame = session.request_route("204", "101").unwrap();

    assert_eq!(session.path(), Some(&[7, 6, 5, 3, 2, 1, 0][..]));
    assert_eq!(frame.floor, Floor::Second);
    assert_eq!(frame.background_image, "combscaled.png");

    // Crossing down onto the first floor.
    let frame = session.seek(25.0).unwrap();
    assert!(frame.transition_occurred);
    assert_eq!(frame.floor, Floor::First);
    assert_eq!(frame.background_image, "mainfloorcrunched.png");
}
