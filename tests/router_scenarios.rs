//! End-to-end routing scenarios.

use std::time::Duration;

use pcb_router::{
    find_path, find_path_observed, Layout, ObstacleIndex, Point, Rect, RouteError, SearchLimits,
    SearchObserver, SearchSnapshot, TerminalId,
};

/// Two 4x4 components facing each other across open space, one pin each.
fn facing_pair() -> (Layout, TerminalId, TerminalId) {
    let mut builder = Layout::builder();
    let left = builder.add_component(0, 0, 4, 4).unwrap();
    let right = builder.add_component(10, 0, 4, 4).unwrap();
    let a = builder.add_terminal(left, 4, 2).unwrap();
    let b = builder.add_terminal(right, 0, 2).unwrap();
    (builder.build(), a, b)
}

#[test]
fn scenario_a_straight_shot_across_open_space() {
    let (layout, a, b) = facing_pair();
    let limits = SearchLimits::within(Rect::new(-5, -5, 30, 30));
    let route = find_path(&layout, a, b, &limits).unwrap();

    assert_eq!(route.points, vec![Point::new(4, 2), Point::new(10, 2)]);
    assert_eq!(route.cost, 6);
    assert!(route.stats.expanded > 0);
    assert!(route.stats.pushed >= route.stats.expanded);
}

#[test]
fn scenario_b_wall_across_the_bounds_is_unreachable() {
    let mut builder = Layout::builder();
    let left = builder.add_component(0, 8, 4, 4).unwrap();
    // Spans the full height of the working bounds: no way over or under.
    builder.add_component(10, 0, 2, 20).unwrap();
    let right = builder.add_component(20, 8, 4, 4).unwrap();
    let a = builder.add_terminal(left, 4, 2).unwrap();
    let b = builder.add_terminal(right, 0, 2).unwrap();
    let layout = builder.build();

    let limits = SearchLimits::within(Rect::new(0, 0, 30, 20));
    assert_eq!(
        find_path(&layout, a, b, &limits).unwrap_err(),
        RouteError::Unreachable
    );
}

#[test]
fn scenario_c_blocked_exit_cell_is_unreachable() {
    let mut builder = Layout::builder().with_min_spacing(1);
    let left = builder.add_component(0, 0, 4, 4).unwrap();
    // Parked one cell away: the pin's only perpendicular exit lands on
    // this component's left edge.
    let blocker = builder.add_component(5, 0, 4, 4).unwrap();
    let a = builder.add_terminal(left, 4, 2).unwrap();
    let b = builder.add_terminal(blocker, 4, 2).unwrap();
    let layout = builder.build();

    let limits = SearchLimits::within(Rect::new(0, 0, 20, 20));
    assert_eq!(
        find_path(&layout, a, b, &limits).unwrap_err(),
        RouteError::Unreachable
    );
}

#[test]
fn scenario_d_budget_runs_out_before_the_route() {
    let (layout, a, b) = facing_pair();
    let limits = SearchLimits::within(Rect::new(-5, -5, 30, 30)).with_max_iterations(2);

    // A route exists, so this must be Exceeded, never Unreachable.
    match find_path(&layout, a, b, &limits) {
        Err(RouteError::Exceeded { iterations }) => assert_eq!(iterations, 2),
        other => panic!("expected Exceeded, got {other:?}"),
    }
}

#[test]
fn deadline_of_zero_exceeds_immediately() {
    let (layout, a, b) = facing_pair();
    let limits =
        SearchLimits::within(Rect::new(-5, -5, 30, 30)).with_deadline(Duration::ZERO);
    assert!(matches!(
        find_path(&layout, a, b, &limits),
        Err(RouteError::Exceeded { iterations: 0 })
    ));
}

/// A wall between the pins forces a detour over its top.
fn detour_layout() -> (Layout, TerminalId, TerminalId) {
    let mut builder = Layout::builder();
    let left = builder.add_component(0, 0, 4, 4).unwrap();
    builder.add_component(8, 0, 2, 10).unwrap();
    let right = builder.add_component(14, 0, 4, 4).unwrap();
    let a = builder.add_terminal(left, 4, 2).unwrap();
    let b = builder.add_terminal(right, 0, 2).unwrap();
    (builder.build(), a, b)
}

#[test]
fn routes_hold_the_path_invariants() {
    let (layout, a, b) = detour_layout();
    let limits = SearchLimits::within(Rect::new(-5, -5, 40, 40));
    let route = find_path(&layout, a, b, &limits).unwrap();

    // Endpoints are exactly the terminal positions.
    assert_eq!(route.points.first(), Some(&layout.terminal_position(a).unwrap()));
    assert_eq!(route.points.last(), Some(&layout.terminal_position(b).unwrap()));

    // Every segment is strictly horizontal or vertical.
    for pair in route.points.windows(2) {
        let same_x = pair[0].x == pair[1].x;
        let same_y = pair[0].y == pair[1].y;
        assert!(same_x ^ same_y, "diagonal or empty segment {pair:?}");
    }

    // Interior segments clear every component; the first and last segment
    // may touch only the perimeter of the component owning their terminal.
    let index = ObstacleIndex::new(&layout);
    let segments: Vec<(Point, Point)> = route
        .points
        .windows(2)
        .map(|pair| (pair[0], pair[1]))
        .collect();
    let start_owner = layout.terminal(a).unwrap().component();
    let end_owner = layout.terminal(b).unwrap().component();
    for (i, &(p, q)) in segments.iter().enumerate() {
        if i == 0 || i == segments.len() - 1 {
            let allowed = if i == 0 { start_owner } else { end_owner };
            for component in layout.components() {
                if component.id() != allowed {
                    assert!(
                        !component.rect().blocks_segment(p, q),
                        "segment {p}..{q} hits component {:?}",
                        component.id()
                    );
                }
            }
        } else {
            assert!(!index.is_segment_blocked(p, q), "segment {p}..{q} blocked");
        }
    }
}

#[test]
fn identical_inputs_give_identical_routes() {
    let (layout, a, b) = detour_layout();
    let limits = SearchLimits::within(Rect::new(-5, -5, 40, 40));
    let first = find_path(&layout, a, b, &limits).unwrap();
    let second = find_path(&layout, a, b, &limits).unwrap();
    assert_eq!(first, second);
}

#[test]
fn goal_tolerance_still_ends_exactly_on_the_pin() {
    let (layout, a, b) = facing_pair();
    let limits = SearchLimits::within(Rect::new(-5, -5, 30, 30)).with_goal_tolerance(2);
    let route = find_path(&layout, a, b, &limits).unwrap();

    assert_eq!(route.points.last(), Some(&Point::new(10, 2)));
    assert_eq!(route.points, vec![Point::new(4, 2), Point::new(10, 2)]);
    assert_eq!(route.cost, 6);
}

#[test]
fn routing_a_terminal_to_itself_is_a_single_point() {
    let (layout, a, _) = facing_pair();
    let limits = SearchLimits::within(Rect::new(-5, -5, 30, 30));
    let route = find_path(&layout, a, a, &limits).unwrap();
    assert_eq!(route.points, vec![Point::new(4, 2)]);
    assert_eq!(route.cost, 0);
}

#[test]
fn unknown_terminals_fail_before_searching() {
    let (layout, a, _) = facing_pair();
    let limits = SearchLimits::within(Rect::new(-5, -5, 30, 30));
    let bogus = {
        // An id minted by a different, larger layout.
        let mut builder = Layout::builder();
        let c = builder.add_component(100, 100, 4, 4).unwrap();
        builder.add_terminal(c, 0, 2).unwrap();
        builder.add_terminal(c, 4, 2).unwrap();
        builder.add_terminal(c, 2, 0).unwrap()
    };
    let err = find_path(&layout, a, bogus, &limits).unwrap_err();
    assert!(matches!(err, RouteError::InvalidTerminal { .. }));
}

#[derive(Default)]
struct CountingObserver {
    snapshots: Vec<SearchSnapshot>,
}

impl SearchObserver for CountingObserver {
    fn on_progress(&mut self, snapshot: SearchSnapshot) {
        self.snapshots.push(snapshot);
    }
}

#[test]
fn observer_sees_every_expansion_at_interval_one() {
    let (layout, a, b) = detour_layout();
    let limits =
        SearchLimits::within(Rect::new(-5, -5, 40, 40)).with_observe_every(1);

    let mut observer = CountingObserver::default();
    let observed = find_path_observed(&layout, a, b, &limits, &mut observer).unwrap();

    assert_eq!(observer.snapshots.len() as u32, observed.stats.expanded);
    for window in observer.snapshots.windows(2) {
        assert!(window[0].iteration < window[1].iteration);
    }

    // The observer never changes the result.
    let plain = find_path(&layout, a, b, &limits).unwrap();
    assert_eq!(plain, observed);
}
