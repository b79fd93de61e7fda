mod clock;

pub use clock::{Clock, ManualClock, SystemClock};

use std::time::Duration;

use tracing::debug;

use crate::config::EditorConfig;
use crate::document::ElementSink;
use crate::math::{distance, Point2};
use crate::operations::snap::{is_closing_shape, point_snap, SnapComposer};
use crate::topology::{Element, Plan, Wall};

/// State of a wall drawing session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawState {
    Idle,
    Drawing {
        /// Start of the wall the next click will commit.
        start: Point2,
        /// Snapped pointer position for rendering, cleared after every commit.
        preview_end: Option<Point2>,
        /// Whether the preview is locked to an axis.
        axis_snapped: bool,
    },
}

/// What a click did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// A new session started at the clicked point.
    Started,
    /// A wall was committed and drawing continues from its end.
    Committed,
    /// A closing wall back to the first corner was committed; the session ended.
    Closed,
    /// A double click ended the session without a new wall.
    Finished,
    /// The click landed on the current start point; nothing happened.
    Ignored,
    /// The sink refused the wall, closing walls included; drawing continues
    /// from the same start.
    Rejected,
}

/// Multi-click polyline capture for walls.
///
/// Each click after the first commits a wall from the previous click to the
/// snapped pointer position. The session ends on a double click, on a click
/// that closes the outline back to the first wall's start, or on
/// [`WallDrawing::cancel`].
#[derive(Debug)]
pub struct WallDrawing<C: Clock> {
    state: DrawState,
    composer: SnapComposer,
    snap_distance: f64,
    double_click: Duration,
    wall_thickness: f64,
    min_segment: f64,
    last_click: Option<Duration>,
    clock: C,
}

impl<C: Clock> WallDrawing<C> {
    #[must_use]
    pub fn new(config: &EditorConfig, clock: C) -> Self {
        Self {
            state: DrawState::Idle,
            composer: SnapComposer::from_config(config),
            snap_distance: config.snap_distance,
            double_click: Duration::from_millis(config.double_click_ms),
            wall_thickness: config.wall_thickness,
            min_segment: config.vertex_tolerance,
            last_click: None,
            clock,
        }
    }

    #[must_use]
    pub fn state(&self) -> &DrawState {
        &self.state
    }

    #[must_use]
    pub fn is_drawing(&self) -> bool {
        matches!(self.state, DrawState::Drawing { .. })
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Recomputes the preview end for a pointer move. Ignored when idle.
    pub fn pointer_moved(&mut self, point: Point2, plan: &Plan) {
        let DrawState::Drawing { start, .. } = self.state else {
            return;
        };
        let outcome = self
            .composer
            .resolve(&point, Some(&start), &plan.wall_values());
        self.state = DrawState::Drawing {
            start,
            preview_end: Some(outcome.point),
            axis_snapped: outcome.axis_snapped(),
        };
    }

    /// Handles a click at `point`, committing walls through `sink`.
    ///
    /// The clicked point is snapped relative to the current start, exactly
    /// as [`WallDrawing::pointer_moved`] snaps the preview.
    pub fn click<S: ElementSink + ?Sized>(&mut self, point: Point2, sink: &mut S) -> ClickOutcome {
        let now = self.clock.now();
        let since_last = self.last_click.map(|last| now.saturating_sub(last));
        self.last_click = Some(now);

        let DrawState::Drawing { start, .. } = self.state else {
            return self.start_session(point, sink.snapshot());
        };

        if since_last.is_some_and(|delta| delta < self.double_click) {
            self.finish(sink);
            return ClickOutcome::Finished;
        }

        let walls = sink.snapshot().wall_values();
        let end = self.composer.resolve(&point, Some(&start), &walls).point;

        if is_closing_shape(&end, &walls, self.snap_distance) {
            if let Some(first) = walls.first() {
                let corner = first.start;
                if distance(&start, &corner) >= self.min_segment
                    && sink
                        .add_element(Element::Wall(Wall::new(start, corner, self.wall_thickness)))
                        .is_none()
                {
                    debug!(x = corner.x, y = corner.y, "closing wall refused");
                    self.state = DrawState::Drawing {
                        start,
                        preview_end: None,
                        axis_snapped: false,
                    };
                    return ClickOutcome::Rejected;
                }
            }
            self.finish(sink);
            return ClickOutcome::Closed;
        }

        if distance(&start, &end) < self.min_segment {
            return ClickOutcome::Ignored;
        }

        let committed = sink
            .add_element(Element::Wall(Wall::new(start, end, self.wall_thickness)))
            .is_some();
        let next_start = if committed { end } else { start };
        self.state = DrawState::Drawing {
            start: next_start,
            preview_end: None,
            axis_snapped: false,
        };
        if committed {
            debug!(x = end.x, y = end.y, "wall committed, drawing continues");
            ClickOutcome::Committed
        } else {
            ClickOutcome::Rejected
        }
    }

    fn start_session(&mut self, point: Point2, plan: &Plan) -> ClickOutcome {
        let start = point_snap(&point, &plan.wall_values(), self.snap_distance);
        debug!(x = start.x, y = start.y, "wall drawing started");
        self.state = DrawState::Drawing {
            start,
            preview_end: Some(start),
            axis_snapped: false,
        };
        ClickOutcome::Started
    }

    /// Ends the session normally and notifies the sink.
    pub fn finish<S: ElementSink + ?Sized>(&mut self, sink: &mut S) {
        self.state = DrawState::Idle;
        sink.session_finished();
    }

    /// Abandons the session without committing anything.
    ///
    /// Returns `true` if a session was in progress.
    pub fn cancel(&mut self) -> bool {
        if !self.is_drawing() {
            return false;
        }
        debug!("wall drawing cancelled");
        self.state = DrawState::Idle;
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::document::Document;

    const SLOW: u64 = 800;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn setup(clock: &ManualClock) -> (WallDrawing<&ManualClock>, Document) {
        let config = EditorConfig::default();
        (WallDrawing::new(&config, clock), Document::new(&config))
    }

    fn slow_click(
        drawing: &mut WallDrawing<&ManualClock>,
        doc: &mut Document,
        point: Point2,
    ) -> ClickOutcome {
        drawing.clock().advance_ms(SLOW);
        drawing.click(point, doc)
    }

    #[test]
    fn first_click_starts_drawing() {
        let clock = ManualClock::new();
        let (mut drawing, mut doc) = setup(&clock);
        assert_eq!(drawing.click(p(10.4, 20.6), &mut doc), ClickOutcome::Started);
        assert_eq!(
            drawing.state(),
            &DrawState::Drawing {
                start: p(10.0, 21.0),
                preview_end: Some(p(10.0, 21.0)),
                axis_snapped: false
            }
        );
        assert!(doc.plan().is_empty());
    }

    #[test]
    fn second_click_commits_and_continues() {
        let clock = ManualClock::new();
        let (mut drawing, mut doc) = setup(&clock);
        slow_click(&mut drawing, &mut doc, p(0.0, 0.0));
        assert_eq!(slow_click(&mut drawing, &mut doc, p(300.0, 0.0)), ClickOutcome::Committed);

        let walls = doc.plan().wall_values();
        assert_eq!(walls.len(), 1);
        assert_eq!((walls[0].start, walls[0].end), (p(0.0, 0.0), p(300.0, 0.0)));
        assert_eq!(
            drawing.state(),
            &DrawState::Drawing {
                start: p(300.0, 0.0),
                preview_end: None,
                axis_snapped: false
            }
        );
    }

    #[test]
    fn double_click_finishes_without_extra_wall() {
        let clock = ManualClock::new();
        let (mut drawing, mut doc) = setup(&clock);
        slow_click(&mut drawing, &mut doc, p(0.0, 0.0));
        slow_click(&mut drawing, &mut doc, p(300.0, 0.0));

        clock.advance_ms(120);
        assert_eq!(drawing.click(p(300.0, 0.0), &mut doc), ClickOutcome::Finished);
        assert_eq!(drawing.state(), &DrawState::Idle);
        assert_eq!(doc.plan().walls().count(), 1);
        assert_eq!(doc.finished_sessions(), 1);
    }

    #[test]
    fn double_click_window_is_exclusive() {
        let clock = ManualClock::new();
        let (mut drawing, mut doc) = setup(&clock);
        slow_click(&mut drawing, &mut doc, p(0.0, 0.0));
        slow_click(&mut drawing, &mut doc, p(300.0, 0.0));
        clock.advance_ms(299);
        assert_eq!(drawing.click(p(300.0, 200.0), &mut doc), ClickOutcome::Finished);
        assert_eq!(doc.plan().walls().count(), 1);

        slow_click(&mut drawing, &mut doc, p(0.0, 500.0));
        clock.advance_ms(300);
        assert_eq!(drawing.click(p(300.0, 500.0), &mut doc), ClickOutcome::Committed);
        assert_eq!(doc.plan().walls().count(), 2);
        assert!(drawing.is_drawing());
    }

    #[test]
    fn closing_click_commits_wall_back_to_first_corner() {
        let clock = ManualClock::new();
        let (mut drawing, mut doc) = setup(&clock);
        let a = p(0.0, 0.0);
        let b = p(300.0, 0.0);
        let c = p(300.0, 200.0);
        slow_click(&mut drawing, &mut doc, a);
        slow_click(&mut drawing, &mut doc, b);
        slow_click(&mut drawing, &mut doc, c);

        assert_eq!(slow_click(&mut drawing, &mut doc, p(6.0, 9.0)), ClickOutcome::Closed);
        let walls = doc.plan().wall_values();
        assert_eq!(walls.len(), 3);
        assert_eq!((walls[2].start, walls[2].end), (c, a));
        assert!(!drawing.is_drawing());
        assert_eq!(doc.finished_sessions(), 1);

        // The closing wall shares the first wall's corner.
        let plan = doc.plan();
        let ids: Vec<_> = plan.walls().map(|(id, _)| id).collect();
        let first = plan.wall_vertex(ids[0], crate::topology::Endpoint::Start).unwrap();
        let last = plan.wall_vertex(ids[2], crate::topology::Endpoint::End).unwrap();
        assert_eq!(first, last);
    }

    #[test]
    fn cancel_discards_session() {
        let clock = ManualClock::new();
        let (mut drawing, mut doc) = setup(&clock);
        slow_click(&mut drawing, &mut doc, p(0.0, 0.0));
        drawing.pointer_moved(p(200.0, 4.0), doc.plan());
        assert!(drawing.cancel());
        assert!(!drawing.cancel());
        assert_eq!(drawing.state(), &DrawState::Idle);
        assert!(doc.plan().is_empty());
        assert_eq!(doc.finished_sessions(), 0);
    }

    #[test]
    fn preview_tracks_axis_lock() {
        let clock = ManualClock::new();
        let (mut drawing, mut doc) = setup(&clock);
        slow_click(&mut drawing, &mut doc, p(100.0, 100.0));

        drawing.pointer_moved(p(260.0, 106.0), doc.plan());
        assert_eq!(
            drawing.state(),
            &DrawState::Drawing {
                start: p(100.0, 100.0),
                preview_end: Some(p(260.0, 100.0)),
                axis_snapped: true
            }
        );

        drawing.pointer_moved(p(260.0, 180.0), doc.plan());
        assert!(matches!(
            drawing.state(),
            DrawState::Drawing {
                axis_snapped: false,
                ..
            }
        ));

        // Clicks go through the same snap composition as the preview.
        slow_click(&mut drawing, &mut doc, p(262.0, 111.0));
        assert_eq!(doc.plan().wall_values()[0].end, p(262.0, 100.0));
    }

    #[test]
    fn click_on_start_point_is_ignored() {
        let clock = ManualClock::new();
        let (mut drawing, mut doc) = setup(&clock);
        slow_click(&mut drawing, &mut doc, p(50.0, 50.0));
        assert_eq!(slow_click(&mut drawing, &mut doc, p(51.0, 50.0)), ClickOutcome::Ignored);
        assert!(drawing.is_drawing());
        assert!(doc.plan().is_empty());
    }

    /// Records every callback and refuses all additions.
    #[derive(Default)]
    struct RefusingSink {
        plan: Plan,
        refused: Vec<Element>,
        finished: usize,
    }

    impl ElementSink for RefusingSink {
        fn snapshot(&self) -> &Plan {
            &self.plan
        }

        fn add_element(&mut self, element: Element) -> Option<crate::topology::ElementId> {
            self.refused.push(element);
            None
        }

        fn update_element(
            &mut self,
            _id: crate::topology::ElementId,
            _update: crate::topology::ElementUpdate,
        ) -> bool {
            false
        }

        fn delete_element(&mut self, _id: crate::topology::ElementId) -> bool {
            false
        }

        fn session_finished(&mut self) {
            self.finished += 1;
        }
    }

    #[test]
    fn refused_wall_keeps_start() {
        let clock = ManualClock::new();
        let mut drawing = WallDrawing::new(&EditorConfig::default(), &clock);
        let mut sink = RefusingSink::default();

        clock.advance_ms(SLOW);
        drawing.click(p(0.0, 0.0), &mut sink);
        clock.advance_ms(SLOW);
        assert_eq!(drawing.click(p(0.0, 200.0), &mut sink), ClickOutcome::Rejected);
        assert_eq!(sink.refused.len(), 1);
        assert!(matches!(
            drawing.state(),
            DrawState::Drawing { start, .. } if *start == p(0.0, 0.0)
        ));

        clock.advance_ms(50);
        drawing.click(p(0.0, 200.0), &mut sink);
        assert_eq!(sink.finished, 1);
        assert_eq!(sink.refused.len(), 1);
    }

    #[test]
    fn refused_closing_wall_keeps_session_open() {
        let clock = ManualClock::new();
        let mut drawing = WallDrawing::new(&EditorConfig::default(), &clock);
        let mut sink = RefusingSink::default();
        sink.plan.add_wall(Wall::new(p(0.0, 0.0), p(300.0, 0.0), 10.0)).unwrap();
        sink.plan.add_wall(Wall::new(p(300.0, 0.0), p(300.0, 200.0), 10.0)).unwrap();

        clock.advance_ms(SLOW);
        assert_eq!(drawing.click(p(302.0, 197.0), &mut sink), ClickOutcome::Started);
        clock.advance_ms(SLOW);
        assert_eq!(drawing.click(p(6.0, 9.0), &mut sink), ClickOutcome::Rejected);
        assert_eq!(sink.refused.len(), 1);
        assert_eq!(sink.finished, 0);
        assert!(matches!(
            drawing.state(),
            DrawState::Drawing { start, .. } if *start == p(300.0, 200.0)
        ));
    }

    #[test]
    fn snapped_walls_share_exact_coordinates() {
        let clock = ManualClock::new();
        let (mut drawing, mut doc) = setup(&clock);
        slow_click(&mut drawing, &mut doc, p(0.0, 0.0));
        slow_click(&mut drawing, &mut doc, p(250.0, 0.0));
        drawing.finish(&mut doc);

        // A second session starting near the corner snaps onto it.
        slow_click(&mut drawing, &mut doc, p(243.0, 12.0));
        slow_click(&mut drawing, &mut doc, p(251.0, 300.0));

        let walls = doc.plan().wall_values();
        assert_eq!(walls[1].start.x.to_bits(), walls[0].end.x.to_bits());
        assert_eq!(walls[1].start.y.to_bits(), walls[0].end.y.to_bits());
    }
}
