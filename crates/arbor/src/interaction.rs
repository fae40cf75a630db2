//! Pointer, wheel, button and slider input applied to a viewport.
//!
//! Every event is a constant-time update of a [`ViewportState`]; nothing here
//! touches the layout or the rendered scene.

use log::trace;

use arbor_core::{geometry::Point, settings::DiagramType};

use crate::viewport::ViewportState;

/// Zoom change of one wheel notch.
pub const WHEEL_ZOOM_STEP: f32 = 0.05;

/// Zoom change of the zoom in and out buttons.
pub const BUTTON_ZOOM_STEP: f32 = 0.1;

/// The primary pointer button.
pub const PRIMARY_BUTTON: u16 = 0;

/// Input events understood by [`InteractionHandler`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionEvent {
    PointerDown { button: u16, position: Point },
    PointerMove { position: Point },
    PointerUp,
    PointerLeave,
    /// Scroll wheel; negative `delta_y` scrolls up and zooms in.
    Wheel { delta_y: f32 },
    ZoomIn,
    ZoomOut,
    /// Absolute zoom from a slider.
    SetZoom(f32),
    /// Back to the family default zoom with no pan.
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        last: Point,
    },
}

/// Applies [`InteractionEvent`]s to a viewport of one diagram family.
///
/// # Examples
///
/// ```
/// # use arbor::interaction::{InteractionEvent, InteractionHandler};
/// # use arbor::viewport::ViewportState;
/// # use arbor_core::{geometry::Point, settings::DiagramType};
/// let mut handler = InteractionHandler::new(DiagramType::MindMap);
/// let mut viewport = ViewportState::default();
///
/// let down = InteractionEvent::PointerDown {
///     button: 0,
///     position: Point::new(10.0, 10.0),
/// };
/// handler.handle(down, &mut viewport);
/// let position = Point::new(25.0, 5.0);
/// handler.handle(InteractionEvent::PointerMove { position }, &mut viewport);
/// handler.handle(InteractionEvent::PointerUp, &mut viewport);
///
/// assert_eq!(viewport.pan(), Point::new(15.0, -5.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionHandler {
    diagram_type: DiagramType,
    drag: DragState,
}

impl InteractionHandler {
    pub fn new(diagram_type: DiagramType) -> Self {
        Self {
            diagram_type,
            drag: DragState::Idle,
        }
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn diagram_type(&self) -> DiagramType {
        self.diagram_type
    }

    /// Switches the family [`InteractionEvent::Reset`] returns to, ending any drag.
    pub fn set_diagram_type(&mut self, diagram_type: DiagramType) -> &mut Self {
        self.diagram_type = diagram_type;
        self.drag = DragState::Idle;
        self
    }

    pub fn handle(&mut self, event: InteractionEvent, viewport: &mut ViewportState) {
        trace!(event:? = event; "Handling interaction");

        match event {
            InteractionEvent::PointerDown { button, position } => {
                if button == PRIMARY_BUTTON {
                    self.drag = DragState::Dragging { last: position };
                }
            }
            InteractionEvent::PointerMove { position } => {
                if let DragState::Dragging { last } = self.drag {
                    viewport.pan_by(position.sub_point(last));
                    self.drag = DragState::Dragging { last: position };
                }
            }
            InteractionEvent::PointerUp | InteractionEvent::PointerLeave => {
                self.drag = DragState::Idle;
            }
            InteractionEvent::Wheel { delta_y } => {
                let step = if delta_y < 0.0 {
                    WHEEL_ZOOM_STEP
                } else {
                    -WHEEL_ZOOM_STEP
                };
                viewport.zoom_by(step);
            }
            InteractionEvent::ZoomIn => {
                viewport.zoom_by(BUTTON_ZOOM_STEP);
            }
            InteractionEvent::ZoomOut => {
                viewport.zoom_by(-BUTTON_ZOOM_STEP);
            }
            InteractionEvent::SetZoom(zoom) => {
                viewport.set_zoom(zoom);
            }
            InteractionEvent::Reset => {
                *viewport = ViewportState::for_diagram(self.diagram_type);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::viewport::{MAX_ZOOM, MIN_ZOOM};

    fn down(x: f32, y: f32) -> InteractionEvent {
        InteractionEvent::PointerDown {
            button: PRIMARY_BUTTON,
            position: Point::new(x, y),
        }
    }

    fn moved(x: f32, y: f32) -> InteractionEvent {
        InteractionEvent::PointerMove {
            position: Point::new(x, y),
        }
    }

    #[test]
    fn test_drag_accumulates_pan() {
        let mut handler = InteractionHandler::new(DiagramType::MindMap);
        let mut viewport = ViewportState::default();

        handler.handle(down(0.0, 0.0), &mut viewport);
        handler.handle(moved(10.0, 5.0), &mut viewport);
        handler.handle(moved(30.0, 0.0), &mut viewport);
        assert_eq!(viewport.pan(), Point::new(30.0, 0.0));
        assert_eq!(
            handler.drag_state(),
            DragState::Dragging {
                last: Point::new(30.0, 0.0)
            }
        );

        handler.handle(InteractionEvent::PointerLeave, &mut viewport);
        handler.handle(moved(100.0, 100.0), &mut viewport);
        assert_eq!(viewport.pan(), Point::new(30.0, 0.0));
        assert_eq!(handler.drag_state(), DragState::Idle);
    }

    #[test]
    fn test_secondary_button_does_not_drag() {
        let mut handler = InteractionHandler::new(DiagramType::MindMap);
        let mut viewport = ViewportState::default();

        handler.handle(
            InteractionEvent::PointerDown {
                button: 2,
                position: Point::new(0.0, 0.0),
            },
            &mut viewport,
        );
        handler.handle(moved(50.0, 50.0), &mut viewport);
        assert_eq!(viewport.pan(), Point::default());
    }

    #[test]
    fn test_wheel_direction() {
        let mut handler = InteractionHandler::new(DiagramType::MindMap);
        let mut viewport = ViewportState::default();

        handler.handle(InteractionEvent::Wheel { delta_y: -120.0 }, &mut viewport);
        assert_approx_eq!(f32, viewport.zoom(), 1.05);
        handler.handle(InteractionEvent::Wheel { delta_y: 120.0 }, &mut viewport);
        handler.handle(InteractionEvent::Wheel { delta_y: 0.0 }, &mut viewport);
        assert_approx_eq!(f32, viewport.zoom(), 0.95, epsilon = 1e-6);
    }

    #[test]
    fn test_buttons_clamp() {
        let mut handler = InteractionHandler::new(DiagramType::Fishbone);
        let mut viewport = ViewportState::default();

        for _ in 0..30 {
            handler.handle(InteractionEvent::ZoomIn, &mut viewport);
        }
        assert_approx_eq!(f32, viewport.zoom(), MAX_ZOOM);

        for _ in 0..30 {
            handler.handle(InteractionEvent::ZoomOut, &mut viewport);
        }
        assert_approx_eq!(f32, viewport.zoom(), MIN_ZOOM);
    }

    #[test]
    fn test_slider_ignores_nan() {
        let mut handler = InteractionHandler::new(DiagramType::MindMap);
        let mut viewport = ViewportState::default();

        handler.handle(InteractionEvent::SetZoom(1.7), &mut viewport);
        assert_approx_eq!(f32, viewport.zoom(), 1.7);
        handler.handle(InteractionEvent::SetZoom(f32::NAN), &mut viewport);
        assert_approx_eq!(f32, viewport.zoom(), 1.7);
        handler.handle(InteractionEvent::SetZoom(9.0), &mut viewport);
        assert_approx_eq!(f32, viewport.zoom(), MAX_ZOOM);
    }

    #[test]
    fn test_reset_uses_family_zoom() {
        let mut handler = InteractionHandler::new(DiagramType::Horizontal);
        let mut viewport = ViewportState::new(1.6, Point::new(40.0, 40.0));

        handler.handle(InteractionEvent::Reset, &mut viewport);
        assert_approx_eq!(f32, viewport.zoom(), 0.8);
        assert_eq!(viewport.pan(), Point::default());

        handler.set_diagram_type(DiagramType::Markdown);
        handler.handle(InteractionEvent::Reset, &mut viewport);
        assert_approx_eq!(f32, viewport.zoom(), 1.0);
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;
    use crate::viewport::{MAX_ZOOM, MIN_ZOOM};

    // ===================
    // Strategies
    // ===================

    fn event_strategy() -> impl Strategy<Value = InteractionEvent> {
        let point = (-500.0f32..500.0, -500.0f32..500.0).prop_map(|(x, y)| Point::new(x, y));
        prop_oneof![
            (0u16..3, point.clone())
                .prop_map(|(button, position)| InteractionEvent::PointerDown { button, position }),
            point.prop_map(|position| InteractionEvent::PointerMove { position }),
            Just(InteractionEvent::PointerUp),
            Just(InteractionEvent::PointerLeave),
            (-300.0f32..300.0).prop_map(|delta_y| InteractionEvent::Wheel { delta_y }),
            Just(InteractionEvent::ZoomIn),
            Just(InteractionEvent::ZoomOut),
            (-5.0f32..5.0).prop_map(InteractionEvent::SetZoom),
            Just(InteractionEvent::SetZoom(f32::NAN)),
            Just(InteractionEvent::Reset),
        ]
    }

    // ===================
    // Check functions
    // ===================

    fn check_zoom_clamped(events: &[InteractionEvent]) -> Result<(), TestCaseError> {
        let mut handler = InteractionHandler::new(DiagramType::Horizontal);
        let mut viewport = ViewportState::default();

        for event in events {
            handler.handle(*event, &mut viewport);
            prop_assert!((MIN_ZOOM..=MAX_ZOOM).contains(&viewport.zoom()));
            prop_assert!(viewport.pan().is_finite());
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn zoom_clamped(events in prop::collection::vec(event_strategy(), 0..100)) {
            check_zoom_clamped(&events)?;
        }
    }
}
