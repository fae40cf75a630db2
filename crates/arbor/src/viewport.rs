//! Zoom and pan over a rendered scene.
//!
//! A [`ViewportState`] is one affine transform applied on top of the scene:
//! `screen = pan + zoom * device`. Interactive zoom changes are clamped to
//! [`MIN_ZOOM`]..=[`MAX_ZOOM`]; fitting to content is not, so very large trees
//! can be shown whole.
//!
//! Fitting needs the measured scene, so it runs after rendering. A
//! [`ViewportController`] tracks which tree and style the current fit belongs
//! to through a [`FitToken`], discarding fits requested for content that has
//! since been replaced, and coalesces resize notifications into at most one
//! fit per frame.
//!
//! # Example
//!
//! ```
//! # use arbor::viewport::fit_bounds;
//! # use arbor_core::geometry::{Bounds, Point, Size};
//! let content = Bounds::new_from_center(Point::new(100.0, 100.0), Size::new(200.0, 100.0));
//! let state = fit_bounds(Some(content), Size::new(800.0, 500.0), 40.0);
//!
//! // Small content is never magnified past 0.9.
//! assert_eq!(state.zoom(), 0.9);
//! let center = state.to_screen(content.center());
//! assert!((center.x() - 400.0).abs() < 1e-3);
//! assert!((center.y() - 250.0).abs() < 1e-3);
//! ```

use std::hash::{DefaultHasher, Hash, Hasher};

use log::debug;

use arbor_core::{
    geometry::{Bounds, Point, Size},
    settings::{DiagramType, LayoutStyle},
    tree::TreeIdentity,
};

use crate::render::Scene;

pub const MIN_ZOOM: f32 = 0.5;
pub const MAX_ZOOM: f32 = 2.0;

/// Share of the ideal fit zoom actually applied, leaving a visible margin.
pub const FIT_SCALE: f32 = 0.9;

/// Default gap between fitted content and the container edges.
pub const DEFAULT_FIT_PADDING: f32 = 40.0;

/// Current zoom and pan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    zoom: f32,
    pan: Point,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::new(1.0, Point::default())
    }
}

impl ViewportState {
    /// Creates a state as given, without clamping.
    pub fn new(zoom: f32, pan: Point) -> Self {
        Self { zoom, pan }
    }

    /// The reset state of `diagram_type`: its default zoom and no pan.
    pub fn for_diagram(diagram_type: DiagramType) -> Self {
        Self::new(diagram_type.default_zoom(), Point::default())
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn pan(&self) -> Point {
        self.pan
    }

    /// Sets an absolute zoom clamped to the interactive range. NaN is ignored.
    pub fn set_zoom(&mut self, zoom: f32) -> &mut Self {
        if !zoom.is_nan() {
            self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        }
        self
    }

    /// Changes the zoom by `delta`, clamped to the interactive range.
    pub fn zoom_by(&mut self, delta: f32) -> &mut Self {
        self.set_zoom(self.zoom + delta)
    }

    pub fn set_pan(&mut self, pan: Point) -> &mut Self {
        self.pan = pan;
        self
    }

    pub fn pan_by(&mut self, delta: Point) -> &mut Self {
        self.pan = self.pan.add_point(delta);
        self
    }

    /// Maps a device-space point to the screen.
    pub fn to_screen(&self, device: Point) -> Point {
        self.pan.add_point(device.scale(self.zoom))
    }

    /// The SVG `transform` attribute value of this state.
    pub fn to_svg_transform(&self) -> String {
        format!(
            "translate({}, {}) scale({})",
            self.pan.x(),
            self.pan.y(),
            self.zoom
        )
    }
}

/// Fits `bounds` into a `container`, keeping `padding` free on every side.
///
/// Content smaller than the container is not magnified: the zoom is at most
/// [`FIT_SCALE`]. Missing or degenerate bounds, and an empty container, give
/// zoom 1 with the pan at the container center.
pub fn fit_bounds(bounds: Option<Bounds>, container: Size, padding: f32) -> ViewportState {
    let neutral = ViewportState::new(1.0, container.center());

    let Some(bounds) = bounds else {
        return neutral;
    };
    if container.is_empty() || bounds.width() <= 0.0 || bounds.height() <= 0.0 {
        return neutral;
    }

    let ideal = ((container.width() - 2.0 * padding) / bounds.width())
        .min((container.height() - 2.0 * padding) / bounds.height())
        .min(1.0);
    if !ideal.is_finite() || ideal <= 0.0 {
        return neutral;
    }

    let zoom = ideal * FIT_SCALE;
    let pan = container.center().sub_point(bounds.center().scale(zoom));
    ViewportState::new(zoom, pan)
}

/// Fits the measured content of `scene` into `container`.
pub fn fit(scene: &Scene, container: Size, padding: f32) -> ViewportState {
    let state = fit_bounds(scene.content_bounds(), container, padding);
    debug!(
        zoom = state.zoom(),
        pan_x = state.pan().x(),
        pan_y = state.pan().y();
        "Viewport fitted"
    );
    state
}

/// Identifies the content a fit was computed for.
///
/// Two tokens are equal exactly when the tree content, diagram type and
/// layout style are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FitToken(u64);

impl FitToken {
    pub fn new(
        identity: TreeIdentity,
        diagram_type: DiagramType,
        layout_style: LayoutStyle,
    ) -> Self {
        let mut hasher = DefaultHasher::new();
        identity.hash(&mut hasher);
        diagram_type.hash(&mut hasher);
        layout_style.hash(&mut hasher);
        Self(hasher.finish())
    }
}

/// A fit requested for the content current at request time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingFit {
    token: Option<FitToken>,
}

impl PendingFit {
    pub fn token(&self) -> Option<FitToken> {
        self.token
    }
}

/// Owns the viewport of one diagram view.
#[derive(Debug, Clone)]
pub struct ViewportController {
    state: ViewportState,
    token: Option<FitToken>,
    container: Size,
    padding: f32,
    resize_pending: bool,
}

impl ViewportController {
    pub fn new(container: Size, padding: f32) -> Self {
        Self {
            state: ViewportState::default(),
            token: None,
            container,
            padding,
            resize_pending: false,
        }
    }

    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ViewportState {
        &mut self.state
    }

    pub fn token(&self) -> Option<FitToken> {
        self.token
    }

    pub fn container(&self) -> Size {
        self.container
    }

    pub fn is_resize_pending(&self) -> bool {
        self.resize_pending
    }

    /// Switches to new content: resets zoom and pan and supersedes pending fits.
    pub fn reset_for(&mut self, token: FitToken, default_zoom: f32) -> &mut Self {
        self.state = ViewportState::new(default_zoom, Point::default());
        self.token = Some(token);
        self.resize_pending = false;
        self
    }

    /// Starts a fit for the current content.
    pub fn request_fit(&self) -> PendingFit {
        PendingFit { token: self.token }
    }

    /// Applies a fit once `scene` is measured.
    ///
    /// Returns `false`, leaving the state untouched, when the content changed
    /// since the fit was requested.
    pub fn complete_fit(&mut self, pending: PendingFit, scene: &Scene, container: Size) -> bool {
        if pending.token != self.token {
            debug!("Discarding superseded fit");
            return false;
        }
        self.container = container;
        self.state = fit(scene, container, self.padding);
        true
    }

    /// Records a container resize; the refit happens on the next frame.
    pub fn notify_resize(&mut self, container: Size) -> &mut Self {
        self.container = container;
        self.resize_pending = true;
        self
    }

    /// Refits once if any resize arrived since the last frame.
    pub fn on_frame(&mut self, scene: &Scene) -> bool {
        if !self.resize_pending {
            return false;
        }
        self.resize_pending = false;
        self.state = fit(scene, self.container, self.padding);
        true
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use arbor_core::tree::{Node, Tree};

    use super::*;
    use crate::{
        layout::{LayoutParams, layout},
        render::{RenderStyle, render},
    };

    fn scene_for(diagram_type: DiagramType) -> (Tree, Scene) {
        let tree = Tree::new(
            Node::new("root", "Topic")
                .with_child(Node::new("a", "A").with_child(Node::new("a1", "A1")))
                .with_child(Node::new("b", "B")),
        )
        .unwrap();
        let layout = layout(&tree, diagram_type, &LayoutParams::for_diagram(diagram_type));
        let scene = render(&layout, &RenderStyle::default());
        (tree, scene)
    }

    #[test]
    fn test_neutral_fit() {
        let container = Size::new(800.0, 500.0);

        let state = fit_bounds(None, container, 40.0);
        assert_approx_eq!(f32, state.zoom(), 1.0);
        assert_eq!(state.pan(), Point::new(400.0, 250.0));

        let flat = Bounds::new_from_top_left(Point::new(10.0, 10.0), Size::new(100.0, 0.0));
        assert_approx_eq!(f32, fit_bounds(Some(flat), container, 40.0).zoom(), 1.0);

        let content = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(10.0, 10.0));
        let state = fit_bounds(Some(content), Size::new(0.0, 0.0), 40.0);
        assert_approx_eq!(f32, state.zoom(), 1.0);
    }

    #[test]
    fn test_large_content_shrinks_below_clamp() {
        let content = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(4000.0, 1000.0));
        let state = fit_bounds(Some(content), Size::new(800.0, 500.0), 40.0);

        // Width bound: (800 - 80) / 4000 = 0.18.
        assert_approx_eq!(f32, state.zoom(), 0.18 * FIT_SCALE, epsilon = 1e-5);
        assert!(state.zoom() < MIN_ZOOM);
    }

    #[test]
    fn test_set_zoom_clamps_and_ignores_nan() {
        let mut state = ViewportState::default();
        state.set_zoom(5.0);
        assert_approx_eq!(f32, state.zoom(), MAX_ZOOM);
        state.set_zoom(0.1);
        assert_approx_eq!(f32, state.zoom(), MIN_ZOOM);
        state.set_zoom(f32::NAN);
        assert_approx_eq!(f32, state.zoom(), MIN_ZOOM);
    }

    #[test]
    fn test_svg_transform() {
        let state = ViewportState::new(1.5, Point::new(20.0, -10.0));
        assert_eq!(state.to_svg_transform(), "translate(20, -10) scale(1.5)");
        assert_eq!(state.to_screen(Point::new(10.0, 10.0)), Point::new(35.0, 5.0));
    }

    #[test]
    fn test_family_reset_zoom() {
        assert_approx_eq!(f32, ViewportState::for_diagram(DiagramType::Horizontal).zoom(), 0.8);
        assert_approx_eq!(f32, ViewportState::for_diagram(DiagramType::Fishbone).zoom(), 1.0);
    }

    #[test]
    fn test_fit_token_equality() {
        let (tree, _) = scene_for(DiagramType::MindMap);
        let a = FitToken::new(tree.identity(), DiagramType::MindMap, LayoutStyle::Standard);
        let b = FitToken::new(tree.identity(), DiagramType::MindMap, LayoutStyle::Standard);
        let c = FitToken::new(tree.identity(), DiagramType::MindMap, LayoutStyle::Rect);
        let d = FitToken::new(tree.identity(), DiagramType::Fishbone, LayoutStyle::Standard);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn test_superseded_fit_is_discarded() {
        let (tree, scene) = scene_for(DiagramType::MindMap);
        let container = Size::new(800.0, 500.0);
        let mut controller = ViewportController::new(container, DEFAULT_FIT_PADDING);

        controller.reset_for(
            FitToken::new(tree.identity(), DiagramType::MindMap, LayoutStyle::Standard),
            1.0,
        );
        let stale = controller.request_fit();

        controller.reset_for(
            FitToken::new(tree.identity(), DiagramType::Horizontal, LayoutStyle::Standard),
            0.8,
        );
        assert!(!controller.complete_fit(stale, &scene, container));
        assert_approx_eq!(f32, controller.state().zoom(), 0.8);
        assert_eq!(controller.state().pan(), Point::default());

        let current = controller.request_fit();
        assert!(controller.complete_fit(current, &scene, container));
        assert!(controller.state().zoom() <= FIT_SCALE);
    }

    #[test]
    fn test_resizes_coalesce_per_frame() {
        let (_, scene) = scene_for(DiagramType::LogicalStructure);
        let mut controller = ViewportController::new(Size::new(800.0, 500.0), DEFAULT_FIT_PADDING);

        assert!(!controller.on_frame(&scene));

        controller
            .notify_resize(Size::new(600.0, 400.0))
            .notify_resize(Size::new(1024.0, 768.0));
        assert!(controller.is_resize_pending());
        assert!(controller.on_frame(&scene));
        assert!(!controller.on_frame(&scene));
        assert_eq!(controller.container(), Size::new(1024.0, 768.0));

        let expected = fit(&scene, Size::new(1024.0, 768.0), DEFAULT_FIT_PADDING);
        assert_eq!(*controller.state(), expected);
    }

    #[test]
    fn test_fit_centers_rendered_scene() {
        let (_, scene) = scene_for(DiagramType::Fishbone);
        let container = Size::new(1000.0, 700.0);
        let state = fit(&scene, container, DEFAULT_FIT_PADDING);

        let bounds = scene.content_bounds().unwrap();
        let center = state.to_screen(bounds.center());
        assert_approx_eq!(f32, center.x(), 500.0, epsilon = 1e-3);
        assert_approx_eq!(f32, center.y(), 350.0, epsilon = 1e-3);
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn bounds_strategy() -> impl Strategy<Value = Bounds> {
        (-2000.0f32..2000.0, -2000.0f32..2000.0, 1.0f32..5000.0, 1.0f32..5000.0).prop_map(
            |(x, y, width, height)| {
                Bounds::new_from_top_left(Point::new(x, y), Size::new(width, height))
            },
        )
    }

    fn container_strategy() -> impl Strategy<Value = Size> {
        (200.0f32..2500.0, 200.0f32..2500.0).prop_map(|(width, height)| Size::new(width, height))
    }

    // ===================
    // Check functions
    // ===================

    /// The content center lands on the container center, zoom never exceeds 0.9,
    /// and the scaled content fits inside the padded container.
    fn check_fit_centers(bounds: Bounds, container: Size) -> Result<(), TestCaseError> {
        let padding = 20.0;
        let state = fit_bounds(Some(bounds), container, padding);

        prop_assert!(state.zoom() > 0.0);
        prop_assert!(state.zoom() <= FIT_SCALE + f32::EPSILON);

        let center = state.to_screen(bounds.center());
        let tolerance = 1e-3 * (1.0 + bounds.center().hypot());
        prop_assert!((center.x() - container.width() / 2.0).abs() < tolerance);
        prop_assert!((center.y() - container.height() / 2.0).abs() < tolerance);

        prop_assert!(bounds.width() * state.zoom() <= container.width() - 2.0 * padding + 1e-2);
        prop_assert!(bounds.height() * state.zoom() <= container.height() - 2.0 * padding + 1e-2);
        Ok(())
    }

    fn check_zoom_stays_clamped(deltas: &[f32]) -> Result<(), TestCaseError> {
        let mut state = ViewportState::default();
        for delta in deltas {
            state.zoom_by(*delta);
            prop_assert!((MIN_ZOOM..=MAX_ZOOM).contains(&state.zoom()));
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn fit_centers(bounds in bounds_strategy(), container in container_strategy()) {
            check_fit_centers(bounds, container)?;
        }

        #[test]
        fn zoom_stays_clamped(deltas in prop::collection::vec(-1.0f32..1.0, 0..50)) {
            check_zoom_stays_clamped(&deltas)?;
        }
    }
}
