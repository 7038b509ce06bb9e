//! Fixed-aspect crop engine.
//!
//! An explicit state machine over abstract pointer events, independent of
//! any rendering surface. Geometry lives in display-canvas pixel space; the
//! apply step maps the live selection back to source pixels and emits a
//! fixed-resolution JPEG.

#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use image::{imageops::FilterType, DynamicImage, GenericImageView};

use crate::error::{Error, Result};

use super::resize::encode_jpeg;

/// Fixed selection aspect ratio (16:10)
pub const ASPECT_RATIO: f64 = 1.6;
/// Output width of an applied crop
pub const OUTPUT_WIDTH: u32 = 480;
/// Output height of an applied crop
pub const OUTPUT_HEIGHT: u32 = 300;
/// Smallest selection width the resize gesture can reach
pub const MIN_SELECTION_WIDTH: f64 = 50.0;
/// Corner-handle hit tolerance in display pixels, per axis
pub const HANDLE_TOLERANCE: f64 = 8.0;
/// Edge length of a drawn corner handle
pub const HANDLE_SIZE: f64 = 8.0;
/// JPEG quality for applied crops
pub const CROP_JPEG_QUALITY: u8 = 92;

const MAX_CANVAS_WIDTH: f64 = 500.0;
const MAX_CANVAS_HEIGHT: f64 = 350.0;
const DEFAULT_MARGIN: f64 = 0.9;

/// Axis-aligned rectangle in display-canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }

    fn corners(&self) -> [(f64, f64); 4] {
        [
            (self.x, self.y),
            (self.x + self.width, self.y),
            (self.x, self.y + self.height),
            (self.x + self.width, self.y + self.height),
        ]
    }
}

/// Observable machine phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropPhase {
    /// No image loaded
    Idle,
    /// Selection placed, no active gesture
    Selecting,
    /// Pointer is translating the selection body
    Dragging,
    /// Pointer is scaling the selection from a corner handle
    Resizing,
}

/// Pointer state captured when a gesture starts
#[derive(Debug, Clone, Copy)]
struct Gesture {
    grab_x: f64,
    grab_y: f64,
    origin: Rect,
}

#[derive(Debug, Clone, Copy)]
enum Mode {
    Selecting,
    Dragging(Gesture),
    Resizing(Gesture),
}

#[derive(Debug, Clone, Copy)]
struct Session {
    source_width: f64,
    source_height: f64,
    canvas_width: f64,
    canvas_height: f64,
    selection: Rect,
    mode: Mode,
}

/// Declarative redraw plan emitted after every state mutation: the source
/// image draws first, then the scrim, the punched-out hole, the border,
/// and the corner handles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayFrame {
    /// Semi-transparent cover over the whole canvas
    pub scrim: Rect,
    /// Fully transparent punch-out matching the selection
    pub hole: Rect,
    /// Stroked outline around the hole
    pub border: Rect,
    /// Filled corner handles, centered on the selection corners
    pub handles: [Rect; 4],
}

/// Interactive crop engine for one image at a time.
///
/// Owns the selection for the lifetime of a crop session; `apply` and
/// `cancel` both discard it.
#[derive(Debug, Default)]
pub struct CropEngine {
    session: Option<Session>,
}

impl CropEngine {
    #[must_use]
    pub fn new() -> Self {
        Self { session: None }
    }

    /// Current machine phase
    #[must_use]
    pub fn phase(&self) -> CropPhase {
        match &self.session {
            None => CropPhase::Idle,
            Some(session) => match session.mode {
                Mode::Selecting => CropPhase::Selecting,
                Mode::Dragging(_) => CropPhase::Dragging,
                Mode::Resizing(_) => CropPhase::Resizing,
            },
        }
    }

    /// Display-canvas size for a source image: scaled to fit 500x350 while
    /// keeping the source ratio
    #[must_use]
    pub fn fit_canvas(source_width: u32, source_height: u32) -> (f64, f64) {
        let width = f64::from(source_width);
        let height = f64::from(source_height);
        let scale = (MAX_CANVAS_WIDTH / width).min(MAX_CANVAS_HEIGHT / height);
        (width * scale, height * scale)
    }

    /// Load an image: Idle -> Selecting with the auto-centered default
    /// selection.
    ///
    /// Returns the placed selection. A session already in progress is
    /// replaced.
    pub fn begin(
        &mut self,
        source_width: u32,
        source_height: u32,
        canvas_width: f64,
        canvas_height: f64,
    ) -> Result<Rect> {
        if source_width == 0 || source_height == 0 {
            return Err(Error::InvalidInput(
                "Image dimensions must be greater than zero".to_string(),
            ));
        }
        if canvas_width <= 0.0 || canvas_height <= 0.0 {
            return Err(Error::InvalidInput(
                "Canvas dimensions must be greater than zero".to_string(),
            ));
        }

        let selection = default_selection(canvas_width, canvas_height);
        self.session = Some(Session {
            source_width: f64::from(source_width),
            source_height: f64::from(source_height),
            canvas_width,
            canvas_height,
            selection,
            mode: Mode::Selecting,
        });
        Ok(selection)
    }

    /// Discard the session: any state -> Idle
    pub fn cancel(&mut self) {
        self.session = None;
    }

    /// Current selection in display coordinates
    #[must_use]
    pub fn selection(&self) -> Option<Rect> {
        self.session.map(|session| session.selection)
    }

    /// Pointer press in display coordinates.
    ///
    /// A press within a corner-handle hit zone starts a resize; a press
    /// inside the selection body starts a drag; anything else is ignored.
    /// Out-of-canvas coordinates are clamped, not rejected.
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if !matches!(session.mode, Mode::Selecting) {
            return;
        }

        let (x, y) = clamp_point(x, y, session.canvas_width, session.canvas_height);
        let gesture = Gesture {
            grab_x: x,
            grab_y: y,
            origin: session.selection,
        };

        let on_handle = session.selection.corners().iter().any(|&(cx, cy)| {
            (x - cx).abs() <= HANDLE_TOLERANCE && (y - cy).abs() <= HANDLE_TOLERANCE
        });

        if on_handle {
            session.mode = Mode::Resizing(gesture);
        } else if session.selection.contains(x, y) {
            session.mode = Mode::Dragging(gesture);
        }
    }

    /// Pointer move; translates or scales depending on the active gesture.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let (x, y) = clamp_point(x, y, session.canvas_width, session.canvas_height);

        match session.mode {
            Mode::Selecting => {}
            Mode::Dragging(gesture) => {
                let delta_x = x - gesture.grab_x;
                let delta_y = y - gesture.grab_y;

                let max_x = (session.canvas_width - session.selection.width).max(0.0);
                let max_y = (session.canvas_height - session.selection.height).max(0.0);
                session.selection.x = (gesture.origin.x + delta_x).clamp(0.0, max_x);
                session.selection.y = (gesture.origin.y + delta_y).clamp(0.0, max_y);
            }
            Mode::Resizing(gesture) => {
                let delta_x = x - gesture.grab_x;
                let delta_y = y - gesture.grab_y;

                // Larger-magnitude axis wins; the sum picks the sign
                let magnitude = delta_x.abs().max(delta_y.abs());
                let delta = if delta_x + delta_y > 0.0 {
                    magnitude
                } else {
                    -magnitude
                };

                let mut new_width = (gesture.origin.width + delta).max(MIN_SELECTION_WIDTH);
                let mut new_height = new_width / ASPECT_RATIO;

                // Anchored at the unchanged top-left corner
                let max_width = session.canvas_width - gesture.origin.x;
                let max_height = session.canvas_height - gesture.origin.y;
                if new_width > max_width {
                    new_width = max_width;
                    new_height = new_width / ASPECT_RATIO;
                }
                if new_height > max_height {
                    new_height = max_height;
                    new_width = new_height * ASPECT_RATIO;
                }

                session.selection.width = new_width;
                session.selection.height = new_height;
            }
        }
    }

    /// Pointer release: Dragging/Resizing -> Selecting
    pub fn pointer_up(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.mode = Mode::Selecting;
        }
    }

    /// Place the selection explicitly (non-interactive callers).
    ///
    /// Height derives from the fixed aspect ratio and the rectangle is
    /// clamped to the canvas like a resize gesture.
    pub fn set_selection(&mut self, x: f64, y: f64, width: f64) -> Result<Rect> {
        let Some(session) = self.session.as_mut() else {
            return Err(Error::InvalidInput(
                "No crop session in progress".to_string(),
            ));
        };

        let x = x.clamp(0.0, session.canvas_width);
        let y = y.clamp(0.0, session.canvas_height);
        let mut width = width.max(MIN_SELECTION_WIDTH);
        let mut height = width / ASPECT_RATIO;

        let max_width = session.canvas_width - x;
        let max_height = session.canvas_height - y;
        if width > max_width {
            width = max_width;
            height = width / ASPECT_RATIO;
        }
        if height > max_height {
            height = max_height;
            width = height * ASPECT_RATIO;
        }
        if width <= 0.0 || height <= 0.0 {
            return Err(Error::InvalidInput(
                "Selection would have zero area".to_string(),
            ));
        }

        session.selection = Rect::new(x, y, width, height);
        Ok(session.selection)
    }

    /// Live selection mapped to source-image pixels via independent X/Y
    /// scale factors
    #[must_use]
    pub fn source_rect(&self) -> Option<Rect> {
        self.session.map(|session| {
            let scale_x = session.source_width / session.canvas_width;
            let scale_y = session.source_height / session.canvas_height;
            Rect::new(
                session.selection.x * scale_x,
                session.selection.y * scale_y,
                session.selection.width * scale_x,
                session.selection.height * scale_y,
            )
        })
    }

    /// Redraw plan for the current state
    #[must_use]
    pub fn overlay(&self) -> Option<OverlayFrame> {
        self.session.map(|session| {
            let selection = session.selection;
            let handles = selection.corners().map(|(cx, cy)| {
                Rect::new(
                    cx - HANDLE_SIZE / 2.0,
                    cy - HANDLE_SIZE / 2.0,
                    HANDLE_SIZE,
                    HANDLE_SIZE,
                )
            });
            OverlayFrame {
                scrim: Rect::new(0.0, 0.0, session.canvas_width, session.canvas_height),
                hole: selection,
                border: selection,
                handles,
            }
        })
    }

    /// Apply the crop: map the live selection to the original-resolution
    /// source, resample to 480x300, encode JPEG, -> Idle.
    ///
    /// The source must be the image the session was started for.
    pub fn apply(&mut self, source: &DynamicImage) -> Result<Vec<u8>> {
        let Some(session) = self.session else {
            return Err(Error::InvalidInput(
                "No crop session in progress".to_string(),
            ));
        };

        let (source_w, source_h) = source.dimensions();
        if source_w != session.source_width as u32 || source_h != session.source_height as u32 {
            return Err(Error::InvalidInput(
                "Source image does not match the crop session".to_string(),
            ));
        }

        let rect = self
            .source_rect()
            .ok_or_else(|| Error::InvalidInput("No crop session in progress".to_string()))?;

        let crop_w = (rect.width.round() as u32).clamp(1, source_w);
        let crop_h = (rect.height.round() as u32).clamp(1, source_h);
        let crop_x = (rect.x.round() as u32).min(source_w - crop_w);
        let crop_y = (rect.y.round() as u32).min(source_h - crop_h);

        tracing::debug!(crop_x, crop_y, crop_w, crop_h, "Applying crop");
        let cropped = source.crop_imm(crop_x, crop_y, crop_w, crop_h);
        let output = cropped.resize_exact(OUTPUT_WIDTH, OUTPUT_HEIGHT, FilterType::Lanczos3);
        let bytes = encode_jpeg(&output, CROP_JPEG_QUALITY)?;

        self.session = None;
        Ok(bytes)
    }
}

/// Centered default placement: maximize area subject to 16:10 and a 90%
/// soft margin on the binding axis.
fn default_selection(canvas_width: f64, canvas_height: f64) -> Rect {
    let mut width = (canvas_width * DEFAULT_MARGIN).min(canvas_height * ASPECT_RATIO);
    let mut height = width / ASPECT_RATIO;

    if height > canvas_height * DEFAULT_MARGIN {
        height = canvas_height * DEFAULT_MARGIN;
        width = height * ASPECT_RATIO;
    }

    Rect::new(
        (canvas_width - width) / 2.0,
        (canvas_height - height) / 2.0,
        width,
        height,
    )
}

fn clamp_point(x: f64, y: f64, width: f64, height: f64) -> (f64, f64) {
    (x.clamp(0.0, width), y.clamp(0.0, height))
}
