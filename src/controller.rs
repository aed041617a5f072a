use egui::Pos2;

use crate::error::{SurfaceError, SurfaceResult};
use crate::export::ImageFormat;
use crate::history::History;
use crate::input::InputEvent;
use crate::snapshot::Snapshot;
use crate::style::StyleSelection;
use crate::surface::Surface;

/// A stroke in progress.
///
/// The style is sampled once when the pointer goes down; tweaking the tools
/// panel mid-stroke has no effect until the next stroke. `pre_stroke` holds
/// the canvas as it was before the stroke so shape tools can redraw their
/// preview from a clean base on every pointer move.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeSession {
    /// Where the pointer went down, the anchor for shape tools
    pub start: Pos2,
    /// The most recent pointer position
    pub last: Pos2,
    /// Drawing settings locked in at pointer down
    pub style: StyleSelection,
    /// Canvas contents captured at pointer down
    pub pre_stroke: Snapshot,
}

/// The interaction state of the canvas.
///
/// # State Transitions
///
/// ```text
///              pointer down
/// ┌──────┐ ──────────────────► ┌──────────┐
/// │ Idle │                     │ Stroking │
/// └──────┘ ◄────────────────── └──────────┘
///           pointer up / leave
/// ```
///
/// Undo, redo and clear are only honored while idle; a stroke in progress
/// must finish (or be cut short by pointer loss) first.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// No active stroke
    Idle,
    /// The pointer is down and a stroke is being drawn
    Stroking(StrokeSession),
}

impl SessionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, SessionState::Idle)
    }

    pub fn is_stroking(&self) -> bool {
        matches!(self, SessionState::Stroking(_))
    }
}

/// Owns the drawing surface, the stroke state machine and the undo history,
/// and applies pointer events to them.
pub struct PaintController {
    surface: Option<Surface>,
    history: History,
    state: SessionState,
}

impl PaintController {
    pub fn new() -> Self {
        Self {
            surface: None,
            history: History::new(),
            state: SessionState::Idle,
        }
    }

    /// Allocate the drawing surface and seed the undo history with its blank
    /// contents. Replaces any existing canvas.
    pub fn initialize(&mut self, width: u32, height: u32) -> SurfaceResult<()> {
        let surface = Surface::new(width, height)?;
        self.history.reset(surface.capture_snapshot());
        self.state = SessionState::Idle;
        self.surface = Some(surface);
        log::info!("canvas initialized at {}x{}", width, height);
        Ok(())
    }

    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.surface.is_some()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Apply one pointer event. `style` is the current tools panel selection;
    /// it is only consulted when a stroke begins.
    pub fn handle_event(&mut self, event: InputEvent, style: &StyleSelection) {
        match event {
            InputEvent::PointerDown { position } => self.begin_stroke(position, style),
            InputEvent::PointerMove { position } => self.continue_stroke(position),
            InputEvent::PointerUp { .. } => self.finish_stroke(),
            InputEvent::PointerLeave { last_known_position } => {
                self.pointer_leave(last_known_position);
            }
        }
    }

    fn begin_stroke(&mut self, position: Pos2, style: &StyleSelection) {
        if self.state.is_stroking() {
            return;
        }
        let Some(surface) = self.surface.as_ref() else {
            log::debug!("pointer event ignored: canvas not initialized");
            return;
        };
        log::debug!(
            "stroke started with {} at ({:.1}, {:.1})",
            style.tool,
            position.x,
            position.y
        );
        // Starting new work invalidates anything that was undone
        self.history.invalidate_redo();
        self.state = SessionState::Stroking(StrokeSession {
            start: position,
            last: position,
            style: style.normalized(),
            pre_stroke: surface.capture_snapshot(),
        });
    }

    fn continue_stroke(&mut self, position: Pos2) {
        let SessionState::Stroking(session) = &mut self.state else {
            return;
        };
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let style = session.style;
        if style.tool.is_shape() {
            // Shape preview: redraw from the pre-stroke canvas so earlier
            // preview frames do not accumulate
            surface.restore_snapshot(&session.pre_stroke);
            style
                .tool
                .render(surface, session.start, position, style.color, style.width, style.filled);
        } else {
            // Freehand: extend the stroke from the previous position
            style
                .tool
                .render(surface, session.last, position, style.color, style.width, style.filled);
        }
        session.last = position;
    }

    /// Commit the stroke as drawn so far. Release position adds no marks;
    /// the last pointer move already drew everything.
    fn finish_stroke(&mut self) {
        if !self.state.is_stroking() {
            return;
        }
        self.state = SessionState::Idle;
        let Some(surface) = self.surface.as_ref() else {
            return;
        };
        self.history.commit(surface.capture_snapshot());
        log::debug!("stroke committed, undo depth {}", self.history.undo_depth());
    }

    fn pointer_leave(&mut self, last_known_position: Pos2) {
        if self.state.is_stroking() {
            log::debug!(
                "pointer tracking lost at ({:.1}, {:.1}), committing stroke",
                last_known_position.x,
                last_known_position.y
            );
            self.finish_stroke();
        }
    }

    /// Step back one committed stroke. Returns false when ignored, either at
    /// the history floor or during an active stroke.
    pub fn undo(&mut self) -> bool {
        if self.state.is_stroking() {
            log::debug!("undo ignored during active stroke");
            return false;
        }
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        match self.history.undo() {
            Some(snapshot) => {
                surface.restore_snapshot(snapshot);
                true
            }
            None => false,
        }
    }

    /// Step forward one undone stroke. Returns false when ignored.
    pub fn redo(&mut self) -> bool {
        if self.state.is_stroking() {
            log::debug!("redo ignored during active stroke");
            return false;
        }
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        match self.history.redo() {
            Some(snapshot) => {
                surface.restore_snapshot(snapshot);
                true
            }
            None => false,
        }
    }

    /// Reset the canvas to its background color as an undoable step
    pub fn clear_canvas(&mut self) {
        if self.state.is_stroking() {
            return;
        }
        let Some(surface) = self.surface.as_mut() else {
            log::debug!("clear ignored: canvas not initialized");
            return;
        };
        surface.clear();
        self.history.commit(surface.capture_snapshot());
        log::info!("canvas cleared");
    }

    /// Encode the current canvas contents without touching history or state
    pub fn export_encoded(&self, format: ImageFormat) -> SurfaceResult<Vec<u8>> {
        let surface = self.surface.as_ref().ok_or(SurfaceError::NotInitialized)?;
        surface.export_encoded(format)
    }

    pub fn can_undo(&self) -> bool {
        self.state.is_idle() && self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.state.is_idle() && self.history.can_redo()
    }

    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }
}

impl Default for PaintController {
    fn default() -> Self {
        Self::new()
    }
}
