use egui::{PointerButton, Pos2, Rect, Response};

/// Pointer events in buffer coordinates.
///
/// Positions are already mapped from screen space into the canvas buffer;
/// they may lie outside the buffer when the pointer is dragged past the
/// canvas edge, and drawing clamps them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button was pressed on the canvas
    PointerDown { position: Pos2 },
    /// Pointer moved while the primary button is held
    PointerMove { position: Pos2 },
    /// Primary button was released
    PointerUp { position: Pos2 },
    /// Pointer tracking was lost mid-stroke (left the window)
    PointerLeave { last_known_position: Pos2 },
}

/// Converts raw egui canvas interaction into domain pointer events.
///
/// Tracks pointer state across frames so each frame yields only the events
/// that actually happened: a press, position changes, a release, or loss of
/// tracking.
pub struct InputTranslator {
    last_position: Option<Pos2>,
    pointer_down: bool,
}

impl InputTranslator {
    pub fn new() -> Self {
        Self {
            last_position: None,
            pointer_down: false,
        }
    }

    /// Process this frame's canvas response and generate pointer events.
    ///
    /// `canvas_rect` is the canvas widget in screen coordinates and `zoom`
    /// the current display scale; both are needed to map positions into
    /// buffer coordinates.
    pub fn translate(
        &mut self,
        response: &Response,
        canvas_rect: Rect,
        zoom: f32,
    ) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let pointer = response.interact_pointer_pos();

        if !self.pointer_down {
            if response.drag_started_by(PointerButton::Primary) {
                if let Some(pos) = pointer {
                    let position = screen_to_buffer(pos, canvas_rect, zoom);
                    self.pointer_down = true;
                    self.last_position = Some(position);
                    events.push(InputEvent::PointerDown { position });
                }
            }
            return events;
        }

        match pointer {
            Some(pos) => {
                let position = screen_to_buffer(pos, canvas_rect, zoom);
                if self.last_position != Some(position) {
                    events.push(InputEvent::PointerMove { position });
                    self.last_position = Some(position);
                }
                if response.drag_stopped_by(PointerButton::Primary) {
                    self.pointer_down = false;
                    self.last_position = None;
                    events.push(InputEvent::PointerUp { position });
                }
            }
            None => {
                // egui stopped reporting a pointer position mid-stroke
                let last_known_position = self.last_position.take().unwrap_or(Pos2::ZERO);
                self.pointer_down = false;
                events.push(InputEvent::PointerLeave { last_known_position });
            }
        }

        events
    }
}

impl Default for InputTranslator {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a screen position onto the canvas buffer, undoing the zoom scale
pub fn screen_to_buffer(pos: Pos2, canvas_rect: Rect, zoom: f32) -> Pos2 {
    ((pos - canvas_rect.min) / zoom).to_pos2()
}
