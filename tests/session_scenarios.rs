use std::fs;

use easel::controller::PaintController;
use easel::export::{self, ImageFormat};
use easel::input::InputEvent;
use easel::style::StyleSelection;
use easel::tool::Tool;
use egui::{pos2, Color32, Pos2};

fn initialized_controller() -> PaintController {
    let mut controller = PaintController::new();
    controller.initialize(100, 100).unwrap();
    controller
}

fn stroke(controller: &mut PaintController, style: &StyleSelection, path: &[Pos2]) {
    controller.handle_event(InputEvent::PointerDown { position: path[0] }, style);
    for &position in &path[1..] {
        controller.handle_event(InputEvent::PointerMove { position }, style);
    }
    let last = *path.last().unwrap();
    controller.handle_event(InputEvent::PointerUp { position: last }, style);
}

fn buffer_bytes(controller: &PaintController) -> Vec<u8> {
    controller.surface().unwrap().as_raw().to_vec()
}

fn pixel(controller: &PaintController, x: u32, y: u32) -> Color32 {
    controller.surface().unwrap().pixel(x, y).unwrap()
}

// Drag out a rectangle, shrink it before releasing, then walk the history
// both ways
#[test]
fn test_rectangle_drag_session() {
    let mut controller = initialized_controller();
    let style = StyleSelection {
        tool: Tool::Rectangle,
        color: Color32::BLACK,
        width: 1.0,
        filled: false,
    };
    let blank = buffer_bytes(&controller);

    controller.handle_event(InputEvent::PointerDown { position: pos2(10.0, 10.0) }, &style);
    controller.handle_event(InputEvent::PointerMove { position: pos2(60.0, 40.0) }, &style);
    controller.handle_event(InputEvent::PointerMove { position: pos2(30.0, 30.0) }, &style);
    controller.handle_event(InputEvent::PointerUp { position: pos2(30.0, 30.0) }, &style);

    // The committed picture holds only the final 10,10 - 30,30 outline
    assert_eq!(pixel(&controller, 20, 10), Color32::BLACK);
    assert_eq!(pixel(&controller, 10, 20), Color32::BLACK);
    assert_eq!(pixel(&controller, 30, 30), Color32::BLACK);
    assert_eq!(pixel(&controller, 20, 20), Color32::WHITE);
    // No trace of the wider preview frame
    assert_eq!(pixel(&controller, 45, 40), Color32::WHITE);
    assert_eq!(pixel(&controller, 60, 25), Color32::WHITE);

    assert!(controller.undo());
    assert_eq!(buffer_bytes(&controller), blank);
    assert_eq!(controller.redo_depth(), 1);

    assert!(controller.redo());
    assert_eq!(pixel(&controller, 20, 10), Color32::BLACK);
}

// The preview must be on the buffer while the pointer is still down, and
// committing must only happen at release
#[test]
fn test_preview_is_visible_before_release() {
    let mut controller = initialized_controller();
    let style = StyleSelection {
        tool: Tool::Rectangle,
        color: Color32::BLACK,
        width: 1.0,
        filled: false,
    };

    controller.handle_event(InputEvent::PointerDown { position: pos2(10.0, 10.0) }, &style);
    controller.handle_event(InputEvent::PointerMove { position: pos2(50.0, 50.0) }, &style);

    // Mid-stroke: the outline is already drawn but nothing is committed
    assert_eq!(pixel(&controller, 30, 10), Color32::BLACK);
    assert_eq!(pixel(&controller, 10, 30), Color32::BLACK);
    assert_eq!(pixel(&controller, 50, 30), Color32::BLACK);
    assert_eq!(pixel(&controller, 30, 30), Color32::WHITE);
    assert_eq!(controller.undo_depth(), 1);
    assert!(!controller.state().is_idle());

    controller.handle_event(InputEvent::PointerUp { position: pos2(50.0, 50.0) }, &style);
    assert_eq!(controller.undo_depth(), 2);

    assert!(controller.undo());
    assert_eq!(pixel(&controller, 30, 10), Color32::WHITE);
    assert_eq!(controller.redo_depth(), 1);
}

// A session mixing every tool, then undo and redo all the way through,
// checking byte-for-byte restoration at each step
#[test]
fn test_mixed_tool_session_replays_exactly() {
    let mut controller = initialized_controller();
    let base = StyleSelection {
        tool: Tool::Brush,
        color: Color32::BLACK,
        width: 2.0,
        filled: false,
    };

    let mut checkpoints = vec![buffer_bytes(&controller)];

    stroke(&mut controller, &base, &[pos2(5.0, 5.0), pos2(95.0, 5.0)]);
    checkpoints.push(buffer_bytes(&controller));

    let filled_rect = StyleSelection {
        tool: Tool::Rectangle,
        color: Color32::RED,
        filled: true,
        ..base
    };
    stroke(&mut controller, &filled_rect, &[pos2(10.0, 20.0), pos2(40.0, 50.0)]);
    checkpoints.push(buffer_bytes(&controller));

    let ellipse = StyleSelection {
        tool: Tool::Ellipse,
        color: Color32::BLUE,
        ..base
    };
    stroke(&mut controller, &ellipse, &[pos2(70.0, 70.0), pos2(85.0, 70.0)]);
    checkpoints.push(buffer_bytes(&controller));

    let eraser = StyleSelection {
        tool: Tool::Eraser,
        width: 6.0,
        ..base
    };
    stroke(&mut controller, &eraser, &[pos2(10.0, 20.0), pos2(40.0, 20.0)]);
    checkpoints.push(buffer_bytes(&controller));

    let triangle = StyleSelection {
        tool: Tool::Triangle,
        color: Color32::GREEN,
        filled: true,
        ..base
    };
    stroke(&mut controller, &triangle, &[pos2(60.0, 10.0), pos2(70.0, 30.0)]);
    checkpoints.push(buffer_bytes(&controller));

    assert_eq!(controller.undo_depth(), checkpoints.len());

    // Walk backwards to the blank canvas
    for expected in checkpoints.iter().rev().skip(1) {
        assert!(controller.undo());
        assert_eq!(&buffer_bytes(&controller), expected);
    }
    assert!(!controller.can_undo());

    // And forwards again to the final picture
    for expected in checkpoints.iter().skip(1) {
        assert!(controller.redo());
        assert_eq!(&buffer_bytes(&controller), expected);
    }
    assert!(!controller.can_redo());
}

#[test]
fn test_save_writes_timestamped_jpeg() {
    let mut controller = initialized_controller();
    let style = StyleSelection {
        tool: Tool::Brush,
        color: Color32::BLACK,
        width: 3.0,
        filled: false,
    };
    stroke(&mut controller, &style, &[pos2(10.0, 10.0), pos2(90.0, 90.0)]);

    let dir = std::env::temp_dir().join(format!("easel_save_test_{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();

    let surface = controller.surface().unwrap();
    let path = export::save_to_disk(surface, &dir, ImageFormat::Jpeg).unwrap();

    assert_eq!(path.extension().and_then(|e| e.to_str()), Some("jpg"));
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap();
    assert!(stem.parse::<u64>().is_ok(), "stem should be a timestamp: {}", stem);

    let bytes = fs::read(&path).unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!(decoded.width(), 100);
    assert_eq!(decoded.height(), 100);

    fs::remove_dir_all(&dir).unwrap();
}
