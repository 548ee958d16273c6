use serde_json::json;

use super::*;

// =============================================================
// Mouse / touch positions
// =============================================================

#[test]
fn point_is_its_own_position() {
    assert_eq!(Point::new(1.0, 2.0).client_position(), Ok(Point::new(1.0, 2.0)));
}

#[test]
fn mouse_reports_client_coordinates() {
    let m = MouseInput { client_x: 15.0, client_y: 25.0 };
    assert_eq!(m.client_position(), Ok(Point::new(15.0, 25.0)));
}

#[test]
fn touch_uses_first_touch() {
    let t = TouchInput {
        touches: vec![MouseInput { client_x: 1.0, client_y: 2.0 }, MouseInput { client_x: 9.0, client_y: 9.0 }],
    };
    assert_eq!(t.client_position(), Ok(Point::new(1.0, 2.0)));
}

#[test]
fn touch_without_points_is_unsupported() {
    let t = TouchInput { touches: vec![] };
    assert_eq!(t.client_position(), Err(InputError::UnsupportedInputDevice));
}

// =============================================================
// RawPointerEvent
// =============================================================

#[test]
fn raw_mouse_shape_parses() {
    let raw: RawPointerEvent = serde_json::from_value(json!({ "clientX": 10, "clientY": 20.5 })).unwrap();
    assert!(matches!(raw, RawPointerEvent::Mouse(_)));
    assert_eq!(raw.client_position(), Ok(Point::new(10.0, 20.5)));
}

#[test]
fn raw_touch_shape_parses() {
    let raw: RawPointerEvent =
        serde_json::from_value(json!({ "touches": [{ "clientX": 3, "clientY": 4 }] })).unwrap();
    assert!(matches!(raw, RawPointerEvent::Touch(_)));
    assert_eq!(raw.client_position(), Ok(Point::new(3.0, 4.0)));
}

#[test]
fn raw_touch_wins_over_mouse_fields() {
    let raw: RawPointerEvent = serde_json::from_value(json!({
        "clientX": 100, "clientY": 100,
        "touches": [{ "clientX": 5, "clientY": 6 }]
    }))
    .unwrap();
    assert_eq!(raw.client_position(), Ok(Point::new(5.0, 6.0)));
}

#[test]
fn raw_empty_touch_list_is_unsupported() {
    let raw: RawPointerEvent = serde_json::from_value(json!({ "touches": [] })).unwrap();
    assert_eq!(raw.client_position(), Err(InputError::UnsupportedInputDevice));
}

#[test]
fn raw_unknown_shape_is_unsupported() {
    let raw: RawPointerEvent = serde_json::from_value(json!({ "pressure": 0.5, "tiltX": 3 })).unwrap();
    assert!(matches!(raw, RawPointerEvent::Other(_)));
    assert_eq!(raw.client_position(), Err(InputError::UnsupportedInputDevice));
}

#[test]
fn raw_mouse_missing_axis_is_unsupported() {
    let raw: RawPointerEvent = serde_json::from_value(json!({ "clientX": 1 })).unwrap();
    assert_eq!(raw.client_position(), Err(InputError::UnsupportedInputDevice));
}

// =============================================================
// InkState
// =============================================================

#[test]
fn state_default_is_idle() {
    assert_eq!(InkState::default(), InkState::Idle);
    assert!(!InkState::Idle.is_drawing());
}

#[test]
fn drawing_state_reports_drawing() {
    assert!(InkState::Drawing { last: Point::new(0.0, 0.0) }.is_drawing());
}

#[test]
fn input_error_messages() {
    assert_eq!(InputError::NoActivePointer.to_string(), "no active pointer");
    assert_eq!(InputError::UnsupportedInputDevice.to_string(), "unsupported input device");
}
