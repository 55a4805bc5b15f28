use std::time::Duration;

use pilights_core::{
    resolve, sequence::names, AnimationRequest, Error, SequencePayload, SequenceRequest, RGB8,
};

#[test]
fn test_resolve_known_sequences() {
    let expected = [
        ("blue_pulse", RGB8::new(0, 0, 255)),
        ("white_pulse", RGB8::new(255, 255, 255)),
        ("lightblue_pulse", RGB8::new(0, 255, 255)),
        ("red_pulse", RGB8::new(255, 0, 0)),
        ("green_pulse", RGB8::new(0, 255, 0)),
        ("orange_pulse", RGB8::new(255, 170, 0)),
        ("pink_pulse", RGB8::new(255, 0, 255)),
    ];

    for (name, color) in expected {
        assert_eq!(resolve(name), Ok(color), "sequence {name}");
    }
    assert_eq!(names().count(), expected.len());
}

#[test]
fn test_resolve_unknown_sequences() {
    for name in ["", "Blue_Pulse", "blue_pulse ", "purple_pulse", "blue"] {
        assert_eq!(
            resolve(name),
            Err(Error::UnknownSequence(name.to_owned())),
            "sequence {name:?}"
        );
    }
}

#[test]
fn test_bare_name_payload() {
    let payload: SequencePayload = serde_json::from_str(r#""red_pulse""#).unwrap();
    assert_eq!(payload, SequencePayload::from("red_pulse"));
    assert_eq!(
        payload.resolve().unwrap(),
        AnimationRequest {
            color: RGB8::new(255, 0, 0),
            iterations: 2,
            step_delay: Duration::from_millis(20),
            start_delay: Duration::ZERO,
        }
    );
}

#[test]
fn test_structured_payload() {
    let payload: SequencePayload =
        serde_json::from_str(r#"{"sequence": "green_pulse", "iterations": 5, "delay": 15}"#)
            .unwrap();
    let request = payload.resolve().unwrap();
    assert_eq!(request.color, RGB8::new(0, 255, 0));
    assert_eq!(request.iterations, 5);
    assert_eq!(request.step_delay, Duration::from_millis(15));
    assert_eq!(request.start_delay, Duration::ZERO);

    let payload: SequencePayload =
        serde_json::from_str(r#"{"sequence": "green_pulse", "startDelay": 500}"#).unwrap();
    let request = payload.resolve().unwrap();
    assert_eq!(request.iterations, 2);
    assert_eq!(request.step_delay, Duration::from_millis(20));
    assert_eq!(request.start_delay, Duration::from_millis(500));
}

#[test]
fn test_payload_errors() {
    assert_eq!(
        SequenceRequest::default().resolve(),
        Err(Error::SequenceNotSpecified)
    );
    let payload: SequencePayload = serde_json::from_str(r#"{"sequence": "nope"}"#).unwrap();
    assert_eq!(
        payload.resolve(),
        Err(Error::UnknownSequence("nope".to_owned()))
    );
}
