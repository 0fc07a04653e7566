//! End-to-end tests for the wired inference boundary
//!
//! The endpoint is unroutable on purpose, so every transport attempt fails
//! fast and the submission flow must surface its fixed fallback reply. The
//! worker runs on a real thread, so these tests poll with a deadline.

use habla::inference::{InferenceConfig, FALLBACK_REPLY};
use habla::integration::{WidgetConfig, WidgetEngine};
use habla::messages::Sender;
use habla::speech::{ChannelRecognition, NullSynthesis};
use habla::HablaError;
use std::time::{Duration, Instant};

fn wired_engine() -> WidgetEngine {
    let inference = InferenceConfig::default()
        .with_endpoint("http://127.0.0.1:9/models/none")
        .with_timeout(Duration::from_millis(500));
    let (recognition, _feed) = ChannelRecognition::new();
    WidgetEngine::new(
        WidgetConfig::default().with_inference(inference),
        Box::new(NullSynthesis::new()),
        Box::new(recognition),
    )
    .unwrap()
}

/// Tick the engine until the pending reply lands or the deadline passes.
fn tick_until_reply(engine: &mut WidgetEngine, deadline: Duration) {
    let start = Instant::now();
    while engine.is_processing() && start.elapsed() < deadline {
        engine.tick(Instant::now());
        std::thread::sleep(Duration::from_millis(20));
    }
}

#[test]
fn test_wired_submission_surfaces_fallback_on_transport_failure() {
    let now = Instant::now();
    let mut engine = wired_engine();
    engine.start(now);

    engine.submit("hola asistente", now);
    assert!(engine.is_processing());

    tick_until_reply(&mut engine, Duration::from_secs(5));
    assert!(!engine.is_processing(), "reply never arrived");

    let log = engine.log().snapshot();
    assert_eq!(log.len(), 2);
    assert_eq!(log[1].sender, Sender::Assistant);
    assert_eq!(log[1].text, FALLBACK_REPLY);
}

#[test]
fn test_wired_short_prompt_surfaces_validation_message() {
    let now = Instant::now();
    let mut engine = wired_engine();
    engine.start(now);

    engine.submit("hola", now);
    tick_until_reply(&mut engine, Duration::from_secs(5));
    assert!(!engine.is_processing());

    let expected = HablaError::InvalidPrompt(String::new()).user_message();
    let log = engine.log().snapshot();
    assert_eq!(log.len(), 2);
    assert_eq!(log[1].sender, Sender::Assistant);
    assert_eq!(log[1].text, expected);
}

#[test]
fn test_unwired_engine_never_contacts_the_network() {
    // The default configuration keeps the boundary unwired; the reply is
    // the canned one after the simulated delay, with no worker involved
    let now = Instant::now();
    let (recognition, _feed) = ChannelRecognition::new();
    let mut engine = WidgetEngine::new(
        WidgetConfig::default(),
        Box::new(NullSynthesis::new()),
        Box::new(recognition),
    )
    .unwrap();
    engine.start(now);

    engine.submit("hola asistente", now);
    engine.tick(now + Duration::from_millis(1500));

    assert_eq!(
        engine.log().last().unwrap().text,
        habla::integration::CANNED_REPLY
    );
}
