use std::sync::Arc;

use eframe::egui::{self, ColorImage, Event, Key};

use crate::review::ReviewIntent;

/// Map this frame's key events onto review intents, in arrival order.
///
/// Auto-repeat is honoured for navigation so holding an arrow pages through
/// samples, but never for flag, copy or capture.
pub(super) fn shortcut_intents(events: &[Event]) -> Vec<ReviewIntent> {
    let mut intents = Vec::new();
    for event in events {
        let intent = match event {
            Event::Copy => Some(ReviewIntent::CopyIdentifier),
            Event::Key {
                key,
                pressed: true,
                repeat,
                modifiers,
                ..
            } => key_intent(*key, *repeat, *modifiers),
            _ => None,
        };
        // Ctrl+C arrives both as a key press and as a copy event.
        if let Some(intent) = intent
            && !(intent == ReviewIntent::CopyIdentifier && intents.contains(&intent))
        {
            intents.push(intent);
        }
    }
    intents
}

fn key_intent(key: Key, repeat: bool, modifiers: egui::Modifiers) -> Option<ReviewIntent> {
    let command = (modifiers.command || modifiers.ctrl) && !modifiers.alt;
    match key {
        Key::ArrowRight | Key::D if !command => Some(ReviewIntent::Next),
        Key::ArrowLeft | Key::A if !command => Some(ReviewIntent::Prev),
        Key::F if !command && !repeat => Some(ReviewIntent::Flag),
        Key::C if command && !repeat => Some(ReviewIntent::CopyIdentifier),
        Key::S if command && !repeat => Some(ReviewIntent::CaptureScreenshot),
        _ => None,
    }
}

/// The first screenshot delivered this frame, if any.
pub(super) fn captured_screenshot(ctx: &egui::Context) -> Option<Arc<ColorImage>> {
    ctx.input(|i| {
        i.raw.events.iter().find_map(|event| match event {
            Event::Screenshot { image, .. } => Some(image.clone()),
            _ => None,
        })
    })
}
