/// A reviewer action raised by the UI and applied to the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReviewIntent {
    /// Show the previous sample.
    Prev,
    /// Show the next sample.
    Next,
    /// Flag the current sample as erroneous after confirmation.
    Flag,
    /// Put the current identifier on the clipboard.
    CopyIdentifier,
    /// Save the whole display area as an image.
    CaptureScreenshot,
}

impl ReviewIntent {
    /// Toolbar order.
    pub const ALL: [ReviewIntent; 5] = [
        ReviewIntent::Prev,
        ReviewIntent::Next,
        ReviewIntent::Flag,
        ReviewIntent::CopyIdentifier,
        ReviewIntent::CaptureScreenshot,
    ];

    /// Button caption.
    pub fn label(self) -> &'static str {
        match self {
            ReviewIntent::Prev => "Previous",
            ReviewIntent::Next => "Next",
            ReviewIntent::Flag => "Flag error",
            ReviewIntent::CopyIdentifier => "Copy identifier",
            ReviewIntent::CaptureScreenshot => "Save screenshot",
        }
    }

    /// Keyboard hint shown in the button tooltip.
    pub fn shortcut_hint(self) -> &'static str {
        match self {
            ReviewIntent::Prev => "Left / A",
            ReviewIntent::Next => "Right / D",
            ReviewIntent::Flag => "F",
            ReviewIntent::CopyIdentifier => "Ctrl+C",
            ReviewIntent::CaptureScreenshot => "Ctrl+S",
        }
    }
}
