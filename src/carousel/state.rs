#[derive(Debug, PartialEq, Clone, Copy)]
pub enum CarouselState {
    Loading,  // Spinner only, until the loading timeout fires
    Browsing, // Slides and controls are shown
}

/// Where a slide rests relative to the stage.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Placement {
    Previous, // Off stage to the left, faded out
    Current,  // On stage
    Next,     // Off stage to the right, faded out
}

impl Placement {
    pub fn of(index: usize, current: usize, predecessor: usize) -> Self {
        if index == current {
            Placement::Current
        } else if index == predecessor {
            Placement::Previous
        } else {
            Placement::Next
        }
    }

    /// Horizontal offset in stage widths.
    pub fn offset(self) -> f32 {
        match self {
            Placement::Previous => -1.0,
            Placement::Current => 0.0,
            Placement::Next => 1.0,
        }
    }

    pub fn opacity(self) -> f32 {
        match self {
            Placement::Current => 1.0,
            _ => 0.0,
        }
    }

    pub fn scale(self) -> f32 {
        match self {
            Placement::Current => 1.0,
            _ => crate::constants::INACTIVE_SCALE,
        }
    }
}
