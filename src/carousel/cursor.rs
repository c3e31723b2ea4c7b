use crate::input::Action;

/// Index of the displayed image plus the autoplay and loading flags.
///
/// `index` is always within `[0, len)`; a cursor over zero images cannot be
/// constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    index: usize,
    len: usize,
    autoplay: bool,
    loading: bool,
}

impl Cursor {
    pub fn new(len: usize, autoplay: bool) -> Option<Self> {
        if len == 0 {
            return None;
        }
        Some(Self {
            index: 0,
            len,
            autoplay,
            loading: true,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_autoplay(&self) -> bool {
        self.autoplay
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn next(&mut self) {
        self.index = if self.index == self.len - 1 { 0 } else { self.index + 1 };
    }

    pub fn previous(&mut self) {
        self.index = if self.index == 0 { self.len - 1 } else { self.index - 1 };
    }

    /// Jump to `index`. Out-of-range requests leave the cursor untouched.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.len {
            log::warn!("ignoring selection of image {} of {}", index, self.len);
            return false;
        }
        self.index = index;
        true
    }

    pub fn toggle_autoplay(&mut self) -> bool {
        self.autoplay = !self.autoplay;
        self.autoplay
    }

    pub fn finish_loading(&mut self) {
        self.loading = false;
    }

    /// Index of the slide resting on the left, wrapping at the start.
    pub fn predecessor(&self) -> usize {
        if self.index == 0 { self.len - 1 } else { self.index - 1 }
    }

    /// Fill fraction of the progress bar.
    pub fn progress(&self) -> f32 {
        (self.index + 1) as f32 / self.len as f32
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Previous => self.previous(),
            Action::Next => self.next(),
            Action::Select(index) => {
                self.go_to(index);
            }
            Action::ToggleAutoplay => {
                self.toggle_autoplay();
            }
        }
    }
}
