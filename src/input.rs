use raylib::prelude::*;

use crate::carousel::layout::{contains, Layout};

/// What the user asked the carousel to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Previous,
    Next,
    Select(usize),
    ToggleAutoplay,
}

pub fn action_for_key(key: KeyboardKey) -> Option<Action> {
    match key {
        KeyboardKey::KEY_LEFT => Some(Action::Previous),
        KeyboardKey::KEY_RIGHT => Some(Action::Next),
        KeyboardKey::KEY_SPACE => Some(Action::ToggleAutoplay),
        _ => None,
    }
}

/// Keys read every frame, in the order they are checked.
pub const BOUND_KEYS: [KeyboardKey; 3] = [
    KeyboardKey::KEY_LEFT,
    KeyboardKey::KEY_RIGHT,
    KeyboardKey::KEY_SPACE,
];

/// Horizontal swipe detection from touch start/move/end events.
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    threshold: f32,
    start: Option<f32>,
    end: Option<f32>,
}

impl SwipeTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            start: None,
            end: None,
        }
    }

    pub fn touch_start(&mut self, x: f32) {
        self.start = Some(x);
        self.end = None;
    }

    pub fn touch_move(&mut self, x: f32) {
        if self.start.is_some() {
            self.end = Some(x);
        }
    }

    /// Finish the gesture. Leftward travel past the threshold is `Next`,
    /// rightward is `Previous`. A touch that never moved is not a swipe.
    pub fn touch_end(&mut self) -> Option<Action> {
        let (start, end) = (self.start.take()?, self.end.take()?);
        let distance = start - end;
        if distance > self.threshold {
            Some(Action::Next)
        } else if distance < -self.threshold {
            Some(Action::Previous)
        } else {
            None
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }
}

/// State of the primary pointer button this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Pressed,
    Held,
    Released,
    Idle,
}

impl PointerPhase {
    fn read(rl: &RaylibHandle) -> Self {
        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            PointerPhase::Pressed
        } else if rl.is_mouse_button_down(MouseButton::MOUSE_BUTTON_LEFT) {
            PointerPhase::Held
        } else if rl.is_mouse_button_released(MouseButton::MOUSE_BUTTON_LEFT) {
            PointerPhase::Released
        } else {
            PointerPhase::Idle
        }
    }
}

/// Turn one frame of pointer state into actions.
///
/// A press on a control is a click and never starts a swipe. Swipes only
/// start on the bare stage.
pub fn pointer_actions(
    phase: PointerPhase,
    position: Vector2,
    layout: &Layout,
    swipe: &mut SwipeTracker,
) -> Option<Action> {
    match phase {
        PointerPhase::Pressed => match layout.hit_test(position) {
            Some(control) => Some(control.action()),
            None => {
                if contains(&layout.stage, position) {
                    swipe.touch_start(position.x);
                }
                None
            }
        },
        PointerPhase::Held => {
            swipe.touch_move(position.x);
            None
        }
        PointerPhase::Released => {
            swipe.touch_move(position.x);
            let action = swipe.touch_end();
            if let Some(action) = action {
                log::debug!("swipe {:?}", action);
            }
            action
        }
        PointerPhase::Idle => None,
    }
}

/// Read keyboard and pointer input for this frame. With `pointer` disabled
/// only the keyboard is read.
pub fn poll(rl: &RaylibHandle, swipe: &mut SwipeTracker, pointer: Option<&Layout>) -> Vec<Action> {
    let mut actions: Vec<Action> = BOUND_KEYS
        .iter()
        .filter(|key| rl.is_key_pressed(**key))
        .filter_map(|key| action_for_key(*key))
        .collect();

    if let Some(layout) = pointer {
        let phase = PointerPhase::read(rl);
        actions.extend(pointer_actions(phase, rl.get_mouse_position(), layout, swipe));
    }
    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swipe(from: f32, to: f32) -> Option<Action> {
        let mut tracker = SwipeTracker::new(50.0);
        tracker.touch_start(from);
        tracker.touch_move((from + to) / 2.0);
        tracker.touch_move(to);
        tracker.touch_end()
    }

    #[test]
    fn leftward_swipe_goes_next() {
        assert_eq!(swipe(300.0, 200.0), Some(Action::Next));
    }

    #[test]
    fn rightward_swipe_goes_previous() {
        assert_eq!(swipe(200.0, 300.0), Some(Action::Previous));
    }

    #[test]
    fn short_drags_are_ignored() {
        assert_eq!(swipe(200.0, 150.0), None);
        assert_eq!(swipe(200.0, 250.0), None);
        assert_eq!(swipe(200.0, 200.0), None);
    }

    #[test]
    fn swipe_from_left_edge_counts() {
        assert_eq!(swipe(0.0, 120.0), Some(Action::Previous));
        assert_eq!(swipe(120.0, 0.0), Some(Action::Next));
    }

    #[test]
    fn tap_without_move_is_not_a_swipe() {
        let mut tracker = SwipeTracker::new(50.0);
        tracker.touch_start(10.0);
        assert_eq!(tracker.touch_end(), None);
    }

    #[test]
    fn tracker_resets_after_gesture() {
        let mut tracker = SwipeTracker::new(50.0);
        tracker.touch_start(300.0);
        tracker.touch_move(100.0);
        assert_eq!(tracker.touch_end(), Some(Action::Next));
        assert!(!tracker.is_tracking());

        // A stale end coordinate must not leak into the next gesture.
        tracker.touch_start(100.0);
        assert_eq!(tracker.touch_end(), None);
    }

    #[test]
    fn move_without_start_is_ignored() {
        let mut tracker = SwipeTracker::new(50.0);
        tracker.touch_move(500.0);
        assert_eq!(tracker.touch_end(), None);
    }

    #[test]
    fn keys_map_to_actions() {
        assert_eq!(action_for_key(KeyboardKey::KEY_LEFT), Some(Action::Previous));
        assert_eq!(action_for_key(KeyboardKey::KEY_RIGHT), Some(Action::Next));
        assert_eq!(action_for_key(KeyboardKey::KEY_SPACE), Some(Action::ToggleAutoplay));
        assert_eq!(action_for_key(KeyboardKey::KEY_UP), None);
    }

    fn layout() -> Layout {
        Layout::compute(1280.0, 860.0, 5, 0)
    }

    /// Press at `from`, drag halfway, release at `to`.
    fn gesture(layout: &Layout, tracker: &mut SwipeTracker, from: Vector2, to: Vector2) -> Vec<Action> {
        let mid = Vector2::new((from.x + to.x) / 2.0, (from.y + to.y) / 2.0);
        [
            (PointerPhase::Pressed, from),
            (PointerPhase::Held, mid),
            (PointerPhase::Released, to),
            (PointerPhase::Idle, to),
        ]
        .into_iter()
        .filter_map(|(phase, position)| pointer_actions(phase, position, layout, tracker))
        .collect()
    }

    fn stage_center(layout: &Layout) -> Vector2 {
        let stage = layout.stage;
        Vector2::new(stage.x + stage.width * 0.5, stage.y + stage.height * 0.4)
    }

    #[test]
    fn drag_on_stage_swipes() {
        let layout = layout();
        let mut tracker = SwipeTracker::new(50.0);
        let from = stage_center(&layout);

        let left = Vector2::new(from.x - 60.0, from.y);
        assert_eq!(gesture(&layout, &mut tracker, from, left), vec![Action::Next]);

        let right = Vector2::new(from.x + 60.0, from.y);
        assert_eq!(gesture(&layout, &mut tracker, from, right), vec![Action::Previous]);

        let short = Vector2::new(from.x - 40.0, from.y);
        assert!(gesture(&layout, &mut tracker, from, short).is_empty());
    }

    #[test]
    fn drag_from_control_is_a_single_click() {
        let layout = layout();
        let mut tracker = SwipeTracker::new(50.0);

        let arrow = layout.next_arrow.center;
        let to = Vector2::new(arrow.x - 60.0, arrow.y);
        assert_eq!(gesture(&layout, &mut tracker, arrow, to), vec![Action::Next]);
        assert!(!tracker.is_tracking());

        let thumb = layout.thumbnails[2];
        let from = Vector2::new(thumb.x + thumb.width * 0.5, thumb.y + thumb.height * 0.5);
        let to = Vector2::new(from.x - 60.0, from.y);
        assert_eq!(gesture(&layout, &mut tracker, from, to), vec![Action::Select(2)]);
    }

    #[test]
    fn drag_outside_stage_does_nothing() {
        let layout = layout();
        let mut tracker = SwipeTracker::new(50.0);
        let stage = layout.stage;

        let below = Vector2::new(stage.x + stage.width * 0.5, stage.y + stage.height + 8.0);
        let to = Vector2::new(below.x - 200.0, below.y);
        assert!(gesture(&layout, &mut tracker, below, to).is_empty());

        let corner = Vector2::new(2.0, 2.0);
        let to = Vector2::new(300.0, 2.0);
        assert!(gesture(&layout, &mut tracker, corner, to).is_empty());
    }
}
