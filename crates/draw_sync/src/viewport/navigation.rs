//! Mouse and keyboard camera navigation
//!
//! Turns toolkit-neutral button and key events into display operations.
//! Positions are window coordinates with the origin in the lower left
//! corner. Every drag gesture keeps its own anchor: a drag only moves the
//! camera once its gesture has an anchor, and then moves the anchor along.

use bitflags::bitflags;

use crate::render::{Display, ViewPreset};

bitflags! {
    /// Modifier keys held during an event
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Shift
        const SHIFT = 1 << 0;
        /// Control
        const CTRL = 1 << 1;
        /// Alt / Option
        const ALT = 1 << 2;
        /// Meta / Command
        const META = 1 << 3;
    }
}

bitflags! {
    /// Mouse buttons held during an event
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MouseButtons: u8 {
        /// Left button
        const LEFT = 1 << 0;
        /// Middle button
        const MIDDLE = 1 << 1;
        /// Right button
        const RIGHT = 1 << 2;
    }
}

/// Mouse button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Middle mouse button
    Middle,
    /// Right mouse button
    Right,
}

/// Keys the navigation reacts to on release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A character key, case-insensitive
    Char(char),
    /// Function key `F1`..`F12`
    F(u8),
    /// Either Alt key
    Alt,
    /// Either Control key
    Ctrl,
    /// Either Meta key
    Meta,
}

/// Camera operation a drag gesture drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragAction {
    Rotate,
    Pan,
    Zoom,
}

/// Drag gestures, one anchor each
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gesture {
    LeftRight,
    AltLeft,
    CtrlLeft,
    MetaLeft,
    Left,
    Middle,
    Right,
}

impl Gesture {
    const COUNT: usize = 7;

    /// Gesture selected by the current button and modifier state
    fn select(buttons: MouseButtons, modifiers: Modifiers) -> Option<Self> {
        if buttons.contains(MouseButtons::LEFT | MouseButtons::RIGHT) {
            Some(Self::LeftRight)
        } else if buttons.contains(MouseButtons::LEFT) {
            Some(if modifiers.contains(Modifiers::ALT) {
                Self::AltLeft
            } else if modifiers.contains(Modifiers::CTRL) {
                Self::CtrlLeft
            } else if modifiers.contains(Modifiers::META) {
                Self::MetaLeft
            } else {
                Self::Left
            })
        } else if buttons.contains(MouseButtons::MIDDLE) {
            Some(Self::Middle)
        } else if buttons.contains(MouseButtons::RIGHT) {
            Some(Self::Right)
        } else {
            None
        }
    }

    const fn action(self) -> DragAction {
        match self {
            Self::Left => DragAction::Rotate,
            Self::AltLeft | Self::Right => DragAction::Pan,
            Self::LeftRight | Self::CtrlLeft | Self::MetaLeft | Self::Middle => DragAction::Zoom,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// View preset bound to function keys `F5`..`F12`
const VIEW_KEYS: [ViewPreset; 8] = [
    ViewPreset::Top,
    ViewPreset::Front,
    ViewPreset::Left,
    ViewPreset::LeftIso,
    ViewPreset::Bottom,
    ViewPreset::Rear,
    ViewPreset::Right,
    ViewPreset::RightIso,
];

/// Gesture state machine for one viewport
#[derive(Debug, Default)]
pub struct NavigationController {
    anchors: [Option<(i32, i32)>; Gesture::COUNT],
}

impl NavigationController {
    /// Create a controller with no gesture in progress
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any drag gesture currently has an anchor
    pub fn is_dragging(&self) -> bool {
        self.anchors.iter().any(Option::is_some)
    }

    /// Button pressed at `position` with `buttons` now held
    pub fn press(
        &mut self,
        display: &mut dyn Display,
        position: (i32, i32),
        buttons: MouseButtons,
        modifiers: Modifiers,
    ) {
        display.select_viewport_at(position.0, position.1);
        if let Some(gesture) = Gesture::select(buttons, modifiers) {
            self.anchors[gesture.index()] = Some(position);
        }
    }

    /// Pointer moved to `position` with `buttons` held
    pub fn drag(
        &mut self,
        display: &mut dyn Display,
        position: (i32, i32),
        buttons: MouseButtons,
        modifiers: Modifiers,
    ) {
        let Some(gesture) = Gesture::select(buttons, modifiers) else {
            return;
        };

        if let Some(from) = self.anchors[gesture.index()] {
            match gesture.action() {
                DragAction::Rotate => display.rotate_drag(from, position),
                DragAction::Pan => display.pan_drag(from, position),
                DragAction::Zoom => display.zoom_drag(from, position),
            }
        }
        self.anchors[gesture.index()] = Some(position);
    }

    /// Button released
    pub fn release(&mut self, button: MouseButton) {
        match button {
            MouseButton::Left => {
                for gesture in [
                    Gesture::Left,
                    Gesture::AltLeft,
                    Gesture::CtrlLeft,
                    Gesture::MetaLeft,
                ] {
                    self.anchors[gesture.index()] = None;
                }
            }
            MouseButton::Middle => self.anchors[Gesture::Middle.index()] = None,
            MouseButton::Right => self.anchors[Gesture::Right.index()] = None,
        }
    }

    /// Key released at `position` with `buttons` still held
    pub fn key_up(
        &mut self,
        display: &mut dyn Display,
        key: Key,
        position: (i32, i32),
        buttons: MouseButtons,
        modifiers: Modifiers,
    ) {
        match key {
            Key::Char(c) if c.eq_ignore_ascii_case(&'c') => display.center(),
            Key::Char(_) => {}
            Key::F(n @ 1..=4) => {
                let slot = usize::from(n - 1);
                if modifiers.contains(Modifiers::SHIFT) {
                    display.save(slot);
                } else {
                    display.load(slot);
                }
            }
            Key::F(n @ 5..=12) => display.change_view(VIEW_KEYS[usize::from(n - 5)]),
            Key::F(n) => log::trace!("Unbound function key F{}", n),
            Key::Alt => self.restart_plain(Gesture::AltLeft, position, buttons),
            Key::Ctrl => self.restart_plain(Gesture::CtrlLeft, position, buttons),
            Key::Meta => self.restart_plain(Gesture::MetaLeft, position, buttons),
        }
    }

    /// Modifier let go mid-drag: continue with the unmodified gestures
    fn restart_plain(&mut self, modified: Gesture, position: (i32, i32), buttons: MouseButtons) {
        if buttons.contains(MouseButtons::LEFT) {
            self.anchors[Gesture::Left.index()] = Some(position);
            self.anchors[modified.index()] = None;
        }
        if buttons.contains(MouseButtons::MIDDLE) {
            self.anchors[Gesture::Middle.index()] = Some(position);
        }
        if buttons.contains(MouseButtons::RIGHT) {
            self.anchors[Gesture::Right.index()] = Some(position);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::headless::{DisplayCommand, HeadlessDisplay};

    const NONE: Modifiers = Modifiers::empty();

    #[test]
    fn test_left_drag_rotates() {
        let mut display = HeadlessDisplay::default();
        let mut nav = NavigationController::new();

        nav.press(&mut display, (10, 10), MouseButtons::LEFT, NONE);
        nav.drag(&mut display, (12, 15), MouseButtons::LEFT, NONE);
        nav.drag(&mut display, (20, 15), MouseButtons::LEFT, NONE);

        assert_eq!(
            display.commands(),
            &[
                DisplayCommand::SelectAt(10, 10),
                DisplayCommand::RotateDrag((10, 10), (12, 15)),
                DisplayCommand::RotateDrag((12, 15), (20, 15)),
            ]
        );
    }

    #[test]
    fn test_gesture_table() {
        let cases = [
            (MouseButtons::LEFT | MouseButtons::RIGHT, NONE, "zoom"),
            (MouseButtons::LEFT, Modifiers::ALT, "pan"),
            (MouseButtons::LEFT, Modifiers::CTRL, "zoom"),
            (MouseButtons::LEFT, Modifiers::META, "zoom"),
            (MouseButtons::MIDDLE, NONE, "zoom"),
            (MouseButtons::RIGHT, NONE, "pan"),
            (MouseButtons::RIGHT, Modifiers::CTRL, "pan"),
        ];

        for (buttons, modifiers, expected) in cases {
            let mut display = HeadlessDisplay::default();
            let mut nav = NavigationController::new();
            nav.press(&mut display, (0, 0), buttons, modifiers);
            display.clear();
            nav.drag(&mut display, (1, 1), buttons, modifiers);

            let name = match display.commands() {
                [DisplayCommand::PanDrag((0, 0), (1, 1))] => "pan",
                [DisplayCommand::ZoomDrag((0, 0), (1, 1))] => "zoom",
                [DisplayCommand::RotateDrag((0, 0), (1, 1))] => "rotate",
                other => panic!("unexpected commands {:?}", other),
            };
            assert_eq!(name, expected, "{:?} + {:?}", buttons, modifiers);
        }
    }

    #[test]
    fn test_drag_without_anchor_only_sets_it() {
        let mut display = HeadlessDisplay::default();
        let mut nav = NavigationController::new();

        nav.drag(&mut display, (5, 5), MouseButtons::RIGHT, NONE);
        assert!(display.commands().is_empty());
        assert!(nav.is_dragging());

        nav.drag(&mut display, (6, 5), MouseButtons::RIGHT, NONE);
        assert_eq!(display.commands(), &[DisplayCommand::PanDrag((5, 5), (6, 5))]);
    }

    #[test]
    fn test_release_clears_anchors() {
        let mut display = HeadlessDisplay::default();
        let mut nav = NavigationController::new();

        nav.press(&mut display, (0, 0), MouseButtons::LEFT, Modifiers::ALT);
        nav.release(MouseButton::Left);
        assert!(!nav.is_dragging());

        nav.press(&mut display, (0, 0), MouseButtons::MIDDLE, NONE);
        nav.release(MouseButton::Right);
        assert!(nav.is_dragging());
        nav.release(MouseButton::Middle);
        assert!(!nav.is_dragging());
    }

    #[test]
    fn test_modifier_release_switches_to_rotation() {
        let mut display = HeadlessDisplay::default();
        let mut nav = NavigationController::new();

        nav.press(&mut display, (0, 0), MouseButtons::LEFT, Modifiers::ALT);
        nav.drag(&mut display, (3, 0), MouseButtons::LEFT, Modifiers::ALT);
        nav.key_up(&mut display, Key::Alt, (3, 0), MouseButtons::LEFT, NONE);
        display.clear();

        nav.drag(&mut display, (4, 1), MouseButtons::LEFT, NONE);
        assert_eq!(display.commands(), &[DisplayCommand::RotateDrag((3, 0), (4, 1))]);

        // Alt gesture was cancelled, pressing Alt again starts without an anchor
        display.clear();
        nav.drag(&mut display, (5, 1), MouseButtons::LEFT, Modifiers::ALT);
        assert!(display.commands().is_empty());
    }

    #[test]
    fn test_camera_keys() {
        let mut display = HeadlessDisplay::default();
        let mut nav = NavigationController::new();
        let none = MouseButtons::empty();

        nav.key_up(&mut display, Key::Char('c'), (0, 0), none, NONE);
        nav.key_up(&mut display, Key::Char('C'), (0, 0), none, NONE);
        nav.key_up(&mut display, Key::Char('x'), (0, 0), none, NONE);
        nav.key_up(&mut display, Key::F(1), (0, 0), none, NONE);
        nav.key_up(&mut display, Key::F(4), (0, 0), none, Modifiers::SHIFT);
        nav.key_up(&mut display, Key::F(5), (0, 0), none, NONE);
        nav.key_up(&mut display, Key::F(12), (0, 0), none, NONE);
        nav.key_up(&mut display, Key::F(13), (0, 0), none, NONE);

        assert_eq!(
            display.commands(),
            &[
                DisplayCommand::Center,
                DisplayCommand::Center,
                DisplayCommand::Load(0),
                DisplayCommand::Save(3),
                DisplayCommand::View(ViewPreset::Top),
                DisplayCommand::View(ViewPreset::RightIso),
            ]
        );
    }
}
