//=========================================================================
// Win32 Key Table
//
// Fixed virtual-key -> `Key` pairs matched against `WM_KEYDOWN`/
// `WM_KEYUP` wparams. Letters and digits arrive as their ASCII codes.
// Unmapped codes translate to `None` and are dropped before dispatch.
//
//=========================================================================

use windows_sys::Win32::UI::Input::KeyboardAndMouse::{
    VK_BACK, VK_CONTROL, VK_DOWN, VK_ESCAPE, VK_F1, VK_F10, VK_F11, VK_F12, VK_F2, VK_F3, VK_F4,
    VK_F5, VK_F6, VK_F7, VK_F8, VK_F9, VK_LCONTROL, VK_LEFT, VK_LMENU, VK_LSHIFT, VK_MENU,
    VK_RCONTROL, VK_RETURN, VK_RIGHT, VK_RMENU, VK_RSHIFT, VK_SHIFT, VK_SPACE, VK_TAB, VK_UP,
};

use crate::input::Key;

static VK_TABLE: &[(u16, Key)] = &[
    (VK_ESCAPE, Key::Escape),
    (VK_RETURN, Key::Enter),
    (VK_TAB, Key::Tab),
    (VK_BACK, Key::Backspace),
    (VK_SPACE, Key::Space),
    (VK_UP, Key::ArrowUp),
    (VK_DOWN, Key::ArrowDown),
    (VK_LEFT, Key::ArrowLeft),
    (VK_RIGHT, Key::ArrowRight),
    // Unsided modifiers fold into the left-hand variants.
    (VK_SHIFT, Key::ShiftLeft),
    (VK_LSHIFT, Key::ShiftLeft),
    (VK_RSHIFT, Key::ShiftRight),
    (VK_CONTROL, Key::ControlLeft),
    (VK_LCONTROL, Key::ControlLeft),
    (VK_RCONTROL, Key::ControlRight),
    (VK_MENU, Key::AltLeft),
    (VK_LMENU, Key::AltLeft),
    (VK_RMENU, Key::AltRight),
    (b'0' as u16, Key::Digit0),
    (b'1' as u16, Key::Digit1),
    (b'2' as u16, Key::Digit2),
    (b'3' as u16, Key::Digit3),
    (b'4' as u16, Key::Digit4),
    (b'5' as u16, Key::Digit5),
    (b'6' as u16, Key::Digit6),
    (b'7' as u16, Key::Digit7),
    (b'8' as u16, Key::Digit8),
    (b'9' as u16, Key::Digit9),
    (b'A' as u16, Key::KeyA),
    (b'B' as u16, Key::KeyB),
    (b'C' as u16, Key::KeyC),
    (b'D' as u16, Key::KeyD),
    (b'E' as u16, Key::KeyE),
    (b'F' as u16, Key::KeyF),
    (b'G' as u16, Key::KeyG),
    (b'H' as u16, Key::KeyH),
    (b'I' as u16, Key::KeyI),
    (b'J' as u16, Key::KeyJ),
    (b'K' as u16, Key::KeyK),
    (b'L' as u16, Key::KeyL),
    (b'M' as u16, Key::KeyM),
    (b'N' as u16, Key::KeyN),
    (b'O' as u16, Key::KeyO),
    (b'P' as u16, Key::KeyP),
    (b'Q' as u16, Key::KeyQ),
    (b'R' as u16, Key::KeyR),
    (b'S' as u16, Key::KeyS),
    (b'T' as u16, Key::KeyT),
    (b'U' as u16, Key::KeyU),
    (b'V' as u16, Key::KeyV),
    (b'W' as u16, Key::KeyW),
    (b'X' as u16, Key::KeyX),
    (b'Y' as u16, Key::KeyY),
    (b'Z' as u16, Key::KeyZ),
    (VK_F1, Key::F1),
    (VK_F2, Key::F2),
    (VK_F3, Key::F3),
    (VK_F4, Key::F4),
    (VK_F5, Key::F5),
    (VK_F6, Key::F6),
    (VK_F7, Key::F7),
    (VK_F8, Key::F8),
    (VK_F9, Key::F9),
    (VK_F10, Key::F10),
    (VK_F11, Key::F11),
    (VK_F12, Key::F12),
];

/// Translates a virtual-key code; `None` for anything outside the table.
pub(super) fn translate_vk(vk: u16) -> Option<Key> {
    VK_TABLE
        .iter()
        .find(|(native, _)| *native == vk)
        .map(|&(_, key)| key)
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_virtual_keys_translate() {
        assert_eq!(translate_vk(VK_ESCAPE), Some(Key::Escape));
        assert_eq!(translate_vk(b'W' as u16), Some(Key::KeyW));
        assert_eq!(translate_vk(VK_F12), Some(Key::F12));
    }

    #[test]
    fn unmapped_virtual_key_is_dropped() {
        assert_eq!(translate_vk(0xFF), None);
    }
}
