//=========================================================================
// X11 Key Table
//
// Fixed keysym -> `Key` pairs, matched against `XLookupKeysym(ev, 0)`
// (index 0 = unshifted, hence the lowercase latin keysyms). Unmapped
// keysyms translate to `None` and are dropped before dispatch.
//
//=========================================================================

use x11_dl::keysym;

use crate::input::Key;

static KEYSYM_TABLE: &[(u32, Key)] = &[
    (keysym::XK_Escape, Key::Escape),
    (keysym::XK_Return, Key::Enter),
    (keysym::XK_Tab, Key::Tab),
    (keysym::XK_BackSpace, Key::Backspace),
    (keysym::XK_space, Key::Space),
    (keysym::XK_Up, Key::ArrowUp),
    (keysym::XK_Down, Key::ArrowDown),
    (keysym::XK_Left, Key::ArrowLeft),
    (keysym::XK_Right, Key::ArrowRight),
    (keysym::XK_Shift_L, Key::ShiftLeft),
    (keysym::XK_Shift_R, Key::ShiftRight),
    (keysym::XK_Control_L, Key::ControlLeft),
    (keysym::XK_Control_R, Key::ControlRight),
    (keysym::XK_Alt_L, Key::AltLeft),
    (keysym::XK_Alt_R, Key::AltRight),
    (keysym::XK_0, Key::Digit0),
    (keysym::XK_1, Key::Digit1),
    (keysym::XK_2, Key::Digit2),
    (keysym::XK_3, Key::Digit3),
    (keysym::XK_4, Key::Digit4),
    (keysym::XK_5, Key::Digit5),
    (keysym::XK_6, Key::Digit6),
    (keysym::XK_7, Key::Digit7),
    (keysym::XK_8, Key::Digit8),
    (keysym::XK_9, Key::Digit9),
    (keysym::XK_a, Key::KeyA),
    (keysym::XK_b, Key::KeyB),
    (keysym::XK_c, Key::KeyC),
    (keysym::XK_d, Key::KeyD),
    (keysym::XK_e, Key::KeyE),
    (keysym::XK_f, Key::KeyF),
    (keysym::XK_g, Key::KeyG),
    (keysym::XK_h, Key::KeyH),
    (keysym::XK_i, Key::KeyI),
    (keysym::XK_j, Key::KeyJ),
    (keysym::XK_k, Key::KeyK),
    (keysym::XK_l, Key::KeyL),
    (keysym::XK_m, Key::KeyM),
    (keysym::XK_n, Key::KeyN),
    (keysym::XK_o, Key::KeyO),
    (keysym::XK_p, Key::KeyP),
    (keysym::XK_q, Key::KeyQ),
    (keysym::XK_r, Key::KeyR),
    (keysym::XK_s, Key::KeyS),
    (keysym::XK_t, Key::KeyT),
    (keysym::XK_u, Key::KeyU),
    (keysym::XK_v, Key::KeyV),
    (keysym::XK_w, Key::KeyW),
    (keysym::XK_x, Key::KeyX),
    (keysym::XK_y, Key::KeyY),
    (keysym::XK_z, Key::KeyZ),
    (keysym::XK_F1, Key::F1),
    (keysym::XK_F2, Key::F2),
    (keysym::XK_F3, Key::F3),
    (keysym::XK_F4, Key::F4),
    (keysym::XK_F5, Key::F5),
    (keysym::XK_F6, Key::F6),
    (keysym::XK_F7, Key::F7),
    (keysym::XK_F8, Key::F8),
    (keysym::XK_F9, Key::F9),
    (keysym::XK_F10, Key::F10),
    (keysym::XK_F11, Key::F11),
    (keysym::XK_F12, Key::F12),
];

/// Translates an unshifted keysym; `None` for anything outside the table.
pub(super) fn translate_keysym(sym: u64) -> Option<Key> {
    let sym = u32::try_from(sym).ok()?;
    KEYSYM_TABLE
        .iter()
        .find(|(native, _)| *native == sym)
        .map(|&(_, key)| key)
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_keysyms_translate() {
        assert_eq!(translate_keysym(keysym::XK_Escape as u64), Some(Key::Escape));
        assert_eq!(translate_keysym(keysym::XK_w as u64), Some(Key::KeyW));
        assert_eq!(translate_keysym(keysym::XK_F12 as u64), Some(Key::F12));
        assert_eq!(translate_keysym(keysym::XK_space as u64), Some(Key::Space));
    }

    #[test]
    fn unmapped_keysym_is_dropped() {
        assert_eq!(translate_keysym(keysym::XK_Caps_Lock as u64), None);
        assert_eq!(translate_keysym(u64::MAX), None);
    }

    #[test]
    fn table_has_no_duplicate_native_codes() {
        for (i, (native, _)) in KEYSYM_TABLE.iter().enumerate() {
            assert!(
                !KEYSYM_TABLE[i + 1..].iter().any(|(other, _)| other == native),
                "duplicate keysym {:#x}",
                native
            );
        }
    }
}
