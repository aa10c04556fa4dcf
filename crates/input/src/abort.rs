use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use device_query::{DeviceQuery, DeviceState, Keycode};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;
use tracing::warn;

use crate::InputError;

/// Polled once per frame; `true` stops playback.
pub trait AbortSignal {
    fn should_abort(&mut self) -> bool;
}

/// Shared flag that can be raised from anywhere holding a clone.
#[derive(Debug, Clone, Default)]
pub struct AbortToken {
    aborted: Arc<AtomicBool>,
}

impl AbortToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn abort(&self) {
        self.aborted.store(true, Ordering::Release);
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::Acquire)
    }
}

impl AbortSignal for AbortToken {
    fn should_abort(&mut self) -> bool {
        self.is_aborted()
    }
}

/// Never fires.
#[derive(Debug, Default, Clone, Copy)]
pub struct NeverAbort;

impl AbortSignal for NeverAbort {
    fn should_abort(&mut self) -> bool {
        false
    }
}

/// Watches for the quit key, globally and in the terminal.
///
/// The player clicks into another application, so that window owns
/// keyboard focus while frames are drawn. The key is therefore read from
/// the global keyboard state; it is only seen if it is held down at the
/// moment of a poll, which happens once per frame. Ctrl-C also stops
/// playback, both globally and as a terminal key event.
///
/// Raw mode is enabled for the lifetime of the value so single key presses
/// in the terminal arrive without Enter. Output written meanwhile needs
/// explicit `\r\n`.
pub struct KeyAbort {
    key: char,
    keycode: Keycode,
    device: DeviceState,
}

impl KeyAbort {
    pub fn new(key: char) -> Result<Self, InputError> {
        let keycode = keycode_for(key).ok_or(InputError::UnsupportedAbortKey(key))?;
        let device = DeviceState::new();
        terminal::enable_raw_mode()?;
        Ok(Self { key: key.to_ascii_lowercase(), keycode, device })
    }

    fn poll_terminal(&self) -> Result<bool, InputError> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if is_abort_event(&key, self.key) {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }
}

impl AbortSignal for KeyAbort {
    fn should_abort(&mut self) -> bool {
        if keys_request_abort(&self.device.get_keys(), self.keycode) {
            return true;
        }
        match self.poll_terminal() {
            Ok(pressed) => pressed,
            Err(err) => {
                warn!(error = %err, "terminal poll failed; continuing playback");
                false
            }
        }
    }
}

impl Drop for KeyAbort {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Whether a terminal key event asks playback to stop.
pub fn is_abort_event(event: &KeyEvent, key: char) -> bool {
    if event.kind == KeyEventKind::Release {
        return false;
    }
    match event.code {
        KeyCode::Char(ch) if event.modifiers.contains(KeyModifiers::CONTROL) => {
            ch.eq_ignore_ascii_case(&'c')
        }
        KeyCode::Char(ch) => ch.eq_ignore_ascii_case(&key),
        _ => false,
    }
}

/// Whether the currently held keys ask playback to stop.
pub fn keys_request_abort(pressed: &[Keycode], key: Keycode) -> bool {
    let control = pressed.iter().any(|held| matches!(held, Keycode::LControl | Keycode::RControl));
    pressed.contains(&key) || (control && pressed.contains(&Keycode::C))
}

/// Global keycode for a letter or digit abort key.
pub fn keycode_for(key: char) -> Option<Keycode> {
    let keycode = match key.to_ascii_lowercase() {
        'a' => Keycode::A,
        'b' => Keycode::B,
        'c' => Keycode::C,
        'd' => Keycode::D,
        'e' => Keycode::E,
        'f' => Keycode::F,
        'g' => Keycode::G,
        'h' => Keycode::H,
        'i' => Keycode::I,
        'j' => Keycode::J,
        'k' => Keycode::K,
        'l' => Keycode::L,
        'm' => Keycode::M,
        'n' => Keycode::N,
        'o' => Keycode::O,
        'p' => Keycode::P,
        'q' => Keycode::Q,
        'r' => Keycode::R,
        's' => Keycode::S,
        't' => Keycode::T,
        'u' => Keycode::U,
        'v' => Keycode::V,
        'w' => Keycode::W,
        'x' => Keycode::X,
        'y' => Keycode::Y,
        'z' => Keycode::Z,
        '0' => Keycode::Key0,
        '1' => Keycode::Key1,
        '2' => Keycode::Key2,
        '3' => Keycode::Key3,
        '4' => Keycode::Key4,
        '5' => Keycode::Key5,
        '6' => Keycode::Key6,
        '7' => Keycode::Key7,
        '8' => Keycode::Key8,
        '9' => Keycode::Key9,
        _ => return None,
    };
    Some(keycode)
}
