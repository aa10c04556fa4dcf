use enigo::{Button, Coordinate, Direction, Enigo, Mouse, Settings};
use tracing::debug;

use crate::InputError;

/// Something that can position a pointer and click.
pub trait Actuator {
    fn move_to(&mut self, x: i32, y: i32) -> Result<(), InputError>;
    fn click(&mut self, count: u8) -> Result<(), InputError>;
}

/// Drives the real system pointer through enigo.
pub struct EnigoActuator {
    enigo: Enigo,
}

impl EnigoActuator {
    pub fn new() -> Result<Self, InputError> {
        let settings = Settings::default();
        let enigo = Enigo::new(&settings)?;
        debug!("enigo connection established");
        Ok(Self { enigo })
    }
}

impl Actuator for EnigoActuator {
    fn move_to(&mut self, x: i32, y: i32) -> Result<(), InputError> {
        self.enigo.move_mouse(x, y, Coordinate::Abs)?;
        Ok(())
    }

    fn click(&mut self, count: u8) -> Result<(), InputError> {
        for _ in 0..count {
            self.enigo.button(Button::Left, Direction::Click)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveTo(i32, i32),
    Click(u8),
}

/// Records actions instead of performing them. Used for dry runs.
#[derive(Debug, Default)]
pub struct RecordingActuator {
    actions: Vec<Action>,
}

impl RecordingActuator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn total_clicks(&self) -> u32 {
        self.actions
            .iter()
            .map(|action| match action {
                Action::Click(count) => *count as u32,
                Action::MoveTo(..) => 0,
            })
            .sum()
    }
}

impl Actuator for RecordingActuator {
    fn move_to(&mut self, x: i32, y: i32) -> Result<(), InputError> {
        self.actions.push(Action::MoveTo(x, y));
        Ok(())
    }

    fn click(&mut self, count: u8) -> Result<(), InputError> {
        self.actions.push(Action::Click(count));
        Ok(())
    }
}
