use serde::{Deserialize, Serialize};

/// Where the target application's grid sits on screen.
///
/// Cell `(x, y)` is clicked at `origin + cell_size * (x, y)`. After each
/// cell the pointer is moved to `park` so it does not cover the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenLayout {
    pub origin: (i32, i32),
    pub cell_size: (i32, i32),
    pub park: (i32, i32),
}

impl Default for ScreenLayout {
    fn default() -> Self {
        Self { origin: (420, 300), cell_size: (122, 137), park: (-1, -1) }
    }
}

impl ScreenLayout {
    pub fn cell_position(&self, x: u32, y: u32) -> (i32, i32) {
        (self.origin.0 + self.cell_size.0 * x as i32, self.origin.1 + self.cell_size.1 * y as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_cell_is_origin() {
        let layout = ScreenLayout::default();
        assert_eq!(layout.cell_position(0, 0), (420, 300));
    }

    #[test]
    fn cells_step_by_cell_size() {
        let layout = ScreenLayout::default();
        assert_eq!(layout.cell_position(1, 0), (542, 300));
        assert_eq!(layout.cell_position(9, 4), (420 + 122 * 9, 300 + 137 * 4));
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let layout: ScreenLayout = serde_json::from_str(r#"{"origin": [0, 0]}"#).unwrap();
        assert_eq!(layout.origin, (0, 0));
        assert_eq!(layout.cell_size, (122, 137));
        assert_eq!(layout.park, (-1, -1));
    }
}
