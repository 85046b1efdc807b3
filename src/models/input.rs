//! Input events consumed by the engine

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use wasm_bindgen::prelude::*;

use crate::errors::GridError;

/// Mouse button of a pointer-down/up event
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerButton {
    Primary,
    Secondary,
    Other,
}

impl PointerButton {
    /// Decode a DOM `MouseEvent.which` value (1 = left, 3 = right)
    pub fn from_which(which: u32) -> Self {
        match which {
            1 => PointerButton::Primary,
            3 => PointerButton::Secondary,
            _ => PointerButton::Other,
        }
    }
}

/// Arrow keys, keyed by their DOM key codes
#[wasm_bindgen]
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde_repr::Serialize_repr, serde_repr::Deserialize_repr)]
pub enum ArrowKey {
    Left = 37,
    Up = 38,
    Right = 39,
    Down = 40,
}

impl ArrowKey {
    /// Decode a `KeyboardEvent.keyCode`; any other key yields `None`
    pub fn from_key_code(code: u32) -> Option<Self> {
        match code {
            37 => Some(ArrowKey::Left),
            38 => Some(ArrowKey::Up),
            39 => Some(ArrowKey::Right),
            40 => Some(ArrowKey::Down),
            _ => None,
        }
    }

    /// (row, col) step
    pub fn delta(&self) -> (isize, isize) {
        match self {
            ArrowKey::Left => (0, -1),
            ArrowKey::Up => (-1, 0),
            ArrowKey::Right => (0, 1),
            ArrowKey::Down => (1, 0),
        }
    }
}

/// Item picked from the grid's context menu
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextMenuAction {
    Copy,
    Paste,
}

impl FromStr for ContextMenuAction {
    type Err = GridError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "copy" => Ok(ContextMenuAction::Copy),
            "paste" => Ok(ContextMenuAction::Paste),
            other => Err(GridError::InvalidEvent(format!("unknown context menu action '{}'", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_key_codes() {
        assert_eq!(ArrowKey::from_key_code(38), Some(ArrowKey::Up));
        assert_eq!(ArrowKey::from_key_code(40), Some(ArrowKey::Down));
        assert_eq!(ArrowKey::from_key_code(37), Some(ArrowKey::Left));
        assert_eq!(ArrowKey::from_key_code(39), Some(ArrowKey::Right));
        assert_eq!(ArrowKey::from_key_code(13), None);
    }

    #[test]
    fn test_pointer_button_from_which() {
        assert_eq!(PointerButton::from_which(1), PointerButton::Primary);
        assert_eq!(PointerButton::from_which(3), PointerButton::Secondary);
        assert_eq!(PointerButton::from_which(2), PointerButton::Other);
    }

    #[test]
    fn test_context_menu_action_parse() {
        assert_eq!("copy".parse::<ContextMenuAction>().unwrap(), ContextMenuAction::Copy);
        assert_eq!("paste".parse::<ContextMenuAction>().unwrap(), ContextMenuAction::Paste);
        assert!("cut".parse::<ContextMenuAction>().is_err());
    }
}
