use serde::Serialize;

/// Table line data. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableInfo {
    pub name: String,
    pub max_seats: u8,
    pub button_seat: u8,
}

impl TableInfo {
    pub fn new(name: impl Into<String>, max_seats: u8, button_seat: u8) -> Self {
        Self {
            name: name.into(),
            max_seats,
            button_seat,
        }
    }
}
