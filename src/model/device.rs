use serde::{Deserialize, Serialize};
use std::fmt;

/// Устройство ввода в том виде, в каком его перечисляет `xinput list`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Device {
    pub id: u32,
    pub name: String,
    pub kind: String,
}

impl Device {
    pub fn new(id: u32, name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            kind: kind.into(),
        }
    }

    /// Мастер-устройства (`master pointer`, `master keyboard`) не имеют собственных свойств драйвера
    pub fn is_master(&self) -> bool {
        self.kind.starts_with("master")
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" (id={}, {})", self.name, self.id, self.kind)
    }
}

/// Свойство устройства; значение хранится в текстовом виде, как его печатает `xinput list-props`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Prop {
    pub id: u32,
    pub name: String,
    pub value: String,
}

impl Prop {
    pub fn new(id: u32, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Prop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.name, self.id, self.value)
    }
}
