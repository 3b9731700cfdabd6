use super::{Device, Prop};

/// Таблица устройств. Порядок строк совпадает с порядком, который вернул источник
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DeviceTable {
    rows: Vec<Device>,
}

impl DeviceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, rows: Vec<Device>) {
        self.rows = rows;
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn rows(&self) -> &[Device] {
        &self.rows
    }

    pub fn get(&self, index: usize) -> Option<&Device> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Таблица свойств выбранного устройства
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PropTable {
    rows: Vec<Prop>,
}

impl PropTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, rows: Vec<Prop>) {
        self.rows = rows;
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn rows(&self) -> &[Prop] {
        &self.rows
    }

    pub fn get(&self, index: usize) -> Option<&Prop> {
        self.rows.get(index)
    }

    pub fn position(&self, prop_id: u32) -> Option<usize> {
        self.rows.iter().position(|prop| prop.id == prop_id)
    }

    /// Обновить значение строки на месте, без перечитывания свойств
    pub fn set_value(&mut self, prop_id: u32, value: &str) -> bool {
        match self.position(prop_id) {
            Some(row) => {
                self.rows[row].value = value.to_string();
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
