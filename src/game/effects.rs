use crate::config::{CLEAR_FLASH_MS, LOCK_FLASH_MS};

/// Short-lived visual cues. Purely cosmetic; gameplay never reads them.
#[derive(Clone, Debug, Default)]
pub struct Effects {
    pub lock_flash_cells: Vec<(usize, usize)>,
    pub lock_flash_ms: u64,
    pub clear_flash_rows: Vec<usize>,
    pub clear_flash_ms: u64,
}

impl Effects {
    pub fn note_lock(&mut self, cells: Vec<(usize, usize)>) {
        self.lock_flash_cells = cells;
        self.lock_flash_ms = LOCK_FLASH_MS;
    }

    pub fn note_clear(&mut self, rows: Vec<usize>) {
        if rows.is_empty() {
            return;
        }
        self.clear_flash_rows = rows;
        self.clear_flash_ms = CLEAR_FLASH_MS;
    }

    pub fn advance(&mut self, delta_ms: u64) {
        self.lock_flash_ms = self.lock_flash_ms.saturating_sub(delta_ms);
        if self.lock_flash_ms == 0 {
            self.lock_flash_cells.clear();
        }
        self.clear_flash_ms = self.clear_flash_ms.saturating_sub(delta_ms);
        if self.clear_flash_ms == 0 {
            self.clear_flash_rows.clear();
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
