/// Quantization and idct tables. Loaded by commands 2 and 3 and kept across
/// resets, games usually upload them once and then decode many frames.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableStore {
    pub luminance_quant_table: [u8; 64],
    pub color_quant_table: [u8; 64],
    pub idct_table: [i16; 64],
}

impl TableStore {
    pub fn new() -> Self {
        Self {
            luminance_quant_table: [0; 64],
            color_quant_table: [0; 64],
            idct_table: [0; 64],
        }
    }

    /// Stores the nth parameter word of a set quant table command. The first 16 words
    /// go to the luminance table, the next 16 to the color table. Anything past that is dropped.
    pub fn write_quant_word(&mut self, index: usize, value: u32) {
        let (table, base) = if index < 16 {
            (&mut self.luminance_quant_table, index * 4)
        } else if index < 32 {
            (&mut self.color_quant_table, (index - 16) * 4)
        } else {
            log::warn!("[MDEC] quant table write past end (word {index}), dropping");
            return;
        };

        table[base..base + 4].copy_from_slice(&value.to_le_bytes());
    }

    /// Stores the nth parameter word of a set idct command, two signed halfwords per word.
    pub fn write_idct_word(&mut self, index: usize, value: u32) {
        if index >= 32 {
            log::warn!("[MDEC] idct table write past end (word {index}), dropping");
            return;
        }

        self.idct_table[index * 2] = value as i16;
        self.idct_table[index * 2 + 1] = (value >> 16) as i16;
    }
}

impl Default for TableStore {
    fn default() -> Self {
        Self::new()
    }
}
