use super::command::ColorDepth;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Pixel {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn mono(y: u8) -> Self {
        Self { r: y, g: y, b: y }
    }

    pub fn to_rgb24(&self) -> u32 {
        self.r as u32 | (self.g as u32) << 8 | (self.b as u32) << 16
    }

    pub fn to_rgb15(&self) -> u16 {
        (self.r >> 3) as u16 | ((self.g >> 3) as u16) << 5 | ((self.b >> 3) as u16) << 10
    }

    /// Monochrome output only looks at the first channel.
    pub fn intensity(&self) -> u8 {
        self.r
    }
}

/// 24bit pixels don't line up with words, four of them are spread over three reads.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    First,
    Second,
    Third,
}

pub struct OutputBuffer {
    pixels: Vec<Pixel>,
    pointer: usize,
    phase: Phase,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self {
            pixels: Vec::with_capacity(256),
            pointer: 0,
            phase: Phase::First,
        }
    }

    pub fn push(&mut self, pixel: Pixel) {
        self.pixels.push(pixel);
    }

    pub fn extend_from_slice(&mut self, pixels: &[Pixel]) {
        self.pixels.extend_from_slice(pixels);
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn pointer(&self) -> usize {
        self.pointer
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn clear(&mut self) {
        self.pixels.clear();
        self.pointer = 0;
        self.phase = Phase::First;
    }

    fn pixel(&self, offset: usize) -> Pixel {
        self.pixels.get(self.pointer + offset).copied().unwrap_or_default()
    }

    /// Packs the next word of output in the given depth. Returns None when there is nothing to read.
    pub fn read_word(&mut self, depth: ColorDepth, set_bit15: bool) -> Option<u32> {
        if self.pixels.is_empty() {
            return None;
        }

        // 0:  r B G R
        // 1:  G R b g
        // 2:  b g r B
        let data = match depth {
            ColorDepth::Bit24 => {
                let (data, next_phase, advance) = match self.phase {
                    Phase::First => (
                        self.pixel(0).to_rgb24() | (self.pixel(1).to_rgb24() & 0xff) << 24,
                        Phase::Second,
                        0,
                    ),
                    Phase::Second => (
                        (self.pixel(1).to_rgb24() & 0xffff00) >> 8 | (self.pixel(2).to_rgb24() & 0xffff) << 16,
                        Phase::Third,
                        0,
                    ),
                    Phase::Third => (
                        (self.pixel(2).to_rgb24() & 0xff0000) >> 16 | (self.pixel(3).to_rgb24() & 0xffffff) << 8,
                        Phase::First,
                        4,
                    ),
                };

                self.phase = next_phase;
                self.pointer += advance;

                data
            }
            ColorDepth::Bit15 => {
                let bit15 = (set_bit15 as u32) << 15;

                let data = (bit15 | self.pixel(0).to_rgb15() as u32)
                    | (bit15 | self.pixel(1).to_rgb15() as u32) << 16;

                self.pointer += 2;

                data
            }
            ColorDepth::Bit8 => {
                let mut data = 0;
                for i in 0..4 {
                    data |= (self.pixel(i).intensity() as u32) << (i * 8);
                }

                self.pointer += 4;

                data
            }
            ColorDepth::Bit4 => {
                let mut data = 0;
                for i in 0..8 {
                    data |= ((self.pixel(i).intensity() >> 4) as u32) << (i * 4);
                }

                self.pointer += 8;

                data
            }
        };

        if self.pointer >= self.pixels.len() {
            self.clear();
        }

        Some(data)
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_of(pixels: &[Pixel]) -> OutputBuffer {
        let mut buffer = OutputBuffer::new();
        buffer.extend_from_slice(pixels);
        buffer
    }

    #[test]
    fn rgb24_packs_four_pixels_into_three_words() {
        let pixels = [
            Pixel::new(0x01, 0x02, 0x03),
            Pixel::new(0x04, 0x05, 0x06),
            Pixel::new(0x07, 0x08, 0x09),
            Pixel::new(0x0a, 0x0b, 0x0c),
        ];
        let mut buffer = buffer_of(&pixels);

        let mut bytes = Vec::new();
        for _ in 0..3 {
            assert!(!buffer.is_empty());
            bytes.extend_from_slice(&buffer.read_word(ColorDepth::Bit24, false).unwrap().to_le_bytes());
        }

        assert_eq!(bytes, (1..=12).collect::<Vec<u8>>());
        assert!(buffer.is_empty());
        assert_eq!(buffer.phase(), Phase::First);
        assert_eq!(buffer.pointer(), 0);
    }

    #[test]
    fn rgb24_only_advances_after_third_phase() {
        let mut buffer = buffer_of(&[Pixel::default(); 8]);

        buffer.read_word(ColorDepth::Bit24, false);
        assert_eq!((buffer.pointer(), buffer.phase()), (0, Phase::Second));
        buffer.read_word(ColorDepth::Bit24, false);
        assert_eq!((buffer.pointer(), buffer.phase()), (0, Phase::Third));
        buffer.read_word(ColorDepth::Bit24, false);
        assert_eq!((buffer.pointer(), buffer.phase()), (4, Phase::First));
    }

    #[test]
    fn rgb15_sets_bit15_per_halfword() {
        let mut buffer = buffer_of(&[Pixel::new(0xff, 0, 0), Pixel::new(0, 0, 0xff)]);

        let data = buffer.read_word(ColorDepth::Bit15, true).unwrap();

        assert_eq!(data & 0xffff, 0x8000 | 0x1f);
        assert_eq!(data >> 16, 0x8000 | 0x1f << 10);
        assert!(buffer.is_empty());
    }

    #[test]
    fn rgb15_without_bit15() {
        let mut buffer = buffer_of(&[Pixel::new(0x80, 0x80, 0x80); 2]);

        assert_eq!(buffer.read_word(ColorDepth::Bit15, false), Some(0x4210_4210));
    }

    #[test]
    fn mono8_packs_low_byte_first() {
        let mut buffer = buffer_of(&[Pixel::mono(0x11), Pixel::mono(0x22), Pixel::mono(0x33), Pixel::mono(0x44)]);

        assert_eq!(buffer.read_word(ColorDepth::Bit8, false), Some(0x4433_2211));
        assert!(buffer.is_empty());
    }

    #[test]
    fn mono4_packs_top_nibbles_low_nibble_first() {
        let pixels: Vec<Pixel> = (1..=8).map(|i| Pixel::mono(i << 4 | 0xf)).collect();
        let mut buffer = buffer_of(&pixels);

        assert_eq!(buffer.read_word(ColorDepth::Bit4, false), Some(0x8765_4321));
        assert!(buffer.is_empty());
    }

    #[test]
    fn empty_buffer_reads_nothing() {
        let mut buffer = OutputBuffer::new();

        assert_eq!(buffer.read_word(ColorDepth::Bit24, false), None);
        assert_eq!(buffer.phase(), Phase::First);
    }

    #[test]
    fn short_tail_reads_as_zero_pixels() {
        let mut buffer = buffer_of(&[Pixel::mono(0xaa), Pixel::mono(0xbb)]);

        assert_eq!(buffer.read_word(ColorDepth::Bit8, false), Some(0x0000_bbaa));
        assert!(buffer.is_empty());
    }
}
