use super::{
    command::ColorDepth,
    output::{OutputBuffer, Pixel},
    status_register::CurrentBlock,
    tables::TableStore,
};

// end of block, also used as padding between blocks
const END_OF_BLOCK: u16 = 0xfe00;

/// Inverse zig-zag lookup table.
const ZAGZIG: [usize; 64] = [
    0, 1, 8, 16, 9, 2, 3, 10,
    17, 24, 32, 25, 18, 11, 4, 5,
    12, 19, 26, 33, 40, 48, 41, 34,
    27, 20, 13, 6, 7, 14, 21, 28,
    35, 42, 49, 56, 57, 50, 43, 36,
    29, 22, 15, 23, 30, 37, 44, 51,
    58, 59, 52, 45, 38, 31, 39, 46,
    53, 60, 61, 54, 47, 55, 62, 63,
];

// where each of the four luma blocks lands in the 16x16 macroblock
const fn luma_offset(block: CurrentBlock) -> (usize, usize) {
    match block {
        CurrentBlock::Y1 => (0, 0),
        CurrentBlock::Y2 => (8, 0),
        CurrentBlock::Y3 => (0, 8),
        _ => (8, 8),
    }
}

#[derive(Copy, Clone, Debug)]
pub struct DecodeParams {
    pub color_depth: ColorDepth,
    pub output_signed: bool,
}

pub struct BlockBuffers {
    pub cr: [i32; 64],
    pub cb: [i32; 64],
    pub y: [i32; 64],
}

impl BlockBuffers {
    fn new() -> Self {
        Self {
            cr: [0; 64],
            cb: [0; 64],
            y: [0; 64],
        }
    }

    fn clear(&mut self) {
        self.cr.fill(0);
        self.cb.fill(0);
        self.y.fill(0);
    }
}

/// Turns the halfword stream of a decode command into pixels, one block at a time.
pub struct Decoder {
    blocks: BlockBuffers,
    coefficients: [i32; 64],
    idct_buffer: [i32; 64],
    colors: [Pixel; 256],
    /// Index of the last coefficient written, None while waiting for the dc value of a new block.
    index: Option<usize>,
    q_scale: i32,
    current_block: CurrentBlock,
}

impl Decoder {
    pub fn new() -> Self {
        Self {
            blocks: BlockBuffers::new(),
            coefficients: [0; 64],
            idct_buffer: [0; 64],
            colors: [Pixel::default(); 256],
            index: None,
            q_scale: 0,
            current_block: CurrentBlock::Cr,
        }
    }

    pub fn reset(&mut self, current_block: CurrentBlock) {
        self.blocks.clear();
        self.coefficients.fill(0);
        self.colors.fill(Pixel::default());
        self.index = None;
        self.q_scale = 0;
        self.current_block = current_block;
    }

    pub fn current_block(&self) -> CurrentBlock {
        self.current_block
    }

    pub fn blocks(&self) -> &BlockBuffers {
        &self.blocks
    }

    /// Feeds one halfword of compressed data. Returns true when it completed a
    /// macroblock (or a single block for monochrome output) and pixels were appended to `output`.
    pub fn handle_halfword(
        &mut self,
        halfword: u16,
        params: &DecodeParams,
        tables: &TableStore,
        output: &mut OutputBuffer,
    ) -> bool {
        let quant_table = self.quant_table(params, tables);

        match self.index {
            None => {
                if halfword == END_OF_BLOCK {
                    return false;
                }

                self.coefficients.fill(0);
                self.q_scale = (halfword >> 10) as i32;

                let value = if self.q_scale == 0 {
                    sign_extend_10(halfword) * 2
                } else {
                    sign_extend_10(halfword) * quant_table[0] as i32
                };

                self.store_coefficient(0, value);
                self.index = Some(0);

                false
            }
            Some(index) => {
                let next = index + (halfword >> 10) as usize + 1;

                if halfword == END_OF_BLOCK || next > 63 {
                    return self.finish_block(params, tables, output);
                }

                let value = if self.q_scale == 0 {
                    sign_extend_10(halfword) * 2
                } else {
                    (sign_extend_10(halfword) * quant_table[next] as i32 * self.q_scale + 4) / 8
                };

                self.store_coefficient(next, value);
                self.index = Some(next);

                if next == 63 {
                    return self.finish_block(params, tables, output);
                }

                false
            }
        }
    }

    fn quant_table<'a>(&self, params: &DecodeParams, tables: &'a TableStore) -> &'a [u8; 64] {
        if params.color_depth.is_monochrome() || self.current_block.is_luma() {
            &tables.luminance_quant_table
        } else {
            &tables.color_quant_table
        }
    }

    fn store_coefficient(&mut self, index: usize, value: i32) {
        let value = value.clamp(-0x400, 0x3ff);

        // without a quant scale the coefficients are already in raster order
        if self.q_scale == 0 {
            self.coefficients[index] = value;
        } else {
            self.coefficients[ZAGZIG[index]] = value;
        }
    }

    fn finish_block(&mut self, params: &DecodeParams, tables: &TableStore, output: &mut OutputBuffer) -> bool {
        self.index = None;

        let target = match self.current_block {
            CurrentBlock::Cr if !params.color_depth.is_monochrome() => &mut self.blocks.cr,
            CurrentBlock::Cb if !params.color_depth.is_monochrome() => &mut self.blocks.cb,
            _ => &mut self.blocks.y,
        };

        idct(&self.coefficients, &mut self.idct_buffer, target, &tables.idct_table);

        if params.color_depth.is_monochrome() {
            for &y in self.blocks.y.iter() {
                output.push(Pixel::mono(y_to_mono(y, params.output_signed)));
            }

            return true;
        }

        let block = self.current_block;
        self.current_block = block.next();

        if !block.is_luma() {
            return false;
        }

        let (x_offset, y_offset) = luma_offset(block);
        yuv_to_rgb(&self.blocks, x_offset, y_offset, params.output_signed, &mut self.colors);

        if block == CurrentBlock::Y4 {
            output.extend_from_slice(&self.colors);
            return true;
        }

        false
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

fn sign_extend_10(value: u16) -> i32 {
    (((value << 6) as i16) >> 6) as i32
}

fn idct(coefficients: &[i32; 64], buffer: &mut [i32; 64], block: &mut [i32; 64], idct_table: &[i16; 64]) {
    idct_pass(coefficients, buffer, idct_table);
    idct_pass(buffer, block, idct_table);
}

fn idct_pass(src: &[i32; 64], dst: &mut [i32; 64], idct_table: &[i16; 64]) {
    for x in 0..8 {
        for y in 0..8 {
            let mut sum = 0;
            for z in 0..8 {
                sum += src[8 * z + y] * (idct_table[8 * z + x] as i32 / 8);
            }

            dst[8 * y + x] = (sum + 0xfff) / 0x2000;
        }
    }
}

fn y_to_mono(y: i32, signed: bool) -> u8 {
    // clip to 9 bits, then saturate to 8
    let y = ((y << 23) >> 23).clamp(-0x80, 0x7f) as i8 as u8;

    if signed {
        y
    } else {
        y ^ 0x80
    }
}

fn yuv_to_rgb(blocks: &BlockBuffers, x_offset: usize, y_offset: usize, signed: bool, colors: &mut [Pixel; 256]) {
    for row in 0..8 {
        for col in 0..8 {
            let chroma = 8 * ((row + y_offset) / 2) + (col + x_offset) / 2;

            let cr = blocks.cr[chroma];
            let cb = blocks.cb[chroma];

            // 1.402, -0.3437, -0.7143, 1.772 in 4.12 fixed point
            let r = (cr * 0x166e) >> 12;
            let g = (cb * -0x57f + cr * -0xb6d) >> 12;
            let b = (cb * 0x1c5a) >> 12;

            let y = blocks.y[8 * row + col];

            let channel = |value: i32| {
                let value = (y + value).clamp(-0x80, 0x7f) as i8 as u8;

                if signed {
                    value
                } else {
                    value ^ 0x80
                }
            };

            colors[16 * (row + y_offset) + col + x_offset] = Pixel::new(channel(r), channel(g), channel(b));
        }
    }
}
