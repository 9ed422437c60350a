/*
  29-31 Command (1=decode macroblock, 2=set quant table, 3=set idct table)
  27-28 Data Output Depth  (0=4bit, 1=8bit, 2=24bit, 3=15bit)
  26    Data Output Signed (0=Unsigned, 1=Signed)
  25    Data Output Bit15  (0=Clear, 1=Set) (for 15bit depth only)
  0-15  Number of Parameter Words (size of compressed data)

  for set quant table, bit 0 selects luminance only (0) or luminance and color (1)
*/

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum ColorDepth {
    #[default]
    Bit4 = 0,
    Bit8 = 1,
    Bit24 = 2,
    Bit15 = 3,
}

impl ColorDepth {
    pub fn from_bits(value: u32) -> Self {
        match value & 0x3 {
            0 => ColorDepth::Bit4,
            1 => ColorDepth::Bit8,
            2 => ColorDepth::Bit24,
            _ => ColorDepth::Bit15,
        }
    }

    pub fn is_monochrome(&self) -> bool {
        matches!(self, ColorDepth::Bit4 | ColorDepth::Bit8)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum Command {
    #[default]
    None,
    DecodeMacroblock,
    SetQuantTable,
    SetIdct,
}

impl Command {
    pub fn from_opcode(opcode: u32) -> Self {
        match opcode {
            1 => Command::DecodeMacroblock,
            2 => Command::SetQuantTable,
            3 => Command::SetIdct,
            _ => Command::None,
        }
    }
}

#[derive(Copy, Clone, Debug)]
pub struct CommandRegister(pub u32);

impl CommandRegister {
    pub fn opcode(&self) -> u32 {
        (self.0 >> 29) & 0x7
    }

    pub fn command(&self) -> Command {
        Command::from_opcode(self.opcode())
    }

    pub fn color_depth(&self) -> ColorDepth {
        ColorDepth::from_bits(self.0 >> 27)
    }

    pub fn output_signed(&self) -> bool {
        (self.0 >> 26) & 1 == 1
    }

    pub fn output_set_bit15(&self) -> bool {
        (self.0 >> 25) & 1 == 1
    }

    pub fn size(&self) -> u16 {
        self.0 as u16
    }

    pub fn with_color(&self) -> bool {
        self.0 & 1 == 1
    }
}
