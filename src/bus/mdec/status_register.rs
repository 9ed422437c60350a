use super::command::ColorDepth;

/*
  31    Data-Out Fifo Empty (0=No, 1=Empty)
  30    Data-In Fifo Full   (0=No, 1=Full, or Last word received)
  29    Command Busy  (0=Ready, 1=Busy receiving or processing parameters)
  28    Data-In Request  (set when DMA0 enabled and ready to receive data)
  27    Data-Out Request (set when DMA1 enabled and ready to send data)
  25-26 Data Output Depth  (0=4bit, 1=8bit, 2=24bit, 3=15bit)
  24    Data Output Signed (0=Unsigned, 1=Signed)
  23    Data Output Bit15  (0=Clear, 1=Set) (for 15bit depth only)
  19-22 Not used (seems to be always zero)
  16-18 Current Block (0..3=Y1..Y4, 4=Cr, 5=Cb)
  0-15  Number of Parameter Words remaining
*/

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum CurrentBlock {
    Y1 = 0,
    Y2 = 1,
    Y3 = 2,
    Y4 = 3,
    #[default]
    Cr = 4,
    Cb = 5,
}

impl CurrentBlock {
    pub fn initial(depth: ColorDepth) -> Self {
        if depth.is_monochrome() {
            CurrentBlock::Y4
        } else {
            CurrentBlock::Cr
        }
    }

    /// Block following this one in a colour macroblock.
    pub fn next(&self) -> Self {
        match self {
            CurrentBlock::Cr => CurrentBlock::Cb,
            CurrentBlock::Cb => CurrentBlock::Y1,
            CurrentBlock::Y1 => CurrentBlock::Y2,
            CurrentBlock::Y2 => CurrentBlock::Y3,
            CurrentBlock::Y3 => CurrentBlock::Y4,
            CurrentBlock::Y4 => CurrentBlock::Cr,
        }
    }

    pub fn is_luma(&self) -> bool {
        !matches!(self, CurrentBlock::Cr | CurrentBlock::Cb)
    }
}

/// The stored part of the status register. Busy and the fifo/request flags are
/// never stored, they are derived from the queues whenever status is observed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusRegister {
    pub color_depth: ColorDepth,
    pub output_signed: bool,
    pub output_set_bit15: bool,
    pub parameter_count: u16,
}

/// Read-only snapshot of the full status register.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MdecStatus {
    pub data_out_fifo_empty: bool,
    pub data_in_fifo_full: bool,
    pub command_busy: bool,
    pub data_in_request: bool,
    pub data_out_request: bool,
    pub color_depth: ColorDepth,
    pub output_signed: bool,
    pub output_set_bit15: bool,
    pub current_block: CurrentBlock,
    pub parameter_count: u16,
}

impl MdecStatus {
    pub fn bits(&self) -> u32 {
        (self.data_out_fifo_empty as u32) << 31
            | (self.data_in_fifo_full as u32) << 30
            | (self.command_busy as u32) << 29
            | (self.data_in_request as u32) << 28
            | (self.data_out_request as u32) << 27
            | (self.color_depth as u32) << 25
            | (self.output_signed as u32) << 24
            | (self.output_set_bit15 as u32) << 23
            | (self.current_block as u32) << 16
            | self.parameter_count as u32
    }
}
