use command::{Command, CommandRegister};
use control_register::ControlRegister;
use decoder::{DecodeParams, Decoder};
use input_fifo::InputFifo;
use output::{OutputBuffer, Pixel};
use status_register::{CurrentBlock, MdecStatus, StatusRegister};
use tables::TableStore;

use crate::config::MdecConfig;

pub mod command;
pub mod control_register;
pub mod decoder;
pub mod input_fifo;
pub mod output;
pub mod status_register;
pub mod tables;

pub const MDEC_DATA: u32 = 0;
pub const MDEC_STATUS: u32 = 4;

pub struct Mdec {
    command: Command,
    status: StatusRegister,
    control: ControlRegister,
    tables: TableStore,
    in_fifo: InputFifo,
    output: OutputBuffer,
    decoder: Decoder,
    decoding: bool,
    /// Parameter words received for the current command.
    word_index: usize,
}

impl Mdec {
    pub fn new() -> Self {
        Self::with_config(&MdecConfig::default())
    }

    pub fn with_config(config: &MdecConfig) -> Self {
        let mut mdec = Self {
            command: Command::None,
            status: StatusRegister::default(),
            control: ControlRegister::empty(),
            tables: TableStore::new(),
            in_fifo: InputFifo::new(config.input_fifo_capacity),
            output: OutputBuffer::new(),
            decoder: Decoder::new(),
            decoding: false,
            word_index: 0,
        };

        mdec.reset();

        mdec
    }

    /// Offset 0 reads decoded data, offset 4 reads status.
    pub fn read(&mut self, offset: u32) -> u32 {
        match offset {
            MDEC_DATA => self.read_data(),
            MDEC_STATUS => self.read_status(),
            _ => {
                log::warn!("[MDEC] read from unknown offset 0x{:x}", offset);
                0
            }
        }
    }

    /// Offset 0 takes commands and parameters, offset 4 is the control register.
    pub fn write(&mut self, offset: u32, value: u32) {
        match offset {
            MDEC_DATA => self.write_command(value),
            MDEC_STATUS => self.write_control(value),
            _ => log::warn!("[MDEC] write to unknown offset 0x{:x}: 0x{:x}", offset, value),
        }
    }

    /// Aborts any command and returns to idle. The quant and idct tables are left alone.
    pub fn reset(&mut self) {
        self.command = Command::None;
        self.status = StatusRegister::default();
        self.in_fifo.clear();
        self.output.clear();
        self.decoder.reset(CurrentBlock::Cr);
        self.decoding = false;
        self.word_index = 0;
    }

    /// Decodes queued data into the output buffer. Called periodically by the scheduler.
    pub fn step(&mut self) {
        if !self.decoding {
            return;
        }

        let params = DecodeParams {
            color_depth: self.status.color_depth,
            output_signed: self.status.output_signed,
        };

        while self.output.is_empty() {
            let Some(word) = self.in_fifo.pop() else {
                break;
            };

            for halfword in [word as u16, (word >> 16) as u16] {
                self.decoder.handle_halfword(halfword, &params, &self.tables, &mut self.output);
            }
        }

        if self.in_fifo.is_empty() {
            self.decoding = false;
        }
    }

    pub fn status(&self) -> MdecStatus {
        let data_in_fifo_full = self.data_in_fifo_full();
        let data_out_fifo_empty = self.output.is_empty();

        MdecStatus {
            data_out_fifo_empty,
            data_in_fifo_full,
            command_busy: self.command_busy(),
            data_in_request: !data_in_fifo_full && self.control.enable_data_in(),
            data_out_request: !data_out_fifo_empty && self.control.enable_data_out(),
            color_depth: self.status.color_depth,
            output_signed: self.status.output_signed,
            output_set_bit15: self.status.output_set_bit15,
            current_block: self.decoder.current_block(),
            parameter_count: self.status.parameter_count,
        }
    }

    pub fn command_busy(&self) -> bool {
        self.status.parameter_count > 0 || !self.in_fifo.is_empty() || self.decoding || !self.output.is_empty()
    }

    pub fn data_in_fifo_full(&self) -> bool {
        self.in_fifo.is_full() || (self.command != Command::None && self.status.parameter_count == 0)
    }

    pub fn data_in_request(&self) -> bool {
        !self.data_in_fifo_full() && self.control.enable_data_in()
    }

    pub fn data_out_request(&self) -> bool {
        !self.output.is_empty() && self.control.enable_data_out()
    }

    pub fn command(&self) -> Command {
        self.command
    }

    pub fn is_decoding(&self) -> bool {
        self.decoding
    }

    pub fn control(&self) -> ControlRegister {
        self.control
    }

    pub fn tables(&self) -> &TableStore {
        &self.tables
    }

    pub fn output_pixels(&self) -> &[Pixel] {
        self.output.pixels()
    }

    pub fn input_fifo_len(&self) -> usize {
        self.in_fifo.len()
    }

    fn read_data(&mut self) -> u32 {
        match self.output.read_word(self.status.color_depth, self.status.output_set_bit15) {
            Some(data) => data,
            None => {
                log::warn!("[MDEC] reading empty buffer");
                0
            }
        }
    }

    fn read_status(&self) -> u32 {
        let value = self.status().bits();

        log::trace!("[MDEC] status read: 0x{:08x}", value);

        value
    }

    fn write_control(&mut self, value: u32) {
        self.control = ControlRegister::from_bits_truncate(value);

        log::debug!(
            "[MDEC] control write: 0x{:08x} (data in: {}, data out: {})",
            value,
            self.control.enable_data_in(),
            self.control.enable_data_out()
        );

        if self.control.contains(ControlRegister::RESET) {
            self.control.remove(ControlRegister::RESET);
            log::debug!("[MDEC] reset");
            self.reset();
        }
    }

    fn write_command(&mut self, value: u32) {
        if !self.command_busy() {
            self.handle_command(CommandRegister(value));
            return;
        }

        if self.status.parameter_count == 0 {
            log::warn!("[MDEC] parameter 0x{:08x} with no parameters remaining, dropping", value);
            return;
        }

        self.status.parameter_count -= 1;

        log::trace!("[MDEC] parameter 0x{:08x} ({} remaining)", value, self.status.parameter_count);

        match self.command {
            Command::DecodeMacroblock => {
                if !self.in_fifo.push(value) {
                    log::warn!("[MDEC] data-in fifo overrun, dropping 0x{:08x}", value);
                }

                if self.data_in_fifo_full() {
                    self.decoding = true;
                }
            }
            Command::SetQuantTable => self.tables.write_quant_word(self.word_index, value),
            Command::SetIdct => self.tables.write_idct_word(self.word_index, value),
            Command::None => (),
        }

        self.word_index += 1;
    }

    fn handle_command(&mut self, command: CommandRegister) {
        self.word_index = 0;
        self.command = command.command();

        match self.command {
            Command::DecodeMacroblock => {
                self.status.color_depth = command.color_depth();
                self.status.output_signed = command.output_signed();
                self.status.output_set_bit15 = command.output_set_bit15();
                self.status.parameter_count = command.size();

                self.decoder.reset(CurrentBlock::initial(self.status.color_depth));

                self.in_fifo.clear();
                self.output.clear();
                self.decoding = false;

                log::debug!(
                    "[MDEC] decode macroblock (depth: {:?}, signed: {}, set bit15: {}, size: 0x{:x})",
                    self.status.color_depth,
                    self.status.output_signed,
                    self.status.output_set_bit15,
                    self.status.parameter_count
                );
            }
            Command::SetQuantTable => {
                // 64 bytes of luminance, plus 64 bytes of color if bit 0 is set
                self.status.parameter_count = if command.with_color() { 32 } else { 16 };

                log::debug!("[MDEC] set quant table (color: {})", command.with_color());
            }
            Command::SetIdct => {
                // 64 signed halfwords
                self.status.parameter_count = 32;

                log::debug!("[MDEC] set idct table");
            }
            Command::None => {
                log::warn!("[MDEC] unknown command 0x{:x}, staying idle", command.opcode());
            }
        }
    }
}

impl Default for Mdec {
    fn default() -> Self {
        Self::new()
    }
}
