use crate::bus::{
    mdec::{Mdec, MDEC_DATA},
    read_ram32,
    registers::interrupt_register::InterruptRegister,
    write_ram32,
};

use super::{
    dma_channel_control_register::{DmaChannelControlRegister, SyncMode},
    dma_control_register::DmaControlRegister,
    dma_interrupt_register::DmaInterruptRegister,
};

pub const DMA_BASE: usize = 0x1f801080;
pub const DPCR: usize = 0x1f8010f0;
pub const DICR: usize = 0x1f8010f4;

pub const MDEC_IN: usize = 0;
pub const MDEC_OUT: usize = 1;

#[derive(Copy, Clone, Debug)]
pub struct DmaChannel {
    pub base_address: u32,
    pub block_size: u32,
    pub num_blocks: u32,
    /// Words still owed in the current slice block, 0 between blocks.
    pub words_remaining: u32,
    pub control: DmaChannelControlRegister,
}

impl DmaChannel {
    pub fn new() -> Self {
        Self {
            base_address: 0,
            block_size: 0,
            num_blocks: 0,
            words_remaining: 0,
            control: DmaChannelControlRegister::from_bits_retain(0),
        }
    }

    pub fn write(&mut self, register: usize, value: u32) {
        match register {
            0 => self.base_address = value & 0xffffff,
            4 => {
                self.block_size = value & 0xffff;
                self.num_blocks = value >> 16;
                self.words_remaining = 0;
            }
            8 => self.control = DmaChannelControlRegister::from_bits_retain(value),
            _ => log::warn!("[DMA] write to unknown channel register {register}"),
        }
    }

    pub fn read(&self, register: usize) -> u32 {
        match register {
            0 => self.base_address,
            4 => self.block_size & 0xffff | (self.num_blocks & 0xffff) << 16,
            8 => self.control.bits(),
            _ => {
                log::warn!("[DMA] read from unknown channel register {register}");
                0
            }
        }
    }

    /// Word count for burst transfers, where 0 means 0x10000.
    pub fn num_words(&self) -> u32 {
        if self.block_size == 0 {
            0x10000
        } else {
            self.block_size
        }
    }

    fn advance(&mut self) {
        self.base_address = (self.base_address as i32 + self.control.step()) as u32 & 0xffffff;
    }

    fn start_slice_word(&mut self) {
        if self.words_remaining == 0 {
            self.words_remaining = self.num_words();
        }
    }

    fn finish_slice_word(&mut self) {
        self.advance();
        self.words_remaining -= 1;

        if self.words_remaining == 0 {
            self.num_blocks -= 1;
        }
    }
}

impl Default for DmaChannel {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Dma {
    channels: [DmaChannel; 7],
    pub dma_control: DmaControlRegister,
    pub dicr: DmaInterruptRegister,
}

impl Dma {
    pub fn new() -> Self {
        Self {
            channels: [DmaChannel::new(); 7],
            dma_control: DmaControlRegister::from_bits_retain(0x7654321),
            dicr: DmaInterruptRegister::from_bits_retain(0),
        }
    }

    pub fn channel(&self, channel: usize) -> Option<&DmaChannel> {
        self.channels.get(channel)
    }

    pub fn read_registers(&self, address: usize) -> u32 {
        let channel = (address - DMA_BASE) / 0x10;
        let register = address & 0xf;

        if channel < 7 {
            self.channels[channel].read(register)
        } else {
            match address {
                DPCR => self.dma_control.bits(),
                DICR => self.dicr.read(),
                _ => {
                    log::warn!("[DMA] read from unknown address 0x{:x}", address);
                    0
                }
            }
        }
    }

    pub fn write_registers(&mut self, address: usize, value: u32) {
        let channel = (address - DMA_BASE) / 0x10;
        let register = address & 0xf;

        if channel < 7 {
            self.channels[channel].write(register, value);

            if register == 8 && self.is_active(channel) {
                log::debug!(
                    "[DMA] channel {channel} started (madr: 0x{:x}, bcr: 0x{:x}, chcr: 0x{:x})",
                    self.channels[channel].base_address,
                    self.channels[channel].read(4),
                    value
                );
            }
        } else {
            match address {
                DPCR => self.dma_control = DmaControlRegister::from_bits_retain(value),
                DICR => self.dicr.write(value),
                _ => log::warn!("[DMA] write to unknown address 0x{:x}: 0x{:x}", address, value),
            }
        }
    }

    pub fn is_active(&self, channel: usize) -> bool {
        self.channels
            .get(channel)
            .is_some_and(|dma_channel| dma_channel.control.contains(DmaChannelControlRegister::START_TRANSFER))
            && self.dma_control.channel_enabled(channel)
    }

    /// Moves data for every running channel. In slice mode the mdec channels move
    /// one word at a time while the mdec raises the matching request flag, a block
    /// cut short by the flag picks up where it stopped on the next step.
    pub fn step(&mut self, mdec: &mut Mdec, ram: &mut [u8], interrupt_stat: &mut InterruptRegister) {
        for channel in 0..self.channels.len() {
            if !self.is_active(channel) {
                continue;
            }

            let finished = match channel {
                MDEC_IN => self.start_mdec_in_transfer(mdec, ram),
                MDEC_OUT => self.start_mdec_out_transfer(mdec, ram),
                _ => {
                    log::warn!("[DMA] transfers on channel {channel} are not supported");
                    true
                }
            };

            if finished {
                self.finish_transfer(channel, interrupt_stat);
            }
        }
    }

    fn start_mdec_in_transfer(&mut self, mdec: &mut Mdec, ram: &[u8]) -> bool {
        let dma_channel = &mut self.channels[MDEC_IN];

        if !dma_channel.control.from_ram() {
            log::warn!("[DMA] mdec in channel set to write to ram");
            return true;
        }

        match dma_channel.control.sync_mode() {
            SyncMode::Burst => {
                for _ in 0..dma_channel.num_words() {
                    mdec.write(MDEC_DATA, read_ram32(ram, dma_channel.base_address));
                    dma_channel.advance();
                }

                true
            }
            SyncMode::Slice => {
                while dma_channel.num_blocks > 0 && mdec.data_in_request() {
                    dma_channel.start_slice_word();
                    mdec.write(MDEC_DATA, read_ram32(ram, dma_channel.base_address));
                    dma_channel.finish_slice_word();
                }

                dma_channel.num_blocks == 0
            }
            sync_mode => {
                log::warn!("[DMA] unsupported sync mode {:?} for mdec in", sync_mode);
                true
            }
        }
    }

    fn start_mdec_out_transfer(&mut self, mdec: &mut Mdec, ram: &mut [u8]) -> bool {
        let dma_channel = &mut self.channels[MDEC_OUT];

        if dma_channel.control.from_ram() {
            log::warn!("[DMA] mdec out channel set to read from ram");
            return true;
        }

        match dma_channel.control.sync_mode() {
            SyncMode::Burst => {
                for _ in 0..dma_channel.num_words() {
                    write_ram32(ram, dma_channel.base_address, mdec.read(MDEC_DATA));
                    dma_channel.advance();
                }

                true
            }
            SyncMode::Slice => {
                while dma_channel.num_blocks > 0 && mdec.data_out_request() {
                    dma_channel.start_slice_word();
                    write_ram32(ram, dma_channel.base_address, mdec.read(MDEC_DATA));
                    dma_channel.finish_slice_word();
                }

                dma_channel.num_blocks == 0
            }
            sync_mode => {
                log::warn!("[DMA] unsupported sync mode {:?} for mdec out", sync_mode);
                true
            }
        }
    }

    pub fn finish_transfer(&mut self, channel: usize, interrupt_stat: &mut InterruptRegister) {
        let dma_channel = &mut self.channels[channel];

        dma_channel
            .control
            .remove(DmaChannelControlRegister::START_TRANSFER | DmaChannelControlRegister::FORCE_TRANSFER);

        self.dicr.raise(channel);

        if self.dicr.master_interrupt_flag() {
            interrupt_stat.insert(InterruptRegister::DMA);
        }

        log::debug!("[DMA] channel {channel} finished");
    }
}

impl Default for Dma {
    fn default() -> Self {
        Self::new()
    }
}
