use dma::dma::Dma;
use mdec::Mdec;
use registers::interrupt_register::InterruptRegister;
use scheduler::{EventType, Scheduler};
use thiserror::Error;

use crate::config::{ConfigError, SystemConfig};

pub mod dma;
pub mod mdec;
pub mod registers;
pub mod scheduler;

pub const RAM_SIZE: usize = 0x200000;

const MDEC_BASE: usize = 0x1f801820;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BusError {
    #[error("unmapped address 0x{address:08x}")]
    UnmappedAddress { address: u32 },
    #[error("unaligned 32 bit access at 0x{address:08x}")]
    UnalignedAccess { address: u32 },
}

pub(crate) fn read_ram32(ram: &[u8], address: u32) -> u32 {
    let address = address as usize & (RAM_SIZE - 4);

    u32::from_le_bytes([ram[address], ram[address + 1], ram[address + 2], ram[address + 3]])
}

pub(crate) fn write_ram32(ram: &mut [u8], address: u32, value: u32) {
    let address = address as usize & (RAM_SIZE - 4);

    ram[address..address + 4].copy_from_slice(&value.to_le_bytes());
}

/// Owns the devices and hands them to each other explicitly.
pub struct Bus {
    main_ram: Box<[u8]>,
    step_cycles: usize,
    pub interrupt_mask: InterruptRegister,
    pub interrupt_stat: InterruptRegister,
    pub scheduler: Scheduler,
    pub dma: Dma,
    pub mdec: Mdec,
}

impl Bus {
    pub fn new() -> Self {
        Self::build(&SystemConfig::default())
    }

    pub fn with_config(config: SystemConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self::build(&config))
    }

    fn build(config: &SystemConfig) -> Self {
        let mut scheduler = Scheduler::new();

        scheduler.schedule(EventType::DmaStep, config.step_cycles);
        scheduler.schedule(EventType::MdecStep, config.step_cycles);

        Self {
            main_ram: vec![0; RAM_SIZE].into_boxed_slice(),
            step_cycles: config.step_cycles,
            interrupt_mask: InterruptRegister::empty(),
            interrupt_stat: InterruptRegister::empty(),
            scheduler,
            dma: Dma::new(),
            mdec: Mdec::with_config(&config.mdec),
        }
    }

    pub fn translate_address(address: u32) -> usize {
        match address >> 28 {
            0x8 | 0xa => (address & 0x1fffffff) as usize,
            0xf => address as usize,
            _ => (address & 0x1fffffff) as usize,
        }
    }

    pub fn ram(&self) -> &[u8] {
        &self.main_ram
    }

    pub fn ram_mut(&mut self) -> &mut [u8] {
        &mut self.main_ram
    }

    pub fn mem_read32(&mut self, address: u32) -> Result<u32, BusError> {
        if address & 0x3 != 0 {
            return Err(BusError::UnalignedAccess { address });
        }

        let physical = Self::translate_address(address);

        let value = match physical {
            0x00000000..=0x001fffff => read_ram32(&self.main_ram, physical as u32),
            0x1f801070 => self.interrupt_stat.bits(),
            0x1f801074 => self.interrupt_mask.bits(),
            0x1f801080..=0x1f8010f4 => self.dma.read_registers(physical),
            0x1f801820 | 0x1f801824 => self.mdec.read((physical - MDEC_BASE) as u32),
            _ => return Err(BusError::UnmappedAddress { address }),
        };

        Ok(value)
    }

    pub fn mem_write32(&mut self, address: u32, value: u32) -> Result<(), BusError> {
        if address & 0x3 != 0 {
            return Err(BusError::UnalignedAccess { address });
        }

        let physical = Self::translate_address(address);

        match physical {
            0x00000000..=0x001fffff => write_ram32(&mut self.main_ram, physical as u32, value),
            0x1f801070 => self.interrupt_stat.acknowledge(value),
            0x1f801074 => self.interrupt_mask = InterruptRegister::from_bits_truncate(value),
            0x1f801080..=0x1f8010f4 => self.dma.write_registers(physical, value),
            0x1f801820 | 0x1f801824 => self.mdec.write((physical - MDEC_BASE) as u32, value),
            _ => return Err(BusError::UnmappedAddress { address }),
        }

        Ok(())
    }

    /// Advances emulated time and runs whatever device steps fell due.
    pub fn tick(&mut self, cycles: usize) {
        self.scheduler.tick(cycles);

        while let Some((event, cycles_left)) = self.scheduler.get_next_event() {
            match event {
                EventType::MdecStep => self.mdec.step(),
                EventType::DmaStep => self.dma.step(&mut self.mdec, &mut self.main_ram, &mut self.interrupt_stat),
            }

            // keep the step period even when the event ran late
            let next = self.step_cycles - cycles_left % self.step_cycles;
            self.scheduler.schedule(event, next);
        }
    }

    /// True when an unmasked interrupt is waiting for the cpu.
    pub fn irq_pending(&self) -> bool {
        self.interrupt_stat.pending(self.interrupt_mask)
    }

    /// Resets the devices the way a console soft reset does.
    pub fn reset(&mut self) {
        self.dma = Dma::new();
        self.mdec.reset();
        self.interrupt_stat = InterruptRegister::empty();
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}
