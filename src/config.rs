use thiserror::Error;

// largest parameter count a decode command can announce
pub const MAX_FIFO_CAPACITY: usize = 0x10000;

pub const DEFAULT_FIFO_CAPACITY: usize = 1024;

// devices are stepped in slices of this many cpu cycles
pub const DEFAULT_STEP_CYCLES: usize = 200;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("mdec input fifo capacity must be at least one word")]
    ZeroFifoCapacity,
    #[error("mdec input fifo capacity {capacity} exceeds the maximum of {max} words")]
    FifoCapacityTooLarge { capacity: usize, max: usize },
    #[error("device step period must be at least one cycle")]
    ZeroStepCycles,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MdecConfig {
    /// Capacity of the data-in fifo, in 32 bit words.
    pub input_fifo_capacity: usize,
}

impl Default for MdecConfig {
    fn default() -> Self {
        Self {
            input_fifo_capacity: DEFAULT_FIFO_CAPACITY,
        }
    }
}

impl MdecConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.input_fifo_capacity {
            0 => Err(ConfigError::ZeroFifoCapacity),
            capacity if capacity > MAX_FIFO_CAPACITY => Err(ConfigError::FifoCapacityTooLarge {
                capacity,
                max: MAX_FIFO_CAPACITY,
            }),
            _ => Ok(()),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SystemConfig {
    pub mdec: MdecConfig,
    /// Period, in cpu cycles, of the mdec and dma steps.
    pub step_cycles: usize,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            mdec: MdecConfig::default(),
            step_cycles: DEFAULT_STEP_CYCLES,
        }
    }
}

impl SystemConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.step_cycles == 0 {
            return Err(ConfigError::ZeroStepCycles);
        }

        self.mdec.validate()
    }
}
