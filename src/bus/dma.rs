pub mod dma;
pub mod dma_channel_control_register;
pub mod dma_control_register;
pub mod dma_interrupt_register;
