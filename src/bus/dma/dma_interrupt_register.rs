use bitflags::bitflags;

/*
  0-5   Unknown  (read/write-able)
  6-14  Not used (always zero)
  15    Force IRQ (sets bit31)
  16-22 IRQ Enable setting bit24-30 upon DMA0..DMA6
  23    IRQ Enable setting bit31 when bit24-30=nonzero
  24-30 IRQ Flags for DMA0..DMA6    (Write 1 to reset)
  31    IRQ Master Flag             (Read only)
*/
bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct DmaInterruptRegister: u32 {
        const BUS_ERROR = 1 << 15;
        const MASTER_CHANNEL_INTERRUPT = 1 << 23;
    }
}

impl DmaInterruptRegister {
    pub fn interrupt_mask(&self) -> u32 {
        (self.bits() >> 16) & 0x7f
    }

    pub fn interrupt_flags(&self) -> u32 {
        (self.bits() >> 24) & 0x7f
    }

    pub fn master_interrupt_flag(&self) -> bool {
        self.contains(DmaInterruptRegister::BUS_ERROR)
            || (self.contains(Self::MASTER_CHANNEL_INTERRUPT)
                && (self.interrupt_flags() & self.interrupt_mask()) != 0)
    }

    pub fn read(&self) -> u32 {
        self.bits() | (self.master_interrupt_flag() as u32) << 31
    }

    /// Flags bits are acknowledged by writing 1 to them, the rest is replaced.
    pub fn write(&mut self, value: u32) {
        let flags = self.interrupt_flags() & !((value >> 24) & 0x7f);

        *self = DmaInterruptRegister::from_bits_retain((value & 0x00ff_803f) | flags << 24);
    }

    /// Raises the completion flag of a channel if its irq is enabled.
    pub fn raise(&mut self, channel: usize) {
        if (self.interrupt_mask() >> channel) & 1 == 1 {
            *self = DmaInterruptRegister::from_bits_retain(self.bits() | 1 << (24 + channel));
        }
    }
}
