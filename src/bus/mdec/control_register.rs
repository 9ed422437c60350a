use bitflags::bitflags;

/*
  31    Reset MDEC (0=No change, 1=Abort any command, and set status=80040000h)
  30    Enable Data-In Request  (0=Disable, 1=Enable DMA0 and Status.bit28)
  29    Enable Data-Out Request (0=Disable, 1=Enable DMA1 and Status.bit27)
  0-28  Unknown/Not used - usually zero
*/
bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct ControlRegister: u32 {
        const ENABLE_DATA_OUT = 1 << 29;
        const ENABLE_DATA_IN = 1 << 30;
        const RESET = 1 << 31;
    }
}

impl ControlRegister {
    pub fn enable_data_in(&self) -> bool {
        self.contains(ControlRegister::ENABLE_DATA_IN)
    }

    pub fn enable_data_out(&self) -> bool {
        self.contains(ControlRegister::ENABLE_DATA_OUT)
    }
}
