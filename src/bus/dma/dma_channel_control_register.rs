use bitflags::bitflags;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum SyncMode {
    Burst = 0,
    Slice = 1,
    LinkedList = 2,
    Reserved = 3,
}

/*
  0     Transfer Direction    (0=To Main RAM, 1=From Main RAM)
  1     Memory Address Step   (0=Forward;+4, 1=Backward;-4)
  8     Chopping Enable       (0=Normal, 1=Chopping; run CPU during DMA gaps)
  9-10  SyncMode, Transfer Synchronisation/Mode (0-3):
          0  Start immediately and transfer all at once (used for CDROM, OTC)
          1  Sync blocks to DMA requests   (used for MDEC, SPU, and GPU-data)
          2  Linked-List mode              (used for GPU-command-lists)
          3  Reserved (not used)
  24    Start/Busy            (0=Stopped/Completed, 1=Start/Enable/Busy)
  28    Start/Trigger         (0=Normal, 1=Manual Start; use for SyncMode=0)
*/
bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct DmaChannelControlRegister: u32 {
        const TRANSFER_DIR = 1;
        const DECREMENT = 1 << 1;
        const CHOPPING = 1 << 8;
        const START_TRANSFER = 1 << 24;
        const FORCE_TRANSFER = 1 << 28;
        const PAUSE_FORCED = 1 << 29;
        const BUS_SNOOPING = 1 << 30;
    }
}

impl DmaChannelControlRegister {
    pub fn sync_mode(&self) -> SyncMode {
        match (self.bits() >> 9) & 0x3 {
            0 => SyncMode::Burst,
            1 => SyncMode::Slice,
            2 => SyncMode::LinkedList,
            _ => SyncMode::Reserved,
        }
    }

    pub fn from_ram(&self) -> bool {
        self.contains(DmaChannelControlRegister::TRANSFER_DIR)
    }

    pub fn step(&self) -> i32 {
        if self.contains(DmaChannelControlRegister::DECREMENT) {
            -4
        } else {
            4
        }
    }
}
