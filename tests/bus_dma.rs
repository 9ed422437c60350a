use rsx_mdec::{
    bus::{registers::interrupt_register::InterruptRegister, Bus, BusError},
    config::{MdecConfig, SystemConfig, DEFAULT_FIFO_CAPACITY, DEFAULT_STEP_CYCLES},
};

const MDEC_DATA: u32 = 0xbf80_1820;
const MDEC_CONTROL: u32 = 0xbf80_1824;

const DMA0_MADR: u32 = 0x1f80_1080;
const DMA0_BCR: u32 = 0x1f80_1084;
const DMA0_CHCR: u32 = 0x1f80_1088;
const DMA1_MADR: u32 = 0x1f80_1090;
const DMA1_BCR: u32 = 0x1f80_1094;
const DMA1_CHCR: u32 = 0x1f80_1098;
const DPCR: u32 = 0x1f80_10f0;
const DICR: u32 = 0x1f80_10f4;

const INPUT: u32 = 0x1000;
const OUTPUT: u32 = 0x2000;

fn write(bus: &mut Bus, address: u32, value: u32) {
    bus.mem_write32(address, value).unwrap();
}

fn read(bus: &mut Bus, address: u32) -> u32 {
    bus.mem_read32(address).unwrap()
}

/// Enables both mdec dma requests and loads tables that turn a dc of 0x100 into a flat 0xc0 block.
fn setup(bus: &mut Bus) {
    write(bus, MDEC_CONTROL, 0x6000_0000);

    write(bus, MDEC_DATA, 0x6000_0000);
    for i in 0..32 {
        write(bus, MDEC_DATA, if i < 4 { 0x5a82_5a82 } else { 0 });
    }

    write(bus, MDEC_DATA, 0x4000_0000);
    for i in 0..16 {
        write(bus, MDEC_DATA, if i == 0 { 2 } else { 0 });
    }

    write(bus, DPCR, 1 << 3 | 1 << 7);
    write(bus, DICR, 0x3 << 16 | 1 << 23);
}

fn queue_mono_blocks(bus: &mut Bus, blocks: u32) {
    for i in 0..blocks {
        write(bus, INPUT + i * 4, 0xfe00_0500);
    }
}

#[test]
fn slice_dma_moves_mono_blocks_through_the_mdec() {
    let mut bus = Bus::new();
    setup(&mut bus);
    queue_mono_blocks(&mut bus, 4);

    // 8bit monochrome, four words of input
    write(&mut bus, MDEC_DATA, 0x2800_0004);

    // 16 words of output per block
    write(&mut bus, DMA1_MADR, OUTPUT);
    write(&mut bus, DMA1_BCR, 0x0004_0010);
    write(&mut bus, DMA1_CHCR, 0x0100_0200);

    write(&mut bus, DMA0_MADR, INPUT);
    write(&mut bus, DMA0_BCR, 0x0001_0004);
    write(&mut bus, DMA0_CHCR, 0x0100_0201);

    bus.tick(DEFAULT_STEP_CYCLES);

    assert_eq!(read(&mut bus, DMA0_CHCR) & 1 << 24, 0);
    assert_eq!(read(&mut bus, DMA0_MADR), INPUT + 16);
    assert!(bus.interrupt_stat.contains(InterruptRegister::DMA));
    assert!(bus.mdec.is_decoding());

    for _ in 0..3 {
        bus.tick(DEFAULT_STEP_CYCLES);
    }

    assert!(bus.dma.is_active(1));
    assert_eq!(bus.dma.channel(1).map(|channel| channel.num_blocks), Some(1));

    bus.tick(DEFAULT_STEP_CYCLES);

    assert!(!bus.dma.is_active(1));
    assert_eq!(read(&mut bus, DMA1_MADR), OUTPUT + 256);
    assert_eq!(read(&mut bus, DICR) >> 24, 0x83);
    assert!(!bus.mdec.command_busy());

    for i in 0..64 {
        assert_eq!(read(&mut bus, OUTPUT + i * 4), 0xc0c0_c0c0, "word {i}");
    }

    assert!(!bus.irq_pending());
    write(&mut bus, 0x1f80_1074, InterruptRegister::DMA.bits());
    assert!(bus.irq_pending());

    // acknowledge
    write(&mut bus, 0x1f80_1070, !InterruptRegister::DMA.bits());
    assert!(bus.interrupt_stat.is_empty());
    assert!(!bus.irq_pending());
}

#[test]
fn slice_dma_streams_more_than_the_fifo_holds() {
    let mut bus = Bus::new();
    setup(&mut bus);

    let blocks = DEFAULT_FIFO_CAPACITY as u32 + 96;
    let output = 0x1_0000;
    queue_mono_blocks(&mut bus, blocks);

    write(&mut bus, MDEC_DATA, 0x2800_0000 | blocks);

    write(&mut bus, DMA1_MADR, output);
    write(&mut bus, DMA1_BCR, blocks << 16 | 0x10);
    write(&mut bus, DMA1_CHCR, 0x0100_0200);

    // 40 word slices, so the fifo fills up part way through a block
    write(&mut bus, DMA0_MADR, INPUT);
    write(&mut bus, DMA0_BCR, (blocks / 40) << 16 | 40);
    write(&mut bus, DMA0_CHCR, 0x0100_0201);

    bus.tick(DEFAULT_STEP_CYCLES);

    assert_eq!(bus.mdec.status().parameter_count, 96);
    assert_eq!(bus.dma.channel(0).map(|channel| channel.words_remaining), Some(16));

    for _ in 0..2 * blocks {
        if !bus.dma.is_active(1) {
            break;
        }
        bus.tick(DEFAULT_STEP_CYCLES);
    }

    assert!(!bus.dma.is_active(0));
    assert!(!bus.dma.is_active(1));
    assert!(!bus.mdec.command_busy());
    assert_eq!(read(&mut bus, DMA0_MADR), INPUT + blocks * 4);
    assert_eq!(read(&mut bus, DMA1_MADR), output + blocks * 64);

    for i in 0..blocks * 16 {
        assert_eq!(read(&mut bus, output + i * 4), 0xc0c0_c0c0, "word {i}");
    }
}

#[test]
fn out_slice_waits_for_the_rest_of_a_block() {
    let mut bus = Bus::new();
    setup(&mut bus);

    write(&mut bus, MDEC_DATA, 0x2800_0002);
    write(&mut bus, MDEC_DATA, 0xfe00_0500);
    write(&mut bus, MDEC_DATA, 0xfe00_0500);

    // one 32 word slice, each decoded block only fills half of it
    write(&mut bus, DMA1_MADR, OUTPUT);
    write(&mut bus, DMA1_BCR, 0x0001_0020);
    write(&mut bus, DMA1_CHCR, 0x0100_0200);

    bus.tick(DEFAULT_STEP_CYCLES);
    bus.tick(DEFAULT_STEP_CYCLES);

    assert!(bus.dma.is_active(1));
    assert_eq!(bus.dma.channel(1).map(|channel| channel.words_remaining), Some(16));
    assert_eq!(read(&mut bus, DMA1_MADR), OUTPUT + 64);

    bus.tick(DEFAULT_STEP_CYCLES);

    assert!(!bus.dma.is_active(1));
    assert!(bus.mdec.output_pixels().is_empty());
    assert!(!bus.mdec.command_busy());

    for i in 0..32 {
        assert_eq!(read(&mut bus, OUTPUT + i * 4), 0xc0c0_c0c0, "word {i}");
    }
    assert_eq!(read(&mut bus, OUTPUT + 32 * 4), 0);
}

#[test]
fn burst_dma_ignores_requests() {
    let mut bus = Bus::new();
    setup(&mut bus);
    queue_mono_blocks(&mut bus, 2);

    write(&mut bus, MDEC_DATA, 0x2800_0002);

    write(&mut bus, DMA0_MADR, INPUT);
    write(&mut bus, DMA0_BCR, 0x0000_0002);
    write(&mut bus, DMA0_CHCR, 0x1100_0001);

    bus.tick(DEFAULT_STEP_CYCLES);

    assert!(!bus.dma.is_active(0));
    assert_eq!(bus.mdec.status().parameter_count, 0);
    assert_eq!(bus.mdec.output_pixels().len(), 64);
    assert_eq!(bus.mdec.input_fifo_len(), 1);
}

#[test]
fn dma_waits_for_the_mdec_request() {
    let mut bus = Bus::new();
    setup(&mut bus);

    // nothing decoded yet, so the out channel stays armed
    write(&mut bus, DMA1_MADR, OUTPUT);
    write(&mut bus, DMA1_BCR, 0x0001_0010);
    write(&mut bus, DMA1_CHCR, 0x0100_0200);

    for _ in 0..4 {
        bus.tick(DEFAULT_STEP_CYCLES);
    }

    assert!(bus.dma.is_active(1));
    assert_eq!(read(&mut bus, DMA1_MADR), OUTPUT);
    assert!(bus.interrupt_stat.is_empty());
}

#[test]
fn mdec_registers_are_mirrored() {
    let mut bus = Bus::new();

    assert_eq!(read(&mut bus, 0x1f80_1824), 0x8004_0000);
    assert_eq!(read(&mut bus, 0x9f80_1824), 0x8004_0000);
    assert_eq!(read(&mut bus, MDEC_CONTROL), 0x8004_0000);
}

#[test]
fn bad_accesses_are_reported() {
    let mut bus = Bus::new();

    let error = bus.mem_read32(0x1f80_1828).unwrap_err();
    assert_eq!(error, BusError::UnmappedAddress { address: 0x1f80_1828 });
    assert_eq!(error.to_string(), "unmapped address 0x1f801828");

    assert_eq!(
        bus.mem_write32(0x1f80_1821, 0),
        Err(BusError::UnalignedAccess { address: 0x1f80_1821 })
    );
}

#[test]
fn small_fifo_config_starts_decoding_early() {
    let config = SystemConfig {
        mdec: MdecConfig { input_fifo_capacity: 1 },
        ..SystemConfig::default()
    };
    let mut bus = Bus::with_config(config).unwrap();

    write(&mut bus, MDEC_DATA, 0x2800_0002);
    write(&mut bus, MDEC_DATA, 0xfe00_fe00);

    assert!(bus.mdec.is_decoding());
    assert_eq!(read(&mut bus, MDEC_CONTROL) >> 30 & 1, 1);

    bus.tick(DEFAULT_STEP_CYCLES);

    assert!(!bus.mdec.is_decoding());
    assert_eq!(bus.mdec.status().parameter_count, 1);
}

#[test]
fn oversized_fifo_is_rejected() {
    let config = SystemConfig {
        mdec: MdecConfig { input_fifo_capacity: 0x10001 },
        ..SystemConfig::default()
    };

    assert!(Bus::with_config(config).is_err());
}
