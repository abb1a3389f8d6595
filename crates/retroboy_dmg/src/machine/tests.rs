use std::sync::Arc;

use once_cell::sync::OnceCell;

use super::cartridge::{Cartridge, MapperKind};
use super::timer::Timer;
use super::{Button, GameBoy, MachineConfig, Mode, MCYCLES_PER_FRAME};
use crate::error::GbError;
use crate::log_sink::{LogLevel, MemorySink, NullSink, SharedSink};
use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// `JR -2`: spin in place.
const SPIN: [u8; 2] = [0x18, 0xFE];

fn config(sink: SharedSink) -> MachineConfig {
    MachineConfig::builder().sink(sink).build()
}

/// 32 KiB ROM-only image with `program` at the entry point.
fn rom_with_program(program: &[u8]) -> Vec<u8> {
    let mut rom = vec![0u8; 0x8000];
    rom[0x0134..0x0138].copy_from_slice(b"TEST");
    rom[0x0100..0x0100 + program.len()].copy_from_slice(program);
    rom
}

fn machine(program: &[u8]) -> GameBoy {
    let mut gb = GameBoy::with_config(config(Arc::new(NullSink)));
    gb.load_rom(&rom_with_program(program))
        .expect("test ROM should load");
    gb
}

fn machine_with_log(program: &[u8]) -> (GameBoy, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let mut gb = GameBoy::with_config(config(sink.clone()));
    gb.load_rom(&rom_with_program(program))
        .expect("test ROM should load");
    (gb, sink)
}

fn dma_pattern(i: u16) -> u8 {
    (i as u8).wrapping_mul(3) ^ 0x5A
}

/// LCD off, WRAM page 0xC0 filled and a transfer from it requested.
fn machine_with_dma_from_wram() -> GameBoy {
    let mut gb = machine(&SPIN);
    gb.bus.write(0xFF40, 0x00);
    for i in 0..0xA0u16 {
        gb.bus.write(0xC000 + i, dma_pattern(i));
    }
    gb.bus.write(0xFF46, 0xC0);
    gb
}

#[test]
fn power_on_state_matches_dmg_boot_handoff() {
    let gb = machine(&SPIN);
    let regs = gb.registers();
    assert_eq!(regs.pc, 0x0100);
    assert_eq!(regs.sp, 0xFFFE);
    assert_eq!(regs.af(), 0x01B0);
    assert_eq!(regs.hl(), 0x014D);

    assert_eq!(gb.peek(0xFF04), 0xAB);
    assert_eq!(gb.peek(0xFF0F), 0xE1);
    assert_eq!(gb.peek(0xFF40), 0x91);
    assert_eq!(gb.peek(0xFF41), 0x85);
    assert_eq!(gb.peek(0xFF46), 0xFF);
    assert_eq!(gb.peek(0xFF47), 0xFC);
    assert_eq!(gb.peek(0xFF48), 0xFF);
    assert_eq!(gb.peek(0xFF49), 0xFF);
    assert_eq!(gb.peek(0xFF02), 0x7E);
    assert_eq!(gb.peek(0xFFFF), 0x00);
    assert_eq!(gb.cartridge_header().map(|h| h.title.as_str()), Some("TEST"));
}

#[test]
fn dma_copies_a_page_into_oam_after_two_cycle_delay() {
    let mut gb = machine_with_dma_from_wram();

    gb.bus.step_dma();
    assert!(!gb.bus.dma.is_active());
    gb.bus.step_dma();
    assert!(gb.bus.dma.is_active());
    assert_eq!(gb.bus.ppu.oam_direct(0), 0);

    for i in 0..0xA0u16 {
        assert!(gb.bus.dma.is_active(), "transfer ended early at {i}");
        gb.bus.step_dma();
        assert_eq!(gb.bus.ppu.oam_direct(i as u8), dma_pattern(i));
        if i < 0x9F {
            assert_eq!(gb.bus.ppu.oam_direct(i as u8 + 1), 0);
        }
    }
    assert!(!gb.bus.dma.is_active());
    assert_eq!(gb.peek(0xFF46), 0xC0);
}

#[test]
fn dma_redirects_cpu_reads_and_drops_conflicting_writes() {
    let mut gb = machine_with_dma_from_wram();
    for _ in 0..3 {
        gb.bus.step_dma();
    }

    // Only work RAM, HRAM and FF46 stay visible.
    assert_eq!(gb.bus.read(0x0150), dma_pattern(0));
    assert_eq!(gb.bus.read(0xFF40), dma_pattern(0));
    assert_eq!(gb.bus.read(0xFE00), dma_pattern(0));
    assert_eq!(gb.bus.read(0xC001), dma_pattern(1));
    assert_eq!(gb.bus.read(0xFF46), 0xC0);

    // Same bus as the source and OAM are lost; VRAM and HRAM go through.
    gb.bus.write(0xC100, 0x11);
    gb.bus.write(0xFE10, 0x33);
    gb.bus.write(0x8000, 0x22);
    gb.bus.write(0xFF80, 0x44);
    assert_eq!(gb.bus.read(0xFF80), 0x44);

    while gb.bus.dma.is_active() {
        gb.bus.step_dma();
    }
    assert_eq!(gb.peek(0xC100), 0x00);
    assert_eq!(gb.peek(0x8000), 0x22);
    assert_eq!(gb.bus.ppu.oam_direct(0x10), dma_pattern(0x10));
    assert_eq!(gb.bus.read(0x0150), 0x00);
}

#[test]
fn dma_source_in_echo_range_reads_work_ram() {
    let mut gb = machine(&SPIN);
    gb.bus.write(0xFF40, 0x00);
    for i in 0..0xA0u16 {
        gb.bus.write(0xC000 + i, dma_pattern(i));
    }
    gb.bus.write(0xFF46, 0xE0);
    for _ in 0..162 {
        gb.bus.step_dma();
    }
    assert!(!gb.bus.dma.is_active());
    for i in 0..0xA0u16 {
        assert_eq!(gb.bus.ppu.oam_direct(i as u8), dma_pattern(i));
    }
}

#[test]
fn dma_from_vram_stalls_while_ppu_draws() {
    let mut gb = machine(&SPIN);
    gb.bus.write(0xFF40, 0x00);
    for i in 0..0xA0u16 {
        gb.bus.write(0x8000 + i, dma_pattern(i));
    }
    gb.bus.write(0xFF40, 0x91);
    gb.bus.write(0xFF46, 0x80);

    let mut cycles = 0u32;
    loop {
        gb.bus.step_dma();
        for _ in 0..4 {
            gb.bus.step_ppu_dot();
        }
        cycles += 1;
        if cycles > 2 && !gb.bus.dma.is_active() {
            break;
        }
        assert!(cycles < 2_000, "VRAM-sourced DMA never finished");
    }

    // At least one full mode 3 worth of cycles was spent waiting.
    assert!(cycles > 162 + 40, "no stall observed ({cycles} cycles)");
    for i in 0..0xA0u16 {
        assert_eq!(gb.bus.ppu.oam_direct(i as u8), dma_pattern(i));
    }
}

#[test]
fn blank_frame_after_lcd_restart() {
    let mut gb = machine(&SPIN);
    gb.bus.write(0xFF40, 0x00);
    gb.bus.write(0xFF47, 0xE4);
    gb.bus.write(0xFF40, 0x91);
    gb.step_frame().expect("frame");

    assert!(gb.frame_buffer().iter().flatten().all(|&shade| shade == 0));
}

#[test]
fn sprites_render_with_palettes_and_priority() {
    let mut gb = machine(&SPIN);
    gb.bus.write(0xFF40, 0x00);
    // Tile 1 is solid colour 3.
    for i in 0..16 {
        gb.bus.write(0x8010 + i, 0xFF);
    }
    let sprites: [[u8; 4]; 3] = [
        [16, 8, 1, 0x00],
        // OBP1.
        [16, 40, 1, 0x10],
        // Behind BG colours 1-3, but the background here is colour 0.
        [16, 80, 1, 0x80],
    ];
    for (n, sprite) in sprites.iter().enumerate() {
        for (i, byte) in sprite.iter().enumerate() {
            gb.bus.write(0xFE00 + (n * 4 + i) as u16, *byte);
        }
    }
    gb.bus.write(0xFF49, 0x40);
    gb.bus.write(0xFF40, 0x93);
    gb.step_frame().expect("frame");

    let frame = gb.frame_buffer();
    for row in frame.iter().take(8) {
        assert_eq!(&row[0..8], &[3; 8]);
        assert_eq!(row[8], 0);
        assert_eq!(&row[32..40], &[1; 8]);
        assert_eq!(&row[72..80], &[3; 8]);
    }
    assert!(frame[8].iter().all(|&shade| shade == 0));
}

#[test]
fn identical_runs_are_deterministic() {
    // LD HL,0xC000; loop: INC A; LD (HL+),A; JR loop
    let program = [0x21, 0x00, 0xC0, 0x3C, 0x22, 0x18, 0xFC];
    let run = || {
        let mut gb = machine(&program);
        gb.step_frames(2).expect("frames");
        gb
    };
    let first = run();
    let second = run();

    assert_eq!(first.cpu(), second.cpu());
    assert_eq!(first.frame_buffer(), second.frame_buffer());
    assert_eq!(first.scanline(), second.scanline());
    for addr in 0xC000..0xC100 {
        assert_eq!(first.peek(addr), second.peek(addr));
    }
    assert_ne!(first.peek(0xC000), 0);
}

#[test]
fn serial_bytes_are_captured_and_complete_with_interrupt() {
    let program = [
        0x3E, b'O', // LD A,'O'
        0xE0, 0x01, // LDH (SB),A
        0x3E, 0x81, // LD A,0x81
        0xE0, 0x02, // LDH (SC),A
        0x3E, b'K', //
        0xE0, 0x01, //
        0x3E, 0x81, //
        0xE0, 0x02, //
        0x18, 0xFE,
    ];
    let mut gb = machine(&program);
    gb.step_frame().expect("frame");

    assert_eq!(gb.serial_output(), b"OK");
    assert_ne!(gb.peek(0xFF0F) & 0x08, 0);
    assert_eq!(gb.peek(0xFF02), 0x7F);
    assert_eq!(gb.peek(0xFF01), 0xFF);
}

#[test]
fn taking_serial_output_drains_the_capture() {
    let mut gb = machine(&[0x3E, b'A', 0xE0, 0x01, 0x3E, 0x81, 0xE0, 0x02, 0x18, 0xFE]);
    gb.step_frame().expect("frame");

    assert_eq!(gb.take_serial_output(), b"A".to_vec());
    assert!(gb.serial_output().is_empty());
    assert!(gb.take_serial_output().is_empty());

    gb.bus.write(0xFF01, b'B');
    gb.bus.write(0xFF02, 0x81);
    assert_eq!(gb.serial_output(), b"B");
}

#[test]
fn serial_capture_can_be_disabled() {
    let config = MachineConfig::builder()
        .sink(Arc::new(NullSink))
        .capture_serial(false)
        .build();
    let mut gb = GameBoy::with_config(config);
    gb.load_rom(&rom_with_program(&[0x3E, 0x81, 0xE0, 0x02, 0x18, 0xFE]))
        .expect("load");
    gb.step_frame().expect("frame");
    assert!(gb.serial_output().is_empty());
}

#[test]
fn timer_div_starts_at_ab_and_tima_counts_falling_edges() {
    let mut timer = Timer::new();
    assert_eq!(timer.read(0xFF04), 0xAB);

    timer.write(0xFF04, 0x00);
    assert_eq!(timer.read(0xFF04), 0x00);
    timer.write(0xFF07, 0x05);
    assert_eq!(timer.read(0xFF07), 0xFD);

    for _ in 0..3 {
        assert!(!timer.step());
    }
    assert_eq!(timer.read(0xFF05), 0x00);
    assert!(!timer.step());
    assert_eq!(timer.read(0xFF05), 0x01);
}

#[test]
fn timer_overflow_reloads_one_cycle_late() {
    let mut timer = Timer::new();
    timer.write(0xFF04, 0x00);
    timer.write(0xFF07, 0x05);
    timer.write(0xFF06, 0x42);
    timer.write(0xFF05, 0xFF);

    for _ in 0..4 {
        assert!(!timer.step());
    }
    assert_eq!(timer.read(0xFF05), 0x00);

    assert!(timer.step());
    assert_eq!(timer.read(0xFF05), 0x42);

    // On the reload cycle a TIMA write is lost and a TMA write lands in
    // TIMA as well.
    timer.write(0xFF05, 0x99);
    assert_eq!(timer.read(0xFF05), 0x42);
    timer.write(0xFF06, 0x77);
    assert_eq!(timer.read(0xFF05), 0x77);
}

#[test]
fn timer_tima_write_during_overflow_cancels_reload() {
    let mut timer = Timer::new();
    timer.write(0xFF04, 0x00);
    timer.write(0xFF07, 0x05);
    timer.write(0xFF06, 0x42);
    timer.write(0xFF05, 0xFF);
    for _ in 0..4 {
        timer.step();
    }

    timer.write(0xFF05, 0x10);
    assert!(!timer.step());
    assert_eq!(timer.read(0xFF05), 0x10);
}

#[test]
fn timer_div_reset_with_selected_bit_high_ticks_tima() {
    let mut timer = Timer::new();
    timer.write(0xFF04, 0x00);
    timer.write(0xFF07, 0x05);
    timer.step();
    timer.step();
    // Counter is 2: bit 1 is high.
    timer.write(0xFF04, 0x00);
    assert_eq!(timer.read(0xFF05), 0x01);

    timer.step();
    timer.step();
    // Disabling with the input high is a falling edge too.
    timer.write(0xFF07, 0x01);
    assert_eq!(timer.read(0xFF05), 0x02);
}

#[test]
fn timer_interrupt_reaches_if() {
    // LD A,0x05; LDH (TAC),A; spin
    let mut gb = machine(&[0x3E, 0x05, 0xE0, 0x07, 0x18, 0xFE]);
    for _ in 0..2_000 {
        gb.step().expect("step");
    }
    assert_ne!(gb.peek(0xFF0F) & 0x04, 0);
}

#[test]
fn halt_wakes_into_vblank_handler() {
    let mut rom = rom_with_program(&[
        0x3E, 0x00, // LD A,0
        0xE0, 0x0F, // LDH (IF),A
        0x3E, 0x01, // LD A,1
        0xE0, 0xFF, // LDH (IE),A
        0xFB, // EI
        0x76, // HALT
        0x18, 0xFE,
    ]);
    // LD B,0x42; RETI
    rom[0x0040..0x0043].copy_from_slice(&[0x06, 0x42, 0xD9]);
    let mut gb = GameBoy::with_config(config(Arc::new(NullSink)));
    gb.load_rom(&rom).expect("load");

    // The frame-ready cycle is also the one that wakes the core.
    gb.step_frame().expect("frame");
    assert!(!gb.cpu().halted);
    for _ in 0..20 {
        gb.step().expect("step");
    }
    assert_eq!(gb.registers().b, 0x42);
    assert!((0x010A..=0x010C).contains(&gb.registers().pc));
    assert_eq!(gb.peek(0xFF0F) & 0x01, 0);
}

fn mbc1_rom(cartridge_type: u8) -> Vec<u8> {
    let mut rom = vec![0u8; 0x10000];
    rom[0x0147] = cartridge_type;
    rom[0x0148] = 0x01;
    rom[0x0149] = 0x02;
    for bank in 0..4 {
        rom[bank * 0x4000 + 0x10] = bank as u8;
    }
    rom
}

#[test]
fn mbc1_switches_rom_banks_and_gates_ram() {
    let sink: SharedSink = Arc::new(NullSink);
    let mut cart = Cartridge::load(&mbc1_rom(0x03), &sink).expect("load");
    let header = cart.header().expect("header");
    assert_eq!(header.mapper(), Some(MapperKind::Mbc1));
    assert_eq!(header.ram_size(), 0x2000);

    assert_eq!(cart.rom_read(0x0010), 0);
    assert_eq!(cart.rom_read(0x4010), 1);
    cart.rom_write(0x2000, 3);
    assert_eq!(cart.rom_read(0x4010), 3);
    cart.rom_write(0x2000, 0);
    assert_eq!(cart.rom_read(0x4010), 1);
    // Bank 5 wraps onto bank 1 of a four-bank ROM.
    cart.rom_write(0x2000, 5);
    assert_eq!(cart.rom_read(0x4010), 1);

    assert_eq!(cart.ram_read(0xA000), 0xFF);
    cart.ram_write(0xA000, 0x42);
    cart.rom_write(0x0000, 0x0A);
    assert_eq!(cart.ram_read(0xA000), 0xFF);
    cart.ram_write(0xA000, 0x42);
    assert_eq!(cart.ram_read(0xA000), 0x42);
    cart.rom_write(0x0000, 0x00);
    assert_eq!(cart.ram_read(0xA000), 0xFF);
}

#[test]
fn unsupported_mapper_falls_back_to_rom_only_with_warning() {
    let sink = Arc::new(MemorySink::new());
    let mut gb = GameBoy::with_config(config(sink.clone()));
    gb.load_rom(&mbc1_rom(0x19)).expect("load");

    assert_eq!(gb.cartridge_header().and_then(|h| h.mapper()), None);
    assert!(sink
        .records()
        .iter()
        .any(|r| r.level == LogLevel::Warn && r.message.contains("cartridge type 0x19")));
    assert_eq!(gb.peek(0x4010), 1);
}

#[test]
fn short_rom_is_rejected() {
    let mut gb = GameBoy::with_config(config(Arc::new(NullSink)));
    assert_eq!(
        gb.load_rom(&[0u8; 0x100]),
        Err(GbError::RomTooSmall { len: 0x100 })
    );
    assert!(gb.cartridge_header().is_none());
    assert_eq!(gb.peek(0x0100), 0xFF);
}

#[test]
fn unmapped_accesses_read_ff_and_are_logged() {
    let (mut gb, sink) = machine_with_log(&SPIN);
    assert_eq!(gb.bus.read(0xFF03), 0xFF);
    gb.bus.write(0xFF03, 0x12);

    assert!(sink.contains("unmapped read 0xFF03"));
    assert!(sink.contains("unmapped write 0xFF03 <- 0x12"));
}

#[test]
fn unimplemented_opcode_is_fatal_and_logged_once() {
    let (mut gb, sink) = machine_with_log(&[0xD3]);
    let expected = GbError::UnimplementedOpcode {
        opcode: 0xD3,
        pc: 0x0100,
    };

    assert_eq!(gb.step(), Err(expected.clone()));
    assert_eq!(gb.step(), Err(expected.clone()));
    assert_eq!(gb.step_frame(), Err(expected));

    let errors = sink
        .records()
        .into_iter()
        .filter(|r| r.level == LogLevel::Error)
        .collect::<Vec<_>>();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("unimplemented opcode 0xD3"));
}

#[test]
fn button_press_requests_joypad_interrupt() {
    let mut gb = machine(&SPIN);
    gb.bus.write(0xFF0F, 0x00);

    gb.set_button(Button::Start, false);
    assert_eq!(gb.peek(0xFF0F) & 0x10, 0);

    gb.set_button(Button::A, true);
    assert_ne!(gb.peek(0xFF0F) & 0x10, 0);

    // Select the action buttons: A reads low.
    gb.bus.write(0xFF00, 0x10);
    assert_eq!(gb.peek(0xFF00), 0xDE);
    // The d-pad group is unaffected.
    gb.bus.write(0xFF00, 0x20);
    assert_eq!(gb.peek(0xFF00), 0xEF);

    gb.bus.write(0xFF0F, 0x00);
    gb.set_button(Button::A, true);
    assert_eq!(gb.peek(0xFF0F) & 0x10, 0, "held button must not re-trigger");
}

#[test]
fn software_breakpoint_stops_after_ld_b_b() {
    let mut gb = machine(&[0x00, 0x00, 0x40, 0x18, 0xFE]);
    assert_eq!(gb.step_until_software_breakpoint(1_000), Ok(true));
    assert_eq!(gb.registers().pc, 0x0103);

    let mut spinning = machine(&SPIN);
    assert_eq!(spinning.step_until_software_breakpoint(1_000), Ok(false));
}

#[test]
fn step_frame_with_lcd_off_runs_one_frame_of_cycles() {
    let mut gb = machine(&SPIN);
    gb.bus.write(0xFF40, 0x00);
    gb.step_frame().expect("frame");
    assert_eq!(gb.cpu().cycles(), u64::from(MCYCLES_PER_FRAME));
    assert_eq!(gb.scanline(), 0);
}

#[test]
fn cpu_sees_vram_and_oam_locks_through_the_bus() {
    let mut gb = machine(&SPIN);
    gb.bus.write(0xFF40, 0x00);
    gb.bus.write(0x8000, 0x12);
    gb.bus.write(0xFE00, 0x34);
    assert_eq!(gb.bus.read(0xFEA0), 0x00);
    gb.bus.write(0xFF40, 0x91);

    gb.step().expect("step");
    assert_eq!(gb.ppu_mode(), Mode::OamScan);
    assert_eq!(gb.bus.read(0xFE00), 0xFF);
    assert_eq!(gb.bus.read(0xFEA0), 0xFF);
    assert_eq!(gb.bus.read(0x8000), 0x12);

    while gb.ppu_mode() != Mode::Drawing {
        gb.step().expect("step");
    }
    assert_eq!(gb.bus.read(0x8000), 0xFF);
    gb.bus.write(0x8000, 0x99);

    while gb.ppu_mode() != Mode::HBlank {
        gb.step().expect("step");
    }
    assert_eq!(gb.bus.read(0x8000), 0x12);
    assert_eq!(gb.bus.read(0xFE00), 0x34);
}

#[test]
fn audio_registers_read_back_masked_and_power_off_clears_them() {
    let mut gb = machine(&SPIN);
    assert_eq!(gb.peek(0xFF26), 0xF1);
    assert_eq!(gb.peek(0xFF11), 0xBF);
    assert_eq!(gb.peek(0xFF15), 0xFF);

    gb.bus.write(0xFF26, 0x00);
    assert_eq!(gb.peek(0xFF26), 0x70);
    assert_eq!(gb.peek(0xFF11), 0x3F);
    gb.bus.write(0xFF11, 0xC0);
    assert_eq!(gb.peek(0xFF11), 0x3F);
    // Wave RAM stays writable.
    gb.bus.write(0xFF30, 0x12);
    assert_eq!(gb.peek(0xFF30), 0x12);

    gb.bus.write(0xFF26, 0x80);
    assert_eq!(gb.peek(0xFF26), 0xF0);
    gb.bus.write(0xFF11, 0x80);
    assert_eq!(gb.peek(0xFF11), 0xBF);
}

// ROM-driven checks. The test ROMs are not redistributed with the crate;
// drop them under `assets/roms/gb_tests/` to run these.

static CPU_INSTRS_ROM: OnceCell<Vec<u8>> = OnceCell::new();

fn load_test_rom(relative: &str) -> Vec<u8> {
    use std::path::PathBuf;

    let candidates = [
        PathBuf::from("assets/roms/gb_tests").join(relative),
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../assets/roms/gb_tests")
            .join(relative),
    ];
    for path in &candidates {
        if let Ok(data) = std::fs::read(path) {
            return data;
        }
    }
    panic!("{relative} not found. Tried: {candidates:?}");
}

fn load_cpu_instrs_rom() -> &'static [u8] {
    CPU_INSTRS_ROM.get_or_init(|| load_test_rom("blargg/cpu_instrs.gb"))
}

fn run_serial_rom(rom: &[u8], max_frames: u32, pass: &str) {
    let mut gb = GameBoy::with_config(config(Arc::new(NullSink)));
    gb.load_rom(rom).expect("load");
    for _ in 0..max_frames {
        gb.step_frame().expect("frame");
        let output = String::from_utf8_lossy(gb.serial_output());
        if output.contains(pass) {
            return;
        }
        assert!(!output.contains("Failed"), "serial output:\n{output}");
    }
    panic!(
        "no '{pass}' after {max_frames} frames; serial output:\n{}",
        String::from_utf8_lossy(gb.serial_output())
    );
}

#[test]
#[ignore]
fn blargg_cpu_instrs_passes() {
    run_serial_rom(load_cpu_instrs_rom(), 4_000, "Passed all tests");
}

#[test]
#[ignore]
fn blargg_instr_timing_passes() {
    run_serial_rom(&load_test_rom("blargg/instr_timing.gb"), 600, "Passed");
}

/// Mooneye acceptance ROMs signal success by loading the Fibonacci
/// sequence into B, C, D, E, H, L before `LD B,B`.
fn run_mooneye(relative: &str) {
    let mut gb = GameBoy::with_config(config(Arc::new(NullSink)));
    gb.load_rom(&load_test_rom(relative)).expect("load");
    let hit = gb
        .step_until_software_breakpoint(u64::from(MCYCLES_PER_FRAME) * 600)
        .expect("run");
    assert!(hit, "{relative}: no breakpoint reached");

    let r = gb.registers();
    assert_eq!(
        [r.b, r.c, r.d, r.e, r.h, r.l],
        [3, 5, 8, 13, 21, 34],
        "{relative} failed"
    );
}

#[test]
#[ignore]
fn mooneye_oam_dma_acceptance() {
    for rom in [
        "mooneye/acceptance/oam_dma/basic.gb",
        "mooneye/acceptance/oam_dma/reg_read.gb",
        "mooneye/acceptance/oam_dma_start.gb",
        "mooneye/acceptance/oam_dma_restart.gb",
        "mooneye/acceptance/oam_dma_timing.gb",
    ] {
        run_mooneye(rom);
    }
}

#[test]
#[ignore]
fn mooneye_timer_acceptance() {
    for rom in [
        "mooneye/acceptance/timer/div_write.gb",
        "mooneye/acceptance/timer/tim00.gb",
        "mooneye/acceptance/timer/tim01.gb",
        "mooneye/acceptance/timer/tima_reload.gb",
        "mooneye/acceptance/timer/tima_write_reloading.gb",
        "mooneye/acceptance/timer/tma_write_reloading.gb",
    ] {
        run_mooneye(rom);
    }
}

#[test]
#[ignore]
fn mooneye_interrupt_acceptance() {
    for rom in [
        "mooneye/acceptance/ei_sequence.gb",
        "mooneye/acceptance/halt_ime0_ei.gb",
        "mooneye/acceptance/halt_ime1_timing.gb",
        "mooneye/acceptance/if_ie_registers.gb",
        "mooneye/acceptance/intr_timing.gb",
        "mooneye/acceptance/rapid_di_ei.gb",
    ] {
        run_mooneye(rom);
    }
}

/// Decode a PNG into one shade per pixel, mapping grey levels onto the
/// four DMG shades (0xFF, 0xAA, 0x55, 0x00).
fn decode_png_shades(data: &[u8]) -> (u32, u32, Vec<u8>) {
    let mut decoder = png::Decoder::new(std::io::Cursor::new(data));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info().expect("png header");
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).expect("png frame");
    let bytes = &buf[..info.buffer_size()];

    let stride = match info.color_type {
        png::ColorType::Rgb => 3,
        png::ColorType::Rgba => 4,
        png::ColorType::Grayscale => 1,
        png::ColorType::GrayscaleAlpha => 2,
        other => panic!("unsupported PNG colour type {other:?}"),
    };
    let shades = bytes
        .chunks_exact(stride)
        .map(|px| ((255 - u16::from(px[0]) + 42) / 85) as u8)
        .collect();
    (info.width, info.height, shades)
}

#[test]
#[ignore]
fn dmg_acid2_matches_reference_image() {
    let rom = load_test_rom("dmg-acid2/dmg-acid2.gb");
    let reference = load_test_rom("dmg-acid2/reference-dmg.png");

    let mut gb = GameBoy::with_config(config(Arc::new(NullSink)));
    gb.load_rom(&rom).expect("load");
    let hit = gb
        .step_until_software_breakpoint(u64::from(MCYCLES_PER_FRAME) * 60)
        .expect("run");
    assert!(hit, "dmg-acid2 never reached its breakpoint");
    // The breakpoint fires mid-frame; finish it so the picture is complete.
    gb.step_frame().expect("frame");

    let (w, h, expected) = decode_png_shades(&reference);
    assert_eq!((w as usize, h as usize), (SCREEN_WIDTH, SCREEN_HEIGHT));

    let actual = gb.frame_buffer().iter().flatten().copied().collect::<Vec<_>>();
    let mismatches = actual
        .iter()
        .zip(&expected)
        .enumerate()
        .filter(|(_, (a, e))| a != e)
        .map(|(i, _)| (i % SCREEN_WIDTH, i / SCREEN_WIDTH))
        .collect::<Vec<_>>();
    assert!(
        mismatches.is_empty(),
        "dmg-acid2: {} pixels differ, first at {:?}",
        mismatches.len(),
        mismatches.first()
    );
}
