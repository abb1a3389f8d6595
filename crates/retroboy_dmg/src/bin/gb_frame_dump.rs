use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use retroboy_dmg::{FrameBuffer, GameBoy, SCREEN_HEIGHT, SCREEN_WIDTH};

const USAGE: &str = "Usage: gb_frame_dump <rom_path> <out_rgb24_path> [frames|--until-ldbb]";

/// Budget for `--until-ldbb`, in machine cycles.
const BREAKPOINT_BUDGET: u64 = 50_000_000;

/// DMG shades 0..=3 as grey levels.
const PALETTE: [u8; 4] = [0xFF, 0xAA, 0x55, 0x00];

fn to_rgb24(frame: &FrameBuffer) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(SCREEN_WIDTH * SCREEN_HEIGHT * 3);
    for row in frame.iter() {
        for &shade in row.iter() {
            let grey = PALETTE[(shade & 0x03) as usize];
            buffer.extend_from_slice(&[grey, grey, grey]);
        }
    }
    buffer
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let rom_path: PathBuf = args.next().map(PathBuf::from).context(USAGE)?;
    let out_path: PathBuf = args.next().map(PathBuf::from).context(USAGE)?;
    let mode = args.next().unwrap_or_else(|| "120".to_string());
    let frames: Option<u32> = if mode == "--until-ldbb" {
        None
    } else {
        Some(
            mode.parse()
                .with_context(|| format!("invalid frame count '{mode}'; expected integer or '--until-ldbb'"))?,
        )
    };

    let rom = std::fs::read(&rom_path)
        .with_context(|| format!("failed to read ROM '{}'", rom_path.display()))?;

    let mut gb = GameBoy::new();
    gb.load_rom(&rom)
        .with_context(|| format!("failed to load ROM '{}'", rom_path.display()))?;

    match frames {
        Some(frames) => gb.step_frames(frames)?,
        None => {
            if !gb.step_until_software_breakpoint(BREAKPOINT_BUDGET)? {
                bail!("did not hit LD B,B software breakpoint within {BREAKPOINT_BUDGET} machine cycles");
            }
        }
    }

    let buffer = to_rgb24(gb.frame_buffer());
    std::fs::write(&out_path, &buffer)
        .with_context(|| format!("failed to write '{}'", out_path.display()))?;

    match frames {
        Some(frames) => println!(
            "Wrote {} bytes ({}x{} rgb24) after {} frames to '{}'",
            buffer.len(),
            SCREEN_WIDTH,
            SCREEN_HEIGHT,
            frames,
            out_path.display()
        ),
        None => println!(
            "Wrote {} bytes ({}x{} rgb24) at LD B,B breakpoint to '{}'",
            buffer.len(),
            SCREEN_WIDTH,
            SCREEN_HEIGHT,
            out_path.display()
        ),
    }

    let serial = gb.serial_output();
    if !serial.is_empty() {
        println!("Serial output:\n{}", String::from_utf8_lossy(serial));
    }
    Ok(())
}
