use anyhow::{anyhow, Context};
use clap::Parser;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use minifb::{Key, Scale, Window, WindowOptions};
use poco_nes::ppu::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use poco_nes::{apu, Bus, Buttons, Cartridge, Cpu, SampleOutput};
use std::path::PathBuf;
use std::time::Duration;

/// NES emulator (NROM)
#[derive(Parser, Debug)]
#[command(name = "poco")]
struct Args {
    /// path to an iNES ROM image
    rom: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let cart = Cartridge::from_file(&args.rom)
        .with_context(|| format!("loading {}", args.rom.display()))?;

    let mut bus = Bus::new(cart);
    let mut cpu = Cpu::new();
    bus.reset(&mut cpu);

    // keep the stream alive for the lifetime of the window
    let _stream = match init_audio(bus.audio_output()) {
        Ok(stream) => Some(stream),
        Err(e) => {
            log::warn!("audio init failed, running silent: {}", e);
            None
        }
    };

    let mut window = Window::new(
        "poco",
        DISPLAY_WIDTH,
        DISPLAY_HEIGHT,
        WindowOptions {
            scale: Scale::X2,
            ..WindowOptions::default()
        },
    )
    .context("creating window")?;
    window.limit_update_rate(Some(Duration::from_micros(16_667)));

    while window.is_open() && !window.is_key_down(Key::Escape) {
        bus.set_input0(collect_input(&window));

        bus.ppu_mut().clear_frame_ready();
        while !bus.ppu().frame_ready() {
            bus.clock(&mut cpu);
        }

        window
            .update_with_buffer(bus.ppu().frame(), DISPLAY_WIDTH, DISPLAY_HEIGHT)
            .context("presenting frame")?;
    }

    Ok(())
}

fn collect_input(window: &Window) -> Buttons {
    let mut buttons = Buttons::empty();
    let mut key = |k: Key, b: Buttons| {
        if window.is_key_down(k) {
            buttons |= b;
        }
    };

    key(Key::Z, Buttons::A);
    key(Key::X, Buttons::A);
    key(Key::A, Buttons::B);
    key(Key::S, Buttons::B);
    key(Key::RightShift, Buttons::SELECT);
    key(Key::Backspace, Buttons::SELECT);
    key(Key::Enter, Buttons::START);
    key(Key::Up, Buttons::UP);
    key(Key::Down, Buttons::DOWN);
    key(Key::Left, Buttons::LEFT);
    key(Key::Right, Buttons::RIGHT);

    buttons
}

fn init_audio(output: SampleOutput) -> anyhow::Result<cpal::Stream> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| anyhow!("no default output device"))?;

    let config = cpal::StreamConfig {
        channels: 1,
        sample_rate: cpal::SampleRate(apu::SAMPLE_RATE),
        buffer_size: cpal::BufferSize::Default,
    };

    let stream = device.build_output_stream(
        &config,
        move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
            output.fill(data);
        },
        |err| log::error!("audio stream error: {}", err),
    )?;
    stream.play()?;

    Ok(stream)
}
