//! Host-side dry run: drives the kaleidoscope against a recording surface and
//! logs what every tick drew. Handy for checking tile arithmetic for a given
//! viewport without a browser (`RUST_LOG=debug cargo run -- --width 1920`).

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use std::process::ExitCode;

    use clap::Parser;
    use kaleido_wasm::recording::RecordingSurface;
    use kaleido_wasm::{BrushKind, Brushes, KaleidoscopeConfig, TickDriver};

    #[derive(Parser, Debug)]
    #[command(about = "Dry-run the kaleidoscope tiler on a virtual canvas")]
    struct Args {
        /// Ticks to run.
        #[arg(long, default_value_t = 20)]
        ticks: u32,
        /// Canvas width in pixels.
        #[arg(long, default_value_t = 1280)]
        width: u32,
        /// Canvas height in pixels.
        #[arg(long, default_value_t = 720)]
        height: u32,
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = KaleidoscopeConfig::default();
    let surface = RecordingSurface::new(args.width, args.height);
    let brushes = Brushes::new(BrushKind::Normal, BrushKind::Reflected);

    let run = || -> kaleido_wasm::Result<()> {
        let mut driver = TickDriver::new(surface, &config, brushes)?;
        driver.start()?;
        for n in 1..=args.ticks {
            let report = driver.tick()?;
            log::info!(
                "tick {n}: offset={} fills={}/{} block={}x{} stamps={}",
                report.offset,
                report.normal_fills(),
                report.reflected_fills(),
                report.block.width,
                report.block.height,
                report.stamps
            );
        }
        log::info!("save stack depth after run: {}", driver.surface().depth());
        Ok(())
    };

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}
