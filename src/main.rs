use clap::{Parser, Subcommand};
use rtty_rs::baudot::{BaudotEncoder, decode};
use rtty_rs::config::TxConfig;
use rtty_rs::control::{Session, install_ctrlc, read_operator_input};
use rtty_rs::radio::{FskModulator, LogTuner, TunerEmitter, write_wav};
use rtty_rs::scheduler::{IntervalTicker, Mode, RunOutcome, SymbolScheduler};
use rtty_rs::ui::{TransmitProgress, print_banner};
use rtty_rs::utils::logging::init_logging;
use std::path::PathBuf;
use std::thread;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(author, version, about = "Baudot RTTY transmitter", long_about = None)]
struct Cli {
    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Center frequency in Hz
    #[arg(short, long)]
    freq: Option<f64>,
    /// Mark to space shift in Hz
    #[arg(long)]
    shift: Option<u64>,
    /// Letters-shift symbols before the message
    #[arg(long)]
    preamble: Option<usize>,
    #[arg(long)]
    baud: Option<f64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Repeat a message until interrupted
    Beacon { text: String },
    /// Send a message once
    Send { text: String },
    /// Read lines from the operator and send each one
    Interactive,
    /// Print the framed symbols of a message
    Encode { text: String },
    /// Write the message as audio FSK to a WAV file
    Render {
        text: String,
        #[arg(short, long, default_value = "rtty.wav")]
        output: PathBuf,
        #[arg(short, long, default_value_t = 1)]
        repeat: usize,
    },
}

fn main() {
    init_logging();
    print_banner();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> rtty_rs::Result<TxConfig> {
    let mut config = match &cli.config {
        Some(path) => TxConfig::load(path)?,
        None => TxConfig::default(),
    };
    if let Some(freq) = cli.freq {
        config.center_freq_hz = freq.round() as u64;
    }
    if let Some(shift) = cli.shift {
        config.shift_hz = shift;
    }
    if let Some(preamble) = cli.preamble {
        config.preamble_len = preamble;
    }
    if let Some(baud) = cli.baud {
        config.baud = baud;
    }
    config.validate()?;
    Ok(config)
}

fn run(cli: Cli) -> rtty_rs::Result<()> {
    let config = load_config(&cli)?;
    let encoder = BaudotEncoder::new(config.preamble_len);

    match cli.command {
        Commands::Beacon { text } => {
            config.log_summary();
            let shutdown = install_ctrlc()?;
            let encoded = encoder.encode(text.as_bytes(), config.buffer_capacity);

            let mut emitter = TunerEmitter::new(config.plan(), LogTuner::new());
            let mut ticker = IntervalTicker::from_baud(config.baud)
                .with_shutdown(shutdown.receiver().clone());
            let mut scheduler = SymbolScheduler::new(encoded.bitstream, Mode::Looping);

            info!("Transmitting beacon, Ctrl+C to stop");
            scheduler.run(&mut ticker, &mut emitter)?;

            let stats = scheduler.stats();
            info!(
                "Beacon stopped after {} ticks ({} bits missed)",
                stats.ticks, stats.missed_ticks
            );
        }
        Commands::Send { text } => {
            config.log_summary();
            let shutdown = install_ctrlc()?;
            let encoded = encoder.encode(text.as_bytes(), config.buffer_capacity);
            let nbits = encoded.bitstream.nbits();

            let mut emitter = TunerEmitter::new(config.plan(), LogTuner::new());
            let mut ticker = IntervalTicker::from_baud(config.baud)
                .with_shutdown(shutdown.receiver().clone());
            let mut scheduler = SymbolScheduler::new(encoded.bitstream, Mode::OneShot);

            let progress = TransmitProgress::new(nbits, &text);
            let outcome = scheduler.run_with_progress(&mut ticker, &mut emitter, |pos| {
                progress.set_position(pos)
            })?;
            progress.finish(outcome);
            if outcome == RunOutcome::Interrupted {
                warn!("Message interrupted at bit {}/{}", scheduler.position(), nbits);
            }
        }
        Commands::Interactive => {
            config.log_summary();
            let shutdown = install_ctrlc()?;
            let (tx, rx) = crossbeam_channel::unbounded();

            // never joined, it may be blocked on stdin when the session ends
            thread::spawn(move || read_operator_input(tx));

            let session = Session::new(config, LogTuner::new(), shutdown);
            let control = thread::spawn(move || session.run(rx));
            match control.join() {
                Ok(report) => info!(
                    "{} messages sent, {} bits missed",
                    report.transmitted, report.missed_ticks
                ),
                Err(_) => error!("Control thread panicked"),
            }
        }
        Commands::Encode { text } => {
            let encoded = encoder.encode(text.as_bytes(), config.buffer_capacity);
            let hex: Vec<String> = encoded
                .bitstream
                .as_bytes()
                .iter()
                .map(|b| format!("{:02X}", b))
                .collect();
            println!("{}", hex.join(" "));
            info!(
                "{} symbols, {} bits, {:.2} s on air",
                encoded.bitstream.len_bytes(),
                encoded.bitstream.nbits(),
                encoded.bitstream.nbits() as f64 / config.baud
            );
            info!("Decodes as {:?}", decode(encoded.bitstream.as_bytes())?);
        }
        Commands::Render {
            text,
            output,
            repeat,
        } => {
            let encoded = encoder.encode(text.as_bytes(), config.buffer_capacity);
            let mut modulator = FskModulator::new(
                config.audio_sample_rate,
                config.baud,
                config.audio_mark_hz,
                config.audio_space_hz,
            );
            let bits = (0..repeat).flat_map(|_| encoded.bitstream.bits());
            let samples = modulator.modulate_bits(bits);
            write_wav(&output, &samples, modulator.sample_rate())?;
        }
    }

    Ok(())
}
