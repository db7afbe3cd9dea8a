//! rpt-spectra: amplitude spectrum of one response column of an Abaqus
//! report (or delimited text file)

use anyhow::{Context, bail};
use clap::Parser;
use log::{LevelFilter, info, warn};
use rpt_spectra::filters::{LowpassConfig, WindowType};
use rpt_spectra::plot::{
    FigureStyle, ImageFormat, Line, PanelStyle, export_columns, plot_multiple,
};
use rpt_spectra::spectrum::SmoothingConfig;
use rpt_spectra::table::{Delimiter, Table, TableOptions, read_delimited};
use rpt_spectra::Signal;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "rpt-spectra",
    version,
    about = "One-sided amplitude spectra of response histories"
)]
struct Args {
    /// Abaqus .rpt report, or a delimited text file with --csv
    input: PathBuf,

    /// Response column (default: second column)
    #[arg(long)]
    column: Option<String>,

    /// Time column (default: first column)
    #[arg(long)]
    time_column: Option<String>,

    /// Read delimited text with headers on the first line
    #[arg(long)]
    csv: bool,

    /// Field delimiter for --csv
    #[arg(long, default_value_t = ',')]
    delimiter: char,

    /// Low-pass cutoff in Hz; no filtering when omitted
    #[arg(long)]
    cutoff: Option<f64>,

    /// Sampling frequency for the low-pass design (default: from the time step)
    #[arg(long)]
    fs: Option<f64>,

    /// Butterworth order
    #[arg(long, default_value_t = 4)]
    order: usize,

    /// Smoothing bandwidth in Hz; no smoothing when omitted
    #[arg(long)]
    bandwidth: Option<f64>,

    /// Smoothing window: hann, hamming, blackman or rectangular
    #[arg(long, default_value = "hann")]
    window: String,

    /// Output stem (default: input path without extension)
    #[arg(long)]
    out: Option<PathBuf>,

    /// Also save a time-history and spectrum figure
    #[arg(long)]
    plot: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logger(verbose: bool) -> anyhow::Result<()> {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto)
        .context("Failed to initialize logger")
}

fn table_options(args: &Args) -> anyhow::Result<TableOptions> {
    if !args.csv {
        return Ok(TableOptions::rpt());
    }
    if !args.delimiter.is_ascii() {
        bail!("Delimiter must be a single ASCII character, got {:?}", args.delimiter);
    }
    Ok(TableOptions {
        delimiter: Delimiter::Char(args.delimiter as u8),
        ..TableOptions::csv()
    })
}

fn select_column(
    table: &Table,
    name: Option<&str>,
    fallback: usize,
) -> anyhow::Result<(String, Vec<f64>)> {
    let position = match name {
        Some(name) => table.position(name)?,
        None => fallback,
    };
    let header = table
        .headers()
        .get(position)
        .cloned()
        .with_context(|| format!("Table has no column {}", position))?;
    let values = table
        .column_at(position)
        .with_context(|| format!("Failed to read column {:?}", header))?;
    Ok((header, values))
}

fn with_suffix(stem: &Path, suffix: &str) -> PathBuf {
    let mut path = stem.as_os_str().to_owned();
    path.push(suffix);
    PathBuf::from(path)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logger(args.verbose)?;

    let options = table_options(&args)?;
    let table = read_delimited(&args.input, &options)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    let (time_name, time) = select_column(&table, args.time_column.as_deref(), 0)?;
    let (response_name, response) = select_column(&table, args.column.as_deref(), 1)?;
    info!("analysing {:?} against {:?}", response_name, time_name);

    let raw = Signal::new(time, response).context("Invalid response history")?;
    let signal = match args.cutoff {
        Some(cutoff) => {
            let lowpass = LowpassConfig {
                cutoff,
                sampling_frequency: args.fs.unwrap_or_else(|| raw.sampling_frequency()),
                order: args.order,
            };
            let filtered = lowpass.apply(raw.samples()).context("Low-pass filtering failed")?;
            raw.with_samples(filtered)?
        }
        None => {
            if args.fs.is_some() {
                warn!("--fs only applies together with --cutoff");
            }
            raw.clone()
        }
    };

    let spectrum = signal.spectrum().context("Spectrum estimation failed")?;
    if let Some((frequency, amplitude)) = spectrum.peak() {
        info!("peak amplitude {:.6} at {:.4} Hz", amplitude, frequency);
    }

    let smoothed = match args.bandwidth {
        Some(bandwidth) => {
            let window_type = WindowType::from_name(&args.window)
                .with_context(|| format!("Unknown window type {:?}", args.window))?;
            let smoothing = SmoothingConfig { bandwidth, window_type };
            Some(
                smoothing
                    .apply(&spectrum.frequency, &spectrum.amplitude)
                    .context("Spectral smoothing failed")?,
            )
        }
        None => None,
    };

    let stem = args.out.clone().unwrap_or_else(|| args.input.with_extension(""));

    let mut columns = spectrum.columns();
    if let Some(smoothed) = &smoothed {
        columns.push(("smoothed", smoothed.clone()));
    }
    let named: Vec<(&str, &[f64])> = columns
        .iter()
        .map(|(name, values)| (*name, values.as_slice()))
        .collect();
    let csv_path = with_suffix(&stem, "_spectrum.csv");
    export_columns(&named, &csv_path)
        .with_context(|| format!("Failed to write {}", csv_path.display()))?;

    if args.plot {
        let mut history = vec![Line::new(
            raw.time().to_vec(),
            raw.samples().to_vec(),
            "Time",
            response_name.as_str(),
        )?];
        if args.cutoff.is_some() {
            history.push(Line::new(
                signal.time().to_vec(),
                signal.samples().to_vec(),
                "Time",
                format!("{} (low-pass)", response_name),
            )?);
        }

        let mut amplitude = vec![Line::new(
            spectrum.frequency.clone(),
            spectrum.amplitude.clone(),
            "Frequency",
            "Amplitude",
        )?];
        if let Some(smoothed) = smoothed {
            amplitude.push(Line::new(
                spectrum.frequency.clone(),
                smoothed,
                "Frequency",
                "Smoothed",
            )?);
        }

        let style = FigureStyle {
            panels: vec![
                PanelStyle {
                    x_label: time_name.clone(),
                    y_label: response_name.clone(),
                    ..PanelStyle::default()
                },
                PanelStyle {
                    x_label: "Frequency (Hz)".to_string(),
                    y_label: "Amplitude".to_string(),
                    ..PanelStyle::default()
                },
            ],
            formats: vec![ImageFormat::Svg, ImageFormat::Png],
            ..FigureStyle::default()
        };
        plot_multiple(&[history, amplitude], &style, &with_suffix(&stem, "_spectrum"))
            .context("Failed to save figure")?;
    }

    Ok(())
}
