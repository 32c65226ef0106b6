use std::path::PathBuf;
use std::process::ExitCode;

use anovakit_io_xlsx::{
    C_PATH_FILE_IN_DEFAULT, C_PATH_FILE_OUT_DEFAULT, N_COL_IDX_TEXT_DEFAULT, SpecConvertOptions,
    SpecXlsxReadOptions, convert_workbook,
};
use anovakit_parse::SpecParseOptions;
use clap::Parser;
use log::{LevelFilter, error};

#[derive(Debug, Parser)]
#[command(name = "anovakit")]
#[command(about = "Parse printed ANOVA output stored one line per cell into tidy worksheets")]
struct Cli {
    /// Workbook holding the printed output
    #[arg(default_value = C_PATH_FILE_IN_DEFAULT)]
    input: PathBuf,

    /// Destination workbook
    #[arg(default_value = C_PATH_FILE_OUT_DEFAULT)]
    output: PathBuf,

    /// Zero-based column holding the printed lines
    #[arg(short, long, default_value_t = N_COL_IDX_TEXT_DEFAULT)]
    column: usize,

    /// Only convert these sheets (repeatable)
    #[arg(short, long = "sheet", value_name = "NAME")]
    sheets: Vec<String>,

    /// Treat missing cells as blank lines instead of dropping them
    #[arg(long)]
    keep_missing_cells: bool,

    /// Maximum parse worker threads
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..))]
    workers: Option<u16>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }

    fn convert_options(&self) -> SpecConvertOptions {
        SpecConvertOptions {
            read_options: SpecXlsxReadOptions {
                col_idx_text: self.column,
                if_keep_missing_cells: self.keep_missing_cells,
                sheet_names: (!self.sheets.is_empty()).then(|| self.sheets.clone()),
            },
            parse_options: SpecParseOptions {
                num_workers_max: self.workers.map(usize::from),
            },
            ..SpecConvertOptions::default()
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    match convert_workbook(&cli.input, &cli.output, &cli.convert_options()) {
        Ok(report) => {
            println!("Parsed tables saved to: {}", cli.output.display());
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
