use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use macd_backtester::prelude::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "macd-backtester")]
#[command(about = "A Rust-based SMA/MACD strategy backtester for futures", long_about = None)]
struct Cli {
    //enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    //run a backtest
    Run {
        #[command(flatten)]
        common: CommonArgs,

        //short sma window
        #[arg(long)]
        short: Option<usize>,

        //long sma window
        #[arg(long)]
        long: Option<usize>,

        //output options
        //output path for the per-period results csv
        #[arg(long)]
        output_table_csv: Option<PathBuf>,

        //output path for metrics json
        #[arg(long)]
        output_metrics_json: Option<PathBuf>,

        //output path for the transition matrix json
        #[arg(long)]
        output_transitions_json: Option<PathBuf>,
    },

    //run a grid of short/long window pairs in parallel
    Sweep {
        #[command(flatten)]
        common: CommonArgs,

        //short windows to try (comma separated)
        #[arg(long, value_delimiter = ',', default_value = "5,10,15,20")]
        short: Vec<usize>,

        //long windows to try (comma separated)
        #[arg(long, value_delimiter = ',', default_value = "20,30,50")]
        long: Vec<usize>,
    },

    //write a default configuration file
    InitConfig {
        //destination path
        #[arg(long, default_value = "backtest.json")]
        path: PathBuf,
    },
}

#[derive(Args)]
struct CommonArgs {
    //json configuration file, flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    //path to csv data file
    #[arg(long)]
    data: Option<PathBuf>,

    //symbol to trade (eg cl=f)
    #[arg(long)]
    symbol: Option<String>,

    //contract size multiplier
    #[arg(long)]
    contract_size: Option<f64>,

    //fast ema span
    #[arg(long)]
    fast_span: Option<usize>,

    //slow ema span
    #[arg(long)]
    slow_span: Option<usize>,

    //macd signal line span
    #[arg(long)]
    signal_span: Option<usize>,

    //signal rule (legacy, exclusive)
    #[arg(long)]
    rule: Option<String>,

    //var quantile (0.05 = 95% var)
    #[arg(long)]
    var_quantile: Option<f64>,

    //trading days per year
    #[arg(long)]
    trading_days: Option<f64>,
}

impl CommonArgs {
    //loads the config file (or defaults) and applies flag overrides
    fn resolve(&self) -> Result<BacktestConfiguration> {
        let mut config = match &self.config {
            Some(path) => BacktestConfiguration::from_json_file(path)
                .context(format!("Failed to load config from {:?}", path))?,
            None => BacktestConfiguration::default(),
        };

        if let Some(data) = &self.data {
            config.data_path = data.clone();
        }
        if let Some(symbol) = &self.symbol {
            config.contract.symbol = symbol.clone();
        }
        if let Some(size) = self.contract_size {
            config.contract.contract_size = size;
        }
        if let Some(span) = self.fast_span {
            config.strategy.fast_span = span;
        }
        if let Some(span) = self.slow_span {
            config.strategy.slow_span = span;
        }
        if let Some(span) = self.signal_span {
            config.strategy.signal_span = span;
        }
        if let Some(rule) = &self.rule {
            config.strategy.rule = SignalRule::parse(rule)
                .ok_or_else(|| anyhow::anyhow!("Unknown signal rule: {}", rule))?;
        }
        if let Some(q) = self.var_quantile {
            config.risk.var_quantile = q;
        }
        if let Some(days) = self.trading_days {
            config.risk.trading_days = days;
        }

        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run {
            common,
            short,
            long,
            output_table_csv,
            output_metrics_json,
            output_transitions_json,
        } => {
            let mut config = common.resolve()?;
            if let Some(short) = short {
                config.strategy.short_window = short;
            }
            if let Some(long) = long {
                config.strategy.long_window = long;
            }
            config.output_table_csv = output_table_csv.or(config.output_table_csv);
            config.output_metrics_json = output_metrics_json.or(config.output_metrics_json);
            config.output_transitions_json =
                output_transitions_json.or(config.output_transitions_json);

            run_backtest(&config)?;
        }
        Commands::Sweep {
            common,
            short,
            long,
        } => {
            let config = common.resolve()?;
            run_parameter_sweep(&config, &short, &long)?;
        }
        Commands::InitConfig { path } => {
            BacktestConfiguration::default().to_json_file(&path)?;
            println!("Default configuration written to {:?}", path);
        }
    }

    Ok(())
}

fn load_series(config: &BacktestConfiguration) -> Result<PriceSeries> {
    let path = &config.data_path;
    let series = load_csv(path, &config.contract.symbol)
        .context(format!("Failed to load data from {:?}", path))?;

    if series.is_empty() {
        anyhow::bail!("No data found for symbol {}", config.contract.symbol);
    }

    if let (Some(first), Some(last)) = (series.first(), series.last()) {
        tracing::info!(
            symbol = series.symbol(),
            bars = series.len(),
            from = %first.timestamp,
            to = %last.timestamp,
            "loaded price series"
        );
    }

    Ok(series)
}

fn run_backtest(config: &BacktestConfiguration) -> Result<()> {
    config.validate()?;
    let series = load_series(config)?;
    let contract = config.contract.to_futures_contract()?;

    let engine = BacktestEngine::new(config.strategy, config.risk, contract)?;
    let result = engine
        .run(&series)
        .context("Backtest aborted before report generation")?;

    //display results
    println!("Quantitative Metrics");
    println!("====================\n");
    result.metrics.pretty_print_table();

    println!("\nMarkov Chain Transition Matrix");
    println!("==============================\n");
    result.transitions.pretty_print_table();

    //save outputs if requested
    if let Some(path) = &config.output_table_csv {
        save_table_csv(&result.rows, path)?;
        println!("\nResults table saved to {:?}", path);
    }

    if let Some(path) = &config.output_metrics_json {
        save_metrics_json(&result.metrics, path)?;
        println!("Metrics saved to {:?}", path);
    }

    if let Some(path) = &config.output_transitions_json {
        save_transitions_json(&result.transitions, path)?;
        println!("Transition matrix saved to {:?}", path);
    }

    Ok(())
}

fn run_parameter_sweep(config: &BacktestConfiguration, short: &[usize], long: &[usize]) -> Result<()> {
    config.validate()?;
    let series = load_series(config)?;
    let contract = config.contract.to_futures_contract()?;

    let grid = window_grid(short, long);
    if grid.is_empty() {
        anyhow::bail!("No window pair with short < long in the requested grid");
    }

    let results = run_sweep(&series, &config.strategy, &config.risk, &contract, &grid);

    println!("Parameter Sweep ({} combinations)", results.len());
    println!("================\n");
    sweep_table(&results).printstd();

    Ok(())
}
