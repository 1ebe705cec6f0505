//! CLI tool for building a chart model from local CSV data.
//! Usage: chart <data_dir> <symbol> <start> <end> [--ema] [--ma] [--bb] [--rsi] [--macd] [--signals]
//! Output: ChartModel JSON on stdout.

use candleview::{build_chart, ChartRequest, ChartToggles, CsvProvider, IndicatorSettings, Toggle};

fn main() {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 5 {
        eprintln!("Usage: chart <data_dir> <symbol> <start> <end> [toggles...]");
        eprintln!("Toggles: --ema --ma --bb --rsi --macd --signals");
        eprintln!("Data: <data_dir>/{{SYMBOL}}.csv with date,open,high,low,close,volume");
        std::process::exit(1);
    }

    let provider = CsvProvider::new(&args[1]);
    let request = ChartRequest {
        symbol: args[2].clone(),
        start_date: args[3].clone(),
        end_date: args[4].clone(),
    };

    let mut toggles = ChartToggles::default();
    for flag in &args[5..] {
        match flag.as_str() {
            "--ema" => toggles.ema = Toggle::Enabled,
            "--ma" => toggles.ma = Toggle::Enabled,
            "--bb" => toggles.bb = Toggle::Enabled,
            "--rsi" => toggles.rsi = Toggle::Enabled,
            "--macd" => toggles.macd = Toggle::Enabled,
            "--signals" => toggles.signals = Toggle::Enabled,
            _ => {
                eprintln!("Unknown toggle: {flag}");
                std::process::exit(1);
            }
        }
    }

    let model = build_chart(&provider, &request, &toggles, &IndicatorSettings::default());
    let output = serde_json::to_string_pretty(&model).expect("Failed to serialize");
    println!("{output}");
}
