use dashboard_charts::api::{ChartEngine, ChartEngineConfig, ChartPayload};
use dashboard_charts::core::Viewport;
use dashboard_charts::render::RecordingSurface;
use std::fs;
use std::path::PathBuf;

const USAGE: &str = "usage: hit_test_snapshot --input <payload.json> [--output <path>] [--width <px>] [--height <px>] [--config <engine-config.json>]";
const DEFAULT_WIDTH: u32 = 800;
const DEFAULT_HEIGHT: u32 = 400;

#[derive(Debug)]
struct CliArgs {
    input: PathBuf,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
    width: Option<u32>,
    height: Option<u32>,
}

fn main() {
    let _ = dashboard_charts::telemetry::init_tracing_with_default("warn");
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let raw = read(&args.input)?;
    let payload = ChartPayload::from_json_str(&raw).map_err(|err| err.to_string())?;

    let config = match &args.config {
        Some(path) => {
            ChartEngineConfig::from_json_str(&read(path)?).map_err(|err| err.to_string())?
        }
        None => ChartEngineConfig::default(),
    };
    let canvas = payload
        .canvas
        .unwrap_or_else(|| Viewport::new(DEFAULT_WIDTH, DEFAULT_HEIGHT));
    let viewport = Viewport::new(
        args.width.unwrap_or(canvas.width),
        args.height.unwrap_or(canvas.height),
    );
    viewport.validate().map_err(|err| err.to_string())?;

    let mut engine =
        ChartEngine::new(RecordingSurface::new(), config).map_err(|err| err.to_string())?;
    engine.render(&payload.request(viewport));
    let snapshot = engine
        .hit_test_snapshot_json_pretty()
        .map_err(|err| err.to_string())?;

    match &args.output {
        Some(path) => fs::write(path, snapshot)
            .map_err(|err| format!("failed to write `{}`: {err}", path.display())),
        None => {
            println!("{snapshot}");
            Ok(())
        }
    }
}

fn read(path: &PathBuf) -> Result<String, String> {
    fs::read_to_string(path).map_err(|err| format!("failed to read `{}`: {err}", path.display()))
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let mut input = None::<PathBuf>;
    let mut output = None::<PathBuf>;
    let mut config = None::<PathBuf>;
    let mut width = None::<u32>;
    let mut height = None::<u32>;

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--input" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --input".to_owned())?;
                input = Some(PathBuf::from(value));
            }
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                output = Some(PathBuf::from(value));
            }
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --config".to_owned())?;
                config = Some(PathBuf::from(value));
            }
            "--width" => width = Some(parse_px(args.next(), "--width")?),
            "--height" => height = Some(parse_px(args.next(), "--height")?),
            "--help" | "-h" => return Err(USAGE.to_owned()),
            _ => return Err(format!("unknown argument `{flag}`")),
        }
    }

    let input = input.ok_or_else(|| format!("missing --input\n{USAGE}"))?;
    Ok(CliArgs {
        input,
        output,
        config,
        width,
        height,
    })
}

fn parse_px(value: Option<String>, flag: &str) -> Result<u32, String> {
    let value = value.ok_or_else(|| format!("missing value for {flag}"))?;
    value
        .parse::<u32>()
        .map_err(|err| format!("invalid value `{value}` for {flag}: {err}"))
}
