use serde::Serialize;
use serde_json::{Value, json};
use skillshape::{
    LayoutConfig, ShapeId, ShapeParams, SkillNode, XorShift64Star, default_pool, replicate_pool,
};
use std::io::Read;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Json(serde_json::Error),
    Layout(skillshape::Error),
    UnknownShape(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Layout(err) => write!(f, "{err}"),
            CliError::UnknownShape(id) => write!(f, "Unknown shape: {id}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<skillshape::Error> for CliError {
    fn from(value: skillshape::Error) -> Self {
        match value {
            skillshape::Error::UnknownShape { shape_id } => Self::UnknownShape(shape_id),
            other => Self::Layout(other),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Command {
    #[default]
    Shapes,
    Layout,
    Outline,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    shape: Option<String>,
    count: Option<usize>,
    width: f64,
    height: f64,
    seed: Option<u64>,
    node_space: Option<f64>,
    max_inside_connections: Option<u32>,
    topology: Option<String>,
    cluster_count: Option<usize>,
    cluster_strength: Option<f64>,
    cluster_seed: Option<String>,
    config: Option<String>,
    nodes: Option<String>,
    pretty: bool,
    strict: bool,
}

fn usage() -> &'static str {
    "skillshape-cli\n\
\n\
USAGE:\n\
  skillshape-cli shapes [--pretty]\n\
  skillshape-cli layout <shape> [--count <n>] [--width <w>] [--height <h>] [--seed <n>] [--node-space <f>] [--max-inside-connections <n>] [--topology <name>] [--cluster-count <n>] [--cluster-strength <f>] [--cluster-seed <str>] [--config <path>] [--nodes <path>|-] [--pretty] [--strict]\n\
  skillshape-cli outline <shape> [--width <w>] [--height <h>] [--config <path>] [--pretty]\n\
\n\
NOTES:\n\
  - The drawing area defaults to 800x600.\n\
  - Without --nodes, the built-in skill pool is used; --count replicates or truncates the pool.\n\
  - --nodes - reads a JSON array of {\"id\", \"score\"} objects from stdin.\n\
  - --config reads a JSON knob object; flags are merged on top of it.\n\
  - Without --seed, every run draws fresh randomness.\n\
  - --strict exits with 3 on an unknown shape and 1 on invalid input instead of printing [].\n\
  - Set RUST_LOG to adjust diagnostics on stderr (default: warn).\n\
"
}

fn parse_value<T: std::str::FromStr>(value: Option<&String>) -> Result<T, CliError> {
    value
        .and_then(|v| v.parse::<T>().ok())
        .ok_or(CliError::Usage(usage()))
}

fn parse_dimension(value: Option<&String>) -> Result<f64, CliError> {
    let v: f64 = parse_value(value)?;
    if !(v.is_finite() && v > 0.0) {
        return Err(CliError::Usage(usage()));
    }
    Ok(v)
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        width: 800.0,
        height: 600.0,
        ..Default::default()
    };

    let mut command = None;
    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "--pretty" => args.pretty = true,
            "--strict" => args.strict = true,
            "--count" => args.count = Some(parse_value(it.next())?),
            "--width" => args.width = parse_dimension(it.next())?,
            "--height" => args.height = parse_dimension(it.next())?,
            "--seed" => args.seed = Some(parse_value(it.next())?),
            "--node-space" => args.node_space = Some(parse_value(it.next())?),
            "--max-inside-connections" => {
                args.max_inside_connections = Some(parse_value(it.next())?)
            }
            "--topology" => args.topology = Some(parse_value(it.next())?),
            "--cluster-count" => args.cluster_count = Some(parse_value(it.next())?),
            "--cluster-strength" => args.cluster_strength = Some(parse_value(it.next())?),
            "--cluster-seed" => args.cluster_seed = Some(parse_value(it.next())?),
            "--config" => args.config = Some(parse_value(it.next())?),
            "--nodes" => args.nodes = Some(parse_value(it.next())?),
            other if other.starts_with("--") => return Err(CliError::Usage(usage())),
            other if command.is_none() => {
                command = Some(match other {
                    "shapes" => Command::Shapes,
                    "layout" => Command::Layout,
                    "outline" => Command::Outline,
                    _ => return Err(CliError::Usage(usage())),
                });
            }
            other => {
                if args.shape.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.shape = Some(other.to_string());
            }
        }
    }

    args.command = command.ok_or(CliError::Usage(usage()))?;
    if args.command != Command::Shapes && args.shape.is_none() {
        return Err(CliError::Usage(usage()));
    }
    Ok(args)
}

fn read_input(input: &str) -> Result<String, CliError> {
    match input {
        "-" => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        path => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn load_knobs(args: &Args) -> Result<LayoutConfig, CliError> {
    let mut knobs = LayoutConfig::empty_object();
    if let Some(path) = args.config.as_deref() {
        let value: Value = serde_json::from_str(&read_input(path)?)?;
        knobs.deep_merge(&value);
    }
    if let Some(topology) = &args.topology {
        knobs.set_value("topology", json!(topology));
    }
    if let Some(count) = args.cluster_count {
        knobs.set_value("cluster.count", json!(count));
    }
    if let Some(strength) = args.cluster_strength {
        knobs.set_value("cluster.strength", json!(strength));
    }
    if let Some(seed) = &args.cluster_seed {
        knobs.set_value("cluster.seed", json!(seed));
    }
    Ok(knobs)
}

fn shape_params(args: &Args) -> Result<ShapeParams, CliError> {
    let mut params = ShapeParams::new(args.width, args.height);
    params.node_space = args.node_space;
    params.max_inside_connections = args.max_inside_connections;
    params.knobs = load_knobs(args)?;
    Ok(params)
}

fn load_nodes(args: &Args) -> Result<Vec<SkillNode>, CliError> {
    let pool = match args.nodes.as_deref() {
        Some(input) => serde_json::from_str::<Vec<SkillNode>>(&read_input(input)?)?,
        None => default_pool(),
    };
    Ok(match args.count {
        Some(count) => replicate_pool(&pool, count),
        None => pool,
    })
}

fn run(args: Args) -> Result<(), CliError> {
    match args.command {
        Command::Shapes => {
            let names: Vec<String> = ShapeId::all().into_iter().map(ShapeId::name).collect();
            if args.pretty {
                return write_json(&names, true);
            }
            for name in names {
                println!("{name}");
            }
            Ok(())
        }
        Command::Layout => {
            let shape = args.shape.as_deref().unwrap_or_default();
            let params = shape_params(&args)?;
            let nodes = load_nodes(&args)?;
            tracing::debug!(shape, nodes = nodes.len(), seed = ?args.seed, "running layout");
            let mut thread_rng;
            let mut seeded;
            let rng: &mut dyn rand::RngCore = match args.seed {
                Some(seed) => {
                    seeded = XorShift64Star::new(seed);
                    &mut seeded
                }
                None => {
                    thread_rng = rand::thread_rng();
                    &mut thread_rng
                }
            };
            let positions = if args.strict {
                skillshape::try_layout(shape, &nodes, &params, rng)?
            } else {
                skillshape::layout_with_rng(shape, &nodes, &params, rng)
            };
            write_json(&positions, args.pretty)
        }
        Command::Outline => {
            let name = args.shape.as_deref().unwrap_or_default();
            let shape: ShapeId = name.parse()?;
            let outline = skillshape::outline(shape, &shape_params(&args)?)?;
            write_json(&outline, args.pretty)
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_tracing();
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(err @ CliError::UnknownShape(_)) => {
            eprintln!("{err}");
            std::process::exit(3);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
