use anyhow::Context as _;

use crate::{ColorMode, Config};

pub const DEFAULT_LINE_LENGTH: usize = 80;

#[derive(Debug, PartialEq, Eq)]
pub struct Args {
    pub message: Vec<String>,
    pub color: Option<ColorMode>,
    pub demo: bool,
    pub line: bool,
    pub length: usize,
    pub label: Option<String>,
    pub sub_labels: Vec<String>,
    pub warn: bool,
}

impl Args {
    pub fn parse() -> anyhow::Result<Self> {
        let mut args = pico_args::Arguments::from_env();

        if args.contains("-h") {
            Self::print_short_help();
            std::process::exit(0);
        }

        if args.contains("--help") {
            Self::print_long_help();
            std::process::exit(0);
        }

        if args.contains(["-v", "--version"]) {
            Self::print_version();
            std::process::exit(0);
        }

        if args.contains("--print-default-config") {
            println!("{}", Config::default_formatted_toml());
            std::process::exit(0)
        }

        if args.contains("--print-config-path") {
            println!(
                "{}",
                Config::get_config_path()
                    .with_context(|| "your system does not have a configuration directory")?
                    .to_string_lossy()
            );
            std::process::exit(0)
        }

        if args.contains("--write-default-config") {
            let path = Config::make_default_config()?;
            println!("wrote {}", path.to_string_lossy());
            std::process::exit(0)
        }

        Self::parse_from(args)
    }

    fn parse_from(mut args: pico_args::Arguments) -> anyhow::Result<Self> {
        let color = args.opt_value_from_str(["-c", "--color"])?;
        let demo = args.contains(["-d", "--demo"]);
        let line = args.contains("--line");
        let length = args
            .opt_value_from_str("--length")?
            .unwrap_or(DEFAULT_LINE_LENGTH);
        let label = args.opt_value_from_str(["-l", "--label"])?;
        let sub_labels = args.values_from_str(["-s", "--sub"])?;
        let warn = args.contains(["-w", "--warn"]);

        let message = args
            .finish()
            .into_iter()
            .map(|s| s.to_string_lossy().to_string())
            .collect::<Vec<_>>();

        if let Some(flag) = message.iter().find(|s| s.starts_with('-')) {
            anyhow::bail!("unknown flag: {}", flag)
        }

        Ok(Self {
            message,
            color,
            demo,
            line,
            length,
            label,
            sub_labels,
            warn,
        })
    }

    fn print_short_help() {
        Self::print_version();
        println!();
        println!("{}", include_str!("../assets/short_help.txt"));
    }

    fn print_long_help() {
        Self::print_short_help();
        println!("{}", include_str!("../assets/long_help.txt"));
    }

    fn print_version() {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    }
}
