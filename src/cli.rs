use std::env;
use std::path::PathBuf;

use pv_savings::overrides::Overrides;

pub struct CliOptions {
    pub scenario: Option<PathBuf>,
    pub preset: Option<String>,
    pub overrides: Overrides,
    pub json: bool,
    pub monthly_out: Option<PathBuf>,
    #[cfg(feature = "api")]
    pub serve: bool,
    #[cfg(feature = "api")]
    pub port: u16,
    #[cfg(feature = "api")]
    pub public_dir: Option<PathBuf>,
    #[cfg(feature = "api")]
    pub assets_dir: Option<PathBuf>,
}

pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(args)
}

fn parse_args_from(args: Vec<String>) -> Result<CliOptions, String> {
    if args.len() == 1 && (args[0] == "--help" || args[0] == "-h") {
        print_usage();
        std::process::exit(0);
    }
    parse_options(&args)
}

fn parse_options(args: &[String]) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut opts = CliOptions {
        scenario: None,
        preset: None,
        overrides: Overrides::default(),
        json: false,
        monthly_out: None,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: 3000,
        #[cfg(feature = "api")]
        public_dir: None,
        #[cfg(feature = "api")]
        assets_dir: None,
    };

    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--scenario" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --scenario (expected a TOML file path)",
                )?;
                if opts.scenario.replace(PathBuf::from(path)).is_some() {
                    return Err("--scenario provided more than once".to_string());
                }
            }
            "--preset" => {
                i += 1;
                let name =
                    args.next_or_err(i, "missing value for --preset (expected a preset name)")?;
                if opts.preset.replace(name.to_string()).is_some() {
                    return Err("--preset provided more than once".to_string());
                }
            }
            "--array-kwp" | "--panel-count" | "--panel-watt" | "--tilt" | "--import-rate"
            | "--demand" | "--maintenance-per-kwp" | "--install-per-kwp" => {
                i += 1;
                let value = args.number_at(i, flag)?;
                let o = &mut opts.overrides;
                let slot = match flag {
                    "--array-kwp" => &mut o.array_kwp,
                    "--panel-count" => &mut o.panel_count,
                    "--panel-watt" => &mut o.panel_watt,
                    "--tilt" => &mut o.tilt_deg,
                    "--import-rate" => &mut o.import_rate,
                    "--demand" => &mut o.demand,
                    "--maintenance-per-kwp" => &mut o.maintenance_per_kwp,
                    _ => &mut o.install_per_kwp,
                };
                *slot = Some(value);
            }
            "--no-demand-cap" => {
                opts.overrides.demand = Some(f64::INFINITY);
            }
            "--json" => {
                opts.json = true;
            }
            "--monthly-out" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --monthly-out (expected a file path)",
                )?;
                if opts.monthly_out.replace(PathBuf::from(path)).is_some() {
                    return Err("--monthly-out provided more than once".to_string());
                }
            }
            #[cfg(feature = "api")]
            "--serve" => {
                opts.serve = true;
            }
            #[cfg(feature = "api")]
            "--port" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --port (expected a u16)")?;
                opts.port = raw
                    .parse::<u16>()
                    .map_err(|_| format!("--port value \"{raw}\" is not a valid u16"))?;
            }
            #[cfg(feature = "api")]
            "--public-dir" => {
                i += 1;
                let dir =
                    args.next_or_err(i, "missing value for --public-dir (expected a directory)")?;
                opts.public_dir = Some(PathBuf::from(dir));
            }
            #[cfg(feature = "api")]
            "--assets-dir" => {
                i += 1;
                let dir =
                    args.next_or_err(i, "missing value for --assets-dir (expected a directory)")?;
                opts.assets_dir = Some(PathBuf::from(dir));
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if opts.scenario.is_some() && opts.preset.is_some() {
        return Err(
            "arguments `--scenario` and `--preset` are mutually exclusive; choose one source"
                .to_string(),
        );
    }

    Ok(opts)
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
    fn number_at(&self, index: usize, flag: &str) -> Result<f64, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }

    fn number_at(&self, index: usize, flag: &str) -> Result<f64, String> {
        let raw = self.next_or_err(index, &format!("missing value for {flag} (expected a number)"))?;
        raw.parse::<f64>()
            .ok()
            .filter(|v| !v.is_nan())
            .ok_or_else(|| format!("{flag} value \"{raw}\" is not a valid number"))
    }
}

pub fn print_usage() {
    eprintln!("pv-savings — annual PV electricity savings (no export)");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  pv-savings [--scenario <path> | --preset <name>] [OVERRIDES] [--json]");
    eprintln!("             [--monthly-out <path>]");
    #[cfg(feature = "api")]
    {
        eprintln!("             [--serve [--port <u16>] [--public-dir <dir>] [--assets-dir <dir>]]");
    }
    eprintln!();
    eprintln!("Overrides:");
    eprintln!("  --array-kwp <kWp>  --panel-count <n>  --panel-watt <W>  --tilt <deg>");
    eprintln!("  --import-rate <per kWh>  --demand <kWh>  --no-demand-cap");
    eprintln!("  --maintenance-per-kwp <per kWp/yr>  --install-per-kwp <per kWp>");
    eprintln!();
    eprintln!("Presets: baseline (default), commercial, uncapped");
}

#[cfg(test)]
mod tests {
    use super::parse_args_from;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn supports_scenario_cli() {
        let opts = parse_args_from(args(&["--scenario", "scenarios/commercial.toml"]))
            .expect("parse should succeed");
        assert_eq!(
            opts.scenario.as_deref().and_then(|p| p.to_str()),
            Some("scenarios/commercial.toml")
        );
        assert!(opts.preset.is_none());
    }

    #[test]
    fn supports_preset_cli() {
        let opts =
            parse_args_from(args(&["--preset", "uncapped"])).expect("parse should succeed");
        assert_eq!(opts.preset.as_deref(), Some("uncapped"));
        assert!(opts.scenario.is_none());
    }

    #[test]
    fn collects_overrides() {
        let opts = parse_args_from(args(&[
            "--panel-count",
            "250",
            "--panel-watt",
            "400",
            "--tilt",
            "20",
            "--json",
        ]))
        .expect("parse should succeed");
        assert_eq!(opts.overrides.capacity_kwp(), Some(100.0));
        assert_eq!(opts.overrides.tilt_deg, Some(20.0));
        assert!(opts.json);
    }

    #[test]
    fn no_demand_cap_sets_infinite_demand() {
        let opts = parse_args_from(args(&["--no-demand-cap"])).expect("parse should succeed");
        assert_eq!(opts.overrides.demand, Some(f64::INFINITY));
    }

    #[test]
    fn rejects_malformed_number() {
        let err = parse_args_from(args(&["--tilt", "steep"])).err();
        assert!(err.is_some_and(|e| e.contains("--tilt")));
    }

    #[test]
    fn rejects_scenario_with_preset() {
        assert!(parse_args_from(args(&["--scenario", "a.toml", "--preset", "baseline"])).is_err());
    }

    #[test]
    fn rejects_unknown_argument() {
        assert!(parse_args_from(args(&["--bogus"])).is_err());
    }
}
