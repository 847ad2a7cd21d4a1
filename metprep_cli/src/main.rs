//! # Metprep CLI
//!
//! Command line front end for the metprep_core calculators.
//!
//! ```text
//! metprep grain-size number 7.5 --magnification 200
//! metprep mold --length 20 --width 15 --height 10
//! metprep polishing --material hard --grit 1
//! metprep procedure --material soft --start-grit 240 --cleaning
//! metprep mounting --type castable --mold 1.25 --length 20 --width 15 --height 10
//! metprep grit --scale fepa P240
//! metprep run batch17.json --json
//! ```
//!
//! Log output goes to stderr and is controlled by `RUST_LOG`, falling back
//! to `log_filter` in the settings file.

mod render;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use metprep_core::calculations::grain_size::{self, GrainMethod, GrainSizeInput};
use metprep_core::calculations::grit_conversion;
use metprep_core::calculations::mold_compatibility::{self, SampleBox};
use metprep_core::calculations::mounting_material::{self, MoldChoice, MountingInput, MountingType};
use metprep_core::calculations::polishing_time::{self, PolishingInput};
use metprep_core::calculations::procedure_time::{self, ProcedureSelection};
use metprep_core::errors::{CalcError, CalcResult};
use metprep_core::file_io::load_worksheet;
use metprep_core::materials::{AbrasiveSize, GrindingGrit, GritScale, MaterialClass, MoldSize};
use metprep_core::{OutputFormat, Settings};

#[derive(Debug, Parser)]
#[command(name = "metprep", version, about = "Metallographic sample preparation calculators")]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Settings file (default: $METPREP_CONFIG or ./metprep.json)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// ASTM E112 grain size conversion
    GrainSize {
        #[command(subcommand)]
        method: GrainArgs,

        /// Magnification of the measurement; 0 or omitted uses the settings default (normally 100)
        #[arg(long, short, global = true)]
        magnification: Option<f64>,
    },

    /// Check which standard mold fits a sample
    Mold {
        #[arg(long, allow_negative_numbers = true)]
        length: f64,
        #[arg(long, allow_negative_numbers = true)]
        width: f64,
        #[arg(long, allow_negative_numbers = true)]
        height: f64,
    },

    /// Polishing time, cloth and pressure for one step
    Polishing {
        #[arg(long, value_parser = parse_material)]
        material: MaterialClass,
        /// Abrasive size in μm (9, 6, 3, 1, 0.5, 0.25, 0.05)
        #[arg(long, value_parser = parse_abrasive)]
        grit: AbrasiveSize,
    },

    /// Estimate total preparation time
    Procedure {
        #[arg(long, value_parser = parse_material)]
        material: MaterialClass,
        /// First SiC grit (120, 240, 320, 400, 600, 800, 1200)
        #[arg(long, value_parser = parse_grinding_grit, default_value = "120")]
        start_grit: GrindingGrit,
        /// Include 800 and 1200 grit
        #[arg(long)]
        optional_grinding: bool,
        #[arg(long)]
        mounting: bool,
        #[arg(long)]
        etching: bool,
        #[arg(long)]
        cleaning: bool,
    },

    /// Resin needed for one mount
    Mounting {
        #[arg(long = "type", value_parser = parse_mounting_type)]
        mounting_type: MountingType,
        /// Standard mold (1, 1.25, 1.5, 2)
        #[arg(
            long,
            value_parser = parse_mold,
            required_unless_present = "mold_diameter",
            conflicts_with = "mold_diameter"
        )]
        mold: Option<MoldSize>,
        /// Custom mold diameter in mm
        #[arg(long, requires = "mold_height", allow_negative_numbers = true)]
        mold_diameter: Option<f64>,
        /// Custom mold height in mm
        #[arg(long, requires = "mold_diameter", allow_negative_numbers = true)]
        mold_height: Option<f64>,
        /// Sample dimensions in mm; 5% of the mold volume is assumed when omitted
        #[arg(long)]
        length: Option<f64>,
        #[arg(long)]
        width: Option<f64>,
        #[arg(long)]
        height: Option<f64>,
    },

    /// Convert between FEPA, ANSI, JIS and micron grit sizes
    Grit {
        #[arg(long, value_parser = parse_grit_scale)]
        scale: GritScale,
        value: String,
    },

    /// Evaluate a JSON worksheet
    Run { path: PathBuf },

    /// Manage the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum GrainArgs {
    /// Grain size number G to diameter
    Number {
        #[arg(allow_negative_numbers = true)]
        astm_number: f64,
    },
    /// Mean diameter to G (values below 0.1 are mm, otherwise μm)
    Diameter {
        #[arg(allow_negative_numbers = true)]
        diameter: f64,
    },
    /// Lineal intercept count
    Intercept {
        #[arg(long, allow_negative_numbers = true)]
        count: f64,
        /// Test line length in mm
        #[arg(long, allow_negative_numbers = true)]
        length: f64,
    },
    /// Planimetric (Jeffries) grain count
    Planimetric {
        #[arg(long, allow_negative_numbers = true)]
        count: f64,
        /// Test area in mm²
        #[arg(long, allow_negative_numbers = true)]
        area: f64,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Write a settings file with defaults
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective settings
    Show,
}

fn parse_material(s: &str) -> Result<MaterialClass, String> {
    MaterialClass::from_str_flexible(s).map_err(|e| e.to_string())
}

fn parse_abrasive(s: &str) -> Result<AbrasiveSize, String> {
    AbrasiveSize::from_str_flexible(s).map_err(|e| e.to_string())
}

fn parse_grinding_grit(s: &str) -> Result<GrindingGrit, String> {
    GrindingGrit::from_str_flexible(s).map_err(|e| e.to_string())
}

fn parse_mounting_type(s: &str) -> Result<MountingType, String> {
    MountingType::from_str_flexible(s).map_err(|e| e.to_string())
}

fn parse_mold(s: &str) -> Result<MoldSize, String> {
    MoldSize::from_str_flexible(s).map_err(|e| e.to_string())
}

fn parse_grit_scale(s: &str) -> Result<GritScale, String> {
    GritScale::from_str_flexible(s).map_err(|e| e.to_string())
}

fn init_tracing(fallback_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings_path = Settings::resolve_path(cli.config.as_deref());
    let loaded = Settings::load_or_default(&settings_path);
    init_tracing(loaded.as_ref().map_or("warn", |s| s.log_filter.as_str()));

    let settings = match loaded {
        Ok(s) => s,
        Err(e) => {
            render::emit_error(OutputFormat::Text, &e);
            return ExitCode::FAILURE;
        }
    };
    let format = if cli.json { OutputFormat::Json } else { settings.output };
    debug!(path = %settings_path.display(), ?format, "settings resolved");

    match execute(cli.command, &settings, &settings_path, format) {
        Ok(code) => code,
        Err(e) => {
            render::emit_error(format, &e);
            ExitCode::FAILURE
        }
    }
}

fn execute(command: Command, settings: &Settings, settings_path: &Path, format: OutputFormat) -> CalcResult<ExitCode> {
    match command {
        Command::GrainSize { method, magnification } => {
            let method = match method {
                GrainArgs::Number { astm_number } => GrainMethod::NumberToDiameter { astm_number },
                GrainArgs::Diameter { diameter } => GrainMethod::DiameterToNumber { diameter },
                GrainArgs::Intercept { count, length } => GrainMethod::Intercept {
                    intercept_count: count,
                    intercept_length_mm: length,
                },
                GrainArgs::Planimetric { count, area } => GrainMethod::Planimetric {
                    grain_count: count,
                    test_area_mm2: area,
                },
            };
            let input = GrainSizeInput {
                label: String::new(),
                method,
                magnification: magnification
                    .filter(|m| *m != 0.0)
                    .or(Some(settings.default_magnification)),
            };
            let result = grain_size::calculate(&input)?;
            render::emit(format, "Grain Size (ASTM E112)", &result, &result.lines())?;
        }

        Command::Mold { length, width, height } => {
            let sample = SampleBox {
                label: String::new(),
                length_mm: length,
                width_mm: width,
                height_mm: height,
            };
            let result = mold_compatibility::calculate(&sample)?;
            render::emit(format, "Mold Compatibility", &result, &result.lines())?;
        }

        Command::Polishing { material, grit } => {
            let input = PolishingInput {
                label: String::new(),
                material,
                grit,
            };
            let rec = polishing_time::calculate(&input)?;
            render::emit(format, "Polishing Time", &rec, &rec.lines())?;
        }

        Command::Procedure {
            material,
            start_grit,
            optional_grinding,
            mounting,
            etching,
            cleaning,
        } => {
            let selection = ProcedureSelection {
                label: String::new(),
                material,
                start_grit,
                include_optional_grinding: optional_grinding,
                include_mounting: mounting,
                include_etching: etching,
                include_cleaning: cleaning,
            };
            let estimate = procedure_time::estimate(&selection);
            render::emit(format, "Procedure Time Estimate", &estimate, &estimate.lines())?;
        }

        Command::Mounting {
            mounting_type,
            mold,
            mold_diameter,
            mold_height,
            length,
            width,
            height,
        } => {
            let mold = match mold {
                Some(size) => MoldChoice::Standard(size),
                None => MoldChoice::Custom {
                    diameter_mm: mold_diameter.unwrap_or(0.0),
                    height_mm: mold_height.unwrap_or(0.0),
                },
            };
            let sample = (length.is_some() || width.is_some() || height.is_some()).then(|| SampleBox {
                label: String::new(),
                length_mm: length.unwrap_or(0.0),
                width_mm: width.unwrap_or(0.0),
                height_mm: height.unwrap_or(0.0),
            });
            let input = MountingInput {
                label: String::new(),
                mounting_type,
                mold,
                sample,
            };
            let result = mounting_material::calculate(&input)?;
            render::emit(format, "Mounting Material", &result, &result.lines())?;
        }

        Command::Grit { scale, value } => {
            let row = grit_conversion::convert(scale, &value);
            render::emit(format, "Grit Size Conversion", &row, &grit_conversion::lines(row))?;
            if row.is_none() {
                return Ok(ExitCode::FAILURE);
            }
        }

        Command::Run { path } => {
            let mut sheet = load_worksheet(&path)?;
            sheet.apply_settings(settings);
            info!(path = %path.display(), items = sheet.item_count(), "running worksheet");
            let report = sheet.evaluate();
            render::emit_report(format, &report)?;
            if report.failed() > 0 {
                return Ok(ExitCode::FAILURE);
            }
        }

        Command::Config { action } => match action {
            ConfigAction::Init { force } => {
                if settings_path.exists() && !force {
                    return Err(CalcError::file_error(
                        "init settings",
                        settings_path.display().to_string(),
                        "file exists (use --force to overwrite)",
                    ));
                }
                Settings::default().save(settings_path)?;
                println!("Wrote {}", settings_path.display());
            }
            ConfigAction::Show => {
                if format == OutputFormat::Text {
                    println!("# {}", settings_path.display());
                }
                println!("{}", serde_json::to_string_pretty(settings)?);
            }
        },
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_grain_size() {
        let cli = Cli::try_parse_from(["metprep", "grain-size", "number", "7.5", "-m", "200"]).unwrap();
        match cli.command {
            Command::GrainSize {
                method: GrainArgs::Number { astm_number },
                magnification,
            } => {
                assert_eq!(astm_number, 7.5);
                assert_eq!(magnification, Some(200.0));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_parse_negative_grain_number() {
        let cli = Cli::try_parse_from(["metprep", "grain-size", "number", "-1"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::GrainSize {
                method: GrainArgs::Number { astm_number },
                ..
            } if astm_number == -1.0
        ));
    }

    #[test]
    fn test_parse_flexible_values() {
        let cli = Cli::try_parse_from([
            "metprep", "procedure", "--material", "work hardening", "--start-grit", "P240", "--cleaning",
        ])
        .unwrap();
        match cli.command {
            Command::Procedure {
                material,
                start_grit,
                cleaning,
                ..
            } => {
                assert_eq!(material, MaterialClass::WorkHardening);
                assert_eq!(start_grit, GrindingGrit::Grit240);
                assert!(cleaning);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_mounting_requires_a_mold() {
        assert!(Cli::try_parse_from(["metprep", "mounting", "--type", "castable"]).is_err());
        assert!(Cli::try_parse_from([
            "metprep", "mounting", "--type", "castable", "--mold", "1.25", "--mold-diameter", "40"
        ])
        .is_err());
        assert!(Cli::try_parse_from([
            "metprep", "mounting", "--type", "castable", "--mold-diameter", "40", "--mold-height", "25"
        ])
        .is_ok());
    }

    #[test]
    fn test_global_json_flag() {
        let cli = Cli::try_parse_from(["metprep", "grit", "--scale", "fepa", "P240", "--json"]).unwrap();
        assert!(cli.json);
    }

    #[test]
    fn test_unknown_material_rejected() {
        assert!(Cli::try_parse_from(["metprep", "polishing", "--material", "brittle", "--grit", "1"]).is_err());
    }
}
