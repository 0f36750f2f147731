//! Main CLI application for the Game of Life simulator

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use life_zoo::{
    config::{CliOverrides, Settings},
    game_of_life::{create_example_patterns, io::{load_grid_as, save_grid_as}, GridFormat, Pattern},
    simulation::{GridStatistics, Simulation},
    utils::{ColorOutput, GridFormatter},
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "life_zoo")]
#[command(about = "Conway's Game of Life on finite and toroidal grids")]
#[command(version = "0.1.0")]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Seed pattern (overrides config)
        #[arg(short, long, value_enum, conflicts_with = "file")]
        pattern: Option<Pattern>,

        /// Seed grid file (overrides config)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// World width (overrides config)
        #[arg(long)]
        width: Option<usize>,

        /// World height (overrides config)
        #[arg(long)]
        height: Option<usize>,

        /// Number of generations (overrides config)
        #[arg(short, long)]
        generations: Option<usize>,

        /// Wrap the world edges
        #[arg(long, conflicts_with = "bounded")]
        toroidal: bool,

        /// Treat cells past the world edges as dead
        #[arg(long)]
        bounded: bool,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Save the final state to the output directory
        #[arg(long)]
        save: bool,
    },

    /// Create example configuration and pattern files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Convert a grid file between formats, optionally transforming it
    Convert {
        /// Grid file to read
        input: PathBuf,

        /// Grid file to write
        output: PathBuf,

        /// Input format (defaults to the input file extension)
        #[arg(long, value_enum)]
        from: Option<GridFormat>,

        /// Output format (defaults to the output file extension)
        #[arg(long, value_enum)]
        to: Option<GridFormat>,

        /// Crop window applied before rotating
        #[arg(long, num_args = 4, value_names = ["X0", "Y0", "X1", "Y1"])]
        crop: Option<Vec<usize>>,

        /// Clockwise quarter turns
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        rotate: i32,
    },

    /// Print statistics about a grid file
    Inspect {
        /// Grid file to read
        file: PathBuf,

        /// Input format (defaults to the file extension)
        #[arg(long, value_enum)]
        format: Option<GridFormat>,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    if let Err(err) = run_cli(cli.command) {
        eprintln!("{}", ColorOutput::error(&format!("Error: {:#}", err)));
        std::process::exit(1);
    }
}

fn run_cli(command: Commands) -> Result<()> {
    match command {
        Commands::Run {
            config,
            pattern,
            file,
            width,
            height,
            generations,
            toroidal,
            bounded,
            output,
            save,
        } => {
            let toroidal = match (toroidal, bounded) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            let overrides = CliOverrides {
                width,
                height,
                toroidal,
                generations,
                pattern,
                seed_file: file,
                output_dir: output,
            };
            run_command(config, overrides, save)
        }
        Commands::Setup { directory, force } => {
            setup_command(directory, force)
        }
        Commands::Convert { input, output, from, to, crop, rotate } => {
            convert_command(input, output, from, to, crop, rotate)
        }
        Commands::Inspect { file, format, json } => {
            inspect_command(file, format, json)
        }
    }
}

fn load_settings(config_path: &PathBuf) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        eprintln!("{}", ColorOutput::warning(&format!(
            "Config file {} not found, using defaults",
            config_path.display()
        )));
        Ok(Settings::default())
    }
}

fn run_command(config_path: PathBuf, overrides: CliOverrides, save: bool) -> Result<()> {
    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(&overrides);
    if save {
        settings.output.save_final = true;
    }

    settings.validate()
        .context("Configuration validation failed")?;

    let mut simulation = Simulation::new(settings)
        .context("Failed to set up simulation")?;

    let summary = simulation.run(|world| {
        println!("{}", GridFormatter::format_generation(world));
    });

    println!("{}", ColorOutput::success(&summary.to_string()));

    if simulation.settings().output.save_final {
        let path = simulation.save_final()?;
        println!("{}", ColorOutput::info(&format!("Final state saved to {}", path.display())));
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let patterns_dir = directory.join("patterns");

    write_config(&config_dir.join("default.yaml"), &Settings::default(), force)
        .context("Failed to create default configuration")?;

    let written = create_example_patterns(&patterns_dir, force)
        .context("Failed to create example patterns")?;
    println!("Created {} example patterns in: {}", written, patterns_dir.display());

    // A bounded variant seeded from one of the pattern files
    let mut bounded = Settings::default();
    bounded.world.toroidal = false;
    bounded.simulation.generations = 50;
    bounded.seed.pattern = None;
    bounded.seed.file = Some(patterns_dir.join("r_pentomino.txt"));
    bounded.seed.x = 14;
    bounded.seed.y = 6;
    write_config(&config_dir.join("bounded.yaml"), &bounded, force)
        .context("Failed to create bounded configuration")?;

    println!("\n{}", ColorOutput::success("Setup complete!"));
    Ok(())
}

fn write_config(path: &PathBuf, settings: &Settings, force: bool) -> Result<()> {
    if path.exists() && !force {
        println!("Skipped: {} (already exists)", path.display());
        return Ok(());
    }
    settings.to_file(path)?;
    println!("Created: {}", path.display());
    Ok(())
}

fn convert_command(
    input: PathBuf,
    output: PathBuf,
    from: Option<GridFormat>,
    to: Option<GridFormat>,
    crop: Option<Vec<usize>>,
    rotate: i32,
) -> Result<()> {
    let from = from.unwrap_or_else(|| GridFormat::from_path(&input));
    let to = to.unwrap_or_else(|| GridFormat::from_path(&output));

    let mut grid = load_grid_as(&input, from)?;
    if let Some(window) = crop {
        let &[x0, y0, x1, y1] = window.as_slice() else {
            anyhow::bail!("Crop window needs exactly four values");
        };
        grid = grid.crop(x0, y0, x1, y1)
            .with_context(|| format!("Failed to crop {}", input.display()))?;
    }
    let grid = grid.rotate(rotate);

    save_grid_as(&output, &grid, to)?;
    println!("{}", ColorOutput::success(&format!(
        "Wrote {}x{} grid to {}",
        grid.width(),
        grid.height(),
        output.display()
    )));

    Ok(())
}

fn inspect_command(file: PathBuf, format: Option<GridFormat>, json: bool) -> Result<()> {
    let format = format.unwrap_or_else(|| GridFormat::from_path(&file));
    let grid = load_grid_as(&file, format)?;
    let stats = GridStatistics::from_grid(&grid);

    if json {
        println!("{}", stats.to_json()?);
    } else {
        println!("Grid ({}x{}):", grid.width(), grid.height());
        println!("{}", GridFormatter::format_grid_with_coords(&grid));
        println!("{}", stats);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use life_zoo::game_of_life::{load_grid, zoo, save_grid};
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "life_zoo",
            "run",
            "--pattern", "r-pentomino",
            "--generations", "5",
            "--toroidal",
        ]);
        assert!(cli.is_ok());

        let conflicting = Cli::try_parse_from(["life_zoo", "run", "--toroidal", "--bounded"]);
        assert!(conflicting.is_err());

        let convert = Cli::try_parse_from([
            "life_zoo", "convert", "a.txt", "b.bin", "--rotate", "-1", "--crop", "0", "0", "2", "2",
        ]);
        assert!(convert.is_ok());
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        let result = setup_command(temp_dir.path().to_path_buf(), false);

        assert!(result.is_ok());
        assert!(temp_dir.path().join("config/default.yaml").exists());
        assert!(temp_dir.path().join("patterns/glider.txt").exists());

        let bounded = Settings::from_file(&temp_dir.path().join("config/bounded.yaml")).unwrap();
        assert!(!bounded.world.toroidal);
    }

    #[test]
    fn test_setup_command_respects_force() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path().to_path_buf();
        setup_command(root.clone(), false).unwrap();

        let bounded_path = root.join("config/bounded.yaml");
        let glider_path = root.join("patterns/glider.txt");
        let mut edited = Settings::from_file(&bounded_path).unwrap();
        edited.simulation.generations = 7;
        edited.to_file(&bounded_path).unwrap();
        save_grid(&glider_path, &zoo::block()).unwrap();

        setup_command(root.clone(), false).unwrap();
        assert_eq!(Settings::from_file(&bounded_path).unwrap().simulation.generations, 7);
        assert_eq!(load_grid(&glider_path).unwrap(), zoo::block());

        setup_command(root, true).unwrap();
        assert_eq!(Settings::from_file(&bounded_path).unwrap().simulation.generations, 50);
        assert_eq!(load_grid(&glider_path).unwrap(), zoo::glider());
    }

    #[test]
    fn test_load_settings_falls_back_to_defaults() {
        let temp_dir = tempdir().unwrap();
        let settings = load_settings(&temp_dir.path().join("missing.yaml")).unwrap();
        assert_eq!(settings.world.width, Settings::default().world.width);

        let bad_path = temp_dir.path().join("bad.yaml");
        std::fs::write(&bad_path, "world: [not, a, map]").unwrap();
        assert!(load_settings(&bad_path).is_err());
    }

    #[test]
    fn test_failed_command_is_reported() {
        let temp_dir = tempdir().unwrap();
        let command = Commands::Inspect {
            file: temp_dir.path().join("missing.txt"),
            format: None,
            json: false,
        };
        assert!(run_cli(command).is_err());
    }

    #[test]
    fn test_convert_command() {
        let temp_dir = tempdir().unwrap();
        let input = temp_dir.path().join("ship.txt");
        let output = temp_dir.path().join("ship.bin");
        save_grid(&input, &zoo::light_weight_spaceship()).unwrap();

        convert_command(input, output.clone(), None, None, Some(vec![0, 0, 5, 2]), 1).unwrap();

        let expected = zoo::light_weight_spaceship().crop(0, 0, 5, 2).unwrap().rotate(1);
        assert_eq!(load_grid(&output).unwrap(), expected);
    }

    #[test]
    fn test_inspect_command() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("glider.bin");
        save_grid(&path, &zoo::glider()).unwrap();

        assert!(inspect_command(path.clone(), None, true).is_ok());
        assert!(inspect_command(path, Some(GridFormat::Ascii), false).is_err());
    }
}
