use anyhow::{bail, Context, Result};
use clap::Parser;
use mtm::{
    MachineDefinition, ProgramCatalog, ProgramLoader, Status, TuringMachine, DEFAULT_MAX_STEPS,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
#[clap(after_help = "EXAMPLES:
  mtm-cli --builtin 'Binary increment' --input 1011
  mtm-cli --program copy.json --input ab --input '' --debug")]
struct Cli {
    /// The machine definition file (JSON) to execute
    #[clap(short, long, conflicts_with = "builtin")]
    program: Option<PathBuf>,

    /// Run a built-in program by name
    #[clap(short, long)]
    builtin: Option<String>,

    /// The input for each tape, in tape order
    #[clap(short, long)]
    input: Vec<String>,

    /// Maximum number of steps before giving up
    #[clap(short, long, default_value_t = DEFAULT_MAX_STEPS)]
    max_steps: usize,

    /// Print each step of the execution
    #[clap(short = 'd', long)]
    debug: bool,

    /// Print the final configuration as JSON
    #[clap(long)]
    json: bool,

    /// List the built-in programs and exit
    #[clap(short, long)]
    list: bool,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.list {
        for index in 0..ProgramCatalog::count() {
            let info = ProgramCatalog::info(index)?;
            println!(
                "{:>2}  {:<20} tapes: {}  transitions: {:>2}  sample: {:?}",
                info.index, info.name, info.num_tapes, info.transition_count, info.inputs
            );
        }
        return Ok(ExitCode::SUCCESS);
    }

    let (definition, sample_inputs) = load_definition(&cli)?;
    let inputs = if cli.input.is_empty() {
        sample_inputs
    } else {
        cli.input.clone()
    };

    let mut machine = if inputs.is_empty() {
        TuringMachine::new(definition)
    } else {
        TuringMachine::with_inputs(definition, inputs.as_slice())
    }
    .context("failed to build machine")?;
    debug!(?inputs, max_steps = cli.max_steps, "starting execution");

    let status = if cli.debug {
        println!("{}", machine.configuration());

        let mut status = Status::Running;
        for entry in machine.trace(cli.max_steps) {
            println!("{}", entry.configuration);
            status = entry.status;
        }

        println!("\nMachine stopped: {}", status);
        status
    } else {
        machine.run(cli.max_steps)
    };

    if cli.json {
        let configuration = serde_json::json!({
            "status": status,
            "configuration": machine.configuration(),
        });
        println!("{}", serde_json::to_string_pretty(&configuration)?);
    } else {
        println!("{}", status);
        for tape in machine.tapes() {
            println!("{}", tape);
        }
    }

    Ok(ExitCode::from(exit_code(status)))
}

/// Loads the definition named on the command line, with the inputs to use when none are given.
fn load_definition(cli: &Cli) -> Result<(Arc<MachineDefinition>, Vec<String>)> {
    match (&cli.program, &cli.builtin) {
        (Some(path), _) => {
            let definition = ProgramLoader::load_program(path)
                .with_context(|| format!("failed to load program from {}", path.display()))?;
            Ok((Arc::new(definition), Vec::new()))
        }
        (None, Some(name)) => {
            let program = ProgramCatalog::get_by_name(name)?;
            Ok((Arc::clone(&program.definition), program.inputs.clone()))
        }
        (None, None) => bail!("either --program or --builtin is required"),
    }
}

fn exit_code(status: Status) -> u8 {
    match status {
        Status::Accept => 0,
        Status::Reject => 1,
        Status::Halt => 2,
        Status::Running => 3,
    }
}
