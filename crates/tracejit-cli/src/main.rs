use clap::Parser;
use clap_verbosity_flag::Verbosity;
use tracejit_ir::FpmOp;
use tracejit_native::HelperJit;
use tracejit_vmmath::{foldfpm, helper_symbols, modi, powi, HOST_CAPS};

mod error;

use error::CliError;

#[derive(Parser, Debug)]
#[command(name = "tracejit")]
#[command(about = "Evaluate and inspect the trace compiler's VM math helpers", long_about = None)]
struct Args {
    #[command(flatten)]
    verbose: Verbosity,

    /// Evaluate through JIT-compiled calls instead of direct calls
    #[arg(long, global = true)]
    jit: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Floored integer remainder A % B
    Modi {
        #[arg(allow_negative_numbers = true)]
        a: i32,
        #[arg(allow_negative_numbers = true)]
        b: i32,
    },

    /// X raised to the integer power K
    Powi {
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        k: i32,
    },

    /// Extended math operation, e.g. `fpm log2 8`
    Fpm {
        op: FpmOp,
        #[arg(allow_negative_numbers = true)]
        x: f64,
    },

    /// Show the platform capabilities selected at build time
    Caps,

    /// List the helper symbols exported for this target
    Symbols,
}

/// Routes evaluation either straight to the Rust helpers or through
/// generated machine code.
enum Evaluator {
    Direct,
    Jit(HelperJit),
}

impl Evaluator {
    fn new(use_jit: bool) -> Result<Self, CliError> {
        if use_jit {
            Ok(Evaluator::Jit(HelperJit::new()?))
        } else {
            Ok(Evaluator::Direct)
        }
    }

    fn modi(&self, a: i32, b: i32) -> Result<i32, CliError> {
        if b == 0 {
            return Err(CliError::ZeroDivisor);
        }
        match self {
            Evaluator::Direct => Ok(modi(a, b)),
            Evaluator::Jit(jit) => Ok(jit.modi(a, b)?),
        }
    }

    fn powi(&self, x: f64, k: i32) -> Result<f64, CliError> {
        match self {
            Evaluator::Direct => Ok(powi(x, k)),
            Evaluator::Jit(jit) => Ok(jit.powi(x, k)?),
        }
    }

    fn fpm(&self, op: FpmOp, x: f64) -> Result<f64, CliError> {
        if op == FpmOp::Other {
            return Err(CliError::UnsupportedFpm(op));
        }
        match self {
            Evaluator::Direct => Ok(foldfpm(x, op)),
            Evaluator::Jit(jit) => Ok(jit.foldfpm(x, op)?),
        }
    }
}

fn main() -> miette::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();
    log::debug!("Running {:?} (jit: {})", args.command, args.jit);

    match args.command {
        Command::Modi { a, b } => {
            let result = Evaluator::new(args.jit)?.modi(a, b)?;
            println!("{}", result);
        }
        Command::Powi { x, k } => {
            let result = Evaluator::new(args.jit)?.powi(x, k)?;
            println!("{}", result);
        }
        Command::Fpm { op, x } => {
            let result = Evaluator::new(args.jit)?.fpm(op, x)?;
            println!("{}", result);
        }
        Command::Caps => {
            println!("native_log2         {}", HOST_CAPS.native_log2);
            println!("native_exp2         {}", HOST_CAPS.native_exp2);
            println!("hyperbolic_wrappers {}", HOST_CAPS.hyperbolic_wrappers);
        }
        Command::Symbols => {
            for sym in helper_symbols() {
                println!("{:<24} {:?}", sym.name, sym.sig);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parses_negative_operands() {
        let args = Args::try_parse_from(["tracejit", "modi", "-7", "3"]).unwrap();
        match args.command {
            Command::Modi { a, b } => assert_eq!((a, b), (-7, 3)),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parses_fpm_mnemonic() {
        let args = Args::try_parse_from(["tracejit", "--jit", "fpm", "log2", "8"]).unwrap();
        assert!(args.jit);
        match args.command {
            Command::Fpm { op, x } => {
                assert_eq!(op, FpmOp::Log2);
                assert_eq!(x, 8.0);
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert!(Args::try_parse_from(["tracejit", "fpm", "cbrt", "8"]).is_err());
    }

    #[test]
    fn test_direct_evaluation() {
        let eval = Evaluator::Direct;
        assert_eq!(eval.modi(-7, 3).unwrap(), 2);
        assert!(matches!(eval.modi(1, 0), Err(CliError::ZeroDivisor)));
        assert_eq!(eval.powi(2.0, 10).unwrap(), 1024.0);
        assert_eq!(eval.fpm(FpmOp::Sqrt, 4.0).unwrap(), 2.0);
        assert!(matches!(eval.fpm(FpmOp::Other, 1.0), Err(CliError::UnsupportedFpm(FpmOp::Other))));
    }
}
