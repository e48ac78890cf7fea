// Copyright (c) 2021-2024 Espresso Systems (espressosys.com)
// This file is part of the bls-keygen repository.

// You should have received a copy of the MIT License
// along with the bls-keygen repository. If not, see <https://mit-license.org/>.

//! Derive a BN254 BLS public key from a decimal scalar and write the verifier configuration
use std::{path::PathBuf, process::ExitCode};

use anyhow::{ensure, Context, Result};
use bn254_keys::{
    generate_key_pair, logging::setup_logging, BlsConfig, PrivateKey, DEFAULT_OUTPUT_PATH,
};
use clap::Parser;
use tracing::{error, info};

/// The command line arguments for the key generator
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// The private scalar, as a decimal integer
    #[arg(allow_negative_numbers = true)]
    scalar: String,

    /// Where to write the JSON configuration
    #[arg(short, long, env = "BLS_CONFIG_OUTPUT", default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// Print the configuration to stdout instead of writing a file
    #[arg(long, conflicts_with = "check")]
    stdout: bool,

    /// After writing, read the file back and check it holds the derived key
    #[arg(long)]
    check: bool,
}

fn main() -> ExitCode {
    setup_logging();
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Parse the scalar, derive the public key and write or print its configuration.
fn run(args: Args) -> Result<()> {
    let sk = PrivateKey::from_decimal(&args.scalar).context("Failed to parse private scalar")?;
    let pk = generate_key_pair(&sk);
    let config = BlsConfig::from(&pk);

    if args.stdout {
        print!("{}", config.to_json()?);
        return Ok(());
    }

    config
        .write_to(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    if args.check {
        let written = BlsConfig::read_from(&args.output)
            .and_then(|c| c.to_public_key())
            .with_context(|| format!("Failed to read back {}", args.output.display()))?;
        ensure!(
            written == pk,
            "{} does not hold the derived public key",
            args.output.display()
        );
        info!("configuration verified");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn args_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn negative_scalar_is_positional() {
        let args = Args::try_parse_from(["bls-keygen", "-5", "--stdout"]).unwrap();
        assert_eq!(args.scalar, "-5");
        assert!(args.stdout);
    }

    #[test]
    fn stdout_and_check_conflict() {
        assert!(Args::try_parse_from(["bls-keygen", "1", "--stdout", "--check"]).is_err());
    }

    #[test]
    fn writes_and_checks_output() {
        let dir = tempfile::tempdir().expect("Could not create temp dir");
        let output = dir.path().join("BLSConfig.json");
        let args = Args::try_parse_from([
            "bls-keygen",
            "31337",
            "--check",
            "--output",
            output.to_str().unwrap(),
        ])
        .unwrap();
        run(args).unwrap();
        assert!(BlsConfig::read_from(&output).is_ok());
    }

    #[test]
    fn rejects_bad_scalar() {
        let args = Args::try_parse_from(["bls-keygen", "not-a-number", "--stdout"]).unwrap();
        assert!(run(args).is_err());
    }

    #[test]
    fn stdout_leaves_no_file_behind() {
        let dir = tempfile::tempdir().expect("Could not create temp dir");
        let output = dir.path().join("BLSConfig.json");
        let args = Args::try_parse_from([
            "bls-keygen",
            "0",
            "--stdout",
            "--output",
            output.to_str().unwrap(),
        ])
        .unwrap();
        run(args).unwrap();
        assert!(!output.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);

        let args = Args::try_parse_from(["bls-keygen", "7", "--stdout"]).unwrap();
        let output = args.output.clone();
        let existed = output.exists();
        run(args).unwrap();
        assert_eq!(output.exists(), existed);
    }

    #[test]
    fn output_falls_back_to_env_then_default() {
        let command = Args::command();
        let output = command
            .get_arguments()
            .find(|arg| arg.get_id() == "output")
            .unwrap();
        assert_eq!(
            output.get_env(),
            Some(std::ffi::OsStr::new("BLS_CONFIG_OUTPUT"))
        );
        let defaults = output.get_default_values();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0], DEFAULT_OUTPUT_PATH);
    }
}
