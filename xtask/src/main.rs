use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{exit, Command};

use clap::{Parser, Subcommand, ValueEnum};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

const LAMBDA_PACKAGE: &str = "word_rank_lambda";
const LAMBDA_BINARY: &str = "top_words_lambda";
const TESTED_PACKAGES: [&str; 2] = ["word_rank_core", LAMBDA_PACKAGE];

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Build, check, and package the word ranking Lambda"
)]
struct Cli {
    #[command(subcommand)]
    command: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Run CI checks
    Ci {
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
    /// Build the Lambda binary and zip it as a custom-runtime `bootstrap`
    ServerlessPackage {
        /// Target triple of the Lambda execution environment
        #[arg(long, default_value = "x86_64-unknown-linux-gnu")]
        target: String,
        #[arg(value_enum, long, default_value_t = BuildProfile::Release)]
        profile: BuildProfile,
        /// Directory receiving `top_words.zip`
        #[arg(long, default_value = "infra/dist")]
        out_dir: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum CiJob {
    /// rustfmt and clippy
    Lint,
    /// Unit and integration tests
    Test,
    /// Lint, then test
    Check,
}

#[derive(Clone, Copy, ValueEnum)]
enum BuildProfile {
    Debug,
    Release,
}

impl BuildProfile {
    fn target_subdir(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Release => "release",
        }
    }
}

type TaskResult = Result<(), String>;

fn cargo(args: &[&str]) -> TaskResult {
    eprintln!("+ cargo {}", args.join(" "));
    let status = Command::new("cargo")
        .args(args)
        .status()
        .map_err(|error| format!("could not spawn cargo: {error}"))?;
    if status.success() {
        Ok(())
    } else {
        Err(format!("cargo {} exited with {status}", args[0]))
    }
}

fn run_ci(job: CiJob) -> TaskResult {
    if matches!(job, CiJob::Lint | CiJob::Check) {
        eprintln!("\n>> lint");
        cargo(&["fmt", "--all", "--", "--check"])?;
        cargo(&["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"])?;
    }
    if matches!(job, CiJob::Test | CiJob::Check) {
        for package in TESTED_PACKAGES {
            eprintln!("\n>> test {package}");
            cargo(&["test", "-p", package])?;
        }
    }
    Ok(())
}

/// Fails early when `rustup` is present but the requested target is not installed.
fn check_target_installed(target: &str) -> TaskResult {
    let Ok(output) = Command::new("rustup")
        .args(["target", "list", "--installed"])
        .output()
    else {
        eprintln!("warning: rustup not found, skipping target check");
        return Ok(());
    };

    let installed = String::from_utf8_lossy(&output.stdout);
    if installed.lines().any(|line| line.trim() == target) {
        Ok(())
    } else {
        Err(format!(
            "rust target `{target}` is missing; run `rustup target add {target}`"
        ))
    }
}

fn package_lambda(target: &str, profile: BuildProfile, out_dir: &Path) -> TaskResult {
    check_target_installed(target)?;

    let mut build_args = vec![
        "build",
        "-p",
        LAMBDA_PACKAGE,
        "--bin",
        LAMBDA_BINARY,
        "--target",
        target,
    ];
    if matches!(profile, BuildProfile::Release) {
        build_args.push("--release");
    }
    cargo(&build_args)?;

    let binary = Path::new("target")
        .join(target)
        .join(profile.target_subdir())
        .join(LAMBDA_BINARY);
    let archive = out_dir.join("top_words.zip");
    fs::create_dir_all(out_dir)
        .map_err(|error| format!("could not create {}: {error}", out_dir.display()))?;
    write_bootstrap_zip(&binary, &archive)?;

    eprintln!("packaged {}", archive.display());
    Ok(())
}

/// Custom runtimes look for an executable named `bootstrap` at the archive root.
fn write_bootstrap_zip(binary: &Path, archive: &Path) -> TaskResult {
    let executable = fs::read(binary)
        .map_err(|error| format!("could not read {}: {error}", binary.display()))?;
    let file = fs::File::create(archive)
        .map_err(|error| format!("could not create {}: {error}", archive.display()))?;

    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o755);
    zip.start_file("bootstrap", options)
        .and_then(|()| zip.write_all(&executable).map_err(Into::into))
        .and_then(|()| zip.finish().map(|_| ()))
        .map_err(|error| format!("could not write {}: {error}", archive.display()))
}

fn main() {
    let outcome = match Cli::parse().command {
        Task::Ci { job } => run_ci(job),
        Task::ServerlessPackage {
            target,
            profile,
            out_dir,
        } => package_lambda(&target, profile, &out_dir),
    };

    if let Err(message) = outcome {
        eprintln!("error: {message}");
        exit(1);
    }
}
