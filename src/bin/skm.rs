use std::ffi::OsStr;

use anyhow::Context;
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::engine::{ArgValueCompleter, CompletionCandidate};
use clap_complete::CompleteEnv;
use clap_verbosity_flag::{Verbosity, WarnLevel};

use skm::{
    adapters::default_host,
    model::Pin,
    ports::{DeviceHost, Prompter},
    tui::TerminalPrompter,
    use_cases::{self, CommandTarget, InfoEntry, InfoScope, ResetOutcome},
    views,
};

#[derive(Parser, Debug)]
#[command(name = "skm")]
#[command(about = "SKM: Security Key Manager", version)]
#[command(
    long_about = "Manage FIDO2 security keys: list connected devices, inspect them, \
                  manage the PIN and discoverable credentials, and reset them."
)]
pub struct Cli {
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug)]
pub struct DeviceArgs {
    /// Path to the security key device
    #[arg(
        short = 'd',
        long = "device-path",
        env = "SKM_DEVICE_PATH",
        add = ArgValueCompleter::new(complete_device_path)
    )]
    pub device_path: Option<String>,
}

#[derive(Args, Debug)]
pub struct PinArgs {
    /// PIN for the security key
    #[arg(short, long)]
    pub pin: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List connected security keys
    List,

    /// Show information about a security key
    Info {
        #[command(flatten)]
        device: DeviceArgs,

        /// Show information for all connected security keys (overrides --device-path)
        #[arg(short, long)]
        all: bool,
    },

    /// Manage the PIN of a security key
    #[command(subcommand, visible_alias = "p")]
    Pin(PinCommands),

    /// Manage discoverable credentials
    #[command(subcommand, visible_aliases = ["c", "credential", "credentials"])]
    Creds(CredsCommands),

    /// Configure authenticator options
    #[command(subcommand, visible_alias = "cfg")]
    Config(ConfigCommands),

    /// Factory reset a security key, deleting every credential and the PIN
    Reset {
        #[command(flatten)]
        device: DeviceArgs,

        /// Confirm reset without prompting
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum PinCommands {
    /// Set a new PIN on a security key that has none
    Set {
        #[command(flatten)]
        device: DeviceArgs,

        /// New PIN for the security key
        #[arg(short, long)]
        pin: Option<String>,
    },

    /// Change the existing PIN of a security key
    Change {
        #[command(flatten)]
        device: DeviceArgs,

        /// Current PIN for the security key
        #[arg(short, long)]
        pin: Option<String>,

        /// New PIN for the security key
        #[arg(short, long)]
        new_pin: Option<String>,
    },

    /// Show remaining PIN and UV attempts
    Retries {
        #[command(flatten)]
        device: DeviceArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum CredsCommands {
    /// List credentials stored on a security key
    #[command(visible_alias = "ls")]
    List {
        #[command(flatten)]
        device: DeviceArgs,

        #[command(flatten)]
        pin: PinArgs,
    },

    /// Delete a credential stored on a security key
    #[command(visible_aliases = ["rm", "del", "remove"])]
    Delete {
        #[command(flatten)]
        device: DeviceArgs,

        #[command(flatten)]
        pin: PinArgs,

        /// ID of the credential to delete (base64url)
        #[arg(short = 'i', long, add = ArgValueCompleter::new(complete_credential_id))]
        credential_id: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Toggle the always-UV option
    AlwaysUv {
        #[command(flatten)]
        device: DeviceArgs,

        #[command(flatten)]
        pin: PinArgs,
    },

    /// Enable enterprise attestation
    EnterpriseAttestation {
        #[command(flatten)]
        device: DeviceArgs,

        #[command(flatten)]
        pin: PinArgs,
    },
}

fn current_pin(pin: Option<String>) -> anyhow::Result<Option<Pin>> {
    Ok(pin.map(Pin::current).transpose()?)
}

fn new_pin(pin: Option<String>) -> anyhow::Result<Option<Pin>> {
    Ok(pin.map(Pin::new).transpose()?)
}

fn target(device: DeviceArgs, pin: PinArgs) -> anyhow::Result<CommandTarget> {
    Ok(CommandTarget::new(device.device_path, current_pin(pin.pin)?))
}

/// Value of `-x VALUE`, `--long VALUE` or `--long=VALUE` among the words
/// being completed
fn flag_value(words: &[String], short: &str, long: &str) -> Option<String> {
    let prefix = format!("{long}=");
    words.iter().enumerate().find_map(|(i, word)| {
        if word == short || word == long {
            words.get(i + 1).cloned()
        } else {
            word.strip_prefix(&prefix).map(str::to_string)
        }
    })
}

fn complete_device_path(current: &OsStr) -> Vec<CompletionCandidate> {
    let prefix = current.to_str().unwrap_or_default();
    use_cases::device_path_candidates(&default_host(), prefix)
        .unwrap_or_default()
        .into_iter()
        .map(CompletionCandidate::new)
        .collect()
}

/// Needs both the device path and the PIN on the command line, since
/// completion cannot prompt
fn complete_credential_id(current: &OsStr) -> Vec<CompletionCandidate> {
    let words: Vec<String> = std::env::args_os()
        .map(|word| word.to_string_lossy().into_owned())
        .collect();
    let device_path = flag_value(&words, "-d", "--device-path")
        .or_else(|| std::env::var("SKM_DEVICE_PATH").ok());
    let pin = flag_value(&words, "-p", "--pin").and_then(|pin| Pin::current(pin).ok());
    let (Some(device_path), Some(pin)) = (device_path, pin) else {
        return Vec::new();
    };

    let prefix = current.to_str().unwrap_or_default();
    use_cases::credential_id_candidates(&default_host(), &device_path, &pin, prefix)
        .unwrap_or_default()
        .into_iter()
        .map(|c| CompletionCandidate::new(c.id).help(Some(c.description.into())))
        .collect()
}

fn main() -> anyhow::Result<()> {
    CompleteEnv::with_factory(Cli::command).complete();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.verbosity)
        .with_writer(std::io::stderr)
        .init();

    let host = default_host();
    let mut prompter = TerminalPrompter::new();
    run(cli.command, &host, &mut prompter)
}

fn run<H, P>(command: Commands, host: &H, prompter: &mut P) -> anyhow::Result<()>
where
    H: DeviceHost,
    P: Prompter,
{
    match command {
        Commands::List => {
            let devices = use_cases::list_devices(host).context("failed to list security keys")?;
            if devices.is_empty() {
                println!("No security keys found.");
            } else {
                print!("{}", views::render_devices(&devices));
            }
        }

        Commands::Info { device, all } => {
            let scope = if all {
                InfoScope::All
            } else {
                InfoScope::One(device.device_path.as_deref())
            };
            let entries = use_cases::device_info(host, scope, prompter)
                .context("failed to read security key information")?;
            if entries.is_empty() {
                println!("No security keys found.");
            }
            for (i, entry) in entries.iter().enumerate() {
                if i > 0 {
                    println!("\n{}\n", "-".repeat(40));
                }
                match entry {
                    InfoEntry::Report(report) => print!(
                        "{}",
                        views::render_device_info(&report.device, &report.info, report.retries)
                    ),
                    InfoEntry::Failed { device, error } => {
                        println!("Error opening device {}: {error}", device.path)
                    }
                }
            }
        }

        Commands::Pin(PinCommands::Set { device, pin }) => {
            let pin = new_pin(pin)?;
            use_cases::set_pin(host, device.device_path.as_deref(), pin, prompter)
                .context("failed to set PIN")?;
            println!("PIN set successfully.");
        }

        Commands::Pin(PinCommands::Change {
            device,
            pin,
            new_pin: next,
        }) => {
            let target = CommandTarget::new(device.device_path, current_pin(pin)?);
            let next = new_pin(next)?;
            use_cases::change_pin(host, &target, next, prompter).context("failed to change PIN")?;
            println!("PIN changed successfully.");
        }

        Commands::Pin(PinCommands::Retries { device }) => {
            let counts = use_cases::pin_retries(host, device.device_path.as_deref(), prompter)
                .context("failed to read PIN retries")?;
            if let Some(pin) = counts.pin {
                println!("PIN retries: {pin}");
            }
            if let Some(uv) = counts.uv {
                println!("UV retries: {uv}");
            }
            if let Some(warning) = counts.warning() {
                println!("{warning}");
            }
        }

        Commands::Creds(CredsCommands::List { device, pin }) => {
            let records = use_cases::list_credentials(host, &target(device, pin)?, prompter)
                .context("failed to list credentials")?;
            if records.is_empty() {
                println!("No credentials found on this device.");
            } else {
                print!("{}", views::render_credentials(&records));
            }
        }

        Commands::Creds(CredsCommands::Delete {
            device,
            pin,
            credential_id,
        }) => {
            let target = target(device, pin)?;
            let deleted =
                use_cases::delete_credential(host, &target, credential_id.as_deref(), prompter)
                    .context("failed to delete credential")?;
            match deleted {
                Some(_) => println!("Credential deleted successfully."),
                None => println!("No credentials found on this device."),
            }
        }

        Commands::Config(ConfigCommands::AlwaysUv { device, pin }) => {
            use_cases::toggle_always_uv(host, &target(device, pin)?, prompter)
                .context("failed to toggle always UV")?;
            println!("Always UV toggled successfully.");
        }

        Commands::Config(ConfigCommands::EnterpriseAttestation { device, pin }) => {
            use_cases::enable_enterprise_attestation(host, &target(device, pin)?, prompter)
                .context("failed to enable enterprise attestation")?;
            println!("Enterprise Attestation enabled successfully.");
        }

        Commands::Reset { device, yes } => {
            let outcome = use_cases::reset(host, device.device_path.as_deref(), yes, prompter)
                .context("failed to reset security key")?;
            match outcome {
                ResetOutcome::Declined => println!("Reset canceled."),
                ResetOutcome::Completed => println!("Security key reset successfully."),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_cmd::Command;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_version_parameter() {
        let mut cmd = Command::cargo_bin("skm").unwrap();
        let assert = cmd.arg("--version").assert();
        assert.success();
    }

    #[test]
    fn test_cli_aliases() {
        let cli = Cli::try_parse_from(["skm", "c", "rm", "-i", "AQID", "-d", "/dev/hidraw0"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Creds(CredsCommands::Delete { credential_id: Some(ref id), .. }) if id == "AQID"
        ));

        let cli = Cli::try_parse_from(["skm", "cfg", "always-uv"]).unwrap();
        assert!(matches!(cli.command, Commands::Config(ConfigCommands::AlwaysUv { .. })));
    }

    #[test]
    fn test_info_all_accepted_with_device_path_from_env() {
        std::env::set_var("SKM_DEVICE_PATH", "/dev/hidraw0");
        let parsed = Cli::try_parse_from(["skm", "info", "--all"]);
        std::env::remove_var("SKM_DEVICE_PATH");

        let cli = parsed.unwrap();
        assert!(matches!(
            cli.command,
            Commands::Info { all: true, device: DeviceArgs { device_path: Some(ref p) } } if p == "/dev/hidraw0"
        ));
    }

    #[test]
    fn test_info_all_accepted_with_explicit_path() {
        let cli = Cli::try_parse_from(["skm", "info", "--all", "-d", "/dev/hidraw0"]).unwrap();
        assert!(matches!(cli.command, Commands::Info { all: true, .. }));
    }

    #[test]
    fn test_flag_value_forms() {
        let words: Vec<String> = ["skm", "creds", "rm", "-d", "/dev/hidraw0", "--pin=1234", "-i", ""]
            .iter()
            .map(|w| w.to_string())
            .collect();

        assert_eq!(flag_value(&words, "-d", "--device-path").as_deref(), Some("/dev/hidraw0"));
        assert_eq!(flag_value(&words, "-p", "--pin").as_deref(), Some("1234"));
        assert_eq!(flag_value(&words, "-x", "--missing"), None);
    }

    #[test]
    fn test_short_pin_rejected_before_touching_devices() {
        let mut cmd = Command::cargo_bin("skm").unwrap();
        let output = cmd
            .args(["pin", "set", "--pin", "12", "--device-path", "/dev/hidraw0"])
            .output()
            .unwrap();

        assert!(!output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("PIN must be at least 4 characters long"), "stderr: {stderr}");
    }

    #[test]
    fn test_invalid_credential_id() {
        let mut cmd = Command::cargo_bin("skm").unwrap();
        let output = cmd
            .args(["creds", "delete", "-i", "not base64!", "-p", "1234", "-d", "/dev/hidraw0"])
            .output()
            .unwrap();

        assert!(!output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("failed to decode credential ID"), "stderr: {stderr}");
    }

    #[test]
    #[cfg(not(feature = "hid"))]
    fn test_list_without_backend() {
        let mut cmd = Command::cargo_bin("skm").unwrap();
        let output = cmd.arg("list").output().unwrap();

        assert!(!output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("--features hid"), "stderr: {stderr}");
    }

    #[test]
    #[cfg_attr(not(feature = "hardware-tests"), ignore)] // Requires a FIDO2 key - enable with: --features hardware-tests
    fn test_cli_list_devices() {
        let mut cmd = Command::cargo_bin("skm").unwrap();
        let output = cmd.arg("list").output().unwrap();

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("PATH") || stdout.contains("No security keys found."));
    }
}
