//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{CommandFactory, Parser};
use std::ffi::OsString;

use web3_scaffold::ProjectRequest;

/// create-web3-app - Scaffold a new web3 application
#[derive(Parser, Debug, Default, PartialEq, Eq)]
#[command(name = "create-web3-app")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to create the project in
    #[arg(value_name = "project-directory")]
    pub project_directory: Option<String>,

    /// Install dependencies with npm
    #[arg(long)]
    pub use_npm: bool,

    /// Install dependencies with Yarn
    #[arg(long)]
    pub use_yarn: bool,

    /// Install dependencies with pnpm
    #[arg(long)]
    pub use_pnpm: bool,

    /// Do not initialize a git repository
    #[arg(long)]
    pub skip_git: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to a config.yaml
    #[arg(short, long)]
    pub config: Option<Utf8PathBuf>,
}

impl Cli {
    /// Build the pipeline request
    pub fn to_request(&self) -> ProjectRequest {
        ProjectRequest {
            raw_name: self.project_directory.clone().unwrap_or_default(),
            use_npm: self.use_npm,
            use_yarn: self.use_yarn,
            use_pnpm: self.use_pnpm,
            skip_git: self.skip_git,
        }
    }
}

/// Arguments clap will accept, plus the ones dropped
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PartitionedArgs {
    pub known: Vec<OsString>,
    pub ignored: Vec<String>,
}

/// Drop unknown options and extra positionals so parsing never fails on them.
///
/// The first item (the binary name) is always kept. Long options are matched
/// by name (`--use-pnpm`, `--config=x`); short clusters like `-vv` are kept
/// only if every letter is known. Values of options that take one are kept
/// with their option.
pub fn partition_args<I>(args: I) -> PartitionedArgs
where
    I: IntoIterator<Item = OsString>,
{
    let mut command = Cli::command();
    command.build();
    let mut longs: Vec<(String, bool)> = vec![("help".into(), false), ("version".into(), false)];
    let mut shorts: Vec<(char, bool)> = vec![('h', false), ('V', false)];
    for arg in command.get_arguments() {
        if arg.is_positional() {
            continue;
        }
        let takes_value = arg.get_action().takes_values();
        if let Some(long) = arg.get_long() {
            longs.push((long.to_string(), takes_value));
        }
        if let Some(short) = arg.get_short() {
            shorts.push((short, takes_value));
        }
    }

    let mut out = PartitionedArgs::default();
    let mut iter = args.into_iter();
    if let Some(bin) = iter.next() {
        out.known.push(bin);
    }

    let mut seen_positional = false;
    let mut only_positionals = false;
    let mut expect_value = false;

    for raw in iter {
        if expect_value {
            out.known.push(raw);
            expect_value = false;
            continue;
        }

        let text = raw.to_string_lossy().into_owned();

        if !only_positionals && text == "--" {
            only_positionals = true;
            out.known.push(raw);
            continue;
        }

        if !only_positionals && text.starts_with("--") {
            let body = &text[2..];
            let (name, inline_value) = match body.split_once('=') {
                Some((name, _)) => (name, true),
                None => (body, false),
            };
            match longs.iter().find(|(l, _)| l == name) {
                Some((_, takes_value)) => {
                    expect_value = *takes_value && !inline_value;
                    out.known.push(raw);
                }
                None => out.ignored.push(text),
            }
            continue;
        }

        if !only_positionals && text.starts_with('-') && text.len() > 1 {
            let letters: Vec<char> = text[1..].chars().collect();
            let mut known = true;
            let mut takes_value = false;
            for (i, c) in letters.iter().enumerate() {
                match shorts.iter().find(|(s, _)| s == c) {
                    Some((_, tv)) => {
                        if *tv {
                            // `-c file` or `-cfile`; the rest is the value
                            takes_value = i == letters.len() - 1;
                            break;
                        }
                    }
                    None => {
                        known = false;
                        break;
                    }
                }
            }
            if known {
                expect_value = takes_value;
                out.known.push(raw);
            } else {
                out.ignored.push(text);
            }
            continue;
        }

        if seen_positional {
            out.ignored.push(text);
        } else {
            seen_positional = true;
            out.known.push(raw);
        }
    }

    out
}
