use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::AppConfig;

const USAGE: &str = "usage: billsplit <fragments.json> [--select 1,2,...] [--remote]";

#[derive(Debug, PartialEq)]
struct Args {
    fragments: PathBuf,
    select: Option<Vec<u32>>,
    remote: bool,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut fragments = None;
        let mut select = None;
        let mut remote = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--remote" => remote = true,
                "--select" => {
                    let list = args.next().context("--select needs a comma-separated id list")?;
                    select = Some(parse_ids(&list)?);
                }
                flag if flag.starts_with("--") => bail!("unknown flag {flag}\n{USAGE}"),
                path if fragments.is_none() => fragments = Some(PathBuf::from(path)),
                extra => bail!("unexpected argument {extra}\n{USAGE}"),
            }
        }

        let fragments = fragments.context(USAGE)?;
        Ok(Self { fragments, select, remote })
    }
}

fn parse_ids(list: &str) -> Result<Vec<u32>> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<u32>().with_context(|| format!("invalid item id {s:?}")))
        .collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse(std::env::args().skip(1))?;
    let config = AppConfig::load()?;
    tracing::debug!(?config, "configuration loaded");

    let fragments = commands::read_fragments(&args.fragments)?;
    tracing::info!("Read {} fragments from {}", fragments.len(), args.fragments.display());

    let output = if args.remote {
        let outcome = commands::parse_remote(&fragments, &config.remote).await?;
        serde_json::to_string_pretty(&outcome)?
    } else {
        let report = commands::parse_items(&fragments, &config.parser, args.select.as_deref());
        serde_json::to_string_pretty(&report)?
    };
    println!("{output}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args> {
        Args::parse(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn path_only() {
        let a = args(&["scan.json"]).unwrap();
        assert_eq!(a, Args { fragments: "scan.json".into(), select: None, remote: false });
    }

    #[test]
    fn select_and_remote_in_any_order() {
        let a = args(&["--remote", "scan.json", "--select", "2, 0,"]).unwrap();
        assert_eq!(a.select, Some(vec![2, 0]));
        assert!(a.remote);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(args(&[]).is_err());
        assert!(args(&["scan.json", "--select"]).is_err());
        assert!(args(&["scan.json", "--select", "one"]).is_err());
        assert!(args(&["scan.json", "--verbose"]).is_err());
        assert!(args(&["a.json", "b.json"]).is_err());
    }
}
