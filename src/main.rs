//! Scene Plot Editor: Replay-Werkzeug.
//!
//! Spielt ein TOML-Szenario gegen die flache Referenzszene ab und gibt die
//! entstandenen Formen samt Lifecycle-Events als JSON aus.
//!
//! Aufruf: `scene-plot-replay <szenario.toml> [--options <optionen.toml>] [--write-options <pfad>]`

use anyhow::Context;
use scene_plot_editor::{EditorOptions, Scenario};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    ReplayRunner::run()
}

/// Kommandozeilen-Argumente des Replays.
#[derive(Debug, PartialEq)]
struct Args {
    scenario: PathBuf,
    options: Option<PathBuf>,
    write_options: Option<PathBuf>,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> anyhow::Result<Self> {
        let mut scenario = None;
        let mut options = None;
        let mut write_options = None;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--options" => {
                    let path = args.next().context("--options erwartet einen Pfad")?;
                    options = Some(PathBuf::from(path));
                }
                "--write-options" => {
                    let path = args.next().context("--write-options erwartet einen Pfad")?;
                    write_options = Some(PathBuf::from(path));
                }
                flag if flag.starts_with("--") => anyhow::bail!("Unbekannte Option: {}", flag),
                path if scenario.is_none() => scenario = Some(PathBuf::from(path)),
                _ => anyhow::bail!("Mehr als eine Szenario-Datei angegeben"),
            }
        }
        Ok(Self {
            scenario: scenario.context(
                "Aufruf: scene-plot-replay <szenario.toml> [--options <optionen.toml>] [--write-options <pfad>]",
            )?,
            options,
            write_options,
        })
    }
}

struct ReplayRunner;

impl ReplayRunner {
    fn run() -> ExitCode {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .init();

        log::info!("Scene Plot Replay v{} startet...", env!("CARGO_PKG_VERSION"));

        match Self::replay() {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                log::error!("Replay fehlgeschlagen: {:#}", err);
                ExitCode::FAILURE
            }
        }
    }

    fn replay() -> anyhow::Result<()> {
        let args = Args::parse(std::env::args().skip(1))?;
        let options_path = args.options.unwrap_or_else(EditorOptions::config_path);
        let options = EditorOptions::load_from_file(&options_path);
        if let Some(path) = &args.write_options {
            options
                .save_to_file(path)
                .with_context(|| format!("Optionen nicht schreibbar: {}", path.display()))?;
        }

        let scenario = Scenario::load(&args.scenario)?;
        let report = scenario.run(options)?;
        let json = serde_json::to_string_pretty(&report).context("Report nicht serialisierbar")?;
        println!("{}", json);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> anyhow::Result<Args> {
        Args::parse(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_argumente_mit_optionen() {
        let parsed = args(&["szene.toml", "--options", "opt.toml"]).expect("gültig");
        assert_eq!(parsed.scenario, PathBuf::from("szene.toml"));
        assert_eq!(parsed.options, Some(PathBuf::from("opt.toml")));
        assert_eq!(parsed.write_options, None);
    }

    #[test]
    fn test_argumente_mit_optionen_export() {
        let parsed = args(&["--write-options", "aktiv.toml", "szene.toml"]).expect("gültig");
        assert_eq!(parsed.scenario, PathBuf::from("szene.toml"));
        assert_eq!(parsed.write_options, Some(PathBuf::from("aktiv.toml")));
        assert!(args(&["szene.toml", "--write-options"]).is_err());
    }

    #[test]
    fn test_fehlendes_szenario_ist_fehler() {
        assert!(args(&[]).is_err());
        assert!(args(&["--options"]).is_err());
        assert!(args(&["a.toml", "b.toml"]).is_err());
        assert!(args(&["a.toml", "--verbose"]).is_err());
    }
}
