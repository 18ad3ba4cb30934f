use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::{get_config_path, Config, RevealConfig};
use crate::config::{DEFAULT_SYMPTOM_DELAY, DEFAULT_TRACKER_DELAY};
use crate::i18n::Locale;
use crate::scoring::{ScoringConfig, DEFAULT_SEVERE_CRAMPS_MULTIPLIER};

/// Line-oriented prompts over any reader/writer pair.
struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Prompt with a message and return the trimmed input.
    fn prompt(&mut self, message: &str) -> Result<String> {
        write!(self.output, "{}", message).context("Failed to write prompt")?;
        self.output.flush().context("Failed to flush output")?;
        let mut line = String::new();
        self.input
            .read_line(&mut line)
            .context("Failed to read input")?;
        Ok(line.trim().to_string())
    }

    /// Prompt with a default value. Returns the default if input is empty.
    fn prompt_with_default(&mut self, message: &str, default: &str) -> Result<String> {
        let input = self.prompt(&format!("{} [{}]: ", message, default))?;
        if input.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(input)
        }
    }

    /// Yes/no question. Empty input picks the default.
    fn prompt_yes_no(&mut self, message: &str, default_yes: bool) -> Result<bool> {
        let hint = if default_yes { "Y/n" } else { "y/N" };
        let input = self.prompt(&format!("{} [{}]: ", message, hint))?.to_lowercase();
        if input.is_empty() {
            Ok(default_yes)
        } else {
            Ok(input == "y" || input == "yes")
        }
    }

    fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text).context("Failed to write output")
    }

    /// Keep asking until `parse` accepts the answer.
    fn prompt_until<T>(
        &mut self,
        message: &str,
        default: &str,
        parse: impl Fn(&str) -> Result<T>,
    ) -> Result<T> {
        loop {
            let answer = self.prompt_with_default(message, default)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(e) => self.say(&format!("  Invalid: {}. Try again.", e))?,
            }
        }
    }
}

fn parse_delay(s: &str) -> Result<String> {
    humantime::parse_duration(s)?;
    Ok(s.to_string())
}

fn parse_multiplier(s: &str) -> Result<f64> {
    let value: f64 = s.parse()?;
    if !value.is_finite() || value <= 0.0 {
        anyhow::bail!("must be a positive number");
    }
    Ok(value)
}

/// Ask the user for each setting, offering the defaults.
fn ask_config<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> Result<Config> {
    prompter.say("Pain Assess Configuration")?;
    prompter.say("=========================")?;

    let locale = prompter.prompt_until("Display language (en/zh)", "en", |s| s.parse::<Locale>())?;

    let symptom_delay = prompter.prompt_until(
        "Delay before showing assessment results",
        DEFAULT_SYMPTOM_DELAY,
        parse_delay,
    )?;
    let tracker_delay = prompter.prompt_until(
        "Delay before showing pain tracker results",
        DEFAULT_TRACKER_DELAY,
        parse_delay,
    )?;

    let scoring = if prompter.prompt_yes_no("Configure scoring? (n accepts defaults)", false)? {
        let multiplier = prompter.prompt_until(
            "Severe cramps multiplier",
            &DEFAULT_SEVERE_CRAMPS_MULTIPLIER.to_string(),
            parse_multiplier,
        )?;
        ScoringConfig {
            severe_cramps_multiplier: Some(multiplier),
            ..ScoringConfig::default()
        }
    } else {
        ScoringConfig::default()
    };

    Ok(Config {
        locale: Some(locale),
        reveal: Some(RevealConfig {
            symptom_assessment: Some(symptom_delay),
            pain_tracker: Some(tracker_delay),
        }),
        scoring: Some(scoring),
    })
}

/// Serialize `config` and write it to `path` atomically, creating parent
/// directories as needed.
pub fn write_config(path: &Path, config: &Config) -> Result<()> {
    let yaml = serde_saphyr::to_string(config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(yaml.as_bytes())
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save config to {}", path.display()))?;

    info!(path = %path.display(), "wrote config");
    Ok(())
}

/// Create a config file.
///
/// With `interactive` the user is asked for each setting on stdin;
/// otherwise the defaults are written. An existing file is only replaced
/// when `force` is set. Returns the path written, or `None` if the user
/// declined to overwrite.
pub fn run_init(path: Option<PathBuf>, interactive: bool, force: bool) -> Result<Option<PathBuf>> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut prompter = Prompter {
        input: stdin.lock(),
        output: stdout.lock(),
    };
    run_init_with(&mut prompter, path, interactive, force)
}

fn run_init_with<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    path: Option<PathBuf>,
    interactive: bool,
    force: bool,
) -> Result<Option<PathBuf>> {
    let config_path = match path {
        Some(path) => path,
        None => get_config_path()?,
    };

    let config = if interactive {
        ask_config(prompter)?
    } else {
        Config::template()
    };

    if config_path.exists() && !force {
        let overwrite = interactive
            && prompter.prompt_yes_no(
                &format!("Config already exists at {}. Overwrite?", config_path.display()),
                false,
            )?;
        if !overwrite {
            if !interactive {
                anyhow::bail!(
                    "Config already exists at {}. Use --force to overwrite.",
                    config_path.display()
                );
            }
            prompter.say("Aborted.")?;
            return Ok(None);
        }
    }

    write_config(&config_path, &config)?;
    Ok(Some(config_path))
}
