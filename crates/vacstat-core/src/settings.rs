use clap::Parser;

use crate::error::{Result, VacstatError};

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Vacancy statistics report generator
#[derive(Parser, Debug, Clone)]
#[command(
    name = "vacstat",
    about = "Aggregate job-posting statistics by year and region into a spreadsheet and charts",
    version
)]
pub struct Settings {
    /// Path to the CSV export of vacancies
    pub file: String,

    /// Profession to break the yearly statistics down by (substring match)
    pub profession: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse CLI arguments and apply the `--debug` override.
    pub fn load() -> Self {
        Self::resolve(Self::parse())
    }

    /// Same as [`Settings::load`] but from an explicit argument list, enabling
    /// unit-testing without spawning subprocesses.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::resolve(Self::parse_from(args))
    }

    fn resolve(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// Validate user input before any I/O happens.
    ///
    /// A usable file name is non-empty and carries an extension; the
    /// profession must be non-empty. Both failures are fatal.
    pub fn validate(&self) -> Result<()> {
        if self.file.is_empty() || !self.file.contains('.') {
            return Err(VacstatError::InvalidFileName(self.file.clone()));
        }
        if self.profession.is_empty() {
            return Err(VacstatError::EmptyProfession);
        }
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
