use clap::Parser;
use doctor_finder::app::render::{render, ResultPage};
use doctor_finder::utils::error::ErrorSeverity;
use doctor_finder::utils::{logger, validation::Validate};
use doctor_finder::{
    active_filter_count, all_specialties, derive_view, suggestions, CliConfig, Directory,
    FinderError, HttpDirectorySource,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(&config).await {
        tracing::error!(
            "❌ doctor-finder failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run(config: &CliConfig) -> Result<(), FinderError> {
    let settings = config.settings()?;
    settings.validate()?;
    tracing::debug!("Effective settings: {:?}", settings);

    let session = config.open_session();
    let filters = session.filters();

    let source = HttpDirectorySource::new(&settings)?;
    let mut directory = Directory::spawn(source);
    if directory.is_loading() {
        tracing::info!("Loading doctors...");
    }
    let snapshot = directory.ready().await;
    let doctors = snapshot.doctors.as_slice();

    if config.list_specialties {
        for specialty in all_specialties(doctors) {
            println!("{}", specialty);
        }
        return Ok(());
    }

    if config.suggest {
        for doctor in suggestions(doctors, filters.search.as_deref().unwrap_or_default()) {
            println!("{}", doctor.name);
        }
        return Ok(());
    }

    let view = derive_view(doctors, filters);
    let page = ResultPage::new(
        &view,
        doctors.len(),
        active_filter_count(filters),
        session.address(),
    );
    println!("{}", render(settings.format, &page)?);

    Ok(())
}
