use clap::Parser;
use sentiment_detector::{app, cli, config, error, history, report};
use cli::{Cli, Commands};
use colored::Colorize;
use config::Config;
use error::Result;
use sentiment_common::SentimentAnalyzer;
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}", report::format_error(&e));
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::load()?;
    // フラグは今回の実行だけ上書き
    let stored = config.clone();
    if let Some(path) = &cli.keywords {
        config.keywords_path = Some(path.clone());
    }
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }
    if let Some(dir) = &cli.log_dir {
        config.log_dir = dir.clone();
    }

    let analyzer = SentimentAnalyzer::with_keywords(config.keywords()?);
    let store = history::HistoryStore::new(config.log_dir.clone(), config.locale);

    match cli.command {
        None | Some(Commands::Menu) => {
            app::App::new(analyzer, config).run()?;
        }

        Some(Commands::Text { text, save, json }) => {
            analyzer.self_check()?;
            let result = analyzer.score_text(&text)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", report::format_result(&result, config.locale));
            }

            if save {
                let path = store.save(std::slice::from_ref(&result))?;
                println!("✔ Resultados guardados en: {}", path.display());
            }
        }

        Some(Commands::File { path, details, no_save, output, parallel }) => {
            analyzer.self_check()?;
            let path = app::validate_file_path(&path.to_string_lossy())?;
            let outcome = app::score_file_with_progress(&analyzer, &path, parallel || config.parallel)?;

            if outcome.is_empty() {
                println!("{}", "No se encontraron textos válidos en el archivo".yellow());
                return Ok(());
            }

            let results = &outcome.results;
            println!(
                "{}",
                format!("✓ Análisis completado: {} textos procesados", results.len()).green()
            );
            println!("{}", report::format_summary(analyzer.summarize(results).as_ref()));

            if details {
                println!("{}", report::separator());
                for (i, result) in results.iter().enumerate() {
                    println!("{}", format!("--- Resultado {}/{} ---", i + 1, results.len()).cyan());
                    println!("{}", report::format_result(result, config.locale));
                }
            }

            if let Some(output) = output {
                let json = serde_json::to_string_pretty(results)?;
                std::fs::write(&output, json)?;
                println!("✔ JSON exportado: {}", output.display());
            }

            if !no_save {
                let log = store.save(results)?;
                println!("✔ Resultados guardados en: {}", log.display());
            }
        }

        Some(Commands::History { show }) => {
            let logs = store.list()?;
            if logs.is_empty() {
                println!(
                    "{}",
                    format!("No hay archivos de historial disponibles en {}", store.dir().display())
                        .yellow()
                );
                return Ok(());
            }

            match show {
                Some(number) => {
                    let log = store.select(number)?;
                    println!("{}", report::header(&format!("HISTORIAL: {}", log.file_name)));
                    println!("{}", store.read(&log)?);
                }
                None => {
                    println!("{}", "Archivos de historial disponibles:".cyan());
                    for (i, log) in logs.iter().enumerate() {
                        println!("{}. {}", i + 1, log.display_line());
                    }
                }
            }
        }

        Some(Commands::Config { show, set_log_dir, set_keywords, set_locale }) => {
            let mut stored = stored;
            let changed = set_log_dir.is_some() || set_keywords.is_some() || set_locale.is_some();

            if let Some(dir) = set_log_dir {
                stored.log_dir = dir;
            }
            if let Some(path) = set_keywords {
                // 保存前に読めるか確認
                sentiment_common::KeywordConfig::from_json_file(&path)?;
                stored.keywords_path = Some(path);
            }
            if let Some(locale) = set_locale {
                stored.locale = locale;
            }
            if changed {
                stored.save()?;
                println!("✔ Configuración guardada: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("Configuración:");
                println!("  Historial: {}", stored.log_dir.display());
                println!(
                    "  Palabras clave: {}",
                    stored
                        .keywords_path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "predeterminadas (español)".into())
                );
                println!("  Idioma: {}", stored.locale);
                println!("  Resultados por página: {}", stored.details_page_size);
                println!("  Paralelo: {}", if stored.parallel { "sí" } else { "no" });
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
