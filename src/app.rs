//! 対話式メニュー
//!
//! 1. 個別テキスト解析 2. ファイル解析 3. 履歴 4. 終了

use crate::config::Config;
use crate::error::{DetectorError, Result};
use crate::history::{HistoryStore, LogFileInfo};
use crate::report;
use colored::Colorize;
use dialoguer::console::Term;
use dialoguer::{Confirm, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use sentiment_common::{AnalysisResult, BaseScorer, BatchOutcome, SentimentAnalyzer};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// メニュー項目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AnalyzeText,
    AnalyzeFile,
    History,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 4] = [
        MenuChoice::AnalyzeText,
        MenuChoice::AnalyzeFile,
        MenuChoice::History,
        MenuChoice::Exit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::AnalyzeText => "1. Analizar texto individual",
            MenuChoice::AnalyzeFile => "2. Analizar archivo de textos",
            MenuChoice::History => "3. Ver historial",
            MenuChoice::Exit => "4. Salir",
        }
    }
}

/// バッチ入力ファイルを検証
pub fn validate_file_path(input: &str) -> Result<PathBuf> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DetectorError::EmptyInput);
    }

    let path = PathBuf::from(trimmed);
    if !path.exists() {
        return Err(DetectorError::FileNotFound(trimmed.to_string()));
    }
    if !path.is_file() {
        return Err(DetectorError::NotAFile(trimmed.to_string()));
    }
    std::fs::File::open(&path).map_err(|e| DetectorError::Unreadable {
        path: trimmed.to_string(),
        reason: e.to_string(),
    })?;

    Ok(path)
}

/// 解析して進捗バーを表示
pub fn score_file_with_progress<S: BaseScorer>(
    analyzer: &SentimentAnalyzer<S>,
    path: &Path,
    parallel: bool,
) -> Result<BatchOutcome> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Analizando archivo: {}", path.display()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let outcome = analyzer.score_file(path, parallel);
    spinner.finish_and_clear();
    let outcome = outcome?;

    for failure in &outcome.failures {
        println!("{}", format!("Error analizando {}", failure).red());
    }
    Ok(outcome)
}

pub struct App<S: BaseScorer> {
    analyzer: SentimentAnalyzer<S>,
    history: HistoryStore,
    config: Config,
    term: Term,
}

impl<S: BaseScorer> App<S> {
    pub fn new(analyzer: SentimentAnalyzer<S>, config: Config) -> Self {
        let history = HistoryStore::new(config.log_dir.clone(), config.locale);
        Self {
            analyzer,
            history,
            config,
            term: Term::stdout(),
        }
    }

    /// メインループ
    pub fn run(&self) -> Result<()> {
        println!("{}", "Iniciando Detector de Sentimientos...".green());
        self.analyzer.self_check()?;
        println!("{}", "✓ Sistema listo para usar".green());
        self.pause()?;

        loop {
            self.clear();
            println!("{}", report::header("DETECTOR DE SENTIMIENTOS"));

            let labels: Vec<&str> = MenuChoice::ALL.iter().map(|c| c.label()).collect();
            let choice = Select::new()
                .with_prompt("Selecciona una opción")
                .items(&labels)
                .default(0)
                .interact_on_opt(&self.term)?;

            let result = match choice.map(|i| MenuChoice::ALL[i]) {
                Some(MenuChoice::AnalyzeText) => self.analyze_single_text(),
                Some(MenuChoice::AnalyzeFile) => self.analyze_file(),
                Some(MenuChoice::History) => self.view_history(),
                Some(MenuChoice::Exit) | None => break,
            };

            // 1操作の失敗でセッションは終わらない
            if let Err(e) = result {
                println!("{}", format!("Error inesperado: {}", e).red());
                self.pause()?;
            }
        }

        println!("{}", "\n¡Gracias por usar el Detector de Sentimientos!".green());
        println!("{}", "¡Hasta la próxima!".cyan());
        Ok(())
    }

    fn clear(&self) {
        self.term.clear_screen().ok();
    }

    fn pause(&self) -> Result<()> {
        Input::<String>::new()
            .with_prompt("Presione Enter para continuar...")
            .allow_empty(true)
            .interact_text_on(&self.term)?;
        Ok(())
    }

    fn confirm(&self, prompt: &str) -> Result<bool> {
        Ok(Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact_on(&self.term)?)
    }

    fn analyze_single_text(&self) -> Result<()> {
        self.clear();
        println!("{}", report::header("ANÁLISIS DE TEXTO INDIVIDUAL"));

        let text: String = Input::new()
            .with_prompt("Ingresa el texto a analizar")
            .validate_with(|input: &String| -> std::result::Result<(), &str> {
                if input.trim().is_empty() {
                    Err("La entrada no puede estar vacía")
                } else {
                    Ok(())
                }
            })
            .interact_text_on(&self.term)?;

        println!("{}", "\nAnalizando...".yellow());
        match self.analyzer.score_text(&text) {
            Ok(result) => {
                println!("{}", report::format_result(&result, self.config.locale));
                if self.confirm("¿Guardar resultado en historial?")? {
                    self.save(std::slice::from_ref(&result));
                }
            }
            Err(e) => println!("{}", format!("Error analizando el texto: {}", e).red()),
        }

        self.pause()
    }

    fn analyze_file(&self) -> Result<()> {
        self.clear();
        println!("{}", report::header("ANÁLISIS DE ARCHIVO"));
        println!("{}", "Ingrese la ruta del archivo con textos (uno por línea):".cyan());

        let path: String = Input::new()
            .with_prompt("Ruta del archivo")
            .validate_with(|input: &String| -> std::result::Result<(), String> {
                validate_file_path(input).map(|_| ()).map_err(|e| e.to_string())
            })
            .interact_text_on(&self.term)?;
        let path = validate_file_path(&path)?;

        let outcome = match score_file_with_progress(&self.analyzer, &path, self.config.parallel) {
            Ok(outcome) => outcome,
            Err(e) => {
                println!("{}", format!("Error procesando el archivo: {}", e).red());
                return self.pause();
            }
        };

        if outcome.is_empty() {
            println!("{}", "No se encontraron textos válidos en el archivo".yellow());
            return self.pause();
        }

        let results = &outcome.results;
        println!(
            "{}",
            format!("\n✓ Análisis completado: {} textos procesados", results.len()).green()
        );
        println!("{}", report::format_summary(self.analyzer.summarize(results).as_ref()));

        if self.confirm("¿Mostrar resultados detallados?")? {
            self.show_details(results)?;
        }

        self.save(results);
        self.pause()
    }

    fn show_details(&self, results: &[AnalysisResult]) -> Result<()> {
        println!("{}", report::separator());
        let page = self.config.details_page_size.max(1);

        for (i, result) in results.iter().enumerate() {
            let n = i + 1;
            println!("{}", format!("\n--- Resultado {}/{} ---", n, results.len()).cyan());
            println!("{}", report::format_result(result, self.config.locale));

            if n % page == 0 && n < results.len() && !self.confirm("¿Continuar mostrando resultados?")? {
                break;
            }
        }
        Ok(())
    }

    fn save(&self, results: &[AnalysisResult]) {
        match self.history.save(results) {
            Ok(path) => println!("Resultados guardados en: {}", path.display()),
            Err(e) => println!("{}", format!("Error guardando el log: {}", e).red()),
        }
    }

    fn view_history(&self) -> Result<()> {
        self.clear();
        println!("{}", report::header("HISTORIAL DE ANÁLISIS"));

        let logs = self.history.list()?;
        if logs.is_empty() {
            println!(
                "{}",
                format!(
                    "No hay archivos de historial disponibles en {}",
                    self.history.dir().display()
                )
                .yellow()
            );
            println!("{}", "Realice algunos análisis primero para generar historial".cyan());
            return self.pause();
        }

        let mut items: Vec<String> = logs.iter().map(LogFileInfo::display_line).collect();
        items.push("Volver".to_string());

        let choice = Select::new()
            .with_prompt("Archivos de historial disponibles")
            .items(&items)
            .default(0)
            .interact_on_opt(&self.term)?;

        match choice {
            Some(i) if i < logs.len() => self.display_log(&logs[i]),
            _ => Ok(()),
        }
    }

    fn display_log(&self, log: &LogFileInfo) -> Result<()> {
        self.clear();
        println!("{}", report::header(&format!("HISTORIAL: {}", log.file_name)));
        match self.history.read(log) {
            Ok(content) => println!("{}", content),
            Err(e) => println!("{}", format!("Error leyendo el archivo de historial: {}", e).red()),
        }
        self.pause()
    }
}
