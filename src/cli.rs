use clap::{Parser, Subcommand};
use sentiment_common::Locale;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sentiment")]
#[command(about = "Detector de sentimientos para textos y archivos de textos", long_about = None)]
pub struct Cli {
    /// Sin subcomando se abre el menú interactivo
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Muestra registros detallados
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Archivo JSON de palabras clave (positive/negative)
    #[arg(long, global = true)]
    pub keywords: Option<PathBuf>,

    /// Idioma de las descripciones (es/en)
    #[arg(long, global = true)]
    pub locale: Option<Locale>,

    /// Directorio del historial
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analiza un texto individual
    Text {
        /// Texto a analizar
        #[arg(required = true)]
        text: String,

        /// Guarda el resultado en el historial
        #[arg(short, long)]
        save: bool,

        /// Imprime el resultado como JSON
        #[arg(long)]
        json: bool,
    },

    /// Analiza un archivo de textos (uno por línea)
    File {
        /// Ruta del archivo
        #[arg(required = true)]
        path: PathBuf,

        /// Muestra cada resultado además del resumen
        #[arg(short, long)]
        details: bool,

        /// No guarda en el historial
        #[arg(long)]
        no_save: bool,

        /// Exporta los resultados a JSON
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Analiza las líneas en paralelo
        #[arg(long)]
        parallel: bool,
    },

    /// Lista o muestra el historial
    History {
        /// Número del archivo a mostrar (1 = más reciente)
        #[arg(long)]
        show: Option<usize>,
    },

    /// Menú interactivo
    Menu,

    /// Muestra o edita la configuración
    Config {
        /// Muestra la configuración
        #[arg(long)]
        show: bool,

        /// Directorio del historial
        #[arg(long)]
        set_log_dir: Option<PathBuf>,

        /// Archivo JSON de palabras clave
        #[arg(long)]
        set_keywords: Option<PathBuf>,

        /// Idioma (es/en)
        #[arg(long)]
        set_locale: Option<Locale>,
    },
}
