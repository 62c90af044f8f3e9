//! コンソール表示用の整形

use crate::error::DetectorError;
use colored::{Color, Colorize};
use sentiment_common::{
    describe_polarity_intensity_in, describe_subjectivity_in, AnalysisResult, AnalysisSummary,
    Locale, Sentiment,
};

/// ラベルの表示色
pub fn sentiment_color(sentiment: Sentiment) -> Color {
    match sentiment {
        Sentiment::Positive => Color::Green,
        Sentiment::Negative => Color::Red,
        Sentiment::Neutral => Color::Yellow,
    }
}

/// 終了時のエラー表示（Debug ではなくメッセージ本文）
pub fn format_error(error: &DetectorError) -> String {
    error.to_string().red().to_string()
}

pub fn header(title: &str) -> String {
    let rule = "=".repeat(50);
    format!(
        "{}\n{}\n{}",
        rule.cyan(),
        format!(" {:^46} ", title).cyan(),
        rule.cyan()
    )
}

pub fn separator() -> String {
    "-".repeat(50).yellow().to_string()
}

/// 1件の結果
pub fn format_result(result: &AnalysisResult, locale: Locale) -> String {
    let color = sentiment_color(result.sentiment());
    let mut lines = vec![
        String::new(),
        "RESULTADO:".cyan().to_string(),
        format!("Texto: \"{}\"", result.text()),
        format!("Sentimiento: {}", result.sentiment().label(locale))
            .color(color)
            .to_string(),
        format!(
            "Polaridad: {} ({})",
            result.polarity(),
            describe_polarity_intensity_in(result.polarity(), locale)
        ),
        format!(
            "Subjetividad: {} ({})",
            result.subjectivity(),
            describe_subjectivity_in(result.subjectivity(), locale)
        ),
    ];
    if let Some(line) = result.line_number() {
        lines.push(format!("Línea del archivo: {}", line));
    }
    lines.push(format!("Fecha: {}", result.timestamp_display()));
    lines.push(String::new());
    lines.join("\n")
}

/// 統計サマリー（None なら「データなし」）
pub fn format_summary(summary: Option<&AnalysisSummary>) -> String {
    let Some(s) = summary else {
        return "No hay datos para mostrar resumen".yellow().to_string();
    };

    [
        String::new(),
        "RESUMEN ESTADÍSTICO:".cyan().to_string(),
        format!("Total de textos analizados: {}", s.total_texts),
        String::new(),
        format!("Positivos: {} ({:.1}%)", s.positive_count, s.positive_percentage)
            .green()
            .to_string(),
        format!("Negativos: {} ({:.1}%)", s.negative_count, s.negative_percentage)
            .red()
            .to_string(),
        format!("Neutrales: {} ({:.1}%)", s.neutral_count, s.neutral_percentage)
            .yellow()
            .to_string(),
        String::new(),
        format!("Polaridad promedio: {}", s.average_polarity),
        format!("Subjetividad promedio: {}", s.average_subjectivity),
        String::new(),
    ]
    .join("\n")
}
